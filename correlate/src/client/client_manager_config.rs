use crate::correlation::correlation_id::CorrelationId;

pub struct ClientManagerConfig {
    pending_requests_capacity: usize,
    clients_capacity: usize,
    first_correlation_id: CorrelationId,
}

impl ClientManagerConfig {
    pub fn new(pending_requests_capacity: usize,
               clients_capacity: usize,
               first_correlation_id: CorrelationId) -> Self {
        return ClientManagerConfig {
            pending_requests_capacity,
            clients_capacity,
            first_correlation_id,
        };
    }

    pub fn get_pending_requests_capacity(&self) -> usize {
        return self.pending_requests_capacity;
    }

    pub fn get_clients_capacity(&self) -> usize {
        return self.clients_capacity;
    }

    pub fn get_first_correlation_id(&self) -> CorrelationId {
        return self.first_correlation_id;
    }
}

impl Default for ClientManagerConfig {
    fn default() -> Self {
        return Self::new(0, 0, 1);
    }
}
