use dashmap::DashMap;

use crate::correlation::correlation_id::CorrelationId;
use crate::handler::handler::Handler;

/// Handlers waiting for the response to a sent query, keyed by its correlation id.
///
/// Entries are inserted by any sending thread and taken out by the delivery path.
/// A handler whose response never arrives stays here for the life of the client.
pub struct PendingRequests {
    pending_requests: DashMap<CorrelationId, Handler>,
}

impl PendingRequests {
    pub fn new() -> Self {
        return Self::new_with_capacity(0);
    }

    pub fn new_with_capacity(capacity: usize) -> Self {
        return PendingRequests { pending_requests: DashMap::with_capacity(capacity) };
    }

    pub fn add(&self, correlation_id: CorrelationId, handler: Handler) {
        self.pending_requests.insert(correlation_id, handler);
    }

    /// Removes and returns the handler. A second call with the same id returns `None`.
    pub fn take(&self, correlation_id: CorrelationId) -> Option<Handler> {
        return self.pending_requests.remove(&correlation_id).map(|(_, handler)| handler);
    }

    pub fn contains(&self, correlation_id: CorrelationId) -> bool {
        return self.pending_requests.contains_key(&correlation_id);
    }

    pub fn len(&self) -> usize {
        return self.pending_requests.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.pending_requests.is_empty();
    }
}

impl Default for PendingRequests {
    fn default() -> Self {
        return Self::new();
    }
}
