use crate::correlation::correlation_id::CorrelationId;
use crate::error::NativeError;
use crate::native::payload::{AnyFunction, Payload};

pub type NativeClientId = i32;

/// The opaque component that owns native clients, accepts queries and emits events.
pub trait NativeSource: Send + Sync {
    fn create(&self) -> Result<NativeClientId, NativeError>;

    /// Fire-and-forget; the response, if any, arrives later in an event batch.
    fn send(&self, client_id: NativeClientId, correlation_id: CorrelationId, query: AnyFunction);

    /// Answers inline, for the queries the native source can execute synchronously.
    fn execute(&self, query: AnyFunction) -> Payload;
}

/// Invoked by the native source on its own thread(s) with every batch of events.
/// Batches for one client are delivered one at a time.
pub trait EventBatchListener: Send + Sync {
    fn on_event_batch(&self,
                      client_id: NativeClientId,
                      is_closed: bool,
                      correlation_ids: Vec<CorrelationId>,
                      payloads: Vec<Payload>);
}

pub struct EventBatch {
    pub client_id: NativeClientId,
    pub is_closed: bool,
    pub correlation_ids: Vec<CorrelationId>,
    pub payloads: Vec<Payload>,
}

impl EventBatch {
    pub fn new(client_id: NativeClientId,
               is_closed: bool,
               correlation_ids: Vec<CorrelationId>,
               payloads: Vec<Payload>) -> Self {
        return EventBatch { client_id, is_closed, correlation_ids, payloads };
    }

    pub fn single(client_id: NativeClientId, correlation_id: CorrelationId, payload: Payload) -> Self {
        return Self::new(client_id, false, vec![correlation_id], vec![payload]);
    }

    pub fn closing(client_id: NativeClientId) -> Self {
        return Self::new(client_id, true, Vec::new(), Vec::new());
    }

    pub fn deliver_to(self, listener: &dyn EventBatchListener) {
        listener.on_event_batch(self.client_id, self.is_closed, self.correlation_ids, self.payloads);
    }
}
