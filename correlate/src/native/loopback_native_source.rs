use std::io;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::{Mutex, OnceLock, PoisonError, Weak};

use tracing::debug;

use crate::correlation::correlation_id::{CorrelationId, RESERVED_CORRELATION_ID};
use crate::error::NativeError;
use crate::native::delivery_queue::DeliveryQueue;
use crate::native::native_source::{EventBatch, EventBatchListener, NativeClientId, NativeSource};
use crate::native::payload::{AnyFunction, Payload};

/// Computes the reply to a query; `None` means the query is never answered.
pub type Responder = Box<dyn Fn(AnyFunction) -> Option<Payload> + Send + Sync>;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SentQuery {
    pub client_id: NativeClientId,
    pub correlation_id: CorrelationId,
}

/// An in-process native source. Replies to sent queries, updates and closures are
/// delivered through a `DeliveryQueue` once a listener is attached.
pub struct LoopbackNativeSource {
    next_client_id: AtomicI32,
    fail_next_creation: AtomicBool,
    responder: Responder,
    sent_queries: Mutex<Vec<SentQuery>>,
    delivery_queue: OnceLock<DeliveryQueue>,
    attach_lock: Mutex<()>,
}

impl LoopbackNativeSource {
    pub fn new(responder: Responder) -> Self {
        return LoopbackNativeSource {
            next_client_id: AtomicI32::new(1),
            fail_next_creation: AtomicBool::new(false),
            responder,
            sent_queries: Mutex::new(Vec::new()),
            delivery_queue: OnceLock::new(),
            attach_lock: Mutex::new(()),
        };
    }

    /// Answers every query with the query itself.
    pub fn echoing() -> Self {
        return Self::new(Box::new(|query: AnyFunction| -> Option<Payload> { Some(Payload::Object(query)) }));
    }

    /// Never answers a sent query.
    pub fn silent() -> Self {
        return Self::new(Box::new(|_: AnyFunction| -> Option<Payload> { None }));
    }

    /// Only the first attached listener receives batches. Later attaches build nothing.
    pub fn attach(&self, listener: Weak<dyn EventBatchListener>) -> io::Result<()> {
        let _attaching = self.attach_lock.lock().unwrap_or_else(PoisonError::into_inner);
        if self.delivery_queue.get().is_some() {
            return Ok(());
        }
        let delivery_queue = DeliveryQueue::new(listener)?;
        self.delivery_queue.get_or_init(move || delivery_queue);
        return Ok(());
    }

    pub fn is_attached(&self) -> bool {
        return self.delivery_queue.get().is_some();
    }

    pub fn fail_next_creation(&self) {
        self.fail_next_creation.store(true, Ordering::Release);
    }

    pub fn sent_queries(&self) -> Vec<SentQuery> {
        return self.sent_queries.lock().unwrap_or_else(PoisonError::into_inner).clone();
    }

    pub fn push_update(&self, client_id: NativeClientId, payload: Payload) -> bool {
        return self.push_batch(EventBatch::single(client_id, RESERVED_CORRELATION_ID, payload));
    }

    pub fn close_client(&self, client_id: NativeClientId) -> bool {
        return self.push_batch(EventBatch::closing(client_id));
    }

    pub fn push_batch(&self, batch: EventBatch) -> bool {
        let Some(delivery_queue) = self.delivery_queue.get() else {
            debug!(client_id = batch.client_id, "no listener attached, event batch dropped");
            return false;
        };
        return delivery_queue.submit(batch).is_ok();
    }
}

impl NativeSource for LoopbackNativeSource {
    fn create(&self) -> Result<NativeClientId, NativeError> {
        if self.fail_next_creation.swap(false, Ordering::AcqRel) {
            return Err(NativeError::CreationFailed("induced creation failure".to_string()));
        }
        return Ok(self.next_client_id.fetch_add(1, Ordering::Relaxed));
    }

    fn send(&self, client_id: NativeClientId, correlation_id: CorrelationId, query: AnyFunction) {
        self.sent_queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(SentQuery { client_id, correlation_id });

        if let Some(payload) = (self.responder)(query) {
            self.push_batch(EventBatch::single(client_id, correlation_id, payload));
        }
    }

    fn execute(&self, query: AnyFunction) -> Payload {
        return (self.responder)(query).unwrap_or_else(|| Payload::error(400, "the query can not be executed synchronously"));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    use crate::native::loopback_native_source::{LoopbackNativeSource, SentQuery};
    use crate::native::loopback_native_source::tests::setup::ForwardingListener;
    use crate::native::native_source::{EventBatchListener, NativeSource};
    use crate::native::payload::Payload;

    mod setup {
        use std::sync::Mutex;
        use std::sync::mpsc::Sender;

        use crate::correlation::correlation_id::CorrelationId;
        use crate::native::native_source::{EventBatchListener, NativeClientId};
        use crate::native::payload::Payload;

        pub struct ForwardingListener {
            pub sender: Mutex<Sender<(NativeClientId, bool, Vec<CorrelationId>, Vec<Payload>)>>,
        }

        impl EventBatchListener for ForwardingListener {
            fn on_event_batch(&self,
                              client_id: NativeClientId,
                              is_closed: bool,
                              correlation_ids: Vec<CorrelationId>,
                              payloads: Vec<Payload>) {
                let _ = self.sender.lock().unwrap().send((client_id, is_closed, correlation_ids, payloads));
            }
        }
    }

    #[test]
    fn create_sequential_client_ids() {
        let native_source = LoopbackNativeSource::silent();
        assert_eq!(1, native_source.create().unwrap());
        assert_eq!(2, native_source.create().unwrap());
    }

    #[test]
    fn fail_only_the_next_creation() {
        let native_source = LoopbackNativeSource::silent();
        native_source.fail_next_creation();

        assert!(native_source.create().is_err());
        assert_eq!(1, native_source.create().unwrap());
    }

    #[test]
    fn execute_with_the_responder() {
        let native_source = LoopbackNativeSource::echoing();
        let payload = native_source.execute(Box::new("ping".to_string()));
        assert_eq!("ping", payload.downcast_ref::<String>().unwrap());
    }

    #[test]
    fn execute_an_unanswered_query() {
        let native_source = LoopbackNativeSource::silent();
        assert!(native_source.execute(Box::new(1)).is_error());
    }

    #[test]
    fn record_sent_queries() {
        let native_source = LoopbackNativeSource::silent();
        native_source.send(1, 10, Box::new(()));
        native_source.send(1, 11, Box::new(()));

        assert_eq!(
            vec![SentQuery { client_id: 1, correlation_id: 10 }, SentQuery { client_id: 1, correlation_id: 11 }],
            native_source.sent_queries()
        );
    }

    #[test]
    fn push_without_a_listener() {
        let native_source = LoopbackNativeSource::silent();
        assert!(!native_source.push_update(1, Payload::object(1)));
        assert!(!native_source.close_client(1));
    }

    #[test]
    fn reply_to_a_sent_query_through_the_listener() {
        let (sender, receiver) = mpsc::channel();
        let listener: Arc<dyn EventBatchListener> = Arc::new(ForwardingListener { sender: Mutex::new(sender) });
        let native_source = LoopbackNativeSource::echoing();
        native_source.attach(Arc::downgrade(&listener)).unwrap();

        native_source.send(3, 30, Box::new("query".to_string()));
        native_source.push_update(3, Payload::object("update".to_string()));
        native_source.close_client(3);

        let (client_id, is_closed, correlation_ids, payloads) = receiver.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!((3, false, vec![30]), (client_id, is_closed, correlation_ids));
        assert_eq!("query", payloads[0].downcast_ref::<String>().unwrap());

        let (_, is_closed, correlation_ids, payloads) = receiver.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!((false, vec![0]), (is_closed, correlation_ids));
        assert_eq!("update", payloads[0].downcast_ref::<String>().unwrap());

        let (_, is_closed, correlation_ids, _) = receiver.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(is_closed);
        assert!(correlation_ids.is_empty());
    }

    #[test]
    fn only_the_first_of_concurrent_attaches_receives_batches() {
        let native_source = Arc::new(LoopbackNativeSource::silent());
        let (sender, receiver) = mpsc::channel();
        let listeners: Vec<Arc<dyn EventBatchListener>> = (0..4)
            .map(|_| {
                let listener: Arc<dyn EventBatchListener> = Arc::new(ForwardingListener { sender: Mutex::new(sender.clone()) });
                listener
            })
            .collect();
        drop(sender);

        let handles: Vec<_> = listeners.iter().map(|listener| {
            let native_source = native_source.clone();
            let listener = Arc::downgrade(listener);
            thread::spawn(move || native_source.attach(listener).unwrap())
        }).collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert!(native_source.is_attached());
        assert!(native_source.push_update(5, Payload::object(1)));
        let (client_id, _, _, _) = receiver.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(5, client_id);
        assert!(receiver.recv_timeout(Duration::from_millis(200)).is_err());
    }

    #[test]
    fn a_later_attach_keeps_the_first_listener() {
        let (first_sender, first_receiver) = mpsc::channel();
        let (other_sender, other_receiver) = mpsc::channel();
        let first: Arc<dyn EventBatchListener> = Arc::new(ForwardingListener { sender: Mutex::new(first_sender) });
        let other: Arc<dyn EventBatchListener> = Arc::new(ForwardingListener { sender: Mutex::new(other_sender) });
        let native_source = LoopbackNativeSource::silent();

        native_source.attach(Arc::downgrade(&first)).unwrap();
        native_source.attach(Arc::downgrade(&other)).unwrap();
        native_source.push_update(2, Payload::object(1));

        let (client_id, _, _, _) = first_receiver.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(2, client_id);
        assert!(other_receiver.recv_timeout(Duration::from_millis(200)).is_err());
    }
}
