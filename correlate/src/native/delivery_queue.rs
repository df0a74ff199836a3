use std::io;
use std::sync::Weak;

use tokio::runtime::{Builder, Runtime};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::SendError;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::debug;

use crate::native::native_source::{EventBatch, EventBatchListener};

/// Funnels event batches produced on any thread into a single worker, which hands
/// them to the listener one at a time, in submission order.
pub struct DeliveryQueue {
    sender: UnboundedSender<EventBatch>,
    single_thread_pool: Option<Runtime>,
}

impl DeliveryQueue {
    pub fn new(listener: Weak<dyn EventBatchListener>) -> io::Result<DeliveryQueue> {
        let single_thread_pool = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("correlate-delivery")
            .enable_all()
            .build()?;

        let (sender, receiver) = mpsc::unbounded_channel::<EventBatch>();
        let delivery_queue = DeliveryQueue {
            sender,
            single_thread_pool: Some(single_thread_pool),
        };
        delivery_queue.start(receiver, listener);
        return Ok(delivery_queue);
    }

    pub fn submit(&self, batch: EventBatch) -> Result<(), SendError<EventBatch>> {
        return self.sender.send(batch);
    }

    pub fn shutdown(mut self) {
        self.shutdown_pool();
    }

    fn start(&self, mut receiver: UnboundedReceiver<EventBatch>, listener: Weak<dyn EventBatchListener>) {
        if let Some(single_thread_pool) = &self.single_thread_pool {
            single_thread_pool.spawn(async move {
                while let Some(batch) = receiver.recv().await {
                    match listener.upgrade() {
                        Some(listener) => batch.deliver_to(listener.as_ref()),
                        None => debug!(client_id = batch.client_id, "listener is gone, event batch dropped"),
                    }
                }
            });
        }
    }

    fn shutdown_pool(&mut self) {
        if let Some(single_thread_pool) = self.single_thread_pool.take() {
            single_thread_pool.shutdown_background();
        }
    }
}

impl Drop for DeliveryQueue {
    fn drop(&mut self) {
        self.shutdown_pool();
    }
}
