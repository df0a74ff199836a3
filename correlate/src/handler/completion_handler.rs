use std::sync::{Mutex, PoisonError};

use tokio::sync::oneshot;
use tokio::sync::oneshot::{Receiver, Sender};

use crate::correlation::correlation_id::CorrelationId;
use crate::error::{CallbackError, ExceptionCause, ResponseError};
use crate::handler::response_handler::{AnyObject, ExceptionHandler, ResultHandler};

type Completion = Result<AnyObject, ExceptionCause>;

/// Stored in the pending requests in place of user callbacks; completes a oneshot
/// channel with whatever the response turns out to be.
pub(crate) struct CompletionHandler {
    sender: Mutex<Option<Sender<Completion>>>,
}

impl CompletionHandler {
    pub(crate) fn new() -> (CompletionHandler, Receiver<Completion>) {
        let (sender, receiver) = oneshot::channel();
        return (CompletionHandler { sender: Mutex::new(Some(sender)) }, receiver);
    }

    fn complete(&self, completion: Completion) {
        let sender = self.sender.lock().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(sender) = sender {
            let _ = sender.send(completion);
        }
    }
}

impl ResultHandler for CompletionHandler {
    fn on_result(&self, object: AnyObject) -> Result<(), CallbackError> {
        self.complete(Ok(object));
        return Ok(());
    }
}

impl ExceptionHandler for CompletionHandler {
    fn on_exception(&self, cause: ExceptionCause) {
        self.complete(Err(cause));
    }
}

/// The eventual response to a query sent with `Client::send_async`.
pub struct PendingResponse {
    correlation_id: CorrelationId,
    receiver: Receiver<Completion>,
}

impl PendingResponse {
    pub(crate) fn new(correlation_id: CorrelationId, receiver: Receiver<Completion>) -> Self {
        return PendingResponse { correlation_id, receiver };
    }

    pub fn get_correlation_id(&self) -> CorrelationId {
        return self.correlation_id;
    }

    pub async fn wait(self) -> Result<AnyObject, ResponseError> {
        return match self.receiver.await {
            Ok(completion) => completion.map_err(ResponseError::from),
            Err(_) => Err(ResponseError::Dropped),
        };
    }

    /// Blocks the calling thread; must not be called from inside an async runtime.
    pub fn blocking_wait(self) -> Result<AnyObject, ResponseError> {
        return match self.receiver.blocking_recv() {
            Ok(completion) => completion.map_err(ResponseError::from),
            Err(_) => Err(ResponseError::Dropped),
        };
    }
}
