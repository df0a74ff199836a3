use std::sync::Arc;

use tracing::debug;

use crate::client::client_lifecycle::{ClientLifecycle, ClientState};
use crate::client::event_dispatcher::EventDispatcher;
use crate::correlation::correlation_id::{CorrelationId, CorrelationIdGenerator};
use crate::correlation::pending_requests::PendingRequests;
use crate::error::ClientError;
use crate::handler::completion_handler::{CompletionHandler, PendingResponse};
use crate::handler::handler::{Handler, HandlerMode};
use crate::handler::response_handler::{ExceptionHandlerType, ResultHandlerType};
use crate::native::native_source::{NativeClientId, NativeSource};
use crate::native::payload::{AnyFunction, Payload};

/// One native client: sends queries and dispatches the events delivered for it.
///
/// `send`, `send_async` and `execute` may be called from any number of threads.
/// `handle_events` is called by the delivery path, one batch at a time.
pub struct Client {
    client_id: NativeClientId,
    native_source: Arc<dyn NativeSource>,
    correlation_id_generator: Arc<dyn CorrelationIdGenerator>,
    pending_requests: Arc<PendingRequests>,
    dispatcher: EventDispatcher,
    lifecycle: ClientLifecycle,
}

impl Client {
    pub(crate) fn new(client_id: NativeClientId,
                      native_source: Arc<dyn NativeSource>,
                      correlation_id_generator: Arc<dyn CorrelationIdGenerator>,
                      mode: HandlerMode,
                      default_exception_handler: Option<ExceptionHandlerType>,
                      pending_requests_capacity: usize) -> Self {
        let pending_requests = Arc::new(PendingRequests::new_with_capacity(pending_requests_capacity));
        let dispatcher = EventDispatcher::new(client_id, mode, pending_requests.clone(), default_exception_handler);
        return Client {
            client_id,
            native_source,
            correlation_id_generator,
            pending_requests,
            dispatcher,
            lifecycle: ClientLifecycle::new(),
        };
    }

    /// Sends `query` and returns the correlation id it was tagged with.
    ///
    /// The handler is registered before the query reaches the native source, so even
    /// an immediate reply finds it. Without a result handler the reply is dropped.
    pub fn send(&self,
                query: AnyFunction,
                result_handler: Option<ResultHandlerType>,
                exception_handler: Option<ExceptionHandlerType>) -> Result<CorrelationId, ClientError> {
        self.lifecycle.ensure_open()?;

        let correlation_id = self.correlation_id_generator.generate();
        if let Some(result_handler) = result_handler {
            self.pending_requests.add(correlation_id, Handler::new(result_handler, exception_handler));
        }
        self.native_source.send(self.client_id, correlation_id, query);
        return Ok(correlation_id);
    }

    pub fn send_async(&self, query: AnyFunction) -> Result<PendingResponse, ClientError> {
        self.lifecycle.ensure_open()?;

        let correlation_id = self.correlation_id_generator.generate();
        let (completion_handler, receiver) = CompletionHandler::new();
        let completion_handler = Arc::new(completion_handler);
        self.pending_requests.add(correlation_id, Handler::new(completion_handler.clone(), Some(completion_handler)));

        self.native_source.send(self.client_id, correlation_id, query);
        return Ok(PendingResponse::new(correlation_id, receiver));
    }

    pub fn execute(&self, query: AnyFunction) -> Result<Payload, ClientError> {
        self.lifecycle.ensure_open()?;
        return Ok(self.native_source.execute(query));
    }

    /// Dispatches one batch. When `is_closed` is set the client becomes closed, but
    /// only after every event of this batch has been dispatched.
    pub fn handle_events(&self, is_closed: bool, correlation_ids: Vec<CorrelationId>, payloads: Vec<Payload>) {
        if is_closed {
            self.lifecycle.begin_closing();
        }

        self.dispatcher.dispatch(correlation_ids, payloads);

        if is_closed {
            self.lifecycle.close();
            debug!(client_id = self.client_id, pending_requests = self.pending_requests.len(), "client closed");
        }
    }

    pub fn get_client_id(&self) -> NativeClientId {
        return self.client_id;
    }

    pub fn state(&self) -> ClientState {
        return self.lifecycle.state();
    }

    pub fn is_closed(&self) -> bool {
        return self.state() == ClientState::Closed;
    }

    pub fn pending_request_count(&self) -> usize {
        return self.pending_requests.len();
    }
}
