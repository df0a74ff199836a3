use std::sync::Arc;

use tracing::warn;

use crate::correlation::correlation_id::{is_response, CorrelationId};
use crate::correlation::pending_requests::PendingRequests;
use crate::error::ExceptionCause;
use crate::handler::exception_isolation::{guard, handle_exception};
use crate::handler::handler::{Handler, HandlerMode, MultiHandler};
use crate::handler::response_handler::ExceptionHandlerType;
use crate::native::native_source::NativeClientId;
use crate::native::payload::Payload;

/// Routes the events of one client to the handlers waiting for them.
pub(crate) struct EventDispatcher {
    client_id: NativeClientId,
    mode: HandlerMode,
    pending_requests: Arc<PendingRequests>,
    default_exception_handler: Option<ExceptionHandlerType>,
}

impl EventDispatcher {
    pub(crate) fn new(client_id: NativeClientId,
                      mode: HandlerMode,
                      pending_requests: Arc<PendingRequests>,
                      default_exception_handler: Option<ExceptionHandlerType>) -> Self {
        return EventDispatcher {
            client_id,
            mode,
            pending_requests,
            default_exception_handler,
        };
    }

    pub(crate) fn dispatch(&self, correlation_ids: Vec<CorrelationId>, payloads: Vec<Payload>) {
        if correlation_ids.len() != payloads.len() {
            warn!(
                client_id = self.client_id,
                correlation_ids = correlation_ids.len(),
                payloads = payloads.len(),
                "mismatched event batch, the surplus has been dropped"
            );
        }
        let events = correlation_ids.into_iter().zip(payloads);
        match &self.mode {
            HandlerMode::Multi(multi_handler) => self.dispatch_to_multi_handler(multi_handler, events),
            HandlerMode::Single(update_handler) => self.dispatch_to_update_handler(update_handler, events),
        }
    }

    /// Responses are resolved first, then the remaining updates go out as one batch.
    /// The updates handler is called once per delivered batch, even with no updates.
    fn dispatch_to_multi_handler<E>(&self, multi_handler: &MultiHandler, events: E)
        where E: Iterator<Item=(CorrelationId, Payload)> {
        let mut unsolicited = Vec::new();
        for (correlation_id, payload) in events {
            if is_response(correlation_id) {
                let handler = self.pending_requests.take(correlation_id);
                self.handle_response(correlation_id, payload, handler.as_ref());
            } else {
                unsolicited.push(payload);
            }
        }

        let mut updates = Vec::with_capacity(unsolicited.len());
        for payload in unsolicited {
            match payload {
                Payload::Error(error) => self.handle_exception(multi_handler.get_exception_handler(), error.into()),
                Payload::Object(object) => updates.push(object),
            }
        }

        let updates_handler = multi_handler.get_updates_handler();
        if let Err(cause) = guard(|| updates_handler.on_updates(updates)) {
            self.handle_exception(multi_handler.get_exception_handler(), cause);
        }
    }

    fn dispatch_to_update_handler<E>(&self, update_handler: &Handler, events: E)
        where E: Iterator<Item=(CorrelationId, Payload)> {
        for (correlation_id, payload) in events {
            if is_response(correlation_id) {
                let handler = self.pending_requests.take(correlation_id);
                self.handle_response(correlation_id, payload, handler.as_ref());
            } else {
                self.handle_response(correlation_id, payload, Some(update_handler));
            }
        }
    }

    fn handle_response(&self, correlation_id: CorrelationId, payload: Payload, handler: Option<&Handler>) {
        let Some(handler) = handler else {
            warn!(client_id = self.client_id, correlation_id, "unknown event id, the event has been dropped");
            return;
        };
        match payload {
            Payload::Error(error) => self.handle_exception(handler.get_exception_handler(), error.into()),
            Payload::Object(object) => {
                let result_handler = handler.get_result_handler();
                if let Err(cause) = guard(|| result_handler.on_result(object)) {
                    self.handle_exception(handler.get_exception_handler(), cause);
                }
            }
        }
    }

    fn handle_exception(&self, exception_handler: Option<&ExceptionHandlerType>, cause: ExceptionCause) {
        handle_exception(exception_handler, self.default_exception_handler.as_ref(), cause);
    }
}
