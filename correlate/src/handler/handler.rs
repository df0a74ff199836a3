use crate::handler::response_handler::{ExceptionHandlerType, ResultHandlerType, UpdatesHandlerType};

/// The callbacks waiting for one correlation id, or the top-level update handler.
#[derive(Clone)]
pub struct Handler {
    result_handler: ResultHandlerType,
    exception_handler: Option<ExceptionHandlerType>,
}

impl Handler {
    pub fn new(result_handler: ResultHandlerType, exception_handler: Option<ExceptionHandlerType>) -> Self {
        return Handler { result_handler, exception_handler };
    }

    pub fn get_result_handler(&self) -> &ResultHandlerType {
        return &self.result_handler;
    }

    pub fn get_exception_handler(&self) -> Option<&ExceptionHandlerType> {
        return self.exception_handler.as_ref();
    }
}

/// Client-wide callbacks that receive every update as an ordered batch.
#[derive(Clone)]
pub struct MultiHandler {
    updates_handler: UpdatesHandlerType,
    exception_handler: Option<ExceptionHandlerType>,
}

impl MultiHandler {
    pub fn new(updates_handler: UpdatesHandlerType, exception_handler: Option<ExceptionHandlerType>) -> Self {
        return MultiHandler { updates_handler, exception_handler };
    }

    pub fn get_updates_handler(&self) -> &UpdatesHandlerType {
        return &self.updates_handler;
    }

    pub fn get_exception_handler(&self) -> Option<&ExceptionHandlerType> {
        return self.exception_handler.as_ref();
    }
}

/// How a client receives unsolicited events. Chosen at construction, never changed.
#[derive(Clone)]
pub enum HandlerMode {
    Single(Handler),
    Multi(MultiHandler),
}

impl HandlerMode {
    pub fn single(result_handler: ResultHandlerType, exception_handler: Option<ExceptionHandlerType>) -> Self {
        return HandlerMode::Single(Handler::new(result_handler, exception_handler));
    }

    pub fn multi(updates_handler: UpdatesHandlerType, exception_handler: Option<ExceptionHandlerType>) -> Self {
        return HandlerMode::Multi(MultiHandler::new(updates_handler, exception_handler));
    }
}
