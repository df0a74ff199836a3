use std::any::Any;
use std::sync::Arc;

use crate::error::{CallbackError, ExceptionCause};

pub type AnyObject = Box<dyn Any + Send>;

pub type ResultHandlerType = Arc<dyn ResultHandler + 'static>;

pub type ExceptionHandlerType = Arc<dyn ExceptionHandler + 'static>;

pub type UpdatesHandlerType = Arc<dyn UpdatesHandler + 'static>;

/// Receives the object a response or an update carried.
pub trait ResultHandler: Send + Sync {
    fn on_result(&self, object: AnyObject) -> Result<(), CallbackError>;
}

/// Receives a batch of updates, in the order the native source emitted them.
pub trait UpdatesHandler: Send + Sync {
    fn on_updates(&self, updates: Vec<AnyObject>) -> Result<(), CallbackError>;
}

pub trait ExceptionHandler: Send + Sync {
    fn on_exception(&self, cause: ExceptionCause);
}

impl<F> ResultHandler for F
    where F: Fn(AnyObject) -> Result<(), CallbackError> + Send + Sync {
    fn on_result(&self, object: AnyObject) -> Result<(), CallbackError> {
        return self(object);
    }
}

impl<F> UpdatesHandler for F
    where F: Fn(Vec<AnyObject>) -> Result<(), CallbackError> + Send + Sync {
    fn on_updates(&self, updates: Vec<AnyObject>) -> Result<(), CallbackError> {
        return self(updates);
    }
}

impl<F> ExceptionHandler for F
    where F: Fn(ExceptionCause) + Send + Sync {
    fn on_exception(&self, cause: ExceptionCause) {
        self(cause);
    }
}

pub fn result_handler<F>(handler: F) -> ResultHandlerType
    where F: Fn(AnyObject) -> Result<(), CallbackError> + Send + Sync + 'static {
    return Arc::new(handler);
}

pub fn updates_handler<F>(handler: F) -> UpdatesHandlerType
    where F: Fn(Vec<AnyObject>) -> Result<(), CallbackError> + Send + Sync + 'static {
    return Arc::new(handler);
}

pub fn exception_handler<F>(handler: F) -> ExceptionHandlerType
    where F: Fn(ExceptionCause) + Send + Sync + 'static {
    return Arc::new(handler);
}
