use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::debug;

use crate::error::{CallbackError, ExceptionCause};
use crate::handler::response_handler::ExceptionHandlerType;

/// Runs a user callback, turning a returned error or a panic into an `ExceptionCause`.
pub(crate) fn guard<F>(callback: F) -> Result<(), ExceptionCause>
    where F: FnOnce() -> Result<(), CallbackError> {
    return match catch_unwind(AssertUnwindSafe(callback)) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(error)) => Err(ExceptionCause::Callback(error)),
        Err(panic) => Err(ExceptionCause::Panicked(panic_message(panic.as_ref()))),
    };
}

/// Notifies `exception_handler`, else `default_exception_handler`, else drops the cause.
/// Whatever the chosen handler does, nothing escapes from here.
pub(crate) fn handle_exception(exception_handler: Option<&ExceptionHandlerType>,
                               default_exception_handler: Option<&ExceptionHandlerType>,
                               cause: ExceptionCause) {
    let Some(handler) = exception_handler.or(default_exception_handler) else {
        debug!(%cause, "no exception handler, the exception has been dropped");
        return;
    };
    let _ = catch_unwind(AssertUnwindSafe(|| handler.on_exception(cause)));
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        return message.to_string();
    }
    if let Some(message) = panic.downcast_ref::<String>() {
        return message.clone();
    }
    return "unknown panic".to_string();
}
