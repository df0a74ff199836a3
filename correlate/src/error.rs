use thiserror::Error;

use crate::native::native_source::NativeClientId;

pub type CallbackError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// An error reported by the native source as the payload of an event.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("native error {code}: {message}")]
pub struct ProtocolError {
    pub code: i32,
    pub message: String,
}

impl ProtocolError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        return ProtocolError { code, message: message.into() };
    }
}

/// Everything an exception handler can be notified with.
#[derive(Debug, Error)]
pub enum ExceptionCause {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("callback failed: {0}")]
    Callback(#[source] CallbackError),

    #[error("callback panicked: {0}")]
    Panicked(String),
}

impl ExceptionCause {
    pub fn protocol_error(&self) -> Option<&ProtocolError> {
        return match self {
            ExceptionCause::Protocol(error) => Some(error),
            _ => None,
        };
    }
}

#[derive(Debug, Error)]
pub enum NativeError {
    #[error("native client creation failed: {0}")]
    CreationFailed(String),
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("the client is closed")]
    Closed,

    #[error(transparent)]
    Creation(#[from] NativeError),

    #[error("native client id {0} is already registered")]
    DuplicateClientId(NativeClientId),
}

#[derive(Debug, Error)]
pub enum ResponseError {
    #[error(transparent)]
    Exception(#[from] ExceptionCause),

    #[error("the response was dropped before it arrived")]
    Dropped,
}
