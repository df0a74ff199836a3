use std::any::Any;
use std::fmt::{Debug, Formatter};

use crate::error::ProtocolError;
use crate::handler::response_handler::AnyObject;

/// A query handed to the native source. Its structure is opaque to this crate.
pub type AnyFunction = Box<dyn Any + Send>;

/// What an event carries: either an object or an error reported by the native source.
pub enum Payload {
    Object(AnyObject),
    Error(ProtocolError),
}

impl Payload {
    pub fn object<T: Any + Send>(object: T) -> Self {
        return Payload::Object(Box::new(object));
    }

    pub fn error(code: i32, message: impl Into<String>) -> Self {
        return Payload::Error(ProtocolError::new(code, message));
    }

    pub fn is_error(&self) -> bool {
        return matches!(self, Payload::Error(_));
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        return match self {
            Payload::Object(object) => object.downcast_ref::<T>(),
            Payload::Error(_) => None,
        };
    }
}

impl Debug for Payload {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Payload::Object(_) => write!(formatter, "Object(..)"),
            Payload::Error(error) => write!(formatter, "Error({})", error),
        }
    }
}

impl From<ProtocolError> for Payload {
    fn from(error: ProtocolError) -> Self {
        return Payload::Error(error);
    }
}
