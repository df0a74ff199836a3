use std::sync::atomic::{AtomicU8, Ordering};

use crate::error::ClientError;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ClientState {
    Open,
    /// The batch announcing the closure is being dispatched.
    Closing,
    Closed,
}

impl ClientState {
    fn from_u8(value: u8) -> ClientState {
        return match value {
            0 => ClientState::Open,
            1 => ClientState::Closing,
            _ => ClientState::Closed,
        };
    }

    fn as_u8(self) -> u8 {
        return match self {
            ClientState::Open => 0,
            ClientState::Closing => 1,
            ClientState::Closed => 2,
        };
    }
}

/// Only ever moves forward: Open, then Closing, then Closed.
pub(crate) struct ClientLifecycle {
    state: AtomicU8,
}

impl ClientLifecycle {
    pub(crate) fn new() -> Self {
        return ClientLifecycle { state: AtomicU8::new(ClientState::Open.as_u8()) };
    }

    pub(crate) fn state(&self) -> ClientState {
        return ClientState::from_u8(self.state.load(Ordering::Acquire));
    }

    pub(crate) fn ensure_open(&self) -> Result<(), ClientError> {
        if self.state() == ClientState::Closed {
            return Err(ClientError::Closed);
        }
        return Ok(());
    }

    pub(crate) fn begin_closing(&self) {
        let _ = self.state.compare_exchange(
            ClientState::Open.as_u8(),
            ClientState::Closing.as_u8(),
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }

    pub(crate) fn close(&self) {
        self.state.store(ClientState::Closed.as_u8(), Ordering::Release);
    }
}
