//! Background dispatch errors.

use thiserror::Error;

use super::StoreError;
use crate::message::MessageKind;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("No handler registered for {0}")]
    NoHandler(MessageKind),

    #[error("Handler already registered for {0}")]
    AlreadyRegistered(MessageKind),

    #[error("Handler for {expected} received {actual}")]
    WrongKind {
        expected: MessageKind,
        actual: MessageKind,
    },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
