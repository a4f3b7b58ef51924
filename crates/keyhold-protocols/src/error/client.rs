//! Errors seen by a context sending messages to the background service.

use thiserror::Error;

use super::DispatchError;
use crate::message::MessageKind;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Send failed: {0}")]
    SendFailed(String),

    #[error("Unexpected response to {0}")]
    UnexpectedResponse(MessageKind),

    #[error("Dispatch failed: {0}")]
    Dispatch(#[from] DispatchError),
}
