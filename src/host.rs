//! Native messaging host.
//!
//! Each message is a 4-byte length in native byte order followed by that
//! many bytes of UTF-8 JSON. Requests are answered strictly in arrival
//! order; end of input stops the host.

use serde_json::{json, Value};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use keyhold_core::BackgroundService;
use keyhold_protocols::Request;

const FRAME_PREFIX_BYTES: usize = 4;

/// Largest message the host sends.
pub(crate) const MAX_OUTGOING_BYTES: usize = 1024 * 1024;

/// Largest message the host accepts.
pub(crate) const MAX_INCOMING_BYTES: usize = 64 * 1024 * 1024;

#[derive(Debug, Error)]
pub(crate) enum FrameError {
    #[error("Message too large ({size} > {limit} bytes)")]
    TooLarge { size: usize, limit: usize },

    #[error("Input ended inside a frame")]
    Truncated,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read one frame. `Ok(None)` on a clean end of input.
pub(crate) async fn read_frame<R>(reader: &mut R) -> Result<Option<Vec<u8>>, FrameError>
where
    R: AsyncRead + Unpin,
{
    let mut prefix = [0u8; FRAME_PREFIX_BYTES];
    let mut filled = 0;
    while filled < FRAME_PREFIX_BYTES {
        let n = reader.read(&mut prefix[filled..]).await?;
        if n == 0 {
            return if filled == 0 {
                Ok(None)
            } else {
                Err(FrameError::Truncated)
            };
        }
        filled += n;
    }

    let size = u32::from_ne_bytes(prefix) as usize;
    if size > MAX_INCOMING_BYTES {
        return Err(FrameError::TooLarge {
            size,
            limit: MAX_INCOMING_BYTES,
        });
    }

    let mut payload = vec![0u8; size];
    reader.read_exact(&mut payload).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            FrameError::Truncated
        } else {
            FrameError::Io(e)
        }
    })?;
    Ok(Some(payload))
}

/// Prefix a payload with its length, refusing oversized messages.
pub(crate) fn encode_frame(payload: &[u8]) -> Result<Vec<u8>, FrameError> {
    if payload.len() > MAX_OUTGOING_BYTES {
        return Err(FrameError::TooLarge {
            size: payload.len(),
            limit: MAX_OUTGOING_BYTES,
        });
    }

    let len = u32::try_from(payload.len()).map_err(|_| FrameError::TooLarge {
        size: payload.len(),
        limit: MAX_OUTGOING_BYTES,
    })?;

    let mut out = Vec::with_capacity(FRAME_PREFIX_BYTES + payload.len());
    out.extend_from_slice(&len.to_ne_bytes());
    out.extend_from_slice(payload);
    Ok(out)
}

pub(crate) async fn write_frame<W>(writer: &mut W, payload: &[u8]) -> Result<(), FrameError>
where
    W: AsyncWrite + Unpin,
{
    let frame = encode_frame(payload)?;
    writer.write_all(&frame).await?;
    writer.flush().await?;
    Ok(())
}

fn error_reply(message: impl std::fmt::Display) -> Value {
    json!({ "error": message.to_string() })
}

/// Answer one request payload. Never fails: problems become an
/// `{"error": ...}` reply.
pub(crate) async fn handle_payload(service: &BackgroundService, payload: &[u8]) -> Value {
    let request: Request = match serde_json::from_slice(payload) {
        Ok(request) => request,
        Err(e) => {
            warn!("Malformed request: {}", e);
            return error_reply(format!("malformed request: {e}"));
        }
    };

    let kind = request.kind();
    match service.handle(request).await {
        Ok(response) => match serde_json::to_value(&response) {
            Ok(value) => value,
            Err(e) => error_reply(e),
        },
        Err(e) => {
            debug!("{} failed: {}", kind, e);
            error_reply(e)
        }
    }
}

/// Serve requests until the input ends. Returns the number handled.
pub(crate) async fn serve<R, W>(
    service: &BackgroundService,
    mut reader: R,
    mut writer: W,
) -> Result<usize, FrameError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut handled = 0;
    while let Some(payload) = read_frame(&mut reader).await? {
        let reply = handle_payload(service, &payload).await;
        let bytes = serde_json::to_vec(&reply).unwrap_or_else(|_| b"null".to_vec());

        match write_frame(&mut writer, &bytes).await {
            Ok(()) => {}
            Err(FrameError::TooLarge { size, limit }) => {
                warn!("Reply of {} bytes exceeds {} byte limit", size, limit);
                let fallback = error_reply(format!("response too large ({size} bytes)"));
                let fallback = serde_json::to_vec(&fallback).unwrap_or_else(|_| b"null".to_vec());
                write_frame(&mut writer, &fallback).await?;
            }
            Err(e) => return Err(e),
        }
        handled += 1;
    }

    info!("Input closed after {} requests", handled);
    Ok(handled)
}

#[cfg(test)]
#[path = "host_tests.rs"]
mod tests;
