//! Newline-delimited JSON framing for the peer protocol

use bytes::BytesMut;

use super::protocol::Message;

/// Codec errors
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("Failed to encode frame: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Malformed frame: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Encode a message as one newline-terminated frame
pub fn encode(msg: &Message) -> Result<Vec<u8>, CodecError> {
    let mut frame = serde_json::to_vec(msg).map_err(CodecError::Encode)?;
    frame.push(b'\n');
    Ok(frame)
}

/// Incremental decoder that buffers partial frames across read boundaries.
///
/// Bytes are appended as they arrive from the transport; [`next_frame`]
/// yields one decoded message per complete line. A malformed line is
/// reported as an error without disturbing the rest of the buffer, so the
/// caller can skip it and keep reading.
///
/// [`next_frame`]: FrameDecoder::next_frame
#[derive(Debug, Default)]
pub struct FrameDecoder {
    buf: BytesMut,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self {
            buf: BytesMut::with_capacity(4096),
        }
    }

    /// Append raw bytes read from the transport
    pub fn extend(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    /// Pop the next complete frame, if any
    pub fn next_frame(&mut self) -> Option<Result<Message, CodecError>> {
        loop {
            let pos = self.buf.iter().position(|&b| b == b'\n')?;
            let line = self.buf.split_to(pos + 1);
            let payload = &line[..pos];
            if payload.is_empty() {
                continue;
            }
            return Some(serde_json::from_slice(payload).map_err(CodecError::Decode));
        }
    }
}
