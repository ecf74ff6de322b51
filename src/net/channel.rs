//! Peer channel - background reader/writer tasks over one byte stream
//!
//! The simulation never touches the transport directly. Outbound messages
//! go through a fire-and-forget queue drained by a writer task; inbound
//! bytes are decoded by a reader task and marshaled into a bounded queue
//! that the session drains at tick boundaries, keeping a single writer
//! over all game state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::util::rate_limit::ChannelRateLimiter;

use super::codec::{self, FrameDecoder};
use super::protocol::Message;

/// Channel errors
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("Transport failure: {0}")]
    Transport(#[from] std::io::Error),

    #[error("{0}")]
    Codec(#[from] codec::CodecError),
}

/// Send handle to the peer. Cheap to clone.
///
/// After the first transport failure the channel is permanently inert:
/// the failure is reported once by the writer task and every later
/// [`send`](Channel::send) is a silent no-op. There is no retry.
#[derive(Clone)]
pub struct Channel {
    outbound: mpsc::UnboundedSender<Message>,
    dead: Arc<AtomicBool>,
}

impl Channel {
    /// Split the stream and spawn the reader/writer tasks.
    ///
    /// Decoded inbound messages are delivered through `inbound_tx`; the
    /// reader exits silently when the transport closes or the session
    /// drops its receiver.
    pub fn spawn<S>(stream: S, inbound_tx: mpsc::Sender<Message>) -> Self
    where
        S: AsyncRead + AsyncWrite + Send + 'static,
    {
        let (reader, writer) = tokio::io::split(stream);
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let dead = Arc::new(AtomicBool::new(false));

        tokio::spawn(write_loop(writer, outbound_rx, dead.clone()));
        tokio::spawn(read_loop(reader, inbound_tx));

        Self {
            outbound: outbound_tx,
            dead,
        }
    }

    /// Queue a message for the peer. Non-blocking, best-effort.
    pub fn send(&self, msg: Message) {
        if self.dead.load(Ordering::Relaxed) {
            return;
        }
        // A closed queue means the writer already reported its failure.
        let _ = self.outbound.send(msg);
    }

    /// Whether the transport has failed and the channel went inert
    pub fn is_dead(&self) -> bool {
        self.dead.load(Ordering::Relaxed)
    }

    /// Channel whose outbound queue is captured instead of written to a
    /// transport. Lets session tests observe exactly what would be sent.
    #[cfg(test)]
    pub(crate) fn detached() -> (Self, mpsc::UnboundedReceiver<Message>) {
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        (
            Self {
                outbound: outbound_tx,
                dead: Arc::new(AtomicBool::new(false)),
            },
            outbound_rx,
        )
    }
}

/// Drain the outbound queue into the transport
async fn write_loop<W>(
    mut writer: W,
    mut outbound_rx: mpsc::UnboundedReceiver<Message>,
    dead: Arc<AtomicBool>,
) where
    W: AsyncWrite + Send + Unpin,
{
    while let Some(msg) = outbound_rx.recv().await {
        if let Err(e) = write_frame(&mut writer, &msg).await {
            warn!(error = %e, "Peer send failed, channel disabled");
            dead.store(true, Ordering::Relaxed);
            break;
        }
    }
}

async fn write_frame<W>(writer: &mut W, msg: &Message) -> Result<(), ChannelError>
where
    W: AsyncWrite + Send + Unpin,
{
    let frame = codec::encode(msg)?;
    writer.write_all(&frame).await?;
    Ok(())
}

/// Read transport bytes, decode complete frames, forward to the session.
///
/// Exits silently on EOF, transport error, or a dropped session receiver.
/// Malformed frames are logged and skipped; the loop keeps reading.
async fn read_loop<R>(mut reader: R, inbound_tx: mpsc::Sender<Message>)
where
    R: AsyncRead + Send + Unpin,
{
    let rate_limiter = ChannelRateLimiter::new();
    let mut decoder = FrameDecoder::new();
    let mut buf = [0u8; 4096];

    'transport: loop {
        let n = match reader.read(&mut buf).await {
            Ok(0) => {
                debug!("Peer closed the connection");
                break;
            }
            Ok(n) => n,
            Err(e) => {
                debug!(error = %e, "Peer read failed");
                break;
            }
        };

        decoder.extend(&buf[..n]);

        while let Some(frame) = decoder.next_frame() {
            if !rate_limiter.check_frame() {
                warn!("Rate limited inbound frame");
                continue;
            }

            match frame {
                Ok(msg) => {
                    if inbound_tx.send(msg).await.is_err() {
                        debug!("Session closed its inbound queue");
                        break 'transport;
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Discarding malformed frame");
                }
            }
        }
    }
}
