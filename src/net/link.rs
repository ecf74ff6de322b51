//! Connection establishment between the two peers
//!
//! One side binds and accepts a single connection, the other dials it.
//! Everything past this point works on the established byte stream.

use std::io;

use tokio::net::{TcpListener, TcpStream};
use tracing::info;

use crate::config::{Config, Role};

/// Establish the single peer connection according to the configured role
pub async fn establish(config: &Config) -> io::Result<TcpStream> {
    match config.role {
        Role::Host => {
            let listener = TcpListener::bind(config.listen_addr).await?;
            info!(addr = %config.listen_addr, "Waiting for the other peer");
            let (stream, peer) = listener.accept().await?;
            info!(peer = %peer, "Peer connected");
            Ok(stream)
        }
        Role::Join => {
            info!(addr = %config.peer_addr, "Connecting to host");
            let stream = TcpStream::connect(config.peer_addr).await?;
            info!(peer = %config.peer_addr, "Connected");
            Ok(stream)
        }
    }
}
