//! Peer networking: wire protocol, framing, channel tasks

pub mod channel;
pub mod codec;
pub mod link;
pub mod protocol;

pub use channel::Channel;
pub use protocol::Message;
