//! Game simulation modules

pub mod abilities;
pub mod combat;
pub mod roster;
pub mod session;

pub use session::{Outcome, Phase, PlayerState, Session};

/// Which peer an entity belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// This peer's own player, simulated locally
    Local,
    /// The mirrored opponent, updated only by inbound messages
    Remote,
}
