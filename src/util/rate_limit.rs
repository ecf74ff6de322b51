//! Rate limiting utilities

use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Rate limiter type alias
pub type Limiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Create a rate limiter with the specified events per second
pub fn create_limiter(events_per_second: u32) -> Arc<Limiter> {
    let quota = Quota::per_second(NonZeroU32::new(events_per_second).unwrap_or(NonZeroU32::MIN));
    Arc::new(RateLimiter::direct(quota))
}

/// Inbound frame rate limit per channel. Position reports arrive at 10 Hz,
/// everything else is sporadic, so this leaves generous headroom.
pub const INBOUND_FRAME_RATE_LIMIT: u32 = 60;

/// Per-channel rate limiter state
#[derive(Clone)]
pub struct ChannelRateLimiter {
    frame_limiter: Arc<Limiter>,
}

impl ChannelRateLimiter {
    pub fn new() -> Self {
        Self {
            frame_limiter: create_limiter(INBOUND_FRAME_RATE_LIMIT),
        }
    }

    /// Check if an inbound frame is allowed (returns true if allowed)
    pub fn check_frame(&self) -> bool {
        self.frame_limiter.check().is_ok()
    }
}

impl Default for ChannelRateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
