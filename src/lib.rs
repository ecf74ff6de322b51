//! Arena Duel - networked battle engine for two-player duels
//!
//! Each peer simulates its own player at a fixed tick rate and mirrors the
//! opponent from inbound protocol messages:
//! - Per-tick combat simulation (movement, projectiles, damage, win check)
//! - Character ability state machine (eight classes, timed effects, stealth)
//! - Newline-delimited JSON peer protocol over a single TCP stream
//!
//! Rendering, audio and keyboard capture live behind collaborator traits in
//! [`view`] and [`input`]; the engine itself is headless.

pub mod config;
pub mod game;
pub mod input;
pub mod net;
pub mod util;
pub mod view;
