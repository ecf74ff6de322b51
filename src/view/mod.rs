//! Collaborator interfaces for rendering and audio
//!
//! The engine never draws or plays anything itself; it narrates what the
//! presentation layer should show through these traits. The headless
//! implementations log the calls and are what the binary wires in.

use tracing::{debug, info};

use crate::game::Side;

/// On-screen entities the engine positions and toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    /// A player sprite
    Player(Side),
    /// A player's minimap marker
    Marker(Side),
}

/// Sound cues the engine asks for by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Shoot,
    Hit,
    Ability,
}

impl Cue {
    pub fn name(&self) -> &'static str {
        match self {
            Cue::Shoot => "shoot",
            Cue::Hit => "hit",
            Cue::Ability => "ability",
        }
    }
}

/// Rendering surface and widget collaborator
pub trait Stage: Send {
    /// Swap the sprite asset shown for an entity
    fn set_sprite(&mut self, entity: Entity, key: &str);
    /// Move an entity
    fn set_position(&mut self, entity: Entity, x: f32, y: f32);
    /// Show or hide an entity
    fn set_visible(&mut self, entity: Entity, visible: bool);
    /// Update a health bar
    fn set_health(&mut self, side: Side, health: u32);
    /// Update the status line
    fn set_status(&mut self, text: &str);
    /// Present the end-of-match screen
    fn show_game_over(&mut self, winner: Side);
}

/// Audio playback collaborator
pub trait CuePlayer: Send {
    fn play(&self, cue: Cue);
}

/// Stage that logs every call, for running the engine without a window
pub struct HeadlessStage;

impl Stage for HeadlessStage {
    fn set_sprite(&mut self, entity: Entity, key: &str) {
        debug!(?entity, key, "Stage sprite");
    }

    fn set_position(&mut self, entity: Entity, x: f32, y: f32) {
        debug!(?entity, x, y, "Stage position");
    }

    fn set_visible(&mut self, entity: Entity, visible: bool) {
        debug!(?entity, visible, "Stage visibility");
    }

    fn set_health(&mut self, side: Side, health: u32) {
        info!(?side, health, "Health changed");
    }

    fn set_status(&mut self, text: &str) {
        info!(status = text, "Status");
    }

    fn show_game_over(&mut self, winner: Side) {
        info!(?winner, "Game over");
    }
}

/// Cue player that logs instead of playing audio
pub struct HeadlessAudio;

impl CuePlayer for HeadlessAudio {
    fn play(&self, cue: Cue) {
        debug!(cue = cue.name(), "Audio cue");
    }
}
