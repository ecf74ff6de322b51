//! Static roster data - ability descriptors and menu profiles

use crate::net::protocol::{AbilityKind, CharacterClass};

/// Immutable definition of one character's special ability
#[derive(Debug, Clone, Copy)]
pub struct AbilityDescriptor {
    pub kind: AbilityKind,
    /// Display name for the status line and selection menu
    pub name: &'static str,
    /// Active window in seconds; None for instantaneous/one-shot abilities
    pub duration: Option<f32>,
}

impl AbilityDescriptor {
    pub fn for_class(class: CharacterClass) -> Self {
        match class {
            CharacterClass::Vanguard => Self {
                kind: AbilityKind::Dash,
                name: "Dash",
                duration: None,
            },
            CharacterClass::Striker => Self {
                kind: AbilityKind::Adrenaline,
                name: "Adrenaline Rush",
                duration: Some(2.0),
            },
            CharacterClass::Deadeye => Self {
                kind: AbilityKind::FocusFire,
                name: "Focus Fire",
                duration: Some(3.0),
            },
            CharacterClass::Bulwark => Self {
                kind: AbilityKind::Fortify,
                name: "Fortify",
                duration: Some(4.0),
            },
            CharacterClass::Phantom => Self {
                kind: AbilityKind::Cloak,
                name: "Cloak",
                duration: Some(3.0),
            },
            CharacterClass::Medic => Self {
                kind: AbilityKind::Mend,
                name: "Med Kit",
                duration: None,
            },
            CharacterClass::Tempest => Self {
                kind: AbilityKind::Surge,
                name: "Surge",
                duration: Some(5.0),
            },
            CharacterClass::Oracle => Self {
                kind: AbilityKind::Reveal,
                name: "Reveal",
                duration: None,
            },
        }
    }
}

/// Selection-menu data for one character
#[derive(Debug, Clone, Copy)]
pub struct CharacterProfile {
    pub name: &'static str,
    pub moves: &'static [&'static str],
    /// Sprite asset key under the presentation layer's asset root
    pub sprite: &'static str,
}

impl CharacterProfile {
    pub fn for_class(class: CharacterClass) -> Self {
        match class {
            CharacterClass::Vanguard => Self {
                name: "Vanguard",
                moves: &["run", "jump", "shoot"],
                sprite: "vanguard.png",
            },
            CharacterClass::Striker => Self {
                name: "Striker",
                moves: &["run", "jump", "shoot", "roll"],
                sprite: "striker.png",
            },
            CharacterClass::Deadeye => Self {
                name: "Deadeye",
                moves: &["run", "prone", "shoot"],
                sprite: "deadeye.png",
            },
            CharacterClass::Bulwark => Self {
                name: "Bulwark",
                moves: &["walk", "shield", "shoot"],
                sprite: "bulwark.png",
            },
            CharacterClass::Phantom => Self {
                name: "Phantom",
                moves: &["run", "crouch", "shoot"],
                sprite: "phantom.png",
            },
            CharacterClass::Medic => Self {
                name: "Medic",
                moves: &["run", "heal", "shoot"],
                sprite: "medic.png",
            },
            CharacterClass::Tempest => Self {
                name: "Tempest",
                moves: &["run_fast", "jump_high", "shoot"],
                sprite: "tempest.png",
            },
            CharacterClass::Oracle => Self {
                name: "Oracle",
                moves: &["run", "scan", "shoot"],
                sprite: "oracle.png",
            },
        }
    }
}
