//! Wire protocol message definitions
//! These are the frame types exchanged between the two peers

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Character classes available on the roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterClass {
    /// Closes distance with an instant dash
    Vanguard,
    /// Short adrenaline burst of move speed
    Striker,
    /// Amplified shots for a few seconds
    Deadeye,
    /// Near-immobile but immune while fortified
    Bulwark,
    /// Cloaks and speeds up, invisible to the opponent
    Phantom,
    /// Carries a single med kit
    Medic,
    /// Longest and strongest speed boost
    Tempest,
    /// Counters cloaking by revealing the opponent
    Oracle,
}

impl CharacterClass {
    /// Every roster entry, in menu order
    pub const ALL: [CharacterClass; 8] = [
        CharacterClass::Vanguard,
        CharacterClass::Striker,
        CharacterClass::Deadeye,
        CharacterClass::Bulwark,
        CharacterClass::Phantom,
        CharacterClass::Medic,
        CharacterClass::Tempest,
        CharacterClass::Oracle,
    ];
}

impl Default for CharacterClass {
    fn default() -> Self {
        // The mirror shows this sprite until character_selection arrives
        Self::Tempest
    }
}

/// Error for names that are not on the roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("not a roster character name")]
pub struct UnknownCharacter;

impl FromStr for CharacterClass {
    type Err = UnknownCharacter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "vanguard" => Ok(Self::Vanguard),
            "striker" => Ok(Self::Striker),
            "deadeye" => Ok(Self::Deadeye),
            "bulwark" => Ok(Self::Bulwark),
            "phantom" => Ok(Self::Phantom),
            "medic" => Ok(Self::Medic),
            "tempest" => Ok(Self::Tempest),
            "oracle" => Ok(Self::Oracle),
            _ => Err(UnknownCharacter),
        }
    }
}

/// Special ability variants, one per character class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityKind {
    /// Instant +200 position offset on x
    Dash,
    /// Move speed x3 for 2s
    Adrenaline,
    /// Damage x3 and projectile speed x2 for 3s
    FocusFire,
    /// Damage immunity at crawl speed for 4s
    Fortify,
    /// Hidden and move speed x2 for 3s
    Cloak,
    /// One-shot heal of 30, capped at full health
    Mend,
    /// Move speed x4 for 5s
    Surge,
    /// Force a cloaked opponent visible
    Reveal,
}

/// Messages exchanged between peers
///
/// Each frame is a flat JSON record with a `type` discriminator,
/// terminated by a newline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message {
    /// Announce which character this peer plays
    CharacterSelection { character: CharacterClass },

    /// A projectile was fired at the given spawn position
    Shot { x: f32, y: f32 },

    /// The sender's own health changed (it is authoritative for it)
    HealthUpdate { health: u32 },

    /// The sender activated its special ability
    AbilityUse {
        ability: AbilityKind,
        character: CharacterClass,
    },

    /// Position report for the sender's player
    Position { x: f32, y: f32 },

    /// Placeholder report sent instead of a position while cloaked
    StealthPosition,
}
