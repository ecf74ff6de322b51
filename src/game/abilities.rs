//! Character ability state machine
//!
//! Activation mutates the player immediately; duration abilities arm an
//! expiry tick that [`expire`] checks every simulation tick, restoring
//! baseline stats when it passes. Dispatch is a closed match over
//! [`AbilityKind`], so adding a variant breaks compilation everywhere it
//! must be handled.

use crate::net::protocol::AbilityKind;
use crate::util::time::secs_to_ticks;

use super::combat::{BASE_DAMAGE, BASE_MOVE_SPEED, MAX_HEALTH};
use super::roster::AbilityDescriptor;
use super::session::{AbilityState, PlayerState};

/// Instant position offset of a dash
pub const DASH_OFFSET: f32 = 200.0;
/// Crawl speed while fortified
pub const FORTIFY_MOVE_SPEED: f32 = 60.0;
/// Health restored by the one-shot med kit
pub const MEND_AMOUNT: u32 = 30;

/// What an activation attempt did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Effect applied; report ability_use to the peer
    Triggered(AbilityKind),
    /// Heal applied; report ability_use and the new health
    Healed { health: u32 },
    /// The one-shot med kit was already spent; status only, no report
    MedKitSpent,
    /// A duration ability is still running; the attempt is ignored
    AlreadyActive,
}

/// Attempt to activate the player's ability at the current tick
pub fn activate(player: &mut PlayerState, now_tick: u64) -> Activation {
    let descriptor = AbilityDescriptor::for_class(player.character);

    if descriptor.duration.is_some() && player.ability_active() {
        return Activation::AlreadyActive;
    }

    match descriptor.kind {
        AbilityKind::Dash => {
            player.x += DASH_OFFSET;
            Activation::Triggered(AbilityKind::Dash)
        }
        AbilityKind::Adrenaline => {
            player.speed *= 3.0;
            arm(player, &descriptor, now_tick);
            Activation::Triggered(AbilityKind::Adrenaline)
        }
        AbilityKind::FocusFire => {
            player.damage *= 3;
            player.projectile_speed_mult = 2.0;
            arm(player, &descriptor, now_tick);
            Activation::Triggered(AbilityKind::FocusFire)
        }
        AbilityKind::Fortify => {
            player.speed = FORTIFY_MOVE_SPEED;
            arm(player, &descriptor, now_tick);
            Activation::Triggered(AbilityKind::Fortify)
        }
        AbilityKind::Cloak => {
            player.stealthed = true;
            player.speed *= 2.0;
            arm(player, &descriptor, now_tick);
            Activation::Triggered(AbilityKind::Cloak)
        }
        AbilityKind::Mend => {
            if player.heal_used {
                return Activation::MedKitSpent;
            }
            player.health = (player.health + MEND_AMOUNT).min(MAX_HEALTH);
            player.heal_used = true;
            Activation::Healed {
                health: player.health,
            }
        }
        AbilityKind::Surge => {
            player.speed *= 4.0;
            arm(player, &descriptor, now_tick);
            Activation::Triggered(AbilityKind::Surge)
        }
        AbilityKind::Reveal => Activation::Triggered(AbilityKind::Reveal),
    }
}

fn arm(player: &mut PlayerState, descriptor: &AbilityDescriptor, now_tick: u64) {
    if let Some(secs) = descriptor.duration {
        player.ability = AbilityState::Active {
            expires_at: now_tick + secs_to_ticks(secs),
        };
    }
}

/// Restore baseline stats once the active ability's deadline passes.
/// Returns the ability that wore off, if any.
pub fn expire(player: &mut PlayerState, now_tick: u64) -> Option<AbilityKind> {
    let AbilityState::Active { expires_at } = player.ability else {
        return None;
    };
    if now_tick < expires_at {
        return None;
    }

    let kind = AbilityDescriptor::for_class(player.character).kind;
    match kind {
        AbilityKind::Adrenaline | AbilityKind::Fortify | AbilityKind::Surge => {
            player.speed = BASE_MOVE_SPEED;
        }
        AbilityKind::FocusFire => {
            player.damage = BASE_DAMAGE;
            player.projectile_speed_mult = 1.0;
        }
        AbilityKind::Cloak => {
            player.stealthed = false;
            player.speed = BASE_MOVE_SPEED;
        }
        // Instantaneous abilities are never Active
        AbilityKind::Dash | AbilityKind::Mend | AbilityKind::Reveal => {}
    }
    player.ability = AbilityState::Idle;
    Some(kind)
}
