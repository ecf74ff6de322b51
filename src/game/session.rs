//! Session state and the fixed-rate duel loop
//!
//! The session owns both players, the projectile collections and the
//! peer channel. It is the only writer of game state: inbound messages
//! and local input are queued and applied at tick boundaries.

use std::collections::HashSet;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::input::{InputEvent, MoveKey};
use crate::net::protocol::{AbilityKind, CharacterClass, Message};
use crate::net::Channel;
use crate::util::time::{secs_to_ticks, tick_delta, REPORT_INTERVAL_TICKS, TICK_DURATION_MICROS};
use crate::view::{Cue, CuePlayer, Entity, Stage};

use super::abilities::{self, Activation};
use super::combat::{
    self, Projectile, BASE_DAMAGE, BASE_MOVE_SPEED, MAX_HEALTH, PLAYER_SIZE, PROJECTILE_SIZE,
};
use super::roster::{AbilityDescriptor, CharacterProfile};
use super::Side;

/// Seconds the opponent sprite stays hidden after a reported cloak
const REMOTE_HIDE_SECS: f32 = 3.0;

/// Spawn positions: local player left, mirror right until its first report
const LOCAL_SPAWN: (f32, f32) = (100.0, 100.0);
const REMOTE_SPAWN: (f32, f32) = (500.0, 100.0);

/// Ability activation state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbilityState {
    Idle,
    /// A duration ability is running until the given simulation tick
    Active { expires_at: u64 },
}

/// One player's state
///
/// The local instance is the single source of truth for local simulation.
/// The remote instance is a mirror updated only by inbound messages -
/// its ability fields stay at their defaults because ability effects are
/// never transmitted.
#[derive(Debug, Clone)]
pub struct PlayerState {
    pub character: CharacterClass,
    pub x: f32,
    pub y: f32,
    /// Clamped to 0..=100
    pub health: u32,
    /// Current move speed in px/s, ability-modified
    pub speed: f32,
    /// Damage per own shot, ability-modified
    pub damage: u32,
    pub projectile_speed_mult: f32,
    pub ability: AbilityState,
    pub stealthed: bool,
    pub heal_used: bool,
}

impl PlayerState {
    pub fn new(character: CharacterClass, x: f32, y: f32) -> Self {
        Self {
            character,
            x,
            y,
            health: MAX_HEALTH,
            speed: BASE_MOVE_SPEED,
            damage: BASE_DAMAGE,
            projectile_speed_mult: 1.0,
            ability: AbilityState::Idle,
            stealthed: false,
            heal_used: false,
        }
    }

    pub fn ability_active(&self) -> bool {
        matches!(self.ability, AbilityState::Active { .. })
    }

    /// Fortify ignores incoming damage while it runs
    pub fn damage_immune(&self) -> bool {
        self.ability_active()
            && AbilityDescriptor::for_class(self.character).kind == AbilityKind::Fortify
    }
}

/// Game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    InProgress,
    Ended { winner: Side },
}

/// Final outcome of a duel
#[derive(Debug, Clone, Copy)]
pub struct Outcome {
    pub winner: Side,
    /// Simulation ticks the duel lasted
    pub ticks: u64,
}

/// Counts simulation ticks between position reports
struct ReportTicker {
    ticks_since_report: u32,
    interval: u32,
}

impl ReportTicker {
    fn new(interval: u32) -> Self {
        Self {
            ticks_since_report: 0,
            interval,
        }
    }

    fn should_send(&mut self) -> bool {
        self.ticks_since_report += 1;
        if self.ticks_since_report >= self.interval {
            self.ticks_since_report = 0;
            true
        } else {
            false
        }
    }
}

/// The duel session
pub struct Session {
    tick: u64,
    phase: Phase,
    local: PlayerState,
    remote: PlayerState,
    local_shots: Vec<Projectile>,
    remote_shots: Vec<Projectile>,
    /// Tick at which the cloaked opponent is shown again
    remote_hidden_until: Option<u64>,
    pressed: HashSet<MoveKey>,
    channel: Channel,
    stage: Box<dyn Stage>,
    audio: Box<dyn CuePlayer>,
    reports: ReportTicker,
}

impl Session {
    pub fn new(
        character: CharacterClass,
        channel: Channel,
        stage: Box<dyn Stage>,
        audio: Box<dyn CuePlayer>,
    ) -> Self {
        Self {
            tick: 0,
            phase: Phase::InProgress,
            local: PlayerState::new(character, LOCAL_SPAWN.0, LOCAL_SPAWN.1),
            remote: PlayerState::new(CharacterClass::default(), REMOTE_SPAWN.0, REMOTE_SPAWN.1),
            local_shots: Vec::new(),
            remote_shots: Vec::new(),
            remote_hidden_until: None,
            pressed: HashSet::new(),
            channel,
            stage,
            audio,
            reports: ReportTicker::new(REPORT_INTERVAL_TICKS),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn local(&self) -> &PlayerState {
        &self.local
    }

    pub fn remote(&self) -> &PlayerState {
        &self.remote
    }

    /// Run the duel loop until one side's health reaches zero
    pub async fn run(
        mut self,
        mut inbound: mpsc::Receiver<Message>,
        mut input: mpsc::UnboundedReceiver<InputEvent>,
    ) -> Outcome {
        info!(character = ?self.local.character, "Duel started");

        self.prepare_stage();
        self.channel.send(Message::CharacterSelection {
            character: self.local.character,
        });

        let mut ticks = interval(Duration::from_micros(TICK_DURATION_MICROS));
        ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticks.tick().await;

            // Drain queued input and peer messages before simulating
            while let Ok(event) = input.try_recv() {
                self.apply_input(event);
            }
            while let Ok(msg) = inbound.try_recv() {
                self.apply_message(msg);
            }

            self.step();

            if let Phase::Ended { winner } = self.phase {
                return Outcome {
                    winner,
                    ticks: self.tick,
                };
            }

            if self.reports.should_send() {
                self.send_report();
            }
        }
    }

    fn prepare_stage(&mut self) {
        let profile = CharacterProfile::for_class(self.local.character);
        self.stage
            .set_sprite(Entity::Player(Side::Local), profile.sprite);
        self.stage.set_sprite(
            Entity::Player(Side::Remote),
            CharacterProfile::for_class(self.remote.character).sprite,
        );
        self.stage
            .set_position(Entity::Player(Side::Local), self.local.x, self.local.y);
        self.stage
            .set_position(Entity::Player(Side::Remote), self.remote.x, self.remote.y);
        self.stage.set_health(Side::Local, self.local.health);
        self.stage.set_health(Side::Remote, self.remote.health);
        self.stage.set_status(&format!("In game as {}!", profile.name));
    }

    /// Apply one local input event
    pub fn apply_input(&mut self, event: InputEvent) {
        if self.phase != Phase::InProgress {
            return;
        }
        match event {
            InputEvent::Pressed(key) => {
                self.pressed.insert(key);
            }
            InputEvent::Released(key) => {
                self.pressed.remove(&key);
            }
            InputEvent::Fire => self.fire(),
            InputEvent::Ability => self.use_ability(),
        }
    }

    fn fire(&mut self) {
        self.audio.play(Cue::Shoot);

        // Muzzle at the player's center
        let x = self.local.x + (PLAYER_SIZE.0 - PROJECTILE_SIZE.0) / 2.0;
        let y = self.local.y + (PLAYER_SIZE.1 - PROJECTILE_SIZE.1) / 2.0;
        let shot = Projectile::spawn(
            Side::Local,
            x,
            y,
            self.local.damage,
            self.local.projectile_speed_mult,
        );
        debug!(id = %shot.id, x, y, "Fired");
        self.local_shots.push(shot);

        self.channel.send(Message::Shot { x, y });
    }

    fn use_ability(&mut self) {
        let character = self.local.character;
        let descriptor = AbilityDescriptor::for_class(character);

        match abilities::activate(&mut self.local, self.tick) {
            Activation::AlreadyActive => {}
            Activation::MedKitSpent => {
                self.audio.play(Cue::Ability);
                self.stage.set_status("Med kit already used!");
            }
            Activation::Healed { health } => {
                self.audio.play(Cue::Ability);
                self.stage.set_health(Side::Local, health);
                self.channel.send(Message::HealthUpdate { health });
                self.channel.send(Message::AbilityUse {
                    ability: descriptor.kind,
                    character,
                });
                debug!(health, "Med kit used");
            }
            Activation::Triggered(kind) => {
                self.audio.play(Cue::Ability);
                match kind {
                    AbilityKind::Reveal => {
                        // Affects how the opponent is shown here, not them
                        self.remote_hidden_until = None;
                        self.stage.set_visible(Entity::Player(Side::Remote), true);
                        self.stage.set_status("Opponent revealed!");
                    }
                    AbilityKind::Dash => self.stage.set_status("Dash!"),
                    _ => self.stage.set_status(descriptor.name),
                }
                self.channel.send(Message::AbilityUse {
                    ability: kind,
                    character,
                });
                debug!(ability = ?kind, tick = self.tick, "Ability used");
            }
        }
    }

    /// Apply one inbound peer message to the mirrored state
    pub fn apply_message(&mut self, msg: Message) {
        if self.phase != Phase::InProgress {
            return;
        }
        match msg {
            Message::CharacterSelection { character } => {
                self.remote.character = character;
                self.stage.set_sprite(
                    Entity::Player(Side::Remote),
                    CharacterProfile::for_class(character).sprite,
                );
                debug!(?character, "Opponent selected character");
            }
            Message::Shot { x, y } => {
                self.audio.play(Cue::Shoot);
                self.remote_shots
                    .push(Projectile::spawn(Side::Remote, x, y, BASE_DAMAGE, 1.0));
            }
            Message::HealthUpdate { health } => {
                let health = combat::clamp_health(health);
                self.remote.health = health;
                self.stage.set_health(Side::Remote, health);
                if health == 0 {
                    self.end_duel(Side::Local);
                }
            }
            Message::AbilityUse { ability, character } => {
                self.audio.play(Cue::Ability);
                debug!(?ability, ?character, "Opponent used ability");
                match ability {
                    AbilityKind::Cloak => {
                        self.stage.set_visible(Entity::Player(Side::Remote), false);
                        self.remote_hidden_until =
                            Some(self.tick + secs_to_ticks(REMOTE_HIDE_SECS));
                    }
                    AbilityKind::Reveal => {
                        // Cosmetic: our own cloak timer still runs and the
                        // next stealth report hides us again
                        if AbilityDescriptor::for_class(self.local.character).kind
                            == AbilityKind::Cloak
                        {
                            self.stage.set_visible(Entity::Player(Side::Local), true);
                        }
                    }
                    _ => {}
                }
            }
            Message::Position { x, y } => {
                self.remote.x = x;
                self.remote.y = y;
                self.stage.set_position(Entity::Player(Side::Remote), x, y);
                self.stage.set_visible(Entity::Marker(Side::Remote), true);
            }
            Message::StealthPosition => {
                self.stage.set_visible(Entity::Marker(Side::Remote), false);
            }
        }
    }

    /// Advance the simulation by one tick
    pub fn step(&mut self) {
        if self.phase != Phase::InProgress {
            return;
        }
        self.tick += 1;

        if let Some(kind) = abilities::expire(&mut self.local, self.tick) {
            if kind == AbilityKind::Cloak {
                self.stage.set_visible(Entity::Player(Side::Local), true);
                self.stage.set_visible(Entity::Marker(Side::Local), true);
            }
            self.stage.set_status("Ability worn off");
            debug!(ability = ?kind, tick = self.tick, "Ability expired");
        }

        if let Some(deadline) = self.remote_hidden_until {
            if self.tick >= deadline {
                self.remote_hidden_until = None;
                self.stage.set_visible(Entity::Player(Side::Remote), true);
                self.stage.set_status("Opponent revealed!");
            }
        }

        self.apply_movement();
        self.advance_local_shots();
        self.advance_remote_shots();
        self.sync_stage();
    }

    fn apply_movement(&mut self) {
        let dist = self.local.speed * tick_delta();
        if self.pressed.contains(&MoveKey::Up) {
            self.local.y += dist;
        }
        if self.pressed.contains(&MoveKey::Down) {
            self.local.y -= dist;
        }
        if self.pressed.contains(&MoveKey::Left) {
            self.local.x -= dist;
        }
        if self.pressed.contains(&MoveKey::Right) {
            self.local.x += dist;
        }
    }

    /// Our shots against the mirrored opponent. Hits only play a cue -
    /// the opponent computes and reports its own damage.
    fn advance_local_shots(&mut self) {
        let (rx, ry) = (self.remote.x, self.remote.y);
        let mut hits = 0u32;

        self.local_shots.retain_mut(|shot| {
            if !shot.advance() {
                return false;
            }
            if shot.hits_player(rx, ry) {
                hits += 1;
                return false;
            }
            true
        });

        for _ in 0..hits {
            self.audio.play(Cue::Hit);
        }
    }

    /// Opponent shots against the local player - here damage is real
    fn advance_remote_shots(&mut self) {
        let (lx, ly) = (self.local.x, self.local.y);
        let immune = self.local.damage_immune();
        let mut hits = 0u32;
        let mut damage_taken = 0u32;

        self.remote_shots.retain_mut(|shot| {
            if !shot.advance() {
                return false;
            }
            if shot.hits_player(lx, ly) {
                if !immune {
                    hits += 1;
                    damage_taken += shot.damage;
                }
                return false;
            }
            true
        });

        if hits > 0 {
            for _ in 0..hits {
                self.audio.play(Cue::Hit);
            }
            let (health, dead) = combat::apply_damage(self.local.health, damage_taken);
            self.local.health = health;
            self.stage.set_health(Side::Local, health);
            self.channel.send(Message::HealthUpdate { health });
            if dead {
                self.end_duel(Side::Remote);
            }
        }
    }

    fn sync_stage(&mut self) {
        self.stage
            .set_position(Entity::Player(Side::Local), self.local.x, self.local.y);
        self.stage
            .set_position(Entity::Marker(Side::Local), self.local.x, self.local.y);
        self.stage
            .set_position(Entity::Marker(Side::Remote), self.remote.x, self.remote.y);
    }

    /// Emit the 10 Hz position report (or its stealth placeholder)
    fn send_report(&mut self) {
        if self.local.stealthed {
            self.stage.set_visible(Entity::Player(Side::Local), false);
            self.stage.set_visible(Entity::Marker(Side::Local), false);
            self.channel.send(Message::StealthPosition);
        } else {
            self.stage.set_visible(Entity::Player(Side::Local), true);
            self.stage.set_visible(Entity::Marker(Side::Local), true);
            self.channel.send(Message::Position {
                x: self.local.x,
                y: self.local.y,
            });
        }
    }

    fn end_duel(&mut self, winner: Side) {
        if self.phase != Phase::InProgress {
            return;
        }
        self.phase = Phase::Ended { winner };
        self.stage.show_game_over(winner);
        info!(?winner, tick = self.tick, "Duel ended");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct StageLog {
        visibility: Vec<(Entity, bool)>,
        health: Vec<(Side, u32)>,
        statuses: Vec<String>,
        game_overs: Vec<Side>,
    }

    #[derive(Clone, Default)]
    struct RecordingStage(Arc<Mutex<StageLog>>);

    impl RecordingStage {
        fn last_visibility(&self, entity: Entity) -> Option<bool> {
            self.0
                .lock()
                .unwrap()
                .visibility
                .iter()
                .rev()
                .find(|(e, _)| *e == entity)
                .map(|(_, v)| *v)
        }

        fn game_overs(&self) -> Vec<Side> {
            self.0.lock().unwrap().game_overs.clone()
        }
    }

    impl Stage for RecordingStage {
        fn set_sprite(&mut self, _entity: Entity, _key: &str) {}

        fn set_position(&mut self, _entity: Entity, _x: f32, _y: f32) {}

        fn set_visible(&mut self, entity: Entity, visible: bool) {
            self.0.lock().unwrap().visibility.push((entity, visible));
        }

        fn set_health(&mut self, side: Side, health: u32) {
            self.0.lock().unwrap().health.push((side, health));
        }

        fn set_status(&mut self, text: &str) {
            self.0.lock().unwrap().statuses.push(text.to_string());
        }

        fn show_game_over(&mut self, winner: Side) {
            self.0.lock().unwrap().game_overs.push(winner);
        }
    }

    #[derive(Clone, Default)]
    struct RecordingAudio(Arc<Mutex<Vec<Cue>>>);

    impl RecordingAudio {
        fn cues(&self) -> Vec<Cue> {
            self.0.lock().unwrap().clone()
        }
    }

    impl CuePlayer for RecordingAudio {
        fn play(&self, cue: Cue) {
            self.0.lock().unwrap().push(cue);
        }
    }

    fn test_session(
        character: CharacterClass,
    ) -> (
        Session,
        mpsc::UnboundedReceiver<Message>,
        RecordingStage,
        RecordingAudio,
    ) {
        let (channel, outbound) = Channel::detached();
        let stage = RecordingStage::default();
        let audio = RecordingAudio::default();
        let session = Session::new(
            character,
            channel,
            Box::new(stage.clone()),
            Box::new(audio.clone()),
        );
        (session, outbound, stage, audio)
    }

    fn drain(outbound: &mut mpsc::UnboundedReceiver<Message>) -> Vec<Message> {
        std::iter::from_fn(|| outbound.try_recv().ok()).collect()
    }

    #[tokio::test]
    async fn shot_message_spawns_one_inbound_projectile() {
        let (mut session, _outbound, _stage, _audio) = test_session(CharacterClass::Vanguard);

        session.apply_message(Message::Shot { x: 10.0, y: 20.0 });

        assert_eq!(session.remote_shots.len(), 1);
        let shot = &session.remote_shots[0];
        assert_eq!((shot.x, shot.y), (10.0, 20.0));
        assert!(shot.vel_x < 0.0, "inbound shots travel toward the local side");
    }

    #[tokio::test]
    async fn repeated_zero_health_reports_end_the_duel_once() {
        let (mut session, _outbound, stage, _audio) = test_session(CharacterClass::Vanguard);

        for _ in 0..3 {
            session.apply_message(Message::HealthUpdate { health: 0 });
        }

        assert_eq!(stage.game_overs(), vec![Side::Local]);
        assert_eq!(session.phase(), Phase::Ended { winner: Side::Local });
    }

    #[tokio::test]
    async fn inbound_health_is_clamped_to_the_valid_range() {
        let (mut session, _outbound, _stage, _audio) = test_session(CharacterClass::Vanguard);

        session.apply_message(Message::HealthUpdate { health: 9999 });
        assert_eq!(session.remote().health, MAX_HEALTH);
    }

    #[tokio::test]
    async fn taking_a_hit_applies_and_reports_damage() {
        let (mut session, mut outbound, _stage, audio) = test_session(CharacterClass::Vanguard);

        let (lx, ly) = (session.local.x, session.local.y);
        session
            .remote_shots
            .push(Projectile::spawn(Side::Remote, lx, ly, BASE_DAMAGE, 1.0));

        session.step();

        assert_eq!(session.local().health, 90);
        assert!(session.remote_shots.is_empty());
        assert!(audio.cues().contains(&Cue::Hit));
        assert_eq!(drain(&mut outbound), vec![Message::HealthUpdate { health: 90 }]);
    }

    #[tokio::test]
    async fn fortify_blocks_damage_and_suppresses_the_report() {
        let (mut session, mut outbound, _stage, _audio) = test_session(CharacterClass::Bulwark);

        session.apply_input(InputEvent::Ability);
        let after_activation = drain(&mut outbound);
        assert!(matches!(
            &after_activation[..],
            [Message::AbilityUse {
                ability: AbilityKind::Fortify,
                ..
            }]
        ));

        let (lx, ly) = (session.local.x, session.local.y);
        session
            .remote_shots
            .push(Projectile::spawn(Side::Remote, lx, ly, BASE_DAMAGE, 1.0));
        session.step();

        assert_eq!(session.local().health, MAX_HEALTH);
        assert!(session.remote_shots.is_empty(), "the shot is still consumed");
        assert!(drain(&mut outbound).is_empty(), "no health_update while immune");
    }

    #[tokio::test]
    async fn own_hits_never_touch_local_health() {
        let (mut session, mut outbound, _stage, audio) = test_session(CharacterClass::Vanguard);

        let (rx, ry) = (session.remote.x, session.remote.y);
        session
            .local_shots
            .push(Projectile::spawn(Side::Local, rx, ry, BASE_DAMAGE, 1.0));

        session.step();

        assert!(session.local_shots.is_empty());
        assert_eq!(session.local().health, MAX_HEALTH);
        assert_eq!(session.remote().health, MAX_HEALTH);
        assert!(audio.cues().contains(&Cue::Hit));
        assert!(drain(&mut outbound).is_empty());
    }

    #[tokio::test]
    async fn local_death_ends_the_duel_for_the_opponent() {
        let (mut session, _outbound, stage, _audio) = test_session(CharacterClass::Vanguard);
        session.local.health = 10;

        let (lx, ly) = (session.local.x, session.local.y);
        session
            .remote_shots
            .push(Projectile::spawn(Side::Remote, lx, ly, BASE_DAMAGE, 1.0));
        session.step();

        assert_eq!(session.local().health, 0);
        assert_eq!(session.phase(), Phase::Ended { winner: Side::Remote });
        assert_eq!(stage.game_overs(), vec![Side::Remote]);

        // Further ticks and messages are inert
        session.step();
        session.apply_message(Message::HealthUpdate { health: 0 });
        assert_eq!(stage.game_overs(), vec![Side::Remote]);
    }

    #[tokio::test]
    async fn stealth_window_swaps_position_reports() {
        let (mut session, mut outbound, _stage, _audio) = test_session(CharacterClass::Phantom);

        session.apply_input(InputEvent::Ability);
        drain(&mut outbound);

        session.send_report();
        assert_eq!(drain(&mut outbound), vec![Message::StealthPosition]);

        // Run out the 3s cloak window
        for _ in 0..=secs_to_ticks(3.0) {
            session.step();
        }
        drain(&mut outbound);
        assert!(!session.local().stealthed);

        session.send_report();
        let reports = drain(&mut outbound);
        match reports.as_slice() {
            [Message::Position { x, y }] => {
                assert_eq!(*x, session.local().x);
                assert_eq!(*y, session.local().y);
            }
            other => panic!("expected a position report, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn opponent_cloak_hides_until_the_local_timer_fires() {
        let (mut session, _outbound, stage, _audio) = test_session(CharacterClass::Vanguard);

        session.apply_message(Message::AbilityUse {
            ability: AbilityKind::Cloak,
            character: CharacterClass::Phantom,
        });
        assert_eq!(stage.last_visibility(Entity::Player(Side::Remote)), Some(false));

        for _ in 0..=secs_to_ticks(REMOTE_HIDE_SECS) {
            session.step();
        }

        assert_eq!(stage.last_visibility(Entity::Player(Side::Remote)), Some(true));
        assert_eq!(session.remote_hidden_until, None);
    }

    #[tokio::test]
    async fn reveal_cancels_the_opponents_hide_timer() {
        let (mut session, mut outbound, stage, _audio) = test_session(CharacterClass::Oracle);

        session.apply_message(Message::AbilityUse {
            ability: AbilityKind::Cloak,
            character: CharacterClass::Phantom,
        });
        assert!(session.remote_hidden_until.is_some());

        session.apply_input(InputEvent::Ability);

        assert_eq!(session.remote_hidden_until, None);
        assert_eq!(stage.last_visibility(Entity::Player(Side::Remote)), Some(true));
        let reported = drain(&mut outbound);
        assert!(matches!(
            &reported[..],
            [Message::AbilityUse {
                ability: AbilityKind::Reveal,
                character: CharacterClass::Oracle,
            }]
        ));
    }

    #[tokio::test]
    async fn med_kit_reports_health_exactly_once() {
        let (mut session, mut outbound, _stage, _audio) = test_session(CharacterClass::Medic);
        session.local.health = 60;

        session.apply_input(InputEvent::Ability);
        let first = drain(&mut outbound);
        assert_eq!(
            first,
            vec![
                Message::HealthUpdate { health: 90 },
                Message::AbilityUse {
                    ability: AbilityKind::Mend,
                    character: CharacterClass::Medic,
                },
            ]
        );

        session.apply_input(InputEvent::Ability);
        assert_eq!(session.local().health, 90);
        assert!(drain(&mut outbound).is_empty(), "a spent med kit sends nothing");
    }

    #[tokio::test]
    async fn movement_scales_with_current_speed() {
        let (mut session, _outbound, _stage, _audio) = test_session(CharacterClass::Striker);

        session.apply_input(InputEvent::Pressed(MoveKey::Up));
        session.step();
        let base_step = BASE_MOVE_SPEED * tick_delta();
        assert!((session.local().y - (LOCAL_SPAWN.1 + base_step)).abs() < 1e-3);

        session.apply_input(InputEvent::Ability);
        session.step();
        let boosted = LOCAL_SPAWN.1 + base_step + 3.0 * base_step;
        assert!((session.local().y - boosted).abs() < 1e-3);
    }

    #[tokio::test]
    async fn firing_reports_the_spawn_position() {
        let (mut session, mut outbound, _stage, audio) = test_session(CharacterClass::Vanguard);

        session.apply_input(InputEvent::Fire);

        assert_eq!(session.local_shots.len(), 1);
        let shot = &session.local_shots[0];
        assert!(shot.vel_x > 0.0);
        assert_eq!(
            drain(&mut outbound),
            vec![Message::Shot {
                x: shot.x,
                y: shot.y
            }]
        );
        assert!(audio.cues().contains(&Cue::Shoot));
    }

    #[tokio::test]
    async fn character_selection_updates_the_mirror() {
        let (mut session, _outbound, _stage, _audio) = test_session(CharacterClass::Vanguard);

        session.apply_message(Message::CharacterSelection {
            character: CharacterClass::Deadeye,
        });
        assert_eq!(session.remote().character, CharacterClass::Deadeye);
    }

    #[tokio::test]
    async fn stealth_position_hides_the_remote_marker() {
        let (mut session, _outbound, stage, _audio) = test_session(CharacterClass::Vanguard);

        session.apply_message(Message::StealthPosition);
        assert_eq!(stage.last_visibility(Entity::Marker(Side::Remote)), Some(false));

        session.apply_message(Message::Position { x: 300.0, y: 200.0 });
        assert_eq!(stage.last_visibility(Entity::Marker(Side::Remote)), Some(true));
        assert_eq!((session.remote().x, session.remote().y), (300.0, 200.0));
    }

    #[test]
    fn report_ticker_fires_at_the_configured_cadence() {
        let mut ticker = ReportTicker::new(6);
        for round in 0..3 {
            for i in 1..6 {
                assert!(!ticker.should_send(), "round {round}, tick {i}");
            }
            assert!(ticker.should_send(), "round {round}");
        }
    }
}
