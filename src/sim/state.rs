//! Session state and core simulation types
//!
//! Everything that must survive for determinism or snapshots lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of a play session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Waiting on the start menu, nothing spawned
    Idle,
    /// Claw free, tracking the pointer
    Playing,
    /// Claw descending toward the prize pool
    Dropping,
    /// Claw rising back to rest height
    Ascending,
    /// A prize is attached to the claw
    Holding,
    /// Released prize is falling, claw locked until it lands or settles
    Releasing,
    /// Victory display, restart offered
    Won,
}

/// Overlay cue derived from the raw pointer position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClawLean {
    #[default]
    Centered,
    Left,
    Right,
}

/// The player's claw
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claw {
    pub pos: Vec2,
    /// Vertical target of the current travel leg (Dropping/Ascending)
    pub travel_target_y: f32,
}

impl Claw {
    pub fn at_rest(config: &SessionConfig) -> Self {
        let rest = Vec2::new(
            (config.claw_min_x + config.claw_max_x) / 2.0,
            config.claw_rest_y,
        );
        Self {
            pos: rest,
            travel_target_y: config.claw_rest_y,
        }
    }
}

/// A prize entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prize {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Gravity is suspended while the prize hangs from the claw
    pub gravity_enabled: bool,
    pub held: bool,
}

impl Prize {
    pub fn new(id: u32, pos: Vec2, radius: f32) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            radius,
            gravity_enabled: true,
            held: false,
        }
    }

    /// Pin the prize under the claw, suspending physics
    pub fn attach(&mut self, claw_pos: Vec2, carry_offset_y: f32) {
        self.held = true;
        self.gravity_enabled = false;
        self.vel = Vec2::ZERO;
        self.pos = claw_pos + Vec2::new(0.0, carry_offset_y);
    }

    /// Free the prize with a downward launch kick
    pub fn release(&mut self, release_speed: f32) {
        self.held = false;
        self.gravity_enabled = true;
        self.vel = Vec2::new(0.0, release_speed);
    }
}

/// Axis-aligned drop zone on the playfield floor
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DropZone {
    pub min: Vec2,
    pub max: Vec2,
}

impl DropZone {
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }
}

/// One-shot notifications produced by the session controller
///
/// The host drains these each frame; `Victory` is what the mint relay
/// listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    SessionStarted,
    PrizeGrabbed { prize_id: u32 },
    GrabMissed,
    PrizeReleased { prize_id: u32 },
    Victory { prize_id: u32 },
    SessionReset,
}

/// Session tuning, injected at construction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Number of prizes in the pool (>= 1)
    pub prize_count: usize,
    pub claw_min_x: f32,
    pub claw_max_x: f32,
    pub claw_rest_y: f32,
    pub claw_drop_y: f32,
    pub claw_travel_secs: f32,
    pub carry_offset_y: f32,
    pub grab_radius: f32,
    pub prize_radius: f32,
    pub gravity: f32,
    pub bounce: f32,
    pub release_speed: f32,
    /// Prize spawn rectangle (spawns may overlap each other)
    pub spawn_min: Vec2,
    pub spawn_max: Vec2,
    /// Playfield extent; prizes collide with its walls and floor
    pub field: Vec2,
    pub zone: DropZone,
    pub victory_delay_ticks: u32,
    pub release_timeout_ticks: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            prize_count: 3,
            claw_min_x: CLAW_MIN_X,
            claw_max_x: CLAW_MAX_X,
            claw_rest_y: CLAW_REST_Y,
            claw_drop_y: CLAW_DROP_Y,
            claw_travel_secs: CLAW_TRAVEL_SECS,
            carry_offset_y: CARRY_OFFSET_Y,
            grab_radius: GRAB_RADIUS,
            prize_radius: PRIZE_RADIUS,
            gravity: PRIZE_GRAVITY,
            bounce: PRIZE_BOUNCE,
            release_speed: RELEASE_SPEED,
            spawn_min: Vec2::new(SPAWN_MIN_X, SPAWN_MIN_Y),
            spawn_max: Vec2::new(SPAWN_MAX_X, SPAWN_MAX_Y),
            field: Vec2::new(FIELD_WIDTH, FIELD_HEIGHT),
            zone: DropZone {
                min: Vec2::new(300.0, 560.0),
                max: Vec2::new(500.0, 600.0),
            },
            victory_delay_ticks: VICTORY_DELAY_TICKS,
            release_timeout_ticks: RELEASE_TIMEOUT_TICKS,
        }
    }
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Number of plays started; feeds the per-play spawn stream
    pub play_index: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: SessionPhase,
    pub claw: Claw,
    /// Prize pool (sorted by id for determinism)
    pub prizes: Vec<Prize>,
    /// Id of the prize currently hanging from the claw
    pub held_prize: Option<u32>,
    /// Id of the last deliberately released prize
    pub released_prize: Option<u32>,
    /// Set on release, cleared by the first valid zone contact; the only
    /// thing that can arm a win
    pub prize_released: bool,
    /// Ticks spent in Releasing with no zone contact yet
    pub release_ticks: u32,
    /// Pending victory display delay; dropped wholesale on restart
    pub victory_countdown: Option<u32>,
    pub lean: ClawLean,
    pub config: SessionConfig,
    /// Events waiting for the host (not part of snapshots)
    #[serde(skip)]
    pending_events: Vec<GameEvent>,
    next_id: u32,
}

impl SessionState {
    /// Create a fresh idle session with the given seed
    pub fn new(seed: u64, config: SessionConfig) -> Self {
        Self {
            seed,
            play_index: 0,
            time_ticks: 0,
            phase: SessionPhase::Idle,
            claw: Claw::at_rest(&config),
            prizes: Vec::new(),
            held_prize: None,
            released_prize: None,
            prize_released: false,
            release_ticks: 0,
            victory_countdown: None,
            lean: ClawLean::Centered,
            config,
            pending_events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new prize ID
    pub fn next_prize_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Start a play: spawn the claw at rest and the prize pool at seeded
    /// random positions inside the spawn rectangle
    pub fn begin_play(&mut self) {
        use rand::Rng;

        self.play_index += 1;
        self.claw = Claw::at_rest(&self.config);

        // Per-play spawn stream derived from the session seed, so restarts
        // reshuffle while the whole session stays reproducible
        let spawn_seed = (self.play_index as u64)
            .wrapping_mul(2654435761)
            .wrapping_add(self.seed);
        let mut rng = Pcg32::seed_from_u64(spawn_seed);

        self.prizes.clear();
        for _ in 0..self.config.prize_count.max(1) {
            let id = self.next_prize_id();
            let pos = Vec2::new(
                rng.random_range(self.config.spawn_min.x..=self.config.spawn_max.x),
                rng.random_range(self.config.spawn_min.y..=self.config.spawn_max.y),
            );
            self.prizes
                .push(Prize::new(id, pos, self.config.prize_radius));
        }

        log::info!(
            "play {} started: {} prizes spawned",
            self.play_index,
            self.prizes.len()
        );
        self.phase = SessionPhase::Playing;
        self.push_event(GameEvent::SessionStarted);
    }

    /// Tear the session down to Idle; every prize is recreated on the next
    /// `begin_play`, so no stale references can survive
    pub fn reset(&mut self) {
        self.phase = SessionPhase::Idle;
        self.claw = Claw::at_rest(&self.config);
        self.prizes.clear();
        self.held_prize = None;
        self.released_prize = None;
        self.prize_released = false;
        self.release_ticks = 0;
        self.victory_countdown = None;
        self.lean = ClawLean::Centered;
        self.push_event(GameEvent::SessionReset);
    }

    pub fn prize(&self, id: u32) -> Option<&Prize> {
        self.prizes.iter().find(|p| p.id == id)
    }

    pub fn prize_mut(&mut self, id: u32) -> Option<&mut Prize> {
        self.prizes.iter_mut().find(|p| p.id == id)
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }

    /// Drain events accumulated since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Ensure prizes are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.prizes.sort_by_key(|p| p.id);
    }
}
