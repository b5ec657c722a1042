//! Claw Grab - an arcade claw machine session engine
//!
//! Core modules:
//! - `sim`: Deterministic session simulation (claw, prize pool, win detection)
//! - `mint`: Win-signal relay and mint collaborator interface
//!
//! The host engine owns rendering and input capture; it feeds pointer
//! coordinates and presses into [`sim::tick`] at a fixed timestep and reads
//! entity positions and [`sim::GameEvent`]s back out.

pub mod mint;
pub mod sim;

pub use mint::{MintConfig, WinRelay};
pub use sim::{SessionConfig, SessionState};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Claw horizontal travel range
    pub const CLAW_MIN_X: f32 = 100.0;
    pub const CLAW_MAX_X: f32 = 700.0;
    /// Claw vertical travel bounds
    pub const CLAW_REST_Y: f32 = 100.0;
    pub const CLAW_DROP_Y: f32 = 560.0;
    /// Duration of one claw travel leg (descent or ascent), seconds
    pub const CLAW_TRAVEL_SECS: f32 = 0.6;
    /// Vertical gap between claw center and a carried prize center
    pub const CARRY_OFFSET_Y: f32 = 30.0;

    /// A grab succeeds only strictly within this distance of a prize center
    pub const GRAB_RADIUS: f32 = 50.0;

    /// Prize defaults
    pub const PRIZE_RADIUS: f32 = 24.0;
    /// Gravity acceleration on free prizes (pixels/s^2)
    pub const PRIZE_GRAVITY: f32 = 600.0;
    /// Velocity retained after a wall/floor bounce
    pub const PRIZE_BOUNCE: f32 = 0.3;
    /// Downward kick applied to a released prize (pixels/s)
    pub const RELEASE_SPEED: f32 = 200.0;

    /// Prize spawn rectangle
    pub const SPAWN_MIN_X: f32 = 150.0;
    pub const SPAWN_MAX_X: f32 = 650.0;
    pub const SPAWN_MIN_Y: f32 = 450.0;
    pub const SPAWN_MAX_Y: f32 = 500.0;

    /// Delay between the released prize landing in the zone and the
    /// victory display (ticks at 120 Hz, ~0.75s)
    pub const VICTORY_DELAY_TICKS: u32 = 90;
    /// Give up on a release that never reaches the drop zone (ticks, ~3s)
    pub const RELEASE_TIMEOUT_TICKS: u32 = 360;

    /// Pointer thresholds for the overlay lean cue
    pub const LEAN_LEFT_X: f32 = 375.0;
    pub const LEAN_RIGHT_X: f32 = 425.0;
}
