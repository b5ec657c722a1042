//! Deterministic session simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by prize ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{claw_can_grab, prize_in_zone, settle_against_bounds};
pub use state::{
    Claw, ClawLean, DropZone, GameEvent, Prize, SessionConfig, SessionPhase, SessionState,
};
pub use tick::{TickInput, tick};
