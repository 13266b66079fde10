//! Sky Dash - A side-scrolling endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player physics, world streams, difficulty)
//! - `session`: Loading / running / game-over lifecycle around the simulation
//! - `renderer`: Draw list and Canvas 2D backend
//! - `platform`: Asset loading and browser glue
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod renderer;
pub mod session;
pub mod sim;
pub mod tuning;

pub use session::{Frame, Session, SessionPhase};
pub use tuning::{Tuning, TuningError};

/// Frame timing constants
pub mod consts {
    /// Nominal display frame length at 60 Hz, used by the headless driver
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Viewport used when no host surface exists
    pub const HEADLESS_WIDTH: f32 = 1280.0;
    pub const HEADLESS_HEIGHT: f32 = 720.0;
}
