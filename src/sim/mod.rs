//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One call to `tick` per display frame
//! - Seeded RNG only
//! - Wall-clock time enters only as the `now_ms` argument
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod input;
pub mod object;
pub mod player;
pub mod rng;
pub mod state;
pub mod stream;
pub mod tick;

pub use collision::{is_supported_by, is_supported_by_any};
pub use difficulty::{DifficultyController, PendingStage};
pub use input::{InputState, Key};
pub use object::{Drawable, Rect, Side, SpriteVariant, WorldObject};
pub use player::PlayerState;
pub use rng::RandomGenerator;
pub use state::{GameEvent, GamePhase, GameState, Viewport};
pub use stream::{ObjectStream, StreamKind};
pub use tick::tick;
