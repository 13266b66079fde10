//! Game state and core simulation types
//!
//! Everything a running game owns lives in one `GameState`. A restart throws
//! the whole value away and builds a new one, so nothing leaks between games.

use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyController;
use super::player::PlayerState;
use super::rng::RandomGenerator;
use super::stream::{ObjectStream, StreamKind};
use crate::tuning::Tuning;

/// Drawable area reported by the host, re-read every frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Player x where the world starts scrolling instead of the player moving
    pub fn scroll_threshold(&self, tuning: &Tuning) -> f32 {
        self.width * tuning.scroll_threshold_fraction
    }
}

/// Current phase of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Running,
    /// Fell through the bottom or scrolled off the left edge
    GameOver,
}

/// Notifications for the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A distance milestone scheduled a speed-up ramp
    SpeedUp { distance: u32 },
    GameOver { distance: u32 },
}

/// Serializable for debug snapshots only; games are never saved
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    pub seed: u64,
    #[serde(skip)]
    pub rng: RandomGenerator,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Viewport seen by the most recent tick
    pub viewport: Viewport,
    pub player: PlayerState,
    pub platforms: ObjectStream,
    pub floors: ObjectStream,
    pub difficulty: DifficultyController,
}

impl GameState {
    /// Build the opening world: seed platforms, seed floor, player at the start
    pub fn new(seed: u64, viewport: Viewport, tuning: &Tuning) -> Self {
        let mut rng = RandomGenerator::new(seed);
        let platforms = ObjectStream::new(StreamKind::Platform, viewport, &mut rng, tuning);
        let floors = ObjectStream::new(StreamKind::Floor, viewport, &mut rng, tuning);

        log::info!(
            "World built (seed {}, viewport {}x{}, {} platforms, {} floors)",
            seed,
            viewport.width,
            viewport.height,
            platforms.len(),
            floors.len()
        );

        Self {
            seed,
            rng,
            phase: GamePhase::Running,
            time_ticks: 0,
            viewport,
            player: PlayerState::new(tuning),
            platforms,
            floors,
            difficulty: DifficultyController::new(tuning),
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Whether the player is standing on anything this frame
    pub fn player_supported(&self) -> bool {
        self.floors.supports(&self.player) || self.platforms.supports(&self.player)
    }

    /// Fell below the viewport or scrolled off its left edge
    pub fn player_lost(&self) -> bool {
        let rect = self.player.rect();
        rect.top() > self.viewport.height || rect.right() < 0.0
    }
}
