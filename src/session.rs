//! Game session lifecycle
//!
//! Wraps the simulation in the loading / running / game-over state machine
//! the host drives. The host feeds it asset completions, key events and one
//! `frame` call per animation frame; it hands back what to draw.

use crate::platform::AssetGate;
use crate::renderer::{DrawList, build_draw_list};
use crate::sim::{GameEvent, GameState, InputState, Key, Viewport, tick};
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Waiting on images before the first game
    Loading,
    Running,
    /// Final state retained until restart
    GameOver,
}

/// Output of one running frame
#[derive(Debug, Clone)]
pub struct Frame {
    pub draw: DrawList,
    pub events: Vec<GameEvent>,
}

impl Frame {
    pub fn is_game_over(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, GameEvent::GameOver { .. }))
    }
}

pub struct Session {
    tuning: Tuning,
    phase: SessionPhase,
    gate: AssetGate,
    first_seed: u64,
    state: Option<GameState>,
    input: InputState,
    games_started: u32,
}

impl Session {
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let gate = AssetGate::new(tuning.asset_count);
        Self {
            tuning,
            phase: SessionPhase::Loading,
            gate,
            first_seed: seed,
            state: None,
            input: InputState::new(),
            games_started: 0,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Current (or final) game, absent while loading
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn games_started(&self) -> u32 {
        self.games_started
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn key_down(&mut self, key: Key) {
        self.input.key_down(key);
    }

    pub fn key_up(&mut self, key: Key) {
        self.input.key_up(key);
    }

    /// One image finished. Starts the first game when the last one arrives.
    pub fn asset_loaded(&mut self, viewport: Viewport) -> bool {
        if self.phase != SessionPhase::Loading {
            log::debug!("Asset completion after loading finished");
            return false;
        }
        if !self.gate.mark_loaded() {
            log::debug!(
                "Assets {}/{} loaded",
                self.gate.loaded(),
                self.gate.required()
            );
            return false;
        }
        log::info!("All {} assets loaded", self.gate.required());
        self.start(self.first_seed, viewport);
        true
    }

    /// Start over after a game over. Ignored in any other phase.
    pub fn restart(&mut self, seed: u64, viewport: Viewport) -> bool {
        if self.phase != SessionPhase::GameOver {
            log::warn!("Restart ignored while {:?}", self.phase);
            return false;
        }
        if let Some(old) = self.state.as_mut() {
            let dropped = old.difficulty.pending().len();
            old.difficulty.cancel_pending();
            if dropped > 0 {
                log::info!("Cancelled {} pending speed-up stages", dropped);
            }
        }
        self.start(seed, viewport);
        true
    }

    fn start(&mut self, seed: u64, viewport: Viewport) {
        self.state = Some(GameState::new(seed, viewport, &self.tuning));
        self.input.clear();
        self.phase = SessionPhase::Running;
        self.games_started += 1;
        log::info!("Game {} started with seed {}", self.games_started, seed);
    }

    /// Advance one animation frame. `None` unless a game is running.
    pub fn frame(&mut self, viewport: Viewport, now_ms: f64) -> Option<Frame> {
        if self.phase != SessionPhase::Running {
            return None;
        }
        let state = self.state.as_mut()?;
        let events = tick(state, &mut self.input, viewport, now_ms, &self.tuning);
        let draw = build_draw_list(state, &self.tuning);
        let frame = Frame { draw, events };
        if frame.is_game_over() {
            self.phase = SessionPhase::GameOver;
        }
        Some(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DrawCommand;

    const VIEWPORT: Viewport = Viewport::new(800.0, 600.0);

    fn loaded_session() -> Session {
        let mut session = Session::new(Tuning::default(), 42);
        for _ in 0..session.tuning().asset_count {
            session.asset_loaded(VIEWPORT);
        }
        session
    }

    fn force_game_over(session: &mut Session) -> Frame {
        if let Some(state) = session.state.as_mut() {
            state.player.pos.y = 10_000.0;
        }
        session.frame(VIEWPORT, 0.0).expect("running frame")
    }

    #[test]
    fn test_loading_gate() {
        let mut session = Session::new(Tuning::default(), 42);
        for _ in 0..6 {
            assert!(!session.asset_loaded(VIEWPORT));
            assert_eq!(session.phase(), SessionPhase::Loading);
            assert!(session.frame(VIEWPORT, 0.0).is_none());
        }
        assert!(session.asset_loaded(VIEWPORT));
        assert_eq!(session.phase(), SessionPhase::Running);
        assert_eq!(session.state().map(|s| s.seed), Some(42));

        // Extra completions change nothing
        assert!(!session.asset_loaded(VIEWPORT));
        assert_eq!(session.games_started(), 1);
    }

    #[test]
    fn test_frame_draws_after_tick() {
        let mut session = loaded_session();
        let frame = session.frame(VIEWPORT, 0.0).expect("running frame");
        assert!(matches!(frame.draw.commands()[0], DrawCommand::Clear { .. }));
        assert_eq!(session.state().map(|s| s.time_ticks), Some(1));
    }

    #[test]
    fn test_restart_ignored_while_running() {
        let mut session = loaded_session();
        session.frame(VIEWPORT, 0.0);
        assert!(!session.restart(7, VIEWPORT));
        assert_eq!(session.state().map(|s| s.seed), Some(42));
        assert_eq!(session.games_started(), 1);
    }

    #[test]
    fn test_game_over_stops_frames() {
        let mut session = loaded_session();
        let frame = force_game_over(&mut session);
        assert!(frame.is_game_over());
        assert_eq!(session.phase(), SessionPhase::GameOver);
        assert!(session.frame(VIEWPORT, 16.0).is_none());
        // Final state kept for display
        assert!(session.state().is_some_and(|s| s.is_over()));
    }

    #[test]
    fn test_restart_rebuilds_world_and_drops_ramp() {
        let mut session = loaded_session();
        let tuning = session.tuning().clone();
        if let Some(state) = session.state.as_mut() {
            let mut now = 0.0;
            while state.difficulty.update(true, now, &tuning).is_none() {
                now += 16.0;
            }
            assert!(!state.difficulty.pending().is_empty());
        }
        session.key_down(Key::Right);
        force_game_over(&mut session);

        assert!(session.restart(7, VIEWPORT));
        assert_eq!(session.phase(), SessionPhase::Running);
        let state = session.state().expect("new game");
        assert_eq!(state.seed, 7);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.player.pos, tuning.player_start);
        assert!(state.difficulty.pending().is_empty());
        assert_eq!(state.difficulty.platform_speed, tuning.initial_platform_speed);
        assert!(!session.input().right_pressed);
        assert_eq!(session.games_started(), 2);
    }
}
