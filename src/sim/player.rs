//! The player: motion state and sprite animation

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::input::InputState;
use super::object::{Rect, Side, SpriteVariant};
use crate::tuning::{SheetMetrics, Tuning};

/// Pick the sprite for the current key state.
///
/// No direction held shows the idle stance facing the last pressed side.
/// Right (alone or together with left) runs right; left alone runs left.
pub fn select_sprite(input: &InputState) -> SpriteVariant {
    if input.none_pressed() {
        match input.last_pressed {
            Side::Right => SpriteVariant::StandRight,
            Side::Left => SpriteVariant::StandLeft,
        }
    } else if input.right_pressed {
        SpriteVariant::RunRight
    } else {
        SpriteVariant::RunLeft
    }
}

/// Position within one sprite sheet
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SheetCursor {
    /// Next cell to show
    pub next: u32,
    /// Cell currently on screen
    pub shown: u32,
}

impl SheetCursor {
    fn advance(&mut self, frames: u32) {
        self.shown = self.next;
        self.next = (self.next + 1) % frames;
    }
}

/// Run and stand sheets animate independently
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Animation {
    pub run: SheetCursor,
    pub stand: SheetCursor,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub jump_count: u32,
    pub sprite: SpriteVariant,
    pub facing: Side,
    pub animation: Animation,
}

impl PlayerState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.player_start,
            size: tuning.stand_sheet.display,
            vel: Vec2::new(0.0, tuning.initial_fall_speed),
            jump_count: 0,
            sprite: SpriteVariant::StandRight,
            facing: Side::Right,
            animation: Animation::default(),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Start a jump if any are left. Returns whether it happened.
    pub fn try_jump(&mut self, tuning: &Tuning) -> bool {
        if self.jump_count >= tuning.max_jumps {
            return false;
        }
        self.jump_count += 1;
        self.vel.y = tuning.jump_velocity();
        true
    }

    /// Push the player downward (ArrowDown)
    pub fn fast_fall(&mut self, tuning: &Tuning) {
        self.vel.y += tuning.jump_impulse;
    }

    /// Standing on something: stop falling and refill jumps
    pub fn land(&mut self) {
        self.vel.y = 0.0;
        self.jump_count = 0;
    }

    /// Switch sprite and collision size to match the key state
    pub fn update_sprite(&mut self, input: &InputState, tuning: &Tuning) {
        self.sprite = select_sprite(input);
        self.facing = match self.sprite {
            SpriteVariant::RunRight | SpriteVariant::StandRight => Side::Right,
            SpriteVariant::RunLeft | SpriteVariant::StandLeft => Side::Left,
        };
        self.size = self.sheet(tuning).display;
    }

    fn sheet<'a>(&self, tuning: &'a Tuning) -> &'a SheetMetrics {
        if self.sprite.is_running() {
            &tuning.run_sheet
        } else {
            &tuning.stand_sheet
        }
    }

    /// Step the active sheet by one cell
    pub fn advance_animation(&mut self, tuning: &Tuning) {
        let frames = self.sheet(tuning).frames;
        if self.sprite.is_running() {
            self.animation.run.advance(frames);
        } else {
            self.animation.stand.advance(frames);
        }
    }

    /// Source rectangle of the cell on screen, in sheet pixels
    pub fn sprite_clip(&self, tuning: &Tuning) -> Rect {
        let sheet = self.sheet(tuning);
        let cell = if self.sprite.is_running() {
            self.animation.run.shown
        } else {
            self.animation.stand.shown
        };
        Rect::new(Vec2::new(cell as f32 * sheet.cell.x, 0.0), sheet.cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::input::Key;

    #[test]
    fn test_select_sprite() {
        let mut input = InputState::new();
        assert_eq!(select_sprite(&input), SpriteVariant::StandRight);

        input.key_down(Key::Left);
        assert_eq!(select_sprite(&input), SpriteVariant::RunLeft);

        input.key_down(Key::Right);
        assert_eq!(select_sprite(&input), SpriteVariant::RunRight);

        input.key_up(Key::Left);
        input.key_up(Key::Right);
        // Right was released last
        assert_eq!(select_sprite(&input), SpriteVariant::StandRight);

        input.key_down(Key::Right);
        input.key_up(Key::Right);
        input.key_down(Key::Left);
        input.key_up(Key::Left);
        assert_eq!(select_sprite(&input), SpriteVariant::StandLeft);
    }

    #[test]
    fn test_jump_limit() {
        let tuning = Tuning::default();
        let mut player = PlayerState::new(&tuning);
        player.land();

        assert!(player.try_jump(&tuning));
        assert!(player.vel.y < 0.0);
        player.vel.y = 3.0;
        assert!(player.try_jump(&tuning));
        assert!(player.vel.y < 0.0);
        player.vel.y = 3.0;
        assert!(!player.try_jump(&tuning));
        assert_eq!(player.vel.y, 3.0);
        assert_eq!(player.jump_count, 2);

        player.land();
        assert!(player.try_jump(&tuning));
    }

    #[test]
    fn test_sprite_switch_changes_size() {
        let tuning = Tuning::default();
        let mut player = PlayerState::new(&tuning);
        let mut input = InputState::new();
        input.key_down(Key::Right);
        player.update_sprite(&input, &tuning);
        assert_eq!(player.size, tuning.run_sheet.display);
        assert_eq!(player.facing, Side::Right);

        input.key_up(Key::Right);
        input.key_down(Key::Left);
        input.key_up(Key::Left);
        player.update_sprite(&input, &tuning);
        assert_eq!(player.size, tuning.stand_sheet.display);
        assert_eq!(player.sprite, SpriteVariant::StandLeft);
        assert_eq!(player.facing, Side::Left);
    }

    #[test]
    fn test_animation_wraps_and_clips() {
        let tuning = Tuning::default();
        let mut player = PlayerState::new(&tuning);
        let mut input = InputState::new();
        input.key_down(Key::Right);
        player.update_sprite(&input, &tuning);

        player.advance_animation(&tuning);
        assert_eq!(player.sprite_clip(&tuning).pos.x, 0.0);
        player.advance_animation(&tuning);
        assert_eq!(player.sprite_clip(&tuning).pos.x, 341.0);

        for _ in 0..tuning.run_sheet.frames {
            player.advance_animation(&tuning);
        }
        assert_eq!(player.animation.run.shown, 1);
        // Stand sheet untouched while running
        assert_eq!(player.animation.stand.next, 0);
    }
}
