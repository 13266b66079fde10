//! Flat per-frame draw list
//!
//! The simulation never draws. After each tick the host turns the game state
//! into a list of image blits and hands it to whatever backend it has.

use glam::Vec2;

use crate::sim::object::{Drawable, Rect, WorldObject};
use crate::sim::GameState;
use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Wipe the whole canvas
    Clear { width: f32, height: f32 },
    /// Blit an image (or the `src` cell of a sprite sheet) into `dest`
    Image {
        drawable: Drawable,
        src: Option<Rect>,
        dest: Rect,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// How many blits use `drawable`
    pub fn count(&self, drawable: Drawable) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Image { drawable: d, .. } if *d == drawable))
            .count()
    }
}

fn visible(obj: &WorldObject, width: f32) -> bool {
    obj.right() >= 0.0 && obj.pos.x <= width
}

/// Clear, background, floors, platforms, player
pub fn build(state: &GameState, tuning: &Tuning) -> DrawList {
    let vp = state.viewport;
    let mut list = DrawList::new();

    list.push(DrawCommand::Clear {
        width: vp.width,
        height: vp.height,
    });
    // Background overscans by a pixel to hide edge seams
    list.push(DrawCommand::Image {
        drawable: Drawable::Background,
        src: None,
        dest: Rect::new(Vec2::splat(-1.0), Vec2::new(vp.width, vp.height)),
    });

    for obj in state
        .floors
        .objects()
        .iter()
        .chain(state.platforms.objects())
        .filter(|obj| visible(obj, vp.width))
    {
        list.push(DrawCommand::Image {
            drawable: obj.drawable(),
            src: None,
            dest: obj.rect(),
        });
    }

    let player = &state.player;
    list.push(DrawCommand::Image {
        drawable: Drawable::Player(player.sprite),
        src: Some(player.sprite_clip(tuning)),
        dest: player.rect(),
    });

    list
}
