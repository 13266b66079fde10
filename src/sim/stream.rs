//! Procedurally generated platform and floor streams
//!
//! Each stream is kept in ascending x order: new batches are always placed
//! past the current rightmost member, so insertion order is spatial order.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{is_supported_by, is_supported_by_any};
use super::input::InputState;
use super::object::{Drawable, WorldObject};
use super::player::PlayerState;
use super::rng::RandomGenerator;
use super::state::Viewport;
use crate::tuning::{IntRange, Tuning};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreamKind {
    Platform,
    Floor,
}

impl StreamKind {
    pub fn drawable(self) -> Drawable {
        match self {
            StreamKind::Platform => Drawable::Platform,
            StreamKind::Floor => Drawable::Floor,
        }
    }

    fn width_range(self, tuning: &Tuning) -> IntRange {
        match self {
            StreamKind::Platform => tuning.platform_width,
            StreamKind::Floor => tuning.floor_width,
        }
    }

    /// Extension triggers at the N-th-from-last member
    fn lookahead(self, tuning: &Tuning) -> usize {
        match self {
            StreamKind::Platform => tuning.platform_lookahead,
            StreamKind::Floor => tuning.floor_lookahead,
        }
    }

    /// Platforms move before the rider check, floors after it
    fn scrolls_before_support_check(self) -> bool {
        matches!(self, StreamKind::Platform)
    }

    /// Leftward displacement applied to members this frame
    pub fn scroll_delta(self, speed: f32, input: &InputState, tuning: &Tuning) -> f32 {
        match self {
            StreamKind::Platform => speed,
            // Floors drift back toward the player while only left is held
            StreamKind::Floor if input.left_only() => -(speed - tuning.floor_backdrift_slowdown),
            StreamKind::Floor => speed,
        }
    }
}

/// Place one object at `cursor` and move the cursor past it plus a random gap.
///
/// `opening` marks the first segment of a fresh floor stream, which spans most
/// of the viewport so the player starts on solid ground.
pub fn generate(
    kind: StreamKind,
    cursor: &mut f32,
    opening: bool,
    viewport: Viewport,
    rng: &mut RandomGenerator,
    tuning: &Tuning,
) -> WorldObject {
    let (pos, size) = match kind {
        StreamKind::Platform => {
            let width = rng.in_range(kind.width_range(tuning));
            let y = rng.int_inclusive(
                tuning.platform_min_y,
                viewport.height as i32 - tuning.platform_bottom_margin,
            );
            (
                Vec2::new(*cursor, y as f32),
                Vec2::new(width, tuning.platform_height),
            )
        }
        StreamKind::Floor => {
            let width = if opening {
                viewport.width - tuning.first_floor_inset
            } else {
                rng.in_range(kind.width_range(tuning))
            };
            (
                Vec2::new(*cursor, viewport.height - tuning.floor_height),
                Vec2::new(width, tuning.floor_height),
            )
        }
    };

    *cursor = pos.x + size.x + rng.in_range(tuning.gap);
    WorldObject::new(pos, size, kind.drawable())
}

/// Generate a full batch starting at `start_x`
pub fn generate_batch(
    kind: StreamKind,
    start_x: f32,
    fresh: bool,
    viewport: Viewport,
    rng: &mut RandomGenerator,
    tuning: &Tuning,
) -> Vec<WorldObject> {
    let mut cursor = start_x;
    (0..tuning.batch_size)
        .map(|i| {
            let opening = fresh && i == 0 && kind == StreamKind::Floor;
            generate(kind, &mut cursor, opening, viewport, rng, tuning)
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectStream {
    kind: StreamKind,
    objects: Vec<WorldObject>,
}

impl ObjectStream {
    /// Seed a stream with its opening batch
    pub fn new(kind: StreamKind, viewport: Viewport, rng: &mut RandomGenerator, tuning: &Tuning) -> Self {
        let start_x = match kind {
            StreamKind::Platform => rng.in_range(tuning.first_platform_x),
            StreamKind::Floor => 0.0,
        };
        Self {
            kind,
            objects: generate_batch(kind, start_x, true, viewport, rng, tuning),
        }
    }

    pub fn objects(&self) -> &[WorldObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Whether any member supports the player this frame
    pub fn supports(&self, player: &PlayerState) -> bool {
        is_supported_by_any(
            &player.rect(),
            player.vel.y,
            self.objects.iter().map(WorldObject::rect),
        )
    }

    /// Scroll, carry the player, prune behind and extend ahead.
    ///
    /// Riders are always carried backward by `speed`, even while floors drift
    /// the other way under a left-only key state.
    pub fn advance(
        &mut self,
        player: &mut PlayerState,
        input: &InputState,
        speed: f32,
        viewport: Viewport,
        rng: &mut RandomGenerator,
        tuning: &Tuning,
    ) {
        let delta = self.kind.scroll_delta(speed, input, tuning);
        let scroll_first = self.kind.scrolls_before_support_check();

        for obj in &mut self.objects {
            if scroll_first {
                obj.pos.x -= delta;
            }
            let riding = is_supported_by(&player.rect(), player.vel.y, &obj.rect());
            if !scroll_first {
                obj.pos.x -= delta;
            }
            // Riders move with the world unless running right
            if riding && !input.right_pressed {
                player.pos.x -= speed;
            }
        }

        self.prune(player.pos.x, viewport.width);
        self.extend(player.pos.x, viewport, rng, tuning);
    }

    /// Drop members whose right edge plus one viewport width is behind the player.
    ///
    /// Survivors are collected into a fresh sequence which then replaces the
    /// old one. Returns how many were removed.
    pub fn prune(&mut self, player_x: f32, viewport_width: f32) -> usize {
        let before = self.objects.len();
        let survivors: Vec<WorldObject> = std::mem::take(&mut self.objects)
            .into_iter()
            .filter(|obj| obj.right() + viewport_width >= player_x)
            .collect();
        self.objects = survivors;

        let removed = before - self.objects.len();
        if removed > 0 {
            log::debug!("{:?} stream pruned {} (now {})", self.kind, removed, self.objects.len());
        }
        removed
    }

    /// Append a batch once the player reaches the N-th-from-last member
    pub fn extend(
        &mut self,
        player_x: f32,
        viewport: Viewport,
        rng: &mut RandomGenerator,
        tuning: &Tuning,
    ) -> bool {
        let lookahead = self.kind.lookahead(tuning);
        let start_x = match self.objects.len() {
            0 => viewport.width,
            n if n < lookahead => self.objects[n - 1].right() + rng.in_range(tuning.gap),
            n => {
                if player_x < self.objects[n - lookahead].pos.x {
                    return false;
                }
                self.objects[n - 1].right() + rng.in_range(tuning.gap)
            }
        };

        let batch = generate_batch(self.kind, start_x, false, viewport, rng, tuning);
        self.objects.extend(batch);
        log::debug!(
            "{:?} stream extended from x={:.0} (now {})",
            self.kind,
            start_x,
            self.objects.len()
        );
        true
    }
}
