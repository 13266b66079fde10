//! Data-driven game balance
//!
//! Every gameplay constant lives here so a host page can override any subset of
//! them with a JSON block. Missing fields fall back to the defaults below.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Inclusive integer range used for random placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    pub min: i32,
    pub max: i32,
}

impl IntRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min as f32 && value <= self.max as f32
    }
}

/// One step of a staged speed-up
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RampStage {
    /// Real-time delay after the previous stage (ms)
    pub delay_ms: f64,
    /// Added to both platform and floor scroll speed
    pub increment: f32,
}

/// Layout of a horizontal sprite sheet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SheetMetrics {
    /// Number of animation cells in the sheet
    pub frames: u32,
    /// Source cell size in image pixels
    pub cell: Vec2,
    /// On-screen size of the player while this sheet is active
    pub display: Vec2,
}

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning field `{field}` has an empty range ({min} > {max})")]
    EmptyRange {
        field: &'static str,
        min: i32,
        max: i32,
    },
    #[error("tuning field `{0}` must be positive")]
    NotPositive(&'static str),
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player motion ===
    /// Added to vertical velocity every airborne frame
    pub gravity: f32,
    /// Horizontal speed while running under the player's own power
    pub run_speed: f32,
    /// Base jump impulse; also the fast-fall impulse for ArrowDown
    pub jump_impulse: f32,
    /// Subtracted from the impulse on every jump
    pub jump_damping: f32,
    /// Jumps allowed before touching ground again
    pub max_jumps: u32,
    /// Vertical velocity at spawn
    pub initial_fall_speed: f32,
    pub player_start: Vec2,
    /// Leftward motion stops at this x
    pub min_player_x: f32,
    /// Fraction of the viewport width where the world starts scrolling instead
    pub scroll_threshold_fraction: f32,

    // === World scrolling ===
    pub initial_platform_speed: f32,
    pub initial_floor_speed: f32,
    /// Floor back-drift while only left is held is `floor_speed - this`
    pub floor_backdrift_slowdown: f32,

    // === Generation ===
    pub batch_size: usize,
    pub platform_width: IntRange,
    pub floor_width: IntRange,
    pub gap: IntRange,
    pub platform_height: f32,
    pub floor_height: f32,
    /// Highest platform top
    pub platform_min_y: i32,
    /// Lowest platform top is `viewport_height - this`
    pub platform_bottom_margin: i32,
    /// First floor segment spans `viewport_width - this`
    pub first_floor_inset: f32,
    /// Where the first platform batch may begin
    pub first_platform_x: IntRange,
    /// Floors extend once the player reaches the N-th-from-last member
    pub floor_lookahead: usize,
    pub platform_lookahead: usize,

    // === Difficulty ===
    pub frames_per_distance_tick: u32,
    pub distance_per_speed_up: u32,
    pub ramp: Vec<RampStage>,

    // === Sprites ===
    pub run_sheet: SheetMetrics,
    pub stand_sheet: SheetMetrics,
    /// Images the host must report loaded before the first game starts
    pub asset_count: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 1.0,
            run_speed: 5.0,
            jump_impulse: 22.0,
            jump_damping: 4.0,
            max_jumps: 2,
            initial_fall_speed: 10.0,
            player_start: Vec2::new(100.0, 100.0),
            min_player_x: 100.0,
            scroll_threshold_fraction: 0.5,

            initial_platform_speed: 8.0,
            initial_floor_speed: 8.0,
            floor_backdrift_slowdown: 1.0,

            batch_size: 5,
            platform_width: IntRange::new(150, 350),
            floor_width: IntRange::new(250, 450),
            gap: IntRange::new(120, 350),
            platform_height: 30.0,
            floor_height: 80.0,
            platform_min_y: 320,
            platform_bottom_margin: 250,
            first_floor_inset: 300.0,
            first_platform_x: IntRange::new(400, 500),
            floor_lookahead: 2,
            platform_lookahead: 3,

            frames_per_distance_tick: 4,
            distance_per_speed_up: 30,
            ramp: vec![
                RampStage { delay_ms: 0.0, increment: 0.2 },
                RampStage { delay_ms: 500.0, increment: 0.1 },
                RampStage { delay_ms: 500.0, increment: 0.2 },
            ],

            run_sheet: SheetMetrics {
                frames: 30,
                cell: Vec2::new(341.0, 400.0),
                display: Vec2::new(127.875, 128.0),
            },
            stand_sheet: SheetMetrics {
                frames: 60,
                cell: Vec2::new(177.0, 400.0),
                display: Vec2::new(127.0, 128.0),
            },
            asset_count: 7,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override on top of the defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot work with
    pub fn validate(&self) -> Result<(), TuningError> {
        for (field, range) in [
            ("platform_width", self.platform_width),
            ("floor_width", self.floor_width),
            ("gap", self.gap),
            ("first_platform_x", self.first_platform_x),
        ] {
            if range.min > range.max {
                return Err(TuningError::EmptyRange {
                    field,
                    min: range.min,
                    max: range.max,
                });
            }
        }
        if self.batch_size == 0 {
            return Err(TuningError::NotPositive("batch_size"));
        }
        if self.floor_lookahead == 0 || self.platform_lookahead == 0 {
            return Err(TuningError::NotPositive("lookahead"));
        }
        if self.frames_per_distance_tick == 0 {
            return Err(TuningError::NotPositive("frames_per_distance_tick"));
        }
        if self.distance_per_speed_up == 0 {
            return Err(TuningError::NotPositive("distance_per_speed_up"));
        }
        if self.asset_count == 0 {
            return Err(TuningError::NotPositive("asset_count"));
        }
        if self.run_sheet.frames == 0 || self.stand_sheet.frames == 0 {
            return Err(TuningError::NotPositive("sheet frames"));
        }
        Ok(())
    }

    /// Vertical velocity applied by a jump
    pub fn jump_velocity(&self) -> f32 {
        -(self.jump_impulse - self.jump_damping)
    }

    /// Load the override embedded in the page, falling back to defaults (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        match json {
            Some(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning override from #{}", Self::ELEMENT_ID);
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring tuning override: {}", e);
                    Self::default()
                }
            },
            None => {
                log::info!("Using default tuning");
                Self::default()
            }
        }
    }

    /// Element id of the optional JSON override block
    #[cfg(target_arch = "wasm32")]
    const ELEMENT_ID: &'static str = "tuning";

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
