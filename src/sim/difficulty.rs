//! Distance tracking and staged scroll speed-ups
//!
//! A milestone schedules a ramp of several increments spread over real time.
//! Stages wait in a queue keyed by wall-clock due time and are drained at the
//! start of every tick, so the frame loop never pauses while a ramp is in
//! flight. Dropping the controller (restart) drops every pending stage.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// A scheduled speed increment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingStage {
    pub due_ms: f64,
    pub increment: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifficultyController {
    /// Distance units travelled while scrolling
    pub distance: u32,
    frames_since_tick: u32,
    /// Distance at which the last ramp was scheduled
    pub last_speed_up_distance: u32,
    pub platform_speed: f32,
    pub floor_speed: f32,
    /// Sorted by `due_ms`
    pending: Vec<PendingStage>,
}

impl DifficultyController {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            distance: 0,
            frames_since_tick: 0,
            last_speed_up_distance: 0,
            platform_speed: tuning.initial_platform_speed,
            floor_speed: tuning.initial_floor_speed,
            pending: Vec::new(),
        }
    }

    /// Advance one frame.
    ///
    /// `scrolling` is whether the player has reached the scroll threshold.
    /// Returns the distance when a new ramp was scheduled this frame.
    pub fn update(&mut self, scrolling: bool, now_ms: f64, tuning: &Tuning) -> Option<u32> {
        self.apply_due(now_ms);

        self.frames_since_tick += 1;
        if self.frames_since_tick < tuning.frames_per_distance_tick || !scrolling {
            return None;
        }
        self.distance += 1;
        self.frames_since_tick = 0;

        if self.distance != self.last_speed_up_distance + tuning.distance_per_speed_up {
            return None;
        }
        self.last_speed_up_distance = self.distance;
        self.schedule_ramp(now_ms, tuning);
        // Zero-delay stages land in the same frame
        self.apply_due(now_ms);
        log::info!(
            "Distance {}: speed-up ramp scheduled ({} stages pending)",
            self.distance,
            self.pending.len()
        );
        Some(self.distance)
    }

    fn schedule_ramp(&mut self, now_ms: f64, tuning: &Tuning) {
        let mut due_ms = now_ms;
        for stage in &tuning.ramp {
            due_ms += stage.delay_ms;
            let entry = PendingStage {
                due_ms,
                increment: stage.increment,
            };
            // Stable insert keeps overlapping ramps in schedule order
            let at = self.pending.partition_point(|p| p.due_ms <= due_ms);
            self.pending.insert(at, entry);
        }
    }

    /// Apply every stage whose time has come
    pub fn apply_due(&mut self, now_ms: f64) {
        let due = self.pending.partition_point(|p| p.due_ms <= now_ms);
        for stage in self.pending.drain(..due) {
            self.platform_speed += stage.increment;
            self.floor_speed += stage.increment;
            log::debug!(
                "Scroll speed +{} -> platforms {:.2}, floors {:.2}",
                stage.increment,
                self.platform_speed,
                self.floor_speed
            );
        }
    }

    pub fn pending(&self) -> &[PendingStage] {
        &self.pending
    }

    /// Drop every in-flight stage
    pub fn cancel_pending(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_distance_needs_threshold_and_frames() {
        let tuning = Tuning::default();
        let mut d = DifficultyController::new(&tuning);

        for _ in 0..20 {
            d.update(false, 0.0, &tuning);
        }
        assert_eq!(d.distance, 0);

        // Counter already past the threshold: first scrolling frame ticks
        d.update(true, 0.0, &tuning);
        assert_eq!(d.distance, 1);

        for _ in 0..3 {
            d.update(true, 0.0, &tuning);
        }
        assert_eq!(d.distance, 1);
        d.update(true, 0.0, &tuning);
        assert_eq!(d.distance, 2);
    }

    #[test]
    fn test_staged_ramp_increments_in_order() {
        let tuning = Tuning::default();
        let mut d = DifficultyController::new(&tuning);
        let base = d.platform_speed;

        let mut now = 0.0;
        let mut milestone = None;
        while milestone.is_none() {
            milestone = d.update(true, now, &tuning);
            now += 16.0;
        }
        let scheduled_at = now - 16.0;
        assert_eq!(milestone, Some(30));
        assert!(close(d.platform_speed, base + 0.2));
        assert!(close(d.floor_speed, base + 0.2));
        assert_eq!(d.pending().len(), 2);

        d.apply_due(scheduled_at + 499.0);
        assert!(close(d.platform_speed, base + 0.2));

        d.apply_due(scheduled_at + 500.0);
        assert!(close(d.platform_speed, base + 0.3));

        d.apply_due(scheduled_at + 999.0);
        assert!(close(d.platform_speed, base + 0.3));

        d.apply_due(scheduled_at + 1000.0);
        assert!(close(d.platform_speed, base + 0.5));
        assert!(close(d.floor_speed, base + 0.5));
        assert!(d.pending().is_empty());
    }

    #[test]
    fn test_ramp_is_independent_of_frame_rate() {
        let tuning = Tuning::default();
        let mut d = DifficultyController::new(&tuning);
        let base = d.platform_speed;
        d.distance = 29;
        d.frames_since_tick = 10;
        assert_eq!(d.update(true, 1000.0, &tuning), Some(30));

        // One slow frame jumps past both delays at once
        d.update(false, 2500.0, &tuning);
        assert!(close(d.platform_speed, base + 0.5));
    }

    #[test]
    fn test_cancel_drops_pending() {
        let tuning = Tuning::default();
        let mut d = DifficultyController::new(&tuning);
        let base = d.platform_speed;
        d.distance = 29;
        d.frames_since_tick = 10;
        d.update(true, 0.0, &tuning);
        d.cancel_pending();
        d.apply_due(10_000.0);
        assert!(close(d.platform_speed, base + 0.2));
    }

    #[test]
    fn test_next_milestone_is_relative_to_last() {
        let tuning = Tuning::default();
        let mut d = DifficultyController::new(&tuning);
        let mut milestones = Vec::new();
        for frame in 0..(tuning.frames_per_distance_tick * 61) {
            if let Some(m) = d.update(true, frame as f64 * 16.0, &tuning) {
                milestones.push(m);
            }
        }
        assert_eq!(milestones, vec![30, 60]);
    }
}
