// src/gesture.rs
//
// Single-touch drag tracking.
//
// A tracker holds exactly one scalar: the angle from the control's center
// to the latest touch point. History, velocity, and momentum are not kept.

use crate::geometry::Point;

/// Tracks one continuous single-touch drag.
///
/// The center is captured at touch-down and held fixed for the drag; a
/// resize mid-drag does not move it. Move events arriving outside a drag
/// (stray or multi-touch leftovers) are ignored.
#[derive(Debug, Default)]
pub struct GestureTracker {
    center: Point,
    touch_angle: Option<f32>,
    dragging: bool,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Latest touch angle, if a drag is active.
    #[inline]
    pub fn touch_angle(&self) -> Option<f32> {
        self.touch_angle
    }

    /// Begin a drag at `point`, measuring angles around `center`.
    ///
    /// Returns the initial touch angle, in `(-PI, PI]`.
    pub fn begin(&mut self, point: Point, center: Point) -> f32 {
        let angle = point.angle_to(center);
        self.center = center;
        self.touch_angle = Some(angle);
        self.dragging = true;
        angle
    }

    /// Record a move, returning the new touch angle.
    ///
    /// Returns `None` when no drag is active.
    pub fn update(&mut self, point: Point) -> Option<f32> {
        if !self.dragging {
            return None;
        }
        let angle = point.angle_to(self.center);
        self.touch_angle = Some(angle);
        Some(angle)
    }

    /// End the drag (touch-up or cancel).
    pub fn finish(&mut self) {
        self.dragging = false;
        self.touch_angle = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    const TOLERANCE: f32 = 1e-6;

    #[test]
    fn begin_captures_center_and_angle() {
        let mut tracker = GestureTracker::new();
        let angle = tracker.begin(Point::new(100.0, 50.0), Point::new(50.0, 50.0));
        assert!(angle.abs() < TOLERANCE);
        assert!(tracker.is_dragging());
        assert_eq!(tracker.touch_angle(), Some(angle));
    }

    #[test]
    fn update_measures_against_fixed_center() {
        let mut tracker = GestureTracker::new();
        tracker.begin(Point::new(100.0, 50.0), Point::new(50.0, 50.0));

        let angle = tracker.update(Point::new(50.0, 100.0)).unwrap();
        assert!((angle - PI / 2.0).abs() < TOLERANCE);
    }

    #[test]
    fn update_outside_drag_is_ignored() {
        let mut tracker = GestureTracker::new();
        assert_eq!(tracker.update(Point::new(10.0, 10.0)), None);

        tracker.begin(Point::new(100.0, 50.0), Point::new(50.0, 50.0));
        tracker.finish();
        assert!(!tracker.is_dragging());
        assert_eq!(tracker.update(Point::new(10.0, 10.0)), None);
        assert_eq!(tracker.touch_angle(), None);
    }

    #[test]
    fn only_latest_angle_is_kept() {
        let mut tracker = GestureTracker::new();
        tracker.begin(Point::new(100.0, 50.0), Point::new(50.0, 50.0));
        tracker.update(Point::new(50.0, 100.0));
        let last = tracker.update(Point::new(0.0, 50.0)).unwrap();
        assert_eq!(tracker.touch_angle(), Some(last));
        assert!((last - PI).abs() < TOLERANCE);
    }
}
