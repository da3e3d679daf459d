// src/geometry.rs
//
// Minimal 2D types shared by the gesture and rendering layers.

/// A point in the control's local coordinate space.
///
/// The y axis points down, matching the coordinate conventions of the
/// mobile hosts that feed touch events into this crate.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Polar angle of `self` around `center`, in radians.
    ///
    /// Computed with `atan2`, so the result is always in `(-PI, PI]`
    /// regardless of how the surrounding arc is configured.
    #[inline]
    pub fn angle_to(&self, center: Point) -> f32 {
        (self.y - center.y).atan2(self.x - center.x)
    }
}

/// Size of the control's bounding box.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Midpoint of the bounding box.
    #[inline]
    pub fn center(&self) -> Point {
        Point {
            x: self.width / 2.0,
            y: self.height / 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    const TOLERANCE: f32 = 1e-6;

    #[test]
    fn angle_to_covers_all_quadrants() {
        let center = Point::new(50.0, 50.0);

        // Straight right
        let a = Point::new(100.0, 50.0).angle_to(center);
        assert!(a.abs() < TOLERANCE);

        // Straight down (y grows downward)
        let a = Point::new(50.0, 100.0).angle_to(center);
        assert!((a - PI / 2.0).abs() < TOLERANCE);

        // Straight left
        let a = Point::new(0.0, 50.0).angle_to(center);
        assert!((a - PI).abs() < TOLERANCE);

        // Straight up
        let a = Point::new(50.0, 0.0).angle_to(center);
        assert!((a + PI / 2.0).abs() < TOLERANCE);
    }

    #[test]
    fn bounds_center_is_midpoint() {
        let b = Bounds::new(120.0, 80.0);
        assert_eq!(b.center(), Point::new(60.0, 40.0));
    }
}
