// src/render.rs
//
// Rendering collaborator contract.
//
// The core computes pointer angles; a host-side renderer turns them into an
// actual arc path with whatever 2D vector API it has. Animation is a hint
// carried through to the renderer, never executed here.

use crate::geometry::{Bounds, Point};

/// RGBA color handed to the renderer on restyle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for Color {
    fn default() -> Self {
        // Opaque blue, the stock tint of the mobile hosts.
        Self {
            r: 0,
            g: 122,
            b: 255,
            a: 255,
        }
    }
}

/// Style inputs for the track arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackStyle {
    pub line_width: f32,
    pub color: Color,
}

impl Default for TrackStyle {
    fn default() -> Self {
        Self {
            line_width: 2.0,
            color: Color::default(),
        }
    }
}

/// Geometry of the drawable arc, derived from bounds and style.
///
/// `radius` is inset by half the line width so the stroke stays inside the
/// bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcGeometry {
    pub center: Point,
    pub radius: f32,
    pub start_angle: f32,
    pub end_angle: f32,
    pub pointer_angle: f32,
    pub line_width: f32,
}

impl ArcGeometry {
    pub fn compute(
        bounds: Bounds,
        line_width: f32,
        start_angle: f32,
        end_angle: f32,
        pointer_angle: f32,
    ) -> Self {
        let radius = (bounds.width.min(bounds.height) - line_width) / 2.0;
        Self {
            center: bounds.center(),
            radius: radius.max(0.0),
            start_angle,
            end_angle,
            pointer_angle,
            line_width,
        }
    }
}

/// What the control needs from a drawing subsystem.
///
/// Implementations receive every state change that affects the drawable
/// arc, in call order. `animated` on [`TrackRenderer::set_pointer_angle`]
/// is a hint only; a renderer without animation support may ignore it.
pub trait TrackRenderer {
    /// Move the pointer to `angle`.
    fn set_pointer_angle(&mut self, angle: f32, animated: bool);

    /// Restyle the arc after a color or line-width change.
    fn apply_style(&mut self, style: TrackStyle);

    /// Recompute layout after a bounds change.
    fn set_bounds(&mut self, bounds: Bounds);
}

/// Renderer that ignores everything. For headless hosts.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl TrackRenderer for NullRenderer {
    fn set_pointer_angle(&mut self, _angle: f32, _animated: bool) {}

    fn apply_style(&mut self, _style: TrackStyle) {}

    fn set_bounds(&mut self, _bounds: Bounds) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arc_geometry_insets_radius_by_half_line_width() {
        let geometry = ArcGeometry::compute(Bounds::new(100.0, 80.0), 4.0, -1.0, 1.0, 0.0);
        assert_eq!(geometry.center, Point::new(50.0, 40.0));
        assert_eq!(geometry.radius, 38.0);
        assert_eq!(geometry.line_width, 4.0);
    }

    #[test]
    fn arc_geometry_never_goes_negative() {
        let geometry = ArcGeometry::compute(Bounds::new(2.0, 2.0), 10.0, -1.0, 1.0, 0.0);
        assert_eq!(geometry.radius, 0.0);
    }
}
