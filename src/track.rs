// src/track.rs
//
// Angle <-> value mapping for the arc track.
//
// This is the pure math at the center of the control: a linear map between
// an angular span and a value range, plus wrap-normalization of raw atan2
// output against arcs whose configured angles lie outside (-PI, PI].

use std::f32::consts::PI;

/// Default start angle of the track, just past the bottom-left of the dial.
pub const DEFAULT_START_ANGLE: f32 = -11.0 * PI / 8.0;

/// Default end angle of the track, bottom-right of the dial.
///
/// Together with [`DEFAULT_START_ANGLE`] this leaves a gap centered at the
/// bottom of the dial (straight down is `PI / 2` in y-down coordinates).
pub const DEFAULT_END_ANGLE: f32 = 3.0 * PI / 8.0;

/// Error for degenerate track configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackError {
    /// `start_angle == end_angle`: the angular span is empty.
    EmptyAngularSpan { angle: f32 },

    /// `minimum_value == maximum_value`: the value range is empty.
    EmptyValueRange { value: f32 },
}

impl std::fmt::Display for TrackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackError::EmptyAngularSpan { angle } => {
                write!(f, "Track start and end angles are both {} rad", angle)
            }
            TrackError::EmptyValueRange { value } => {
                write!(f, "Track minimum and maximum values are both {}", value)
            }
        }
    }
}

impl std::error::Error for TrackError {}

/// Result of track construction and reconfiguration.
pub type TrackResult<T> = Result<T, TrackError>;

/// An arc track: an angular span bound to a value range.
///
/// Angles are unnormalized radians. There is no ordering constraint between
/// `start_angle` and `end_angle`, and either may lie outside (-PI, PI]; by
/// convention `end_angle` is reached going clockwise from `start_angle` and
/// the span stays under a full turn.
///
/// The conversions are exact linear maps. `value_for_angle` performs no
/// clamping; callers pre-clamp with [`ArcTrack::clamp_angle`] and passing an
/// out-of-span angle produces an out-of-range value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcTrack {
    start_angle: f32,
    end_angle: f32,
    minimum_value: f32,
    maximum_value: f32,
}

impl Default for ArcTrack {
    fn default() -> Self {
        Self {
            start_angle: DEFAULT_START_ANGLE,
            end_angle: DEFAULT_END_ANGLE,
            minimum_value: 0.0,
            maximum_value: 1.0,
        }
    }
}

impl ArcTrack {
    /// Create a track, rejecting degenerate configuration up front.
    ///
    /// A span of a full turn or more still constructs (the math stays
    /// finite) but is logged, since the wrap cut point becomes ambiguous.
    pub fn new(
        start_angle: f32,
        end_angle: f32,
        minimum_value: f32,
        maximum_value: f32,
    ) -> TrackResult<Self> {
        if start_angle == end_angle {
            return Err(TrackError::EmptyAngularSpan { angle: start_angle });
        }
        if minimum_value == maximum_value {
            return Err(TrackError::EmptyValueRange {
                value: minimum_value,
            });
        }
        if (end_angle - start_angle).abs() >= 2.0 * PI {
            log::warn!(
                "Track span {} rad covers a full turn or more; the gap is empty",
                (end_angle - start_angle).abs()
            );
        }
        Ok(Self {
            start_angle,
            end_angle,
            minimum_value,
            maximum_value,
        })
    }

    #[inline]
    pub fn start_angle(&self) -> f32 {
        self.start_angle
    }

    #[inline]
    pub fn end_angle(&self) -> f32 {
        self.end_angle
    }

    #[inline]
    pub fn minimum_value(&self) -> f32 {
        self.minimum_value
    }

    #[inline]
    pub fn maximum_value(&self) -> f32 {
        self.maximum_value
    }

    /// Map an angle in `[start_angle, end_angle]` to a value.
    ///
    /// No clamping; an out-of-span angle yields an out-of-range value.
    #[inline]
    pub fn value_for_angle(&self, angle: f32) -> f32 {
        (angle - self.start_angle) / (self.end_angle - self.start_angle)
            * (self.maximum_value - self.minimum_value)
            + self.minimum_value
    }

    /// Map a value in `[minimum_value, maximum_value]` to an angle.
    ///
    /// Exact inverse of [`ArcTrack::value_for_angle`].
    #[inline]
    pub fn angle_for_value(&self, value: f32) -> f32 {
        (value - self.minimum_value) / (self.maximum_value - self.minimum_value)
            * (self.end_angle - self.start_angle)
            + self.start_angle
    }

    /// Angular midpoint of the excluded gap arc.
    ///
    /// Raw touch angles land in (-PI, PI] while the configured span may lie
    /// outside that range, so this is the cut point used to pick which
    /// representative of a raw angle (mod 2*PI) to compare against the span.
    /// It sits diametrically opposite the middle of the track, guaranteeing
    /// the cut never falls inside the valid arc.
    #[inline]
    pub fn gap_midpoint_angle(&self) -> f32 {
        (2.0 * PI + self.start_angle - self.end_angle) / 2.0 + self.end_angle
    }

    /// Shift a raw atan2 angle by a full turn where needed so that it lies
    /// in `(gap_midpoint - 2*PI, gap_midpoint]`, the window containing the
    /// whole track span.
    pub fn wrap_angle(&self, raw: f32) -> f32 {
        let midpoint = self.gap_midpoint_angle();
        if raw > midpoint {
            raw - 2.0 * PI
        } else if raw < midpoint - 2.0 * PI {
            raw + 2.0 * PI
        } else {
            raw
        }
    }

    /// Clamp an angle into the track span.
    pub fn clamp_angle(&self, angle: f32) -> f32 {
        let (lo, hi) = if self.start_angle <= self.end_angle {
            (self.start_angle, self.end_angle)
        } else {
            (self.end_angle, self.start_angle)
        };
        angle.clamp(lo, hi)
    }

    /// Clamp a value into the value range.
    pub fn clamp_value(&self, value: f32) -> f32 {
        let (lo, hi) = if self.minimum_value <= self.maximum_value {
            (self.minimum_value, self.maximum_value)
        } else {
            (self.maximum_value, self.minimum_value)
        };
        value.clamp(lo, hi)
    }

    /// Wrap, clamp, and convert a raw touch angle in one step.
    pub fn value_for_raw_angle(&self, raw: f32) -> f32 {
        self.value_for_angle(self.clamp_angle(self.wrap_angle(raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 1e-5;

    fn default_track() -> ArcTrack {
        ArcTrack::default()
    }

    #[test]
    fn rejects_empty_angular_span() {
        let err = ArcTrack::new(1.0, 1.0, 0.0, 1.0).unwrap_err();
        assert_eq!(err, TrackError::EmptyAngularSpan { angle: 1.0 });
    }

    #[test]
    fn rejects_empty_value_range() {
        let err = ArcTrack::new(0.0, 1.0, 5.0, 5.0).unwrap_err();
        assert_eq!(err, TrackError::EmptyValueRange { value: 5.0 });
    }

    #[test]
    fn value_round_trip() {
        let track = ArcTrack::new(DEFAULT_START_ANGLE, DEFAULT_END_ANGLE, -4.0, 12.0).unwrap();
        for i in 0..=16 {
            let value = -4.0 + i as f32;
            let restored = track.value_for_angle(track.angle_for_value(value));
            assert!(
                (restored - value).abs() < TOLERANCE,
                "value {} came back as {}",
                value,
                restored
            );
        }
    }

    #[test]
    fn angle_round_trip() {
        let track = default_track();
        let span = DEFAULT_END_ANGLE - DEFAULT_START_ANGLE;
        for i in 0..=16 {
            let angle = DEFAULT_START_ANGLE + span * i as f32 / 16.0;
            let restored = track.angle_for_value(track.value_for_angle(angle));
            assert!(
                (restored - angle).abs() < TOLERANCE,
                "angle {} came back as {}",
                angle,
                restored
            );
        }
    }

    #[test]
    fn gap_midpoint_of_default_track_is_straight_down() {
        // Default span ends 3*PI/8 past straight-right and resumes at
        // -11*PI/8; the gap is centered at PI/2, straight down.
        let track = default_track();
        assert!((track.gap_midpoint_angle() - PI / 2.0).abs() < TOLERANCE);
    }

    #[test]
    fn no_clamping_inside_conversion() {
        let track = default_track();
        // One full gap past the end of the span: out-of-range value.
        let value = track.value_for_angle(DEFAULT_END_ANGLE + 1.0);
        assert!(value > 1.0);
    }

    #[test]
    fn wrap_pulls_raw_angles_into_span_window() {
        let track = default_track();

        // Straight right (raw 0) is already inside the span window.
        assert!((track.wrap_angle(0.0) - 0.0).abs() < TOLERANCE);

        // Straight left comes back from atan2 as PI, which is past the gap
        // midpoint; its wrapped representative is -PI, inside the span.
        let wrapped = track.wrap_angle(PI);
        assert!((wrapped + PI).abs() < TOLERANCE);
        assert!(wrapped >= DEFAULT_START_ANGLE && wrapped <= DEFAULT_END_ANGLE);
    }

    #[test]
    fn raw_angle_straight_right_maps_inside_default_track() {
        let track = default_track();
        let value = track.value_for_raw_angle(0.0);
        // (0 - start) / span = (11*PI/8) / (14*PI/8) = 11/14
        assert!((value - 11.0 / 14.0).abs() < TOLERANCE);
        assert!(value >= 0.0 && value <= 1.0);
    }

    #[test]
    fn angle_exactly_at_gap_midpoint_maps_to_one_edge() {
        let track = default_track();
        let cut = track.gap_midpoint_angle();
        let first = track.value_for_raw_angle(cut);
        let second = track.value_for_raw_angle(cut);
        // Deterministic, and pinned to an edge of the range.
        assert_eq!(first, second);
        assert!(first == 0.0 || first == 1.0);
    }

    #[test]
    fn clamp_angle_handles_reversed_span() {
        let track = ArcTrack::new(1.0, -1.0, 0.0, 1.0).unwrap();
        assert_eq!(track.clamp_angle(2.0), 1.0);
        assert_eq!(track.clamp_angle(-2.0), -1.0);
        assert_eq!(track.clamp_angle(0.5), 0.5);
    }
}
