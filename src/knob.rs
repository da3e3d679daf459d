// src/knob.rs
//
// The knob controller: gesture -> value state machine.
//
// Owns the control state and is its sole mutator. Raw touch angles from the
// gesture tracker are wrap-normalized against the track's gap, clamped into
// the span, and converted to values; observers are notified per the
// continuous flag and the renderer is handed the resulting pointer angle.

use crate::event::{TouchEvent, TouchPhase, ValueChange};
use crate::geometry::Bounds;
use crate::gesture::GestureTracker;
use crate::render::{Color, TrackRenderer, TrackStyle};
use crate::track::{ArcTrack, DEFAULT_END_ANGLE, DEFAULT_START_ANGLE, TrackResult};

/// Identifier of one observer registration.
pub type SubscriptionId = u64;

type ObserverFn = Box<dyn FnMut(ValueChange)>;

/// Configuration for creating a knob.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnobConfig {
    pub start_angle: f32,
    pub end_angle: f32,
    pub minimum_value: f32,
    pub maximum_value: f32,
    /// Initial value, also the target of [`Knob::reset`]. Clamped on use.
    pub default_value: f32,
    /// Notify on every move, or once at gesture completion.
    pub continuous: bool,
    pub line_width: f32,
}

impl Default for KnobConfig {
    fn default() -> Self {
        Self {
            start_angle: DEFAULT_START_ANGLE,
            end_angle: DEFAULT_END_ANGLE,
            minimum_value: 0.0,
            maximum_value: 1.0,
            default_value: 0.0,
            continuous: true,
            line_width: 2.0,
        }
    }
}

impl KnobConfig {
    pub fn range(mut self, minimum: f32, maximum: f32) -> Self {
        self.minimum_value = minimum;
        self.maximum_value = maximum;
        self
    }

    pub fn angles(mut self, start: f32, end: f32) -> Self {
        self.start_angle = start;
        self.end_angle = end;
        self
    }

    pub fn default_value(mut self, value: f32) -> Self {
        self.default_value = value;
        self
    }

    pub fn continuous(mut self, continuous: bool) -> Self {
        self.continuous = continuous;
        self
    }

    pub fn line_width(mut self, line_width: f32) -> Self {
        self.line_width = line_width;
        self
    }
}

/// A bounded-rotation control.
///
/// Single-threaded and synchronous: hosts deliver touch events and call
/// setters from their UI thread, in order. Nothing here blocks.
pub struct Knob {
    track: ArcTrack,
    value: f32,
    default_value: f32,
    continuous: bool,
    style: TrackStyle,
    bounds: Bounds,
    tracker: GestureTracker,
    renderer: Option<Box<dyn TrackRenderer>>,
    observers: Vec<(SubscriptionId, ObserverFn)>,
    next_subscription: SubscriptionId,
}

impl Knob {
    /// Create a knob, rejecting degenerate track configuration.
    pub fn new(config: KnobConfig) -> TrackResult<Self> {
        let track = ArcTrack::new(
            config.start_angle,
            config.end_angle,
            config.minimum_value,
            config.maximum_value,
        )?;
        let default_value = track.clamp_value(config.default_value);
        Ok(Self {
            track,
            value: default_value,
            default_value,
            continuous: config.continuous,
            style: TrackStyle {
                line_width: config.line_width,
                color: Color::default(),
            },
            bounds: Bounds::default(),
            tracker: GestureTracker::new(),
            renderer: None,
            observers: Vec::new(),
            next_subscription: 0,
        })
    }

    // -------------------------------
    // MARK: Accessors
    // -------------------------------

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn minimum_value(&self) -> f32 {
        self.track.minimum_value()
    }

    #[inline]
    pub fn maximum_value(&self) -> f32 {
        self.track.maximum_value()
    }

    #[inline]
    pub fn start_angle(&self) -> f32 {
        self.track.start_angle()
    }

    #[inline]
    pub fn end_angle(&self) -> f32 {
        self.track.end_angle()
    }

    #[inline]
    pub fn continuous(&self) -> bool {
        self.continuous
    }

    #[inline]
    pub fn line_width(&self) -> f32 {
        self.style.line_width
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.style.color
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[inline]
    pub fn default_value(&self) -> f32 {
        self.default_value
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.tracker.is_dragging()
    }

    /// Angle the pointer is drawn at for the current value.
    #[inline]
    pub fn pointer_angle(&self) -> f32 {
        self.track.angle_for_value(self.value)
    }

    /// Format the current value for a host label.
    pub fn format_value(&self, precision: usize) -> String {
        format!("{:.prec$}", self.value, prec = precision)
    }

    // -------------------------------
    // MARK: Observers
    // -------------------------------

    /// Register a value-change observer. Observers fire on gesture-driven
    /// changes only; programmatic [`Knob::set_value`] calls stay silent.
    pub fn subscribe(&mut self, observer: impl FnMut(ValueChange) + 'static) -> SubscriptionId {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    fn notify(&mut self) {
        let change = ValueChange {
            value: self.value,
            angle: self.pointer_angle(),
        };
        for (_, observer) in &mut self.observers {
            observer(change);
        }
    }

    // -------------------------------
    // MARK: Renderer
    // -------------------------------

    /// Attach the rendering collaborator and sync it with current state.
    pub fn set_renderer(&mut self, mut renderer: Box<dyn TrackRenderer>) {
        renderer.apply_style(self.style);
        renderer.set_bounds(self.bounds);
        renderer.set_pointer_angle(self.pointer_angle(), false);
        self.renderer = Some(renderer);
    }

    /// Detach the rendering collaborator, returning it.
    pub fn take_renderer(&mut self) -> Option<Box<dyn TrackRenderer>> {
        self.renderer.take()
    }

    // -------------------------------
    // MARK: Mutators
    // -------------------------------

    /// Set the value, clamped into the range.
    ///
    /// An exactly equal value is a no-op: the renderer is not called. The
    /// guard is bitwise equality on purpose, matching the long-standing
    /// behavior of this control; callers re-setting the same value with a
    /// different `animated` intent get no redraw.
    pub fn set_value(&mut self, value: f32, animated: bool) {
        if value == self.value {
            return;
        }
        self.value = self.track.clamp_value(value);
        let angle = self.pointer_angle();
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.set_pointer_angle(angle, animated);
        }
    }

    /// Return the knob to its default value.
    pub fn reset(&mut self, animated: bool) {
        self.set_value(self.default_value, animated);
    }

    /// Reconfigure the value range, re-clamping the stored value.
    pub fn set_range(&mut self, minimum: f32, maximum: f32) -> TrackResult<()> {
        self.track = ArcTrack::new(
            self.track.start_angle(),
            self.track.end_angle(),
            minimum,
            maximum,
        )?;
        self.value = self.track.clamp_value(self.value);
        self.default_value = self.track.clamp_value(self.default_value);
        self.sync_pointer();
        Ok(())
    }

    /// Reconfigure the angular span, keeping the value and re-deriving the
    /// pointer angle.
    pub fn set_track_angles(&mut self, start: f32, end: f32) -> TrackResult<()> {
        self.track = ArcTrack::new(
            start,
            end,
            self.track.minimum_value(),
            self.track.maximum_value(),
        )?;
        self.sync_pointer();
        Ok(())
    }

    pub fn set_continuous(&mut self, continuous: bool) {
        self.continuous = continuous;
    }

    pub fn set_default_value(&mut self, value: f32) {
        self.default_value = self.track.clamp_value(value);
    }

    pub fn set_line_width(&mut self, line_width: f32) {
        self.style.line_width = line_width;
        self.sync_style();
    }

    pub fn set_color(&mut self, color: Color) {
        self.style.color = color;
        self.sync_style();
    }

    /// Record a bounds change and forward it to the renderer.
    ///
    /// A drag already in progress keeps the center it captured at
    /// touch-down; the new bounds apply from the next gesture on.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.set_bounds(bounds);
        }
    }

    fn sync_pointer(&mut self) {
        let angle = self.pointer_angle();
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.set_pointer_angle(angle, false);
        }
    }

    fn sync_style(&mut self) {
        let style = self.style;
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.apply_style(style);
        }
    }

    // -------------------------------
    // MARK: Gesture input
    // -------------------------------

    /// Feed one touch event through the state machine.
    ///
    /// Began enters a drag and applies the initial angle; Moved re-applies
    /// and, in continuous mode, notifies; Ended and Cancelled leave the drag
    /// and, in non-continuous mode, deliver the single completion
    /// notification. Cancel is completion, not rollback: the value keeps
    /// whatever the gesture last applied.
    pub fn handle_touch(&mut self, event: TouchEvent) {
        match event.phase {
            TouchPhase::Began => {
                let center = self.bounds.center();
                let raw = self.tracker.begin(event.point, center);
                self.apply_touch_angle(raw);
            }
            TouchPhase::Moved => {
                if let Some(raw) = self.tracker.update(event.point) {
                    self.apply_touch_angle(raw);
                    if self.continuous {
                        self.notify();
                    }
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if self.tracker.is_dragging() {
                    self.tracker.finish();
                    if !self.continuous {
                        self.notify();
                    }
                }
            }
        }
    }

    fn apply_touch_angle(&mut self, raw: f32) {
        let bounded = self.track.clamp_angle(self.track.wrap_angle(raw));
        let new_value = self.track.value_for_angle(bounded);
        self.set_value(new_value, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::TouchEvent;
    use crate::geometry::Point;
    use std::cell::RefCell;
    use std::rc::Rc;

    const TOLERANCE: f32 = 1e-5;

    #[derive(Debug, Clone, PartialEq)]
    enum RendererCall {
        Pointer { angle: f32, animated: bool },
        Style(TrackStyle),
        Bounds(Bounds),
    }

    struct RecordingRenderer {
        calls: Rc<RefCell<Vec<RendererCall>>>,
    }

    impl TrackRenderer for RecordingRenderer {
        fn set_pointer_angle(&mut self, angle: f32, animated: bool) {
            self.calls
                .borrow_mut()
                .push(RendererCall::Pointer { angle, animated });
        }

        fn apply_style(&mut self, style: TrackStyle) {
            self.calls.borrow_mut().push(RendererCall::Style(style));
        }

        fn set_bounds(&mut self, bounds: Bounds) {
            self.calls.borrow_mut().push(RendererCall::Bounds(bounds));
        }
    }

    fn knob_with_renderer(config: KnobConfig) -> (Knob, Rc<RefCell<Vec<RendererCall>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut knob = Knob::new(config).unwrap();
        knob.set_bounds(Bounds::new(100.0, 100.0));
        knob.set_renderer(Box::new(RecordingRenderer {
            calls: Rc::clone(&calls),
        }));
        calls.borrow_mut().clear();
        (knob, calls)
    }

    /// Touch point on a ring of radius 40 around the control center, at
    /// the given raw angle.
    fn ring_point(angle: f32) -> Point {
        Point::new(50.0 + 40.0 * angle.cos(), 50.0 + 40.0 * angle.sin())
    }

    fn pointer_calls(calls: &Rc<RefCell<Vec<RendererCall>>>) -> usize {
        calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, RendererCall::Pointer { .. }))
            .count()
    }

    #[test]
    fn set_value_clamps_far_out_of_range_input() {
        let mut knob = Knob::new(KnobConfig::default()).unwrap();
        knob.set_value(-1000.0, false);
        assert_eq!(knob.value(), 0.0);
        knob.set_value(1000.0, false);
        assert_eq!(knob.value(), 1.0);
    }

    #[test]
    fn set_value_with_equal_value_skips_renderer() {
        let (mut knob, calls) = knob_with_renderer(KnobConfig::default().default_value(0.25));
        knob.set_value(0.25, true);
        assert_eq!(pointer_calls(&calls), 0);

        knob.set_value(0.5, false);
        assert_eq!(pointer_calls(&calls), 1);
    }

    #[test]
    fn set_value_forwards_animation_hint() {
        let (mut knob, calls) = knob_with_renderer(KnobConfig::default());
        knob.set_value(0.5, true);
        let recorded = calls.borrow();
        assert_eq!(recorded.len(), 1);
        match &recorded[0] {
            RendererCall::Pointer { angle, animated } => {
                assert!(*animated);
                assert!((angle - knob.pointer_angle()).abs() < TOLERANCE);
            }
            other => panic!("unexpected call {:?}", other),
        }
    }

    #[test]
    fn programmatic_set_value_does_not_notify() {
        let mut knob = Knob::new(KnobConfig::default()).unwrap();
        let fired = Rc::new(RefCell::new(0u32));
        let fired_in = Rc::clone(&fired);
        knob.subscribe(move |_| *fired_in.borrow_mut() += 1);

        knob.set_value(0.7, false);
        assert_eq!(*fired.borrow(), 0);
    }

    #[test]
    fn touch_straight_right_lands_mid_track() {
        let mut knob = Knob::new(KnobConfig::default()).unwrap();
        knob.set_bounds(Bounds::new(100.0, 100.0));

        knob.handle_touch(TouchEvent {
            phase: TouchPhase::Began,
            point: ring_point(0.0),
        });
        // (0 - start) / span with the default track is 11/14.
        assert!((knob.value() - 11.0 / 14.0).abs() < TOLERANCE);
    }

    #[test]
    fn non_continuous_drag_notifies_exactly_once_at_completion() {
        let mut knob = Knob::new(KnobConfig::default().continuous(false)).unwrap();
        knob.set_bounds(Bounds::new(100.0, 100.0));

        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_in = Rc::clone(&seen);
        knob.subscribe(move |change| seen_in.borrow_mut().push(change.value));

        knob.handle_touch(TouchEvent {
            phase: TouchPhase::Began,
            point: ring_point(-std::f32::consts::FRAC_PI_2),
        });
        for i in 1..=5 {
            knob.handle_touch(TouchEvent {
                phase: TouchPhase::Moved,
                point: ring_point(-std::f32::consts::FRAC_PI_2 + 0.1 * i as f32),
            });
        }
        knob.handle_touch(TouchEvent {
            phase: TouchPhase::Ended,
            point: ring_point(0.0),
        });

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        // The single notification carries the final position.
        assert!((seen[0] - knob.value()).abs() < TOLERANCE);
    }

    #[test]
    fn continuous_drag_notifies_per_move_and_not_on_end() {
        let mut knob = Knob::new(KnobConfig::default().continuous(true)).unwrap();
        knob.set_bounds(Bounds::new(100.0, 100.0));

        let count = Rc::new(RefCell::new(0u32));
        let count_in = Rc::clone(&count);
        knob.subscribe(move |_| *count_in.borrow_mut() += 1);

        knob.handle_touch(TouchEvent {
            phase: TouchPhase::Began,
            point: ring_point(-std::f32::consts::FRAC_PI_2),
        });
        for i in 1..=5 {
            knob.handle_touch(TouchEvent {
                phase: TouchPhase::Moved,
                point: ring_point(-std::f32::consts::FRAC_PI_2 + 0.1 * i as f32),
            });
        }
        knob.handle_touch(TouchEvent {
            phase: TouchPhase::Ended,
            point: ring_point(0.0),
        });

        assert_eq!(*count.borrow(), 5);
    }

    #[test]
    fn cancel_completes_like_end_in_non_continuous_mode() {
        let mut knob = Knob::new(KnobConfig::default().continuous(false)).unwrap();
        knob.set_bounds(Bounds::new(100.0, 100.0));

        let count = Rc::new(RefCell::new(0u32));
        let count_in = Rc::clone(&count);
        knob.subscribe(move |_| *count_in.borrow_mut() += 1);

        knob.handle_touch(TouchEvent::began(90.0, 50.0));
        knob.handle_touch(TouchEvent::moved(50.0, 10.0));
        knob.handle_touch(TouchEvent::cancelled(50.0, 10.0));

        assert_eq!(*count.borrow(), 1);
        // The value keeps what the gesture last applied; no rollback.
        assert!((knob.value() - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn stray_moves_outside_a_drag_do_nothing() {
        let mut knob = Knob::new(KnobConfig::default()).unwrap();
        knob.set_bounds(Bounds::new(100.0, 100.0));

        let count = Rc::new(RefCell::new(0u32));
        let count_in = Rc::clone(&count);
        knob.subscribe(move |_| *count_in.borrow_mut() += 1);

        knob.handle_touch(TouchEvent::moved(90.0, 50.0));
        knob.handle_touch(TouchEvent::ended(90.0, 50.0));

        assert_eq!(*count.borrow(), 0);
        assert_eq!(knob.value(), 0.0);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let mut knob = Knob::new(KnobConfig::default()).unwrap();
        knob.set_bounds(Bounds::new(100.0, 100.0));

        let count = Rc::new(RefCell::new(0u32));
        let count_in = Rc::clone(&count);
        let id = knob.subscribe(move |_| *count_in.borrow_mut() += 1);
        assert!(knob.unsubscribe(id));
        assert!(!knob.unsubscribe(id));

        knob.handle_touch(TouchEvent::began(90.0, 50.0));
        knob.handle_touch(TouchEvent::moved(50.0, 90.0));
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn set_range_reclamps_value() {
        let mut knob = Knob::new(KnobConfig::default().default_value(0.9)).unwrap();
        assert_eq!(knob.value(), 0.9);

        knob.set_range(0.0, 0.5).unwrap();
        assert_eq!(knob.value(), 0.5);
        assert_eq!(knob.maximum_value(), 0.5);
    }

    #[test]
    fn set_range_rejects_degenerate_config() {
        let mut knob = Knob::new(KnobConfig::default()).unwrap();
        assert!(knob.set_range(3.0, 3.0).is_err());
        // The old range survives a rejected reconfiguration.
        assert_eq!(knob.maximum_value(), 1.0);
    }

    #[test]
    fn renderer_attach_syncs_current_state() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut knob = Knob::new(KnobConfig::default().default_value(0.5)).unwrap();
        knob.set_bounds(Bounds::new(80.0, 80.0));
        knob.set_renderer(Box::new(RecordingRenderer {
            calls: Rc::clone(&calls),
        }));

        let recorded = calls.borrow();
        assert!(recorded.contains(&RendererCall::Bounds(Bounds::new(80.0, 80.0))));
        assert!(
            recorded
                .iter()
                .any(|c| matches!(c, RendererCall::Pointer { animated: false, .. }))
        );
    }

    #[test]
    fn style_changes_reach_the_renderer() {
        let (mut knob, calls) = knob_with_renderer(KnobConfig::default());
        knob.set_line_width(6.0);
        let recorded = calls.borrow();
        match &recorded[0] {
            RendererCall::Style(style) => assert_eq!(style.line_width, 6.0),
            other => panic!("unexpected call {:?}", other),
        }
    }

    #[test]
    fn reset_returns_to_default_value() {
        let mut knob = Knob::new(KnobConfig::default().default_value(0.25)).unwrap();
        knob.set_value(0.8, false);
        knob.reset(false);
        assert_eq!(knob.value(), 0.25);
    }
}
