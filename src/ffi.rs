// C-compatible FFI bindings for Swift/iOS integration.
//
// Safety requirements:
// - All pointers must be non-null unless documented otherwise
// - All handles must be created by this module and not fabricated
// - All calls must come from the host's main/UI thread
// - Caller must call knob_destroy for each knob_create

use std::ffi::c_void;

use crate::event::{TouchEvent, TouchPhase};
use crate::geometry::{Bounds, Point};
use crate::knob::{Knob, KnobConfig, SubscriptionId};
use crate::render::Color;

use log::{LevelFilter, debug, error, warn};
use oslog::OsLogger;

// Logger subsystem identifier
const LOG_SUBSYSTEM: &str = "com.knobkit.core";

// Touch phase codes for knob_handle_touch
pub const KK_TOUCH_BEGAN: u32 = 0;
pub const KK_TOUCH_MOVED: u32 = 1;
pub const KK_TOUCH_ENDED: u32 = 2;
pub const KK_TOUCH_CANCELLED: u32 = 3;

// ═══════════════════════════════════════════════════════════════════════════
// Logger Initialization
// ═══════════════════════════════════════════════════════════════════════════

/// Initialize the oslog logger.
///
/// This should be called once at application startup before using any other
/// FFI functions. It sets up unified logging that will appear in Console.app
/// and Xcode's debug console.
#[unsafe(no_mangle)]
pub extern "C" fn knobkit_init_logger() {
    OsLogger::new(LOG_SUBSYSTEM)
        .level_filter(LevelFilter::Debug) // Set global minimum level
        .init()
        .ok();
}

// ═══════════════════════════════════════════════════════════════════════════
// Opaque Handle Types
// ═══════════════════════════════════════════════════════════════════════════

/// Opaque handle to a knob control.
pub struct KkKnob {
    inner: Knob,
    callback_subscription: Option<SubscriptionId>,
}

// ═══════════════════════════════════════════════════════════════════════════
// Configuration
// ═══════════════════════════════════════════════════════════════════════════

/// Configuration for creating a knob.
#[repr(C)]
pub struct KkKnobConfig {
    /// Start angle of the track in radians (unnormalized).
    pub start_angle: f32,
    /// End angle of the track in radians (unnormalized).
    pub end_angle: f32,
    /// Minimum value of the range.
    pub minimum_value: f32,
    /// Maximum value of the range.
    pub maximum_value: f32,
    /// Initial value, clamped into the range.
    pub default_value: f32,
    /// Track stroke width in points.
    pub line_width: f32,
    /// Notify on every move (true) or once at gesture completion (false).
    pub continuous: bool,
}

impl Default for KkKnobConfig {
    fn default() -> Self {
        let config = KnobConfig::default();
        Self {
            start_angle: config.start_angle,
            end_angle: config.end_angle,
            minimum_value: config.minimum_value,
            maximum_value: config.maximum_value,
            default_value: config.default_value,
            line_width: config.line_width,
            continuous: config.continuous,
        }
    }
}

impl From<&KkKnobConfig> for KnobConfig {
    fn from(c: &KkKnobConfig) -> Self {
        Self {
            start_angle: c.start_angle,
            end_angle: c.end_angle,
            minimum_value: c.minimum_value,
            maximum_value: c.maximum_value,
            default_value: c.default_value,
            continuous: c.continuous,
            line_width: c.line_width,
        }
    }
}

/// Get the default configuration values.
#[unsafe(no_mangle)]
pub extern "C" fn knob_default_config() -> KkKnobConfig {
    KkKnobConfig::default()
}

// ═══════════════════════════════════════════════════════════════════════════
// Knob Creation
// ═══════════════════════════════════════════════════════════════════════════

/// Create a knob with default configuration.
///
/// Returns an opaque pointer that must be freed with `knob_destroy`.
#[unsafe(no_mangle)]
pub extern "C" fn knob_create() -> *mut KkKnob {
    let config = KkKnobConfig::default();
    knob_from_config(KnobConfig::from(&config))
}

/// Create a knob with custom configuration.
///
/// Returns NULL if the configuration is degenerate (empty angular span or
/// empty value range).
///
/// # Safety
/// `config` must be a valid pointer to a KkKnobConfig struct or NULL.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn knob_create_with_config(config: *const KkKnobConfig) -> *mut KkKnob {
    let cfg = if config.is_null() {
        KnobConfig::default()
    } else {
        KnobConfig::from(unsafe { &*config })
    };
    knob_from_config(cfg)
}

fn knob_from_config(config: KnobConfig) -> *mut KkKnob {
    match Knob::new(config) {
        Ok(inner) => {
            debug!("Created knob with range [{}, {}]", config.minimum_value, config.maximum_value);
            Box::into_raw(Box::new(KkKnob {
                inner,
                callback_subscription: None,
            }))
        }
        Err(e) => {
            error!("Rejected knob configuration: {}", e);
            std::ptr::null_mut()
        }
    }
}

/// Destroy a knob handle.
///
/// # Safety
/// `knob` must be a valid pointer returned by `knob_create` or
/// `knob_create_with_config`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn knob_destroy(knob: *mut KkKnob) {
    if !knob.is_null() {
        unsafe { drop(Box::from_raw(knob)) };
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Value Access
// ═══════════════════════════════════════════════════════════════════════════

/// Get the current value. Returns 0.0 for a NULL handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn knob_value(knob: *const KkKnob) -> f32 {
    if knob.is_null() {
        return 0.0;
    }
    unsafe { (*knob).inner.value() }
}

/// Get the pointer angle for the current value, in radians.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn knob_pointer_angle(knob: *const KkKnob) -> f32 {
    if knob.is_null() {
        return 0.0;
    }
    unsafe { (*knob).inner.pointer_angle() }
}

/// Get the minimum value of the range.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn knob_minimum_value(knob: *const KkKnob) -> f32 {
    if knob.is_null() {
        return 0.0;
    }
    unsafe { (*knob).inner.minimum_value() }
}

/// Get the maximum value of the range.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn knob_maximum_value(knob: *const KkKnob) -> f32 {
    if knob.is_null() {
        return 0.0;
    }
    unsafe { (*knob).inner.maximum_value() }
}

/// Whether a drag is currently in progress.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn knob_is_dragging(knob: *const KkKnob) -> bool {
    if knob.is_null() {
        return false;
    }
    unsafe { (*knob).inner.is_dragging() }
}

/// Set the value programmatically, clamped into the range.
///
/// Does not fire the value-changed callback; change callbacks are
/// gesture-driven.
///
/// # Safety
/// `knob` must be a valid knob handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn knob_set_value(knob: *mut KkKnob, value: f32, animated: bool) {
    if knob.is_null() {
        return;
    }
    unsafe { (*knob).inner.set_value(value, animated) };
}

/// Return the knob to its default value.
///
/// # Safety
/// `knob` must be a valid knob handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn knob_reset(knob: *mut KkKnob, animated: bool) {
    if knob.is_null() {
        return;
    }
    unsafe { (*knob).inner.reset(animated) };
}

// ═══════════════════════════════════════════════════════════════════════════
// Configuration Mutators
// ═══════════════════════════════════════════════════════════════════════════

/// Reconfigure the value range. Returns false (and leaves the knob
/// unchanged) if the range is empty.
///
/// # Safety
/// `knob` must be a valid knob handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn knob_set_range(knob: *mut KkKnob, minimum: f32, maximum: f32) -> bool {
    if knob.is_null() {
        return false;
    }
    match unsafe { (*knob).inner.set_range(minimum, maximum) } {
        Ok(()) => true,
        Err(e) => {
            warn!("Rejected range update: {}", e);
            false
        }
    }
}

/// Reconfigure the angular span. Returns false (and leaves the knob
/// unchanged) if the span is empty.
///
/// # Safety
/// `knob` must be a valid knob handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn knob_set_track_angles(knob: *mut KkKnob, start: f32, end: f32) -> bool {
    if knob.is_null() {
        return false;
    }
    match unsafe { (*knob).inner.set_track_angles(start, end) } {
        Ok(()) => true,
        Err(e) => {
            warn!("Rejected track angle update: {}", e);
            false
        }
    }
}

/// Switch between continuous and completion-only notification.
///
/// # Safety
/// `knob` must be a valid knob handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn knob_set_continuous(knob: *mut KkKnob, continuous: bool) {
    if knob.is_null() {
        return;
    }
    unsafe { (*knob).inner.set_continuous(continuous) };
}

/// Set the track stroke width.
///
/// # Safety
/// `knob` must be a valid knob handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn knob_set_line_width(knob: *mut KkKnob, line_width: f32) {
    if knob.is_null() {
        return;
    }
    unsafe { (*knob).inner.set_line_width(line_width) };
}

/// Set the track color (RGBA, 0-255 per channel).
///
/// # Safety
/// `knob` must be a valid knob handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn knob_set_color(knob: *mut KkKnob, r: u8, g: u8, b: u8, a: u8) {
    if knob.is_null() {
        return;
    }
    unsafe { (*knob).inner.set_color(Color { r, g, b, a }) };
}

/// Record a bounds change. A drag already in progress keeps the center it
/// captured at touch-down.
///
/// # Safety
/// `knob` must be a valid knob handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn knob_set_bounds(knob: *mut KkKnob, width: f32, height: f32) {
    if knob.is_null() {
        return;
    }
    unsafe { (*knob).inner.set_bounds(Bounds::new(width, height)) };
}

// ═══════════════════════════════════════════════════════════════════════════
// Touch Input
// ═══════════════════════════════════════════════════════════════════════════

/// Deliver one touch event in the control's local coordinate space.
///
/// `phase` is one of the KK_TOUCH_* constants. Unknown phases are logged
/// and ignored.
///
/// # Safety
/// `knob` must be a valid knob handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn knob_handle_touch(knob: *mut KkKnob, phase: u32, x: f32, y: f32) {
    if knob.is_null() {
        return;
    }
    let phase = match phase {
        KK_TOUCH_BEGAN => TouchPhase::Began,
        KK_TOUCH_MOVED => TouchPhase::Moved,
        KK_TOUCH_ENDED => TouchPhase::Ended,
        KK_TOUCH_CANCELLED => TouchPhase::Cancelled,
        other => {
            warn!("Ignoring touch event with unknown phase {}", other);
            return;
        }
    };
    unsafe {
        (*knob).inner.handle_touch(TouchEvent {
            phase,
            point: Point::new(x, y),
        });
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Value-Changed Callback
// ═══════════════════════════════════════════════════════════════════════════

/// Callback invoked on gesture-driven value changes.
///
/// `context` is the pointer registered alongside the callback, passed back
/// verbatim.
pub type KkValueChangedCallback = extern "C" fn(value: f32, angle: f32, context: *mut c_void);

/// Register the value-changed callback, replacing any previous one.
/// Passing NULL for `callback` just removes the previous registration.
///
/// The callback fires on the same thread that delivered the touch event.
///
/// # Safety
/// - `knob` must be a valid knob handle
/// - `context` must stay valid until the callback is replaced or the knob
///   is destroyed
#[unsafe(no_mangle)]
pub unsafe extern "C" fn knob_set_value_changed_callback(
    knob: *mut KkKnob,
    callback: Option<KkValueChangedCallback>,
    context: *mut c_void,
) {
    if knob.is_null() {
        return;
    }
    let handle = unsafe { &mut *knob };
    if let Some(id) = handle.callback_subscription.take() {
        handle.inner.unsubscribe(id);
    }
    if let Some(callback) = callback {
        let context = context as usize;
        let id = handle.inner.subscribe(move |change| {
            callback(change.value, change.angle, context as *mut c_void);
        });
        handle.callback_subscription = Some(id);
    }
}
