//! WebAssembly bindings via wasm-bindgen for browser integration.
//!
//! This module is only compiled when the `web` feature is enabled.
//!
//! # Usage
//!
//! Build with wasm-pack:
//! ```bash
//! wasm-pack build --target web --features web
//! ```
//!
//! # JavaScript Example
//!
//! ```javascript
//! import init, { KnobHandle, KnobOptions } from './knobkit.js';
//!
//! await init();
//!
//! const knob = new KnobHandle(KnobOptions.new());
//! knob.set_bounds(canvas.width, canvas.height);
//! knob.set_on_value_changed((value, angle) => draw(value, angle));
//!
//! canvas.addEventListener('pointerdown', e => knob.pointer_down(e.offsetX, e.offsetY));
//! canvas.addEventListener('pointermove', e => knob.pointer_moved(e.offsetX, e.offsetY));
//! canvas.addEventListener('pointerup', e => knob.pointer_up(e.offsetX, e.offsetY));
//! ```

use wasm_bindgen::prelude::*;

use crate::event::{TouchEvent, TouchPhase};
use crate::geometry::{Bounds, Point};
use crate::knob::{Knob, KnobConfig, SubscriptionId};
use crate::render::Color;

// ═══════════════════════════════════════════════════════════════════════════
// Initialization
// ═══════════════════════════════════════════════════════════════════════════

/// Initialize the wasm module. Call this once before using any other
/// functions. Sets up panic hooks and console logging.
#[wasm_bindgen]
pub fn knobkit_init() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).ok();
}

// ═══════════════════════════════════════════════════════════════════════════
// Configuration
// ═══════════════════════════════════════════════════════════════════════════

/// Configuration for creating a knob.
#[wasm_bindgen]
#[derive(Clone, Copy)]
pub struct KnobOptions {
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
    /// Notify on every move (true) or once at gesture completion (false).
    pub continuous: bool,
    /// Track stroke width in CSS pixels.
    pub line_width: f32,
}

#[wasm_bindgen]
impl KnobOptions {
    /// Create options with default values.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create options with a custom range and notification mode.
    pub fn with_range(minimum: f32, maximum: f32, continuous: bool) -> Self {
        Self {
            minimum_value: minimum,
            maximum_value: maximum,
            continuous,
            ..Self::default()
        }
    }
}

impl Default for KnobOptions {
    fn default() -> Self {
        let config = KnobConfig::default();
        Self {
            start_angle: config.start_angle,
            end_angle: config.end_angle,
            minimum_value: config.minimum_value,
            maximum_value: config.maximum_value,
            default_value: config.default_value,
            continuous: config.continuous,
            line_width: config.line_width,
        }
    }
}

impl From<KnobOptions> for KnobConfig {
    fn from(o: KnobOptions) -> Self {
        Self {
            start_angle: o.start_angle,
            end_angle: o.end_angle,
            minimum_value: o.minimum_value,
            maximum_value: o.maximum_value,
            default_value: o.default_value,
            continuous: o.continuous,
            line_width: o.line_width,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Knob Handle
// ═══════════════════════════════════════════════════════════════════════════

/// A knob control driven by browser pointer events.
#[wasm_bindgen]
pub struct KnobHandle {
    inner: Knob,
    callback_subscription: Option<SubscriptionId>,
}

#[wasm_bindgen]
impl KnobHandle {
    /// Create a knob. Throws on degenerate configuration (empty angular
    /// span or empty value range).
    #[wasm_bindgen(constructor)]
    pub fn new(options: Option<KnobOptions>) -> Result<KnobHandle, JsValue> {
        let config = KnobConfig::from(options.unwrap_or_default());
        let inner = Knob::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            inner,
            callback_subscription: None,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Pointer input
    // ─────────────────────────────────────────────────────────────────────────

    /// Deliver a pointer-down in the control's local coordinate space.
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.inner.handle_touch(TouchEvent {
            phase: TouchPhase::Began,
            point: Point::new(x, y),
        });
    }

    /// Deliver a pointer-move.
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.inner.handle_touch(TouchEvent {
            phase: TouchPhase::Moved,
            point: Point::new(x, y),
        });
    }

    /// Deliver a pointer-up.
    pub fn pointer_up(&mut self, x: f32, y: f32) {
        self.inner.handle_touch(TouchEvent {
            phase: TouchPhase::Ended,
            point: Point::new(x, y),
        });
    }

    /// Deliver a pointer-cancel. Treated as completion, not rollback.
    pub fn pointer_cancelled(&mut self, x: f32, y: f32) {
        self.inner.handle_touch(TouchEvent {
            phase: TouchPhase::Cancelled,
            point: Point::new(x, y),
        });
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Value access
    // ─────────────────────────────────────────────────────────────────────────

    /// Current value.
    pub fn value(&self) -> f32 {
        self.inner.value()
    }

    /// Pointer angle for the current value, in radians.
    pub fn pointer_angle(&self) -> f32 {
        self.inner.pointer_angle()
    }

    /// Current value formatted with a fixed precision, for labels.
    pub fn formatted_value(&self, precision: usize) -> String {
        self.inner.format_value(precision)
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.inner.is_dragging()
    }

    /// Set the value programmatically, clamped into the range. Does not
    /// fire the change callback.
    pub fn set_value(&mut self, value: f32, animated: bool) {
        self.inner.set_value(value, animated);
    }

    /// Return the knob to its default value.
    pub fn reset(&mut self, animated: bool) {
        self.inner.reset(animated);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Configuration
    // ─────────────────────────────────────────────────────────────────────────

    pub fn minimum_value(&self) -> f32 {
        self.inner.minimum_value()
    }

    pub fn maximum_value(&self) -> f32 {
        self.inner.maximum_value()
    }

    /// Reconfigure the value range. Throws if the range is empty.
    pub fn set_range(&mut self, minimum: f32, maximum: f32) -> Result<(), JsValue> {
        self.inner
            .set_range(minimum, maximum)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Reconfigure the angular span. Throws if the span is empty.
    pub fn set_track_angles(&mut self, start: f32, end: f32) -> Result<(), JsValue> {
        self.inner
            .set_track_angles(start, end)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn set_continuous(&mut self, continuous: bool) {
        self.inner.set_continuous(continuous);
    }

    pub fn set_line_width(&mut self, line_width: f32) {
        self.inner.set_line_width(line_width);
    }

    /// Set the track color (RGBA, 0-255 per channel).
    pub fn set_color(&mut self, r: u8, g: u8, b: u8, a: u8) {
        self.inner.set_color(Color { r, g, b, a });
    }

    /// Record a bounds change (e.g. canvas resize).
    pub fn set_bounds(&mut self, width: f32, height: f32) {
        self.inner.set_bounds(Bounds::new(width, height));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Change callback
    // ─────────────────────────────────────────────────────────────────────────

    /// Register a `(value, angle) => ...` callback for gesture-driven value
    /// changes, replacing any previous one. Pass `null` to remove it.
    pub fn set_on_value_changed(&mut self, callback: Option<js_sys::Function>) {
        if let Some(id) = self.callback_subscription.take() {
            self.inner.unsubscribe(id);
        }
        if let Some(callback) = callback {
            let id = self.inner.subscribe(move |change| {
                let _ = callback.call2(
                    &JsValue::NULL,
                    &JsValue::from_f64(change.value as f64),
                    &JsValue::from_f64(change.angle as f64),
                );
            });
            self.callback_subscription = Some(id);
        }
    }
}
