// src/event.rs

use crate::geometry::Point;

/// ===============================
/// Host-side input events
/// ===============================

/// Lifecycle phase of a single touch.
///
/// Hosts deliver phases in strict temporal order for one touch at a time:
/// `Began`, zero or more `Moved`, then `Ended` or `Cancelled`. Additional
/// simultaneous touches must not be forwarded to the control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Began,
    Moved,
    Ended,
    Cancelled,
}

/// A touch event in the control's local coordinate space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub point: Point,
}

impl TouchEvent {
    pub fn began(x: f32, y: f32) -> Self {
        Self {
            phase: TouchPhase::Began,
            point: Point::new(x, y),
        }
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self {
            phase: TouchPhase::Moved,
            point: Point::new(x, y),
        }
    }

    pub fn ended(x: f32, y: f32) -> Self {
        Self {
            phase: TouchPhase::Ended,
            point: Point::new(x, y),
        }
    }

    pub fn cancelled(x: f32, y: f32) -> Self {
        Self {
            phase: TouchPhase::Cancelled,
            point: Point::new(x, y),
        }
    }
}

/// ===============================
/// Control-side notifications
/// ===============================

/// Payload delivered to value-change observers.
///
/// Observers receive one of these per emission; `angle` is the pointer
/// angle the renderer was handed for the same update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueChange {
    pub value: f32,
    pub angle: f32,
}
