// src/lib.rs
//
// Library entry point for FFI consumers (iOS/Swift) and wasm hosts.

mod event;
mod geometry;
mod gesture;
mod knob;
mod render;
mod track;

#[cfg(feature = "ios")]
pub mod ffi;

#[cfg(feature = "web")]
pub mod wasm;

// Re-export key types for Rust consumers
pub use event::{TouchEvent, TouchPhase, ValueChange};
pub use geometry::{Bounds, Point};
pub use gesture::GestureTracker;
pub use knob::{Knob, KnobConfig, SubscriptionId};
pub use render::{ArcGeometry, Color, NullRenderer, TrackRenderer, TrackStyle};
pub use track::{ArcTrack, DEFAULT_END_ANGLE, DEFAULT_START_ANGLE, TrackError, TrackResult};
