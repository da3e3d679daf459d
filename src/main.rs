// src/main.rs

use std::f32::consts::FRAC_PI_2;

use knobkit::{
    Bounds, Knob, KnobConfig, TouchEvent, TrackRenderer, TrackStyle,
};

/// ===============================
/// Test Renderer
/// ===============================

struct PrintRenderer;

impl TrackRenderer for PrintRenderer {
    fn set_pointer_angle(&mut self, angle: f32, animated: bool) {
        println!("  renderer: pointer -> {:.4} rad (animated: {})", angle, animated);
    }

    fn apply_style(&mut self, style: TrackStyle) {
        println!("  renderer: style -> line width {}", style.line_width);
    }

    fn set_bounds(&mut self, bounds: Bounds) {
        println!("  renderer: bounds -> {}x{}", bounds.width, bounds.height);
    }
}

/// ===============================
/// Main
/// ===============================

fn main() {
    let mut knob = Knob::new(KnobConfig::default().range(0.0, 10.0).continuous(true))
        .expect("default-shaped configuration is valid");

    knob.set_bounds(Bounds::new(100.0, 100.0));
    knob.set_renderer(Box::new(PrintRenderer));
    knob.subscribe(|change| {
        println!("  observer: value {:.3} at angle {:.4} rad", change.value, change.angle);
    });

    println!("Starting knob sanity test…");

    // Scripted drag: grab at the top of the dial, sweep clockwise to
    // straight-right, release.
    let ring = |angle: f32| {
        (
            50.0 + 40.0 * angle.cos(),
            50.0 + 40.0 * angle.sin(),
        )
    };

    let (x, y) = ring(-FRAC_PI_2);
    knob.handle_touch(TouchEvent::began(x, y));
    println!("--- touch down, value {:.3} ---", knob.value());

    for step in 1..=4 {
        let (x, y) = ring(-FRAC_PI_2 + step as f32 * FRAC_PI_2 / 4.0);
        knob.handle_touch(TouchEvent::moved(x, y));
    }

    let (x, y) = ring(0.0);
    knob.handle_touch(TouchEvent::ended(x, y));
    println!("--- touch up, value {:.3} ---", knob.value());

    knob.reset(true);
    println!("--- reset, value {:.3} ---", knob.value());

    println!("Sanity test completed.");
}
