// systems/logo.rs
//
// Logo motion: a constant pinwheel spin around Z, and on touch devices a
// drag that tilts the model around X/Y with smoothing.

use std::f32::consts::PI;

use glam::Vec2;

use crate::components::logo::Logo;

/// Spin per frame around Z.
pub const LOGO_SPIN: f32 = 0.005;
/// Radians of tilt per dragged pixel.
pub const DRAG_SENSITIVITY: f32 = 0.0045;
/// X tilt limit while dragging.
pub const MAX_TILT: f32 = PI / 2.5;
/// Smoothing applied on each touch-move.
pub const DRAG_FOLLOW_MOVE: f32 = 0.3;
/// Smoothing applied every frame while the finger is down.
pub const DRAG_FOLLOW_FRAME: f32 = 0.15;

/// Start dragging from the logo's current orientation.
pub fn begin_drag(logo: &mut Logo, at: Vec2) {
    let tilt = Vec2::new(logo.rotation.x, logo.rotation.y);
    logo.drag.active = true;
    logo.drag.last = at;
    logo.drag.target = tilt;
    logo.drag.current = tilt;
    log::debug!("logo: drag started");
}

/// Follow a touch-move.
pub fn drag_to(logo: &mut Logo, at: Vec2) {
    if !logo.drag.active {
        return;
    }
    let delta = at - logo.drag.last;
    logo.drag.last = at;

    // Horizontal motion turns around Y, vertical motion tilts around X.
    logo.drag.target.y += delta.x * DRAG_SENSITIVITY;
    logo.drag.target.x = (logo.drag.target.x + delta.y * DRAG_SENSITIVITY).clamp(-MAX_TILT, MAX_TILT);
    follow(logo, DRAG_FOLLOW_MOVE);
}

pub fn end_drag(logo: &mut Logo) {
    logo.drag.active = false;
}

fn follow(logo: &mut Logo, factor: f32) {
    let drag = &mut logo.drag;
    drag.current += (drag.target - drag.current) * factor;
    logo.rotation.x = drag.current.x;
    logo.rotation.y = drag.current.y;
}

/// Per-frame motion. `held` suppresses the spin (e.g. while a reset sweep
/// owns the rotation).
pub fn step(logo: &mut Logo, held: bool) {
    if logo.drag.active {
        follow(logo, DRAG_FOLLOW_FRAME);
    } else if !held {
        logo.rotation.z += LOGO_SPIN;
    }
}
