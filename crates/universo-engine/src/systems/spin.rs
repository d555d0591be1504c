// systems/spin.rs
//
// Touch spin gesture for the mobile ciranda: drag around the screen center
// to turn the circle, release to coast with inertia.

use std::f32::consts::{PI, TAU};

use glam::Vec2;

/// Hold time before a drag may become a spin.
pub const SPIN_MIN_HOLD_MS: f64 = 150.0;
/// Travel (px) before a drag may become a spin; also the tap tolerance.
pub const SPIN_MIN_DISTANCE: f32 = 30.0;
/// Angular step (rad) that activates spinning.
pub const SPIN_MIN_DELTA: f32 = 0.01;
/// Smallest step that updates the release velocity.
pub const VELOCITY_MIN_DELTA: f32 = 0.001;
pub const VELOCITY_MIN_MOVE: f32 = 2.0;
pub const VELOCITY_GAIN: f32 = 0.4;
/// Velocity multiplier per frame while coasting.
pub const INERTIA_DAMPING: f32 = 0.92;
/// Coasting stops below this speed.
pub const INERTIA_STOP: f32 = 0.0001;
/// Release speed that is worth coasting on.
pub const INERTIA_KEEP: f32 = 0.0005;
/// Longest touch that still counts as a tap.
pub const TAP_MAX_MS: f64 = 300.0;

/// What a finger lift meant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Release {
    /// The finger was spinning the circle. `coasting` if inertia takes over.
    Spun { coasting: bool },
    /// A short, still touch: treat as a tap at the lift position.
    Tap,
    /// Anything else: the circle should resume.
    Resume,
}

/// Gesture state. `armed` from touch-start until release.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpinGesture {
    pub armed: bool,
    pub active: bool,
    pub start_ms: f64,
    pub start: Vec2,
    pub last: Vec2,
    /// Pivot in screen pixels (viewport center).
    pub center: Vec2,
    pub current_angle: f32,
    pub target_angle: f32,
    /// Angular velocity in rad/frame, used for inertia.
    pub velocity: f32,
}

/// Fold an angle difference into [−π, π].
#[inline]
pub fn wrap_delta(delta: f32) -> f32 {
    if delta > PI {
        delta - TAU
    } else if delta < -PI {
        delta + TAU
    } else {
        delta
    }
}

/// Fold an angle into [0, 2π).
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

impl SpinGesture {
    /// Arm on touch-start over a body. The circle is held at `angle`.
    pub fn arm(&mut self, at: Vec2, center: Vec2, angle: f32, now: f64) {
        *self = SpinGesture {
            armed: true,
            active: false,
            start_ms: now,
            start: at,
            last: at,
            center,
            current_angle: angle,
            target_angle: angle,
            velocity: 0.0,
        };
        log::debug!("spin: armed at ({:.0}, {:.0})", at.x, at.y);
    }

    /// Angle swept from the last tracked point to `at`, around the center.
    fn delta_to(&self, at: Vec2) -> f32 {
        let now = at - self.center;
        let before = self.last - self.center;
        wrap_delta(now.y.atan2(now.x) - before.y.atan2(before.x))
    }

    /// Feed a touch-move. Returns true while spinning.
    pub fn track(&mut self, at: Vec2, now: f64) -> bool {
        if !self.armed {
            return false;
        }
        let delta = self.delta_to(at);
        let held = now - self.start_ms;
        let travelled = at.distance(self.start);
        let moved = at.distance(self.last);

        if !self.active
            && held > SPIN_MIN_HOLD_MS
            && travelled > SPIN_MIN_DISTANCE
            && delta.abs() > SPIN_MIN_DELTA
        {
            self.active = true;
            log::debug!("spin: active");
        }

        if self.active {
            self.target_angle += delta;
            self.current_angle = self.target_angle;
            if delta.abs() > VELOCITY_MIN_DELTA && moved > VELOCITY_MIN_MOVE {
                self.velocity = delta * (1.0 + moved * 0.01) * VELOCITY_GAIN;
            }
            self.last = at;
        }
        self.active
    }

    /// Finger lifted at `at`.
    pub fn release(&mut self, at: Vec2, now: f64) -> Release {
        let was_armed = self.armed;
        self.armed = false;

        if self.active {
            self.active = false;
            let coasting = self.velocity.abs() > INERTIA_KEEP;
            if !coasting {
                self.velocity = 0.0;
            }
            return Release::Spun { coasting };
        }

        if was_armed
            && now - self.start_ms < TAP_MAX_MS
            && at.distance(self.start) < SPIN_MIN_DISTANCE
        {
            Release::Tap
        } else {
            Release::Resume
        }
    }

    /// Advance inertia by one frame. Returns false once it has run out.
    pub fn coast(&mut self) -> bool {
        if self.velocity.abs() <= INERTIA_STOP {
            return false;
        }
        self.velocity *= INERTIA_DAMPING;
        self.current_angle += self.velocity;
        if self.velocity.abs() < INERTIA_STOP {
            self.velocity = 0.0;
        }
        true
    }

    pub fn is_coasting(&self) -> bool {
        !self.active && self.velocity.abs() > INERTIA_STOP
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: Vec2 = Vec2::new(200.0, 400.0);

    fn armed_at(at: Vec2) -> SpinGesture {
        let mut g = SpinGesture::default();
        g.arm(at, CENTER, 1.0, 0.0);
        g
    }

    #[test]
    fn wrap_delta_folds_into_half_turns() {
        assert!((wrap_delta(3.5) - (3.5 - TAU)).abs() < 1e-6);
        assert!((wrap_delta(-3.5) - (-3.5 + TAU)).abs() < 1e-6);
        assert_eq!(wrap_delta(0.5), 0.5);
    }

    #[test]
    fn wrap_angle_range() {
        for a in [-7.0_f32, -0.1, 0.0, 3.0, TAU, 13.0] {
            let w = wrap_angle(a);
            assert!((0.0..TAU).contains(&w), "{a} -> {w}");
        }
    }

    #[test]
    fn early_moves_do_not_spin() {
        let mut g = armed_at(Vec2::new(300.0, 400.0));
        // Far enough, but too soon.
        assert!(!g.track(Vec2::new(200.0, 500.0), 100.0));
        assert_eq!(g.current_angle, 1.0);
    }

    #[test]
    fn circular_drag_spins_and_sets_velocity() {
        let mut g = armed_at(Vec2::new(300.0, 400.0));
        assert!(g.track(Vec2::new(290.0, 450.0), 200.0));
        assert!(g.current_angle > 1.0, "dragging clockwise on screen increases angle");
        assert!(g.velocity > 0.0);
    }

    #[test]
    fn release_after_fast_spin_coasts() {
        let mut g = armed_at(Vec2::new(300.0, 400.0));
        g.track(Vec2::new(290.0, 450.0), 200.0);
        assert_eq!(g.release(Vec2::new(290.0, 450.0), 220.0), Release::Spun { coasting: true });
        let before = g.current_angle;
        assert!(g.coast());
        assert!(g.current_angle > before);
    }

    #[test]
    fn inertia_runs_out() {
        let mut g = SpinGesture { velocity: 0.05, ..Default::default() };
        let mut frames = 0;
        while g.coast() {
            frames += 1;
            assert!(frames < 1000);
        }
        assert_eq!(g.velocity, 0.0);
    }

    #[test]
    fn quick_still_touch_is_a_tap() {
        let mut g = armed_at(Vec2::new(300.0, 400.0));
        assert_eq!(g.release(Vec2::new(305.0, 402.0), 120.0), Release::Tap);
    }

    #[test]
    fn slow_touch_resumes() {
        let mut g = armed_at(Vec2::new(300.0, 400.0));
        assert_eq!(g.release(Vec2::new(300.0, 400.0), 800.0), Release::Resume);
    }

    #[test]
    fn unarmed_release_resumes() {
        let mut g = SpinGesture::default();
        assert_eq!(g.release(Vec2::ZERO, 10.0), Release::Resume);
    }
}
