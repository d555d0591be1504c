// extensions/easing.rs
//
// Pure easing curves for phase interpolation.
// No dependencies on bodies or controllers, just math.

use std::f32::consts::PI;

use glam::Vec3;

/// Easing curve applied to normalized phase progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant velocity (no easing).
    Linear,
    /// Half-cosine: slow start, slow end, symmetric.
    /// Used for the desktop rewind, the ciranda entry and the reset sweep.
    #[default]
    CosineInOut,
    /// Fast start with a long soft tail.
    QuartOut,
    /// Quintic/exponential blend (60/40): an even longer soft tail.
    QuintExpoOut,
    /// Symmetric and steeper than the cosine curve.
    CubicInOut,
}

impl Easing {
    /// Apply the curve to `t`. Input is clamped to [0, 1] first, so
    /// every curve maps 0 → 0 and 1 → 1.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        // Several curves only approach 1 numerically; pin the endpoint.
        if t == 1.0 {
            return 1.0;
        }
        match self {
            Easing::Linear => t,

            Easing::CosineInOut => 0.5 - 0.5 * (PI * t).cos(),

            Easing::QuartOut => 1.0 - (1.0 - t).powi(4),

            Easing::QuintExpoOut => {
                let quintic = 1.0 - (1.0 - t).powi(5);
                let exponential = 1.0 - 2.0_f32.powf(-10.0 * t);
                quintic * 0.6 + exponential * 0.4
            }

            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linearly interpolate between two Vec3 values.
#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

/// Interpolate with easing.
#[inline]
pub fn ease(a: f32, b: f32, t: f32, easing: Easing) -> f32 {
    lerp(a, b, easing.apply(t))
}

/// Interpolate Vec3 with easing.
#[inline]
pub fn ease_vec3(a: Vec3, b: Vec3, t: f32, easing: Easing) -> Vec3 {
    lerp_vec3(a, b, easing.apply(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVES: [Easing; 4] = [
        Easing::CosineInOut,
        Easing::QuartOut,
        Easing::QuintExpoOut,
        Easing::CubicInOut,
    ];

    #[test]
    fn endpoints_are_exact() {
        for curve in CURVES {
            assert_eq!(curve.apply(0.0), 0.0, "{curve:?} at 0");
            assert_eq!(curve.apply(1.0), 1.0, "{curve:?} at 1");
        }
    }

    #[test]
    fn stays_in_unit_range() {
        for curve in CURVES {
            for i in 0..=100 {
                let v = curve.apply(i as f32 / 100.0);
                assert!((0.0..=1.0).contains(&v), "{curve:?} gave {v}");
            }
        }
    }

    #[test]
    fn clamps_out_of_range_input() {
        for curve in CURVES {
            assert_eq!(curve.apply(-3.0), 0.0);
            assert_eq!(curve.apply(7.5), 1.0);
        }
    }

    #[test]
    fn symmetric_curves_hit_half_at_midpoint() {
        assert!((Easing::CosineInOut.apply(0.5) - 0.5).abs() < 1e-6);
        assert!((Easing::CubicInOut.apply(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn out_curves_front_load_progress() {
        let quart = Easing::QuartOut.apply(0.25);
        let blend = Easing::QuintExpoOut.apply(0.25);
        assert!(quart > 0.6, "QuartOut at 0.25 = {quart}");
        assert!(blend > 0.6, "QuintExpoOut at 0.25 = {blend}");
    }

    #[test]
    fn cubic_is_steeper_than_cosine() {
        // Slower out of the gate, faster through the middle.
        assert!(Easing::CubicInOut.apply(0.1) < Easing::CosineInOut.apply(0.1));
        let cubic_mid = Easing::CubicInOut.apply(0.6) - Easing::CubicInOut.apply(0.4);
        let cosine_mid = Easing::CosineInOut.apply(0.6) - Easing::CosineInOut.apply(0.4);
        assert!(cubic_mid > cosine_mid);
    }

    #[test]
    fn ease_vec3_interpolates() {
        let v = ease_vec3(Vec3::ZERO, Vec3::new(10.0, -4.0, 2.0), 0.5, Easing::Linear);
        assert!((v - Vec3::new(5.0, -2.0, 1.0)).length() < 1e-5);
    }
}
