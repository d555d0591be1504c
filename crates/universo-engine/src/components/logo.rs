use std::f32::consts::FRAC_PI_2;

use glam::{Vec2, Vec3};

/// Logo size once loaded, before device scaling.
pub const LOGO_ORIGINAL_SCALE: f32 = 0.06;

/// Orientation the model is loaded with; resets return here.
pub const LOGO_INITIAL_ROTATION: Vec3 = Vec3::new(FRAC_PI_2, 0.0, 0.0);

/// Vertical lift of the logo (and the ciranda circle) on mobile.
pub const MOBILE_Y_OFFSET: f32 = 3.5;

/// Drag-to-rotate state for the logo on touch devices.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LogoDrag {
    pub active: bool,
    /// Last touch position in screen pixels.
    pub last: Vec2,
    /// Rotation (x, y) the drag is heading for.
    pub target: Vec2,
    /// Smoothed rotation (x, y) actually applied.
    pub current: Vec2,
}

/// The central logo model. Exists from session start; geometry arrives later.
#[derive(Debug, Clone)]
pub struct Logo {
    /// The model finished loading.
    pub loaded: bool,
    /// The model failed to load; the scene runs without it.
    pub failed: bool,
    pub position: Vec3,
    /// Euler rotation (x, y, z) in radians.
    pub rotation: Vec3,
    pub initial_rotation: Vec3,
    /// Uniform scale (`LOGO_ORIGINAL_SCALE × factor`).
    pub scale: f32,
    /// Factor queued by a resize that happened before the model loaded.
    pub pending_factor: Option<f32>,
    /// Material opacity, driven by the loading fade.
    pub opacity: f32,
    pub drag: LogoDrag,
}

impl Logo {
    pub fn new() -> Self {
        Self {
            loaded: false,
            failed: false,
            position: Vec3::ZERO,
            rotation: LOGO_INITIAL_ROTATION,
            initial_rotation: LOGO_INITIAL_ROTATION,
            scale: LOGO_ORIGINAL_SCALE,
            pending_factor: None,
            opacity: 0.0,
            drag: LogoDrag::default(),
        }
    }

    /// Scale relative to the original size. Never compounds.
    pub fn set_scale_factor(&mut self, factor: f32) {
        self.scale = LOGO_ORIGINAL_SCALE * factor;
    }

    /// Remember a factor to apply once the model is ready.
    pub fn queue_scale_factor(&mut self, factor: f32) {
        self.pending_factor = Some(factor);
    }

    /// Mark the model as loaded and flush any queued scale.
    pub fn mark_loaded(&mut self) {
        self.loaded = true;
        if let Some(factor) = self.pending_factor.take() {
            self.set_scale_factor(factor);
        }
    }

    /// Visible to the renderer (loaded and not fully transparent).
    pub fn visible(&self) -> bool {
        self.loaded && self.opacity > 0.0
    }
}

impl Default for Logo {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_factor_applies_on_load() {
        let mut logo = Logo::new();
        logo.queue_scale_factor(0.91);
        assert_eq!(logo.scale, LOGO_ORIGINAL_SCALE);
        logo.mark_loaded();
        assert!((logo.scale - LOGO_ORIGINAL_SCALE * 0.91).abs() < 1e-7);
        assert!(logo.pending_factor.is_none());
    }

    #[test]
    fn scale_factor_does_not_compound() {
        let mut logo = Logo::new();
        logo.set_scale_factor(2.0);
        logo.set_scale_factor(2.0);
        assert!((logo.scale - 0.12).abs() < 1e-7);
    }

    #[test]
    fn hidden_until_loaded_and_faded_in() {
        let mut logo = Logo::new();
        logo.opacity = 1.0;
        assert!(!logo.visible());
        logo.mark_loaded();
        assert!(logo.visible());
    }
}
