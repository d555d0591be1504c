// systems/layout.rs
//
// Responsive layout: viewport width → device mode and scale factors.
// The only place that decides whether the session is on desktop or mobile.

use crate::components::body::Body;
use crate::components::logo::MOBILE_Y_OFFSET;
use crate::core::registry::BodyRegistry;

/// Widths at or below this are laid out as mobile.
pub const MOBILE_MAX_WIDTH: f32 = 768.0;

pub const SMALL_WIDTH: f32 = 480.0;
pub const MEDIUM_WIDTH: f32 = 768.0;
pub const LARGE_WIDTH: f32 = 1024.0;

pub const MOBILE_SCALE_SMALL: f32 = 0.55;
pub const MOBILE_SCALE_MEDIUM: f32 = 0.7;
pub const TABLET_SCALE: f32 = 0.9;
pub const MIN_SCALE: f32 = 0.4;

/// Planet boost on mobile.
pub const MOBILE_PLANET_BOOST: f32 = 1.74;
/// Desktop planets render slightly larger than the base scale.
pub const DESKTOP_PLANET_BOOST: f32 = 1.05;
/// Logo boost on mobile once loaded.
pub const MOBILE_LOGO_BOOST: f32 = 1.5;
/// Logo boost on mobile queued before the model loads.
pub const MOBILE_PENDING_LOGO_BOOST: f32 = 1.3;
/// Logo reduction on desktop.
pub const DESKTOP_LOGO_REDUCTION: f32 = 0.79515;

/// Camera distance at scale 1.
pub const CAMERA_BASE_Z: f32 = 20.0;

/// Device layout. Every mode-dependent branch reads this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    #[default]
    Desktop,
    Mobile,
}

impl LayoutMode {
    pub fn for_width(width: f32) -> Self {
        if width <= MOBILE_MAX_WIDTH {
            LayoutMode::Mobile
        } else {
            LayoutMode::Desktop
        }
    }

    pub fn is_mobile(self) -> bool {
        self == LayoutMode::Mobile
    }
}

/// General scale factor for a viewport width.
pub fn scale_factor(width: f32) -> f32 {
    let scale = if width < SMALL_WIDTH {
        MOBILE_SCALE_SMALL
    } else if width < MEDIUM_WIDTH {
        MOBILE_SCALE_MEDIUM
    } else if width < LARGE_WIDTH {
        TABLET_SCALE
    } else {
        1.0
    };
    scale.max(MIN_SCALE)
}

/// Fixed mobile scale, rounded to 3 decimals so equal widths always agree.
pub fn mobile_scale(width: f32) -> f32 {
    let scale = if width < SMALL_WIDTH {
        MOBILE_SCALE_SMALL
    } else {
        MOBILE_SCALE_MEDIUM
    };
    (scale * 1000.0).round() / 1000.0
}

/// Everything derived from one viewport size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub mode: LayoutMode,
    pub width: f32,
    pub height: f32,
    pub scale: f32,
    pub mobile_scale: f32,
}

impl Layout {
    pub fn from_viewport(width: f32, height: f32) -> Self {
        Self {
            mode: LayoutMode::for_width(width),
            width,
            height,
            scale: scale_factor(width),
            mobile_scale: mobile_scale(width),
        }
    }

    /// Scale applied to orbit radii and the camera.
    pub fn device_scale(&self) -> f32 {
        match self.mode {
            LayoutMode::Mobile => self.mobile_scale,
            LayoutMode::Desktop => self.scale,
        }
    }

    /// Planet scale factor, with the mobile zoom multiplier.
    pub fn planet_factor(&self, zoom: f32) -> f32 {
        match self.mode {
            LayoutMode::Mobile => self.mobile_scale * MOBILE_PLANET_BOOST * zoom,
            LayoutMode::Desktop => self.scale * DESKTOP_PLANET_BOOST,
        }
    }

    /// Geometry boost: desktop bodies are built 5% larger, clearance included.
    pub fn size_boost(&self) -> f32 {
        match self.mode {
            LayoutMode::Mobile => 1.0,
            LayoutMode::Desktop => DESKTOP_PLANET_BOOST,
        }
    }

    pub fn logo_factor(&self) -> f32 {
        match self.mode {
            LayoutMode::Mobile => self.mobile_scale * MOBILE_LOGO_BOOST,
            LayoutMode::Desktop => self.scale * DESKTOP_LOGO_REDUCTION,
        }
    }

    /// Logo factor to queue while the model is still loading.
    pub fn pending_logo_factor(&self) -> f32 {
        match self.mode {
            LayoutMode::Mobile => self.mobile_scale * MOBILE_PENDING_LOGO_BOOST,
            LayoutMode::Desktop => self.scale * DESKTOP_LOGO_REDUCTION,
        }
    }

    pub fn logo_y(&self) -> f32 {
        match self.mode {
            LayoutMode::Mobile => MOBILE_Y_OFFSET,
            LayoutMode::Desktop => 0.0,
        }
    }

    pub fn camera_z(&self) -> f32 {
        let scale = self.device_scale();
        if scale < 1.0 {
            CAMERA_BASE_Z / scale
        } else {
            CAMERA_BASE_Z
        }
    }

    /// Rescale every body and the logo from their original sizes.
    /// Idempotent: applying the same layout twice changes nothing.
    pub fn apply(&self, registry: &mut BodyRegistry) {
        let radius_factor = self.device_scale();
        for body in registry.iter_mut() {
            let zoom = if self.mode.is_mobile() { body.zoom } else { 1.0 };
            body.set_scale_factor(self.planet_factor(zoom));
            body.set_radius_factor(radius_factor);
            body.set_separation_factor(self.size_boost());
        }
        let logo = &mut registry.logo;
        if logo.loaded {
            logo.set_scale_factor(self.logo_factor());
        } else {
            logo.queue_scale_factor(self.pending_logo_factor());
        }
        logo.position.y = self.logo_y();
    }

    /// Follow each body's mobile zoom. Runs every mobile step.
    pub fn apply_zoom(&self, bodies: &mut [Body]) {
        if !self.mode.is_mobile() {
            return;
        }
        for body in bodies {
            body.set_scale_factor(self.planet_factor(body.zoom));
        }
    }
}

/// Tracks the current layout and reports mode transitions.
pub struct LayoutEngine {
    layout: Layout,
    /// The mobile intro has been started once this session.
    mobile_intro_started: bool,
}

/// Outcome of a resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutChange {
    /// Mode is unchanged; re-apply the current arrangement.
    Same(LayoutMode),
    /// Switched to desktop.
    EnteredDesktop,
    /// Switched to mobile. `first` is true the first time only.
    EnteredMobile { first: bool },
}

impl LayoutEngine {
    /// Start in desktop mode; the first `resize` reports the real mode.
    pub fn new(width: f32, height: f32) -> Self {
        let mut layout = Layout::from_viewport(width, height);
        layout.mode = LayoutMode::Desktop;
        Self {
            layout,
            mobile_intro_started: false,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn mode(&self) -> LayoutMode {
        self.layout.mode
    }

    /// Recompute scales for a new viewport and apply them.
    pub fn resize(&mut self, width: f32, height: f32, registry: &mut BodyRegistry) -> LayoutChange {
        let previous = self.layout.mode;
        self.layout = Layout::from_viewport(width, height);
        self.layout.apply(registry);

        match (previous, self.layout.mode) {
            (LayoutMode::Desktop, LayoutMode::Mobile) => {
                let first = !self.mobile_intro_started;
                self.mobile_intro_started = true;
                log::info!("layout: mobile ({width}x{height}, scale {})", self.layout.mobile_scale);
                LayoutChange::EnteredMobile { first }
            }
            (LayoutMode::Mobile, LayoutMode::Desktop) => {
                log::info!("layout: desktop ({width}x{height}, scale {})", self.layout.scale);
                LayoutChange::EnteredDesktop
            }
            (_, mode) => LayoutChange::Same(mode),
        }
    }
}
