use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::api::config::UniverseConfig;
use crate::api::types::{BodyId, Cursor, UiEvent};
use crate::core::registry::BodyRegistry;
use crate::core::time::{FrameClock, STEP_MS};
use crate::input::queue::InputEvent;
use crate::renderer::traits::{FrameData, Renderer};
use crate::systems::desktop_orbit::{apply_hover, DesktopOrbit};
use crate::systems::layout::{Layout, LayoutChange, LayoutEngine, LayoutMode};
use crate::systems::loading::LoadingScreen;
use crate::systems::logo;
use crate::systems::mobile_phase::{MobilePhase, MobilePhaseController};
use crate::systems::spin::{wrap_angle, Release};
use crate::systems::tooltip::{Tooltip, HOVER_OFFSET, TOUCH_OFFSET};
use crate::systems::tunnel::StarTunnel;

/// Background starfield rotation per frame.
pub const STARFIELD_SPIN: f32 = 0.0001;

/// One landing-page session: every body, every controller, the clock and
/// the RNG. The host owns it and drives it one fixed step at a time.
pub struct Universe {
    config: UniverseConfig,
    registry: BodyRegistry,
    layout: LayoutEngine,
    desktop: DesktopOrbit,
    mobile: MobilePhaseController,
    loading: LoadingScreen,
    tunnel: StarTunnel,
    tooltip: Tooltip,
    clock: FrameClock,
    rng: ChaCha8Rng,
    events: Vec<UiEvent>,
    panel: Option<BodyId>,
    /// Last mouse position, for per-frame hover picking.
    pointer: Option<Vec2>,
    starfield_rotation: f32,
}

impl Universe {
    pub fn new(config: UniverseConfig, width: f32, height: f32) -> Self {
        let registry = BodyRegistry::from_config(&config);
        let mobile = MobilePhaseController::new(registry.len());
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            tunnel: StarTunnel::new(config.tunnel_stars, config.seed.wrapping_add(1)),
            tooltip: Tooltip::new(config.tooltips),
            layout: LayoutEngine::new(width, height),
            desktop: DesktopOrbit::new(),
            loading: LoadingScreen::new(),
            clock: FrameClock::new(),
            events: Vec::new(),
            panel: None,
            pointer: None,
            starfield_rotation: 0.0,
            registry,
            mobile,
            config,
        }
    }

    /// Create geometry, request the logo and apply the first layout.
    pub fn init<R: Renderer>(&mut self, renderer: &mut R) {
        for body in self.registry.iter() {
            renderer.create_sphere(body.id, body.base_size);
            if let Some((inner, outer)) = body.ring_radii() {
                renderer.create_ring(body.id, inner, outer);
            }
            if !body.texture.is_empty() {
                renderer.load_texture(body.id, &body.texture);
            }
        }
        renderer.load_model(&self.config.model_url);

        let Layout { width, height, .. } = *self.layout.layout();
        self.resize(width, height, renderer);
        log::info!(
            "universe: {} bodies, {:?} layout, {}x{}",
            self.registry.len(),
            self.layout.mode(),
            width,
            height
        );
    }

    /// Run one fixed simulation step.
    pub fn step<R: Renderer>(&mut self, input: &[InputEvent], renderer: &mut R) {
        self.clock.advance(STEP_MS);
        let now = self.clock.now_ms;

        for event in input {
            self.handle_input(*event, renderer);
        }

        let mobile = self.layout.mode().is_mobile();
        let resetting = mobile && matches!(self.mobile.phase, MobilePhase::Reset(_));
        logo::step(&mut self.registry.logo, resetting);
        self.loading.step(now, &mut self.registry.logo, &mut self.events);
        if !self.loading.finished(now) {
            self.tunnel.step();
        }

        if mobile {
            let panel_open = self.panel.is_some();
            let (bodies, logo) = self.registry.split_mut();
            self.mobile.step(bodies, logo, now, panel_open);
            self.layout.layout().apply_zoom(bodies);
        } else {
            self.desktop.step(self.registry.bodies_mut(), now);
            self.update_hover(renderer, now);
        }

        self.tooltip.step(now, &mut self.events);
        self.starfield_rotation += STARFIELD_SPIN;
    }

    /// Account for host time that ran no step (a stalled tab). Phase timers
    /// see it; per-step motion does not.
    pub fn skip_time(&mut self, dt_ms: f64) {
        self.clock.skip(dt_ms);
    }

    /// Hand the current frame to the renderer.
    pub fn render<R: Renderer>(&self, renderer: &mut R) {
        let now = self.clock.now_ms;
        let tunnel_live = !self.loading.finished(now);
        renderer.render(&FrameData {
            frame: self.clock.frame,
            bodies: self.registry.bodies(),
            logo: &self.registry.logo,
            camera_z: self.layout.layout().camera_z(),
            tunnel: tunnel_live.then(|| self.tunnel.stars()),
            tunnel_spiral: self.tunnel.spiral,
            overlay_opacity: self.loading.overlay_opacity(now),
            starfield_rotation: self.starfield_rotation,
        });
    }

    /// The logo model finished loading.
    pub fn model_loaded(&mut self) {
        if self.registry.logo.loaded {
            return;
        }
        self.registry.logo.mark_loaded();
        self.loading.model_loaded(self.clock.now_ms);
        log::info!("logo: loaded at {:.0} ms", self.clock.now_ms);
    }

    /// The logo model could not be loaded. The scene carries on without it.
    pub fn model_failed(&mut self) {
        self.registry.logo.failed = true;
        self.loading.model_failed(self.clock.now_ms);
        log::warn!("logo: model failed to load, continuing without it");
    }

    /// Take the UI events produced since the last call.
    pub fn drain_events(&mut self) -> Vec<UiEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[UiEvent] {
        &self.events
    }

    // -- Accessors --

    pub fn config(&self) -> &UniverseConfig {
        &self.config
    }

    pub fn registry(&self) -> &BodyRegistry {
        &self.registry
    }

    pub fn layout(&self) -> &Layout {
        self.layout.layout()
    }

    pub fn mode(&self) -> LayoutMode {
        self.layout.mode()
    }

    pub fn desktop(&self) -> &DesktopOrbit {
        &self.desktop
    }

    pub fn mobile(&self) -> &MobilePhaseController {
        &self.mobile
    }

    pub fn loading(&self) -> &LoadingScreen {
        &self.loading
    }

    pub fn open_panel(&self) -> Option<BodyId> {
        self.panel
    }

    pub fn body_name(&self, id: BodyId) -> Option<&str> {
        self.registry.get(id).map(|b| b.name.as_str())
    }

    pub fn now_ms(&self) -> f64 {
        self.clock.now_ms
    }

    pub fn frame(&self) -> u64 {
        self.clock.frame
    }

    // -- Input --

    fn handle_input<R: Renderer>(&mut self, event: InputEvent, renderer: &mut R) {
        match event {
            InputEvent::PointerMove { x, y } => self.pointer = Some(Vec2::new(x, y)),
            InputEvent::Click { x, y } => self.click(Vec2::new(x, y), renderer),
            InputEvent::TouchStart { x, y } => self.touch_start(Vec2::new(x, y), renderer),
            InputEvent::TouchMove { x, y } => self.touch_move(Vec2::new(x, y)),
            InputEvent::TouchEnd { x, y } => self.touch_end(Vec2::new(x, y), renderer),
            InputEvent::Resize { width, height } => self.resize(width, height, renderer),
            InputEvent::ResetOrbit => self.reset_orbit(),
            InputEvent::ClosePanel => self.close_panel(),
        }
    }

    /// The mobile intro or reset owns the bodies.
    fn intro_running(&self) -> bool {
        self.layout.mode().is_mobile() && self.mobile.is_animating()
    }

    fn click<R: Renderer>(&mut self, at: Vec2, renderer: &R) {
        let desktop = !self.layout.mode().is_mobile();
        if (desktop && self.panel.is_some()) || self.intro_running() {
            return;
        }
        if let Some(id) = renderer.hit_test(at.x, at.y) {
            self.show_panel(id);
        }
    }

    fn touch_start<R: Renderer>(&mut self, at: Vec2, renderer: &R) {
        if self.panel.is_some() || self.intro_running() {
            return;
        }
        let now = self.clock.now_ms;
        let mobile = self.layout.mode().is_mobile();

        match renderer.hit_test(at.x, at.y) {
            Some(id) => {
                if mobile {
                    let Layout { width, height, .. } = *self.layout.layout();
                    let center = Vec2::new(width, height) * 0.5;
                    self.mobile.spin.arm(at, center, self.mobile.ciranda_angle, now);
                    self.mobile.paused = true;
                }
                if let Some(body) = self.registry.get(id) {
                    let anchor = renderer.project_to_screen(body.position) + TOUCH_OFFSET;
                    self.tooltip.show_briefly(id, &body.name, anchor, now);
                }
            }
            None => {
                if mobile && self.registry.logo.loaded && renderer.hit_test_logo(at.x, at.y) {
                    logo::begin_drag(&mut self.registry.logo, at);
                }
            }
        }
    }

    fn touch_move(&mut self, at: Vec2) {
        if self.registry.logo.drag.active {
            logo::drag_to(&mut self.registry.logo, at);
            return;
        }
        if !self.layout.mode().is_mobile() || self.panel.is_some() || self.mobile.is_animating() {
            return;
        }
        self.mobile.spin.track(at, self.clock.now_ms);
    }

    fn touch_end<R: Renderer>(&mut self, at: Vec2, renderer: &R) {
        if self.registry.logo.drag.active {
            logo::end_drag(&mut self.registry.logo);
        }
        if self.panel.is_some() || self.intro_running() {
            return;
        }

        match self.mobile.spin.release(at, self.clock.now_ms) {
            Release::Spun { coasting } => {
                self.mobile.ciranda_angle = wrap_angle(self.mobile.spin.current_angle);
                if !coasting {
                    self.mobile.paused = false;
                }
            }
            Release::Tap => match renderer.hit_test(at.x, at.y) {
                Some(id) => self.show_panel(id),
                None => self.mobile.resume(),
            },
            Release::Resume => self.mobile.resume(),
        }
    }

    fn resize<R: Renderer>(&mut self, width: f32, height: f32, renderer: &mut R) {
        let change = self.layout.resize(width, height, &mut self.registry);
        renderer.resize(width, height, self.layout.layout().camera_z());

        match change {
            LayoutChange::EnteredDesktop | LayoutChange::Same(LayoutMode::Desktop) => {
                for body in self.registry.iter_mut() {
                    body.place_on_orbit();
                }
            }
            LayoutChange::EnteredMobile { first } => {
                self.pointer = None;
                self.tooltip.set_cursor(Cursor::Default, &mut self.events);
                self.tooltip.hide(&mut self.events);
                self.mobile.place_on_circle(self.registry.bodies_mut());
                if first {
                    self.mobile
                        .start_intro(self.registry.bodies(), self.clock.now_ms, &mut self.rng);
                }
            }
            LayoutChange::Same(LayoutMode::Mobile) => {
                if !self.mobile.is_animating() {
                    self.mobile.place_on_circle(self.registry.bodies_mut());
                }
            }
        }
    }

    // -- Actions --

    fn show_panel(&mut self, id: BodyId) {
        if self.panel == Some(id) {
            return;
        }
        self.panel = Some(id);
        self.events.push(UiEvent::OpenPanel(id));
        log::info!("panel: open {}", self.body_name(id).unwrap_or("?"));
    }

    fn close_panel(&mut self) {
        if self.panel.take().is_some() {
            self.events.push(UiEvent::ClosePanel);
            self.mobile.resume();
        }
    }

    fn reset_orbit(&mut self) {
        self.close_panel();
        let now = self.clock.now_ms;
        if self.layout.mode().is_mobile() {
            self.mobile
                .start_reset(self.registry.bodies(), &self.registry.logo, now, &mut self.rng);
        } else {
            self.desktop.start_rewind(self.registry.bodies(), now, &mut self.rng);
        }
    }

    /// Desktop hover: brake the body under the pointer and label it.
    fn update_hover<R: Renderer>(&mut self, renderer: &R, now: f64) {
        if self.panel.is_some() {
            apply_hover(self.registry.bodies_mut(), None, true);
            self.tooltip.set_cursor(Cursor::Default, &mut self.events);
            self.tooltip.hide(&mut self.events);
            return;
        }

        let hovered = self.pointer.and_then(|p| renderer.hit_test(p.x, p.y));
        apply_hover(self.registry.bodies_mut(), hovered, false);

        match hovered.and_then(|id| self.registry.get(id)) {
            Some(body) => {
                let anchor = renderer.project_to_screen(body.position) + HOVER_OFFSET;
                self.tooltip.show(body.id, &body.name, anchor, now);
                self.tooltip.set_cursor(Cursor::Pointer, &mut self.events);
            }
            None => {
                self.tooltip.set_cursor(Cursor::Default, &mut self.events);
                self.tooltip.hide(&mut self.events);
            }
        }
    }
}
