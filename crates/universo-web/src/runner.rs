use universo_engine::{
    BodyId, BufferRenderer, FixedTimestep, InputEvent, InputQueue, ProtocolLayout, Universe,
    UniverseConfig,
};

/// Wires a `Universe` to the browser loop.
///
/// `lib.rs` keeps one of these in a `thread_local!` and exports free
/// functions via `#[wasm_bindgen]` that forward to it.
pub struct UniverseRunner {
    universe: Universe,
    renderer: BufferRenderer,
    input: InputQueue,
    timestep: FixedTimestep,
    initialized: bool,
}

impl UniverseRunner {
    pub fn new(config: UniverseConfig, width: f32, height: f32) -> Self {
        let layout = ProtocolLayout::from_config(&config);
        Self {
            universe: Universe::new(config, width, height),
            renderer: BufferRenderer::new(width, height, layout),
            input: InputQueue::new(),
            timestep: FixedTimestep::default(),
            initialized: false,
        }
    }

    /// Create geometry and apply the first layout. Call once after construction.
    pub fn init(&mut self) {
        self.universe.init(&mut self.renderer);
        self.universe.render(&mut self.renderer);
        self.initialized = true;
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one display frame: fixed steps, then one render.
    pub fn tick(&mut self, dt_ms: f64) {
        if !self.initialized {
            return;
        }

        let steps = self.timestep.accumulate(dt_ms);
        let dropped = self.timestep.take_dropped();
        if dropped > 0.0 {
            self.universe.skip_time(dropped);
        }
        if steps > 0 {
            // Input goes to the first step only; later catch-up steps see none.
            let input = self.input.drain();
            for i in 0..steps {
                let batch: &[InputEvent] = if i == 0 { &input } else { &[] };
                self.universe.step(batch, &mut self.renderer);
            }
        }

        self.universe.render(&mut self.renderer);
        let events = self.universe.drain_events();
        self.renderer.frame_mut().write_events(&events);
    }

    pub fn model_loaded(&mut self) {
        self.universe.model_loaded();
    }

    pub fn model_failed(&mut self) {
        self.universe.model_failed();
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    // ---- Pointer accessors for shared buffer reads ----

    pub fn frame_ptr(&self) -> *const f32 {
        self.renderer.frame().as_ptr()
    }

    pub fn frame_total_floats(&self) -> u32 {
        self.renderer.frame().layout().buffer_total_floats as u32
    }

    pub fn camera_ptr(&self) -> *const f32 {
        self.renderer.camera_uniform().view_projection.as_ptr() as *const f32
    }

    // ---- Scene setup accessors (read once by the page at init) ----

    pub fn body_name(&self, id: u32) -> String {
        self.universe.body_name(BodyId(id)).unwrap_or_default().to_owned()
    }

    pub fn sphere_radius(&self, id: u32) -> f32 {
        self.renderer.sphere_radius(BodyId(id)).unwrap_or(0.0)
    }

    /// `[inner, outer]`, empty when the body has no ring.
    pub fn ring(&self, id: u32) -> Vec<f32> {
        self.renderer
            .ring(BodyId(id))
            .map(|(inner, outer)| vec![inner, outer])
            .unwrap_or_default()
    }

    pub fn texture(&self, id: u32) -> String {
        self.renderer.texture(BodyId(id)).unwrap_or_default().to_owned()
    }

    pub fn model_url(&self) -> String {
        self.renderer.model_url().unwrap_or_default().to_owned()
    }

    pub fn is_mobile(&self) -> bool {
        self.universe.mode().is_mobile()
    }
}
