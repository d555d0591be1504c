pub mod runner;

pub use runner::UniverseRunner;

use std::cell::RefCell;

use universo_engine::{InputEvent, UniverseConfig, LOW_POWER_STARS};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<UniverseRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the live runner. `None` before `universe_init()`.
fn with_runner<R>(f: impl FnOnce(&mut UniverseRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
}

fn prefers_reduced_motion() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-reduced-motion: reduce)").ok().flatten())
        .is_some_and(|query| query.matches())
}

/// Chrome on Android gets a lighter tunnel and no tooltips.
fn is_chrome_android() -> bool {
    web_sys::window()
        .and_then(|w| w.navigator().user_agent().ok())
        .is_some_and(|ua| ua.contains("Android") && ua.contains("Chrome"))
}

fn load_config(json: Option<String>, seed: u32) -> UniverseConfig {
    let config = match json.as_deref() {
        Some(json) => UniverseConfig::from_json(json).unwrap_or_else(|err| {
            log::warn!("config: {err}; using defaults");
            UniverseConfig::default()
        }),
        None => UniverseConfig::default(),
    };
    let mut config = config.with_seed(u64::from(seed));
    if is_chrome_android() {
        config.tunnel_stars = config.tunnel_stars.min(LOW_POWER_STARS);
        config.tooltips = false;
    }
    config
}

/// Start the session. Returns `false` (and creates nothing) when the user
/// prefers reduced motion.
#[wasm_bindgen]
pub fn universe_init(width: f32, height: f32, seed: u32, config_json: Option<String>) -> bool {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    if prefers_reduced_motion() {
        log::info!("universo: reduced motion requested, animation disabled");
        return false;
    }

    let mut runner = UniverseRunner::new(load_config(config_json, seed), width, height);
    runner.init();
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("universo: initialized");
    true
}

#[wasm_bindgen]
pub fn universe_tick(dt_ms: f64) {
    with_runner(|r| r.tick(dt_ms));
}

#[wasm_bindgen]
pub fn universe_resize(width: f32, height: f32) {
    with_runner(|r| r.push_input(InputEvent::Resize { width, height }));
}

#[wasm_bindgen]
pub fn universe_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn universe_click(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::Click { x, y }));
}

#[wasm_bindgen]
pub fn universe_touch_start(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::TouchStart { x, y }));
}

#[wasm_bindgen]
pub fn universe_touch_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::TouchMove { x, y }));
}

#[wasm_bindgen]
pub fn universe_touch_end(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::TouchEnd { x, y }));
}

#[wasm_bindgen]
pub fn universe_reset_orbit() {
    with_runner(|r| r.push_input(InputEvent::ResetOrbit));
}

#[wasm_bindgen]
pub fn universe_close_panel() {
    with_runner(|r| r.push_input(InputEvent::ClosePanel));
}

#[wasm_bindgen]
pub fn universe_model_loaded() {
    with_runner(|r| r.model_loaded());
}

#[wasm_bindgen]
pub fn universe_model_failed() {
    with_runner(|r| r.model_failed());
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_frame_ptr() -> *const f32 {
    with_runner(|r| r.frame_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_frame_total_floats() -> u32 {
    with_runner(|r| r.frame_total_floats()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_camera_ptr() -> *const f32 {
    with_runner(|r| r.camera_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_is_mobile() -> bool {
    with_runner(|r| r.is_mobile()).unwrap_or(false)
}

// ---- Scene setup accessors ----

#[wasm_bindgen]
pub fn get_body_name(id: u32) -> String {
    with_runner(|r| r.body_name(id)).unwrap_or_default()
}

#[wasm_bindgen]
pub fn get_body_radius(id: u32) -> f32 {
    with_runner(|r| r.sphere_radius(id)).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn get_body_ring(id: u32) -> Vec<f32> {
    with_runner(|r| r.ring(id)).unwrap_or_default()
}

#[wasm_bindgen]
pub fn get_body_texture(id: u32) -> String {
    with_runner(|r| r.texture(id)).unwrap_or_default()
}

#[wasm_bindgen]
pub fn get_model_url() -> String {
    with_runner(|r| r.model_url()).unwrap_or_default()
}
