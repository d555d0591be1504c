//! Renderer trait: the boundary between the animation core and whatever
//! draws the scene.
//!
//! The core never touches a scene graph. It asks the renderer to create
//! geometry once, to answer picking and projection queries, and hands it a
//! complete `FrameData` each frame. The web build uses the headless
//! `BufferRenderer`, which writes a flat buffer the page-side WebGL code reads.

use glam::{Vec2, Vec3};

use crate::api::types::BodyId;
use crate::components::body::Body;
use crate::components::logo::Logo;
use crate::systems::tunnel::TunnelStar;

/// Drawing backend used by a `Universe`.
///
/// # Example Implementation
///
/// ```ignore
/// struct ThreeBridge { /* js handles */ }
///
/// impl Renderer for ThreeBridge {
///     fn create_sphere(&mut self, id: BodyId, radius: f32) { /* new Mesh(SphereGeometry) */ }
///     fn create_ring(&mut self, id: BodyId, inner: f32, outer: f32) { /* RingGeometry */ }
///     fn load_model(&mut self, url: &str) { /* GLTFLoader.load(url) */ }
///     fn project_to_screen(&self, world: Vec3) -> Vec2 { /* vec.project(camera) */ }
///     fn hit_test(&self, x: f32, y: f32) -> Option<BodyId> { /* raycaster */ }
///     fn hit_test_logo(&self, x: f32, y: f32) -> bool { /* raycaster on the model */ }
///     fn render(&mut self, frame: &FrameData) { /* renderer.render(scene, camera) */ }
/// }
/// ```
pub trait Renderer {
    /// Create the sphere for a body. Called once per body at init.
    fn create_sphere(&mut self, id: BodyId, radius: f32);

    /// Attach a flat ring to a body.
    fn create_ring(&mut self, id: BodyId, inner: f32, outer: f32);

    /// Surface texture for a body. Optional; defaults to untextured.
    fn load_texture(&mut self, _id: BodyId, _url: &str) {}

    /// Start loading the logo model. Completion comes back through
    /// `Universe::model_loaded` / `Universe::model_failed`.
    fn load_model(&mut self, url: &str);

    /// Viewport changed; `camera_z` is the new camera distance.
    fn resize(&mut self, _width: f32, _height: f32, _camera_z: f32) {}

    /// World position → viewport pixels.
    fn project_to_screen(&self, world: Vec3) -> Vec2;

    /// Body under the given viewport pixel, if any.
    fn hit_test(&self, x: f32, y: f32) -> Option<BodyId>;

    /// Whether the given viewport pixel is over the logo's grab area.
    fn hit_test_logo(&self, x: f32, y: f32) -> bool;

    /// Draw a frame.
    fn render(&mut self, frame: &FrameData);
}

/// Complete frame data for rendering.
pub struct FrameData<'a> {
    /// Simulation steps run so far.
    pub frame: u64,
    /// Bodies in id order.
    pub bodies: &'a [Body],
    pub logo: &'a Logo,
    pub camera_z: f32,
    /// Loading tunnel, while the overlay is still up.
    pub tunnel: Option<&'a [TunnelStar]>,
    pub tunnel_spiral: f32,
    /// Loading overlay opacity (1 while loading, 0 once gone).
    pub overlay_opacity: f32,
    /// Background starfield rotation around Y.
    pub starfield_rotation: f32,
}
