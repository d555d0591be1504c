use glam::{Vec2, Vec3};

use crate::api::types::BodyId;
use crate::bridge::protocol::{
    FrameBuffer, ProtocolLayout, HEADER_CAMERA_Z, HEADER_FRAME_COUNTER, HEADER_LOGO_OPACITY,
    HEADER_LOGO_VISIBLE, HEADER_OVERLAY_OPACITY, HEADER_STARFIELD_ROTATION, HEADER_TUNNEL_SPIRAL,
};
use crate::components::logo::{Logo, LOGO_ORIGINAL_SCALE};
use crate::renderer::camera::{Camera3D, CameraUniform};
use crate::renderer::instance::{RenderBuffer, RenderInstance};
use crate::renderer::traits::{FrameData, Renderer};

/// Grab radius of the logo in world units at its original scale.
pub const LOGO_HIT_RADIUS: f32 = 2.5;

/// Headless renderer: keeps a camera for projection and picking and writes
/// each frame into the shared `FrameBuffer` for the page to draw.
pub struct BufferRenderer {
    camera: Camera3D,
    uniform: CameraUniform,
    instances: RenderBuffer,
    frame: FrameBuffer,
    /// Sphere radius per body, indexed by id.
    spheres: Vec<f32>,
    rings: Vec<(BodyId, f32, f32)>,
    textures: Vec<(BodyId, String)>,
    model_url: Option<String>,
    /// Pick targets from the last rendered frame: (id, center, world radius).
    targets: Vec<(BodyId, Vec3, f32)>,
    logo_target: Option<(Vec3, f32)>,
}

impl BufferRenderer {
    pub fn new(width: f32, height: f32, layout: ProtocolLayout) -> Self {
        let camera = Camera3D::new(width, height);
        Self {
            uniform: camera.uniform(),
            camera,
            instances: RenderBuffer::new(),
            frame: FrameBuffer::new(layout),
            spheres: Vec::new(),
            rings: Vec::new(),
            textures: Vec::new(),
            model_url: None,
            targets: Vec::new(),
            logo_target: None,
        }
    }

    pub fn camera(&self) -> &Camera3D {
        &self.camera
    }

    pub fn camera_uniform(&self) -> &CameraUniform {
        &self.uniform
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn frame_mut(&mut self) -> &mut FrameBuffer {
        &mut self.frame
    }

    pub fn instances(&self) -> &RenderBuffer {
        &self.instances
    }

    pub fn sphere_radius(&self, id: BodyId) -> Option<f32> {
        self.spheres.get(id.index()).copied()
    }

    pub fn ring(&self, id: BodyId) -> Option<(f32, f32)> {
        self.rings
            .iter()
            .find(|(ring_id, _, _)| *ring_id == id)
            .map(|&(_, inner, outer)| (inner, outer))
    }

    pub fn texture(&self, id: BodyId) -> Option<&str> {
        self.textures
            .iter()
            .find(|(tex_id, _)| *tex_id == id)
            .map(|(_, url)| url.as_str())
    }

    pub fn model_url(&self) -> Option<&str> {
        self.model_url.as_deref()
    }

    fn logo_instance(logo: &Logo) -> RenderInstance {
        RenderInstance {
            x: logo.position.x,
            y: logo.position.y,
            z: logo.position.z,
            scale: logo.scale,
            rot_x: logo.rotation.x,
            rot_y: logo.rotation.y,
            rot_z: logo.rotation.z,
            alpha: if logo.loaded { logo.opacity } else { 0.0 },
        }
    }
}

impl Renderer for BufferRenderer {
    fn create_sphere(&mut self, id: BodyId, radius: f32) {
        if self.spheres.len() <= id.index() {
            self.spheres.resize(id.index() + 1, 0.0);
        }
        self.spheres[id.index()] = radius;
    }

    fn create_ring(&mut self, id: BodyId, inner: f32, outer: f32) {
        self.rings.push((id, inner, outer));
    }

    fn load_texture(&mut self, id: BodyId, url: &str) {
        self.textures.push((id, url.to_owned()));
    }

    fn load_model(&mut self, url: &str) {
        self.model_url = Some(url.to_owned());
    }

    fn resize(&mut self, width: f32, height: f32, camera_z: f32) {
        self.camera.resize(width, height, camera_z);
        self.uniform = self.camera.uniform();
    }

    fn project_to_screen(&self, world: Vec3) -> Vec2 {
        self.camera.project(world)
    }

    fn hit_test(&self, x: f32, y: f32) -> Option<BodyId> {
        let at = Vec2::new(x, y);
        self.targets
            .iter()
            .filter_map(|&(id, center, radius)| {
                let d = self.camera.project(center).distance(at);
                (d <= self.camera.projected_radius(center, radius)).then_some((id, d))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    fn hit_test_logo(&self, x: f32, y: f32) -> bool {
        let Some((center, radius)) = self.logo_target else {
            return false;
        };
        let d = self.camera.project(center).distance(Vec2::new(x, y));
        d <= self.camera.projected_radius(center, radius)
    }

    fn render(&mut self, frame: &FrameData) {
        if self.camera.z != frame.camera_z {
            self.camera.z = frame.camera_z;
            self.uniform = self.camera.uniform();
        }

        self.instances.clear();
        self.targets.clear();
        for body in frame.bodies {
            self.instances.push(RenderInstance {
                x: body.position.x,
                y: body.position.y,
                z: body.position.z,
                scale: body.scale.x,
                alpha: 1.0,
                ..Default::default()
            });
            let radius = self.sphere_radius(body.id).unwrap_or(body.base_size);
            self.targets.push((body.id, body.position, radius * body.scale.x));
        }
        self.instances.push(Self::logo_instance(frame.logo));
        self.logo_target = frame.logo.loaded.then(|| {
            let radius = LOGO_HIT_RADIUS * frame.logo.scale / LOGO_ORIGINAL_SCALE;
            (frame.logo.position, radius)
        });

        self.frame.write_instances(&self.instances.instances);
        self.frame.write_stars(frame.tunnel);
        self.frame.set_header(HEADER_FRAME_COUNTER, frame.frame as f32);
        self.frame.set_header(HEADER_LOGO_VISIBLE, if frame.logo.visible() { 1.0 } else { 0.0 });
        self.frame.set_header(HEADER_LOGO_OPACITY, frame.logo.opacity);
        self.frame.set_header(HEADER_CAMERA_Z, frame.camera_z);
        self.frame.set_header(HEADER_TUNNEL_SPIRAL, frame.tunnel_spiral);
        self.frame.set_header(HEADER_OVERLAY_OPACITY, frame.overlay_opacity);
        self.frame.set_header(HEADER_STARFIELD_ROTATION, frame.starfield_rotation);
    }
}
