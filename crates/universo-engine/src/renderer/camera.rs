use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};

use crate::systems::layout::CAMERA_BASE_Z;

pub const FOV_Y_DEGREES: f32 = 45.0;
pub const NEAR: f32 = 0.1;
pub const FAR: f32 = 10_000.0;

/// Perspective camera on the +Z axis looking at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera3D {
    /// Viewport size in pixels.
    pub viewport: Vec2,
    /// Distance from the origin along +Z.
    pub z: f32,
    pub fov_y: f32,
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_projection: [[f32; 4]; 4],
}

impl Camera3D {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            viewport: Vec2::new(width.max(1.0), height.max(1.0)),
            z: CAMERA_BASE_Z,
            fov_y: FOV_Y_DEGREES.to_radians(),
        }
    }

    pub fn aspect(&self) -> f32 {
        self.viewport.x / self.viewport.y
    }

    /// Resize the viewport and move the camera.
    pub fn resize(&mut self, width: f32, height: f32, z: f32) {
        self.viewport = Vec2::new(width.max(1.0), height.max(1.0));
        self.z = z;
    }

    pub fn view_projection(&self) -> Mat4 {
        let projection = Mat4::perspective_rh(self.fov_y, self.aspect(), NEAR, FAR);
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, self.z), Vec3::ZERO, Vec3::Y);
        projection * view
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_projection: self.view_projection().to_cols_array_2d(),
        }
    }

    /// World position → viewport pixels (origin top-left, y down).
    pub fn project(&self, world: Vec3) -> Vec2 {
        let ndc = self.view_projection().project_point3(world);
        Vec2::new(
            (ndc.x * 0.5 + 0.5) * self.viewport.x,
            (-ndc.y * 0.5 + 0.5) * self.viewport.y,
        )
    }

    /// On-screen radius in pixels of a sphere of `radius` centered at `world`.
    pub fn projected_radius(&self, world: Vec3, radius: f32) -> f32 {
        let depth = (self.z - world.z).max(NEAR);
        let half_height_world = (self.fov_y * 0.5).tan() * depth;
        radius / half_height_world * self.viewport.y * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_projects_to_viewport_center() {
        let cam = Camera3D::new(800.0, 600.0);
        let p = cam.project(Vec3::ZERO);
        assert!((p - Vec2::new(400.0, 300.0)).length() < 1e-3);
    }

    #[test]
    fn up_is_up_on_screen() {
        let cam = Camera3D::new(800.0, 600.0);
        let p = cam.project(Vec3::new(0.0, 2.0, 0.0));
        assert!(p.y < 300.0);
        let q = cam.project(Vec3::new(2.0, 0.0, 0.0));
        assert!(q.x > 400.0);
    }

    #[test]
    fn pulling_back_shrinks_things() {
        let mut cam = Camera3D::new(800.0, 600.0);
        let near = cam.projected_radius(Vec3::ZERO, 1.0);
        cam.resize(800.0, 600.0, 40.0);
        let far = cam.projected_radius(Vec3::ZERO, 1.0);
        assert!((near / far - 2.0).abs() < 1e-4);
    }

    #[test]
    fn projected_radius_matches_projection() {
        let cam = Camera3D::new(800.0, 600.0);
        let center = cam.project(Vec3::ZERO);
        let edge = cam.project(Vec3::new(0.0, 1.0, 0.0));
        let r = cam.projected_radius(Vec3::ZERO, 1.0);
        assert!(((center - edge).length() - r).abs() < 0.05);
    }

    #[test]
    fn uniform_is_16_floats() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 64);
    }
}
