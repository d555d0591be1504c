use glam::Vec3;

use crate::api::config::PlanetSpec;
use crate::api::types::BodyId;

/// Unscaled size of every body. Scaling always starts from here.
pub const ORIGINAL_SCALE: Vec3 = Vec3::ONE;

/// Clearance a body keeps around itself, as a multiple of its size.
pub const SEPARATION_FACTOR: f32 = 2.5;

/// Inner/outer ring radii as multiples of the body size.
pub const RING_INNER: f32 = 1.1;
pub const RING_OUTER: f32 = 1.6;

/// Fat Body: one orbiting planet with everything the controllers touch.
/// Plain data; systems mutate fields directly.
#[derive(Debug, Clone)]
pub struct Body {
    /// Stable index, also the panel index.
    pub id: BodyId,
    /// Label shown in the tooltip.
    pub name: String,
    /// Texture path handed to the renderer.
    pub texture: String,
    /// Position in scene space. Orbits live on the z = 0 plane.
    pub position: Vec3,
    /// Current scale (`ORIGINAL_SCALE × factor`).
    pub scale: Vec3,
    /// Orbit angle in radians. May leave [0, 2π) mid-interpolation.
    pub angle: f32,
    /// Desktop angular speed the body relaxes toward.
    pub base_speed: f32,
    /// Desktop angular speed this frame.
    pub speed: f32,
    /// Sphere radius before device scaling.
    pub base_size: f32,
    /// Clearance radius used by the repulsion pass.
    pub min_separation: f32,
    /// Orbit radius after device scaling.
    pub orbit_radius: f32,
    /// Orbit radius as configured.
    pub base_orbit_radius: f32,
    /// Mobile zoom multiplier (0.85 while opening/closing, 1.0 at rest).
    pub zoom: f32,
    /// Whether the body wears a ring.
    pub ring: bool,
}

impl Body {
    pub fn new(id: BodyId) -> Self {
        Self {
            id,
            name: String::new(),
            texture: String::new(),
            position: Vec3::ZERO,
            scale: ORIGINAL_SCALE,
            angle: 0.0,
            base_speed: 0.0,
            speed: 0.0,
            base_size: 1.0,
            min_separation: SEPARATION_FACTOR,
            orbit_radius: 1.0,
            base_orbit_radius: 1.0,
            zoom: 1.0,
            ring: false,
        }
    }

    /// Build a body from its configuration entry.
    pub fn from_spec(id: BodyId, spec: &PlanetSpec) -> Self {
        Self::new(id)
            .with_name(spec.name.clone())
            .with_texture(spec.texture.clone())
            .with_size(spec.size)
            .with_orbit(spec.orbit_radius, spec.initial_angle)
            .with_speed(spec.base_speed)
            .with_ring(spec.ring)
    }

    // -- Builder pattern --

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_texture(mut self, texture: impl Into<String>) -> Self {
        self.texture = texture.into();
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.base_size = size;
        self.min_separation = size * SEPARATION_FACTOR;
        self
    }

    pub fn with_orbit(mut self, radius: f32, angle: f32) -> Self {
        self.base_orbit_radius = radius;
        self.orbit_radius = radius;
        self.angle = angle;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.base_speed = speed;
        self.speed = speed;
        self
    }

    pub fn with_ring(mut self, ring: bool) -> Self {
        self.ring = ring;
        self
    }

    pub fn with_pos(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    // -- Mutators --

    /// Set the scale from the original, never from the current value.
    pub fn set_scale_factor(&mut self, factor: f32) {
        self.scale = ORIGINAL_SCALE * factor;
    }

    /// Clearance from the configured size, never from the current value.
    pub fn set_separation_factor(&mut self, factor: f32) {
        self.min_separation = self.base_size * SEPARATION_FACTOR * factor;
    }

    /// Scale orbit radius from its configured value.
    pub fn set_radius_factor(&mut self, factor: f32) {
        self.orbit_radius = self.base_orbit_radius * factor;
    }

    /// Place the body on its orbit at the current angle.
    pub fn place_on_orbit(&mut self) {
        self.position = polar(self.angle, self.orbit_radius, 0.0);
    }

    /// Ring radii `(inner, outer)` for ringed bodies.
    pub fn ring_radii(&self) -> Option<(f32, f32)> {
        self.ring
            .then(|| (self.base_size * RING_INNER, self.base_size * RING_OUTER))
    }
}

/// Point on a circle in the z = 0 plane, lifted by `y_offset`.
#[inline]
pub fn polar(angle: f32, radius: f32, y_offset: f32) -> Vec3 {
    Vec3::new(angle.cos() * radius, angle.sin() * radius + y_offset, 0.0)
}
