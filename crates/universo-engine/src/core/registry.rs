use glam::Vec3;

use crate::api::config::UniverseConfig;
use crate::api::types::BodyId;
use crate::components::body::Body;
use crate::components::logo::Logo;

/// Owns the seven bodies and the logo for the lifetime of a session.
/// Flat Vec indexed by `BodyId`; the count never changes after construction.
pub struct BodyRegistry {
    bodies: Vec<Body>,
    pub logo: Logo,
}

impl BodyRegistry {
    /// Build bodies from a validated configuration, placed on their desktop orbits.
    pub fn from_config(config: &UniverseConfig) -> Self {
        let bodies = config
            .planets
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                let mut body = Body::from_spec(BodyId(i as u32), spec);
                body.place_on_orbit();
                body
            })
            .collect();
        Self {
            bodies,
            logo: Logo::new(),
        }
    }

    /// Registry with explicit bodies (ids are reassigned by position).
    pub fn with_bodies(bodies: Vec<Body>) -> Self {
        let bodies = bodies
            .into_iter()
            .enumerate()
            .map(|(i, mut b)| {
                b.id = BodyId(i as u32);
                b
            })
            .collect();
        Self {
            bodies,
            logo: Logo::new(),
        }
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.index())
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Body> {
        self.bodies.iter_mut()
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    /// Bodies and logo borrowed together, for systems that move both.
    pub fn split_mut(&mut self) -> (&mut [Body], &mut Logo) {
        (&mut self.bodies, &mut self.logo)
    }

    /// Snapshot of every body position, in id order.
    pub fn positions(&self) -> Vec<Vec3> {
        self.bodies.iter().map(|b| b.position).collect()
    }

    /// Find a body by its display name.
    pub fn find_by_name(&self, name: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.name == name)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}
