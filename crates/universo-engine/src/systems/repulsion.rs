// systems/repulsion.rs
//
// Swarm repulsion: overlapping bodies push each other apart.
// Every displacement is computed from one position snapshot and applied
// afterwards, so the pass is independent of body order.

use glam::Vec3;

use crate::components::body::Body;
use crate::systems::layout::LayoutMode;

/// Push strength on mobile.
pub const MOBILE_REPULSION: f32 = 0.15;
/// Push strength on desktop (weaker, keeps the orbits tidy).
pub const DESKTOP_REPULSION: f32 = 0.05;

pub fn force_for(mode: LayoutMode) -> f32 {
    match mode {
        LayoutMode::Mobile => MOBILE_REPULSION,
        LayoutMode::Desktop => DESKTOP_REPULSION,
    }
}

/// Displacement for each body, in input order.
///
/// For a pair closer than the sum of their clearances, each body moves along
/// the axis between them by `(min − d) / min × force`, in opposite directions.
/// Coincident bodies (d = 0) have no defined axis and are left alone.
pub fn displacements(positions: &[Vec3], separations: &[f32], force: f32) -> Vec<Vec3> {
    let n = positions.len().min(separations.len());
    let mut out = vec![Vec3::ZERO; positions.len()];

    for i in 0..n {
        for j in (i + 1)..n {
            let delta = (positions[i] - positions[j]).truncate();
            let distance = delta.length();
            let min_dist = separations[i] + separations[j];
            if distance > 0.0 && distance < min_dist {
                let strength = (min_dist - distance) / min_dist * force;
                let push = (delta / distance * strength).extend(0.0);
                out[i] += push;
                out[j] -= push;
            }
        }
    }
    out
}

/// Compute and apply one repulsion pass.
pub fn apply(bodies: &mut [Body], force: f32) {
    let offsets = repulsion_offsets(bodies, force);
    for (body, offset) in bodies.iter_mut().zip(offsets) {
        body.position += offset;
    }
}

/// Displacements for the bodies' current positions.
pub fn repulsion_offsets(bodies: &[Body], force: f32) -> Vec<Vec3> {
    let positions: Vec<Vec3> = bodies.iter().map(|b| b.position).collect();
    let separations: Vec<f32> = bodies.iter().map(|b| b.min_separation).collect();
    displacements(&positions, &separations, force)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::BodyId;

    #[test]
    fn pair_moves_symmetrically() {
        let positions = [Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)];
        let out = displacements(&positions, &[1.0, 1.0], DESKTOP_REPULSION);
        assert!((out[0] + out[1]).length() < 1e-7);
        // A is left of B, so A is pushed further left.
        assert!(out[0].x < 0.0);
        let expected = (2.0 - 1.0) / 2.0 * DESKTOP_REPULSION;
        assert!((out[1].x - expected).abs() < 1e-6);
    }

    #[test]
    fn order_does_not_matter() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(0.5, 0.3, 0.0);
        let c = Vec3::new(-0.2, 0.6, 0.0);
        let forward = displacements(&[a, b, c], &[1.0, 1.0, 1.0], MOBILE_REPULSION);
        let reversed = displacements(&[c, b, a], &[1.0, 1.0, 1.0], MOBILE_REPULSION);
        assert!((forward[0] - reversed[2]).length() < 1e-6);
        assert!((forward[1] - reversed[1]).length() < 1e-6);
        assert!((forward[2] - reversed[0]).length() < 1e-6);
    }

    #[test]
    fn total_displacement_is_zero() {
        let positions = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.4, 0.1, 0.0),
            Vec3::new(0.2, -0.5, 0.0),
            Vec3::new(5.0, 5.0, 0.0),
        ];
        let out = displacements(&positions, &[0.6, 0.6, 0.6, 0.6], MOBILE_REPULSION);
        let sum: Vec3 = out.iter().copied().sum();
        assert!(sum.length() < 1e-6);
        assert_eq!(out[3], Vec3::ZERO);
    }

    #[test]
    fn coincident_and_distant_pairs_are_ignored() {
        let same = displacements(&[Vec3::ONE, Vec3::ONE], &[1.0, 1.0], MOBILE_REPULSION);
        assert_eq!(same, vec![Vec3::ZERO, Vec3::ZERO]);
        let far = displacements(&[Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0)], &[1.0, 1.0], MOBILE_REPULSION);
        assert_eq!(far, vec![Vec3::ZERO, Vec3::ZERO]);
    }

    #[test]
    fn apply_moves_bodies_apart() {
        let mut bodies = vec![
            Body::new(BodyId(0)).with_size(0.5).with_pos(Vec3::ZERO),
            Body::new(BodyId(1)).with_size(0.5).with_pos(Vec3::new(0.0, 1.0, 0.0)),
        ];
        let before = bodies[0].position.distance(bodies[1].position);
        apply(&mut bodies, force_for(LayoutMode::Mobile));
        let after = bodies[0].position.distance(bodies[1].position);
        assert!(after > before);
        assert_eq!(bodies[0].position.z, 0.0);
    }
}
