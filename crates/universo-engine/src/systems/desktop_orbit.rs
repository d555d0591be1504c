// systems/desktop_orbit.rs
//
// Desktop orbits: steady circular motion with speed relaxation and hover
// braking, plus the timed "rewind" that spins every body two full turns
// into a fresh, evenly spaced arrangement.

use std::f32::consts::TAU;

use rand::Rng;

use crate::api::types::BodyId;
use crate::components::body::Body;
use crate::core::time::progress;
use crate::extensions::easing::{lerp, Easing};
use crate::systems::repulsion::{self, DESKTOP_REPULSION};
use crate::systems::spin::wrap_angle;

pub const REWIND_DURATION_MS: f64 = 3500.0;
/// Full turns added to every rewind.
pub const REWIND_TURNS: f32 = 2.0;
/// Jitter span as a fraction of the even spacing.
pub const REWIND_JITTER: f32 = 0.2;
/// Per-frame pull of the current speed toward the base speed.
pub const SPEED_RELAX: f32 = 0.08;
/// Per-frame pull back to base after the pointer leaves.
pub const HOVER_RELAX: f32 = 0.1;
/// Hovered bodies crawl at this fraction of their base speed.
pub const HOVER_BRAKE: f32 = 0.05;

/// Per-body start/end angles of a rewind.
#[derive(Debug, Clone, PartialEq)]
pub struct RewindPlan {
    pub start_ms: f64,
    pub start_angles: Vec<f32>,
    pub end_angles: Vec<f32>,
}

impl RewindPlan {
    /// End angles for a given shift and per-body jitter.
    /// `end[i] = base_shift + i·(2π/n) + jitter[i] + turns·2π`.
    pub fn end_angles(count: usize, base_shift: f32, jitter: &[f32]) -> Vec<f32> {
        let spacing = TAU / count as f32;
        (0..count)
            .map(|i| {
                let j = jitter.get(i).copied().unwrap_or(0.0);
                base_shift + i as f32 * spacing + j + REWIND_TURNS * TAU
            })
            .collect()
    }

    /// Plan a rewind from the bodies' current angles.
    pub fn random(bodies: &[Body], now: f64, rng: &mut impl Rng) -> Self {
        let count = bodies.len();
        let spacing = TAU / count.max(1) as f32;
        let base_shift = rng.random::<f32>() * TAU;
        let jitter: Vec<f32> = (0..count)
            .map(|_| (rng.random::<f32>() - 0.5) * spacing * REWIND_JITTER)
            .collect();
        log::debug!("rewind: base shift {base_shift:.3}");
        Self {
            start_ms: now,
            start_angles: bodies.iter().map(|b| b.angle).collect(),
            end_angles: Self::end_angles(count, base_shift, &jitter),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum OrbitState {
    #[default]
    Steady,
    Rewinding(RewindPlan),
}

/// Drives the desktop orbits.
#[derive(Debug, Default)]
pub struct DesktopOrbit {
    pub state: OrbitState,
}

impl DesktopOrbit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_rewinding(&self) -> bool {
        matches!(self.state, OrbitState::Rewinding(_))
    }

    pub fn start_rewind(&mut self, bodies: &[Body], now: f64, rng: &mut impl Rng) {
        self.state = OrbitState::Rewinding(RewindPlan::random(bodies, now, rng));
        log::info!("desktop: rewind started");
    }

    /// Advance one frame.
    pub fn step(&mut self, bodies: &mut [Body], now: f64) {
        match &self.state {
            OrbitState::Steady => step_steady(bodies),
            OrbitState::Rewinding(plan) => {
                if step_rewind(plan, bodies, now) {
                    self.state = OrbitState::Steady;
                    log::info!("desktop: rewind finished");
                }
            }
        }
    }
}

/// Orbit at relaxed speed. Repulsion is measured on last frame's positions
/// and added on top of the new orbital position.
fn step_steady(bodies: &mut [Body]) {
    let offsets = repulsion::repulsion_offsets(bodies, DESKTOP_REPULSION);
    for (body, offset) in bodies.iter_mut().zip(offsets) {
        body.speed = lerp(body.speed, body.base_speed, SPEED_RELAX);
        body.angle += body.speed;
        body.place_on_orbit();
        body.position += offset;
    }
}

/// Returns true when the rewind has finished.
fn step_rewind(plan: &RewindPlan, bodies: &mut [Body], now: f64) -> bool {
    let t = progress(now - plan.start_ms, REWIND_DURATION_MS);
    let e = Easing::CosineInOut.apply(t);

    for ((body, &start), &end) in bodies.iter_mut().zip(&plan.start_angles).zip(&plan.end_angles) {
        body.angle = lerp(start, end, e);
        body.place_on_orbit();
        if e >= 1.0 {
            body.angle = wrap_angle(body.angle);
        }
    }
    repulsion::apply(bodies, DESKTOP_REPULSION);
    t >= 1.0
}

/// Hover braking. A hovered body crawls; with nothing hovered every body
/// eases back toward its base speed. An open panel cancels braking outright.
pub fn apply_hover(bodies: &mut [Body], hovered: Option<BodyId>, panel_open: bool) {
    if panel_open {
        for body in bodies.iter_mut() {
            body.speed = body.base_speed;
        }
        return;
    }
    match hovered {
        Some(id) => {
            if let Some(body) = bodies.get_mut(id.index()) {
                body.speed = body.base_speed * HOVER_BRAKE;
            }
        }
        None => {
            for body in bodies.iter_mut() {
                if body.speed != body.base_speed {
                    body.speed = lerp(body.speed, body.base_speed, HOVER_RELAX);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::UniverseConfig;
    use crate::core::registry::BodyRegistry;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn registry() -> BodyRegistry {
        BodyRegistry::from_config(&UniverseConfig::default())
    }

    #[test]
    fn end_angles_are_evenly_spaced_plus_two_turns() {
        let ends = RewindPlan::end_angles(7, 0.5, &[0.0; 7]);
        let spacing = TAU / 7.0;
        for (i, end) in ends.iter().enumerate() {
            let expected = 0.5 + i as f32 * spacing + 2.0 * TAU;
            assert!((end - expected).abs() < 1e-5);
        }
    }

    #[test]
    fn rewind_from_zero_lands_on_wrapped_end() {
        let mut reg = registry();
        for body in reg.iter_mut() {
            body.angle = 0.0;
        }
        let base_shift = 1.3;
        let jitter = [0.05, -0.02, 0.0, 0.08, -0.08, 0.01, 0.03];
        let plan = RewindPlan {
            start_ms: 0.0,
            start_angles: vec![0.0; 7],
            end_angles: RewindPlan::end_angles(7, base_shift, &jitter),
        };
        let mut orbit = DesktopOrbit {
            state: OrbitState::Rewinding(plan),
        };
        orbit.step(reg.bodies_mut(), REWIND_DURATION_MS);
        assert!(!orbit.is_rewinding());

        let spacing = TAU / 7.0;
        for (i, body) in reg.iter().enumerate() {
            let expected = (base_shift + i as f32 * spacing + jitter[i]).rem_euclid(TAU);
            assert!(
                (body.angle - expected).abs() < 1e-4,
                "body {i}: {} vs {expected}",
                body.angle
            );
        }
    }

    #[test]
    fn rewind_keeps_angles_unwrapped_midway() {
        let mut reg = registry();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut orbit = DesktopOrbit::new();
        orbit.start_rewind(reg.bodies(), 0.0, &mut rng);
        orbit.step(reg.bodies_mut(), REWIND_DURATION_MS * 0.9);
        assert!(orbit.is_rewinding());
        assert!(reg.iter().any(|b| b.angle > TAU));
    }

    #[test]
    fn random_plan_jitter_is_bounded() {
        let reg = registry();
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let plan = RewindPlan::random(reg.bodies(), 0.0, &mut rng);
        let spacing = TAU / 7.0;
        let shift = plan.end_angles[0] - 2.0 * TAU;
        for (i, end) in plan.end_angles.iter().enumerate() {
            let jitter = end - 2.0 * TAU - i as f32 * spacing - shift;
            // Relative to body 0, jitter differs by at most one full span.
            assert!(jitter.abs() <= spacing * REWIND_JITTER + 1e-4);
        }
    }

    #[test]
    fn steady_speed_relaxes_toward_base() {
        let mut reg = registry();
        reg.bodies_mut()[2].speed = 0.0;
        let mut orbit = DesktopOrbit::new();
        orbit.step(reg.bodies_mut(), 0.0);
        let body = &reg.bodies()[2];
        assert!((body.speed - body.base_speed * SPEED_RELAX).abs() < 1e-7);
    }

    #[test]
    fn steady_advances_every_angle() {
        let mut reg = registry();
        let before: Vec<f32> = reg.iter().map(|b| b.angle).collect();
        let mut orbit = DesktopOrbit::new();
        orbit.step(reg.bodies_mut(), 0.0);
        for (body, angle) in reg.iter().zip(before) {
            assert!(body.angle > angle);
        }
    }

    #[test]
    fn hover_brakes_and_releases() {
        let mut reg = registry();
        apply_hover(reg.bodies_mut(), Some(BodyId(1)), false);
        let body = &reg.bodies()[1];
        assert!((body.speed - body.base_speed * HOVER_BRAKE).abs() < 1e-9);

        apply_hover(reg.bodies_mut(), None, false);
        let body = &reg.bodies()[1];
        assert!(body.speed > body.base_speed * HOVER_BRAKE);
        assert!(body.speed < body.base_speed);

        apply_hover(reg.bodies_mut(), None, true);
        assert!(reg.iter().all(|b| b.speed == b.base_speed));
    }
}
