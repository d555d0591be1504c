// systems/mobile_phase.rs
//
// Mobile choreography: intro line, ciranda entry, idle circle, reset sweep.
// One enum variant per phase, each carrying the snapshot it was entered with.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::body::{polar, Body};
use crate::components::logo::{Logo, MOBILE_Y_OFFSET};
use crate::core::time::progress;
use crate::extensions::easing::{lerp, lerp_vec3, Easing};
use crate::systems::spin::{wrap_angle, SpinGesture};

pub const LINE_DURATION_MS: f64 = 2000.0;
pub const CIRANDA_DURATION_MS: f64 = 2000.0;
pub const RESET_OPEN_MS: f64 = 1500.0;
pub const RESET_ROTATE_MS: f64 = 2000.0;
pub const RESET_RETURN_MS: f64 = 1500.0;
pub const RESET_TOTAL_MS: f64 = RESET_OPEN_MS + RESET_ROTATE_MS + RESET_RETURN_MS;

/// Circle radius at rest.
pub const CIRANDA_RADIUS: f32 = 6.0;
/// Circle radius while the reset sweep spins.
pub const EXPANDED_RADIUS: f32 = CIRANDA_RADIUS * 1.5;
/// Idle drift per frame.
pub const CIRANDA_SPEED: f32 = 0.002;
/// Zoom while the circle is open or queued.
pub const ZOOM_OUT: f32 = 0.85;
pub const ZOOM_REST: f32 = 1.0;
/// Two full turns during the reset sweep.
pub const RESET_SWEEP: f32 = 2.0 * TAU;

/// Queue column x positions.
pub const QUEUE_LEFT_X: f32 = -5.0;
pub const QUEUE_RIGHT_X: f32 = 5.0;
/// Queue columns are centered on this height (before the mobile lift).
pub const QUEUE_CENTER_Y: f32 = 6.0;

/// Vertical spacing for a queue column of `count` bodies.
fn column_spacing(count: usize) -> f32 {
    if count == 3 {
        3.5
    } else {
        2.5
    }
}

/// Two-column queue the bodies line up in.
#[derive(Debug, Clone, PartialEq)]
pub struct QueueLayout {
    /// Target position per body, in id order.
    pub positions: Vec<Vec3>,
    /// Which bodies went to the left column.
    pub left: Vec<usize>,
}

impl QueueLayout {
    /// Deterministic layout: the first `left_count` entries of `order` fill the
    /// left column top to bottom, the rest fill the right column.
    pub fn build(left_count: usize, order: &[usize]) -> Self {
        let count = order.len();
        let left_count = left_count.min(count);
        let mut positions = vec![Vec3::ZERO; count];

        let column = |members: &[usize], x: f32, positions: &mut [Vec3]| {
            let spacing = column_spacing(members.len());
            let height = members.len().saturating_sub(1) as f32 * spacing;
            let start_y = QUEUE_CENTER_Y - height / 2.0 + MOBILE_Y_OFFSET;
            for (rank, &index) in members.iter().enumerate() {
                if let Some(slot) = positions.get_mut(index) {
                    *slot = Vec3::new(x, start_y - rank as f32 * spacing, 0.0);
                }
            }
        };

        let (left, right) = order.split_at(left_count);
        column(left, QUEUE_LEFT_X, &mut positions);
        column(right, QUEUE_RIGHT_X, &mut positions);

        Self {
            positions,
            left: left.to_vec(),
        }
    }

    /// Random 3/4 or 4/3 split over a shuffled order.
    pub fn random(count: usize, rng: &mut impl Rng) -> Self {
        let half = count / 2;
        let left_count = if rng.random_bool(0.5) { half } else { count - half };
        let mut order: Vec<usize> = (0..count).collect();
        order.shuffle(rng);
        Self::build(left_count, &order)
    }
}

/// Bodies lining up into the queue.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePhase {
    pub start_ms: f64,
    pub from: Vec<Vec3>,
    pub queue: Vec<Vec3>,
}

/// Bodies moving from the queue onto the circle.
#[derive(Debug, Clone, PartialEq)]
pub struct CirandaPhase {
    pub start_ms: f64,
    pub queue: Vec<Vec3>,
}

/// Open, sweep two turns, return to a fresh queue.
#[derive(Debug, Clone, PartialEq)]
pub struct ResetPhase {
    pub start_ms: f64,
    pub from: Vec<Vec3>,
    pub start_angles: Vec<f32>,
    /// Where each body ends the sweep (start angle + two turns).
    pub sweep_end: Vec<Vec3>,
    pub queue: Vec<Vec3>,
    pub logo_from: Vec3,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum MobilePhase {
    #[default]
    Idle,
    Line(LinePhase),
    Ciranda(CirandaPhase),
    Reset(ResetPhase),
}

impl MobilePhase {
    pub fn name(&self) -> &'static str {
        match self {
            MobilePhase::Idle => "idle",
            MobilePhase::Line(_) => "line",
            MobilePhase::Ciranda(_) => "ciranda",
            MobilePhase::Reset(_) => "reset",
        }
    }
}

/// Drives the mobile arrangement.
pub struct MobilePhaseController {
    pub phase: MobilePhase,
    /// Rotation of the whole circle, in [0, 2π) at rest.
    pub ciranda_angle: f32,
    /// Idle drift is suspended (panel open, finger down, coasting).
    pub paused: bool,
    pub spin: SpinGesture,
    base_angles: Vec<f32>,
}

impl MobilePhaseController {
    pub fn new(count: usize) -> Self {
        Self {
            phase: MobilePhase::Idle,
            ciranda_angle: 0.0,
            paused: false,
            spin: SpinGesture::default(),
            base_angles: (0..count).map(|i| i as f32 / count as f32 * TAU).collect(),
        }
    }

    /// A phase other than Idle is running.
    pub fn is_animating(&self) -> bool {
        !matches!(self.phase, MobilePhase::Idle)
    }

    pub fn base_angles(&self) -> &[f32] {
        &self.base_angles
    }

    /// Resting position of body `i` on the circle at the current angle.
    pub fn circle_position(&self, i: usize) -> Vec3 {
        let base = self.base_angles.get(i).copied().unwrap_or(0.0);
        polar(base + self.ciranda_angle, CIRANDA_RADIUS, MOBILE_Y_OFFSET)
    }

    /// Put every body on the circle (used when a resize re-applies the layout).
    pub fn place_on_circle(&self, bodies: &mut [Body]) {
        for (i, body) in bodies.iter_mut().enumerate() {
            body.position = self.circle_position(i);
        }
    }

    fn enter(&mut self, phase: MobilePhase) {
        log::info!("mobile: {} -> {}", self.phase.name(), phase.name());
        self.phase = phase;
    }

    /// First activation: capture positions and line up.
    pub fn start_intro(&mut self, bodies: &[Body], now: f64, rng: &mut impl Rng) {
        let from: Vec<Vec3> = bodies.iter().map(|b| b.position).collect();
        let queue = QueueLayout::random(bodies.len(), rng).positions;
        self.ciranda_angle = 0.0;
        self.enter(MobilePhase::Line(LinePhase {
            start_ms: now,
            from,
            queue,
        }));
    }

    /// Reset: open the circle, sweep, return to a fresh queue.
    pub fn start_reset(&mut self, bodies: &[Body], logo: &Logo, now: f64, rng: &mut impl Rng) {
        let from: Vec<Vec3> = bodies.iter().map(|b| b.position).collect();
        let start_angles: Vec<f32> = from
            .iter()
            .map(|p| (p.y - MOBILE_Y_OFFSET).atan2(p.x))
            .collect();
        let sweep_end = start_angles
            .iter()
            .map(|&a| polar(a + RESET_SWEEP, EXPANDED_RADIUS, MOBILE_Y_OFFSET))
            .collect();
        let queue = QueueLayout::random(bodies.len(), rng).positions;
        self.spin = SpinGesture::default();
        self.enter(MobilePhase::Reset(ResetPhase {
            start_ms: now,
            from,
            start_angles,
            sweep_end,
            queue,
            logo_from: logo.rotation,
        }));
    }

    /// Resume idle drift (panel closed, touch ended without a spin).
    pub fn resume(&mut self) {
        if !self.is_animating() {
            self.paused = false;
        }
    }

    /// Advance one frame.
    pub fn step(&mut self, bodies: &mut [Body], logo: &mut Logo, now: f64, panel_open: bool) {
        if !self.is_animating() {
            self.step_idle(bodies, panel_open);
            return;
        }

        let next = match &self.phase {
            MobilePhase::Idle => None,
            MobilePhase::Line(line) => step_line(line, bodies, now),
            MobilePhase::Ciranda(ciranda) => step_ciranda(ciranda, &self.base_angles, bodies, now),
            MobilePhase::Reset(reset) => step_reset(reset, bodies, logo, now),
        };

        if let Some(next) = next {
            if matches!(next, MobilePhase::Ciranda(_)) {
                self.ciranda_angle = 0.0;
            }
            if matches!(next, MobilePhase::Idle) {
                for body in bodies.iter_mut() {
                    body.zoom = ZOOM_REST;
                }
            }
            self.enter(next);
        }
    }

    fn step_idle(&mut self, bodies: &mut [Body], panel_open: bool) {
        if panel_open {
            self.paused = true;
            return;
        }

        if self.spin.active {
            self.ciranda_angle = self.spin.current_angle;
        } else if self.spin.is_coasting() {
            self.spin.coast();
            self.ciranda_angle = self.spin.current_angle;
            if !self.spin.is_coasting() {
                self.paused = false;
            }
        } else if !self.paused {
            self.ciranda_angle += CIRANDA_SPEED;
        }
        self.ciranda_angle = wrap_angle(self.ciranda_angle);

        for (i, body) in bodies.iter_mut().enumerate() {
            body.position = self.circle_position(i);
            body.zoom = ZOOM_REST;
        }
    }
}

fn step_line(line: &LinePhase, bodies: &mut [Body], now: f64) -> Option<MobilePhase> {
    let t = progress(now - line.start_ms, LINE_DURATION_MS);
    let te = Easing::CubicInOut.apply(t);
    for ((body, from), to) in bodies.iter_mut().zip(&line.from).zip(&line.queue) {
        body.position = lerp_vec3(*from, *to, te);
    }
    (t >= 1.0).then(|| {
        MobilePhase::Ciranda(CirandaPhase {
            start_ms: now,
            queue: line.queue.clone(),
        })
    })
}

fn step_ciranda(
    ciranda: &CirandaPhase,
    base_angles: &[f32],
    bodies: &mut [Body],
    now: f64,
) -> Option<MobilePhase> {
    let t = progress(now - ciranda.start_ms, CIRANDA_DURATION_MS);
    let te = Easing::CosineInOut.apply(t);
    let zoom = lerp(ZOOM_OUT, ZOOM_REST, te);
    for ((body, queued), &angle) in bodies.iter_mut().zip(&ciranda.queue).zip(base_angles) {
        let circle = polar(angle, CIRANDA_RADIUS, MOBILE_Y_OFFSET);
        body.position = lerp_vec3(*queued, circle, te);
        body.zoom = zoom;
    }
    (t >= 1.0).then_some(MobilePhase::Idle)
}

fn step_reset(reset: &ResetPhase, bodies: &mut [Body], logo: &mut Logo, now: f64) -> Option<MobilePhase> {
    let elapsed = now - reset.start_ms;

    if elapsed >= RESET_TOTAL_MS {
        for (body, queued) in bodies.iter_mut().zip(&reset.queue) {
            body.position = *queued;
        }
        logo.rotation = logo.initial_rotation;
        return Some(MobilePhase::Ciranda(CirandaPhase {
            start_ms: now,
            queue: reset.queue.clone(),
        }));
    }

    let overall = Easing::CosineInOut.apply(progress(elapsed, RESET_TOTAL_MS));
    logo.rotation = lerp_vec3(reset.logo_from, logo.initial_rotation, overall);

    if elapsed < RESET_OPEN_MS {
        let te = Easing::CubicInOut.apply(progress(elapsed, RESET_OPEN_MS));
        let radius = lerp(CIRANDA_RADIUS, EXPANDED_RADIUS, te);
        let zoom = lerp(ZOOM_REST, ZOOM_OUT, te);
        for ((body, from), &angle) in bodies.iter_mut().zip(&reset.from).zip(&reset.start_angles) {
            let target = polar(angle, radius, MOBILE_Y_OFFSET);
            body.position = lerp_vec3(*from, target, te);
            body.zoom = zoom;
        }
    } else if elapsed < RESET_OPEN_MS + RESET_ROTATE_MS {
        let te = Easing::CosineInOut.apply(progress(elapsed - RESET_OPEN_MS, RESET_ROTATE_MS));
        for (body, &angle) in bodies.iter_mut().zip(&reset.start_angles) {
            body.position = polar(angle + RESET_SWEEP * te, EXPANDED_RADIUS, MOBILE_Y_OFFSET);
            body.zoom = ZOOM_OUT;
        }
    } else {
        let te = Easing::CosineInOut.apply(progress(
            elapsed - RESET_OPEN_MS - RESET_ROTATE_MS,
            RESET_RETURN_MS,
        ));
        for ((body, end), queued) in bodies.iter_mut().zip(&reset.sweep_end).zip(&reset.queue) {
            body.position = lerp_vec3(*end, *queued, te);
            body.zoom = ZOOM_OUT;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::UniverseConfig;
    use crate::core::registry::BodyRegistry;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn setup() -> (BodyRegistry, MobilePhaseController, ChaCha8Rng) {
        let registry = BodyRegistry::from_config(&UniverseConfig::default());
        let controller = MobilePhaseController::new(registry.len());
        (registry, controller, ChaCha8Rng::seed_from_u64(7))
    }

    #[test]
    fn queue_with_three_on_the_left() {
        let order = [4, 0, 6, 1, 2, 3, 5];
        let queue = QueueLayout::build(3, &order);
        let left: Vec<Vec3> = order[..3].iter().map(|&i| queue.positions[i]).collect();
        let right: Vec<Vec3> = order[3..].iter().map(|&i| queue.positions[i]).collect();

        assert!(left.iter().all(|p| p.x == -5.0));
        assert!(right.iter().all(|p| p.x == 5.0));
        for pair in left.windows(2) {
            assert!((pair[0].y - pair[1].y - 3.5).abs() < 1e-5);
        }
        for pair in right.windows(2) {
            assert!((pair[0].y - pair[1].y - 2.5).abs() < 1e-5);
        }
        // Columns are centered on the same height.
        assert!((left[0].y - (6.0 - 3.5 + 3.5)).abs() < 1e-5);
        assert!((right[0].y - (6.0 - 3.75 + 3.5)).abs() < 1e-5);
    }

    #[test]
    fn random_queue_splits_three_four() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..20 {
            let queue = QueueLayout::random(7, &mut rng);
            assert!(queue.left.len() == 3 || queue.left.len() == 4);
            let lefts = queue.positions.iter().filter(|p| p.x < 0.0).count();
            assert_eq!(lefts, queue.left.len());
        }
    }

    #[test]
    fn intro_runs_line_then_ciranda_then_idle() {
        let (mut reg, mut ctl, mut rng) = setup();
        let mut logo = Logo::new();
        ctl.start_intro(reg.bodies(), 0.0, &mut rng);
        assert!(matches!(ctl.phase, MobilePhase::Line(_)));
        assert!(ctl.is_animating());

        ctl.step(reg.bodies_mut(), &mut logo, 1000.0, false);
        assert!(matches!(ctl.phase, MobilePhase::Line(_)));
        ctl.step(reg.bodies_mut(), &mut logo, 2000.0, false);
        assert!(matches!(ctl.phase, MobilePhase::Ciranda(_)));

        // Line end leaves everyone at the queue.
        assert!(reg.iter().all(|b| (b.position.x.abs() - 5.0).abs() < 1e-4));

        ctl.step(reg.bodies_mut(), &mut logo, 3000.0, false);
        let zoom = reg.bodies()[0].zoom;
        assert!(zoom > ZOOM_OUT && zoom < ZOOM_REST);
        ctl.step(reg.bodies_mut(), &mut logo, 4000.0, false);
        assert_eq!(ctl.phase, MobilePhase::Idle);
        assert!(reg.iter().all(|b| b.zoom == ZOOM_REST));
    }

    #[test]
    fn idle_places_bodies_on_the_circle() {
        let (mut reg, mut ctl, _) = setup();
        let mut logo = Logo::new();
        ctl.step(reg.bodies_mut(), &mut logo, 0.0, false);
        for body in reg.iter() {
            let r = (body.position - Vec3::new(0.0, MOBILE_Y_OFFSET, 0.0)).length();
            assert!((r - CIRANDA_RADIUS).abs() < 1e-4);
        }
        assert!((ctl.ciranda_angle - CIRANDA_SPEED).abs() < 1e-7);
    }

    #[test]
    fn idle_angle_stays_wrapped() {
        let (mut reg, mut ctl, _) = setup();
        let mut logo = Logo::new();
        ctl.ciranda_angle = TAU - 0.001;
        ctl.step(reg.bodies_mut(), &mut logo, 0.0, false);
        assert!((0.0..TAU).contains(&ctl.ciranda_angle));
        assert!(ctl.ciranda_angle < 0.01);
    }

    #[test]
    fn open_panel_pauses_idle() {
        let (mut reg, mut ctl, _) = setup();
        let mut logo = Logo::new();
        ctl.step(reg.bodies_mut(), &mut logo, 0.0, true);
        assert!(ctl.paused);
        assert_eq!(ctl.ciranda_angle, 0.0);
        ctl.resume();
        assert!(!ctl.paused);
    }

    #[test]
    fn reset_reaches_ciranda_after_exactly_five_seconds() {
        let (mut reg, mut ctl, mut rng) = setup();
        let mut logo = Logo::new();
        logo.rotation.z = 3.0;
        ctl.place_on_circle(reg.bodies_mut());
        ctl.start_reset(reg.bodies(), &logo, 1000.0, &mut rng);

        let mut now = 1000.0;
        while now < 1000.0 + RESET_TOTAL_MS - 1.0 {
            ctl.step(reg.bodies_mut(), &mut logo, now, false);
            assert!(matches!(ctl.phase, MobilePhase::Reset(_)), "left reset early at {now}");
            now += 100.0;
        }
        ctl.step(reg.bodies_mut(), &mut logo, 1000.0 + RESET_TOTAL_MS - 1.0, false);
        assert!(matches!(ctl.phase, MobilePhase::Reset(_)));

        ctl.step(reg.bodies_mut(), &mut logo, 1000.0 + RESET_TOTAL_MS, false);
        assert!(matches!(ctl.phase, MobilePhase::Ciranda(_)));
        assert_eq!(ctl.ciranda_angle, 0.0);
        assert_eq!(logo.rotation, logo.initial_rotation);
        assert!(reg.iter().all(|b| b.position.x.abs() == 5.0));
    }

    #[test]
    fn reset_opens_to_the_expanded_radius() {
        let (mut reg, mut ctl, mut rng) = setup();
        let mut logo = Logo::new();
        ctl.place_on_circle(reg.bodies_mut());
        ctl.start_reset(reg.bodies(), &logo, 0.0, &mut rng);
        // Middle of the sweep: every body on the wide circle, zoomed out.
        ctl.step(reg.bodies_mut(), &mut logo, RESET_OPEN_MS + 1000.0, false);
        for body in reg.iter() {
            let r = (body.position - Vec3::new(0.0, MOBILE_Y_OFFSET, 0.0)).length();
            assert!((r - EXPANDED_RADIUS).abs() < 1e-3);
            assert_eq!(body.zoom, ZOOM_OUT);
        }
    }

    #[test]
    fn sweep_end_matches_start_angle() {
        let (mut reg, mut ctl, mut rng) = setup();
        let logo = Logo::new();
        ctl.place_on_circle(reg.bodies_mut());
        ctl.start_reset(reg.bodies(), &logo, 0.0, &mut rng);
        let MobilePhase::Reset(reset) = &ctl.phase else {
            panic!("expected reset");
        };
        for (end, &angle) in reset.sweep_end.iter().zip(&reset.start_angles) {
            let expected = polar(angle, EXPANDED_RADIUS, MOBILE_Y_OFFSET);
            assert!((*end - expected).length() < 1e-3);
        }
    }
}
