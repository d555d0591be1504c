// systems/tunnel.rs
//
// Hyperspace star tunnel shown behind the loading overlay.
// Stars stream toward the camera down a cylinder and respawn at the far end.

use std::f32::consts::TAU;

use bytemuck::{Pod, Zeroable};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub const TUNNEL_MIN_R: f32 = 2.0;
pub const TUNNEL_MAX_R: f32 = 10.0;
pub const TUNNEL_DEPTH: f32 = 420.0;
/// Base z advance per frame.
pub const HYPER_SPEED: f32 = 3.2;
pub const SPIRAL_SPEED: f32 = 0.002;
/// Stars past this z respawn at the far end.
pub const RESPAWN_Z: f32 = 8.0;
pub const RESPAWN_SPREAD: f32 = 120.0;
/// Star count on low-power devices.
pub const LOW_POWER_STARS: usize = 800;

/// Star tint, written as its index into the page-side palette:
/// white, blue (0.2, 0.6, 1.0), purple (0.8, 0.2, 1.0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarColor {
    White = 0,
    Blue = 1,
    Purple = 2,
}

impl StarColor {
    /// 60% white, 20% blue, 20% purple.
    fn pick(roll: f32) -> Self {
        if roll < 0.6 {
            StarColor::White
        } else if roll < 0.8 {
            StarColor::Blue
        } else {
            StarColor::Purple
        }
    }
}

/// One star on the wire: position plus palette index (4 floats).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct TunnelStar {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub color: f32,
}

impl TunnelStar {
    pub const FLOATS: usize = 4;
}

pub struct StarTunnel {
    stars: Vec<TunnelStar>,
    speed_scale: Vec<f32>,
    /// Rotation of the whole tunnel around Z.
    pub spiral: f32,
    rng: ChaCha8Rng,
}

/// Random point on the tunnel's cross-section, biased toward the rim.
fn cross_section(rng: &mut impl Rng) -> (f32, f32) {
    let r = rng.random::<f32>().sqrt() * (TUNNEL_MAX_R - TUNNEL_MIN_R) + TUNNEL_MIN_R;
    let a = rng.random::<f32>() * TAU;
    (a.cos() * r, a.sin() * r)
}

fn speed_scale(rng: &mut impl Rng) -> f32 {
    0.7 + rng.random::<f32>() * 0.6
}

impl StarTunnel {
    pub fn new(count: usize, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut stars = Vec::with_capacity(count);
        let mut speeds = Vec::with_capacity(count);
        for _ in 0..count {
            let (x, y) = cross_section(&mut rng);
            let z = -rng.random::<f32>() * TUNNEL_DEPTH - 5.0;
            speeds.push(speed_scale(&mut rng));
            let color = StarColor::pick(rng.random::<f32>());
            stars.push(TunnelStar {
                x,
                y,
                z,
                color: color as u8 as f32,
            });
        }
        Self {
            stars,
            speed_scale: speeds,
            spiral: 0.0,
            rng,
        }
    }

    /// Advance one frame.
    pub fn step(&mut self) {
        for (star, speed) in self.stars.iter_mut().zip(self.speed_scale.iter_mut()) {
            star.z += HYPER_SPEED * *speed;
            if star.z > RESPAWN_Z {
                star.z = -TUNNEL_DEPTH - self.rng.random::<f32>() * RESPAWN_SPREAD;
                let (x, y) = cross_section(&mut self.rng);
                star.x = x;
                star.y = y;
                *speed = speed_scale(&mut self.rng);
            }
        }
        self.spiral += SPIRAL_SPEED;
    }

    pub fn stars(&self) -> &[TunnelStar] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_is_4_floats() {
        assert_eq!(std::mem::size_of::<TunnelStar>(), TunnelStar::FLOATS * 4);
    }

    #[test]
    fn stars_start_inside_the_tunnel() {
        let tunnel = StarTunnel::new(500, 1);
        assert_eq!(tunnel.len(), 500);
        for star in tunnel.stars() {
            let r = (star.x * star.x + star.y * star.y).sqrt();
            assert!(r >= TUNNEL_MIN_R - 1e-4 && r <= TUNNEL_MAX_R + 1e-4);
            assert!(star.z <= -5.0 && star.z >= -TUNNEL_DEPTH - 5.0);
        }
    }

    #[test]
    fn stars_stay_bounded_while_streaming() {
        let mut tunnel = StarTunnel::new(200, 2);
        for _ in 0..400 {
            tunnel.step();
        }
        for star in tunnel.stars() {
            assert!(star.z <= RESPAWN_Z);
            assert!(star.z >= -TUNNEL_DEPTH - RESPAWN_SPREAD - 5.0);
        }
        assert!((tunnel.spiral - 400.0 * SPIRAL_SPEED).abs() < 1e-4);
    }

    #[test]
    fn palette_is_mostly_white() {
        let tunnel = StarTunnel::new(2000, 3);
        let white = tunnel.stars().iter().filter(|s| s.color == 0.0).count();
        let share = white as f32 / 2000.0;
        assert!(share > 0.5 && share < 0.7, "white share {share}");
    }

    #[test]
    fn same_seed_same_tunnel() {
        let a = StarTunnel::new(50, 9);
        let b = StarTunnel::new(50, 9);
        assert_eq!(a.stars(), b.stars());
    }
}
