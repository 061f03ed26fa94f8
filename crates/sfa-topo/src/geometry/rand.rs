//! Seeded samplers for overlay, relate and hull inputs.
//!
//! Purpose
//! - Property tests and benches need operand pairs whose overlap is known in
//!   advance and point clouds with a known hull shape.
//!
//! Model
//! - `draw_star` places one vertex per angular sector, at a uniform angle
//!   inside the middle of the sector and a radius in `[r(1-s), r]`. Strictly
//!   increasing angles keep the ring simple and counter-clockwise.
//! - `draw_overlay_pair` draws two stars of equal radius whose centres are
//!   `2r(1-overlap)` apart along a random direction.
//! - A `ReplayToken { seed, index }` names one draw; the same token always
//!   yields the same geometry.

use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{close_ring, Coord, LineString, Polygon};

/// Addresses one reproducible draw inside a seeded stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    fn rng(self) -> StdRng {
        let mut seed = [0u8; 32];
        seed[..8].copy_from_slice(&self.seed.to_le_bytes());
        seed[8..16].copy_from_slice(&self.index.to_le_bytes());
        seed[16..24].copy_from_slice(b"sfa-topo");
        StdRng::from_seed(seed)
    }
}

/// Star-shaped operand.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarShape {
    pub vertices: usize,
    pub radius: f64,
    /// Inner radius fraction removed at random, in `[0, 0.9]`; 0 gives a convex polygon.
    pub spikiness: f64,
    pub center: Coord,
}

impl StarShape {
    pub fn new(vertices: usize, radius: f64) -> Self {
        Self {
            vertices,
            radius,
            spikiness: 0.5,
            center: Coord::new(0.0, 0.0),
        }
    }
}

/// Simple CCW polygon, star-shaped around `shape.center`, closed.
pub fn draw_star(shape: StarShape, tok: ReplayToken) -> Polygon {
    draw_star_with(shape, &mut tok.rng())
}

fn draw_star_with(shape: StarShape, rng: &mut StdRng) -> Polygon {
    let n = shape.vertices.max(3);
    let sector = TAU / n as f64;
    let inner = 1.0 - shape.spikiness.clamp(0.0, 0.9);
    let r = shape.radius.abs().max(1e-6);
    let pts = (0..n)
        .map(|k| {
            let th = (k as f64 + rng.gen_range(0.1..0.9)) * sector;
            let rk = r * rng.gen_range(inner..=1.0);
            Coord::new(shape.center.x + rk * th.cos(), shape.center.y + rk * th.sin())
        })
        .collect();
    let mut ring = LineString::new(pts);
    close_ring(&mut ring);
    Polygon::new(ring, Vec::new())
}

/// Two stars of `shape` whose centres sit `2r(1-overlap)` apart; `overlap = 1`
/// stacks them, `overlap = 0` lets them touch at most.
pub fn draw_overlay_pair(shape: StarShape, overlap: f64, tok: ReplayToken) -> (Polygon, Polygon) {
    let mut rng = tok.rng();
    let a = draw_star_with(shape, &mut rng);
    let dir = rng.gen_range(0.0..TAU);
    let d = 2.0 * shape.radius.abs() * (1.0 - overlap.clamp(0.0, 1.0));
    let moved = StarShape {
        center: Coord::new(shape.center.x + d * dir.cos(), shape.center.y + d * dir.sin()),
        ..shape
    };
    let b = draw_star_with(moved, &mut rng);
    (a, b)
}

/// `n` points uniform in the square `[-h, h]²` (z = 0).
pub fn draw_points(n: usize, half_extent: f64, tok: ReplayToken) -> Vec<Coord> {
    let mut rng = tok.rng();
    let h = half_extent.abs();
    (0..n)
        .map(|_| Coord::new(rng.gen_range(-h..=h), rng.gen_range(-h..=h)))
        .collect()
}

/// `n` points uniform in the cube `[-h, h]³`.
pub fn draw_points_3d(n: usize, half_extent: f64, tok: ReplayToken) -> Vec<Coord> {
    let mut rng = tok.rng();
    let h = half_extent.abs();
    (0..n)
        .map(|_| Coord::new_3d(rng.gen_range(-h..=h), rng.gen_range(-h..=h), rng.gen_range(-h..=h)))
        .collect()
}

/// `n` points on the sphere of radius `r`; in general position every one is a hull vertex.
pub fn draw_sphere_points(n: usize, r: f64, tok: ReplayToken) -> Vec<Coord> {
    let mut rng = tok.rng();
    (0..n)
        .map(|_| {
            let z: f64 = rng.gen_range(-1.0..=1.0);
            let th = rng.gen_range(0.0..TAU);
            let s = (1.0 - z * z).sqrt();
            Coord::new_3d(r * s * th.cos(), r * s * th.sin(), r * z)
        })
        .collect()
}
