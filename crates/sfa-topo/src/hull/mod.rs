//! Convex hulls: Melkman (simple polylines), Graham scan (point sets) and a
//! randomized incremental 3D hull.
//!
//! Purpose
//! - Reduce a geometry to its convex hull in the lowest dimension that holds
//!   it: nothing, a point, a segment, a planar polygon, or a closed TIN.
//!
//! Conventions
//! - 2D hulls are closed counter-clockwise rings with z set to 0.
//! - Input points closer than eps to an already kept point are dropped
//!   before any orientation test runs.
//!
//! References
//! - Melkman, "On-line construction of the convex hull of a simple polyline" (1987).
//! - O'Rourke, "Computational Geometry in C", ch. 4 (incremental 3D hull).
//! - Code cross-refs: `predicates::{is_left, cross_product_sign, volume_sign}`

mod graham;
mod hull3d;
mod melkman;

pub use graham::{graham_hull, graham_hull_geometry};
pub use hull3d::{convex_hull_3d, convex_hull_3d_seeded};
pub use melkman::melkman_hull;

use crate::geometry::Coord;

/// Drop every point within `eps` of an earlier kept point.
///
/// Output is sorted by x, then y; a sweep over x keeps the proximity check
/// local.
pub(crate) fn snap_points(points: &[Coord], eps: f64, three_d: bool) -> Vec<Coord> {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    let mut kept: Vec<Coord> = Vec::with_capacity(sorted.len());
    for p in sorted {
        let near = kept.iter().rev().take_while(|k| p.x - k.x <= eps).any(|k| {
            let d = p - *k;
            let d2 = d.length2_2d() + if three_d { d.z * d.z } else { 0.0 };
            d2 <= eps * eps
        });
        if !near {
            kept.push(p);
        }
    }
    kept
}

#[cfg(test)]
mod tests;
