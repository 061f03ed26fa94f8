//! Graham scan over arbitrary point sets.

use tracing::trace;

use super::snap_points;
use crate::cfg::TopoCfg;
use crate::geometry::{Coord, Geometry, LineString, Polygon};
use crate::predicates::cross_product_sign;

/// Hull vertices of `points` after snapping, z dropped.
///
/// Returns an empty vector, one point, two points (all input collinear), or
/// a closed counter-clockwise ring starting at the lowest, then rightmost
/// point.
pub fn graham_hull(points: &[Coord], cfg: TopoCfg) -> Vec<Coord> {
    let eps = cfg.eps;
    let flat: Vec<Coord> = points.iter().map(|c| c.with_z(0.0)).collect();
    let mut pts = snap_points(&flat, eps, false);
    if pts.len() < 3 {
        return pts;
    }

    let pivot = pts
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.y.total_cmp(&b.y).then(b.x.total_cmp(&a.x)))
        .map(|(i, _)| i)
        .unwrap_or(0);
    let p0 = pts.swap_remove(pivot);
    let angle = |c: &Coord| (c.y - p0.y).atan2(c.x - p0.x);
    pts.sort_by(|a, b| {
        angle(a)
            .total_cmp(&angle(b))
            .then((*a - p0).length2_2d().total_cmp(&(*b - p0).length2_2d()))
    });

    // among points on one ray from the pivot only the farthest survives
    let mut fan: Vec<Coord> = Vec::with_capacity(pts.len());
    for p in pts {
        if let Some(last) = fan.last_mut() {
            if cross_product_sign(&p0, last, &p0, &p, eps) == 0 {
                if (p - p0).length2_2d() > (*last - p0).length2_2d() {
                    *last = p;
                }
                continue;
            }
        }
        fan.push(p);
    }
    if fan.len() < 2 {
        return [p0].into_iter().chain(fan).collect();
    }

    let mut hull = vec![p0, fan[0], fan[1]];
    for p in &fan[2..] {
        while hull.len() >= 2 {
            let n = hull.len();
            if cross_product_sign(&hull[n - 2], &hull[n - 1], &hull[n - 2], p, eps) > 0 {
                break;
            }
            hull.pop();
        }
        hull.push(*p);
    }
    hull.push(p0);
    trace!(input = points.len(), hull = hull.len() - 1, "graham hull");
    hull
}

/// Hull of every vertex of `g`: `None`, a `Point`, a two-point `LineString`
/// or a `Polygon`.
pub fn graham_hull_geometry(g: &Geometry, cfg: TopoCfg) -> Option<Geometry> {
    let mut ring = graham_hull(&g.coords(), cfg);
    match ring.len() {
        0 => None,
        1 => ring.pop().map(Geometry::Point),
        2 => Some(Geometry::LineString(LineString::new(ring))),
        _ => Some(Geometry::Polygon(Polygon::new(LineString::new(ring), Vec::new()))),
    }
}
