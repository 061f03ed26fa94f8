//! Ring math: signed area, orientation, centroid, point-in-ring.
//!
//! Rings are closed vertex chains. Area is positive for counter-clockwise rings.

use super::{Coord, Geometry, LineString, Polygon};
use crate::cfg::SFA_EPSILON;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Clockwise,
    CounterClockwise,
    Unknown,
}

/// Shoelace area, positive for CCW. Open chains have no area.
pub fn ring_signed_area(ring: &[Coord]) -> f64 {
    match (ring.first(), ring.last()) {
        (Some(a), Some(b)) if ring.len() > 1 && a.equals_2d(b, SFA_EPSILON) => {}
        _ => return 0.0,
    }
    let mut area = 0.0;
    for w in ring.windows(2) {
        area += (w[0].x + w[1].x) * (w[0].y - w[1].y);
    }
    -area * 0.5
}

/// Shell area plus the (negative, for CW holes) signed areas of the holes.
pub fn polygon_area(p: &Polygon) -> f64 {
    p.rings().map(|r| ring_signed_area(r.points())).sum()
}

/// Sum of the absolute polygon areas of every areal member.
pub fn geometry_area(g: &Geometry) -> f64 {
    match g {
        Geometry::Polygon(p) => polygon_area(p).abs(),
        Geometry::MultiPolygon(v) | Geometry::PolyhedralSurface(v) | Geometry::Tin(v) => {
            v.iter().map(|p| polygon_area(p).abs()).sum()
        }
        Geometry::GeometryCollection(v) => v.iter().map(geometry_area).sum(),
        _ => 0.0,
    }
}

pub fn ring_orientation(ring: &[Coord], eps: f64) -> Orientation {
    let area = ring_signed_area(ring);
    if area < -eps {
        Orientation::Clockwise
    } else if area > eps {
        Orientation::CounterClockwise
    } else {
        Orientation::Unknown
    }
}

/// Area centroid of a closed ring; `None` for a zero-area ring.
pub fn ring_centroid(ring: &[Coord]) -> Option<Coord> {
    let area = ring_signed_area(ring);
    if area == 0.0 {
        return None;
    }
    let (mut x, mut y) = (0.0, 0.0);
    for w in ring.windows(2) {
        let b = w[0].x * w[1].y - w[0].y * w[1].x;
        x += (w[0].x + w[1].x) * b;
        y += (w[0].y + w[1].y) * b;
    }
    Some(Coord::new(x / (6.0 * area), y / (6.0 * area)))
}

/// Copy with a CCW shell and CW holes.
pub fn correct_polygon(p: &Polygon, eps: f64) -> Polygon {
    let mut out = p.clone();
    if out.is_empty() {
        return out;
    }
    if ring_orientation(out.exterior.points(), eps) != Orientation::CounterClockwise {
        out.exterior.reverse();
    }
    for hole in &mut out.interiors {
        if ring_orientation(hole.points(), eps) != Orientation::Clockwise {
            hole.reverse();
        }
    }
    out
}

/// Crossing counts of a horizontal ray through `p`, split by side.
///
/// Returns `None` when `p` lies on the ring (or on a vertex).
fn update_crossings(p: &Coord, ring: &LineString, r: &mut u32, l: &mut u32, eps: f64) -> Option<()> {
    for w in ring.points().windows(2) {
        let (p1, p2) = (&w[0], &w[1]);
        if p.equals_2d(p1, eps) {
            return None;
        }
        let h = p.y;
        // a vertex touching the ray from below straddles right only, from above left only
        let rstrad = (p2.y > h - eps) != (p1.y > h - eps);
        let lstrad = (p2.y < h + eps) != (p1.y < h + eps);
        if rstrad || lstrad {
            let x = ((p2.x - p.x) * (p1.y - h) - (p1.x - p.x) * (p2.y - h)) / (p1.y - p2.y);
            if rstrad && x > eps {
                *r += 1;
            }
            if lstrad && x < -eps {
                *l += 1;
            }
            if x.abs() < eps {
                return None;
            }
        }
    }
    Some(())
}

#[inline]
fn crossings_inside(r: u32, l: u32) -> bool {
    (r % 2) != (l % 2) || r % 2 == 1
}

/// `p` is inside or on the ring.
pub fn point_in_ring(p: &Coord, ring: &LineString, eps: f64) -> bool {
    let (mut r, mut l) = (0, 0);
    match update_crossings(p, ring, &mut r, &mut l, eps) {
        None => true,
        Some(()) => crossings_inside(r, l),
    }
}

/// `p` is inside the shell and outside every hole, or on any ring.
pub fn point_in_polygon(p: &Coord, poly: &Polygon, eps: f64) -> bool {
    if poly.is_empty() {
        return false;
    }
    let (mut r, mut l) = (0, 0);
    for ring in poly.rings() {
        if update_crossings(p, ring, &mut r, &mut l, eps).is_none() {
            return true;
        }
    }
    crossings_inside(r, l)
}
