//! Epsilon-tolerant orientation and incidence predicates.
//!
//! Every numerical decision of the engine goes through these functions with an
//! explicit tolerance, so the policy can be audited and tested in one place.
//!
//! Conventions
//! - "Left" means counter-clockwise of the directed line `p1 → p2`.
//! - Parameters along a segment are normalized: 0 at `p1`, 1 at `p2`.

use crate::geometry::Coord;

/// Where a point lies relative to the directed segment `p1 → p2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointLineLocation {
    Left,
    Right,
    /// Collinear, before `p1`.
    Before,
    /// Collinear, after `p2`.
    After,
    /// Collinear, strictly inside the segment.
    Between,
    EqualsP1,
    EqualsP2,
    /// Off the supporting line (3D test only).
    Disjoint,
    /// Degenerate segment.
    Unknown,
}

#[inline]
fn classify_param(t: f64, eps: f64) -> PointLineLocation {
    if t < -eps {
        PointLineLocation::Before
    } else if t > 1.0 + eps {
        PointLineLocation::After
    } else if t > eps && t < 1.0 - eps {
        PointLineLocation::Between
    } else if t < eps {
        PointLineLocation::EqualsP1
    } else {
        PointLineLocation::EqualsP2
    }
}

/// Planar location of `p` relative to `p1 → p2`.
///
/// The signed distance to the line decides left/right; collinear points are
/// then placed along the segment by their normalized parameter.
pub fn point_line_location(p1: &Coord, p2: &Coord, p: &Coord, eps: f64) -> PointLineLocation {
    let nx = p2.x - p1.x;
    let ny = p2.y - p1.y;
    let rx = p.x - p1.x;
    let ry = p.y - p1.y;
    let len = (nx * nx + ny * ny).sqrt();
    if len == 0.0 {
        return PointLineLocation::Unknown;
    }
    let d = (rx * ny - ry * nx) / len;
    if d < -eps {
        return PointLineLocation::Left;
    }
    if d > eps {
        return PointLineLocation::Right;
    }
    let t = (rx * nx + ry * ny) / (len * len);
    classify_param(t, eps)
}

/// 3D location of `p` relative to `p1 → p2`; off-line points are `Disjoint`.
pub fn point_line_location_3d(p1: &Coord, p2: &Coord, p: &Coord, eps: f64) -> PointLineLocation {
    let n = p2.v3() - p1.v3();
    let r = p.v3() - p1.v3();
    let len = n.norm();
    if len == 0.0 {
        return PointLineLocation::Unknown;
    }
    if r.cross(&n).norm() / len > eps {
        return PointLineLocation::Disjoint;
    }
    classify_param(r.dot(&n) / (len * len), eps)
}

/// `p` lies on the supporting line of `p1 p2` (a degenerate segment counts as collinear).
#[inline]
pub fn is_collinear(p1: &Coord, p2: &Coord, p: &Coord, eps: f64) -> bool {
    !matches!(
        point_line_location(p1, p2, p, eps),
        PointLineLocation::Left | PointLineLocation::Right
    )
}

#[inline]
pub fn is_collinear_3d(p1: &Coord, p2: &Coord, p: &Coord, eps: f64) -> bool {
    point_line_location_3d(p1, p2, p, eps) != PointLineLocation::Disjoint
}

/// `p` lies inside the eps-expanded bounding box of `p1 p2`.
#[inline]
pub fn is_between(p1: &Coord, p2: &Coord, p: &Coord, eps: f64) -> bool {
    !(p.x > p1.x.max(p2.x) + eps
        || p.x < p1.x.min(p2.x) - eps
        || p.y > p1.y.max(p2.y) + eps
        || p.y < p1.y.min(p2.y) - eps)
}

#[inline]
pub fn is_between_3d(p1: &Coord, p2: &Coord, p: &Coord, eps: f64) -> bool {
    is_between(p1, p2, p, eps) && !(p.z > p1.z.max(p2.z) + eps || p.z < p1.z.min(p2.z) - eps)
}

/// Collinear and strictly inside the segment, endpoints excluded.
#[inline]
pub fn is_strictly_between(p1: &Coord, p2: &Coord, p: &Coord, eps: f64) -> bool {
    point_line_location(p1, p2, p, eps) == PointLineLocation::Between
}

/// `p` lies on the closed segment `p1 p2`.
#[inline]
pub fn is_on_segment(p1: &Coord, p2: &Coord, p: &Coord, eps: f64) -> bool {
    is_collinear(p1, p2, p, eps) && is_between(p1, p2, p, eps)
}

/// Sign of the cross product of `p1 → p2` with `p3 → p4`.
///
/// `p3 → p4` is translated to start at `p1`, and the longer of the two vectors
/// serves as the reference line so the distance test runs against the better
/// conditioned direction. Returns 1, -1 or 0 (parallel within eps).
pub fn cross_product_sign(p1: &Coord, p2: &Coord, p3: &Coord, p4: &Coord, eps: f64) -> i32 {
    let p = *p4 + (*p1 - *p3);
    if (*p2 - *p1).length2_2d() > (p - *p1).length2_2d() {
        match point_line_location(p1, p2, &p, eps) {
            PointLineLocation::Left => 1,
            PointLineLocation::Right => -1,
            _ => 0,
        }
    } else {
        match point_line_location(p1, &p, p2, eps) {
            PointLineLocation::Left => -1,
            PointLineLocation::Right => 1,
            _ => 0,
        }
    }
}

/// Twice the signed area of triangle `a b c` (positive when counter-clockwise).
#[inline]
pub fn orient2d(a: &Coord, b: &Coord, c: &Coord) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)
}

/// Orientation of `c` against `a → b` on the raw cross product: 1 left, -1 right, 0 within eps.
#[inline]
pub fn is_left(a: &Coord, b: &Coord, c: &Coord, eps: f64) -> i32 {
    let v = orient2d(a, b, c);
    if v < -eps {
        -1
    } else if v > eps {
        1
    } else {
        0
    }
}

/// Sign of the tetrahedron volume `(a - d) · ((b - d) × (c - d))` with a tolerance
/// scaled by the magnitude of the terms. Negative when `d` sees the face `a b c`
/// from its front (counter-clockwise) side.
pub fn volume_sign(a: &Coord, b: &Coord, c: &Coord, d: &Coord, eps: f64) -> i32 {
    let (ax, ay, az) = (a.x - d.x, a.y - d.y, a.z - d.z);
    let (bx, by, bz) = (b.x - d.x, b.y - d.y, b.z - d.z);
    let (cx, cy, cz) = (c.x - d.x, c.y - d.y, c.z - d.z);
    let t1 = ax * (by * cz - bz * cy);
    let t2 = ay * (bz * cx - bx * cz);
    let t3 = az * (bx * cy - by * cx);
    let vol = t1 + t2 + t3;
    let scale = t1.abs() + t2.abs() + t3.abs();
    let tol = eps * scale.max(1.0);
    if vol > tol {
        1
    } else if vol < -tol {
        -1
    } else {
        0
    }
}
