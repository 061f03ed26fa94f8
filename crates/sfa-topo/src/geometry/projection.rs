//! Orthonormal 2D basis of a plane in 3D.
//!
//! Purpose
//! - Map coplanar 3D geometry into a 2D frame where the planar engine runs,
//!   and lift results back. The off-plane distance travels in `z`.
//!
//! Frame choice
//! - Axis-aligned normals use the standard axes.
//! - Otherwise `e1` lies in the XY plane and `e2 = n × e1` is flipped so its
//!   z component is non-negative.

use nalgebra::Vector3;

use super::ring::correct_polygon;
use super::{Coord, Geometry, Polygon};
use crate::error::TopoError;
use crate::predicates::is_collinear_3d;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection2D {
    origin: Vector3<f64>,
    normal: Vector3<f64>,
    e1: Vector3<f64>,
    e2: Vector3<f64>,
}

impl Projection2D {
    /// Basis of the plane through three points.
    pub fn from_points(p1: &Coord, p2: &Coord, p3: &Coord, eps: f64) -> Result<Self, TopoError> {
        let n = (p2.v3() - p1.v3()).cross(&(p3.v3() - p1.v3()));
        Self::from_normal(p1, n, eps)
    }

    /// Basis of the plane through `origin` with the given (not necessarily unit) normal.
    pub fn from_normal(origin: &Coord, normal: Vector3<f64>, eps: f64) -> Result<Self, TopoError> {
        let n = normal
            .try_normalize(0.0)
            .ok_or_else(|| TopoError::degenerate("zero plane normal"))?;
        let (e1, e2) = if n.x.abs() < eps && n.y.abs() < eps {
            let e1 = Vector3::x();
            (e1, n.cross(&e1))
        } else if (n.x.abs() < eps && n.z.abs() < eps) || (n.y.abs() < eps && n.z.abs() < eps) {
            let e2 = Vector3::z();
            (e2.cross(&n), e2)
        } else {
            let e1 = Vector3::new(n.y, -n.x, 0.0).normalize();
            let e2 = n.cross(&e1).normalize();
            if e2.z < 0.0 {
                (-e1, -e2)
            } else {
                (e1, e2)
            }
        };
        Ok(Self {
            origin: origin.v3(),
            normal: n,
            e1,
            e2,
        })
    }

    /// Basis from the first non-collinear triple of the exterior ring.
    pub fn from_polygon(poly: &Polygon, eps: f64) -> Result<Self, TopoError> {
        let ring = poly.exterior.points();
        let (p1, p2) = match ring {
            [a, b, ..] => (a, b),
            _ => return Err(TopoError::degenerate("polygon ring has fewer than three points")),
        };
        ring[2..]
            .iter()
            .find(|p| !is_collinear_3d(p1, p2, p, eps))
            .ok_or_else(|| TopoError::degenerate("polygon ring is collinear"))
            .and_then(|p3| Self::from_points(p1, p2, p3, eps))
    }

    #[inline]
    pub fn origin(&self) -> Coord {
        Coord::from_v3(self.origin)
    }

    /// Unit normal.
    #[inline]
    pub fn normal(&self) -> Vector3<f64> {
        self.normal
    }

    /// Signed distance of `p` from the plane.
    #[inline]
    pub fn distance(&self, p: &Coord) -> f64 {
        (p.v3() - self.origin).dot(&self.normal)
    }

    #[inline]
    pub fn contains_point(&self, p: &Coord, eps: f64) -> bool {
        self.distance(p).abs() < eps
    }

    /// Normals are parallel (either sign).
    #[inline]
    pub fn is_parallel(&self, other: &Projection2D, eps: f64) -> bool {
        self.normal.cross(&other.normal).norm() < eps
    }

    /// Parallel and through the same points.
    #[inline]
    pub fn same_plane(&self, other: &Projection2D, eps: f64) -> bool {
        self.is_parallel(other, eps) && self.contains_point(&other.origin(), eps)
    }

    pub fn to_2d(&self, p: &Coord) -> Coord {
        let t = p.v3() - self.origin;
        Coord::new_3d(t.dot(&self.e1), t.dot(&self.e2), t.dot(&self.normal))
    }

    pub fn to_3d(&self, p: &Coord) -> Coord {
        Coord::from_v3(self.origin + self.e1 * p.x + self.e2 * p.y + self.normal * p.z)
    }

    /// Direction vector in plane coordinates (no translation).
    pub fn vector_to_2d(&self, v: &Vector3<f64>) -> Coord {
        Coord::new_3d(v.dot(&self.e1), v.dot(&self.e2), v.dot(&self.normal))
    }

    /// Project every vertex; polygons come out with a CCW shell and CW holes.
    pub fn geometry_to_2d(&self, g: &Geometry, eps: f64) -> Geometry {
        let projected = g.map_coords(&|c| self.to_2d(c));
        correct_polygons(projected, eps)
    }

    pub fn geometry_to_3d(&self, g: &Geometry) -> Geometry {
        g.map_coords(&|c| self.to_3d(c))
    }
}

fn correct_polygons(g: Geometry, eps: f64) -> Geometry {
    let fix = |v: Vec<Polygon>| v.iter().map(|p| correct_polygon(p, eps)).collect::<Vec<_>>();
    match g {
        Geometry::Polygon(p) => Geometry::Polygon(correct_polygon(&p, eps)),
        Geometry::MultiPolygon(v) => Geometry::MultiPolygon(fix(v)),
        Geometry::PolyhedralSurface(v) => Geometry::PolyhedralSurface(fix(v)),
        Geometry::Tin(v) => Geometry::Tin(fix(v)),
        Geometry::GeometryCollection(v) => {
            Geometry::GeometryCollection(v.into_iter().map(|m| correct_polygons(m, eps)).collect())
        }
        other => other,
    }
}
