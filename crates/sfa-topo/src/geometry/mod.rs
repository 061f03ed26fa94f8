//! Plain geometry containers and the capability set the topology engine consumes.
//!
//! Purpose
//! - Store points, line strings, polygons and their collections with `f64`
//!   coordinates (z carried along, ignored by the planar algorithms).
//! - Answer the questions the graph builders ask: dimension, emptiness,
//!   boundary dimension, envelope, vertex access.
//!
//! Serialization
//! - `Geometry` is adjacently tagged: `{"type": "Polygon", "coordinates": {...}}`.
//!
//! References
//! - Code cross-refs: `envelope::Envelope`, `locate::locate`, `ring::correct_polygon`,
//!   `projection::Projection2D`

pub mod envelope;
pub mod locate;
pub mod projection;
pub mod rand;
pub mod ring;

use std::ops::{Add, Mul, Sub};

use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};

pub use envelope::{envelopes_intersect, envelopes_intersect_3d, Envelope};
pub use locate::locate;
pub use projection::Projection2D;
pub use ring::{
    correct_polygon, geometry_area, point_in_polygon, point_in_ring, polygon_area,
    ring_centroid, ring_orientation, ring_signed_area, Orientation,
};

/// One vertex. `z` defaults to 0 when absent from input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Coord {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    #[inline]
    pub const fn new_3d(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn from_v3(v: Vector3<f64>) -> Self {
        Self::new_3d(v.x, v.y, v.z)
    }

    #[inline]
    pub fn v2(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    #[inline]
    pub fn v3(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Planar equality: `dx² + dy² < eps²`.
    #[inline]
    pub fn equals_2d(&self, o: &Coord, eps: f64) -> bool {
        let dx = self.x - o.x;
        let dy = self.y - o.y;
        dx * dx + dy * dy < eps * eps
    }

    #[inline]
    pub fn equals_3d(&self, o: &Coord, eps: f64) -> bool {
        let dx = self.x - o.x;
        let dy = self.y - o.y;
        let dz = self.z - o.z;
        dx * dx + dy * dy + dz * dz < eps * eps
    }

    #[inline]
    pub fn length2_2d(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    #[inline]
    pub fn with_z(self, z: f64) -> Self {
        Self { z, ..self }
    }

    /// Linear interpolation, z included.
    #[inline]
    pub fn lerp(&self, o: &Coord, t: f64) -> Coord {
        Coord::new_3d(
            self.x + (o.x - self.x) * t,
            self.y + (o.y - self.y) * t,
            self.z + (o.z - self.z) * t,
        )
    }
}

impl Add for Coord {
    type Output = Coord;
    #[inline]
    fn add(self, o: Coord) -> Coord {
        Coord::new_3d(self.x + o.x, self.y + o.y, self.z + o.z)
    }
}

impl Sub for Coord {
    type Output = Coord;
    #[inline]
    fn sub(self, o: Coord) -> Coord {
        Coord::new_3d(self.x - o.x, self.y - o.y, self.z - o.z)
    }
}

impl Mul<f64> for Coord {
    type Output = Coord;
    #[inline]
    fn mul(self, s: f64) -> Coord {
        Coord::new_3d(self.x * s, self.y * s, self.z * s)
    }
}

/// Ordered vertex chain. Closed when the first and last vertices coincide.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineString(pub Vec<Coord>);

impl LineString {
    #[inline]
    pub fn new(points: Vec<Coord>) -> Self {
        Self(points)
    }

    pub fn from_xy(points: &[(f64, f64)]) -> Self {
        Self(points.iter().map(|&(x, y)| Coord::new(x, y)).collect())
    }

    #[inline]
    pub fn points(&self) -> &[Coord] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn start(&self) -> Option<&Coord> {
        self.0.first()
    }

    #[inline]
    pub fn end(&self) -> Option<&Coord> {
        self.0.last()
    }

    /// First and last vertices coincide in the plane (and there are at least two).
    pub fn is_closed(&self, eps: f64) -> bool {
        match (self.0.first(), self.0.last()) {
            (Some(a), Some(b)) if self.0.len() > 1 => a.equals_2d(b, eps),
            _ => false,
        }
    }

    pub fn reverse(&mut self) {
        self.0.reverse();
    }
}

/// Shell plus holes. Rings are stored closed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub exterior: LineString,
    #[serde(default)]
    pub interiors: Vec<LineString>,
}

impl Polygon {
    #[inline]
    pub fn new(exterior: LineString, interiors: Vec<LineString>) -> Self {
        Self {
            exterior,
            interiors,
        }
    }

    /// Polygon from an open or closed list of xy pairs; the ring is closed if needed.
    pub fn from_xy(shell: &[(f64, f64)]) -> Self {
        let mut ring = LineString::from_xy(shell);
        close_ring(&mut ring);
        Self::new(ring, Vec::new())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.exterior.is_empty()
    }

    /// Exterior ring first, then holes.
    pub fn rings(&self) -> impl Iterator<Item = &LineString> {
        std::iter::once(&self.exterior).chain(self.interiors.iter())
    }
}

/// Append the first vertex when the ring is not already closed exactly.
pub(crate) fn close_ring(ring: &mut LineString) {
    if let (Some(a), Some(b)) = (ring.0.first().copied(), ring.0.last()) {
        if ring.0.len() > 1 && a != *b {
            ring.0.push(a);
        }
    }
}

/// Any supported geometry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Point(Coord),
    LineString(LineString),
    Polygon(Polygon),
    MultiPoint(Vec<Coord>),
    MultiLineString(Vec<LineString>),
    MultiPolygon(Vec<Polygon>),
    PolyhedralSurface(Vec<Polygon>),
    Tin(Vec<Polygon>),
    GeometryCollection(Vec<Geometry>),
}

impl Geometry {
    /// Kind name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::LineString(_) => "LineString",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPoint(_) => "MultiPoint",
            Geometry::MultiLineString(_) => "MultiLineString",
            Geometry::MultiPolygon(_) => "MultiPolygon",
            Geometry::PolyhedralSurface(_) => "PolyhedralSurface",
            Geometry::Tin(_) => "Tin",
            Geometry::GeometryCollection(_) => "GeometryCollection",
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(_) => false,
            Geometry::LineString(l) => l.is_empty(),
            Geometry::Polygon(p) => p.is_empty(),
            Geometry::MultiPoint(v) => v.is_empty(),
            Geometry::MultiLineString(v) => v.iter().all(LineString::is_empty),
            Geometry::MultiPolygon(v) | Geometry::PolyhedralSurface(v) | Geometry::Tin(v) => {
                v.iter().all(Polygon::is_empty)
            }
            Geometry::GeometryCollection(v) => v.iter().all(Geometry::is_empty),
        }
    }

    /// Topological dimension; `-1` for empty geometries, collections take the max.
    pub fn dimension(&self) -> i32 {
        if self.is_empty() {
            return -1;
        }
        match self {
            Geometry::Point(_) | Geometry::MultiPoint(_) => 0,
            Geometry::LineString(_) | Geometry::MultiLineString(_) => 1,
            Geometry::Polygon(_)
            | Geometry::MultiPolygon(_)
            | Geometry::PolyhedralSurface(_)
            | Geometry::Tin(_) => 2,
            Geometry::GeometryCollection(v) => v.iter().map(Geometry::dimension).max().unwrap_or(-1),
        }
    }

    /// Dimension of the boundary, `None` when the boundary is empty.
    ///
    /// Multi-lines use the Mod-2 rule: endpoints visited an even number of times
    /// are interior, so a set of closed or end-to-end chained lines has none.
    pub fn boundary_dimension(&self, eps: f64) -> Option<i32> {
        if self.is_empty() {
            return None;
        }
        match self {
            Geometry::Point(_) | Geometry::MultiPoint(_) => None,
            Geometry::LineString(l) => (!l.is_closed(eps)).then_some(0),
            Geometry::MultiLineString(v) => {
                let mut ends: Vec<(Coord, usize)> = Vec::new();
                for l in v.iter().filter(|l| !l.is_closed(eps)) {
                    for c in [l.start(), l.end()].into_iter().flatten() {
                        match ends.iter_mut().find(|(e, _)| e.equals_2d(c, eps)) {
                            Some((_, n)) => *n += 1,
                            None => ends.push((*c, 1)),
                        }
                    }
                }
                ends.iter().any(|(_, n)| n % 2 == 1).then_some(0)
            }
            Geometry::Polygon(_)
            | Geometry::MultiPolygon(_)
            | Geometry::PolyhedralSurface(_)
            | Geometry::Tin(_) => Some(1),
            Geometry::GeometryCollection(v) => v.iter().filter_map(|g| g.boundary_dimension(eps)).max(),
        }
    }

    /// Every vertex in storage order (rings include their closing vertex).
    pub fn coords(&self) -> Vec<Coord> {
        let mut out = Vec::new();
        self.collect_coords(&mut out);
        out
    }

    fn collect_coords(&self, out: &mut Vec<Coord>) {
        match self {
            Geometry::Point(c) => out.push(*c),
            Geometry::LineString(l) => out.extend_from_slice(l.points()),
            Geometry::Polygon(p) => p.rings().for_each(|r| out.extend_from_slice(r.points())),
            Geometry::MultiPoint(v) => out.extend_from_slice(v),
            Geometry::MultiLineString(v) => v.iter().for_each(|l| out.extend_from_slice(l.points())),
            Geometry::MultiPolygon(v) | Geometry::PolyhedralSurface(v) | Geometry::Tin(v) => v
                .iter()
                .flat_map(Polygon::rings)
                .for_each(|r| out.extend_from_slice(r.points())),
            Geometry::GeometryCollection(v) => v.iter().for_each(|g| g.collect_coords(out)),
        }
    }

    /// Bounding box, `None` when empty.
    pub fn envelope(&self) -> Option<Envelope> {
        Envelope::from_coords(&self.coords())
    }

    /// Same geometry with every z set to 0.
    pub fn flattened(&self) -> Geometry {
        self.map_coords(&|c| c.with_z(0.0))
    }

    /// Apply `f` to every vertex, keeping the structure.
    pub fn map_coords(&self, f: &dyn Fn(&Coord) -> Coord) -> Geometry {
        let ls = |l: &LineString| LineString(l.0.iter().map(f).collect());
        let poly = |p: &Polygon| Polygon::new(ls(&p.exterior), p.interiors.iter().map(ls).collect());
        match self {
            Geometry::Point(c) => Geometry::Point(f(c)),
            Geometry::LineString(l) => Geometry::LineString(ls(l)),
            Geometry::Polygon(p) => Geometry::Polygon(poly(p)),
            Geometry::MultiPoint(v) => Geometry::MultiPoint(v.iter().map(f).collect()),
            Geometry::MultiLineString(v) => Geometry::MultiLineString(v.iter().map(ls).collect()),
            Geometry::MultiPolygon(v) => Geometry::MultiPolygon(v.iter().map(poly).collect()),
            Geometry::PolyhedralSurface(v) => Geometry::PolyhedralSurface(v.iter().map(poly).collect()),
            Geometry::Tin(v) => Geometry::Tin(v.iter().map(poly).collect()),
            Geometry::GeometryCollection(v) => {
                Geometry::GeometryCollection(v.iter().map(|g| g.map_coords(f)).collect())
            }
        }
    }
}

impl From<Polygon> for Geometry {
    fn from(p: Polygon) -> Self {
        Geometry::Polygon(p)
    }
}

impl From<LineString> for Geometry {
    fn from(l: LineString) -> Self {
        Geometry::LineString(l)
    }
}

impl From<Coord> for Geometry {
    fn from(c: Coord) -> Self {
        Geometry::Point(c)
    }
}

#[cfg(test)]
mod tests;
