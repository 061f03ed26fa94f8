//! Axis-aligned bounding boxes and the epsilon-expanded overlap test.

use super::{Coord, Geometry};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Envelope {
    pub min: Coord,
    pub max: Coord,
}

impl Envelope {
    /// Box around `coords`, `None` for an empty slice.
    pub fn from_coords(coords: &[Coord]) -> Option<Self> {
        let first = *coords.first()?;
        let mut env = Envelope {
            min: first,
            max: first,
        };
        for c in &coords[1..] {
            env.expand_to(c);
        }
        Some(env)
    }

    #[inline]
    pub fn expand_to(&mut self, c: &Coord) {
        self.min.x = self.min.x.min(c.x);
        self.min.y = self.min.y.min(c.y);
        self.min.z = self.min.z.min(c.z);
        self.max.x = self.max.x.max(c.x);
        self.max.y = self.max.y.max(c.y);
        self.max.z = self.max.z.max(c.z);
    }

    /// Planar overlap with both boxes grown by `eps`.
    #[inline]
    pub fn intersects(&self, o: &Envelope, eps: f64) -> bool {
        !(self.min.x > o.max.x + eps
            || self.min.y > o.max.y + eps
            || self.max.x < o.min.x - eps
            || self.max.y < o.min.y - eps)
    }

    #[inline]
    pub fn intersects_3d(&self, o: &Envelope, eps: f64) -> bool {
        self.intersects(o, eps) && !(self.min.z > o.max.z + eps || self.max.z < o.min.z - eps)
    }

    #[inline]
    pub fn contains_2d(&self, c: &Coord, eps: f64) -> bool {
        !(c.x < self.min.x - eps
            || c.x > self.max.x + eps
            || c.y < self.min.y - eps
            || c.y > self.max.y + eps)
    }
}

/// Bounding-box overlap of two geometries; false when either is empty.
pub fn envelopes_intersect(a: &Geometry, b: &Geometry, eps: f64) -> bool {
    match (a.envelope(), b.envelope()) {
        (Some(ea), Some(eb)) => ea.intersects(&eb, eps),
        _ => false,
    }
}

/// 3D variant of [`envelopes_intersect`].
pub fn envelopes_intersect_3d(a: &Geometry, b: &Geometry, eps: f64) -> bool {
    match (a.envelope(), b.envelope()) {
        (Some(ea), Some(eb)) => ea.intersects_3d(&eb, eps),
        _ => false,
    }
}
