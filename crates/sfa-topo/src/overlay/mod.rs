//! Boolean set operations (intersection, union, difference, symmetric difference).
//!
//! Purpose
//! - Select the labelled ends that bound the result, link them into minimal
//!   rings, and assemble polygons, lines and points.
//!
//! Pipeline
//! - Empty operands and disjoint envelopes are answered without graphs.
//! - Otherwise the shared labelling pipeline runs once per `Overlay`; later
//!   calls with other operators reuse the labelled graph and only reset the
//!   per-operator flags on the ends.
//! - Area ends are kept when the result lies on their left and not on their
//!   sym's left; line ends when the result holds the edge but neither side;
//!   points when no kept edge covers them.
//!
//! Errors
//! - A ring walk that revisits an end is closed by force. `compute_overlay`
//!   reports that as `None` plus `processing_error()`; `try_compute_overlay`
//!   reports it as `Err(TopoError::RingLinkage)`.
//!
//! Code cross-refs: `operation::GraphOperation`, `group::EdgeGroup::link_edges`

mod rings;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cfg::TopoCfg;
use crate::error::TopoError;
use crate::geometry::locate::intersects_point;
use crate::geometry::{envelopes_intersect, Coord, Geometry, LineString};
use crate::graph::EndId;
use crate::group::EdgeGroupBuilder;
use crate::label::{Label, Location};
use crate::operation::GraphOperation;

/// Boolean operator applied by [`Overlay::compute_overlay`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayOp {
    Intersection,
    Union,
    Difference,
    SymDifference,
}

impl OverlayOp {
    pub const ALL: [OverlayOp; 4] = [
        OverlayOp::Intersection,
        OverlayOp::Union,
        OverlayOp::Difference,
        OverlayOp::SymDifference,
    ];

    /// Whether a set with these locations in A and B is part of the result.
    /// Boundary counts as interior.
    pub fn admits(self, a: Location, b: Location) -> bool {
        let inside = |l: Location| matches!(l, Location::Interior | Location::Boundary);
        let (a, b) = (inside(a), inside(b));
        match self {
            OverlayOp::Intersection => a && b,
            OverlayOp::Union => a || b,
            OverlayOp::Difference => a && !b,
            OverlayOp::SymDifference => a != b,
        }
    }

    #[inline]
    pub fn admits_label(self, l: &Label) -> bool {
        self.admits(l.loc[0], l.loc[1])
    }
}

/// Overlay of one operand pair; reusable across operators.
#[derive(Clone, Debug)]
pub struct Overlay {
    op: GraphOperation,
    builder: Option<EdgeGroupBuilder>,
    processing_error: bool,
}

impl Overlay {
    pub fn new(a: Geometry, b: Geometry) -> Self {
        Self::with_cfg(a, b, TopoCfg::default())
    }

    pub fn with_cfg(a: Geometry, b: Geometry, cfg: TopoCfg) -> Self {
        Self::from_operation(GraphOperation::new(a, b, cfg))
    }

    /// Overlay over prepared graphs (plane stitching adds edges before this).
    pub fn from_operation(op: GraphOperation) -> Self {
        Self {
            op,
            builder: None,
            processing_error: false,
        }
    }

    /// Keep input z values on output vertices. Must be set before the first
    /// computation.
    pub fn set_save_z(&mut self, on: bool) {
        self.op.save_z = on;
    }

    /// Set when the last computation had to close a ring by force.
    #[inline]
    pub fn processing_error(&self) -> bool {
        self.processing_error
    }

    /// Result of `op`, or `None` when empty or when the ring walk failed.
    pub fn compute_overlay(&mut self, op: OverlayOp) -> Option<Geometry> {
        self.try_compute_overlay(op).ok().flatten()
    }

    pub fn try_compute_overlay(&mut self, op: OverlayOp) -> Result<Option<Geometry>, TopoError> {
        self.processing_error = false;
        let eps = self.op.cfg.eps;
        let has_a = !self.op.geometry(0).is_empty();
        let has_b = !self.op.geometry(1).is_empty();
        if !(has_a && has_b) {
            return Ok(self.handle_empty(op, has_a, has_b));
        }
        if !envelopes_intersect(self.op.geometry(0), self.op.geometry(1), eps) {
            return Ok(self.handle_disjoint(op));
        }

        let builder = match self.builder.take() {
            Some(b) => {
                self.reset_ends();
                b
            }
            None => self.op.label(),
        };
        let area = self.gather_area_ends(op);
        builder.link_ends(&mut self.op.graph);
        self.builder = Some(builder);
        let lines = self.gather_line_ends(op);
        let points = self.gather_points(op);
        let rings = self.minimal_rings(&area);
        if self.processing_error {
            return Err(TopoError::RingLinkage);
        }
        let polygons = rings::construct_polygons(rings, eps);
        debug!(
            ?op,
            area_ends = area.len(),
            line_ends = lines.len(),
            points = points.len(),
            polygons = polygons.len(),
            "overlay assembled"
        );

        let mut parts: Vec<Geometry> = polygons.into_iter().map(Geometry::Polygon).collect();
        parts.extend(lines.iter().map(|&e| Geometry::LineString(self.line_of(e))));
        for c in points {
            let covered = intersects_point(&c, &Geometry::GeometryCollection(parts.clone()), eps);
            if !covered {
                parts.push(Geometry::Point(c));
            }
        }
        Ok(match parts.len() {
            0 => None,
            1 => parts.pop(),
            _ => Some(Geometry::GeometryCollection(parts)),
        })
    }

    fn handle_empty(&self, op: OverlayOp, has_a: bool, has_b: bool) -> Option<Geometry> {
        let (a, b) = (self.op.geometry(0), self.op.geometry(1));
        match op {
            OverlayOp::Intersection => None,
            OverlayOp::Difference => has_a.then(|| a.clone()),
            OverlayOp::Union | OverlayOp::SymDifference => {
                if has_a {
                    Some(a.clone())
                } else if has_b {
                    Some(b.clone())
                } else {
                    None
                }
            }
        }
    }

    fn handle_disjoint(&self, op: OverlayOp) -> Option<Geometry> {
        let (a, b) = (self.op.geometry(0), self.op.geometry(1));
        match op {
            OverlayOp::Intersection => None,
            OverlayOp::Difference => Some(a.clone()),
            OverlayOp::Union | OverlayOp::SymDifference => {
                Some(Geometry::GeometryCollection(vec![a.clone(), b.clone()]))
            }
        }
    }

    fn reset_ends(&mut self) {
        for &e in &self.op.ends {
            let end = self.op.graph.end_mut(e);
            end.in_result = false;
            end.next = None;
            end.visited = false;
        }
    }

    fn is_duplicate(&self, e: EndId, kept: &[EndId]) -> bool {
        kept.iter().any(|&k| self.op.graph.ends_equal(e, k))
    }

    fn gather_area_ends(&mut self, op: OverlayOp) -> Vec<EndId> {
        let mut kept = Vec::new();
        for i in 0..self.op.ends.len() {
            let e = self.op.ends[i];
            let end = self.op.graph.end(e);
            if !op.admits_label(&end.left) || !end.is_area() {
                continue;
            }
            if op.admits_label(&self.op.graph.end(end.sym).left) {
                continue;
            }
            let add = !self.is_duplicate(e, &kept);
            self.op.graph.end_mut(e).in_result = add;
            if add {
                kept.push(e);
            }
        }
        kept
    }

    fn gather_line_ends(&mut self, op: OverlayOp) -> Vec<EndId> {
        let mut kept = Vec::new();
        for i in 0..self.op.ends.len() {
            let e = self.op.ends[i];
            let end = self.op.graph.end(e);
            if !op.admits_label(&end.on) {
                continue;
            }
            if op.admits_label(&end.left) || op.admits_label(&end.right) {
                continue;
            }
            let add = !self.is_duplicate(e, &kept);
            self.op.graph.end_mut(e).in_result = add;
            if add {
                kept.push(e);
            }
        }
        kept
    }

    fn gather_points(&self, op: OverlayOp) -> Vec<Coord> {
        let graph = &self.op.graph;
        let mut out: Vec<Coord> = self
            .op
            .isolated_points
            .iter()
            .filter(|p| op.admits_label(&p.label))
            .map(|p| self.output_coord(p.coord))
            .collect();
        for &e in &self.op.ends {
            let end = graph.end(e);
            if end.in_result || graph.end(end.sym).in_result {
                continue;
            }
            if op.admits_label(&end.left) || op.admits_label(&end.right) {
                continue;
            }
            let origin = graph.origin(e);
            let mut l = origin.label;
            for n in 0..2 {
                if !l.loc[n].is_known() {
                    l.loc[n] = end.on.loc[n];
                }
            }
            if op.admits_label(&l) {
                out.push(self.output_coord(origin.coord));
            }
        }
        out
    }

    #[inline]
    fn output_coord(&self, c: Coord) -> Coord {
        if self.op.save_z {
            c
        } else {
            c.with_z(0.0)
        }
    }

    fn line_of(&self, e: EndId) -> LineString {
        let mut pts = vec![self.output_coord(self.op.graph.origin(e).coord)];
        self.op.graph.append_end_to_line(e, &mut pts);
        LineString::new(pts)
    }
}

#[cfg(test)]
mod tests;
