//! Piecewise-planar 3D support for relate and overlay.
//!
//! Purpose
//! - Bucket the parts of two 3D operands by the plane they lie in, run the
//!   2D engine once per plane, and combine the per-plane answers.
//!
//! Model
//! - Polygons (and surface patches) are placed first, each into an existing
//!   plane when coplanar, else a new one. Lines are split into segments and
//!   joined to a plane holding both endpoints, else they span a new plane.
//!   Points go to the first plane holding them; the rest stay isolated.
//! - Every pair of non-parallel planes is cut along its common line; what
//!   each plane has on that line is copied into the other one as lines and
//!   points of the same operand (`stitch`).
//!
//! Results
//! - `Overlay3D` lifts each plane's 2D overlay back to 3D and appends the
//!   isolated points the operator keeps.
//! - `RelateCompute3D` takes the cell-wise maximum of the per-plane matrices,
//!   sets EXTERIOR/EXTERIOR to 3 and relates isolated points by 3D equality.
//!
//! Code cross-refs: `operation::GraphOperation`, `geometry::Projection2D`

mod plane;
pub mod stitch;

pub use plane::{PlanarGraph, PlanarGraphOperation};

use tracing::debug;

use crate::cfg::TopoCfg;
use crate::de9im::De9im;
use crate::error::TopoError;
use crate::geometry::{Coord, Geometry, Projection2D};
use crate::label::Location;
use crate::overlay::{Overlay, OverlayOp};
use crate::relate::RelateCompute;

/// Boolean operations over piecewise-planar 3D operands.
#[derive(Clone, Debug)]
pub struct Overlay3D {
    planes: Vec<(Projection2D, Overlay)>,
    isolated_points: [Vec<Coord>; 2],
}

impl Overlay3D {
    pub fn new(a: &Geometry, b: &Geometry) -> Result<Self, TopoError> {
        Self::with_cfg(a, b, TopoCfg::default())
    }

    pub fn with_cfg(a: &Geometry, b: &Geometry, cfg: TopoCfg) -> Result<Self, TopoError> {
        let (planes, isolated_points) = PlanarGraphOperation::new(a, b, cfg)?.into_parts();
        let planes = planes
            .into_iter()
            .map(|(frame, op)| (frame, Overlay::from_operation(op)))
            .collect();
        Ok(Self { planes, isolated_points })
    }

    /// Set when any plane had to close a ring by force.
    pub fn processing_error(&self) -> bool {
        self.planes.iter().any(|(_, o)| o.processing_error())
    }

    pub fn compute_overlay(&mut self, op: OverlayOp) -> Option<Geometry> {
        let mut parts: Vec<Geometry> = self
            .planes
            .iter_mut()
            .filter_map(|(frame, o)| o.compute_overlay(op).map(|g| frame.geometry_to_3d(&g)))
            .collect();
        let keep = match op {
            OverlayOp::Intersection => [false, false],
            OverlayOp::Difference => [true, false],
            OverlayOp::Union | OverlayOp::SymDifference => [true, true],
        };
        for (arg, pts) in self.isolated_points.iter().enumerate() {
            if keep[arg] {
                parts.extend(pts.iter().copied().map(Geometry::Point));
            }
        }
        debug!(?op, planes = self.planes.len(), parts = parts.len(), "3d overlay");
        match parts.len() {
            0 => None,
            1 => parts.pop(),
            _ => Some(Geometry::GeometryCollection(parts)),
        }
    }
}

/// DE-9IM of piecewise-planar 3D operands.
#[derive(Clone, Debug)]
pub struct RelateCompute3D {
    planes: Vec<RelateCompute>,
    isolated_points: [Vec<Coord>; 2],
    eps: f64,
    im: Option<De9im>,
}

impl RelateCompute3D {
    pub fn new(a: &Geometry, b: &Geometry) -> Result<Self, TopoError> {
        Self::with_cfg(a, b, TopoCfg::default())
    }

    /// Planes are built and stitched here; `compute_im` only reads them.
    pub fn with_cfg(a: &Geometry, b: &Geometry, cfg: TopoCfg) -> Result<Self, TopoError> {
        let (planes, isolated_points) = PlanarGraphOperation::new(a, b, cfg)?.into_parts();
        Ok(Self {
            planes: planes
                .into_iter()
                .map(|(_, op)| RelateCompute::from_operation(op))
                .collect(),
            isolated_points,
            eps: cfg.eps,
            im: None,
        })
    }

    pub fn compute_im(&mut self) -> De9im {
        if let Some(im) = self.im {
            return im;
        }
        let mut im = De9im::default();
        for plane in &mut self.planes {
            im.merge_at_least(&plane.compute_im());
        }
        im.set_at_least(Location::Exterior, Location::Exterior, 3);

        let [a, b] = &self.isolated_points;
        let eps = self.eps;
        for p in a {
            if b.iter().any(|q| q.equals_3d(p, eps)) {
                im.set_at_least(Location::Interior, Location::Interior, 0);
            } else {
                im.set_at_least(Location::Interior, Location::Exterior, 0);
            }
        }
        for q in b {
            if !a.iter().any(|p| p.equals_3d(q, eps)) {
                im.set_at_least(Location::Exterior, Location::Interior, 0);
            }
        }
        debug!(matrix = %im, planes = self.planes.len(), "3d relate computed");
        self.im = Some(im);
        im
    }
}

#[cfg(test)]
mod tests;
