//! DE-9IM computation and the named spatial predicates.
//!
//! Purpose
//! - `RelateCompute` folds every labelled end, end origin and isolated point
//!   of the shared pipeline into a [`De9im`].
//! - `RelateComputer` picks the planar or the plane-stitched 3D computer.
//! - `Relate` caches the matrix and answers equals/touches/crosses/... on it.
//!
//! Shortcuts
//! - Empty operands or disjoint envelopes fill the matrix from the operands'
//!   own dimensions without building graphs.
//!
//! Code cross-refs: `operation::GraphOperation`, `planar::RelateCompute3D`

use tracing::debug;

use crate::cfg::TopoCfg;
use crate::de9im::De9im;
use crate::error::TopoError;
use crate::geometry::{envelopes_intersect, Geometry};
use crate::label::Location;
use crate::operation::GraphOperation;
use crate::planar::RelateCompute3D;

/// Planar DE-9IM of one operand pair.
#[derive(Clone, Debug)]
pub struct RelateCompute {
    op: GraphOperation,
    im: Option<De9im>,
}

impl RelateCompute {
    pub fn new(a: Geometry, b: Geometry) -> Self {
        Self::with_cfg(a, b, TopoCfg::default())
    }

    pub fn with_cfg(a: Geometry, b: Geometry, cfg: TopoCfg) -> Self {
        Self::from_operation(GraphOperation::new(a, b, cfg))
    }

    /// Relate over prepared graphs (plane stitching adds edges before this).
    pub fn from_operation(op: GraphOperation) -> Self {
        Self { op, im: None }
    }

    /// Computed once; later calls return the stored matrix.
    pub fn compute_im(&mut self) -> De9im {
        if let Some(im) = self.im {
            return im;
        }
        let mut im = De9im::default();
        // both operands are bounded, so their exteriors always share an area
        im.set_at_least(Location::Exterior, Location::Exterior, 2);
        let (a, b) = (self.op.geometry(0), self.op.geometry(1));
        let eps = self.op.cfg.eps;
        if a.is_empty() || b.is_empty() || !envelopes_intersect(a, b, eps) {
            self.disjoint_im(&mut im);
        } else {
            self.op.label();
            self.update_im(&mut im);
        }
        debug!(matrix = %im, "relate computed");
        self.im = Some(im);
        im
    }

    fn disjoint_im(&self, im: &mut De9im) {
        let eps = self.op.cfg.eps;
        let (a, b) = (self.op.geometry(0), self.op.geometry(1));
        if !a.is_empty() {
            im.set(Location::Interior, Location::Exterior, a.dimension());
            if let Some(d) = a.boundary_dimension(eps) {
                im.set(Location::Boundary, Location::Exterior, d);
            }
        }
        if !b.is_empty() {
            im.set(Location::Exterior, Location::Interior, b.dimension());
            if let Some(d) = b.boundary_dimension(eps) {
                im.set(Location::Exterior, Location::Boundary, d);
            }
        }
    }

    fn update_im(&self, im: &mut De9im) {
        let graph = self.op.graph();
        for &e in self.op.ends() {
            im.set_at_least_label(&graph.origin(e).label);
            let end = graph.end(e);
            im.set_at_least_label(&end.left);
            im.set_at_least_label(&end.on);
            im.set_at_least_label(&end.right);
        }
        for p in self.op.isolated_points() {
            im.set_at_least_label(&p.label);
        }
    }
}

/// Planar or 3D computer behind one `compute_im` contract.
#[derive(Clone, Debug)]
pub enum RelateComputer {
    Planar(RelateCompute),
    Spatial(RelateCompute3D),
}

impl RelateComputer {
    /// `three_d` selects plane stitching; that path fails on polygons whose
    /// plane cannot be determined.
    pub fn new(a: &Geometry, b: &Geometry, three_d: bool, cfg: TopoCfg) -> Result<Self, TopoError> {
        Ok(if three_d {
            RelateComputer::Spatial(RelateCompute3D::with_cfg(a, b, cfg)?)
        } else {
            RelateComputer::Planar(RelateCompute::with_cfg(a.clone(), b.clone(), cfg))
        })
    }

    pub fn compute_im(&mut self) -> De9im {
        match self {
            RelateComputer::Planar(c) => c.compute_im(),
            RelateComputer::Spatial(c) => c.compute_im(),
        }
    }
}

/// Named predicates over one operand pair, with the matrix computed on demand.
#[derive(Clone, Debug)]
pub struct Relate {
    a: Geometry,
    b: Geometry,
    three_d: bool,
    cfg: TopoCfg,
    computer: RelateComputer,
    matrix: Option<De9im>,
}

impl Relate {
    pub fn new(a: &Geometry, b: &Geometry) -> Self {
        Self {
            a: a.clone(),
            b: b.clone(),
            three_d: false,
            cfg: TopoCfg::default(),
            computer: RelateComputer::Planar(RelateCompute::new(a.clone(), b.clone())),
            matrix: None,
        }
    }

    pub fn with_cfg(a: &Geometry, b: &Geometry, three_d: bool, cfg: TopoCfg) -> Result<Self, TopoError> {
        Ok(Self {
            a: a.clone(),
            b: b.clone(),
            three_d,
            cfg,
            computer: RelateComputer::new(a, b, three_d, cfg)?,
            matrix: None,
        })
    }

    pub fn new_3d(a: &Geometry, b: &Geometry) -> Result<Self, TopoError> {
        Self::with_cfg(a, b, true, TopoCfg::default())
    }

    pub fn matrix(&mut self) -> De9im {
        match self.matrix {
            Some(m) => m,
            None => {
                let m = self.computer.compute_im();
                self.matrix = Some(m);
                m
            }
        }
    }

    fn dims(&self) -> (i32, i32) {
        (self.a.dimension(), self.b.dimension())
    }

    fn is_closed_line(g: &Geometry, eps: f64) -> bool {
        matches!(g, Geometry::LineString(l) if l.is_closed(eps))
    }

    pub fn equals(&mut self) -> bool {
        let (da, db) = self.dims();
        if da != db {
            return false;
        }
        let eps = self.cfg.eps;
        if let (Geometry::Point(p), Geometry::Point(q)) = (&self.a, &self.b) {
            return if self.three_d {
                p.equals_3d(q, eps)
            } else {
                p.equals_2d(q, eps)
            };
        }
        let pointlike = |g: &Geometry| matches!(g, Geometry::Point(_) | Geometry::MultiPoint(_));
        let no_boundary = pointlike(&self.a)
            || pointlike(&self.b)
            || Self::is_closed_line(&self.a, eps)
            || Self::is_closed_line(&self.b, eps);
        let m = self.matrix();
        if no_boundary {
            m.matches("TFFFFFFFT")
        } else {
            m.matches("TFFFTFFFT")
        }
    }

    pub fn disjoint(&mut self) -> bool {
        self.matrix().matches("FF*FF****")
    }

    pub fn intersects(&mut self) -> bool {
        !self.disjoint()
    }

    pub fn touches(&mut self) -> bool {
        if self.dims() == (0, 0) {
            return false;
        }
        let m = self.matrix();
        m.matches("FT*******") || m.matches("F**T*****") || m.matches("F***T****")
    }

    pub fn crosses(&mut self) -> bool {
        let dims = self.dims();
        let m = self.matrix();
        match dims {
            (0, 1) | (0, 2) | (1, 2) => m.matches("T*T******"),
            (1, 0) | (2, 0) | (2, 1) => m.matches("T*****T**"),
            (1, 1) => m.matches("0********"),
            _ => false,
        }
    }

    pub fn within(&mut self) -> bool {
        self.matrix().matches("T*F**F***")
    }

    pub fn contains(&mut self) -> bool {
        self.matrix().transpose().matches("T*F**F***")
    }

    pub fn overlaps(&mut self) -> bool {
        let dims = self.dims();
        let m = self.matrix();
        match dims {
            (0, 0) | (2, 2) => m.matches("T*T***T**"),
            (1, 1) => m.matches("1*T***T**"),
            _ => false,
        }
    }

    /// Match the matrix against a caller-supplied pattern.
    pub fn relate(&mut self, pattern: &str) -> Result<bool, TopoError> {
        self.matrix().compare(pattern)
    }
}
