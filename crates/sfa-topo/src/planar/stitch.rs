//! Cross-plane stitching.
//!
//! Where two planes meet, each plane's parts are cut by the common line and
//! the cuts are copied into the other plane as operand-owned lines and
//! points. Cuts are computed from the edges every plane had before any
//! stitching, so pieces never cascade.

use nalgebra::Vector3;

use crate::geometry::{Coord, Geometry, LineString, Projection2D};
use crate::graph::{EdgeNode, PointNode};
use crate::label::{Label, Location};
use crate::operation::GraphOperation;
use crate::predicates::is_collinear;

use super::plane::PlanarGraph;

/// Line shared by two planes; `dir` has unit length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneLine {
    pub point: Vector3<f64>,
    pub dir: Vector3<f64>,
}

/// Intersection of two planes, `None` when they are parallel.
///
/// The direction is `n1 × n2`. The point solves both plane equations with
/// the coordinate of the dominant direction axis set to zero.
pub fn intersection_line(a: &Projection2D, b: &Projection2D) -> Option<PlaneLine> {
    let (n1, n2) = (a.normal(), b.normal());
    let dir = n1.cross(&n2);
    let k = dir.iamax();
    let denom = dir[k];
    if denom == 0.0 {
        return None;
    }
    let d = [-n1.dot(&a.origin().v3()), -n2.dot(&b.origin().v3())];
    let (i, j) = ((k + 1) % 3, (k + 2) % 3);
    let mut point = Vector3::zeros();
    point[i] = (n1[j] * d[1] - n2[j] * d[0]) / denom;
    point[j] = (n2[i] * d[0] - n1[i] * d[1]) / denom;
    Some(PlaneLine {
        point,
        dir: dir.normalize(),
    })
}

/// Edges and points cut out of one plane, in some plane's coordinates.
#[derive(Clone, Debug, Default)]
pub struct Pieces {
    pub edges: Vec<EdgeNode>,
    pub points: Vec<PointNode>,
}

impl Pieces {
    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len() + self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push_point(&mut self, p: PointNode, eps: f64) {
        let dup = self.points.iter().any(|q| q.arg == p.arg && q.equals(&p, eps));
        if !dup {
            self.points.push(PointNode { isolated: true, ..p });
        }
    }

    /// Re-express every vertex in the frame `to`.
    pub fn moved(self, from: &Projection2D, to: &Projection2D) -> Pieces {
        let mv = |c: &Coord| to.to_2d(&from.to_3d(c)).with_z(0.0);
        let edges = self
            .edges
            .into_iter()
            .map(|mut e| {
                for p in &mut e.points {
                    p.coord = mv(&p.coord);
                }
                e
            })
            .collect();
        let points = self
            .points
            .into_iter()
            .map(|p| PointNode {
                coord: mv(&p.coord),
                ..p
            })
            .collect();
        Pieces { edges, points }
    }
}

#[inline]
fn cross(a: &Coord, b: &Coord) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Cut every operand edge of `op` by `line` (plane coordinates of `frame`).
pub fn pieces_on_line(op: &GraphOperation, frame: &Projection2D, line: &PlaneLine, eps: f64) -> Pieces {
    let p = frame.to_2d(&Coord::from_v3(line.point)).with_z(0.0);
    let u = frame.vector_to_2d(&line.dir).with_z(0.0);
    let mut out = Pieces::default();
    for arg in 0..2 {
        let mut area = Vec::new();
        for e in op.operand_edges(arg) {
            if e.left.loc[arg] == e.right.loc[arg] {
                cut_line_edge(e, &p, &u, eps, &mut out);
            } else {
                area.push(e);
            }
        }
        cut_area_edges(&area, arg, &p, &u, eps, &mut out);
    }
    out
}

/// Segment lying on the cut line, copied as a line of its operand.
fn collinear_piece(e: &EdgeNode, a: PointNode, b: PointNode) -> EdgeNode {
    let outside = Label::single(e.arg, Location::Exterior, 2);
    let mut piece = EdgeNode::new(outside, e.on, outside, e.arg, e.save_z);
    piece.add_point_node(a);
    piece.add_point_node(b);
    piece
}

/// A line edge meets the cut line in points, or lies along it.
fn cut_line_edge(e: &EdgeNode, p: &Coord, u: &Coord, eps: f64, out: &mut Pieces) {
    let arg = e.arg;
    for w in e.points.windows(2) {
        let (q, end) = (w[0].coord, w[1].coord);
        let v = end - q;
        let denom = cross(u, &v);
        if denom.abs() <= eps * v.length2_2d().sqrt() {
            if is_collinear(&q, &end, p, eps) {
                out.edges.push(collinear_piece(e, w[0], w[1]));
            }
            continue;
        }
        let t = cross(u, &(*p - q)) / denom;
        if t < -eps || t > 1.0 + eps {
            continue;
        }
        let node = if t.abs() < eps {
            w[0]
        } else if (t - 1.0).abs() < eps {
            w[1]
        } else {
            let label = Label::single(arg, e.on.loc[arg], 0);
            PointNode::new(q.lerp(&end, t).with_z(0.0), label, arg)
        };
        out.push_point(node, eps);
    }
}

/// Area edges of one operand: the cut line enters and leaves the region at
/// alternate crossings, so consecutive crossings along the line bound the
/// interior chords.
///
/// A vertex on the line counts as lying on its positive side; a boundary
/// that only touches the line then yields no crossing or two equal ones.
fn cut_area_edges(area: &[&EdgeNode], arg: usize, p: &Coord, u: &Coord, eps: f64, out: &mut Pieces) {
    let side = |c: &Coord| cross(u, &(*c - *p));
    let mut hits: Vec<(f64, Coord)> = Vec::new();
    for e in area {
        for w in e.points.windows(2) {
            let (q, end) = (w[0].coord, w[1].coord);
            let (sq, se) = (side(&q), side(&end));
            if sq.abs() <= eps && se.abs() <= eps {
                out.edges.push(collinear_piece(e, w[0], w[1]));
                continue;
            }
            if (sq < -eps) == (se < -eps) {
                continue;
            }
            let v = end - q;
            let denom = cross(u, &v);
            if denom == 0.0 {
                continue;
            }
            let wq = *p - q;
            let t = (cross(u, &wq) / denom).clamp(0.0, 1.0);
            let s = cross(&v, &wq) / denom;
            hits.push((s, q.lerp(&end, t).with_z(0.0)));
        }
    }
    hits.sort_by(|a, b| a.0.total_cmp(&b.0));

    let regions = Label::single(arg, Location::Exterior, 2);
    let line = Label::single(arg, Location::Interior, 1);
    let ends = Label::single(arg, Location::Boundary, 0);
    for pair in hits.chunks_exact(2) {
        let first = PointNode::new(pair[0].1, ends, arg);
        let last = PointNode::new(pair[1].1, ends, arg);
        if first.equals(&last, eps) {
            out.push_point(first, eps);
        } else {
            let mut chord = EdgeNode::new(regions, line, regions, arg, false);
            chord.add_point_node(first);
            chord.add_point_node(last);
            out.edges.push(chord);
        }
    }
}

/// Add pieces to a constructed plane: edges and points go to the graphs,
/// matching parts to the operand geometries used for point location.
pub fn inject(plane: &mut PlanarGraph, pieces: Pieces) {
    let Some(op) = plane.operation_mut() else {
        return;
    };
    for e in pieces.edges {
        let arg = e.arg;
        let line = LineString::new(e.points.iter().map(|p| p.coord).collect());
        op.add_edge(e);
        op.add_geometry(arg, Geometry::LineString(line));
    }
    for p in pieces.points {
        op.add_point(p);
        op.add_geometry(p.arg, Geometry::Point(p.coord));
    }
}

/// Stitch every pair of non-parallel planes in both directions; returns the
/// number of pieces added.
pub fn intersect_planes(planes: &mut [PlanarGraph], eps: f64) -> usize {
    let mut transfers: Vec<(usize, Pieces)> = Vec::new();
    for i in 0..planes.len() {
        for j in i + 1..planes.len() {
            let (fi, fj) = (*planes[i].frame(), *planes[j].frame());
            if fi.is_parallel(&fj, eps) {
                continue;
            }
            let Some(line) = intersection_line(&fi, &fj) else {
                continue;
            };
            for (from, to, frame_from, frame_to) in [(i, j, &fi, &fj), (j, i, &fj, &fi)] {
                if let Some(op) = planes[from].operation() {
                    let pieces = pieces_on_line(op, frame_from, &line, eps).moved(frame_from, frame_to);
                    if !pieces.is_empty() {
                        transfers.push((to, pieces));
                    }
                }
            }
        }
    }
    let mut added = 0;
    for (to, pieces) in transfers {
        added += pieces.len();
        inject(&mut planes[to], pieces);
    }
    added
}
