//! Arena types for the labelled point/edge graph.
//!
//! Edges and edge-ends live in flat vectors of one `TopoGraph` and refer to each
//! other by index. Points are values owned by the edge that carries them; two
//! points are "the same node" when their coordinates are equal within eps.

use crate::geometry::Coord;
use crate::label::{Label, Location};
use crate::predicates::cross_product_sign;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeId(pub usize);
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EndId(pub usize);

/// One labelled vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointNode {
    pub arg: usize,
    pub coord: Coord,
    pub label: Label,
    pub isolated: bool,
}

impl PointNode {
    #[inline]
    pub fn new(coord: Coord, label: Label, arg: usize) -> Self {
        Self {
            arg,
            coord,
            label,
            isolated: true,
        }
    }

    #[inline]
    pub fn equals(&self, other: &PointNode, eps: f64) -> bool {
        self.coord.equals_2d(&other.coord, eps)
    }
}

/// Polyline chain with left/on/right labels relative to its direction.
#[derive(Clone, Debug)]
pub struct EdgeNode {
    pub arg: usize,
    pub points: Vec<PointNode>,
    /// Split parameters as `segment index + fraction`.
    pub intersections: Vec<f64>,
    pub left: Label,
    pub on: Label,
    pub right: Label,
    pub isolated: bool,
    pub save_z: bool,
    pub parent: Option<EdgeId>,
    pub children: Vec<EdgeId>,
    pub ends: Option<(EndId, EndId)>,
}

impl EdgeNode {
    pub fn new(left: Label, on: Label, right: Label, arg: usize, save_z: bool) -> Self {
        Self {
            arg,
            points: Vec::new(),
            intersections: Vec::new(),
            left,
            on,
            right,
            isolated: true,
            save_z,
            parent: None,
            children: Vec::new(),
            ends: None,
        }
    }

    /// Append a vertex whose label copies this edge's `on` location for its operand.
    pub fn add_point(&mut self, coord: Coord) {
        let label = Label::single(self.arg, self.on.loc[self.arg], 0);
        self.points.push(PointNode::new(coord, label, self.arg));
    }

    #[inline]
    pub fn add_point_node(&mut self, p: PointNode) {
        self.points.push(p);
    }

    /// Record a split parameter; the edge is no longer isolated.
    ///
    /// Fractions within eps of a vertex snap onto it.
    #[inline]
    pub fn add_intersection(&mut self, index: usize, frac: f64, eps: f64) {
        self.isolated = false;
        let t = if frac < eps {
            index as f64
        } else if frac > 1.0 - eps {
            (index + 1) as f64
        } else {
            index as f64 + frac
        };
        self.intersections.push(t);
    }

    #[inline]
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn start(&self) -> Option<&PointNode> {
        self.points.first()
    }

    #[inline]
    pub fn end(&self) -> Option<&PointNode> {
        self.points.last()
    }

    /// Same vertex sequence, forwards or backwards.
    pub fn equals(&self, other: &EdgeNode, eps: f64) -> bool {
        if self.points.len() != other.points.len() {
            return false;
        }
        let fwd = self
            .points
            .iter()
            .zip(other.points.iter())
            .all(|(a, b)| a.equals(b, eps));
        fwd || self
            .points
            .iter()
            .zip(other.points.iter().rev())
            .all(|(a, b)| a.equals(b, eps))
    }
}

/// Directed end of an edge, rooted at its first (`away`) or last vertex.
#[derive(Clone, Debug)]
pub struct EdgeEnd {
    pub edge: EdgeId,
    pub away: bool,
    pub dx: f64,
    pub dy: f64,
    pub quadrant: u8,
    pub left: Label,
    pub on: Label,
    pub right: Label,
    pub sym: EndId,
    pub next: Option<EndId>,
    pub visited: bool,
    pub in_result: bool,
}

impl EdgeEnd {
    /// Quadrant of a direction, numbered clockwise from north-east.
    #[inline]
    pub fn quadrant_of(dx: f64, dy: f64) -> u8 {
        if dy > 0.0 && dx >= 0.0 {
            1
        } else if dy <= 0.0 && dx > 0.0 {
            2
        } else if dy < 0.0 && dx <= 0.0 {
            3
        } else {
            4
        }
    }

    /// Clockwise order around a shared origin: quadrant first, then turn direction.
    pub fn compare(&self, other: &EdgeEnd, eps: f64) -> i32 {
        match self.quadrant.cmp(&other.quadrant) {
            std::cmp::Ordering::Less => -1,
            std::cmp::Ordering::Greater => 1,
            std::cmp::Ordering::Equal => {
                let o = Coord::new(0.0, 0.0);
                cross_product_sign(
                    &o,
                    &Coord::new(self.dx, self.dy),
                    &o,
                    &Coord::new(other.dx, other.dy),
                    eps,
                )
            }
        }
    }

    /// Some operand sees the same location on both sides.
    #[inline]
    pub fn is_line(&self) -> bool {
        self.left.loc[0] == self.right.loc[0] || self.left.loc[1] == self.right.loc[1]
    }

    /// Some operand sees different locations on the two sides.
    #[inline]
    pub fn is_area(&self) -> bool {
        self.left.loc[0] != self.right.loc[0] || self.left.loc[1] != self.right.loc[1]
    }

    /// Overwrite every known location of the given labels.
    pub fn set_labels(&mut self, left: &Label, on: &Label, right: &Label) {
        self.left.set_known(left);
        self.on.set_known(on);
        self.right.set_known(right);
    }
}

/// Shared arena for both operands' edges and ends.
#[derive(Clone, Debug)]
pub struct TopoGraph {
    pub(crate) edges: Vec<EdgeNode>,
    pub(crate) ends: Vec<EdgeEnd>,
    pub(crate) eps: f64,
}

impl TopoGraph {
    pub fn new(eps: f64) -> Self {
        Self {
            edges: Vec::new(),
            ends: Vec::new(),
            eps,
        }
    }

    #[inline]
    pub fn eps(&self) -> f64 {
        self.eps
    }

    pub fn add_edge(&mut self, e: EdgeNode) -> EdgeId {
        self.edges.push(e);
        EdgeId(self.edges.len() - 1)
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> &EdgeNode {
        &self.edges[id.0]
    }

    #[inline]
    pub fn edge_mut(&mut self, id: EdgeId) -> &mut EdgeNode {
        &mut self.edges[id.0]
    }

    #[inline]
    pub fn end(&self, id: EndId) -> &EdgeEnd {
        &self.ends[id.0]
    }

    #[inline]
    pub fn end_mut(&mut self, id: EndId) -> &mut EdgeEnd {
        &mut self.ends[id.0]
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Both ends of `e`, created on first request.
    pub fn ends_of(&mut self, e: EdgeId) -> (EndId, EndId) {
        if let Some(pair) = self.edges[e.0].ends {
            return pair;
        }
        let s = EndId(self.ends.len());
        let t = EndId(self.ends.len() + 1);
        let start = self.make_end(e, true, t);
        let end = self.make_end(e, false, s);
        self.ends.push(start);
        self.ends.push(end);
        self.edges[e.0].ends = Some((s, t));
        (s, t)
    }

    fn make_end(&self, e: EdgeId, away: bool, sym: EndId) -> EdgeEnd {
        let edge = &self.edges[e.0];
        let n = edge.points.len();
        let (dx, dy, left, right) = if away {
            let (p0, p1) = (&edge.points[0].coord, &edge.points[1].coord);
            (p1.x - p0.x, p1.y - p0.y, edge.left, edge.right)
        } else {
            let (pl, pp) = (&edge.points[n - 1].coord, &edge.points[n - 2].coord);
            (pp.x - pl.x, pp.y - pl.y, edge.right, edge.left)
        };
        EdgeEnd {
            edge: e,
            away,
            dx,
            dy,
            quadrant: EdgeEnd::quadrant_of(dx, dy),
            left,
            on: edge.on,
            right,
            sym,
            next: None,
            visited: false,
            in_result: false,
        }
    }

    /// Vertex the end radiates from.
    #[inline]
    pub fn origin(&self, id: EndId) -> &PointNode {
        let end = &self.ends[id.0];
        let pts = &self.edges[end.edge.0].points;
        if end.away {
            &pts[0]
        } else {
            &pts[pts.len() - 1]
        }
    }

    #[inline]
    pub fn origin_mut(&mut self, id: EndId) -> &mut PointNode {
        let end = &self.ends[id.0];
        let (edge, away) = (end.edge, end.away);
        let pts = &mut self.edges[edge.0].points;
        if away {
            &mut pts[0]
        } else {
            let n = pts.len();
            &mut pts[n - 1]
        }
    }

    /// Unsplit edge the end descends from.
    #[inline]
    pub fn root_parent(&self, id: EndId) -> EdgeId {
        let e = self.ends[id.0].edge;
        self.edges[e.0].parent.unwrap_or(e)
    }

    /// Two ends cover the same vertex chain.
    #[inline]
    pub fn ends_equal(&self, a: EndId, b: EndId) -> bool {
        let ea = self.edge(self.ends[a.0].edge);
        let eb = self.edge(self.ends[b.0].edge);
        ea.equals(eb, self.eps)
    }

    #[inline]
    pub fn compare_ends(&self, a: EndId, b: EndId) -> i32 {
        self.ends[a.0].compare(&self.ends[b.0], self.eps)
    }

    /// Append the end's vertices after its origin in travel direction.
    pub fn append_end_to_line(&self, id: EndId, out: &mut Vec<Coord>) {
        let end = &self.ends[id.0];
        let edge = &self.edges[end.edge.0];
        let fix = |c: Coord| if edge.save_z { c } else { c.with_z(0.0) };
        if end.away {
            out.extend(edge.points.iter().skip(1).map(|p| fix(p.coord)));
        } else {
            out.extend(edge.points.iter().rev().skip(1).map(|p| fix(p.coord)));
        }
    }

    /// Location of the end's origin for operand `n`.
    #[inline]
    pub fn origin_location(&self, id: EndId, n: usize) -> Location {
        self.origin(id).label.loc[n]
    }
}
