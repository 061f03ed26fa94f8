//! Graph construction for one operand.

use tracing::debug;

use crate::geometry::{Coord, Geometry, LineString, Polygon};
use crate::label::{Label, Location};

use super::intersect::intersect_edges;
use super::types::{EdgeId, EdgeNode, PointNode, TopoGraph};

/// Points and edges contributed by one operand (`arg` 0 or 1).
///
/// Edges live in the shared [`TopoGraph`]; this keeps their ids plus the
/// isolated and boundary points, which are not part of any edge.
#[derive(Clone, Debug)]
pub struct GeometryGraph {
    pub arg: usize,
    pub edges: Vec<EdgeId>,
    pub points: Vec<PointNode>,
    pub boundary_points: Vec<PointNode>,
    /// False once a part that may self-intersect was added.
    pub simple: bool,
    save_z: bool,
}

impl GeometryGraph {
    pub fn build(geom: &Geometry, arg: usize, graph: &mut TopoGraph, save_z: bool) -> Self {
        let mut gg = Self {
            arg,
            edges: Vec::new(),
            points: Vec::new(),
            boundary_points: Vec::new(),
            simple: true,
            save_z,
        };
        gg.add_geometry(geom, graph);
        debug!(
            arg,
            kind = geom.kind(),
            edges = gg.edges.len(),
            points = gg.points.len(),
            boundary_points = gg.boundary_points.len(),
            "geometry graph built"
        );
        gg
    }

    fn add_geometry(&mut self, geom: &Geometry, graph: &mut TopoGraph) {
        match geom {
            Geometry::Point(c) => self.add_point(c, graph.eps),
            Geometry::LineString(l) => self.add_line_string(l, graph),
            Geometry::Polygon(p) => self.add_polygon(p, graph),
            Geometry::MultiPoint(v) => {
                self.simple = false;
                v.iter().for_each(|c| self.add_point(c, graph.eps));
            }
            Geometry::MultiLineString(v) => {
                self.simple = false;
                v.iter().for_each(|l| self.add_line_string(l, graph));
            }
            Geometry::MultiPolygon(v) | Geometry::PolyhedralSurface(v) | Geometry::Tin(v) => {
                self.simple = false;
                v.iter().for_each(|p| self.add_polygon(p, graph));
            }
            Geometry::GeometryCollection(v) => {
                self.simple = false;
                v.iter().for_each(|g| self.add_geometry(g, graph));
            }
        }
    }

    fn add_point(&mut self, c: &Coord, eps: f64) {
        let node = PointNode::new(*c, Label::single(self.arg, Location::Interior, 0), self.arg);
        if !self.points.iter().any(|p| p.equals(&node, eps)) {
            self.points.push(node);
        }
    }

    /// Record a line endpoint; a revisit toggles it between boundary and interior.
    fn add_boundary_point(&mut self, node: PointNode, eps: f64) {
        let arg = self.arg;
        match self.boundary_points.iter_mut().find(|p| p.equals(&node, eps)) {
            Some(p) => {
                let loc = if p.label.loc[arg] == Location::Boundary {
                    Location::Interior
                } else {
                    Location::Boundary
                };
                p.label.loc[arg] = loc;
            }
            None => self.boundary_points.push(node),
        }
    }

    fn new_edge(&self, left: Location, on: Location, right: Location) -> EdgeNode {
        EdgeNode::new(
            Label::single(self.arg, left, 2),
            Label::single(self.arg, on, 1),
            Label::single(self.arg, right, 2),
            self.arg,
            self.save_z,
        )
    }

    fn add_line_string(&mut self, line: &LineString, graph: &mut TopoGraph) {
        self.simple = false;
        let eps = graph.eps;
        let pts = line.points();
        if pts.len() < 2 {
            if let Some(c) = pts.first() {
                self.add_point(c, eps);
            }
            return;
        }
        if line.is_closed(eps) {
            if pts.len() == 2 {
                // collapsed line standing in for a single boundary point
                let b = Label::single(self.arg, Location::Boundary, 0);
                self.add_boundary_point(PointNode::new(pts[0], b, self.arg), eps);
                return;
            }
            self.add_ring(pts, Location::Exterior, Location::Interior, Location::Exterior, graph);
            return;
        }
        let b = Label::single(self.arg, Location::Boundary, 0);
        let start = PointNode {
            isolated: false,
            ..PointNode::new(pts[0], b, self.arg)
        };
        let end = PointNode {
            isolated: false,
            ..PointNode::new(pts[pts.len() - 1], b, self.arg)
        };
        self.add_boundary_point(start, eps);
        self.add_boundary_point(end, eps);

        let mut edge = self.new_edge(Location::Exterior, Location::Interior, Location::Exterior);
        edge.add_point_node(start);
        for c in &pts[1..pts.len() - 1] {
            edge.add_point(*c);
        }
        edge.add_point_node(end);
        self.edges.push(graph.add_edge(edge));
    }

    /// Closed chain; the last vertex repeats the first exactly.
    fn add_ring(&mut self, pts: &[Coord], left: Location, on: Location, right: Location, graph: &mut TopoGraph) {
        if pts.len() < 2 {
            return;
        }
        let mut edge = self.new_edge(left, on, right);
        for c in &pts[..pts.len() - 1] {
            edge.add_point(*c);
        }
        edge.add_point(pts[0]);
        self.edges.push(graph.add_edge(edge));
    }

    /// Shell and holes, each with the interior on its left.
    fn add_polygon(&mut self, poly: &Polygon, graph: &mut TopoGraph) {
        let shell = poly.exterior.points();
        if shell.len() < 2 {
            return;
        }
        if shell.len() == 3 && shell[0].equals_2d(&shell[2], graph.eps) {
            // collapsed area: a boundary segment with exterior on both sides
            let mut edge = self.new_edge(Location::Exterior, Location::Boundary, Location::Exterior);
            edge.add_point(shell[0]);
            edge.add_point(shell[1]);
            self.edges.push(graph.add_edge(edge));
            return;
        }
        for ring in poly.rings() {
            self.add_ring(ring.points(), Location::Interior, Location::Boundary, Location::Exterior, graph);
        }
    }

    /// Self-intersect this operand's edges unless it is known to be simple.
    pub fn compute_self_intersections(&self, graph: &mut TopoGraph) -> usize {
        if self.simple {
            return 0;
        }
        intersect_edges(graph, &self.edges, &self.edges, true)
    }

    /// Register an edge built elsewhere (plane stitching) with this operand.
    /// The operand then needs self-intersection.
    pub fn push_edge(&mut self, graph: &mut TopoGraph, edge: EdgeNode) -> EdgeId {
        self.simple = false;
        let id = graph.add_edge(edge);
        self.edges.push(id);
        id
    }

    /// Register a point built elsewhere, without deduplication. Boundary
    /// points join the boundary list.
    pub fn push_point(&mut self, p: PointNode) {
        if p.label.loc[self.arg] == Location::Boundary {
            self.boundary_points.push(p);
        } else {
            self.points.push(p);
        }
    }

    /// Interior isolated points plus line endpoints that still count as
    /// boundary and never became part of an edge.
    pub fn isolated_points(&self) -> Vec<PointNode> {
        let arg = self.arg;
        self.points
            .iter()
            .filter(|p| p.isolated && p.label.loc[arg] == Location::Interior)
            .chain(
                self.boundary_points
                    .iter()
                    .filter(|p| p.isolated && p.label.loc[arg] == Location::Boundary),
            )
            .copied()
            .collect()
    }
}
