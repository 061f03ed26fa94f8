//! Shared pipeline of relate and overlay: build, intersect, split, label.
//!
//! Purpose
//! - Own both operands, their geometry graphs and the shared edge arena.
//! - Run the labelling pipeline once and expose the labelled ends and
//!   isolated points to the consumers (`relate`, `overlay`, `planar`).
//!
//! Label completion
//! - Edge groups resolve every location that adjacency can decide.
//! - What remains unknown belongs to parts that never touched the other
//!   operand; those are classified by direct point location.
//!
//! Code cross-refs: `group::EdgeGroupBuilder`, `geometry::locate`

use tracing::debug;

use crate::cfg::TopoCfg;
use crate::geometry::{locate, Coord, Geometry};
use crate::graph::{intersect_edges, EdgeId, EdgeNode, EndId, GeometryGraph, PointNode, TopoGraph};
use crate::group::EdgeGroupBuilder;
use crate::label::Location;

/// Both operands plus everything derived from them.
#[derive(Clone, Debug)]
pub struct GraphOperation {
    pub(crate) geoms: [Geometry; 2],
    pub(crate) cfg: TopoCfg,
    pub(crate) save_z: bool,
    pub(crate) graph: TopoGraph,
    pub(crate) args: Option<[GeometryGraph; 2]>,
    pub(crate) intersecting_edges: Vec<EdgeId>,
    pub(crate) isolated_edges: Vec<EdgeId>,
    pub(crate) split_edges: Vec<EdgeId>,
    pub(crate) isolated_points: Vec<PointNode>,
    pub(crate) ends: Vec<EndId>,
    pub(crate) groups: Option<EdgeGroupBuilder>,
}

impl GraphOperation {
    pub fn new(a: Geometry, b: Geometry, cfg: TopoCfg) -> Self {
        Self {
            geoms: [a, b],
            cfg,
            save_z: false,
            graph: TopoGraph::new(cfg.eps),
            args: None,
            intersecting_edges: Vec::new(),
            isolated_edges: Vec::new(),
            split_edges: Vec::new(),
            isolated_points: Vec::new(),
            ends: Vec::new(),
            groups: None,
        }
    }

    #[inline]
    pub fn geometry(&self, n: usize) -> &Geometry {
        &self.geoms[n]
    }

    #[inline]
    pub fn cfg(&self) -> TopoCfg {
        self.cfg
    }

    #[inline]
    pub fn graph(&self) -> &TopoGraph {
        &self.graph
    }

    /// Labelled ends: grouped ones in insertion order, then isolated ones.
    #[inline]
    pub fn ends(&self) -> &[EndId] {
        &self.ends
    }

    #[inline]
    pub fn isolated_points(&self) -> &[PointNode] {
        &self.isolated_points
    }

    /// Build both geometry graphs unless they already exist.
    pub fn construct_graphs(&mut self) {
        if self.args.is_some() {
            return;
        }
        let a = GeometryGraph::build(&self.geoms[0], 0, &mut self.graph, self.save_z);
        let b = GeometryGraph::build(&self.geoms[1], 1, &mut self.graph, self.save_z);
        self.args = Some([a, b]);
    }

    /// Add an edge to the graph of its operand. Graphs must exist.
    pub fn add_edge(&mut self, e: EdgeNode) -> Option<EdgeId> {
        let args = self.args.as_mut()?;
        let arg = e.arg;
        Some(args[arg].push_edge(&mut self.graph, e))
    }

    /// Add a point to the graph of its operand. Graphs must exist.
    pub fn add_point(&mut self, p: PointNode) {
        if let Some(args) = self.args.as_mut() {
            args[p.arg].push_point(p);
        }
    }

    /// Append a part to operand `n`, so point location sees it.
    pub fn add_geometry(&mut self, n: usize, g: Geometry) {
        match &mut self.geoms[n] {
            Geometry::GeometryCollection(v) => v.push(g),
            other => {
                let prev = std::mem::replace(other, Geometry::GeometryCollection(Vec::new()));
                self.geoms[n] = Geometry::GeometryCollection(vec![prev, g]);
            }
        }
    }

    /// Edges operand `n` contributed so far (empty before `construct_graphs`).
    pub fn operand_edges(&self, n: usize) -> Vec<&EdgeNode> {
        self.args
            .as_ref()
            .map(|args| args[n].edges.iter().map(|&e| self.graph.edge(e)).collect())
            .unwrap_or_default()
    }

    /// Self-intersect each operand, then intersect the two against each other.
    pub fn intersect_graphs(&mut self) -> usize {
        let Some(args) = self.args.as_ref() else {
            return 0;
        };
        let mut events = args[0].compute_self_intersections(&mut self.graph);
        events += args[1].compute_self_intersections(&mut self.graph);
        events += intersect_edges(&mut self.graph, &args[0].edges, &args[1].edges, false);
        events
    }

    /// Sort every operand edge into intersecting or isolated.
    pub fn gather_edges(&mut self) {
        let Some(args) = self.args.as_ref() else {
            return;
        };
        for &e in args[0].edges.iter().chain(args[1].edges.iter()) {
            if self.graph.edge(e).isolated {
                self.isolated_edges.push(e);
            } else {
                self.intersecting_edges.push(e);
            }
        }
    }

    /// Split every intersecting edge; consumes the intersecting list.
    pub fn gather_split_edges(&mut self) {
        for e in std::mem::take(&mut self.intersecting_edges) {
            let kids = self.graph.split(e);
            self.split_edges.extend(kids);
        }
    }

    pub fn gather_points(&mut self) {
        if let Some(args) = self.args.as_ref() {
            self.isolated_points = args[0].isolated_points();
            self.isolated_points.extend(args[1].isolated_points());
        }
    }

    /// Ends of edges that never met anything; they join the grouped ends.
    pub fn create_isolated_ends(&mut self) {
        for &e in &self.isolated_edges {
            let (s, t) = self.graph.ends_of(e);
            self.ends.push(s);
            self.ends.push(t);
        }
    }

    /// Location of `c` in operand `n`: a known end origin at `c` wins, else
    /// direct point location.
    fn point_location(&self, c: &Coord, n: usize) -> Location {
        let eps = self.cfg.eps;
        self.ends
            .iter()
            .map(|&e| self.graph.origin(e))
            .find(|o| o.coord.equals_2d(c, eps) && o.label.loc[n].is_known())
            .map(|o| o.label.loc[n])
            .unwrap_or_else(|| locate(c, &self.geoms[n], eps))
    }

    pub fn complete_point_label(&self, p: &mut PointNode, n: usize) {
        if p.label.loc[n].is_known() {
            return;
        }
        p.label.loc[n] = self.point_location(&p.coord, n);
    }

    /// An end still unknown for `n` does not touch operand `n`, so one
    /// location covers its whole edge.
    pub fn complete_edge_label(&mut self, e: EndId, n: usize) {
        let eps = self.cfg.eps;
        let origin = self.graph.origin(e).coord;
        let mut loc = self.graph.end(e).on.loc[n];
        if !loc.is_known() {
            loc = if self.geoms[n].dimension() > 0 {
                locate(&origin, &self.geoms[n], eps)
            } else {
                Location::Exterior
            };
        }
        let end = self.graph.end_mut(e);
        for label in [&mut end.on, &mut end.left, &mut end.right] {
            if !label.loc[n].is_known() {
                label.loc[n] = loc;
            }
        }
        if !self.graph.origin(e).label.loc[n].is_known() {
            let l = self.point_location(&origin, n);
            self.graph.origin_mut(e).label.loc[n] = l;
        }
    }

    /// Complete everything that belongs to operand `n` against the other one.
    pub fn complete_labels(&mut self, n: usize) {
        let other = (n + 1) % 2;
        let mut points = std::mem::take(&mut self.isolated_points);
        for p in &mut points {
            self.complete_point_label(p, other);
        }
        self.isolated_points = points;
        for i in 0..self.ends.len() {
            let e = self.ends[i];
            self.complete_edge_label(e, other);
        }
    }

    /// Run the whole labelling pipeline once; returns the edge groups for linking.
    ///
    /// Later calls return the same groups without touching the graph, so
    /// stitched edges and points must be added before the first call.
    pub fn label(&mut self) -> EdgeGroupBuilder {
        if let Some(groups) = &self.groups {
            return groups.clone();
        }
        self.construct_graphs();
        let events = self.intersect_graphs();
        self.gather_edges();
        self.gather_split_edges();
        self.gather_points();
        let builder = EdgeGroupBuilder::build(&mut self.graph, &self.split_edges);
        let mut builder = builder;
        builder.complete_labels();
        builder.update_parents(&mut self.graph);
        self.ends = builder.ends.clone();
        self.create_isolated_ends();
        self.complete_labels(0);
        self.complete_labels(1);
        debug!(
            events,
            split_edges = self.split_edges.len(),
            isolated_edges = self.isolated_edges.len(),
            isolated_points = self.isolated_points.len(),
            groups = builder.groups.len(),
            ends = self.ends.len(),
            "graphs labelled"
        );
        self.groups = Some(builder.clone());
        builder
    }
}
