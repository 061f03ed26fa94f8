//! Groups every split edge's ends by origin vertex.

use tracing::trace;

use crate::geometry::Coord;
use crate::graph::{EdgeId, EndId, TopoGraph};

use super::egroup::EdgeGroup;

/// All edge groups of one operation plus every end in insertion order.
#[derive(Clone, Debug, Default)]
pub struct EdgeGroupBuilder {
    pub groups: Vec<EdgeGroup>,
    pub ends: Vec<EndId>,
}

impl EdgeGroupBuilder {
    /// Insert both ends of each edge into the group at its origin.
    pub fn build(graph: &mut TopoGraph, edges: &[EdgeId]) -> Self {
        let mut b = Self::default();
        for &e in edges {
            let (s, t) = graph.ends_of(e);
            b.insert(graph, s);
            b.insert(graph, t);
        }
        trace!(groups = b.groups.len(), ends = b.ends.len(), "edge groups built");
        b
    }

    fn insert(&mut self, graph: &TopoGraph, e: EndId) {
        self.ends.push(e);
        let origin = *graph.origin(e);
        let idx = match self.find_group(&origin.coord, graph.eps()) {
            Some(i) => i,
            None => {
                self.groups.push(EdgeGroup::new(&origin));
                self.groups.len() - 1
            }
        };
        self.groups[idx].insert_edge(graph, e);
    }

    /// Group centred at `c`, if any.
    pub fn find_group(&self, c: &Coord, eps: f64) -> Option<usize> {
        self.groups.iter().position(|g| g.center.coord.equals_2d(c, eps))
    }

    pub fn complete_labels(&mut self) {
        for g in &mut self.groups {
            g.complete_labels(0);
            g.complete_labels(1);
        }
    }

    pub fn update_parents(&self, graph: &mut TopoGraph) {
        for g in &self.groups {
            g.update_parents(graph);
        }
    }

    /// Set `next` on every in-result end whose ring continues through a group.
    pub fn link_ends(&self, graph: &mut TopoGraph) {
        for g in &self.groups {
            g.link_edges(graph);
        }
    }
}
