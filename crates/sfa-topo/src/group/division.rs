//! Bundle of coincident edge-ends leaving one vertex in the same direction.

use crate::graph::{EndId, TopoGraph};
use crate::label::Label;

#[derive(Clone, Debug)]
pub struct EdgeGroupDivision {
    pub label: Label,
    pub ends: Vec<EndId>,
}

impl Default for EdgeGroupDivision {
    fn default() -> Self {
        Self {
            label: Label::new(1),
            ends: Vec::new(),
        }
    }
}

impl EdgeGroupDivision {
    /// Add `e` once; its `on` location merges into the bundle for its operand.
    pub fn add_edge(&mut self, graph: &TopoGraph, e: EndId) {
        if self.ends.contains(&e) {
            return;
        }
        self.ends.push(e);
        let arg = graph.edge(graph.root_parent(e)).arg;
        self.label.copy_label_at(&graph.end(e).on, arg);
    }

    /// Representative end (the first one added).
    #[inline]
    pub fn first(&self) -> Option<EndId> {
        self.ends.first().copied()
    }

    /// Push completed labels onto every member end, its origin and its sym.
    pub fn update_parents(&self, graph: &mut TopoGraph, left: &Label, right: &Label, center: &Label) {
        for &e in &self.ends {
            graph.end_mut(e).set_labels(left, &self.label, right);
            graph.origin_mut(e).label.set_known(center);
            let sym = graph.end(e).sym;
            graph.end_mut(sym).set_labels(right, &self.label, left);
        }
    }
}
