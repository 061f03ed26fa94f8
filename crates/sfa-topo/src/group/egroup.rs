//! Rotational grouping of the edge-ends around one vertex.

use crate::graph::{EdgeId, EndId, PointNode, TopoGraph};
use crate::label::{Label, Location};

use super::division::EdgeGroupDivision;

/// Edge-ends radiating from one vertex, in clockwise order.
///
/// Division `i` has partition `i - 1` (mod count) on its left and partition
/// `i` on its right; partitions are the wedges between consecutive divisions.
#[derive(Clone, Debug)]
pub struct EdgeGroup {
    pub center: PointNode,
    included: Vec<EdgeId>,
    sorted: Vec<EndId>,
    pub partitions: Vec<Label>,
    pub divisions: Vec<EdgeGroupDivision>,
}

impl EdgeGroup {
    /// Empty group at `origin`'s location; the center starts fully unknown.
    pub fn new(origin: &PointNode) -> Self {
        Self {
            center: PointNode::new(origin.coord, Label::new(0), origin.arg),
            included: Vec::new(),
            sorted: Vec::new(),
            partitions: Vec::new(),
            divisions: Vec::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.divisions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.divisions.is_empty()
    }

    /// Ends in clockwise order.
    #[inline]
    pub fn sorted_ends(&self) -> &[EndId] {
        &self.sorted
    }

    fn merge_labels(mut a: Label, b: &Label) -> Label {
        if a.dim == 0 || a.dim == 1 {
            a.copy_label(b);
        } else {
            a.set_known(b);
        }
        a
    }

    /// Mod-2 update of the center, once per unsplit edge. Boundary edges
    /// (polygon rings) do not count; only line endpoints do.
    fn update_center(&mut self, graph: &TopoGraph, e: EndId) {
        let root = graph.root_parent(e);
        if self.included.contains(&root) {
            return;
        }
        self.included.push(root);
        let arg = graph.edge(root).arg;
        if graph.end(e).on.loc[arg] != Location::Boundary {
            let origin = graph.origin(e).label;
            self.center.label.copy_label_at(&origin, arg);
        }
    }

    #[inline]
    fn wrap(&self, i: isize) -> usize {
        let n = self.partitions.len() as isize;
        (((i % n) + n) % n) as usize
    }

    fn merge_into(&mut self, graph: &TopoGraph, at: usize, e: EndId) {
        self.divisions[at].add_edge(graph, e);
        let end = graph.end(e);
        let before = self.wrap(at as isize - 1);
        self.partitions[before].copy_label(&end.left);
        self.partitions[at].copy_label(&end.right);
    }

    /// Binary-search insertion into the clockwise order.
    pub fn insert_edge(&mut self, graph: &TopoGraph, e: EndId) {
        self.update_center(graph, e);
        if self.sorted.is_empty() {
            let mut d = EdgeGroupDivision::default();
            d.add_edge(graph, e);
            self.sorted.push(e);
            self.divisions.push(d);
            self.partitions.push(graph.end(e).right);
            let origin = graph.origin(e).label;
            self.center.label.set_known(&origin);
            return;
        }

        let mut low: isize = 0;
        let mut high: isize = self.sorted.len() as isize - 1;
        while low < high {
            let pivot = low + (high - low) / 2;
            match graph.compare_ends(e, self.sorted[pivot as usize]) {
                -1 => high = pivot - 1,
                1 => low = pivot + 1,
                _ => {
                    self.merge_into(graph, pivot as usize, e);
                    return;
                }
            }
        }

        let prev;
        let mut at = low as usize;
        match graph.compare_ends(e, self.sorted[at]) {
            c if c > 0 => {
                prev = at;
                at += 1;
            }
            c if c < 0 => prev = self.wrap(low - 1),
            _ => {
                self.merge_into(graph, at, e);
                return;
            }
        }

        let mut d = EdgeGroupDivision::default();
        d.add_edge(graph, e);
        let end = graph.end(e);
        let left = Self::merge_labels(self.partitions[prev], &end.left);
        let right = Self::merge_labels(self.partitions[prev], &end.right);
        self.divisions.insert(at, d);
        self.partitions[prev] = left;
        self.partitions.insert(at, right);
        self.sorted.insert(at, e);
    }

    /// Fill unknown locations of operand `n` from neighbouring wedges.
    pub fn complete_labels(&mut self, n: usize) {
        let len = self.partitions.len();
        for i in 0..len {
            if self.partitions[i].loc[n].is_known() {
                continue;
            }
            let found = (i..len)
                .map(|j| self.partitions[j].loc[n])
                .find(|l| l.is_known())
                .or_else(|| (0..=i).rev().map(|j| self.partitions[j].loc[n]).find(|l| l.is_known()));
            if let Some(loc) = found {
                self.partitions[i].loc[n] = loc;
            }
        }
        for (d, p) in self.divisions.iter_mut().zip(self.partitions.iter()) {
            if !d.label.loc[n].is_known() {
                d.label.loc[n] = p.loc[n];
            }
        }
        if self.partitions.iter().all(|p| p.loc[n] == Location::Interior) {
            self.center.label.loc[n] = Location::Interior;
        }
    }

    /// Write the completed labels back onto the member ends.
    pub fn update_parents(&self, graph: &mut TopoGraph) {
        for (i, d) in self.divisions.iter().enumerate() {
            let left = self.partitions[self.wrap(i as isize - 1)];
            let right = self.partitions[i];
            d.update_parents(graph, &left, &right, &self.center.label);
        }
    }

    /// For each division whose sym is in the result, link the sym to the next
    /// in-result division clockwise (minimal ring turn).
    pub fn link_edges(&self, graph: &mut TopoGraph) {
        let nodes: Vec<EndId> = self.divisions.iter().filter_map(EdgeGroupDivision::first).collect();
        let n = nodes.len();
        for i in 0..n {
            let sym = graph.end(nodes[i]).sym;
            if !graph.end(sym).in_result {
                continue;
            }
            let next = (1..n)
                .map(|k| nodes[(i + k) % n])
                .find(|&cand| graph.end(cand).in_result);
            if let Some(next) = next {
                graph.end_mut(sym).next = Some(next);
            }
        }
    }
}
