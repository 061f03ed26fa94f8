//! Splitting edges at their recorded intersection parameters.

use super::types::{EdgeId, EdgeNode, TopoGraph};

impl TopoGraph {
    /// Cut `e` at every recorded parameter and return the children in order.
    ///
    /// Parameters closer than eps to the previous kept one are dropped; the
    /// final parameter always stays on the last vertex. Children inherit the
    /// parent's labels and operand and keep a link back to it.
    pub fn split(&mut self, e: EdgeId) -> Vec<EdgeId> {
        let eps = self.eps;
        let n = self.edges[e.0].points.len();
        if n < 2 {
            return Vec::new();
        }
        let last = (n - 1) as f64;
        let mut params = std::mem::take(&mut self.edges[e.0].intersections);
        params.push(0.0);
        params.push(last);
        params.retain(|t| t.is_finite() && *t >= 0.0 && *t <= last);
        params.sort_by(|a, b| a.total_cmp(b));
        let mut cuts: Vec<f64> = Vec::with_capacity(params.len());
        for t in params {
            match cuts.last() {
                Some(&prev) if t - prev <= eps => {}
                _ => cuts.push(t),
            }
        }
        if let Some(tail) = cuts.last_mut() {
            *tail = last;
        }
        if cuts.len() == 1 {
            cuts.insert(0, 0.0);
        }

        let mut children = Vec::with_capacity(cuts.len() - 1);
        for w in cuts.windows(2) {
            let child = self.split_child(e, w[0], w[1]);
            let id = self.add_edge(child);
            children.push(id);
        }
        self.edges[e.0].children.extend(children.iter().copied());
        children
    }

    fn split_child(&self, e: EdgeId, t0: f64, t1: f64) -> EdgeNode {
        let parent = &self.edges[e.0];
        let pts = &parent.points;
        let (i0, f0) = (t0.floor() as usize, t0.fract());
        let (i1, f1) = (t1.floor() as usize, t1.fract());

        let mut child = EdgeNode::new(parent.left, parent.on, parent.right, parent.arg, parent.save_z);
        if f0 == 0.0 {
            child.add_point_node(pts[i0]);
        } else {
            child.add_point(pts[i0].coord.lerp(&pts[i0 + 1].coord, f0));
        }
        for p in &pts[i0 + 1..=i1] {
            child.add_point_node(*p);
        }
        if f1 != 0.0 {
            child.add_point(pts[i1].coord.lerp(&pts[i1 + 1].coord, f1));
        }
        child.parent = Some(e);
        child
    }
}
