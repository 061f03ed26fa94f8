//! Pairwise segment intersection between two edge lists.
//!
//! Brute force over all segment pairs with an eps-expanded bounding-box
//! rejection. Every hit records a split parameter on both edges.

use crate::geometry::Coord;
use crate::label::Location;
use crate::predicates::{is_between, is_collinear};

use super::types::{EdgeId, TopoGraph};

/// Intersect every segment of `a` with every segment of `b`.
///
/// In self-test mode `a` and `b` are the same list and each unordered edge pair
/// is visited once (an edge is still tested against itself). Returns the number
/// of intersection events recorded.
pub fn intersect_edges(graph: &mut TopoGraph, a: &[EdgeId], b: &[EdgeId], self_test: bool) -> usize {
    let mut runner = EdgeIntersector {
        eps: graph.eps,
        graph,
        events: 0,
    };
    for (ia, &ea) in a.iter().enumerate() {
        let start = if self_test { ia } else { 0 };
        for &eb in &b[start..] {
            let na = runner.graph.edge(ea).num_points();
            let nb = runner.graph.edge(eb).num_points();
            for i in 0..na.saturating_sub(1) {
                for j in 0..nb.saturating_sub(1) {
                    runner.add_intersection(ea, i, eb, j);
                }
            }
        }
    }
    runner.events
}

struct EdgeIntersector<'g> {
    graph: &'g mut TopoGraph,
    eps: f64,
    events: usize,
}

/// Position of `p` along `a → b` as a fraction of its length, clamped to [0, 1].
#[inline]
fn fraction_on(a: &Coord, b: &Coord, p: &Coord) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len2 = dx * dx + dy * dy;
    if len2 == 0.0 {
        return 0.0;
    }
    (((p.x - a.x) * dx + (p.y - a.y) * dy) / len2).clamp(0.0, 1.0)
}

#[inline]
fn boxes_disjoint(p1: &Coord, p2: &Coord, p3: &Coord, p4: &Coord, eps: f64) -> bool {
    p1.x.min(p2.x) > p3.x.max(p4.x) + eps
        || p1.y.min(p2.y) > p3.y.max(p4.y) + eps
        || p1.x.max(p2.x) < p3.x.min(p4.x) - eps
        || p1.y.max(p2.y) < p3.y.min(p4.y) - eps
}

impl EdgeIntersector<'_> {
    /// Same edge, and the segments are equal, adjacent, or the first and last
    /// segments of a closed chain.
    fn is_trivial(&self, a: EdgeId, ai: usize, b: EdgeId, bi: usize) -> bool {
        if a != b {
            return false;
        }
        if ai == bi || ai + 1 == bi || bi + 1 == ai {
            return true;
        }
        let e = self.graph.edge(a);
        let n = e.num_points();
        let closed = match (e.start(), e.end()) {
            (Some(s), Some(t)) => s.equals(t, self.eps),
            _ => false,
        };
        closed && ((ai == 0 && bi == n - 2) || (bi == 0 && ai == n - 2))
    }

    fn record(&mut self, a: EdgeId, ai: usize, fa: f64, b: EdgeId, bi: usize, fb: f64) {
        let eps = self.eps;
        self.graph.edge_mut(a).add_intersection(ai, fa, eps);
        self.graph.edge_mut(b).add_intersection(bi, fb, eps);
        self.events += 1;
    }

    fn add_intersection(&mut self, a: EdgeId, ai: usize, b: EdgeId, bi: usize) {
        if self.is_trivial(a, ai, b, bi) {
            return;
        }
        let eps = self.eps;
        let (p1, p2) = {
            let e = self.graph.edge(a);
            (e.points[ai].coord, e.points[ai + 1].coord)
        };
        let (p3, p4) = {
            let e = self.graph.edge(b);
            (e.points[bi].coord, e.points[bi + 1].coord)
        };
        if boxes_disjoint(&p1, &p2, &p3, &p4, eps) {
            return;
        }

        let (dx1, dy1) = (p2.x - p1.x, p2.y - p1.y);
        let (dx2, dy2) = (p4.x - p3.x, p4.y - p3.y);
        let denom = dx2 * dy1 - dx1 * dy2;

        if denom.abs() < eps {
            self.parallel(a, ai, b, bi, [p1, p2, p3, p4]);
            return;
        }

        let (x31, y31) = (p3.x - p1.x, p3.y - p1.y);
        let mut s = (dx2 * y31 - x31 * dy2) / denom;
        let mut t = (dx1 * y31 - x31 * dy1) / denom;
        let (mut ai, mut bi) = (ai, bi);
        let hit = Coord::new(p1.x + dx1 * s, p1.y + dy1 * s);
        if hit.equals_2d(&p1, eps) {
            s = 0.0;
        } else if hit.equals_2d(&p2, eps) {
            ai += 1;
            s = 0.0;
        }
        if hit.equals_2d(&p3, eps) {
            t = 0.0;
        } else if hit.equals_2d(&p4, eps) {
            bi += 1;
            t = 0.0;
        }
        if !(0.0..=1.0).contains(&s) || !(0.0..=1.0).contains(&t) {
            return;
        }
        self.record(a, ai, s, b, bi, t);
    }

    /// Collinear overlap: endpoint coincidences plus endpoints lying inside the
    /// other segment.
    fn parallel(&mut self, a: EdgeId, ai: usize, b: EdgeId, bi: usize, p: [Coord; 4]) {
        let eps = self.eps;
        let [p1, p2, p3, p4] = p;
        if !is_collinear(&p1, &p2, &p3, eps) {
            return;
        }
        self.graph.edge_mut(a).isolated = false;
        self.graph.edge_mut(b).isolated = false;

        let p1p3 = p1.equals_2d(&p3, eps);
        let p1p4 = p1.equals_2d(&p4, eps);
        let p2p3 = p2.equals_2d(&p3, eps);
        let p2p4 = p2.equals_2d(&p4, eps);
        let bp1 = is_between(&p3, &p4, &p1, eps);
        let bp2 = is_between(&p3, &p4, &p2, eps);
        let bp3 = is_between(&p1, &p2, &p3, eps);
        let bp4 = is_between(&p1, &p2, &p4, eps);

        let before = self.events;
        if p1p3 {
            self.record(a, ai, 0.0, b, bi, 0.0);
        }
        if p1p4 {
            self.record(a, ai, 0.0, b, bi + 1, 0.0);
        }
        if p2p3 {
            self.record(a, ai + 1, 0.0, b, bi, 0.0);
        }
        if p2p4 {
            self.record(a, ai + 1, 0.0, b, bi + 1, 0.0);
        }
        if bp1 && !(p1p3 || p1p4) {
            self.record(a, ai, 0.0, b, bi, fraction_on(&p3, &p4, &p1));
        }
        if bp2 && !(p2p3 || p2p4) {
            self.record(a, ai + 1, 0.0, b, bi, fraction_on(&p3, &p4, &p2));
        }
        if bp3 && !(p1p3 || p2p3) {
            self.record(a, ai, fraction_on(&p1, &p2, &p3), b, bi, 0.0);
        }
        if bp4 && !(p1p4 || p2p4) {
            self.record(a, ai, fraction_on(&p1, &p2, &p4), b, bi + 1, 0.0);
        }

        // Overlapping edges of one operand: coalesce sides so duplicated internal
        // edges read as interior on both sides.
        let arg = self.graph.edge(a).arg;
        if self.events - before > 1 && arg == self.graph.edge(b).arg {
            let (ea, eb) = (self.graph.edge(a), self.graph.edge(b));
            let pick = |x: Location, y: Location| {
                if x == Location::Interior || y == Location::Interior {
                    Location::Interior
                } else {
                    Location::Exterior
                }
            };
            let left = pick(ea.left.loc[arg], eb.left.loc[arg]);
            let right = pick(ea.right.loc[arg], eb.right.loc[arg]);
            for id in [a, b] {
                let e = self.graph.edge_mut(id);
                e.left.loc[arg] = left;
                e.right.loc[arg] = right;
            }
        }
    }
}
