//! Ring walking and polygon assembly.

use tracing::warn;

use crate::geometry::{point_in_ring, ring_orientation, ring_signed_area, LineString, Orientation, Polygon};
use crate::graph::EndId;

use super::Overlay;

impl Overlay {
    /// Follow `next` from every unvisited kept end until the ring closes.
    ///
    /// A revisit closes the ring by force and raises `processing_error`.
    /// Rings whose area vanishes relative to their first vertex are dropped.
    pub(super) fn minimal_rings(&mut self, area: &[EndId]) -> Vec<LineString> {
        let eps = self.op.cfg.eps;
        let mut rings = Vec::new();
        for &start in area {
            if self.op.graph.end(start).visited {
                continue;
            }
            let mut pts = vec![self.output_coord(self.op.graph.origin(start).coord)];
            let mut e = start;
            loop {
                self.op.graph.end_mut(e).visited = true;
                self.op.graph.append_end_to_line(e, &mut pts);
                if pts.len() > 1 && pts[0].equals_2d(&pts[pts.len() - 1], eps) {
                    break;
                }
                match self.op.graph.end(e).next {
                    None => break,
                    Some(n) if self.op.graph.end(n).visited => {
                        warn!(end = n.0, "ring walk revisited an end; closing ring");
                        pts.push(pts[0]);
                        self.processing_error = true;
                        break;
                    }
                    Some(n) => e = n,
                }
            }
            let area = ring_signed_area(&pts).abs();
            if area <= pts[0].v3().norm() * eps {
                continue;
            }
            rings.push(LineString::new(pts));
        }
        rings
    }
}

/// Counter-clockwise rings become shells; every other ring becomes a hole of
/// the smallest shell containing its first vertex.
pub(super) fn construct_polygons(rings: Vec<LineString>, eps: f64) -> Vec<Polygon> {
    let mut shells = Vec::new();
    let mut holes = Vec::new();
    for r in rings {
        match ring_orientation(r.points(), eps) {
            Orientation::CounterClockwise => shells.push(Polygon::new(r, Vec::new())),
            _ => holes.push(r),
        }
    }
    for hole in holes {
        let Some(p) = hole.start().copied() else {
            continue;
        };
        let host = shells
            .iter()
            .enumerate()
            .filter(|(_, s)| point_in_ring(&p, &s.exterior, eps))
            .min_by(|(_, a), (_, b)| {
                let (aa, ab) = (ring_signed_area(a.exterior.points()), ring_signed_area(b.exterior.points()));
                aa.total_cmp(&ab)
            })
            .map(|(i, _)| i);
        match host {
            Some(i) => shells[i].interiors.push(hole),
            None => warn!(x = p.x, y = p.y, "hole without a containing shell dropped"),
        }
    }
    shells
}
