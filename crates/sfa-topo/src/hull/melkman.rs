//! Melkman's online hull of a simple polyline.

use std::collections::VecDeque;

use tracing::trace;

use crate::cfg::TopoCfg;
use crate::error::TopoError;
use crate::geometry::{Coord, Geometry, LineString, Polygon};
use crate::predicates::is_left;

/// Convex hull of a simple polyline in linear time.
///
/// Only `LineString` input is accepted. Lines with fewer than three vertices
/// or with every vertex on one line come back unchanged; otherwise the
/// result is a counter-clockwise polygon. Self-intersecting input gives an
/// unspecified (but finite) ring.
pub fn melkman_hull(g: &Geometry, cfg: TopoCfg) -> Result<Option<Geometry>, TopoError> {
    let line = match g {
        Geometry::LineString(l) => l,
        other => return Err(TopoError::kind("LineString", other.kind())),
    };
    if line.is_empty() {
        return Ok(None);
    }
    let eps = cfg.eps;
    let mut pts = line.points();
    if line.is_closed(eps) {
        pts = &pts[..pts.len() - 1];
    }
    if pts.len() < 3 {
        return Ok(Some(g.clone()));
    }

    // first vertex off the line through the first two
    let Some(third) = (2..pts.len()).find(|&i| is_left(&pts[0], &pts[i - 1], &pts[i], eps) != 0) else {
        return Ok(Some(g.clone()));
    };
    let (first, second) = (pts[0], pts[third - 1]);
    let apex = pts[third];
    let mut d: VecDeque<Coord> = if is_left(&first, &second, &apex, eps) > 0 {
        VecDeque::from([apex, first, second, apex])
    } else {
        VecDeque::from([apex, second, first, apex])
    };

    for p in &pts[third + 1..] {
        let n = d.len();
        if is_left(&d[0], &d[1], p, eps) > 0 && is_left(&d[n - 2], &d[n - 1], p, eps) > 0 {
            continue;
        }
        while d.len() > 2 && is_left(&d[0], &d[1], p, eps) <= 0 {
            d.pop_front();
        }
        d.push_front(*p);
        while d.len() > 2 && is_left(&d[d.len() - 2], &d[d.len() - 1], p, eps) <= 0 {
            d.pop_back();
        }
        d.push_back(*p);
    }
    trace!(input = pts.len(), hull = d.len() - 1, "melkman hull");

    let ring: Vec<Coord> = d.into_iter().map(|c| c.with_z(0.0)).collect();
    Ok(Some(Geometry::Polygon(Polygon::new(LineString::new(ring), Vec::new()))))
}
