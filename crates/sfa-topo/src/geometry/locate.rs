//! Point-in-geometry classification.

use super::ring::point_in_polygon;
use super::{Coord, Geometry, LineString, Polygon};
use crate::label::Location;
use crate::predicates::is_on_segment;

/// `p` lies on any segment of `line`.
pub fn point_on_line(p: &Coord, line: &LineString, eps: f64) -> bool {
    line.points()
        .windows(2)
        .any(|w| is_on_segment(&w[0], &w[1], p, eps))
}

fn locate_line(p: &Coord, line: &LineString, eps: f64) -> Location {
    if !line.is_closed(eps) {
        let at_end = [line.start(), line.end()]
            .into_iter()
            .flatten()
            .any(|c| c.equals_2d(p, eps));
        if at_end {
            return Location::Boundary;
        }
    }
    if point_on_line(p, line, eps) {
        Location::Interior
    } else {
        Location::Exterior
    }
}

fn locate_polygon(p: &Coord, poly: &Polygon, eps: f64) -> Location {
    if poly.is_empty() {
        return Location::Exterior;
    }
    if poly.rings().any(|r| point_on_line(p, r, eps)) {
        return Location::Boundary;
    }
    if point_in_polygon(p, poly, eps) {
        Location::Interior
    } else {
        Location::Exterior
    }
}

/// Location of `p` relative to `g` in the XY plane.
///
/// Multi-part geometries fold their members with the Mod-2 rule starting from
/// `Exterior`, so a point on an edge shared by two member polygons is interior.
pub fn locate(p: &Coord, g: &Geometry, eps: f64) -> Location {
    if g.is_empty() {
        return Location::Exterior;
    }
    match g {
        Geometry::Point(c) => {
            if c.equals_2d(p, eps) {
                Location::Interior
            } else {
                Location::Exterior
            }
        }
        Geometry::LineString(l) => locate_line(p, l, eps),
        Geometry::Polygon(poly) => locate_polygon(p, poly, eps),
        Geometry::MultiPoint(v) => fold(v.iter().map(|c| locate(p, &Geometry::Point(*c), eps))),
        Geometry::MultiLineString(v) => fold(v.iter().map(|l| locate_line(p, l, eps))),
        Geometry::MultiPolygon(v) | Geometry::PolyhedralSurface(v) | Geometry::Tin(v) => {
            fold(v.iter().map(|poly| locate_polygon(p, poly, eps)))
        }
        Geometry::GeometryCollection(v) => fold(v.iter().map(|m| locate(p, m, eps))),
    }
}

/// Mod-2 fold without the trailing `min` of `Location::merge_mod2`: a single
/// boundary stays boundary even when another member holds the point inside.
#[inline]
fn fold(locs: impl Iterator<Item = Location>) -> Location {
    locs.fold(Location::Exterior, |acc, l| match (acc, l) {
        (Location::Boundary, Location::Boundary) => Location::Interior,
        (Location::Boundary, _) | (_, Location::Boundary) => Location::Boundary,
        _ => acc.min(l),
    })
}

/// `p` is on the interior or boundary of `g`.
#[inline]
pub fn intersects_point(p: &Coord, g: &Geometry, eps: f64) -> bool {
    matches!(locate(p, g, eps), Location::Interior | Location::Boundary)
}
