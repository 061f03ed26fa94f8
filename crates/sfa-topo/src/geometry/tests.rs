use super::*;
use crate::cfg::SFA_EPSILON as E;
use crate::label::Location;

fn square(x0: f64, y0: f64, s: f64) -> Polygon {
    Polygon::from_xy(&[(x0, y0), (x0 + s, y0), (x0 + s, y0 + s), (x0, y0 + s)])
}

#[test]
fn dimensions_and_emptiness() {
    assert_eq!(Geometry::Point(Coord::new(0.0, 0.0)).dimension(), 0);
    assert_eq!(Geometry::LineString(LineString::default()).dimension(), -1);
    assert_eq!(Geometry::Polygon(square(0.0, 0.0, 1.0)).dimension(), 2);
    let gc = Geometry::GeometryCollection(vec![
        Geometry::Point(Coord::new(0.0, 0.0)),
        Geometry::LineString(LineString::from_xy(&[(0.0, 0.0), (1.0, 1.0)])),
    ]);
    assert_eq!(gc.dimension(), 1);
    assert!(Geometry::GeometryCollection(vec![]).is_empty());
}

#[test]
fn boundary_dimension_follows_mod2() {
    let open = LineString::from_xy(&[(0.0, 0.0), (1.0, 0.0)]);
    let closed = LineString::from_xy(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
    assert_eq!(Geometry::LineString(open.clone()).boundary_dimension(E), Some(0));
    assert_eq!(Geometry::LineString(closed).boundary_dimension(E), None);
    // two lines chained end to end into a loop: every endpoint visited twice
    let a = LineString::from_xy(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
    let b = LineString::from_xy(&[(1.0, 1.0), (0.0, 0.0)]);
    assert_eq!(Geometry::MultiLineString(vec![a, b]).boundary_dimension(E), None);
    assert_eq!(Geometry::MultiLineString(vec![open]).boundary_dimension(E), Some(0));
    assert_eq!(Geometry::Polygon(square(0.0, 0.0, 1.0)).boundary_dimension(E), Some(1));
    assert_eq!(Geometry::MultiPoint(vec![Coord::new(0.0, 0.0)]).boundary_dimension(E), None);
}

#[test]
fn envelope_overlap_is_eps_expanded() {
    let a = Geometry::Polygon(square(0.0, 0.0, 1.0));
    let b = Geometry::Polygon(square(1.0 + 0.5 * E, 0.0, 1.0));
    let c = Geometry::Polygon(square(2.0, 2.0, 1.0));
    assert!(envelopes_intersect(&a, &b, E));
    assert!(!envelopes_intersect(&a, &c, E));
    assert!(!envelopes_intersect(&a, &Geometry::GeometryCollection(vec![]), E));
}

#[test]
fn ring_area_and_orientation() {
    let sq = square(0.0, 0.0, 2.0);
    assert!((ring_signed_area(sq.exterior.points()) - 4.0).abs() < 1e-12);
    let mut cw = sq.exterior.clone();
    cw.reverse();
    assert_eq!(ring_orientation(cw.points(), E), Orientation::Clockwise);
    let open = LineString::from_xy(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
    assert_eq!(ring_signed_area(open.points()), 0.0);
    let c = ring_centroid(sq.exterior.points()).unwrap();
    assert!(c.equals_2d(&Coord::new(1.0, 1.0), 1e-12));
}

#[test]
fn correct_polygon_orients_rings() {
    let mut shell = square(0.0, 0.0, 4.0).exterior;
    shell.reverse();
    let hole = square(1.0, 1.0, 1.0).exterior;
    let p = correct_polygon(&Polygon::new(shell, vec![hole]), E);
    assert_eq!(ring_orientation(p.exterior.points(), E), Orientation::CounterClockwise);
    assert_eq!(ring_orientation(p.interiors[0].points(), E), Orientation::Clockwise);
    assert!((polygon_area(&p) - 15.0).abs() < 1e-12);
}

#[test]
fn point_in_polygon_respects_holes() {
    let mut hole = square(1.0, 1.0, 1.0).exterior;
    hole.reverse();
    let p = Polygon::new(square(0.0, 0.0, 4.0).exterior, vec![hole]);
    assert!(point_in_polygon(&Coord::new(0.5, 0.5), &p, E));
    assert!(!point_in_polygon(&Coord::new(1.5, 1.5), &p, E));
    assert!(!point_in_polygon(&Coord::new(5.0, 0.5), &p, E));
    // on the shell counts as inside
    assert!(point_in_polygon(&Coord::new(0.0, 2.0), &p, E));
    assert!(point_in_ring(&Coord::new(4.0, 4.0), &p.exterior, E));
}

#[test]
fn locate_classifies_by_kind() {
    let sq = Geometry::Polygon(square(0.0, 0.0, 2.0));
    assert_eq!(locate(&Coord::new(1.0, 1.0), &sq, E), Location::Interior);
    assert_eq!(locate(&Coord::new(2.0, 1.0), &sq, E), Location::Boundary);
    assert_eq!(locate(&Coord::new(3.0, 1.0), &sq, E), Location::Exterior);

    let line = Geometry::LineString(LineString::from_xy(&[(0.0, 0.0), (2.0, 0.0)]));
    assert_eq!(locate(&Coord::new(0.0, 0.0), &line, E), Location::Boundary);
    assert_eq!(locate(&Coord::new(1.0, 0.0), &line, E), Location::Interior);
    assert_eq!(locate(&Coord::new(1.0, 1.0), &line, E), Location::Exterior);

    let pt = Geometry::Point(Coord::new(1.0, 1.0));
    assert_eq!(locate(&Coord::new(1.0, 1.0), &pt, E), Location::Interior);
    assert_eq!(locate(&Coord::new(1.0, 1.0), &Geometry::MultiPoint(vec![]), E), Location::Exterior);
}

#[test]
fn locate_on_shared_edge_of_multipolygon_is_interior() {
    let mp = Geometry::MultiPolygon(vec![square(0.0, 0.0, 1.0), square(1.0, 0.0, 1.0)]);
    assert_eq!(locate(&Coord::new(1.0, 0.5), &mp, E), Location::Interior);
    assert_eq!(locate(&Coord::new(0.0, 0.5), &mp, E), Location::Boundary);
}

#[test]
fn projection_round_trips_and_flattens() {
    let tri = Polygon::new(
        LineString::new(vec![
            Coord::new_3d(0.0, 0.0, 0.0),
            Coord::new_3d(1.0, 0.0, 1.0),
            Coord::new_3d(0.0, 1.0, 1.0),
            Coord::new_3d(0.0, 0.0, 0.0),
        ]),
        vec![],
    );
    let proj = Projection2D::from_polygon(&tri, E).unwrap();
    for c in tri.exterior.points() {
        let p2 = proj.to_2d(c);
        assert!(p2.z.abs() < 1e-12);
        assert!(proj.to_3d(&p2).equals_3d(c, 1e-9));
        assert!(proj.contains_point(c, E));
    }
    assert!(!proj.contains_point(&Coord::new_3d(0.0, 0.0, 1.0), E));
    if let Geometry::Polygon(p) = proj.geometry_to_2d(&Geometry::Polygon(tri.clone()), E) {
        assert_eq!(ring_orientation(p.exterior.points(), E), Orientation::CounterClockwise);
    } else {
        panic!("polygon expected");
    }
}

#[test]
fn projection_of_xy_plane_is_identity_like() {
    let proj = Projection2D::from_points(
        &Coord::new(0.0, 0.0),
        &Coord::new(1.0, 0.0),
        &Coord::new(0.0, 1.0),
        E,
    )
    .unwrap();
    let p = proj.to_2d(&Coord::new_3d(3.0, 4.0, 2.0));
    assert!(p.equals_3d(&Coord::new_3d(3.0, 4.0, 2.0), 1e-12));
}

#[test]
fn projection_rejects_collinear_ring() {
    let line = Polygon::from_xy(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
    assert!(matches!(
        Projection2D::from_polygon(&line, E),
        Err(crate::error::TopoError::DegenerateGeometry { .. })
    ));
}

#[test]
fn parallel_planes_ignore_normal_sign() {
    let a = Projection2D::from_normal(&Coord::new(0.0, 0.0), nalgebra::Vector3::z(), E).unwrap();
    let b = Projection2D::from_normal(&Coord::new_3d(5.0, 5.0, 0.0), -nalgebra::Vector3::z(), E).unwrap();
    let c = Projection2D::from_normal(&Coord::new_3d(0.0, 0.0, 1.0), nalgebra::Vector3::z(), E).unwrap();
    assert!(a.same_plane(&b, E));
    assert!(a.is_parallel(&c, E));
    assert!(!a.same_plane(&c, E));
}

#[test]
fn serde_uses_adjacent_tagging() {
    let g = Geometry::Point(Coord::new(1.0, 2.0));
    let s = serde_json::to_string(&g).unwrap();
    assert!(s.contains("\"type\":\"Point\""));
    let back: Geometry = serde_json::from_str(r#"{"type":"Point","coordinates":{"x":1.0,"y":2.0}}"#).unwrap();
    assert_eq!(back, g);
}
