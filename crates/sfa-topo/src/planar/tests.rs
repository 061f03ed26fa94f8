use nalgebra::Vector3;

use super::stitch::{intersection_line, pieces_on_line, PlaneLine};
use super::*;
use crate::geometry::{geometry_area, LineString, Polygon};
use crate::operation::GraphOperation;
use crate::relate::Relate;

fn c3(x: f64, y: f64, z: f64) -> Coord {
    Coord::new_3d(x, y, z)
}

fn poly3(pts: &[(f64, f64, f64)]) -> Geometry {
    let mut ring: Vec<Coord> = pts.iter().map(|&(x, y, z)| c3(x, y, z)).collect();
    ring.push(ring[0]);
    Geometry::Polygon(Polygon::new(LineString::new(ring), Vec::new()))
}

fn flat_square(x0: f64, y0: f64, s: f64, z: f64) -> Geometry {
    poly3(&[(x0, y0, z), (x0 + s, y0, z), (x0 + s, y0 + s, z), (x0, y0 + s, z)])
}

/// Upright square in the plane x = 1, spanning y in [-1, 3] and z in [-1, 1].
fn wall() -> Geometry {
    poly3(&[(1.0, -1.0, -1.0), (1.0, 3.0, -1.0), (1.0, 3.0, 1.0), (1.0, -1.0, 1.0)])
}

fn cfg() -> TopoCfg {
    TopoCfg::default()
}

#[test]
fn plane_line_of_floor_and_wall() {
    let eps = cfg().eps;
    let floor = Projection2D::from_normal(&c3(0.0, 0.0, 0.0), Vector3::z(), eps).unwrap();
    let wall = Projection2D::from_normal(&c3(1.0, 0.0, 0.0), Vector3::x(), eps).unwrap();
    let line = intersection_line(&floor, &wall).unwrap();
    assert!((line.dir.y.abs() - 1.0).abs() < 1e-12);
    assert!(floor.contains_point(&Coord::from_v3(line.point), eps));
    assert!(wall.contains_point(&Coord::from_v3(line.point), eps));
    assert_eq!(intersection_line(&floor, &floor), None);
}

#[test]
fn plane_line_with_tied_direction_axes() {
    let eps = cfg().eps;
    let a = Projection2D::from_normal(&c3(0.0, 0.0, 2.0), Vector3::z(), eps).unwrap();
    let b = Projection2D::from_normal(&c3(1.0, 0.0, 0.0), Vector3::new(1.0, -1.0, 0.0), eps).unwrap();
    let line = intersection_line(&a, &b).unwrap();
    let p = Coord::from_v3(line.point);
    assert!(a.contains_point(&p, eps) && b.contains_point(&p, eps));
    let q = Coord::from_v3(line.point + line.dir * 5.0);
    assert!(a.contains_point(&q, eps) && b.contains_point(&q, eps));
}

#[test]
fn square_is_cut_into_one_chord() {
    let eps = cfg().eps;
    let mut op = GraphOperation::new(
        flat_square(0.0, 0.0, 2.0, 0.0),
        Geometry::GeometryCollection(Vec::new()),
        cfg(),
    );
    op.construct_graphs();
    let frame = Projection2D::from_normal(&c3(0.0, 0.0, 0.0), Vector3::z(), eps).unwrap();
    let line = PlaneLine {
        point: Vector3::new(1.0, 0.0, 0.0),
        dir: Vector3::y(),
    };
    let pieces = pieces_on_line(&op, &frame, &line, eps);
    assert!(pieces.points.is_empty());
    assert_eq!(pieces.edges.len(), 1);
    let chord = &pieces.edges[0];
    assert_eq!(chord.on.loc[0], Location::Interior);
    assert_eq!(chord.left.loc[0], Location::Exterior);
    let ys: Vec<f64> = chord.points.iter().map(|p| p.coord.y).collect();
    assert!(chord.points.iter().all(|p| (p.coord.x - 1.0).abs() < 1e-12));
    assert!((ys[0] - 0.0).abs() < 1e-12 && (ys[1] - 2.0).abs() < 1e-12);
    assert!(chord.points.iter().all(|p| p.label.loc[0] == Location::Boundary));
}

#[test]
fn line_touching_a_corner_gives_a_point() {
    let eps = cfg().eps;
    let mut op = GraphOperation::new(
        flat_square(0.0, 0.0, 2.0, 0.0),
        Geometry::GeometryCollection(Vec::new()),
        cfg(),
    );
    op.construct_graphs();
    let frame = Projection2D::from_normal(&c3(0.0, 0.0, 0.0), Vector3::z(), eps).unwrap();
    // x + y = 4 touches the square only at (2, 2)
    let line = PlaneLine {
        point: Vector3::new(2.0, 2.0, 0.0),
        dir: Vector3::new(1.0, -1.0, 0.0).normalize(),
    };
    let pieces = pieces_on_line(&op, &frame, &line, eps);
    assert!(pieces.edges.is_empty());
    assert!(pieces.points.len() <= 1);
}

#[test]
fn coplanar_parts_share_a_plane() {
    let line = Geometry::LineString(LineString::new(vec![c3(-1.0, 1.0, 5.0), c3(3.0, 1.0, 5.0), c3(3.0, 4.0, 5.0)]));
    let b = Geometry::GeometryCollection(vec![flat_square(0.0, 0.0, 2.0, 5.0), Geometry::Point(c3(1.0, 1.0, 5.0))]);
    let op = PlanarGraphOperation::new(&line, &b, cfg()).unwrap();
    assert_eq!(op.planes().len(), 1);
    assert!(op.isolated_points(0).is_empty() && op.isolated_points(1).is_empty());
    let plane = &op.planes()[0];
    assert_eq!(plane.parts(0).len(), 2);
    assert_eq!(plane.parts(1).len(), 2);
}

#[test]
fn parallel_planes_and_stray_points() {
    let a = Geometry::GeometryCollection(vec![flat_square(0.0, 0.0, 1.0, 0.0), Geometry::Point(c3(7.0, 7.0, 7.0))]);
    let b = flat_square(0.0, 0.0, 1.0, 1.0);
    let op = PlanarGraphOperation::new(&a, &b, cfg()).unwrap();
    assert_eq!(op.planes().len(), 2);
    assert_eq!(op.isolated_points(0), &[c3(7.0, 7.0, 7.0)]);
    // parallel planes exchange nothing
    for plane in op.planes() {
        let n = plane.parts(0).len() + plane.parts(1).len();
        assert_eq!(n, 1);
    }
}

#[test]
fn degenerate_polygon_is_rejected() {
    let sliver = poly3(&[(0.0, 0.0, 0.0), (1.0, 1.0, 1.0), (2.0, 2.0, 2.0)]);
    let sq = flat_square(0.0, 0.0, 1.0, 0.0);
    assert!(matches!(
        RelateCompute3D::new(&sliver, &sq),
        Err(TopoError::DegenerateGeometry { .. })
    ));
    assert!(Relate::new_3d(&sq, &sliver).is_err());
}

#[test]
fn crossing_planes_meet_in_a_segment() {
    let mut rc = RelateCompute3D::new(&flat_square(0.0, 0.0, 2.0, 0.0), &wall()).unwrap();
    let im = rc.compute_im();
    assert_eq!(im.get(Location::Interior, Location::Interior), 1);
    assert_eq!(im.get(Location::Exterior, Location::Exterior), 3);
    assert_eq!(im.get(Location::Interior, Location::Exterior), 2);
    assert_eq!(im.get(Location::Exterior, Location::Interior), 2);
    assert!(Relate::new_3d(&flat_square(0.0, 0.0, 2.0, 0.0), &wall()).unwrap().intersects());
}

#[test]
fn stacked_squares_are_disjoint_in_3d() {
    let a = flat_square(0.0, 0.0, 1.0, 0.0);
    let b = flat_square(0.0, 0.0, 1.0, 1.0);
    let mut r = Relate::new_3d(&a, &b).unwrap();
    assert!(r.disjoint());
    assert_eq!(r.matrix().get(Location::Exterior, Location::Exterior), 3);
    // the planar view sees the same footprint twice
    assert!(Relate::new(&a, &b).equals());
}

#[test]
fn isolated_points_relate_by_coordinate() {
    let p = Geometry::Point(c3(5.0, 5.0, 5.0));
    let mut same = RelateCompute3D::new(&p, &p).unwrap();
    let im = same.compute_im();
    assert_eq!(im.get(Location::Interior, Location::Interior), 0);
    assert_eq!(im.get(Location::Interior, Location::Exterior), -1);

    let q = Geometry::Point(c3(5.0, 5.0, 6.0));
    let im = RelateCompute3D::new(&p, &q).unwrap().compute_im();
    assert_eq!(im.get(Location::Interior, Location::Interior), -1);
    assert_eq!(im.get(Location::Interior, Location::Exterior), 0);
    assert_eq!(im.get(Location::Exterior, Location::Interior), 0);
}

#[test]
fn coplanar_overlay_is_lifted_back() {
    let a = flat_square(0.0, 0.0, 2.0, 2.0);
    let b = flat_square(1.0, 1.0, 2.0, 2.0);
    let mut ov = Overlay3D::new(&a, &b).unwrap();
    let inter = ov.compute_overlay(OverlayOp::Intersection);
    match &inter {
        Some(g @ Geometry::Polygon(_)) => {
            assert!((geometry_area(g) - 1.0).abs() < 1e-9);
            assert!(g.coords().iter().all(|c| (c.z - 2.0).abs() < 1e-9));
        }
        other => panic!("expected a polygon, got {other:?}"),
    }
    let union = ov.compute_overlay(OverlayOp::Union);
    assert!((union.as_ref().map(geometry_area).unwrap_or(0.0) - 7.0).abs() < 1e-9);
    assert!(!ov.processing_error());
}

#[test]
fn isolated_points_follow_the_operator() {
    let a = Geometry::Point(c3(9.0, 9.0, 9.0));
    let b = flat_square(0.0, 0.0, 1.0, 0.0);
    let mut ov = Overlay3D::new(&a, &b).unwrap();
    assert_eq!(ov.compute_overlay(OverlayOp::Intersection), None);
    assert_eq!(ov.compute_overlay(OverlayOp::Difference), Some(a.clone()));
    match ov.compute_overlay(OverlayOp::Union) {
        Some(Geometry::GeometryCollection(v)) => {
            assert_eq!(v.len(), 2);
            assert!(v.contains(&a));
        }
        other => panic!("expected a collection, got {other:?}"),
    }
}
