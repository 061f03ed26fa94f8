use proptest::prelude::*;

use super::*;
use crate::cfg::TopoCfg;
use crate::error::TopoError;
use crate::geometry::rand::{draw_points, draw_points_3d, draw_sphere_points, ReplayToken};
use crate::geometry::{ring_signed_area, Geometry, LineString, Polygon};
use crate::predicates::{orient2d, volume_sign};

fn c(x: f64, y: f64) -> Coord {
    Coord::new(x, y)
}

fn c3(x: f64, y: f64, z: f64) -> Coord {
    Coord::new_3d(x, y, z)
}

fn cfg() -> TopoCfg {
    TopoCfg::default()
}

fn ring_of(g: &Option<Geometry>) -> Vec<Coord> {
    match g {
        Some(Geometry::Polygon(p)) => p.exterior.points().to_vec(),
        other => panic!("expected a polygon, got {other:?}"),
    }
}

fn contains_vertex(ring: &[Coord], p: Coord) -> bool {
    ring.iter().any(|q| q.equals_2d(&p, 1e-9))
}

#[test]
fn snapping_drops_near_duplicates() {
    let pts = [c(0.0, 0.0), c(1.0, 0.0), c(0.0, 1e-9), c(1.0, 1e-9), c(1.0, 1.0)];
    assert_eq!(snap_points(&pts, 1e-7, false).len(), 3);
    // in 3D the z offset keeps points apart
    let pts = [c3(0.0, 0.0, 0.0), c3(0.0, 0.0, 1.0)];
    assert_eq!(snap_points(&pts, 1e-7, true).len(), 2);
    assert_eq!(snap_points(&pts, 1e-7, false).len(), 1);
}

#[test]
fn melkman_keeps_a_convex_ring() {
    let sq = [(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0), (0.0, 0.0)];
    let line = Geometry::LineString(LineString::from_xy(&sq));
    let ring = ring_of(&melkman_hull(&line, cfg()).unwrap());
    assert_eq!(ring.len(), 5);
    assert!(ring[0].equals_2d(&ring[4], 1e-12));
    for &(x, y) in &sq[..4] {
        assert!(contains_vertex(&ring, c(x, y)));
    }
    assert!(ring_signed_area(&ring) > 0.0);
}

#[test]
fn melkman_skips_reflex_vertices() {
    let pts = [(0.0, 0.0), (4.0, 0.0), (2.0, 1.0), (4.0, 4.0), (0.0, 4.0)];
    let line = Geometry::LineString(LineString::from_xy(&pts));
    let ring = ring_of(&melkman_hull(&line, cfg()).unwrap());
    assert_eq!(ring.len(), 5);
    assert!(!contains_vertex(&ring, c(2.0, 1.0)));
    assert!((ring_signed_area(&ring) - 16.0).abs() < 1e-9);
}

#[test]
fn melkman_degenerate_lines_pass_through() {
    let short = Geometry::LineString(LineString::from_xy(&[(0.0, 0.0), (1.0, 1.0)]));
    assert_eq!(melkman_hull(&short, cfg()).unwrap(), Some(short.clone()));
    let straight = Geometry::LineString(LineString::from_xy(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]));
    assert_eq!(melkman_hull(&straight, cfg()).unwrap(), Some(straight.clone()));
    let empty = Geometry::LineString(LineString::default());
    assert_eq!(melkman_hull(&empty, cfg()).unwrap(), None);
}

#[test]
fn melkman_rejects_non_lines() {
    let poly = Geometry::Polygon(Polygon::from_xy(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]));
    assert_eq!(
        melkman_hull(&poly, cfg()),
        Err(TopoError::InvalidGeometryKind {
            expected: "LineString",
            found: "Polygon"
        })
    );
}

#[test]
fn graham_collinear_points_give_a_segment() {
    let pts = [c(1.0, 1.0), c(3.0, 3.0), c(0.0, 0.0), c(2.0, 2.0)];
    let hull = graham_hull(&pts, cfg());
    assert_eq!(hull.len(), 2);
    assert!(contains_vertex(&hull, c(0.0, 0.0)));
    assert!(contains_vertex(&hull, c(3.0, 3.0)));
    match graham_hull_geometry(&Geometry::MultiPoint(pts.to_vec()), cfg()) {
        Some(Geometry::LineString(l)) => assert_eq!(l.len(), 2),
        other => panic!("expected a segment, got {other:?}"),
    }
}

#[test]
fn graham_square_with_inner_and_edge_points() {
    let pts = [
        c(0.0, 0.0),
        c(4.0, 0.0),
        c(4.0, 4.0),
        c(0.0, 4.0),
        c(2.0, 2.0),
        c(1.0, 3.0),
        c(2.0, 0.0),
        c(4.0, 2.0),
    ];
    let hull = graham_hull(&pts, cfg());
    assert_eq!(hull.len(), 5);
    assert!(hull[0].equals_2d(&c(4.0, 0.0), 1e-12));
    assert!(hull[0].equals_2d(&hull[4], 1e-12));
    assert!((ring_signed_area(&hull) - 16.0).abs() < 1e-9);
    assert!(!contains_vertex(&hull, c(2.0, 0.0)));
}

#[test]
fn graham_starts_at_the_lowest_rightmost_point() {
    let pts = [c(0.0, 0.0), c(1.0, 2.0), c(2.0, 0.0), c(1.0, 0.5)];
    let hull = graham_hull(&pts, cfg());
    assert_eq!(hull.len(), 4);
    assert!(hull[0].equals_2d(&c(2.0, 0.0), 1e-12));
    assert!(hull[1].equals_2d(&c(1.0, 2.0), 1e-12));
    assert!(hull[2].equals_2d(&c(0.0, 0.0), 1e-12));
}

#[test]
fn sphere_points_are_all_hull_vertices() {
    let pts = draw_sphere_points(30, 4.0, ReplayToken::new(8, 0));
    match convex_hull_3d_seeded(&pts, 2, cfg()) {
        Some(Geometry::Tin(faces)) => {
            assert_eq!(faces.len(), 2 * pts.len() - 4);
            assert_outward(&faces, &pts);
        }
        other => panic!("expected a TIN, got {other:?}"),
    }
}

#[test]
fn graham_small_inputs() {
    assert_eq!(graham_hull_geometry(&Geometry::MultiPoint(Vec::new()), cfg()), None);
    assert_eq!(
        graham_hull_geometry(&Geometry::MultiPoint(vec![c(1.0, 2.0), c(1.0, 2.0 + 1e-9)]), cfg()),
        Some(Geometry::Point(c(1.0, 2.0)))
    );
    let tri = graham_hull(&[c(0.0, 0.0), c(0.0, 1.0), c(1.0, 0.0)], cfg());
    assert_eq!(tri.len(), 4);
    assert!(ring_signed_area(&tri) > 0.0);
}

#[test]
fn graham_drops_z() {
    let pts = [c3(0.0, 0.0, 5.0), c3(1.0, 0.0, 5.0), c3(0.0, 1.0, 5.0)];
    assert!(graham_hull(&pts, cfg()).iter().all(|p| p.z == 0.0));
}

fn cube() -> Vec<Coord> {
    let mut v = Vec::new();
    for x in [0.0, 1.0] {
        for y in [0.0, 1.0] {
            for z in [0.0, 1.0] {
                v.push(c3(x, y, z));
            }
        }
    }
    v.push(c3(0.5, 0.5, 0.5));
    v
}

fn assert_outward(faces: &[Polygon], pts: &[Coord]) {
    for f in faces {
        let r = f.exterior.points();
        assert_eq!(r.len(), 4);
        for p in pts {
            assert!(volume_sign(&r[0], &r[1], &r[2], p, 1e-6) >= 0, "{p:?} sees {r:?}");
        }
    }
}

#[test]
fn cube_hull_is_twelve_outward_triangles() {
    let pts = cube();
    match convex_hull_3d_seeded(&pts, 7, cfg()) {
        Some(Geometry::Tin(faces)) => {
            assert_eq!(faces.len(), 12);
            assert_outward(&faces, &pts);
            let centre = c3(0.5, 0.5, 0.5);
            assert!(faces.iter().all(|f| !f.exterior.points().iter().any(|q| q.equals_3d(&centre, 1e-9))));
        }
        other => panic!("expected a TIN, got {other:?}"),
    }
}

#[test]
fn hull_3d_is_deterministic_per_seed() {
    let pts = draw_points_3d(40, 5.0, ReplayToken::new(3, 0));
    assert_eq!(convex_hull_3d_seeded(&pts, 11, cfg()), convex_hull_3d_seeded(&pts, 11, cfg()));
    let g = Geometry::MultiPoint(pts);
    assert_eq!(convex_hull_3d(&g, cfg()), convex_hull_3d(&g, cfg()));
}

#[test]
fn coplanar_points_give_a_planar_polygon() {
    let pts = [c3(0.0, 0.0, 1.0), c3(2.0, 0.0, 1.0), c3(2.0, 2.0, 1.0), c3(0.0, 2.0, 1.0), c3(1.0, 1.0, 1.0)];
    match convex_hull_3d_seeded(&pts, 1, cfg()) {
        Some(Geometry::Polygon(p)) => {
            assert_eq!(p.exterior.len(), 5);
            assert!(p.exterior.points().iter().all(|q| (q.z - 1.0).abs() < 1e-9));
            for corner in &pts[..4] {
                assert!(p.exterior.points().iter().any(|q| q.equals_3d(corner, 1e-9)));
            }
        }
        other => panic!("expected a polygon, got {other:?}"),
    }
}

#[test]
fn degenerate_3d_inputs() {
    assert_eq!(convex_hull_3d_seeded(&[], 0, cfg()), None);
    let p = c3(1.0, 2.0, 3.0);
    assert_eq!(convex_hull_3d_seeded(&[p, p], 0, cfg()), Some(Geometry::Point(p)));
    let line = [c3(1.0, 1.0, 1.0), c3(0.0, 0.0, 0.0), c3(3.0, 3.0, 3.0), c3(2.0, 2.0, 2.0)];
    match convex_hull_3d_seeded(&line, 0, cfg()) {
        Some(Geometry::LineString(l)) => {
            assert_eq!(l.len(), 2);
            let ends = l.points();
            assert!(ends.iter().any(|q| q.equals_3d(&line[1], 1e-12)));
            assert!(ends.iter().any(|q| q.equals_3d(&line[2], 1e-12)));
        }
        other => panic!("expected a segment, got {other:?}"),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn graham_hull_encloses_every_point(seed in 0u64..1_000, n in 3usize..60) {
        let pts = draw_points(n, 10.0, ReplayToken::new(seed, 0));
        let hull = graham_hull(&pts, cfg());
        prop_assume!(hull.len() > 3);
        for w in hull.windows(2) {
            for p in &pts {
                prop_assert!(orient2d(&w[0], &w[1], p) >= -1e-4);
            }
        }
        for w in hull.windows(3) {
            prop_assert!(orient2d(&w[0], &w[1], &w[2]) > 0.0);
        }
    }

    #[test]
    fn hull_3d_faces_face_outward(seed in 0u64..1_000, n in 5usize..40) {
        let pts = draw_points_3d(n, 10.0, ReplayToken::new(seed, 1));
        match convex_hull_3d_seeded(&pts, seed, cfg()) {
            Some(Geometry::Tin(faces)) => {
                let mut verts: Vec<Coord> = Vec::new();
                for f in &faces {
                    for q in &f.exterior.points()[..3] {
                        if !verts.iter().any(|v| v.equals_3d(q, 1e-12)) {
                            verts.push(*q);
                        }
                    }
                }
                // closed triangulated sphere
                prop_assert_eq!(faces.len(), 2 * verts.len() - 4);
                assert_outward(&faces, &pts);
            }
            other => prop_assert!(false, "expected a TIN, got {:?}", other),
        }
    }
}
