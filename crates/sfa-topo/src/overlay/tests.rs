use proptest::prelude::*;

use super::*;
use crate::geometry::rand::{draw_overlay_pair, ReplayToken, StarShape};
use crate::geometry::{geometry_area, polygon_area, Polygon};

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Geometry {
    Geometry::Polygon(Polygon::from_xy(&[(x0, y0), (x1, y0), (x1, y1), (x0, y1)]))
}

fn square(x0: f64, y0: f64, s: f64) -> Geometry {
    rect(x0, y0, x0 + s, y0 + s)
}

fn area_of(g: &Option<Geometry>) -> f64 {
    g.as_ref().map(geometry_area).unwrap_or(0.0)
}

#[test]
fn admits_follows_the_boolean_table() {
    use Location::*;
    assert!(OverlayOp::Intersection.admits(Interior, Boundary));
    assert!(!OverlayOp::Intersection.admits(Interior, Exterior));
    assert!(OverlayOp::Union.admits(Exterior, Interior));
    assert!(!OverlayOp::Union.admits(Exterior, Exterior));
    assert!(OverlayOp::Difference.admits(Boundary, Exterior));
    assert!(!OverlayOp::Difference.admits(Interior, Interior));
    assert!(OverlayOp::SymDifference.admits(Exterior, Boundary));
    assert!(!OverlayOp::SymDifference.admits(Interior, Boundary));
}

#[test]
fn empty_operands_follow_the_table() {
    let empty = Geometry::GeometryCollection(Vec::new());
    let a = square(0.0, 0.0, 1.0);
    let mut ov = Overlay::new(a.clone(), empty.clone());
    assert_eq!(ov.compute_overlay(OverlayOp::Intersection), None);
    assert_eq!(ov.compute_overlay(OverlayOp::Union), Some(a.clone()));
    assert_eq!(ov.compute_overlay(OverlayOp::Difference), Some(a.clone()));
    assert_eq!(ov.compute_overlay(OverlayOp::SymDifference), Some(a.clone()));

    let mut ov = Overlay::new(empty.clone(), a.clone());
    assert_eq!(ov.compute_overlay(OverlayOp::Difference), None);
    assert_eq!(ov.compute_overlay(OverlayOp::Union), Some(a));

    let mut ov = Overlay::new(empty.clone(), empty);
    for op in OverlayOp::ALL {
        assert_eq!(ov.compute_overlay(op), None);
    }
}

#[test]
fn disjoint_squares_short_circuit() {
    let a = square(0.0, 0.0, 1.0);
    let b = square(2.0, 2.0, 1.0);
    let mut ov = Overlay::new(a.clone(), b.clone());
    assert_eq!(ov.compute_overlay(OverlayOp::Intersection), None);
    assert_eq!(ov.compute_overlay(OverlayOp::Difference), Some(a.clone()));
    match ov.compute_overlay(OverlayOp::Union) {
        Some(Geometry::GeometryCollection(v)) => assert_eq!(v, vec![a, b]),
        other => panic!("expected a collection, got {other:?}"),
    }
}

#[test]
fn overlapping_squares() {
    let mut ov = Overlay::new(square(0.0, 0.0, 2.0), square(1.0, 1.0, 2.0));
    let inter = ov.compute_overlay(OverlayOp::Intersection);
    match &inter {
        Some(Geometry::Polygon(p)) => {
            assert_eq!(p.exterior.len(), 5);
            assert!(p.interiors.is_empty());
            for c in [(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 2.0)] {
                let c = Coord::new(c.0, c.1);
                assert!(p.exterior.points().iter().any(|q| q.equals_2d(&c, 1e-9)));
            }
        }
        other => panic!("expected a polygon, got {other:?}"),
    }
    assert!((area_of(&inter) - 1.0).abs() < 1e-9);
    assert!((area_of(&ov.compute_overlay(OverlayOp::Union)) - 7.0).abs() < 1e-9);
    assert!((area_of(&ov.compute_overlay(OverlayOp::Difference)) - 3.0).abs() < 1e-9);
    assert!((area_of(&ov.compute_overlay(OverlayOp::SymDifference)) - 6.0).abs() < 1e-9);
    assert!(!ov.processing_error());
}

#[test]
fn reused_overlay_matches_fresh_one() {
    let (a, b) = (square(0.0, 0.0, 2.0), square(1.0, 1.0, 2.0));
    let mut reused = Overlay::new(a.clone(), b.clone());
    reused.compute_overlay(OverlayOp::Union);
    for op in OverlayOp::ALL {
        let mut fresh = Overlay::new(a.clone(), b.clone());
        let want = area_of(&fresh.compute_overlay(op));
        let got = area_of(&reused.compute_overlay(op));
        assert!((want - got).abs() < 1e-9, "{op:?}: {want} vs {got}");
    }
}

#[test]
fn contained_square_becomes_a_hole() {
    let mut ov = Overlay::new(square(0.0, 0.0, 4.0), square(1.0, 1.0, 2.0));
    match ov.compute_overlay(OverlayOp::Difference) {
        Some(Geometry::Polygon(p)) => {
            assert_eq!(p.interiors.len(), 1);
            assert!((crate::geometry::polygon_area(&p) - 12.0).abs() < 1e-9);
        }
        other => panic!("expected a polygon with a hole, got {other:?}"),
    }
    assert!((area_of(&ov.compute_overlay(OverlayOp::Intersection)) - 4.0).abs() < 1e-9);
    assert!((area_of(&ov.compute_overlay(OverlayOp::Union)) - 16.0).abs() < 1e-9);
}

#[test]
fn line_clipped_by_square() {
    let line = Geometry::LineString(LineString::from_xy(&[(-1.0, 1.0), (3.0, 1.0)]));
    let mut ov = Overlay::new(line, square(0.0, 0.0, 2.0));
    match ov.compute_overlay(OverlayOp::Intersection) {
        Some(Geometry::LineString(l)) => {
            assert_eq!(l.len(), 2);
            let xs = {
                let mut v = vec![l.points()[0].x, l.points()[1].x];
                v.sort_by(|a, b| a.total_cmp(b));
                v
            };
            assert!((xs[0] - 0.0).abs() < 1e-9 && (xs[1] - 2.0).abs() < 1e-9);
            assert!(l.points().iter().all(|c| (c.y - 1.0).abs() < 1e-9));
        }
        other => panic!("expected a line, got {other:?}"),
    }
}

#[test]
fn self_overlay_is_identity_by_area() {
    let a = square(0.0, 0.0, 3.0);
    let mut ov = Overlay::new(a.clone(), a);
    assert!((area_of(&ov.compute_overlay(OverlayOp::Union)) - 9.0).abs() < 1e-9);
    assert!((area_of(&ov.compute_overlay(OverlayOp::Intersection)) - 9.0).abs() < 1e-9);
    assert_eq!(ov.compute_overlay(OverlayOp::Difference), None);
}

#[test]
fn try_compute_reports_ok_for_clean_input() {
    let mut ov = Overlay::new(square(0.0, 0.0, 2.0), square(1.0, 0.5, 2.0));
    assert!(ov.try_compute_overlay(OverlayOp::Union).is_ok());
}

fn overlap_1d(a0: f64, a1: f64, b0: f64, b1: f64) -> f64 {
    (a1.min(b1) - a0.max(b0)).max(0.0)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn rectangle_areas_add_up(
        ax in 0.0f64..4.0, ay in 0.0f64..4.0, aw in 0.5f64..4.0, ah in 0.5f64..4.0,
        bx in 0.0f64..4.0, by in 0.0f64..4.0, bw in 0.5f64..4.0, bh in 0.5f64..4.0,
    ) {
        let a = rect(ax, ay, ax + aw, ay + ah);
        let b = rect(bx, by, bx + bw, by + bh);
        let inter = overlap_1d(ax, ax + aw, bx, bx + bw) * overlap_1d(ay, ay + ah, by, by + bh);
        let mut ov = Overlay::new(a.clone(), b.clone());
        let i = area_of(&ov.compute_overlay(OverlayOp::Intersection));
        let u = area_of(&ov.compute_overlay(OverlayOp::Union));
        prop_assert!(!ov.processing_error());
        prop_assert!((i - inter).abs() < 1e-6, "intersection {} vs {}", i, inter);
        prop_assert!((u - (aw * ah + bw * bh - inter)).abs() < 1e-6);

        let (area_a, area_b) = (aw * ah, bw * bh);
        assert_boolean_identities(&a, &b, area_a, area_b)?;
    }

    #[test]
    fn star_polygon_identities(seed in 0u64..1_000, n in 5usize..24, overlap in 0.1f64..0.95) {
        let shape = StarShape::new(n, 1.5);
        let (a, b) = draw_overlay_pair(shape, overlap, ReplayToken::new(seed, n as u64));
        let (area_a, area_b) = (polygon_area(&a), polygon_area(&b));
        assert_boolean_identities(&Geometry::Polygon(a), &Geometry::Polygon(b), area_a, area_b)?;
    }
}

/// Operand swaps commute for the symmetric operators and the difference
/// pieces tile each operand.
fn assert_boolean_identities(a: &Geometry, b: &Geometry, area_a: f64, area_b: f64) -> Result<(), TestCaseError> {
    let mut ab = Overlay::new(a.clone(), b.clone());
    let mut ba = Overlay::new(b.clone(), a.clone());
    let areas = |ov: &mut Overlay| OverlayOp::ALL.map(|op| area_of(&ov.compute_overlay(op)));
    let [i, u, d, x] = areas(&mut ab);
    let [i2, u2, d2, x2] = areas(&mut ba);
    prop_assert!(!ab.processing_error() && !ba.processing_error());
    let tol = 1e-6 * (1.0 + area_a + area_b);
    prop_assert!((i - i2).abs() < tol, "intersection {} vs {}", i, i2);
    prop_assert!((u - u2).abs() < tol, "union {} vs {}", u, u2);
    prop_assert!((x - x2).abs() < tol, "symdifference {} vs {}", x, x2);
    prop_assert!((d + i - area_a).abs() < tol, "A-B {} + A∩B {} vs A {}", d, i, area_a);
    prop_assert!((d2 + i - area_b).abs() < tol, "B-A {} + A∩B {} vs B {}", d2, i, area_b);
    prop_assert!((x - (d + d2)).abs() < tol);
    prop_assert!((u - (area_a + area_b - i)).abs() < tol);
    Ok(())
}
