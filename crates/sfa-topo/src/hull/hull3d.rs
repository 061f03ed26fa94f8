//! Randomized incremental 3D hull over a half-edge mesh.
//!
//! The mesh lives in index arenas for the duration of one build. Faces keep
//! their three corners and lie on the left of their edges; an edge's `right`
//! is the face on the left of its sym. A point sees a face when it lies on
//! the side its counter-clockwise normal points to.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

use super::{graham_hull_geometry, snap_points};
use crate::cfg::{TopoCfg, DEFAULT_HULL_SEED};
use crate::geometry::{Coord, Geometry, LineString, Polygon, Projection2D};
use crate::predicates::{is_collinear_3d, volume_sign};

/// 3D hull of every vertex of `g`, shuffled with the default seed.
pub fn convex_hull_3d(g: &Geometry, cfg: TopoCfg) -> Option<Geometry> {
    convex_hull_3d_seeded(&g.coords(), DEFAULT_HULL_SEED, cfg)
}

/// 3D hull with an explicit insertion-order seed.
///
/// The result is `None`, a `Point`, a two-point `LineString`, a planar
/// `Polygon` for coplanar input, or a `Tin` of outward-facing triangles.
pub fn convex_hull_3d_seeded(points: &[Coord], seed: u64, cfg: TopoCfg) -> Option<Geometry> {
    let pts = snap_points(points, cfg.eps, true);
    match pts.len() {
        0 => None,
        1 => Some(Geometry::Point(pts[0])),
        2 => Some(collinear_hull(&pts)),
        3 => Some(coplanar_hull(&pts, cfg)),
        _ => {
            let mut mesh = HullMesh::new(&pts, cfg.eps);
            match mesh.initialize() {
                Err(Degeneracy::Collinear) => Some(collinear_hull(&pts)),
                Err(Degeneracy::Coplanar) => Some(coplanar_hull(&pts, cfg)),
                Ok(()) => {
                    mesh.insert_remaining(seed);
                    Some(mesh.into_tin())
                }
            }
        }
    }
}

/// Extreme points along the direction of the first two points.
fn collinear_hull(pts: &[Coord]) -> Geometry {
    let o = pts[0].v3();
    let u = pts[1].v3() - o;
    let (mut lo, mut hi) = ((0.0, 0), (u.dot(&u), 1));
    for (i, p) in pts.iter().enumerate().skip(2) {
        let t = (p.v3() - o).dot(&u);
        if t < lo.0 {
            lo = (t, i);
        }
        if t > hi.0 {
            hi = (t, i);
        }
    }
    Geometry::LineString(LineString::new(vec![pts[lo.1], pts[hi.1]]))
}

/// Graham hull in the plane of the first non-collinear triple, lifted back.
fn coplanar_hull(pts: &[Coord], cfg: TopoCfg) -> Geometry {
    let (a, b) = (pts[0], pts[1]);
    let frame = pts[2..]
        .iter()
        .find(|c| !is_collinear_3d(&a, &b, c, cfg.eps))
        .and_then(|c| Projection2D::from_points(&a, &b, c, cfg.eps).ok());
    let Some(frame) = frame else {
        return collinear_hull(pts);
    };
    let flat = Geometry::MultiPoint(pts.iter().map(|c| frame.to_2d(c)).collect());
    match graham_hull_geometry(&flat, cfg) {
        Some(h) => frame.geometry_to_3d(&h),
        None => collinear_hull(pts),
    }
}

enum Degeneracy {
    Collinear,
    Coplanar,
}

#[derive(Clone, Copy, Debug)]
struct HullPoint {
    coord: Coord,
    processed: bool,
    /// Edge from this point to the point being inserted.
    cone: Option<usize>,
}

#[derive(Clone, Copy, Debug)]
struct HullEdge {
    sym: usize,
    ends: [usize; 2],
    left: Option<usize>,
    right: Option<usize>,
    prev: usize,
    next: usize,
    deleted: bool,
}

#[derive(Clone, Copy, Debug)]
struct HullFace {
    corners: [Coord; 3],
    visible: bool,
}

struct HullMesh {
    eps: f64,
    points: Vec<HullPoint>,
    edges: Vec<HullEdge>,
    faces: Vec<HullFace>,
    live_edges: Vec<usize>,
    live_faces: Vec<usize>,
    coned: Vec<usize>,
}

impl HullMesh {
    fn new(pts: &[Coord], eps: f64) -> Self {
        Self {
            eps,
            points: pts
                .iter()
                .map(|&coord| HullPoint {
                    coord,
                    processed: false,
                    cone: None,
                })
                .collect(),
            edges: Vec::new(),
            faces: Vec::new(),
            live_edges: Vec::new(),
            live_faces: Vec::new(),
            coned: Vec::new(),
        }
    }

    /// Edge pair `p0 → p1` / `p1 → p0`; returns the first.
    fn make_edge(&mut self, p0: usize, p1: usize) -> usize {
        let e0 = self.edges.len();
        let e1 = e0 + 1;
        let edge = |sym, ends, own| HullEdge {
            sym,
            ends,
            left: None,
            right: None,
            prev: own,
            next: own,
            deleted: false,
        };
        self.edges.push(edge(e1, [p0, p1], e0));
        self.edges.push(edge(e0, [p1, p0], e1));
        self.live_edges.extend([e0, e1]);
        e0
    }

    fn push_face(&mut self, corners: [Coord; 3]) -> usize {
        self.faces.push(HullFace {
            corners,
            visible: false,
        });
        let f = self.faces.len() - 1;
        self.live_faces.push(f);
        f
    }

    /// Negative when `p` sees the face.
    fn volume_sign(&self, f: usize, p: &Coord) -> i32 {
        let [a, b, c] = self.faces[f].corners;
        volume_sign(&a, &b, &c, p, self.eps)
    }

    fn sym(&self, e: usize) -> usize {
        self.edges[e].sym
    }

    /// Double-sided triangle on the first non-collinear triple, then the
    /// first point off its plane.
    fn initialize(&mut self) -> Result<(), Degeneracy> {
        let n = self.points.len();
        let (a, b) = (self.points[0].coord, self.points[1].coord);
        let third = (2..n)
            .find(|&i| !is_collinear_3d(&a, &b, &self.points[i].coord, self.eps))
            .ok_or(Degeneracy::Collinear)?;
        let c = self.points[third].coord;

        let e0 = self.make_edge(0, 1);
        let e1 = self.make_edge(1, third);
        let e2 = self.make_edge(third, 0);
        for (e, next) in [(e0, e1), (e1, e2), (e2, e0)] {
            self.edges[e].next = next;
            self.edges[next].prev = e;
            let (se, snext) = (self.sym(e), self.sym(next));
            self.edges[snext].next = se;
            self.edges[se].prev = snext;
        }
        let f0 = self.push_face([a, b, c]);
        let f1 = self.push_face([a, c, b]);
        for e in [e0, e1, e2] {
            let s = self.sym(e);
            self.edges[e].left = Some(f0);
            self.edges[e].right = Some(f1);
            self.edges[s].left = Some(f1);
            self.edges[s].right = Some(f0);
        }

        let fourth = (2..n)
            .find(|&i| self.volume_sign(f0, &self.points[i].coord) != 0)
            .ok_or(Degeneracy::Coplanar)?;
        for i in [0, 1, third] {
            self.points[i].processed = true;
        }
        self.add_one(fourth);
        Ok(())
    }

    fn insert_remaining(&mut self, seed: u64) {
        let mut order: Vec<usize> = (0..self.points.len())
            .filter(|&i| !self.points[i].processed)
            .collect();
        order.shuffle(&mut StdRng::seed_from_u64(seed));
        for i in order {
            self.add_one(i);
        }
        debug!(
            points = self.points.len(),
            faces = self.live_faces.len(),
            "3d hull built"
        );
    }

    /// Insert point `p`; false when it lies inside or on the hull.
    fn add_one(&mut self, p: usize) -> bool {
        self.points[p].processed = true;
        let c = self.points[p].coord;
        let mut any = false;
        for k in 0..self.live_faces.len() {
            let f = self.live_faces[k];
            if self.volume_sign(f, &c) < 0 {
                self.faces[f].visible = true;
                any = true;
            }
        }
        if !any {
            return false;
        }

        // horizon edges have a visible left and a hidden right
        let n = self.live_edges.len();
        for k in 0..n {
            let e = self.live_edges[k];
            let seen = |f: Option<usize>| f.is_some_and(|f| self.faces[f].visible);
            let (left_v, right_v) = (seen(self.edges[e].left), seen(self.edges[e].right));
            if left_v {
                self.edges[e].left = None;
            }
            if right_v {
                self.edges[e].right = None;
            }
            if left_v && right_v {
                let s = self.sym(e);
                self.edges[e].deleted = true;
                self.edges[s].deleted = true;
            } else if left_v {
                self.link_face_edge(e, p);
            }
        }
        self.clean();
        true
    }

    fn cone_edge(&mut self, v: usize, p: usize) -> usize {
        if let Some(e) = self.points[v].cone {
            return e;
        }
        let e = self.make_edge(v, p);
        self.points[v].cone = Some(e);
        self.coned.push(v);
        e
    }

    /// Triangle on horizon edge `e` with apex `p`, reusing cone edges shared
    /// with neighbouring new triangles.
    fn link_face_edge(&mut self, e: usize, p: usize) -> usize {
        let [a, b] = self.edges[e].ends;
        let f = self.push_face([self.points[a].coord, self.points[b].coord, self.points[p].coord]);
        let next = self.cone_edge(b, p);
        let ca = self.cone_edge(a, p);
        let prev = self.sym(ca);

        self.edges[e].next = next;
        self.edges[next].prev = e;
        self.edges[e].prev = prev;
        self.edges[prev].next = e;
        self.edges[next].next = prev;
        self.edges[prev].prev = next;

        for x in [e, next, prev] {
            self.edges[x].left = Some(f);
        }
        let se = self.sym(e);
        self.edges[se].right = Some(f);
        for x in [next, prev] {
            let s = self.sym(x);
            self.edges[x].right = self.edges[s].left;
            self.edges[s].right = Some(f);
        }
        debug_assert_eq!(self.edges[self.edges[next].next].next, e);
        debug_assert_eq!(self.edges[self.edges[prev].prev].prev, e);
        f
    }

    fn clean(&mut self) {
        for v in self.coned.drain(..) {
            self.points[v].cone = None;
        }
        let edges = &self.edges;
        self.live_edges.retain(|&e| !edges[e].deleted);
        let faces = &self.faces;
        self.live_faces.retain(|&f| !faces[f].visible);
    }

    fn into_tin(self) -> Geometry {
        Geometry::Tin(
            self.live_faces
                .iter()
                .map(|&f| {
                    let [a, b, c] = self.faces[f].corners;
                    Polygon::new(LineString::new(vec![a, b, c, a]), Vec::new())
                })
                .collect(),
        )
    }
}
