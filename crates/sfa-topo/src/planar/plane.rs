//! Partition of two 3D operands into coplanar 2D graph operations.

use tracing::{debug, trace};

use crate::cfg::TopoCfg;
use crate::error::TopoError;
use crate::geometry::{Coord, Geometry, LineString, Polygon, Projection2D};
use crate::operation::GraphOperation;
use crate::predicates::is_collinear_3d;

use super::stitch;

/// Helper points tried, in order, to span a plane through a lone segment.
const SEGMENT_HELPERS: [Coord; 4] = [
    Coord::new_3d(0.0, 0.0, 0.0),
    Coord::new_3d(1.0, 0.0, 0.0),
    Coord::new_3d(0.0, 1.0, 0.0),
    Coord::new_3d(0.0, 0.0, 1.0),
];

/// One plane: its 2D frame and the operand parts that lie in it.
///
/// Parts collect in plane coordinates until `construct` turns them into a
/// `GraphOperation`; afterwards stitched pieces go straight into its graphs.
#[derive(Clone, Debug)]
pub struct PlanarGraph {
    frame: Projection2D,
    parts: [Vec<Geometry>; 2],
    op: Option<GraphOperation>,
}

impl PlanarGraph {
    pub fn new(frame: Projection2D) -> Self {
        Self {
            frame,
            parts: [Vec::new(), Vec::new()],
            op: None,
        }
    }

    #[inline]
    pub fn frame(&self) -> &Projection2D {
        &self.frame
    }

    /// Project a 3D part of operand `arg` into this plane.
    pub fn add_3d(&mut self, g: &Geometry, arg: usize, eps: f64) {
        self.parts[arg].push(self.frame.geometry_to_2d(g, eps).flattened());
    }

    /// Parts of operand `arg` in plane coordinates.
    pub fn parts(&self, arg: usize) -> &[Geometry] {
        match &self.op {
            Some(op) => match op.geometry(arg) {
                Geometry::GeometryCollection(v) => v,
                other => std::slice::from_ref(other),
            },
            None => &self.parts[arg],
        }
    }

    /// Build both geometry graphs from the collected parts.
    pub fn construct(&mut self, cfg: TopoCfg) {
        if self.op.is_some() {
            return;
        }
        let [a, b] = std::mem::take(&mut self.parts);
        let mut op = GraphOperation::new(
            Geometry::GeometryCollection(a),
            Geometry::GeometryCollection(b),
            cfg,
        );
        op.construct_graphs();
        self.op = Some(op);
    }

    #[inline]
    pub fn operation(&self) -> Option<&GraphOperation> {
        self.op.as_ref()
    }

    #[inline]
    pub fn operation_mut(&mut self) -> Option<&mut GraphOperation> {
        self.op.as_mut()
    }

    /// Frame and constructed operation; `None` before `construct`.
    pub fn into_parts(self) -> Option<(Projection2D, GraphOperation)> {
        let frame = self.frame;
        self.op.map(|op| (frame, op))
    }
}

#[derive(Default)]
struct Queue {
    polygons: Vec<Polygon>,
    segments: Vec<(Coord, Coord)>,
    points: Vec<Coord>,
}

impl Queue {
    fn push(&mut self, g: &Geometry) {
        match g {
            Geometry::Point(c) => self.points.push(*c),
            Geometry::MultiPoint(v) => self.points.extend_from_slice(v),
            Geometry::LineString(l) => self.push_line(l),
            Geometry::MultiLineString(v) => v.iter().for_each(|l| self.push_line(l)),
            Geometry::Polygon(p) => self.polygons.push(p.clone()),
            Geometry::MultiPolygon(v) | Geometry::PolyhedralSurface(v) | Geometry::Tin(v) => {
                self.polygons.extend(v.iter().cloned())
            }
            Geometry::GeometryCollection(v) => v.iter().for_each(|g| self.push(g)),
        }
    }

    fn push_line(&mut self, l: &LineString) {
        match l.points() {
            [] => {}
            [p] => self.points.push(*p),
            pts => self.segments.extend(pts.windows(2).map(|w| (w[0], w[1]))),
        }
    }
}

/// Both operands split by plane, with cross-plane intersections stitched in.
#[derive(Clone, Debug)]
pub struct PlanarGraphOperation {
    cfg: TopoCfg,
    planes: Vec<PlanarGraph>,
    isolated_points: [Vec<Coord>; 2],
}

impl PlanarGraphOperation {
    /// Fails when a polygon has no determinable plane.
    pub fn new(a: &Geometry, b: &Geometry, cfg: TopoCfg) -> Result<Self, TopoError> {
        let mut queues = [Queue::default(), Queue::default()];
        queues[0].push(a);
        queues[1].push(b);
        let mut this = Self {
            cfg,
            planes: Vec::new(),
            isolated_points: [Vec::new(), Vec::new()],
        };
        for (arg, q) in queues.iter().enumerate() {
            for p in &q.polygons {
                this.add_polygon(p, arg)?;
            }
        }
        for (arg, q) in queues.iter().enumerate() {
            for &(p, r) in &q.segments {
                this.add_segment(p, r, arg);
            }
        }
        for (arg, q) in queues.iter().enumerate() {
            for p in &q.points {
                this.add_point(p, arg);
            }
        }
        for plane in &mut this.planes {
            plane.construct(cfg);
        }
        let stitched = stitch::intersect_planes(&mut this.planes, cfg.eps);
        debug!(
            planes = this.planes.len(),
            stitched,
            isolated_a = this.isolated_points[0].len(),
            isolated_b = this.isolated_points[1].len(),
            "planar graphs built"
        );
        Ok(this)
    }

    #[inline]
    pub fn cfg(&self) -> TopoCfg {
        self.cfg
    }

    #[inline]
    pub fn planes(&self) -> &[PlanarGraph] {
        &self.planes
    }

    /// Points of operand `arg` that lie in no plane.
    #[inline]
    pub fn isolated_points(&self, arg: usize) -> &[Coord] {
        &self.isolated_points[arg]
    }

    /// Constructed per-plane operations plus the isolated points.
    pub fn into_parts(self) -> (Vec<(Projection2D, GraphOperation)>, [Vec<Coord>; 2]) {
        let planes = self.planes.into_iter().filter_map(PlanarGraph::into_parts).collect();
        (planes, self.isolated_points)
    }

    fn add_to_plane(&mut self, frame: Projection2D, g: &Geometry, arg: usize) {
        let eps = self.cfg.eps;
        match self.planes.iter_mut().find(|p| p.frame().same_plane(&frame, eps)) {
            Some(plane) => plane.add_3d(g, arg, eps),
            None => {
                let mut plane = PlanarGraph::new(frame);
                plane.add_3d(g, arg, eps);
                trace!(planes = self.planes.len() + 1, "new plane");
                self.planes.push(plane);
            }
        }
    }

    fn add_polygon(&mut self, p: &Polygon, arg: usize) -> Result<(), TopoError> {
        if p.is_empty() {
            return Ok(());
        }
        let frame = Projection2D::from_polygon(p, self.cfg.eps)?;
        self.add_to_plane(frame, &Geometry::Polygon(p.clone()), arg);
        Ok(())
    }

    fn add_segment(&mut self, p: Coord, r: Coord, arg: usize) {
        let eps = self.cfg.eps;
        if p.equals_3d(&r, eps) {
            self.add_point(&p, arg);
            return;
        }
        let seg = Geometry::LineString(LineString::new(vec![p, r]));
        if let Some(plane) = self
            .planes
            .iter_mut()
            .find(|pl| pl.frame().contains_point(&p, eps) && pl.frame().contains_point(&r, eps))
        {
            plane.add_3d(&seg, arg, eps);
            return;
        }
        let frame = SEGMENT_HELPERS
            .iter()
            .filter(|h| !is_collinear_3d(&p, &r, h, eps))
            .find_map(|h| Projection2D::from_points(&p, &r, h, eps).ok());
        match frame {
            Some(frame) => self.add_to_plane(frame, &seg, arg),
            // unreachable for a non-degenerate segment: no line holds all four helpers
            None => self.isolated_points[arg].extend([p, r]),
        }
    }

    fn add_point(&mut self, p: &Coord, arg: usize) {
        let eps = self.cfg.eps;
        match self.planes.iter_mut().find(|pl| pl.frame().contains_point(p, eps)) {
            Some(plane) => plane.add_3d(&Geometry::Point(*p), arg, eps),
            None => self.isolated_points[arg].push(*p),
        }
    }
}
