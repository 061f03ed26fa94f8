//! Planar topology engine: DE-9IM relate, overlay booleans and convex hulls.
//!
//! Layers (bottom-up)
//! - `geometry`, `predicates`, `label`, `de9im`: plain data and exact-ish tests
//!   under one absolute tolerance (`cfg::SFA_EPSILON`).
//! - `graph`: per-operand edge/point graphs, noding and splitting.
//! - `group`, `operation`: edge ends grouped around nodes and labelled
//!   against both operands.
//! - `overlay`, `relate`: the two consumers of a labelled graph.
//! - `planar`: piecewise-planar 3D operands, one 2D engine run per plane.
//! - `hull`: Melkman, Graham and a randomized incremental 3D hull.
//!
//! API Policy
//! - Internal crate; breaking changes are fine when they simplify callers.
//!
//! Code cross-refs: `overlay::Overlay`, `relate::Relate`, `planar::Overlay3D`

pub mod cfg;
pub mod de9im;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod group;
pub mod hull;
pub mod label;
pub mod operation;
pub mod overlay;
pub mod planar;
pub mod predicates;
pub mod relate;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cfg::{TopoCfg, SFA_EPSILON};
pub use error::TopoError;

/// Common exports for callers.
pub mod prelude {
    pub use crate::cfg::{TopoCfg, SFA_EPSILON};
    pub use crate::de9im::De9im;
    pub use crate::error::TopoError;
    pub use crate::geometry::rand::{
        draw_overlay_pair, draw_points, draw_points_3d, draw_sphere_points, draw_star, ReplayToken, StarShape,
    };
    pub use crate::geometry::{Coord, Geometry, LineString, Polygon, Projection2D};
    pub use crate::hull::{convex_hull_3d, convex_hull_3d_seeded, graham_hull, graham_hull_geometry, melkman_hull};
    pub use crate::label::Location;
    pub use crate::overlay::{Overlay, OverlayOp};
    pub use crate::planar::{Overlay3D, RelateCompute3D};
    pub use crate::relate::{Relate, RelateCompute};
}
