//! Labelled point/edge graph: arena, per-operand construction, intersection, splitting.
//!
//! Purpose
//! - Turn each operand into polyline edges carrying left/on/right labels and
//!   points carrying their own label.
//! - Resolve all segment intersections (within one operand and across both)
//!   and split edges there so that edges only meet at their endpoints.
//!
//! Ownership
//! - One [`TopoGraph`] per operation owns every edge and edge-end of both
//!   operands. Ids are plain indices; `sym`, `next` and `parent` are ids too.
//!
//! References
//! - Code cross-refs: `operation::GraphOperation`, `group::EdgeGroupBuilder`

mod build;
mod intersect;
mod split;
mod types;

pub use build::GeometryGraph;
pub use intersect::intersect_edges;
pub use types::{EdgeEnd, EdgeId, EdgeNode, EndId, PointNode, TopoGraph};
