//! Rotational ordering of edge-ends around each vertex.
//!
//! Purpose
//! - Sort the ends leaving a vertex clockwise, bundle coincident ones into
//!   divisions, and infer the labels of the wedges (partitions) between them.
//! - Propagate the inferred labels back onto ends, their syms and the vertex.
//! - Link in-result ends into rings for the overlay.
//!
//! References
//! - Code cross-refs: `graph::TopoGraph::compare_ends`, `overlay::Overlay`

mod builder;
mod division;
mod egroup;

pub use builder::EdgeGroupBuilder;
pub use division::EdgeGroupDivision;
pub use egroup::EdgeGroup;
