//! Tolerances and defaults.
//!
//! Policy
//! - Every numerical decision in the engine uses one absolute epsilon. The value
//!   is fixed by default; callers that work at unusual scales pass their own
//!   `TopoCfg` to the `with_cfg` constructors.

/// Absolute tolerance used for point equality, orientation and envelope tests.
pub const SFA_EPSILON: f64 = 1e-7;

/// Seed used by `convex_hull_3d` when the caller does not pick one.
pub(crate) const DEFAULT_HULL_SEED: u64 = 0x5fa7_0900;

/// Engine configuration (tolerances).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TopoCfg {
    pub eps: f64,
}

impl Default for TopoCfg {
    fn default() -> Self {
        Self { eps: SFA_EPSILON }
    }
}

impl TopoCfg {
    #[inline]
    pub fn with_eps(eps: f64) -> Self {
        Self { eps }
    }
}
