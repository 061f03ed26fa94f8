//! Region classification of points and edges with respect to the two operands.

use serde::{Deserialize, Serialize};

/// Location of a point set relative to one geometry.
///
/// The discriminants are ordered so that "more specific" locations compare
/// lower; the Mod-2 merge relies on that order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Location {
    Interior = 0,
    Boundary = 1,
    Exterior = 2,
    Unknown = 3,
}

impl Location {
    #[inline]
    pub fn is_known(self) -> bool {
        self != Location::Unknown
    }

    /// Row/column index in a DE-9IM, `None` for `Unknown`.
    #[inline]
    pub fn index(self) -> Option<usize> {
        match self {
            Location::Interior => Some(0),
            Location::Boundary => Some(1),
            Location::Exterior => Some(2),
            Location::Unknown => None,
        }
    }

    /// Mod-2 merge of `other` into `self`: two boundaries cancel to interior,
    /// a single boundary dominates, and then the lower location wins.
    ///
    /// The final `min` runs unconditionally, so merging `Interior` into a
    /// `Boundary` ends up `Interior`.
    #[inline]
    pub fn merge_mod2(self, other: Location) -> Location {
        let mut loc = self;
        if other == Location::Boundary && loc == Location::Boundary {
            loc = Location::Interior;
        } else if other == Location::Boundary || loc == Location::Boundary {
            loc = Location::Boundary;
        }
        if other < loc {
            other
        } else {
            loc
        }
    }
}

/// Per-operand locations plus the topological dimension of the labelled set
/// (`-1` unknown, 0 point, 1 edge, 2 region).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Label {
    pub loc: [Location; 2],
    pub dim: i32,
}

impl Default for Label {
    fn default() -> Self {
        Self::new(-1)
    }
}

impl Label {
    #[inline]
    pub fn new(dim: i32) -> Self {
        Self {
            loc: [Location::Unknown; 2],
            dim,
        }
    }

    #[inline]
    pub fn with(a: Location, b: Location, dim: i32) -> Self {
        Self { loc: [a, b], dim }
    }

    /// Label of dimension `dim` that is known only for operand `arg`.
    #[inline]
    pub fn single(arg: usize, loc: Location, dim: i32) -> Self {
        let mut l = Self::new(dim);
        l.loc[arg] = loc;
        l
    }

    #[inline]
    pub fn get(&self, n: usize) -> Location {
        self.loc[n]
    }

    #[inline]
    pub fn set(&mut self, n: usize, loc: Location) {
        self.loc[n] = loc;
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.loc[0].is_known() && self.loc[1].is_known()
    }

    /// Mod-2 merge for operand `n` only.
    #[inline]
    pub fn copy_label_at(&mut self, other: &Label, n: usize) {
        self.loc[n] = self.loc[n].merge_mod2(other.loc[n]);
    }

    /// Mod-2 merge for both operands.
    #[inline]
    pub fn copy_label(&mut self, other: &Label) {
        self.copy_label_at(other, 0);
        self.copy_label_at(other, 1);
    }

    /// Overwrite with every known location of `other`; unknowns leave `self` as is.
    #[inline]
    pub fn set_known(&mut self, other: &Label) {
        for n in 0..2 {
            if other.loc[n].is_known() {
                self.loc[n] = other.loc[n];
            }
        }
    }

    /// Swap the two operand locations.
    #[inline]
    pub fn flip(&mut self) {
        self.loc.swap(0, 1);
    }
}
