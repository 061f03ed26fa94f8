//! Dimensionally Extended 9-Intersection Matrix.
//!
//! Cells are indexed by (location in A, location in B) over
//! {Interior, Boundary, Exterior}; values are -1 (empty) or a dimension 0..=3.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TopoError;
use crate::label::{Label, Location};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct De9im {
    cells: [i32; 9],
}

impl Default for De9im {
    fn default() -> Self {
        Self { cells: [-1; 9] }
    }
}

impl De9im {
    /// Matrix from a 9-character string: `T` → 0, `F` and `*` → -1, digits as is.
    pub fn from_pattern_str(s: &str) -> Result<Self, TopoError> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 9 {
            return Err(TopoError::pattern(s));
        }
        let mut m = Self::default();
        for (i, c) in chars.into_iter().enumerate() {
            m.cells[i] = match c {
                'T' | 't' => 0,
                'F' | 'f' | '*' => -1,
                '0' => 0,
                '1' => 1,
                '2' => 2,
                '3' => 3,
                _ => return Err(TopoError::pattern(s)),
            };
        }
        Ok(m)
    }

    #[inline]
    fn idx(a: Location, b: Location) -> Option<usize> {
        Some(a.index()? * 3 + b.index()?)
    }

    /// Cell value; `Unknown` locations read as empty.
    #[inline]
    pub fn get(&self, a: Location, b: Location) -> i32 {
        Self::idx(a, b).map_or(-1, |i| self.cells[i])
    }

    #[inline]
    pub fn set(&mut self, a: Location, b: Location, dim: i32) {
        if let Some(i) = Self::idx(a, b) {
            self.cells[i] = dim;
        }
    }

    /// Raise a cell to `dim` if it is currently lower.
    #[inline]
    pub fn set_at_least(&mut self, a: Location, b: Location, dim: i32) {
        if let Some(i) = Self::idx(a, b) {
            self.cells[i] = self.cells[i].max(dim);
        }
    }

    /// Fold a label in; labels with an unknown side are ignored.
    #[inline]
    pub fn set_at_least_label(&mut self, label: &Label) {
        if label.is_complete() {
            self.set_at_least(label.loc[0], label.loc[1], label.dim);
        }
    }

    /// Cell-wise maximum with another matrix.
    pub fn merge_at_least(&mut self, other: &De9im) {
        for (c, o) in self.cells.iter_mut().zip(other.cells.iter()) {
            *c = (*c).max(*o);
        }
    }

    pub fn transpose(&self) -> De9im {
        let c = self.cells;
        De9im {
            cells: [c[0], c[3], c[6], c[1], c[4], c[7], c[2], c[5], c[8]],
        }
    }

    /// Raw cells in row-major order.
    #[inline]
    pub fn cells(&self) -> [i32; 9] {
        self.cells
    }

    /// Three lines, one per row of A's location.
    pub fn to_matrix_string(&self) -> String {
        let s = self.to_string();
        format!("{}\n{}\n{}", &s[0..3], &s[3..6], &s[6..9])
    }

    /// Match against a pattern over `T t F f * 0 1 2`.
    ///
    /// Patterns shorter than nine characters never match; extra characters are ignored.
    pub fn compare(&self, pattern: &str) -> Result<bool, TopoError> {
        let chars: Vec<char> = pattern.chars().collect();
        if chars.len() < 9 {
            return Ok(false);
        }
        let mut ok = true;
        for (i, c) in chars.iter().take(9).enumerate() {
            let v = self.cells[i];
            let hit = match c {
                'T' | 't' => v != -1,
                'F' | 'f' => v == -1,
                '*' => true,
                '0' => v == 0,
                '1' => v == 1,
                '2' => v == 2,
                _ => return Err(TopoError::pattern(pattern)),
            };
            ok &= hit;
        }
        Ok(ok)
    }

    /// `compare` for patterns known to be well formed.
    #[inline]
    pub(crate) fn matches(&self, pattern: &str) -> bool {
        self.compare(pattern).unwrap_or(false)
    }
}

impl fmt::Display for De9im {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for v in self.cells {
            match v {
                -1 => write!(f, "F")?,
                d => write!(f, "{d}")?,
            }
        }
        Ok(())
    }
}

impl Serialize for De9im {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for De9im {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        De9im::from_pattern_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::Location::*;

    #[test]
    fn default_is_all_empty() {
        assert_eq!(De9im::default().to_string(), "FFFFFFFFF");
    }

    #[test]
    fn parse_and_print() {
        let m = De9im::from_pattern_str("FF2FF1212").unwrap();
        assert_eq!(m.to_string(), "FF2FF1212");
        assert_eq!(m.to_matrix_string(), "FF2\nFF1\n212");
        assert_eq!(m.get(Interior, Exterior), 2);
        assert_eq!(m.get(Boundary, Exterior), 1);
        assert!(De9im::from_pattern_str("FF2FF121").is_err());
        assert!(De9im::from_pattern_str("FF2FF121X").is_err());
    }

    #[test]
    fn pattern_matching() {
        let m = De9im::from_pattern_str("212101212").unwrap();
        assert!(m.compare("T*T***T**").unwrap());
        assert!(m.compare("t*t***t**").unwrap());
        assert!(!m.compare("F********").unwrap());
        assert!(m.compare("2********").unwrap());
        assert!(!m.compare("1********").unwrap());
        assert!(!m.compare("T*T").unwrap());
        assert!(m.compare("T*T***T**X").unwrap());
        assert!(m.compare("T*T***T*Q").is_err());
    }

    #[test]
    fn set_at_least_only_raises() {
        let mut m = De9im::default();
        m.set_at_least(Interior, Interior, 1);
        m.set_at_least(Interior, Interior, 0);
        assert_eq!(m.get(Interior, Interior), 1);
        m.set_at_least_label(&Label::with(Boundary, Unknown, 0));
        assert_eq!(m.get(Boundary, Interior), -1);
        m.set_at_least_label(&Label::with(Boundary, Exterior, 0));
        assert_eq!(m.get(Boundary, Exterior), 0);
    }

    #[test]
    fn transpose_swaps_off_diagonal() {
        let m = De9im::from_pattern_str("012F12F01").unwrap();
        assert_eq!(m.transpose().to_string(), "0FF110221");
        assert_eq!(m.transpose().transpose(), m);
    }

    #[test]
    fn merge_takes_cellwise_max() {
        let mut a = De9im::from_pattern_str("0FFFFFFF2").unwrap();
        let b = De9im::from_pattern_str("1FF0FFFF1").unwrap();
        a.merge_at_least(&b);
        assert_eq!(a.to_string(), "1FF0FFFF2");
    }
}
