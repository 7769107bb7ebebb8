//! Inclusive code point ranges

use std::fmt;
use std::ops::RangeInclusive;

/// An inclusive interval `[first, last]` of code points.
///
/// Ranges order by `first`, then by `last`. Two ranges sharing a start
/// therefore never compare equal unless they are identical, so a sorted
/// collection keeps both and a floor search lands on the wider one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CodePointRange {
    first: u32,
    last: u32,
}

impl CodePointRange {
    /// Create a range, swapping the endpoints if given in reverse.
    pub fn new(a: u32, b: u32) -> Self {
        if a <= b {
            Self { first: a, last: b }
        } else {
            Self { first: b, last: a }
        }
    }

    pub fn point(cp: u32) -> Self {
        Self { first: cp, last: cp }
    }

    #[inline]
    pub fn first(&self) -> u32 {
        self.first
    }

    #[inline]
    pub fn last(&self) -> u32 {
        self.last
    }

    #[inline]
    pub fn is_point(&self) -> bool {
        self.first == self.last
    }

    /// Number of code points covered.
    pub fn len(&self) -> u32 {
        self.last - self.first + 1
    }

    #[inline]
    pub fn has(&self, cp: u32) -> bool {
        self.first <= cp && cp <= self.last
    }

    pub fn has_any(&self, cps: &[u32]) -> bool {
        cps.iter().any(|&cp| self.has(cp))
    }

    pub fn has_all(&self, cps: &[u32]) -> bool {
        cps.iter().all(|&cp| self.has(cp))
    }

    pub fn overlaps(&self, other: &CodePointRange) -> bool {
        self.first <= other.last && other.first <= self.last
    }

    /// True if `other` overlaps or directly follows this range.
    pub fn touches(&self, other: &CodePointRange) -> bool {
        self.overlaps(other)
            || self.last.checked_add(1) == Some(other.first)
            || other.last.checked_add(1) == Some(self.first)
    }

    pub fn iter(&self) -> RangeInclusive<u32> {
        self.first..=self.last
    }
}

impl From<u32> for CodePointRange {
    fn from(cp: u32) -> Self {
        Self::point(cp)
    }
}

impl From<RangeInclusive<u32>> for CodePointRange {
    fn from(r: RangeInclusive<u32>) -> Self {
        Self::new(*r.start(), *r.end())
    }
}

impl fmt::Display for CodePointRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:04X},{:04X})", self.first, self.last)
    }
}
