//! Dense per-plane membership bitmap

use std::fmt;

use crate::codepoint::{first_in_plane, last_in_plane};
use crate::range::CodePointRange;

/// 16-bit words per plane (0x10000 bits)
pub const MATRIX_WORDS: usize = 4096;

/// Bitmap over one Unicode plane.
///
/// Bit `i` is set iff code point `floor + i` is a member. A matrix costs
/// 8 KiB regardless of how many bits are set.
#[derive(Clone, PartialEq, Eq)]
pub struct PlaneMatrix {
    plane: usize,
    floor: u32,
    ceiling: u32,
    data: Box<[u16]>,
}

impl PlaneMatrix {
    pub fn new(plane: usize) -> Self {
        Self {
            plane,
            floor: first_in_plane(plane),
            ceiling: last_in_plane(plane),
            data: vec![0u16; MATRIX_WORDS].into_boxed_slice(),
        }
    }

    pub fn plane(&self) -> usize {
        self.plane
    }

    pub fn floor(&self) -> u32 {
        self.floor
    }

    pub fn ceiling(&self) -> u32 {
        self.ceiling
    }

    /// Set the bit for `cp`. Code points outside the plane are ignored.
    #[inline]
    pub fn insert_point(&mut self, cp: u32) {
        if cp < self.floor || cp > self.ceiling {
            return;
        }
        let offset = cp & 0xFFFF;
        self.data[(offset >> 4) as usize] |= 1 << (offset & 0xF);
    }

    /// Set every bit of `[first, last]` that falls inside the plane.
    ///
    /// Whole words are filled at once when the clipped interval covers them.
    pub fn insert_range(&mut self, first: u32, last: u32) {
        let (first, last) = if first <= last { (first, last) } else { (last, first) };
        if last < self.floor || first > self.ceiling {
            return;
        }
        let mut lo = first.max(self.floor) - self.floor;
        let hi = last.min(self.ceiling) - self.floor;

        while lo <= hi {
            if lo & 0xF == 0 && lo + 0xF <= hi {
                self.data[(lo >> 4) as usize] = u16::MAX;
                lo += 16;
            } else {
                self.data[(lo >> 4) as usize] |= 1 << (lo & 0xF);
                lo += 1;
            }
        }
    }

    #[inline]
    pub fn test(&self, cp: u32) -> bool {
        if cp < self.floor || cp > self.ceiling {
            return false;
        }
        let offset = cp & 0xFFFF;
        self.data[(offset >> 4) as usize] & (1 << (offset & 0xF)) != 0
    }

    /// True if `range` lies entirely inside this plane.
    pub fn spans(&self, range: &CodePointRange) -> bool {
        range.first() >= self.floor && range.last() <= self.ceiling
    }

    /// Number of set bits.
    pub fn count(&self) -> u32 {
        self.data.iter().map(|w| w.count_ones()).sum()
    }
}

impl fmt::Debug for PlaneMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaneMatrix")
            .field("plane", &self.plane)
            .field("members", &self.count())
            .finish()
    }
}
