//! Code point validation, plane arithmetic and range compaction

use std::fmt;

use crate::error::{IdnaError, IdnaResult};
use crate::range::CodePointRange;

/// Lowest Unicode scalar value
pub const MIN_CODE_POINT: u32 = 0;

/// Highest Unicode code point
pub const MAX_CODE_POINT: u32 = 0x10FFFF;

/// Code points per plane
pub const PLANE_SIZE: u32 = 0x10000;

/// Number of Unicode planes
pub const UNICODE_PLANES: usize = 17;

#[inline]
pub fn is_valid(cp: u32) -> bool {
    cp <= MAX_CODE_POINT
}

/// Return the code point unchanged, or `InvalidCodePoint` if it lies above U+10FFFF.
#[inline]
pub fn check(cp: u32) -> IdnaResult<u32> {
    if is_valid(cp) {
        Ok(cp)
    } else {
        Err(IdnaError::InvalidCodePoint(cp))
    }
}

/// Plane index of a valid code point (0..=16).
#[inline]
pub fn plane_of(cp: u32) -> usize {
    (cp >> 16) as usize
}

#[inline]
pub fn first_in_plane(plane: usize) -> u32 {
    plane as u32 * PLANE_SIZE
}

#[inline]
pub fn last_in_plane(plane: usize) -> u32 {
    first_in_plane(plane) + (PLANE_SIZE - 1)
}

/// Upper-case hex rendering used in every user-facing message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hex(pub u32);

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}

/// Render a sequence as space separated hex, e.g. `006C 00B7 006C`.
pub fn format_sequence(cps: &[u32]) -> String {
    let mut out = String::with_capacity(cps.len() * 5);
    for (i, cp) in cps.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&Hex(*cp).to_string());
    }
    out
}

/// Accumulates code points in ascending order into maximal ranges.
#[derive(Debug, Default)]
pub struct RangeBuilder {
    ranges: Vec<CodePointRange>,
    open: Option<(u32, u32)>,
}

impl RangeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a code point. Points at or below the last one pushed are ignored.
    pub fn push(&mut self, cp: u32) {
        match self.open {
            Some((_, last)) if cp <= last => {}
            Some((first, last)) if cp == last + 1 => {
                self.open = Some((first, cp));
            }
            Some((first, last)) => {
                self.ranges.push(CodePointRange::new(first, last));
                self.open = Some((cp, cp));
            }
            None => self.open = Some((cp, cp)),
        }
    }

    pub fn finish(mut self) -> Vec<CodePointRange> {
        if let Some((first, last)) = self.open.take() {
            self.ranges.push(CodePointRange::new(first, last));
        }
        self.ranges
    }
}

/// Collapse arbitrary code points into the minimal set of inclusive ranges.
pub fn collapse_points(points: &[u32]) -> Vec<CodePointRange> {
    let mut sorted = points.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let mut builder = RangeBuilder::new();
    for cp in sorted {
        builder.push(cp);
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_arithmetic() {
        assert_eq!(plane_of(0x0041), 0);
        assert_eq!(plane_of(0x1D100), 1);
        assert_eq!(plane_of(MAX_CODE_POINT), 16);
        assert_eq!(first_in_plane(2), 0x20000);
        assert_eq!(last_in_plane(16), MAX_CODE_POINT);
    }

    #[test]
    fn test_check() {
        assert_eq!(check(0x10FFFF).unwrap(), 0x10FFFF);
        assert!(matches!(check(0x110000), Err(IdnaError::InvalidCodePoint(0x110000))));
    }

    #[test]
    fn test_format_sequence() {
        assert_eq!(format_sequence(&[0x6c, 0xb7, 0x6c]), "006C 00B7 006C");
        assert_eq!(format_sequence(&[]), "");
        assert_eq!(Hex(0x1F600).to_string(), "1F600");
    }

    #[test]
    fn test_collapse_points() {
        let ranges = collapse_points(&[5, 3, 4, 10, 12, 11, 4, 20]);
        assert_eq!(
            ranges,
            vec![
                CodePointRange::new(3, 5),
                CodePointRange::new(10, 12),
                CodePointRange::point(20),
            ]
        );
        assert!(collapse_points(&[]).is_empty());
    }
}
