//! Adaptive code point membership filter
//!
//! A filter stores members as sorted disjoint ranges. Once a plane has
//! collected more than `threshold` ranges it is switched to a dense
//! [`PlaneMatrix`] and the ranges wholly inside it are dropped, so lookups
//! are a binary search in sparse planes and a bit test in dense ones.

use crate::codepoint::{
    check, first_in_plane, is_valid, last_in_plane, plane_of, UNICODE_PLANES,
};
use crate::error::{IdnaError, IdnaResult};
use crate::matrix::PlaneMatrix;
use crate::range::CodePointRange;

/// Ranges a plane may collect before it is densified
pub const DEFAULT_RANGE_THRESHOLD: u32 = 30;

/// Label used in rejection messages when none is given
pub const DEFAULT_FILTER_LABEL: &str = "Filtered code point";

/// Set of code points backed by ranges and per-plane bitmaps.
#[derive(Clone, Debug)]
pub struct UnicodeFilter {
    label: String,
    threshold: u32,
    ranges: Vec<CodePointRange>,
    matrices: [Option<PlaneMatrix>; UNICODE_PLANES],
    range_counts: [u32; UNICODE_PLANES],
}

impl UnicodeFilter {
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_threshold(label, DEFAULT_RANGE_THRESHOLD)
    }

    pub fn with_threshold(label: impl Into<String>, threshold: u32) -> Self {
        Self {
            label: label.into(),
            threshold,
            ranges: Vec::new(),
            matrices: std::array::from_fn(|_| None),
            range_counts: [0; UNICODE_PLANES],
        }
    }

    /// Build a filter from a batch of ranges.
    pub fn from_ranges<I>(label: impl Into<String>, ranges: I) -> IdnaResult<Self>
    where
        I: IntoIterator<Item = CodePointRange>,
    {
        let mut filter = Self::new(label);
        filter.add_ranges(ranges)?;
        Ok(filter)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn add_point(&mut self, cp: u32) -> IdnaResult<()> {
        self.add_range(CodePointRange::point(cp))
    }

    pub fn add_range(&mut self, range: CodePointRange) -> IdnaResult<()> {
        check(range.first())?;
        check(range.last())?;
        self.count_planes(&range);
        let idx = self.ranges.partition_point(|r| *r < range);
        self.ranges.insert(idx, range);
        self.compile();
        Ok(())
    }

    /// Add many ranges and compile once. Nothing is added if any range is invalid.
    pub fn add_ranges<I>(&mut self, ranges: I) -> IdnaResult<()>
    where
        I: IntoIterator<Item = CodePointRange>,
    {
        let batch: Vec<CodePointRange> = ranges.into_iter().collect();
        for range in &batch {
            check(range.first())?;
            check(range.last())?;
        }
        for range in &batch {
            self.count_planes(range);
        }
        self.ranges.extend(batch);
        self.ranges.sort_unstable();
        self.compile();
        Ok(())
    }

    pub fn has(&self, cp: u32) -> bool {
        if !is_valid(cp) {
            return false;
        }
        if let Some(matrix) = &self.matrices[plane_of(cp)] {
            return matrix.test(cp);
        }
        // floor search: greatest range whose first <= cp
        let idx = self.ranges.partition_point(|r| r.first() <= cp);
        idx > 0 && self.ranges[idx - 1].has(cp)
    }

    pub fn has_all(&self, cps: &[u32]) -> bool {
        cps.iter().all(|&cp| self.has(cp))
    }

    pub fn has_none(&self, cps: &[u32]) -> bool {
        !cps.iter().any(|&cp| self.has(cp))
    }

    /// Fail on the first code point that is not a member.
    pub fn assert_all(&self, cps: &[u32]) -> IdnaResult<()> {
        match cps.iter().find(|&&cp| !self.has(cp)) {
            Some(&cp) => Err(self.rejected(cp)),
            None => Ok(()),
        }
    }

    /// Fail on the first code point that is a member.
    pub fn assert_none(&self, cps: &[u32]) -> IdnaResult<()> {
        match cps.iter().find(|&&cp| self.has(cp)) {
            Some(&cp) => Err(self.rejected(cp)),
            None => Ok(()),
        }
    }

    /// Ranges held outside of any matrix, sorted and disjoint.
    pub fn ranges(&self) -> &[CodePointRange] {
        &self.ranges
    }

    /// Planes currently backed by a bitmap.
    pub fn matrix_planes(&self) -> impl Iterator<Item = usize> + '_ {
        self.matrices
            .iter()
            .enumerate()
            .filter_map(|(plane, m)| m.as_ref().map(|_| plane))
    }

    pub fn has_matrix(&self, plane: usize) -> bool {
        self.matrices.get(plane).map_or(false, Option::is_some)
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty() && self.matrices.iter().flatten().all(|m| m.count() == 0)
    }

    fn rejected(&self, cp: u32) -> IdnaError {
        IdnaError::FilterRejected {
            label: self.label.clone(),
            code_point: cp,
        }
    }

    fn count_planes(&mut self, range: &CodePointRange) {
        for plane in plane_of(range.first())..=plane_of(range.last()) {
            self.range_counts[plane] += 1;
        }
    }

    /// Restore the storage invariants after a mutation.
    fn compile(&mut self) {
        self.populate_ranges();
        self.merge_ranges();
        self.clip_ranges();
    }

    /// Densify busy planes and drop ranges their matrix now covers.
    fn populate_ranges(&mut self) {
        for plane in 0..UNICODE_PLANES {
            if self.range_counts[plane] <= self.threshold && self.matrices[plane].is_none() {
                continue;
            }
            let matrix = self.matrices[plane].get_or_insert_with(|| PlaneMatrix::new(plane));
            let (floor, ceiling) = (matrix.floor(), matrix.ceiling());

            let mut kept = Vec::with_capacity(self.ranges.len());
            for range in self.ranges.drain(..) {
                if range.last() >= floor && range.first() <= ceiling {
                    matrix.insert_range(range.first(), range.last());
                    if matrix.spans(&range) {
                        continue;
                    }
                }
                kept.push(range);
            }
            self.ranges = kept;
            self.range_counts[plane] = 0;
        }
    }

    /// Coalesce overlapping and adjacent ranges.
    fn merge_ranges(&mut self) {
        let mut merged: Vec<CodePointRange> = Vec::with_capacity(self.ranges.len());
        for range in self.ranges.drain(..) {
            match merged.last_mut() {
                Some(prev) if range.first().saturating_sub(1) <= prev.last() => {
                    if range.last() > prev.last() {
                        *prev = CodePointRange::new(prev.first(), range.last());
                    }
                }
                _ => merged.push(range),
            }
        }
        self.ranges = merged;
    }

    /// Trim range ends that fall in matrix-backed planes.
    fn clip_ranges(&mut self) {
        let mut kept = Vec::with_capacity(self.ranges.len());
        'ranges: for range in self.ranges.drain(..) {
            let (mut first, mut last) = (range.first(), range.last());

            while self.matrices[plane_of(first)].is_some() {
                let next = last_in_plane(plane_of(first)) + 1;
                if next > last {
                    continue 'ranges;
                }
                first = next;
            }
            while self.matrices[plane_of(last)].is_some() {
                match first_in_plane(plane_of(last)).checked_sub(1) {
                    Some(prev) if prev >= first => last = prev,
                    _ => continue 'ranges,
                }
            }
            kept.push(CodePointRange::new(first, last));
        }
        self.ranges = kept;
    }
}

impl Default for UnicodeFilter {
    fn default() -> Self {
        Self::new(DEFAULT_FILTER_LABEL)
    }
}
