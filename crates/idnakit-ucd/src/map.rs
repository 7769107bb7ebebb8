//! Range keyed property maps
//!
//! Property files assign one value per code point range. A [`PropertyMap`]
//! keeps those assignments as a sorted array with neighbouring equal
//! values coalesced; lookups are a floor search over range starts.

use std::sync::Arc;

use idnakit_core::CodePointRange;
use rustc_hash::FxHashSet;

/// Read-only map from code point ranges to values.
#[derive(Clone, Debug)]
pub struct PropertyMap<V> {
    entries: Vec<(CodePointRange, V)>,
}

impl<V> PropertyMap<V> {
    pub fn get(&self, cp: u32) -> Option<&V> {
        let idx = self.entries.partition_point(|(r, _)| r.first() <= cp);
        if idx == 0 {
            return None;
        }
        let (range, value) = &self.entries[idx - 1];
        range.has(cp).then_some(value)
    }

    pub fn contains(&self, cp: u32) -> bool {
        self.get(cp).is_some()
    }

    /// Number of stored ranges after coalescing.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(CodePointRange, V)> + '_ {
        self.entries.iter()
    }
}

impl<V> Default for PropertyMap<V> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

/// Collects assignments in any order.
#[derive(Debug)]
pub struct PropertyMapBuilder<V> {
    entries: Vec<(CodePointRange, V)>,
}

impl<V> Default for PropertyMapBuilder<V> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<V: PartialEq> PropertyMapBuilder<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, range: CodePointRange, value: V) {
        self.entries.push((range, value));
    }

    /// Sort and coalesce. Where ranges overlap, the range with the lower
    /// first code point keeps the shared code points. Ranges starting at the
    /// same code point keep insertion order, so the earlier one wins.
    pub fn build(mut self) -> PropertyMap<V> {
        // stable: ties keep insertion order
        self.entries.sort_by_key(|(range, _)| range.first());

        let mut out: Vec<(CodePointRange, V)> = Vec::with_capacity(self.entries.len());
        for (range, value) in self.entries {
            let mut range = range;
            if let Some((prev, _)) = out.last() {
                if range.last() <= prev.last() {
                    continue;
                }
                if range.first() <= prev.last() {
                    range = CodePointRange::new(prev.last() + 1, range.last());
                }
            }
            match out.last_mut() {
                Some((prev, prev_value))
                    if *prev_value == value && prev.last() + 1 == range.first() =>
                {
                    *prev = CodePointRange::new(prev.first(), range.last());
                }
                _ => out.push((range, value)),
            }
        }
        PropertyMap { entries: out }
    }
}

/// Shares one allocation per distinct property value string.
#[derive(Debug, Default)]
pub struct Interner {
    strings: FxHashSet<Arc<str>>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, s: &str) -> Arc<str> {
        if let Some(existing) = self.strings.get(s) {
            return Arc::clone(existing);
        }
        let value: Arc<str> = Arc::from(s);
        self.strings.insert(Arc::clone(&value));
        value
    }
}
