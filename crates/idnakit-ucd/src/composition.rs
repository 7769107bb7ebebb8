//! Decomposition and composition tables

use idnakit_core::CodePointRange;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::map::PropertyMap;

pub const S_BASE: u32 = 0xAC00;
pub const L_BASE: u32 = 0x1100;
pub const V_BASE: u32 = 0x1161;
pub const T_BASE: u32 = 0x11A7;
pub const L_COUNT: u32 = 19;
pub const V_COUNT: u32 = 21;
pub const T_COUNT: u32 = 28;
pub const N_COUNT: u32 = V_COUNT * T_COUNT;
pub const S_COUNT: u32 = L_COUNT * N_COUNT;

/// Decomposition mapping of a single code point
pub type Mapping = SmallVec<[u32; 4]>;

/// Canonical and compatibility decompositions keyed by code point.
#[derive(Clone, Debug, Default)]
pub struct DecompositionTable {
    mappings: FxHashMap<u32, Mapping>,
    compatibility: FxHashSet<u32>,
}

impl DecompositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, cp: u32, mapping: &[u32], compatibility: bool) {
        self.mappings.insert(cp, Mapping::from_slice(mapping));
        if compatibility {
            self.compatibility.insert(cp);
        } else {
            self.compatibility.remove(&cp);
        }
    }

    /// Full mapping, canonical or compatibility.
    pub fn get(&self, cp: u32) -> Option<&[u32]> {
        self.mappings.get(&cp).map(|m| m.as_slice())
    }

    pub fn canonical(&self, cp: u32) -> Option<&[u32]> {
        if self.compatibility.contains(&cp) {
            return None;
        }
        self.get(cp)
    }

    pub fn is_compatibility(&self, cp: u32) -> bool {
        self.compatibility.contains(&cp)
    }

    pub fn iter_canonical(&self) -> impl Iterator<Item = (u32, &[u32])> + '_ {
        self.mappings
            .iter()
            .filter(|(cp, _)| !self.compatibility.contains(cp))
            .map(|(cp, m)| (*cp, m.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

/// Primary composites keyed by the pair they compose from.
#[derive(Clone, Debug, Default)]
pub struct CompositionTable {
    pairs: FxHashMap<(u32, u32), u32>,
}

impl CompositionTable {
    /// Derive pairs from canonical two-element decompositions.
    ///
    /// Excluded code points, singletons and mappings that start with a
    /// non-starter never compose.
    pub fn build(
        decompositions: &DecompositionTable,
        exclusions: &FxHashSet<u32>,
        canonical_class: &PropertyMap<u8>,
    ) -> Self {
        let mut table = Self::default();
        for (cp, mapping) in decompositions.iter_canonical() {
            if mapping.len() != 2 || exclusions.contains(&cp) {
                continue;
            }
            if canonical_class.get(mapping[0]).copied().unwrap_or(0) != 0 {
                continue;
            }
            table.insert(mapping[0], mapping[1], cp);
        }
        table
    }

    pub fn insert(&mut self, first: u32, second: u32, composite: u32) {
        self.pairs.insert((first, second), composite);
    }

    #[inline]
    pub fn get(&self, first: u32, second: u32) -> Option<u32> {
        self.pairs.get(&(first, second)).copied()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Range of precomposed Hangul syllables
pub fn hangul_syllables() -> CodePointRange {
    CodePointRange::new(S_BASE, S_BASE + S_COUNT - 1)
}

/// Register the algorithmic Hangul decompositions as pairs:
/// LV to L + V and LVT to LV + T.
pub fn register_hangul(decompositions: &mut DecompositionTable, compositions: &mut CompositionTable) {
    for s_index in 0..S_COUNT {
        let syllable = S_BASE + s_index;
        let t_index = s_index % T_COUNT;
        let (first, second) = if t_index == 0 {
            (L_BASE + s_index / N_COUNT, V_BASE + (s_index % N_COUNT) / T_COUNT)
        } else {
            (syllable - t_index, T_BASE + t_index)
        };
        decompositions.insert(syllable, &[first, second], false);
        compositions.insert(first, second, syllable);
    }
}
