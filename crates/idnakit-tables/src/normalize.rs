//! Table driven NFKC normalization

use idnakit_core::{IdnaError, IdnaResult};
use idnakit_ucd::{CompositionTable, DecompositionTable, PropertyMap};
use smallvec::SmallVec;

/// A normalization form applied to code point sequences.
pub trait Normalizer {
    /// Normalize `cps`.
    ///
    /// # Panics
    ///
    /// Panics if `cps` is empty.
    fn normalize(&self, cps: &[u32]) -> IdnaResult<Vec<u32>>;
}

/// NFKC: full compatibility decomposition, canonical reordering, then
/// canonical composition.
#[derive(Clone, Debug)]
pub struct NfkcNormalizer {
    canonical_class: PropertyMap<u8>,
    decompositions: DecompositionTable,
    compositions: CompositionTable,
}

impl NfkcNormalizer {
    pub fn new(
        canonical_class: PropertyMap<u8>,
        decompositions: DecompositionTable,
        compositions: CompositionTable,
    ) -> Self {
        Self {
            canonical_class,
            decompositions,
            compositions,
        }
    }

    /// Canonical combining class, if UnicodeData.txt lists the code point.
    pub fn canonical_class(&self, cp: u32) -> Option<u8> {
        self.canonical_class.get(cp).copied()
    }

    fn decompose_into(&self, cp: u32, out: &mut Vec<u32>) {
        match self.decompositions.get(cp) {
            Some(mapping) => {
                for &c in mapping {
                    self.decompose_into(c, out);
                }
            }
            None => out.push(cp),
        }
    }

    /// Stable insertion sort of each run of non-starters by class.
    fn reorder(&self, cps: &mut [u32]) -> IdnaResult<SmallVec<[u8; 32]>> {
        let mut classes = SmallVec::<[u8; 32]>::with_capacity(cps.len());
        for &cp in cps.iter() {
            let class = self
                .canonical_class(cp)
                .ok_or(IdnaError::CanonicalLookup { code_point: cp })?;
            classes.push(class);
        }

        for i in 1..cps.len() {
            let mut j = i;
            while j > 0 && classes[j] != 0 && classes[j - 1] > classes[j] {
                classes.swap(j - 1, j);
                cps.swap(j - 1, j);
                j -= 1;
            }
        }
        Ok(classes)
    }

    fn compose(&self, cps: &[u32], classes: &[u8]) -> Vec<u32> {
        let mut out: Vec<u32> = Vec::with_capacity(cps.len());
        let mut starter: Option<usize> = None;
        // 256 blocks everything until a starter is seen
        let mut last_class: u16 = 256;

        for (&cp, &class) in cps.iter().zip(classes) {
            let class = u16::from(class);
            if let Some(pos) = starter {
                if last_class < class || last_class == 0 {
                    if let Some(composite) = self.compositions.get(out[pos], cp) {
                        out[pos] = composite;
                        continue;
                    }
                }
            }
            if class == 0 {
                starter = Some(out.len());
            }
            last_class = class;
            out.push(cp);
        }
        out
    }
}

impl Normalizer for NfkcNormalizer {
    fn normalize(&self, cps: &[u32]) -> IdnaResult<Vec<u32>> {
        assert!(!cps.is_empty(), "cannot normalize an empty code point sequence");

        let mut decomposed = Vec::with_capacity(cps.len());
        for &cp in cps {
            if cp == 0 {
                return Err(IdnaError::NullCharacterPresent);
            }
            self.decompose_into(cp, &mut decomposed);
        }

        let classes = self.reorder(&mut decomposed)?;
        Ok(self.compose(&decomposed, &classes))
    }
}
