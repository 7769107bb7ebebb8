//! Runtime IDNA2008 classifier
//!
//! [`Classifier::build`] runs the derivation chain once over all of
//! U+0000..U+10FFFF and keeps only what queries need:
//! - one filter of DISALLOWED and UNASSIGNED code points
//! - a filter of the UNASSIGNED subset
//! - the set of CONTEXTO and CONTEXTJ code points
//! - a filter of combining marks (Mn, Mc, Me)
//! - the script, bidi, joining type, general category and normalization
//!   tables
//!
//! Everything else in the [`PropertyTables`] is dropped with the build.

use std::sync::Arc;
use std::time::Instant;

use idnakit_core::{
    check, is_valid, CodePointProperties, DerivedProperty, GeneralCategory, IdnaError,
    IdnaResult, JoiningType, NormalizationCheck, RangeBuilder, UnicodeFilter,
    DEFAULT_RANGE_THRESHOLD, MAX_CODE_POINT, MIN_CODE_POINT, UNKNOWN_SCRIPT, ZERO_WIDTH_JOINER,
    ZERO_WIDTH_NON_JOINER,
};
use idnakit_ucd::{PropertyMap, PropertyTables};
use rustc_hash::FxHashSet;

use crate::derive::Derivation;
use crate::normalize::{NfkcNormalizer, Normalizer};

/// Label of the collapsed DISALLOWED/UNASSIGNED filter
pub const DISALLOWED_OR_UNASSIGNED: &str = "Disallowed/Unassigned";

/// Bidi class reported for code points without an entry
pub const DEFAULT_BIDI_CLASS: &str = "L";

/// How many code points the build assigned to each category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    pub pvalid: u32,
    pub disallowed: u32,
    pub unassigned: u32,
    pub context_o: u32,
    pub context_j: u32,
}

impl CategoryCounts {
    fn record(&mut self, category: DerivedProperty) {
        match category {
            DerivedProperty::Pvalid => self.pvalid += 1,
            DerivedProperty::Disallowed => self.disallowed += 1,
            DerivedProperty::Unassigned => self.unassigned += 1,
            DerivedProperty::ContextO => self.context_o += 1,
            DerivedProperty::ContextJ => self.context_j += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.pvalid + self.disallowed + self.unassigned + self.context_o + self.context_j
    }
}

/// Immutable IDNA2008 classifier, safe to share across threads.
#[derive(Debug)]
pub struct Classifier {
    disallowed_or_unassigned: UnicodeFilter,
    unassigned: UnicodeFilter,
    contextual: FxHashSet<u32>,
    combining_marks: UnicodeFilter,
    counts: CategoryCounts,

    scripts: PropertyMap<Arc<str>>,
    bidi_class: PropertyMap<Arc<str>>,
    joining_type: PropertyMap<JoiningType>,
    general_category: PropertyMap<GeneralCategory>,
    nfc_qc_no: UnicodeFilter,
    nfc_qc_maybe: UnicodeFilter,
    normalizer: NfkcNormalizer,
}

impl Classifier {
    pub fn build(tables: PropertyTables) -> IdnaResult<Self> {
        Self::build_with_threshold(tables, DEFAULT_RANGE_THRESHOLD)
    }

    /// Build with a custom densification threshold for the collapsed filters.
    pub fn build_with_threshold(tables: PropertyTables, threshold: u32) -> IdnaResult<Self> {
        let started = Instant::now();
        let mut disallowed = RangeBuilder::new();
        let mut unassigned = RangeBuilder::new();
        let mut marks = RangeBuilder::new();
        let mut contextual = FxHashSet::default();
        let mut counts = CategoryCounts::default();

        let derivation = Derivation::new(&tables);
        for cp in MIN_CODE_POINT..=MAX_CODE_POINT {
            let (category, _) = derivation.derive(cp);
            counts.record(category);
            match category {
                DerivedProperty::Pvalid => {}
                DerivedProperty::ContextO | DerivedProperty::ContextJ => {
                    contextual.insert(cp);
                }
                DerivedProperty::Unassigned => {
                    unassigned.push(cp);
                    disallowed.push(cp);
                }
                DerivedProperty::Disallowed => disallowed.push(cp),
            }
            if tables
                .general_category
                .get(cp)
                .is_some_and(|gc| gc.is_combining_mark())
            {
                marks.push(cp);
            }
        }

        let mut disallowed_or_unassigned =
            UnicodeFilter::with_threshold(DISALLOWED_OR_UNASSIGNED, threshold);
        disallowed_or_unassigned.add_ranges(disallowed.finish())?;
        let mut unassigned_filter = UnicodeFilter::with_threshold("Unassigned", threshold);
        unassigned_filter.add_ranges(unassigned.finish())?;
        let mut combining_marks = UnicodeFilter::with_threshold("Combining mark", threshold);
        combining_marks.add_ranges(marks.finish())?;

        tracing::debug!(
            ranges = disallowed_or_unassigned.ranges().len(),
            matrices = disallowed_or_unassigned.matrix_planes().count(),
            "collapsed {}",
            DISALLOWED_OR_UNASSIGNED
        );

        let PropertyTables {
            general_category,
            canonical_class,
            bidi_class,
            scripts,
            joining_type,
            normalization,
            decompositions,
            compositions,
            ..
        } = tables;

        tracing::info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            pvalid = counts.pvalid,
            disallowed = counts.disallowed,
            unassigned = counts.unassigned,
            contextual = contextual.len(),
            "built IDNA2008 classifier"
        );

        Ok(Self {
            disallowed_or_unassigned,
            unassigned: unassigned_filter,
            contextual,
            combining_marks,
            counts,
            scripts,
            bidi_class,
            joining_type,
            general_category,
            nfc_qc_no: normalization.nfc_qc_no,
            nfc_qc_maybe: normalization.nfc_qc_maybe,
            normalizer: NfkcNormalizer::new(canonical_class, decompositions, compositions),
        })
    }

    /// Fail on the first code point that is DISALLOWED, UNASSIGNED or not
    /// a valid code point at all.
    pub fn assert_no_disallowed_or_unassigned(&self, cps: &[u32]) -> IdnaResult<()> {
        for &cp in cps {
            check(cp)?;
        }
        self.disallowed_or_unassigned.assert_none(cps)
    }

    /// Out of range values count as disallowed.
    pub fn is_disallowed_or_unassigned(&self, cp: u32) -> bool {
        !is_valid(cp) || self.disallowed_or_unassigned.has(cp)
    }

    /// Category of `cp`. Values above U+10FFFF are DISALLOWED.
    pub fn get_code_point_derived_property(&self, cp: u32) -> DerivedProperty {
        if cp == ZERO_WIDTH_NON_JOINER || cp == ZERO_WIDTH_JOINER {
            DerivedProperty::ContextJ
        } else if self.contextual.contains(&cp) {
            DerivedProperty::ContextO
        } else if self.unassigned.has(cp) {
            DerivedProperty::Unassigned
        } else if self.is_disallowed_or_unassigned(cp) {
            DerivedProperty::Disallowed
        } else {
            DerivedProperty::Pvalid
        }
    }

    pub fn get_script(&self, cp: u32) -> &str {
        self.scripts.get(cp).map_or(UNKNOWN_SCRIPT, |s| &**s)
    }

    pub fn get_bidi_class(&self, cp: u32) -> &str {
        self.bidi_class.get(cp).map_or(DEFAULT_BIDI_CLASS, |b| &**b)
    }

    pub fn get_joining_type(&self, cp: u32) -> JoiningType {
        self.joining_type.get(cp).copied().unwrap_or_default()
    }

    pub fn get_canonical_class(&self, cp: u32) -> u8 {
        self.normalizer.canonical_class(cp).unwrap_or(0)
    }

    pub fn get_general_category(&self, cp: u32) -> GeneralCategory {
        self.general_category.get(cp).copied().unwrap_or_default()
    }

    pub fn is_combining_mark(&self, cp: u32) -> bool {
        self.combining_marks.has(cp)
    }

    pub fn has_contextual_code_points(&self, cps: &[u32]) -> bool {
        cps.iter().any(|cp| self.contextual.contains(cp))
    }

    /// CONTEXTO and CONTEXTJ code points in ascending order.
    pub fn contextual_code_points(&self) -> Vec<u32> {
        let mut cps: Vec<u32> = self.contextual.iter().copied().collect();
        cps.sort_unstable();
        cps
    }

    pub fn category_counts(&self) -> CategoryCounts {
        self.counts
    }

    pub fn disallowed_or_unassigned(&self) -> &UnicodeFilter {
        &self.disallowed_or_unassigned
    }

    pub fn normalizer(&self) -> &NfkcNormalizer {
        &self.normalizer
    }

    /// True if NFKC normalization of `cps` succeeds.
    ///
    /// # Panics
    ///
    /// Panics if `cps` is empty.
    pub fn is_normalized(&self, cps: &[u32]) -> bool {
        self.normalizer.normalize(cps).is_ok()
    }

    /// Fail unless normalizing `cps` leaves it unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `cps` is empty.
    pub fn assert_normalized(&self, cps: &[u32]) -> IdnaResult<()> {
        if self.normalizer.normalize(cps)? != cps {
            return Err(IdnaError::NotInNfc);
        }
        Ok(())
    }

    /// NFC quick check. NFC_QC=N anywhere wins over NFC_QC=M.
    pub fn is_normalization_needed(&self, cps: &[u32]) -> NormalizationCheck {
        let mut maybe = false;
        for &cp in cps {
            if self.nfc_qc_no.has(cp) {
                return NormalizationCheck::CannotNormalize;
            }
            maybe |= self.nfc_qc_maybe.has(cp);
        }
        if maybe {
            NormalizationCheck::NormalizationNeeded
        } else {
            NormalizationCheck::AlreadyNormalized
        }
    }
}

impl CodePointProperties for Classifier {
    fn script(&self, cp: u32) -> &str {
        self.get_script(cp)
    }

    fn joining_type(&self, cp: u32) -> JoiningType {
        self.get_joining_type(cp)
    }

    fn canonical_class(&self, cp: u32) -> u8 {
        self.get_canonical_class(cp)
    }
}
