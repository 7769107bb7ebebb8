//! The ordered derivation chain of RFC 5892 section 3
//!
//! The first matching step decides the category:
//!
//! 1. Exceptions
//! 2. BackwardCompatible
//! 3. Unassigned (not in UnicodeData.txt and not a noncharacter)
//! 4. LDH (hyphen, ASCII digits, ASCII lowercase)
//! 5. JoinControl
//! 6. Unstable (NFKC_QC=N or an NFKC_Casefold mapping)
//! 7. IgnorableProperties
//! 8. IgnorableBlocks
//! 9. OldHangulJamo
//! 10. LetterDigits
//! 11. otherwise DISALLOWED

use idnakit_core::{DerivedProperty, UnicodeFilter, HYPHEN_MINUS};
use idnakit_ucd::PropertyTables;

use crate::exceptions::{backward_compatible, exception};

pub const JOIN_CONTROL: &str = "Join_Control";
pub const DEFAULT_IGNORABLE_CODE_POINT: &str = "Default_Ignorable_Code_Point";
pub const WHITE_SPACE: &str = "White_Space";
pub const NONCHARACTER_CODE_POINT: &str = "Noncharacter_Code_Point";

/// Blocks whose code points are never valid in labels
pub const IGNORABLE_BLOCKS: [&str; 3] = [
    "Combining Diacritical Marks for Symbols",
    "Musical Symbols",
    "Ancient Greek Musical Notation",
];

/// The step of the chain that decided a category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DerivationStep {
    Exception,
    BackwardCompatible,
    Unassigned,
    Ldh,
    JoinControl,
    Unstable,
    IgnorableProperty,
    IgnorableBlock,
    OldHangulJamo,
    LetterDigit,
    Fallback,
}

#[inline]
pub fn is_ldh(cp: u32) -> bool {
    cp == HYPHEN_MINUS || (0x30..=0x39).contains(&cp) || (0x61..=0x7A).contains(&cp)
}

/// Runs the chain against one set of property tables.
///
/// Property filters are resolved once up front; a property missing from
/// the tables behaves as an empty set.
pub struct Derivation<'a> {
    tables: &'a PropertyTables,
    join_control: Option<&'a UnicodeFilter>,
    default_ignorable: Option<&'a UnicodeFilter>,
    white_space: Option<&'a UnicodeFilter>,
    noncharacter: Option<&'a UnicodeFilter>,
}

impl<'a> Derivation<'a> {
    pub fn new(tables: &'a PropertyTables) -> Self {
        let property = move |name: &str| tables.binary_properties.get(name);
        Self {
            tables,
            join_control: property(JOIN_CONTROL),
            default_ignorable: property(DEFAULT_IGNORABLE_CODE_POINT),
            white_space: property(WHITE_SPACE),
            noncharacter: property(NONCHARACTER_CODE_POINT),
        }
    }

    pub fn derive(&self, cp: u32) -> (DerivedProperty, DerivationStep) {
        if let Some(category) = exception(cp) {
            return (category, DerivationStep::Exception);
        }
        if let Some(category) = backward_compatible(cp) {
            return (category, DerivationStep::BackwardCompatible);
        }
        if !self.tables.assigned.has(cp) && !has(self.noncharacter, cp) {
            return (DerivedProperty::Unassigned, DerivationStep::Unassigned);
        }
        if is_ldh(cp) {
            return (DerivedProperty::Pvalid, DerivationStep::Ldh);
        }
        if has(self.join_control, cp) {
            return (DerivedProperty::ContextJ, DerivationStep::JoinControl);
        }
        if self.is_unstable(cp) {
            return (DerivedProperty::Disallowed, DerivationStep::Unstable);
        }
        if has(self.default_ignorable, cp) || has(self.white_space, cp) || has(self.noncharacter, cp)
        {
            return (DerivedProperty::Disallowed, DerivationStep::IgnorableProperty);
        }
        if self
            .tables
            .block(cp)
            .is_some_and(|block| IGNORABLE_BLOCKS.contains(&block))
        {
            return (DerivedProperty::Disallowed, DerivationStep::IgnorableBlock);
        }
        if self
            .tables
            .hangul_syllable_type
            .get(cp)
            .is_some_and(|hst| hst.is_jamo())
        {
            return (DerivedProperty::Disallowed, DerivationStep::OldHangulJamo);
        }
        if self
            .tables
            .general_category
            .get(cp)
            .is_some_and(|gc| gc.is_letter_digit())
        {
            return (DerivedProperty::Pvalid, DerivationStep::LetterDigit);
        }
        (DerivedProperty::Disallowed, DerivationStep::Fallback)
    }

    fn is_unstable(&self, cp: u32) -> bool {
        let flags = &self.tables.normalization;
        flags.nfkc_qc_no.has(cp) || flags.nfkc_casefold.has(cp)
    }
}

#[inline]
fn has(filter: Option<&UnicodeFilter>, cp: u32) -> bool {
    filter.map_or(false, |f| f.has(cp))
}

/// Category of `cp` and the step that decided it.
pub fn explain(tables: &PropertyTables, cp: u32) -> (DerivedProperty, DerivationStep) {
    Derivation::new(tables).derive(cp)
}
