//! Hard coded category overrides (RFC 5892 sections 2.6 and 2.7)

use idnakit_core::DerivedProperty::{self, ContextO, Disallowed, Pvalid};

/// `(first, last, category)` sorted by `first`
pub const EXCEPTIONS: &[(u32, u32, DerivedProperty)] = &[
    (0x00B7, 0x00B7, ContextO), // MIDDLE DOT
    (0x00DF, 0x00DF, Pvalid), // LATIN SMALL LETTER SHARP S
    (0x0375, 0x0375, ContextO), // GREEK LOWER NUMERAL SIGN
    (0x03C2, 0x03C2, Pvalid), // GREEK SMALL LETTER FINAL SIGMA
    (0x05F3, 0x05F3, ContextO), // HEBREW PUNCTUATION GERESH
    (0x05F4, 0x05F4, ContextO), // HEBREW PUNCTUATION GERSHAYIM
    (0x0640, 0x0640, Disallowed), // ARABIC TATWEEL
    (0x0660, 0x0669, ContextO), // ARABIC-INDIC DIGITS
    (0x06F0, 0x06F9, ContextO), // EXTENDED ARABIC-INDIC DIGITS
    (0x06FD, 0x06FD, Pvalid), // ARABIC SIGN SINDHI AMPERSAND
    (0x06FE, 0x06FE, Pvalid), // ARABIC SIGN SINDHI POSTPOSITION MEN
    (0x07FA, 0x07FA, Disallowed), // NKO LAJANYALAN
    (0x0F0B, 0x0F0B, Pvalid), // TIBETAN MARK INTERSYLLABIC TSHEG
    (0x3007, 0x3007, Pvalid), // IDEOGRAPHIC NUMBER ZERO
    (0x302E, 0x302F, Disallowed), // HANGUL SINGLE/DOUBLE DOT TONE MARK
    (0x3031, 0x3035, Disallowed), // VERTICAL KANA REPEAT MARKS
    (0x303B, 0x303B, Disallowed), // VERTICAL IDEOGRAPHIC ITERATION MARK
    (0x30FB, 0x30FB, ContextO), // KATAKANA MIDDLE DOT
];

/// Code points whose category must not change across Unicode versions.
/// Empty until a Unicode update needs an entry.
pub const BACKWARD_COMPATIBLE: &[(u32, u32, DerivedProperty)] = &[];

fn lookup(table: &[(u32, u32, DerivedProperty)], cp: u32) -> Option<DerivedProperty> {
    let idx = table.partition_point(|&(first, _, _)| first <= cp);
    if idx == 0 {
        return None;
    }
    let (first, last, category) = table[idx - 1];
    (first <= cp && cp <= last).then_some(category)
}

pub fn exception(cp: u32) -> Option<DerivedProperty> {
    lookup(EXCEPTIONS, cp)
}

pub fn backward_compatible(cp: u32) -> Option<DerivedProperty> {
    lookup(BACKWARD_COMPATIBLE, cp)
}
