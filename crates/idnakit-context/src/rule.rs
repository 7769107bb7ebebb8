//! Contextual rule variants

use std::fmt;
use std::str::FromStr;

use idnakit_core::{
    CodePointProperties, Hex, IdnaError, IdnaResult, VIRAMA_CANONICAL_CLASS, ZERO_WIDTH_JOINER,
    ZERO_WIDTH_NON_JOINER,
};
use regex::Regex;

pub const MIDDLE_DOT: u32 = 0x00B7;
pub const LATIN_SMALL_LETTER_L: u32 = 0x006C;
pub const GREEK_LOWER_NUMERAL_SIGN: u32 = 0x0375;
pub const HEBREW_PUNCTUATION_GERESH: u32 = 0x05F3;
pub const HEBREW_PUNCTUATION_GERSHAYIM: u32 = 0x05F4;
pub const KATAKANA_MIDDLE_DOT: u32 = 0x30FB;
pub const ARABIC_INDIC_DIGITS: (u32, u32) = (0x0660, 0x0669);
pub const EXTENDED_ARABIC_INDIC_DIGITS: (u32, u32) = (0x06F0, 0x06F9);

/// Joining types around a ZWNJ, written with ZWNJ itself as `200C`
pub const ZWNJ_JOINING_PATTERN: &str = "^(L|D)(T)*200C(T)*(R|D)$";

const KATAKANA_MIDDLE_DOT_SCRIPTS: [&str; 3] = ["Han", "Hiragana", "Katakana"];

/// Behaviour shared by every contextual rule.
pub trait ContextRule {
    /// True if the rule must run when `cp` occurs in a label.
    fn applies_to(&self, cp: u32) -> bool;

    /// True if one run covers the whole label, so later triggers can skip it.
    fn evaluates_all(&self) -> bool;

    /// Check the label around `cps[index]`.
    fn execute(
        &self,
        index: usize,
        cps: &[u32],
        props: &dyn CodePointProperties,
    ) -> IdnaResult<()>;
}

/// The rule variants of RFC 5892 Appendix A.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// A.1 ZERO WIDTH NON-JOINER
    ZeroWidthNonJoiner,
    /// A.2 ZERO WIDTH JOINER
    ZeroWidthJoiner,
    /// A.3 MIDDLE DOT
    MiddleDot,
    /// A.4 GREEK LOWER NUMERAL SIGN (KERAIA)
    GreekLowerNumeralSign,
    /// A.5 HEBREW PUNCTUATION GERESH
    HebrewPunctuationGeresh,
    /// A.6 HEBREW PUNCTUATION GERSHAYIM
    HebrewPunctuationGershayim,
    /// A.7 KATAKANA MIDDLE DOT
    KatakanaMiddleDot,
    /// A.8 ARABIC-INDIC DIGITS
    ArabicIndicDigits,
    /// A.9 EXTENDED ARABIC-INDIC DIGITS
    ExtendedArabicIndicDigits,
}

impl RuleKind {
    /// Appendix A order
    pub const ALL: [RuleKind; 9] = [
        RuleKind::ZeroWidthNonJoiner,
        RuleKind::ZeroWidthJoiner,
        RuleKind::MiddleDot,
        RuleKind::GreekLowerNumeralSign,
        RuleKind::HebrewPunctuationGeresh,
        RuleKind::HebrewPunctuationGershayim,
        RuleKind::KatakanaMiddleDot,
        RuleKind::ArabicIndicDigits,
        RuleKind::ExtendedArabicIndicDigits,
    ];

    /// Identifier used in rule configuration.
    pub fn identifier(self) -> &'static str {
        match self {
            RuleKind::ZeroWidthNonJoiner => "ZeroWidthNonJoiner",
            RuleKind::ZeroWidthJoiner => "ZeroWidthJoiner",
            RuleKind::MiddleDot => "MiddleDot",
            RuleKind::GreekLowerNumeralSign => "GreekLowerNumeralSign",
            RuleKind::HebrewPunctuationGeresh => "HebrewPunctuationGeresh",
            RuleKind::HebrewPunctuationGershayim => "HebrewPunctuationGershayim",
            RuleKind::KatakanaMiddleDot => "KatakanaMiddleDot",
            RuleKind::ArabicIndicDigits => "ArabicIndicDigits",
            RuleKind::ExtendedArabicIndicDigits => "ExtendedArabicIndicDigits",
        }
    }

    /// Rule name used by the default configuration.
    pub fn default_name(self) -> &'static str {
        match self {
            RuleKind::ZeroWidthNonJoiner => "ZERO_WIDTH_NON_JOINER",
            RuleKind::ZeroWidthJoiner => "ZERO_WIDTH_JOINER",
            RuleKind::MiddleDot => "MIDDLE_DOT",
            RuleKind::GreekLowerNumeralSign => "GREEK_LOWER_NUMERAL_SIGN",
            RuleKind::HebrewPunctuationGeresh => "HEBREW_PUNCTUATION_GERESH",
            RuleKind::HebrewPunctuationGershayim => "HEBREW_PUNCTUATION_GERSHAYIM",
            RuleKind::KatakanaMiddleDot => "KATAKANA_MIDDLE_DOT",
            RuleKind::ArabicIndicDigits => "ARABIC_INDIC_DIGITS",
            RuleKind::ExtendedArabicIndicDigits => "EXT_ARABIC_INDIC_DIGITS",
        }
    }

    pub fn applies_to(self, cp: u32) -> bool {
        match self {
            RuleKind::ZeroWidthNonJoiner => cp == ZERO_WIDTH_NON_JOINER,
            RuleKind::ZeroWidthJoiner => cp == ZERO_WIDTH_JOINER,
            RuleKind::MiddleDot => cp == MIDDLE_DOT,
            RuleKind::GreekLowerNumeralSign => cp == GREEK_LOWER_NUMERAL_SIGN,
            RuleKind::HebrewPunctuationGeresh => cp == HEBREW_PUNCTUATION_GERESH,
            RuleKind::HebrewPunctuationGershayim => cp == HEBREW_PUNCTUATION_GERSHAYIM,
            RuleKind::KatakanaMiddleDot => cp == KATAKANA_MIDDLE_DOT,
            RuleKind::ArabicIndicDigits => in_range(ARABIC_INDIC_DIGITS, cp),
            RuleKind::ExtendedArabicIndicDigits => in_range(EXTENDED_ARABIC_INDIC_DIGITS, cp),
        }
    }

    pub fn evaluates_all(self) -> bool {
        matches!(
            self,
            RuleKind::KatakanaMiddleDot
                | RuleKind::ArabicIndicDigits
                | RuleKind::ExtendedArabicIndicDigits
        )
    }
}

impl FromStr for RuleKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleKind::ALL
            .into_iter()
            .find(|kind| kind.identifier() == s)
            .ok_or(())
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

#[inline]
fn in_range((first, last): (u32, u32), cp: u32) -> bool {
    first <= cp && cp <= last
}

/// A named, constructed rule as held by the registry.
#[derive(Clone, Debug)]
pub struct ContextualRule {
    name: String,
    kind: RuleKind,
    joining_pattern: Option<Regex>,
}

impl ContextualRule {
    pub fn new(name: impl Into<String>, kind: RuleKind) -> IdnaResult<Self> {
        let joining_pattern = match kind {
            RuleKind::ZeroWidthNonJoiner => Some(
                Regex::new(ZWNJ_JOINING_PATTERN)
                    .map_err(|e| IdnaError::InvalidConfig(e.to_string()))?,
            ),
            _ => None,
        };
        Ok(Self {
            name: name.into(),
            kind,
            joining_pattern,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    fn violation(&self, message: String) -> IdnaError {
        IdnaError::ContextualRuleViolation {
            rule: self.name.clone(),
            message,
        }
    }

    fn zero_width_non_joiner(
        &self,
        index: usize,
        cps: &[u32],
        props: &dyn CodePointProperties,
    ) -> IdnaResult<()> {
        if preceded_by_virama(index, cps, props) {
            return Ok(());
        }
        let mut joining = String::with_capacity(cps.len() + 3);
        for &cp in cps {
            if cp == ZERO_WIDTH_NON_JOINER {
                joining.push_str(&Hex(cp).to_string());
            } else {
                joining.push(props.joining_type(cp).to_char());
            }
        }
        if self
            .joining_pattern
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(&joining))
        {
            return Ok(());
        }
        Err(self.violation(format!(
            "code point before {} must have canonical combining class {} or the label must match {} (joining types {})",
            Hex(ZERO_WIDTH_NON_JOINER),
            VIRAMA_CANONICAL_CLASS,
            ZWNJ_JOINING_PATTERN,
            joining
        )))
    }

    fn zero_width_joiner(
        &self,
        index: usize,
        cps: &[u32],
        props: &dyn CodePointProperties,
    ) -> IdnaResult<()> {
        if index == 0 {
            return Err(self.violation(format!(
                "no code point before {}",
                Hex(ZERO_WIDTH_JOINER)
            )));
        }
        if preceded_by_virama(index, cps, props) {
            return Ok(());
        }
        Err(self.violation(format!(
            "code point {} before {} must have canonical combining class {}",
            Hex(cps[index - 1]),
            Hex(ZERO_WIDTH_JOINER),
            VIRAMA_CANONICAL_CLASS
        )))
    }

    fn middle_dot(&self, index: usize, cps: &[u32]) -> IdnaResult<()> {
        let before = index.checked_sub(1).and_then(|i| cps.get(i)).copied();
        let after = cps.get(index + 1).copied();
        match (before, after) {
            (Some(LATIN_SMALL_LETTER_L), Some(LATIN_SMALL_LETTER_L)) => Ok(()),
            (None, _) => Err(self.violation(format!("no code point before {}", Hex(MIDDLE_DOT)))),
            (_, None) => Err(self.violation(format!("no code point after {}", Hex(MIDDLE_DOT)))),
            _ => Err(self.violation(format!(
                "code points before and after {} must both be {}",
                Hex(MIDDLE_DOT),
                Hex(LATIN_SMALL_LETTER_L)
            ))),
        }
    }

    fn greek_lower_numeral_sign(
        &self,
        index: usize,
        cps: &[u32],
        props: &dyn CodePointProperties,
    ) -> IdnaResult<()> {
        let Some(&after) = cps.get(index + 1) else {
            return Err(self.violation(format!(
                "no code point after {}",
                Hex(GREEK_LOWER_NUMERAL_SIGN)
            )));
        };
        if props.script(after) == "Greek" {
            return Ok(());
        }
        Err(self.violation(format!(
            "code point {} after {} must be Greek, found {}",
            Hex(after),
            Hex(GREEK_LOWER_NUMERAL_SIGN),
            props.script(after)
        )))
    }

    fn hebrew_punctuation(
        &self,
        trigger: u32,
        index: usize,
        cps: &[u32],
        props: &dyn CodePointProperties,
    ) -> IdnaResult<()> {
        let Some(before) = index.checked_sub(1).map(|i| cps[i]) else {
            return Err(self.violation(format!("no code point before {}", Hex(trigger))));
        };
        if props.script(before) == "Hebrew" {
            return Ok(());
        }
        Err(self.violation(format!(
            "code point {} before {} must be Hebrew, found {}",
            Hex(before),
            Hex(trigger),
            props.script(before)
        )))
    }

    fn katakana_middle_dot(&self, cps: &[u32], props: &dyn CodePointProperties) -> IdnaResult<()> {
        let found = cps
            .iter()
            .filter(|&&cp| cp != KATAKANA_MIDDLE_DOT)
            .any(|&cp| KATAKANA_MIDDLE_DOT_SCRIPTS.contains(&props.script(cp)));
        if found {
            return Ok(());
        }
        Err(self.violation(format!(
            "a label containing {} needs a code point in one of the scripts {}",
            Hex(KATAKANA_MIDDLE_DOT),
            KATAKANA_MIDDLE_DOT_SCRIPTS.join(", ")
        )))
    }

    fn exclusive_digits(&self, forbidden: (u32, u32), cps: &[u32]) -> IdnaResult<()> {
        match cps.iter().find(|&&cp| in_range(forbidden, cp)) {
            Some(&cp) => Err(self.violation(format!(
                "digits {}..{} may not be mixed with {}..{}, offending code point is {}",
                Hex(ARABIC_INDIC_DIGITS.0),
                Hex(ARABIC_INDIC_DIGITS.1),
                Hex(EXTENDED_ARABIC_INDIC_DIGITS.0),
                Hex(EXTENDED_ARABIC_INDIC_DIGITS.1),
                Hex(cp)
            ))),
            None => Ok(()),
        }
    }
}

impl ContextRule for ContextualRule {
    fn applies_to(&self, cp: u32) -> bool {
        self.kind.applies_to(cp)
    }

    fn evaluates_all(&self) -> bool {
        self.kind.evaluates_all()
    }

    fn execute(
        &self,
        index: usize,
        cps: &[u32],
        props: &dyn CodePointProperties,
    ) -> IdnaResult<()> {
        match self.kind {
            RuleKind::ZeroWidthNonJoiner => self.zero_width_non_joiner(index, cps, props),
            RuleKind::ZeroWidthJoiner => self.zero_width_joiner(index, cps, props),
            RuleKind::MiddleDot => self.middle_dot(index, cps),
            RuleKind::GreekLowerNumeralSign => self.greek_lower_numeral_sign(index, cps, props),
            RuleKind::HebrewPunctuationGeresh => {
                self.hebrew_punctuation(HEBREW_PUNCTUATION_GERESH, index, cps, props)
            }
            RuleKind::HebrewPunctuationGershayim => {
                self.hebrew_punctuation(HEBREW_PUNCTUATION_GERSHAYIM, index, cps, props)
            }
            RuleKind::KatakanaMiddleDot => self.katakana_middle_dot(cps, props),
            RuleKind::ArabicIndicDigits => self.exclusive_digits(EXTENDED_ARABIC_INDIC_DIGITS, cps),
            RuleKind::ExtendedArabicIndicDigits => self.exclusive_digits(ARABIC_INDIC_DIGITS, cps),
        }
    }
}

fn preceded_by_virama(index: usize, cps: &[u32], props: &dyn CodePointProperties) -> bool {
    index
        .checked_sub(1)
        .and_then(|i| cps.get(i))
        .is_some_and(|&cp| props.canonical_class(cp) == VIRAMA_CANONICAL_CLASS)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use idnakit_core::JoiningType;
    use rustc_hash::FxHashMap;

    /// Properties for the handful of code points the rule tests use.
    #[derive(Default)]
    pub(crate) struct MockProperties {
        scripts: FxHashMap<u32, &'static str>,
        joining: FxHashMap<u32, JoiningType>,
        classes: FxHashMap<u32, u8>,
    }

    impl MockProperties {
        pub(crate) fn new() -> Self {
            let mut p = Self::default();
            for cp in 0x61..=0x7A {
                p.scripts.insert(cp, "Latin");
            }
            p.scripts.insert(0x03B1, "Greek");
            p.scripts.insert(0x05D0, "Hebrew");
            p.scripts.insert(0x30A2, "Katakana");
            p.scripts.insert(0x3042, "Hiragana");
            p.scripts.insert(0x4E00, "Han");
            p.scripts.insert(0x0915, "Devanagari");
            p.scripts.insert(0x094D, "Devanagari");
            p.joining.insert(0x0627, JoiningType::RightJoining);
            p.joining.insert(0x0628, JoiningType::DualJoining);
            p.joining.insert(0x0644, JoiningType::DualJoining);
            p.joining.insert(0x064B, JoiningType::Transparent);
            p.classes.insert(0x094D, VIRAMA_CANONICAL_CLASS);
            p.classes.insert(0x0301, 230);
            p
        }
    }

    impl CodePointProperties for MockProperties {
        fn script(&self, cp: u32) -> &str {
            self.scripts.get(&cp).copied().unwrap_or(idnakit_core::UNKNOWN_SCRIPT)
        }

        fn joining_type(&self, cp: u32) -> JoiningType {
            self.joining.get(&cp).copied().unwrap_or_default()
        }

        fn canonical_class(&self, cp: u32) -> u8 {
            self.classes.get(&cp).copied().unwrap_or(0)
        }
    }

    fn check(kind: RuleKind, index: usize, cps: &[u32]) -> IdnaResult<()> {
        let rule = ContextualRule::new(kind.default_name(), kind).unwrap();
        assert!(rule.applies_to(cps[index]));
        rule.execute(index, cps, &MockProperties::new())
    }

    #[test]
    fn test_kind_identifiers() {
        for kind in RuleKind::ALL {
            assert_eq!(kind.identifier().parse::<RuleKind>(), Ok(kind));
        }
        assert!("Bogus".parse::<RuleKind>().is_err());
        assert!(RuleKind::ArabicIndicDigits.applies_to(0x0665));
        assert!(!RuleKind::ArabicIndicDigits.applies_to(0x06F5));
        assert!(RuleKind::KatakanaMiddleDot.evaluates_all());
        assert!(!RuleKind::MiddleDot.evaluates_all());
    }

    #[test]
    fn test_zwnj() {
        // virama before
        assert!(check(RuleKind::ZeroWidthNonJoiner, 2, &[0x0915, 0x094D, 0x200C]).is_ok());
        // D 200C R
        assert!(check(RuleKind::ZeroWidthNonJoiner, 1, &[0x0628, 0x200C, 0x0627]).is_ok());
        // D T 200C T D
        assert!(check(
            RuleKind::ZeroWidthNonJoiner,
            2,
            &[0x0644, 0x064B, 0x200C, 0x064B, 0x0628]
        )
        .is_ok());
        // R 200C D
        assert!(check(RuleKind::ZeroWidthNonJoiner, 1, &[0x0627, 0x200C, 0x0628]).is_err());
        // the whole label must fit the pattern
        assert!(check(RuleKind::ZeroWidthNonJoiner, 2, &[0x61, 0x0628, 0x200C, 0x0627]).is_err());
        assert!(check(RuleKind::ZeroWidthNonJoiner, 0, &[0x200C, 0x0627]).is_err());
    }

    #[test]
    fn test_zwj() {
        assert!(check(RuleKind::ZeroWidthJoiner, 2, &[0x0915, 0x094D, 0x200D]).is_ok());
        assert!(check(RuleKind::ZeroWidthJoiner, 1, &[0x0915, 0x200D]).is_err());
        let err = check(RuleKind::ZeroWidthJoiner, 0, &[0x200D, 0x094D]).unwrap_err();
        match err {
            IdnaError::ContextualRuleViolation { rule, message } => {
                assert_eq!(rule, "ZERO_WIDTH_JOINER");
                assert!(message.contains("200D"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_middle_dot() {
        assert!(check(RuleKind::MiddleDot, 1, &[0x6C, 0xB7, 0x6C]).is_ok());
        assert!(check(RuleKind::MiddleDot, 1, &[0x61, 0xB7, 0x62]).is_err());
        assert!(check(RuleKind::MiddleDot, 0, &[0xB7, 0x6C]).is_err());
        assert!(check(RuleKind::MiddleDot, 1, &[0x6C, 0xB7]).is_err());
    }

    #[test]
    fn test_greek_keraia() {
        assert!(check(RuleKind::GreekLowerNumeralSign, 0, &[0x0375, 0x03B1]).is_ok());
        assert!(check(RuleKind::GreekLowerNumeralSign, 0, &[0x0375, 0x61]).is_err());
        assert!(check(RuleKind::GreekLowerNumeralSign, 1, &[0x03B1, 0x0375]).is_err());
    }

    #[test]
    fn test_hebrew_punctuation() {
        assert!(check(RuleKind::HebrewPunctuationGeresh, 1, &[0x05D0, 0x05F3]).is_ok());
        assert!(check(RuleKind::HebrewPunctuationGershayim, 1, &[0x05D0, 0x05F4]).is_ok());
        assert!(check(RuleKind::HebrewPunctuationGeresh, 1, &[0x61, 0x05F3]).is_err());
        assert!(check(RuleKind::HebrewPunctuationGershayim, 0, &[0x05F4, 0x05D0]).is_err());
    }

    #[test]
    fn test_katakana_middle_dot() {
        assert!(check(RuleKind::KatakanaMiddleDot, 0, &[0x30FB, 0x30A2]).is_ok());
        assert!(check(RuleKind::KatakanaMiddleDot, 1, &[0x4E00, 0x30FB]).is_ok());
        assert!(check(RuleKind::KatakanaMiddleDot, 1, &[0x61, 0x30FB, 0x62]).is_err());
        // the dot itself does not count
        assert!(check(RuleKind::KatakanaMiddleDot, 0, &[0x30FB, 0x30FB]).is_err());
    }

    #[test]
    fn test_arabic_digits() {
        assert!(check(RuleKind::ArabicIndicDigits, 0, &[0x0661, 0x0662]).is_ok());
        assert!(check(RuleKind::ExtendedArabicIndicDigits, 0, &[0x06F1, 0x06F2]).is_ok());
        let err = check(RuleKind::ArabicIndicDigits, 0, &[0x0661, 0x06F1]).unwrap_err();
        assert!(err.to_string().contains("06F1"));
        let err = check(RuleKind::ExtendedArabicIndicDigits, 1, &[0x0661, 0x06F1]).unwrap_err();
        assert!(err.to_string().contains("0661"));
    }
}
