//! IDNA2008 categories and the Unicode property values they are derived from
//!
//! - DerivedProperty: the five RFC 5892 categories
//! - NormalizationCheck: outcome of the NFC quick check
//! - GeneralCategory, JoiningType, HangulSyllableType: UCD enumerations

use std::fmt;

/// Canonical combining class of a virama
pub const VIRAMA_CANONICAL_CLASS: u8 = 9;

pub const ZERO_WIDTH_NON_JOINER: u32 = 0x200C;
pub const ZERO_WIDTH_JOINER: u32 = 0x200D;
pub const HYPHEN_MINUS: u32 = 0x002D;

/// IDNA2008 derived property of a code point (RFC 5892 section 2)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum DerivedProperty {
    /// Permitted in labels without restriction
    Pvalid = 0x00,
    /// Never permitted
    #[default]
    Disallowed = 0x01,
    /// Not assigned in the loaded Unicode version
    Unassigned = 0x02,
    /// Permitted when a contextual rule holds, other than join controls
    ContextO = 0x03,
    /// Join controls, permitted when a joining rule holds
    ContextJ = 0x04,
}

impl DerivedProperty {
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0x00 => Some(DerivedProperty::Pvalid),
            0x01 => Some(DerivedProperty::Disallowed),
            0x02 => Some(DerivedProperty::Unassigned),
            0x03 => Some(DerivedProperty::ContextO),
            0x04 => Some(DerivedProperty::ContextJ),
            _ => None,
        }
    }

    #[inline]
    pub fn to_byte(self) -> u8 {
        self as u8
    }

    /// Name as written in RFC 5892 tables.
    pub fn as_str(self) -> &'static str {
        match self {
            DerivedProperty::Pvalid => "PVALID",
            DerivedProperty::Disallowed => "DISALLOWED",
            DerivedProperty::Unassigned => "UNASSIGNED",
            DerivedProperty::ContextO => "CONTEXTO",
            DerivedProperty::ContextJ => "CONTEXTJ",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "PVALID" => Some(DerivedProperty::Pvalid),
            "DISALLOWED" => Some(DerivedProperty::Disallowed),
            "UNASSIGNED" => Some(DerivedProperty::Unassigned),
            "CONTEXTO" => Some(DerivedProperty::ContextO),
            "CONTEXTJ" => Some(DerivedProperty::ContextJ),
            _ => None,
        }
    }

    /// CONTEXTO or CONTEXTJ
    pub fn is_contextual(self) -> bool {
        matches!(self, DerivedProperty::ContextO | DerivedProperty::ContextJ)
    }

    /// May appear in a label, possibly subject to a contextual rule
    pub fn is_permitted(self) -> bool {
        matches!(
            self,
            DerivedProperty::Pvalid | DerivedProperty::ContextO | DerivedProperty::ContextJ
        )
    }
}

impl fmt::Display for DerivedProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of the NFC quick check over a sequence
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NormalizationCheck {
    /// Some code point has NFC_QC=N
    CannotNormalize = 0,
    AlreadyNormalized = 1,
    /// Some code point has NFC_QC=M and none has NFC_QC=N
    NormalizationNeeded = 2,
}

/// Unicode General_Category
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum GeneralCategory {
    UppercaseLetter,
    LowercaseLetter,
    TitlecaseLetter,
    ModifierLetter,
    OtherLetter,
    NonspacingMark,
    SpacingMark,
    EnclosingMark,
    DecimalNumber,
    LetterNumber,
    OtherNumber,
    ConnectorPunctuation,
    DashPunctuation,
    OpenPunctuation,
    ClosePunctuation,
    InitialPunctuation,
    FinalPunctuation,
    OtherPunctuation,
    MathSymbol,
    CurrencySymbol,
    ModifierSymbol,
    OtherSymbol,
    SpaceSeparator,
    LineSeparator,
    ParagraphSeparator,
    Control,
    Format,
    Surrogate,
    PrivateUse,
    #[default]
    Unassigned,
}

impl GeneralCategory {
    /// Parse the two letter abbreviation used in UnicodeData.txt.
    pub fn from_abbr(abbr: &str) -> Option<Self> {
        use GeneralCategory::*;
        Some(match abbr {
            "Lu" => UppercaseLetter,
            "Ll" => LowercaseLetter,
            "Lt" => TitlecaseLetter,
            "Lm" => ModifierLetter,
            "Lo" => OtherLetter,
            "Mn" => NonspacingMark,
            "Mc" => SpacingMark,
            "Me" => EnclosingMark,
            "Nd" => DecimalNumber,
            "Nl" => LetterNumber,
            "No" => OtherNumber,
            "Pc" => ConnectorPunctuation,
            "Pd" => DashPunctuation,
            "Ps" => OpenPunctuation,
            "Pe" => ClosePunctuation,
            "Pi" => InitialPunctuation,
            "Pf" => FinalPunctuation,
            "Po" => OtherPunctuation,
            "Sm" => MathSymbol,
            "Sc" => CurrencySymbol,
            "Sk" => ModifierSymbol,
            "So" => OtherSymbol,
            "Zs" => SpaceSeparator,
            "Zl" => LineSeparator,
            "Zp" => ParagraphSeparator,
            "Cc" => Control,
            "Cf" => Format,
            "Cs" => Surrogate,
            "Co" => PrivateUse,
            "Cn" => Unassigned,
            _ => return None,
        })
    }

    pub fn abbr(self) -> &'static str {
        use GeneralCategory::*;
        match self {
            UppercaseLetter => "Lu",
            LowercaseLetter => "Ll",
            TitlecaseLetter => "Lt",
            ModifierLetter => "Lm",
            OtherLetter => "Lo",
            NonspacingMark => "Mn",
            SpacingMark => "Mc",
            EnclosingMark => "Me",
            DecimalNumber => "Nd",
            LetterNumber => "Nl",
            OtherNumber => "No",
            ConnectorPunctuation => "Pc",
            DashPunctuation => "Pd",
            OpenPunctuation => "Ps",
            ClosePunctuation => "Pe",
            InitialPunctuation => "Pi",
            FinalPunctuation => "Pf",
            OtherPunctuation => "Po",
            MathSymbol => "Sm",
            CurrencySymbol => "Sc",
            ModifierSymbol => "Sk",
            OtherSymbol => "So",
            SpaceSeparator => "Zs",
            LineSeparator => "Zl",
            ParagraphSeparator => "Zp",
            Control => "Cc",
            Format => "Cf",
            Surrogate => "Cs",
            PrivateUse => "Co",
            Unassigned => "Cn",
        }
    }

    /// Mn, Mc or Me
    pub fn is_combining_mark(self) -> bool {
        matches!(
            self,
            GeneralCategory::NonspacingMark
                | GeneralCategory::SpacingMark
                | GeneralCategory::EnclosingMark
        )
    }

    /// The categories RFC 5892 section 2.1 treats as letters and digits:
    /// Ll, Lu, Lo, Nd, Lm, Mn, Mc.
    pub fn is_letter_digit(self) -> bool {
        matches!(
            self,
            GeneralCategory::LowercaseLetter
                | GeneralCategory::UppercaseLetter
                | GeneralCategory::OtherLetter
                | GeneralCategory::DecimalNumber
                | GeneralCategory::ModifierLetter
                | GeneralCategory::NonspacingMark
                | GeneralCategory::SpacingMark
        )
    }
}

impl fmt::Display for GeneralCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbr())
    }
}

/// Arabic cursive joining behaviour (Joining_Type)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum JoiningType {
    /// Non joining, also used when a code point has no entry
    #[default]
    NonJoining,
    LeftJoining,
    RightJoining,
    DualJoining,
    JoinCausing,
    Transparent,
}

impl JoiningType {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'U' => Some(JoiningType::NonJoining),
            'L' => Some(JoiningType::LeftJoining),
            'R' => Some(JoiningType::RightJoining),
            'D' => Some(JoiningType::DualJoining),
            'C' => Some(JoiningType::JoinCausing),
            'T' => Some(JoiningType::Transparent),
            _ => None,
        }
    }

    /// Parse a DerivedJoiningType.txt value.
    pub fn from_abbr(abbr: &str) -> Option<Self> {
        let mut chars = abbr.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
    }

    #[inline]
    pub fn to_char(self) -> char {
        match self {
            JoiningType::NonJoining => 'U',
            JoiningType::LeftJoining => 'L',
            JoiningType::RightJoining => 'R',
            JoiningType::DualJoining => 'D',
            JoiningType::JoinCausing => 'C',
            JoiningType::Transparent => 'T',
        }
    }
}

/// Hangul_Syllable_Type
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum HangulSyllableType {
    LeadingJamo,
    VowelJamo,
    TrailingJamo,
    LvSyllable,
    LvtSyllable,
    #[default]
    NotApplicable,
}

impl HangulSyllableType {
    pub fn from_abbr(abbr: &str) -> Option<Self> {
        match abbr {
            "L" => Some(HangulSyllableType::LeadingJamo),
            "V" => Some(HangulSyllableType::VowelJamo),
            "T" => Some(HangulSyllableType::TrailingJamo),
            "LV" => Some(HangulSyllableType::LvSyllable),
            "LVT" => Some(HangulSyllableType::LvtSyllable),
            "NA" => Some(HangulSyllableType::NotApplicable),
            _ => None,
        }
    }

    /// Conjoining jamo (L, V or T)
    pub fn is_jamo(self) -> bool {
        matches!(
            self,
            HangulSyllableType::LeadingJamo
                | HangulSyllableType::VowelJamo
                | HangulSyllableType::TrailingJamo
        )
    }
}
