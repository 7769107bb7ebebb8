//! Error types for idnakit

use std::path::PathBuf;

use thiserror::Error;

/// idnakit errors
#[derive(Error, Debug)]
pub enum IdnaError {
    // Data loading errors
    #[error("Invalid file format in {source_name} at line {line_number}: {line}")]
    InvalidFileFormat {
        source_name: String,
        line_number: usize,
        line: String,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Canonical combining class '{value}' out of range for {code_point:04X}")]
    BadCanonicalClass { code_point: u32, value: String },

    #[error("Unterminated compatibility tag in decomposition of {code_point:04X}")]
    BadCompatibilityTag { code_point: u32 },

    #[error("Canonical decomposition of {code_point:04X} must map to one or two code points")]
    BadDecomposition { code_point: u32 },

    #[error("Unknown variant '{variant}' for contextual rule '{rule}'")]
    UnknownRuleVariant { rule: String, variant: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Initialization failed: {0}")]
    Initialization(#[source] Box<IdnaError>),

    // Validation errors
    #[error("Invalid code point: {0:X}")]
    InvalidCodePoint(u32),

    #[error("{label} {code_point:04X}")]
    FilterRejected { label: String, code_point: u32 },

    #[error("Contextual rule {rule} violated: {message}")]
    ContextualRuleViolation { rule: String, message: String },

    #[error("No contextual rules were executed even though contextual code points were present")]
    NoContextualRuleExecuted,

    #[error("Input is not in NFC form")]
    NotInNfc,

    #[error("Null character present in input")]
    NullCharacterPresent,

    #[error("No canonical combining class for {code_point:04X}")]
    CanonicalLookup { code_point: u32 },

    #[error("Empty label")]
    EmptyLabel,

    #[error("Label violates the hyphen restriction")]
    HyphenRestriction,

    #[error("Label begins with combining mark {code_point:04X}")]
    LeadingCombiningMark { code_point: u32 },

    #[error("Bidi rule {rule} violated at {code_point:04X}")]
    BidiRuleViolation { rule: u8, code_point: u32 },
}

impl IdnaError {
    /// Wrap a data or configuration error raised while building tables.
    pub fn initialization(cause: IdnaError) -> Self {
        match cause {
            IdnaError::Initialization(_) => cause,
            other => IdnaError::Initialization(Box::new(other)),
        }
    }

    /// Errors that reject a single label rather than the whole process.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            IdnaError::InvalidCodePoint(_)
                | IdnaError::FilterRejected { .. }
                | IdnaError::ContextualRuleViolation { .. }
                | IdnaError::NoContextualRuleExecuted
                | IdnaError::NotInNfc
                | IdnaError::NullCharacterPresent
                | IdnaError::CanonicalLookup { .. }
                | IdnaError::EmptyLabel
                | IdnaError::HyphenRestriction
                | IdnaError::LeadingCombiningMark { .. }
                | IdnaError::BidiRuleViolation { .. }
        )
    }
}

pub type IdnaResult<T> = Result<T, IdnaError>;
