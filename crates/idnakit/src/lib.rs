//! idnakit - IDNA2008 code point classification
//!
//! Builds an immutable [`IdnaContext`] from the Unicode Character Database
//! and answers the questions a label validator asks:
//! - Is a code point PVALID, CONTEXTO, CONTEXTJ, DISALLOWED or UNASSIGNED?
//! - Do a label's contextual code points satisfy RFC 5892 Appendix A?
//! - Does a right-to-left label meet the RFC 5893 Bidi rule?
//! - Is a label in normalized form?
//!
//! ```no_run
//! use idnakit::{IdnaConfig, IdnaContext};
//!
//! let ctx = IdnaContext::build(&IdnaConfig::default().with_data_dir("data/ucd"))?;
//! let label: Vec<u32> = "l\u{b7}l".chars().map(u32::from).collect();
//! ctx.check_label(&label)?;
//! # Ok::<(), idnakit::IdnaError>(())
//! ```

pub mod bidi;
pub mod config;
pub mod context;
pub mod shared;

pub use config::*;
pub use context::*;

pub use idnakit_context::{ContextRule, ContextualRule, ContextualRulesRegistry, RuleBinding, RuleKind};
pub use idnakit_core::{
    CodePointProperties, CodePointRange, DerivedProperty, GeneralCategory, IdnaError, IdnaResult,
    JoiningType, NormalizationCheck, UnicodeFilter,
};
pub use idnakit_tables::{explain, CategoryCounts, Classifier, DerivationStep, Normalizer};
pub use idnakit_ucd::PropertyTables;
