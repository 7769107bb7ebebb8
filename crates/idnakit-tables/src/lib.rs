//! idnakit Tables - IDNA2008 derived properties
//!
//! Classifies every code point into one of the five RFC 5892 categories:
//! - Exception and backward compatibility overrides
//! - The ordered derivation chain over the Unicode property tables
//! - The collapsed runtime classifier and its query API
//! - Table driven NFKC normalization

pub mod exceptions;
pub mod derive;
pub mod normalize;
pub mod classifier;

pub use exceptions::*;
pub use derive::*;
pub use normalize::*;
pub use classifier::*;
