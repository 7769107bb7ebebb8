//! idnakit Core - Code point primitives
//!
//! This crate defines the types shared by every idnakit crate:
//! - Code point validation and plane arithmetic
//! - Inclusive code point ranges
//! - Per-plane bitmaps and the adaptive membership filter
//! - IDNA2008 categories and the Unicode property enums they depend on
//! - The error type

pub mod codepoint;
pub mod range;
pub mod matrix;
pub mod filter;
pub mod category;
pub mod properties;
pub mod error;

pub use codepoint::*;
pub use range::*;
pub use matrix::*;
pub use filter::*;
pub use category::*;
pub use properties::*;
pub use error::*;
