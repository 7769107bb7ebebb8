//! idnakit UCD - Unicode Character Database property tables
//!
//! Reads the plain text UCD files the classifier is derived from:
//! - Generic `XXXX..YYYY ; value # comment` records
//! - UnicodeData.txt, including `<..., First>`/`<..., Last>` ranges
//! - Decomposition and composition tables for normalization
//! - Range keyed property maps with binary search lookup

pub mod record;
pub mod map;
pub mod composition;
pub mod unicode_data;
pub mod tables;

pub use record::*;
pub use map::*;
pub use composition::*;
pub use unicode_data::*;
pub use tables::*;
