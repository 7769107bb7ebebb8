//! idnakit Context - RFC 5892 Appendix A contextual rules
//!
//! CONTEXTO and CONTEXTJ code points are only valid in a label when a
//! positional rule holds. This crate provides:
//! - The closed set of rule variants and their checks
//! - Rule bindings read from configuration
//! - The registry that runs the rules over a label

pub mod rule;
pub mod config;
pub mod registry;

pub use rule::*;
pub use config::*;
pub use registry::*;
