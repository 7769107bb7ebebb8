//! Per code point property lookups used by contextual rules

use std::sync::Arc;

use crate::category::JoiningType;

/// Script name reported for code points without a Scripts.txt entry
pub const UNKNOWN_SCRIPT: &str = "Unknown";

/// Read access to the properties contextual rules inspect.
pub trait CodePointProperties {
    /// Script name, or [`UNKNOWN_SCRIPT`].
    fn script(&self, cp: u32) -> &str;

    fn joining_type(&self, cp: u32) -> JoiningType;

    /// Canonical combining class, 0 when absent.
    fn canonical_class(&self, cp: u32) -> u8;
}

impl<T: CodePointProperties + ?Sized> CodePointProperties for &T {
    fn script(&self, cp: u32) -> &str {
        (**self).script(cp)
    }

    fn joining_type(&self, cp: u32) -> JoiningType {
        (**self).joining_type(cp)
    }

    fn canonical_class(&self, cp: u32) -> u8 {
        (**self).canonical_class(cp)
    }
}

impl<T: CodePointProperties + ?Sized> CodePointProperties for Arc<T> {
    fn script(&self, cp: u32) -> &str {
        (**self).script(cp)
    }

    fn joining_type(&self, cp: u32) -> JoiningType {
        (**self).joining_type(cp)
    }

    fn canonical_class(&self, cp: u32) -> u8 {
        (**self).canonical_class(cp)
    }
}
