//! Rule bindings: which rule variants run, under which names, in which order

use idnakit_core::{IdnaError, IdnaResult};
use serde::{Deserialize, Serialize};

use crate::rule::RuleKind;

/// One `(rule_name, rule_variant)` pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleBinding {
    pub name: String,
    pub variant: String,
}

impl RuleBinding {
    pub fn new(name: impl Into<String>, variant: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variant: variant.into(),
        }
    }
}

/// The nine RFC 5892 Appendix A rules in Appendix order.
pub fn default_bindings() -> Vec<RuleBinding> {
    RuleKind::ALL
        .iter()
        .map(|kind| RuleBinding::new(kind.default_name(), kind.identifier()))
        .collect()
}

/// Source name reported for malformed rule configuration lines
pub const RULE_PROPERTIES: &str = "contextual rules";

/// Parse `name = Variant` lines.
///
/// Blank lines and `#` comments are ignored. A line without exactly one
/// `=` or with an empty side fails with `InvalidFileFormat`. Variants are
/// checked when the registry is built, not here.
pub fn parse_rule_properties(text: &str) -> IdnaResult<Vec<RuleBinding>> {
    let mut bindings = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let mut parts = trimmed.split('=');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(name), Some(variant), None)
                if !name.trim().is_empty() && !variant.trim().is_empty() =>
            {
                bindings.push(RuleBinding::new(name.trim(), variant.trim()));
            }
            _ => {
                return Err(IdnaError::InvalidFileFormat {
                    source_name: RULE_PROPERTIES.to_string(),
                    line_number: idx + 1,
                    line: line.to_string(),
                });
            }
        }
    }
    Ok(bindings)
}
