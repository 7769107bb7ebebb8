//! Configuration

use std::fs;
use std::path::{Path, PathBuf};

use idnakit_context::{default_bindings, parse_rule_properties, RuleBinding};
use idnakit_core::{IdnaError, IdnaResult, DEFAULT_RANGE_THRESHOLD};
use serde::{Deserialize, Serialize};

/// Where the Unicode data lives and which contextual rules run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdnaConfig {
    /// Directory holding the UCD text files. The default, `data/ucd`, is
    /// relative to the working directory and not shipped with the crate;
    /// point it at a full UCD download before calling `IdnaContext::build`.
    pub data_dir: PathBuf,
    /// Contextual rules in evaluation order
    pub contextual_rules: Vec<RuleBinding>,
    /// `name = Variant` rule file read at build time. Replaces
    /// `contextual_rules` when set.
    pub contextual_rules_file: Option<PathBuf>,
    /// Ranges a plane of the classifier's filters may hold before it
    /// switches to a bitmap
    pub filter_range_threshold: u32,
}

impl Default for IdnaConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data/ucd"),
            contextual_rules: default_bindings(),
            contextual_rules_file: None,
            filter_range_threshold: DEFAULT_RANGE_THRESHOLD,
        }
    }
}

impl IdnaConfig {
    pub fn from_json(text: &str) -> IdnaResult<Self> {
        serde_json::from_str(text).map_err(|e| IdnaError::InvalidConfig(e.to_string()))
    }

    /// Read a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> IdnaResult<Self> {
        Self::from_json(&read_text(path.as_ref())?)
    }

    pub fn to_json(&self) -> IdnaResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| IdnaError::InvalidConfig(e.to_string()))
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Replace the rule list with `name = Variant` lines.
    pub fn with_rule_properties(mut self, text: &str) -> IdnaResult<Self> {
        self.contextual_rules = parse_rule_properties(text)?;
        Ok(self)
    }

    pub fn with_rule_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.contextual_rules_file = Some(path.into());
        self
    }

    /// The rule list to build, reading `contextual_rules_file` if set.
    pub fn resolve_rules(&self) -> IdnaResult<Vec<RuleBinding>> {
        match &self.contextual_rules_file {
            Some(path) => parse_rule_properties(&read_text(path)?),
            None => Ok(self.contextual_rules.clone()),
        }
    }

    pub fn with_filter_range_threshold(mut self, threshold: u32) -> Self {
        self.filter_range_threshold = threshold;
        self
    }
}

fn read_text(path: &Path) -> IdnaResult<String> {
    fs::read_to_string(path).map_err(|source| IdnaError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_defaults() {
        let config = IdnaConfig::from_json(r#"{ "data_dir": "/srv/ucd" }"#).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/ucd"));
        assert_eq!(config.contextual_rules, default_bindings());
        assert_eq!(config.filter_range_threshold, 30);
        assert_eq!(config.contextual_rules_file, None);
    }

    #[test]
    fn test_default_data_dir_is_reported_when_missing() {
        let config = IdnaConfig::default().with_data_dir("/nonexistent/ucd");
        assert_eq!(IdnaConfig::default().data_dir, PathBuf::from("data/ucd"));
        match crate::IdnaContext::build(&config) {
            Err(IdnaError::Initialization(inner)) => match *inner {
                IdnaError::Io { path, .. } => assert!(path.starts_with("/nonexistent/ucd")),
                other => panic!("unexpected cause: {other:?}"),
            },
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_rule_properties() {
        let err = IdnaConfig::default()
            .with_rule_properties("MIDDLE_DOT=MiddleDot\nKATAKANA\n")
            .unwrap_err();
        assert!(matches!(err, IdnaError::InvalidFileFormat { line_number: 2, .. }));
    }

    #[test]
    fn test_resolve_rules_reads_file() {
        let config = IdnaConfig::default().with_rule_file("/nonexistent/rules.properties");
        assert!(matches!(config.resolve_rules(), Err(IdnaError::Io { .. })));
        assert_eq!(IdnaConfig::default().resolve_rules().unwrap(), default_bindings());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = IdnaConfig::default()
            .with_rule_properties("MIDDLE_DOT=MiddleDot\n")
            .unwrap()
            .with_filter_range_threshold(8);
        let back = IdnaConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(back, config);
        assert_eq!(back.contextual_rules.len(), 1);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            IdnaConfig::from_json("{ \"filter_range_threshold\": -1 }"),
            Err(IdnaError::InvalidConfig(_))
        ));
        assert!(matches!(
            IdnaConfig::load("/nonexistent/idnakit.json"),
            Err(IdnaError::Io { .. })
        ));
    }
}
