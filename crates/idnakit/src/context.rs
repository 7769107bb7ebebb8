use std::sync::Arc;

use idnakit_context::ContextualRulesRegistry;
use idnakit_core::{
    DerivedProperty, GeneralCategory, IdnaError, IdnaResult, JoiningType, HYPHEN_MINUS,
};
use idnakit_tables::Classifier;
use idnakit_ucd::PropertyTables;
use indexmap::IndexSet;

use crate::bidi::{check_bidi, has_rtl};
use crate::config::IdnaConfig;

/// Classifier and contextual rules built once and shared read-only.
///
/// Cloning is cheap; both halves sit behind an `Arc`.
#[derive(Clone, Debug)]
pub struct IdnaContext {
    classifier: Arc<Classifier>,
    rules: Arc<ContextualRulesRegistry>,
}

impl IdnaContext {
    /// Load the UCD files named by `config` and build the classifier.
    ///
    /// Any failure is reported as [`IdnaError::Initialization`].
    pub fn build(config: &IdnaConfig) -> IdnaResult<Self> {
        PropertyTables::load_dir(&config.data_dir)
            .and_then(|tables| Self::assemble(tables, config))
            .map_err(IdnaError::initialization)
    }

    /// Build from tables that are already parsed.
    pub fn from_tables(tables: PropertyTables, config: &IdnaConfig) -> IdnaResult<Self> {
        Self::assemble(tables, config).map_err(IdnaError::initialization)
    }

    pub fn from_parts(classifier: Arc<Classifier>, rules: Arc<ContextualRulesRegistry>) -> Self {
        Self { classifier, rules }
    }

    /// Same classifier, different rules.
    pub fn with_rules(&self, rules: ContextualRulesRegistry) -> Self {
        Self::from_parts(Arc::clone(&self.classifier), Arc::new(rules))
    }

    fn assemble(tables: PropertyTables, config: &IdnaConfig) -> IdnaResult<Self> {
        let rules = ContextualRulesRegistry::from_bindings(&config.resolve_rules()?)?;
        let classifier = Classifier::build_with_threshold(tables, config.filter_range_threshold)?;
        tracing::info!(rules = rules.len(), "IDNA context ready");
        Ok(Self::from_parts(Arc::new(classifier), Arc::new(rules)))
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn rules(&self) -> &ContextualRulesRegistry {
        &self.rules
    }

    pub fn assert_no_disallowed_or_unassigned(&self, cps: &[u32]) -> IdnaResult<()> {
        self.classifier.assert_no_disallowed_or_unassigned(cps)
    }

    pub fn is_disallowed_or_unassigned(&self, cp: u32) -> bool {
        self.classifier.is_disallowed_or_unassigned(cp)
    }

    pub fn get_code_point_derived_property(&self, cp: u32) -> DerivedProperty {
        self.classifier.get_code_point_derived_property(cp)
    }

    pub fn has_contextual_code_points(&self, cps: &[u32]) -> bool {
        self.classifier.has_contextual_code_points(cps)
    }

    pub fn get_script(&self, cp: u32) -> &str {
        self.classifier.get_script(cp)
    }

    pub fn get_bidi_class(&self, cp: u32) -> &str {
        self.classifier.get_bidi_class(cp)
    }

    pub fn get_joining_type(&self, cp: u32) -> JoiningType {
        self.classifier.get_joining_type(cp)
    }

    pub fn get_canonical_class(&self, cp: u32) -> u8 {
        self.classifier.get_canonical_class(cp)
    }

    pub fn get_general_category(&self, cp: u32) -> GeneralCategory {
        self.classifier.get_general_category(cp)
    }

    /// Run the contextual rules over `cps` with this context's properties.
    pub fn run_contextual_rules(&self, cps: &[u32]) -> IdnaResult<IndexSet<&str>> {
        self.rules.run(cps, self.classifier.as_ref())
    }

    /// Validate a U-label's code points.
    ///
    /// Checks, in order: non-empty, no DISALLOWED or UNASSIGNED code
    /// point, hyphen placement, no leading combining mark, then the
    /// contextual rules when the label has CONTEXTO or CONTEXTJ points,
    /// then the Bidi rule when the label holds a right-to-left code point.
    pub fn check_label(&self, cps: &[u32]) -> IdnaResult<()> {
        let (&first, &last) = match (cps.first(), cps.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(IdnaError::EmptyLabel),
        };
        self.classifier.assert_no_disallowed_or_unassigned(cps)?;

        if first == HYPHEN_MINUS
            || last == HYPHEN_MINUS
            || (cps.len() > 3 && cps[2] == HYPHEN_MINUS && cps[3] == HYPHEN_MINUS)
        {
            return Err(IdnaError::HyphenRestriction);
        }
        if self.classifier.is_combining_mark(first) {
            return Err(IdnaError::LeadingCombiningMark { code_point: first });
        }
        if self.classifier.has_contextual_code_points(cps) {
            self.run_contextual_rules(cps)?;
        }
        if self.is_rtl_label(cps) {
            self.check_bidi(cps)?;
        }
        Ok(())
    }

    /// Validate every label of a domain.
    ///
    /// Once any label is right-to-left the domain is a Bidi domain and the
    /// Bidi rule applies to all of its labels, left-to-right ones included.
    pub fn check_domain<L: AsRef<[u32]>>(&self, labels: &[L]) -> IdnaResult<()> {
        for label in labels {
            self.check_label(label.as_ref())?;
        }
        if labels.iter().any(|label| self.is_rtl_label(label.as_ref())) {
            for label in labels {
                self.check_bidi(label.as_ref())?;
            }
        }
        Ok(())
    }

    /// True if some code point has bidi class R, AL or AN.
    pub fn is_rtl_label(&self, cps: &[u32]) -> bool {
        has_rtl(cps, |cp| self.classifier.get_bidi_class(cp))
    }

    /// Apply the RFC 5893 Bidi rule to one label.
    pub fn check_bidi(&self, cps: &[u32]) -> IdnaResult<()> {
        check_bidi(cps, |cp| self.classifier.get_bidi_class(cp))
    }
}
