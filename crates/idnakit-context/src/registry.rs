//! Ordered registry of contextual rules

use indexmap::{IndexMap, IndexSet};
use idnakit_core::{format_sequence, CodePointProperties, IdnaError, IdnaResult};

use crate::config::{default_bindings, parse_rule_properties, RuleBinding};
use crate::rule::{ContextRule, ContextualRule, RuleKind};

/// Rules keyed by name, iterated in configuration order.
#[derive(Clone, Debug, Default)]
pub struct ContextualRulesRegistry {
    rules: IndexMap<String, ContextualRule>,
}

impl ContextualRulesRegistry {
    /// Build from configured bindings. An unknown variant fails the build.
    pub fn from_bindings<'a, I>(bindings: I) -> IdnaResult<Self>
    where
        I: IntoIterator<Item = &'a RuleBinding>,
    {
        let mut rules = IndexMap::new();
        for binding in bindings {
            let kind: RuleKind = binding.variant.parse().map_err(|_| {
                IdnaError::UnknownRuleVariant {
                    rule: binding.name.clone(),
                    variant: binding.variant.clone(),
                }
            })?;
            let rule = ContextualRule::new(binding.name.clone(), kind)?;
            if rules.insert(binding.name.clone(), rule).is_some() {
                tracing::warn!(
                    "contextual rule {} configured twice, keeping the last",
                    binding.name
                );
            }
        }
        tracing::debug!(rules = rules.len(), "built contextual rules registry");
        Ok(Self { rules })
    }

    /// Build from `name = Variant` lines. A malformed line fails the build.
    pub fn from_properties(text: &str) -> IdnaResult<Self> {
        Self::from_bindings(&parse_rule_properties(text)?)
    }

    /// All nine RFC 5892 Appendix A rules.
    pub fn rfc5892() -> IdnaResult<Self> {
        Self::from_bindings(&default_bindings())
    }

    pub fn get(&self, name: &str) -> Option<&ContextualRule> {
        self.rules.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.rules.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every applicable rule over `cps` and return the names of the
    /// rules that ran, in order.
    ///
    /// For each position, rules are tried in registry order. A rule that
    /// evaluates the whole label runs at most once. The first violation
    /// aborts the run. Callers should only invoke this when the label has
    /// contextual code points; if no rule runs, `NoContextualRuleExecuted`
    /// is returned.
    pub fn run(
        &self,
        cps: &[u32],
        props: &dyn CodePointProperties,
    ) -> IdnaResult<IndexSet<&str>> {
        let mut executed: IndexSet<&str> = IndexSet::new();

        for (index, &cp) in cps.iter().enumerate() {
            for (name, rule) in &self.rules {
                if rule.evaluates_all() && executed.contains(name.as_str()) {
                    continue;
                }
                if !rule.applies_to(cp) {
                    continue;
                }
                rule.execute(index, cps, props)?;
                tracing::trace!("contextual rule {} passed at index {}", name, index);
                executed.insert(name.as_str());
            }
        }

        if executed.is_empty() {
            tracing::debug!("no contextual rule ran for {}", format_sequence(cps));
            return Err(IdnaError::NoContextualRuleExecuted);
        }
        Ok(executed)
    }
}
