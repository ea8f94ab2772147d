pub mod context;
pub mod registry;

use std::collections::{BTreeMap, BTreeSet};

use deprec_lint_core::config::RuleLevel;
use deprec_lint_core::diagnostics::{Diagnostic, Severity, sort_diagnostics};
use deprec_lint_core::lints::{all_lints, find_lint};
use deprec_lint_core::policy::is_supported_policy;

use self::context::RuleContext;
use self::registry::{RuleRegistration, full_registry};

pub trait Rule {
    fn name(&self) -> &'static str;
    /// Every lint id this rule may attach to a diagnostic.
    fn supported_lints(&self) -> &'static [&'static str];
    fn run(&self, ctx: &RuleContext<'_>, out: &mut Vec<Diagnostic>);
}

#[derive(Clone, Debug, Default)]
pub struct RuleRunSettings {
    pub effective_levels: BTreeMap<String, RuleLevel>,
}

pub struct RuleEngine {
    registry: Vec<RuleRegistration>,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleEngine {
    pub fn new() -> Self {
        let registry = full_registry();
        validate_registry(&registry);
        validate_registry_integrity_with_catalog(&registry);
        Self { registry }
    }

    pub fn with_registry(registry: Vec<RuleRegistration>) -> Self {
        validate_registry(&registry);
        Self { registry }
    }

    pub fn run_with_settings(
        &self,
        ctx: &RuleContext<'_>,
        settings: &RuleRunSettings,
    ) -> Vec<Diagnostic> {
        self.run(ctx, &settings.effective_levels)
    }

    pub fn run(
        &self,
        ctx: &RuleContext<'_>,
        effective_levels: &BTreeMap<String, RuleLevel>,
    ) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::<Diagnostic>::new();

        for registration in &self.registry {
            // Run each rule against an isolated output buffer so a rule cannot
            // mutate diagnostics emitted by previously executed rules.
            let mut rule_diagnostics = Vec::<Diagnostic>::new();
            registration.rule.run(ctx, &mut rule_diagnostics);

            for mut diagnostic in rule_diagnostics {
                let lint = registration
                    .lints
                    .iter()
                    .find(|lint| lint.id == diagnostic.rule_id)
                    .unwrap_or_else(|| {
                        panic!(
                            "rule '{}' emitted unsupported lint id '{}'",
                            registration.rule.name(),
                            diagnostic.rule_id
                        )
                    });

                let level = effective_levels
                    .get(lint.id)
                    .copied()
                    .unwrap_or(lint.default_level);
                if level == RuleLevel::Allow {
                    continue;
                }

                diagnostic.severity = level_to_severity(level);
                diagnostic.confidence = lint.confidence;
                diagnostic.policy = lint.policy.to_string();
                diagnostics.push(diagnostic);
            }
        }

        sort_diagnostics(&mut diagnostics);
        diagnostics
    }
}

fn validate_registry(registry: &[RuleRegistration]) {
    let mut seen_rule_ids = BTreeSet::<&'static str>::new();

    for registration in registry {
        assert!(
            !registration.lints.is_empty(),
            "rule '{}' supports no lints",
            registration.rule.name()
        );

        for lint in &registration.lints {
            let normalized = lint.id.trim().to_ascii_uppercase();
            assert_eq!(
                lint.id, normalized,
                "lint id '{}' must be canonical uppercase",
                lint.id
            );
            assert!(
                seen_rule_ids.insert(lint.id),
                "lint id '{}' is claimed by more than one rule",
                lint.id
            );
            assert!(
                is_supported_policy(lint.policy),
                "lint '{}' names unsupported policy '{}'",
                lint.id,
                lint.policy
            );
        }
    }
}

fn validate_registry_integrity_with_catalog(registry: &[RuleRegistration]) {
    let mut seen_rule_ids = BTreeSet::<&'static str>::new();

    for registration in registry {
        for lint in &registration.lints {
            seen_rule_ids.insert(lint.id);

            let canonical = find_lint(lint.id).unwrap_or_else(|| {
                panic!(
                    "runtime lint '{}' is missing from canonical lint catalog",
                    lint.id
                )
            });
            assert!(
                canonical.lifecycle.is_active(),
                "runtime lint '{}' maps to non-active canonical lint metadata",
                lint.id
            );
        }
    }

    for lint in all_lints().iter().filter(|lint| lint.lifecycle.is_active()) {
        assert!(
            seen_rule_ids.contains(lint.id),
            "canonical lint '{}' is missing from runtime rule registry",
            lint.id
        );
    }
}

fn level_to_severity(level: RuleLevel) -> Severity {
    match level {
        RuleLevel::Allow => Severity::Warning,
        RuleLevel::Warn => Severity::Warning,
        RuleLevel::Deny => Severity::Error,
    }
}
