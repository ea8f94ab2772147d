use deprec_lint_core::lints::{LintSpec, find_lint};

use crate::Rule;
use crate::lifecycle::rule::LifecycleConsistencyRule;

pub struct RuleRegistration {
    pub lints: Vec<&'static LintSpec>,
    pub rule: Box<dyn Rule>,
}

pub fn full_registry() -> Vec<RuleRegistration> {
    vec![register(Box::new(LifecycleConsistencyRule))]
}

fn register(rule: Box<dyn Rule>) -> RuleRegistration {
    let lints = rule
        .supported_lints()
        .iter()
        .map(|rule_id| {
            let lint = find_lint(rule_id).unwrap_or_else(|| {
                panic!(
                    "runtime rule '{}' reports lint '{}' missing from canonical catalog",
                    rule.name(),
                    rule_id
                )
            });
            assert!(
                lint.lifecycle.is_active(),
                "runtime rule '{}' maps to non-active canonical lint '{}'",
                rule.name(),
                rule_id
            );
            lint
        })
        .collect();

    RuleRegistration { lints, rule }
}
