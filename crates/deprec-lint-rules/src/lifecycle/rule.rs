use deprec_lint_core::diagnostics::Diagnostic;
use deprec_lint_core::lints::ids;
use deprec_lint_core::policy;

use crate::engine::context::RuleContext;
use crate::engine::Rule;

use super::evaluate::{FaultKind, FaultRecord, evaluate};
use super::{
    PROP_ACTUAL_ARGUMENT_COUNT, PROP_ASSEMBLY_VERSION, PROP_ERROR_VERSION, PROP_EXPECTED_MESSAGE,
    PROP_INVALID_VALUE, PROP_REMOVAL_VERSION,
};

/// The deprecation lifecycle policy as a single registered rule covering
/// the whole fault catalog.
pub struct LifecycleConsistencyRule;

const SUPPORTED: &[&str] = &[
    ids::MISSING_METADATA,
    ids::MISSING_ERROR_VERSION,
    ids::MISSING_REMOVAL_VERSION,
    ids::INVALID_ERROR_VERSION,
    ids::INVALID_REMOVAL_VERSION,
    ids::REMOVAL_BEFORE_OR_AT_ERROR_VERSION,
    ids::MUST_REMOVE,
    ids::MISSING_MARKER,
    ids::MARKER_MISSING_ARGUMENTS,
    ids::INCORRECT_MESSAGE,
    ids::INCORRECT_ERROR_FLAG,
];

impl Rule for LifecycleConsistencyRule {
    fn name(&self) -> &'static str {
        "lifecycle_consistency"
    }

    fn supported_lints(&self) -> &'static [&'static str] {
        SUPPORTED
    }

    fn run(&self, ctx: &RuleContext<'_>, out: &mut Vec<Diagnostic>) {
        for declaration in ctx.declarations() {
            for fault in evaluate(declaration, ctx.host(), ctx.deprecation()) {
                out.push(to_diagnostic(ctx, fault));
            }
        }
    }
}

fn to_diagnostic(ctx: &RuleContext<'_>, fault: FaultRecord) -> Diagnostic {
    let message = fault_message(&fault);
    let policy = match fault.kind {
        FaultKind::MarkerMissingArguments
        | FaultKind::IncorrectMessage
        | FaultKind::IncorrectErrorFlag => policy::CONSISTENCY,
        _ => policy::LIFECYCLE,
    };

    let mut diagnostic =
        ctx.diagnostic(fault.kind.lint_id(), policy, message, fault.anchor.clone());
    if let FaultKind::IncorrectMessage = fault.kind {
        if let Some(expected) = fault.property(PROP_EXPECTED_MESSAGE) {
            diagnostic = diagnostic.note(format!("expected message: {expected}"));
        }
    }
    diagnostic.properties = fault.properties;
    diagnostic
}

fn fault_message(fault: &FaultRecord) -> String {
    match fault.kind {
        FaultKind::MissingMetadata => {
            "deprecated declaration is missing its deprecation metadata annotation".to_string()
        }
        FaultKind::MissingErrorVersion => {
            "deprecation metadata does not supply TreatAsErrorFromVersion".to_string()
        }
        FaultKind::MissingRemovalVersion => {
            "deprecation metadata does not supply RemoveInVersion".to_string()
        }
        FaultKind::InvalidErrorVersion => format!(
            "TreatAsErrorFromVersion '{}' is not a valid version",
            fault.property(PROP_INVALID_VALUE).unwrap_or_default()
        ),
        FaultKind::InvalidRemovalVersion => format!(
            "RemoveInVersion '{}' is not a valid version",
            fault.property(PROP_INVALID_VALUE).unwrap_or_default()
        ),
        FaultKind::RemovalBeforeOrAtErrorVersion => format!(
            "RemoveInVersion {} must be later than TreatAsErrorFromVersion {}",
            fault.property(PROP_REMOVAL_VERSION).unwrap_or_default(),
            fault.property(PROP_ERROR_VERSION).unwrap_or_default()
        ),
        FaultKind::MustRemove => format!(
            "assembly version {} has reached RemoveInVersion {}; the declaration must be removed",
            fault.property(PROP_ASSEMBLY_VERSION).unwrap_or_default(),
            fault.property(PROP_REMOVAL_VERSION).unwrap_or_default()
        ),
        FaultKind::MissingMarker => {
            "declaration with deprecation metadata is missing the deprecation marker attribute"
                .to_string()
        }
        FaultKind::MarkerMissingArguments => format!(
            "deprecation marker must carry exactly 2 arguments, found {}",
            fault.property(PROP_ACTUAL_ARGUMENT_COUNT).unwrap_or_default()
        ),
        FaultKind::IncorrectMessage => {
            "deprecation marker message does not match the derived deprecation message".to_string()
        }
        FaultKind::IncorrectErrorFlag => {
            "deprecation marker error flag does not match the derived error flag".to_string()
        }
    }
}
