use crate::config::RuleLevel;
use crate::diagnostics::Confidence;
use crate::policy::{CONSISTENCY, LIFECYCLE};

pub mod types;

pub use types::{LintCategory, LintDocs, LintLifecycleState, LintSpec};

/// Stable identifiers for the fault kinds the lifecycle rule reports.
pub mod ids {
    pub const MISSING_METADATA: &str = "DEPREC001";
    pub const MISSING_ERROR_VERSION: &str = "DEPREC002";
    pub const MISSING_REMOVAL_VERSION: &str = "DEPREC003";
    pub const INVALID_ERROR_VERSION: &str = "DEPREC004";
    pub const INVALID_REMOVAL_VERSION: &str = "DEPREC005";
    pub const REMOVAL_BEFORE_OR_AT_ERROR_VERSION: &str = "DEPREC006";
    pub const MUST_REMOVE: &str = "DEPREC007";
    pub const MISSING_MARKER: &str = "DEPREC008";
    pub const MARKER_MISSING_ARGUMENTS: &str = "DEPREC009";
    pub const INCORRECT_MESSAGE: &str = "DEPREC010";
    pub const INCORRECT_ERROR_FLAG: &str = "DEPREC011";
}

// Every fault is deny by default: the lifecycle policy is a build-breaking
// contract, not a style suggestion.
const ALL_LINT_SPECS: &[LintSpec] = &[
    LintSpec {
        id: ids::MISSING_METADATA,
        policy: LIFECYCLE,
        category: LintCategory::Lifecycle,
        default_level: RuleLevel::Deny,
        confidence: Confidence::High,
        lifecycle: LintLifecycleState::Active,
        docs: LintDocs {
            summary: "Deprecation marker without lifecycle metadata.",
            details: "A declaration carries the native deprecation marker but not the structured metadata annotation that drives the lifecycle policy.",
        },
        fixable: false,
    },
    LintSpec {
        id: ids::MISSING_ERROR_VERSION,
        policy: LIFECYCLE,
        category: LintCategory::Lifecycle,
        default_level: RuleLevel::Deny,
        confidence: Confidence::High,
        lifecycle: LintLifecycleState::Active,
        docs: LintDocs {
            summary: "TreatAsErrorFromVersion not supplied.",
            details: "The deprecation metadata annotation must name the version from which usage becomes a compile error.",
        },
        fixable: false,
    },
    LintSpec {
        id: ids::MISSING_REMOVAL_VERSION,
        policy: LIFECYCLE,
        category: LintCategory::Lifecycle,
        default_level: RuleLevel::Deny,
        confidence: Confidence::High,
        lifecycle: LintLifecycleState::Active,
        docs: LintDocs {
            summary: "RemoveInVersion not supplied.",
            details: "The deprecation metadata annotation must name the version in which the declaration will be removed.",
        },
        fixable: false,
    },
    LintSpec {
        id: ids::INVALID_ERROR_VERSION,
        policy: LIFECYCLE,
        category: LintCategory::Lifecycle,
        default_level: RuleLevel::Deny,
        confidence: Confidence::High,
        lifecycle: LintLifecycleState::Active,
        docs: LintDocs {
            summary: "TreatAsErrorFromVersion does not parse.",
            details: "The supplied error-threshold version string is not a valid major[.minor[.patch]] version.",
        },
        fixable: false,
    },
    LintSpec {
        id: ids::INVALID_REMOVAL_VERSION,
        policy: LIFECYCLE,
        category: LintCategory::Lifecycle,
        default_level: RuleLevel::Deny,
        confidence: Confidence::High,
        lifecycle: LintLifecycleState::Active,
        docs: LintDocs {
            summary: "RemoveInVersion does not parse.",
            details: "The supplied removal version string is not a valid major[.minor[.patch]] version.",
        },
        fixable: false,
    },
    LintSpec {
        id: ids::REMOVAL_BEFORE_OR_AT_ERROR_VERSION,
        policy: LIFECYCLE,
        category: LintCategory::Lifecycle,
        default_level: RuleLevel::Deny,
        confidence: Confidence::High,
        lifecycle: LintLifecycleState::Active,
        docs: LintDocs {
            summary: "Removal version does not postdate the error version.",
            details: "RemoveInVersion must be strictly later than TreatAsErrorFromVersion so the error phase precedes removal.",
        },
        fixable: false,
    },
    LintSpec {
        id: ids::MUST_REMOVE,
        policy: LIFECYCLE,
        category: LintCategory::Lifecycle,
        default_level: RuleLevel::Deny,
        confidence: Confidence::High,
        lifecycle: LintLifecycleState::Active,
        docs: LintDocs {
            summary: "Declaration has reached its removal version.",
            details: "The compiling assembly's version is at or past RemoveInVersion; the declaration must be deleted.",
        },
        fixable: false,
    },
    LintSpec {
        id: ids::MISSING_MARKER,
        policy: LIFECYCLE,
        category: LintCategory::Lifecycle,
        default_level: RuleLevel::Deny,
        confidence: Confidence::High,
        lifecycle: LintLifecycleState::Active,
        docs: LintDocs {
            summary: "Lifecycle metadata without a deprecation marker.",
            details: "A declaration carries deprecation metadata but not the native marker that compilers act on.",
        },
        fixable: true,
    },
    LintSpec {
        id: ids::MARKER_MISSING_ARGUMENTS,
        policy: CONSISTENCY,
        category: LintCategory::Consistency,
        default_level: RuleLevel::Deny,
        confidence: Confidence::High,
        lifecycle: LintLifecycleState::Active,
        docs: LintDocs {
            summary: "Deprecation marker argument count is wrong.",
            details: "The native marker must carry exactly two arguments: the derived message and the error flag.",
        },
        fixable: true,
    },
    LintSpec {
        id: ids::INCORRECT_MESSAGE,
        policy: CONSISTENCY,
        category: LintCategory::Consistency,
        default_level: RuleLevel::Deny,
        confidence: Confidence::High,
        lifecycle: LintLifecycleState::Active,
        docs: LintDocs {
            summary: "Deprecation marker message is out of date.",
            details: "The marker's message literal differs from the message derived from the metadata and assembly version.",
        },
        fixable: true,
    },
    LintSpec {
        id: ids::INCORRECT_ERROR_FLAG,
        policy: CONSISTENCY,
        category: LintCategory::Consistency,
        default_level: RuleLevel::Deny,
        confidence: Confidence::High,
        lifecycle: LintLifecycleState::Active,
        docs: LintDocs {
            summary: "Deprecation marker error flag is out of date.",
            details: "The marker's error-flag literal differs from the flag derived from the assembly version and the error threshold.",
        },
        fixable: true,
    },
];

pub fn all_lints() -> &'static [LintSpec] {
    ALL_LINT_SPECS
}

pub fn find_lint(rule_id: &str) -> Option<&'static LintSpec> {
    let canonical = normalize_lint_id(rule_id);
    ALL_LINT_SPECS.iter().find(|lint| lint.id == canonical)
}

pub fn normalize_lint_id(rule_id: &str) -> String {
    rule_id.trim().to_ascii_uppercase()
}

pub fn fixable_lints() -> impl Iterator<Item = &'static LintSpec> {
    ALL_LINT_SPECS.iter().filter(|lint| lint.fixable)
}
