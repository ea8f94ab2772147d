use crate::config::RuleLevel;
use crate::diagnostics::Confidence;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LintCategory {
    Lifecycle,
    Consistency,
}

impl LintCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lifecycle => "lifecycle",
            Self::Consistency => "consistency",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LintLifecycleState {
    Active,
    Deprecated {
        since: &'static str,
        replacement: Option<&'static str>,
        note: &'static str,
    },
}

impl LintLifecycleState {
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LintDocs {
    pub summary: &'static str,
    pub details: &'static str,
}

impl LintDocs {
    pub const fn has_required_fields(self) -> bool {
        !self.summary.is_empty() && !self.details.is_empty()
    }
}

/// Canonical metadata for one fault kind in the catalog.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LintSpec {
    pub id: &'static str,
    pub policy: &'static str,
    pub category: LintCategory,
    pub default_level: RuleLevel,
    pub confidence: Confidence,
    pub lifecycle: LintLifecycleState,
    pub docs: LintDocs,
    /// Whether a mechanical correction is registered for this fault kind.
    pub fixable: bool,
}
