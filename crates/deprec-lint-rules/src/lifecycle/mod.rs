pub mod annotations;
pub mod evaluate;
pub mod message;
pub mod rule;

pub use evaluate::{FaultKind, FaultRecord, evaluate};
pub use message::{ExpectedMarker, expected_marker};
pub use rule::LifecycleConsistencyRule;

/// Property-bag keys carried on diagnostics so the corrector does not have
/// to recompute derived expectations.
pub const PROP_EXPECTED_MESSAGE: &str = "expected_message";
pub const PROP_EXPECTED_IS_ERROR: &str = "expected_is_error";
pub const PROP_ACTUAL_ARGUMENT_COUNT: &str = "actual_argument_count";
pub const PROP_INVALID_VALUE: &str = "invalid_value";
pub const PROP_ERROR_VERSION: &str = "error_version";
pub const PROP_REMOVAL_VERSION: &str = "removal_version";
pub const PROP_ASSEMBLY_VERSION: &str = "assembly_version";
