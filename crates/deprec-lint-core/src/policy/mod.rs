pub const LIFECYCLE: &str = "lifecycle";
pub const CONSISTENCY: &str = "consistency";

pub fn is_supported_policy(policy: &str) -> bool {
    matches!(policy, LIFECYCLE | CONSISTENCY)
}
