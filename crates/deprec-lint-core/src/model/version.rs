use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Version triple used by the deprecation lifecycle policy. Ordering is the
/// standard lexicographic comparison over (major, minor, patch).
#[derive(
    Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl SemanticVersion {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parses `major`, `major.minor`, or `major.minor.patch`; missing
    /// components default to 0. A string without a separator must be a plain
    /// integer and becomes the major component. Empty, non-numeric, or
    /// malformed input yields `None`.
    pub fn parse(input: &str) -> Option<Self> {
        if input.is_empty() {
            return None;
        }
        if !input.contains('.') {
            return numeric_component(input).map(|major| Self::new(major, 0, 0));
        }

        let mut components = [0u64; 3];
        let mut count = 0usize;
        for part in input.split('.') {
            if count == components.len() {
                return None;
            }
            components[count] = numeric_component(part)?;
            count += 1;
        }
        Some(Self::new(components[0], components[1], components[2]))
    }
}

pub(crate) fn numeric_component(part: &str) -> Option<u64> {
    if part.is_empty() || !part.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    part.parse::<u64>().ok()
}

impl Display for SemanticVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
