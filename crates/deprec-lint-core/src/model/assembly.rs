use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::SemanticVersion;
use crate::model::version::numeric_component;

/// Assembly metadata key/value pair marking a project whose release version
/// is calculated at release time. Development builds of such projects carry
/// a placeholder 1.x version that must not drive removal checks.
pub const RELEASE_TIME_VERSIONING_KEY: &str = "Versioning";
pub const RELEASE_TIME_VERSIONING_VALUE: &str = "CalculatedAtRelease";

/// Identity of the compiling assembly as reported by the host.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct AssemblyIdentity {
    pub name: String,
    /// Raw version string, e.g. "2.1.0.4". Host versions may carry a fourth
    /// revision component; the lifecycle policy only considers the first
    /// three.
    pub version: String,
    /// Custom assembly-level metadata attributes.
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl AssemblyIdentity {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// The version lifecycle checks compare against, or `None` when the raw
    /// version is unparsable or the assembly opts into release-time version
    /// calculation while still at a 1.x placeholder version.
    pub fn effective_version(&self) -> Option<SemanticVersion> {
        let version = parse_host_version(&self.version)?;
        if version.major == 1 && self.uses_release_time_versioning() {
            return None;
        }
        Some(version)
    }

    pub fn uses_release_time_versioning(&self) -> bool {
        self.metadata
            .get(RELEASE_TIME_VERSIONING_KEY)
            .map(String::as_str)
            == Some(RELEASE_TIME_VERSIONING_VALUE)
    }
}

fn parse_host_version(raw: &str) -> Option<SemanticVersion> {
    if raw.is_empty() {
        return None;
    }
    let mut components = [0u64; 3];
    for (index, part) in raw.split('.').enumerate() {
        if index >= 4 {
            return None;
        }
        let value = numeric_component(part)?;
        if index < components.len() {
            components[index] = value;
        }
    }
    Some(SemanticVersion::new(
        components[0],
        components[1],
        components[2],
    ))
}
