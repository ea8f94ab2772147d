#![forbid(unsafe_code)]

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const RULE_API_VERSION: ApiVersion = ApiVersion::new(0, 1);
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct ApiVersion {
    pub major: u16,
    pub minor: u16,
}

impl ApiVersion {
    pub const fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }

    pub const fn is_compatible_with_host(self, host: Self) -> bool {
        self.major == host.major && self.minor <= host.minor
    }
}

pub const fn host_accepts_plugin(host: ApiVersion, plugin: ApiVersion) -> bool {
    plugin.is_compatible_with_host(host)
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PluginDescriptor {
    pub plugin_id: String,
    pub display_name: String,
    pub plugin_version: String,
    pub api_version: ApiVersion,
    pub description: Option<String>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginSeverity {
    Warning,
    Error,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginConfidence {
    Low,
    Medium,
    High,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PluginFixSafety {
    Safe,
    NeedsReview,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PluginSpan {
    pub file: String,
    pub start: u32,
    pub end: u32,
    pub line: u32,
    pub col: u32,
}

impl PluginSpan {
    pub fn new(file: impl Into<String>, start: u32, end: u32, line: u32, col: u32) -> Self {
        Self {
            file: file.into(),
            start,
            end,
            line,
            col,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PluginTextEdit {
    pub span: PluginSpan,
    pub replacement: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PluginFix {
    pub description: String,
    pub edits: Vec<PluginTextEdit>,
    pub safety: PluginFixSafety,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PluginDiagnostic {
    pub rule_id: String,
    pub severity: PluginSeverity,
    pub confidence: PluginConfidence,
    pub policy: String,
    pub message: String,
    pub primary_span: PluginSpan,
    pub secondary_spans: Vec<PluginSpan>,
    pub notes: Vec<String>,
    pub properties: BTreeMap<String, String>,
    pub fixes: Vec<PluginFix>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PluginRuleMetadata {
    pub rule_id: String,
    pub summary: String,
    pub policy: String,
    pub default_severity: PluginSeverity,
    pub confidence: PluginConfidence,
    pub fixable: bool,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PluginSourceFile {
    pub path: String,
    pub text: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PluginInput {
    pub files: Vec<PluginSourceFile>,
    pub config: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PluginOutput {
    pub diagnostics: Vec<PluginDiagnostic>,
}

pub trait RulePlugin: Send + Sync {
    fn descriptor(&self) -> PluginDescriptor;
    fn rules(&self) -> Vec<PluginRuleMetadata>;
    fn analyze(&self, input: &PluginInput) -> PluginOutput;
}
