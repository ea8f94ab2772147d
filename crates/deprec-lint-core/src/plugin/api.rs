use std::error::Error;
use std::fmt::{Display, Formatter};

pub use deprec_lint_sdk::{
    ApiVersion, PluginConfidence, PluginDescriptor, PluginDiagnostic, PluginFix, PluginFixSafety,
    PluginInput, PluginOutput, PluginRuleMetadata, PluginSeverity, PluginSourceFile, PluginSpan,
    PluginTextEdit, RULE_API_VERSION, RulePlugin, host_accepts_plugin,
};

use crate::diagnostics::{
    Confidence, Diagnostic, Fix, FixSafety, Severity, StructuredMessage, TextEdit,
};
use crate::model::Span;

pub const HOST_RULE_API_VERSION: ApiVersion = RULE_API_VERSION;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum PluginApiError {
    EmptyPluginId,
    InvalidPluginId {
        plugin_id: String,
    },
    DuplicatePluginId {
        plugin_id: String,
    },
    IncompatibleApiVersion {
        plugin_id: String,
        plugin_api: ApiVersion,
        host_api: ApiVersion,
    },
}

impl Display for PluginApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPluginId => write!(f, "plugin id must not be empty"),
            Self::InvalidPluginId { plugin_id } => write!(
                f,
                "plugin id '{plugin_id}' is invalid (use lowercase ascii letters, digits, '.', '_' or '-', without surrounding whitespace)"
            ),
            Self::DuplicatePluginId { plugin_id } => {
                write!(f, "plugin id '{plugin_id}' is already registered")
            }
            Self::IncompatibleApiVersion {
                plugin_id,
                plugin_api,
                host_api,
            } => write!(
                f,
                "plugin '{plugin_id}' targets API {}.{} but host supports {}.{}",
                plugin_api.major, plugin_api.minor, host_api.major, host_api.minor
            ),
        }
    }
}

impl Error for PluginApiError {}

#[derive(Default)]
pub struct PluginRegistry {
    descriptors: Vec<PluginDescriptor>,
    plugins: Vec<Box<dyn RulePlugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, plugin: Box<dyn RulePlugin>) -> Result<(), PluginApiError> {
        let descriptor = plugin.descriptor();
        validate_descriptor(&descriptor)?;
        if self
            .descriptors
            .iter()
            .any(|existing| existing.plugin_id == descriptor.plugin_id)
        {
            return Err(PluginApiError::DuplicatePluginId {
                plugin_id: descriptor.plugin_id,
            });
        }
        self.descriptors.push(descriptor);
        self.plugins.push(plugin);
        Ok(())
    }

    pub fn descriptors(&self) -> &[PluginDescriptor] {
        &self.descriptors
    }

    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    /// Runs every registered plugin over the input and folds their
    /// diagnostics back into host diagnostics.
    pub fn analyze(&self, input: &PluginInput) -> Vec<Diagnostic> {
        self.plugins
            .iter()
            .flat_map(|plugin| plugin.analyze(input).diagnostics)
            .map(diagnostic_from_plugin)
            .collect()
    }
}

pub fn validate_descriptor(descriptor: &PluginDescriptor) -> Result<(), PluginApiError> {
    let plugin_id = descriptor.plugin_id.as_str();
    let trimmed = plugin_id.trim();
    if plugin_id.is_empty() {
        return Err(PluginApiError::EmptyPluginId);
    }
    if trimmed != plugin_id || !is_valid_plugin_id(trimmed) {
        return Err(PluginApiError::InvalidPluginId {
            plugin_id: plugin_id.to_string(),
        });
    }
    if !host_accepts_plugin(HOST_RULE_API_VERSION, descriptor.api_version) {
        return Err(PluginApiError::IncompatibleApiVersion {
            plugin_id: trimmed.to_string(),
            plugin_api: descriptor.api_version,
            host_api: HOST_RULE_API_VERSION,
        });
    }
    Ok(())
}

pub fn host_accepts_api_version(plugin_api: ApiVersion) -> bool {
    host_accepts_plugin(HOST_RULE_API_VERSION, plugin_api)
}

fn is_valid_plugin_id(plugin_id: &str) -> bool {
    !plugin_id.is_empty()
        && plugin_id.chars().all(|ch| {
            ch.is_ascii_lowercase() || ch.is_ascii_digit() || matches!(ch, '.' | '_' | '-')
        })
}

pub fn span_to_plugin(span: &Span) -> PluginSpan {
    PluginSpan {
        file: span.file.clone(),
        start: span.start,
        end: span.end,
        line: span.line,
        col: span.col,
    }
}

pub fn span_from_plugin(span: &PluginSpan) -> Span {
    Span {
        file: span.file.clone(),
        start: span.start,
        end: span.end,
        line: span.line,
        col: span.col,
    }
}

pub fn diagnostic_to_plugin(diagnostic: &Diagnostic) -> PluginDiagnostic {
    PluginDiagnostic {
        rule_id: diagnostic.rule_id.clone(),
        severity: match diagnostic.severity {
            Severity::Warning => PluginSeverity::Warning,
            Severity::Error => PluginSeverity::Error,
        },
        confidence: match diagnostic.confidence {
            Confidence::Low => PluginConfidence::Low,
            Confidence::Medium => PluginConfidence::Medium,
            Confidence::High => PluginConfidence::High,
        },
        policy: diagnostic.policy.clone(),
        message: diagnostic.message.clone(),
        primary_span: span_to_plugin(&diagnostic.primary_span),
        secondary_spans: diagnostic.secondary_spans.iter().map(span_to_plugin).collect(),
        // Plugin notes are plain strings; note anchor spans stay host-side.
        notes: diagnostic
            .notes
            .iter()
            .map(|note| note.message.clone())
            .collect(),
        properties: diagnostic.properties.clone(),
        fixes: diagnostic
            .fixes
            .iter()
            .map(|fix| PluginFix {
                description: fix.description.clone(),
                edits: fix
                    .edits
                    .iter()
                    .map(|edit| PluginTextEdit {
                        span: span_to_plugin(&edit.span),
                        replacement: edit.replacement.clone(),
                    })
                    .collect(),
                safety: match fix.safety {
                    FixSafety::Safe => PluginFixSafety::Safe,
                    FixSafety::NeedsReview => PluginFixSafety::NeedsReview,
                },
            })
            .collect(),
    }
}

pub fn diagnostic_from_plugin(diagnostic: PluginDiagnostic) -> Diagnostic {
    Diagnostic {
        rule_id: diagnostic.rule_id,
        severity: match diagnostic.severity {
            PluginSeverity::Warning => Severity::Warning,
            PluginSeverity::Error => Severity::Error,
        },
        confidence: match diagnostic.confidence {
            PluginConfidence::Low => Confidence::Low,
            PluginConfidence::Medium => Confidence::Medium,
            PluginConfidence::High => Confidence::High,
        },
        policy: diagnostic.policy,
        message: diagnostic.message,
        primary_span: span_from_plugin(&diagnostic.primary_span),
        secondary_spans: diagnostic
            .secondary_spans
            .iter()
            .map(span_from_plugin)
            .collect(),
        notes: diagnostic
            .notes
            .into_iter()
            .map(|message| StructuredMessage {
                message,
                span: None,
            })
            .collect(),
        properties: diagnostic.properties,
        fixes: diagnostic
            .fixes
            .into_iter()
            .map(|fix| Fix {
                description: fix.description,
                edits: fix
                    .edits
                    .into_iter()
                    .map(|edit| TextEdit {
                        span: span_from_plugin(&edit.span),
                        replacement: edit.replacement,
                    })
                    .collect(),
                safety: match fix.safety {
                    PluginFixSafety::Safe => FixSafety::Safe,
                    PluginFixSafety::NeedsReview => FixSafety::NeedsReview,
                },
            })
            .collect(),
    }
}
