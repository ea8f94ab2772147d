use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::Span;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixSafety {
    Safe,
    NeedsReview,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TextEdit {
    pub span: Span,
    pub replacement: String,
}

/// A mechanical correction: one description covering one or more edits that
/// are applied together or not at all.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Fix {
    pub description: String,
    pub edits: Vec<TextEdit>,
    pub safety: FixSafety,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StructuredMessage {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub rule_id: String,
    pub severity: Severity,
    pub confidence: Confidence,
    pub policy: String,
    pub message: String,
    pub primary_span: Span,
    pub secondary_spans: Vec<Span>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<StructuredMessage>,
    /// Key/value context carried forward to the fix stage so the corrector
    /// does not have to recompute derived expectations.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fixes: Vec<Fix>,
}

impl Diagnostic {
    pub fn note(mut self, message: impl Into<String>) -> Self {
        self.notes.push(StructuredMessage {
            message: message.into(),
            span: None,
        });
        self
    }

    pub fn span_note(mut self, span: Span, message: impl Into<String>) -> Self {
        self.notes.push(StructuredMessage {
            message: message.into(),
            span: Some(span),
        });
        self
    }

    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn property_value(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }
}
