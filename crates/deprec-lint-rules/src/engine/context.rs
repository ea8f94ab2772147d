use std::cmp::min;
use std::collections::BTreeMap;

use deprec_lint_core::config::DeprecationConfig;
use deprec_lint_core::diagnostics::{Confidence, Diagnostic, Severity, normalize_file_path};
use deprec_lint_core::host::HostQueries;
use deprec_lint_core::model::{Declaration, Span};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SourceFile {
    path: String,
    text: String,
    line_starts: Vec<usize>,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        let path = normalize_file_path(&path.into());
        let text = text.into();
        let mut line_starts = vec![0usize];
        for (idx, byte) in text.as_bytes().iter().enumerate() {
            if *byte == b'\n' {
                line_starts.push(idx + 1);
            }
        }
        Self {
            path,
            text,
            line_starts,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn span_for_range(&self, start: usize, end: usize) -> Span {
        let bounded_start = min(start, self.text.len());
        let bounded_end = min(end.max(bounded_start), self.text.len());
        let (line, col) = self.line_col_for_offset(bounded_start);
        Span::new(
            self.path.clone(),
            u32::try_from(bounded_start).unwrap_or(u32::MAX),
            u32::try_from(bounded_end).unwrap_or(u32::MAX),
            line,
            col,
        )
    }

    pub fn line_col_for_offset(&self, offset: usize) -> (u32, u32) {
        let bounded = min(offset, self.text.len());
        let index = match self.line_starts.binary_search(&bounded) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        };
        let line = u32::try_from(index + 1).unwrap_or(u32::MAX);
        let col =
            u32::try_from(bounded.saturating_sub(self.line_starts[index]) + 1).unwrap_or(u32::MAX);
        (line, col)
    }

    /// Byte offset where the given 1-based line begins.
    pub fn line_start_offset(&self, line: u32) -> usize {
        if line == 0 {
            return 0;
        }
        let index = min(line as usize - 1, self.line_starts.len() - 1);
        self.line_starts[index]
    }
}

pub struct RuleContext<'a> {
    host: &'a dyn HostQueries,
    deprecation: DeprecationConfig,
    files: Vec<SourceFile>,
    declarations: Vec<Declaration>,
}

impl<'a> RuleContext<'a> {
    pub fn new(
        host: &'a dyn HostQueries,
        deprecation: DeprecationConfig,
        files: Vec<(String, String)>,
        declarations: Vec<Declaration>,
    ) -> Self {
        let mut files = files
            .into_iter()
            .map(|(path, source)| SourceFile::new(path, source))
            .collect::<Vec<_>>();
        files.sort_by_key(|file| file.path.clone());
        files.dedup_by(|left, right| left.path == right.path);
        Self {
            host,
            deprecation,
            files,
            declarations,
        }
    }

    pub fn host(&self) -> &dyn HostQueries {
        self.host
    }

    pub fn deprecation(&self) -> &DeprecationConfig {
        &self.deprecation
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    pub fn file(&self, path: &str) -> Option<&SourceFile> {
        let normalized = normalize_file_path(path);
        self.files.iter().find(|file| file.path == normalized)
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// Severity, confidence and policy are provisional here; the engine
    /// stamps the canonical values from the lint catalog.
    pub fn diagnostic(
        &self,
        rule_id: &str,
        policy: &'static str,
        message: impl Into<String>,
        primary_span: Span,
    ) -> Diagnostic {
        Diagnostic {
            rule_id: normalize_rule_id(rule_id),
            severity: Severity::Warning,
            confidence: Confidence::Low,
            policy: policy.to_string(),
            message: message.into(),
            primary_span,
            secondary_spans: Vec::new(),
            notes: Vec::new(),
            properties: BTreeMap::new(),
            fixes: Vec::new(),
        }
    }
}

fn normalize_rule_id(rule_id: &str) -> String {
    rule_id.trim().to_ascii_uppercase()
}
