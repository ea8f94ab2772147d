pub mod fingerprint;
pub mod types;

pub use fingerprint::{
    diagnostic_fingerprint, message_hash, normalize_file_path, span_fingerprint,
};
pub use types::{
    Confidence, Diagnostic, Fix, FixSafety, Severity, StructuredMessage, TextEdit,
};

pub fn diagnostic_sort_key(diagnostic: &Diagnostic) -> (String, u32, u32, String, String) {
    (
        normalize_file_path(&diagnostic.primary_span.file),
        diagnostic.primary_span.start,
        diagnostic.primary_span.end,
        diagnostic.rule_id.clone(),
        message_hash(&diagnostic.message),
    )
}

pub fn sort_diagnostics(diagnostics: &mut [Diagnostic]) {
    diagnostics.sort_by_key(diagnostic_sort_key);
}
