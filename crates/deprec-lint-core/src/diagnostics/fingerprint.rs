use crate::diagnostics::types::Diagnostic;
use crate::model::Span;

const FINGERPRINT_VERSION: &str = "v1";

pub fn normalize_file_path(file: &str) -> String {
    file.replace('\\', "/").trim_start_matches("./").to_string()
}

pub fn message_hash(message: &str) -> String {
    blake3::hash(message.as_bytes()).to_hex().to_string()
}

/// Stable identity for one reported fault, used by hosts to correlate a
/// diagnostic with the fix the user picked for it.
pub fn span_fingerprint(span: &Span, rule_id: &str) -> String {
    let normalized = normalize_file_path(&span.file);
    let payload = format!(
        "{FINGERPRINT_VERSION}|{normalized}|{}|{}|{}|{}|{rule_id}",
        span.start, span.end, span.line, span.col
    );
    blake3::hash(payload.as_bytes()).to_hex().to_string()
}

pub fn diagnostic_fingerprint(diagnostic: &Diagnostic) -> String {
    span_fingerprint(&diagnostic.primary_span, &diagnostic.rule_id)
}

#[cfg(test)]
mod tests {
    use super::{normalize_file_path, span_fingerprint};
    use crate::model::Span;

    #[test]
    fn normalizes_file_paths() {
        assert_eq!(
            normalize_file_path("./src\\LegacyGateway.cs"),
            "src/LegacyGateway.cs"
        );
        assert_eq!(
            normalize_file_path("src/LegacyGateway.cs"),
            "src/LegacyGateway.cs"
        );
    }

    #[test]
    fn span_fingerprint_is_deterministic() {
        let span = Span::new("src/LegacyGateway.cs", 10, 12, 4, 3);
        assert_eq!(
            span_fingerprint(&span, "DEPREC007"),
            span_fingerprint(&span, "DEPREC007")
        );
    }

    #[test]
    fn span_fingerprint_distinguishes_rule_ids_and_locations() {
        let span = Span::new("src/LegacyGateway.cs", 10, 12, 4, 3);
        let moved = Span::new("src/LegacyGateway.cs", 11, 12, 4, 4);

        assert_ne!(
            span_fingerprint(&span, "DEPREC007"),
            span_fingerprint(&span, "DEPREC008")
        );
        assert_ne!(
            span_fingerprint(&span, "DEPREC007"),
            span_fingerprint(&moved, "DEPREC007")
        );
    }

    #[test]
    fn path_separators_do_not_change_the_fingerprint() {
        let forward = Span::new("src/LegacyGateway.cs", 10, 12, 4, 3);
        let backslash = Span::new(".\\src\\LegacyGateway.cs", 10, 12, 4, 3);
        assert_eq!(
            span_fingerprint(&forward, "DEPREC007"),
            span_fingerprint(&backslash, "DEPREC007")
        );
    }
}
