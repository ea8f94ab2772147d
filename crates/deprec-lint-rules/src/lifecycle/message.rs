use deprec_lint_core::model::SemanticVersion;

/// The marker arguments the lifecycle policy expects on a declaration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExpectedMarker {
    pub message: String,
    pub is_error: bool,
}

/// Derives the canonical marker message and error flag. The engine and the
/// corrector both call this so their strings are byte-identical; exact
/// spacing matters for the equality comparison downstream.
pub fn expected_marker(
    message: Option<&str>,
    replacement: Option<&str>,
    assembly: SemanticVersion,
    error_version: SemanticVersion,
    removal_version: SemanticVersion,
) -> ExpectedMarker {
    let mut text = String::new();
    if let Some(message) = message {
        text.push_str(message);
        text.push_str(". ");
    }
    if let Some(replacement) = replacement {
        text.push_str(&format!("Use '{replacement}' instead. "));
    }
    if assembly < error_version {
        text.push_str(&format!(
            "Will be treated as an error from version {error_version}. "
        ));
    }
    text.push_str(&format!("Will be removed in version {removal_version}."));

    ExpectedMarker {
        message: text,
        is_error: assembly >= error_version,
    }
}
