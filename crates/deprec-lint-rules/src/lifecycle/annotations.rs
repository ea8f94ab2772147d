use deprec_lint_core::config::DeprecationConfig;
use deprec_lint_core::host::HostQueries;
use deprec_lint_core::model::{AttributeNode, Declaration, Span};

pub const FIELD_MESSAGE: &str = "Message";
pub const FIELD_REPLACEMENT: &str = "ReplacementTypeOrMember";
pub const FIELD_ERROR_VERSION: &str = "TreatAsErrorFromVersion";
pub const FIELD_REMOVAL_VERSION: &str = "RemoveInVersion";

/// One supplied version field: its textual value (absent for a null
/// literal) and the named-argument span faults anchor at.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VersionField {
    pub raw: Option<String>,
    pub span: Span,
}

/// The lifecycle metadata annotation's named arguments, accumulated in one
/// pass. Absence of a field is distinct from an empty or null value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DeprecationMetadata {
    pub span: Span,
    pub message: Option<String>,
    pub replacement: Option<String>,
    pub error_version: Option<VersionField>,
    pub removal_version: Option<VersionField>,
}

impl DeprecationMetadata {
    pub fn from_attribute(attribute: &AttributeNode) -> Self {
        let mut metadata = Self {
            span: attribute.span.clone(),
            message: None,
            replacement: None,
            error_version: None,
            removal_version: None,
        };

        for argument in &attribute.named {
            match argument.name.as_str() {
                FIELD_MESSAGE => {
                    metadata.message = argument.value.as_str().map(str::to_string);
                }
                FIELD_REPLACEMENT => {
                    metadata.replacement = argument.value.as_str().map(str::to_string);
                }
                FIELD_ERROR_VERSION => {
                    metadata.error_version = Some(VersionField {
                        raw: argument.value.to_display_string(),
                        span: argument.span.clone(),
                    });
                }
                FIELD_REMOVAL_VERSION => {
                    metadata.removal_version = Some(VersionField {
                        raw: argument.value.to_display_string(),
                        span: argument.span.clone(),
                    });
                }
                _ => {}
            }
        }

        metadata
    }
}

/// The declaration's interesting annotations, resolved once. A candidate
/// whose declared type cannot be confirmed against the configured
/// fully-qualified name is treated as absent.
#[derive(Debug, Default)]
pub struct DeprecationAnnotations<'a> {
    pub metadata: Option<DeprecationMetadata>,
    pub marker: Option<&'a AttributeNode>,
    /// Recognized so the identity scan stays closed; the lifecycle policy
    /// itself never consults it.
    pub pre_deprecation: bool,
}

impl<'a> DeprecationAnnotations<'a> {
    pub fn collect(
        host: &dyn HostQueries,
        config: &DeprecationConfig,
        declaration: &'a Declaration,
    ) -> Self {
        let mut annotations = Self::default();

        for attribute in &declaration.attributes {
            if annotations.metadata.is_none()
                && attribute_matches(host, attribute, &config.metadata_attribute)
            {
                annotations.metadata = Some(DeprecationMetadata::from_attribute(attribute));
            } else if annotations.marker.is_none()
                && attribute_matches(host, attribute, &config.marker_attribute)
            {
                annotations.marker = Some(attribute);
            } else if attribute_matches(host, attribute, &config.pre_deprecation_attribute) {
                annotations.pre_deprecation = true;
            }
        }

        annotations
    }
}

/// Use-site short name with any `global::` qualifier and namespace path
/// stripped.
pub fn use_site_name(name: &str) -> &str {
    let name = name.strip_prefix("global::").unwrap_or(name);
    name.rsplit('.').next().unwrap_or(name)
}

fn attribute_matches(
    host: &dyn HostQueries,
    attribute: &AttributeNode,
    fully_qualified: &str,
) -> bool {
    let declared_short = fully_qualified.rsplit('.').next().unwrap_or(fully_qualified);
    let use_site = use_site_name(&attribute.name);
    // The host language allows the `Attribute` suffix to be elided at the
    // use site.
    let short_matches = use_site == declared_short
        || declared_short
            .strip_suffix("Attribute")
            .is_some_and(|elided| use_site == elided);
    if !short_matches {
        return false;
    }

    host.resolve_attribute_type(attribute)
        .is_some_and(|resolved| resolved == fully_qualified)
}
