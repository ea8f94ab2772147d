use std::collections::BTreeMap;

use deprec_lint_core::config::DeprecationConfig;
use deprec_lint_core::host::HostQueries;
use deprec_lint_core::lints::ids;
use deprec_lint_core::model::{Declaration, SemanticVersion, Span};

use super::annotations::{DeprecationAnnotations, VersionField};
use super::message::expected_marker;
use super::{
    PROP_ACTUAL_ARGUMENT_COUNT, PROP_ASSEMBLY_VERSION, PROP_ERROR_VERSION, PROP_EXPECTED_IS_ERROR,
    PROP_EXPECTED_MESSAGE, PROP_INVALID_VALUE, PROP_REMOVAL_VERSION,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FaultKind {
    MissingMetadata,
    MissingErrorVersion,
    MissingRemovalVersion,
    InvalidErrorVersion,
    InvalidRemovalVersion,
    RemovalBeforeOrAtErrorVersion,
    MustRemove,
    MissingMarker,
    MarkerMissingArguments,
    IncorrectMessage,
    IncorrectErrorFlag,
}

impl FaultKind {
    pub const fn lint_id(self) -> &'static str {
        match self {
            Self::MissingMetadata => ids::MISSING_METADATA,
            Self::MissingErrorVersion => ids::MISSING_ERROR_VERSION,
            Self::MissingRemovalVersion => ids::MISSING_REMOVAL_VERSION,
            Self::InvalidErrorVersion => ids::INVALID_ERROR_VERSION,
            Self::InvalidRemovalVersion => ids::INVALID_REMOVAL_VERSION,
            Self::RemovalBeforeOrAtErrorVersion => ids::REMOVAL_BEFORE_OR_AT_ERROR_VERSION,
            Self::MustRemove => ids::MUST_REMOVE,
            Self::MissingMarker => ids::MISSING_MARKER,
            Self::MarkerMissingArguments => ids::MARKER_MISSING_ARGUMENTS,
            Self::IncorrectMessage => ids::INCORRECT_MESSAGE,
            Self::IncorrectErrorFlag => ids::INCORRECT_ERROR_FLAG,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FaultRecord {
    pub kind: FaultKind,
    pub anchor: Span,
    pub properties: BTreeMap<String, String>,
}

impl FaultRecord {
    pub fn new(kind: FaultKind, anchor: Span) -> Self {
        Self {
            kind,
            anchor,
            properties: BTreeMap::new(),
        }
    }

    pub fn with_property(mut self, key: &str, value: impl Into<String>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }
}

/// Evaluates the deprecation lifecycle policy for one declaration.
///
/// Pure over its inputs; unevaluable conditions (unresolvable annotations,
/// an assembly version unknown before release) short-circuit with no
/// faults. The decision sequence is priority-ordered: the first structural
/// fault family to fire ends evaluation for the declaration.
pub fn evaluate(
    declaration: &Declaration,
    host: &dyn HostQueries,
    config: &DeprecationConfig,
) -> Vec<FaultRecord> {
    if declaration.attributes.is_empty() {
        return Vec::new();
    }

    let annotations = DeprecationAnnotations::collect(host, config, declaration);

    let Some(metadata) = annotations.metadata else {
        let Some(marker) = annotations.marker else {
            return Vec::new();
        };
        return vec![FaultRecord::new(
            FaultKind::MissingMetadata,
            marker.span.clone(),
        )];
    };

    let mut faults = Vec::new();
    if metadata.error_version.is_none() {
        faults.push(FaultRecord::new(
            FaultKind::MissingErrorVersion,
            metadata.span.clone(),
        ));
    }
    if metadata.removal_version.is_none() {
        faults.push(FaultRecord::new(
            FaultKind::MissingRemovalVersion,
            metadata.span.clone(),
        ));
    }
    if !faults.is_empty() {
        return faults;
    }

    let (Some(error_field), Some(removal_field)) = (
        metadata.error_version.as_ref(),
        metadata.removal_version.as_ref(),
    ) else {
        return faults;
    };

    let error_version = parse_field(error_field);
    let removal_version = parse_field(removal_field);
    if error_version.is_none() {
        faults.push(invalid_version_fault(FaultKind::InvalidErrorVersion, error_field));
    }
    if removal_version.is_none() {
        faults.push(invalid_version_fault(
            FaultKind::InvalidRemovalVersion,
            removal_field,
        ));
    }
    let (Some(error_version), Some(removal_version)) = (error_version, removal_version) else {
        return faults;
    };

    // Removal must strictly postdate the error threshold.
    if removal_version <= error_version {
        return vec![
            FaultRecord::new(
                FaultKind::RemovalBeforeOrAtErrorVersion,
                metadata.span.clone(),
            )
            .with_property(PROP_ERROR_VERSION, error_version.to_string())
            .with_property(PROP_REMOVAL_VERSION, removal_version.to_string()),
        ];
    }

    let Some(assembly_version) = host.assembly_identity().effective_version() else {
        return Vec::new();
    };

    if assembly_version >= removal_version {
        return vec![
            FaultRecord::new(FaultKind::MustRemove, declaration.span.clone())
                .with_property(PROP_ASSEMBLY_VERSION, assembly_version.to_string())
                .with_property(PROP_REMOVAL_VERSION, removal_version.to_string()),
        ];
    }

    let expected = expected_marker(
        metadata.message.as_deref(),
        metadata.replacement.as_deref(),
        assembly_version,
        error_version,
        removal_version,
    );
    let expectation_props = |fault: FaultRecord| {
        fault
            .with_property(PROP_EXPECTED_MESSAGE, expected.message.clone())
            .with_property(PROP_EXPECTED_IS_ERROR, expected.is_error.to_string())
    };

    let Some(marker) = annotations.marker else {
        return vec![expectation_props(FaultRecord::new(
            FaultKind::MissingMarker,
            metadata.span.clone(),
        ))];
    };

    if marker.positional.len() != 2 {
        return vec![
            expectation_props(FaultRecord::new(
                FaultKind::MarkerMissingArguments,
                marker.span.clone(),
            ))
            .with_property(PROP_ACTUAL_ARGUMENT_COUNT, marker.positional.len().to_string()),
        ];
    }

    // The final two checks are independent; both may fire.
    let mut faults = Vec::new();
    if marker.positional[0].value.as_str() != Some(expected.message.as_str()) {
        faults.push(expectation_props(FaultRecord::new(
            FaultKind::IncorrectMessage,
            marker.positional[0].span.clone(),
        )));
    }
    if marker.positional[1].value.as_bool() != Some(expected.is_error) {
        faults.push(expectation_props(FaultRecord::new(
            FaultKind::IncorrectErrorFlag,
            marker.positional[1].span.clone(),
        )));
    }
    faults
}

fn parse_field(field: &VersionField) -> Option<SemanticVersion> {
    field.raw.as_deref().and_then(SemanticVersion::parse)
}

fn invalid_version_fault(kind: FaultKind, field: &VersionField) -> FaultRecord {
    FaultRecord::new(kind, field.span.clone())
        .with_property(PROP_INVALID_VALUE, field.raw.clone().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use deprec_lint_core::config::DeprecationConfig;
    use deprec_lint_core::model::{LiteralValue, NamedAttributeArgument};

    use crate::lifecycle::annotations::{FIELD_ERROR_VERSION, FIELD_REMOVAL_VERSION};
    use crate::lifecycle::{
        PROP_ACTUAL_ARGUMENT_COUNT, PROP_EXPECTED_IS_ERROR, PROP_EXPECTED_MESSAGE,
        PROP_INVALID_VALUE,
    };
    use crate::testutil::{
        FakeHost, attribute, declaration, marker_attribute, metadata_attribute, named_str,
        positional, test_span,
    };

    use super::{FaultKind, evaluate};

    fn versions(error: &str, removal: &str) -> Vec<NamedAttributeArgument> {
        vec![
            named_str(FIELD_ERROR_VERSION, error, 30, 60),
            named_str(FIELD_REMOVAL_VERSION, removal, 62, 88),
        ]
    }

    #[test]
    fn declaration_without_annotations_is_never_evaluated() {
        let host = FakeHost::with_assembly_version("1.0.0.0");
        let decl = declaration(Vec::new());
        assert!(evaluate(&decl, &host, &DeprecationConfig::default()).is_empty());
    }

    #[test]
    fn marker_without_metadata_reports_missing_metadata_at_the_marker() {
        let host = FakeHost::with_assembly_version("1.0.0.0");
        let decl = declaration(vec![marker_attribute(vec![
            positional(LiteralValue::Str("old".to_string()), 110, 115),
            positional(LiteralValue::Bool(false), 117, 122),
        ])]);

        let faults = evaluate(&decl, &host, &DeprecationConfig::default());
        assert_eq!(faults.len(), 1);
        assert_eq!(faults[0].kind, FaultKind::MissingMetadata);
        assert_eq!(faults[0].anchor.start, 100);
    }

    #[test]
    fn pre_deprecation_annotation_does_not_suppress_missing_metadata() {
        let host = FakeHost::with_assembly_version("1.0.0.0");
        let decl = declaration(vec![
            attribute("PreDeprecation", test_span(0, 8)),
            marker_attribute(vec![
                positional(LiteralValue::Str("old".to_string()), 110, 115),
                positional(LiteralValue::Bool(false), 117, 122),
            ]),
        ]);

        let faults = evaluate(&decl, &host, &DeprecationConfig::default());
        assert_eq!(faults.len(), 1);
        assert_eq!(faults[0].kind, FaultKind::MissingMetadata);
    }

    #[test]
    fn missing_version_fields_both_fire_then_stop() {
        let host = FakeHost::with_assembly_version("1.0.0.0");
        let decl = declaration(vec![metadata_attribute(Vec::new())]);

        let faults = evaluate(&decl, &host, &DeprecationConfig::default());
        let kinds = faults.iter().map(|fault| fault.kind).collect::<Vec<_>>();
        assert_eq!(
            kinds,
            vec![FaultKind::MissingErrorVersion, FaultKind::MissingRemovalVersion]
        );
        // Anchored at the metadata annotation.
        assert!(faults.iter().all(|fault| fault.anchor.start == 10));
    }

    #[test]
    fn invalid_version_fields_anchor_at_the_named_argument() {
        let host = FakeHost::with_assembly_version("1.0.0.0");
        let decl = declaration(vec![metadata_attribute(versions("2.x", "3"))]);

        let faults = evaluate(&decl, &host, &DeprecationConfig::default());
        assert_eq!(faults.len(), 1);
        assert_eq!(faults[0].kind, FaultKind::InvalidErrorVersion);
        assert_eq!(faults[0].anchor.start, 30);
        assert_eq!(faults[0].property(PROP_INVALID_VALUE), Some("2.x"));
    }

    #[test]
    fn both_invalid_versions_fire_together() {
        let host = FakeHost::with_assembly_version("1.0.0.0");
        let decl = declaration(vec![metadata_attribute(versions("x", "3.0.0.1"))]);

        let faults = evaluate(&decl, &host, &DeprecationConfig::default());
        let kinds = faults.iter().map(|fault| fault.kind).collect::<Vec<_>>();
        assert_eq!(
            kinds,
            vec![FaultKind::InvalidErrorVersion, FaultKind::InvalidRemovalVersion]
        );
    }

    #[test]
    fn removal_at_or_before_error_version_is_a_single_fault() {
        let host = FakeHost::with_assembly_version("1.0.0.0");
        for (error, removal) in [("3", "2"), ("3", "3")] {
            let decl = declaration(vec![metadata_attribute(versions(error, removal))]);
            let faults = evaluate(&decl, &host, &DeprecationConfig::default());
            assert_eq!(faults.len(), 1, "error={error} removal={removal}");
            assert_eq!(faults[0].kind, FaultKind::RemovalBeforeOrAtErrorVersion);
        }
    }

    #[test]
    fn ordered_versions_never_trigger_the_ordering_fault() {
        let host = FakeHost::with_assembly_version("1.0.0.0");
        for (error, removal) in [("2", "3"), ("2.1", "2.2"), ("2.1.3", "2.1.4")] {
            let decl = declaration(vec![metadata_attribute(versions(error, removal))]);
            let faults = evaluate(&decl, &host, &DeprecationConfig::default());
            assert!(
                faults
                    .iter()
                    .all(|fault| fault.kind != FaultKind::RemovalBeforeOrAtErrorVersion),
                "error={error} removal={removal}"
            );
        }
    }

    #[test]
    fn auto_versioned_placeholder_assembly_short_circuits_silently() {
        let host = FakeHost::new(
            deprec_lint_core::model::AssemblyIdentity::new("Acme.Legacy", "1.0.0.0")
                .with_metadata("Versioning", "CalculatedAtRelease"),
        );
        let decl = declaration(vec![metadata_attribute(versions("2", "3"))]);

        assert!(evaluate(&decl, &host, &DeprecationConfig::default()).is_empty());
    }

    #[test]
    fn assembly_at_removal_version_reports_must_remove_at_the_declaration() {
        let host = FakeHost::with_assembly_version("3.0.0.0");
        let decl = declaration(vec![metadata_attribute(versions("2", "3"))]);

        let faults = evaluate(&decl, &host, &DeprecationConfig::default());
        assert_eq!(faults.len(), 1);
        assert_eq!(faults[0].kind, FaultKind::MustRemove);
        assert_eq!((faults[0].anchor.start, faults[0].anchor.end), (0, 200));
        assert_eq!(faults[0].property(PROP_EXPECTED_MESSAGE), None);
    }

    #[test]
    fn missing_marker_carries_the_derived_expectation() {
        let host = FakeHost::with_assembly_version("1.0.0.0");
        let decl = declaration(vec![metadata_attribute(versions("2", "3"))]);

        let faults = evaluate(&decl, &host, &DeprecationConfig::default());
        assert_eq!(faults.len(), 1);
        assert_eq!(faults[0].kind, FaultKind::MissingMarker);
        assert_eq!(
            faults[0].property(PROP_EXPECTED_MESSAGE),
            Some(
                "Will be treated as an error from version 2.0.0. Will be removed in version 3.0.0."
            )
        );
        assert_eq!(faults[0].property(PROP_EXPECTED_IS_ERROR), Some("false"));
    }

    #[test]
    fn assembly_past_error_version_flips_the_expected_flag() {
        let host = FakeHost::with_assembly_version("2.0.0.0");
        let decl = declaration(vec![metadata_attribute(versions("2", "3"))]);

        let faults = evaluate(&decl, &host, &DeprecationConfig::default());
        assert_eq!(faults.len(), 1);
        assert_eq!(faults[0].kind, FaultKind::MissingMarker);
        assert_eq!(
            faults[0].property(PROP_EXPECTED_MESSAGE),
            Some("Will be removed in version 3.0.0.")
        );
        assert_eq!(faults[0].property(PROP_EXPECTED_IS_ERROR), Some("true"));
    }

    #[test]
    fn marker_with_wrong_argument_count_reports_the_count() {
        let host = FakeHost::with_assembly_version("1.0.0.0");
        let decl = declaration(vec![
            metadata_attribute(versions("2", "3")),
            marker_attribute(Vec::new()),
        ]);

        let faults = evaluate(&decl, &host, &DeprecationConfig::default());
        assert_eq!(faults.len(), 1);
        assert_eq!(faults[0].kind, FaultKind::MarkerMissingArguments);
        assert_eq!(faults[0].property(PROP_ACTUAL_ARGUMENT_COUNT), Some("0"));
        assert!(faults[0].property(PROP_EXPECTED_MESSAGE).is_some());
    }

    #[test]
    fn stale_message_with_matching_flag_is_exactly_one_fault() {
        let host = FakeHost::with_assembly_version("1.0.0.0");
        let decl = declaration(vec![
            metadata_attribute(versions("2", "3")),
            marker_attribute(vec![
                positional(LiteralValue::Str(String::new()), 110, 115),
                positional(LiteralValue::Bool(false), 117, 122),
            ]),
        ]);

        let faults = evaluate(&decl, &host, &DeprecationConfig::default());
        assert_eq!(faults.len(), 1);
        assert_eq!(faults[0].kind, FaultKind::IncorrectMessage);
        assert_eq!(faults[0].anchor.start, 110);
    }

    #[test]
    fn stale_message_and_flag_fire_independently() {
        let host = FakeHost::with_assembly_version("2.0.0.0");
        let decl = declaration(vec![
            metadata_attribute(versions("2", "3")),
            marker_attribute(vec![
                positional(LiteralValue::Str("old text".to_string()), 110, 120),
                positional(LiteralValue::Bool(false), 122, 127),
            ]),
        ]);

        let faults = evaluate(&decl, &host, &DeprecationConfig::default());
        let kinds = faults.iter().map(|fault| fault.kind).collect::<Vec<_>>();
        assert_eq!(
            kinds,
            vec![FaultKind::IncorrectMessage, FaultKind::IncorrectErrorFlag]
        );
    }

    #[test]
    fn matching_marker_yields_no_faults() {
        let host = FakeHost::with_assembly_version("1.0.0.0");
        let decl = declaration(vec![
            metadata_attribute(versions("2", "3")),
            marker_attribute(vec![
                positional(
                    LiteralValue::Str(
                        "Will be treated as an error from version 2.0.0. Will be removed in version 3.0.0."
                            .to_string(),
                    ),
                    110,
                    150,
                ),
                positional(LiteralValue::Bool(false), 152, 157),
            ]),
        ]);

        assert!(evaluate(&decl, &host, &DeprecationConfig::default()).is_empty());
    }

    #[test]
    fn non_bool_second_argument_counts_as_an_incorrect_flag() {
        let host = FakeHost::with_assembly_version("1.0.0.0");
        let decl = declaration(vec![
            metadata_attribute(versions("2", "3")),
            marker_attribute(vec![
                positional(
                    LiteralValue::Str(
                        "Will be treated as an error from version 2.0.0. Will be removed in version 3.0.0."
                            .to_string(),
                    ),
                    110,
                    150,
                ),
                positional(LiteralValue::Int(0), 152, 153),
            ]),
        ]);

        let faults = evaluate(&decl, &host, &DeprecationConfig::default());
        assert_eq!(faults.len(), 1);
        assert_eq!(faults[0].kind, FaultKind::IncorrectErrorFlag);
    }
}
