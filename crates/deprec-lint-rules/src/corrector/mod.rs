use deprec_lint_core::diagnostics::{Diagnostic, Fix, FixSafety, TextEdit};
use deprec_lint_core::lints::ids;
use deprec_lint_core::model::{AttributeNode, Declaration, SemanticVersion, Span};

use crate::engine::context::{RuleContext, SourceFile};
use crate::lifecycle::annotations::DeprecationAnnotations;
use crate::lifecycle::message::{ExpectedMarker, expected_marker};
use crate::lifecycle::{PROP_EXPECTED_IS_ERROR, PROP_EXPECTED_MESSAGE};

/// Description offered to the host for each fixable fault kind.
pub fn fix_description(rule_id: &str) -> Option<&'static str> {
    match rule_id {
        ids::MISSING_MARKER => Some("Add the deprecation marker attribute"),
        ids::MARKER_MISSING_ARGUMENTS => Some("Rewrite the deprecation marker arguments"),
        ids::INCORRECT_MESSAGE => Some("Update the deprecation marker message"),
        ids::INCORRECT_ERROR_FLAG => Some("Update the deprecation marker error flag"),
        _ => None,
    }
}

/// Plans the mechanical correction for one diagnostic against the current
/// declaration. Every precondition failure yields `None`, never an error:
/// declining or retrying a fix must always be safe.
pub fn plan_fix(
    ctx: &RuleContext<'_>,
    declaration: &Declaration,
    diagnostic: &Diagnostic,
) -> Option<Fix> {
    let description = fix_description(&diagnostic.rule_id)?;
    let expected = expectation_for(ctx, declaration, diagnostic)?;
    let annotations =
        DeprecationAnnotations::collect(ctx.host(), ctx.deprecation(), declaration);

    let edits = match diagnostic.rule_id.as_str() {
        ids::MISSING_MARKER => {
            if annotations.marker.is_some() {
                return None;
            }
            insert_marker_edits(ctx, declaration, &expected)?
        }
        ids::MARKER_MISSING_ARGUMENTS => {
            let marker = annotations.marker?;
            vec![TextEdit {
                span: marker.span.clone(),
                replacement: format!(
                    "{}({}, {})",
                    marker_use_site_name(ctx)?,
                    string_literal(&expected.message),
                    expected.is_error
                ),
            }]
        }
        ids::INCORRECT_MESSAGE => {
            let argument = marker_argument(annotations.marker, 0)?;
            vec![TextEdit {
                span: argument.clone(),
                replacement: string_literal(&expected.message),
            }]
        }
        ids::INCORRECT_ERROR_FLAG => {
            let argument = marker_argument(annotations.marker, 1)?;
            vec![TextEdit {
                span: argument.clone(),
                replacement: expected.is_error.to_string(),
            }]
        }
        _ => return None,
    };

    Some(Fix {
        description: description.to_string(),
        edits,
        safety: FixSafety::Safe,
    })
}

/// Expected marker values from the diagnostic's property bag, re-derived
/// from the declaration when the bag is absent. Both derivations run the
/// same message construction, so they agree byte-for-byte.
fn expectation_for(
    ctx: &RuleContext<'_>,
    declaration: &Declaration,
    diagnostic: &Diagnostic,
) -> Option<ExpectedMarker> {
    if let (Some(message), Some(flag)) = (
        diagnostic.property_value(PROP_EXPECTED_MESSAGE),
        diagnostic.property_value(PROP_EXPECTED_IS_ERROR),
    ) {
        let is_error = match flag {
            "true" => true,
            "false" => false,
            _ => return None,
        };
        return Some(ExpectedMarker {
            message: message.to_string(),
            is_error,
        });
    }
    derive_expectation(ctx, declaration)
}

fn derive_expectation(ctx: &RuleContext<'_>, declaration: &Declaration) -> Option<ExpectedMarker> {
    let annotations =
        DeprecationAnnotations::collect(ctx.host(), ctx.deprecation(), declaration);
    let metadata = annotations.metadata?;
    let error_version =
        SemanticVersion::parse(metadata.error_version.as_ref()?.raw.as_deref()?)?;
    let removal_version =
        SemanticVersion::parse(metadata.removal_version.as_ref()?.raw.as_deref()?)?;
    if removal_version <= error_version {
        return None;
    }
    let assembly_version = ctx.host().assembly_identity().effective_version()?;
    if assembly_version >= removal_version {
        return None;
    }
    Some(expected_marker(
        metadata.message.as_deref(),
        metadata.replacement.as_deref(),
        assembly_version,
        error_version,
        removal_version,
    ))
}

/// Inserts a full marker attribute line above the declaration, plus the
/// marker namespace import at the file root when no enclosing scope
/// already imports it.
fn insert_marker_edits(
    ctx: &RuleContext<'_>,
    declaration: &Declaration,
    expected: &ExpectedMarker,
) -> Option<Vec<TextEdit>> {
    let marker_type = ctx
        .host()
        .resolve_well_known_type(&ctx.deprecation().marker_attribute)?;
    let file = ctx.file(&declaration.span.file)?;

    let line_start = file.line_start_offset(declaration.span.line);
    let indentation = file.text()[line_start..]
        .chars()
        .take_while(|ch| *ch == ' ' || *ch == '\t')
        .collect::<String>();
    let use_site = marker_type
        .short_name
        .strip_suffix("Attribute")
        .unwrap_or(&marker_type.short_name);

    let mut edits = vec![TextEdit {
        span: insertion_span(file, line_start),
        replacement: format!(
            "{indentation}[{use_site}({}, {})]\n",
            string_literal(&expected.message),
            expected.is_error
        ),
    }];

    let import_visible = marker_type.namespace.is_empty()
        || ctx
            .host()
            .enclosing_scopes(&declaration.span)
            .iter()
            .any(|scope| scope.imports_namespace(&marker_type.namespace));
    if !import_visible {
        edits.push(TextEdit {
            span: insertion_span(file, 0),
            replacement: format!("using {};\n", marker_type.namespace),
        });
    }

    Some(edits)
}

fn marker_use_site_name(ctx: &RuleContext<'_>) -> Option<String> {
    let marker_type = ctx
        .host()
        .resolve_well_known_type(&ctx.deprecation().marker_attribute)?;
    Some(
        marker_type
            .short_name
            .strip_suffix("Attribute")
            .unwrap_or(&marker_type.short_name)
            .to_string(),
    )
}

fn marker_argument(marker: Option<&AttributeNode>, index: usize) -> Option<&Span> {
    let marker = marker?;
    if marker.positional.len() != 2 {
        return None;
    }
    Some(&marker.positional[index].span)
}

fn insertion_span(file: &SourceFile, offset: usize) -> Span {
    let (line, col) = file.line_col_for_offset(offset);
    Span::insertion_point(
        file.path(),
        u32::try_from(offset).unwrap_or(u32::MAX),
        line,
        col,
    )
}

/// Renders a source string literal, escaping backslashes and quotes.
fn string_literal(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}
