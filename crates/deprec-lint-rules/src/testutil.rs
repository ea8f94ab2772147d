use std::collections::BTreeMap;

use deprec_lint_core::host::{HostQueries, LexicalScope, WellKnownType};
use deprec_lint_core::model::{
    AssemblyIdentity, AttributeArgument, AttributeNode, Declaration, DeclarationKind,
    LiteralValue, NamedAttributeArgument, Span,
};

/// Host stand-in for rule and corrector tests. `with_assembly_version`
/// pre-registers the default annotation resolutions and the marker as a
/// resolvable well-known type; individual tests override or remove entries
/// to exercise the unresolvable paths.
pub struct FakeHost {
    assembly: AssemblyIdentity,
    attribute_types: BTreeMap<String, String>,
    well_known: Vec<String>,
    scopes: Vec<LexicalScope>,
}

impl FakeHost {
    pub fn new(assembly: AssemblyIdentity) -> Self {
        let attribute_types = BTreeMap::from([
            (
                "DeprecationMetadata".to_string(),
                "Lifecycle.Annotations.DeprecationMetadataAttribute".to_string(),
            ),
            ("Obsolete".to_string(), "System.ObsoleteAttribute".to_string()),
            (
                "PreDeprecation".to_string(),
                "Lifecycle.Annotations.PreDeprecationAttribute".to_string(),
            ),
        ]);
        Self {
            assembly,
            attribute_types,
            well_known: vec!["System.ObsoleteAttribute".to_string()],
            scopes: vec![LexicalScope::default()],
        }
    }

    pub fn with_assembly_version(version: &str) -> Self {
        Self::new(AssemblyIdentity::new("Acme.Legacy", version))
    }

    pub fn resolve(mut self, use_site: &str, fully_qualified: &str) -> Self {
        self.attribute_types
            .insert(use_site.to_string(), fully_qualified.to_string());
        self
    }

    pub fn forget(mut self, use_site: &str) -> Self {
        self.attribute_types.remove(use_site);
        self
    }

    pub fn without_well_known(mut self, fully_qualified: &str) -> Self {
        self.well_known.retain(|known| known != fully_qualified);
        self
    }

    pub fn scopes(mut self, scopes: Vec<LexicalScope>) -> Self {
        self.scopes = scopes;
        self
    }
}

impl HostQueries for FakeHost {
    fn resolve_attribute_type(&self, attribute: &AttributeNode) -> Option<String> {
        self.attribute_types.get(&attribute.name).cloned()
    }

    fn resolve_well_known_type(&self, fully_qualified: &str) -> Option<WellKnownType> {
        self.well_known
            .iter()
            .any(|known| known == fully_qualified)
            .then(|| WellKnownType::from_fully_qualified(fully_qualified))
    }

    fn assembly_identity(&self) -> &AssemblyIdentity {
        &self.assembly
    }

    fn enclosing_scopes(&self, _anchor: &Span) -> Vec<LexicalScope> {
        self.scopes.clone()
    }
}

pub fn test_span(start: u32, end: u32) -> Span {
    Span::new("src/Service.cs", start, end, 1, 1)
}

pub fn declaration(attributes: Vec<AttributeNode>) -> Declaration {
    Declaration {
        kind: DeclarationKind::Class,
        name: "LegacyGateway".to_string(),
        span: test_span(0, 200),
        attributes,
    }
}

pub fn attribute(name: &str, span: Span) -> AttributeNode {
    AttributeNode {
        name: name.to_string(),
        span,
        positional: Vec::new(),
        named: Vec::new(),
    }
}

pub fn named_str(name: &str, value: &str, start: u32, end: u32) -> NamedAttributeArgument {
    NamedAttributeArgument {
        name: name.to_string(),
        value: LiteralValue::Str(value.to_string()),
        span: test_span(start, end),
    }
}

pub fn positional(value: LiteralValue, start: u32, end: u32) -> AttributeArgument {
    AttributeArgument {
        value,
        span: test_span(start, end),
    }
}

/// Metadata annotation with the given named arguments, spanning 10..90.
pub fn metadata_attribute(named: Vec<NamedAttributeArgument>) -> AttributeNode {
    AttributeNode {
        name: "DeprecationMetadata".to_string(),
        span: test_span(10, 90),
        positional: Vec::new(),
        named,
    }
}

/// Marker annotation with the given positional arguments, spanning 100..160.
pub fn marker_attribute(positional: Vec<AttributeArgument>) -> AttributeNode {
    AttributeNode {
        name: "Obsolete".to_string(),
        span: test_span(100, 160),
        positional,
        named: Vec::new(),
    }
}
