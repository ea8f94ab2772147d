use crate::model::{AssemblyIdentity, AttributeNode, Span};

/// One lexical scope enclosing a syntax node, exposing the import
/// directives visible at that scope.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LexicalScope {
    pub imports: Vec<String>,
}

impl LexicalScope {
    pub fn with_imports(imports: Vec<String>) -> Self {
        Self { imports }
    }

    pub fn imports_namespace(&self, namespace: &str) -> bool {
        self.imports.iter().any(|import| import == namespace)
    }
}

/// A type resolved by fully qualified metadata name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WellKnownType {
    pub fully_qualified: String,
    pub namespace: String,
    pub short_name: String,
}

impl WellKnownType {
    pub fn from_fully_qualified(fully_qualified: &str) -> Self {
        let (namespace, short_name) = match fully_qualified.rsplit_once('.') {
            Some((namespace, short_name)) => (namespace, short_name),
            None => ("", fully_qualified),
        };
        Self {
            fully_qualified: fully_qualified.to_string(),
            namespace: namespace.to_string(),
            short_name: short_name.to_string(),
        }
    }
}

/// Query surface the host compiler exposes to the rule engine and the
/// corrector. Implementations are request-scoped; results are immutable for
/// the duration of one analysis pass and callers never cache them across
/// passes. A `None` from any query means the semantic information is
/// unavailable and the caller short-circuits without reporting.
pub trait HostQueries {
    /// Fully qualified name of the attribute's resolved type, or `None`
    /// when symbol resolution failed.
    fn resolve_attribute_type(&self, attribute: &AttributeNode) -> Option<String>;

    /// Resolves a well-known type by fully qualified metadata name.
    fn resolve_well_known_type(&self, fully_qualified: &str) -> Option<WellKnownType>;

    fn assembly_identity(&self) -> &AssemblyIdentity;

    /// Scope chain enclosing `anchor`, innermost first, ending with the
    /// file root scope.
    fn enclosing_scopes(&self, anchor: &Span) -> Vec<LexicalScope>;
}
