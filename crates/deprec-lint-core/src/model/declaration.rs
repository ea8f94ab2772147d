use serde::{Deserialize, Serialize};

use crate::model::Span;

/// Declaration kinds the lifecycle policy applies to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    Class,
    Struct,
    Interface,
    Enum,
    Constructor,
    Method,
    Property,
    Field,
    Event,
    Delegate,
}

/// Attribute argument value as resolved by the host compiler.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiteralValue {
    Str(String),
    Bool(bool),
    Int(i64),
    Null,
}

impl LiteralValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Textual rendering of the literal, matching how the host converts
    /// attribute values to strings. `Null` has no rendering.
    pub fn to_display_string(&self) -> Option<String> {
        match self {
            Self::Str(value) => Some(value.clone()),
            Self::Bool(value) => Some(value.to_string()),
            Self::Int(value) => Some(value.to_string()),
            Self::Null => None,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AttributeArgument {
    pub value: LiteralValue,
    pub span: Span,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct NamedAttributeArgument {
    pub name: String,
    pub value: LiteralValue,
    pub span: Span,
}

/// One attribute application. `span` covers the attribute name and its
/// argument list, without the enclosing bracket syntax.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AttributeNode {
    /// Type name as written at the use site, possibly qualified.
    pub name: String,
    pub span: Span,
    pub positional: Vec<AttributeArgument>,
    pub named: Vec<NamedAttributeArgument>,
}

/// One declaration as supplied by the host for a single analysis pass.
/// Identity is positional; declarations are not persisted across passes.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub name: String,
    pub span: Span,
    pub attributes: Vec<AttributeNode>,
}
