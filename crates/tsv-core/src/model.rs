//! # Type Model — Properties, Property Types and Named Types
//!
//! The normalized, self-contained description of declared types. A built
//! model carries no syntactic indirection: aliases are substituted and
//! inheritance is flattened. The only remaining indirection is
//! `PropertyType::Reference`, kept where inlining would never terminate.

use serde::{Deserialize, Serialize};

use crate::keyword::PropertyKeyword;

/// The declared type of a property, or the body of a named type.
///
/// Serialized adjacently tagged: `{"kind": "keyword", "of": "string"}`,
/// `{"kind": "never"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum PropertyType {
    /// A primitive leaf constraint.
    Keyword(PropertyKeyword),
    /// An anonymous object shape.
    Object(Vec<Property>),
    /// A pointer to another named type in the same table.
    Reference(String),
    /// A homogeneous sequence of the element type.
    Array(Box<PropertyType>),
    /// The uninhabited type. No value satisfies it.
    Never,
}

impl PropertyType {
    /// Shorthand for `PropertyType::Array(Box::new(element))`.
    pub fn array_of(element: PropertyType) -> Self {
        Self::Array(Box::new(element))
    }

    /// Shorthand for `PropertyType::Reference(name.into())`.
    pub fn reference(name: impl Into<String>) -> Self {
        Self::Reference(name.into())
    }

    /// The properties of an object shape, or `None` for any other shape.
    pub fn as_object(&self) -> Option<&[Property]> {
        match self {
            Self::Object(properties) => Some(properties),
            _ => None,
        }
    }

    /// Names of every `Reference` reachable from this type, in depth-first
    /// order. Duplicates are kept.
    pub fn references(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_references(&mut out);
        out
    }

    fn collect_references<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Keyword(_) | Self::Never => {}
            Self::Reference(name) => out.push(name),
            Self::Array(element) => element.collect_references(out),
            Self::Object(properties) => {
                for property in properties {
                    property.ty.collect_references(out);
                }
            }
        }
    }
}

impl From<PropertyKeyword> for PropertyType {
    fn from(keyword: PropertyKeyword) -> Self {
        Self::Keyword(keyword)
    }
}

impl std::fmt::Display for PropertyType {
    /// Short description used in violation messages: `string`, `object`,
    /// `Node`, `string[]`, `never`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Keyword(keyword) => write!(f, "{keyword}"),
            Self::Object(_) => f.write_str("object"),
            Self::Reference(name) => f.write_str(name),
            Self::Array(element) => write!(f, "{element}[]"),
            Self::Never => f.write_str("never"),
        }
    }
}

/// A named slot within an object shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: PropertyType,
    /// Declared with `?`: absence (or `undefined`) is accepted.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
}

impl Property {
    /// A required property.
    pub fn new(name: impl Into<String>, ty: impl Into<PropertyType>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            optional: false,
        }
    }

    /// An optional (`name?: ty`) property.
    pub fn optional(name: impl Into<String>, ty: impl Into<PropertyType>) -> Self {
        Self {
            optional: true,
            ..Self::new(name, ty)
        }
    }
}

/// A named, fully resolved type.
///
/// `properties` is an object shape for interfaces, classes and object
/// aliases, and a keyword for primitive aliases (`type T = string`). Aliases
/// of arrays and of `never` carry `Array` and `Never` bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Type {
    pub name: String,
    pub properties: PropertyType,
}

impl Type {
    pub fn new(name: impl Into<String>, properties: impl Into<PropertyType>) -> Self {
        Self {
            name: name.into(),
            properties: properties.into(),
        }
    }

    /// Convenience constructor for an object type.
    pub fn object(name: impl Into<String>, properties: Vec<Property>) -> Self {
        Self::new(name, PropertyType::Object(properties))
    }

    /// The keyword this type aliases, if it is a primitive alias.
    pub fn keyword(&self) -> Option<PropertyKeyword> {
        match self.properties {
            PropertyType::Keyword(keyword) => Some(keyword),
            _ => None,
        }
    }

    /// Look up a property of an object type by name. The last property with
    /// the name wins.
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties
            .as_object()?
            .iter()
            .rev()
            .find(|p| p.name == name)
    }

    /// Property names of an object type, in declaration order.
    pub fn property_names(&self) -> Vec<&str> {
        self.properties
            .as_object()
            .map(|props| props.iter().map(|p| p.name.as_str()).collect())
            .unwrap_or_default()
    }
}
