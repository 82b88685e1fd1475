//! # Primitive Classifier
//!
//! Maps a leaf type node to the primitive it spells, or to `never`. Anything
//! else (type literals, references, arrays, punctuation) is "not a keyword"
//! and left to the property extractor.

use tsv_core::{PropertyKeyword, PropertyType};

use crate::syntax::{SyntaxKind, SyntaxNode};

/// The keyword a keyword node kind spells, if any.
pub fn keyword_of(kind: SyntaxKind) -> Option<PropertyKeyword> {
    match kind {
        SyntaxKind::StringKeyword => Some(PropertyKeyword::String),
        SyntaxKind::NumberKeyword => Some(PropertyKeyword::Number),
        SyntaxKind::BooleanKeyword => Some(PropertyKeyword::Boolean),
        SyntaxKind::AnyKeyword => Some(PropertyKeyword::Any),
        SyntaxKind::NullKeyword => Some(PropertyKeyword::Null),
        SyntaxKind::UndefinedKeyword => Some(PropertyKeyword::Undefined),
        _ => None,
    }
}

/// Classify a leaf type node.
///
/// Returns `Keyword` for the six primitive keywords, `Never` for `never`,
/// and `None` otherwise. A `LiteralType` wrapping `null` (the parser's
/// shape for `null` in type position) classifies as `Keyword(Null)`.
pub fn classify_leaf<N: SyntaxNode>(node: &N) -> Option<PropertyType> {
    match node.kind() {
        SyntaxKind::NeverKeyword => Some(PropertyType::Never),
        SyntaxKind::LiteralType => {
            let children = node.children();
            match children.as_slice() {
                [only] if only.kind() == SyntaxKind::NullKeyword => {
                    Some(PropertyType::Keyword(PropertyKeyword::Null))
                }
                _ => None,
            }
        }
        kind => keyword_of(kind).map(PropertyType::Keyword),
    }
}
