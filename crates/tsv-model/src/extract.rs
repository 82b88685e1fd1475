//! # Property Extraction
//!
//! Walks a structural node (declaration body, type literal, member list)
//! and produces its ordered property list. Type references met along the
//! way are handed to a [`ResolveReference`] implementation, which decides
//! between inlining the referenced structure and emitting a named
//! `Reference`. The builder is the only production implementation.

use tsv_core::{BuildError, Property, PropertyType};

use crate::classify::classify_leaf;
use crate::syntax::{SyntaxKind, SyntaxNode};

/// Resolves a type name met inside a property type.
pub trait ResolveReference {
    fn resolve_reference(&mut self, name: &str) -> Result<PropertyType, BuildError>;
}

/// Extract the properties declared under `node`, in child order.
///
/// Property nodes contribute one property each. Method-like members,
/// heritage clauses and type parameters contribute nothing. Every other node
/// is treated as a container and its children are extracted in turn.
///
/// # Errors
///
/// `UnsupportedNode` for a union, intersection or function type reached at
/// property-list level, and whatever [`build_property`] reports.
pub fn extract_properties<N, R>(node: &N, resolver: &mut R) -> Result<Vec<Property>, BuildError>
where
    N: SyntaxNode,
    R: ResolveReference,
{
    let mut properties = Vec::new();
    collect_properties(node, resolver, &mut properties)?;
    Ok(properties)
}

fn collect_properties<N, R>(
    node: &N,
    resolver: &mut R,
    out: &mut Vec<Property>,
) -> Result<(), BuildError>
where
    N: SyntaxNode,
    R: ResolveReference,
{
    let kind = node.kind();
    if !kind.is_supported_in_property_list() {
        return Err(unsupported(node));
    }
    if kind.is_property() {
        out.push(build_property(node, resolver)?);
        return Ok(());
    }
    if kind.is_excluded_from_property_list() {
        return Ok(());
    }
    for child in node.children() {
        collect_properties(&child, resolver, out)?;
    }
    Ok(())
}

/// Build one property from a property signature or class field.
///
/// The first child is the name: an identifier, or a string literal whose
/// quotes are stripped. A `?` child marks the property optional. The
/// remaining children are tried in order and the first one that classifies
/// into a property type wins.
///
/// # Errors
///
/// `InvalidProperty` when the first child is not a name or no child
/// classifies; `UnsupportedNode` when the type is a union, intersection or
/// function type.
pub fn build_property<N, R>(node: &N, resolver: &mut R) -> Result<Property, BuildError>
where
    N: SyntaxNode,
    R: ResolveReference,
{
    let children = node.children();
    let (first, rest) = match children.split_first() {
        Some((first, rest)) if first.kind().is_property_name() && !rest.is_empty() => {
            (first, rest)
        }
        _ => return Err(invalid_property(node)),
    };

    let name = property_name(first);
    let optional = rest.iter().any(|c| c.kind() == SyntaxKind::QuestionToken);

    for candidate in rest {
        if let Some(ty) = property_type(candidate, resolver)? {
            return Ok(Property {
                name,
                ty,
                optional,
            });
        }
    }
    Err(invalid_property(node))
}

/// Classify a type node into a property type.
///
/// Keywords and `never` classify directly; type literals recurse into
/// [`extract_properties`]; arrays classify their element; references go
/// through `resolver`. Punctuation and other kinds yield `None`.
pub fn property_type<N, R>(node: &N, resolver: &mut R) -> Result<Option<PropertyType>, BuildError>
where
    N: SyntaxNode,
    R: ResolveReference,
{
    if let Some(leaf) = classify_leaf(node) {
        return Ok(Some(leaf));
    }
    match node.kind() {
        SyntaxKind::TypeLiteral => Ok(Some(PropertyType::Object(extract_properties(
            node, resolver,
        )?))),
        SyntaxKind::ArrayType => {
            for child in node.children() {
                if let Some(element) = property_type(&child, resolver)? {
                    return Ok(Some(PropertyType::array_of(element)));
                }
            }
            Ok(None)
        }
        SyntaxKind::TypeReference => {
            let name = reference_name(node);
            resolver.resolve_reference(&name).map(Some)
        }
        SyntaxKind::UnionType | SyntaxKind::IntersectionType | SyntaxKind::FunctionType => {
            Err(unsupported(node))
        }
        _ => Ok(None),
    }
}

/// The name a type reference points at: its first identifier, or its
/// trimmed text when the parser gives the reference no identifier child.
pub fn reference_name<N: SyntaxNode>(node: &N) -> String {
    node.first_identifier()
        .map(|ident| ident.text())
        .unwrap_or_else(|| node.text())
        .trim()
        .to_string()
}

/// A property name with string-literal quotes removed.
fn property_name<N: SyntaxNode>(node: &N) -> String {
    let text = node.text();
    let text = text.trim();
    if node.kind() != SyntaxKind::StringLiteral {
        return text.to_string();
    }
    if text.starts_with('"') {
        if let Ok(unquoted) = serde_json::from_str::<String>(text) {
            return unquoted;
        }
    }
    text.trim_matches(|c| c == '"' || c == '\'').to_string()
}

fn unsupported<N: SyntaxNode>(node: &N) -> BuildError {
    BuildError::UnsupportedNode {
        kind: node.kind().to_string(),
        text: node.text(),
    }
}

fn invalid_property<N: SyntaxNode>(node: &N) -> BuildError {
    BuildError::InvalidProperty {
        kind: node.kind().to_string(),
        text: node.text(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;
    use tsv_core::PropertyKeyword;

    /// Resolves every name to a `Reference` without checking it.
    struct Opaque;

    impl ResolveReference for Opaque {
        fn resolve_reference(&mut self, name: &str) -> Result<PropertyType, BuildError> {
            Ok(PropertyType::reference(name))
        }
    }

    fn kw(text: &str) -> Node {
        Node::parse_keyword(text).unwrap()
    }

    #[test]
    fn extracts_in_declaration_order() {
        let node = Node::type_literal(vec![
            Node::property("b", kw("number")),
            Node::property("a", kw("string")),
        ]);
        let props = extract_properties(&&node, &mut Opaque).unwrap();
        assert_eq!(
            props,
            vec![
                Property::new("b", PropertyKeyword::Number),
                Property::new("a", PropertyKeyword::String),
            ]
        );
    }

    #[test]
    fn nested_literals_arrays_and_references() {
        let node = Node::type_literal(vec![
            Node::property("inner", Node::type_literal(vec![Node::property("x", kw("boolean"))])),
            Node::property("tags", Node::array_of(kw("string"))),
            Node::property("next", Node::type_ref("Other")),
        ]);
        let props = extract_properties(&&node, &mut Opaque).unwrap();
        assert_eq!(
            props[0].ty,
            PropertyType::Object(vec![Property::new("x", PropertyKeyword::Boolean)])
        );
        assert_eq!(
            props[1].ty,
            PropertyType::array_of(PropertyKeyword::String.into())
        );
        assert_eq!(props[2].ty, PropertyType::reference("Other"));
    }

    #[test]
    fn optional_marker_and_string_literal_names() {
        let node = Node::type_literal(vec![
            Node::optional_property("maybe", kw("number")),
            Node::property("the z", kw("string")),
        ]);
        let props = extract_properties(&&node, &mut Opaque).unwrap();
        assert!(props[0].optional);
        assert_eq!(props[1].name, "the z");
        assert!(!props[1].optional);
    }

    #[test]
    fn single_quoted_names_are_unquoted() {
        let node = Node::new(
            SyntaxKind::PropertySignature,
            "'a b': string",
            vec![
                Node::leaf(SyntaxKind::StringLiteral, "'a b'"),
                Node::token(":"),
                kw("string"),
            ],
        );
        let prop = build_property(&&node, &mut Opaque).unwrap();
        assert_eq!(prop.name, "a b");
    }

    #[test]
    fn methods_are_skipped() {
        let node = Node::type_literal(vec![
            Node::method("run"),
            Node::property("x", kw("string")),
        ]);
        let props = extract_properties(&&node, &mut Opaque).unwrap();
        assert_eq!(props.len(), 1);
        assert_eq!(props[0].name, "x");
    }

    #[test]
    fn union_property_is_rejected() {
        let node = Node::type_literal(vec![Node::property(
            "x",
            Node::union(vec![kw("string"), kw("number")]),
        )]);
        let err = extract_properties(&&node, &mut Opaque).unwrap_err();
        assert!(matches!(err, BuildError::UnsupportedNode { ref kind, .. } if kind == "UnionType"));
    }

    #[test]
    fn union_in_member_list_is_rejected() {
        let node = Node::list(vec![Node::union(vec![kw("string"), kw("number")])]);
        assert!(matches!(
            extract_properties(&&node, &mut Opaque),
            Err(BuildError::UnsupportedNode { .. })
        ));
    }

    #[test]
    fn property_without_name_is_invalid() {
        let node = Node::new(
            SyntaxKind::PropertySignature,
            ": string",
            vec![Node::token(":"), kw("string")],
        );
        assert!(matches!(
            build_property(&&node, &mut Opaque),
            Err(BuildError::InvalidProperty { .. })
        ));
    }

    #[test]
    fn property_without_usable_type_is_invalid() {
        let node = Node::new(
            SyntaxKind::PropertySignature,
            "x: object",
            vec![Node::identifier("x"), Node::token(":"), Node::token("object")],
        );
        let err = build_property(&&node, &mut Opaque).unwrap_err();
        assert_eq!(
            err,
            BuildError::InvalidProperty {
                kind: "PropertySignature".to_string(),
                text: "x: object".to_string(),
            }
        );
    }

    #[test]
    fn reference_name_falls_back_to_text() {
        let node = Node::leaf(SyntaxKind::TypeReference, " Foo ");
        assert_eq!(reference_name(&&node), "Foo");
    }
}
