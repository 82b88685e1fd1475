//! # Owned Syntax Tree
//!
//! [`Node`] is a plain `{kind, text, children}` tree. It is what the CLI
//! loads from a JSON parser dump, and what tests assemble with the
//! constructor helpers below. The helpers reproduce the child layout of a
//! TypeScript syntax tree, punctuation tokens included, so the builder sees
//! the same shapes it would see from a real parser:
//!
//! ```text
//! interface T1 extends T0 { x: string }
//!
//! InterfaceDeclaration
//! ├── Token "interface"
//! ├── Identifier "T1"
//! ├── SyntaxList
//! │   └── HeritageClause
//! │       ├── Token "extends"
//! │       └── SyntaxList
//! │           └── ExpressionWithTypeArguments
//! │               └── Identifier "T0"
//! ├── Token "{"
//! ├── SyntaxList
//! │   └── PropertySignature
//! │       ├── Identifier "x"
//! │       ├── Token ":"
//! │       └── StringKeyword "string"
//! └── Token "}"
//! ```

use serde::{Deserialize, Serialize};

use crate::syntax::{SyntaxKind, SyntaxNode};

/// An owned syntax tree node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub kind: SyntaxKind,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: SyntaxKind, text: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            kind,
            text: text.into(),
            children,
        }
    }

    /// A childless node.
    pub fn leaf(kind: SyntaxKind, text: impl Into<String>) -> Self {
        Self::new(kind, text, Vec::new())
    }

    /// A node whose text is its children's text joined by `separator`.
    fn composite(kind: SyntaxKind, separator: &str, children: Vec<Node>) -> Self {
        let text = children
            .iter()
            .map(|c| c.text.as_str())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(separator);
        Self::new(kind, text, children)
    }

    pub fn token(text: impl Into<String>) -> Self {
        Self::leaf(SyntaxKind::Token, text)
    }

    pub fn identifier(name: impl Into<String>) -> Self {
        Self::leaf(SyntaxKind::Identifier, name)
    }

    /// A double-quoted string literal. `value` is escaped as JSON would.
    pub fn string_literal(value: &str) -> Self {
        let quoted = serde_json::Value::String(value.to_string()).to_string();
        Self::leaf(SyntaxKind::StringLiteral, quoted)
    }

    pub fn list(children: Vec<Node>) -> Self {
        Self::composite(SyntaxKind::SyntaxList, " ", children)
    }

    /// `SourceFile[SyntaxList[statements], EndOfFileToken]`.
    pub fn source_file(statements: Vec<Node>) -> Self {
        let list = Self::composite(SyntaxKind::SyntaxList, "\n", statements);
        Self::composite(SyntaxKind::SourceFile, "\n", vec![list, Self::token("")])
    }

    /// `interface name extends a, b { members }`.
    pub fn interface(name: &str, extends: &[&str], members: Vec<Node>) -> Self {
        let mut children = vec![Self::token("interface"), Self::identifier(name)];
        if !extends.is_empty() {
            children.push(Self::list(vec![Self::heritage_clause(extends)]));
        }
        children.extend(Self::braced(members));
        Self::composite(SyntaxKind::InterfaceDeclaration, " ", children)
    }

    /// `class name extends base { members }`.
    pub fn class(name: &str, extends: Option<&str>, members: Vec<Node>) -> Self {
        let mut children = vec![Self::token("class"), Self::identifier(name)];
        if let Some(base) = extends {
            children.push(Self::list(vec![Self::heritage_clause(&[base])]));
        }
        children.extend(Self::braced(members));
        Self::composite(SyntaxKind::ClassDeclaration, " ", children)
    }

    /// `type name = ty;`.
    pub fn type_alias(name: &str, ty: Node) -> Self {
        Self::composite(
            SyntaxKind::TypeAliasDeclaration,
            " ",
            vec![
                Self::token("type"),
                Self::identifier(name),
                Self::token("="),
                ty,
                Self::token(";"),
            ],
        )
    }

    /// `extends a, b`.
    pub fn heritage_clause(names: &[&str]) -> Self {
        let expressions = names
            .iter()
            .map(|name| {
                Self::composite(
                    SyntaxKind::ExpressionWithTypeArguments,
                    "",
                    vec![Self::identifier(*name)],
                )
            })
            .collect();
        Self::composite(
            SyntaxKind::HeritageClause,
            " ",
            vec![Self::token("extends"), Self::list(expressions)],
        )
    }

    /// Property signature `name: ty`. Names that are not identifiers are
    /// written as string literals.
    pub fn property(name: &str, ty: Node) -> Self {
        Self::member(SyntaxKind::PropertySignature, name, false, ty)
    }

    /// Property signature `name?: ty`.
    pub fn optional_property(name: &str, ty: Node) -> Self {
        Self::member(SyntaxKind::PropertySignature, name, true, ty)
    }

    /// Class field `name: ty;`.
    pub fn property_declaration(name: &str, ty: Node) -> Self {
        Self::member(SyntaxKind::PropertyDeclaration, name, false, ty)
    }

    /// Method signature `name(): void`.
    pub fn method(name: &str) -> Self {
        Self::composite(
            SyntaxKind::MethodSignature,
            "",
            vec![
                Self::identifier(name),
                Self::token("("),
                Self::token(")"),
                Self::token(":"),
                Self::token("void"),
            ],
        )
    }

    /// A keyword type node. `null` is wrapped in a `LiteralType` the way
    /// the TypeScript parser does.
    pub fn keyword(kind: SyntaxKind) -> Self {
        let text = match kind {
            SyntaxKind::StringKeyword => "string",
            SyntaxKind::NumberKeyword => "number",
            SyntaxKind::BooleanKeyword => "boolean",
            SyntaxKind::AnyKeyword => "any",
            SyntaxKind::NullKeyword => "null",
            SyntaxKind::UndefinedKeyword => "undefined",
            SyntaxKind::NeverKeyword => "never",
            other => other.as_str(),
        };
        let node = Self::leaf(kind, text);
        if kind == SyntaxKind::NullKeyword {
            Self::composite(SyntaxKind::LiteralType, "", vec![node])
        } else {
            node
        }
    }

    /// The keyword type node spelled `text`, if `text` is a supported
    /// keyword.
    pub fn parse_keyword(text: &str) -> Option<Self> {
        SyntaxKind::from_keyword(text).map(Self::keyword)
    }

    /// `TypeReference[Identifier name]`.
    pub fn type_ref(name: &str) -> Self {
        Self::composite(SyntaxKind::TypeReference, "", vec![Self::identifier(name)])
    }

    /// `element[]`.
    pub fn array_of(element: Node) -> Self {
        Self::composite(
            SyntaxKind::ArrayType,
            "",
            vec![element, Self::token("["), Self::token("]")],
        )
    }

    /// `{ members }`.
    pub fn type_literal(members: Vec<Node>) -> Self {
        Self::composite(SyntaxKind::TypeLiteral, " ", Self::braced(members))
    }

    /// `a | b | ...`.
    pub fn union(members: Vec<Node>) -> Self {
        Self::composite(SyntaxKind::UnionType, " ", vec![Self::separated(members, "|")])
    }

    /// `a & b & ...`.
    pub fn intersection(members: Vec<Node>) -> Self {
        Self::composite(
            SyntaxKind::IntersectionType,
            " ",
            vec![Self::separated(members, "&")],
        )
    }

    /// `() => returns`.
    pub fn function_type(returns: Node) -> Self {
        Self::composite(
            SyntaxKind::FunctionType,
            " ",
            vec![Self::token("()"), Self::token("=>"), returns],
        )
    }

    /// Parse a JSON parser dump.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    fn member(kind: SyntaxKind, name: &str, optional: bool, ty: Node) -> Self {
        let name_node = if is_identifier(name) {
            Self::identifier(name)
        } else {
            Self::string_literal(name)
        };
        let mut children = vec![name_node];
        if optional {
            children.push(Self::leaf(SyntaxKind::QuestionToken, "?"));
        }
        children.push(Self::token(":"));
        children.push(ty);
        Self::composite(kind, "", children)
    }

    fn braced(members: Vec<Node>) -> Vec<Node> {
        vec![Self::token("{"), Self::list(members), Self::token("}")]
    }

    fn separated(members: Vec<Node>, separator: &str) -> Node {
        let mut children = Vec::with_capacity(members.len() * 2);
        for (i, member) in members.into_iter().enumerate() {
            if i > 0 {
                children.push(Self::token(separator));
            }
            children.push(member);
        }
        Self::list(children)
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

impl<'a> SyntaxNode for &'a Node {
    fn kind(&self) -> SyntaxKind {
        self.kind
    }

    fn children(&self) -> Vec<Self> {
        let node: &'a Node = *self;
        node.children.iter().collect()
    }

    fn text(&self) -> String {
        self.text.clone()
    }
}
