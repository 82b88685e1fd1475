//! # Syntax Capability Layer
//!
//! The builder does not parse source text. It walks a tree produced by an
//! external parser through the [`SyntaxNode`] trait, which exposes exactly
//! three things per node: its [`SyntaxKind`], its ordered children and its
//! source text.
//!
//! `SyntaxKind` names follow the TypeScript compiler's `SyntaxKind` so that a
//! parser dump can be loaded without a mapping table. Kinds the builder does
//! not distinguish (punctuation, modifiers, keywords with no data meaning)
//! all collapse into [`SyntaxKind::Token`].

use serde::{Deserialize, Serialize};

/// Node kinds the builder distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SyntaxKind {
    SourceFile,
    SyntaxList,

    // Declarations.
    InterfaceDeclaration,
    ClassDeclaration,
    TypeAliasDeclaration,

    // Names.
    Identifier,
    StringLiteral,

    // Members.
    PropertySignature,
    PropertyDeclaration,
    MethodSignature,
    MethodDeclaration,
    Constructor,
    GetAccessor,
    SetAccessor,
    IndexSignature,
    CallSignature,
    ConstructSignature,
    QuestionToken,

    // Type nodes.
    TypeLiteral,
    TypeReference,
    ArrayType,
    LiteralType,
    UnionType,
    IntersectionType,
    FunctionType,

    // Keyword type nodes.
    StringKeyword,
    NumberKeyword,
    BooleanKeyword,
    AnyKeyword,
    NullKeyword,
    UndefinedKeyword,
    NeverKeyword,

    // Heritage and generics.
    HeritageClause,
    ExpressionWithTypeArguments,
    TypeParameter,

    /// Punctuation, modifiers, and every kind not listed above.
    Token,
}

impl SyntaxKind {
    /// Returns all kinds in declaration order.
    pub fn all() -> &'static [SyntaxKind] {
        use SyntaxKind::*;
        &[
            SourceFile,
            SyntaxList,
            InterfaceDeclaration,
            ClassDeclaration,
            TypeAliasDeclaration,
            Identifier,
            StringLiteral,
            PropertySignature,
            PropertyDeclaration,
            MethodSignature,
            MethodDeclaration,
            Constructor,
            GetAccessor,
            SetAccessor,
            IndexSignature,
            CallSignature,
            ConstructSignature,
            QuestionToken,
            TypeLiteral,
            TypeReference,
            ArrayType,
            LiteralType,
            UnionType,
            IntersectionType,
            FunctionType,
            StringKeyword,
            NumberKeyword,
            BooleanKeyword,
            AnyKeyword,
            NullKeyword,
            UndefinedKeyword,
            NeverKeyword,
            HeritageClause,
            ExpressionWithTypeArguments,
            TypeParameter,
            Token,
        ]
    }

    /// The TypeScript `SyntaxKind` name.
    ///
    /// This must match the serde serialization format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SourceFile => "SourceFile",
            Self::SyntaxList => "SyntaxList",
            Self::InterfaceDeclaration => "InterfaceDeclaration",
            Self::ClassDeclaration => "ClassDeclaration",
            Self::TypeAliasDeclaration => "TypeAliasDeclaration",
            Self::Identifier => "Identifier",
            Self::StringLiteral => "StringLiteral",
            Self::PropertySignature => "PropertySignature",
            Self::PropertyDeclaration => "PropertyDeclaration",
            Self::MethodSignature => "MethodSignature",
            Self::MethodDeclaration => "MethodDeclaration",
            Self::Constructor => "Constructor",
            Self::GetAccessor => "GetAccessor",
            Self::SetAccessor => "SetAccessor",
            Self::IndexSignature => "IndexSignature",
            Self::CallSignature => "CallSignature",
            Self::ConstructSignature => "ConstructSignature",
            Self::QuestionToken => "QuestionToken",
            Self::TypeLiteral => "TypeLiteral",
            Self::TypeReference => "TypeReference",
            Self::ArrayType => "ArrayType",
            Self::LiteralType => "LiteralType",
            Self::UnionType => "UnionType",
            Self::IntersectionType => "IntersectionType",
            Self::FunctionType => "FunctionType",
            Self::StringKeyword => "StringKeyword",
            Self::NumberKeyword => "NumberKeyword",
            Self::BooleanKeyword => "BooleanKeyword",
            Self::AnyKeyword => "AnyKeyword",
            Self::NullKeyword => "NullKeyword",
            Self::UndefinedKeyword => "UndefinedKeyword",
            Self::NeverKeyword => "NeverKeyword",
            Self::HeritageClause => "HeritageClause",
            Self::ExpressionWithTypeArguments => "ExpressionWithTypeArguments",
            Self::TypeParameter => "TypeParameter",
            Self::Token => "Token",
        }
    }

    /// Parse a kind name. Unknown names map to [`SyntaxKind::Token`].
    pub fn from_name(name: &str) -> Self {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == name)
            .unwrap_or(Self::Token)
    }

    /// The keyword kind spelled `text` in type position (`string`,
    /// `never`, ...), if any.
    pub fn from_keyword(text: &str) -> Option<Self> {
        match text {
            "string" => Some(Self::StringKeyword),
            "number" => Some(Self::NumberKeyword),
            "boolean" => Some(Self::BooleanKeyword),
            "any" => Some(Self::AnyKeyword),
            "null" => Some(Self::NullKeyword),
            "undefined" => Some(Self::UndefinedKeyword),
            "never" => Some(Self::NeverKeyword),
            _ => None,
        }
    }

    /// Interface, class or type-alias declaration.
    pub fn is_type_declaration(&self) -> bool {
        matches!(
            self,
            Self::InterfaceDeclaration | Self::ClassDeclaration | Self::TypeAliasDeclaration
        )
    }

    /// A data-carrying member: property signature or class field.
    pub fn is_property(&self) -> bool {
        matches!(self, Self::PropertySignature | Self::PropertyDeclaration)
    }

    /// Members that describe behaviour rather than data shape.
    pub fn is_method_like(&self) -> bool {
        matches!(
            self,
            Self::MethodSignature
                | Self::MethodDeclaration
                | Self::Constructor
                | Self::GetAccessor
                | Self::SetAccessor
                | Self::IndexSignature
                | Self::CallSignature
                | Self::ConstructSignature
        )
    }

    /// False for union, intersection and function types.
    pub fn is_supported_in_property_list(&self) -> bool {
        !matches!(
            self,
            Self::UnionType | Self::IntersectionType | Self::FunctionType
        )
    }

    /// Subtrees that never contribute properties: heritage clauses, type
    /// parameters and method-like members.
    pub fn is_excluded_from_property_list(&self) -> bool {
        self.is_method_like() || matches!(self, Self::HeritageClause | Self::TypeParameter)
    }

    /// Nodes that can appear as the body of a type alias.
    pub fn is_type_node(&self) -> bool {
        matches!(
            self,
            Self::TypeLiteral
                | Self::TypeReference
                | Self::ArrayType
                | Self::LiteralType
                | Self::UnionType
                | Self::IntersectionType
                | Self::FunctionType
                | Self::StringKeyword
                | Self::NumberKeyword
                | Self::BooleanKeyword
                | Self::AnyKeyword
                | Self::NullKeyword
                | Self::UndefinedKeyword
                | Self::NeverKeyword
        )
    }

    /// Nodes that can name a property.
    pub fn is_property_name(&self) -> bool {
        matches!(self, Self::Identifier | Self::StringLiteral)
    }
}

impl std::fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for SyntaxKind {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<SyntaxKind> for String {
    fn from(kind: SyntaxKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Read access to a parsed syntax tree.
///
/// Implementations are cheap handles (references, arena indices): the
/// builder clones them freely and keeps declaration handles for the
/// duration of a build.
pub trait SyntaxNode: Clone {
    /// The node's kind.
    fn kind(&self) -> SyntaxKind;

    /// Ordered children, tokens included.
    fn children(&self) -> Vec<Self>;

    /// Source text covered by the node.
    fn text(&self) -> String;

    fn is_type_declaration(&self) -> bool {
        self.kind().is_type_declaration()
    }

    fn is_property(&self) -> bool {
        self.kind().is_property()
    }

    fn is_supported_in_property_list(&self) -> bool {
        self.kind().is_supported_in_property_list()
    }

    /// The first identifier in a depth-first walk of this subtree,
    /// including the node itself.
    fn first_identifier(&self) -> Option<Self> {
        if self.kind() == SyntaxKind::Identifier {
            return Some(self.clone());
        }
        self.children()
            .iter()
            .find_map(|child| child.first_identifier())
    }
}
