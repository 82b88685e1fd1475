//! # Type Model Builder
//!
//! Compiles the declarations of one syntax tree into a [`TypeTable`].
//!
//! ## Algorithm
//!
//! 1. **Discovery.** A depth-first walk collects every interface, class and
//!    type-alias declaration together with its name (the first identifier
//!    beneath it). Discovery order is the table order.
//! 2. **Resolution.** Each declaration is resolved once and memoized. A
//!    resolving stack records which types are in progress:
//!    - an alias of a keyword or `never` becomes that leaf;
//!    - an alias of another name adopts that type's resolved body;
//!    - arrays and type literals are extracted structurally;
//!    - interfaces and classes merge their ancestors' properties left to
//!      right, then overlay their own.
//! 3. **Recursion points.** A name met inside a shape is inlined unless it
//!    is on the resolving stack, in which case a `Reference` is emitted.
//!    An alias chain that returns to itself without passing through any
//!    shape is a `CircularAlias`; an `extends` chain that returns to itself
//!    is an `InvalidHeritage`.
//! 4. **Output.** `TypeTable::new` re-checks name uniqueness and reference
//!    closure.

use std::collections::HashMap;

use tsv_core::{BuildError, Property, PropertyType, Type, TypeTable};

use crate::classify::classify_leaf;
use crate::extract::{extract_properties, property_type, reference_name, ResolveReference};
use crate::syntax::{SyntaxKind, SyntaxNode};

/// Build the type table for every declaration under `root`.
///
/// # Errors
///
/// Fails fast with the first [`BuildError`] met; no partial table is
/// returned.
pub fn build<N: SyntaxNode>(root: &N) -> Result<TypeTable, BuildError> {
    TypeModelBuilder::discover(root)?.build()
}

struct Declaration<N> {
    name: String,
    node: N,
}

/// One in-progress resolution on the resolving stack.
struct Frame {
    name: String,
    /// An array or object shape has been entered since this frame began.
    shaped: bool,
    /// The frame is merging its ancestors.
    extending: bool,
}

/// Stateful builder over the declarations of one source unit.
pub struct TypeModelBuilder<N> {
    declarations: Vec<Declaration<N>>,
    index: HashMap<String, usize>,
    resolved: HashMap<String, PropertyType>,
    stack: Vec<Frame>,
}

impl<N: SyntaxNode> TypeModelBuilder<N> {
    /// Collect the declarations under `root`.
    ///
    /// # Errors
    ///
    /// `MissingName` for a declaration without an identifier and
    /// `DuplicateType` when two declarations share a name.
    pub fn discover(root: &N) -> Result<Self, BuildError> {
        let mut nodes = Vec::new();
        if root.is_type_declaration() {
            nodes.push(root.clone());
        } else {
            collect_declarations(root, &mut nodes);
        }

        let mut declarations = Vec::with_capacity(nodes.len());
        let mut index = HashMap::with_capacity(nodes.len());
        for node in nodes {
            let name = node
                .first_identifier()
                .map(|ident| ident.text().trim().to_string())
                .ok_or_else(|| BuildError::MissingName {
                    kind: node.kind().to_string(),
                    text: node.text(),
                })?;
            if index.insert(name.clone(), declarations.len()).is_some() {
                return Err(BuildError::DuplicateType { name });
            }
            declarations.push(Declaration { name, node });
        }

        tracing::debug!(types = declarations.len(), "discovered type declarations");
        Ok(Self {
            declarations,
            index,
            resolved: HashMap::new(),
            stack: Vec::new(),
        })
    }

    /// Declared names in discovery order.
    pub fn names(&self) -> Vec<&str> {
        self.declarations.iter().map(|d| d.name.as_str()).collect()
    }

    /// Resolve every declaration and assemble the table.
    pub fn build(mut self) -> Result<TypeTable, BuildError> {
        let names: Vec<String> = self.declarations.iter().map(|d| d.name.clone()).collect();
        let mut types = Vec::with_capacity(names.len());
        for name in names {
            let body = self.resolve_named(&name)?;
            types.push(Type::new(name, body));
        }
        let table = TypeTable::new(types)?;
        tracing::debug!(types = table.len(), "built type table");
        Ok(table)
    }

    /// Resolve a declared type, from the memo when possible.
    fn resolve_named(&mut self, name: &str) -> Result<PropertyType, BuildError> {
        if let Some(done) = self.resolved.get(name) {
            return Ok(done.clone());
        }
        let Some(&position) = self.index.get(name) else {
            return Err(self.unresolved(name));
        };
        let node = self.declarations[position].node.clone();

        tracing::trace!(name, depth = self.stack.len(), "resolving type");
        self.stack.push(Frame {
            name: name.to_string(),
            shaped: false,
            extending: false,
        });
        let result = match node.kind() {
            SyntaxKind::TypeAliasDeclaration => self.resolve_alias(&node),
            _ => self.resolve_structure(&node),
        };
        self.stack.pop();

        let body = result?;
        self.resolved.insert(name.to_string(), body.clone());
        Ok(body)
    }

    /// `type T = <body>`.
    fn resolve_alias(&mut self, node: &N) -> Result<PropertyType, BuildError> {
        let body = alias_body(node).ok_or_else(|| BuildError::UnsupportedNode {
            kind: node.kind().to_string(),
            text: node.text(),
        })?;

        if let Some(leaf) = classify_leaf(&body) {
            return Ok(leaf);
        }
        match body.kind() {
            SyntaxKind::TypeReference => {
                let target = reference_name(&body);
                self.resolve_target(&target)
            }
            SyntaxKind::ArrayType | SyntaxKind::TypeLiteral => {
                self.mark_shaped();
                property_type(&body, self)?.ok_or_else(|| BuildError::UnsupportedNode {
                    kind: body.kind().to_string(),
                    text: body.text(),
                })
            }
            _ => Err(BuildError::UnsupportedNode {
                kind: body.kind().to_string(),
                text: body.text(),
            }),
        }
    }

    /// Interface or class: ancestors first, then own members.
    fn resolve_structure(&mut self, node: &N) -> Result<PropertyType, BuildError> {
        self.mark_shaped();
        let mut merged: Vec<Property> = Vec::new();

        let ancestors = heritage_names(node);
        if !ancestors.is_empty() {
            self.set_extending(true);
            for ancestor in &ancestors {
                let inherited = self.resolve_ancestor(ancestor)?;
                merge_properties(&mut merged, inherited);
            }
            self.set_extending(false);
        }

        let own = extract_properties(node, self)?;
        merge_properties(&mut merged, own);
        Ok(PropertyType::Object(merged))
    }

    fn resolve_ancestor(&mut self, ancestor: &str) -> Result<Vec<Property>, BuildError> {
        let current = self.current().to_string();
        if !self.index.contains_key(ancestor) {
            return Err(self.unresolved(ancestor));
        }
        // Only a chain made purely of `extends` steps is a cycle. An ancestor
        // reached through a property is resolved again one level deeper.
        if let Some(position) = self.position(ancestor) {
            if self.stack[position..].iter().all(|frame| frame.extending) {
                return Err(BuildError::InvalidHeritage {
                    name: current,
                    ancestor: ancestor.to_string(),
                    reason: "circular inheritance".to_string(),
                });
            }
        }

        match self.resolve_named(ancestor)? {
            PropertyType::Object(properties) => Ok(properties),
            other => Err(BuildError::InvalidHeritage {
                name: current,
                ancestor: ancestor.to_string(),
                reason: format!("'{ancestor}' is {other}, not an object type"),
            }),
        }
    }

    /// A named type met as an alias target or inside a shape.
    fn resolve_target(&mut self, target: &str) -> Result<PropertyType, BuildError> {
        if !self.index.contains_key(target) {
            return Err(self.unresolved(target));
        }
        let Some(position) = self.position(target) else {
            return self.resolve_named(target);
        };

        if self.stack[position..].iter().any(|frame| frame.shaped) {
            tracing::debug!(
                name = self.current(),
                reference = target,
                "keeping named reference at recursion point"
            );
            return Ok(PropertyType::reference(target));
        }

        let mut chain: Vec<String> = self.stack[position..]
            .iter()
            .map(|frame| frame.name.clone())
            .collect();
        chain.push(target.to_string());
        Err(BuildError::CircularAlias {
            name: self.current().to_string(),
            chain,
        })
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.stack.iter().rposition(|frame| frame.name == name)
    }

    fn current(&self) -> &str {
        self.stack.last().map(|frame| frame.name.as_str()).unwrap_or("")
    }

    fn mark_shaped(&mut self) {
        if let Some(frame) = self.stack.last_mut() {
            frame.shaped = true;
        }
    }

    fn set_extending(&mut self, extending: bool) {
        if let Some(frame) = self.stack.last_mut() {
            frame.extending = extending;
        }
    }

    fn unresolved(&self, reference: &str) -> BuildError {
        BuildError::UnresolvedReference {
            name: self.current().to_string(),
            reference: reference.to_string(),
        }
    }
}

impl<N: SyntaxNode> ResolveReference for TypeModelBuilder<N> {
    fn resolve_reference(&mut self, name: &str) -> Result<PropertyType, BuildError> {
        self.mark_shaped();
        self.resolve_target(name)
    }
}

/// Depth-first collection of declarations. Declarations are not searched
/// for nested declarations.
fn collect_declarations<N: SyntaxNode>(node: &N, out: &mut Vec<N>) {
    for child in node.children() {
        if child.is_type_declaration() {
            out.push(child);
        } else {
            collect_declarations(&child, out);
        }
    }
}

/// The body of a type alias: the first type node after its name.
fn alias_body<N: SyntaxNode>(node: &N) -> Option<N> {
    node.children()
        .into_iter()
        .skip_while(|child| child.kind() != SyntaxKind::Identifier)
        .skip(1)
        .find(|child| child.kind().is_type_node())
}

/// Ancestor names from `extends` clauses, in declaration order.
/// `implements` clauses contribute no properties.
///
/// Parsers wrap the clause list in a `SyntaxList`; bare clauses directly
/// under the declaration are accepted too.
fn heritage_names<N: SyntaxNode>(node: &N) -> Vec<String> {
    let mut names = Vec::new();
    let clauses = node.children().into_iter().flat_map(|child| {
        if child.kind() == SyntaxKind::SyntaxList {
            child.children()
        } else {
            vec![child]
        }
    });
    for clause in clauses {
        if clause.kind() != SyntaxKind::HeritageClause {
            continue;
        }
        let is_implements = clause
            .children()
            .first()
            .is_some_and(|keyword| keyword.text().trim() == "implements");
        if !is_implements {
            collect_heritage_expressions(&clause, &mut names);
        }
    }
    names
}

fn collect_heritage_expressions<N: SyntaxNode>(node: &N, out: &mut Vec<String>) {
    for child in node.children() {
        if child.kind() == SyntaxKind::ExpressionWithTypeArguments {
            out.push(reference_name(&child));
        } else {
            collect_heritage_expressions(&child, out);
        }
    }
}

/// Append `incoming` to `acc`. A property whose name is already present
/// replaces the earlier one in place.
fn merge_properties(acc: &mut Vec<Property>, incoming: Vec<Property>) {
    for property in incoming {
        match acc.iter_mut().find(|existing| existing.name == property.name) {
            Some(slot) => *slot = property,
            None => acc.push(property),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;
    use tsv_core::PropertyKeyword;

    fn kw(text: &str) -> Node {
        Node::parse_keyword(text).unwrap()
    }

    fn build_all(statements: Vec<Node>) -> Result<TypeTable, BuildError> {
        let root = Node::source_file(statements);
        build(&&root)
    }

    #[test]
    fn discovery_order_is_table_order() {
        let table = build_all(vec![
            Node::type_alias("B", kw("string")),
            Node::interface("A", &[], vec![]),
            Node::class("C", None, vec![]),
        ])
        .unwrap();
        assert_eq!(table.names(), vec!["B", "A", "C"]);
    }

    #[test]
    fn discovery_descends_into_containers() {
        let root = Node::source_file(vec![Node::new(
            SyntaxKind::Token,
            "namespace N { ... }",
            vec![Node::list(vec![Node::interface("Inner", &[], vec![])])],
        )]);
        let builder = TypeModelBuilder::discover(&&root).unwrap();
        assert_eq!(builder.names(), vec!["Inner"]);
    }

    #[test]
    fn root_declaration_is_discovered() {
        let root = Node::type_alias("Solo", kw("number"));
        let table = build(&&root).unwrap();
        assert_eq!(table.get("Solo").unwrap().keyword(), Some(PropertyKeyword::Number));
    }

    #[test]
    fn nameless_declaration_fails() {
        let decl = Node::new(
            SyntaxKind::InterfaceDeclaration,
            "interface { }",
            vec![Node::token("interface"), Node::token("{"), Node::token("}")],
        );
        let err = build_all(vec![decl]).unwrap_err();
        assert!(matches!(err, BuildError::MissingName { ref kind, .. } if kind == "InterfaceDeclaration"));
    }

    #[test]
    fn duplicate_names_fail() {
        let err = build_all(vec![
            Node::interface("T", &[], vec![]),
            Node::type_alias("T", kw("string")),
        ])
        .unwrap_err();
        assert_eq!(err, BuildError::DuplicateType { name: "T".to_string() });
    }

    #[test]
    fn alias_chain_adopts_structure() {
        let table = build_all(vec![
            Node::type_alias("B", Node::type_ref("A")),
            Node::interface("A", &[], vec![Node::property("x", kw("string"))]),
        ])
        .unwrap();
        assert_eq!(table.get("B").unwrap().properties, table.get("A").unwrap().properties);
    }

    #[test]
    fn keyword_alias_collapses() {
        let table = build_all(vec![
            Node::type_alias("Id", Node::type_ref("Raw")),
            Node::type_alias("Raw", kw("number")),
            Node::interface("Holder", &[], vec![Node::property("id", Node::type_ref("Id"))]),
        ])
        .unwrap();
        assert_eq!(table.get("Id").unwrap().keyword(), Some(PropertyKeyword::Number));
        assert_eq!(
            table.get("Holder").unwrap().property("id").unwrap().ty,
            PropertyType::Keyword(PropertyKeyword::Number)
        );
    }

    #[test]
    fn array_and_never_aliases() {
        let table = build_all(vec![
            Node::type_alias("Names", Node::array_of(kw("string"))),
            Node::type_alias("Nothing", kw("never")),
        ])
        .unwrap();
        assert_eq!(
            table.get("Names").unwrap().properties,
            PropertyType::array_of(PropertyKeyword::String.into())
        );
        assert_eq!(table.get("Nothing").unwrap().properties, PropertyType::Never);
    }

    #[test]
    fn self_reference_becomes_named_reference() {
        let table = build_all(vec![Node::interface(
            "T1",
            &[],
            vec![
                Node::property("x", kw("number")),
                Node::property("self", Node::type_ref("T1")),
                Node::property("children", Node::array_of(Node::type_ref("T1"))),
            ],
        )])
        .unwrap();
        let ty = table.get("T1").unwrap();
        assert_eq!(ty.property("self").unwrap().ty, PropertyType::reference("T1"));
        assert_eq!(
            ty.property("children").unwrap().ty,
            PropertyType::array_of(PropertyType::reference("T1"))
        );
    }

    #[test]
    fn mutual_recursion_keeps_one_reference() {
        let table = build_all(vec![
            Node::interface("A", &[], vec![Node::property("b", Node::type_ref("B"))]),
            Node::interface("B", &[], vec![Node::property("a", Node::type_ref("A"))]),
        ])
        .unwrap();
        assert_eq!(
            table.get("A").unwrap().properties,
            PropertyType::Object(vec![Property::new(
                "b",
                PropertyType::Object(vec![Property::new("a", PropertyType::reference("A"))]),
            )])
        );
        assert_eq!(
            table.get("A").unwrap().properties.references(),
            vec!["A"]
        );
    }

    #[test]
    fn non_recursive_reference_is_inlined() {
        let table = build_all(vec![
            Node::interface("Outer", &[], vec![Node::property("inner", Node::type_ref("Inner"))]),
            Node::interface("Inner", &[], vec![Node::property("x", kw("boolean"))]),
        ])
        .unwrap();
        assert!(table.get("Outer").unwrap().properties.references().is_empty());
    }

    #[test]
    fn circular_alias_fails() {
        let err = build_all(vec![
            Node::type_alias("A", Node::type_ref("B")),
            Node::type_alias("B", Node::type_ref("A")),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            BuildError::CircularAlias {
                name: "B".to_string(),
                chain: vec!["A".to_string(), "B".to_string(), "A".to_string()],
            }
        );
    }

    #[test]
    fn alias_recursion_through_array_is_allowed() {
        let table = build_all(vec![
            Node::type_alias("A", Node::array_of(Node::type_ref("B"))),
            Node::type_alias("B", Node::type_ref("A")),
        ])
        .unwrap();
        assert_eq!(
            table.get("A").unwrap().properties,
            PropertyType::array_of(PropertyType::reference("A"))
        );
        assert_eq!(table.get("B").unwrap().properties, PropertyType::reference("A"));
    }

    #[test]
    fn dangling_reference_fails() {
        let err = build_all(vec![Node::interface(
            "A",
            &[],
            vec![Node::property("b", Node::type_ref("Missing"))],
        )])
        .unwrap_err();
        assert_eq!(
            err,
            BuildError::UnresolvedReference {
                name: "A".to_string(),
                reference: "Missing".to_string(),
            }
        );
    }

    #[test]
    fn inheritance_merges_left_to_right_with_override() {
        let table = build_all(vec![
            Node::interface(
                "Left",
                &[],
                vec![Node::property("a", kw("string")), Node::property("shared", kw("string"))],
            ),
            Node::interface(
                "Right",
                &[],
                vec![Node::property("shared", kw("number")), Node::property("b", kw("boolean"))],
            ),
            Node::interface(
                "Child",
                &["Left", "Right"],
                vec![Node::property("a", kw("any")), Node::property("c", kw("null"))],
            ),
        ])
        .unwrap();
        let child = table.get("Child").unwrap();
        assert_eq!(child.property_names(), vec!["a", "shared", "b", "c"]);
        assert_eq!(child.property("a").unwrap().ty, PropertyKeyword::Any.into());
        assert_eq!(child.property("shared").unwrap().ty, PropertyKeyword::Number.into());
    }

    #[test]
    fn class_inherits_from_class() {
        let table = build_all(vec![
            Node::class("Base", None, vec![Node::property_declaration("id", kw("number"))]),
            Node::class(
                "Derived",
                Some("Base"),
                vec![Node::method("run"), Node::property_declaration("name", kw("string"))],
            ),
        ])
        .unwrap();
        assert_eq!(table.get("Derived").unwrap().property_names(), vec!["id", "name"]);
    }

    #[test]
    fn heritage_clause_found_directly_or_in_syntax_list() {
        let base = Node::interface("Base", &[], vec![Node::property("id", kw("number"))]);
        let bare = Node::new(
            SyntaxKind::InterfaceDeclaration,
            "interface Bare extends Base {}",
            vec![
                Node::token("interface"),
                Node::identifier("Bare"),
                Node::heritage_clause(&["Base"]),
                Node::token("{"),
                Node::list(vec![]),
                Node::token("}"),
            ],
        );
        let wrapped = Node::interface("Wrapped", &["Base"], vec![]);

        let table = build_all(vec![base, bare, wrapped]).unwrap();
        assert_eq!(table.get("Bare").unwrap().property_names(), vec!["id"]);
        assert_eq!(table.get("Wrapped").unwrap().property_names(), vec!["id"]);
    }

    #[test]
    fn implements_clause_contributes_nothing() {
        let contract = Node::interface("Contract", &[], vec![Node::property("id", kw("number"))]);
        let implements = Node::new(
            SyntaxKind::HeritageClause,
            "implements Contract",
            vec![
                Node::token("implements"),
                Node::list(vec![Node::new(
                    SyntaxKind::ExpressionWithTypeArguments,
                    "Contract",
                    vec![Node::identifier("Contract")],
                )]),
            ],
        );
        let class = Node::new(
            SyntaxKind::ClassDeclaration,
            "class Impl implements Contract { name: string; }",
            vec![
                Node::token("class"),
                Node::identifier("Impl"),
                Node::list(vec![implements]),
                Node::token("{"),
                Node::list(vec![Node::property_declaration("name", kw("string"))]),
                Node::token("}"),
            ],
        );

        let table = build_all(vec![contract, class]).unwrap();
        assert_eq!(table.get("Impl").unwrap().property_names(), vec!["name"]);
    }

    #[test]
    fn heritage_cycle_fails() {
        let err = build_all(vec![
            Node::interface("A", &["B"], vec![]),
            Node::interface("B", &["A"], vec![]),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            BuildError::InvalidHeritage { ref name, ref ancestor, .. } if name == "B" && ancestor == "A"
        ));
    }

    #[test]
    fn extending_a_keyword_alias_fails() {
        let err = build_all(vec![
            Node::type_alias("S", kw("string")),
            Node::interface("I", &["S"], vec![]),
        ])
        .unwrap_err();
        assert!(matches!(err, BuildError::InvalidHeritage { ref ancestor, .. } if ancestor == "S"));
    }

    #[test]
    fn ancestor_referring_to_descendant_is_resolved() {
        let table = build_all(vec![
            Node::interface("Parent", &[], vec![Node::property("child", Node::type_ref("Child"))]),
            Node::interface("Child", &["Parent"], vec![Node::property("x", kw("number"))]),
        ])
        .unwrap();
        let child = table.get("Child").unwrap();
        assert_eq!(child.property_names(), vec!["child", "x"]);
        assert_eq!(
            child.property("child").unwrap().ty,
            PropertyType::reference("Child")
        );
    }

    #[test]
    fn union_alias_fails() {
        let err = build_all(vec![Node::type_alias(
            "U",
            Node::union(vec![kw("string"), kw("number")]),
        )])
        .unwrap_err();
        assert!(matches!(err, BuildError::UnsupportedNode { .. }));
    }
}
