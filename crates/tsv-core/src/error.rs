//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types used throughout tsv. All errors use `thiserror`
//! for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! Three classes of failure are kept apart:
//!
//! - **Build-time errors** (`BuildError`): a declaration the builder cannot
//!   interpret. These abort the whole build and describe the offending syntax.
//! - **Configuration errors** (`ConfigError`): the validator was handed a type
//!   that does not close over the supplied table. Programmer error.
//! - **Data-conformance violations** are not errors at all; the validator
//!   returns them as data (see `tsv-validate`).

use thiserror::Error;

/// Top-level error type for tsv.
#[derive(Error, Debug)]
pub enum TsvError {
    /// The type model could not be built.
    #[error("build error: {0}")]
    Build(#[from] BuildError),

    /// A type or type table is malformed for validation.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A keyword name did not match any `PropertyKeyword`.
    #[error("unknown property keyword: {0:?}")]
    UnknownKeyword(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error raised while building a type table from declarations.
///
/// `kind` fields carry the syntax kind name of the offending node and `text`
/// its source text, so the message points at the declaration to fix.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// A node shape that cannot appear in a property list (union,
    /// intersection, function type).
    #[error("node {kind} is not supported in a property list: {text}")]
    UnsupportedNode {
        /// Syntax kind of the node.
        kind: String,
        /// Source text of the node.
        text: String,
    },

    /// A property node without a leading name, or without any child that
    /// classifies into a usable property type.
    #[error("invalid property: {text} ({kind})")]
    InvalidProperty {
        /// Syntax kind of the property node.
        kind: String,
        /// Source text of the property node.
        text: String,
    },

    /// A type declaration with no identifier anywhere beneath it.
    #[error("cannot find the name of {kind} declaration: {text}")]
    MissingName {
        /// Syntax kind of the declaration.
        kind: String,
        /// Source text of the declaration.
        text: String,
    },

    /// A type reference to a name that is not declared in the source unit.
    #[error("type '{name}' references unknown type '{reference}'")]
    UnresolvedReference {
        /// Type in which the reference appears.
        name: String,
        /// The name that could not be found.
        reference: String,
    },

    /// A chain of aliases that never reaches a structure.
    #[error("type alias '{name}' is circular: {}", chain.join(" -> "))]
    CircularAlias {
        /// The alias being resolved when the cycle closed.
        name: String,
        /// The aliases visited, in resolution order.
        chain: Vec<String>,
    },

    /// An `extends` clause that cannot be flattened.
    #[error("type '{name}' cannot extend '{ancestor}': {reason}")]
    InvalidHeritage {
        /// The extending type.
        name: String,
        /// The ancestor named in the clause.
        ancestor: String,
        /// Why the ancestor cannot be merged.
        reason: String,
    },

    /// Two declarations share a name.
    #[error("type '{name}' is declared more than once")]
    DuplicateType {
        /// The duplicated name.
        name: String,
    },
}

/// Error raised when a type cannot be used for validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A `PropertyType::Reference` names a type the table does not contain.
    #[error("reference to type '{reference}' cannot be resolved against the type table")]
    UnresolvedReference {
        /// The dangling reference.
        reference: String,
    },

    /// A type was requested by name and the table does not contain it.
    #[error("type '{name}' is not defined in the type table")]
    UnknownType {
        /// The requested name.
        name: String,
    },
}
