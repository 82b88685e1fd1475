//! # tsv-model — Type Model Builder
//!
//! Turns declarations in a parsed syntax tree into a [`TypeTable`]: every
//! interface, class and type alias of a source unit, with aliases
//! substituted, inheritance flattened and recursion expressed through
//! named references.
//!
//! ## Layers
//!
//! - [`syntax`] — the capability surface the builder needs from a parser:
//!   [`SyntaxKind`] and the [`SyntaxNode`] trait.
//! - [`node`] — an owned [`Node`] tree that can be loaded from a JSON
//!   parser dump or assembled with constructor helpers.
//! - [`classify`] — maps leaf type nodes to primitive keywords or `never`.
//! - [`extract`] — property lists of declaration bodies and type literals.
//! - [`builder`] — discovery, memoized resolution and the final table.
//!
//! ## Crate Policy
//!
//! - Depends only on `tsv-core` internally.
//! - The builder never assumes a concrete parser: everything goes through
//!   [`SyntaxNode`].
//! - Builds fail fast with a [`BuildError`] naming the offending syntax.
//!
//! [`TypeTable`]: tsv_core::TypeTable
//! [`BuildError`]: tsv_core::BuildError

pub mod builder;
pub mod classify;
pub mod extract;
pub mod node;
pub mod syntax;

pub use builder::{build, TypeModelBuilder};
pub use classify::classify_leaf;
pub use extract::{extract_properties, property_type, ResolveReference};
pub use node::Node;
pub use syntax::{SyntaxKind, SyntaxNode};
