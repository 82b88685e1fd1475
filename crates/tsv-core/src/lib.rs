//! # tsv-core — Foundational Types for tsv
//!
//! This crate is the leaf of the tsv workspace. It defines the data model
//! that the type model builder (`tsv-model`) produces and the validator
//! engine (`tsv-validate`) consumes, plus the runtime value model the
//! validator inspects.
//!
//! ## Key Design Principles
//!
//! 1. **Closed sum types for type shapes.** `PropertyType` has exactly five
//!    variants (keyword, object, reference, array, never). Every consumer
//!    matches exhaustively; adding a shape forces every site to handle it.
//!
//! 2. **Reference-by-name for recursion.** Self- and mutually-referential
//!    declarations are expressed as `PropertyType::Reference(name)` into an
//!    immutable `TypeTable`, never as owned cycles.
//!
//! 3. **Closed tables.** `TypeTable::new()` is the only constructor and it
//!    rejects duplicate names and dangling references, so a table in hand is
//!    always self-contained.
//!
//! 4. **Identity-bearing runtime values.** Arrays and objects in `Value` are
//!    shared handles, so runtime data may contain cycles and the validator
//!    can tell two handles apart by identity.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `tsv-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod keyword;
pub mod model;
pub mod table;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use error::{BuildError, ConfigError, TsvError};
pub use keyword::{PropertyKeyword, PROPERTY_KEYWORD_COUNT};
pub use model::{Property, PropertyType, Type};
pub use table::TypeTable;
pub use value::{ArrayRef, ObjectMap, ObjectRef, Value, ValueId};
