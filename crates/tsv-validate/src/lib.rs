//! # tsv-validate — Structural Validation
//!
//! Checks a runtime [`Value`] against a [`Type`] from a [`TypeTable`] and
//! reports every violation, each addressed by a path from the root of the
//! value (`$value.x.y[1]["the z"]`).
//!
//! ## Behaviour
//!
//! - Validation never stops at the first failure: independent failures are
//!   all reported, in walk order.
//! - A structurally wrong value is not an error. `Err` is reserved for a
//!   type that does not close over the supplied table.
//! - Self-referential types and self-referential values terminate through a
//!   path-scoped cycle guard.
//! - Null handling is an explicit [`ValidationOptions`] input.
//!
//! ## Crate Policy
//!
//! - Depends only on `tsv-core` internally.
//! - Types and values are never mutated; nothing is retained between calls.
//!
//! [`Value`]: tsv_core::Value
//! [`Type`]: tsv_core::Type
//! [`TypeTable`]: tsv_core::TypeTable

pub mod options;
pub mod path;
pub mod report;
pub mod validate;

pub use options::ValidationOptions;
pub use path::{PathSegment, ValuePath, ROOT_MARKER};
pub use report::{ValidationError, Violations};
pub use validate::{validate, Validator};
