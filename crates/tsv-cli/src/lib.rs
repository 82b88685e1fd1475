//! # tsv-cli — Command-Line Interface
//!
//! Provides the `tsv` binary.
//!
//! ## Subcommands
//!
//! - `tsv build` — compile a JSON syntax-tree dump into a type table.
//! - `tsv check` — validate JSON/YAML documents against a named type.
//!
//! ```bash
//! tsv build tree.json --out types.json
//! tsv check --types types.json --type Order --strict-null-checks true order.yaml
//! ```
//!
//! ## Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | success; every document conforms |
//! | 1 | at least one document has violations |
//! | 2 | operational error (unreadable input, build failure, unknown type) |

pub mod build;
pub mod check;
pub mod document;

/// Every input conforms.
pub const EXIT_OK: u8 = 0;
/// At least one document has violations.
pub const EXIT_VIOLATIONS: u8 = 1;
/// Inputs could not be loaded or interpreted.
pub const EXIT_ERROR: u8 = 2;
