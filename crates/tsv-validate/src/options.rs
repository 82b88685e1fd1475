//! Validation options.

use serde::{Deserialize, Serialize};

/// Options controlling a validation run.
///
/// Has no `Default`. The null policy is always chosen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationOptions {
    /// When `true`, `null` and `undefined` are only accepted where the
    /// declared type is `null`, `undefined` or `any`. When `false`, they are
    /// accepted everywhere except `never`.
    pub strict_null_checks: bool,
}

impl ValidationOptions {
    pub const fn new(strict_null_checks: bool) -> Self {
        Self { strict_null_checks }
    }

    /// `strict_null_checks = true`.
    pub const fn strict() -> Self {
        Self::new(true)
    }

    /// `strict_null_checks = false`.
    pub const fn lenient() -> Self {
        Self::new(false)
    }
}
