//! # Property Keywords — Primitive Leaf Constraints
//!
//! Defines `PropertyKeyword`, the closed set of primitive kinds a declared
//! type can name directly. Every `match` on it must be exhaustive.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::TsvError;

/// A primitive leaf constraint.
///
/// | Keyword | Accepts |
/// |---------|---------|
/// | `string` | string values |
/// | `number` | number values |
/// | `boolean` | boolean values |
/// | `any` | every value, including `null` and `undefined` |
/// | `null` | exactly `null` |
/// | `undefined` | exactly `undefined` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKeyword {
    String,
    Number,
    Boolean,
    Any,
    Null,
    Undefined,
}

/// Total number of property keywords.
pub const PROPERTY_KEYWORD_COUNT: usize = 6;

impl PropertyKeyword {
    /// Returns all keywords in canonical order.
    pub fn all() -> &'static [PropertyKeyword] {
        &[
            Self::String,
            Self::Number,
            Self::Boolean,
            Self::Any,
            Self::Null,
            Self::Undefined,
        ]
    }

    /// Returns the keyword as written in source.
    ///
    /// This must match the serde serialization format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Any => "any",
            Self::Null => "null",
            Self::Undefined => "undefined",
        }
    }
}

impl std::fmt::Display for PropertyKeyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyKeyword {
    type Err = TsvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(Self::String),
            "number" => Ok(Self::Number),
            "boolean" => Ok(Self::Boolean),
            "any" => Ok(Self::Any),
            "null" => Ok(Self::Null),
            "undefined" => Ok(Self::Undefined),
            other => Err(TsvError::UnknownKeyword(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_count() {
        assert_eq!(PropertyKeyword::all().len(), PROPERTY_KEYWORD_COUNT);
    }

    #[test]
    fn test_as_str_roundtrip() {
        for keyword in PropertyKeyword::all() {
            let parsed: PropertyKeyword = keyword.as_str().parse().unwrap();
            assert_eq!(*keyword, parsed);
        }
    }

    #[test]
    fn test_from_str_invalid() {
        assert!("String".parse::<PropertyKeyword>().is_err());
        assert!("never".parse::<PropertyKeyword>().is_err());
        assert!("".parse::<PropertyKeyword>().is_err());
    }

    #[test]
    fn test_serde_format_matches_as_str() {
        for keyword in PropertyKeyword::all() {
            let json = serde_json::to_string(keyword).unwrap();
            assert_eq!(json, format!("\"{}\"", keyword.as_str()));
        }
    }
}
