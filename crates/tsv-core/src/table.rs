//! # Type Table — The Closed Set of Named Types
//!
//! A `TypeTable` is the output of one build: every named type of a source
//! unit, in discovery order, keyed by name.
//!
//! ## Invariants
//!
//! - Names are unique.
//! - Every `PropertyType::Reference` inside any type names a type in the
//!   same table.
//!
//! Both are checked by `TypeTable::new()`, the only constructor (serde
//! deserialization goes through it too). A table is immutable afterwards
//! and can be shared freely across threads.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{BuildError, TsvError};
use crate::model::Type;

/// An immutable, reference-closed collection of named types.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Type>", into = "Vec<Type>")]
pub struct TypeTable {
    types: IndexMap<String, Type>,
}

impl TypeTable {
    /// Build a table from types in discovery order.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::DuplicateType` if two types share a name, and
    /// `BuildError::UnresolvedReference` if any reference names a type not
    /// in `types`.
    pub fn new(types: Vec<Type>) -> Result<Self, BuildError> {
        let mut map = IndexMap::with_capacity(types.len());
        for ty in types {
            if map.contains_key(&ty.name) {
                return Err(BuildError::DuplicateType { name: ty.name });
            }
            map.insert(ty.name.clone(), ty);
        }

        for ty in map.values() {
            if let Some(missing) = ty
                .properties
                .references()
                .into_iter()
                .find(|reference| !map.contains_key(*reference))
            {
                return Err(BuildError::UnresolvedReference {
                    name: ty.name.clone(),
                    reference: missing.to_string(),
                });
            }
        }

        Ok(Self { types: map })
    }

    /// Look up a type by name.
    pub fn get(&self, name: &str) -> Option<&Type> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Types in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &Type> {
        self.types.values()
    }

    /// Type names in discovery order.
    pub fn names(&self) -> Vec<&str> {
        self.types.keys().map(|s| s.as_str()).collect()
    }

    /// Consumes the table and returns the types in discovery order.
    pub fn into_types(self) -> Vec<Type> {
        self.types.into_values().collect()
    }

    /// Parse a table from its JSON list form. The invariants are checked
    /// as in `new()`.
    pub fn from_json(json: &str) -> Result<Self, TsvError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON table file.
    pub fn from_path(path: &Path) -> Result<Self, TsvError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Pretty-printed JSON list form.
    pub fn to_json_pretty(&self) -> Result<String, TsvError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl TryFrom<Vec<Type>> for TypeTable {
    type Error = BuildError;

    fn try_from(types: Vec<Type>) -> Result<Self, Self::Error> {
        Self::new(types)
    }
}

impl From<TypeTable> for Vec<Type> {
    fn from(table: TypeTable) -> Self {
        table.into_types()
    }
}

impl<'a> IntoIterator for &'a TypeTable {
    type Item = &'a Type;
    type IntoIter = indexmap::map::Values<'a, String, Type>;

    fn into_iter(self) -> Self::IntoIter {
        self.types.values()
    }
}
