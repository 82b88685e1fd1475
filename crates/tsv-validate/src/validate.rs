//! # Validator Engine
//!
//! A depth-first walk of a value alongside its declared type. At each
//! position the declared `PropertyType` decides what is checked:
//!
//! - `Never` rejects every value, whatever the null policy.
//! - Under `strict_null_checks = false` a `null` or `undefined` value is
//!   accepted at any other position.
//! - `Keyword` checks the primitive kind; `any` accepts everything.
//! - `Object` requires a non-array object and checks every declared
//!   property. Absent fields read as `undefined`. Optional properties that
//!   are absent or `undefined` are skipped.
//! - `Array` requires an array and checks every element.
//! - `Reference` is looked up in the table and checked under the cycle
//!   guard.
//!
//! ## Cycle Guard
//!
//! The guard holds the `(value identity, type body identity)` pairs active
//! on the current path. Entering a named type with an object or array pushes
//! the pair; meeting a pair that is already active means the same value is
//! being checked against the same type further up the path, which counts as
//! valid. Pairs are removed on the way back up, so a value shared by two
//! siblings is checked under both.
//!
//! Bodies are compared by address, not by name: a top-level type passed to
//! [`validate`] may share its name with a different type in the table.

use std::collections::HashSet;

use tsv_core::{ConfigError, PropertyKeyword, PropertyType, Type, TypeTable, Value, ValueId};

use crate::options::ValidationOptions;
use crate::path::{PathSegment, ValuePath};
use crate::report::{ValidationError, Violations};

/// Validate `value` against `ty`, resolving references in `table`.
///
/// Returns every violation found; an empty result means the value
/// conforms.
///
/// # Errors
///
/// `ConfigError::UnresolvedReference` when `ty` mentions a type that
/// `table` does not contain.
pub fn validate(
    value: &Value,
    ty: &Type,
    table: &TypeTable,
    options: &ValidationOptions,
) -> Result<Violations, ConfigError> {
    if let Some(missing) = ty
        .properties
        .references()
        .into_iter()
        .find(|reference| !table.contains(reference))
    {
        return Err(ConfigError::UnresolvedReference {
            reference: missing.to_string(),
        });
    }

    let mut walk = Walk::new(table, *options);
    walk.check_named(value, &ty.name, &ty.properties)?;
    let violations = Violations::new(walk.errors);

    tracing::debug!(
        ty = %ty.name,
        strict_null_checks = options.strict_null_checks,
        violations = violations.len(),
        "validated value"
    );
    Ok(violations)
}

/// A reusable validator bound to one type table.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'t> {
    table: &'t TypeTable,
    options: ValidationOptions,
}

impl<'t> Validator<'t> {
    pub fn new(table: &'t TypeTable, options: ValidationOptions) -> Self {
        Self { table, options }
    }

    pub fn table(&self) -> &'t TypeTable {
        self.table
    }

    pub fn options(&self) -> ValidationOptions {
        self.options
    }

    /// Validate against a type, which need not be a member of the table.
    pub fn validate(&self, value: &Value, ty: &Type) -> Result<Violations, ConfigError> {
        validate(value, ty, self.table, &self.options)
    }

    /// Validate against the table's type called `name`.
    ///
    /// # Errors
    ///
    /// `ConfigError::UnknownType` if the table has no such type.
    pub fn validate_named(&self, value: &Value, name: &str) -> Result<Violations, ConfigError> {
        let ty = self.table.get(name).ok_or_else(|| ConfigError::UnknownType {
            name: name.to_string(),
        })?;
        self.validate(value, ty)
    }
}

/// State of one validation call.
struct Walk<'a> {
    table: &'a TypeTable,
    options: ValidationOptions,
    path: ValuePath,
    active: HashSet<(ValueId, *const PropertyType)>,
    errors: Vec<ValidationError>,
}

impl<'a> Walk<'a> {
    fn new(table: &'a TypeTable, options: ValidationOptions) -> Self {
        Self {
            table,
            options,
            path: ValuePath::new(),
            active: HashSet::new(),
            errors: Vec::new(),
        }
    }

    /// Enter the named type `name` with body `body` at the current path.
    fn check_named(
        &mut self,
        value: &Value,
        name: &'a str,
        body: &'a PropertyType,
    ) -> Result<(), ConfigError> {
        let key = value.id().map(|id| (id, body as *const PropertyType));
        if let Some(key) = key {
            if !self.active.insert(key) {
                tracing::trace!(path = %self.path, ty = name, "cycle guard hit");
                return Ok(());
            }
        }

        let result = self.check(value, body);

        if let Some(key) = key {
            self.active.remove(&key);
        }
        result
    }

    fn check(&mut self, value: &Value, ty: &'a PropertyType) -> Result<(), ConfigError> {
        if value.is_nullish()
            && !self.options.strict_null_checks
            && !matches!(ty, PropertyType::Never)
        {
            return Ok(());
        }

        match ty {
            PropertyType::Never => {
                self.fail(format!("expected never, got {}", value.kind_name()));
            }
            PropertyType::Keyword(keyword) => {
                if !keyword_accepts(*keyword, value) {
                    self.mismatch(ty, value);
                }
            }
            PropertyType::Object(properties) => {
                let Some(object) = value.as_object() else {
                    self.mismatch(ty, value);
                    return Ok(());
                };
                for property in properties {
                    let field = object.get(&property.name);
                    if property.optional && matches!(field, Value::Undefined) {
                        continue;
                    }
                    self.path.push(PathSegment::Property(property.name.clone()));
                    let result = self.check(&field, &property.ty);
                    self.path.pop();
                    result?;
                }
            }
            PropertyType::Array(element) => {
                let Some(array) = value.as_array() else {
                    self.mismatch(ty, value);
                    return Ok(());
                };
                for index in 0..array.len() {
                    let item = array.get(index);
                    self.path.push(PathSegment::Index(index));
                    let result = self.check(&item, element);
                    self.path.pop();
                    result?;
                }
            }
            PropertyType::Reference(name) => {
                let target = self.table.get(name).ok_or_else(|| ConfigError::UnresolvedReference {
                    reference: name.clone(),
                })?;
                self.check_named(value, &target.name, &target.properties)?;
            }
        }
        Ok(())
    }

    fn mismatch(&mut self, expected: &PropertyType, value: &Value) {
        self.fail(format!("expected {expected}, got {}", value.kind_name()));
    }

    fn fail(&mut self, message: String) {
        self.errors.push(ValidationError {
            property: self.path.to_string(),
            message,
        });
    }
}

fn keyword_accepts(keyword: PropertyKeyword, value: &Value) -> bool {
    match keyword {
        PropertyKeyword::String => matches!(value, Value::String(_)),
        PropertyKeyword::Number => matches!(value, Value::Number(_)),
        PropertyKeyword::Boolean => matches!(value, Value::Bool(_)),
        PropertyKeyword::Any => true,
        PropertyKeyword::Null => matches!(value, Value::Null),
        PropertyKeyword::Undefined => matches!(value, Value::Undefined),
    }
}
