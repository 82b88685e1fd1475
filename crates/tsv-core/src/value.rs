//! # Runtime Values
//!
//! The value model the validator inspects. It mirrors the dynamic values a
//! program receives from outside: JSON-like data plus the distinction between
//! `null` and `undefined`.
//!
//! ## Identity and Cycles
//!
//! Arrays and objects are shared handles (`Rc<RefCell<..>>`). Cloning a
//! `Value` clones the handle, not the contents, so a value can contain
//! itself:
//!
//! ```
//! use tsv_core::{ObjectRef, Value};
//!
//! let subject = ObjectRef::new();
//! subject.insert("x", subject.clone());
//! assert_eq!(subject.get("x").id(), Some(subject.id()));
//! ```
//!
//! `ValueId` is the identity of a handle. The validator's cycle guard keys on
//! it. Cyclic values are never freed (reference counting); that is accepted
//! for the short-lived values this crate is used with.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use indexmap::IndexMap;

/// Insertion-ordered object fields.
pub type ObjectMap = IndexMap<String, Value>;

/// Identity of an array or object handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValueId(usize);

/// A runtime value.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(ArrayRef),
    Object(ObjectRef),
}

impl Value {
    /// Build an object value from key/value pairs.
    pub fn object<K, V, I>(fields: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let object = ObjectRef::new();
        for (k, v) in fields {
            object.insert(k, v);
        }
        Self::Object(object)
    }

    /// Build an array value from elements.
    pub fn array<V, I>(elements: I) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        Self::Array(ArrayRef::from_vec(
            elements.into_iter().map(Into::into).collect(),
        ))
    }

    /// `true` for `null` and `undefined`.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Self::Null | Self::Undefined)
    }

    /// Name of the runtime kind, used in violation messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }

    /// Handle identity for arrays and objects; `None` for primitives.
    pub fn id(&self) -> Option<ValueId> {
        match self {
            Self::Array(array) => Some(array.id()),
            Self::Object(object) => Some(object.id()),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayRef> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }
}

/// Shallow: nested handles print as their identity, so cyclic values can be
/// formatted.
impl std::fmt::Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Undefined => f.write_str("Undefined"),
            Self::Null => f.write_str("Null"),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Self::String(s) => f.debug_tuple("String").field(s).finish(),
            Self::Array(array) => std::fmt::Debug::fmt(array, f),
            Self::Object(object) => std::fmt::Debug::fmt(object, f),
        }
    }
}

/// A shared, mutable object handle.
#[derive(Clone, Default)]
pub struct ObjectRef(Rc<RefCell<ObjectMap>>);

impl ObjectRef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(map: ObjectMap) -> Self {
        Self(Rc::new(RefCell::new(map)))
    }

    pub fn id(&self) -> ValueId {
        ValueId(Rc::as_ptr(&self.0) as *const () as usize)
    }

    /// Set a field, returning the previous value if there was one.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.borrow_mut().insert(key.into(), value.into())
    }

    /// Read a field. Absent fields read as `Value::Undefined`.
    pub fn get(&self, key: &str) -> Value {
        self.0.borrow().get(key).cloned().unwrap_or_default()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.borrow().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Borrow the fields. Panics if the object is being mutated.
    pub fn borrow(&self) -> Ref<'_, ObjectMap> {
        self.0.borrow()
    }
}

impl std::fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keys: Vec<String> = self.0.borrow().keys().cloned().collect();
        f.debug_struct("Object")
            .field("id", &self.id())
            .field("keys", &keys)
            .finish()
    }
}

/// A shared, mutable array handle.
#[derive(Clone, Default)]
pub struct ArrayRef(Rc<RefCell<Vec<Value>>>);

impl ArrayRef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(elements: Vec<Value>) -> Self {
        Self(Rc::new(RefCell::new(elements)))
    }

    pub fn id(&self) -> ValueId {
        ValueId(Rc::as_ptr(&self.0) as *const () as usize)
    }

    pub fn push(&self, value: impl Into<Value>) {
        self.0.borrow_mut().push(value.into());
    }

    /// Read an element. Out-of-range indices read as `Value::Undefined`.
    pub fn get(&self, index: usize) -> Value {
        self.0.borrow().get(index).cloned().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Borrow the elements. Panics if the array is being mutated.
    pub fn borrow(&self) -> Ref<'_, Vec<Value>> {
        self.0.borrow()
    }
}

impl std::fmt::Debug for ArrayRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Array")
            .field("id", &self.id())
            .field("len", &self.len())
            .finish()
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<ObjectRef> for Value {
    fn from(object: ObjectRef) -> Self {
        Self::Object(object)
    }
}

impl From<ArrayRef> for Value {
    fn from(array: ArrayRef) -> Self {
        Self::Array(array)
    }
}

impl From<Vec<Value>> for Value {
    fn from(elements: Vec<Value>) -> Self {
        Self::Array(ArrayRef::from_vec(elements))
    }
}

/// JSON has no `undefined`; every JSON value maps onto a defined `Value`.
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(elements) => {
                Self::Array(ArrayRef::from_vec(elements.into_iter().map(Self::from).collect()))
            }
            serde_json::Value::Object(map) => Self::Object(ObjectRef::from_map(
                map.into_iter().map(|(k, v)| (k, Self::from(v))).collect(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_field_reads_undefined() {
        let value = Value::from(json!({"x": 1}));
        let object = value.as_object().unwrap();
        assert!(matches!(object.get("x"), Value::Number(n) if n == 1.0));
        assert!(matches!(object.get("y"), Value::Undefined));
        assert!(!object.contains_key("y"));
    }

    #[test]
    fn test_json_conversion_preserves_order() {
        let value = Value::from(json!({"b": 1, "a": [true, null, "s"]}));
        let object = value.as_object().unwrap();
        let keys: Vec<String> = object.borrow().keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a"]);

        let array = object.get("a");
        let array = array.as_array().unwrap();
        assert_eq!(array.len(), 3);
        assert_eq!(array.get(0).kind_name(), "boolean");
        assert_eq!(array.get(1).kind_name(), "null");
        assert_eq!(array.get(2).kind_name(), "string");
        assert_eq!(array.get(3).kind_name(), "undefined");
    }

    #[test]
    fn test_clone_shares_identity() {
        let object = ObjectRef::new();
        let a = Value::from(object.clone());
        let b = a.clone();
        assert_eq!(a.id(), b.id());
        assert_ne!(a.id(), Value::object(Vec::<(String, Value)>::new()).id());
        assert_eq!(Value::from("s").id(), None);
    }

    #[test]
    fn test_self_cycle_is_debuggable() {
        let subject = ObjectRef::new();
        subject.insert("x", subject.clone());
        let rendered = format!("{:?}", Value::from(subject.clone()));
        assert!(rendered.contains("keys"));
        assert_eq!(subject.get("x").id(), Some(subject.id()));
    }

    #[test]
    fn test_nullish() {
        assert!(Value::Null.is_nullish());
        assert!(Value::Undefined.is_nullish());
        assert!(!Value::from(0).is_nullish());
        assert!(!Value::from("").is_nullish());
    }

    #[test]
    fn test_builders() {
        let value = Value::object([("x", Value::Undefined), ("y", Value::array([1, 2]))]);
        let object = value.as_object().unwrap();
        assert!(object.contains_key("x"));
        assert_eq!(object.get("y").as_array().map(|a| a.len()), Some(2));
    }
}
