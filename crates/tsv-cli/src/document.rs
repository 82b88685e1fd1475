//! # Document Loading
//!
//! Reads the documents `tsv check` validates. Files ending in `.yaml` or
//! `.yml` are parsed as YAML, everything else as JSON. Both end up as a
//! runtime [`Value`].

use std::path::Path;

use anyhow::{bail, Context, Result};
use tsv_core::{ObjectRef, Value};

/// Load a JSON or YAML document from `path`.
pub fn load_document(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    if is_yaml(path) {
        let yaml: serde_yaml::Value = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse YAML from {}", path.display()))?;
        yaml_to_value(&yaml).with_context(|| format!("unsupported YAML in {}", path.display()))
    } else {
        let json: serde_json::Value = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse JSON from {}", path.display()))?;
        Ok(Value::from(json))
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Convert a parsed YAML value into a runtime value.
///
/// Mapping keys must be strings, numbers or booleans; the latter two are
/// stringified. Tags are ignored.
pub fn yaml_to_value(yaml: &serde_yaml::Value) -> Result<Value> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => match n.as_f64() {
            Some(f) => Ok(Value::Number(f)),
            None => bail!("unsupported YAML number: {n:?}"),
        },
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => {
            let items = seq.iter().map(yaml_to_value).collect::<Result<Vec<_>>>()?;
            Ok(Value::from(items))
        }
        serde_yaml::Value::Mapping(map) => {
            let object = ObjectRef::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => bail!("unsupported YAML map key type: {other:?}"),
                };
                object.insert(key, yaml_to_value(v)?);
            }
            Ok(Value::Object(object))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_value(&tagged.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_mapping_keeps_order_and_kinds() {
        let yaml: serde_yaml::Value =
            serde_yaml::from_str("b: 1\na: [true, null, text]\n2: two\n").unwrap();
        let value = yaml_to_value(&yaml).unwrap();
        let object = value.as_object().unwrap();

        let keys: Vec<String> = object.borrow().keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a", "2"]);
        assert!(matches!(object.get("b"), Value::Number(n) if n == 1.0));

        let a = object.get("a");
        let array = a.as_array().unwrap();
        assert!(matches!(array.get(0), Value::Bool(true)));
        assert!(matches!(array.get(1), Value::Null));
        assert!(matches!(array.get(2), Value::String(ref s) if s == "text"));
    }

    #[test]
    fn yaml_sequence_key_is_rejected() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("? [1, 2]\n: x\n").unwrap();
        assert!(yaml_to_value(&yaml).is_err());
    }

    #[test]
    fn load_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("doc.json");
        std::fs::write(&json_path, r#"{"x": "hi"}"#).unwrap();
        let value = load_document(&json_path).unwrap();
        assert!(matches!(value.as_object().unwrap().get("x"), Value::String(_)));

        let yaml_path = dir.path().join("doc.yml");
        std::fs::write(&yaml_path, "x: hi\n").unwrap();
        let value = load_document(&yaml_path).unwrap();
        assert!(matches!(value.as_object().unwrap().get("x"), Value::String(_)));
    }

    #[test]
    fn missing_file_names_path() {
        let err = load_document(Path::new("/nonexistent/doc.json")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/doc.json"));
    }
}
