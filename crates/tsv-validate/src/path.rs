//! # Value Paths
//!
//! Every violation is addressed by the path from the root of the validated
//! value to the offending position:
//!
//! | Segment | Rendered as |
//! |---------|-------------|
//! | root | `$value` |
//! | identifier-safe property `x` | `.x` |
//! | any other property `the z` | `["the z"]` (JSON string escaping) |
//! | array index `1` | `[1]` |
//!
//! so a missing `"the z"` in the second element of `x.y` is reported at
//! `$value.x.y[1]["the z"]`. This format is part of the public contract.

use std::fmt;

/// The root marker every path starts with.
pub const ROOT_MARKER: &str = "$value";

/// One step from a container to a child value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Property(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Property(name) if is_identifier(name) => write!(f, ".{name}"),
            Self::Property(name) => {
                let quoted = serde_json::Value::String(name.clone());
                write!(f, "[{quoted}]")
            }
            Self::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// Whether `name` can be written after a dot: an ASCII letter, `_` or `$`,
/// followed by ASCII alphanumerics, `_` or `$`.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// The path of the position currently being validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValuePath {
    segments: Vec<PathSegment>,
}

impl ValuePath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    pub fn pop(&mut self) -> Option<PathSegment> {
        self.segments.pop()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }
}

impl fmt::Display for ValuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(ROOT_MARKER)?;
        for segment in &self.segments {
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(segments: Vec<PathSegment>) -> String {
        let mut path = ValuePath::new();
        for segment in segments {
            path.push(segment);
        }
        path.to_string()
    }

    #[test]
    fn root_only() {
        assert_eq!(ValuePath::new().to_string(), "$value");
    }

    #[test]
    fn mixed_segments_compose_left_to_right() {
        let rendered = path(vec![
            PathSegment::Property("x".into()),
            PathSegment::Property("y".into()),
            PathSegment::Index(1),
            PathSegment::Property("the z".into()),
        ]);
        assert_eq!(rendered, r#"$value.x.y[1]["the z"]"#);
    }

    #[test]
    fn bracketed_names_are_json_escaped() {
        assert_eq!(
            PathSegment::Property("say \"hi\"".into()).to_string(),
            r#"["say \"hi\""]"#
        );
        assert_eq!(PathSegment::Property(String::new()).to_string(), r#"[""]"#);
        assert_eq!(PathSegment::Property("1st".into()).to_string(), r#"["1st"]"#);
    }

    #[test]
    fn identifier_rules() {
        assert!(is_identifier("x"));
        assert!(is_identifier("_private"));
        assert!(is_identifier("$ref"));
        assert!(is_identifier("camelCase9"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("9lives"));
        assert!(!is_identifier("the z"));
        assert!(!is_identifier("kebab-case"));
        assert!(!is_identifier("café"));
    }

    #[test]
    fn pop_restores_parent() {
        let mut path = ValuePath::new();
        path.push(PathSegment::Property("a".into()));
        path.push(PathSegment::Index(0));
        assert_eq!(path.pop(), Some(PathSegment::Index(0)));
        assert_eq!(path.to_string(), "$value.a");
        assert_eq!(path.depth(), 1);
    }
}
