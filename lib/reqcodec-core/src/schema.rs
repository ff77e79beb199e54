//! Structural JSON schemas that report every mismatch at once.
//!
//! [`ObjectSchema`] checks a JSON object field by field and collects all
//! errors in document order, instead of stopping at the first one as serde
//! does. On success the value is returned untouched.
//!
//! ```
//! use reqcodec_core::{Decoder, Kind, ObjectSchema};
//! use serde_json::json;
//!
//! let schema = ObjectSchema::new()
//!     .field("foo", Kind::String)
//!     .field("count", Kind::Integer);
//!
//! let errors = schema.decode(json!({"count": "x"})).expect_err("two errors");
//! assert_eq!(errors.len(), 2);
//! ```

use serde_json::Value;

use crate::{Decoder, ValidationError, ValidationErrors};

/// Expected kind of a JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum Kind {
    /// Any JSON string.
    String,
    /// Any JSON number.
    Number,
    /// A JSON number without a fractional part.
    Integer,
    /// `true` or `false`.
    Boolean,
    /// `null`.
    Null,
    /// Anything, including a missing field.
    Any,
    /// An array whose items all have the given kind.
    Array(Box<Kind>),
    /// A nested object.
    Object(ObjectSchema),
    /// The given kind, `null`, or a missing field.
    Optional(Box<Kind>),
}

impl Kind {
    /// Shorthand for [`Kind::Array`].
    #[must_use]
    pub fn array(item: Kind) -> Self {
        Self::Array(Box::new(item))
    }

    /// Shorthand for [`Kind::Optional`].
    #[must_use]
    pub fn optional(inner: Kind) -> Self {
        Self::Optional(Box::new(inner))
    }

    fn name(&self) -> String {
        match self {
            Self::String => "string".to_string(),
            Self::Number => "number".to_string(),
            Self::Integer => "integer".to_string(),
            Self::Boolean => "boolean".to_string(),
            Self::Null => "null".to_string(),
            Self::Any => "any".to_string(),
            Self::Array(item) => format!("array of {}", item.name()),
            Self::Object(_) => "object".to_string(),
            Self::Optional(inner) => format!("optional {}", inner.name()),
        }
    }

    fn check(&self, path: &str, value: Option<&Value>, errors: &mut Vec<ValidationError>) {
        let found = match (self, value) {
            (Self::Any, _) | (Self::Optional(_), None | Some(Value::Null)) => return,
            (Self::Optional(inner), Some(_)) => return inner.check(path, value, errors),
            (_, None) => None,
            (Self::String, Some(Value::String(_)))
            | (Self::Number, Some(Value::Number(_)))
            | (Self::Boolean, Some(Value::Bool(_)))
            | (Self::Null, Some(Value::Null)) => return,
            (Self::Integer, Some(Value::Number(n))) if n.is_i64() || n.is_u64() => return,
            (Self::Array(item), Some(Value::Array(items))) => {
                for (index, entry) in items.iter().enumerate() {
                    item.check(&format!("{path}[{index}]"), Some(entry), errors);
                }
                return;
            }
            (Self::Object(schema), Some(Value::Object(_))) => {
                schema.check(path, value, errors);
                return;
            }
            (_, Some(other)) => Some(other),
        };

        let message = match found {
            None => format!("expected {}, found nothing", self.name()),
            Some(other) => format!("expected {}, found {other}", self.name()),
        };
        errors.push(ValidationError::new(display_path(path), message));
    }
}

/// Schema for a JSON object with named fields.
///
/// Fields not listed are allowed and ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectSchema {
    fields: Vec<(String, Kind)>,
}

impl ObjectSchema {
    /// Create a schema with no fields.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a required field. Use [`Kind::Optional`] for optional ones.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, kind: Kind) -> Self {
        self.fields.push((name.into(), kind));
        self
    }

    /// Declared fields, in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[(String, Kind)] {
        &self.fields
    }

    fn check(&self, path: &str, value: Option<&Value>, errors: &mut Vec<ValidationError>) {
        let Some(Value::Object(map)) = value else {
            let message = match value {
                None => "expected object, found nothing".to_string(),
                Some(other) => format!("expected object, found {other}"),
            };
            errors.push(ValidationError::new(display_path(path), message));
            return;
        };

        for (name, kind) in &self.fields {
            let field_path = if path.is_empty() {
                name.clone()
            } else {
                format!("{path}.{name}")
            };
            kind.check(&field_path, map.get(name), errors);
        }
    }
}

impl Decoder for ObjectSchema {
    type Output = Value;

    fn decode(&self, value: Value) -> Result<Value, ValidationErrors> {
        let mut errors = Vec::new();
        self.check("", Some(&value), &mut errors);
        match ValidationErrors::from_vec(errors) {
            Some(errors) => Err(errors),
            None => Ok(value),
        }
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() { "." } else { path }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn foo_schema() -> ObjectSchema {
        ObjectSchema::new().field("foo", Kind::String)
    }

    #[test]
    fn valid_payload_is_returned_unchanged() {
        let payload = json!({"foo": "bar", "extra": true});
        let decoded = foo_schema().decode(payload.clone()).expect("valid");
        assert_eq!(decoded, payload);
    }

    #[test]
    fn missing_field_is_named() {
        let errors = foo_schema()
            .decode(json!({"unexpectedField": 1}))
            .expect_err("missing foo");
        insta::assert_snapshot!(errors.to_string(), @"foo: expected string, found nothing");
    }

    #[test]
    fn all_errors_are_collected_in_order() {
        let schema = ObjectSchema::new()
            .field("name", Kind::String)
            .field("age", Kind::Integer)
            .field("tags", Kind::array(Kind::String))
            .field(
                "address",
                Kind::Object(ObjectSchema::new().field("city", Kind::String)),
            );

        let errors = schema
            .decode(json!({
                "name": 1,
                "age": 1.5,
                "tags": ["ok", 2],
                "address": {}
            }))
            .expect_err("four errors");

        insta::assert_snapshot!(errors.to_string(), @r#"
        name: expected string, found 1
        age: expected integer, found 1.5
        tags[1]: expected string, found 2
        address.city: expected string, found nothing
        "#);
    }

    #[test]
    fn optional_accepts_null_and_absence() {
        let schema = ObjectSchema::new().field("note", Kind::optional(Kind::String));
        assert!(schema.decode(json!({})).is_ok());
        assert!(schema.decode(json!({"note": null})).is_ok());
        assert!(schema.decode(json!({"note": "hi"})).is_ok());

        let errors = schema.decode(json!({"note": 3})).expect_err("wrong kind");
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn non_object_root_is_rejected() {
        let errors = foo_schema().decode(json!([1, 2])).expect_err("array");
        let error = errors.iter().next().expect("one error");
        assert_eq!(error.path(), ".");
        assert_eq!(error.message(), "expected object, found [1,2]");
    }

    #[test]
    fn any_matches_everything() {
        let schema = ObjectSchema::new().field("data", Kind::Any);
        assert!(schema.decode(json!({})).is_ok());
        assert!(schema.decode(json!({"data": [null]})).is_ok());
    }
}
