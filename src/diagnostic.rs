//! Typed diagnostics with location context.
//!
//! Diagnostics are data: they accumulate in a [`ParserResult`](crate::result::ParserResult)
//! and never steer control flow inside the classifier.
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    #[error("{path}: missing property `{property}`")]
    MissingProperty { path: String, property: String },

    #[error("{path}: property `{property}` should be {expected}, found {actual}")]
    InvalidType {
        path: String,
        property: String,
        expected: String,
        actual: String,
    },

    #[error("{path}: property `{property}` is not a valid URI: {value:?}")]
    InvalidUri {
        path: String,
        property: String,
        value: String,
    },

    #[error("unsupported schema version {value:?}, expected one of: {}", .supported.join(", "))]
    UnsupportedSchemaVersion { value: String, supported: Vec<String> },

    #[error("{path}: unknown type name {value:?}")]
    UnknownTypeName { path: String, value: String },

    #[error("{path}: required property `{property}` is not declared in `properties`")]
    UndeclaredRequiredProperty { path: String, property: String },

    #[error("{path}: more than one type resolved to this path, keeping the first")]
    DuplicateTypePath { path: String },

    #[error("schema id {id:?} was already defined by {first_file}")]
    DuplicateSchemaId { id: String, first_file: String },
}

impl Diagnostic {
    pub fn missing(path: impl ToString, property: &str) -> Self {
        Self::MissingProperty {
            path: path.to_string(),
            property: property.to_string(),
        }
    }

    pub fn invalid_type(path: impl ToString, property: &str, expected: &str, actual: &Value) -> Self {
        Self::InvalidType {
            path: path.to_string(),
            property: property.to_string(),
            expected: expected.to_string(),
            actual: get_type(actual).to_string(),
        }
    }

    pub fn invalid_uri(path: impl ToString, property: &str, value: &str) -> Self {
        Self::InvalidUri {
            path: path.to_string(),
            property: property.to_string(),
            value: value.to_string(),
        }
    }
}

/// JSON kind of a value, as used in diagnostic messages.
pub fn get_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
