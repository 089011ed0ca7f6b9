// Resolved type shapes handed to codegen. Nested schemas are referenced by
// TypePath, never inlined; the owning dictionary holds their definitions.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::path::TypePath;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeDefinition {
    AllOf { name: String, path: TypePath, types: Vec<TypePath> },
    AnyOf { name: String, path: TypePath, types: Vec<TypePath> },
    OneOf { name: String, path: TypePath, types: Vec<TypePath> },
    Array {
        name: String,
        path: TypePath,
        items: Option<TypePath>,
    },
    Tuple {
        name: String,
        path: TypePath,
        items: Vec<TypePath>,
    },
    Object {
        name: String,
        path: TypePath,
        properties: IndexMap<String, TypePath>, // input order
        required: Vec<String>,
        additional_properties: Option<TypePath>,
    },
    TypeReference {
        name: String,
        path: TypePath,
        target: String, // absolute, resolved against the schema id
    },
    Enum {
        name: String,
        path: TypePath,
        type_name: Option<String>,
        values: Vec<Value>,
    },
    Union {
        name: String,
        path: TypePath,
        types: Vec<PrimitiveKind>,
    },
    Primitive {
        name: String,
        path: TypePath,
        #[serde(rename = "type")]
        type_: PrimitiveKind,
        format: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    Null,
    Boolean,
    Integer,
    Number,
    String,
    // only meaningful inside a union: ["object", "null"]
    Object,
    Array,
}

impl PrimitiveKind {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "null" => Self::Null,
            "boolean" => Self::Boolean,
            "integer" => Self::Integer,
            "number" => Self::Number,
            "string" => Self::String,
            "object" => Self::Object,
            "array" => Self::Array,
            _ => return None,
        })
    }

    pub fn is_scalar(self) -> bool {
        !matches!(self, Self::Object | Self::Array)
    }
}

impl TypeDefinition {
    pub fn name(&self) -> &str {
        match self {
            Self::AllOf { name, .. }
            | Self::AnyOf { name, .. }
            | Self::OneOf { name, .. }
            | Self::Array { name, .. }
            | Self::Tuple { name, .. }
            | Self::Object { name, .. }
            | Self::TypeReference { name, .. }
            | Self::Enum { name, .. }
            | Self::Union { name, .. }
            | Self::Primitive { name, .. } => name,
        }
    }

    pub fn path(&self) -> &TypePath {
        match self {
            Self::AllOf { path, .. }
            | Self::AnyOf { path, .. }
            | Self::OneOf { path, .. }
            | Self::Array { path, .. }
            | Self::Tuple { path, .. }
            | Self::Object { path, .. }
            | Self::TypeReference { path, .. }
            | Self::Enum { path, .. }
            | Self::Union { path, .. }
            | Self::Primitive { path, .. } => path,
        }
    }
}
