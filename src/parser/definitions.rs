//! Definitions resolver: one dictionary entry per named definition, each
//! classified like any other node.
use serde_json::{Map, Value};

use crate::diagnostic::Diagnostic;
use crate::path::{SchemaId, TypePath};
use crate::result::ParserResult;
use super::parse_type;

/// Container keywords, draft-04/07 first.
pub const DEFINITIONS_KEYS: [&str; 2] = ["definitions", "$defs"];

pub fn recognizes(node: &Map<String, Value>) -> bool {
    DEFINITIONS_KEYS.iter().any(|key| node.contains_key(*key))
}

/// A node without a container yields the empty result.
pub fn parse(node: &Value, schema_id: &SchemaId, type_path: &TypePath) -> ParserResult {
    let Some(map) = node.as_object().filter(|m| recognizes(m)) else {
        return ParserResult::empty();
    };
    DEFINITIONS_KEYS
        .iter()
        .filter_map(|key| map.get(*key).map(|container| (*key, container)))
        .map(|(key, container)| parse_container(key, container, schema_id, type_path))
        .collect()
}

fn parse_container(key: &str, container: &Value, schema_id: &SchemaId, type_path: &TypePath) -> ParserResult {
    let Value::Object(definitions) = container else {
        return ParserResult::from_error(Diagnostic::invalid_type(type_path, key, "an object", container));
    };
    let base = type_path.child(key);
    definitions
        .iter()
        .map(|(name, schema)| parse_type(schema, schema_id, &base.child(name.as_str()), name))
        .collect()
}
