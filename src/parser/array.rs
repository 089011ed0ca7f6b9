use serde_json::{Map, Value};

use crate::diagnostic::Diagnostic;
use crate::ir::TypeDefinition;
use crate::path::{SchemaId, TypePath};
use crate::result::ParserResult;
use super::parse_child;

fn is_array_type(node: &Map<String, Value>) -> bool {
    node.get("type").and_then(Value::as_str) == Some("array")
}

/// List arrays: `items` is one schema (or absent).
pub(super) fn recognizes_array(node: &Map<String, Value>) -> bool {
    is_array_type(node) && !node.get("items").is_some_and(Value::is_array)
}

/// Positional arrays: `items` is a list of schemas.
pub(super) fn recognizes_tuple(node: &Map<String, Value>) -> bool {
    is_array_type(node) && node.get("items").is_some_and(Value::is_array)
}

pub(super) fn parse_array(
    node: &Map<String, Value>,
    schema_id: &SchemaId,
    path: &TypePath,
    name: &str,
) -> ParserResult {
    let mut errors = Vec::new();
    let mut nested = ParserResult::empty();
    let mut items = None;

    match node.get("items") {
        // absent or `true`: any item
        None | Some(Value::Bool(_)) => {}
        Some(sub @ Value::Object(_)) => {
            let child_path = path.child("items");
            let (resolved, result) = parse_child(sub, schema_id, &child_path, "items");
            items = resolved;
            nested = result;
        }
        Some(other) => {
            errors.push(Diagnostic::invalid_type(path, "items", "an object or a list", other));
        }
    }

    let own = ParserResult {
        errors,
        ..ParserResult::from_type(TypeDefinition::Array {
            name: name.to_string(),
            path: path.clone(),
            items,
        })
    };
    own.merge(nested)
}

pub(super) fn parse_tuple(
    node: &Map<String, Value>,
    schema_id: &SchemaId,
    path: &TypePath,
    name: &str,
) -> ParserResult {
    let Some(Value::Array(subschemas)) = node.get("items") else {
        return ParserResult::from_error(Diagnostic::missing(path, "items"));
    };

    let mut items = Vec::with_capacity(subschemas.len());
    let mut nested = ParserResult::empty();
    for (i, sub) in subschemas.iter().enumerate() {
        let child_path = path.child("items").index(i);
        let (resolved, result) = parse_child(sub, schema_id, &child_path, &i.to_string());
        items.extend(resolved);
        nested = nested.merge(result);
    }

    let def = TypeDefinition::Tuple { name: name.to_string(), path: path.clone(), items };
    ParserResult::from_type(def).merge(nested)
}
