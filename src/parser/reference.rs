use serde_json::{Map, Value};

use crate::diagnostic::Diagnostic;
use crate::ir::TypeDefinition;
use crate::path::{SchemaId, TypePath};
use crate::result::ParserResult;

pub(super) fn recognizes(node: &Map<String, Value>) -> bool {
    node.contains_key("$ref")
}

/// Records the reference target as an absolute URI. The target is not
/// looked up; codegen resolves it against the catalog.
pub(super) fn parse(
    node: &Map<String, Value>,
    schema_id: &SchemaId,
    path: &TypePath,
    name: &str,
) -> ParserResult {
    let raw = match node.get("$ref") {
        Some(Value::String(raw)) => raw,
        Some(other) => return ParserResult::from_error(Diagnostic::invalid_type(path, "$ref", "a string", other)),
        None => return ParserResult::from_error(Diagnostic::missing(path, "$ref")),
    };
    let Some(target) = schema_id.resolve(raw) else {
        return ParserResult::from_error(Diagnostic::invalid_uri(path, "$ref", raw));
    };
    ParserResult::from_type(TypeDefinition::TypeReference {
        name: name.to_string(),
        path: path.clone(),
        target,
    })
}
