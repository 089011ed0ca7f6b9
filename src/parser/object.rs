use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::diagnostic::Diagnostic;
use crate::ir::TypeDefinition;
use crate::path::{SchemaId, TypePath};
use crate::result::{ParserResult, TypeDictionary};
use super::parse_child;

pub(super) fn recognizes(node: &Map<String, Value>) -> bool {
    match node.get("type") {
        Some(Value::String(t)) => t == "object",
        None => node.contains_key("properties"),
        Some(_) => false,
    }
}

pub(super) fn parse(
    node: &Map<String, Value>,
    schema_id: &SchemaId,
    path: &TypePath,
    name: &str,
) -> ParserResult {
    let mut own = ParserResult::empty();
    let mut nested = ParserResult::empty();

    let mut properties = IndexMap::new();
    let declared = match node.get("properties") {
        None => None,
        Some(Value::Object(props)) => {
            for (prop_name, sub) in props {
                let child_path = path.child("properties").child(prop_name.as_str());
                let (resolved, result) = parse_child(sub, schema_id, &child_path, prop_name);
                if let Some(p) = resolved {
                    properties.insert(prop_name.clone(), p);
                }
                nested = nested.merge(result);
            }
            Some(props)
        }
        Some(other) => {
            own.errors.push(Diagnostic::invalid_type(path, "properties", "an object", other));
            None
        }
    };

    let required = match parse_required(node, path) {
        Ok(required) => required,
        Err(error) => {
            own.errors.push(error);
            Vec::new()
        }
    };
    if let Some(declared) = declared {
        for property in required.iter().filter(|r| !declared.contains_key(r.as_str())) {
            own.warnings.push(Diagnostic::UndeclaredRequiredProperty {
                path: path.to_string(),
                property: property.clone(),
            });
        }
    }

    let mut additional_properties = None;
    match node.get("additionalProperties") {
        None | Some(Value::Bool(_)) => {}
        Some(sub @ Value::Object(_)) => {
            let child_path = path.child("additionalProperties");
            let (resolved, result) = parse_child(sub, schema_id, &child_path, "additionalProperties");
            additional_properties = resolved;
            nested = nested.merge(result);
        }
        Some(other) => {
            own.errors.push(Diagnostic::invalid_type(
                path,
                "additionalProperties",
                "a boolean or an object",
                other,
            ));
        }
    }

    own.type_dict = TypeDictionary::singleton(TypeDefinition::Object {
        name: name.to_string(),
        path: path.clone(),
        properties,
        required,
        additional_properties,
    });
    own.merge(nested)
}

fn parse_required(node: &Map<String, Value>, path: &TypePath) -> Result<Vec<String>, Diagnostic> {
    let Some(value) = node.get("required") else {
        return Ok(Vec::new());
    };
    let invalid = || Diagnostic::invalid_type(path, "required", "a list of strings", value);
    let Value::Array(names) = value else {
        return Err(invalid());
    };
    names
        .iter()
        .map(|n| n.as_str().map(str::to_string).ok_or_else(invalid))
        .collect()
}
