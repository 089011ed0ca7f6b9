//! Leaf constructs: `enum`, union (`type` as a list), and primitives.
use serde_json::{Map, Value};

use crate::diagnostic::Diagnostic;
use crate::ir::{PrimitiveKind, TypeDefinition};
use crate::path::TypePath;
use crate::result::ParserResult;

pub(super) fn recognizes_enum(node: &Map<String, Value>) -> bool {
    node.contains_key("enum")
}

pub(super) fn recognizes_union(node: &Map<String, Value>) -> bool {
    node.get("type").is_some_and(Value::is_array)
}

pub(super) fn recognizes_primitive(node: &Map<String, Value>) -> bool {
    node.get("type").is_some_and(Value::is_string)
}

pub(super) fn parse_enum(node: &Map<String, Value>, path: &TypePath, name: &str) -> ParserResult {
    let values = match node.get("enum") {
        Some(Value::Array(values)) => values.clone(),
        Some(other) => return ParserResult::from_error(Diagnostic::invalid_type(path, "enum", "a list", other)),
        None => return ParserResult::from_error(Diagnostic::missing(path, "enum")),
    };
    ParserResult::from_type(TypeDefinition::Enum {
        name: name.to_string(),
        path: path.clone(),
        type_name: node.get("type").and_then(Value::as_str).map(str::to_string),
        values,
    })
}

pub(super) fn parse_union(node: &Map<String, Value>, path: &TypePath, name: &str) -> ParserResult {
    let Some(Value::Array(names)) = node.get("type") else {
        return ParserResult::from_error(Diagnostic::missing(path, "type"));
    };

    let mut errors = Vec::new();
    let mut types = Vec::with_capacity(names.len());
    for entry in names {
        match entry {
            Value::String(s) => match PrimitiveKind::from_name(s) {
                Some(kind) => types.push(kind),
                None => errors.push(Diagnostic::UnknownTypeName { path: path.to_string(), value: s.clone() }),
            },
            other => errors.push(Diagnostic::invalid_type(path, "type", "a list of type names", other)),
        }
    }
    if types.is_empty() {
        return ParserResult { errors, ..ParserResult::empty() };
    }

    ParserResult {
        errors,
        ..ParserResult::from_type(TypeDefinition::Union { name: name.to_string(), path: path.clone(), types })
    }
}

pub(super) fn parse_primitive(node: &Map<String, Value>, path: &TypePath, name: &str) -> ParserResult {
    let Some(type_name) = node.get("type").and_then(Value::as_str) else {
        return ParserResult::from_error(Diagnostic::missing(path, "type"));
    };
    match PrimitiveKind::from_name(type_name).filter(|k| k.is_scalar()) {
        Some(type_) => ParserResult::from_type(TypeDefinition::Primitive {
            name: name.to_string(),
            path: path.clone(),
            type_,
            format: node.get("format").and_then(Value::as_str).map(str::to_string),
        }),
        None => ParserResult::from_error(Diagnostic::UnknownTypeName {
            path: path.to_string(),
            value: type_name.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: &Value) -> &Map<String, Value> { v.as_object().unwrap() }

    #[test]
    fn enum_keeps_values_and_declared_type() {
        let node = json!({"type": "string", "enum": ["red", "green"]});
        let result = parse_enum(obj(&node), &TypePath::root(), "Color");
        assert_eq!(result.type_dict.get(&TypePath::root()), Some(&TypeDefinition::Enum {
            name: "Color".into(),
            path: TypePath::root(),
            type_name: Some("string".into()),
            values: vec![json!("red"), json!("green")],
        }));
    }

    #[test]
    fn union_reports_unknown_members_but_keeps_the_rest() {
        let node = json!({"type": ["string", "strng", 4, "null"]});
        let result = parse_union(obj(&node), &TypePath::root(), "U");
        assert_eq!(result.errors.len(), 2);
        assert!(matches!(
            result.type_dict.get(&TypePath::root()),
            Some(TypeDefinition::Union { types, .. }) if types == &vec![PrimitiveKind::String, PrimitiveKind::Null]
        ));
    }

    #[test]
    fn primitive_carries_format() {
        let node = json!({"type": "string", "format": "date-time"});
        let result = parse_primitive(obj(&node), &TypePath::root(), "When");
        assert!(matches!(
            result.type_dict.get(&TypePath::root()),
            Some(TypeDefinition::Primitive { type_: PrimitiveKind::String, format: Some(f), .. }) if f == "date-time"
        ));
    }

    #[test]
    fn unknown_primitive_is_reported() {
        let node = json!({"type": "text"});
        let result = parse_primitive(obj(&node), &TypePath::root(), "T");
        assert!(result.type_dict.is_empty());
        assert_eq!(result.errors, vec![Diagnostic::UnknownTypeName { path: "#".into(), value: "text".into() }]);
    }
}
