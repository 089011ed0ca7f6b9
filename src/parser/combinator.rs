use serde_json::{Map, Value};

use crate::diagnostic::Diagnostic;
use crate::ir::TypeDefinition;
use crate::path::{SchemaId, TypePath};
use crate::result::ParserResult;
use super::parse_child;

/// `allOf`, `anyOf` and `oneOf` share one shape: a list of sub-schemas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combinator { AllOf, AnyOf, OneOf }

impl Combinator {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::AllOf => "allOf",
            Self::AnyOf => "anyOf",
            Self::OneOf => "oneOf",
        }
    }

    fn build(self, name: &str, path: &TypePath, types: Vec<TypePath>) -> TypeDefinition {
        let (name, path) = (name.to_string(), path.clone());
        match self {
            Self::AllOf => TypeDefinition::AllOf { name, path, types },
            Self::AnyOf => TypeDefinition::AnyOf { name, path, types },
            Self::OneOf => TypeDefinition::OneOf { name, path, types },
        }
    }
}

pub(super) fn recognizes(kind: Combinator, node: &Map<String, Value>) -> bool {
    node.contains_key(kind.keyword())
}

pub(super) fn parse(
    kind: Combinator,
    node: &Map<String, Value>,
    schema_id: &SchemaId,
    path: &TypePath,
    name: &str,
) -> ParserResult {
    let keyword = kind.keyword();
    let subschemas = match node.get(keyword) {
        Some(Value::Array(xs)) => xs,
        Some(other) => {
            return ParserResult::from_error(Diagnostic::invalid_type(path, keyword, "a list of schemas", other));
        }
        None => return ParserResult::from_error(Diagnostic::missing(path, keyword)),
    };

    let mut types = Vec::with_capacity(subschemas.len());
    let mut nested = ParserResult::empty();
    for (i, sub) in subschemas.iter().enumerate() {
        let child_path = path.child(keyword).index(i);
        let (resolved, result) = parse_child(sub, schema_id, &child_path, &i.to_string());
        types.extend(resolved);
        nested = nested.merge(result);
    }

    ParserResult::from_type(kind.build(name, path, types)).merge(nested)
}
