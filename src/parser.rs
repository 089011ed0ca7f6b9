//! Construct classifier and dispatch.
//!
//! Every mapping-shaped schema node is matched against a closed set of
//! constructs, tried in [`Construct::PRIORITY`] order; the first whose
//! predicate accepts the node parses it. Predicates look only at key
//! presence and values, so a node that fits two constructs always lands on
//! the earlier one regardless of key order in the input.
//!
//! Nodes nothing recognizes (pure metadata, boolean schemas, scalars) yield
//! the empty [`ParserResult`]: skipped, not reported.
pub mod combinator;
pub mod array;
pub mod object;
pub mod reference;
pub mod scalar;
pub mod definitions;

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::path::{SchemaId, TypePath};
use crate::result::ParserResult;

pub use combinator::Combinator;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Construct {
    AllOf,
    AnyOf,
    Array,
    Object,
    OneOf,
    Tuple,
    TypeReference,
    Enum,
    Union,
    Primitive,
}

impl Construct {
    /// Dispatch order. Enum, union and primitive sit after the structural
    /// constructs so they only catch leaves.
    pub const PRIORITY: [Construct; 10] = [
        Construct::AllOf,
        Construct::AnyOf,
        Construct::Array,
        Construct::Object,
        Construct::OneOf,
        Construct::Tuple,
        Construct::TypeReference,
        Construct::Enum,
        Construct::Union,
        Construct::Primitive,
    ];

    pub fn recognizes(self, node: &Map<String, Value>) -> bool {
        match self {
            Self::AllOf => combinator::recognizes(Combinator::AllOf, node),
            Self::AnyOf => combinator::recognizes(Combinator::AnyOf, node),
            Self::OneOf => combinator::recognizes(Combinator::OneOf, node),
            Self::Array => array::recognizes_array(node),
            Self::Tuple => array::recognizes_tuple(node),
            Self::Object => object::recognizes(node),
            Self::TypeReference => reference::recognizes(node),
            Self::Enum => scalar::recognizes_enum(node),
            Self::Union => scalar::recognizes_union(node),
            Self::Primitive => scalar::recognizes_primitive(node),
        }
    }

    pub fn parse(
        self,
        node: &Map<String, Value>,
        schema_id: &SchemaId,
        type_path: &TypePath,
        name: &str,
    ) -> ParserResult {
        match self {
            Self::AllOf => combinator::parse(Combinator::AllOf, node, schema_id, type_path, name),
            Self::AnyOf => combinator::parse(Combinator::AnyOf, node, schema_id, type_path, name),
            Self::OneOf => combinator::parse(Combinator::OneOf, node, schema_id, type_path, name),
            Self::Array => array::parse_array(node, schema_id, type_path, name),
            Self::Tuple => array::parse_tuple(node, schema_id, type_path, name),
            Self::Object => object::parse(node, schema_id, type_path, name),
            Self::TypeReference => reference::parse(node, schema_id, type_path, name),
            Self::Enum => scalar::parse_enum(node, type_path, name),
            Self::Union => scalar::parse_union(node, type_path, name),
            Self::Primitive => scalar::parse_primitive(node, type_path, name),
        }
    }

    /// First construct, in priority order, that accepts `node`.
    pub fn classify(node: &Map<String, Value>) -> Option<Self> {
        Self::PRIORITY.into_iter().find(|c| c.recognizes(node))
    }
}

/// Classify `node` and parse it at `type_path`.
pub fn parse_type(
    node: &Value,
    schema_id: &SchemaId,
    type_path: &TypePath,
    name: &str,
) -> ParserResult {
    let Some(map) = node.as_object() else {
        trace!(path = %type_path, "skipping non-object schema node");
        return ParserResult::empty();
    };
    match Construct::classify(map) {
        Some(construct) => {
            debug!(path = %type_path, ?construct, type_name = name, "classified schema node");
            construct.parse(map, schema_id, type_path, name)
        }
        None => {
            trace!(path = %type_path, "no construct matched, skipping");
            ParserResult::empty()
        }
    }
}

/// Parse a nested schema. Also returns `child_path` when the child produced
/// a type there, so the parent can point at it.
pub(crate) fn parse_child(
    node: &Value,
    schema_id: &SchemaId,
    child_path: &TypePath,
    name: &str,
) -> (Option<TypePath>, ParserResult) {
    let result = parse_type(node, schema_id, child_path, name);
    let resolved = result.type_dict.contains(child_path).then(|| child_path.clone());
    (resolved, result)
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::TypeDefinition;
    use serde_json::json;

    fn id() -> SchemaId { SchemaId::parse("http://example.com/s").unwrap() }

    fn classify(v: Value) -> Option<Construct> {
        Construct::classify(v.as_object().unwrap())
    }

    #[test]
    fn each_construct_is_recognized() {
        assert_eq!(classify(json!({"allOf": []})), Some(Construct::AllOf));
        assert_eq!(classify(json!({"anyOf": []})), Some(Construct::AnyOf));
        assert_eq!(classify(json!({"oneOf": []})), Some(Construct::OneOf));
        assert_eq!(classify(json!({"type": "array", "items": {}})), Some(Construct::Array));
        assert_eq!(classify(json!({"type": "array", "items": []})), Some(Construct::Tuple));
        assert_eq!(classify(json!({"type": "object"})), Some(Construct::Object));
        assert_eq!(classify(json!({"properties": {}})), Some(Construct::Object));
        assert_eq!(classify(json!({"$ref": "#/definitions/a"})), Some(Construct::TypeReference));
        assert_eq!(classify(json!({"enum": ["a"]})), Some(Construct::Enum));
        assert_eq!(classify(json!({"type": ["string", "null"]})), Some(Construct::Union));
        assert_eq!(classify(json!({"type": "integer"})), Some(Construct::Primitive));
        assert_eq!(classify(json!({"description": "only metadata"})), None);
    }

    #[test]
    fn priority_wins_regardless_of_key_order() {
        let a = json!({"allOf": [{"type": "string"}], "type": "object"});
        let b = json!({"type": "object", "allOf": [{"type": "string"}]});
        assert_eq!(classify(a), Some(Construct::AllOf));
        assert_eq!(classify(b), Some(Construct::AllOf));

        let c = json!({"$ref": "#/definitions/x", "type": "object"});
        let d = json!({"type": "object", "$ref": "#/definitions/x"});
        assert_eq!(classify(c), Some(Construct::Object));
        assert_eq!(classify(d), Some(Construct::Object));

        let e = json!({"oneOf": [], "anyOf": []});
        assert_eq!(classify(e), Some(Construct::AnyOf));
    }

    #[test]
    fn unclassifiable_nodes_are_skipped_silently() {
        let root = TypePath::root();
        assert!(parse_type(&json!({"title": "x"}), &id(), &root, "Root").is_empty());
        assert!(parse_type(&json!(true), &id(), &root, "Root").is_empty());
        assert!(parse_type(&json!([1, 2]), &id(), &root, "Root").is_empty());
    }

    #[test]
    fn nested_schemas_get_extended_paths() {
        let node = json!({
            "type": "object",
            "properties": {
                "tags": {"type": "array", "items": {"type": "string"}},
                "pair": {"type": "array", "items": [{"type": "integer"}, {"$ref": "#/definitions/p"}]}
            }
        });
        let result = parse_type(&node, &id(), &TypePath::root(), "Root");
        assert!(result.errors.is_empty());
        let keys: Vec<String> = result.type_dict.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec![
            "#",
            "#/properties/tags",
            "#/properties/tags/items",
            "#/properties/pair",
            "#/properties/pair/items/0",
            "#/properties/pair/items/1",
        ]);
        let pair = result.type_dict.get(&TypePath::parse("#/properties/pair").unwrap()).unwrap();
        assert!(matches!(pair, TypeDefinition::Tuple { items, .. } if items.len() == 2));
    }

    #[test]
    fn nested_errors_do_not_abort_siblings() {
        let node = json!({
            "type": "object",
            "properties": {
                "bad": {"type": "object", "properties": 5},
                "good": {"type": "boolean"}
            }
        });
        let result = parse_type(&node, &id(), &TypePath::root(), "Root");
        assert_eq!(result.errors.len(), 1);
        assert!(result.type_dict.contains(&TypePath::parse("#/properties/good").unwrap()));
        assert!(result.type_dict.contains(&TypePath::parse("#/properties/bad").unwrap()));
    }
}
