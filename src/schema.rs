//! Root orchestrator: one schema document in, one [`SchemaResult`] out.
//!
//! 1. validate `$schema` (fatal for the file on failure)
//! 2. validate `$id` / `id` (fatal for the file on failure)
//! 3. split the document into a remainder view and a definitions view
//! 4. classify the remainder at `#`, named by `title` or [`DEFAULT_ROOT_NAME`]
//! 5. resolve the definitions view
//! 6. merge, freeze, and wrap into a [`SchemaDefinition`]
//!
//! Diagnostics from steps 4-5 never abort the file; every type that parsed
//! is kept next to them.
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, warn};
use url::Url;

use crate::diagnostic::Diagnostic;
use crate::ir::TypeDefinition;
use crate::parser::{definitions, parse_type};
use crate::path::{SchemaId, TypePath};

// ------------------------------- Policy ---------------------------------- //

/// Accepted `$schema` values, compared after URI normalization.
pub const SUPPORTED_SCHEMA_VERSIONS: [&str; 2] = [
    "http://json-schema.org/draft-04/schema#",
    "http://json-schema.org/draft-07/schema#",
];

/// Identifier keys in priority order; the first present wins.
pub const ID_KEYS: [&str; 2] = ["$id", "id"];

/// Root type name when the document has no `title`.
pub const DEFAULT_ROOT_NAME: &str = "Root";

/// Keys copied into the definitions view besides the containers themselves.
const DEFINITIONS_VIEW_KEYS: [&str; 4] = ["$schema", "$id", "id", "title"];

// -------------------------------- Types ----------------------------------- //

/// Finished catalog entry for one file.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SchemaDefinition {
    pub file_path: PathBuf,
    pub id: SchemaId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub types: IndexMap<TypePath, TypeDefinition>,
}

/// Catalog across files, keyed by schema id. Diagnostics are grouped per
/// file path.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SchemaResult {
    pub schema_dict: IndexMap<String, SchemaDefinition>,
    pub schema_warnings: Vec<(PathBuf, Vec<Diagnostic>)>,
    pub schema_errors: Vec<(PathBuf, Vec<Diagnostic>)>,
}

impl SchemaResult {
    pub fn empty() -> Self { Self::default() }

    fn failed(file_path: &Path, error: Diagnostic) -> Self {
        Self {
            schema_dict: IndexMap::new(),
            schema_warnings: vec![(file_path.to_path_buf(), Vec::new())],
            schema_errors: vec![(file_path.to_path_buf(), vec![error])],
        }
    }

    pub fn error_count(&self) -> usize {
        self.schema_errors.iter().map(|(_, errs)| errs.len()).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.schema_warnings.iter().map(|(_, warns)| warns.len()).sum()
    }

    pub fn has_errors(&self) -> bool { self.error_count() > 0 }
}

// ---------------------------- Validation --------------------------------- //

/// Read `$schema` and return its normalized form if supported.
pub fn parse_schema_version(node: &Value) -> Result<String, Diagnostic> {
    let root = TypePath::root();
    let raw = match node.get("$schema") {
        Some(Value::String(raw)) => raw,
        Some(other) => return Err(Diagnostic::invalid_type(&root, "$schema", "a string", other)),
        None => return Err(Diagnostic::missing(&root, "$schema")),
    };
    let normalized = Url::parse(raw)
        .map(|url| url.to_string())
        .unwrap_or_else(|_| raw.clone());
    if SUPPORTED_SCHEMA_VERSIONS.contains(&normalized.as_str()) {
        Ok(normalized)
    } else {
        Err(Diagnostic::UnsupportedSchemaVersion {
            value: raw.clone(),
            supported: SUPPORTED_SCHEMA_VERSIONS.iter().map(|s| s.to_string()).collect(),
        })
    }
}

/// Read the schema id from `$id`, falling back to `id`. When both exist
/// `id` is ignored, even if `$id` is invalid.
pub fn parse_schema_id(node: &Value) -> Result<SchemaId, Diagnostic> {
    let root = TypePath::root();
    let Some((key, value)) = ID_KEYS.iter().find_map(|k| node.get(*k).map(|v| (*k, v))) else {
        return Err(Diagnostic::missing(&root, ID_KEYS[0]));
    };
    let Value::String(raw) = value else {
        return Err(Diagnostic::invalid_type(&root, key, "a string", value));
    };
    SchemaId::parse(raw).map_err(|_| Diagnostic::invalid_uri(&root, key, raw))
}

// ---------------------------- Orchestration ------------------------------ //

/// Split a document into (remainder, definitions) views.
fn split_views(node: &Map<String, Value>) -> (Map<String, Value>, Map<String, Value>) {
    let mut remainder = Map::new();
    let mut defs = Map::new();
    for (key, value) in node {
        let is_container = definitions::DEFINITIONS_KEYS.contains(&key.as_str());
        if is_container || DEFINITIONS_VIEW_KEYS.contains(&key.as_str()) {
            defs.insert(key.clone(), value.clone());
        }
        if !is_container {
            remainder.insert(key.clone(), value.clone());
        }
    }
    (remainder, defs)
}

/// Parse one schema document. Always returns a value; failures are
/// reported inside it.
pub fn parse_schema(node: &Value, file_path: &Path) -> SchemaResult {
    if let Err(error) = parse_schema_version(node) {
        warn!(file = %file_path.display(), %error, "rejecting schema");
        return SchemaResult::failed(file_path, error);
    }
    let schema_id = match parse_schema_id(node) {
        Ok(id) => id,
        Err(error) => {
            warn!(file = %file_path.display(), %error, "rejecting schema");
            return SchemaResult::failed(file_path, error);
        }
    };

    let empty = Map::new();
    let (remainder, defs) = split_views(node.as_object().unwrap_or(&empty));
    let title = node.get("title").and_then(Value::as_str).unwrap_or(DEFAULT_ROOT_NAME);
    let description = node.get("description").and_then(Value::as_str).map(str::to_string);

    let root_path = TypePath::root();
    let root = parse_type(&Value::Object(remainder), &schema_id, &root_path, title);
    let defined = definitions::parse(&Value::Object(defs), &schema_id, &root_path);
    let merged = root.merge(defined);

    let (types, collisions) = merged.type_dict.freeze();
    let mut errors = merged.errors;
    errors.extend(collisions);

    info!(
        file = %file_path.display(),
        id = %schema_id,
        types = types.len(),
        errors = errors.len(),
        warnings = merged.warnings.len(),
        "parsed schema"
    );

    let definition = SchemaDefinition {
        file_path: file_path.to_path_buf(),
        id: schema_id.clone(),
        title: title.to_string(),
        description,
        types,
    };
    let mut schema_dict = IndexMap::new();
    schema_dict.insert(schema_id.to_string(), definition);
    SchemaResult {
        schema_dict,
        schema_warnings: vec![(file_path.to_path_buf(), merged.warnings)],
        schema_errors: vec![(file_path.to_path_buf(), errors)],
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn draft_04_version_is_accepted() {
        let v = parse_schema_version(&json!({"$schema": "http://json-schema.org/draft-04/schema#"}));
        assert_eq!(v, Ok("http://json-schema.org/draft-04/schema#".to_string()));
    }

    #[test]
    fn version_is_compared_after_normalization() {
        let v = parse_schema_version(&json!({"$schema": "HTTP://JSON-SCHEMA.ORG/draft-07/schema#"}));
        assert_eq!(v, Ok("http://json-schema.org/draft-07/schema#".to_string()));
    }

    #[test]
    fn unknown_version_is_unsupported() {
        let v = parse_schema_version(&json!({"$schema": "http://example.org/x"}));
        assert!(matches!(v, Err(Diagnostic::UnsupportedSchemaVersion { value, supported })
            if value == "http://example.org/x" && supported.len() == 2));
    }

    #[test]
    fn empty_document_misses_both_properties() {
        assert_eq!(parse_schema_version(&json!({})), Err(Diagnostic::missing("#", "$schema")));
        assert_eq!(parse_schema_id(&json!({})), Err(Diagnostic::missing("#", "$id")));
    }

    #[test]
    fn non_string_version_and_id_are_invalid_types() {
        assert!(matches!(parse_schema_version(&json!({"$schema": 4})), Err(Diagnostic::InvalidType { .. })));
        assert!(matches!(parse_schema_id(&json!({"id": ["x"]})), Err(Diagnostic::InvalidType { property, .. }) if property == "id"));
    }

    #[test]
    fn garbage_id_is_invalid_uri() {
        assert_eq!(
            parse_schema_id(&json!({"id": "foo bar baz"})),
            Err(Diagnostic::invalid_uri("#", "id", "foo bar baz"))
        );
        assert!(matches!(parse_schema_id(&json!({"$id": "file:///tmp/s.json"})), Err(Diagnostic::InvalidUri { .. })));
    }

    #[test]
    fn dollar_id_takes_precedence() {
        let id = parse_schema_id(&json!({"$id": "http://a.example/s", "id": "http://b.example/s"})).unwrap();
        assert_eq!(id.to_string(), "http://a.example/s");
    }

    #[test]
    fn end_to_end_root_and_definitions() {
        let doc = json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "id": "http://ex.example/s",
            "title": "T",
            "type": "object",
            "properties": {"x": {"type": "string"}},
            "definitions": {"Foo": {"type": "string"}}
        });
        let file = Path::new("schemas/t.json");
        let result = parse_schema(&doc, file);

        assert_eq!(result.schema_dict.len(), 1);
        let schema = &result.schema_dict["http://ex.example/s"];
        assert_eq!(schema.title, "T");
        assert_eq!(schema.file_path, file);

        let root = &schema.types[&TypePath::root()];
        assert!(matches!(root, TypeDefinition::Object { name, .. } if name == "T"));
        let foo = &schema.types[&TypePath::root().child("definitions").child("Foo")];
        assert_eq!(foo.name(), "Foo");
        // the root view never sees `definitions`
        assert!(matches!(root, TypeDefinition::Object { properties, .. } if properties.len() == 1));

        assert_eq!(result.schema_errors, vec![(file.to_path_buf(), vec![])]);
        assert_eq!(result.schema_warnings, vec![(file.to_path_buf(), vec![])]);
    }

    #[test]
    fn failed_version_short_circuits_the_file() {
        let doc = json!({"$schema": "http://example.org/x", "id": "http://ex.example/s", "type": "object"});
        let file = Path::new("bad.json");
        let result = parse_schema(&doc, file);
        assert!(result.schema_dict.is_empty());
        assert_eq!(result.schema_errors.len(), 1);
        assert_eq!(result.schema_errors[0].0, file);
        assert_eq!(result.schema_errors[0].1.len(), 1);
        assert_eq!(result.schema_warnings, vec![(file.to_path_buf(), vec![])]);
    }

    #[test]
    fn failed_id_short_circuits_the_file() {
        let doc = json!({"$schema": "http://json-schema.org/draft-04/schema#", "type": "object"});
        let file = Path::new("noid.json");
        let result = parse_schema(&doc, file);
        assert!(result.schema_dict.is_empty());
        assert_eq!(result.schema_errors, vec![(file.to_path_buf(), vec![Diagnostic::missing("#", "$id")])]);
        assert_eq!(result.schema_warnings, vec![(file.to_path_buf(), vec![])]);
    }

    #[test]
    fn ref_target_finds_its_definition() {
        let doc = json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "$id": "http://ex.example/s",
            "type": "object",
            "properties": {"box": {"$ref": "#/definitions/Größe Box"}},
            "definitions": {"Größe Box": {"type": "string"}}
        });
        let result = parse_schema(&doc, Path::new("box.json"));
        let schema = &result.schema_dict["http://ex.example/s"];
        let reference = &schema.types[&TypePath::root().child("properties").child("box")];
        let TypeDefinition::TypeReference { target, .. } = reference else {
            panic!("expected a reference, got {reference:?}");
        };
        let (base, fragment) = target.split_once('#').unwrap();
        assert_eq!(base, schema.id.to_string());
        let key = TypePath::parse(&format!("#{fragment}")).unwrap();
        assert_eq!(schema.types[&key].name(), "Größe Box");
    }

    #[test]
    fn schema_id_key_is_normalized() {
        let doc = json!({"$schema": "http://json-schema.org/draft-07/schema#", "$id": "http://ex.example", "type": "string"});
        let result = parse_schema(&doc, Path::new("n.json"));
        let keys: Vec<&str> = result.schema_dict.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["http://ex.example/"]);
    }

    #[test]
    fn untitled_root_defaults_name_and_keeps_description() {
        let doc = json!({
            "$schema": "http://json-schema.org/draft-04/schema#",
            "$id": "urn:example:thing",
            "description": "a thing",
            "type": "string"
        });
        let result = parse_schema(&doc, Path::new("thing.json"));
        let schema = &result.schema_dict["urn:example:thing"];
        assert_eq!(schema.title, DEFAULT_ROOT_NAME);
        assert_eq!(schema.description.as_deref(), Some("a thing"));
        assert_eq!(schema.types[&TypePath::root()].name(), "Root");
    }

    #[test]
    fn nested_problems_are_collected_not_fatal() {
        let doc = json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "$id": "http://ex.example/p",
            "type": "object",
            "properties": {"a": {"type": "wat"}, "b": {"type": "integer"}},
            "required": ["a", "c"],
            "definitions": {"Ok": {"type": "boolean"}, "Bad": {"$ref": 3}}
        });
        let result = parse_schema(&doc, Path::new("p.json"));
        let schema = &result.schema_dict["http://ex.example/p"];
        assert!(schema.types.contains_key(&TypePath::parse("#/properties/b").unwrap()));
        assert!(schema.types.contains_key(&TypePath::parse("#/definitions/Ok").unwrap()));
        assert_eq!(result.error_count(), 2);
        assert_eq!(result.warning_count(), 1);
    }

    #[test]
    fn definitions_only_document_has_no_root_type() {
        let doc = json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "$id": "http://ex.example/defs",
            "$defs": {"A": {"type": "string"}}
        });
        let result = parse_schema(&doc, Path::new("defs.json"));
        let schema = &result.schema_dict["http://ex.example/defs"];
        let keys: Vec<String> = schema.types.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["#/$defs/A"]);
    }
}
