//! Turn JSON Schema documents (draft-04 / draft-07) into a flat catalog of
//! named, path-addressed type definitions for code generators.
//!
//! ```
//! use std::path::Path;
//! use serde_json::json;
//!
//! let doc = json!({
//!     "$schema": "http://json-schema.org/draft-07/schema#",
//!     "$id": "http://example.com/person",
//!     "title": "Person",
//!     "type": "object",
//!     "properties": {"name": {"type": "string"}}
//! });
//! let result = json_schema_catalog::parse_schema(&doc, Path::new("person.json"));
//! assert_eq!(result.schema_dict["http://example.com/person"].types.len(), 2);
//! ```
pub mod aggregate;
pub mod diagnostic;
pub mod ir;
pub mod parser;
pub mod path;
pub mod result;
pub mod schema;

pub use aggregate::parse_schema_files;
pub use diagnostic::{Diagnostic, get_type};
pub use ir::{PrimitiveKind, TypeDefinition};
pub use parser::{Construct, parse_type};
pub use path::{SchemaId, TypePath};
pub use result::{ParserResult, TypeDictionary};
pub use schema::{SchemaDefinition, SchemaResult, parse_schema, parse_schema_id, parse_schema_version};
