//! Multi-file aggregation.
//!
//! Files parse independently (in parallel) and are folded in input order.
//! A schema id claimed by an earlier file stays with that file; later files
//! reusing it contribute no schema and get a `DuplicateSchemaId` error.
use std::path::PathBuf;

use rayon::prelude::*;
use tracing::warn;

use crate::diagnostic::Diagnostic;
use crate::schema::{SchemaResult, parse_schema};

impl SchemaResult {
    pub fn merge(mut self, other: Self) -> Self {
        let mut other_errors = other.schema_errors;
        for (id, definition) in other.schema_dict {
            if let Some(first) = self.schema_dict.get(&id) {
                warn!(%id, first = %first.file_path.display(), file = %definition.file_path.display(), "duplicate schema id");
                let error = Diagnostic::DuplicateSchemaId {
                    id: id.clone(),
                    first_file: first.file_path.display().to_string(),
                };
                match other_errors.iter_mut().find(|(path, _)| *path == definition.file_path) {
                    Some((_, errors)) => errors.push(error),
                    None => other_errors.push((definition.file_path.clone(), vec![error])),
                }
            } else {
                self.schema_dict.insert(id, definition);
            }
        }
        self.schema_errors.extend(other_errors);
        self.schema_warnings.extend(other.schema_warnings);
        self
    }
}

impl FromIterator<SchemaResult> for SchemaResult {
    fn from_iter<I: IntoIterator<Item = SchemaResult>>(iter: I) -> Self {
        iter.into_iter().fold(SchemaResult::empty(), SchemaResult::merge)
    }
}

/// Parse every `(file_path, document)` pair and fold the results.
pub fn parse_schema_files(documents: &[(PathBuf, serde_json::Value)]) -> SchemaResult {
    let results: Vec<SchemaResult> = documents
        .par_iter()
        .map(|(path, node)| parse_schema(node, path))
        .collect();
    results.into_iter().collect()
}
