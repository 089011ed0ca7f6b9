//! Result accumulator.
//!
//! [`ParserResult`] is a monoid: [`ParserResult::empty`] is the identity and
//! [`ParserResult::merge`] is associative. Diagnostics concatenate in call
//! order. Dictionaries combine under a keep-first policy; every colliding
//! path is remembered and surfaces as a [`Diagnostic::DuplicateTypePath`]
//! once the dictionary is frozen.
use indexmap::IndexMap;

use crate::diagnostic::Diagnostic;
use crate::ir::TypeDefinition;
use crate::path::TypePath;

// --------------------------- TypeDictionary ------------------------------- //

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TypeDictionary {
    types: IndexMap<TypePath, TypeDefinition>,
    /// Sorted multiset: one entry per rejected duplicate. Kept sorted so the
    /// result of a fold does not depend on how it was parenthesized.
    collisions: Vec<TypePath>,
}

impl TypeDictionary {
    pub fn new() -> Self { Self::default() }

    pub fn singleton(def: TypeDefinition) -> Self {
        let mut types = IndexMap::new();
        types.insert(def.path().clone(), def);
        Self { types, collisions: Vec::new() }
    }

    pub fn get(&self, path: &TypePath) -> Option<&TypeDefinition> { self.types.get(path) }

    pub fn contains(&self, path: &TypePath) -> bool { self.types.contains_key(path) }

    pub fn len(&self) -> usize { self.types.len() }

    pub fn is_empty(&self) -> bool { self.types.is_empty() }

    pub fn collisions(&self) -> &[TypePath] { &self.collisions }

    pub fn iter(&self) -> impl Iterator<Item = (&TypePath, &TypeDefinition)> {
        self.types.iter()
    }

    pub fn merge(mut self, other: Self) -> Self {
        self.collisions.extend(other.collisions);
        for (path, def) in other.types {
            if self.types.contains_key(&path) {
                self.collisions.push(path);
            } else {
                self.types.insert(path, def);
            }
        }
        self.collisions.sort();
        self
    }

    /// Consume into the final map plus one diagnostic per collision.
    pub fn freeze(self) -> (IndexMap<TypePath, TypeDefinition>, Vec<Diagnostic>) {
        let errors = self.collisions
            .into_iter()
            .map(|path| Diagnostic::DuplicateTypePath { path: path.to_string() })
            .collect();
        (self.types, errors)
    }
}

// ---------------------------- ParserResult -------------------------------- //

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParserResult {
    pub type_dict: TypeDictionary,
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

impl ParserResult {
    /// Identity element.
    pub fn empty() -> Self { Self::default() }

    pub fn from_type(def: TypeDefinition) -> Self {
        Self { type_dict: TypeDictionary::singleton(def), ..Self::default() }
    }

    pub fn from_error(error: Diagnostic) -> Self {
        Self { errors: vec![error], ..Self::default() }
    }

    pub fn merge(self, other: Self) -> Self {
        let mut errors = self.errors;
        errors.extend(other.errors);
        let mut warnings = self.warnings;
        warnings.extend(other.warnings);
        Self {
            type_dict: self.type_dict.merge(other.type_dict),
            errors,
            warnings,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.type_dict.is_empty()
            && self.type_dict.collisions().is_empty()
            && self.errors.is_empty()
            && self.warnings.is_empty()
    }
}

impl FromIterator<ParserResult> for ParserResult {
    fn from_iter<I: IntoIterator<Item = ParserResult>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::merge)
    }
}

// ------------------------------- Tests ------------------------------------ //
