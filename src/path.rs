//! Schema identifiers and type paths.
//!
//! A [`SchemaId`] names one schema document; a [`TypePath`] is a
//! JSON-pointer fragment (`#/properties/x`) locating a type inside it.
//! A `TypePath` only means something next to the `SchemaId` that owns it.
use std::fmt;

use percent_encoding::percent_decode_str;
use serde::{Serialize, Serializer};
use url::Url;

// ------------------------------- Policy ---------------------------------- //

/// URI schemes accepted for a schema's `$id` / `id`.
pub const SUPPORTED_ID_SCHEMES: [&str; 3] = ["http", "https", "urn"];

// ------------------------------ SchemaId --------------------------------- //

/// Validated namespacing URI of one schema document.
///
/// Stored in `Url`-normalized form: scheme and host are lowercased and an
/// authority without a path gains `/`, so `http://Ex.example` is keyed as
/// `http://ex.example/`. Two spellings of one id therefore land on the same
/// catalog key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SchemaId(Url);

/// Why a string was rejected as a schema id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SchemaIdError {
    Unparseable,
    UnsupportedScheme(String),
}

impl SchemaId {
    pub fn parse(raw: &str) -> Result<Self, SchemaIdError> {
        let url = Url::parse(raw).map_err(|_| SchemaIdError::Unparseable)?;
        if !SUPPORTED_ID_SCHEMES.contains(&url.scheme()) {
            return Err(SchemaIdError::UnsupportedScheme(url.scheme().to_string()));
        }
        Ok(Self(url))
    }

    /// Resolve a `$ref` value against this id. Nothing is fetched.
    ///
    /// The fragment comes back percent-decoded so it reads exactly like the
    /// `TypePath` keys of the catalog (`#/definitions/Größe Box`).
    pub fn resolve(&self, reference: &str) -> Option<String> {
        let mut url = self.0.join(reference).ok()?;
        let fragment = url
            .fragment()
            .map(|f| percent_decode_str(f).decode_utf8_lossy().into_owned());
        url.set_fragment(None);
        Some(match fragment {
            Some(fragment) => format!("{url}#{fragment}"),
            None => url.to_string(),
        })
    }
}

impl fmt::Display for SchemaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl Serialize for SchemaId {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.0.as_str())
    }
}

// ------------------------------ TypePath --------------------------------- //

/// Fragment address of a type, built one segment at a time while the
/// classifier descends. Segments are stored unescaped.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypePath {
    segments: Vec<String>,
}

impl TypePath {
    /// The document root, `#`.
    pub fn root() -> Self { Self::default() }

    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    pub fn index(&self, i: usize) -> Self { self.child(i.to_string()) }

    /// Parse a `#/a/b` fragment. Returns `None` for anything that is not a
    /// local JSON-pointer fragment.
    pub fn parse(fragment: &str) -> Option<Self> {
        let rest = fragment.strip_prefix('#')?;
        if rest.is_empty() {
            return Some(Self::root());
        }
        let rest = rest.strip_prefix('/')?;
        let segments = rest.split('/').map(unescape_segment).collect();
        Some(Self { segments })
    }
}

fn escape_segment(s: &str) -> String {
    s.replace('~', "~0").replace('/', "~1")
}

fn unescape_segment(s: &str) -> String {
    s.replace("~1", "/").replace("~0", "~")
}

impl fmt::Display for TypePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("#")?;
        for seg in &self.segments {
            write!(f, "/{}", escape_segment(seg))?;
        }
        Ok(())
    }
}

impl Serialize for TypePath {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

// ------------------------------- Tests ------------------------------------ //
