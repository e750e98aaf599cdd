//! Domain specifications: the structured description being validated.

use std::io::Read;
use std::path::Path;

use forge_core::{FieldPath, Map, Value};
use tracing::info;

use crate::format::{parse_mapping, read_all, read_path};
use crate::{DocumentFormat, LoadResult};

/// A loaded domain specification. Any mapping is accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainSpecification {
    document: String,
    fields: Map,
}

impl DomainSpecification {
    /// Load a specification from a JSON or YAML file.
    pub fn load(path: impl AsRef<Path>) -> LoadResult<Self> {
        let path = path.as_ref();
        let text = read_path(path)?;
        Self::parse(
            &text,
            DocumentFormat::from_path(path),
            path.display().to_string(),
        )
    }

    /// Load a specification from a byte stream.
    pub fn from_reader(
        reader: impl Read,
        format: DocumentFormat,
        document: impl Into<String>,
    ) -> LoadResult<Self> {
        let document = document.into();
        let text = read_all(reader, &document)?;
        Self::parse(&text, format, document)
    }

    /// Parse a specification from text.
    pub fn parse(
        text: &str,
        format: DocumentFormat,
        document: impl Into<String>,
    ) -> LoadResult<Self> {
        let document = document.into();
        let root = parse_mapping(text, format, &document)?;
        let fields: Map = root
            .into_iter()
            .map(|(key, value)| (key, Value::from(value)))
            .collect();
        info!(
            document = %document,
            fields = fields.len(),
            "loaded domain specification"
        );
        Ok(Self { document, fields })
    }

    /// Wrap an in-memory field map.
    pub fn from_map(document: impl Into<String>, fields: Map) -> Self {
        Self {
            document: document.into(),
            fields,
        }
    }

    pub fn fields(&self) -> &Map {
        &self.fields
    }

    /// Top-level field by name.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Resolve a dotted path. An explicit null is present.
    pub fn resolve(&self, path: &FieldPath) -> Option<&Value> {
        path.resolve(&self.fields)
    }

    /// Name of the document this was loaded from.
    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn into_fields(self) -> Map {
        self.fields
    }
}
