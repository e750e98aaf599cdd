//! Source formats for documents.

use std::io::Read;
use std::path::Path;

use crate::{LoadError, LoadResult};

/// Text format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Pick the format from a file extension. Unknown extensions read as
    /// YAML, which also accepts JSON text.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }

    /// Parse text into a generic tree.
    pub(crate) fn parse_tree(self, text: &str) -> Result<serde_json::Value, String> {
        match self {
            DocumentFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
            DocumentFormat::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
        }
    }
}

/// Read a whole file, naming it by its path on failure.
pub(crate) fn read_path(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).map_err(|e| LoadError::io(path.display().to_string(), e))
}

/// Drain a reader into a string.
pub(crate) fn read_all(mut reader: impl Read, document: &str) -> LoadResult<String> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| LoadError::io(document, e))?;
    Ok(text)
}

/// Parse text into a tree whose top level must be a mapping.
pub(crate) fn parse_mapping(
    text: &str,
    format: DocumentFormat,
    document: &str,
) -> LoadResult<serde_json::Map<String, serde_json::Value>> {
    match format
        .parse_tree(text)
        .map_err(|message| LoadError::parse(document, message))?
    {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(LoadError::schema(
            document,
            format!("top level must be a mapping, found {}", json_type_name(&other)),
        )),
    }
}

pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "list",
        serde_json::Value::Object(_) => "mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DocumentFormat::from_path(Path::new("a.json")), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(Path::new("a.JSON")), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(Path::new("kernel.yml")), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(Path::new("kernel.yaml")), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(Path::new("rules")), DocumentFormat::Yaml);
    }

    #[test]
    fn test_yaml_accepts_json_text() {
        let tree = DocumentFormat::Yaml.parse_tree(r#"{"ram_gb": 8}"#).unwrap();
        assert_eq!(tree["ram_gb"], serde_json::json!(8));
    }

    #[test]
    fn test_malformed_text_is_reported() {
        assert!(DocumentFormat::Json.parse_tree("{ram_gb: ").is_err());
        assert!(DocumentFormat::Yaml.parse_tree("a: [1, 2").is_err());
    }
}
