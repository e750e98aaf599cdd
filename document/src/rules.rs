//! Rule documents: an ordered set of named constraints.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use forge_core::FieldPath;
use forge_parser::{parse_predicate, Expr, FnCall, ParseResult, Span};
use serde_json::{Map as JsonMap, Value as JsonValue};
use tracing::info;

use crate::format::{json_type_name, parse_mapping, read_all, read_path};
use crate::{DocumentFormat, LoadError, LoadResult};

/// A named predicate over domain specification fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    id: String,
    description: String,
    source: String,
    predicate: Expr,
}

impl Constraint {
    /// Build a constraint from predicate source text.
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        source: impl Into<String>,
    ) -> ParseResult<Self> {
        let source = source.into();
        let predicate = parse_predicate(&source)?;
        Ok(Self {
            id: id.into(),
            description: description.into(),
            source,
            predicate,
        })
    }

    /// Build a constraint that only requires `path` to be present.
    pub fn require(id: impl Into<String>, description: impl Into<String>, path: FieldPath) -> Self {
        let source = format!("exists({})", path);
        let span = Span::new(0, source.len(), 1, 1);
        let predicate = Expr::FnCall(FnCall {
            name: "exists".to_string(),
            args: vec![Expr::Field(path, span)],
            span,
        });
        Self {
            id: id.into(),
            description: description.into(),
            source,
            predicate,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The predicate as written in the document.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn predicate(&self) -> &Expr {
        &self.predicate
    }

    /// Fields the predicate reads.
    pub fn fields(&self) -> Vec<&FieldPath> {
        self.predicate.fields()
    }
}

/// A loaded rules document. Constraints keep their document order.
#[derive(Debug, Clone)]
pub struct RuleDocument {
    document: String,
    version: Option<String>,
    constraints: Vec<Constraint>,
}

impl RuleDocument {
    /// Load a rules document from a JSON or YAML file.
    pub fn load(path: impl AsRef<Path>) -> LoadResult<Self> {
        let path = path.as_ref();
        let text = read_path(path)?;
        Self::parse(
            &text,
            DocumentFormat::from_path(path),
            path.display().to_string(),
        )
    }

    /// Load a rules document from a byte stream.
    pub fn from_reader(
        reader: impl Read,
        format: DocumentFormat,
        document: impl Into<String>,
    ) -> LoadResult<Self> {
        let document = document.into();
        let text = read_all(reader, &document)?;
        Self::parse(&text, format, document)
    }

    /// Parse a rules document from text.
    pub fn parse(
        text: &str,
        format: DocumentFormat,
        document: impl Into<String>,
    ) -> LoadResult<Self> {
        let document = document.into();
        let root = parse_mapping(text, format, &document)?;
        let rules = Self::from_tree(&root, &document)?;
        info!(
            document = %rules.document,
            version = rules.version.as_deref().unwrap_or("-"),
            constraints = rules.constraints.len(),
            "loaded rule document"
        );
        Ok(rules)
    }

    /// Build a document directly from constraints. Ids must be unique.
    pub fn from_constraints(
        document: impl Into<String>,
        constraints: Vec<Constraint>,
    ) -> LoadResult<Self> {
        let document = document.into();
        let mut seen = HashSet::new();
        for (index, constraint) in constraints.iter().enumerate() {
            if constraint.id.trim().is_empty() {
                return Err(LoadError::schema(
                    &document,
                    format!("constraints[{}]: 'id' must not be empty", index),
                ));
            }
            if !seen.insert(constraint.id.as_str()) {
                return Err(LoadError::schema(
                    &document,
                    format!("constraints[{}]: duplicate id '{}'", index, constraint.id),
                ));
            }
        }
        Ok(Self {
            document,
            version: None,
            constraints,
        })
    }

    fn from_tree(root: &JsonMap<String, JsonValue>, document: &str) -> LoadResult<Self> {
        let version = match root.get("constitutional_version").or_else(|| root.get("version")) {
            None | Some(JsonValue::Null) => None,
            Some(JsonValue::String(s)) => Some(s.clone()),
            Some(v @ (JsonValue::Number(_) | JsonValue::Bool(_))) => Some(v.to_string()),
            Some(other) => {
                return Err(LoadError::schema(
                    document,
                    format!("version must be a scalar, found {}", json_type_name(other)),
                ));
            }
        };

        let entries = match root.get("constraints") {
            Some(JsonValue::Array(entries)) => entries,
            Some(other) => {
                return Err(LoadError::schema(
                    document,
                    format!(
                        "'constraints' must be a list, found {}",
                        json_type_name(other)
                    ),
                ));
            }
            None => {
                return Err(LoadError::schema(
                    document,
                    "missing required field 'constraints'",
                ));
            }
        };

        let mut constraints = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            constraints.push(parse_constraint(entry, index, document)?);
        }

        let mut rules = Self::from_constraints(document, constraints)?;
        rules.version = version;
        Ok(rules)
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Look up a constraint by id.
    pub fn get(&self, id: &str) -> Option<&Constraint> {
        self.constraints.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Name of the document this was loaded from.
    pub fn document(&self) -> &str {
        &self.document
    }
}

fn parse_constraint(entry: &JsonValue, index: usize, document: &str) -> LoadResult<Constraint> {
    let JsonValue::Object(entry) = entry else {
        return Err(LoadError::schema(
            document,
            format!(
                "constraints[{}] must be a mapping, found {}",
                index,
                json_type_name(entry)
            ),
        ));
    };

    let id = match entry.get("id") {
        Some(JsonValue::String(id)) if !id.trim().is_empty() => id.clone(),
        Some(JsonValue::String(_)) => {
            return Err(LoadError::schema(
                document,
                format!("constraints[{}]: 'id' must not be empty", index),
            ));
        }
        Some(other) => {
            return Err(LoadError::schema(
                document,
                format!(
                    "constraints[{}]: 'id' must be a string, found {}",
                    index,
                    json_type_name(other)
                ),
            ));
        }
        None => {
            return Err(LoadError::schema(
                document,
                format!("constraints[{}]: missing required field 'id'", index),
            ));
        }
    };
    let at = format!("constraints[{}] ({})", index, id);

    let description = match entry.get("description") {
        None | Some(JsonValue::Null) => String::new(),
        Some(JsonValue::String(s)) => s.clone(),
        Some(other) => {
            return Err(LoadError::schema(
                document,
                format!(
                    "{}: 'description' must be a string, found {}",
                    at,
                    json_type_name(other)
                ),
            ));
        }
    };

    let predicate = string_field(entry, "predicate", &at, document)?;
    let require = string_field(entry, "require", &at, document)?;
    match (predicate, require) {
        (Some(source), None) => Constraint::new(id, description, source).map_err(|e| {
            LoadError::schema(document, format!("{}: invalid predicate: {}", at, e))
        }),
        (None, Some(path)) => {
            let path = FieldPath::parse(path).map_err(|e| {
                LoadError::schema(document, format!("{}: invalid 'require': {}", at, e))
            })?;
            Ok(Constraint::require(id, description, path))
        }
        (Some(_), Some(_)) => Err(LoadError::schema(
            document,
            format!("{}: 'predicate' and 'require' are mutually exclusive", at),
        )),
        (None, None) => Err(LoadError::schema(
            document,
            format!("{}: missing required field 'predicate'", at),
        )),
    }
}

fn string_field<'a>(
    entry: &'a JsonMap<String, JsonValue>,
    key: &str,
    at: &str,
    document: &str,
) -> LoadResult<Option<&'a str>> {
    match entry.get(key) {
        None => Ok(None),
        Some(JsonValue::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(LoadError::schema(
            document,
            format!(
                "{}: '{}' must be a string, found {}",
                at,
                key,
                json_type_name(other)
            ),
        )),
    }
}
