//! Generated artifacts.

use forge_core::{Map, Value};
use serde::{Serialize, Serializer};

use crate::plan::ForgePlan;

/// A validated copy of a domain specification.
///
/// Serializes as the enriched field map only.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    specification: String,
    marker_key: String,
    fields: Map,
    plan: Option<ForgePlan>,
}

impl Artifact {
    pub(crate) fn new(
        specification: String,
        marker_key: String,
        fields: Map,
        plan: Option<ForgePlan>,
    ) -> Self {
        Self {
            specification,
            marker_key,
            fields,
            plan,
        }
    }

    /// Whether the validated marker is set.
    pub fn is_validated(&self) -> bool {
        self.fields.get(&self.marker_key) == Some(&Value::Bool(true))
    }

    /// Name of the specification this artifact was generated from.
    pub fn specification(&self) -> &str {
        &self.specification
    }

    pub fn fields(&self) -> &Map {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// The forge plan, if one was derived.
    pub fn plan(&self) -> Option<&ForgePlan> {
        self.plan.as_ref()
    }

    pub fn into_fields(self) -> Map {
        self.fields
    }
}

impl Serialize for Artifact {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}
