//! Generator configuration.

use forge_core::messages::VALIDATED_MARKER;

/// Options for artifact generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Key of the marker added to validated artifacts. Overwrites a
    /// same-named field of the specification.
    pub marker_key: String,
    /// Attach a forge plan under `forge` when the specification has the
    /// fields to derive one.
    pub plan_forge: bool,
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_marker_key(mut self, key: impl Into<String>) -> Self {
        self.marker_key = key.into();
        self
    }

    pub fn with_plan_forge(mut self, plan: bool) -> Self {
        self.plan_forge = plan;
        self
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            marker_key: VALIDATED_MARKER.to_string(),
            plan_forge: true,
        }
    }
}
