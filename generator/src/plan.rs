//! Forge planning: deployment shape derived from a validated specification.

use std::fmt;

use forge_core::{FieldPath, Map, Value};
use tracing::warn;

/// Key under which the plan is attached to an artifact.
pub const FORGE_KEY: &str = "forge";

const BASE_FILES: &[&str] = &[
    "kernel.yml",
    "domain_config.json",
    "docker-compose.yml",
    "constitutional_linter.py",
    "README.md",
];

const DAIN_FILES: &[&str] = &["docker-compose.dain.yml", "dain_c_agent.py"];

/// Target hardware named by `constraints.hardware`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HardwareProfile {
    RaspberryPi,
    Desktop,
    Dedicated,
    Cloud,
    Other(String),
}

impl HardwareProfile {
    pub fn parse(name: &str) -> Self {
        match name {
            "raspberry_pi" => HardwareProfile::RaspberryPi,
            "desktop" => HardwareProfile::Desktop,
            "dedicated" => HardwareProfile::Dedicated,
            "cloud" => HardwareProfile::Cloud,
            other => HardwareProfile::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            HardwareProfile::RaspberryPi => "raspberry_pi",
            HardwareProfile::Desktop => "desktop",
            HardwareProfile::Dedicated => "dedicated",
            HardwareProfile::Cloud => "cloud",
            HardwareProfile::Other(name) => name,
        }
    }
}

impl fmt::Display for HardwareProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deployment architecture of a forge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Architecture {
    TwoNode,
    DecoupledDain,
    DecoupledNonDain,
}

impl Architecture {
    pub fn as_str(&self) -> &'static str {
        match self {
            Architecture::TwoNode => "two_node",
            Architecture::DecoupledDain => "decoupled_dain",
            Architecture::DecoupledNonDain => "decoupled_non_dain",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The forge section of a validated artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct ForgePlan {
    pub domain: String,
    pub hardware: HardwareProfile,
    pub architecture: Architecture,
    pub memory_limit: Option<&'static str>,
    pub dain_enabled: bool,
    pub files: Vec<String>,
    pub success_metrics: Vec<Value>,
    pub constitutional_requirements: Vec<Value>,
    pub warnings: Vec<String>,
}

impl ForgePlan {
    /// Derive a plan from specification fields.
    ///
    /// Returns `None` unless both `context.domain` and `constraints.hardware`
    /// are strings.
    pub fn from_fields(fields: &Map) -> Option<Self> {
        let domain = lookup(fields, &["context", "domain"])?.as_str()?.to_string();
        let hardware = HardwareProfile::parse(lookup(fields, &["constraints", "hardware"])?.as_str()?);
        let advanced = lookup(fields, &["constraints", "technical_capacity"])
            .and_then(Value::as_str)
            == Some("advanced");
        let wants_ai = lookup(fields, &["customization_requests", "wants_ai_nodes"])
            .and_then(Value::as_bool)
            .unwrap_or(false);

        let mut warnings = Vec::new();
        let (architecture, memory_limit, dain_enabled) = match &hardware {
            HardwareProfile::RaspberryPi | HardwareProfile::Desktop => {
                if wants_ai {
                    warnings.push("DAIN generation disabled: requires dedicated hardware".to_string());
                }
                let limit = if hardware == HardwareProfile::RaspberryPi {
                    "3G"
                } else {
                    "6G"
                };
                (Architecture::TwoNode, Some(limit), false)
            }
            HardwareProfile::Dedicated | HardwareProfile::Cloud if advanced && wants_ai => {
                let limit = if hardware == HardwareProfile::Dedicated {
                    "4G"
                } else {
                    "8G"
                };
                (Architecture::DecoupledDain, Some(limit), true)
            }
            HardwareProfile::Dedicated | HardwareProfile::Cloud => {
                if wants_ai {
                    warnings.push(
                        "DAIN generation disabled: requires advanced technical capacity".to_string(),
                    );
                }
                (Architecture::DecoupledNonDain, None, false)
            }
            HardwareProfile::Other(name) => {
                warnings.push(format!(
                    "unrecognised hardware profile '{}': defaulting to two_node",
                    name
                ));
                (Architecture::TwoNode, None, false)
            }
        };

        for warning in &warnings {
            warn!(domain = %domain, "{}", warning);
        }

        let mut files: Vec<String> = BASE_FILES
            .iter()
            .map(|file| format!("{}/{}", domain, file))
            .collect();
        if architecture == Architecture::DecoupledDain {
            files.extend(DAIN_FILES.iter().map(|file| format!("{}/{}", domain, file)));
        }

        Some(Self {
            domain,
            hardware,
            architecture,
            memory_limit,
            dain_enabled,
            files,
            success_metrics: list_field(fields, "success_metrics"),
            constitutional_requirements: list_field(fields, "constitutional_requirements"),
            warnings,
        })
    }

    /// The plan as a document value.
    pub fn to_value(&self) -> Value {
        let strings = |items: &[String]| Value::List(items.iter().map(|s| Value::from(s.as_str())).collect());

        let mut map = Map::new();
        map.insert("domain".to_string(), Value::from(self.domain.as_str()));
        map.insert("hardware".to_string(), Value::from(self.hardware.as_str()));
        map.insert(
            "architecture".to_string(),
            Value::from(self.architecture.as_str()),
        );
        map.insert(
            "memory_limit".to_string(),
            self.memory_limit.map(Value::from).unwrap_or(Value::Null),
        );
        map.insert("dain_enabled".to_string(), Value::Bool(self.dain_enabled));
        map.insert(
            "constitutional_compliance".to_string(),
            Value::from("verified"),
        );
        map.insert("files_generated".to_string(), strings(&self.files));
        map.insert(
            "success_metrics".to_string(),
            Value::List(self.success_metrics.clone()),
        );
        map.insert(
            "constitutional_requirements".to_string(),
            Value::List(self.constitutional_requirements.clone()),
        );
        map.insert("warnings".to_string(), strings(&self.warnings));
        Value::Map(map)
    }
}

fn lookup<'a>(fields: &'a Map, segments: &[&str]) -> Option<&'a Value> {
    let path = FieldPath::new(segments.iter().map(|s| s.to_string()).collect()).ok()?;
    path.resolve(fields)
}

fn list_field(fields: &Map, key: &str) -> Vec<Value> {
    fields
        .get(key)
        .and_then(Value::as_list)
        .map(<[Value]>::to_vec)
        .unwrap_or_default()
}
