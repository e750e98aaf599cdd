//! Meta-Forge Generator
//!
//! Turns a domain specification whose constraints all passed into an
//! artifact: the specification, a validated marker and, when the
//! specification names a domain and hardware profile, a forge plan.

mod artifact;
mod config;
mod error;
mod generate;
mod plan;

pub use artifact::Artifact;
pub use config::GeneratorConfig;
pub use error::*;
pub use generate::{generate, Generator};
pub use plan::{Architecture, ForgePlan, HardwareProfile, FORGE_KEY};
