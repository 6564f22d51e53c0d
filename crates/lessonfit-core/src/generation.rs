//! Generation collaborator - the external rewrite capability
//!
//! The engine never writes new prose itself. Large duration changes are
//! delegated to a [`ScriptGenerator`] (typically an LLM client) injected at
//! construction. Its output is untrusted: the transformer parses and
//! validates whatever comes back before anything else looks at it.

use crate::script::Script;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a generated rewrite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    Compress,
    Expand,
    /// Holistic quality rating (no rewrite)
    Rate,
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GenerationMode::Compress => "compress",
            GenerationMode::Expand => "expand",
            GenerationMode::Rate => "rate",
        };
        f.write_str(name)
    }
}

/// Constraints sent with every compression request
pub const COMPRESSION_CONSTRAINTS: &[&str] = &[
    "Keep all four phases: prepare, initiate, deliver, end",
    "Keep every learning objective",
    "Remove redundancy and filler before removing substance",
    "Maintain the flow between adjacent phases",
];

/// Constraints sent with every expansion request
pub const EXPANSION_CONSTRAINTS: &[&str] = &[
    "Keep all four phases: prepare, initiate, deliver, end",
    "Add worked examples",
    "Add analogies that connect to prior knowledge",
    "Add checks for understanding",
    "Do not introduce topics beyond the existing concepts",
];

/// A rewrite request handed to the generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub mode: GenerationMode,
    /// The full current script
    pub script: Script,
    /// Target total duration in seconds
    pub target_duration: f64,
    pub constraints: Vec<String>,
}

impl GenerationRequest {
    /// Compression request with the standard constraints
    pub fn compress(script: &Script, target_duration: f64) -> Self {
        Self::with_constraints(GenerationMode::Compress, script, target_duration, COMPRESSION_CONSTRAINTS)
    }

    /// Expansion request with the standard constraints
    pub fn expand(script: &Script, target_duration: f64) -> Self {
        Self::with_constraints(GenerationMode::Expand, script, target_duration, EXPANSION_CONSTRAINTS)
    }

    fn with_constraints(
        mode: GenerationMode,
        script: &Script,
        target_duration: f64,
        constraints: &[&str],
    ) -> Self {
        Self {
            mode,
            script: script.clone(),
            target_duration,
            constraints: constraints.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Generator trait - abstract interface for any text-generation backend
///
/// Implementations own their transport, prompting and any retry policy. The
/// engine applies its own timeout around each call and surfaces failures
/// unchanged.
#[async_trait::async_trait]
pub trait ScriptGenerator: Send + Sync + fmt::Debug {
    /// Rewrite a script toward the request's target duration
    ///
    /// Should return a phase-keyed JSON object shaped like [`Script`].
    async fn generate(&self, request: &GenerationRequest) -> anyhow::Result<serde_json::Value>;

    /// Rate a script 0-100 on each rubric dimension
    ///
    /// Should return an object keyed by metric name (see
    /// [`QualityMetric::key`](crate::quality::QualityMetric::key)).
    async fn rate_quality(
        &self,
        script: &Script,
        objectives: &[String],
    ) -> anyhow::Result<serde_json::Value>;
}
