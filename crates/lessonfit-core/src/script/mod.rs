//! Script model - phase-keyed lesson scripts
//!
//! A script is an ordered mapping from phase name to [`Phase`]. The four
//! canonical phases always sort first, in teaching order, so iterating a
//! script walks `prepare → initiate → deliver → end` followed by any
//! non-canonical phases alphabetically.
//!
//! Scripts are values: every stage of the pipeline takes a `&Script` and
//! returns a new one, leaving the input available for comparison.

pub mod phase;

pub use phase::{Objective, ObjectiveRecord, Phase};

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Name of a phase
///
/// Variant order drives ordering, so canonical phases come first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PhaseName {
    Prepare,
    Initiate,
    Deliver,
    End,
    Other(String),
}

impl PhaseName {
    /// The four canonical phases, in teaching order
    pub const CANONICAL: [PhaseName; 4] = [
        PhaseName::Prepare,
        PhaseName::Initiate,
        PhaseName::Deliver,
        PhaseName::End,
    ];

    /// Wire name of the phase
    pub fn as_str(&self) -> &str {
        match self {
            PhaseName::Prepare => "prepare",
            PhaseName::Initiate => "initiate",
            PhaseName::Deliver => "deliver",
            PhaseName::End => "end",
            PhaseName::Other(name) => name,
        }
    }

    /// Whether this is one of the four canonical phases
    pub fn is_canonical(&self) -> bool {
        !matches!(self, PhaseName::Other(_))
    }
}

impl From<String> for PhaseName {
    fn from(name: String) -> Self {
        match name.as_str() {
            "prepare" => PhaseName::Prepare,
            "initiate" => PhaseName::Initiate,
            "deliver" => PhaseName::Deliver,
            "end" => PhaseName::End,
            _ => PhaseName::Other(name),
        }
    }
}

impl From<&str> for PhaseName {
    fn from(name: &str) -> Self {
        PhaseName::from(name.to_string())
    }
}

impl From<PhaseName> for String {
    fn from(name: PhaseName) -> Self {
        name.as_str().to_string()
    }
}

impl fmt::Display for PhaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lesson script
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    phases: BTreeMap<PhaseName, Phase>,
}

impl Script {
    /// Create an empty script
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style phase insertion
    pub fn with_phase(mut self, name: impl Into<PhaseName>, phase: Phase) -> Self {
        self.phases.insert(name.into(), phase);
        self
    }

    /// Get a phase by name
    pub fn phase(&self, name: &PhaseName) -> Option<&Phase> {
        self.phases.get(name)
    }

    /// Iterate phases in order
    pub fn phases(&self) -> impl Iterator<Item = (&PhaseName, &Phase)> {
        self.phases.iter()
    }

    /// Number of phases
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// True when the script has no phases
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Canonical phases not present in this script
    pub fn missing_phases(&self) -> Vec<PhaseName> {
        PhaseName::CANONICAL
            .iter()
            .filter(|name| !self.phases.contains_key(*name))
            .cloned()
            .collect()
    }

    /// Total duration in seconds, recomputed from the phases on every call
    pub fn total_duration(&self) -> f64 {
        crate::duration::total_duration(self)
    }

    /// Build a new script by mapping every phase
    pub fn map_phases<F>(&self, mut f: F) -> Script
    where
        F: FnMut(&PhaseName, &Phase) -> Phase,
    {
        Script {
            phases: self
                .phases
                .iter()
                .map(|(name, phase)| (name.clone(), f(name, phase)))
                .collect(),
        }
    }

    /// Parse untrusted JSON (typically generator output) into a script
    ///
    /// The value must be an object of phase objects, each with a finite,
    /// non-negative numeric `duration`, and all four canonical phases must be
    /// present. Anything else is rejected as malformed.
    pub fn from_generated(value: Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| EngineError::malformed(format!("expected a phase map, got {}", kind_of(&value))))?;

        for (name, phase) in object {
            let fields = phase.as_object().ok_or_else(|| {
                EngineError::malformed(format!("phase '{}' is {}, not an object", name, kind_of(phase)))
            })?;
            match fields.get("duration").and_then(Value::as_f64) {
                Some(d) if d.is_finite() && d >= 0.0 => {}
                Some(d) => {
                    return Err(EngineError::malformed(format!(
                        "phase '{}' has invalid duration {}",
                        name, d
                    )))
                }
                None => {
                    return Err(EngineError::malformed(format!(
                        "phase '{}' has no numeric duration",
                        name
                    )))
                }
            }
        }

        let script: Script = serde_json::from_value(value)
            .map_err(|e| EngineError::malformed(format!("not a script: {}", e)))?;

        let missing = script.missing_phases();
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(PhaseName::as_str).collect();
            return Err(EngineError::malformed(format!(
                "missing required phases: {}",
                names.join(", ")
            )));
        }

        Ok(script)
    }
}

impl FromIterator<(PhaseName, Phase)> for Script {
    fn from_iter<I: IntoIterator<Item = (PhaseName, Phase)>>(iter: I) -> Self {
        Self {
            phases: iter.into_iter().collect(),
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_script_json() -> Value {
        json!({
            "end": { "duration": 30, "content": "Recap" },
            "deliver": { "duration": 120, "content": "Main lesson" },
            "prepare": { "duration": 30, "content": "Set up" },
            "initiate": { "duration": 60, "content": "Hook" }
        })
    }

    #[test]
    fn test_phase_order_is_pedagogical() {
        let script: Script = serde_json::from_value(full_script_json()).unwrap();
        let names: Vec<&str> = script.phases().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["prepare", "initiate", "deliver", "end"]);
    }

    #[test]
    fn test_non_canonical_phases_sort_after() {
        let script = Script::new()
            .with_phase("warmup", Phase::new(10.0, ""))
            .with_phase("end", Phase::new(10.0, ""))
            .with_phase("appendix", Phase::new(10.0, ""));

        let names: Vec<&str> = script.phases().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["end", "appendix", "warmup"]);
        assert!(!PhaseName::from("warmup").is_canonical());
    }

    #[test]
    fn test_missing_phases() {
        let script = Script::new()
            .with_phase("prepare", Phase::new(10.0, ""))
            .with_phase("end", Phase::new(10.0, ""));
        assert_eq!(
            script.missing_phases(),
            vec![PhaseName::Initiate, PhaseName::Deliver]
        );
    }

    #[test]
    fn test_serializes_as_phase_map() {
        let script = Script::new().with_phase("deliver", Phase::new(90.0, "Body"));
        let value = serde_json::to_value(&script).unwrap();
        assert_eq!(value["deliver"]["duration"], json!(90.0));
        assert_eq!(value["deliver"]["content"], json!("Body"));
    }

    #[test]
    fn test_from_generated_accepts_complete_script() {
        let script = Script::from_generated(full_script_json()).unwrap();
        assert_eq!(script.len(), 4);
        assert_eq!(script.total_duration(), 240.0);
    }

    #[test]
    fn test_from_generated_rejects_non_object() {
        let err = Script::from_generated(json!("just some text")).unwrap_err();
        assert!(matches!(err, EngineError::MalformedGeneration(_)));
    }

    #[test]
    fn test_from_generated_rejects_missing_phase() {
        let mut value = full_script_json();
        value.as_object_mut().unwrap().remove("end");

        let err = Script::from_generated(value).unwrap_err();
        match err {
            EngineError::MalformedGeneration(reason) => assert!(reason.contains("end")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_from_generated_rejects_bad_duration() {
        let mut value = full_script_json();
        value["deliver"]["duration"] = json!(-4);
        assert!(Script::from_generated(value.clone()).is_err());

        value["deliver"]["duration"] = json!("two minutes");
        assert!(Script::from_generated(value).is_err());
    }

    #[test]
    fn test_map_phases_leaves_input_untouched() {
        let script: Script = serde_json::from_value(full_script_json()).unwrap();
        let doubled = script.map_phases(|_, p| p.rewritten(p.duration * 2.0, p.content.clone()));

        assert_eq!(script.total_duration(), 240.0);
        assert_eq!(doubled.total_duration(), 480.0);
    }
}
