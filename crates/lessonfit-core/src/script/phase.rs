//! Phase - one pedagogical segment of a lesson script

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A single phase of a script
///
/// Only `duration` and `content` drive the engine's arithmetic. The optional
/// collections feed concept extraction and quality scoring. Fields the engine
/// does not know about are kept in `extra` so a phase survives a round trip
/// through the optimizer unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    /// Duration in seconds (non-negative)
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration: f64,

    /// Spoken or displayed text, may be empty
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,

    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub objectives: Vec<Objective>,

    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub learning_objectives: Vec<Objective>,

    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub core_concepts: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub keypoints: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub summary_points: Vec<String>,

    /// Worked examples, text or structured; only counted
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<Value>,

    /// Reflection prompts, text or structured; only counted
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub reflection_questions: Vec<Value>,

    /// Unrecognized fields, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Phase {
    /// Create a phase with a duration and content
    pub fn new(duration: f64, content: impl Into<String>) -> Self {
        Self {
            duration,
            content: content.into(),
            ..Default::default()
        }
    }

    /// Add core concepts
    pub fn with_concepts<I, S>(mut self, concepts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.core_concepts.extend(concepts.into_iter().map(Into::into));
        self
    }

    /// Add plain-text objectives
    pub fn with_objectives<I, S>(mut self, objectives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.objectives
            .extend(objectives.into_iter().map(|o| Objective::Text(o.into())));
        self
    }

    /// Add worked examples
    pub fn with_examples<I, S>(mut self, examples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Value>,
    {
        self.examples.extend(examples.into_iter().map(Into::into));
        self
    }

    /// Add reflection questions
    pub fn with_reflection_questions<I, S>(mut self, questions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Value>,
    {
        self.reflection_questions
            .extend(questions.into_iter().map(Into::into));
        self
    }

    /// Same phase with a different duration and content
    pub fn rewritten(&self, duration: f64, content: String) -> Self {
        Self {
            duration,
            content,
            ..self.clone()
        }
    }

    /// Number of whitespace-delimited words in the content
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}

/// Explicit `null` reads as the field's empty value
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A learning objective: free text or a structured record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Objective {
    Text(String),
    Structured(ObjectiveRecord),
}

impl Objective {
    /// The objective's text, whichever form it takes
    pub fn text(&self) -> &str {
        match self {
            Objective::Text(text) => text,
            Objective::Structured(record) => &record.description,
        }
    }
}

/// Structured objective as produced by taxonomy tooling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveRecord {
    #[serde(alias = "text", alias = "objective")]
    pub description: String,

    /// Additional attributes (taxonomy level, verb, assessment hints, ...)
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_phase_defaults_from_sparse_json() {
        let phase: Phase = serde_json::from_value(json!({ "duration": 30 })).unwrap();

        assert_eq!(phase.duration, 30.0);
        assert!(phase.content.is_empty());
        assert!(phase.core_concepts.is_empty());
        assert_eq!(phase.word_count(), 0);
    }

    #[test]
    fn test_objectives_accept_text_and_records() {
        let phase: Phase = serde_json::from_value(json!({
            "duration": 45,
            "objectives": [
                "Explain photosynthesis",
                { "text": "Label the parts of a leaf", "bloom_level": "remember" }
            ]
        }))
        .unwrap();

        let texts: Vec<&str> = phase.objectives.iter().map(Objective::text).collect();
        assert_eq!(texts, vec!["Explain photosynthesis", "Label the parts of a leaf"]);

        match &phase.objectives[1] {
            Objective::Structured(record) => {
                assert_eq!(record.attributes["bloom_level"], json!("remember"));
            }
            other => panic!("expected structured objective, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_fields_round_trip() {
        let value = json!({
            "duration": 60,
            "content": "Warm up",
            "slide_ids": [3, 4]
        });
        let phase: Phase = serde_json::from_value(value).unwrap();
        assert_eq!(phase.extra["slide_ids"], json!([3, 4]));

        let back = serde_json::to_value(&phase).unwrap();
        assert_eq!(back["slide_ids"], json!([3, 4]));
        assert!(back.get("examples").is_none());
    }

    #[test]
    fn test_structured_examples_accepted() {
        let phase: Phase = serde_json::from_value(json!({
            "duration": 10,
            "examples": ["a lever", { "title": "leaf", "body": "sunlight" }],
            "reflection_questions": [{ "prompt": "Why green?", "wait_secs": 5 }]
        }))
        .unwrap();

        assert_eq!(phase.examples.len(), 2);
        assert_eq!(phase.examples[1]["title"], json!("leaf"));
        assert_eq!(phase.reflection_questions.len(), 1);

        let back = serde_json::to_value(&phase).unwrap();
        assert_eq!(back["examples"][1]["body"], json!("sunlight"));
    }

    #[test]
    fn test_null_fields_read_as_empty() {
        let phase: Phase = serde_json::from_value(json!({
            "duration": 20,
            "content": null,
            "core_concepts": null,
            "examples": null
        }))
        .unwrap();

        assert_eq!(phase.duration, 20.0);
        assert!(phase.content.is_empty());
        assert!(phase.core_concepts.is_empty());
        assert!(phase.examples.is_empty());
        assert!(phase.extra.is_empty());
    }

    #[test]
    fn test_builders_fill_collections() {
        let phase = Phase::new(30.0, "")
            .with_examples(["a seesaw", "a crowbar"])
            .with_reflection_questions([json!({ "prompt": "Where else are levers?" })]);

        assert_eq!(phase.examples, vec![json!("a seesaw"), json!("a crowbar")]);
        assert_eq!(phase.reflection_questions[0]["prompt"], json!("Where else are levers?"));
    }

    #[test]
    fn test_rewritten_keeps_collections() {
        let phase = Phase::new(40.0, "Original text").with_concepts(["gravity"]);
        let rewritten = phase.rewritten(25.0, "Shorter".to_string());

        assert_eq!(rewritten.duration, 25.0);
        assert_eq!(rewritten.content, "Shorter");
        assert_eq!(rewritten.core_concepts, vec!["gravity".to_string()]);
        assert_eq!(phase.duration, 40.0);
    }
}
