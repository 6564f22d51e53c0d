//! Quality Rubric - holistic scoring of a lesson script
//!
//! The rater (an external collaborator) scores a script 0-100 on each rubric
//! dimension. This module owns the rubric itself, validates the raw ratings
//! and turns them into a [`QualityReport`] with per-dimension gates.

use crate::error::{EngineError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Quality metrics measured by the rubric
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QualityMetric {
    /// Does the script teach toward its stated objectives?
    ObjectiveAlignment,
    /// Does each phase do its pedagogical job?
    StructuralIntegrity,
    /// Is the language clear for the audience?
    Clarity,
    /// Does it hold attention?
    Engagement,
    /// Is the time spent where the learning is?
    Pacing,
}

impl QualityMetric {
    /// Key used by raters
    pub fn key(&self) -> &'static str {
        match self {
            QualityMetric::ObjectiveAlignment => "objective_alignment",
            QualityMetric::StructuralIntegrity => "structural_integrity",
            QualityMetric::Clarity => "clarity",
            QualityMetric::Engagement => "engagement",
            QualityMetric::Pacing => "pacing",
        }
    }
}

/// Pass/Fail verdict
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
}

/// Hard or soft gate type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GateType {
    Hard,
    Soft,
}

/// Score for a single quality dimension
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionScore {
    pub metric: QualityMetric,
    /// Actual score value (0-100)
    pub value: f64,
    /// Required threshold
    pub threshold: f64,
    pub gate: GateType,
    pub result: Verdict,
}

impl DimensionScore {
    /// Create a new dimension score
    pub fn new(metric: QualityMetric, value: f64, threshold: f64, gate: GateType) -> Self {
        let result = if value >= threshold {
            Verdict::Pass
        } else {
            Verdict::Fail
        };

        Self {
            metric,
            value,
            threshold,
            gate,
            result,
        }
    }
}

/// Quality Report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityReport {
    pub schema_version: String,
    /// Quality report ID - qr_<uuid>
    pub report_id: String,
    pub scores: Vec<DimensionScore>,
    pub overall: Verdict,
    /// Weighted 0-100 score across all dimensions
    pub weighted_score: f64,
    pub metadata: QualityMetadata,
}

impl QualityReport {
    /// Create a new quality report
    pub fn new(scores: Vec<DimensionScore>, weighted_score: f64, metadata: QualityMetadata) -> Self {
        let overall = Self::compute_overall_verdict(&scores);

        Self {
            schema_version: "1.0".to_string(),
            report_id: format!("qr_{}", uuid::Uuid::new_v4()),
            scores,
            overall,
            weighted_score,
            metadata,
        }
    }

    /// Fail iff any hard gate failed
    fn compute_overall_verdict(scores: &[DimensionScore]) -> Verdict {
        let hard_gate_failed = scores
            .iter()
            .any(|s| s.gate == GateType::Hard && s.result == Verdict::Fail);

        if hard_gate_failed {
            Verdict::Fail
        } else {
            Verdict::Pass
        }
    }

    /// Check if the report passes all hard gates
    pub fn passes_hard_gates(&self) -> bool {
        self.overall == Verdict::Pass
    }

    /// Get all failed dimensions
    pub fn failed_dimensions(&self) -> Vec<QualityMetric> {
        self.scores
            .iter()
            .filter(|s| s.result == Verdict::Fail)
            .map(|s| s.metric)
            .collect()
    }
}

/// Metadata about quality evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityMetadata {
    pub rubric_version: String,
    /// Objectives the script was rated against
    pub objectives: Vec<String>,
    /// When evaluation was performed
    pub evaluated_at: DateTime<Utc>,
    /// Evaluation duration in milliseconds
    pub evaluation_duration_ms: u64,
}

/// Quality rubric for scoring scripts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityRubric {
    pub version: String,
    pub dimensions: Vec<RubricDimension>,
}

/// A single dimension in the quality rubric
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RubricDimension {
    pub metric: QualityMetric,
    pub description: String,
    /// Weight for computing overall score (0-1)
    pub weight: f64,
    pub threshold: f64,
    pub gate: GateType,
}

impl QualityRubric {
    /// Rubric v1 with the five standard dimensions
    pub fn v1() -> Self {
        let dimension = |metric, description: &str, weight, threshold, gate| RubricDimension {
            metric,
            description: description.to_string(),
            weight,
            threshold,
            gate,
        };

        Self {
            version: "1.0".to_string(),
            dimensions: vec![
                dimension(
                    QualityMetric::ObjectiveAlignment,
                    "Every phase works toward the stated objectives",
                    0.30,
                    80.0,
                    GateType::Hard,
                ),
                dimension(
                    QualityMetric::StructuralIntegrity,
                    "Prepare, initiate, deliver and end each fulfil their role",
                    0.20,
                    75.0,
                    GateType::Hard,
                ),
                dimension(
                    QualityMetric::Clarity,
                    "Explanations are clear and sequenced",
                    0.20,
                    70.0,
                    GateType::Soft,
                ),
                dimension(
                    QualityMetric::Engagement,
                    "Examples, questions and activities hold attention",
                    0.15,
                    65.0,
                    GateType::Soft,
                ),
                dimension(
                    QualityMetric::Pacing,
                    "Time is spent in proportion to learning value",
                    0.15,
                    70.0,
                    GateType::Soft,
                ),
            ],
        }
    }

    /// Get dimension by metric
    pub fn get_dimension(&self, metric: QualityMetric) -> Option<&RubricDimension> {
        self.dimensions.iter().find(|d| d.metric == metric)
    }

    /// Validate a rater's raw output into `(metric, score)` pairs
    ///
    /// Accepts `{"clarity": 80, ...}` or the same object under a `scores`
    /// key. Unknown keys are ignored; every known metric present must be a
    /// number within 0-100.
    pub fn parse_ratings(&self, raw: &Value) -> Result<Vec<(QualityMetric, f64)>> {
        let object = raw
            .get("scores")
            .unwrap_or(raw)
            .as_object()
            .ok_or_else(|| EngineError::malformed("quality rating is not an object"))?;

        let mut ratings = Vec::new();
        for dim in &self.dimensions {
            let Some(value) = object.get(dim.metric.key()) else {
                continue;
            };
            let score = value.as_f64().ok_or_else(|| {
                EngineError::malformed(format!("rating for {} is not a number", dim.metric.key()))
            })?;
            if !(0.0..=100.0).contains(&score) {
                return Err(EngineError::malformed(format!(
                    "rating for {} out of range: {}",
                    dim.metric.key(),
                    score
                )));
            }
            ratings.push((dim.metric, score));
        }

        Ok(ratings)
    }

    /// Score all dimensions; unrated dimensions score 0
    pub fn score_all(&self, scores: &[(QualityMetric, f64)]) -> Vec<DimensionScore> {
        self.dimensions
            .iter()
            .map(|dim| {
                let value = scores
                    .iter()
                    .find(|(m, _)| *m == dim.metric)
                    .map(|(_, v)| *v)
                    .unwrap_or(0.0);

                DimensionScore::new(dim.metric, value, dim.threshold, dim.gate)
            })
            .collect()
    }

    /// Compute weighted overall score
    pub fn compute_weighted_score(&self, scores: &[DimensionScore]) -> f64 {
        let mut total = 0.0;
        let mut weight_sum = 0.0;

        for dim in &self.dimensions {
            if let Some(score) = scores.iter().find(|s| s.metric == dim.metric) {
                total += score.value * dim.weight;
                weight_sum += dim.weight;
            }
        }

        if weight_sum > 0.0 {
            total / weight_sum
        } else {
            0.0
        }
    }

    /// Build a full report from raw ratings
    pub fn report(
        &self,
        ratings: &[(QualityMetric, f64)],
        objectives: &[String],
        started_at: std::time::Instant,
    ) -> QualityReport {
        let scores = self.score_all(ratings);
        let weighted = self.compute_weighted_score(&scores);

        let metadata = QualityMetadata {
            rubric_version: self.version.clone(),
            objectives: objectives.to_vec(),
            evaluated_at: Utc::now(),
            evaluation_duration_ms: started_at.elapsed().as_millis() as u64,
        };

        QualityReport::new(scores, weighted, metadata)
    }
}

impl Default for QualityRubric {
    fn default() -> Self {
        Self::v1()
    }
}
