//! Quality assessment - annotating transformed scripts
//!
//! Every optimization result carries a [`QualityAssessment`]: the structural
//! report of the resulting script plus, for generated rewrites, the
//! compression or expansion quality measured against the original.

pub mod compression;
pub mod expansion;
pub mod patterns;
pub mod rubric;

use crate::script::Script;
use crate::structure::{validate_structure, StructureReport};
use serde::{Deserialize, Serialize};

pub use compression::{validate_compression_quality, CompressionQuality};
pub use expansion::{validate_expansion_quality, ExpansionQuality};
pub use rubric::{QualityMetric, QualityReport, QualityRubric};

/// Quality annotation attached to an optimization result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityAssessment {
    pub structure: StructureReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression: Option<CompressionQuality>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expansion: Option<ExpansionQuality>,
}

impl QualityAssessment {
    /// Human-readable concerns worth surfacing to a reviewer
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if !self.structure.structure_complete {
            let missing: Vec<&str> = self
                .structure
                .missing_phases
                .iter()
                .map(|p| p.as_str())
                .collect();
            warnings.push(format!("missing phases: {}", missing.join(", ")));
        }
        if !self.structure.phase_balance.within_expected_ranges {
            warnings.push(format!(
                "phase balance outside expected ranges (score {:.2})",
                self.structure.phase_balance.balance_score
            ));
        }

        if let Some(compression) = &self.compression {
            if !compression.objectives_preserved.preserved {
                warnings.push(format!(
                    "objectives dropped: {} of {} kept",
                    compression.objectives_preserved.compressed_count,
                    compression.objectives_preserved.original_count
                ));
            }
            if !compression.content_integrity.critical_content_maintained {
                warnings.push(format!(
                    "concepts lost: {}",
                    compression.content_integrity.missing_concepts.join(", ")
                ));
            }
            if !compression.compression_effectiveness.effective_compression {
                warnings.push(format!(
                    "ineffective compression (time ratio {:.2})",
                    compression.compression_effectiveness.time_ratio
                ));
            }
        }

        if let Some(expansion) = &self.expansion {
            if !expansion.focus_maintained.maintained {
                warnings.push(format!(
                    "focus drift: {} new topics",
                    expansion.focus_maintained.new_topic_count
                ));
            }
            if !expansion.value_added.meaningful_addition {
                warnings.push(format!(
                    "little value added (score {:.2})",
                    expansion.value_added.value_score
                ));
            }
        }

        warnings
    }
}

/// Builds quality assessments for each optimization path
#[derive(Debug, Clone, Copy, Default)]
pub struct QualityAssessor;

impl QualityAssessor {
    /// Structure only, for paths that do not rewrite content generatively
    pub fn structural(&self, script: &Script) -> QualityAssessment {
        QualityAssessment {
            structure: validate_structure(script),
            compression: None,
            expansion: None,
        }
    }

    /// Structure of the compressed script plus compression quality
    pub fn compression(&self, original: &Script, compressed: &Script) -> QualityAssessment {
        QualityAssessment {
            structure: validate_structure(compressed),
            compression: Some(validate_compression_quality(original, compressed)),
            expansion: None,
        }
    }

    /// Structure of the expanded script plus expansion quality
    pub fn expansion(&self, original: &Script, expanded: &Script) -> QualityAssessment {
        QualityAssessment {
            structure: validate_structure(expanded),
            compression: None,
            expansion: Some(validate_expansion_quality(original, expanded)),
        }
    }
}
