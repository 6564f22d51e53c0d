//! Optimization Coordinator - the public entry point
//!
//! Classifies how far a script is from its target duration and dispatches:
//! small deviations go to the [`ContentAdapter`], large ones to the
//! [`ContentTransformer`]. Every result carries the resulting script, the
//! duration bookkeeping and a [`QualityAssessment`].

use crate::adapter::ContentAdapter;
use crate::config::{OptimizerConfig, DEFAULT_TOLERANCE_SECS};
use crate::duration::safe_ratio;
use crate::error::{EngineError, Result};
use crate::generation::ScriptGenerator;
use crate::quality::{QualityAssessment, QualityAssessor, QualityReport, QualityRubric};
use crate::script::Script;
use crate::transformer::{ContentTransformer, Transformation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

/// Which path produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizationType {
    /// Nothing to optimize (empty script)
    None,
    /// Deterministic local adjustment
    Minor,
    Compression,
    Expansion,
}

/// How a script's duration relates to its target
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DurationDeviation {
    /// `|current - target| <= tolerance`
    WithinTolerance { delta: f64 },
    /// Longer than target by more than the tolerance
    TooLong { delta: f64 },
    /// Shorter than target by more than the tolerance
    TooShort { delta: f64 },
}

impl DurationDeviation {
    /// Classify `current` against `target`; the tolerance boundary is inclusive
    pub fn classify(current: f64, target: f64, tolerance: f64) -> Self {
        let delta = current - target;
        if delta > tolerance {
            DurationDeviation::TooLong { delta }
        } else if delta < -tolerance {
            DurationDeviation::TooShort { delta }
        } else {
            DurationDeviation::WithinTolerance { delta }
        }
    }

    /// Signed `current - target`
    pub fn delta(&self) -> f64 {
        match *self {
            DurationDeviation::WithinTolerance { delta }
            | DurationDeviation::TooLong { delta }
            | DurationDeviation::TooShort { delta } => delta,
        }
    }

    /// The path this deviation is dispatched to
    pub fn optimization_type(&self) -> OptimizationType {
        match self {
            DurationDeviation::WithinTolerance { .. } => OptimizationType::Minor,
            DurationDeviation::TooLong { .. } => OptimizationType::Compression,
            DurationDeviation::TooShort { .. } => OptimizationType::Expansion,
        }
    }
}

/// Per-call options
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizeOptions {
    /// Seconds of deviation still handled as a minor adjustment
    pub tolerance: f64,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE_SECS,
        }
    }
}

impl OptimizeOptions {
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self { tolerance }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationMetadata {
    pub original_duration: f64,
    pub resulting_duration: f64,
    /// `resulting / original`, 0 when the original was empty
    pub duration_ratio: f64,
    pub optimization_type: OptimizationType,
    pub target_duration: f64,
    pub tolerance: f64,
    pub quality_assessment: QualityAssessment,
}

/// An optimized script and how it got there
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub script: Script,
    pub optimization_metadata: OptimizationMetadata,
}

/// Coordinates duration optimization for lesson scripts
///
/// Holds no per-request state; share it behind an `Arc` to serve requests
/// in parallel.
#[derive(Debug, Clone)]
pub struct OptimizationCoordinator {
    config: OptimizerConfig,
    adapter: ContentAdapter,
    transformer: ContentTransformer,
    assessor: QualityAssessor,
    rubric: QualityRubric,
}

impl OptimizationCoordinator {
    /// Create a coordinator around a generator, rejecting invalid configuration
    pub fn new(generator: Arc<dyn ScriptGenerator>, config: OptimizerConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            adapter: ContentAdapter::new(&config),
            transformer: ContentTransformer::new(generator, config.generation_timeout()),
            assessor: QualityAssessor,
            rubric: QualityRubric::v1(),
            config,
        })
    }

    /// Coordinator with the default configuration
    pub fn with_defaults(generator: Arc<dyn ScriptGenerator>) -> Result<Self> {
        Self::new(generator, OptimizerConfig::default())
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Options carrying the configured default tolerance
    pub fn default_options(&self) -> OptimizeOptions {
        OptimizeOptions::with_tolerance(self.config.tolerance_secs)
    }

    /// Bring a script's total duration toward `target_duration`
    pub async fn optimize_duration(
        &self,
        script: &Script,
        target_duration: f64,
        options: OptimizeOptions,
    ) -> Result<OptimizationResult> {
        if !(target_duration.is_finite() && target_duration > 0.0) {
            return Err(EngineError::InvalidTarget(target_duration));
        }
        if !(options.tolerance.is_finite() && options.tolerance >= 0.0) {
            return Err(EngineError::InvalidTolerance(options.tolerance));
        }

        let original_duration = script.total_duration();

        if script.is_empty() {
            tracing::info!("Empty script, nothing to optimize");
            return Ok(self.finish(
                script.clone(),
                original_duration,
                target_duration,
                options,
                OptimizationType::None,
                self.assessor.structural(script),
            ));
        }

        let deviation = DurationDeviation::classify(original_duration, target_duration, options.tolerance);
        let optimization_type = deviation.optimization_type();

        tracing::info!(
            "Optimizing {:.1}s -> {:.1}s (delta {:+.1}s, tolerance {:.1}s): {:?}",
            original_duration,
            target_duration,
            deviation.delta(),
            options.tolerance,
            optimization_type
        );

        let (optimized, assessment) = match deviation {
            DurationDeviation::WithinTolerance { .. } => {
                let adjusted = self.adapter.adjust(script, target_duration);
                let assessment = self.assessor.structural(&adjusted);
                (adjusted, assessment)
            }
            DurationDeviation::TooLong { .. } => {
                let Transformation { script, assessment } =
                    self.transformer.compress(script, target_duration).await?;
                (script, assessment)
            }
            DurationDeviation::TooShort { .. } => {
                let Transformation { script, assessment } =
                    self.transformer.expand(script, target_duration).await?;
                (script, assessment)
            }
        };

        let warnings = assessment.warnings();
        if !warnings.is_empty() {
            tracing::warn!(
                "{:?} optimization finished with quality warnings: {}",
                optimization_type,
                warnings.join("; ")
            );
        }

        let result = self.finish(
            optimized,
            original_duration,
            target_duration,
            options,
            optimization_type,
            assessment,
        );

        tracing::info!(
            "Optimization complete: {:.1}s (ratio {:.2})",
            result.optimization_metadata.resulting_duration,
            result.optimization_metadata.duration_ratio
        );

        Ok(result)
    }

    /// Holistic rubric score for a script against its objectives
    pub async fn assess_quality(&self, script: &Script, objectives: &[String]) -> Result<QualityReport> {
        let started_at = Instant::now();

        let raw = self.transformer.rate(script, objectives).await?;
        let ratings = self.rubric.parse_ratings(&raw)?;
        let report = self.rubric.report(&ratings, objectives, started_at);

        tracing::info!(
            "Quality report {}: {:?} (weighted {:.1})",
            report.report_id,
            report.overall,
            report.weighted_score
        );
        if !report.passes_hard_gates() {
            tracing::warn!("Hard quality gates failed: {:?}", report.failed_dimensions());
        }

        Ok(report)
    }

    fn finish(
        &self,
        script: Script,
        original_duration: f64,
        target_duration: f64,
        options: OptimizeOptions,
        optimization_type: OptimizationType,
        quality_assessment: QualityAssessment,
    ) -> OptimizationResult {
        let resulting_duration = script.total_duration();

        OptimizationResult {
            script,
            optimization_metadata: OptimizationMetadata {
                original_duration,
                resulting_duration,
                duration_ratio: safe_ratio(resulting_duration, original_duration),
                optimization_type,
                target_duration,
                tolerance: options.tolerance,
                quality_assessment,
            },
        }
    }
}
