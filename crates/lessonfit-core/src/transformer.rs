//! Content transformer - generated compression and expansion
//!
//! Wraps the injected [`ScriptGenerator`]: builds the request, bounds the call
//! with a timeout, refuses output that is not a complete script, and measures
//! the rewrite against the original.

use crate::error::{GenerationError, Result};
use crate::generation::{GenerationMode, GenerationRequest, ScriptGenerator};
use crate::quality::{QualityAssessment, QualityAssessor};
use crate::script::Script;
use std::sync::Arc;
use std::time::Duration;

/// A generated rewrite together with its quality annotation
#[derive(Debug, Clone)]
pub struct Transformation {
    pub script: Script,
    pub assessment: QualityAssessment,
}

/// Orchestrates generator calls for large duration changes
#[derive(Debug, Clone)]
pub struct ContentTransformer {
    generator: Arc<dyn ScriptGenerator>,
    timeout: Duration,
    assessor: QualityAssessor,
}

impl ContentTransformer {
    /// Create a transformer around a generator
    pub fn new(generator: Arc<dyn ScriptGenerator>, timeout: Duration) -> Self {
        Self {
            generator,
            timeout,
            assessor: QualityAssessor,
        }
    }

    /// Shorten a script toward `target_duration`
    pub async fn compress(&self, script: &Script, target_duration: f64) -> Result<Transformation> {
        let request = GenerationRequest::compress(script, target_duration);
        let compressed = self.run(&request).await?;

        let ratio = crate::duration::safe_ratio(compressed.total_duration(), script.total_duration());
        tracing::info!(
            "Compression produced {:.1}s from {:.1}s (ratio {:.2})",
            compressed.total_duration(),
            script.total_duration(),
            ratio
        );

        let assessment = self.assessor.compression(script, &compressed);
        Ok(Transformation {
            script: compressed,
            assessment,
        })
    }

    /// Lengthen a script toward `target_duration`
    pub async fn expand(&self, script: &Script, target_duration: f64) -> Result<Transformation> {
        let request = GenerationRequest::expand(script, target_duration);
        let expanded = self.run(&request).await?;

        tracing::info!(
            "Expansion produced {:.1}s from {:.1}s",
            expanded.total_duration(),
            script.total_duration()
        );

        let assessment = self.assessor.expansion(script, &expanded);
        Ok(Transformation {
            script: expanded,
            assessment,
        })
    }

    /// Rate a script on the quality rubric via the generator
    pub async fn rate(&self, script: &Script, objectives: &[String]) -> Result<serde_json::Value> {
        let call = self.generator.rate_quality(script, objectives);
        self.bounded(GenerationMode::Rate, call).await
    }

    async fn run(&self, request: &GenerationRequest) -> Result<Script> {
        tracing::debug!(
            "Requesting {} to {:.1}s with {} constraints",
            request.mode,
            request.target_duration,
            request.constraints.len()
        );

        let raw = self
            .bounded(request.mode, self.generator.generate(request))
            .await?;

        Script::from_generated(raw).map_err(|e| {
            tracing::warn!("Rejected {} output: {}", request.mode, e);
            e
        })
    }

    /// Await a generator call under the configured timeout
    async fn bounded<F>(&self, mode: GenerationMode, call: F) -> Result<serde_json::Value>
    where
        F: std::future::Future<Output = anyhow::Result<serde_json::Value>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(source)) => {
                tracing::warn!("Generator {} call failed: {}", mode, source);
                Err(GenerationError::Failed { mode, source }.into())
            }
            Err(_) => {
                tracing::warn!("Generator {} call timed out after {:?}", mode, self.timeout);
                Err(GenerationError::TimedOut {
                    mode,
                    timeout: self.timeout,
                }
                .into())
            }
        }
    }
}
