//! Compression quality - did shortening keep what mattered?

use crate::concepts::{concepts_overlap, extract_concepts, extract_objectives, word_count};
use crate::duration::safe_ratio;
use crate::script::Script;
use serde::{Deserialize, Serialize};

/// Share of original objectives a compressed script must still declare
const OBJECTIVE_RETENTION: f64 = 0.8;

/// Share of original concepts that must survive compression
const CONCEPT_RETENTION: f64 = 0.8;

/// Time ratio band (exclusive) for an effective compression
const EFFECTIVE_TIME_RATIO: (f64, f64) = (0.7, 0.95);

/// Word ratios this close to 1 make the efficiency score meaningless
const WORD_RATIO_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressionQuality {
    pub objectives_preserved: ObjectivePreservation,
    pub content_integrity: ContentIntegrity,
    pub compression_effectiveness: CompressionEffectiveness,
}

impl CompressionQuality {
    /// Objectives and concepts both survived
    pub fn preserves_content(&self) -> bool {
        self.objectives_preserved.preserved && self.content_integrity.critical_content_maintained
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectivePreservation {
    pub original_count: usize,
    pub compressed_count: usize,
    pub preserved: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentIntegrity {
    pub total_concepts: usize,
    pub preserved_concepts: usize,
    pub concepts_preserved_ratio: f64,
    pub critical_content_maintained: bool,
    pub missing_concepts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressionEffectiveness {
    pub time_ratio: f64,
    pub word_ratio: f64,
    /// Share of time saved per share of words removed
    pub efficiency_score: f64,
    /// Set when the word count did not change, so no efficiency exists
    pub effectiveness_undefined: bool,
    pub effective_compression: bool,
}

/// Compare a compressed script against its original
pub fn validate_compression_quality(original: &Script, compressed: &Script) -> CompressionQuality {
    let quality = CompressionQuality {
        objectives_preserved: objective_preservation(original, compressed),
        content_integrity: content_integrity(original, compressed),
        compression_effectiveness: compression_effectiveness(
            original.total_duration(),
            compressed.total_duration(),
            word_count(original),
            word_count(compressed),
        ),
    };

    tracing::debug!(
        "Compression quality - concepts preserved: {:.2}, time ratio: {:.2}, word ratio: {:.2}",
        quality.content_integrity.concepts_preserved_ratio,
        quality.compression_effectiveness.time_ratio,
        quality.compression_effectiveness.word_ratio
    );

    quality
}

fn objective_preservation(original: &Script, compressed: &Script) -> ObjectivePreservation {
    let original_count = extract_objectives(original).len();
    let compressed_count = extract_objectives(compressed).len();

    ObjectivePreservation {
        original_count,
        compressed_count,
        preserved: compressed_count as f64 >= OBJECTIVE_RETENTION * original_count as f64,
    }
}

fn content_integrity(original: &Script, compressed: &Script) -> ContentIntegrity {
    let original_concepts = extract_concepts(original);
    let compressed_concepts = extract_concepts(compressed);

    let missing_concepts: Vec<String> = original_concepts
        .iter()
        .filter(|concept| {
            !compressed_concepts
                .iter()
                .any(|candidate| concepts_overlap(concept, candidate))
        })
        .cloned()
        .collect();

    let total_concepts = original_concepts.len();
    let preserved_concepts = total_concepts - missing_concepts.len();
    // nothing to lose means nothing was lost
    let concepts_preserved_ratio = if total_concepts == 0 {
        1.0
    } else {
        preserved_concepts as f64 / total_concepts as f64
    };

    ContentIntegrity {
        total_concepts,
        preserved_concepts,
        concepts_preserved_ratio,
        critical_content_maintained: concepts_preserved_ratio >= CONCEPT_RETENTION,
        missing_concepts,
    }
}

/// Time and word ratios of a compression, with the efficiency guard applied
pub fn compression_effectiveness(
    original_duration: f64,
    compressed_duration: f64,
    original_words: usize,
    compressed_words: usize,
) -> CompressionEffectiveness {
    let time_ratio = safe_ratio(compressed_duration, original_duration);
    let word_ratio = safe_ratio(compressed_words as f64, original_words as f64);

    let word_reduction = 1.0 - word_ratio;
    let effectiveness_undefined = word_reduction.abs() < WORD_RATIO_EPSILON;
    let efficiency_score = if effectiveness_undefined {
        0.0
    } else {
        (1.0 - time_ratio) / word_reduction
    };

    CompressionEffectiveness {
        time_ratio,
        word_ratio,
        efficiency_score,
        effectiveness_undefined,
        effective_compression: time_ratio > EFFECTIVE_TIME_RATIO.0
            && time_ratio < EFFECTIVE_TIME_RATIO.1,
    }
}
