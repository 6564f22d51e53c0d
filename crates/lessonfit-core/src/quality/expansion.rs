//! Expansion quality - did lengthening add value without drifting?

use crate::concepts::{concepts_overlap, extract_concepts, word_count};
use crate::duration::safe_ratio;
use crate::quality::patterns::{self, EXAMPLES, PRACTICE, REFLECTION};
use crate::script::Script;
use serde::{Deserialize, Serialize};

/// New topics beyond this share of original concepts count as drift
const DRIFT_SHARE: f64 = 0.3;

/// Share of expanded concepts that may be new while staying coherent
const COHERENCE_SHARE: f64 = 0.2;

/// Added words per enhanced explanation
const WORDS_PER_EXPLANATION: usize = 50;

/// Per-category cap when summing value counts
const VALUE_COUNT_CAP: usize = 3;

/// Value score above which the expansion counts as meaningful
const MEANINGFUL_VALUE: f64 = 0.4;

const MAX_TIME_RATIO: f64 = 1.5;
const MIN_WORD_RATIO: f64 = 1.1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpansionQuality {
    pub focus_maintained: FocusAssessment,
    pub value_added: ValueAdded,
    pub expansion_effectiveness: ExpansionEffectiveness,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusAssessment {
    pub new_topics: Vec<String>,
    pub new_topic_count: usize,
    pub focus_drift: bool,
    pub topic_coherence: bool,
    pub maintained: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueAdded {
    pub examples_added: usize,
    pub enhanced_explanations: usize,
    pub practice_opportunities: usize,
    pub reflection_points: usize,
    pub value_score: f64,
    pub meaningful_addition: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpansionEffectiveness {
    pub time_ratio: f64,
    pub word_ratio: f64,
    pub content_density: f64,
    pub effective_expansion: bool,
}

/// Compare an expanded script against its original
pub fn validate_expansion_quality(original: &Script, expanded: &Script) -> ExpansionQuality {
    let quality = ExpansionQuality {
        focus_maintained: focus(original, expanded),
        value_added: value_added(original, expanded),
        expansion_effectiveness: expansion_effectiveness(
            original.total_duration(),
            expanded.total_duration(),
            word_count(original),
            word_count(expanded),
        ),
    };

    tracing::debug!(
        "Expansion quality - new topics: {}, value score: {:.2}, time ratio: {:.2}",
        quality.focus_maintained.new_topic_count,
        quality.value_added.value_score,
        quality.expansion_effectiveness.time_ratio
    );

    quality
}

fn focus(original: &Script, expanded: &Script) -> FocusAssessment {
    let original_concepts = extract_concepts(original);
    let expanded_concepts = extract_concepts(expanded);

    let new_topics: Vec<String> = expanded_concepts
        .iter()
        .filter(|concept| {
            !original_concepts
                .iter()
                .any(|known| concepts_overlap(concept, known))
        })
        .cloned()
        .collect();

    let new_topic_count = new_topics.len();
    let focus_drift = new_topic_count as f64 > DRIFT_SHARE * original_concepts.len() as f64;
    let topic_coherence =
        safe_ratio(new_topic_count as f64, expanded_concepts.len() as f64) < COHERENCE_SHARE;

    FocusAssessment {
        new_topics,
        new_topic_count,
        focus_drift,
        topic_coherence,
        maintained: !focus_drift && topic_coherence,
    }
}

/// Per-script tallies the value counts are derived from
#[derive(Debug, Default)]
struct Tally {
    example_mentions: usize,
    example_items: usize,
    practice_mentions: usize,
    reflection_mentions: usize,
    reflection_items: usize,
    words: usize,
}

impl Tally {
    fn of(script: &Script) -> Self {
        script.phases().fold(Tally::default(), |mut tally, (_, phase)| {
            tally.example_mentions += patterns::count_matches(&EXAMPLES, &phase.content);
            tally.example_items += phase.examples.len();
            tally.practice_mentions += patterns::count_matches(&PRACTICE, &phase.content);
            tally.reflection_mentions += patterns::count_matches(&REFLECTION, &phase.content);
            tally.reflection_items += phase.reflection_questions.len();
            tally.words += phase.word_count();
            tally
        })
    }
}

fn value_added(original: &Script, expanded: &Script) -> ValueAdded {
    let before = Tally::of(original);
    let after = Tally::of(expanded);

    let examples_added = after.example_mentions.saturating_sub(before.example_mentions)
        + after.example_items.saturating_sub(before.example_items);
    let enhanced_explanations = after.words.saturating_sub(before.words) / WORDS_PER_EXPLANATION;
    let practice_opportunities = after.practice_mentions.saturating_sub(before.practice_mentions);
    let reflection_points = after.reflection_items.saturating_sub(before.reflection_items)
        + after.reflection_mentions.saturating_sub(before.reflection_mentions);

    let capped: usize = [
        examples_added,
        enhanced_explanations,
        practice_opportunities,
        reflection_points,
    ]
    .iter()
    .map(|count| (*count).min(VALUE_COUNT_CAP))
    .sum();
    let value_score = capped as f64 / (4 * VALUE_COUNT_CAP) as f64;

    ValueAdded {
        examples_added,
        enhanced_explanations,
        practice_opportunities,
        reflection_points,
        value_score,
        meaningful_addition: value_score > MEANINGFUL_VALUE,
    }
}

/// Time and word ratios of an expansion
pub fn expansion_effectiveness(
    original_duration: f64,
    expanded_duration: f64,
    original_words: usize,
    expanded_words: usize,
) -> ExpansionEffectiveness {
    let time_ratio = safe_ratio(expanded_duration, original_duration);
    let word_ratio = safe_ratio(expanded_words as f64, original_words as f64);

    ExpansionEffectiveness {
        time_ratio,
        word_ratio,
        content_density: safe_ratio(word_ratio, time_ratio),
        effective_expansion: time_ratio < MAX_TIME_RATIO && word_ratio > MIN_WORD_RATIO,
    }
}
