//! Content adapter - minor, non-generative duration adjustment
//!
//! Used when a script is already within tolerance of its target. The residual
//! difference is spread evenly over the phases and each phase's text is nudged
//! locally: trimmed of intensifiers when it shrinks noticeably, or given
//! pacing markers when it stretches. Nothing here calls out to a generator, so
//! the same input always yields the same output.

use crate::config::OptimizerConfig;
use crate::quality::patterns::{collapse_whitespace, INTENSIFIERS};
use crate::script::Script;
use lazy_static::lazy_static;
use regex::Regex;

/// Pause marker that replaces a sentence-ending period
pub const SENTENCE_PAUSE: &str = "...";

/// Pause marker appended to every comma
pub const COMMA_PAUSE: &str = ", [pause]";

lazy_static! {
    /// A period that ends a sentence (followed by whitespace or end of text)
    static ref SENTENCE_END: Regex = Regex::new(r"\.(\s|$)").unwrap();

    /// A stoplisted intensifier plus a comma directly after it
    static ref INTENSIFIER_CLAUSE: Regex =
        Regex::new(&format!(r"{},?", INTENSIFIERS.as_str())).unwrap();
}

/// Redistributes small duration deltas across phases
#[derive(Debug, Clone)]
pub struct ContentAdapter {
    min_phase_duration: f64,
    shrink_ratio: f64,
    stretch_ratio: f64,
}

impl ContentAdapter {
    /// Create an adapter from the optimizer configuration
    pub fn new(config: &OptimizerConfig) -> Self {
        Self {
            min_phase_duration: config.min_phase_duration_secs,
            shrink_ratio: config.shrink_ratio,
            stretch_ratio: config.stretch_ratio,
        }
    }

    /// Spread `target - current` evenly across phases and rewrite content
    pub fn adjust(&self, script: &Script, target_duration: f64) -> Script {
        if script.is_empty() {
            return script.clone();
        }

        let adjustment = target_duration - script.total_duration();
        let per_phase = adjustment / script.len() as f64;

        tracing::debug!(
            "Distributing {:+.1}s across {} phases ({:+.2}s each)",
            adjustment,
            script.len(),
            per_phase
        );

        script.map_phases(|_, phase| {
            let new_duration = self.shifted_duration(phase.duration, per_phase);
            let content = self.rewrite_content(&phase.content, phase.duration, new_duration);
            phase.rewritten(new_duration, content)
        })
    }

    /// Shrinking stops at the floor; a phase already below it never shrinks
    /// and is never raised to it
    fn shifted_duration(&self, duration: f64, per_phase: f64) -> f64 {
        if duration < self.min_phase_duration {
            duration + per_phase.max(0.0)
        } else {
            (duration + per_phase).max(self.min_phase_duration)
        }
    }

    /// Local rewrite driven by `new / old` duration ratio
    pub fn rewrite_content(&self, content: &str, old_duration: f64, new_duration: f64) -> String {
        if old_duration <= 0.0 {
            return content.to_string();
        }

        let ratio = new_duration / old_duration;
        if ratio < self.shrink_ratio {
            trim_intensifiers(content)
        } else if ratio > self.stretch_ratio {
            add_pacing_markers(content)
        } else {
            content.to_string()
        }
    }
}

impl Default for ContentAdapter {
    fn default() -> Self {
        Self::new(&OptimizerConfig::default())
    }
}

/// Remove stoplisted intensifiers with any comma right after them, then
/// collapse whitespace
pub fn trim_intensifiers(content: &str) -> String {
    collapse_whitespace(&INTENSIFIER_CLAUSE.replace_all(content, ""))
}

/// Lengthen pauses at sentence ends and commas, then collapse whitespace
pub fn add_pacing_markers(content: &str) -> String {
    let paused = SENTENCE_END.replace_all(content, format!("{}$1", SENTENCE_PAUSE).as_str());
    collapse_whitespace(&paused.replace(',', COMMA_PAUSE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::{Phase, PhaseName};

    fn four_phase(durations: [f64; 4], content: &str) -> Script {
        PhaseName::CANONICAL
            .iter()
            .cloned()
            .zip(durations)
            .map(|(name, d)| (name, Phase::new(d, content)))
            .collect()
    }

    #[test]
    fn test_trim_intensifiers_whole_words_only() {
        let trimmed = trim_intensifiers("This is Very  really important, and quite everyday.");
        assert_eq!(trimmed, "This is important, and everyday.");

        // "justice" contains "just" but is not an intensifier
        assert_eq!(trim_intensifiers("justice is basically served"), "justice is served");
    }

    #[test]
    fn test_trim_intensifiers_takes_trailing_comma() {
        assert_eq!(trim_intensifiers("Really, it is simple."), "it is simple.");
        assert_eq!(trim_intensifiers("It is simple, honestly, really, and clear."), "It is simple, honestly, and clear.");
        assert_eq!(trim_intensifiers("Very, very clear."), "clear.");
    }

    #[test]
    fn test_pacing_markers() {
        let paced = add_pacing_markers("First, we observe. Then we measure 3.5 grams.");
        assert_eq!(paced, "First, [pause] we observe... Then we measure 3.5 grams...");
    }

    #[test]
    fn test_adjust_spreads_delta_evenly() {
        let script = four_phase([30.0, 45.0, 150.0, 15.0], "Some content.");
        let adjusted = ContentAdapter::default().adjust(&script, 256.0);

        let durations: Vec<f64> = adjusted.phases().map(|(_, p)| p.duration).collect();
        assert_eq!(durations, vec![34.0, 49.0, 154.0, 19.0]);
        assert_eq!(adjusted.total_duration(), 256.0);
        // input untouched
        assert_eq!(script.total_duration(), 240.0);
    }

    #[test]
    fn test_floor_protects_short_phases() {
        let script = four_phase([12.0, 60.0, 150.0, 38.0], "");
        let adjusted = ContentAdapter::default().adjust(&script, 244.0);

        let prepare = adjusted.phase(&PhaseName::Prepare).unwrap();
        assert_eq!(prepare.duration, 10.0);
        assert_eq!(adjusted.phase(&PhaseName::Deliver).unwrap().duration, 146.0);
    }

    #[test]
    fn test_sub_floor_phases_are_not_lifted() {
        let script = four_phase([0.0, 0.0, 230.0, 0.0], "");
        let adjusted = ContentAdapter::default().adjust(&script, 240.0);

        let durations: Vec<f64> = adjusted.phases().map(|(_, p)| p.duration).collect();
        assert_eq!(durations, vec![2.5, 2.5, 232.5, 2.5]);
        assert_eq!(adjusted.total_duration(), 240.0);
    }

    #[test]
    fn test_sub_floor_phases_never_shrink() {
        let script = four_phase([5.0, 60.0, 150.0, 45.0], "");
        let adjusted = ContentAdapter::default().adjust(&script, 248.0);

        assert_eq!(adjusted.phase(&PhaseName::Prepare).unwrap().duration, 5.0);
        assert_eq!(adjusted.phase(&PhaseName::Initiate).unwrap().duration, 57.0);
    }

    #[test]
    fn test_content_rewrite_thresholds() {
        let adapter = ContentAdapter::default();
        let text = "It is really simple, honestly.";

        // ratio 0.75 -> trim
        assert_eq!(adapter.rewrite_content(text, 40.0, 30.0), "It is simple, honestly.");
        // ratio 1.25 -> pacing
        assert_eq!(
            adapter.rewrite_content(text, 40.0, 50.0),
            "It is really simple, [pause] honestly..."
        );
        // ratio 1.1 -> unchanged
        assert_eq!(adapter.rewrite_content(text, 40.0, 44.0), text);
        // zero-length phase never divides by zero
        assert_eq!(adapter.rewrite_content(text, 0.0, 10.0), text);
    }

    #[test]
    fn test_adjust_is_deterministic() {
        let script = four_phase([30.0, 45.0, 150.0, 15.0], "Very, very clear. Basically done.");
        let adapter = ContentAdapter::default();
        assert_eq!(adapter.adjust(&script, 225.0), adapter.adjust(&script, 225.0));
    }

    #[test]
    fn test_empty_script_passes_through() {
        let adjusted = ContentAdapter::default().adjust(&Script::new(), 100.0);
        assert!(adjusted.is_empty());
    }

    #[test]
    fn test_collections_survive_adjustment() {
        let script = Script::new().with_phase(
            "deliver",
            Phase::new(100.0, "text").with_concepts(["energy"]),
        );
        let adjusted = ContentAdapter::default().adjust(&script, 110.0);
        let deliver = adjusted.phase(&PhaseName::Deliver).unwrap();
        assert_eq!(deliver.core_concepts, vec!["energy".to_string()]);
        assert_eq!(deliver.duration, 110.0);
    }
}
