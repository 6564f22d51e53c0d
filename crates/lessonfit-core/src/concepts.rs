//! Concept extraction - the comparison keys for preservation checks

use crate::script::{Objective, PhaseName, Script};
use std::collections::BTreeSet;

/// Every `core_concepts`, `keypoints` and `summary_points` entry across all
/// phases, de-duplicated
pub fn extract_concepts(script: &Script) -> BTreeSet<String> {
    script
        .phases()
        .flat_map(|(_, phase)| {
            phase
                .core_concepts
                .iter()
                .chain(&phase.keypoints)
                .chain(&phase.summary_points)
        })
        .filter(|concept| !concept.trim().is_empty())
        .cloned()
        .collect()
}

/// Objectives declared on `initiate` plus any `learning_objectives` on any
/// phase, de-duplicated by text
pub fn extract_objectives(script: &Script) -> BTreeSet<String> {
    let declared = script
        .phase(&PhaseName::Initiate)
        .into_iter()
        .flat_map(|phase| phase.objectives.iter());

    let learning = script
        .phases()
        .flat_map(|(_, phase)| phase.learning_objectives.iter());

    declared
        .chain(learning)
        .map(Objective::text)
        .filter(|text| !text.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Total whitespace-delimited words across all phase contents
pub fn word_count(script: &Script) -> usize {
    script.phases().map(|(_, phase)| phase.word_count()).sum()
}

/// Case-insensitive two-way containment used for concept matching
pub(crate) fn concepts_overlap(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    a.contains(&b) || b.contains(&a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::Phase;

    #[test]
    fn test_concepts_are_deduplicated_across_phases() {
        let mut deliver = Phase::new(120.0, "").with_concepts(["photosynthesis", "chlorophyll"]);
        deliver.keypoints = vec!["light energy".to_string(), "chlorophyll".to_string()];
        let mut end = Phase::new(30.0, "");
        end.summary_points = vec!["photosynthesis".to_string()];

        let script = Script::new().with_phase("deliver", deliver).with_phase("end", end);
        let concepts = extract_concepts(&script);

        assert_eq!(concepts.len(), 3);
        assert!(concepts.contains("light energy"));
    }

    #[test]
    fn test_objectives_only_from_initiate_and_learning_objectives() {
        let initiate = Phase::new(60.0, "").with_objectives(["Define velocity", "Compare speeds"]);
        let mut deliver = Phase::new(120.0, "").with_objectives(["Ignored objective"]);
        deliver.learning_objectives = vec![Objective::Text("Define velocity".to_string())];
        let mut end = Phase::new(30.0, "");
        end.learning_objectives = vec![Objective::Text("Graph motion".to_string())];

        let script = Script::new()
            .with_phase("initiate", initiate)
            .with_phase("deliver", deliver)
            .with_phase("end", end);
        let objectives = extract_objectives(&script);

        assert_eq!(objectives.len(), 3);
        assert!(objectives.contains("Graph motion"));
        assert!(!objectives.contains("Ignored objective"));
    }

    #[test]
    fn test_word_count_ignores_empty_content() {
        let script = Script::new()
            .with_phase("prepare", Phase::new(10.0, "one two  three"))
            .with_phase("end", Phase::new(10.0, ""));
        assert_eq!(word_count(&script), 3);
    }

    #[test]
    fn test_concepts_overlap_is_symmetric_and_case_insensitive() {
        assert!(concepts_overlap("Newton's Laws", "newton"));
        assert!(concepts_overlap("force", "Net FORCE"));
        assert!(!concepts_overlap("mass", "velocity"));
    }
}
