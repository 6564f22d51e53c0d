//! Property tests for duration arithmetic, classification and extraction

use lessonfit_core::optimizer::{DurationDeviation, OptimizationType};
use lessonfit_core::structure::content_flow_score;
use lessonfit_core::{extract_concepts, total_duration, ContentAdapter, Phase, Script};
use proptest::prelude::*;

fn phases_strategy() -> impl Strategy<Value = Vec<(String, f64)>> {
    prop::collection::btree_map("[a-z]{1,8}", 0.0f64..600.0, 0..8)
        .prop_map(|phases| phases.into_iter().collect::<Vec<_>>())
}

fn script_of(phases: &[(String, f64)]) -> Script {
    phases
        .iter()
        .fold(Script::new(), |script, (name, duration)| {
            script.with_phase(name.as_str(), Phase::new(*duration, "some words here"))
        })
}

proptest! {
    #[test]
    fn total_duration_is_sum_of_phases(phases in phases_strategy()) {
        let script = script_of(&phases);
        let expected: f64 = phases.iter().map(|(_, d)| d).sum();
        prop_assert!((total_duration(&script) - expected).abs() < 1e-6);
    }

    #[test]
    fn total_duration_is_additive(left in phases_strategy(), right in phases_strategy()) {
        // disjoint names so the union keeps every phase
        let left: Vec<_> = left.into_iter().map(|(n, d)| (format!("l{}", n), d)).collect();
        let right: Vec<_> = right.into_iter().map(|(n, d)| (format!("r{}", n), d)).collect();
        let both: Vec<_> = left.iter().chain(&right).cloned().collect();

        let sum = total_duration(&script_of(&left)) + total_duration(&script_of(&right));
        prop_assert!((total_duration(&script_of(&both)) - sum).abs() < 1e-6);
    }

    #[test]
    fn classification_matches_delta(current in 0.0f64..2000.0, target in 1.0f64..2000.0, tolerance in 0.0f64..100.0) {
        let deviation = DurationDeviation::classify(current, target, tolerance);
        let delta = current - target;

        let expected = if delta.abs() <= tolerance {
            OptimizationType::Minor
        } else if delta > 0.0 {
            OptimizationType::Compression
        } else {
            OptimizationType::Expansion
        };
        prop_assert_eq!(deviation.optimization_type(), expected);
        prop_assert_eq!(deviation.delta(), delta);
    }

    #[test]
    fn minor_adjustment_is_deterministic(phases in phases_strategy(), target in 1.0f64..2000.0) {
        let script = script_of(&phases);
        let adapter = ContentAdapter::default();
        prop_assert_eq!(adapter.adjust(&script, target), adapter.adjust(&script, target));
    }

    #[test]
    fn minor_adjustment_respects_floor(phases in phases_strategy(), target in 1.0f64..2000.0) {
        let script = script_of(&phases);
        let adjusted = ContentAdapter::default().adjust(&script, target);
        let per_phase = (target - script.total_duration()) / script.len().max(1) as f64;

        for ((_, before), (_, after)) in script.phases().zip(adjusted.phases()) {
            if before.duration >= 10.0 {
                prop_assert!(after.duration >= 10.0);
            } else {
                // below the floor: never shrunk, never lifted past the request
                prop_assert!(after.duration >= before.duration);
                prop_assert!(after.duration <= before.duration + per_phase.max(0.0) + 1e-9);
            }
        }
    }

    #[test]
    fn concepts_are_deduplicated(concepts in prop::collection::vec("[a-z]{1,6}", 0..12)) {
        let script = Script::new()
            .with_phase("deliver", Phase::new(100.0, "").with_concepts(concepts.clone()))
            .with_phase("end", Phase::new(30.0, "").with_concepts(concepts.clone()));

        let extracted = extract_concepts(&script);
        prop_assert!(extracted.len() <= concepts.len());
        for concept in &concepts {
            prop_assert!(extracted.contains(concept));
        }
    }

    #[test]
    fn content_flow_score_is_bounded(a in "[a-z ]{0,40}", b in "[a-z ]{0,40}") {
        let score = content_flow_score(&a, &b);
        prop_assert!((0.0..=1.0).contains(&score));
    }
}

#[test]
fn identical_content_flows_perfectly() {
    let text = "plants convert light into chemical energy";
    assert_eq!(content_flow_score(text, text), 1.0);
    assert_eq!(content_flow_score("plants grow", "stars burn"), 0.0);
}
