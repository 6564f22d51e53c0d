//! Structure validation - the four-phase pedagogical model
//!
//! Three independent checks:
//!
//! 1. **Completeness**: all of `prepare`, `initiate`, `deliver`, `end` exist.
//! 2. **Balance**: each phase's share of the total sits in its expected range.
//! 3. **Progression**: adjacent phases share vocabulary (content flow).

use crate::duration::safe_ratio;
use crate::script::{PhaseName, Script};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Tolerance applied to range bounds for half credit (`[min*0.8, max*1.2]`)
const RANGE_TOLERANCE: f64 = 0.2;

/// Minimum points (out of 4) for a balanced script
const BALANCED_MIN_POINTS: f64 = 3.0;

/// Progression score at or above which transitions count as smooth
const SMOOTH_PROGRESSION: f64 = 0.7;

/// Expected share of total duration for a canonical phase, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpectedRange {
    pub min: f64,
    pub max: f64,
}

impl ExpectedRange {
    /// Expected range for a canonical phase (`None` for other phases)
    pub fn for_phase(name: &PhaseName) -> Option<Self> {
        let (min, max) = match name {
            PhaseName::Prepare => (10.0, 20.0),
            PhaseName::Initiate => (15.0, 25.0),
            PhaseName::Deliver => (45.0, 65.0),
            PhaseName::End => (10.0, 20.0),
            PhaseName::Other(_) => return None,
        };
        Some(Self { min, max })
    }

    /// 1 inside the range, 0.5 inside the tolerant range, 0 otherwise
    pub fn points(&self, percentage: f64) -> f64 {
        if percentage >= self.min && percentage <= self.max {
            1.0
        } else if percentage >= self.min * (1.0 - RANGE_TOLERANCE)
            && percentage <= self.max * (1.0 + RANGE_TOLERANCE)
        {
            0.5
        } else {
            0.0
        }
    }
}

/// Full structural report for one script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureReport {
    pub structure_complete: bool,
    pub missing_phases: Vec<PhaseName>,
    pub phase_balance: PhaseBalance,
    pub phase_progression: PhaseProgression,
}

impl StructureReport {
    /// Complete, balanced and smoothly sequenced
    pub fn is_sound(&self) -> bool {
        self.structure_complete
            && self.phase_balance.within_expected_ranges
            && self.phase_progression.smooth_transitions
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseBalance {
    pub phases: Vec<PhaseShare>,
    pub balance_score: f64,
    pub within_expected_ranges: bool,
}

/// One canonical phase's share of the script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseShare {
    pub phase: PhaseName,
    pub percentage: f64,
    pub expected: ExpectedRange,
    pub points: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseProgression {
    pub transitions: Vec<Transition>,
    pub progression_score: f64,
    pub smooth_transitions: bool,
}

/// Content flow between two adjacent phases
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub from: PhaseName,
    pub to: PhaseName,
    pub flow_score: f64,
}

/// Validate the four-phase structure of a script
pub fn validate_structure(script: &Script) -> StructureReport {
    let missing_phases = script.missing_phases();

    let report = StructureReport {
        structure_complete: missing_phases.is_empty(),
        missing_phases,
        phase_balance: phase_balance(script),
        phase_progression: phase_progression(script),
    };

    tracing::debug!(
        "Structure validated - complete: {}, balance: {:.2}, progression: {:.2}",
        report.structure_complete,
        report.phase_balance.balance_score,
        report.phase_progression.progression_score
    );

    report
}

fn phase_balance(script: &Script) -> PhaseBalance {
    let total = script.total_duration();

    let phases: Vec<PhaseShare> = PhaseName::CANONICAL
        .iter()
        .filter_map(|name| {
            let expected = ExpectedRange::for_phase(name)?;
            let duration = script.phase(name).map(|p| p.duration).unwrap_or(0.0);
            let percentage = safe_ratio(duration, total) * 100.0;
            Some(PhaseShare {
                phase: name.clone(),
                percentage,
                expected,
                points: expected.points(percentage),
            })
        })
        .collect();

    let points: f64 = phases.iter().map(|share| share.points).sum();

    PhaseBalance {
        balance_score: points / PhaseName::CANONICAL.len() as f64,
        within_expected_ranges: points >= BALANCED_MIN_POINTS,
        phases,
    }
}

fn phase_progression(script: &Script) -> PhaseProgression {
    let transitions: Vec<Transition> = PhaseName::CANONICAL
        .windows(2)
        .map(|pair| {
            let from = script.phase(&pair[0]).map(|p| p.content.as_str());
            let to = script.phase(&pair[1]).map(|p| p.content.as_str());
            let flow_score = match (from, to) {
                (Some(a), Some(b)) => content_flow_score(a, b),
                _ => 0.0,
            };
            Transition {
                from: pair[0].clone(),
                to: pair[1].clone(),
                flow_score,
            }
        })
        .collect();

    let progression_score = if transitions.is_empty() {
        0.0
    } else {
        transitions.iter().map(|t| t.flow_score).sum::<f64>() / transitions.len() as f64
    };

    PhaseProgression {
        smooth_transitions: progression_score >= SMOOTH_PROGRESSION,
        progression_score,
        transitions,
    }
}

/// Vocabulary overlap between two texts
///
/// `|A ∩ B| / min(|A|, |B|)` over lower-cased whitespace tokens, doubled and
/// capped at 1.0. Empty text on either side scores 0.
pub fn content_flow_score(a: &str, b: &str) -> f64 {
    let words_a = vocabulary(a);
    let words_b = vocabulary(b);

    let smaller = words_a.len().min(words_b.len());
    if smaller == 0 {
        return 0.0;
    }

    let shared = words_a.intersection(&words_b).count();
    (shared as f64 / smaller as f64 * 2.0).min(1.0)
}

fn vocabulary(text: &str) -> HashSet<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}
