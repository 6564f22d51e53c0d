//! Duration arithmetic over scripts

use crate::script::Script;

/// Sum of all phase durations, in seconds. An empty script lasts 0s.
pub fn total_duration(script: &Script) -> f64 {
    script.phases().map(|(_, phase)| phase.duration).sum()
}

/// `numerator / denominator`, or 0 when the denominator is not positive
pub(crate) fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::Phase;

    #[test]
    fn test_empty_script_has_zero_duration() {
        assert_eq!(total_duration(&Script::new()), 0.0);
    }

    #[test]
    fn test_sums_every_phase() {
        let script = Script::new()
            .with_phase("prepare", Phase::new(30.0, ""))
            .with_phase("initiate", Phase::new(45.0, ""))
            .with_phase("deliver", Phase::new(150.0, ""))
            .with_phase("end", Phase::new(15.0, ""))
            .with_phase("bonus", Phase::new(2.5, ""));

        assert_eq!(total_duration(&script), 242.5);
    }

    #[test]
    fn test_safe_ratio_guards_zero() {
        assert_eq!(safe_ratio(5.0, 0.0), 0.0);
        assert_eq!(safe_ratio(3.0, 4.0), 0.75);
    }
}
