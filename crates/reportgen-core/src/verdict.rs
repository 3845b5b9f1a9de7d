//! Weighted verdict sampling.
//!
//! A case draws its verdict once; every step of that case then derives its own
//! pass/fail result from the case verdict. Failing cases mostly, but not
//! always, contain failing steps. Inconclusive cases never do.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Case verdicts below this draw pass.
pub const PASS_THRESHOLD: f64 = 0.60;

/// Case verdicts below this draw (and above [`PASS_THRESHOLD`]) fail.
pub const FAIL_THRESHOLD: f64 = 0.85;

/// Probability that a step inside a failing case reports `fail`.
pub const STEP_FAIL_PROBABILITY: f64 = 0.7;

/// Aggregate outcome of a test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
    Inconclusive,
}

impl Verdict {
    /// Maps a uniform `[0, 1)` draw onto a verdict.
    pub fn from_draw(draw: f64) -> Self {
        if draw < PASS_THRESHOLD {
            Verdict::Pass
        } else if draw < FAIL_THRESHOLD {
            Verdict::Fail
        } else {
            Verdict::Inconclusive
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Pass => "pass",
            Verdict::Fail => "fail",
            Verdict::Inconclusive => "inconclusive",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Observed result of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepResult {
    Pass,
    Fail,
}

impl StepResult {
    pub fn as_str(self) -> &'static str {
        match self {
            StepResult::Pass => "pass",
            StepResult::Fail => "fail",
        }
    }

    pub fn is_fail(self) -> bool {
        self == StepResult::Fail
    }
}

impl fmt::Display for StepResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Draws a case verdict: 60% pass, 25% fail, 15% inconclusive.
pub fn sample_verdict<R: Rng>(rng: &mut R) -> Verdict {
    Verdict::from_draw(rng.r#gen::<f64>())
}

/// Draws a step result conditioned on its case verdict.
///
/// Only failing cases consume a draw from `rng`.
pub fn sample_step_result<R: Rng>(rng: &mut R, verdict: Verdict) -> StepResult {
    match verdict {
        Verdict::Fail if rng.r#gen::<f64>() < STEP_FAIL_PROBABILITY => StepResult::Fail,
        Verdict::Pass | Verdict::Fail | Verdict::Inconclusive => StepResult::Pass,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_from_draw_boundaries() {
        assert_eq!(Verdict::from_draw(0.0), Verdict::Pass);
        assert_eq!(Verdict::from_draw(0.5999), Verdict::Pass);
        assert_eq!(Verdict::from_draw(0.60), Verdict::Fail);
        assert_eq!(Verdict::from_draw(0.8499), Verdict::Fail);
        assert_eq!(Verdict::from_draw(0.85), Verdict::Inconclusive);
        assert_eq!(Verdict::from_draw(0.9999), Verdict::Inconclusive);
    }

    #[test]
    fn test_verdict_distribution() {
        let mut rng = StdRng::seed_from_u64(2024);
        let total = 100_000;
        let (mut pass, mut fail, mut inconclusive) = (0usize, 0usize, 0usize);
        for _ in 0..total {
            match sample_verdict(&mut rng) {
                Verdict::Pass => pass += 1,
                Verdict::Fail => fail += 1,
                Verdict::Inconclusive => inconclusive += 1,
            }
        }
        let ratio = |n: usize| n as f64 / total as f64;
        assert!((ratio(pass) - 0.60).abs() < 0.02, "pass ratio {}", ratio(pass));
        assert!((ratio(fail) - 0.25).abs() < 0.02, "fail ratio {}", ratio(fail));
        assert!(
            (ratio(inconclusive) - 0.15).abs() < 0.02,
            "inconclusive ratio {}",
            ratio(inconclusive)
        );
    }

    #[test]
    fn test_pass_case_never_has_failing_step() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..10_000 {
            assert_eq!(sample_step_result(&mut rng, Verdict::Pass), StepResult::Pass);
        }
    }

    // Inconclusive cases currently carry no failing steps at all. This pins the
    // existing behavior until the intended semantics are settled.
    #[test]
    fn test_inconclusive_case_never_has_failing_step() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..10_000 {
            assert_eq!(
                sample_step_result(&mut rng, Verdict::Inconclusive),
                StepResult::Pass
            );
        }
    }

    #[test]
    fn test_fail_case_mostly_fails_steps() {
        let mut rng = StdRng::seed_from_u64(3);
        let total = 20_000;
        let failed = (0..total)
            .filter(|_| sample_step_result(&mut rng, Verdict::Fail).is_fail())
            .count();
        let ratio = failed as f64 / total as f64;
        assert!((ratio - STEP_FAIL_PROBABILITY).abs() < 0.02, "ratio {ratio}");
    }

    #[test]
    fn test_only_failing_cases_consume_draws() {
        let mut a = StdRng::seed_from_u64(9);
        let mut b = StdRng::seed_from_u64(9);
        sample_step_result(&mut a, Verdict::Pass);
        sample_step_result(&mut a, Verdict::Inconclusive);
        assert_eq!(a.r#gen::<u64>(), b.r#gen::<u64>());
    }

    #[test]
    fn test_display_matches_attribute_values() {
        assert_eq!(Verdict::Inconclusive.to_string(), "inconclusive");
        assert_eq!(StepResult::Fail.to_string(), "fail");
    }
}
