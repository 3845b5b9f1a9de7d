//! Case and skipped-test factories.

use super::step::build_step;
use crate::clock::{CASE_LEAD_IN_SECS, Clock, Gap, case_start_time};
use crate::model::{SkippedTest, TestCase, VerdictStamp};
use crate::verdict::sample_verdict;
use crate::vocabulary::{CASE_ACTIONS, CASE_TARGETS, CASE_TYPES, SKIP_REASONS, pick};
use rand::Rng;
use tracing::trace;

/// Inclusive bounds on the number of steps in a case.
pub const MIN_STEPS: u32 = 3;
pub const MAX_STEPS: u32 = 8;

/// Builds case number `sequence` of the group titled `group_title`.
///
/// The case is stamped at `clock`. Its steps start half a second later, its
/// verdict is stamped where the last step left the clock, and the returned
/// clock has moved on by a [`Gap::AFTER_CASE`] draw.
pub fn build_case<R: Rng>(
    rng: &mut R,
    clock: Clock,
    sequence: u32,
    group_title: &str,
) -> (TestCase, Clock) {
    let title = format!(
        "{}_{}_{}_{sequence:04}",
        pick(rng, CASE_TYPES),
        pick(rng, CASE_ACTIONS),
        pick(rng, CASE_TARGETS),
    );
    let verdict = sample_verdict(rng);
    let step_count = rng.gen_range(MIN_STEPS..=MAX_STEPS);

    let mut cursor = clock.advance(CASE_LEAD_IN_SECS);
    let mut steps = Vec::with_capacity(step_count as usize);
    for step_sequence in 1..=step_count {
        let (step, next) = build_step(rng, cursor, step_sequence, verdict);
        steps.push(step);
        cursor = next;
    }

    trace!(
        group = group_title.trim_start(),
        case = %title,
        %verdict,
        steps = step_count,
        "built test case"
    );

    let case = TestCase {
        title,
        timestamp: clock.now(),
        start_time: case_start_time(clock),
        steps,
        verdict: VerdictStamp {
            timestamp: cursor.now(),
            result: verdict,
        },
    };
    (case, cursor.advance_by(rng, Gap::AFTER_CASE))
}

/// Builds skipped test number `sequence`. Skips carry no time.
pub fn build_skipped<R: Rng>(rng: &mut R, sequence: u32) -> SkippedTest {
    SkippedTest {
        title: format!("Skipped_{}_{sequence:04}", pick(rng, SKIP_REASONS)),
    }
}
