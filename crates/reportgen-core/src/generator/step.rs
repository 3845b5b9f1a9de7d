//! Step factory.

use crate::clock::{Clock, Gap};
use crate::model::{FailureDetailTable, StepKind, TestStep};
use crate::verdict::{Verdict, sample_step_result};
use crate::vocabulary::{
    DIAGNOSTIC_SERVICES, EXPECTED_RESPONSE, NEGATIVE_RESPONSES, NegativeResponse,
    STEP_DESCRIPTIONS, pick,
};
use rand::Rng;

/// Probability that a failing step carries a failure table.
pub const FAILURE_DETAIL_PROBABILITY: f64 = 0.5;

/// Builds step number `sequence` (1-based) of a case with the given verdict.
///
/// The step is stamped at `clock`; the returned clock has moved on by a
/// [`Gap::STEP`] draw.
pub fn build_step<R: Rng>(
    rng: &mut R,
    clock: Clock,
    sequence: u32,
    verdict: Verdict,
) -> (TestStep, Clock) {
    let level = rng.gen_range(0..=2u8);
    let kind = *pick(rng, &StepKind::ALL);
    let result = sample_step_result(rng, verdict);
    let description = (*pick(rng, STEP_DESCRIPTIONS)).to_string();

    let failure_detail = if result.is_fail() && rng.r#gen::<f64>() < FAILURE_DETAIL_PROBABILITY {
        let service = *pick(rng, DIAGNOSTIC_SERVICES);
        let response = pick(rng, NEGATIVE_RESPONSES);
        Some(failure_table(service, response))
    } else {
        None
    };

    let step = TestStep {
        timestamp: clock.now(),
        level,
        kind,
        ident: format!("TS-{sequence:03}"),
        result,
        description,
        failure_detail,
    };
    (step, clock.advance_by(rng, Gap::STEP))
}

/// Fills the five fixed rows for a service and a canned negative response.
pub fn failure_table(
    (service_name, service_id): (&str, &str),
    response: &NegativeResponse,
) -> FailureDetailTable {
    // The raw request cell keeps the service id minus its leading zero behind a
    // fresh `0x`, so `0x22` becomes `0xx22F190`.
    let request_hex = format!("0x{}F190", service_id.trim_start_matches('0'));
    let (expected_bytes, expected_hex) = EXPECTED_RESPONSE;

    FailureDetailTable::new([
        row("Service", service_name, service_id),
        row("Request", &format!("{service_id} F1 90"), &request_hex),
        row("Expected", expected_bytes, expected_hex),
        row("Actual", response.bytes, response.hex),
        row(
            "Error",
            response.description,
            &format!("NRC {}", response.code()),
        ),
    ])
}

fn row(label: &str, value: &str, raw: &str) -> [String; 3] {
    [label.to_string(), value.to_string(), raw.to_string()]
}
