//! Fixed vocabularies the factories draw names and payloads from.

use rand::Rng;

/// Diagnostic action phrases used as step descriptions.
pub const STEP_DESCRIPTIONS: &[&str] = &[
    "Initialize diagnostic session",
    "Send request frame",
    "Wait for response",
    "Verify response data",
    "Check timing constraints",
    "Validate checksum",
    "Read DTC memory",
    "Clear DTC status",
    "Switch to extended session",
    "Security access request",
    "Read data by identifier",
    "Write data by identifier",
    "ECU reset",
    "Communication control",
    "Tester present",
    "Control DTC setting",
    "Check voltage level",
    "Measure temperature",
    "Validate signal timing",
    "Check bus load",
    "Verify node availability",
];

/// Diagnostic services as `(name, id)`.
pub const DIAGNOSTIC_SERVICES: &[(&str, &str)] = &[
    ("ReadDataByIdentifier", "0x22"),
    ("WriteDataByIdentifier", "0x2E"),
    ("ReadDTCInformation", "0x19"),
    ("ClearDiagnosticInformation", "0x14"),
    ("DiagnosticSessionControl", "0x10"),
    ("ECUReset", "0x11"),
    ("SecurityAccess", "0x27"),
    ("CommunicationControl", "0x28"),
    ("TesterPresent", "0x3E"),
    ("ControlDTCSetting", "0x85"),
];

/// A canned negative response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NegativeResponse {
    /// Space separated response bytes, e.g. `7F 22 78`.
    pub bytes: &'static str,
    /// The same bytes as a hex literal, e.g. `0x7F2278`.
    pub hex: &'static str,
    pub description: &'static str,
}

impl NegativeResponse {
    /// The negative response code: the last two characters of [`Self::bytes`].
    pub fn code(&self) -> &'static str {
        let bytes = self.bytes;
        &bytes[bytes.len().saturating_sub(2)..]
    }
}

pub const NEGATIVE_RESPONSES: &[NegativeResponse] = &[
    NegativeResponse {
        bytes: "7F 22 78",
        hex: "0x7F2278",
        description: "Response pending timeout",
    },
    NegativeResponse {
        bytes: "7F 22 31",
        hex: "0x7F2231",
        description: "Request out of range",
    },
    NegativeResponse {
        bytes: "7F 27 35",
        hex: "0x7F2735",
        description: "Invalid key",
    },
    NegativeResponse {
        bytes: "7F 31 22",
        hex: "0x7F3122",
        description: "Conditions not correct",
    },
];

/// Positive response every failure table expects.
pub const EXPECTED_RESPONSE: (&str, &str) = ("62 F1 90 AB CD EF", "0x62F190ABCDEF");

pub const CASE_TYPES: &[&str] = &[
    "UDS",
    "DTC",
    "CAN",
    "Diagnostic",
    "Communication",
    "Memory",
    "Security",
    "Session",
    "Reset",
    "Voltage",
    "Temperature",
    "Timing",
];

pub const CASE_ACTIONS: &[&str] = &[
    "Read",
    "Write",
    "Check",
    "Verify",
    "Validate",
    "Test",
    "Monitor",
    "Control",
    "Initialize",
    "Reset",
];

pub const CASE_TARGETS: &[&str] = &[
    "DID", "DTC", "Memory", "Status", "Data", "Signal", "Frame", "Service", "Session", "Access",
];

pub const SKIP_REASONS: &[&str] = &[
    "Prerequisites_Not_Met",
    "Environment_Not_Ready",
    "HW_Not_Available",
    "SW_Version_Mismatch",
    "Configuration_Missing",
    "Dependency_Failed",
    "Timeout_Prevention",
    "Manual_Execution_Only",
    "Not_Applicable",
];

pub const GROUP_TYPES: &[&str] = &[
    "Communication",
    "Diagnostic",
    "Network",
    "Memory",
    "Security",
    "Session",
    "DTC",
    "UDS",
    "CAN",
    "System",
    "Integration",
    "Functional",
];

pub const GROUP_AREAS: &[&str] = &["Tests", "Checks", "Validation", "Scenarios", "Cases", "Suite"];

/// Picks one item uniformly.
///
/// # Panics
///
/// Panics if `items` is empty; every vocabulary in this module is non-empty.
pub fn pick<'a, T, R: Rng>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_vocabulary_sizes() {
        assert_eq!(STEP_DESCRIPTIONS.len(), 21);
        assert_eq!(DIAGNOSTIC_SERVICES.len(), 10);
        assert_eq!(NEGATIVE_RESPONSES.len(), 4);
        assert_eq!(SKIP_REASONS.len(), 9);
    }

    #[test]
    fn test_negative_response_code_is_last_two_chars() {
        let codes: Vec<_> = NEGATIVE_RESPONSES.iter().map(NegativeResponse::code).collect();
        assert_eq!(codes, vec!["78", "31", "35", "22"]);
    }

    #[test]
    fn test_hex_matches_bytes() {
        for response in NEGATIVE_RESPONSES {
            let compact = response.bytes.replace(' ', "");
            assert_eq!(response.hex, format!("0x{compact}"));
        }
    }

    #[test]
    fn test_pick_covers_every_item() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1_000 {
            seen.insert(*pick(&mut rng, GROUP_AREAS));
        }
        assert_eq!(seen.len(), GROUP_AREAS.len());
    }
}
