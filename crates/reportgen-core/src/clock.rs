//! Virtual clock threaded through report generation.
//!
//! A report never reads wall-clock time. Every entity is stamped with the
//! current cursor of a [`Clock`], and each transition between entities moves
//! the cursor forward by either a fixed lead-in or a uniformly drawn [`Gap`].
//! The clock is a `Copy` value: factories take it by value and hand back the
//! advanced clock alongside the node they built.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::Rng;

/// Format used for every calendar `starttime` attribute.
pub const CALENDAR_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Cursor value at the start of every module, in seconds.
pub const MODULE_START_SECS: f64 = 10.0;

/// Fixed lead-in before the first step of a case.
pub const CASE_LEAD_IN_SECS: f64 = 0.5;

/// Largest file index whose module start time still fits `YYYY-MM-DD HH:MM:SS`.
pub const MAX_CALENDAR_FILE_INDEX: u32 = 4_000_000_000;

/// Fixed lead-in before a group's content.
pub const GROUP_LEAD_IN_SECS: f64 = 1.0;

/// A half-open range of seconds the cursor advances by, drawn uniformly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gap {
    pub min: f64,
    pub max: f64,
}

impl Gap {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Between consecutive steps of a case.
    pub const STEP: Self = Self::new(0.5, 2.0);

    /// After a case verdict, before the next sibling.
    pub const AFTER_CASE: Self = Self::new(1.0, 3.0);

    /// Between sibling nested subgroups.
    pub const NESTED_GROUP: Self = Self::new(2.0, 5.0);

    /// Between sibling flat cases or skipped tests.
    pub const FLAT_SIBLING: Self = Self::new(1.0, 5.0);

    /// Between top-level groups of a module.
    pub const TOP_LEVEL_GROUP: Self = Self::new(5.0, 15.0);

    /// Draws an increment from this gap.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        rng.gen_range(self.min..self.max)
    }
}

/// Monotonic virtual cursor, in seconds since module start.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Clock {
    cursor: f64,
}

impl Default for Clock {
    fn default() -> Self {
        Self::module_start()
    }
}

impl Clock {
    /// Creates a clock at an arbitrary cursor.
    pub fn starting_at(cursor: f64) -> Self {
        Self { cursor }
    }

    /// Creates a clock at [`MODULE_START_SECS`].
    pub fn module_start() -> Self {
        Self::starting_at(MODULE_START_SECS)
    }

    /// Current cursor value.
    pub fn now(self) -> f64 {
        self.cursor
    }

    /// Returns the clock moved forward by a fixed amount.
    pub fn advance(self, secs: f64) -> Self {
        debug_assert!(secs >= 0.0, "clock must never move backwards");
        Self {
            cursor: self.cursor + secs,
        }
    }

    /// Returns the clock moved forward by a uniform draw from `gap`.
    pub fn advance_by<R: Rng>(self, rng: &mut R, gap: Gap) -> Self {
        self.advance(gap.sample(rng))
    }

    /// Cursor rendered with one decimal place, as stamped on every node.
    pub fn stamp(self) -> String {
        format_timestamp(self.cursor)
    }
}

/// Renders a cursor value with one decimal place.
pub fn format_timestamp(secs: f64) -> String {
    format!("{secs:.1}")
}

fn at_ten_am(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(10, 0, 0))
        .unwrap_or_default()
}

/// Base date every module start time is offset from.
pub fn module_base_time() -> NaiveDateTime {
    at_ten_am(2026, 2, 10)
}

/// Base date every case start time is offset from.
pub fn case_base_time() -> NaiveDateTime {
    at_ten_am(2024, 1, 25)
}

/// Calendar start of a module: the base date plus `file_index` minutes.
///
/// Independent of the virtual cursor, so that every file in a batch carries a
/// distinct start time even when the documents are otherwise identical.
///
/// Indices up to [`MAX_CALENDAR_FILE_INDEX`] keep a four-digit year. Larger
/// indices push the date past 9999 and chrono renders a signed, wider year.
pub fn module_start_time(file_index: u32) -> NaiveDateTime {
    module_base_time() + Duration::minutes(i64::from(file_index))
}

/// Calendar start of a case: the case base date plus the whole seconds of the cursor.
pub fn case_start_time(clock: Clock) -> NaiveDateTime {
    case_base_time() + Duration::seconds(clock.now().trunc() as i64)
}

/// Formats a calendar time as `YYYY-MM-DD HH:MM:SS`.
pub fn format_calendar(time: NaiveDateTime) -> String {
    time.format(CALENDAR_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_module_start_cursor() {
        assert!((Clock::default().now() - 10.0).abs() < f64::EPSILON);
        assert_eq!(Clock::module_start().stamp(), "10.0");
    }

    #[test]
    fn test_advance_is_additive() {
        let clock = Clock::starting_at(1.0).advance(0.5).advance(1.0);
        assert!((clock.now() - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_advance_by_stays_within_gap() {
        let mut rng = StdRng::seed_from_u64(7);
        let gaps = [
            Gap::STEP,
            Gap::AFTER_CASE,
            Gap::NESTED_GROUP,
            Gap::FLAT_SIBLING,
            Gap::TOP_LEVEL_GROUP,
        ];
        for gap in gaps {
            for _ in 0..500 {
                let before = Clock::starting_at(100.0);
                let after = before.advance_by(&mut rng, gap);
                let delta = after.now() - before.now();
                assert!(delta >= gap.min && delta < gap.max, "{delta} outside {gap:?}");
            }
        }
    }

    #[test]
    fn test_stamp_uses_one_decimal() {
        assert_eq!(Clock::starting_at(12.34).stamp(), "12.3");
        assert_eq!(Clock::starting_at(0.0).stamp(), "0.0");
        assert_eq!(format_timestamp(1234.06), "1234.1");
    }

    #[test]
    fn test_module_start_time_offsets_minutes() {
        assert_eq!(
            format_calendar(module_start_time(0)),
            "2026-02-10 10:00:00"
        );
        assert_eq!(
            format_calendar(module_start_time(1)),
            "2026-02-10 10:01:00"
        );
        assert_eq!(
            format_calendar(module_start_time(125)),
            "2026-02-10 12:05:00"
        );
    }

    #[test]
    fn test_module_start_time_keeps_four_digit_year() {
        let latest = format_calendar(module_start_time(MAX_CALENDAR_FILE_INDEX));
        assert_eq!(latest.len(), "YYYY-MM-DD HH:MM:SS".len(), "{latest}");
        assert!(latest.starts_with('9'), "{latest}");

        let beyond = format_calendar(module_start_time(u32::MAX));
        assert!(beyond.starts_with('+'), "{beyond}");
    }

    #[test]
    fn test_case_start_time_truncates_cursor() {
        let time = case_start_time(Clock::starting_at(75.9));
        assert_eq!(format_calendar(time), "2024-01-25 10:01:15");
    }
}
