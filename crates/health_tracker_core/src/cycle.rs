//! crates/health_tracker_core/src/cycle.rs
//!
//! Menstrual cycle prediction from the last period date and the average
//! cycle length. All arithmetic is in whole days.

use chrono::{Duration, NaiveDate};

/// Shortest average cycle length accepted at the input surface.
pub const MIN_CYCLE_LENGTH: i64 = 20;
/// Longest average cycle length accepted at the input surface.
pub const MAX_CYCLE_LENGTH: i64 = 45;
/// Days between ovulation and the next period.
pub const LUTEAL_PHASE_DAYS: i64 = 14;
/// Days on either side of ovulation covered by the fertile window.
pub const FERTILE_MARGIN_DAYS: i64 = 2;

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CyclePrediction {
    pub next_period: NaiveDate,
    pub ovulation: NaiveDate,
    pub luteal_phase: DateRange,
    pub fertile_window: DateRange,
}

/// Predicts the next cycle.
///
/// The cycle length is not range-checked here. Lengths under
/// [`LUTEAL_PHASE_DAYS`] put ovulation before `last_period` and are returned
/// as computed. `None` means a date fell outside chrono's calendar.
pub fn predict_cycle(last_period: NaiveDate, avg_cycle_length: i64) -> Option<CyclePrediction> {
    let next_period = offset(last_period, avg_cycle_length)?;
    let ovulation = offset(last_period, avg_cycle_length - LUTEAL_PHASE_DAYS)?;

    Some(CyclePrediction {
        next_period,
        ovulation,
        luteal_phase: DateRange {
            start: ovulation,
            end: next_period,
        },
        fertile_window: DateRange {
            start: offset(ovulation, -FERTILE_MARGIN_DAYS)?,
            end: offset(ovulation, FERTILE_MARGIN_DAYS)?,
        },
    })
}

/// Returns true when `avg_cycle_length` is within the accepted input domain.
pub fn is_valid_cycle_length(avg_cycle_length: i64) -> bool {
    (MIN_CYCLE_LENGTH..=MAX_CYCLE_LENGTH).contains(&avg_cycle_length)
}

fn offset(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::try_days(days)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn predicts_standard_28_day_cycle() {
        let prediction = predict_cycle(date(2024, 1, 1), 28).unwrap();

        assert_eq!(prediction.next_period, date(2024, 1, 29));
        assert_eq!(prediction.ovulation, date(2024, 1, 15));
        assert_eq!(
            prediction.luteal_phase,
            DateRange { start: date(2024, 1, 15), end: date(2024, 1, 29) }
        );
        assert_eq!(
            prediction.fertile_window,
            DateRange { start: date(2024, 1, 13), end: date(2024, 1, 17) }
        );
    }

    #[test]
    fn offsets_hold_across_the_accepted_domain() {
        let starts = [date(2023, 12, 20), date(2024, 2, 10), date(2024, 12, 31)];
        for start in starts {
            for length in MIN_CYCLE_LENGTH..=MAX_CYCLE_LENGTH {
                let p = predict_cycle(start, length).unwrap();
                assert_eq!((p.next_period - start).num_days(), length);
                assert_eq!((p.next_period - p.ovulation).num_days(), LUTEAL_PHASE_DAYS);
                assert_eq!((p.ovulation - p.fertile_window.start).num_days(), 2);
                assert_eq!((p.fertile_window.end - p.ovulation).num_days(), 2);
                assert_eq!(p.luteal_phase.start, p.ovulation);
                assert_eq!(p.luteal_phase.end, p.next_period);
            }
        }
    }

    #[test]
    fn crosses_leap_day() {
        let p = predict_cycle(date(2024, 2, 10), 30).unwrap();
        assert_eq!(p.next_period, date(2024, 3, 11));
        assert_eq!(p.ovulation, date(2024, 2, 26));
    }

    #[test]
    fn short_cycle_puts_ovulation_before_last_period() {
        let p = predict_cycle(date(2024, 1, 20), 10).unwrap();
        assert_eq!(p.ovulation, date(2024, 1, 16));
        assert_eq!(p.next_period, date(2024, 1, 30));
    }

    #[test]
    fn out_of_calendar_range_is_none() {
        assert!(predict_cycle(NaiveDate::MAX, 28).is_none());
    }

    #[test]
    fn cycle_length_domain() {
        assert!(!is_valid_cycle_length(19));
        assert!(is_valid_cycle_length(20));
        assert!(is_valid_cycle_length(45));
        assert!(!is_valid_cycle_length(46));
    }
}
