//! Folds dated reading rows into calendar-month buckets.
//!
//! The window is the 12 calendar months ending at the month of the most
//! recent reading, so each stream (energy, demand) is anchored on its own data
//! and not on the current date.

use crate::model::{MonthlyAggregate, RawReadingRow};
use crate::sips::helper::{month_key, parse_reading_date};
use chrono::{Datelike, Months, NaiveDate};

/// Months in the trailing window, anchor month included.
pub const WINDOW_MONTHS: u32 = 12;

/// Sums `rows` per `"MM/YY"` month over the trailing 12-month window.
///
/// Rows may arrive in any order. Rows whose date does not parse are dropped
/// with a warning. Months without readings are absent from the result.
pub fn aggregate_monthly(rows: &[RawReadingRow]) -> MonthlyAggregate {
    let mut dated: Vec<(NaiveDate, &RawReadingRow)> = rows
        .iter()
        .filter_map(|row| match parse_reading_date(&row.date) {
            Some(date) => Some((date, row)),
            None => {
                tracing::warn!("Skipping reading with unparseable date '{}'", row.date);
                None
            }
        })
        .collect();

    let mut aggregate = MonthlyAggregate::new();
    if dated.is_empty() {
        return aggregate;
    }

    dated.sort_by(|a, b| b.0.cmp(&a.0));
    let anchor = dated[0].0;
    let Some(cutoff) = window_start(anchor) else {
        tracing::warn!("Cannot compute reading window for anchor {}", anchor);
        return aggregate;
    };

    for (date, row) in dated.into_iter().take_while(|(date, _)| *date >= cutoff) {
        let bucket = aggregate.entry(month_key(date)).or_default();
        for (index, value) in row.periods.iter().enumerate() {
            if let (Some(value), Some(slot)) = (value, bucket.get_mut(index)) {
                if *value != 0.0 {
                    *slot += value;
                }
            }
        }
    }

    aggregate
}

/// First day of the month `WINDOW_MONTHS - 1` months before `anchor`'s month.
///
/// # Example
///
/// ```no_run
/// // anchor 15/07/2025 -> 01/08/2024
/// let cutoff = window_start(NaiveDate::from_ymd_opt(2025, 7, 15).unwrap());
/// ```
pub fn window_start(anchor: NaiveDate) -> Option<NaiveDate> {
    anchor
        .with_day(1)?
        .checked_sub_months(Months::new(WINDOW_MONTHS - 1))
}
