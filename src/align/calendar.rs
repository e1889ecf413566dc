//! Calendar quarter-end alignment with forward fill.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::quarter::QuarterLabel;
use crate::fundamentals::MetricSeries;

/// Quarter-end dates (Mar 31, Jun 30, Sep 30, Dec 31) for every year in the inclusive
/// range, ascending. Empty when `start_year > end_year`.
#[must_use]
pub fn quarter_end_calendar(start_year: i32, end_year: i32) -> Vec<NaiveDate> {
    (start_year..=end_year)
        .flat_map(|year| {
            (1..=4u8).filter_map(move |q| QuarterLabel::new(year, q).ok().map(QuarterLabel::calendar_end))
        })
        .collect()
}

/// Carries the last reported value onto each checkpoint in `calendar`.
///
/// A report dated on a checkpoint counts for that checkpoint. Observations without a
/// value never replace an earlier value. Checkpoints before the first valued report
/// stay `None`.
#[must_use]
pub fn forward_fill(series: &MetricSeries, calendar: &[NaiveDate]) -> Vec<(NaiveDate, Option<Decimal>)> {
    let mut obs = series
        .observations()
        .iter()
        .filter_map(|o| o.value.map(|v| (o.report_date, v)))
        .peekable();
    let mut last: Option<Decimal> = None;

    calendar
        .iter()
        .map(|&checkpoint| {
            while let Some(&(date, value)) = obs.peek() {
                if date > checkpoint {
                    break;
                }
                last = Some(value);
                obs.next();
            }
            (checkpoint, last)
        })
        .collect()
}
