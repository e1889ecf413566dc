//! Quarter labels and the custom fiscal-quarter boundary table.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::core::FcError;

/// A `"<year>-Q<n>"` bucket, ordered by `(year, quarter)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct QuarterLabel {
    year: i32,
    quarter: u8,
}

impl QuarterLabel {
    /// Creates a label, rejecting quarters outside `1..=4`.
    ///
    /// # Errors
    ///
    /// Returns [`FcError::InvalidParams`] for an out-of-range quarter.
    pub fn new(year: i32, quarter: u8) -> Result<Self, FcError> {
        if (1..=4).contains(&quarter) {
            Ok(Self { year, quarter })
        } else {
            Err(FcError::InvalidParams(format!(
                "quarter must be 1..=4, got {quarter}"
            )))
        }
    }

    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    #[must_use]
    pub const fn quarter(self) -> u8 {
        self.quarter
    }

    /// Label under the custom fiscal-quarter policy.
    ///
    /// Quarter boundaries fall on the 2nd of March, June, September and December; the
    /// 1st of those months still belongs to the preceding quarter. Dates from January 1
    /// through March 1 are Q4 of the previous year.
    #[must_use]
    pub fn custom_fiscal(date: NaiveDate) -> Self {
        let rule = fiscal_rule(date.month(), date.day());
        Self {
            year: date.year() + rule.year_offset,
            quarter: rule.quarter,
        }
    }

    /// Last calendar day of this quarter.
    #[must_use]
    pub fn calendar_end(self) -> NaiveDate {
        let (m, d) = match self.quarter {
            1 => (3, 31),
            2 => (6, 30),
            3 => (9, 30),
            _ => (12, 31),
        };
        // Month/day pairs above are valid for every year chrono can represent.
        NaiveDate::from_ymd_opt(self.year, m, d).unwrap_or(NaiveDate::MAX)
    }
}

impl fmt::Display for QuarterLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-Q{}", self.year, self.quarter)
    }
}

impl FromStr for QuarterLabel {
    type Err = FcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || FcError::InvalidParams(format!("not a quarter label: {s:?}"));
        let (year, q) = s.trim().rsplit_once("-Q").ok_or_else(bad)?;
        let year: i32 = year.parse().map_err(|_| bad())?;
        let quarter: u8 = q.parse().map_err(|_| bad())?;
        Self::new(year, quarter)
    }
}

pub(crate) const fn quarter_of_month(month: u32) -> u8 {
    match month {
        1..=3 => 1,
        4..=6 => 2,
        7..=9 => 3,
        _ => 4,
    }
}

/// One row of the fiscal boundary table: dates on or after `(month, day)` up to the
/// next row's start map to `quarter`, with `year_offset` added to the calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiscalBoundary {
    pub month: u32,
    pub day: u32,
    pub quarter: u8,
    pub year_offset: i32,
}

/// Custom fiscal-quarter boundaries, sorted by start.
///
/// | starts  | label         |
/// |---------|---------------|
/// | Jan 1   | `(year-1)-Q4` |
/// | Mar 2   | `year-Q1`     |
/// | Jun 2   | `year-Q2`     |
/// | Sep 2   | `year-Q3`     |
/// | Dec 2   | `year-Q4`     |
pub const FISCAL_BOUNDARIES: [FiscalBoundary; 5] = [
    FiscalBoundary { month: 1, day: 1, quarter: 4, year_offset: -1 },
    FiscalBoundary { month: 3, day: 2, quarter: 1, year_offset: 0 },
    FiscalBoundary { month: 6, day: 2, quarter: 2, year_offset: 0 },
    FiscalBoundary { month: 9, day: 2, quarter: 3, year_offset: 0 },
    FiscalBoundary { month: 12, day: 2, quarter: 4, year_offset: 0 },
];

fn fiscal_rule(month: u32, day: u32) -> FiscalBoundary {
    FISCAL_BOUNDARIES
        .iter()
        .rev()
        .find(|b| (month, day) >= (b.month, b.day))
        .copied()
        .unwrap_or(FISCAL_BOUNDARIES[0])
}
