//! Mapping irregularly dated reports onto a shared quarter axis.
//!
//! Two interchangeable policies are provided:
//! - [`Alignment::CustomFiscal`] labels each report with the custom fiscal quarter it
//!   falls in (see [`QuarterLabel::custom_fiscal`]).
//! - [`Alignment::CalendarQuarterEnd`] builds a fixed calendar of quarter-end dates and
//!   forward-fills each ticker's last known value onto it.
//!
//! Either way the result is an [`AlignedTable`] keyed by [`BucketKey`].

mod calendar;
mod quarter;
mod table;

pub use calendar::{forward_fill, quarter_end_calendar};
pub use quarter::{FISCAL_BOUNDARIES, FiscalBoundary, QuarterLabel};
pub use table::AlignedTable;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::core::FcError;
use crate::fundamentals::MetricSeries;

/// How report dates are turned into table rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Alignment {
    /// Nearest custom fiscal quarter label.
    #[default]
    CustomFiscal,
    /// Forward-filled calendar quarter-end dates.
    CalendarQuarterEnd,
}

impl Alignment {
    /// Header for the row index when the table is displayed.
    #[must_use]
    pub const fn index_name(self) -> &'static str {
        match self {
            Self::CustomFiscal => "Custom Fiscal Quarter",
            Self::CalendarQuarterEnd => "Quarter End",
        }
    }

    /// Buckets one series. Fiscal buckets keep the first valued report per label;
    /// calendar buckets cover every quarter-end in the inclusive year range.
    #[must_use]
    pub fn bucket(self, series: &MetricSeries, years: (i32, i32)) -> BTreeMap<BucketKey, Option<Decimal>> {
        match self {
            Self::CustomFiscal => {
                let mut out = BTreeMap::new();
                for obs in series.observations() {
                    let slot = out
                        .entry(BucketKey::Fiscal(QuarterLabel::custom_fiscal(obs.report_date)))
                        .or_insert(None);
                    if slot.is_none() {
                        *slot = obs.value;
                    }
                }
                out
            }
            Self::CalendarQuarterEnd => {
                forward_fill(series, &quarter_end_calendar(years.0, years.1))
                    .into_iter()
                    .map(|(date, v)| (BucketKey::QuarterEnd(date), v))
                    .collect()
            }
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CustomFiscal => "fiscal",
            Self::CalendarQuarterEnd => "quarter-end",
        })
    }
}

impl FromStr for Alignment {
    type Err = FcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fiscal" | "custom-fiscal" | "custom_fiscal" => Ok(Self::CustomFiscal),
            "quarter-end" | "quarter_end" | "calendar" | "ffill" => Ok(Self::CalendarQuarterEnd),
            other => Err(FcError::InvalidParams(format!("unknown alignment: {other}"))),
        }
    }
}

/// A row key on the shared quarter axis.
///
/// A table only ever holds one kind of key; both kinds order by `(year, quarter)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum BucketKey {
    Fiscal(QuarterLabel),
    QuarterEnd(NaiveDate),
}

impl BucketKey {
    #[must_use]
    pub fn year(self) -> i32 {
        match self {
            Self::Fiscal(q) => q.year(),
            Self::QuarterEnd(d) => d.year(),
        }
    }

    #[must_use]
    pub fn quarter(self) -> u8 {
        match self {
            Self::Fiscal(q) => q.quarter(),
            Self::QuarterEnd(d) => quarter::quarter_of_month(d.month()),
        }
    }

    /// `(year, quarter)`, the key both display orders sort by.
    #[must_use]
    pub fn sort_key(self) -> (i32, u8) {
        (self.year(), self.quarter())
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fiscal(q) => fmt::Display::fmt(q, f),
            Self::QuarterEnd(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}
