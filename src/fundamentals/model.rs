use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::core::FcError;

/// A quarterly income-statement line item that can be analysed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Metric {
    /// Top-line revenue.
    #[default]
    TotalRevenue,
    /// Cost of goods and services sold.
    CostOfRevenue,
    /// Revenue minus cost of revenue.
    GrossProfit,
    /// EBIT as reported in the operating section.
    OperatingIncome,
    /// Earnings before interest, taxes, depreciation and amortization.
    Ebitda,
}

impl Metric {
    /// Every supported metric, in menu order.
    pub const ALL: [Self; 5] = [
        Self::TotalRevenue,
        Self::CostOfRevenue,
        Self::GrossProfit,
        Self::OperatingIncome,
        Self::Ebitda,
    ];

    /// Human-facing label used in titles and table headers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TotalRevenue => "Total Revenue",
            Self::CostOfRevenue => "Cost of Revenue",
            Self::GrossProfit => "Gross Profit",
            Self::OperatingIncome => "EBIT (Operating Income)",
            Self::Ebitda => "EBITDA",
        }
    }

    /// Row name as it appears in the provider's quarterly financials statement.
    #[must_use]
    pub const fn statement_row(self) -> &'static str {
        match self {
            Self::TotalRevenue => "Total Revenue",
            Self::CostOfRevenue => "Cost Of Revenue",
            Self::GrossProfit => "Gross Profit",
            Self::OperatingIncome => "Operating Income",
            Self::Ebitda => "EBITDA",
        }
    }

    /// Key used by the fundamentals-timeseries endpoint, without the period prefix.
    #[must_use]
    pub const fn timeseries_key(self) -> &'static str {
        match self {
            Self::TotalRevenue => "TotalRevenue",
            Self::CostOfRevenue => "CostOfRevenue",
            Self::GrossProfit => "GrossProfit",
            Self::OperatingIncome => "OperatingIncome",
            Self::Ebitda => "EBITDA",
        }
    }

    /// The full `type` parameter for quarterly data, e.g. `quarterlyTotalRevenue`.
    #[must_use]
    pub fn quarterly_type(self) -> String {
        format!("quarterly{}", self.timeseries_key())
    }

    const fn slug(self) -> &'static str {
        match self {
            Self::TotalRevenue => "total-revenue",
            Self::CostOfRevenue => "cost-of-revenue",
            Self::GrossProfit => "gross-profit",
            Self::OperatingIncome => "operating-income",
            Self::Ebitda => "ebitda",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Metric {
    type Err = FcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        let slugged = needle.to_ascii_lowercase().replace(['_', ' '], "-");
        Self::ALL
            .into_iter()
            .find(|m| {
                needle.eq_ignore_ascii_case(m.label())
                    || needle.eq_ignore_ascii_case(m.statement_row())
                    || needle.eq_ignore_ascii_case(m.timeseries_key())
                    || slugged == m.slug()
            })
            .or_else(|| (slugged == "ebit").then_some(Self::OperatingIncome))
            .ok_or_else(|| FcError::InvalidParams(format!("unknown metric: {needle}")))
    }
}

/// One reported value of a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricObservation {
    /// Period end date the value was reported for.
    pub report_date: NaiveDate,
    /// Reported value, `None` when the provider lists the period without a number.
    pub value: Option<Decimal>,
}

impl MetricObservation {
    #[must_use]
    pub const fn new(report_date: NaiveDate, value: Option<Decimal>) -> Self {
        Self { report_date, value }
    }
}

/// Dated observations of one metric for one ticker, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricSeries {
    pub symbol: String,
    pub metric: Metric,
    observations: Vec<MetricObservation>,
}

impl MetricSeries {
    /// Builds a series, sorting by report date and keeping the first value seen per date.
    ///
    /// A null observation never hides a later value reported on the same date.
    pub fn new(
        symbol: impl Into<String>,
        metric: Metric,
        mut observations: Vec<MetricObservation>,
    ) -> Self {
        observations.sort_by_key(|o| o.report_date);
        observations.dedup_by(|later, kept| {
            let same = later.report_date == kept.report_date;
            if same && kept.value.is_none() {
                kept.value = later.value;
            }
            same
        });
        Self {
            symbol: symbol.into(),
            metric,
            observations,
        }
    }

    #[must_use]
    pub fn observations(&self) -> &[MetricObservation] {
        &self.observations
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// True when at least one observation carries a value.
    #[must_use]
    pub fn has_values(&self) -> bool {
        self.observations.iter().any(|o| o.value.is_some())
    }
}

/// Result of fetching one metric for one ticker.
///
/// Callers can tell "the provider has nothing for this metric" apart from
/// "the request failed" without inspecting message text.
#[derive(Debug)]
pub enum FetchOutcome {
    /// At least one observation with a value.
    Series(MetricSeries),
    /// The provider answered but has no usable row for the metric.
    MetricUnavailable { symbol: String, metric: Metric },
    /// Transport, status, or parse failure.
    Failed { symbol: String, error: FcError },
}

impl FetchOutcome {
    /// Classifies a fetch result.
    pub fn from_result(symbol: &str, metric: Metric, res: Result<MetricSeries, FcError>) -> Self {
        match res {
            Ok(series) if series.has_values() => Self::Series(series),
            Ok(_) | Err(FcError::MissingData(_)) => Self::MetricUnavailable {
                symbol: symbol.to_string(),
                metric,
            },
            Err(error) => Self::Failed {
                symbol: symbol.to_string(),
                error,
            },
        }
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        match self {
            Self::Series(s) => &s.symbol,
            Self::MetricUnavailable { symbol, .. } | Self::Failed { symbol, .. } => symbol,
        }
    }

    /// The series, if any.
    #[must_use]
    pub fn into_series(self) -> Option<MetricSeries> {
        match self {
            Self::Series(s) => Some(s),
            _ => None,
        }
    }
}
