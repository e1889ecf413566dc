use std::ops::RangeInclusive;

use crate::align::Alignment;
use crate::fundamentals::Metric;
use crate::report::Normalization;

use super::RunWarning;

/// Tickers used when the caller supplies none.
pub const DEFAULT_TICKERS: &str = "AAPL, MSFT, GOOGL, AMZN, META, NVDA";
/// Default first year of the window.
pub const DEFAULT_START_YEAR: i32 = 2025;
/// Default last year of the window.
pub const DEFAULT_END_YEAR: i32 = 2025;

/// Years a run can cover; requested years outside it are clamped.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 1900..=2200;

fn clamp_year(year: i32) -> i32 {
    year.clamp(*SUPPORTED_YEARS.start(), *SUPPORTED_YEARS.end())
}

/// Splits free-form comma-separated ticker text into symbols.
///
/// Entries are trimmed and upper-cased; empty entries are dropped and repeated
/// symbols keep their first position.
#[must_use]
pub fn parse_tickers(input: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for raw in input.split(',') {
        let sym = raw.trim().to_ascii_uppercase();
        if !sym.is_empty() && !out.contains(&sym) {
            out.push(sym);
        }
    }
    out
}

/// User configuration for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    tickers: Vec<String>,
    start_year: i32,
    end_year: i32,
    metric: Metric,
    normalize: bool,
    normalization: Normalization,
    alignment: Alignment,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TICKERS)
    }
}

impl AnalysisConfig {
    /// Starts a configuration from comma-separated ticker text.
    #[must_use]
    pub fn new(tickers: &str) -> Self {
        Self {
            tickers: parse_tickers(tickers),
            start_year: DEFAULT_START_YEAR,
            end_year: DEFAULT_END_YEAR,
            metric: Metric::default(),
            normalize: true,
            normalization: Normalization::default(),
            alignment: Alignment::default(),
        }
    }

    /// Replaces the ticker list with already-split symbols.
    ///
    /// The same cleanup as [`parse_tickers`] is applied.
    #[must_use]
    pub fn tickers<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = symbols
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.tickers = parse_tickers(&joined);
        self
    }

    /// Sets the inclusive year window. A reversed window is accepted, and years
    /// outside [`SUPPORTED_YEARS`] are clamped; both are reported by
    /// [`validate`](Self::validate).
    #[must_use]
    pub const fn years(mut self, start_year: i32, end_year: i32) -> Self {
        self.start_year = start_year;
        self.end_year = end_year;
        self
    }

    #[must_use]
    pub const fn metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    /// Whether the trend chart shows normalized values.
    #[must_use]
    pub const fn normalize(mut self, yes: bool) -> Self {
        self.normalize = yes;
        self
    }

    #[must_use]
    pub const fn normalization(mut self, kind: Normalization) -> Self {
        self.normalization = kind;
        self
    }

    #[must_use]
    pub const fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    #[must_use]
    pub fn ticker_list(&self) -> &[String] {
        &self.tickers
    }

    #[must_use]
    pub fn start_year(&self) -> i32 {
        clamp_year(self.start_year)
    }

    #[must_use]
    pub fn end_year(&self) -> i32 {
        clamp_year(self.end_year)
    }

    #[must_use]
    pub const fn selected_metric(&self) -> Metric {
        self.metric
    }

    #[must_use]
    pub const fn alignment_policy(&self) -> Alignment {
        self.alignment
    }

    /// The normalization used for charting, or `None` when raw values are shown.
    #[must_use]
    pub const fn chart_normalization(&self) -> Option<Normalization> {
        if self.normalize {
            Some(self.normalization)
        } else {
            None
        }
    }

    /// Checks the configuration. Problems are warnings; none of them blocks a run.
    #[must_use]
    pub fn validate(&self) -> Vec<RunWarning> {
        let mut out = Vec::new();
        for year in [self.start_year, self.end_year] {
            if !SUPPORTED_YEARS.contains(&year) {
                out.push(RunWarning::YearOutOfRange {
                    year,
                    clamped: clamp_year(year),
                });
            }
        }
        if self.start_year() > self.end_year() {
            out.push(RunWarning::InvertedYearRange {
                start: self.start_year(),
                end: self.end_year(),
            });
        }
        if self.tickers.is_empty() {
            out.push(RunWarning::NoTickers);
        }
        out
    }
}
