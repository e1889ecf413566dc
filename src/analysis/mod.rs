//! One analysis run: fetch each ticker, align, then compute the report inputs.
//!
//! The run never fails. Per-ticker problems and configuration issues are collected
//! as [`RunWarning`]s, and an empty result is expressed through [`RunStatus`].

mod config;

pub use config::{
    AnalysisConfig, DEFAULT_END_YEAR, DEFAULT_START_YEAR, DEFAULT_TICKERS, SUPPORTED_YEARS,
    parse_tickers,
};

use std::fmt;

use crate::align::{AlignedTable, Alignment};
use crate::core::MetricSource;
use crate::fundamentals::{FetchOutcome, Metric, MetricSeries};
use crate::report::{ChartData, CorrelationMatrix};

#[cfg(feature = "plot")]
use crate::core::FcError;
#[cfg(feature = "plot")]
use crate::report::{ChartConfig, heatmap_svg, line_chart_svg};

/// A non-fatal problem noticed during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunWarning {
    /// The fetch for a ticker failed; the ticker is left out.
    TickerFailed { symbol: String, error: String },
    /// The provider has no data for this metric and ticker.
    MetricUnavailable { symbol: String, metric: Metric },
    /// The start year is after the end year.
    InvertedYearRange { start: i32, end: i32 },
    /// A requested year is outside the supported range and was clamped.
    YearOutOfRange { year: i32, clamped: i32 },
    /// The ticker list was empty after cleanup.
    NoTickers,
}

impl fmt::Display for RunWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TickerFailed { symbol, error } => {
                write!(f, "Could not fetch data for {symbol}: {error}")
            }
            Self::MetricUnavailable { symbol, metric } => {
                write!(f, "{} not available for {symbol}", metric.label())
            }
            Self::InvertedYearRange { start, end } => write!(
                f,
                "Start year must be before or equal to end year (got {start} > {end})"
            ),
            Self::YearOutOfRange { year, clamped } => {
                write!(f, "Year {year} is out of range; using {clamped}")
            }
            Self::NoTickers => f.write_str("No tickers provided"),
        }
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// The table has at least one row.
    Ready,
    /// No ticker returned any data.
    NoDataRetrieved,
    /// Data came back but nothing survived the year filter.
    NoValidData,
}

impl RunStatus {
    /// The user-facing message for the empty outcomes.
    #[must_use]
    pub const fn message(self) -> Option<&'static str> {
        match self {
            Self::Ready => None,
            Self::NoDataRetrieved => Some("No data retrieved for any tickers."),
            Self::NoValidData => Some("No valid data found for the selected tickers and metric."),
        }
    }
}

/// Everything the renderers need from one run.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub metric: Metric,
    pub alignment: Alignment,
    pub status: RunStatus,
    /// Aligned values; empty unless `status` is [`RunStatus::Ready`].
    pub table: AlignedTable,
    pub correlation: Option<CorrelationMatrix>,
    pub chart: Option<ChartData>,
    pub warnings: Vec<RunWarning>,
}

/// SVG documents for one report.
#[cfg(feature = "plot")]
#[derive(Debug, Clone)]
pub struct RenderedCharts {
    pub trend_svg: String,
    pub heatmap_svg: String,
}

impl AnalysisReport {
    #[must_use]
    pub const fn has_data(&self) -> bool {
        matches!(self.status, RunStatus::Ready)
    }

    /// Renders the trend chart and the heatmap. Returns `Ok(None)` for an empty run.
    ///
    /// # Errors
    ///
    /// Returns [`FcError::Render`] if drawing fails.
    #[cfg(feature = "plot")]
    pub fn render_charts(&self, cfg: &ChartConfig) -> Result<Option<RenderedCharts>, FcError> {
        let (Some(chart), Some(corr)) = (&self.chart, &self.correlation) else {
            return Ok(None);
        };
        Ok(Some(RenderedCharts {
            trend_svg: line_chart_svg(chart, self.metric, cfg)?,
            heatmap_svg: heatmap_svg(corr, self.metric, cfg)?,
        }))
    }
}

/// Runs one analysis against `source`.
///
/// Tickers are fetched one after another. Failures and unavailable metrics are
/// recorded as warnings and the run continues with the remaining tickers.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        level = "info",
        skip(source, config),
        fields(metric = %config.selected_metric(), tickers = config.ticker_list().len())
    )
)]
pub async fn run<S>(source: &S, config: &AnalysisConfig) -> AnalysisReport
where
    S: MetricSource + ?Sized,
{
    let metric = config.selected_metric();
    let alignment = config.alignment_policy();
    let (start, end) = (config.start_year(), config.end_year());

    let mut warnings = config.validate();
    #[cfg(feature = "tracing")]
    for w in &warnings {
        tracing::warn!(warning = %w, "configuration");
    }
    let mut fetched: Vec<MetricSeries> = Vec::new();

    for symbol in config.ticker_list() {
        match source.fetch_metric(symbol, metric, (start, end)).await {
            FetchOutcome::Series(series) => fetched.push(series),
            FetchOutcome::MetricUnavailable { symbol, metric } => {
                #[cfg(feature = "tracing")]
                tracing::warn!(%symbol, %metric, "metric not available");
                warnings.push(RunWarning::MetricUnavailable { symbol, metric });
            }
            FetchOutcome::Failed { symbol, error } => {
                #[cfg(feature = "tracing")]
                tracing::warn!(%symbol, error = %error, "ticker skipped");
                warnings.push(RunWarning::TickerFailed {
                    symbol,
                    error: error.to_string(),
                });
            }
        }
    }

    let empty = |status, warnings| AnalysisReport {
        metric,
        alignment,
        status,
        table: AlignedTable::new(alignment, Vec::new()),
        correlation: None,
        chart: None,
        warnings,
    };

    if fetched.is_empty() {
        return empty(RunStatus::NoDataRetrieved, warnings);
    }

    let table = AlignedTable::assemble(alignment, &fetched, start, end);
    if table.is_empty() {
        return empty(RunStatus::NoValidData, warnings);
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(rows = table.len(), columns = table.columns().len(), "table assembled");

    let correlation = CorrelationMatrix::from_table(&table);
    let chart = ChartData::from_table(&table, config.chart_normalization());

    AnalysisReport {
        metric,
        alignment,
        status: RunStatus::Ready,
        table,
        correlation: Some(correlation),
        chart: Some(chart),
        warnings,
    }
}
