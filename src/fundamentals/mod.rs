//! Quarterly income-statement metrics from the fundamentals-timeseries endpoint.

mod api;
mod model;
mod wire;

pub use model::{FetchOutcome, Metric, MetricObservation, MetricSeries};

use chrono::{Duration, NaiveDate, Utc};

use crate::core::{
    FcClient, FcError,
    client::{CacheMode, RetryConfig},
};

/// A builder for fetching one quarterly metric series for a single symbol.
///
/// # Example
///
/// ```no_run
/// # use fincorr_rs::{FcClient, FundamentalsBuilder, Metric};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = FcClient::builder().build()?;
/// let series = FundamentalsBuilder::new(&client, "AAPL")
///     .metric(Metric::GrossProfit)
///     .years(2021, 2023)
///     .fetch()
///     .await?;
/// println!("{} quarters", series.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct FundamentalsBuilder {
    client: FcClient,
    symbol: String,
    metric: Metric,
    period: Option<(NaiveDate, NaiveDate)>,
    cache_mode: CacheMode,
    retry_override: Option<RetryConfig>,
}

impl FundamentalsBuilder {
    /// Creates a new builder for `symbol`, defaulting to total revenue over the last five years.
    pub fn new(client: &FcClient, symbol: impl Into<String>) -> Self {
        Self {
            client: client.clone(),
            symbol: symbol.into(),
            metric: Metric::TotalRevenue,
            period: None,
            cache_mode: CacheMode::Use,
            retry_override: None,
        }
    }

    /// Selects the metric to fetch.
    #[must_use]
    pub const fn metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    /// Sets an absolute query window (inclusive dates).
    #[must_use]
    pub const fn between(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.period = Some((start, end));
        self
    }

    /// Sets the query window needed to align the inclusive year range.
    ///
    /// The window opens two years early so a report issued before the range can be
    /// carried forward, and closes a year late so January/February filings that
    /// belong to the last fiscal Q4 are seen. Reversed years are accepted.
    #[must_use]
    pub fn years(mut self, start_year: i32, end_year: i32) -> Self {
        let lo = start_year.min(end_year);
        let hi = start_year.max(end_year);
        let start = NaiveDate::from_ymd_opt(lo.saturating_sub(2), 1, 1);
        let end = NaiveDate::from_ymd_opt(hi.saturating_add(1), 12, 31);
        self.period = start.zip(end);
        self
    }

    /// Sets the cache mode for this call.
    #[must_use]
    pub const fn cache_mode(mut self, mode: CacheMode) -> Self {
        self.cache_mode = mode;
        self
    }

    /// Overrides the client's default retry policy for this call.
    #[must_use]
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    fn period_timestamps(&self) -> Result<(i64, i64), FcError> {
        let now = Utc::now();
        let (start, end) = self.period.unwrap_or_else(|| {
            let today = now.date_naive();
            (today - Duration::days(365 * 5), today)
        });
        if start > end {
            return Err(FcError::InvalidParams(format!(
                "query window starts after it ends: {start} > {end}"
            )));
        }
        let to_ts = |d: NaiveDate| d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc().timestamp());
        let start_ts = to_ts(start)
            .ok_or_else(|| FcError::InvalidParams(format!("invalid start date {start}")))?;
        // Capped at the end of today so repeated calls share a cache key.
        let today_end = to_ts(now.date_naive() + Duration::days(1)).unwrap_or(i64::MAX);
        let end_ts = end
            .checked_add_signed(Duration::days(1))
            .and_then(to_ts)
            .ok_or_else(|| FcError::InvalidParams(format!("invalid end date {end}")))?
            .min(today_end);
        Ok((start_ts, end_ts.max(start_ts)))
    }

    /// Fetches the series.
    ///
    /// # Errors
    ///
    /// Returns [`FcError::MissingData`] when the provider has no row for the metric, and
    /// network, status or parse errors otherwise.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            skip(self),
            err(level = "debug"),
            fields(symbol = %self.symbol, metric = %self.metric)
        )
    )]
    pub async fn fetch(self) -> Result<MetricSeries, FcError> {
        let period = self.period_timestamps()?;
        api::quarterly_series(
            &self.client,
            &self.symbol,
            self.metric,
            period,
            self.cache_mode,
            self.retry_override.as_ref(),
        )
        .await
    }

    /// Fetches the series and classifies the result instead of failing.
    pub async fn fetch_outcome(self) -> FetchOutcome {
        let symbol = self.symbol.clone();
        let metric = self.metric;
        FetchOutcome::from_result(&symbol, metric, self.fetch().await)
    }
}
