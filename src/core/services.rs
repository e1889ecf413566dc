use crate::core::FcClient;
use crate::fundamentals::{FetchOutcome, FundamentalsBuilder, Metric};

/// A trait for anything that can supply quarterly metric series for a symbol.
///
/// This decouples analysis runs from the network: [`FcClient`] implements it against the
/// live provider, and tests or offline tools can plug in fixed observations.
pub trait MetricSource: Send + Sync {
    /// Asynchronously fetches `metric` for `symbol`, sized for the inclusive year range.
    ///
    /// Implementations never fail the run; problems are reported through the
    /// [`FetchOutcome`] variants.
    fn fetch_metric<'a>(
        &'a self,
        symbol: &'a str,
        metric: Metric,
        years: (i32, i32),
    ) -> core::pin::Pin<Box<dyn core::future::Future<Output = FetchOutcome> + Send + 'a>>;
}

impl MetricSource for FcClient {
    fn fetch_metric<'a>(
        &'a self,
        symbol: &'a str,
        metric: Metric,
        (start_year, end_year): (i32, i32),
    ) -> core::pin::Pin<Box<dyn core::future::Future<Output = FetchOutcome> + Send + 'a>> {
        Box::pin(async move {
            FundamentalsBuilder::new(self, symbol)
                .metric(metric)
                .years(start_year, end_year)
                .fetch_outcome()
                .await
        })
    }
}
