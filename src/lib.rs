//! fincorr-rs: quarterly fundamentals alignment and correlation across tickers.
//!
//! Companies close their fiscal quarters on different calendar days. This crate
//! fetches one quarterly income-statement line item per ticker from Yahoo's
//! fundamentals-timeseries endpoint, puts every series onto a shared quarter axis,
//! and reports the aligned table, a trend chart and a correlation heatmap.
//!
//! Two alignment policies are available:
//! - [`Alignment::CustomFiscal`] labels each report with a `"<year>-Q<n>"` bucket
//!   using fixed day-of-month cutoffs.
//! - [`Alignment::CalendarQuarterEnd`] forward-fills the latest report onto each
//!   calendar quarter-end.
//!
//! ```no_run
//! use fincorr_rs::{AnalysisConfig, FcClient, analysis, report};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = FcClient::builder().build()?;
//! let config = AnalysisConfig::new("AAPL, MSFT").years(2022, 2023);
//! let result = analysis::run(&client, &config).await;
//! for w in &result.warnings {
//!     eprintln!("warning: {w}");
//! }
//! println!("{}", report::render_table(&result.table));
//! # Ok(())
//! # }
//! ```

pub mod align;
pub mod analysis;
pub mod core;
pub mod fundamentals;
pub mod report;

pub use align::{AlignedTable, Alignment, BucketKey, QuarterLabel};
pub use analysis::{AnalysisConfig, AnalysisReport, RunStatus, RunWarning};
pub use crate::core::{CacheMode, FcClient, FcClientBuilder, FcError, MetricSource, RetryConfig};
pub use crate::core::client::Backoff;
pub use fundamentals::{FetchOutcome, FundamentalsBuilder, Metric, MetricObservation, MetricSeries};
pub use report::{CorrelationMatrix, Normalization};

#[cfg(feature = "dataframe")]
pub use crate::core::dataframe::ToDataFrame;
