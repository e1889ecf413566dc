//! Runs the full pipeline against an in-memory source and prints the report.
//!
//! `cargo run --example synthetic_report`

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use chrono::NaiveDate;
use fincorr_rs::report::{self, ChartConfig};
use fincorr_rs::{
    Alignment, AnalysisConfig, FetchOutcome, Metric, MetricObservation, MetricSeries, MetricSource,
    analysis,
};
use rust_decimal::Decimal;

/// Quarterly revenue in millions, keyed by symbol.
struct InMemory(HashMap<&'static str, Vec<(NaiveDate, i64)>>);

impl MetricSource for InMemory {
    fn fetch_metric<'a>(
        &'a self,
        symbol: &'a str,
        metric: Metric,
        _years: (i32, i32),
    ) -> Pin<Box<dyn Future<Output = FetchOutcome> + Send + 'a>> {
        Box::pin(async move {
            let Some(points) = self.0.get(symbol) else {
                return FetchOutcome::MetricUnavailable {
                    symbol: symbol.to_string(),
                    metric,
                };
            };
            let obs = points
                .iter()
                .map(|(d, v)| MetricObservation::new(*d, Some(Decimal::from(*v) * Decimal::from(1_000_000))))
                .collect();
            FetchOutcome::Series(MetricSeries::new(symbol, metric, obs))
        })
    }
}

fn quarters(year: i32, days: [(u32, u32); 4], values: [i64; 4]) -> Vec<(NaiveDate, i64)> {
    days.iter()
        .zip(values)
        .filter_map(|(&(m, d), v)| NaiveDate::from_ymd_opt(year, m, d).map(|date| (date, v)))
        .collect()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let apple_days = [(3, 30), (6, 29), (9, 28), (12, 28)];
    let calendar_days = [(3, 31), (6, 30), (9, 30), (12, 31)];

    let mut data = HashMap::new();
    data.insert(
        "AAPL",
        [
            quarters(2022, apple_days, [97_278, 82_959, 90_146, 117_154]),
            quarters(2023, apple_days, [94_836, 81_797, 89_498, 119_575]),
        ]
        .concat(),
    );
    data.insert(
        "MSFT",
        [
            quarters(2022, calendar_days, [49_360, 51_865, 50_122, 52_747]),
            quarters(2023, calendar_days, [52_857, 56_189, 56_517, 62_020]),
        ]
        .concat(),
    );
    let source = InMemory(data);

    for alignment in [Alignment::CustomFiscal, Alignment::CalendarQuarterEnd] {
        let config = AnalysisConfig::new("AAPL, MSFT, UNKNOWN")
            .years(2022, 2023)
            .alignment(alignment);
        let result = analysis::run(&source, &config).await;

        for w in &result.warnings {
            println!("warning: {w}");
        }
        println!("{}", report::render_table(&result.table));
        if let Some(corr) = &result.correlation {
            println!("{}", report::render_correlation(corr));
        }
        if let Some(charts) = result.render_charts(&ChartConfig::default())? {
            println!(
                "trend chart: {} bytes, heatmap: {} bytes\n",
                charts.trend_svg.len(),
                charts.heatmap_svg.len()
            );
        }
    }
    Ok(())
}
