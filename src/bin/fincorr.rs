//! fincorr: one-shot quarterly correlation report.
//!
//! Fetches a metric for each ticker, prints the aligned table and the correlation
//! matrix, and writes `trend.svg` and `correlation.svg` into the output directory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use fincorr_rs::analysis::{self, DEFAULT_END_YEAR, DEFAULT_START_YEAR, DEFAULT_TICKERS};
use fincorr_rs::report::{self, ChartConfig};
use fincorr_rs::{Alignment, AnalysisConfig, AnalysisReport, FcClient, Metric, Normalization};

/// Run warnings are printed directly, so library logging stays quiet unless
/// `RUST_LOG` asks for more.
const DEFAULT_LOG_FILTER: &str = "fincorr_rs=error";

#[derive(Parser)]
#[command(
    name = "fincorr",
    about = "Align quarterly fundamentals across tickers and report their correlation"
)]
struct Cli {
    /// Comma-separated ticker symbols.
    #[arg(long, default_value = DEFAULT_TICKERS)]
    tickers: String,

    /// First year of the window (inclusive).
    #[arg(long, default_value_t = DEFAULT_START_YEAR)]
    start_year: i32,

    /// Last year of the window (inclusive).
    #[arg(long, default_value_t = DEFAULT_END_YEAR)]
    end_year: i32,

    /// total-revenue, cost-of-revenue, gross-profit, operating-income or ebitda.
    #[arg(long, default_value = "total-revenue")]
    metric: Metric,

    /// Plot raw values instead of normalized ones.
    #[arg(long, default_value_t = false)]
    no_normalize: bool,

    /// max or min-max.
    #[arg(long, default_value = "max")]
    normalization: Normalization,

    /// fiscal or quarter-end.
    #[arg(long, default_value = "fiscal")]
    alignment: Alignment,

    /// Directory for the SVG charts.
    #[arg(long, default_value = "report")]
    out_dir: PathBuf,

    /// Overall HTTP timeout per request.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Cache responses in memory for this many seconds (0 disables).
    #[arg(long, default_value_t = 0)]
    cache_ttl_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut builder = FcClient::builder().timeout(Duration::from_secs(cli.timeout_secs));
    if cli.cache_ttl_secs > 0 {
        builder = builder.cache_ttl(Duration::from_secs(cli.cache_ttl_secs));
    }
    let client = builder.build().context("building HTTP client")?;

    let config = AnalysisConfig::new(&cli.tickers)
        .years(cli.start_year, cli.end_year)
        .metric(cli.metric)
        .normalize(!cli.no_normalize)
        .normalization(cli.normalization)
        .alignment(cli.alignment);

    let result = analysis::run(&client, &config).await;

    for w in &result.warnings {
        eprintln!("warning: {w}");
    }

    if let Some(msg) = result.status.message() {
        println!("{msg}");
        return Ok(());
    }

    print_report(&result);
    write_charts(&result, &cli.out_dir)?;
    Ok(())
}

fn print_report(result: &AnalysisReport) {
    println!("Quarterly {} ({})\n", result.metric, result.alignment.index_name());
    print!("{}", report::render_table(&result.table));
    if let Some(corr) = &result.correlation {
        println!("\nCorrelation of Quarterly {}\n", result.metric);
        print!("{}", report::render_correlation(corr));
    }
}

fn write_charts(result: &AnalysisReport, dir: &Path) -> Result<()> {
    let Some(charts) = result.render_charts(&ChartConfig::default())? else {
        return Ok(());
    };
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    for (name, svg) in [("trend.svg", &charts.trend_svg), ("correlation.svg", &charts.heatmap_svg)] {
        let path = dir.join(name);
        std::fs::write(&path, svg).with_context(|| format!("writing {}", path.display()))?;
        println!("wrote {}", path.display());
    }
    Ok(())
}
