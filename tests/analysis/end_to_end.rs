use fincorr_rs::{
    Alignment, AnalysisConfig, BucketKey, Metric, Normalization, RunStatus, RunWarning, analysis,
    report,
};
use httpmock::Method::GET;

use crate::common;

const AAPL: &[(&str, Option<f64>)] = &[
    ("2019-12-28", Some(91_819_000_000.0)),
    ("2020-03-28", Some(58_313_000_000.0)),
    ("2020-06-27", Some(59_685_000_000.0)),
    ("2020-09-26", Some(64_698_000_000.0)),
    ("2020-12-26", Some(111_439_000_000.0)),
    ("2021-03-27", Some(89_584_000_000.0)),
    ("2021-06-26", Some(81_434_000_000.0)),
    ("2021-09-25", Some(83_360_000_000.0)),
    ("2021-12-25", Some(123_945_000_000.0)),
];

const MSFT: &[(&str, Option<f64>)] = &[
    ("2020-03-31", Some(35_021_000_000.0)),
    ("2020-06-30", Some(38_033_000_000.0)),
    ("2020-09-30", Some(37_154_000_000.0)),
    ("2020-12-31", Some(43_076_000_000.0)),
    ("2021-03-31", Some(41_706_000_000.0)),
    ("2021-06-30", Some(46_152_000_000.0)),
    ("2021-09-30", Some(45_317_000_000.0)),
    ("2021-12-31", Some(51_728_000_000.0)),
];

fn mock_pair(server: &httpmock::MockServer) {
    for (sym, points) in [("AAPL", AAPL), ("MSFT", MSFT)] {
        common::mock_timeseries(
            server,
            sym,
            "quarterlyTotalRevenue",
            "crumb",
            common::timeseries_body(sym, "quarterlyTotalRevenue", points),
        );
    }
}

#[tokio::test]
async fn calendar_alignment_end_to_end() {
    let server = common::setup_server();
    mock_pair(&server);
    let client = common::preauth_client(&server, "crumb");

    let cfg = AnalysisConfig::new("aapl, msft")
        .years(2020, 2021)
        .metric(Metric::TotalRevenue)
        .alignment(Alignment::CalendarQuarterEnd);
    let result = analysis::run(&client, &cfg).await;

    assert_eq!(result.status, RunStatus::Ready);
    assert!(result.warnings.is_empty());
    assert_eq!(result.table.columns(), ["AAPL", "MSFT"]);
    assert_eq!(result.table.len(), 8);
    assert!(result.table.rows().all(|(_, row)| row.iter().all(Option::is_some)));

    let corr = result.correlation.as_ref().unwrap();
    let ab = corr.between("AAPL", "MSFT").unwrap();
    assert_eq!(Some(ab), corr.between("MSFT", "AAPL"));
    assert!((-1.0..=1.0).contains(&ab));
    assert_eq!(corr.between("AAPL", "AAPL"), Some(1.0));

    let text = report::render_table(&result.table);
    let mut lines = text.lines();
    assert!(lines.next().unwrap().starts_with("Quarter End"));
    assert!(lines.next().unwrap().starts_with("2021-12-31"), "newest row first");
    assert!(text.contains("$123,945,000,000"));
}

#[tokio::test]
async fn fiscal_alignment_with_failing_ticker() {
    let server = common::setup_server();
    mock_pair(&server);
    server.mock(|when, then| {
        when.method(GET)
            .path(format!("{}ZZZZ", common::TIMESERIES_PATH));
        then.status(404);
    });
    let client = common::preauth_client(&server, "crumb");

    let cfg = AnalysisConfig::new("AAPL, ZZZZ, MSFT")
        .years(2021, 2021)
        .normalization(Normalization::MinMax);
    let result = analysis::run(&client, &cfg).await;

    assert!(result.has_data());
    assert_eq!(result.table.columns(), ["AAPL", "MSFT"]);
    assert!(matches!(
        result.warnings.as_slice(),
        [RunWarning::TickerFailed { symbol, .. }] if symbol == "ZZZZ"
    ));

    let keys: Vec<String> = result.table.keys().map(ToString::to_string).collect();
    assert_eq!(keys, ["2021-Q1", "2021-Q2", "2021-Q3", "2021-Q4"]);

    let q1 = BucketKey::Fiscal("2021-Q1".parse().unwrap());
    assert!(result.table.value(&q1, "AAPL").is_some());
    assert!(result.table.value(&q1, "MSFT").is_some());

    let chart = result.chart.as_ref().unwrap();
    assert!(chart.normalized);
    for (_, values) in &chart.series {
        let present: Vec<f64> = values.iter().flatten().copied().collect();
        assert!(present.iter().any(|v| *v == 0.0));
        assert!(present.iter().any(|v| *v == 1.0));
    }
}

#[tokio::test]
async fn window_outside_reports_is_no_valid_data() {
    let server = common::setup_server();
    mock_pair(&server);
    let client = common::preauth_client(&server, "crumb");

    let cfg = AnalysisConfig::new("AAPL, MSFT").years(2015, 2016);
    let result = analysis::run(&client, &cfg).await;

    assert_eq!(result.status, RunStatus::NoValidData);
    assert_eq!(
        result.status.message(),
        Some("No valid data found for the selected tickers and metric.")
    );
}
