use chrono::NaiveDate;
use fincorr_rs::{FundamentalsBuilder, Metric};
use rust_decimal::Decimal;

use crate::common;

#[tokio::test]
async fn fixture_series_is_sorted_and_skips_null_entries() {
    let server = common::setup_server();
    let mock = common::mock_timeseries(
        &server,
        "AAPL",
        "quarterlyTotalRevenue",
        "crumb",
        common::fixture("timeseries_quarterlyTotalRevenue_AAPL.json"),
    );
    let client = common::preauth_client(&server, "crumb");

    let series = FundamentalsBuilder::new(&client, "AAPL")
        .metric(Metric::TotalRevenue)
        .years(2023, 2024)
        .fetch()
        .await
        .unwrap();

    mock.assert();
    assert_eq!(series.symbol, "AAPL");
    assert_eq!(series.metric, Metric::TotalRevenue);
    assert_eq!(series.len(), 4);

    let dates: Vec<NaiveDate> = series.observations().iter().map(|o| o.report_date).collect();
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted, "observations come back chronological");

    let first = &series.observations()[0];
    assert_eq!(first.report_date, NaiveDate::from_ymd_opt(2023, 9, 30).unwrap());
    assert_eq!(first.value, Some(Decimal::from(89_498_000_000_i64)));
}

#[tokio::test]
async fn null_reported_values_are_kept_as_absent() {
    let server = common::setup_server();
    let body = r#"{
      "timeseries": {
        "result": [{
          "meta": { "symbol": ["MSFT"], "type": ["quarterlyGrossProfit"] },
          "timestamp": [1711843200, 1719705600],
          "quarterlyGrossProfit": [
            { "asOfDate": "2024-03-31", "periodType": "3M", "reportedValue": null },
            { "asOfDate": "2024-06-30", "periodType": "3M", "reportedValue": { "raw": 45043000000.0 } }
          ]
        }],
        "error": null
      }
    }"#;
    let mock = common::mock_timeseries(&server, "MSFT", "quarterlyGrossProfit", "crumb", body.into());
    let client = common::preauth_client(&server, "crumb");

    let series = FundamentalsBuilder::new(&client, "MSFT")
        .metric(Metric::GrossProfit)
        .years(2024, 2024)
        .fetch()
        .await
        .unwrap();

    mock.assert();
    assert_eq!(series.len(), 2);
    assert_eq!(series.observations()[0].value, None);
    assert_eq!(
        series.observations()[1].value,
        Some(Decimal::from(45_043_000_000_i64))
    );
}

#[tokio::test]
async fn date_falls_back_to_timestamp_when_as_of_date_missing() {
    let server = common::setup_server();
    // 2024-06-29T00:00:00Z
    let body = r#"{
      "timeseries": {
        "result": [{
          "timestamp": [1719619200],
          "quarterlyEBITDA": [ { "reportedValue": { "raw": 40000000000 } } ]
        }],
        "error": null
      }
    }"#;
    let _mock = common::mock_timeseries(&server, "AAPL", "quarterlyEBITDA", "crumb", body.into());
    let client = common::preauth_client(&server, "crumb");

    let series = FundamentalsBuilder::new(&client, "AAPL")
        .metric(Metric::Ebitda)
        .fetch()
        .await
        .unwrap();

    assert_eq!(
        series.observations()[0].report_date,
        NaiveDate::from_ymd_opt(2024, 6, 29).unwrap()
    );
}
