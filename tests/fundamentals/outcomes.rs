use fincorr_rs::{FcError, FetchOutcome, Metric, MetricSource};
use httpmock::Method::GET;

use crate::common;

#[tokio::test]
async fn missing_key_is_metric_unavailable() {
    let server = common::setup_server();
    let mock = common::mock_timeseries(
        &server,
        "BRK-B",
        "quarterlyCostOfRevenue",
        "crumb",
        common::empty_timeseries_body("BRK-B", "quarterlyCostOfRevenue"),
    );
    let client = common::preauth_client(&server, "crumb");

    let outcome = client
        .fetch_metric("BRK-B", Metric::CostOfRevenue, (2022, 2023))
        .await;

    mock.assert();
    match outcome {
        FetchOutcome::MetricUnavailable { symbol, metric } => {
            assert_eq!(symbol, "BRK-B");
            assert_eq!(metric, Metric::CostOfRevenue);
        }
        other => panic!("expected MetricUnavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn all_null_values_are_metric_unavailable() {
    let server = common::setup_server();
    let body = common::timeseries_body(
        "XYZ",
        "quarterlyOperatingIncome",
        &[("2023-03-31", None), ("2023-06-30", None)],
    );
    let _mock = common::mock_timeseries(&server, "XYZ", "quarterlyOperatingIncome", "crumb", body);
    let client = common::preauth_client(&server, "crumb");

    let outcome = client
        .fetch_metric("XYZ", Metric::OperatingIncome, (2023, 2023))
        .await;
    assert!(matches!(outcome, FetchOutcome::MetricUnavailable { .. }));
}

#[tokio::test]
async fn http_404_is_failed() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path(format!("{}NOPE", common::TIMESERIES_PATH));
        then.status(404).body("Not Found");
    });
    let client = common::preauth_client(&server, "crumb");

    let outcome = client.fetch_metric("NOPE", Metric::TotalRevenue, (2023, 2023)).await;

    mock.assert();
    match outcome {
        FetchOutcome::Failed { symbol, error } => {
            assert_eq!(symbol, "NOPE");
            assert!(matches!(error, FcError::Status { status: 404, .. }), "got {error:?}");
        }
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[tokio::test]
async fn provider_error_payload_is_failed() {
    let server = common::setup_server();
    let body = r#"{"timeseries":{"result":null,"error":{"code":"Bad Request","description":"Invalid type"}}}"#;
    let _mock = common::mock_timeseries(&server, "AAPL", "quarterlyTotalRevenue", "crumb", body.into());
    let client = common::preauth_client(&server, "crumb");

    let outcome = client.fetch_metric("AAPL", Metric::TotalRevenue, (2023, 2023)).await;
    match outcome {
        FetchOutcome::Failed { error: FcError::Data(msg), .. } => {
            assert!(msg.contains("Invalid type"), "{msg}");
        }
        other => panic!("expected Failed(Data), got {other:?}"),
    }
}

#[tokio::test]
async fn series_outcome_carries_values() {
    let server = common::setup_server();
    let body = common::timeseries_body(
        "NVDA",
        "quarterlyTotalRevenue",
        &[("2024-04-28", Some(26_044_000_000.0)), ("2024-01-28", Some(22_103_000_000.0))],
    );
    let _mock = common::mock_timeseries(&server, "NVDA", "quarterlyTotalRevenue", "crumb", body);
    let client = common::preauth_client(&server, "crumb");

    let series = client
        .fetch_metric("NVDA", Metric::TotalRevenue, (2024, 2024))
        .await
        .into_series()
        .expect("series");
    assert_eq!(series.len(), 2);
    assert!(series.observations()[0].report_date < series.observations()[1].report_date);
}
