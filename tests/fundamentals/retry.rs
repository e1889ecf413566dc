use std::time::Duration;

use fincorr_rs::{Backoff, FcClient, FcError, FundamentalsBuilder, RetryConfig};
use httpmock::Method::GET;
use httpmock::MockServer;

use crate::common;

fn fast_retry(max_retries: u32) -> RetryConfig {
    RetryConfig {
        max_retries,
        backoff: Backoff::Fixed(Duration::from_millis(1)),
        ..RetryConfig::default()
    }
}

fn retrying_client(server: &MockServer, max_retries: u32) -> FcClient {
    FcClient::builder()
        .base_timeseries(common::base_timeseries(server))
        .retry_config(fast_retry(max_retries))
        ._preauth("cookie", "crumb")
        .build()
        .unwrap()
}

#[tokio::test]
async fn persistent_503_is_retried_then_reported() {
    let server = common::setup_server();
    let fail = server.mock(|when, then| {
        when.method(GET)
            .path(format!("{}RETRY", common::TIMESERIES_PATH));
        then.status(503).body("Service Unavailable");
    });

    let max_retries = 2;
    let client = retrying_client(&server, max_retries);
    let result = FundamentalsBuilder::new(&client, "RETRY").years(2024, 2024).fetch().await;

    // 1 initial attempt + 2 retries.
    fail.assert_calls((1 + max_retries) as usize);
    match result {
        Err(FcError::Status { status, .. }) => assert_eq!(status, 503),
        other => panic!("expected a 503 status error, got {other:?}"),
    }
}

#[tokio::test]
async fn transient_503_then_success() {
    let server = common::setup_server();
    let path = format!("{}FLAKY", common::TIMESERIES_PATH);

    // The first answer is slow, which leaves time to swap the 503 for a 200
    // before the retry arrives.
    let mut fail = server
        .mock_async(|when, then| {
            when.method(GET).path(path.clone());
            then.status(503).delay(Duration::from_millis(300));
        })
        .await;

    let client = retrying_client(&server, 3);
    let fetch = FundamentalsBuilder::new(&client, "FLAKY").years(2024, 2024).fetch();
    let swap = async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        fail.delete_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(path.clone());
                then.status(200)
                    .header("content-type", "application/json")
                    .body(common::timeseries_body(
                        "FLAKY",
                        "quarterlyTotalRevenue",
                        &[("2024-06-30", Some(1_000_000.0))],
                    ));
            })
            .await
    };

    let (result, ok) = tokio::join!(fetch, swap);
    let series = result.unwrap();
    assert_eq!(series.len(), 1);
    ok.assert_calls_async(1).await;
}

#[tokio::test]
async fn not_found_is_not_retried() {
    let server = common::setup_server();
    let missing = server.mock(|when, then| {
        when.method(GET)
            .path(format!("{}GONE", common::TIMESERIES_PATH));
        then.status(404).body("Not Found");
    });

    let client = retrying_client(&server, 3);
    let result = FundamentalsBuilder::new(&client, "GONE").years(2024, 2024).fetch().await;

    missing.assert_calls(1);
    assert!(matches!(result, Err(FcError::Status { status: 404, .. })));
}

#[tokio::test]
async fn per_call_policy_overrides_client_default() {
    let server = common::setup_server();
    let fail = server.mock(|when, then| {
        when.method(GET)
            .path(format!("{}BUSY", common::TIMESERIES_PATH));
        then.status(429);
    });

    let client = common::preauth_client(&server, "crumb");
    assert!(!client.retry_config().enabled);

    let result = FundamentalsBuilder::new(&client, "BUSY")
        .years(2024, 2024)
        .retry_policy(Some(fast_retry(1)))
        .fetch()
        .await;

    fail.assert_calls(2);
    assert!(matches!(result, Err(FcError::Status { status: 429, .. })));
}
