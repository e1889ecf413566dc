use std::time::Duration;

use fincorr_rs::{CacheMode, FcClient, FundamentalsBuilder, RetryConfig};

use crate::common;

fn cached_client(server: &httpmock::MockServer) -> FcClient {
    FcClient::builder()
        .base_timeseries(common::base_timeseries(server))
        .cache_ttl(Duration::from_secs(60))
        .retry_config(RetryConfig::disabled())
        ._preauth("cookie", "crumb")
        .build()
        .unwrap()
}

#[tokio::test]
async fn cache_hit_avoids_second_request() {
    let server = common::setup_server();
    let mock = common::mock_timeseries(
        &server,
        "META",
        "quarterlyTotalRevenue",
        "crumb",
        common::timeseries_body("META", "quarterlyTotalRevenue", &[("2024-06-30", Some(39_071_000_000.0))]),
    );
    let client = cached_client(&server);
    assert!(client.cache_enabled());

    let a = FundamentalsBuilder::new(&client, "META").years(2024, 2024).fetch().await.unwrap();
    let b = FundamentalsBuilder::new(&client, "META").years(2024, 2024).fetch().await.unwrap();

    mock.assert_calls(1);
    assert_eq!(a, b);
}

#[tokio::test]
async fn refresh_and_bypass_go_to_network() {
    let server = common::setup_server();
    let mock = common::mock_timeseries(
        &server,
        "AMZN",
        "quarterlyTotalRevenue",
        "crumb",
        common::timeseries_body("AMZN", "quarterlyTotalRevenue", &[("2024-06-30", Some(147_977_000_000.0))]),
    );
    let client = cached_client(&server);

    for mode in [CacheMode::Use, CacheMode::Refresh, CacheMode::Bypass, CacheMode::Use] {
        FundamentalsBuilder::new(&client, "AMZN")
            .years(2024, 2024)
            .cache_mode(mode)
            .fetch()
            .await
            .unwrap();
    }

    // Use (miss), Refresh, Bypass; the final Use is served from the cache.
    mock.assert_calls(3);

    client.clear_cache().await;
    FundamentalsBuilder::new(&client, "AMZN").years(2024, 2024).fetch().await.unwrap();
    mock.assert_calls(4);
}

#[tokio::test]
async fn provider_error_answers_are_not_cached() {
    let server = common::setup_server();
    let body = r#"{"timeseries":{"result":null,"error":{"code":"Bad Request","description":"Invalid type"}}}"#;
    let mock = common::mock_timeseries(&server, "NFLX", "quarterlyTotalRevenue", "crumb", body.into());
    let client = cached_client(&server);

    for _ in 0..2 {
        let err = FundamentalsBuilder::new(&client, "NFLX")
            .years(2024, 2024)
            .fetch()
            .await
            .unwrap_err();
        assert!(matches!(err, fincorr_rs::FcError::Data(_)), "got {err:?}");
    }

    mock.assert_calls(2);
}
