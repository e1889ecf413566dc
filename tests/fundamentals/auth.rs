use fincorr_rs::{FcClient, FundamentalsBuilder, Metric, RetryConfig};
use httpmock::Method::GET;
use url::Url;

use crate::common;

#[tokio::test]
async fn invalid_crumb_then_retry_succeeds() {
    let server = common::setup_server();
    let sym = "AAPL";

    let stale = server.mock(|when, then| {
        when.method(GET)
            .path(format!("{}{sym}", common::TIMESERIES_PATH))
            .query_param("crumb", "stale");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"finance":{"result":null,"error":{"code":"Unauthorized","description":"Invalid Crumb"}}}"#);
    });
    let (cookie, crumb) = common::mock_cookie_crumb(&server, "fresh");
    let ok = common::mock_timeseries(
        &server,
        sym,
        "quarterlyTotalRevenue",
        "fresh",
        common::timeseries_body(sym, "quarterlyTotalRevenue", &[("2024-06-29", Some(85_777_000_000.0))]),
    );

    let client = common::preauth_client(&server, "stale");
    let series = FundamentalsBuilder::new(&client, sym)
        .years(2024, 2024)
        .fetch()
        .await
        .unwrap();

    stale.assert();
    cookie.assert();
    crumb.assert();
    ok.assert();
    assert_eq!(series.len(), 1);
}

#[tokio::test]
async fn credentials_are_fetched_lazily_once() {
    let server = common::setup_server();
    let (cookie, crumb) = common::mock_cookie_crumb(&server, "crumb-value");
    let revenue = common::mock_timeseries(
        &server,
        "MSFT",
        "quarterlyTotalRevenue",
        "crumb-value",
        common::timeseries_body("MSFT", "quarterlyTotalRevenue", &[("2024-03-31", Some(61_858_000_000.0))]),
    );
    let profit = common::mock_timeseries(
        &server,
        "MSFT",
        "quarterlyGrossProfit",
        "crumb-value",
        common::timeseries_body("MSFT", "quarterlyGrossProfit", &[("2024-03-31", Some(43_353_000_000.0))]),
    );

    let client = FcClient::builder()
        .base_timeseries(common::base_timeseries(&server))
        .cookie_url(Url::parse(&format!("{}/consent", server.base_url())).unwrap())
        .crumb_url(Url::parse(&format!("{}/v1/test/getcrumb", server.base_url())).unwrap())
        .retry_config(RetryConfig::disabled())
        .build()
        .unwrap();

    for metric in [Metric::TotalRevenue, Metric::GrossProfit] {
        let s = FundamentalsBuilder::new(&client, "MSFT")
            .metric(metric)
            .years(2024, 2024)
            .fetch()
            .await
            .unwrap();
        assert_eq!(s.len(), 1);
    }

    cookie.assert_calls(1);
    crumb.assert_calls(1);
    revenue.assert();
    profit.assert();
}

#[tokio::test]
async fn unauthorized_status_refreshes_crumb() {
    let server = common::setup_server();
    let denied = server.mock(|when, then| {
        when.method(GET)
            .path(format!("{}GOOGL", common::TIMESERIES_PATH))
            .query_param("crumb", "old");
        then.status(401).body("Unauthorized");
    });
    let (_cookie, _crumb) = common::mock_cookie_crumb(&server, "new");
    let ok = common::mock_timeseries(
        &server,
        "GOOGL",
        "quarterlyTotalRevenue",
        "new",
        common::timeseries_body("GOOGL", "quarterlyTotalRevenue", &[("2024-06-30", Some(84_742_000_000.0))]),
    );

    let client = common::preauth_client(&server, "old");
    let series = FundamentalsBuilder::new(&client, "GOOGL")
        .years(2024, 2024)
        .fetch()
        .await
        .unwrap();

    denied.assert();
    ok.assert();
    assert_eq!(series.len(), 1);
}
