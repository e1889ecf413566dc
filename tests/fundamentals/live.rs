use fincorr_rs::{FcClient, FetchOutcome, Metric, MetricSource};

#[tokio::test]
#[ignore]
async fn live_quarterly_revenue_smoke() {
    if std::env::var("FC_LIVE").ok().as_deref() != Some("1") {
        return;
    }

    let client = FcClient::builder().build().unwrap();
    match client.fetch_metric("AAPL", Metric::TotalRevenue, (2023, 2024)).await {
        FetchOutcome::Series(s) => assert!(!s.is_empty()),
        other => panic!("live fetch did not return a series: {other:?}"),
    }
}
