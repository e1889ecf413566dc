use chrono::{DateTime, NaiveDate};
use url::Url;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::core::{
    FcClient, FcError,
    client::{CacheMode, RetryConfig},
    net,
    wire::from_raw,
};

use super::model::{Metric, MetricObservation, MetricSeries};
use super::wire::{TimeseriesEnvelope, TimeseriesValue};

/// Fetches the quarterly timeseries for `metric` between the two unix timestamps.
///
/// An "Invalid Crumb" answer (either a 401 or an error payload) clears the crumb and
/// retries once with fresh credentials.
pub(super) async fn quarterly_series(
    client: &FcClient,
    symbol: &str,
    metric: Metric,
    period: (i64, i64),
    cache_mode: CacheMode,
    retry_override: Option<&RetryConfig>,
) -> Result<MetricSeries, FcError> {
    let type_key = metric.quarterly_type();

    for attempt in 0..=1 {
        let fetched =
            match fetch_body(client, symbol, &type_key, period, cache_mode, retry_override).await {
                Err(FcError::Status { status: 401, .. }) if attempt == 0 => {
                    client.clear_crumb().await;
                    continue;
                }
                other => other?,
            };

        let envelope: TimeseriesEnvelope = serde_json::from_str(&fetched.body)?;

        let error = envelope
            .timeseries
            .as_ref()
            .and_then(|ts| ts.error.as_ref())
            .or_else(|| envelope.finance.as_ref().and_then(|f| f.error.as_ref()));
        if let Some(err) = error {
            if err.is_invalid_crumb() && attempt == 0 {
                #[cfg(feature = "tracing")]
                tracing::debug!(symbol, "invalid crumb; refreshing and retrying");
                client.clear_crumb().await;
                continue;
            }
            return Err(FcError::Data(format!("yahoo error: {}", err.message())));
        }

        // Only answers without an error node are worth replaying.
        if !fetched.from_cache && cache_mode != CacheMode::Bypass {
            client.cache_put(&fetched.url, &fetched.body, None).await;
        }

        return parse_series(symbol, metric, &type_key, envelope);
    }

    Err(FcError::Auth(format!(
        "timeseries call for {symbol} failed after crumb refresh"
    )))
}

struct Fetched {
    url: Url,
    body: String,
    from_cache: bool,
}

async fn fetch_body(
    client: &FcClient,
    symbol: &str,
    type_key: &str,
    (start_ts, end_ts): (i64, i64),
    cache_mode: CacheMode,
    retry_override: Option<&RetryConfig>,
) -> Result<Fetched, FcError> {
    let mut url = client.base_timeseries().join(symbol)?;
    url.query_pairs_mut()
        .append_pair("symbol", symbol)
        .append_pair("type", type_key)
        .append_pair("period1", &start_ts.to_string())
        .append_pair("period2", &end_ts.to_string());

    client.ensure_credentials().await?;
    if let Some(crumb) = client.crumb().await {
        url.query_pairs_mut().append_pair("crumb", &crumb);
    }

    if cache_mode == CacheMode::Use
        && let Some(body) = client.cache_get(&url).await
    {
        return Ok(Fetched {
            url,
            body,
            from_cache: true,
        });
    }

    let resp = client
        .send_with_retry(client.http().get(url.clone()), retry_override)
        .await?;
    let body = net::get_text(resp, &format!("timeseries_{type_key}"), symbol).await?;
    Ok(Fetched {
        url,
        body,
        from_cache: false,
    })
}

fn parse_series(
    symbol: &str,
    metric: Metric,
    type_key: &str,
    envelope: TimeseriesEnvelope,
) -> Result<MetricSeries, FcError> {
    let results = envelope
        .timeseries
        .and_then(|ts| ts.result)
        .unwrap_or_default();

    let Some((timestamps, values_json)) = results.into_iter().find_map(|mut item| {
        let values = item.values.remove(type_key)?;
        Some((item.timestamp.unwrap_or_default(), values))
    }) else {
        return Err(FcError::MissingData(format!(
            "{type_key} not available for {symbol}"
        )));
    };

    let values: Vec<Option<TimeseriesValue>> = serde_json::from_value(values_json)?;

    let observations = values
        .into_iter()
        .enumerate()
        .filter_map(|(i, v)| {
            let v = v?;
            let date = v
                .as_of_date
                .as_deref()
                .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
                .or_else(|| {
                    timestamps
                        .get(i)
                        .and_then(|ts| DateTime::from_timestamp(*ts, 0))
                        .map(|dt| dt.date_naive())
                })?;
            let value = from_raw(v.reported_value)
                .filter(|x| x.is_finite())
                .and_then(Decimal::from_f64);
            Some(MetricObservation::new(date, value))
        })
        .collect();

    Ok(MetricSeries::new(symbol, metric, observations))
}
