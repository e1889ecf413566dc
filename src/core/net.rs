use crate::core::FcError;

/// Read the response body as text, mapping non-success statuses to [`FcError::Status`].
pub(crate) async fn get_text(
    resp: reqwest::Response,
    _endpoint: &str,
    _symbol: &str,
) -> Result<String, FcError> {
    let status = resp.status();
    if !status.is_success() {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            endpoint = _endpoint,
            symbol = _symbol,
            status = status.as_u16(),
            "non-success response"
        );
        return Err(FcError::Status {
            status: status.as_u16(),
            url: resp.url().to_string(),
        });
    }

    Ok(resp.text().await?)
}
