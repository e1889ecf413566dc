//! Cookie & crumb acquisition for Yahoo endpoints.

use crate::core::error::FcError;
use reqwest::header::SET_COOKIE;

impl super::FcClient {
    pub(crate) async fn ensure_credentials(&self) -> Result<(), FcError> {
        if self.state.read().await.crumb.is_some() {
            return Ok(());
        }

        let _guard = self.credential_fetch_lock.lock().await;

        // Another caller may have finished while we waited on the lock.
        if self.state.read().await.crumb.is_some() {
            return Ok(());
        }

        self.get_cookie().await?;
        self.get_crumb_internal().await?;

        Ok(())
    }

    pub(crate) async fn clear_crumb(&self) {
        let mut state = self.state.write().await;
        state.crumb = None;
    }

    pub(crate) async fn crumb(&self) -> Option<String> {
        let state = self.state.read().await;
        state.crumb.clone()
    }

    async fn get_cookie(&self) -> Result<(), FcError> {
        let req = self.http.get(self.cookie_url.clone());
        let resp = self.send_with_retry(req, None).await?;

        let cookie = resp
            .headers()
            .get(SET_COOKIE)
            .ok_or(FcError::Auth("No cookie received from fc.yahoo.com".into()))?
            .to_str()
            .map_err(|_| FcError::Auth("Invalid cookie header format".into()))?
            .to_string();

        self.state.write().await.cookie = Some(cookie);
        Ok(())
    }

    async fn get_crumb_internal(&self) -> Result<(), FcError> {
        if self.state.read().await.cookie.is_none() {
            return Err(FcError::Auth("Cookie is missing, cannot get crumb".into()));
        }

        let req = self.http.get(self.crumb_url.clone());
        let resp = self.send_with_retry(req, None).await?;
        let crumb = resp.text().await?;

        if crumb.is_empty() || crumb.contains('{') || crumb.contains('<') {
            return Err(FcError::Auth(format!("Received invalid crumb: {crumb}")));
        }

        self.state.write().await.crumb = Some(crumb);
        Ok(())
    }
}
