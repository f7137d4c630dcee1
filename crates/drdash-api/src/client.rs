// Dashboard API HTTP client
//
// Wraps `reqwest::Client` with base-path-aware URL construction and
// envelope unwrapping. The backend may be mounted under a sub-path
// behind a reverse proxy, so URLs are always joined against a
// normalized trailing-slash base.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::{ApiEnvelope, DashboardTitles, DatabaseStatus};
use crate::transport::TransportConfig;

/// HTTP client for the dashboard backend.
///
/// Handles the `{ code, data, message }` envelope: all methods return
/// the unwrapped `data` payload, and a non-200 `code` surfaces as
/// [`Error::Application`] even when the HTTP status was 200.
pub struct DashboardClient {
    http: reqwest::Client,
    base_url: Url,
}

impl DashboardClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the dashboard root (e.g. `http://10.0.0.5:8080/`
    /// or `https://ops.example.com/drdash/` behind a reverse proxy).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for an API path, honoring a sub-path base.
    ///
    /// The base is normalized to end with `/` and the endpoint stripped
    /// of any leading `/`, so `https://host/drdash` + `api/data` joins
    /// to `https://host/drdash/api/data` rather than `https://host/api/data`.
    fn api_url(&self, endpoint: &str) -> Result<Url, Error> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(base.join(endpoint.trim_start_matches('/'))?)
    }

    // ── Request plumbing ─────────────────────────────────────────────

    /// GET a URL and decode the body as `T`, keeping the raw body
    /// around for the decode-failure diagnostic.
    ///
    /// The body is decoded regardless of HTTP status -- the backend
    /// signals failure through the envelope `code`, not the status line.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!(%url, "GET");
        let response = self.http.get(url).send().await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| Error::Decode {
            message: e.to_string(),
            body,
        })
    }

    /// GET an enveloped endpoint and unwrap it.
    async fn get_enveloped(&self, endpoint: &str) -> Result<ApiEnvelope, Error> {
        let url = self.api_url(endpoint)?;
        let envelope: ApiEnvelope = self.get_json(url).await?;
        if envelope.code == 200 {
            Ok(envelope)
        } else {
            Err(Error::Application {
                code: envelope.code,
                message: envelope
                    .message
                    .unwrap_or_else(|| "request failed".to_owned()),
            })
        }
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// Fetch the live status of all monitored database systems.
    pub async fn fetch_status(&self) -> Result<Vec<DatabaseStatus>, Error> {
        let envelope = self.get_enveloped("api/data").await?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// Fetch mock status data, plus the localized dashboard titles the
    /// mock endpoint bundles with it.
    pub async fn fetch_mock_status(
        &self,
        lang: &str,
    ) -> Result<(Vec<DatabaseStatus>, Option<DashboardTitles>), Error> {
        let envelope = self
            .get_enveloped(&format!("api/mock-data?lang={lang}"))
            .await?;
        Ok((envelope.data.unwrap_or_default(), envelope.titles))
    }

    /// Fetch the flat translation map for a language.
    ///
    /// Not enveloped -- the endpoint returns the key-to-string mapping
    /// directly.
    pub async fn fetch_translations(
        &self,
        lang: &str,
    ) -> Result<HashMap<String, String>, Error> {
        let url = self.api_url(&format!("api/i18n/{lang}"))?;
        self.get_json(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_at(base: &str) -> DashboardClient {
        DashboardClient::with_client(
            reqwest::Client::new(),
            Url::parse(base).expect("test URL"),
        )
    }

    #[test]
    fn api_url_joins_root_base() {
        let client = client_at("http://127.0.0.1:8080");
        let url = client.api_url("api/data").expect("join");
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/api/data");
    }

    #[test]
    fn api_url_preserves_sub_path_base() {
        let client = client_at("https://ops.example.com/drdash");
        let url = client.api_url("api/data").expect("join");
        assert_eq!(url.as_str(), "https://ops.example.com/drdash/api/data");
    }

    #[test]
    fn api_url_strips_leading_slash_from_endpoint() {
        let client = client_at("https://ops.example.com/drdash/");
        let url = client.api_url("/api/i18n/en").expect("join");
        assert_eq!(url.as_str(), "https://ops.example.com/drdash/api/i18n/en");
    }
}
