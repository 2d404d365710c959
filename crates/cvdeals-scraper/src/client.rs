//! Rate-limited HTTP transport shared by all source adapters.

use std::time::Duration;

use reqwest::Client;

use crate::error::ScraperError;

/// Thin wrapper over one cookie-bearing `reqwest::Client`.
///
/// Every outbound request carries the configured `User-Agent` and is bounded
/// by the configured timeout. The cookie store is required by the token-API
/// source, whose search endpoint is session-bound.
///
/// There is no retry at this layer: transient failures propagate to the
/// pipeline, which contains them at the category boundary.
pub struct EventClient {
    client: Client,
}

impl EventClient {
    /// Creates an `EventClient` with configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .cookie_store(true)
            .build()?;
        Ok(Self { client })
    }

    /// Performs a GET and returns the response body as text.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Http`] — network failure or timeout.
    /// - [`ScraperError::UnexpectedStatus`] — any non-2xx status.
    pub async fn get_text(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<String, ScraperError> {
        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response.text().await?)
    }

    /// Performs a GET and parses the body as a JSON value.
    ///
    /// The search API sometimes double-encodes its payload — the body is a
    /// JSON *string* whose content is the actual JSON document. When that
    /// shape is observed the inner string is decoded a second time.
    ///
    /// # Errors
    ///
    /// Propagates [`Self::get_text`] errors, plus
    /// [`ScraperError::Deserialize`] when either decode pass fails.
    pub async fn get_json_value(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<serde_json::Value, ScraperError> {
        let body = self.get_text(url, query).await?;

        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| ScraperError::Deserialize {
                context: url.to_owned(),
                source: e,
            })?;

        if let serde_json::Value::String(inner) = value {
            return serde_json::from_str(&inner).map_err(|e| ScraperError::Deserialize {
                context: format!("double-encoded body from {url}"),
                source: e,
            });
        }

        Ok(value)
    }
}
