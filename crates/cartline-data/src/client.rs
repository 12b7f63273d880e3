//! Lightweight JSON-over-HTTP client.

use std::time::Duration;

use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::FetchError;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for outbound requests to the storefront API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    base_url: Option<String>,
    default_headers: Vec<(String, String)>,
    timeout: Duration,
}

impl FetchClient {
    /// Create a new HTTP client.
    pub fn new() -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| FetchError::RequestError(e.to_string()))?;
        Ok(Self {
            http,
            base_url: None,
            default_headers: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Create a client with a base URL that will be prepended to all requests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.push((key.into(), value.into()));
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve `path` against the base URL, appending `segment` percent-encoded.
    pub fn url(&self, path: &str, segment: Option<&str>) -> Result<Url, FetchError> {
        let full_url = match &self.base_url {
            Some(base) if !(path.starts_with("http://") || path.starts_with("https://")) => {
                format!("{}{}", base.trim_end_matches('/'), path)
            }
            _ => path.to_string(),
        };

        let mut url =
            Url::parse(&full_url).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", full_url, e)))?;

        if let Some(segment) = segment {
            url.path_segments_mut()
                .map_err(|_| FetchError::InvalidUrl(full_url.clone()))?
                .pop_if_empty()
                .push(segment);
        }

        Ok(url)
    }

    /// GET a JSON document.
    ///
    /// A 404 response or a JSON `null` body is `Ok(None)`; other non-2xx
    /// statuses are errors.
    pub async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<Option<T>, FetchError> {
        let mut request = self.http.get(url.clone()).timeout(self.timeout);
        for (key, value) in &self.default_headers {
            request = request.header(key.as_str(), value.as_str());
        }

        tracing::debug!(url = %url, "GET");
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(FetchError::HttpError {
                status: status.as_u16(),
                message: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        decode_body(&body)
    }
}

/// Decode a JSON body where `null` or an empty body means "nothing here".
pub(crate) fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<Option<T>, FetchError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    Ok(serde_json::from_slice::<Option<T>>(body)?)
}
