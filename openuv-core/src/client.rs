use reqwest::header::HeaderValue;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;

use crate::error::ClientError;
use crate::model::{Coordinates, UvReport};

/// Base URL of the OpenUV v1 API.
pub const OPENUV_API_URL: &str = "https://api.openuv.io/api/v1/";

const ACCESS_TOKEN: &str = "x-access-token";
const USER_AGENT: &str = concat!("openuv-core/", env!("CARGO_PKG_VERSION"));

/// Client for the OpenUV `/uv` endpoint.
///
/// Holds no per-request state; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct UvClient {
    http: Client,
    base_url: Url,
    api_key: HeaderValue,
}

impl UvClient {
    /// Client against the public API with a default transport.
    ///
    /// The default transport has no timeout. Use [`http_client`] and
    /// [`UvClient::with_client`] to set one.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_client(http_client(None)?, OPENUV_API_URL, api_key)
    }

    pub fn with_client(
        http: Client,
        base_url: &str,
        api_key: impl Into<String>,
    ) -> Result<Self, ClientError> {
        // `Url::join` replaces the last segment unless the base ends in '/'.
        let mut base = base_url.to_owned();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)
            .map_err(|e| ClientError::Request(format!("invalid base URL '{base_url}': {e}")))?;

        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ClientError::InvalidApiKey("key is empty".to_string()));
        }
        let mut api_key = HeaderValue::from_str(&api_key).map_err(|_| {
            ClientError::InvalidApiKey("key contains characters not allowed in a header".to_string())
        })?;
        api_key.set_sensitive(true);

        Ok(Self { http, base_url, api_key })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of the report for `coordinates`, degrees written with six decimals.
    pub fn request_url(&self, coordinates: Coordinates) -> Result<Url, ClientError> {
        let mut url = self
            .base_url
            .join("uv")
            .map_err(|e| ClientError::Request(format!("invalid request URL: {e}")))?;

        url.query_pairs_mut()
            .append_pair("lat", &format!("{:.6}", coordinates.latitude))
            .append_pair("lng", &format!("{:.6}", coordinates.longitude));

        Ok(url)
    }

    /// Fetch the current report for `coordinates`.
    ///
    /// Performs exactly one GET. Non-success statuses are reported as
    /// [`ClientError::Api`] without attempting to decode a report.
    pub async fn fetch(&self, coordinates: Coordinates) -> Result<UvReport, ClientError> {
        let url = self.request_url(coordinates)?;
        tracing::debug!(message = "requesting UV report", url = %url);

        let res = self
            .http
            .get(url)
            .header(ACCESS_TOKEN, self.api_key.clone())
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            tracing::debug!(message = "OpenUV returned an error", status = %status);
            return Err(ClientError::Api { status, message: error_message(&body) });
        }

        let report = UvReport::from_json(&body)?;
        tracing::debug!(
            message = "decoded UV report",
            uv = report.result.uv,
            uv_max = report.result.uv_max
        );

        Ok(report)
    }
}

/// Build a transport, optionally bounded by `timeout` for the whole request.
pub fn http_client(timeout: Option<Duration>) -> Result<Client, ClientError> {
    let mut builder = Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder
        .build()
        .map_err(|e| ClientError::Request(format!("unable to initialize HTTP client: {e}")))
}

/// One-shot fetch against the public API with a default client.
pub async fn get_uv_report(
    coordinates: Coordinates,
    api_key: &str,
) -> Result<UvReport, ClientError> {
    UvClient::new(api_key)?.fetch(coordinates).await
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(_) => truncate_body(body),
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
