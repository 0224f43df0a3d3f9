use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::debug;

use rp_core::ApiError;

use crate::http::error_body::{self, parse_error_body, parse_with, Decoder};

#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Origin of the platform API, e.g. `https://range.example.org`.
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("invalid API base url `{0}`")]
    InvalidBaseUrl(String),
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// JSON client for the platform API.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    access_token: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(config: ApiClientConfig) -> Result<Self, ApiClientError> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ApiClientError::InvalidBaseUrl(config.base_url));
        }

        let http = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            base_url,
            access_token: RwLock::new(None),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Bearer token sent with every following request.
    pub async fn set_access_token(&self, token: Option<String>) {
        *self.access_token.write().await = token;
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// POST `body` as JSON and decode a successful response as `R`.
    pub(crate) async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        self.post_json_with(path, body, error_body::from_value).await
    }

    /// Like [`Self::post_json`], decoding failure bodies with `decode`.
    pub(crate) async fn post_json_with<B, R>(
        &self,
        path: &str,
        body: &B,
        decode: Decoder,
    ) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path);
        debug!(%url, "POST");

        let mut request = self.http.post(&url).json(body);
        if let Some(token) = self.access_token.read().await.as_deref() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        debug!(%url, status = status.as_u16(), "response");

        if !status.is_success() {
            return Err(parse_with(status, &bytes, decode));
        }

        serde_json::from_slice(&bytes)
            .map_err(|err| ApiError::Unknown(format!("unexpected response from {path}: {err}")))
    }
}

fn map_reqwest_error(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::Timeout
    } else if let Some(status) = error.status() {
        parse_error_body(status, &[])
    } else {
        ApiError::Unknown(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> ApiClient {
        ApiClient::new(ApiClientConfig {
            base_url: base_url.to_string(),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[test]
    fn endpoint_joins_without_double_slashes() {
        let client = client("https://range.example.org/");
        assert_eq!(
            client.endpoint("/api/auth/send-otp/"),
            "https://range.example.org/api/auth/send-otp/"
        );
        assert_eq!(
            client.endpoint("api/events/validate-code/"),
            "https://range.example.org/api/events/validate-code/"
        );
    }

    #[test]
    fn rejects_base_url_without_scheme() {
        let result = ApiClient::new(ApiClientConfig {
            base_url: "range.example.org".into(),
            timeout: Duration::from_secs(5),
        });
        assert!(matches!(result, Err(ApiClientError::InvalidBaseUrl(_))));
    }
}
