//! `reqwest`-backed access to the REST API.

pub mod auth;
pub mod facade;

pub use auth::AuthClient;
pub use facade::HttpFacade;

use std::time::Duration;

use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE, HeaderMap};
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use cloudbox_core::config::api::ApiConfig;
use cloudbox_core::error::{AppError, ErrorKind};
use cloudbox_core::result::AppResult;

use crate::dto::response::error_message;
use crate::facade::FileContent;

/// Shared request plumbing: base URL joining, bearer auth, status mapping.
#[derive(Debug, Clone)]
pub(crate) struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub(crate) fn new(
        config: &ApiConfig,
        base_url: &str,
        token: Option<String>,
    ) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to build HTTP client: {e}"),
                    e,
                )
            })?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub(crate) fn with_token(&self, token: Option<String>) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            token,
        }
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for `path`, with `query` pairs appended. `None` values
    /// are omitted.
    pub(crate) fn url(&self, path: &str, query: &[(&str, Option<String>)]) -> AppResult<Url> {
        let raw = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut url = Url::parse(&raw).map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Invalid API URL '{raw}': {e}"),
                e,
            )
        })?;
        let present: Vec<_> = query
            .iter()
            .filter_map(|(k, v)| v.as_ref().map(|v| (*k, v.as_str())))
            .collect();
        if !present.is_empty() {
            url.query_pairs_mut().extend_pairs(present);
        }
        Ok(url)
    }

    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and decode a JSON body.
    pub(crate) async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> AppResult<T> {
        let response = checked(builder.send().await.map_err(transport_error)?).await?;
        response.json::<T>().await.map_err(transport_error)
    }

    /// Send and discard the body.
    pub(crate) async fn send_unit(&self, builder: RequestBuilder) -> AppResult<()> {
        checked(builder.send().await.map_err(transport_error)?).await?;
        Ok(())
    }

    /// Send and keep the raw body along with the name and type headers.
    pub(crate) async fn fetch(&self, builder: RequestBuilder) -> AppResult<FileContent> {
        let response = checked(builder.send().await.map_err(transport_error)?).await?;
        let (name, mime_type) = content_headers(response.headers());
        let bytes = response.bytes().await.map_err(transport_error)?;
        Ok(FileContent {
            name,
            mime_type,
            bytes: bytes.to_vec(),
        })
    }
}

fn content_headers(headers: &HeaderMap) -> (Option<String>, Option<String>) {
    let text = |name| headers.get(name).and_then(|v| v.to_str().ok());
    let name = text(CONTENT_DISPOSITION).and_then(attachment_name);
    let mime_type = text(CONTENT_TYPE).map(str::to_string);
    (name, mime_type)
}

/// The plain `filename=` parameter of a `Content-Disposition` value.
pub(crate) fn attachment_name(disposition: &str) -> Option<String> {
    disposition
        .split(';')
        .filter_map(|param| param.trim().split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("filename"))
        .map(|(_, value)| value.trim().trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}

/// Turn a non-2xx response into an [`AppError`] carrying the server detail.
async fn checked(response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(status_error(status, &body))
}

pub(crate) fn status_error(status: StatusCode, body: &str) -> AppError {
    let fallback = status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
    let err = AppError::from_status(status.as_u16(), error_message(body, &fallback));
    tracing::debug!(status = status.as_u16(), kind = %err.kind, "Request rejected");
    err
}

/// Map a transport-level failure.
pub(crate) fn transport_error(err: reqwest::Error) -> AppError {
    if err.is_decode() {
        return AppError::with_source(
            ErrorKind::Serialization,
            format!("Malformed response: {err}"),
            err,
        );
    }
    if err.is_timeout() {
        return AppError::with_source(ErrorKind::Network, "Request timed out", err);
    }
    if let Some(status) = err.status() {
        return status_error(status, "");
    }
    AppError::with_source(
        ErrorKind::Network,
        format!("Cannot reach the server: {err}"),
        err,
    )
}
