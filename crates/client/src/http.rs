//! HTTP transport: request helpers, response decoding and error mapping.
//!
//! The backend answers with bare JSON bodies; some deployments wrap them in a
//! `{data, success, error?, details?}` envelope. Both shapes are accepted.
//! Failed requests become an `AppError` exactly once, here.

use std::time::Duration;

use finnote_shared::config::ApiConfig;
use finnote_shared::{AppError, AppResult};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

/// Response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Payload on success.
    #[serde(default)]
    pub data: Option<T>,
    /// Whether the call succeeded.
    pub success: bool,
    /// Server error text on failure.
    #[serde(default)]
    pub error: Option<String>,
    /// Extra failure detail.
    #[serde(default)]
    pub details: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Unwraps the payload, classifying a failed envelope by its error text.
    ///
    /// # Errors
    ///
    /// Returns the classified `AppError` when `success` is false.
    pub fn into_result(self) -> AppResult<Option<T>> {
        if self.success {
            return Ok(self.data);
        }
        let message = join_detail(
            self.error.unwrap_or_else(|| "An error occurred".to_string()),
            self.details,
        );
        Err(AppError::classify(&message))
    }
}

/// Error body of a non-2xx response.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

/// Client for the finance, goals and notes API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    config: ApiConfig,
}

impl ApiClient {
    /// Builds a client with the configured timeout and optional bearer token.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` for an unusable token or TLS setup.
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = config.auth_token.as_deref().filter(|t| !t.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| AppError::Config(format!("invalid auth token: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    /// Base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// `GET path`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        self.send("GET", path, self.http.get(self.config.url(path))).await
    }

    /// `GET path?query`.
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> AppResult<T> {
        self.send("GET", path, self.http.get(self.config.url(path)).query(query))
            .await
    }

    /// `GET` of a list. A `null` body is an empty list.
    pub async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> AppResult<Vec<T>> {
        let list: Option<Vec<T>> = self.get_with_query(path, query).await?;
        Ok(list.unwrap_or_default())
    }

    /// `POST path` with a JSON body.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.send("POST", path, self.http.post(self.config.url(path)).json(body))
            .await
    }

    /// `PUT path` with a JSON body.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.send("PUT", path, self.http.put(self.config.url(path)).json(body))
            .await
    }

    /// `DELETE path`.
    pub async fn delete(&self, path: &str) -> AppResult<()> {
        let _: IgnoredAny = self
            .send("DELETE", path, self.http.delete(self.config.url(path)))
            .await?;
        Ok(())
    }

    /// Returns true if `GET /health` answers 200.
    pub async fn health(&self) -> bool {
        match self.http.get(self.config.url("/health")).send().await {
            Ok(response) => response.status() == StatusCode::OK,
            Err(e) => {
                tracing::debug!(error = %e, "Health check failed");
                false
            }
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: &'static str,
        path: &str,
        request: RequestBuilder,
    ) -> AppResult<T> {
        tracing::debug!(method, path, "API request");

        let response = request.send().await.map_err(|e| {
            let err = transport_error(&e);
            tracing::warn!(method, path, error = %e, "API request could not be sent");
            err
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| transport_error(&e))?;

        decode(status, &body).inspect_err(|e| {
            tracing::warn!(
                method,
                path,
                status = status.as_u16(),
                code = e.error_code(),
                error = %e,
                "API request failed"
            );
        })
    }
}

/// Validates a payload before it is sent.
///
/// # Errors
///
/// Returns `AppError::Validation` listing the failing fields.
pub fn validate_payload<P: Validate>(payload: &P) -> AppResult<()> {
    payload
        .validate()
        .map_err(|errors| AppError::Validation(errors.to_string()))
}

/// Decodes a response body into `T`.
///
/// # Errors
///
/// Non-2xx statuses map through `AppError::from_status`; failed envelopes are
/// classified by their error text; undecodable bodies are `AppError::Unknown`.
pub fn decode<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> AppResult<T> {
    if !status.is_success() {
        let message = error_message(body)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("An error occurred").to_string());
        return Err(AppError::from_status(status.as_u16(), &message));
    }

    let value = parse_json(body)?;
    let data = if is_envelope(&value) {
        let envelope: ApiResponse<Value> = serde_json::from_value(value).map_err(invalid_body)?;
        envelope.into_result()?.unwrap_or(Value::Null)
    } else {
        value
    };

    serde_json::from_value(data).map_err(invalid_body)
}

fn parse_json(body: &[u8]) -> AppResult<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body).map_err(invalid_body)
}

fn is_envelope(value: &Value) -> bool {
    value.as_object().is_some_and(|object| {
        object.get("success").is_some_and(Value::is_boolean)
            && (object.contains_key("data") || object.contains_key("error"))
    })
}

fn error_message(body: &[u8]) -> Option<String> {
    let body: ErrorBody = serde_json::from_slice(body).ok()?;
    let message = body
        .message
        .filter(|m| !m.is_empty())
        .or(body.error.filter(|e| !e.is_empty()))?;
    Some(join_detail(message, body.details))
}

fn join_detail(message: String, details: Option<String>) -> String {
    match details.filter(|d| !d.is_empty()) {
        Some(details) => format!("{message}: {details}"),
        None => message,
    }
}

fn transport_error(err: &reqwest::Error) -> AppError {
    if err.is_timeout() || err.is_connect() {
        AppError::Network(format!("Network error - please check your connection ({err})"))
    } else {
        AppError::from_transport(&err.to_string())
    }
}

fn invalid_body(err: serde_json::Error) -> AppError {
    AppError::Unknown(format!("Invalid response body: {err}"))
}
