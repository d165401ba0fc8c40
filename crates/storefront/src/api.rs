//! The single HTTP gateway to the backend.
//!
//! Every resource call goes through [`ApiClient`]. Failures are normalized
//! into [`AppError`] here so that services and views never look at status
//! codes or transport errors.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use url::Url;

use crate::config::ApiConfig;
use crate::error::{AppError, FALLBACK_ERROR_MESSAGE};
use crate::services::{AuthService, CartService, OrderService, PaymentService, ProductService};

/// Longest body excerpt written to logs.
const LOG_BODY_LIMIT: usize = 500;

/// Error body shape returned by the backend.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// Build the user-facing error for a non-2xx response.
///
/// A non-empty `detail` in the JSON body wins. Request validation failures
/// carry a list of `{ msg }` objects, which are joined. Otherwise 404 reads
/// "Not found", 500 "Server error" and anything else the generic fallback.
#[must_use]
pub fn normalize_error(status: u16, body: &str) -> AppError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .and_then(|detail| detail_message(&detail))
        .unwrap_or_else(|| {
            match status {
                404 => "Not found",
                500 => "Server error",
                _ => FALLBACK_ERROR_MESSAGE,
            }
            .to_string()
        });

    AppError::Server { status, message }
}

fn detail_message(detail: &serde_json::Value) -> Option<String> {
    let message = match detail {
        serde_json::Value::String(s) => s.trim().to_string(),
        serde_json::Value::Array(items) => items
            .iter()
            .filter_map(|item| item.get("msg").and_then(serde_json::Value::as_str))
            .collect::<Vec<_>>()
            .join("; "),
        _ => String::new(),
    };
    (!message.is_empty()).then_some(message)
}

/// `{ "message": ... }` acknowledgement returned by delete endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MessageResponse {
    pub message: String,
}

/// HTTP client for the storefront backend.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ApiConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Unexpected(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.base_url.clone(),
            }),
        })
    }

    /// The backend base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Products resource.
    #[must_use]
    pub const fn products(&self) -> ProductService<'_> {
        ProductService::new(self)
    }

    /// Cart resource.
    #[must_use]
    pub const fn cart(&self) -> CartService<'_> {
        CartService::new(self)
    }

    /// Orders resource.
    #[must_use]
    pub const fn orders(&self) -> OrderService<'_> {
        OrderService::new(self)
    }

    /// Payment resource.
    #[must_use]
    pub const fn payment(&self) -> PaymentService<'_> {
        PaymentService::new(self)
    }

    /// Login and registration.
    #[must_use]
    pub const fn auth(&self) -> AuthService<'_> {
        AuthService::new(self)
    }

    /// Resolve path segments against the base URL. Segments are
    /// percent-encoded, so IDs can never change the path shape.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unexpected` if the base URL cannot take a path.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, AppError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| AppError::Unexpected("base URL cannot take a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `GET` a JSON resource.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`AppError`] on any failure.
    #[instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, AppError> {
        let url = self.endpoint(segments)?;
        let body = Self::send(self.inner.client.get(url)).await?;
        decode(&body)
    }

    /// `POST` a JSON body and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`AppError`] on any failure.
    #[instrument(skip(self, body))]
    pub async fn post<B, T>(&self, segments: &[&str], body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        let body = Self::send(self.inner.client.post(url).json(body)).await?;
        decode(&body)
    }

    /// `PUT` a JSON body and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`AppError`] on any failure.
    #[instrument(skip(self, body))]
    pub async fn put<B, T>(&self, segments: &[&str], body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        let body = Self::send(self.inner.client.put(url).json(body)).await?;
        decode(&body)
    }

    /// `DELETE` a resource and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`AppError`] on any failure.
    #[instrument(skip(self))]
    pub async fn delete<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, AppError> {
        let url = self.endpoint(segments)?;
        let body = Self::send(self.inner.client.delete(url)).await?;
        decode(&body)
    }

    /// `DELETE` a resource, ignoring whatever the backend answers on success.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`AppError`] on any failure.
    #[instrument(skip(self))]
    pub async fn delete_unit(&self, segments: &[&str]) -> Result<(), AppError> {
        let url = self.endpoint(segments)?;
        Self::send(self.inner.client.delete(url)).await?;
        Ok(())
    }

    /// Send a request, returning the body of a 2xx response.
    async fn send(request: reqwest::RequestBuilder) -> Result<String, AppError> {
        let response = request.send().await.map_err(|e| {
            if e.is_builder() {
                tracing::error!(error = %e, "Failed to build request");
                AppError::Unexpected(e.to_string())
            } else {
                tracing::warn!(error = %e, "Request got no response");
                AppError::Network
            }
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::warn!(status = %status, error = %e, "Failed to read response body");
            AppError::Network
        })?;

        if !status.is_success() {
            let error = normalize_error(status.as_u16(), &body);
            tracing::warn!(
                status = %status,
                message = %error,
                body = %excerpt(&body),
                "Backend returned non-success status"
            );
            return Err(error);
        }

        debug!(status = %status, bytes = body.len(), "Backend response");
        Ok(body)
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, AppError> {
    serde_json::from_str(body).map_err(|e| {
        tracing::error!(
            error = %e,
            body = %excerpt(body),
            "Failed to parse backend response"
        );
        AppError::Unexpected(format!("invalid response body: {e}"))
    })
}

fn excerpt(body: &str) -> String {
    body.chars().take(LOG_BODY_LIMIT).collect()
}
