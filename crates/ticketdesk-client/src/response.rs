//! HTTP response types

use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Response type for all API operations
pub type Response<R, E = ApiError> = Result<R, E>;

/// Status-checked response whose body has not been read yet
#[derive(Debug)]
pub struct RawResponse {
    status: u16,
    inner: reqwest::Response,
}

impl RawResponse {
    pub(crate) fn new(response: reqwest::Response) -> Self {
        Self {
            status: response.status().as_u16(),
            inner: response,
        }
    }

    /// Get the HTTP status code
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Check if the response status is a success (2xx)
    pub fn is_success(&self) -> bool {
        is_success_status(self.status)
    }

    /// Final URL of the response
    pub fn url(&self) -> &url::Url {
        self.inner.url()
    }

    /// Get the response body as text
    pub async fn text(self) -> Response<String> {
        self.inner.text().await.map_err(ApiError::from)
    }

    /// Decode the response body as JSON
    ///
    /// The body is read fully before decoding so that a malformed payload is
    /// always reported as [`ApiError::Decode`].
    pub async fn json<T: DeserializeOwned>(self) -> Response<T> {
        let bytes = self.inner.bytes().await.map_err(ApiError::from)?;
        serde_json::from_slice(&bytes).map_err(ApiError::from)
    }

    /// Get the response body as bytes
    pub async fn bytes(self) -> Response<Vec<u8>> {
        self.inner
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(ApiError::from)
    }
}

/// `true` for statuses in `200..=299`
pub fn is_success_status(status: u16) -> bool {
    (200..300).contains(&status)
}
