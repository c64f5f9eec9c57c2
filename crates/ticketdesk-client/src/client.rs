//! API client

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::config::BaseUrl;
use crate::credentials::{CredentialProvider, NoCredentials};
use crate::error::ApiError;
use crate::headers::merge_headers;
use crate::options::RequestOptions;
use crate::response::{is_success_status, RawResponse, Response};

/// Client for the Ticketdesk JSON API
///
/// Holds the base address and the credential provider it was built with.
/// Cloning is cheap and clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: reqwest::Client,
    base_url: BaseUrl,
    credentials: Arc<dyn CredentialProvider>,
}

impl ApiClient {
    /// Create a client with default transport settings
    pub fn new(base_url: BaseUrl, credentials: impl CredentialProvider + 'static) -> Self {
        Self {
            inner: reqwest::Client::new(),
            base_url,
            credentials: Arc::new(credentials),
        }
    }

    /// Create an anonymous client with the base address taken from the environment
    pub fn from_env() -> Self {
        Self::new(BaseUrl::from_env(), NoCredentials)
    }

    /// Create a new client builder
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Base address every endpoint is appended to
    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Call `endpoint` and decode the JSON response body
    ///
    /// `endpoint` is appended to the base address verbatim. Header overrides in
    /// `options` win over the JSON content type and the bearer token; every
    /// other option is passed to the transport unchanged.
    ///
    /// Fails with [`ApiError::Status`] when the status is outside `200..=299`,
    /// without reading the body, and with [`ApiError::Decode`] when a success
    /// body is not valid JSON for `R`. There is exactly one attempt.
    pub async fn api_fetch<R>(
        &self,
        endpoint: &str,
        options: Option<RequestOptions>,
    ) -> Response<R>
    where
        R: DeserializeOwned,
    {
        let cancellation = options.as_ref().and_then(|o| o.cancellation.clone());
        let response = self.send(endpoint, options).await?;
        with_cancellation(cancellation.as_ref(), response.json()).await
    }

    /// Call `endpoint` and return the status-checked response without reading the body
    ///
    /// Same request pipeline and error behaviour as [`ApiClient::api_fetch`],
    /// for responses that carry no JSON body.
    pub async fn send(
        &self,
        endpoint: &str,
        options: Option<RequestOptions>,
    ) -> Response<RawResponse> {
        let options = options.unwrap_or_default();
        let cancellation = options.cancellation.clone();
        with_cancellation(cancellation.as_ref(), self.dispatch(endpoint, options)).await
    }

    async fn dispatch(&self, endpoint: &str, options: RequestOptions) -> Response<RawResponse> {
        let url = self.base_url.join(endpoint);
        let method = options.method_or_default();

        let token = self.credentials.current_token().await?;
        let headers = merge_headers(token.as_deref(), &options.headers)?;

        let mut request = self.inner.request(method.clone(), &url).headers(headers);
        if let Some(body) = options.body {
            request = request.body(body.into_bytes()?);
        }
        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }

        tracing::debug!(method = %method, url = %url, "API request");

        let response = request.send().await.map_err(ApiError::from)?;
        let status = response.status().as_u16();

        tracing::debug!(method = %method, url = %url, status, "API response");

        if !is_success_status(status) {
            return Err(ApiError::Status { status });
        }

        Ok(RawResponse::new(response))
    }
}

async fn with_cancellation<T, F>(
    cancellation: Option<&CancellationToken>,
    future: F,
) -> Response<T>
where
    F: Future<Output = Response<T>>,
{
    match cancellation {
        Some(token) => {
            tokio::select! {
                biased;
                _ = token.cancelled() => Err(ApiError::Cancelled),
                result = future => result,
            }
        }
        None => future.await,
    }
}

/// Builder for [`ApiClient`]
#[derive(Debug, Default)]
pub struct ApiClientBuilder {
    base_url: Option<BaseUrl>,
    credentials: Option<Arc<dyn CredentialProvider>>,
    timeout: Option<Duration>,
    proxy: Option<Url>,
    accept_invalid_certs: bool,
}

impl ApiClientBuilder {
    /// Set the base address, defaults to [`BaseUrl::from_env`]
    pub fn base_url(mut self, base_url: impl Into<BaseUrl>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the credential provider, defaults to [`NoCredentials`]
    pub fn credentials(mut self, credentials: impl CredentialProvider + 'static) -> Self {
        self.credentials = Some(Arc::new(credentials));
        self
    }

    /// Use an already shared credential provider
    pub fn shared_credentials(mut self, credentials: Arc<dyn CredentialProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Default timeout for every request
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Route all requests through a proxy
    pub fn proxy(mut self, url: Url) -> Self {
        self.proxy = Some(url);
        self
    }

    /// Accept invalid TLS certificates
    pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Build the client
    pub fn build(self) -> Response<ApiClient> {
        let mut builder =
            reqwest::Client::builder().danger_accept_invalid_certs(self.accept_invalid_certs);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(proxy_url) = self.proxy {
            let proxy = reqwest::Proxy::all(proxy_url.as_str())
                .map_err(|e| ApiError::Build(format!("Invalid proxy: {}", e)))?;
            builder = builder.proxy(proxy);
        }

        let inner = builder.build().map_err(ApiError::from)?;

        Ok(ApiClient {
            inner,
            base_url: self.base_url.unwrap_or_else(BaseUrl::from_env),
            credentials: self
                .credentials
                .unwrap_or_else(|| Arc::new(NoCredentials)),
        })
    }
}
