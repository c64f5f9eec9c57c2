//! HTTP client for the Ticketdesk API
//!
//! [`ApiClient::api_fetch`] calls an endpoint relative to a fixed base
//! address, attaches `Content-Type: application/json` and, when the
//! configured [`CredentialProvider`] has one, an `Authorization: Bearer`
//! header, lets caller supplied headers override both, and decodes the JSON
//! response.
//!
//! # Example
//!
//! ```no_run
//! use ticketdesk_client::{ApiClient, BaseUrl, MemoryStorage, Response, StorageCredentials};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct User {
//!     username: String,
//! }
//!
//! async fn example() -> Response<User> {
//!     let storage = MemoryStorage::new();
//!     let client = ApiClient::new(BaseUrl::from_env(), StorageCredentials::new(storage));
//!     client.api_fetch("/users/1", None).await
//! }
//! ```

mod client;
mod config;
mod credentials;
mod error;
pub mod headers;
mod options;
mod response;
mod storage;
pub mod tickets;

pub use client::{ApiClient, ApiClientBuilder};
pub use config::{BaseUrl, DEFAULT_BASE_URL, ENV_BASE_URL};
pub use credentials::{
    CredentialProvider, NoCredentials, StaticToken, StorageCredentials, TOKEN_STORAGE_KEY,
};
pub use error::ApiError;
pub use options::{RequestBody, RequestOptions};
pub use reqwest::Method;
pub use response::{RawResponse, Response};
pub use storage::{FileStorage, LocalStorage, MemoryStorage};
pub use tokio_util::sync::CancellationToken;
