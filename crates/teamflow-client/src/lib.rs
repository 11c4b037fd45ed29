//! Client library for the TeamFlow task API.
//!
//! Provides the HTTP client for the task endpoints and the [`HttpSyncGateway`]
//! that persists board moves through it.

pub mod error;
pub mod gateway;
pub mod http;

pub use error::ClientError;
pub use gateway::HttpSyncGateway;
pub use http::HttpClient;
