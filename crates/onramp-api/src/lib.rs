//! Async client for the Onramp platform REST API.
//!
//! A hand-written, JSON-over-HTTP client with a classified error type:
//!
//! - **[`ApiClient`]** — the request surface. Three operations are exposed:
//!   [`create_user`](ApiClient::create_user), [`get_user`](ApiClient::get_user),
//!   and [`health`](ApiClient::health).
//! - **[`TransportConfig`]** — builds the underlying `reqwest::Client`
//!   (timeouts, user agent, default headers).
//! - **[`Error`]** / **[`ErrorKind`]** — transport and API failures, sorted
//!   into kinds (network, timeout, conflict, not-found, …) so callers can
//!   branch without inspecting status codes or message strings.
//!
//! Authentication is a bearer token injected as a sensitive default header;
//! see [`ApiClient::with_bearer_token`].

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::ApiClient;
pub use error::{Error, ErrorKind};
pub use transport::TransportConfig;
