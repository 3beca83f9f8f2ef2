// Hand-crafted async HTTP client for the Onramp platform API.
//
// Base path: /api/
// Auth: optional Bearer token default header

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::transport::TransportConfig;
use crate::types;

// ── Error response shape from the platform API ───────────────────────

#[derive(serde::Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    detail: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the Onramp platform API.
///
/// Communicates via JSON REST endpoints under `/api/`.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build an unauthenticated client from a base URL and transport config.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Build from a bearer token, injected as a sensitive default header
    /// on every request.
    pub fn with_bearer_token(
        base_url: &str,
        token: &secrecy::SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|e| Error::InvalidHeader {
                message: format!("invalid bearer token header value: {e}"),
            })?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);

        let http = transport.build_client_with_headers(headers)?;
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Build the base URL with a trailing `/api/` segment.
    ///
    /// Accepts `https://host`, `https://host/`, and `https://host/api`
    /// uniformly.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;

        // Strip trailing slash for uniform handling
        let path = url.path().trim_end_matches('/').to_owned();

        if path.ends_with("/api") {
            url.set_path(&format!("{path}/"));
        } else {
            url.set_path(&format!("{path}/api/"));
        }

        Ok(url)
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"users"`) onto the base URL.
    fn url(&self, path: &str) -> Url {
        // base_url always ends with `/api/`, so joining `users/…` works.
        self.base_url
            .join(path)
            .expect("path should be valid relative URL")
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path);
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        Self::handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        Self::handle_response(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview = &body[..body.len().min(200)];
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    /// Sort a non-2xx response into a classified [`Error`].
    ///
    /// The platform wraps every error detail as `{"detail": "…"}`; anything
    /// else falls back to the raw body or the status line.
    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let request_id = resp
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        let raw = resp.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorEnvelope>(&raw)
            .ok()
            .and_then(|e| e.detail)
            .unwrap_or_else(|| {
                if raw.is_empty() {
                    status.to_string()
                } else {
                    raw
                }
            });

        debug!(status = status.as_u16(), ?request_id, "API error: {detail}");

        match status {
            reqwest::StatusCode::CONFLICT => Error::Conflict { detail },
            reqwest::StatusCode::NOT_FOUND => Error::NotFound { detail },
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                Error::Unauthorized { detail }
            }
            _ => Error::Api {
                status: status.as_u16(),
                detail,
            },
        }
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    // ── Health ───────────────────────────────────────────────────────

    pub async fn health(&self) -> Result<types::HealthResponse, Error> {
        self.get("health").await
    }

    // ── Users ────────────────────────────────────────────────────────

    pub async fn create_user(
        &self,
        body: &types::CreateUserRequest,
    ) -> Result<types::UserResponse, Error> {
        self.post("users", body).await
    }

    pub async fn get_user(&self, id: i64) -> Result<types::UserResponse, Error> {
        self.get(&format!("users/{id}")).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn normalize_appends_api_segment() {
        let url = ApiClient::normalize_base_url("https://onramp.example.com").unwrap();
        assert_eq!(url.as_str(), "https://onramp.example.com/api/");
    }

    #[test]
    fn normalize_keeps_existing_api_segment() {
        let url = ApiClient::normalize_base_url("https://onramp.example.com/api").unwrap();
        assert_eq!(url.as_str(), "https://onramp.example.com/api/");
    }

    #[test]
    fn normalize_strips_trailing_slash() {
        let url = ApiClient::normalize_base_url("https://onramp.example.com/api/").unwrap();
        assert_eq!(url.as_str(), "https://onramp.example.com/api/");
    }

    #[test]
    fn normalize_rejects_garbage() {
        assert!(ApiClient::normalize_base_url("not a url").is_err());
    }

    #[test]
    fn url_joins_relative_paths() {
        let client = ApiClient::from_reqwest(
            "https://onramp.example.com",
            reqwest::Client::new(),
        )
        .unwrap();
        assert_eq!(
            client.url("users/42").as_str(),
            "https://onramp.example.com/api/users/42"
        );
    }
}
