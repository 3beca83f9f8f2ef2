// ── HTTP transport configuration ──
//
// One place to build `reqwest::Client` instances so every consumer gets
// the same timeouts, user agent, and default headers.

use std::time::Duration;

use reqwest::header::HeaderMap;

use crate::Error;

/// Transport-level settings for the underlying HTTP client.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Total per-request timeout (connect + transfer).
    pub timeout: Duration,
    /// Connection-establishment timeout.
    pub connect_timeout: Duration,
    /// User-Agent header sent on every request.
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("onramp/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` with these settings and no extra headers.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        self.build_client_with_headers(HeaderMap::new())
    }

    /// Build a `reqwest::Client` with these settings plus default headers
    /// (e.g. an Authorization header injected by the caller).
    pub fn build_client_with_headers(&self, headers: HeaderMap) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .user_agent(&self.user_agent)
            .default_headers(headers)
            .build()
            .map_err(Error::from)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_user_agent_carries_crate_version() {
        let config = TransportConfig::default();
        assert!(config.user_agent.starts_with("onramp/"));
        assert!(config.user_agent.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn builds_a_client_with_defaults() {
        let config = TransportConfig::default();
        assert!(config.build_client().is_ok());
    }
}
