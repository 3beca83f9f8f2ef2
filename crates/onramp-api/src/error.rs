// ── Error types for the Onramp API client ──

/// Anything that can go wrong while talking to the platform API.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request never produced a response (DNS, connect, TLS, …).
    #[error("request failed: {0}")]
    Network(#[source] reqwest::Error),

    /// The transport-level timeout elapsed before the response arrived.
    #[error("request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    /// HTTP 409 — the server rejected the request as a duplicate.
    #[error("conflict: {detail}")]
    Conflict { detail: String },

    /// HTTP 404 — the addressed resource does not exist.
    #[error("not found: {detail}")]
    NotFound { detail: String },

    /// HTTP 401/403 — missing or insufficient credentials.
    #[error("unauthorized: {detail}")]
    Unauthorized { detail: String },

    /// Any other non-2xx response.
    #[error("API error (HTTP {status}): {detail}")]
    Api { status: u16, detail: String },

    /// The response body was not the JSON shape we expected.
    #[error("invalid response body: {message}")]
    Deserialization { message: String, body: String },

    /// The configured base URL could not be parsed.
    #[error("invalid base URL: {0}")]
    Url(#[from] url::ParseError),

    /// A header value (e.g. the bearer token) contained invalid bytes.
    #[error("invalid header value: {message}")]
    InvalidHeader { message: String },
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout(e)
        } else {
            Self::Network(e)
        }
    }
}

/// Coarse classification of an [`Error`].
///
/// The service layer stores the kind alongside its fixed user-facing
/// message; tests and logs branch on it without string matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Timeout,
    Conflict,
    NotFound,
    Unauthorized,
    Server,
    Decode,
    Invalid,
}

impl Error {
    /// Sort this error into its [`ErrorKind`] bucket.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(_) => ErrorKind::Network,
            Self::Timeout(_) => ErrorKind::Timeout,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::Api { .. } => ErrorKind::Server,
            Self::Deserialization { .. } => ErrorKind::Decode,
            Self::Url(_) | Self::InvalidHeader { .. } => ErrorKind::Invalid,
        }
    }
}
