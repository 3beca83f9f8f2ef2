// ── User identity types ──
//
// EmailAddress normalizes and (optionally) validates addresses; User is the
// canonical record behind the registration and profile features.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use onramp_api::types::UserResponse;

// ── EmailAddress ────────────────────────────────────────────────────

/// Email address, normalized to trimmed lowercase.
///
/// [`new`](Self::new) only normalizes — server-provided addresses are taken
/// as-is. [`parse`](Self::parse) additionally applies the structural check
/// used for form input (`local@domain` with a dotted domain).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress(String);

/// Rejection from [`EmailAddress::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid email address")]
pub struct InvalidEmail;

impl EmailAddress {
    /// Normalize without validating.
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_lowercase())
    }

    /// Normalize and validate user input.
    ///
    /// Accepts exactly one `@` with a non-empty local part and a domain
    /// containing a dot; rejects embedded whitespace.
    pub fn parse(raw: &str) -> Result<Self, InvalidEmail> {
        let normalized = Self::new(raw);
        let (local, domain) = normalized.0.split_once('@').ok_or(InvalidEmail)?;

        if local.is_empty()
            || domain.is_empty()
            || domain.contains('@')
            || !domain.contains('.')
            || domain.starts_with('.')
            || domain.ends_with('.')
            || normalized.0.chars().any(char::is_whitespace)
        {
            return Err(InvalidEmail);
        }

        Ok(normalized)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EmailAddress {
    type Err = InvalidEmail;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ── User ────────────────────────────────────────────────────────────

/// A registered platform user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: EmailAddress,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserResponse> for User {
    fn from(resp: UserResponse) -> Self {
        Self {
            id: resp.id,
            email: EmailAddress::new(resp.email),
            name: resp.name,
            created_at: resp.created_at,
        }
    }
}
