// ── Wire types for the Onramp platform API ──
//
// Shapes mirror the server's JSON schemas; field names match the wire
// exactly, so no rename attributes are needed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body for `POST /api/users`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub name: String,
}

/// A user record as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Response of `GET /api/health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub version: String,
}

impl HealthResponse {
    /// Whether the API reported itself healthy.
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
