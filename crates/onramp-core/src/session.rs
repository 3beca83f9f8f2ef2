// ── Session stub ──
//
// Placeholder session holder: always authenticated, fixed dev identity.
// Swap the constructor body to integrate a real identity provider; every
// consumer reads through the same watch channels either way.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Role attached to a session user.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Member,
}

/// The authenticated identity as seen by the front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub roles: Vec<Role>,
}

/// Observable session state.
///
/// STUB: starts authenticated with a fixed dev user and a fixed token.
pub struct SessionService {
    authenticated: watch::Sender<bool>,
    current_user: watch::Sender<Option<SessionUser>>,
}

impl SessionService {
    pub(crate) fn new() -> Self {
        let (authenticated, _) = watch::channel(true);
        let (current_user, _) = watch::channel(Some(SessionUser {
            id: "stub-user-1".into(),
            email: "dev@local.dev".into(),
            roles: vec![Role::Admin],
        }));

        Self {
            authenticated,
            current_user,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        *self.authenticated.borrow()
    }

    pub fn current_user(&self) -> Option<SessionUser> {
        self.current_user.borrow().clone()
    }

    /// Bearer token for API calls. STUB: fixed value.
    pub fn token(&self) -> SecretString {
        SecretString::from("stub-token".to_owned())
    }

    /// End the session: unauthenticated, no current user.
    pub fn logout(&self) {
        self.authenticated.send_modify(|v| *v = false);
        self.current_user.send_modify(|u| *u = None);
    }

    pub fn watch_authenticated(&self) -> watch::Receiver<bool> {
        self.authenticated.subscribe()
    }

    pub fn watch_current_user(&self) -> watch::Receiver<Option<SessionUser>> {
        self.current_user.subscribe()
    }
}
