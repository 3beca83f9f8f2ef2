//! Actions dispatched through the application's mpsc channel.

use onramp_core::{NewUser, RequestError, SessionUser, User};

use crate::screen::RouteId;

/// Everything that can happen in the app, from key presses to service
/// state changes forwarded by the data bridge.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ── Loop plumbing ────────────────────────────────────────────────
    Tick,
    Render,
    Resize(u16, u16),
    Quit,

    // ── Navigation ───────────────────────────────────────────────────
    Navigate(RouteId),
    GoBack,
    ToggleHelp,

    // ── Session ──────────────────────────────────────────────────────
    /// Stubbed login: proceeds straight to the dashboard.
    LoginStub,
    RequestLogout,
    SessionChanged(Option<SessionUser>),

    // ── Registration pipeline ────────────────────────────────────────
    SubmitRegistration(NewUser),
    RegisterLoading(bool),
    RegisterCreated(Option<User>),
    RegisterError(Option<RequestError>),

    // ── Profile pipeline ─────────────────────────────────────────────
    LoadProfile(i64),
    ProfileLoading(bool),
    ProfileUpdated(Option<User>),
    ProfileError(Option<RequestError>),

    // ── Health / notifications ───────────────────────────────────────
    HealthChecked(bool),
    ShowConfirm(ConfirmAction),
    ConfirmYes,
    ConfirmNo,
    Notify(Notification),
    DismissNotification,
}

/// Destructive operations that require a y/n confirmation first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    Logout,
}

impl std::fmt::Display for ConfirmAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logout => f.write_str("Log out of the dev session?"),
        }
    }
}

/// Toast shown in the bottom-right corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
    Warning,
    Info,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Error,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Warning,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Info,
        }
    }
}
