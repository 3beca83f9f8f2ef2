//! Route identifiers and navigation guards.

use std::fmt;

use onramp_core::Services;
use onramp_core::flags::features;

/// Identifies each primary TUI screen, navigable by number keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RouteId {
    #[default]
    Landing, // 1
    Register, // 2
    Profile, // 3
    Dashboard, // 4
    /// Stubbed login — not in the tab bar, opened with `l`.
    Login,
}

impl RouteId {
    /// All routes in tab-bar order.
    pub const ALL: [RouteId; 4] = [Self::Landing, Self::Register, Self::Profile, Self::Dashboard];

    /// Numeric key (1-4) for this route. Login has no number key.
    pub fn number(self) -> u8 {
        match self {
            Self::Landing => 1,
            Self::Register => 2,
            Self::Profile => 3,
            Self::Dashboard => 4,
            Self::Login => 0,
        }
    }

    /// Route from a numeric key (1-4). Returns None for out-of-range.
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Landing),
            2 => Some(Self::Register),
            3 => Some(Self::Profile),
            4 => Some(Self::Dashboard),
            _ => None,
        }
    }

    /// Next route in tab order (wraps around).
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous route in tab order (wraps around).
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Label for the tab bar.
    pub fn label(self) -> &'static str {
        match self {
            Self::Landing => "Landing",
            Self::Register => "Register",
            Self::Profile => "Profile",
            Self::Dashboard => "Dashboard",
            Self::Login => "Login",
        }
    }

    /// Compact label for narrow terminals (< 80 cols).
    pub fn label_short(self) -> &'static str {
        match self {
            Self::Landing => "Land",
            Self::Register => "Reg",
            Self::Profile => "Prof",
            Self::Dashboard => "Dash",
            Self::Login => "Login",
        }
    }

    /// Whether this route needs an authenticated session.
    pub fn requires_auth(self) -> bool {
        matches!(self, Self::Profile | Self::Dashboard)
    }

    /// The feature flag gating this route, if any.
    pub fn feature_flag(self) -> Option<&'static str> {
        match self {
            Self::Register => Some(features::REGISTRATION),
            Self::Profile => Some(features::PROFILE),
            Self::Dashboard => Some(features::DASHBOARD),
            Self::Landing | Self::Login => None,
        }
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of running the navigation guards for a target route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardVerdict {
    Allow,
    /// Redirect to Landing; carries the reason for the notification line.
    Deny(String),
}

/// Run the auth and feature guards for `target`.
///
/// Mirrors the web router: an unauthenticated session or a disabled feature
/// flag sends the user back to the landing route.
pub fn run_guards(services: &Services, target: RouteId) -> GuardVerdict {
    if target.requires_auth() && !services.session().is_authenticated() {
        return GuardVerdict::Deny(format!("{target} requires a signed-in session"));
    }

    if let Some(flag) = target.feature_flag() {
        if !services.flags().is_enabled(flag) {
            return GuardVerdict::Deny(format!("{target} is disabled by feature flag"));
        }
    }

    GuardVerdict::Allow
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn tab_order_wraps_both_ways() {
        assert_eq!(RouteId::Dashboard.next(), RouteId::Landing);
        assert_eq!(RouteId::Landing.prev(), RouteId::Dashboard);
    }

    #[test]
    fn number_keys_round_trip() {
        for route in RouteId::ALL {
            assert_eq!(RouteId::from_number(route.number()), Some(route));
        }
        assert_eq!(RouteId::from_number(9), None);
    }

    #[test]
    fn login_is_not_number_navigable() {
        assert_eq!(RouteId::Login.number(), 0);
    }
}
