// ── Runtime feature flags ──
//
// Toggles within the shipped tier: what EXISTS is decided at build time,
// what's ACTIVE among it is decided here. Default: every shipped feature
// is active.

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;

/// Well-known flag names consulted by the navigation guards.
pub mod features {
    pub const REGISTRATION: &str = "registration";
    pub const PROFILE: &str = "profile";
    pub const DASHBOARD: &str = "dashboard";
}

/// Lock-free feature-flag store.
///
/// Reads are wait-free snapshots; [`set_flags`](Self::set_flags) swaps the
/// whole map (flags arrive in one batch from config or bootstrap).
pub struct FeatureFlags {
    flags: ArcSwap<HashMap<String, bool>>,
}

impl FeatureFlags {
    pub fn new() -> Self {
        Self {
            flags: ArcSwap::from_pointee(HashMap::new()),
        }
    }

    pub fn from_map(flags: HashMap<String, bool>) -> Self {
        Self {
            flags: ArcSwap::from_pointee(flags),
        }
    }

    /// Replace the active flag set. Call on bootstrap or config reload.
    pub fn set_flags(&self, flags: HashMap<String, bool>) {
        self.flags.store(Arc::new(flags));
    }

    /// Check whether a feature is enabled. Unknown features default to
    /// enabled.
    pub fn is_enabled(&self, feature: &str) -> bool {
        self.flags.load().get(feature).copied().unwrap_or(true)
    }
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self::new()
    }
}
