//! Per-feature services and the hub that owns them.

use std::sync::Arc;

use onramp_api::{ApiClient, TransportConfig};

use crate::flags::FeatureFlags;
use crate::services::profile::ProfileService;
use crate::services::register::RegisterService;
use crate::session::SessionService;

pub mod profile;
pub mod register;

/// Central facade owning the API client and one service per feature.
///
/// Cheaply cloneable via `Arc`. Constructed once in `main` and passed to
/// consumers explicitly; each service's state cells live exactly as long as
/// the hub. Consumers read and subscribe — only the owning service writes.
#[derive(Clone)]
pub struct Services {
    inner: Arc<ServicesInner>,
}

struct ServicesInner {
    api: Arc<ApiClient>,
    register: RegisterService,
    profile: ProfileService,
    session: SessionService,
    flags: FeatureFlags,
}

impl Services {
    /// Build a hub against the given API base URL.
    ///
    /// The session stub is created first so its bearer token can be injected
    /// into the API client as a default header.
    pub fn new(
        base_url: &str,
        transport: &TransportConfig,
        flags: FeatureFlags,
    ) -> Result<Self, onramp_api::Error> {
        let session = SessionService::new();
        let api = Arc::new(ApiClient::with_bearer_token(
            base_url,
            &session.token(),
            transport,
        )?);
        Ok(Self::assemble(api, session, flags))
    }

    /// Wrap an already-built client (tests, custom transports).
    pub fn from_client(api: ApiClient, flags: FeatureFlags) -> Self {
        Self::assemble(Arc::new(api), SessionService::new(), flags)
    }

    fn assemble(api: Arc<ApiClient>, session: SessionService, flags: FeatureFlags) -> Self {
        Self {
            inner: Arc::new(ServicesInner {
                register: RegisterService::new(Arc::clone(&api)),
                profile: ProfileService::new(Arc::clone(&api)),
                session,
                flags,
                api,
            }),
        }
    }

    /// Direct access to the API client (health checks, ad-hoc queries).
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    pub fn register(&self) -> &RegisterService {
        &self.inner.register
    }

    pub fn profile(&self) -> &ProfileService {
        &self.inner.profile
    }

    pub fn session(&self) -> &SessionService {
        &self.inner.session
    }

    pub fn flags(&self) -> &FeatureFlags {
        &self.inner.flags
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn clones_share_the_same_state_cells() {
        let client = ApiClient::from_reqwest("http://localhost:8000", reqwest::Client::new())
            .unwrap();
        let services = Services::from_client(client, FeatureFlags::default());
        let clone = services.clone();

        services.session().logout();
        assert!(!clone.session().is_authenticated());
    }

    #[test]
    fn hub_starts_with_a_live_session_and_flags() {
        let client = ApiClient::from_reqwest("http://localhost:8000", reqwest::Client::new())
            .unwrap();
        let flags = FeatureFlags::from_map(HashMap::from([("profile".to_owned(), false)]));
        let services = Services::from_client(client, flags);

        assert!(services.session().is_authenticated());
        assert!(!services.flags().is_enabled("profile"));
        assert!(!services.register().loading());
        assert!(services.profile().user().is_none());
    }
}
