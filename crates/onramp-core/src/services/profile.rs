// ── Profile service ──
//
// Fetch variant of the request-state pattern: loading / user / error, with
// the fetched entity retained across failed reloads until a new success
// overwrites it.

use std::sync::Arc;

use tokio::sync::watch;

use onramp_api::ApiClient;

use crate::model::User;
use crate::request::{RequestCell, RequestError, ResetPolicy};

/// User-facing message for any profile-load failure.
pub const LOAD_USER_FAILED: &str = "Failed to load user";

/// Issues `get_user` calls and publishes their lifecycle.
pub struct ProfileService {
    client: Arc<ApiClient>,
    cell: RequestCell<User>,
}

impl ProfileService {
    pub(crate) fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            cell: RequestCell::new(ResetPolicy::RetainResult),
        }
    }

    /// Fetch a user by id.
    ///
    /// Clears `error`, performs the remote call, and settles with `loading`
    /// false. A failure leaves the previously fetched user in place.
    pub async fn load_user(&self, id: i64) {
        self.cell
            .drive(
                async { self.client.get_user(id).await.map(User::from) },
                LOAD_USER_FAILED,
            )
            .await;
    }

    pub fn loading(&self) -> bool {
        self.cell.loading()
    }

    /// The most recently fetched user, if any call has succeeded.
    pub fn user(&self) -> Option<User> {
        self.cell.result()
    }

    pub fn error(&self) -> Option<RequestError> {
        self.cell.error()
    }

    pub fn watch_loading(&self) -> watch::Receiver<bool> {
        self.cell.watch_loading()
    }

    pub fn watch_user(&self) -> watch::Receiver<Option<User>> {
        self.cell.watch_result()
    }

    pub fn watch_error(&self) -> watch::Receiver<Option<RequestError>> {
        self.cell.watch_error()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use onramp_api::ErrorKind;

    use super::*;

    async fn setup() -> (MockServer, ProfileService) {
        let server = MockServer::start().await;
        let client = ApiClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
        (server, ProfileService::new(Arc::new(client)))
    }

    fn user_body(id: i64, name: &str) -> serde_json::Value {
        json!({
            "id": id,
            "email": "alice@example.com",
            "name": name,
            "created_at": "2024-06-15T10:30:00Z"
        })
    }

    #[tokio::test]
    async fn load_user_success_populates_user() {
        let (server, service) = setup().await;

        Mock::given(method("GET"))
            .and(path("/api/users/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_body(1, "Alice")))
            .mount(&server)
            .await;

        service.load_user(1).await;

        let user = service.user().unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.name, "Alice");
        assert!(!service.loading());
        assert!(service.error().is_none());
    }

    #[tokio::test]
    async fn load_user_failure_with_no_prior_success() {
        let (server, service) = setup().await;

        Mock::given(method("GET"))
            .and(path("/api/users/1"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "boom"})))
            .mount(&server)
            .await;

        service.load_user(1).await;

        let err = service.error().unwrap();
        assert_eq!(err.to_string(), LOAD_USER_FAILED);
        assert_eq!(err.kind(), ErrorKind::Server);
        assert!(service.user().is_none());
        assert!(!service.loading());
    }

    #[tokio::test]
    async fn not_found_maps_to_the_same_fixed_message() {
        let (server, service) = setup().await;

        Mock::given(method("GET"))
            .and(path("/api/users/999"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"detail": "User not found"})),
            )
            .mount(&server)
            .await;

        service.load_user(999).await;

        let err = service.error().unwrap();
        assert_eq!(err.to_string(), LOAD_USER_FAILED);
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn failed_reload_retains_previous_user() {
        let (server, service) = setup().await;

        Mock::given(method("GET"))
            .and(path("/api/users/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_body(1, "Alice")))
            .mount(&server)
            .await;

        service.load_user(1).await;
        assert_eq!(service.user().unwrap().name, "Alice");

        server.reset().await;
        Mock::given(method("GET"))
            .and(path("/api/users/1"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        service.load_user(1).await;

        // Stale-but-present beats blank: the old user is still visible.
        assert_eq!(service.user().unwrap().name, "Alice");
        assert!(service.error().is_some());
    }

    #[tokio::test]
    async fn reload_overwrites_with_fresh_data() {
        let (server, service) = setup().await;

        Mock::given(method("GET"))
            .and(path("/api/users/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_body(1, "Alice")))
            .mount(&server)
            .await;
        service.load_user(1).await;

        server.reset().await;
        Mock::given(method("GET"))
            .and(path("/api/users/2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_body(2, "Bob")))
            .mount(&server)
            .await;
        service.load_user(2).await;

        assert_eq!(service.user().unwrap().name, "Bob");
        assert!(service.error().is_none());
    }
}
