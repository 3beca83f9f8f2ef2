// ── Registration service ──
//
// Create variant of the request-state pattern: loading / success / error,
// with the success indicator reset at the start of every attempt.

use std::sync::Arc;

use tokio::sync::watch;

use onramp_api::ApiClient;
use onramp_api::types::CreateUserRequest;

use crate::model::{EmailAddress, User};
use crate::request::{RequestCell, RequestError, ResetPolicy};

/// User-facing message for any registration failure. The classified cause
/// stays on the [`RequestError`] for logs and tests.
pub const REGISTRATION_FAILED: &str = "Registration failed. The email may already be in use.";

/// Validated registration input. Build the email via [`EmailAddress::parse`]
/// before constructing this — the service itself does not re-validate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: EmailAddress,
    pub name: String,
}

/// Issues `create_user` calls and publishes their lifecycle.
pub struct RegisterService {
    client: Arc<ApiClient>,
    cell: RequestCell<User>,
}

impl RegisterService {
    pub(crate) fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            cell: RequestCell::new(ResetPolicy::ClearResult),
        }
    }

    /// Attempt to create an account.
    ///
    /// Clears `error` and the success indicator, performs the remote call,
    /// and settles into exactly one of success/error with `loading` false.
    pub async fn register(&self, new_user: NewUser) {
        let body = CreateUserRequest {
            email: new_user.email.into_string(),
            name: new_user.name,
        };

        self.cell
            .drive(
                async { self.client.create_user(&body).await.map(User::from) },
                REGISTRATION_FAILED,
            )
            .await;
    }

    pub fn loading(&self) -> bool {
        self.cell.loading()
    }

    /// Whether the most recent attempt succeeded.
    pub fn success(&self) -> bool {
        self.cell.result().is_some()
    }

    /// The record created by the most recent successful attempt.
    pub fn created(&self) -> Option<User> {
        self.cell.result()
    }

    pub fn error(&self) -> Option<RequestError> {
        self.cell.error()
    }

    pub fn watch_loading(&self) -> watch::Receiver<bool> {
        self.cell.watch_loading()
    }

    pub fn watch_created(&self) -> watch::Receiver<Option<User>> {
        self.cell.watch_result()
    }

    pub fn watch_error(&self) -> watch::Receiver<Option<RequestError>> {
        self.cell.watch_error()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use onramp_api::ErrorKind;

    use super::*;

    async fn setup() -> (MockServer, RegisterService) {
        let server = MockServer::start().await;
        let client = ApiClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
        (server, RegisterService::new(Arc::new(client)))
    }

    fn new_user(email: &str, name: &str) -> NewUser {
        NewUser {
            email: EmailAddress::parse(email).unwrap(),
            name: name.into(),
        }
    }

    fn created_body() -> serde_json::Value {
        json!({
            "id": 1,
            "email": "a@b.com",
            "name": "A",
            "created_at": "2024-06-15T10:30:00Z"
        })
    }

    #[tokio::test]
    async fn register_success_sets_success_and_no_error() {
        let (server, service) = setup().await;

        Mock::given(method("POST"))
            .and(path("/api/users"))
            .and(body_json(json!({"email": "a@b.com", "name": "A"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(created_body()))
            .mount(&server)
            .await;

        service.register(new_user("a@b.com", "A")).await;

        assert!(service.success());
        assert!(service.error().is_none());
        assert!(!service.loading());
        assert_eq!(service.created().unwrap().id, 1);
    }

    #[tokio::test]
    async fn register_conflict_sets_fixed_error_message() {
        let (server, service) = setup().await;

        Mock::given(method("POST"))
            .and(path("/api/users"))
            .respond_with(
                ResponseTemplate::new(409).set_body_json(json!({"detail": "Email already exists"})),
            )
            .mount(&server)
            .await;

        service.register(new_user("dup@b.com", "A")).await;

        let err = service.error().unwrap();
        assert_eq!(err.to_string(), REGISTRATION_FAILED);
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert!(!service.success());
        assert!(!service.loading());
    }

    #[tokio::test]
    async fn loading_is_true_while_the_call_is_in_flight() {
        let (server, service) = setup().await;
        let service = Arc::new(service);

        Mock::given(method("POST"))
            .and(path("/api/users"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(created_body())
                    .set_delay(Duration::from_millis(200)),
            )
            .mount(&server)
            .await;

        let driver = {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                service.register(new_user("a@b.com", "A")).await;
            })
        };

        let mut loading = service.watch_loading();
        loading.wait_for(|v| *v).await.unwrap();
        assert!(service.loading());
        assert!(!service.success());

        driver.await.unwrap();
        assert!(!service.loading());
        assert!(service.success());
    }

    #[tokio::test]
    async fn retry_after_conflict_clears_the_error() {
        let (server, service) = setup().await;

        Mock::given(method("POST"))
            .and(path("/api/users"))
            .respond_with(
                ResponseTemplate::new(409).set_body_json(json!({"detail": "Email already exists"})),
            )
            .mount(&server)
            .await;

        service.register(new_user("dup@b.com", "A")).await;
        assert!(service.error().is_some());

        server.reset().await;
        Mock::given(method("POST"))
            .and(path("/api/users"))
            .respond_with(ResponseTemplate::new(201).set_body_json(created_body()))
            .mount(&server)
            .await;

        service.register(new_user("a@b.com", "A")).await;
        assert!(service.error().is_none());
        assert!(service.success());
    }
}
