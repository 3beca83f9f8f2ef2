//! Reactive service layer between `onramp-api` and UI consumers.
//!
//! This crate owns the business logic, domain model, and reactive state
//! infrastructure for the Onramp workspace:
//!
//! - **[`Services`]** — Central facade owning the API client and one service
//!   per remote-facing feature. Cheaply cloneable; constructed once in `main`
//!   and handed to consumers explicitly — no ambient global lookup.
//!
//! - **[`RequestCell<T>`]** — The request-state primitive. Wraps one
//!   asynchronous remote call and publishes its lifecycle as three observable
//!   cells (`loading`, `result`, `error`) backed by `tokio::sync::watch`
//!   channels. Every feature service is an instantiation of this pattern.
//!
//! - **Feature services** ([`RegisterService`], [`ProfileService`]) — the
//!   create and fetch variants of the pattern: registration exposes
//!   `loading`/`success`/`error` with no retained payload; profile lookup
//!   exposes `loading`/`user`/`error` and retains the fetched entity across
//!   failed reloads.
//!
//! - **[`SessionService`]** — placeholder session holder (always
//!   authenticated, fixed dev user). Not a real authorization system.
//!
//! - **[`FeatureFlags`]** — runtime feature toggles, default-enabled,
//!   consulted by navigation guards.
//!
//! - **Domain model** ([`model`]) — canonical types ([`User`],
//!   [`EmailAddress`]) converted from the wire shapes in `onramp-api`.

pub mod flags;
pub mod model;
pub mod request;
pub mod services;
pub mod session;

// ── Primary re-exports ──────────────────────────────────────────────
pub use onramp_api::{ErrorKind, TransportConfig};

pub use flags::FeatureFlags;
pub use model::{EmailAddress, InvalidEmail, User};
pub use request::{RequestCell, RequestError, ResetPolicy};
pub use services::profile::ProfileService;
pub use services::register::{NewUser, RegisterService};
pub use services::Services;
pub use session::{Role, SessionService, SessionUser};
