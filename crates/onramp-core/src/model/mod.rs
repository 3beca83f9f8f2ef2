//! Canonical domain types, converted from the wire shapes in `onramp-api`.

mod user;

pub use user::{EmailAddress, InvalidEmail, User};
