//! Shared presentational widgets.
//!
//! Pure display: widgets consume props and render; none of them holds
//! business state.

pub mod badge;
pub mod button;
pub mod card;
pub mod dialog;
pub mod form_error;
pub mod input_field;

pub use badge::{Badge, BadgeVariant};
pub use button::{Button, ButtonVariant};
pub use card::{card, card_focused};
pub use dialog::{Dialog, DialogVariant};
pub use form_error::{FieldError, form_error};
pub use input_field::InputField;
