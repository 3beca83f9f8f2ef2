//! Per-field validation messages.

use ratatui::text::{Line, Span};

use crate::theme;

/// Why a form field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
    InvalidEmail,
    TooLong,
}

impl FieldError {
    /// The user-facing message for this failure.
    pub fn message(self) -> &'static str {
        match self {
            Self::Required => "This field is required",
            Self::InvalidEmail => "Please enter a valid email address",
            Self::TooLong => "Value is too long",
        }
    }
}

/// The error line rendered under a field; empty when the field is valid.
pub fn form_error(error: Option<FieldError>) -> Line<'static> {
    match error {
        Some(e) => Line::from(Span::styled(e.message(), theme::destructive())),
        None => Line::default(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_the_styleguide() {
        assert_eq!(FieldError::Required.message(), "This field is required");
        assert_eq!(
            FieldError::InvalidEmail.message(),
            "Please enter a valid email address"
        );
    }

    #[test]
    fn valid_field_renders_nothing() {
        assert!(form_error(None).spans.is_empty());
    }

    #[test]
    fn invalid_field_renders_destructive_text() {
        let line = form_error(Some(FieldError::Required));
        assert_eq!(line.spans.len(), 1);
        assert_eq!(line.spans[0].style.fg, Some(theme::DESTRUCTIVE));
    }
}
