//! Inline status badge.

use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BadgeVariant {
    #[default]
    Default,
    Secondary,
    Destructive,
    Outline,
}

/// Small variant-colored label, rendered as a single padded span.
#[derive(Debug, Clone)]
pub struct Badge {
    text: String,
    variant: BadgeVariant,
}

impl Badge {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            variant: BadgeVariant::default(),
        }
    }

    pub fn variant(mut self, variant: BadgeVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Produce the styled span for inline use in any `Line`.
    pub fn to_span(&self) -> Span<'static> {
        let style = match self.variant {
            BadgeVariant::Default => Style::default()
                .fg(theme::PRIMARY_FOREGROUND)
                .bg(theme::PRIMARY),
            BadgeVariant::Secondary => Style::default().fg(theme::FOREGROUND).bg(theme::CARD),
            BadgeVariant::Destructive => Style::default()
                .fg(theme::PRIMARY_FOREGROUND)
                .bg(theme::DESTRUCTIVE),
            BadgeVariant::Outline => Style::default()
                .fg(theme::FOREGROUND)
                .add_modifier(Modifier::UNDERLINED),
        };

        Span::styled(format!(" {} ", self.text), style)
    }
}
