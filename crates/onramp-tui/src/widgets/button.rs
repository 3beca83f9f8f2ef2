//! Focusable button.

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Widget};

use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Default,
    Destructive,
    Outline,
    Ghost,
}

/// A labeled, variant-styled button. Three rows tall (bordered), except
/// the ghost variant which renders borderless on one row.
#[derive(Debug, Clone)]
pub struct Button<'a> {
    label: &'a str,
    variant: ButtonVariant,
    focused: bool,
    disabled: bool,
}

impl<'a> Button<'a> {
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            variant: ButtonVariant::default(),
            focused: false,
            disabled: false,
        }
    }

    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    fn label_style(&self) -> Style {
        let base = match self.variant {
            ButtonVariant::Default => Style::default()
                .fg(theme::PRIMARY)
                .add_modifier(Modifier::BOLD),
            ButtonVariant::Destructive => Style::default()
                .fg(theme::DESTRUCTIVE)
                .add_modifier(Modifier::BOLD),
            ButtonVariant::Outline => Style::default().fg(theme::FOREGROUND),
            ButtonVariant::Ghost => Style::default().fg(theme::MUTED_FOREGROUND),
        };

        if self.disabled {
            base.add_modifier(Modifier::DIM)
        } else {
            base
        }
    }
}

impl Widget for Button<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let label = Paragraph::new(Line::from(Span::styled(self.label, self.label_style())))
            .alignment(Alignment::Center);

        if self.variant == ButtonVariant::Ghost {
            label.render(area, buf);
            return;
        }

        let border_style = if self.disabled {
            theme::border_default().add_modifier(Modifier::DIM)
        } else if self.focused {
            theme::border_focused()
        } else {
            theme::border_default()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);
        label.render(inner, buf);
    }
}
