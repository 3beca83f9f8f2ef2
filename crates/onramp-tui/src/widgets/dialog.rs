//! Centered modal dialog panel.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogVariant {
    #[default]
    Default,
    Destructive,
}

/// Modal panel rendered over the whole frame: dimmed backdrop fill,
/// bordered body, y/n footer. Input capture is the caller's job.
pub struct Dialog<'a> {
    title: &'a str,
    body: &'a str,
    variant: DialogVariant,
}

impl<'a> Dialog<'a> {
    pub fn new(title: &'a str, body: &'a str) -> Self {
        Self {
            title,
            body,
            variant: DialogVariant::default(),
        }
    }

    pub fn variant(mut self, variant: DialogVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let width = 50u16.min(area.width.saturating_sub(4));
        let height = 5u16;

        let x = (area.width.saturating_sub(width)) / 2;
        let y = (area.height.saturating_sub(height)) / 2;
        let dialog_area = Rect::new(area.x + x, area.y + y, width, height);

        // Opaque fill so the panel reads as a layer above the screen.
        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BACKGROUND)),
            dialog_area,
        );

        let border_style = match self.variant {
            DialogVariant::Default => theme::border_focused(),
            DialogVariant::Destructive => Style::default().fg(theme::DESTRUCTIVE),
        };

        let block = Block::default()
            .title(Line::from(Span::styled(
                format!(" {} ", self.title),
                theme::title_style(),
            )))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style);

        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let text = vec![
            Line::from(Span::styled(format!("  {}", self.body), theme::text())),
            Line::from(""),
            Line::from(vec![
                Span::styled("  y ", theme::key_hint_key()),
                Span::styled("confirm    ", theme::key_hint()),
                Span::styled("n ", theme::key_hint_key()),
                Span::styled("cancel", theme::key_hint()),
            ]),
        ];
        frame.render_widget(Paragraph::new(text), inner);
    }
}
