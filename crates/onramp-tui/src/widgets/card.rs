//! Titled container block.

use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders};

use crate::theme;

/// Rounded-border container with a styled title.
pub fn card(title: &str) -> Block<'static> {
    Block::default()
        .title(Line::from(Span::styled(
            format!(" {title} "),
            theme::title_style(),
        )))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_default())
}

/// Card variant for the focused panel.
pub fn card_focused(title: &str) -> Block<'static> {
    card(title).border_style(theme::border_focused())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;
    use ratatui::widgets::Widget;

    use super::*;

    #[test]
    fn card_renders_title_in_top_border() {
        let area = Rect::new(0, 0, 24, 4);
        let mut buf = Buffer::empty(area);

        card("Profile").render(area, &mut buf);

        let top: String = (0..24).map(|x| buf[(x, 0)].symbol()).collect();
        assert!(top.contains("Profile"));
    }
}
