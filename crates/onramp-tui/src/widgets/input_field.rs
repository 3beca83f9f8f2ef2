//! Labeled single-line text input.

use crossterm::event::{Event as CrosstermEvent, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use crate::theme;

/// Label + bordered text box. Shows the placeholder while empty and
/// unfocused; owns cursor placement while focused.
pub struct InputField {
    label: String,
    placeholder: String,
    input: Input,
    focused: bool,
}

impl InputField {
    /// Rows needed to render: one label line + a three-row bordered box.
    pub const HEIGHT: u16 = 4;

    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            placeholder: String::new(),
            input: Input::default(),
            focused: false,
        }
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    pub fn clear(&mut self) {
        self.input.reset();
    }

    pub fn focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Feed a key press into the editor state.
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        self.input.handle_event(&CrosstermEvent::Key(key));
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let [label_area, box_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(3)]).areas(area);

        frame.render_widget(
            Paragraph::new(self.label.as_str()).style(theme::muted()),
            label_area,
        );

        let border_style = if self.focused {
            theme::border_focused()
        } else {
            theme::border_default()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style);

        let inner_width = usize::from(box_area.width.saturating_sub(2));
        let scroll = self.input.visual_scroll(inner_width);

        let paragraph = if self.input.value().is_empty() && !self.focused {
            Paragraph::new(self.placeholder.as_str()).style(theme::muted())
        } else {
            Paragraph::new(self.input.value())
                .style(theme::text())
                .scroll((0, u16::try_from(scroll).unwrap_or(0)))
        };
        frame.render_widget(paragraph.block(block), box_area);

        if self.focused {
            let cursor_col = self.input.visual_cursor().saturating_sub(scroll);
            let x = box_area.x + 1 + u16::try_from(cursor_col).unwrap_or(0);
            frame.set_cursor_position((x.min(box_area.right().saturating_sub(2)), box_area.y + 1));
        }
    }
}
