//! Login screen — stubbed authentication.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::widgets::Paragraph;

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::{Button, ButtonVariant, card};

pub struct LoginScreen {
    focused: bool,
}

impl LoginScreen {
    pub fn new() -> Self {
        Self { focused: false }
    }
}

impl Component for LoginScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.code == KeyCode::Enter {
            return Ok(Some(Action::LoginStub));
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let width = 44u16.min(area.width.saturating_sub(4));
        let height = 12u16.min(area.height);
        let x = (area.width.saturating_sub(width)) / 2;
        let y = (area.height.saturating_sub(height)) / 2;
        let panel = Rect::new(area.x + x, area.y + y, width, height);

        let block = card("Login");
        let inner = block.inner(panel);
        frame.render_widget(block, panel);

        let [text_area, _, button_area, back_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .areas(inner);

        frame.render_widget(
            Paragraph::new("Auth is stubbed. Press Enter to proceed.")
                .style(theme::muted())
                .alignment(Alignment::Center),
            text_area,
        );
        frame.render_widget(
            Button::new("Login (Stub)").focused(self.focused),
            button_area,
        );
        frame.render_widget(
            Button::new("Esc  back").variant(ButtonVariant::Outline),
            back_area,
        );
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    #[test]
    fn enter_dispatches_the_stub_login() {
        let mut screen = LoginScreen::new();
        let action = screen
            .handle_key_event(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
            .unwrap();
        assert_eq!(action, Some(Action::LoginStub));
    }

    #[test]
    fn other_keys_are_ignored() {
        let mut screen = LoginScreen::new();
        let action = screen
            .handle_key_event(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE))
            .unwrap();
        assert_eq!(action, None);
    }
}
