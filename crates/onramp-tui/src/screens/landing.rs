//! Landing screen — headline plus email capture.
//!
//! Submitting a non-empty address only flips a local flag; no remote call
//! is made from this screen.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::{Button, InputField};

pub struct LandingScreen {
    email: InputField,
    submitted: bool,
    focused: bool,
}

impl LandingScreen {
    pub fn new() -> Self {
        Self {
            email: InputField::new("Email address").placeholder("you@example.com"),
            submitted: false,
            focused: false,
        }
    }

    fn sync_focus(&mut self) {
        // While unsubmitted, screen focus lands on the email field.
        if !self.focused || self.submitted {
            self.email.set_focused(false);
        }
    }
}

impl Component for LandingScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.submitted {
            return Ok(None);
        }

        if self.email.focused() {
            match key.code {
                KeyCode::Esc => self.email.set_focused(false),
                KeyCode::Enter => {
                    if !self.email.value().trim().is_empty() {
                        self.submitted = true;
                        self.email.set_focused(false);
                    }
                }
                _ => self.email.handle_key_event(key),
            }
        } else if matches!(key.code, KeyCode::Char('i') | KeyCode::Enter) {
            self.email.set_focused(true);
        }

        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let width = 48u16.min(area.width.saturating_sub(4));
        let height = 12u16.min(area.height);
        let x = (area.width.saturating_sub(width)) / 2;
        let y = (area.height.saturating_sub(height)) / 2;
        let centered = Rect::new(area.x + x, area.y + y, width, height);

        let [title_area, tagline_area, _, form_area, hint_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(7),
            Constraint::Length(1),
        ])
        .areas(centered);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Onramp",
                theme::title_style().add_modifier(Modifier::UNDERLINED),
            )))
            .alignment(Alignment::Center),
            title_area,
        );
        frame.render_widget(
            Paragraph::new("Ship your AI product. Faster.")
                .style(theme::muted())
                .alignment(Alignment::Center),
            tagline_area,
        );

        if self.submitted {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    "You're on the list. We'll be in touch.",
                    theme::success().add_modifier(Modifier::BOLD),
                )))
                .alignment(Alignment::Center),
                form_area,
            );
            return;
        }

        let [input_area, button_area] =
            Layout::vertical([Constraint::Length(InputField::HEIGHT), Constraint::Length(3)])
                .areas(form_area);
        self.email.render(frame, input_area);
        frame.render_widget(
            Button::new("Get access").focused(!self.email.focused()),
            button_area,
        );

        let hint = if self.email.focused() {
            "Enter submit · Esc leave field"
        } else {
            "i edit email · Enter submit"
        };
        frame.render_widget(
            Paragraph::new(hint)
                .style(theme::key_hint())
                .alignment(Alignment::Center),
            hint_area,
        );
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if focused && !self.submitted {
            self.email.set_focused(true);
        }
        self.sync_focus();
    }

    fn capturing_input(&self) -> bool {
        self.focused && !self.submitted && self.email.focused()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crossterm::event::KeyModifiers;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(screen: &mut LandingScreen, s: &str) {
        for c in s.chars() {
            screen.handle_key_event(key(KeyCode::Char(c))).unwrap();
        }
    }

    #[test]
    fn empty_email_does_not_submit() {
        let mut screen = LandingScreen::new();
        screen.set_focused(true);

        screen.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert!(!screen.submitted);
    }

    #[test]
    fn non_empty_email_submits() {
        let mut screen = LandingScreen::new();
        screen.set_focused(true);

        type_str(&mut screen, "a@b.com");
        screen.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert!(screen.submitted);
        assert!(!screen.capturing_input());
    }

    #[test]
    fn renders_headline_then_confirmation() {
        let mut screen = LandingScreen::new();
        screen.set_focused(true);

        let backend = TestBackend::new(60, 16);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|frame| screen.render(frame, frame.area()))
            .unwrap();
        let before = buffer_text(terminal.backend().buffer());
        assert!(before.contains("Onramp"));
        assert!(before.contains("Ship your AI product. Faster."));
        assert!(before.contains("Get access"));

        type_str(&mut screen, "a@b.com");
        screen.handle_key_event(key(KeyCode::Enter)).unwrap();

        terminal
            .draw(|frame| screen.render(frame, frame.area()))
            .unwrap();
        let after = buffer_text(terminal.backend().buffer());
        assert!(after.contains("You're on the list. We'll be in touch."));
        assert!(!after.contains("Get access"));
    }

    fn buffer_text(buf: &ratatui::buffer::Buffer) -> String {
        (0..buf.area.height)
            .map(|y| {
                (0..buf.area.width)
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
                    + "\n"
            })
            .collect()
    }
}
