//! Dashboard screen — session summary behind the auth guard.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use onramp_core::SessionUser;

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::{Badge, BadgeVariant, Button, ButtonVariant, card};

pub struct DashboardScreen {
    session: Option<SessionUser>,
    api_healthy: Option<bool>,
    focused: bool,
}

impl DashboardScreen {
    pub fn new() -> Self {
        Self {
            session: None,
            api_healthy: None,
            focused: false,
        }
    }
}

impl Component for DashboardScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.code == KeyCode::Char('x') {
            return Ok(Some(Action::RequestLogout));
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::SessionChanged(session) => self.session.clone_from(session),
            Action::HealthChecked(healthy) => self.api_healthy = Some(*healthy),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let width = 56u16.min(area.width.saturating_sub(4));
        let height = 12u16.min(area.height);
        let x = (area.width.saturating_sub(width)) / 2;
        let y = (area.height.saturating_sub(height)) / 2;
        let panel = Rect::new(area.x + x, area.y + y, width, height);

        let block = card("Dashboard");
        let inner = block.inner(panel);
        frame.render_widget(block, panel);

        let [body_area, button_area] =
            Layout::vertical([Constraint::Min(5), Constraint::Length(3)]).areas(inner);

        let mut lines = vec![Line::from("")];

        if let Some(session) = &self.session {
            lines.push(Line::from(vec![
                Span::styled("Welcome back, ", theme::text()),
                Span::styled(
                    session.email.clone(),
                    theme::text().add_modifier(Modifier::BOLD),
                ),
            ]));

            let mut role_spans = vec![Span::styled("Roles: ", theme::muted())];
            for role in &session.roles {
                role_spans.push(Badge::new(role.to_string()).to_span());
                role_spans.push(Span::raw(" "));
            }
            lines.push(Line::from(role_spans));
        } else {
            lines.push(Line::from(Span::styled("No active session.", theme::muted())));
        }

        lines.push(Line::from(""));
        let api_badge = match self.api_healthy {
            Some(true) => Badge::new("api ok").to_span(),
            Some(false) => Badge::new("api unreachable")
                .variant(BadgeVariant::Destructive)
                .to_span(),
            None => Badge::new("api …").variant(BadgeVariant::Secondary).to_span(),
        };
        lines.push(Line::from(vec![
            Span::styled("Platform: ", theme::muted()),
            api_badge,
        ]));

        frame.render_widget(Paragraph::new(lines), body_area);
        frame.render_widget(
            Button::new("x  Sign out")
                .variant(ButtonVariant::Destructive)
                .focused(self.focused),
            button_area,
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
    use onramp_core::Role;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    fn session() -> SessionUser {
        SessionUser {
            id: "stub-user-1".into(),
            email: "dev@local.dev".into(),
            roles: vec![Role::Admin],
        }
    }

    #[test]
    fn x_requests_logout() {
        let mut screen = DashboardScreen::new();
        let action = screen
            .handle_key_event(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE))
            .unwrap();
        assert_eq!(action, Some(Action::RequestLogout));
    }

    #[test]
    fn renders_session_email_and_roles() {
        let mut screen = DashboardScreen::new();
        screen
            .update(&Action::SessionChanged(Some(session())))
            .unwrap();
        screen.update(&Action::HealthChecked(true)).unwrap();

        let backend = TestBackend::new(64, 14);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| screen.render(frame, frame.area()))
            .unwrap();

        let buf = terminal.backend().buffer();
        let all: String = (0..14)
            .map(|y| (0..64).map(|x| buf[(x, y)].symbol()).collect::<String>() + "\n")
            .collect();

        assert!(all.contains("dev@local.dev"));
        assert!(all.contains("admin"));
        assert!(all.contains("api ok"));
    }

    #[test]
    fn cleared_session_renders_placeholder() {
        let mut screen = DashboardScreen::new();
        screen.update(&Action::SessionChanged(None)).unwrap();

        let backend = TestBackend::new(64, 14);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| screen.render(frame, frame.area()))
            .unwrap();

        let buf = terminal.backend().buffer();
        let all: String = (0..14)
            .map(|y| (0..64).map(|x| buf[(x, y)].symbol()).collect::<String>() + "\n")
            .collect();

        assert!(all.contains("No active session."));
    }
}
