//! Profile screen — fetch and display a user by id.
//!
//! Loading / user / error mirror the profile service; a failed reload keeps
//! the previously fetched user on screen with the error banner above it.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use throbber_widgets_tui::{Throbber, ThrobberState};

use onramp_core::{RequestError, User};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::{Badge, BadgeVariant, InputField, card};

pub struct ProfileScreen {
    id_input: InputField,
    editing: bool,
    /// Set when the id field contains something that isn't a number.
    id_invalid: bool,
    last_id: Option<i64>,

    // Mirrors of the profile service state, fed by the data bridge.
    loading: bool,
    user: Option<User>,
    error: Option<RequestError>,

    throbber: ThrobberState,
    focused: bool,
}

impl ProfileScreen {
    pub fn new() -> Self {
        Self {
            id_input: InputField::new("User id").placeholder("1"),
            editing: false,
            id_invalid: false,
            last_id: None,
            loading: false,
            user: None,
            error: None,
            throbber: ThrobberState::default(),
            focused: false,
        }
    }

    fn submit_lookup(&mut self) -> Option<Action> {
        match self.id_input.value().trim().parse::<i64>() {
            Ok(id) => {
                self.id_invalid = false;
                self.editing = false;
                self.id_input.set_focused(false);
                self.last_id = Some(id);
                Some(Action::LoadProfile(id))
            }
            Err(_) => {
                self.id_invalid = true;
                None
            }
        }
    }
}

impl Component for ProfileScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.editing {
            match key.code {
                KeyCode::Esc => {
                    self.editing = false;
                    self.id_input.set_focused(false);
                }
                KeyCode::Enter => return Ok(self.submit_lookup()),
                _ => self.id_input.handle_key_event(key),
            }
            return Ok(None);
        }

        match key.code {
            KeyCode::Char('i') | KeyCode::Enter => {
                self.editing = true;
                self.id_input.set_focused(true);
            }
            KeyCode::Char('r') => {
                if let Some(id) = self.last_id {
                    return Ok(Some(Action::LoadProfile(id)));
                }
            }
            _ => {}
        }

        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::ProfileLoading(loading) => self.loading = *loading,
            Action::ProfileUpdated(user) => self.user.clone_from(user),
            Action::ProfileError(error) => self.error.clone_from(error),
            Action::Tick if self.loading => self.throbber.calc_next(),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let width = 52u16.min(area.width.saturating_sub(4));
        let height = 16u16.min(area.height);
        let x = (area.width.saturating_sub(width)) / 2;
        let y = (area.height.saturating_sub(height)) / 2;
        let panel = Rect::new(area.x + x, area.y + y, width, height);

        let block = card("Profile");
        let inner = block.inner(panel);
        frame.render_widget(block, panel);

        let [input_area, input_err_area, status_area, body_area, hint_area] = Layout::vertical([
            Constraint::Length(InputField::HEIGHT),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .areas(inner);

        self.id_input.render(frame, input_area);
        if self.id_invalid {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "Enter a numeric user id",
                    theme::destructive(),
                )),
                input_err_area,
            );
        }

        if self.loading {
            let throbber = Throbber::default()
                .label("Loading…")
                .style(theme::muted())
                .throbber_style(theme::border_focused());
            let mut state = self.throbber.clone();
            frame.render_stateful_widget(throbber, status_area, &mut state);
        } else if let Some(error) = &self.error {
            frame.render_widget(
                Paragraph::new(Span::styled(error.message(), theme::destructive())),
                status_area,
            );
        }

        if let Some(user) = &self.user {
            let member_since = user.created_at.format("%b %e, %Y").to_string();
            let mut headline = vec![
                Span::styled(
                    user.name.clone(),
                    theme::text().add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Badge::new(format!("id {}", user.id))
                    .variant(BadgeVariant::Secondary)
                    .to_span(),
            ];
            // A failed reload keeps the old record visible; flag it.
            if self.error.is_some() {
                headline.push(Span::raw("  "));
                headline.push(Badge::new("stale").variant(BadgeVariant::Outline).to_span());
            }
            let lines = vec![
                Line::from(""),
                Line::from(headline),
                Line::from(Span::styled(user.email.to_string(), theme::muted())),
                Line::from(Span::styled(
                    format!("Member since {member_since}"),
                    theme::muted(),
                )),
            ];
            frame.render_widget(Paragraph::new(lines), body_area);
        } else if !self.loading && self.error.is_none() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "Enter a user id and press Enter.",
                    theme::muted(),
                )),
                body_area,
            );
        }

        let hint = if self.editing {
            "Enter load · Esc leave field"
        } else {
            "i edit id · r reload"
        };
        frame.render_widget(Paragraph::new(hint).style(theme::key_hint()), hint_area);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if !focused {
            self.editing = false;
            self.id_input.set_focused(false);
        }
    }

    fn capturing_input(&self) -> bool {
        self.focused && self.editing
    }
}
