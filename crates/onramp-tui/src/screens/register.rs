//! Registration screen — name/email form over the register service.
//!
//! Validation runs client-side before anything is dispatched; service state
//! (loading / success / error) arrives through the data bridge.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use throbber_widgets_tui::{Throbber, ThrobberState};

use onramp_core::{EmailAddress, NewUser, RequestError};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::{Button, ButtonVariant, FieldError, InputField, card, card_focused, form_error};

/// Maximum accepted name length, matching the server-side column.
const NAME_MAX_LEN: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Email,
    Submit,
}

pub struct RegisterScreen {
    name: InputField,
    email: InputField,
    focus: Field,
    /// Validation errors are only shown once a submit has been attempted.
    attempted: bool,
    name_error: Option<FieldError>,
    email_error: Option<FieldError>,

    // Mirrors of the register service state, fed by the data bridge.
    loading: bool,
    success: bool,
    error: Option<RequestError>,

    throbber: ThrobberState,
    focused: bool,
}

impl RegisterScreen {
    pub fn new() -> Self {
        Self {
            name: InputField::new("Full name").placeholder("Alice Smith"),
            email: InputField::new("Email address").placeholder("alice@example.com"),
            focus: Field::Name,
            attempted: false,
            name_error: None,
            email_error: None,
            loading: false,
            success: false,
            error: None,
            throbber: ThrobberState::default(),
            focused: false,
        }
    }

    fn sync_focus(&mut self) {
        let editable = self.focused && !self.success;
        self.name
            .set_focused(editable && self.focus == Field::Name);
        self.email
            .set_focused(editable && self.focus == Field::Email);
    }

    fn focus_next(&mut self) {
        self.focus = match self.focus {
            Field::Name => Field::Email,
            Field::Email => Field::Submit,
            Field::Submit => Field::Name,
        };
        self.sync_focus();
    }

    fn focus_prev(&mut self) {
        self.focus = match self.focus {
            Field::Name => Field::Submit,
            Field::Email => Field::Name,
            Field::Submit => Field::Email,
        };
        self.sync_focus();
    }

    /// Re-run field validation; returns the input when everything passes.
    fn validate(&mut self) -> Option<NewUser> {
        let name = self.name.value().trim();
        self.name_error = if name.is_empty() {
            Some(FieldError::Required)
        } else if name.len() > NAME_MAX_LEN {
            Some(FieldError::TooLong)
        } else {
            None
        };

        let email = self.email.value().trim();
        let parsed = if email.is_empty() {
            self.email_error = Some(FieldError::Required);
            None
        } else {
            match EmailAddress::parse(email) {
                Ok(parsed) => {
                    self.email_error = None;
                    Some(parsed)
                }
                Err(_) => {
                    self.email_error = Some(FieldError::InvalidEmail);
                    None
                }
            }
        };

        if self.name_error.is_some() {
            return None;
        }
        parsed.map(|email| NewUser {
            email,
            name: name.to_owned(),
        })
    }

    fn try_submit(&mut self) -> Option<Action> {
        self.attempted = true;
        let new_user = self.validate()?;
        if self.loading {
            return None;
        }
        Some(Action::SubmitRegistration(new_user))
    }
}

impl Component for RegisterScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.success {
            return Ok(None);
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_prev(),
            KeyCode::Esc if self.focus != Field::Submit => {
                self.focus = Field::Submit;
                self.sync_focus();
            }
            KeyCode::Enter => match self.focus {
                Field::Name | Field::Email => self.focus_next(),
                Field::Submit => return Ok(self.try_submit()),
            },
            _ => {
                match self.focus {
                    Field::Name => self.name.handle_key_event(key),
                    Field::Email => self.email.handle_key_event(key),
                    Field::Submit => {}
                }
                // Live re-validation once errors are visible.
                if self.attempted {
                    let _ = self.validate();
                }
            }
        }

        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::RegisterLoading(loading) => self.loading = *loading,
            Action::RegisterCreated(created) => self.success = created.is_some(),
            Action::RegisterError(error) => self.error.clone_from(error),
            Action::Tick if self.loading => self.throbber.calc_next(),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let width = 48u16.min(area.width.saturating_sub(4));
        let height = 18u16.min(area.height);
        let x = (area.width.saturating_sub(width)) / 2;
        let y = (area.height.saturating_sub(height)) / 2;
        let panel = Rect::new(area.x + x, area.y + y, width, height);

        let block = if self.focused {
            card_focused("Create Account")
        } else {
            card("Create Account")
        };
        let inner = block.inner(panel);
        frame.render_widget(block, panel);

        if self.success {
            let [text_area, nav_area] =
                Layout::vertical([Constraint::Length(3), Constraint::Length(1)]).areas(inner);
            frame.render_widget(
                Paragraph::new(vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        "Account created! You can now sign in.",
                        theme::success().add_modifier(Modifier::BOLD),
                    )),
                ]),
                text_area,
            );
            frame.render_widget(
                Button::new("l → open login").variant(ButtonVariant::Ghost),
                nav_area,
            );
            return;
        }

        let [name_area, name_err_area, email_area, email_err_area, service_err_area, button_area, spinner_area] =
            Layout::vertical([
                Constraint::Length(InputField::HEIGHT),
                Constraint::Length(1),
                Constraint::Length(InputField::HEIGHT),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .areas(inner);

        self.name.render(frame, name_area);
        frame.render_widget(
            Paragraph::new(form_error(self.name_error)),
            name_err_area,
        );
        self.email.render(frame, email_area);
        frame.render_widget(
            Paragraph::new(form_error(self.email_error)),
            email_err_area,
        );

        if let Some(error) = &self.error {
            frame.render_widget(
                Paragraph::new(Span::styled(error.message(), theme::destructive())),
                service_err_area,
            );
        }

        let label = if self.loading {
            "Creating account…"
        } else {
            "Create account"
        };
        frame.render_widget(
            Button::new(label)
                .focused(self.focus == Field::Submit)
                .disabled(self.loading),
            button_area,
        );

        if self.loading {
            let throbber = Throbber::default()
                .label("talking to the platform")
                .style(theme::muted())
                .throbber_style(theme::border_focused());
            let mut state = self.throbber.clone();
            frame.render_stateful_widget(throbber, spinner_area, &mut state);
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if focused {
            self.focus = Field::Name;
        }
        self.sync_focus();
    }

    fn capturing_input(&self) -> bool {
        self.focused && !self.success && matches!(self.focus, Field::Name | Field::Email)
    }
}
