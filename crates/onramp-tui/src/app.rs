//! Application core — event loop, route management, action dispatch.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Tabs};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use onramp_core::Services;

use crate::action::{Action, ConfirmAction, Notification, NotificationLevel};
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screen::{GuardVerdict, RouteId, run_guards};
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;

const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

/// Top-level application state and event loop.
pub struct App {
    /// Current active route.
    active_route: RouteId,
    /// Previous route for GoBack.
    previous_route: Option<RouteId>,
    /// All screen components, keyed by route.
    screens: HashMap<RouteId, Box<dyn Component>>,
    /// Whether the app should keep running.
    running: bool,
    /// Last API health probe result (None until the first probe lands).
    api_healthy: Option<bool>,
    /// Help overlay visibility.
    help_visible: bool,
    /// Terminal size for responsive layout.
    terminal_size: (u16, u16),
    /// Action sender — components can dispatch actions through this.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver — main loop drains this.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Service hub, injected from main.
    services: Services,
    /// Cancellation token for the data bridge task.
    data_cancel: CancellationToken,
    /// Pending confirmation dialog (blocks other input while active).
    pending_confirm: Option<ConfirmAction>,
    /// Active notification toast with display timestamp.
    notification: Option<(Notification, Instant)>,
}

impl App {
    /// Create the App with all screens mounted, starting on Landing.
    pub fn new(services: Services) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let screens: HashMap<RouteId, Box<dyn Component>> = create_screens().into_iter().collect();

        Self {
            active_route: RouteId::Landing,
            previous_route: None,
            screens,
            running: true,
            api_healthy: None,
            help_visible: false,
            terminal_size: (0, 0),
            action_tx,
            action_rx,
            services,
            data_cancel: CancellationToken::new(),
            pending_confirm: None,
            notification: None,
        }
    }

    /// Initialize all screen components with the action sender.
    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        if let Some(screen) = self.screens.get_mut(&self.active_route) {
            screen.set_focused(true);
        }
        Ok(())
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.terminal_size = tui.size().unwrap_or((80, 24));
        self.init_screens()?;

        // Spawn the data bridge
        {
            let services = self.services.clone();
            let cancel = self.data_cancel.clone();
            let tx = self.action_tx.clone();
            tokio::spawn(async move {
                crate::data_bridge::run_data_bridge(services, tx, cancel).await;
            });
        }

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            // 1. Wait for the next event
            let Some(event) = events.next().await else {
                break;
            };

            // 2. Map event → action(s)
            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => {
                    self.action_tx.send(Action::Resize(w, h))?;
                }
                Event::Tick => {
                    self.action_tx.send(Action::Tick)?;
                }
                Event::Render => {
                    self.action_tx.send(Action::Render)?;
                }
            }

            // 3. Drain and process all queued actions
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        // Cancel the data bridge and clean up
        self.data_cancel.cancel();
        events.stop();
        tui.exit()?;
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Global keys are handled here;
    /// route-specific keys are delegated to the active screen component.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Ctrl+C always quits, even mid-form.
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        // Confirmation dialog captures all input
        if self.pending_confirm.is_some() {
            return match key.code {
                KeyCode::Char('y' | 'Y') => Ok(Some(Action::ConfirmYes)),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Ok(Some(Action::ConfirmNo)),
                _ => Ok(None),
            };
        }

        if self.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                _ => Ok(None),
            };
        }

        // Esc clears an active toast before doing anything else.
        if self.notification.is_some() && key.code == KeyCode::Esc {
            return Ok(Some(Action::DismissNotification));
        }

        // A screen consuming text input gets everything except Ctrl+C.
        let capturing = self
            .screens
            .get(&self.active_route)
            .is_some_and(|s| s.capturing_input());

        if !capturing {
            match (key.modifiers, key.code) {
                (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),
                (KeyModifiers::NONE, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),
                (KeyModifiers::NONE, KeyCode::Char('l')) => {
                    return Ok(Some(Action::Navigate(RouteId::Login)));
                }

                // Route navigation via number keys
                (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='4')) => {
                    let n = c as u8 - b'0';
                    if let Some(route) = RouteId::from_number(n) {
                        return Ok(Some(Action::Navigate(route)));
                    }
                }

                // Tab / Shift+Tab for route cycling
                (KeyModifiers::NONE, KeyCode::Tab) => {
                    return Ok(Some(Action::Navigate(self.active_route.next())));
                }
                (KeyModifiers::SHIFT, KeyCode::BackTab) => {
                    return Ok(Some(Action::Navigate(self.active_route.prev())));
                }

                // Esc — context-dependent back
                (KeyModifiers::NONE, KeyCode::Esc) => return Ok(Some(Action::GoBack)),

                _ => {}
            }
        }

        // Delegate to active screen component
        if let Some(screen) = self.screens.get_mut(&self.active_route) {
            return screen.handle_key_event(key);
        }

        Ok(None)
    }

    /// Process a single action — update app state and propagate to components.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::Resize(w, h) => {
                self.terminal_size = (*w, *h);
            }

            Action::Navigate(target) => {
                self.navigate(*target)?;
            }

            Action::GoBack => {
                if let Some(prev) = self.previous_route.take() {
                    self.action_tx.send(Action::Navigate(prev))?;
                }
            }

            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }

            Action::LoginStub => {
                // Stubbed auth: proceed straight to the dashboard.
                self.action_tx.send(Action::Navigate(RouteId::Dashboard))?;
            }

            Action::RequestLogout => {
                self.action_tx
                    .send(Action::ShowConfirm(ConfirmAction::Logout))?;
            }

            Action::ShowConfirm(confirm) => {
                self.pending_confirm = Some(confirm.clone());
            }

            Action::ConfirmYes => {
                if let Some(confirm) = self.pending_confirm.take() {
                    self.execute_confirm(&confirm)?;
                }
            }

            Action::ConfirmNo => {
                self.pending_confirm = None;
            }

            // ── Service invocations ──────────────────────────────────
            Action::SubmitRegistration(new_user) => {
                let services = self.services.clone();
                let new_user = new_user.clone();
                tokio::spawn(async move {
                    services.register().register(new_user).await;
                });
            }

            Action::LoadProfile(id) => {
                let services = self.services.clone();
                let id = *id;
                tokio::spawn(async move {
                    services.profile().load_user(id).await;
                });
            }

            // ── Data updates: broadcast to ALL screens ───────────────
            Action::RegisterLoading(_)
            | Action::RegisterCreated(_)
            | Action::RegisterError(_)
            | Action::ProfileLoading(_)
            | Action::ProfileUpdated(_)
            | Action::ProfileError(_)
            | Action::SessionChanged(_)
            | Action::HealthChecked(_) => {
                if let Action::HealthChecked(healthy) = action {
                    self.api_healthy = Some(*healthy);
                }
                // A dead session bounces guarded routes back to Landing.
                if matches!(action, Action::SessionChanged(None))
                    && self.active_route.requires_auth()
                {
                    self.action_tx.send(Action::Navigate(RouteId::Landing))?;
                }

                for screen in self.screens.values_mut() {
                    if let Some(follow_up) = screen.update(action)? {
                        self.action_tx.send(follow_up)?;
                    }
                }
            }

            Action::Notify(n) => {
                self.notification = Some((n.clone(), Instant::now()));
            }

            Action::DismissNotification => {
                self.notification = None;
            }

            Action::Render => {}

            Action::Tick => {
                // Auto-dismiss notifications
                if let Some((_, created)) = &self.notification {
                    if created.elapsed() > NOTIFICATION_TTL {
                        self.notification = None;
                    }
                }
                // Forward ticks to the active screen (spinner frames)
                if let Some(screen) = self.screens.get_mut(&self.active_route) {
                    let _ = screen.update(action);
                }
            }
        }

        Ok(())
    }

    /// Switch routes, running the auth and feature guards first.
    fn navigate(&mut self, target: RouteId) -> Result<()> {
        if target == self.active_route {
            return Ok(());
        }

        match run_guards(&self.services, target) {
            GuardVerdict::Allow => {}
            GuardVerdict::Deny(reason) => {
                debug!(%target, %reason, "navigation denied");
                self.action_tx.send(Action::Notify(Notification::info(reason)))?;
                if self.active_route != RouteId::Landing {
                    self.action_tx.send(Action::Navigate(RouteId::Landing))?;
                }
                return Ok(());
            }
        }

        debug!("switching route: {} → {}", self.active_route, target);
        if let Some(screen) = self.screens.get_mut(&self.active_route) {
            screen.set_focused(false);
        }
        self.previous_route = Some(self.active_route);
        self.active_route = target;
        if let Some(screen) = self.screens.get_mut(&self.active_route) {
            screen.set_focused(true);
        }

        Ok(())
    }

    /// Carry out a confirmed destructive action.
    fn execute_confirm(&mut self, confirm: &ConfirmAction) -> Result<()> {
        match confirm {
            ConfirmAction::Logout => {
                self.services.session().logout();
                self.action_tx
                    .send(Action::Notify(Notification::success("Signed out")))?;
            }
        }
        Ok(())
    }

    // ── Rendering ────────────────────────────────────────────────────

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Layout: [screen content] [tab bar] [status bar]
        let layout = Layout::vertical([
            Constraint::Min(1),    // Screen content
            Constraint::Length(1), // Tab bar
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        if let Some(screen) = self.screens.get(&self.active_route) {
            screen.render(frame, layout[0]);
        }

        self.render_tab_bar(frame, layout[1]);
        self.render_status_bar(frame, layout[2]);

        // Overlays on top (order matters: last = topmost)
        if let Some((ref notif, _)) = self.notification {
            Self::render_notification(frame, area, notif);
        }

        if let Some(ref confirm) = self.pending_confirm {
            let body = confirm.to_string();
            crate::widgets::Dialog::new("Confirm", &body)
                .variant(crate::widgets::DialogVariant::Destructive)
                .render(frame, area);
        }

        if self.help_visible {
            Self::render_help_overlay(frame, area);
        }
    }

    /// Render the bottom tab bar.
    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let narrow = self.terminal_size.0 < 80;
        let titles: Vec<Line> = RouteId::ALL
            .iter()
            .map(|&route| {
                let style = if route == self.active_route {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                let label = if narrow {
                    route.label_short()
                } else {
                    route.label()
                };
                Line::from(Span::styled(
                    format!(" {} {} ", route.number(), label),
                    style,
                ))
            })
            .collect();

        let tabs = Tabs::new(titles).divider(Span::styled(" ", theme::key_hint()));
        frame.render_widget(tabs, area);
    }

    /// Render the bottom status bar: API health, session, key hints.
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let health_indicator = match self.api_healthy {
            Some(true) => Span::styled("● api ok", Style::default().fg(theme::SUCCESS)),
            Some(false) => {
                Span::styled("○ api unreachable", Style::default().fg(theme::DESTRUCTIVE))
            }
            None => Span::styled("◌ checking api", Style::default().fg(theme::WARNING)),
        };

        let session = self
            .services
            .session()
            .current_user()
            .map_or_else(String::new, |u| format!(" │ {}", u.email));

        let capturing = self
            .screens
            .get(&self.active_route)
            .is_some_and(|s| s.capturing_input());
        let hints = if capturing {
            " │ Esc leave field  Ctrl+C quit"
        } else {
            " │ ? help  l login  q quit"
        };

        let line = Line::from(vec![
            Span::raw(" "),
            health_indicator,
            Span::styled(session, theme::muted()),
            Span::styled(hints, theme::key_hint()),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }

    /// Render the help overlay centered on screen.
    fn render_help_overlay(frame: &mut Frame, area: Rect) {
        let help_width = 52u16.min(area.width.saturating_sub(4));
        let help_height = 14u16.min(area.height.saturating_sub(4));

        let x = (area.width.saturating_sub(help_width)) / 2;
        let y = (area.height.saturating_sub(help_height)) / 2;
        let help_area = Rect::new(area.x + x, area.y + y, help_width, help_height);

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BACKGROUND)),
            help_area,
        );

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());

        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let rows: &[(&str, &str)] = &[
            ("1-4", "Jump to route"),
            ("Tab", "Next route"),
            ("l", "Open login"),
            ("Enter", "Submit / select"),
            ("Esc", "Back / leave field"),
            ("i", "Edit focused field"),
            ("?", "This help"),
            ("q", "Quit"),
        ];

        let mut help_text = vec![Line::from("")];
        for (keys, what) in rows {
            help_text.push(Line::from(vec![
                Span::styled(format!("  {keys:<8}"), theme::key_hint_key()),
                Span::styled(*what, theme::key_hint()),
            ]));
        }
        help_text.push(Line::from(""));
        help_text.push(Line::from(Span::styled(
            "                    Esc or ? to close",
            theme::key_hint(),
        )));

        frame.render_widget(Paragraph::new(help_text), inner);
    }

    /// Render a notification toast in the bottom-right corner.
    fn render_notification(frame: &mut Frame, area: Rect, notif: &Notification) {
        let msg_len = u16::try_from(notif.message.len()).unwrap_or(u16::MAX);
        let width = (msg_len + 6).clamp(20, 60);
        let height = 3u16;

        let x = area.width.saturating_sub(width + 1);
        let y = area.height.saturating_sub(height + 2); // above status bar
        let toast_area = Rect::new(area.x + x, area.y + y, width, height);

        let (border_color, icon) = match notif.level {
            NotificationLevel::Success => (theme::SUCCESS, "✓"),
            NotificationLevel::Error => (theme::DESTRUCTIVE, "✗"),
            NotificationLevel::Warning => (theme::WARNING, "!"),
            NotificationLevel::Info => (theme::PRIMARY, "·"),
        };

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BACKGROUND)),
            toast_area,
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color));

        let inner = block.inner(toast_area);
        frame.render_widget(block, toast_area);

        let line = Line::from(vec![
            Span::styled(format!(" {icon} "), Style::default().fg(border_color)),
            Span::styled(&notif.message, theme::text()),
        ]);
        frame.render_widget(Paragraph::new(line), inner);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use onramp_core::FeatureFlags;
    use std::collections::HashMap as StdHashMap;

    use super::*;

    fn app_with_flags(flags: FeatureFlags) -> App {
        let client =
            onramp_api::ApiClient::from_reqwest("http://localhost:8000", reqwest::Client::new())
                .unwrap();
        App::new(Services::from_client(client, flags))
    }

    #[tokio::test]
    async fn navigation_respects_feature_flags() {
        let flags = FeatureFlags::from_map(StdHashMap::from([("registration".to_owned(), false)]));
        let mut app = app_with_flags(flags);

        app.process_action(&Action::Navigate(RouteId::Register))
            .unwrap();
        assert_eq!(app.active_route, RouteId::Landing);

        // An info notification explains the bounce.
        let queued = app.action_rx.try_recv().unwrap();
        assert!(matches!(queued, Action::Notify(_)));
    }

    #[tokio::test]
    async fn navigation_to_enabled_route_succeeds() {
        let mut app = app_with_flags(FeatureFlags::default());

        app.process_action(&Action::Navigate(RouteId::Register))
            .unwrap();
        assert_eq!(app.active_route, RouteId::Register);
        assert_eq!(app.previous_route, Some(RouteId::Landing));
    }

    #[tokio::test]
    async fn guarded_route_is_blocked_after_logout() {
        let mut app = app_with_flags(FeatureFlags::default());
        app.services.session().logout();

        app.process_action(&Action::Navigate(RouteId::Dashboard))
            .unwrap();
        assert_eq!(app.active_route, RouteId::Landing);
    }

    #[tokio::test]
    async fn session_loss_bounces_off_guarded_route() {
        let mut app = app_with_flags(FeatureFlags::default());
        app.process_action(&Action::Navigate(RouteId::Dashboard))
            .unwrap();
        assert_eq!(app.active_route, RouteId::Dashboard);

        app.process_action(&Action::SessionChanged(None)).unwrap();

        // The redirect is queued as a Navigate action.
        let mut bounced = false;
        while let Ok(queued) = app.action_rx.try_recv() {
            if queued == Action::Navigate(RouteId::Landing) {
                app.process_action(&queued).unwrap();
                bounced = true;
            }
        }
        assert!(bounced);
        assert_eq!(app.active_route, RouteId::Landing);
    }

    #[tokio::test]
    async fn logout_flow_requires_confirmation() {
        let mut app = app_with_flags(FeatureFlags::default());

        app.process_action(&Action::RequestLogout).unwrap();
        let queued = app.action_rx.try_recv().unwrap();
        assert_eq!(queued, Action::ShowConfirm(ConfirmAction::Logout));

        app.process_action(&queued).unwrap();
        assert!(app.pending_confirm.is_some());
        assert!(app.services.session().is_authenticated());

        app.process_action(&Action::ConfirmYes).unwrap();
        assert!(app.pending_confirm.is_none());
        assert!(!app.services.session().is_authenticated());
    }

    #[tokio::test]
    async fn confirm_no_leaves_the_session_alone() {
        let mut app = app_with_flags(FeatureFlags::default());

        app.process_action(&Action::ShowConfirm(ConfirmAction::Logout))
            .unwrap();
        app.process_action(&Action::ConfirmNo).unwrap();

        assert!(app.pending_confirm.is_none());
        assert!(app.services.session().is_authenticated());
    }

    #[tokio::test]
    async fn quit_stops_the_loop_flag() {
        let mut app = app_with_flags(FeatureFlags::default());
        app.process_action(&Action::Quit).unwrap();
        assert!(!app.running);
    }
}
