//! Semantic styling for the TUI.
//!
//! Color names follow the product styleguide's design tokens (primary,
//! destructive, muted, …) so screens and widgets speak the same vocabulary
//! as the web front end.

use ratatui::style::{Color, Modifier, Style};

// ── Core Palette ──────────────────────────────────────────────────────

pub const PRIMARY: Color = Color::Rgb(99, 102, 241); // #6366f1
pub const PRIMARY_FOREGROUND: Color = Color::Rgb(238, 242, 255); // #eef2ff
pub const DESTRUCTIVE: Color = Color::Rgb(239, 68, 68); // #ef4444
pub const SUCCESS: Color = Color::Rgb(74, 222, 128); // #4ade80
pub const WARNING: Color = Color::Rgb(250, 204, 21); // #facc15

// ── Extended Palette ──────────────────────────────────────────────────

pub const FOREGROUND: Color = Color::Rgb(228, 228, 231); // #e4e4e7
pub const MUTED_FOREGROUND: Color = Color::Rgb(161, 161, 170); // #a1a1aa
pub const BORDER: Color = Color::Rgb(63, 63, 70); // #3f3f46
pub const CARD: Color = Color::Rgb(39, 39, 42); // #27272a
pub const BACKGROUND: Color = Color::Rgb(24, 24, 27); // #18181b

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

/// Body text.
pub fn text() -> Style {
    Style::default().fg(FOREGROUND)
}

/// Secondary text (hints, captions, placeholder copy).
pub fn muted() -> Style {
    Style::default().fg(MUTED_FOREGROUND)
}

/// Inline error text.
pub fn destructive() -> Style {
    Style::default().fg(DESTRUCTIVE)
}

/// Success confirmations.
pub fn success() -> Style {
    Style::default().fg(SUCCESS)
}

/// Border for a focused panel or input.
pub fn border_focused() -> Style {
    Style::default().fg(PRIMARY)
}

/// Border for an unfocused panel or input.
pub fn border_default() -> Style {
    Style::default().fg(BORDER)
}

/// Active tab in the tab bar.
pub fn tab_active() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

/// Inactive tab in the tab bar.
pub fn tab_inactive() -> Style {
    Style::default().fg(MUTED_FOREGROUND)
}

/// Key hint text (e.g., "q quit  ? help").
pub fn key_hint() -> Style {
    Style::default().fg(BORDER)
}

/// Key hint key character.
pub fn key_hint_key() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}
