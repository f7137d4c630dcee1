//! Palette and semantic styling for the dashboard.

use ratatui::style::{Color, Modifier, Style};

use drdash_core::{HealthClass, RoutingTarget, Severity};

// ── Core Palette ──────────────────────────────────────────────────────

pub const SUCCESS_GREEN: Color = Color::Rgb(80, 250, 123); // #50fa7b
pub const WARNING_YELLOW: Color = Color::Rgb(241, 250, 140); // #f1fa8c
pub const ERROR_RED: Color = Color::Rgb(255, 99, 99); // #ff6363
pub const DIM_WHITE: Color = Color::Rgb(189, 193, 207); // #bdc1cf
pub const BORDER_GRAY: Color = Color::Rgb(98, 114, 164); // #6272a4
pub const ACCENT_CYAN: Color = Color::Rgb(128, 255, 234); // #80ffea

/// Production data center accent.
pub const PROD_BLUE: Color = Color::Rgb(24, 144, 255);
/// Disaster recovery accent.
pub const DR_ORANGE: Color = Color::Rgb(230, 100, 60);

// ── Semantic mapping ──────────────────────────────────────────────────

/// Color for an aggregated health class.
pub fn health_color(class: HealthClass) -> Color {
    match class {
        HealthClass::Online => SUCCESS_GREEN,
        HealthClass::Warning => WARNING_YELLOW,
        HealthClass::Offline => ERROR_RED,
    }
}

/// Color for a gauge severity (lag, connection count).
pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Nominal => SUCCESS_GREEN,
        Severity::Degraded => WARNING_YELLOW,
        Severity::Critical => ERROR_RED,
    }
}

/// Accent color for the side the load balancer is targeting.
pub fn routing_color(target: RoutingTarget) -> Color {
    match target {
        RoutingTarget::Production => PROD_BLUE,
        RoutingTarget::Disaster => DR_ORANGE,
        RoutingTarget::Offline => BORDER_GRAY,
    }
}

// ── Semantic styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default()
        .fg(ACCENT_CYAN)
        .add_modifier(Modifier::BOLD)
}

/// Default (unfocused) panel border.
pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Secondary text (IPs, labels).
pub fn dim_style() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// The single aggregate error surface.
pub fn error_style() -> Style {
    Style::default().fg(ERROR_RED).add_modifier(Modifier::BOLD)
}
