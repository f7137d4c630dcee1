//! Dashboard rendering: header, the two card grids, and the
//! load-balancer strip.
//!
//! Rendering is stateless -- every frame is rebuilt from the published
//! [`DashboardState`], and grid geometry is computed here at draw time
//! from the card count of the view being drawn. That sequencing (render,
//! then layout, per cycle) means a resize can never lay out a stale
//! card count against a newer snapshot.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use drdash_config::LayoutSettings;
use drdash_core::layout::fit;
use drdash_core::{
    CoreError, DashboardState, DashboardView, NodeView, RoutingTarget, Side, Titles,
};

use crate::i18n::Translations;
use crate::theme;

/// Everything the renderer needs besides the state itself.
pub struct RenderContext<'a> {
    pub translations: &'a Translations,
    pub lb_ip: &'a str,
    pub layout: &'a LayoutSettings,
    pub titles: &'a Titles,
    pub clock: &'a str,
}

const HEADER_HEIGHT: u16 = 3;
const LB_STRIP_HEIGHT: u16 = 4;

/// Render one full frame.
pub fn render(frame: &mut Frame, state: &DashboardState, ctx: &RenderContext) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(4),
            Constraint::Min(4),
            Constraint::Length(LB_STRIP_HEIGHT),
        ])
        .split(area);

    render_header(frame, chunks[0], ctx);

    match state {
        DashboardState::Loading => {
            let loading = Paragraph::new("Loading…")
                .style(theme::dim_style())
                .alignment(Alignment::Center);
            frame.render_widget(loading, chunks[1]);
        }
        DashboardState::Failed(err) => {
            // One aggregate error surface; the grid and strip areas are
            // left empty so no stale per-node cards survive.
            render_error(frame, chunks[1], err, ctx);
        }
        DashboardState::Ready(view) => {
            let columns = grid_columns(view, area, ctx.layout);
            render_section(frame, chunks[1], view, Side::Production, columns, ctx);
            render_section(frame, chunks[2], view, Side::Disaster, columns, ctx);
            render_lb_strip(frame, chunks[3], view, ctx);
        }
    }
}

/// Column count for the card grids.
///
/// The fit runs over the whole viewport with both sections' cards
/// counted: one shared column count, recomputed whenever the card
/// count or viewport changes. With nothing to lay out, the configured
/// column preference stands in.
fn grid_columns(view: &DashboardView, area: Rect, layout: &LayoutSettings) -> usize {
    let total_cards = view.nodes.len() * 2;
    if total_cards == 0 {
        return layout.preferred_columns() as usize;
    }
    let constraints = layout.constraints(u32::from(area.width), u32::from(area.height));
    fit(total_cards, &constraints).columns as usize
}

// ── Header ──────────────────────────────────────────────────────────

fn render_header(frame: &mut Frame, area: Rect, ctx: &RenderContext) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(theme::border_default());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 4),
            Constraint::Ratio(2, 4),
            Constraint::Ratio(1, 4),
        ])
        .split(inner);

    let lb_label = ctx.translations.t("lbIpLabel");
    let lb = Paragraph::new(Line::from(vec![
        Span::styled(format!("{lb_label}: "), theme::dim_style()),
        Span::raw(ctx.lb_ip),
    ]));
    frame.render_widget(lb, columns[0]);

    let title = Paragraph::new(ctx.titles.main_title.as_str())
        .style(theme::title_style())
        .alignment(Alignment::Center);
    frame.render_widget(title, columns[1]);

    let clock = Paragraph::new(ctx.clock)
        .style(theme::dim_style())
        .alignment(Alignment::Right);
    frame.render_widget(clock, columns[2]);
}

// ── Error surface ───────────────────────────────────────────────────

fn render_error(frame: &mut Frame, area: Rect, err: &CoreError, ctx: &RenderContext) {
    let message = format!("{}: {err}", ctx.translations.t("dataLoadError"));
    let error = Paragraph::new(message)
        .style(theme::error_style())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(theme::error_style()),
        );
    frame.render_widget(error, area);
}

// ── Card grids ──────────────────────────────────────────────────────

fn section_title<'a>(side: Side, ctx: &'a RenderContext) -> (&'a str, ratatui::style::Color) {
    match side {
        Side::Production => (ctx.titles.prod_data_center.as_str(), theme::PROD_BLUE),
        Side::Disaster => (ctx.titles.dr_data_center.as_str(), theme::DR_ORANGE),
    }
}

fn render_section(
    frame: &mut Frame,
    area: Rect,
    view: &DashboardView,
    side: Side,
    columns: usize,
    ctx: &RenderContext,
) {
    let (title, accent) = section_title(side, ctx);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border_default())
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if view.nodes.is_empty() {
        return;
    }

    let rows = view.nodes.len().div_ceil(columns);
    let row_constraints = vec![Constraint::Ratio(1, rows.max(1) as u32); rows];
    let row_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(row_constraints)
        .split(inner);

    for (row_index, row_area) in row_chunks.iter().enumerate() {
        let col_constraints = vec![Constraint::Ratio(1, columns.max(1) as u32); columns];
        let col_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(col_constraints)
            .split(*row_area);

        for (col_index, cell) in col_chunks.iter().enumerate() {
            let index = row_index * columns + col_index;
            if let Some(node) = view.nodes.get(index) {
                render_card(frame, *cell, node, side, ctx);
            }
        }
    }
}

/// Whether this side of the card is the load balancer's current target.
fn is_targeted(side: Side, routing: RoutingTarget) -> bool {
    matches!(
        (side, routing),
        (Side::Production, RoutingTarget::Production) | (Side::Disaster, RoutingTarget::Disaster)
    )
}

fn probe_span<'a>(label: &'a str, up: bool) -> Vec<Span<'a>> {
    let dot = if up {
        Span::styled("●", Style::default().fg(theme::SUCCESS_GREEN))
    } else {
        Span::styled("○", Style::default().fg(theme::ERROR_RED))
    };
    vec![dot, Span::raw(" "), Span::styled(label, theme::dim_style())]
}

fn render_card(frame: &mut Frame, area: Rect, node: &NodeView, side: Side, ctx: &RenderContext) {
    let side_view = match side {
        Side::Production => &node.production,
        Side::Disaster => &node.disaster,
    };
    let tr = ctx.translations;
    let class_color = theme::health_color(side_view.status.class);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(class_color))
        .title(Span::styled(
            format!(" {} ", node.name),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut probes = Vec::new();
    probes.extend(probe_span(tr.t("pingLabel"), side_view.alive));
    probes.push(Span::raw("  "));
    probes.extend(probe_span(tr.t("portLabel"), side_view.port_alive));
    probes.push(Span::raw("  "));
    probes.extend(probe_span(tr.t("dbConnectLabel"), side_view.db_connect));

    let mut status_line = vec![Span::styled(
        tr.t(&side_view.status.label).to_owned(),
        Style::default().fg(class_color).add_modifier(Modifier::BOLD),
    )];
    if is_targeted(side, node.routing) {
        status_line.push(Span::raw("  "));
        status_line.push(Span::styled(
            "⇐ LB",
            Style::default().fg(theme::routing_color(node.routing)),
        ));
    }

    let mut lines = vec![
        Line::from(vec![
            Span::styled(side_view.ip.clone(), theme::dim_style()),
            Span::raw("  "),
            Span::raw(format!(
                "{}: {}",
                tr.t("roleLabel"),
                tr.t(&side_view.status.role)
            )),
        ]),
        Line::from(probes),
        Line::from(status_line),
    ];
    lines.push(gauge_line(node, side, ctx));

    frame.render_widget(Paragraph::new(lines), inner);
}

/// The per-side cosmetic gauge: connection count on a replicating
/// production card, apply lag on a live disaster card, blank otherwise.
fn gauge_line<'a>(node: &NodeView, side: Side, ctx: &'a RenderContext) -> Line<'a> {
    let tr = ctx.translations;
    match side {
        Side::Production if node.replicating => match node.connections {
            Some(count) => {
                let severity = drdash_core::status::connections_severity(count);
                Line::from(vec![
                    Span::styled(format!("{} ", tr.t("connectionsLabel")), theme::dim_style()),
                    Span::styled(
                        count.to_string(),
                        Style::default().fg(theme::severity_color(severity)),
                    ),
                ])
            }
            None => Line::from(Span::styled(
                format!("{} —", tr.t("connectionsLabel")),
                theme::dim_style(),
            )),
        },
        Side::Disaster if node.disaster.alive => match node.delay_seconds {
            Some(secs) => {
                let severity = drdash_core::status::delay_severity(secs);
                Line::from(vec![
                    Span::styled(format!("{}: ", tr.t("delayLabel")), theme::dim_style()),
                    Span::styled(
                        format!("{secs}s"),
                        Style::default().fg(theme::severity_color(severity)),
                    ),
                ])
            }
            None => Line::from(Span::styled(
                format!("{}: —", tr.t("delayLabel")),
                theme::dim_style(),
            )),
        },
        _ => Line::from(""),
    }
}

// ── Load balancer strip ─────────────────────────────────────────────

/// Translation key for a routing target.
fn target_key(target: RoutingTarget) -> &'static str {
    match target {
        RoutingTarget::Production => "targetProd",
        RoutingTarget::Disaster => "targetDR",
        RoutingTarget::Offline => "targetOffline",
    }
}

fn render_lb_strip(frame: &mut Frame, area: Rect, view: &DashboardView, ctx: &RenderContext) {
    if view.nodes.is_empty() {
        return;
    }

    let count = u32::try_from(view.nodes.len()).unwrap_or(1);
    let constraints = vec![Constraint::Ratio(1, count); view.nodes.len()];
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (node, cell) in view.nodes.iter().zip(chunks.iter()) {
        let accent = theme::routing_color(node.routing);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .title(Span::styled(
                format!(" {} ", node.name),
                Style::default().fg(accent),
            ));
        let inner = block.inner(*cell);
        frame.render_widget(block, *cell);

        let mut spans = vec![
            Span::styled(
                ctx.translations.t(target_key(node.routing)).to_owned(),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(node.load_balancer.ip.clone(), theme::dim_style()),
            Span::raw("  "),
        ];
        spans.extend(probe_span("", node.load_balancer.alive));
        spans.extend(probe_span("", node.load_balancer.port_alive));
        spans.extend(probe_span("", node.load_balancer.db_connect));

        frame.render_widget(Paragraph::new(Line::from(spans)), inner);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn targeting_matches_side() {
        assert!(is_targeted(Side::Production, RoutingTarget::Production));
        assert!(is_targeted(Side::Disaster, RoutingTarget::Disaster));
        assert!(!is_targeted(Side::Production, RoutingTarget::Disaster));
        assert!(!is_targeted(Side::Disaster, RoutingTarget::Offline));
    }

    #[test]
    fn target_keys_are_stable() {
        assert_eq!(target_key(RoutingTarget::Production), "targetProd");
        assert_eq!(target_key(RoutingTarget::Disaster), "targetDR");
        assert_eq!(target_key(RoutingTarget::Offline), "targetOffline");
    }
}
