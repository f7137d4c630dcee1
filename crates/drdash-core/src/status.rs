//! Status aggregation: raw per-node booleans in, health and routing out.
//!
//! Everything in this module is a pure, total function over a
//! [`DatabaseNode`]. The controller runs these once per poll cycle;
//! running them again on the same snapshot yields identical output.

use crate::model::{DatabaseNode, ProbeSignals, Side};

/// The role string an instance reports when it is the Data Guard primary.
/// Routing matches this exactly and case-sensitively -- it is independent
/// of the display-role fallback in [`derive_side`].
const PRIMARY_ROLE: &str = "PRIMARY";

/// Lag at or below this is nominal.
const DELAY_NOMINAL_MAX_SECS: i64 = 5;
/// Lag at or below this (but above nominal) is degraded; beyond is critical.
const DELAY_DEGRADED_MAX_SECS: i64 = 60;

// ── Aggregated types ────────────────────────────────────────────────

/// Aggregated health of one side of a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthClass {
    Online,
    Warning,
    Offline,
}

/// Severity of a cosmetic gauge (replication lag, connection count).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Nominal,
    Degraded,
    Critical,
}

/// Which side the load balancer is currently directing traffic to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingTarget {
    Production,
    Disaster,
    Offline,
}

/// Display status for one side: resolved label, resolved role, and the
/// aggregated health class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideStatus {
    pub label: String,
    pub role: String,
    pub class: HealthClass,
}

// ── Side status derivation ──────────────────────────────────────────

/// Derive the display status for one side of a node.
///
/// Label falls back to `OK`/`Offline` from the ping probe when the
/// instance reported nothing; role falls back to the side's natural
/// role. The health class is a fixed-precedence truth table:
///
/// - all three probes up: `Online`, unless the resolved label is
///   literally `Warning`, which demotes it;
/// - ping or port up (db_connect alone does not count): `Warning`;
/// - otherwise `Offline`.
pub fn derive_side(node: &DatabaseNode, side: Side) -> SideStatus {
    let signals = node.side(side);

    let label = signals.status.clone().unwrap_or_else(|| {
        if signals.alive { "OK" } else { "Offline" }.to_owned()
    });

    let role = signals.role.clone().unwrap_or_else(|| {
        match side {
            Side::Production => "Primary",
            Side::Disaster => "Standby",
        }
        .to_owned()
    });

    let class = if signals.alive && signals.port_alive && signals.db_connect {
        if label == "Warning" {
            HealthClass::Warning
        } else {
            HealthClass::Online
        }
    } else if signals.alive || signals.port_alive {
        HealthClass::Warning
    } else {
        HealthClass::Offline
    };

    SideStatus { label, role, class }
}

// ── Routing derivation ──────────────────────────────────────────────

/// Determine which side the load balancer is directing traffic to.
///
/// Evaluated in strict order, first match wins:
/// 1. load balancer down -> `Offline`
/// 2. production alive and reporting role `PRIMARY` -> `Production`
/// 3. disaster alive and reporting role `PRIMARY` -> `Disaster`
/// 4. otherwise `Offline`
pub fn routing_target(node: &DatabaseNode) -> RoutingTarget {
    if !node.load_balancer.alive {
        return RoutingTarget::Offline;
    }
    if node.production.alive && node.production.role.as_deref() == Some(PRIMARY_ROLE) {
        RoutingTarget::Production
    } else if node.disaster.alive && node.disaster.role.as_deref() == Some(PRIMARY_ROLE) {
        RoutingTarget::Disaster
    } else {
        RoutingTarget::Offline
    }
}

// ── Cosmetic gauges ─────────────────────────────────────────────────

/// A node is replicating when both sides answer ping. Gates whether the
/// connection-count indicator is shown at all.
pub fn replicating(node: &DatabaseNode) -> bool {
    node.production.alive && node.disaster.alive
}

/// Severity of the Data Guard apply lag.
pub fn delay_severity(delay_seconds: i64) -> Severity {
    if delay_seconds <= DELAY_NOMINAL_MAX_SECS {
        Severity::Nominal
    } else if delay_seconds <= DELAY_DEGRADED_MAX_SECS {
        Severity::Degraded
    } else {
        Severity::Critical
    }
}

/// Severity of the business connection count on the primary.
pub fn connections_severity(connections: i64) -> Severity {
    if connections < 1 {
        Severity::Critical
    } else {
        Severity::Nominal
    }
}

// ── Per-node aggregation ────────────────────────────────────────────

/// Render-ready aggregation of one side: the raw probe dots plus the
/// derived [`SideStatus`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideView {
    pub ip: String,
    pub alive: bool,
    pub port_alive: bool,
    pub db_connect: bool,
    pub status: SideStatus,
}

/// Render-ready aggregation of one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeView {
    pub name: String,
    pub production: SideView,
    pub disaster: SideView,
    pub load_balancer: ProbeSignals,
    pub routing: RoutingTarget,
    pub replicating: bool,
    /// Primary connection count; rendered only while replicating.
    pub connections: Option<i64>,
    /// Apply lag; rendered only while the disaster side is alive.
    pub delay_seconds: Option<i64>,
}

fn side_view(node: &DatabaseNode, side: Side) -> SideView {
    let signals = node.side(side);
    SideView {
        ip: signals.ip.clone(),
        alive: signals.alive,
        port_alive: signals.port_alive,
        db_connect: signals.db_connect,
        status: derive_side(node, side),
    }
}

/// Aggregate one node into its render-ready view.
pub fn aggregate_node(node: &DatabaseNode) -> NodeView {
    NodeView {
        name: node.name.clone(),
        production: side_view(node, Side::Production),
        disaster: side_view(node, Side::Disaster),
        load_balancer: node.load_balancer.clone(),
        routing: routing_target(node),
        replicating: replicating(node),
        connections: node.production.connections,
        delay_seconds: node.disaster.delay_seconds,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::InstanceSignals;

    fn instance(alive: bool, port_alive: bool, db_connect: bool) -> InstanceSignals {
        InstanceSignals {
            ip: "10.0.0.1".into(),
            alive,
            port_alive,
            db_connect,
            status: None,
            role: None,
            connections: None,
            delay_seconds: None,
        }
    }

    fn node(lb_alive: bool, production: InstanceSignals, disaster: InstanceSignals) -> DatabaseNode {
        DatabaseNode {
            name: "CRM".into(),
            load_balancer: ProbeSignals {
                ip: "10.0.0.10".into(),
                alive: lb_alive,
                port_alive: lb_alive,
                db_connect: lb_alive,
            },
            production,
            disaster,
        }
    }

    // ── Side status ──────────────────────────────────────────────────

    #[test]
    fn all_probes_up_is_online() {
        let n = node(true, instance(true, true, true), instance(true, true, true));
        assert_eq!(derive_side(&n, Side::Production).class, HealthClass::Online);
    }

    #[test]
    fn db_connect_down_is_warning() {
        let n = node(true, instance(true, true, false), instance(true, true, true));
        assert_eq!(derive_side(&n, Side::Production).class, HealthClass::Warning);
    }

    #[test]
    fn everything_down_is_offline() {
        let n = node(true, instance(false, false, false), instance(true, true, true));
        assert_eq!(derive_side(&n, Side::Production).class, HealthClass::Offline);
    }

    #[test]
    fn warning_label_demotes_online() {
        let mut prod = instance(true, true, true);
        prod.status = Some("Warning".into());
        let n = node(true, prod, instance(true, true, true));

        let status = derive_side(&n, Side::Production);
        assert_eq!(status.class, HealthClass::Warning);
        assert_eq!(status.label, "Warning");
    }

    #[test]
    fn db_connect_alone_is_still_offline() {
        // Only ping and port participate in the any-up test.
        let n = node(true, instance(false, false, true), instance(true, true, true));
        assert_eq!(derive_side(&n, Side::Production).class, HealthClass::Offline);
    }

    #[test]
    fn port_alone_is_warning() {
        let n = node(true, instance(false, true, false), instance(true, true, true));
        assert_eq!(derive_side(&n, Side::Production).class, HealthClass::Warning);
    }

    #[test]
    fn label_falls_back_to_ping_probe() {
        let n = node(true, instance(true, false, false), instance(false, false, false));
        assert_eq!(derive_side(&n, Side::Production).label, "OK");
        assert_eq!(derive_side(&n, Side::Disaster).label, "Offline");
    }

    #[test]
    fn reported_status_wins_over_fallback() {
        let mut prod = instance(true, true, true);
        prod.status = Some("READ WRITE".into());
        let n = node(true, prod, instance(true, true, true));
        assert_eq!(derive_side(&n, Side::Production).label, "READ WRITE");
    }

    #[test]
    fn role_falls_back_per_side() {
        let n = node(true, instance(true, true, true), instance(true, true, true));
        assert_eq!(derive_side(&n, Side::Production).role, "Primary");
        assert_eq!(derive_side(&n, Side::Disaster).role, "Standby");
    }

    // ── Routing precedence, exhaustively ─────────────────────────────

    #[test]
    fn routing_precedence_table() {
        // Enumerate lb_alive x prod_alive x prod_primary x dr_alive x
        // dr_primary and assert against the precedence rules directly.
        for lb in [false, true] {
            for prod_alive in [false, true] {
                for prod_primary in [false, true] {
                    for dr_alive in [false, true] {
                        for dr_primary in [false, true] {
                            let mut production = instance(prod_alive, prod_alive, prod_alive);
                            production.role =
                                Some(if prod_primary { "PRIMARY" } else { "PHYSICAL STANDBY" }.into());
                            let mut disaster = instance(dr_alive, dr_alive, dr_alive);
                            disaster.role =
                                Some(if dr_primary { "PRIMARY" } else { "PHYSICAL STANDBY" }.into());

                            let n = node(lb, production, disaster);

                            let expected = if !lb {
                                RoutingTarget::Offline
                            } else if prod_alive && prod_primary {
                                RoutingTarget::Production
                            } else if dr_alive && dr_primary {
                                RoutingTarget::Disaster
                            } else {
                                RoutingTarget::Offline
                            };

                            assert_eq!(
                                routing_target(&n),
                                expected,
                                "lb={lb} prod_alive={prod_alive} prod_primary={prod_primary} \
                                 dr_alive={dr_alive} dr_primary={dr_primary}"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn routing_role_match_is_case_sensitive() {
        let mut production = instance(true, true, true);
        production.role = Some("primary".into());
        let n = node(true, production, instance(false, false, false));
        assert_eq!(routing_target(&n), RoutingTarget::Offline);
    }

    #[test]
    fn routing_ignores_display_role_fallback() {
        // No reported role at all: the display falls back to "Primary",
        // but routing must not.
        let n = node(true, instance(true, true, true), instance(false, false, false));
        assert_eq!(derive_side(&n, Side::Production).role, "Primary");
        assert_eq!(routing_target(&n), RoutingTarget::Offline);
    }

    // ── Gauges ───────────────────────────────────────────────────────

    #[test]
    fn delay_thresholds() {
        assert_eq!(delay_severity(0), Severity::Nominal);
        assert_eq!(delay_severity(5), Severity::Nominal);
        assert_eq!(delay_severity(6), Severity::Degraded);
        assert_eq!(delay_severity(60), Severity::Degraded);
        assert_eq!(delay_severity(61), Severity::Critical);
    }

    #[test]
    fn connections_thresholds() {
        assert_eq!(connections_severity(0), Severity::Critical);
        assert_eq!(connections_severity(1), Severity::Nominal);
        assert_eq!(connections_severity(500), Severity::Nominal);
    }

    #[test]
    fn replicating_needs_both_sides_alive() {
        assert!(replicating(&node(
            true,
            instance(true, false, false),
            instance(true, false, false)
        )));
        assert!(!replicating(&node(
            true,
            instance(true, true, true),
            instance(false, false, false)
        )));
    }

    // ── Aggregation idempotence ──────────────────────────────────────

    #[test]
    fn aggregation_is_idempotent() {
        let mut production = instance(true, true, true);
        production.role = Some("PRIMARY".into());
        production.connections = Some(37);
        let mut disaster = instance(true, true, true);
        disaster.delay_seconds = Some(4);
        let n = node(true, production, disaster);

        let first = aggregate_node(&n);
        let second = aggregate_node(&n);
        assert_eq!(first, second);
        assert_eq!(first.routing, RoutingTarget::Production);
        assert!(first.replicating);
        assert_eq!(first.connections, Some(37));
    }
}
