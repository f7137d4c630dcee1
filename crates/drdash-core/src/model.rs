//! Domain model: one monitored database pair and the per-poll snapshot.
//!
//! Unlike the flat wire shape in `drdash-api`, the domain groups each
//! node's signals by side, and unknown values are `None` rather than
//! sentinel `-1` / empty strings. Conversion lives in [`crate::convert`].

use chrono::{DateTime, Utc};

/// Which side of a monitored pair a signal set belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Production,
    Disaster,
}

/// Raw probe results for the load balancer in front of a pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeSignals {
    pub ip: String,
    /// Host answered ping.
    pub alive: bool,
    /// Listener port accepted a TCP connection.
    pub port_alive: bool,
    /// A database session could be established through it.
    pub db_connect: bool,
}

/// Raw probe results plus instance-reported state for one database
/// instance (production or disaster side).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceSignals {
    pub ip: String,
    pub alive: bool,
    pub port_alive: bool,
    pub db_connect: bool,
    /// Open mode as reported by the instance (e.g. `READ WRITE`).
    /// `None` when the instance could not be queried.
    pub status: Option<String>,
    /// Data Guard role as reported by the instance (e.g. `PRIMARY`).
    pub role: Option<String>,
    /// Business connection count. Populated on the production side only.
    pub connections: Option<i64>,
    /// Data Guard apply lag in seconds. Populated on the disaster side only.
    pub delay_seconds: Option<i64>,
}

/// One monitored production/disaster pair plus its load-balancer probe,
/// identified by `name` (unique within a snapshot).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseNode {
    pub name: String,
    pub load_balancer: ProbeSignals,
    pub production: InstanceSignals,
    pub disaster: InstanceSignals,
}

impl DatabaseNode {
    /// The signal set for the given side.
    pub fn side(&self, side: Side) -> &InstanceSignals {
        match side {
            Side::Production => &self.production,
            Side::Disaster => &self.disaster,
        }
    }
}

/// Dashboard titles (main heading plus the two data-center headings).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Titles {
    pub main_title: String,
    pub prod_data_center: String,
    pub dr_data_center: String,
}

/// One immutable poll result across all nodes.
///
/// Node order is render order. A new snapshot fully replaces the
/// previous one -- there is no incremental merge and no history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSnapshot {
    pub nodes: Vec<DatabaseNode>,
    pub captured_at: DateTime<Utc>,
}

impl DashboardSnapshot {
    pub fn new(nodes: Vec<DatabaseNode>) -> Self {
        Self {
            nodes,
            captured_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
