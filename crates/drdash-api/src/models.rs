//! Wire models for the dashboard backend API.
//!
//! These mirror the backend JSON exactly, sentinels included. The
//! backend reports `-1` for "unknown" on `connections` / `*_dgdelay`
//! and `""` for unknown status/role; `drdash-core` maps those to
//! `None` during conversion. Nothing here is interpreted.

use serde::Deserialize;

/// One monitored database system as reported by `GET /api/data`:
/// a production instance, its disaster-recovery standby, and the
/// load-balancer probe in front of the pair.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DatabaseStatus {
    pub name: String,

    // ── Load balancer probe ─────────────────────────────────────────
    pub load_balancer_ip: String,
    pub load_balancer_alive: bool,
    pub load_balancer_port_1521: bool,
    pub load_balancer_db_connect: bool,

    /// Business connection count on the primary. `-1` = unknown.
    pub connections: i64,

    // ── Production instance ─────────────────────────────────────────
    pub production_ip: String,
    pub production_alive: bool,
    pub production_port_1521: bool,
    pub production_db_connect: bool,
    pub production_status: String,
    pub production_role: String,
    /// Data Guard lag in seconds. `-1` = unknown.
    pub production_dgdelay: i64,

    // ── Disaster-recovery instance ──────────────────────────────────
    pub disaster_ip: String,
    pub disaster_alive: bool,
    pub disaster_port_1521: bool,
    pub disaster_db_connect: bool,
    pub disaster_status: String,
    pub disaster_role: String,
    /// Data Guard lag in seconds. `-1` = unknown.
    pub disaster_dgdelay: i64,
}

/// Dashboard titles, returned by the mock endpoint alongside the data
/// so screenshots come out fully localized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DashboardTitles {
    pub main_title: String,
    pub prod_data_center: String,
    pub dr_data_center: String,
}

/// The `{ code, data, message }` envelope every data endpoint uses.
///
/// `titles` is only present on the mock endpoint; `code != 200` means
/// the request failed at the application level even when the HTTP
/// status was 200.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiEnvelope {
    pub code: i64,
    #[serde(default)]
    pub data: Option<Vec<DatabaseStatus>>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub titles: Option<DashboardTitles>,
}
