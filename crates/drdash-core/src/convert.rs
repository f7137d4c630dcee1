//! Wire-to-domain conversion.
//!
//! The backend reports unknowns as sentinel values: `-1` for counts and
//! lag, `""` for status and role. The domain model uses `Option` instead,
//! so every downstream consumer resolves "unknown" the same way.

use drdash_api::models::{DashboardTitles, DatabaseStatus};

use crate::model::{DatabaseNode, InstanceSignals, ProbeSignals, Titles};

/// `""` means the backend never got an answer from the instance.
fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

/// `-1` means the backend never got an answer from the instance.
fn non_negative(v: i64) -> Option<i64> {
    if v < 0 { None } else { Some(v) }
}

impl From<DatabaseStatus> for DatabaseNode {
    fn from(status: DatabaseStatus) -> Self {
        Self {
            name: status.name,
            load_balancer: ProbeSignals {
                ip: status.load_balancer_ip,
                alive: status.load_balancer_alive,
                port_alive: status.load_balancer_port_1521,
                db_connect: status.load_balancer_db_connect,
            },
            production: InstanceSignals {
                ip: status.production_ip,
                alive: status.production_alive,
                port_alive: status.production_port_1521,
                db_connect: status.production_db_connect,
                status: non_empty(status.production_status),
                role: non_empty(status.production_role),
                connections: non_negative(status.connections),
                delay_seconds: None,
            },
            disaster: InstanceSignals {
                ip: status.disaster_ip,
                alive: status.disaster_alive,
                port_alive: status.disaster_port_1521,
                db_connect: status.disaster_db_connect,
                status: non_empty(status.disaster_status),
                role: non_empty(status.disaster_role),
                connections: None,
                delay_seconds: non_negative(status.disaster_dgdelay),
            },
        }
    }
}

impl From<DashboardTitles> for Titles {
    fn from(titles: DashboardTitles) -> Self {
        Self {
            main_title: titles.main_title,
            prod_data_center: titles.prod_data_center,
            dr_data_center: titles.dr_data_center,
        }
    }
}
