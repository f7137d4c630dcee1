// drdash-core: Status derivation, adaptive refresh, and layout fitting
// between drdash-api and consumers (the TUI).

pub mod controller;
pub mod convert;
pub mod error;
pub mod layout;
pub mod model;
pub mod schedule;
pub mod status;

// ── Primary re-exports ──────────────────────────────────────────────
pub use controller::{Controller, DashboardState, DashboardView, PollMode};
pub use error::CoreError;
pub use layout::{GridGeometry, LayoutConstraints};
pub use schedule::{RefreshPolicy, RefreshScheduler, RefreshSlot};
pub use status::{HealthClass, NodeView, RoutingTarget, Severity, SideStatus};

// Re-export model types at the crate root for ergonomics.
pub use model::{DashboardSnapshot, DatabaseNode, InstanceSignals, ProbeSignals, Side, Titles};
