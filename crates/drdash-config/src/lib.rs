//! Shared configuration for the drdash dashboard.
//!
//! TOML file + `DRDASH_*` environment overrides, resolved through
//! figment, and translation into `drdash-core` policy/layout types.
//! The core crates never read config files -- the TUI loads a `Config`
//! here and hands the translated pieces in.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use drdash_core::{LayoutConstraints, RefreshPolicy, RefreshSlot};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Dashboard backend base URL. May carry a sub-path for reverse
    /// proxy setups (e.g. `https://ops.example.com/drdash/`).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub frontend: FrontendSettings,

    #[serde(default)]
    pub layout: LayoutSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            frontend: FrontendSettings::default(),
            layout: LayoutSettings::default(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080/".into()
}

/// Refresh cadence and display settings consumed by the client.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FrontendSettings {
    /// Load-balancer IP shown in the header.
    #[serde(default)]
    pub load_balancer_ip: String,

    /// Fallback poll interval when no refresh slot matches.
    /// Values <= 0 fall back to ten minutes.
    #[serde(default = "default_interval_ms")]
    pub default_interval_ms: i64,

    /// Time-of-day poll intervals, evaluated in order, first match wins.
    #[serde(default)]
    pub refresh_intervals: Vec<SlotConfig>,
}

impl Default for FrontendSettings {
    fn default() -> Self {
        Self {
            load_balancer_ip: String::new(),
            default_interval_ms: default_interval_ms(),
            refresh_intervals: Vec::new(),
        }
    }
}

fn default_interval_ms() -> i64 {
    600_000
}

/// One time-of-day refresh slot.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SlotConfig {
    pub start_hour: u32,
    pub end_hour: u32,
    pub interval_ms: u64,
}

/// Grid sizing, in terminal cells.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LayoutSettings {
    /// Preferred column count before viewport fitting kicks in.
    /// Values <= 0 fall back to 2.
    #[serde(default = "default_columns")]
    pub columns: i64,

    /// Minimum card size a grid cell may shrink to.
    #[serde(default = "default_min_card_width")]
    pub min_card_width: u32,
    #[serde(default = "default_min_card_height")]
    pub min_card_height: u32,

    /// Rows reserved for the header and load-balancer strip.
    #[serde(default = "default_reserved_chrome")]
    pub reserved_chrome: u32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            min_card_width: default_min_card_width(),
            min_card_height: default_min_card_height(),
            reserved_chrome: default_reserved_chrome(),
        }
    }
}

fn default_columns() -> i64 {
    2
}
fn default_min_card_width() -> u32 {
    40
}
fn default_min_card_height() -> u32 {
    10
}
fn default_reserved_chrome() -> u32 {
    7
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "goodwaysit", "drdash").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("drdash");
    p
}

// ── Config loading ──────────────────────────────────────────────────

fn figment_for(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("DRDASH_").split("__"))
}

/// Load configuration from an explicit file path plus environment.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    Ok(figment_for(path).extract()?)
}

/// Load configuration from the canonical path plus environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_from(&config_path())
}

// ── Translation into core types ─────────────────────────────────────

impl Config {
    /// The backend base URL, validated.
    pub fn backend_url(&self) -> Result<Url, ConfigError> {
        self.base_url.parse().map_err(|_| ConfigError::Validation {
            field: "base_url".into(),
            reason: format!("invalid URL: {}", self.base_url),
        })
    }
}

impl FrontendSettings {
    /// Build the core refresh policy. Non-positive defaults fall back
    /// to ten minutes, matching the backend's own config handling.
    pub fn refresh_policy(&self) -> RefreshPolicy {
        let default_ms = if self.default_interval_ms > 0 {
            u64::try_from(self.default_interval_ms).unwrap_or(600_000)
        } else {
            600_000
        };
        RefreshPolicy {
            slots: self
                .refresh_intervals
                .iter()
                .map(|slot| RefreshSlot {
                    start_hour: slot.start_hour,
                    end_hour: slot.end_hour,
                    interval: Duration::from_millis(slot.interval_ms),
                })
                .collect(),
            default_interval: Duration::from_millis(default_ms),
        }
    }
}

impl LayoutSettings {
    /// Layout constraints for the given viewport, in terminal cells.
    pub fn constraints(&self, viewport_width: u32, viewport_height: u32) -> LayoutConstraints {
        LayoutConstraints {
            viewport_width,
            viewport_height,
            min_card_width: self.min_card_width,
            min_card_height: self.min_card_height,
            reserved_chrome: self.reserved_chrome,
        }
    }

    /// The configured column preference. Anything non-positive means 2.
    pub fn preferred_columns(&self) -> u32 {
        if self.columns > 0 {
            u32::try_from(self.columns).unwrap_or(2)
        } else {
            2
        }
    }
}
