//! Configuration management for the dashboard client

use std::collections::HashMap;
use std::time::Duration;

use crate::error::{DashboardError, Result};

/// Key/value source for configuration overrides
///
/// In the browser this reads `globalThis.DASHBOARD_*`; tests use a `HashMap`.
pub trait ConfigSource {
    fn var(&self, key: &str) -> Option<String>;
}

impl ConfigSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Time zone used when formatting timestamps for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayZone {
    /// Browser local time
    #[default]
    Local,
    Utc,
}

impl DisplayZone {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "local" => Some(Self::Local),
            "utc" => Some(Self::Utc),
            _ => None,
        }
    }
}

/// Dashboard client configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Origin prefix for backend requests ("" = page origin)
    pub api_base: String,

    /// Poll period for the snapshot endpoint
    pub poll_interval_ms: u64,

    /// Backend routes
    pub data_path: String,
    pub start_path: String,
    pub stop_path: String,
    pub login_path: String,

    /// Pseudo-asset holding uninvested balance (valued at its amount)
    pub cash_symbol: String,
    /// Quote currency suffix stripped from pair symbols for display
    pub quote_suffix: String,

    /// Distance from the viewport bottom at which sections reveal
    pub reveal_offset_px: f64,

    pub time_zone: DisplayZone,

    /// Log level
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            poll_interval_ms: 5000,
            data_path: "/data".to_string(),
            start_path: "/start_bot".to_string(),
            stop_path: "/stop_bot".to_string(),
            login_path: "/login".to_string(),
            cash_symbol: "USDT".to_string(),
            quote_suffix: "USDT".to_string(),
            reveal_offset_px: 100.0,
            time_zone: DisplayZone::Local,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration, overriding defaults with `DASHBOARD_*` keys
    pub fn from_source(source: &impl ConfigSource) -> Self {
        let defaults = Self::default();
        let text = |key: &str, fallback: String| source.var(key).unwrap_or(fallback);

        Self {
            api_base: text("DASHBOARD_API_BASE", defaults.api_base)
                .trim_end_matches('/')
                .to_string(),

            poll_interval_ms: source
                .var("DASHBOARD_POLL_INTERVAL_MS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.poll_interval_ms),

            data_path: text("DASHBOARD_DATA_PATH", defaults.data_path),
            start_path: text("DASHBOARD_START_PATH", defaults.start_path),
            stop_path: text("DASHBOARD_STOP_PATH", defaults.stop_path),
            login_path: text("DASHBOARD_LOGIN_PATH", defaults.login_path),

            cash_symbol: text("DASHBOARD_CASH_SYMBOL", defaults.cash_symbol),
            quote_suffix: text("DASHBOARD_QUOTE_SUFFIX", defaults.quote_suffix),

            reveal_offset_px: source
                .var("DASHBOARD_REVEAL_OFFSET_PX")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.reveal_offset_px),

            time_zone: source
                .var("DASHBOARD_TIME_ZONE")
                .and_then(|v| DisplayZone::parse(&v))
                .unwrap_or(defaults.time_zone),

            log_level: text("DASHBOARD_LOG_LEVEL", defaults.log_level),
        }
    }

    /// Poll period as a `Duration`
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_ms == 0 {
            return Err(DashboardError::Config("poll_interval_ms must be positive".into()));
        }
        if !self.reveal_offset_px.is_finite() || self.reveal_offset_px < 0.0 {
            return Err(DashboardError::Config(
                "reveal_offset_px must be a non-negative number".into(),
            ));
        }
        for (name, path) in [
            ("data_path", &self.data_path),
            ("start_path", &self.start_path),
            ("stop_path", &self.stop_path),
            ("login_path", &self.login_path),
        ] {
            if !path.starts_with('/') {
                return Err(DashboardError::Config(format!("{name} must start with '/'")));
            }
        }
        if self.cash_symbol.is_empty() {
            return Err(DashboardError::Config("cash_symbol must not be empty".into()));
        }
        Ok(())
    }
}
