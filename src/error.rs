//! Error types for the dashboard client
//!
//! Uses thiserror for ergonomic error definitions.
//! Every failure is reported as a value; the poll loop and the page always survive.

use thiserror::Error;

/// Custom Result type using our Error
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Dashboard client errors
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Missing or unusable DOM element
    #[error("DOM error: {0}")]
    Dom(String),

    /// Chart widget errors
    #[error("Chart error: {0}")]
    Chart(String),

    /// Logging setup errors
    #[error("Telemetry error: {0}")]
    Telemetry(String),
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        DashboardError::Http(err.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for DashboardError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        DashboardError::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}
