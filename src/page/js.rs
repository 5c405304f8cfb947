//! Dashboard bootstrap script
//!
//! Publishes the client configuration as `DASHBOARD_*` globals (read back by
//! `Config::from_source` inside the wasm module) and loads the module.

use crate::config::{Config, DisplayZone};

/// Module script body for the page shell
pub fn bootstrap(config: &Config, package_url: &str) -> String {
    let zone = match config.time_zone {
        DisplayZone::Local => "local",
        DisplayZone::Utc => "utc",
    };
    let globals = [
        ("DASHBOARD_API_BASE", config.api_base.clone()),
        ("DASHBOARD_POLL_INTERVAL_MS", config.poll_interval_ms.to_string()),
        ("DASHBOARD_DATA_PATH", config.data_path.clone()),
        ("DASHBOARD_START_PATH", config.start_path.clone()),
        ("DASHBOARD_STOP_PATH", config.stop_path.clone()),
        ("DASHBOARD_LOGIN_PATH", config.login_path.clone()),
        ("DASHBOARD_CASH_SYMBOL", config.cash_symbol.clone()),
        ("DASHBOARD_QUOTE_SUFFIX", config.quote_suffix.clone()),
        ("DASHBOARD_REVEAL_OFFSET_PX", config.reveal_offset_px.to_string()),
        ("DASHBOARD_TIME_ZONE", zone.to_string()),
        ("DASHBOARD_LOG_LEVEL", config.log_level.clone()),
    ];

    let mut script = String::new();
    for (key, value) in globals {
        script.push_str(&format!("globalThis.{key} = {};\n", js_string(&value)));
    }
    let package = js_string(package_url);
    script.push_str(&format!("import({package}).then((m) => m.default());\n"));
    script
}

/// JS string literal that is also safe inside an inline `<script>`
fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string())
        .to_string()
        .replace("</", "<\\/")
}
