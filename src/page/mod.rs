//! Page shell - the HTML document that hosts the dashboard client
//!
//! Served by the backend at `/`. Separated into HTML, CSS, and JS submodules for
//! maintainability.
//!
//! # Architecture
//! - `html.rs`: Hero section, controls, cards, chart canvas, lists
//! - `css.rs`: Layout, card utilities, reveal transitions
//! - `js.rs`: Client configuration globals and the wasm bootstrap
//!
//! Every element id the client touches is defined in `surface::ids` and must be
//! present in the template.

mod css;
mod html;
mod js;

use crate::config::Config;

/// Chart.js build loaded before the wasm module
pub const CHART_JS_URL: &str = "https://cdn.jsdelivr.net/npm/chart.js@4.4.1/dist/chart.umd.min.js";

/// Generate the complete dashboard HTML page
///
/// `package_url` is the wasm-bindgen JS glue produced for this crate
/// (e.g. `/static/pkg/bot_dashboard.js`).
pub fn page_html(config: &Config, package_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Trading Bot Dashboard</title>
    <style>
{css}
    </style>
    <script src="{chart_js}"></script>
</head>
<body>
{html}
    <script type="module">
{js}
    </script>
</body>
</html>"#,
        css = css::STYLES,
        chart_js = CHART_JS_URL,
        html = html::TEMPLATE,
        js = js::bootstrap(config, package_url),
    )
}
