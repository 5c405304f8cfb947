//! Portfolio doughnut chart
//!
//! `ChartAdapter` owns the only chart instance on the page. The widget is built
//! on the first update and mutated in place afterwards; it is never rebuilt.

use serde::Serialize;

use crate::error::Result;
use crate::format;

pub const TOTAL_LABEL: &str = "Total Portfolio";
pub const OTHER_LABEL: &str = "Other Assets";

/// Purple and gray
const PALETTE: [&str; 2] = ["#8B5CF6", "#4B5563"];
const LEGEND_COLOR: &str = "#e2e8f0";

/// Chart.js configuration for the doughnut (tooltip callback is attached by the backend)
#[derive(Debug, Clone, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub data: Vec<f64>,
    pub background_color: Vec<&'static str>,
    pub hover_offset: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub plugins: serde_json::Value,
}

impl ChartConfig {
    pub fn doughnut(labels: Vec<String>, data: Vec<f64>) -> Self {
        Self {
            kind: "doughnut",
            data: ChartData {
                labels,
                datasets: vec![Dataset {
                    data,
                    background_color: PALETTE.to_vec(),
                    hover_offset: 4,
                }],
            },
            options: ChartOptions {
                responsive: true,
                maintain_aspect_ratio: false,
                plugins: serde_json::json!({
                    "legend": { "labels": { "color": LEGEND_COLOR } },
                    "tooltip": { "callbacks": {} }
                }),
            },
        }
    }
}

/// Tooltip text for one slice: `"<label>: <USD amount>"`
pub fn tooltip_label(label: &str, parsed: Option<f64>) -> String {
    let mut text = label.to_string();
    if !text.is_empty() {
        text.push_str(": ");
    }
    if let Some(value) = parsed {
        text.push_str(&format::usd(value));
    }
    text
}

/// A live chart widget
pub trait ChartHandle {
    /// Replace labels and the first dataset's values
    fn set_data(&mut self, labels: &[String], data: &[f64]);
    fn redraw(&mut self);
}

/// Factory for chart widgets (Chart.js in the browser)
pub trait ChartBackend {
    fn create(&self, config: &ChartConfig) -> Result<Box<dyn ChartHandle>>;
}

/// Lazily-built doughnut showing the aggregate portfolio value
pub struct ChartAdapter {
    backend: Box<dyn ChartBackend>,
    chart: Option<Box<dyn ChartHandle>>,
}

impl ChartAdapter {
    pub fn new(backend: Box<dyn ChartBackend>) -> Self {
        Self { backend, chart: None }
    }

    pub fn is_initialized(&self) -> bool {
        self.chart.is_some()
    }

    fn series(total_value: f64) -> (Vec<String>, Vec<f64>) {
        (
            vec![TOTAL_LABEL.to_string(), OTHER_LABEL.to_string()],
            vec![total_value, 0.0],
        )
    }

    /// Build the widget; a no-op once it exists
    pub fn init(&mut self, total_value: f64) -> Result<()> {
        if self.chart.is_some() {
            return Ok(());
        }
        let (labels, data) = Self::series(total_value);
        let chart = self.backend.create(&ChartConfig::doughnut(labels, data))?;
        tracing::debug!(total_value, "portfolio chart created");
        self.chart = Some(chart);
        Ok(())
    }

    /// Show a new total, creating the widget on first use
    pub fn update(&mut self, total_value: f64) -> Result<()> {
        if self.chart.is_none() {
            return self.init(total_value);
        }
        if let Some(chart) = self.chart.as_mut() {
            let (labels, data) = Self::series(total_value);
            chart.set_data(&labels, &data);
            chart.redraw();
        }
        Ok(())
    }
}
