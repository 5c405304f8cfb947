//! Bot Dashboard - browser client for a remote trading bot
//!
//! Compiled to WebAssembly and loaded by the dashboard page.
//!
//! # Architecture
//! - A poller refreshes the page from `/data` every few seconds
//! - The renderer turns each snapshot into DOM text and markup
//! - A Chart.js doughnut tracks the aggregate portfolio value
//! - Scroll handling fades the hero and reveals sections
//! - Start/stop buttons post bot actions and report the reply
//!
//! Browser APIs sit behind small traits (`DomSurface`, `ChartBackend`,
//! `ScrollSurface`, `Timer`, ...) so everything above the bindings runs and is
//! tested natively.

// Clippy configuration for dashboard code patterns
#![allow(clippy::cast_precision_loss)] // Float casts OK for display
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::doc_markdown)] // Doc style flexibility
#![allow(clippy::if_not_else)] // Readability preference
#![allow(clippy::map_unwrap_or)] // Explicit fallback preference
#![allow(clippy::manual_clamp)] // Explicit NaN handling in display code

mod actions;
mod chart;
mod client;
mod config;
mod dashboard;
mod error;
mod format;
mod page;
mod poller;
mod render;
mod scroll;
mod surface;
mod telemetry;
mod types;

#[cfg(test)]
mod testing;

#[cfg(target_arch = "wasm32")]
mod web;

pub use actions::{ActionBridge, ActionOutcome};
pub use chart::{ChartAdapter, ChartBackend, ChartConfig, ChartHandle};
pub use client::{DashboardApi, HttpApi, SnapshotFetch};
pub use config::{Config, ConfigSource, DisplayZone};
pub use dashboard::{CycleOutcome, DashboardClient};
pub use error::{DashboardError, Result};
pub use page::page_html;
pub use poller::{PollHandle, Poller, Timer};
pub use render::{DashboardView, PortfolioCard, Renderer};
pub use scroll::{ScrollAnimator, ScrollFrame, ScrollGeometry, ScrollSurface};
pub use surface::{DomSurface, InsertPosition, Navigator, Notifier};
pub use telemetry::init_tracing;
pub use types::*;
