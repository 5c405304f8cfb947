//! Dashboard backend API client
//!
//! Implements the three backend routes the page talks to:
//! - `GET /data` for the poll snapshot
//! - `POST /start_bot` and `POST /stop_bot` for bot control
//!
//! Plain JSON over HTTP; the browser session cookie carries authentication.

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use reqwest::StatusCode;

use crate::config::Config;
use crate::error::Result;
use crate::types::{ActionReply, BotAction, Snapshot};

/// Outcome of a snapshot request
#[derive(Debug, Clone)]
pub enum SnapshotFetch {
    /// Session missing or expired; the page must go to the login screen
    Unauthorized,
    Snapshot(Box<Snapshot>),
}

/// Backend calls made by the dashboard
///
/// Futures are not `Send`: everything runs on the browser's single event loop.
pub trait DashboardApi {
    fn fetch_snapshot(&self) -> LocalBoxFuture<'_, Result<SnapshotFetch>>;
    fn post_action(&self, action: BotAction) -> LocalBoxFuture<'_, Result<ActionReply>>;
}

/// reqwest-backed implementation (uses `fetch()` on wasm32)
pub struct HttpApi {
    client: reqwest::Client,
    data_url: String,
    start_url: String,
    stop_url: String,
}

impl HttpApi {
    /// Create a client for the routes in `config`, resolved against `origin`
    ///
    /// `origin` is used when `config.api_base` is empty.
    pub fn new(config: &Config, origin: &str) -> Self {
        let base = if config.api_base.is_empty() {
            origin.trim_end_matches('/').to_string()
        } else {
            config.api_base.clone()
        };
        Self {
            client: reqwest::Client::new(),
            data_url: format!("{base}{}", config.data_path),
            start_url: format!("{base}{}", config.start_path),
            stop_url: format!("{base}{}", config.stop_path),
        }
    }

    fn action_url(&self, action: BotAction) -> &str {
        match action {
            BotAction::Start => &self.start_url,
            BotAction::Stop => &self.stop_url,
        }
    }

    async fn get_snapshot(&self) -> Result<SnapshotFetch> {
        let response = self.client.get(&self.data_url).send().await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Ok(SnapshotFetch::Unauthorized);
        }

        // Body is decoded regardless of status, like the page always did
        let body = response.text().await?;
        let snapshot: Snapshot = serde_json::from_str(&body)?;
        Ok(SnapshotFetch::Snapshot(Box::new(snapshot)))
    }

    async fn post(&self, action: BotAction) -> Result<ActionReply> {
        let response = self.client.post(self.action_url(action)).send().await?;
        let status = response.status();
        let body = response.text().await?;

        // Business failures come back as 4xx/5xx with a JSON reply
        let reply: ActionReply = serde_json::from_str(&body)?;
        if !status.is_success() {
            tracing::debug!(%action, %status, "bot action rejected by backend");
        }
        Ok(reply)
    }
}

impl DashboardApi for HttpApi {
    fn fetch_snapshot(&self) -> LocalBoxFuture<'_, Result<SnapshotFetch>> {
        self.get_snapshot().boxed_local()
    }

    fn post_action(&self, action: BotAction) -> LocalBoxFuture<'_, Result<ActionReply>> {
        self.post(action).boxed_local()
    }
}
