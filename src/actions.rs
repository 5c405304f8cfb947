//! Start/stop buttons for the remote bot
//!
//! Each click shows a pending message, posts the action, and reflects the reply in
//! the status line. Failures also raise a blocking alert. Clicks are not
//! de-duplicated and nothing is retried.

use std::rc::Rc;

use crate::client::DashboardApi;
use crate::error::Result;
use crate::surface::{DomSurface, Notifier, ids};
use crate::types::{ActionReply, BotAction};

pub const COMMUNICATION_ERROR: &str = "Server communication error.";

impl BotAction {
    /// Status text shown while the request is in flight
    pub fn pending_message(self) -> &'static str {
        match self {
            BotAction::Start => "Starting bot... Please wait.",
            BotAction::Stop => "Stopping bot...",
        }
    }

    /// Status text for a reply whose status is not `success`
    pub fn failure_status(self, message: &str) -> String {
        match self {
            BotAction::Start => format!("Error starting bot: {message}"),
            BotAction::Stop => format!("Error stopping bot: {message}"),
        }
    }

    /// Alert text when the backend could not be reached or answered garbage
    pub fn communication_alert(self) -> &'static str {
        match self {
            BotAction::Start => "Server communication error while starting the bot.",
            BotAction::Stop => "Server communication error while stopping the bot.",
        }
    }
}

/// How a button click ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Succeeded { message: String },
    Rejected { message: String },
    Unreachable,
}

/// Wires bot control requests to the status line and alerts
pub struct ActionBridge {
    api: Rc<dyn DashboardApi>,
    dom: Rc<dyn DomSurface>,
    notifier: Rc<dyn Notifier>,
}

impl ActionBridge {
    pub fn new(api: Rc<dyn DashboardApi>, dom: Rc<dyn DomSurface>, notifier: Rc<dyn Notifier>) -> Self {
        Self { api, dom, notifier }
    }

    pub async fn start_bot(&self) -> Result<ActionOutcome> {
        self.run(BotAction::Start).await
    }

    pub async fn stop_bot(&self) -> Result<ActionOutcome> {
        self.run(BotAction::Stop).await
    }

    /// Errors returned here are DOM failures; backend failures are outcomes
    pub async fn run(&self, action: BotAction) -> Result<ActionOutcome> {
        self.dom.set_text(ids::STATUS_MESSAGE, action.pending_message())?;

        match self.api.post_action(action).await {
            Ok(reply) => self.reflect(action, reply),
            Err(e) => {
                tracing::error!(%action, error = %e, "bot action request failed");
                self.dom.set_text(ids::STATUS_MESSAGE, COMMUNICATION_ERROR)?;
                self.notifier.alert(action.communication_alert());
                Ok(ActionOutcome::Unreachable)
            }
        }
    }

    fn reflect(&self, action: BotAction, reply: ActionReply) -> Result<ActionOutcome> {
        if reply.is_success() {
            tracing::info!(%action, message = %reply.message, "bot action accepted");
            self.dom.set_text(ids::STATUS_MESSAGE, &reply.message)?;
            return Ok(ActionOutcome::Succeeded { message: reply.message });
        }

        tracing::warn!(%action, status = %reply.status, message = %reply.message, "bot action rejected");
        self.dom.set_text(ids::STATUS_MESSAGE, &action.failure_status(&reply.message))?;
        self.notifier.alert(&format!("Error: {}", reply.message));
        Ok(ActionOutcome::Rejected { message: reply.message })
    }
}
