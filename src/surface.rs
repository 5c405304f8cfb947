//! Seams between the dashboard logic and the browser
//!
//! Components receive these handles at construction instead of looking the
//! document up globally, so tests can substitute in-memory fakes.

use crate::error::Result;

/// Element ids and classes the client reads or writes
pub mod ids {
    pub const STATUS_MESSAGE: &str = "status-message";
    pub const USDT_BALANCE: &str = "usdt-balance";
    pub const NEXT_CYCLE_TIME: &str = "next-cycle-time";
    pub const PORTFOLIO_LIST: &str = "portfolio-list";
    pub const HISTORY_LIST: &str = "history-list";
    pub const WELCOME_SECTION: &str = "welcome-section";
    pub const WELCOME_TEXT: &str = "welcome-text";
    pub const DASHBOARD_CONTENT: &str = "dashboard-content";
    pub const START_BOT_BTN: &str = "start-bot-btn";
    pub const STOP_BOT_BTN: &str = "stop-bot-btn";
    pub const PORTFOLIO_CHART: &str = "portfolioChart";

    /// Class marking sections that fade in on scroll
    pub const SECTION_REVEAL: &str = "section-reveal";
    /// Class added once a section has entered the viewport
    pub const REVEALED: &str = "revealed";

    pub const ALL: [&str; 11] = [
        STATUS_MESSAGE,
        USDT_BALANCE,
        NEXT_CYCLE_TIME,
        PORTFOLIO_LIST,
        HISTORY_LIST,
        WELCOME_SECTION,
        WELCOME_TEXT,
        DASHBOARD_CONTENT,
        START_BOT_BTN,
        STOP_BOT_BTN,
        PORTFOLIO_CHART,
    ];
}

/// Where `insert_html` places a fragment relative to the target's children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    /// Before the first child
    AfterBegin,
    /// After the last child
    BeforeEnd,
}

impl InsertPosition {
    pub fn as_str(self) -> &'static str {
        match self {
            InsertPosition::AfterBegin => "afterbegin",
            InsertPosition::BeforeEnd => "beforeend",
        }
    }
}

/// Text and markup writes against elements addressed by id
pub trait DomSurface {
    fn set_text(&self, id: &str, text: &str) -> Result<()>;
    fn set_html(&self, id: &str, html: &str) -> Result<()>;
    fn insert_html(&self, id: &str, position: InsertPosition, html: &str) -> Result<()>;
}

/// Top-level navigation of the browsing context
pub trait Navigator {
    fn redirect(&self, location: &str);
}

/// Blocking user-facing alerts
pub trait Notifier {
    fn alert(&self, message: &str);
}
