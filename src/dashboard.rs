//! Poll cycle: fetch, summary, chart, history
//!
//! One `refresh` is one poll cycle. A 401 redirects to the login page before
//! anything is written; every other failure is logged and the page keeps what it
//! showed before.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::Instrument;

use crate::chart::ChartAdapter;
use crate::client::{DashboardApi, SnapshotFetch};
use crate::config::Config;
use crate::error::Result;
use crate::render::Renderer;
use crate::surface::{DomSurface, Navigator};

/// Result of one poll cycle
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// Snapshot rendered; carries the aggregate value sent to the chart
    Rendered { total_value: f64 },
    /// Session expired; the page was sent to the login screen
    Redirected,
    /// Fetch, decode or render failed; the error was logged
    Failed,
}

/// Owns the render path and the chart for one page
pub struct DashboardClient {
    api: Rc<dyn DashboardApi>,
    dom: Rc<dyn DomSurface>,
    navigator: Rc<dyn Navigator>,
    renderer: Renderer,
    chart: RefCell<ChartAdapter>,
    login_path: String,
    cycles: Cell<u64>,
}

impl DashboardClient {
    pub fn new(
        config: &Config,
        api: Rc<dyn DashboardApi>,
        dom: Rc<dyn DomSurface>,
        navigator: Rc<dyn Navigator>,
        chart: ChartAdapter,
    ) -> Self {
        Self {
            api,
            dom,
            navigator,
            renderer: Renderer::new(config),
            chart: RefCell::new(chart),
            login_path: config.login_path.clone(),
            cycles: Cell::new(0),
        }
    }

    /// Number of cycles started so far
    pub fn cycles(&self) -> u64 {
        self.cycles.get()
    }

    pub fn chart_initialized(&self) -> bool {
        self.chart.borrow().is_initialized()
    }

    /// Run one poll cycle; never fails, so the schedule always survives
    pub async fn refresh(&self) -> CycleOutcome {
        let cycle = self.cycles.get() + 1;
        self.cycles.set(cycle);

        let span = tracing::debug_span!("poll_cycle", cycle);
        match self.try_refresh().instrument(span).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(cycle, error = %e, "dashboard refresh failed");
                CycleOutcome::Failed
            }
        }
    }

    async fn try_refresh(&self) -> Result<CycleOutcome> {
        let snapshot = match self.api.fetch_snapshot().await? {
            SnapshotFetch::Unauthorized => {
                tracing::info!(location = %self.login_path, "session expired, redirecting");
                self.navigator.redirect(&self.login_path);
                return Ok(CycleOutcome::Redirected);
            }
            SnapshotFetch::Snapshot(snapshot) => snapshot,
        };

        let view = self.renderer.view(&snapshot);
        view.write_summary(self.dom.as_ref())?;
        // History is rebuilt after the chart; a chart failure keeps the old list
        self.chart.borrow_mut().update(view.total_value)?;
        view.write_history(self.dom.as_ref())?;
        let total_value = view.total_value;

        tracing::debug!(
            total_value,
            holdings = snapshot.portfolio.len(),
            trades = snapshot.history.len(),
            "dashboard refreshed"
        );
        Ok(CycleOutcome::Rendered { total_value })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::DisplayZone;
    use crate::poller::Poller;
    use crate::render::{AWAITING_LABEL, EMPTY_HISTORY_HTML};
    use crate::surface::ids;
    use crate::testing::{FakeApi, FakeDom, FakeNavigator, InstantTimer, RecordingChart, snapshot_json};

    struct Harness {
        api: Rc<FakeApi>,
        dom: Rc<FakeDom>,
        navigator: Rc<FakeNavigator>,
        chart: RecordingChart,
        client: DashboardClient,
    }

    fn harness() -> Harness {
        harness_with(RecordingChart::default())
    }

    fn harness_with(chart: RecordingChart) -> Harness {
        let config = Config { time_zone: DisplayZone::Utc, ..Config::default() };
        let api = Rc::new(FakeApi::default());
        let dom = Rc::new(FakeDom::default());
        let navigator = Rc::new(FakeNavigator::default());
        let client = DashboardClient::new(
            &config,
            api.clone(),
            dom.clone(),
            navigator.clone(),
            ChartAdapter::new(Box::new(chart.clone())),
        );
        Harness { api, dom, navigator, chart, client }
    }

    const SCENARIO: &str = r#"{"status": "running", "usdt": "100.50", "next_cycle_time": 0,
        "portfolio": {"USDT": {"amount": 100.5, "current_price": 1},
                      "BTCUSDT": {"amount": 0.01, "current_price": 60000}},
        "history": []}"#;

    #[tokio::test]
    async fn test_refresh_renders_and_feeds_chart() {
        let h = harness();
        h.api.push_snapshot(Ok(SnapshotFetch::Snapshot(Box::new(snapshot_json(SCENARIO)))));

        let outcome = h.client.refresh().await;

        assert_eq!(outcome, CycleOutcome::Rendered { total_value: 700.5 });
        assert_eq!(h.dom.text(ids::USDT_BALANCE), "100.50");
        assert_eq!(h.dom.text(ids::NEXT_CYCLE_TIME), AWAITING_LABEL);
        assert_eq!(h.dom.children(ids::PORTFOLIO_LIST).len(), 1);
        assert_eq!(h.dom.children(ids::HISTORY_LIST), [EMPTY_HISTORY_HTML]);
        assert_eq!(h.chart.initial_data(), Some(vec![700.5, 0.0]));
        assert!(h.navigator.locations().is_empty());
    }

    #[tokio::test]
    async fn test_unauthorized_redirects_without_dom_writes() {
        let h = harness();
        h.api.push_snapshot(Ok(SnapshotFetch::Unauthorized));

        let outcome = h.client.refresh().await;

        assert_eq!(outcome, CycleOutcome::Redirected);
        assert_eq!(h.navigator.locations(), ["/login"]);
        assert_eq!(h.dom.mutation_count(), 0);
        assert_eq!(h.chart.created(), 0);
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_page_untouched() {
        let h = harness();
        h.api.push_snapshot(Ok(SnapshotFetch::Snapshot(Box::new(snapshot_json(SCENARIO)))));
        h.client.refresh().await;
        let writes = h.dom.mutation_count();

        h.api.push_snapshot(Err(crate::error::DashboardError::Http("timeout".into())));
        let outcome = h.client.refresh().await;

        assert_eq!(outcome, CycleOutcome::Failed);
        assert_eq!(h.dom.mutation_count(), writes);
        assert_eq!(h.dom.text(ids::USDT_BALANCE), "100.50");
    }

    #[tokio::test]
    async fn test_chart_failure_keeps_previous_history() {
        let h = harness_with(RecordingChart::failing_first());
        h.api.push_snapshot(Ok(SnapshotFetch::Snapshot(Box::new(snapshot_json(SCENARIO)))));

        let outcome = h.client.refresh().await;

        assert_eq!(outcome, CycleOutcome::Failed);
        assert_eq!(h.dom.text(ids::USDT_BALANCE), "100.50");
        assert!(h.dom.children(ids::HISTORY_LIST).is_empty());
        assert!(!h.client.chart_initialized());

        h.api.push_snapshot(Ok(SnapshotFetch::Snapshot(Box::new(snapshot_json(SCENARIO)))));
        assert_eq!(h.client.refresh().await, CycleOutcome::Rendered { total_value: 700.5 });
        assert_eq!(h.dom.children(ids::HISTORY_LIST), [EMPTY_HISTORY_HTML]);
    }

    #[tokio::test]
    async fn test_poll_schedule_survives_failures() {
        let h = harness();
        h.api.push_snapshot(Err(crate::error::DashboardError::Http("offline".into())));
        h.api.push_snapshot(Ok(SnapshotFetch::Snapshot(Box::new(snapshot_json(SCENARIO)))));
        h.api.push_snapshot(Ok(SnapshotFetch::Snapshot(Box::new(snapshot_json(
            r#"{"usdt": 1, "portfolio": {"USDT": {"amount": 1, "current_price": 1}}}"#,
        )))));

        let timer = InstantTimer::default();
        let poller = Poller::new(Duration::from_millis(5000));
        let outcomes = RefCell::new(Vec::new());
        let (recorded, client) = (&outcomes, &h.client);

        let ran = poller
            .run(&timer, Some(3), move |_| async move {
                let outcome = client.refresh().await;
                recorded.borrow_mut().push(outcome);
            })
            .await;

        assert_eq!(ran, 3);
        assert_eq!(h.client.cycles(), 3);
        assert_eq!(
            outcomes.into_inner(),
            [
                CycleOutcome::Failed,
                CycleOutcome::Rendered { total_value: 700.5 },
                CycleOutcome::Rendered { total_value: 1.0 },
            ]
        );
        assert_eq!(h.chart.created(), 1);
        assert_eq!(h.chart.current_data(), vec![1.0, 0.0]);
        assert!(h.client.chart_initialized());
    }
}
