//! In-memory fakes for the browser seams

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::{self, LocalBoxFuture};

use crate::chart::{ChartBackend, ChartConfig, ChartHandle};
use crate::client::{DashboardApi, SnapshotFetch};
use crate::error::{DashboardError, Result};
use crate::poller::Timer;
use crate::surface::{DomSurface, InsertPosition, Navigator, Notifier};
use crate::types::{ActionReply, BotAction, Snapshot};

pub fn snapshot_json(json: &str) -> Snapshot {
    serde_json::from_str(json).expect("test snapshot should decode")
}

/// Element store keyed by id; markup is kept as a list of top-level fragments
#[derive(Default)]
pub struct FakeDom {
    texts: RefCell<HashMap<String, Vec<String>>>,
    children: RefCell<HashMap<String, Vec<String>>>,
    mutations: Cell<usize>,
}

impl FakeDom {
    /// Current text content of an element
    pub fn text(&self, id: &str) -> String {
        self.texts
            .borrow()
            .get(id)
            .and_then(|t| t.last().cloned())
            .unwrap_or_default()
    }

    /// Every text value written to an element, oldest first
    pub fn text_history(&self, id: &str) -> Vec<String> {
        self.texts.borrow().get(id).cloned().unwrap_or_default()
    }

    pub fn children(&self, id: &str) -> Vec<String> {
        self.children.borrow().get(id).cloned().unwrap_or_default()
    }

    pub fn mutation_count(&self) -> usize {
        self.mutations.get()
    }

    fn touch(&self) {
        self.mutations.set(self.mutations.get() + 1);
    }
}

impl DomSurface for FakeDom {
    fn set_text(&self, id: &str, text: &str) -> Result<()> {
        self.touch();
        self.texts.borrow_mut().entry(id.to_string()).or_default().push(text.to_string());
        Ok(())
    }

    fn set_html(&self, id: &str, html: &str) -> Result<()> {
        self.touch();
        let fragments = if html.is_empty() { vec![] } else { vec![html.to_string()] };
        self.children.borrow_mut().insert(id.to_string(), fragments);
        Ok(())
    }

    fn insert_html(&self, id: &str, position: InsertPosition, html: &str) -> Result<()> {
        self.touch();
        let mut children = self.children.borrow_mut();
        let list = children.entry(id.to_string()).or_default();
        match position {
            InsertPosition::AfterBegin => list.insert(0, html.to_string()),
            InsertPosition::BeforeEnd => list.push(html.to_string()),
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeNavigator {
    locations: RefCell<Vec<String>>,
}

impl FakeNavigator {
    pub fn locations(&self) -> Vec<String> {
        self.locations.borrow().clone()
    }
}

impl Navigator for FakeNavigator {
    fn redirect(&self, location: &str) {
        self.locations.borrow_mut().push(location.to_string());
    }
}

#[derive(Default)]
pub struct FakeNotifier {
    alerts: RefCell<Vec<String>>,
}

impl FakeNotifier {
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }
}

impl Notifier for FakeNotifier {
    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }
}

/// Scripted backend: replies are consumed in the order they were pushed
#[derive(Default)]
pub struct FakeApi {
    snapshots: RefCell<VecDeque<Result<SnapshotFetch>>>,
    replies: RefCell<VecDeque<Result<ActionReply>>>,
    posted: RefCell<Vec<BotAction>>,
}

impl FakeApi {
    pub fn push_snapshot(&self, result: Result<SnapshotFetch>) {
        self.snapshots.borrow_mut().push_back(result);
    }

    pub fn push_reply(&self, result: Result<ActionReply>) {
        self.replies.borrow_mut().push_back(result);
    }

    pub fn posted(&self) -> Vec<BotAction> {
        self.posted.borrow().clone()
    }
}

impl DashboardApi for FakeApi {
    fn fetch_snapshot(&self) -> LocalBoxFuture<'_, Result<SnapshotFetch>> {
        let next = self
            .snapshots
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(DashboardError::Http("no scripted snapshot".into())));
        future::ready(next).boxed_local()
    }

    fn post_action(&self, action: BotAction) -> LocalBoxFuture<'_, Result<ActionReply>> {
        self.posted.borrow_mut().push(action);
        let next = self
            .replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(DashboardError::Http("no scripted reply".into())));
        future::ready(next).boxed_local()
    }
}

#[derive(Default)]
struct ChartLog {
    created: usize,
    redraws: usize,
    fail_next_create: bool,
    initial: Option<Vec<f64>>,
    current: Vec<f64>,
}

/// Chart backend that records construction and updates
#[derive(Clone, Default)]
pub struct RecordingChart {
    log: Rc<RefCell<ChartLog>>,
}

impl RecordingChart {
    pub fn failing_first() -> Self {
        let chart = Self::default();
        chart.log.borrow_mut().fail_next_create = true;
        chart
    }

    pub fn created(&self) -> usize {
        self.log.borrow().created
    }

    pub fn redraws(&self) -> usize {
        self.log.borrow().redraws
    }

    pub fn initial_data(&self) -> Option<Vec<f64>> {
        self.log.borrow().initial.clone()
    }

    pub fn current_data(&self) -> Vec<f64> {
        self.log.borrow().current.clone()
    }
}

struct RecordingHandle {
    log: Rc<RefCell<ChartLog>>,
}

impl ChartHandle for RecordingHandle {
    fn set_data(&mut self, _labels: &[String], data: &[f64]) {
        self.log.borrow_mut().current = data.to_vec();
    }

    fn redraw(&mut self) {
        self.log.borrow_mut().redraws += 1;
    }
}

impl ChartBackend for RecordingChart {
    fn create(&self, config: &ChartConfig) -> Result<Box<dyn ChartHandle>> {
        let mut log = self.log.borrow_mut();
        if log.fail_next_create {
            log.fail_next_create = false;
            return Err(DashboardError::Chart("canvas not ready".into()));
        }
        let data = config.data.datasets[0].data.clone();
        log.created += 1;
        log.initial = Some(data.clone());
        log.current = data;
        Ok(Box::new(RecordingHandle { log: self.log.clone() }))
    }
}

/// Timer that resolves at once and records every requested delay
#[derive(Default)]
pub struct InstantTimer {
    sleeps: RefCell<Vec<Duration>>,
}

impl InstantTimer {
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.borrow().clone()
    }
}

impl Timer for InstantTimer {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        self.sleeps.borrow_mut().push(duration);
        future::ready(()).boxed_local()
    }
}
