//! Browser bindings (wasm32 only)
//!
//! Implements the surface traits on top of `web-sys`, binds Chart.js, and wires
//! the poller, scroll listener and bot buttons when the page is ready.

// `#[wasm_bindgen]` expands to unsafe FFI shims
#![allow(unsafe_code)]

use std::rc::Rc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use gloo_timers::future::TimeoutFuture;
use js_sys::{Array, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, HtmlCanvasElement, HtmlElement, Window};

use crate::actions::ActionBridge;
use crate::chart::{ChartAdapter, ChartBackend, ChartConfig, ChartHandle, tooltip_label};
use crate::client::{DashboardApi, HttpApi};
use crate::config::{Config, ConfigSource};
use crate::dashboard::DashboardClient;
use crate::error::{DashboardError, Result};
use crate::poller::{Poller, Timer};
use crate::scroll::{ScrollAnimator, ScrollFrame, ScrollGeometry, ScrollSurface};
use crate::surface::{DomSurface, InsertPosition, Navigator, Notifier, ids};
use crate::telemetry;
use crate::types::BotAction;

/// Reads `DASHBOARD_*` overrides from `globalThis`
struct GlobalSource;

impl ConfigSource for GlobalSource {
    fn var(&self, key: &str) -> Option<String> {
        let value = Reflect::get(&js_sys::global(), &JsValue::from_str(key)).ok()?;
        value
            .as_string()
            .or_else(|| value.as_f64().map(|n| n.to_string()))
    }
}

struct BrowserDom {
    document: Document,
}

impl BrowserDom {
    fn element(&self, id: &str) -> Result<Element> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| DashboardError::Dom(format!("missing #{id}")))
    }
}

impl DomSurface for BrowserDom {
    fn set_text(&self, id: &str, text: &str) -> Result<()> {
        self.element(id)?.set_text_content(Some(text));
        Ok(())
    }

    fn set_html(&self, id: &str, html: &str) -> Result<()> {
        self.element(id)?.set_inner_html(html);
        Ok(())
    }

    fn insert_html(&self, id: &str, position: InsertPosition, html: &str) -> Result<()> {
        self.element(id)?.insert_adjacent_html(position.as_str(), html)?;
        Ok(())
    }
}

struct BrowserNavigator {
    window: Window,
}

impl Navigator for BrowserNavigator {
    fn redirect(&self, location: &str) {
        if let Err(e) = self.window.location().set_href(location) {
            tracing::error!(location, error = ?e, "redirect failed");
        }
    }
}

struct BrowserNotifier {
    window: Window,
}

impl Notifier for BrowserNotifier {
    fn alert(&self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            tracing::error!(error = ?e, "alert could not be shown");
        }
    }
}

struct BrowserTimer;

impl Timer for BrowserTimer {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        TimeoutFuture::new(millis).boxed_local()
    }
}

#[wasm_bindgen]
extern "C" {
    /// Chart.js, loaded globally by the page shell
    #[wasm_bindgen(js_name = Chart)]
    type JsChart;

    #[wasm_bindgen(constructor, js_class = "Chart", catch)]
    fn new(context: &JsValue, config: &JsValue) -> std::result::Result<JsChart, JsValue>;

    #[wasm_bindgen(method, getter)]
    fn data(this: &JsChart) -> JsValue;

    #[wasm_bindgen(method)]
    fn update(this: &JsChart);
}

fn chart_error(context: &str, value: &JsValue) -> DashboardError {
    DashboardError::Chart(format!("{context}: {value:?}"))
}

/// Builds Chart.js doughnuts on the `portfolioChart` canvas
struct ChartJsBackend {
    document: Document,
}

impl ChartJsBackend {
    fn context(&self) -> Result<JsValue> {
        let canvas: HtmlCanvasElement = self
            .document
            .get_element_by_id(ids::PORTFOLIO_CHART)
            .ok_or_else(|| DashboardError::Chart(format!("missing #{}", ids::PORTFOLIO_CHART)))?
            .dyn_into()
            .map_err(|_| DashboardError::Chart(format!("#{} is not a canvas", ids::PORTFOLIO_CHART)))?;
        let context = canvas
            .get_context("2d")
            .map_err(|e| chart_error("2d context", &e))?
            .ok_or_else(|| DashboardError::Chart("2d context unavailable".into()))?;
        Ok(context.into())
    }
}

/// Tooltip callback: `"<label>: <USD amount>"`
fn tooltip_callback() -> Closure<dyn Fn(JsValue) -> JsValue> {
    Closure::new(|item: JsValue| {
        let label = Reflect::get(&item, &JsValue::from_str("label"))
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_default();
        let parsed = Reflect::get(&item, &JsValue::from_str("parsed"))
            .ok()
            .and_then(|v| v.as_f64());
        JsValue::from_str(&tooltip_label(&label, parsed))
    })
}

impl ChartBackend for ChartJsBackend {
    fn create(&self, config: &ChartConfig) -> Result<Box<dyn ChartHandle>> {
        let context = self.context()?;
        let js_config = js_sys::JSON::parse(&serde_json::to_string(config)?)
            .map_err(|e| chart_error("config", &e))?;

        let label = tooltip_callback();
        let callbacks = ["options", "plugins", "tooltip", "callbacks"]
            .iter()
            .try_fold(js_config.clone(), |node, key| Reflect::get(&node, &JsValue::from_str(key)))
            .map_err(|e| chart_error("tooltip callbacks", &e))?;
        Reflect::set(&callbacks, &JsValue::from_str("label"), label.as_ref())
            .map_err(|e| chart_error("tooltip label", &e))?;

        let chart = JsChart::new(&context, &js_config).map_err(|e| chart_error("Chart.js", &e))?;
        Ok(Box::new(ChartJsHandle { chart, _label: label }))
    }
}

struct ChartJsHandle {
    chart: JsChart,
    /// Kept alive for as long as Chart.js may call it
    _label: Closure<dyn Fn(JsValue) -> JsValue>,
}

impl ChartHandle for ChartJsHandle {
    fn set_data(&mut self, labels: &[String], data: &[f64]) {
        let chart_data = self.chart.data();
        let labels: Array = labels.iter().map(|l| JsValue::from_str(l)).collect();
        let values: Array = data.iter().map(|v| JsValue::from_f64(*v)).collect();

        let written = Reflect::set(&chart_data, &JsValue::from_str("labels"), &labels)
            .and_then(|_| Reflect::get(&chart_data, &JsValue::from_str("datasets")))
            .and_then(|datasets| Reflect::get_u32(&datasets, 0))
            .and_then(|first| Reflect::set(&first, &JsValue::from_str("data"), &values));
        if let Err(e) = written {
            tracing::warn!(error = ?e, "chart data not replaced");
        }
    }

    fn redraw(&mut self) {
        self.chart.update();
    }
}

/// Hero, content and reveal sections, looked up once at boot
struct BrowserScroll {
    window: Window,
    hero: HtmlElement,
    hero_text: HtmlElement,
    content: HtmlElement,
    sections: Vec<Element>,
}

impl BrowserScroll {
    fn new(window: &Window, document: &Document) -> Result<Self> {
        let html_element = |id: &str| -> Result<HtmlElement> {
            document
                .get_element_by_id(id)
                .ok_or_else(|| DashboardError::Dom(format!("missing #{id}")))?
                .dyn_into()
                .map_err(|_| DashboardError::Dom(format!("#{id} is not an HTML element")))
        };

        let list = document.query_selector_all(&format!(".{}", ids::SECTION_REVEAL))?;
        let sections = (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect();

        Ok(Self {
            window: window.clone(),
            hero: html_element(ids::WELCOME_SECTION)?,
            hero_text: html_element(ids::WELCOME_TEXT)?,
            content: html_element(ids::DASHBOARD_CONTENT)?,
            sections,
        })
    }
}

impl ScrollSurface for BrowserScroll {
    fn geometry(&self) -> Result<ScrollGeometry> {
        Ok(ScrollGeometry {
            scroll_y: self.window.scroll_y()?,
            viewport_height: self.window.inner_height()?.as_f64().unwrap_or(0.0),
            hero_height: f64::from(self.hero.offset_height()),
            section_tops: self
                .sections
                .iter()
                .map(|s| s.get_bounding_client_rect().top())
                .collect(),
        })
    }

    fn apply(&self, frame: &ScrollFrame) -> Result<()> {
        self.hero
            .style()
            .set_property("opacity", &frame.hero_opacity.to_string())?;
        if let Some(offset) = frame.hero_text_offset_px {
            self.hero_text
                .style()
                .set_property("transform", &format!("translateY({offset}px)"))?;
        }

        let content = self.content.style();
        content.set_property("opacity", &frame.content.opacity.to_string())?;
        content.set_property("transform", &frame.content.transform())?;

        for (section, revealed) in self.sections.iter().zip(&frame.revealed) {
            let classes = section.class_list();
            if *revealed {
                classes.add_1(ids::REVEALED)?;
            } else {
                classes.remove_1(ids::REVEALED)?;
            }
        }
        Ok(())
    }
}

/// wasm entry point
#[wasm_bindgen(start)]
pub fn start() -> std::result::Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let config = Config::from_source(&GlobalSource);
    if let Err(e) = telemetry::init_tracing(&config.log_level) {
        web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
    }
    config.validate().map_err(|e| JsValue::from_str(&e.to_string()))?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if document.ready_state() == "loading" {
        let on_ready = Closure::once(move || {
            if let Err(e) = boot(&config) {
                tracing::error!(error = %e, "dashboard failed to start");
            }
        });
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())?;
        on_ready.forget();
    } else {
        boot(&config).map_err(|e| JsValue::from_str(&e.to_string()))?;
    }
    Ok(())
}

fn boot(config: &Config) -> Result<()> {
    let window = web_sys::window().ok_or_else(|| DashboardError::Dom("no window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| DashboardError::Dom("no document".into()))?;
    let origin = window.location().origin()?;

    let api: Rc<dyn DashboardApi> = Rc::new(HttpApi::new(config, &origin));
    let dom: Rc<dyn DomSurface> = Rc::new(BrowserDom { document: document.clone() });

    let client = Rc::new(DashboardClient::new(
        config,
        api.clone(),
        dom.clone(),
        Rc::new(BrowserNavigator { window: window.clone() }),
        ChartAdapter::new(Box::new(ChartJsBackend { document: document.clone() })),
    ));
    let actions = Rc::new(ActionBridge::new(
        api,
        dom,
        Rc::new(BrowserNotifier { window: window.clone() }),
    ));

    let poller = Poller::new(config.poll_interval());
    spawn_local(async move {
        poller
            .run(&BrowserTimer, None, |_| {
                // Spawned so a slow request never delays the next tick
                let client = client.clone();
                spawn_local(async move {
                    client.refresh().await;
                });
                std::future::ready(())
            })
            .await;
    });

    bind_scroll(&window, &document, ScrollAnimator::new(config.reveal_offset_px))?;
    bind_action(&document, ids::START_BOT_BTN, &actions, BotAction::Start)?;
    bind_action(&document, ids::STOP_BOT_BTN, &actions, BotAction::Stop)?;

    tracing::info!(interval_ms = config.poll_interval_ms, "dashboard started");
    Ok(())
}

fn bind_scroll(window: &Window, document: &Document, animator: ScrollAnimator) -> Result<()> {
    let surface = BrowserScroll::new(window, document)?;
    let refresh = move || {
        if let Err(e) = animator.refresh(&surface) {
            tracing::debug!(error = %e, "scroll frame skipped");
        }
    };
    refresh();

    let on_scroll = Closure::<dyn Fn()>::new(refresh);
    window.add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref())?;
    on_scroll.forget();
    Ok(())
}

fn bind_action(document: &Document, id: &str, actions: &Rc<ActionBridge>, action: BotAction) -> Result<()> {
    let button = document
        .get_element_by_id(id)
        .ok_or_else(|| DashboardError::Dom(format!("missing #{id}")))?;

    let actions = actions.clone();
    let on_click = Closure::<dyn Fn()>::new(move || {
        let actions = actions.clone();
        spawn_local(async move {
            if let Err(e) = actions.run(action).await {
                tracing::error!(%action, error = %e, "bot action could not update the page");
            }
        });
    });
    button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();
    Ok(())
}
