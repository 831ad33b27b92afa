use serde::Serialize;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

use crate::application::{DrillDownSession, SessionConfig};
use crate::domain::{
    errors::AppError,
    hierarchy::{HierarchyIndex, NodeId},
    logging::{LogComponent, get_logger},
    market_data::Symbol,
    navigation::ClickOutcome,
    sunburst::RingLevel,
};
use crate::infrastructure::{InMemoryInstrumentFeed, demo_hierarchy, load_hierarchy_json};

fn to_js_error(error: AppError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| to_js_error(e.into()))
}

fn ring_level(level: u32) -> Result<RingLevel, JsValue> {
    RingLevel::from_index(level as usize)
        .ok_or_else(|| to_js_error(AppError::Validation(format!("no ring at level {}", level))))
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
enum ClickResponse {
    Collapsed,
    Navigated,
    InstrumentSelected { symbol: String },
    Ignored,
    Rejected { reason: String },
}

impl From<ClickOutcome> for ClickResponse {
    fn from(outcome: ClickOutcome) -> Self {
        match outcome {
            ClickOutcome::Collapsed => ClickResponse::Collapsed,
            ClickOutcome::Navigated => ClickResponse::Navigated,
            ClickOutcome::InstrumentSelected(symbol) => {
                ClickResponse::InstrumentSelected { symbol: symbol.value().to_string() }
            }
            ClickOutcome::Ignored => ClickResponse::Ignored,
            ClickOutcome::Rejected(reason) => ClickResponse::Rejected { reason: reason.to_string() },
        }
    }
}

/// JS bridge: one drill-down surface plus the feed snapshot it reads.
///
/// Every method returning a string returns JSON; the host repaints from
/// `renderFrame()` after any call that changes state.
#[wasm_bindgen]
pub struct SunburstApi {
    session: DrillDownSession,
    feed: InMemoryInstrumentFeed,
}

#[wasm_bindgen]
impl SunburstApi {
    /// `hierarchy_json` may be omitted to use the built-in demo table
    #[wasm_bindgen(constructor)]
    pub fn new(hierarchy_json: Option<String>, config_json: Option<String>) -> Result<SunburstApi, JsValue> {
        let hierarchy = match hierarchy_json {
            Some(json) => load_hierarchy_json(&json),
            None => demo_hierarchy(),
        }
        .map_err(to_js_error)?;
        let config = match config_json {
            Some(json) => SessionConfig::from_json(&json).map_err(to_js_error)?,
            None => SessionConfig::default(),
        };

        let hierarchy: Rc<dyn HierarchyIndex> = Rc::new(hierarchy);
        get_logger().info(LogComponent::Presentation("SunburstApi"), "Sunburst surface created");
        Ok(Self { session: DrillDownSession::new(hierarchy, config), feed: InMemoryInstrumentFeed::new() })
    }

    /// Push feed records; `replace` swaps the whole snapshot. Returns the accepted count.
    #[wasm_bindgen(js_name = updateInstruments)]
    pub fn update_instruments(&mut self, records_json: &str, replace: bool) -> Result<usize, JsValue> {
        self.feed.apply_json(records_json, replace).map_err(to_js_error)
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.session.resize(width, height);
    }

    /// Called with the symbol whenever an instrument-ring click selects an instrument
    #[wasm_bindgen(js_name = onInstrumentSelected)]
    pub fn on_instrument_selected(&mut self, callback: js_sys::Function) {
        self.session.set_selection_sink(move |symbol: &Symbol| {
            if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(symbol.value())) {
                get_logger().error(
                    LogComponent::Presentation("SunburstApi"),
                    &format!("Instrument selection callback failed: {:?}", e),
                );
            }
        });
    }

    #[wasm_bindgen(js_name = clickSegment)]
    pub fn click_segment(&mut self, level: u32, id: &str) -> Result<String, JsValue> {
        let outcome = self.session.click(ring_level(level)?, &NodeId::from(id));
        to_json(&ClickResponse::from(outcome))
    }

    /// Click at container coordinates
    #[wasm_bindgen(js_name = clickAt)]
    pub fn click_at(&mut self, x: f64, y: f64) -> Result<String, JsValue> {
        let outcome = self.session.click_at(x, y, &self.feed);
        to_json(&ClickResponse::from(outcome))
    }

    #[wasm_bindgen(js_name = clickBreadcrumb)]
    pub fn click_breadcrumb(&mut self, depth: usize) -> Result<String, JsValue> {
        let path = self.session.click_breadcrumb(depth).map_err(|e| to_js_error(e.into()))?;
        to_json(path)
    }

    #[wasm_bindgen(js_name = drillUp)]
    pub fn drill_up(&mut self) -> Result<String, JsValue> {
        let path = self.session.drill_up().map_err(|e| to_js_error(e.into()))?;
        to_json(path)
    }

    pub fn reset(&mut self) -> Result<String, JsValue> {
        let path = self.session.reset().map_err(|e| to_js_error(e.into()))?;
        to_json(path)
    }

    /// Pointer entered a segment reported by the surface; returns the tooltip JSON or `null`
    #[wasm_bindgen(js_name = hoverSegment)]
    pub fn hover_segment(&mut self, level: u32, id: &str, x: f64, y: f64) -> Result<String, JsValue> {
        let level = ring_level(level)?;
        let tooltip = self.session.hover(level, &NodeId::from(id), (x, y), &self.feed).cloned();
        to_json(&tooltip)
    }

    /// Pointer at container coordinates, resolved by hit testing
    #[wasm_bindgen(js_name = hoverAt)]
    pub fn hover_at(&mut self, x: f64, y: f64) -> Result<String, JsValue> {
        let tooltip = self.session.hover_at(x, y, &self.feed).cloned();
        to_json(&tooltip)
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.session.pointer_move(x, y);
    }

    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&mut self) {
        self.session.pointer_leave();
    }

    #[wasm_bindgen(js_name = renderFrame)]
    pub fn render_frame(&self) -> Result<String, JsValue> {
        to_json(&self.session.render_frame(&self.feed))
    }

    pub fn breadcrumbs(&self) -> Result<String, JsValue> {
        to_json(&self.session.navigator().breadcrumbs())
    }
}
