use serde::{Deserialize, Serialize};

use crate::domain::hierarchy::NodeId;
use crate::domain::market_data::{Instrument, InstrumentFeed};
use crate::domain::navigation::DrillPath;
use crate::domain::sunburst::{ArcGeometry, Color, Ring, RingGeometry, RingLevel, Segment};

/// Visual rules layered over the raw geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InteractionStyle {
    /// Opacity of unselected segments on already-resolved rings
    pub dim_opacity: f32,
    /// HSL lightness added to selected segments
    pub highlight_lightness: f32,
    pub stroke_width: f32,
    pub highlight_stroke_width: f32,
    pub stroke_color: Color,
    /// Tooltip offset from the pointer, in pixels
    pub tooltip_offset: (f64, f64),
}

impl Default for InteractionStyle {
    fn default() -> Self {
        Self {
            dim_opacity: 0.35,
            highlight_lightness: 0.15,
            stroke_width: 1.0,
            highlight_stroke_width: 2.5,
            stroke_color: Color::SURFACE,
            tooltip_offset: (12.0, 12.0),
        }
    }
}

/// Per-segment flags and paint handed to the render surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentState {
    pub highlighted: bool,
    pub dimmed: bool,
    pub hovered: bool,
    pub opacity: f32,
    pub fill: Color,
    pub stroke: Color,
    pub stroke_width: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentFundamentals {
    pub price: f64,
    pub change_percent: f64,
    pub market_cap: f64,
    pub volume: f64,
    pub pe_ratio: Option<f64>,
}

impl From<&Instrument> for InstrumentFundamentals {
    fn from(instrument: &Instrument) -> Self {
        Self {
            price: instrument.price.value(),
            change_percent: instrument.change_percent,
            market_cap: instrument.market_cap.value(),
            volume: instrument.volume.value(),
            pe_ratio: instrument.pe_ratio,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipPayload {
    pub label: String,
    pub percent_of_ring_total: f64,
    pub change: f64,
    pub change_percent: f64,
    /// Full fundamentals, instrument ring only
    pub extra: Option<InstrumentFundamentals>,
}

/// Visible tooltip; absence means hidden
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tooltip {
    pub payload: TooltipPayload,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoverTarget {
    pub segment_id: NodeId,
    pub ring_level: RingLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedArc {
    pub geometry: ArcGeometry,
    pub state: SegmentState,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedRing {
    pub level: RingLevel,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub arcs: Vec<RenderedArc>,
}

/// Hover and tooltip state plus highlight/dim rules. Never touches the drill path.
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    style: InteractionStyle,
    hovered: Option<HoverTarget>,
    tooltip: Option<Tooltip>,
}

impl InteractionController {
    pub fn new(style: InteractionStyle) -> Self {
        Self { style, hovered: None, tooltip: None }
    }

    pub fn style(&self) -> &InteractionStyle {
        &self.style
    }

    pub fn hovered(&self) -> Option<&HoverTarget> {
        self.hovered.as_ref()
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    pub fn segment_state(&self, segment: &Segment, ring_index: usize, path: &DrillPath) -> SegmentState {
        let highlighted = path.contains(&segment.id);
        let dimmed = ring_index < path.len() && !highlighted;
        let hovered = self.hovered.as_ref().is_some_and(|target| target.segment_id == segment.id);

        let (fill, stroke, stroke_width) = if highlighted {
            (
                segment.color.lighten(self.style.highlight_lightness),
                self.style.stroke_color.lighten(0.5),
                self.style.highlight_stroke_width,
            )
        } else {
            (segment.color, self.style.stroke_color, self.style.stroke_width)
        };

        SegmentState {
            highlighted,
            dimmed,
            hovered,
            opacity: if dimmed { self.style.dim_opacity } else { 1.0 },
            fill,
            stroke,
            stroke_width,
        }
    }

    /// Pointer entered `segment` of `ring`; returns the tooltip now shown
    pub fn pointer_enter(
        &mut self,
        segment: &Segment,
        ring: &Ring,
        pointer: (f64, f64),
        feed: &dyn InstrumentFeed,
    ) -> &Tooltip {
        let total = ring.total_value();
        let extra = match (segment.ring_level, &segment.instrument_ref) {
            (RingLevel::Instrument, Some(symbol)) => feed.get(symbol).map(InstrumentFundamentals::from),
            _ => None,
        };
        let payload = TooltipPayload {
            label: segment.label.clone(),
            percent_of_ring_total: if total > 0.0 { segment.value / total * 100.0 } else { 0.0 },
            change: segment.change,
            change_percent: segment.change_percent,
            extra,
        };

        self.hovered = Some(HoverTarget { segment_id: segment.id.clone(), ring_level: segment.ring_level });
        let (x, y) = self.offset(pointer);
        self.tooltip.insert(Tooltip { payload, x, y })
    }

    pub fn pointer_move(&mut self, pointer: (f64, f64)) {
        let (x, y) = self.offset(pointer);
        if let Some(tooltip) = self.tooltip.as_mut() {
            tooltip.x = x;
            tooltip.y = y;
        }
    }

    pub fn pointer_leave(&mut self) {
        self.hovered = None;
        self.tooltip = None;
    }

    /// Attach state flags to laid-out rings
    pub fn decorate(&self, rings: Vec<RingGeometry>, path: &DrillPath) -> Vec<RenderedRing> {
        rings
            .into_iter()
            .map(|ring| {
                let ring_index = ring.level.index();
                let arcs = ring
                    .arcs
                    .into_iter()
                    .map(|geometry| {
                        let state = self.segment_state(&geometry.segment, ring_index, path);
                        RenderedArc { geometry, state }
                    })
                    .collect();
                RenderedRing {
                    level: ring.level,
                    inner_radius: ring.inner_radius,
                    outer_radius: ring.outer_radius,
                    arcs,
                }
            })
            .collect()
    }

    fn offset(&self, (x, y): (f64, f64)) -> (f64, f64) {
        (x + self.style.tooltip_offset.0, y + self.style.tooltip_offset.1)
    }
}
