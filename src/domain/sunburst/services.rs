use crate::domain::hierarchy::{HierarchyIndex, NodeId};
use crate::domain::market_data::{AggregationEngine, Instrument, InstrumentFeed, format_compact};
use crate::domain::navigation::DrillPath;

use super::value_objects::{Color, Ring, RingLevel, RingSet, Segment};

/// Smallest sizing weight a segment can get, in percent-of-ring units.
/// Keeps wedges without live volume visible and clickable.
pub const MIN_SEGMENT_VALUE: f64 = 5.0;

/// Weight of each fundamentals slice; the four slices split the ring evenly
pub const FUNDAMENTALS_SLICE_VALUE: f64 = 25.0;

/// Longest wedge caption before it is shortened with an ellipsis
pub const MAX_DISPLAY_LABEL_CHARS: usize = 12;

/// Normalize raw volumes to percent of their total, floored at [`MIN_SEGMENT_VALUE`].
pub fn sized_values(volumes: &[f64]) -> Vec<f64> {
    let total: f64 = volumes.iter().filter(|v| v.is_finite() && **v > 0.0).sum();
    volumes
        .iter()
        .map(|volume| {
            let share = if total > 0.0 && volume.is_finite() && *volume > 0.0 {
                volume / total * 100.0
            } else {
                0.0
            };
            share.max(MIN_SEGMENT_VALUE)
        })
        .collect()
}

/// Caption that fits inside a wedge
pub fn display_label(label: &str) -> String {
    if label.chars().count() <= MAX_DISPLAY_LABEL_CHARS {
        label.to_string()
    } else {
        let head: String = label.chars().take(MAX_DISPLAY_LABEL_CHARS - 1).collect();
        format!("{}…", head)
    }
}

/// Builds the rings the current drill path exposes, one rollup per segment
pub struct SegmentService<'a> {
    hierarchy: &'a dyn HierarchyIndex,
    engine: AggregationEngine<'a>,
}

impl<'a> SegmentService<'a> {
    pub fn new(hierarchy: &'a dyn HierarchyIndex, feed: &'a dyn InstrumentFeed) -> Self {
        Self { hierarchy, engine: AggregationEngine::new(hierarchy, feed) }
    }

    /// Ring 0 always; ring k for each of the first two selections; the
    /// fundamentals ring once an instrument is selected.
    pub fn build_rings(&self, path: &DrillPath) -> RingSet {
        let mut rings = vec![self.node_ring(RingLevel::Etf, None)];
        if let Some(etf) = path.get(0) {
            rings.push(self.node_ring(RingLevel::Sector, Some(etf)));
        }
        if let Some(sector) = path.get(1) {
            rings.push(self.node_ring(RingLevel::Instrument, Some(sector)));
        }
        if let Some(instrument) = path.get(2) {
            rings.push(self.fundamentals_ring(instrument));
        }
        RingSet { rings }
    }

    /// Drill children of `parent` as sized segments, in hierarchy order
    pub fn node_ring(&self, level: RingLevel, parent: Option<&NodeId>) -> Ring {
        let children = self.hierarchy.drill_children(parent);
        let metrics: Vec<_> =
            children.iter().map(|child| self.engine.aggregate(child, level)).collect();
        let volumes: Vec<f64> = metrics.iter().map(|metric| metric.volume).collect();
        let values = sized_values(&volumes);

        let segments = children
            .into_iter()
            .zip(metrics)
            .zip(values)
            .filter_map(|((id, metric), value)| {
                let node = self.hierarchy.node(&id)?;
                Some(Segment {
                    label: node.label.clone(),
                    display_label: display_label(&node.label),
                    value,
                    color: node.color,
                    change: metric.change,
                    change_percent: metric.change_percent,
                    ring_level: level,
                    parent_id: parent.cloned(),
                    instrument_ref: node.symbol.clone(),
                    id,
                })
            })
            .collect();

        Ring { level, parent_id: parent.cloned(), segments }
    }

    /// Informational slices for the selected instrument
    pub fn fundamentals_ring(&self, instrument_id: &NodeId) -> Ring {
        let node = self.hierarchy.node(instrument_id);
        let base_color = node.map(|node| node.color).unwrap_or(Color::SURFACE);
        let symbol = node.and_then(|node| node.symbol.clone());
        let record = self.engine.instrument(instrument_id);

        let slices = fundamentals_captions(record);
        let segments = slices
            .into_iter()
            .enumerate()
            .map(|(index, (key, label, caption))| Segment {
                id: NodeId::new(format!("{}#{}", instrument_id, key)),
                label: label.to_string(),
                display_label: caption,
                value: FUNDAMENTALS_SLICE_VALUE,
                color: base_color.lighten(0.06 * index as f32),
                change: record.map(|r| r.change).unwrap_or_default(),
                change_percent: record.map(|r| r.change_percent).unwrap_or_default(),
                ring_level: RingLevel::Fundamentals,
                parent_id: Some(instrument_id.clone()),
                instrument_ref: symbol.clone(),
            })
            .collect();

        Ring { level: RingLevel::Fundamentals, parent_id: Some(instrument_id.clone()), segments }
    }
}

fn fundamentals_captions(record: Option<&Instrument>) -> [(&'static str, &'static str, String); 4] {
    let missing = || "n/a".to_string();
    [
        ("price", "Price", record.map(|r| format!("${:.2}", r.price.value())).unwrap_or_else(missing)),
        ("volume", "Volume", record.map(|r| format_compact(r.volume.value())).unwrap_or_else(missing)),
        (
            "marketCap",
            "Market Cap",
            record.map(|r| format!("${}", format_compact(r.market_cap.value()))).unwrap_or_else(missing),
        ),
        (
            "pe",
            "P/E",
            record.and_then(|r| r.pe_ratio).map(|pe| format!("{:.1}", pe)).unwrap_or_else(missing),
        ),
    ]
}
