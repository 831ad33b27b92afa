use serde::Serialize;

use super::entities::Instrument;
use super::repositories::InstrumentFeed;
use crate::domain::hierarchy::{HierarchyIndex, NodeId, NodeKind};
use crate::domain::logging::LogComponent;
use crate::domain::sunburst::RingLevel;
use crate::{log_debug, log_trace};

/// Rolled-up figures for one hierarchy node
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateMetric {
    pub volume: f64,
    /// Market-cap-weighted mean of the constituents' change%
    pub change_percent: f64,
    pub change: f64,
    pub market_cap: f64,
}

impl AggregateMetric {
    /// Fold instrument records into a cap-weighted rollup.
    ///
    /// With no capitalisation at all the weighted change is defined as zero.
    pub fn fold<'a>(instruments: impl IntoIterator<Item = &'a Instrument>) -> Self {
        let mut volume = 0.0;
        let mut market_cap = 0.0;
        let mut weighted_change = 0.0;
        for instrument in instruments {
            let cap = instrument.market_cap.value();
            volume += instrument.volume.value();
            market_cap += cap;
            weighted_change += instrument.change_percent * cap;
        }

        let change_percent = if market_cap > 0.0 { weighted_change / market_cap } else { 0.0 };
        Self { volume, change_percent, change: change_percent * 0.01 * 100.0, market_cap }
    }

    /// Figures of a single instrument, taken as published
    pub fn of_instrument(instrument: &Instrument) -> Self {
        Self {
            volume: instrument.volume.value(),
            change_percent: instrument.change_percent,
            change: instrument.change,
            market_cap: instrument.market_cap.value(),
        }
    }
}

/// Computes per-node rollups from the live feed. Stateless and uncached:
/// every call walks the node's subtree against the current snapshot.
pub struct AggregationEngine<'a> {
    hierarchy: &'a dyn HierarchyIndex,
    feed: &'a dyn InstrumentFeed,
}

impl<'a> AggregationEngine<'a> {
    pub fn new(hierarchy: &'a dyn HierarchyIndex, feed: &'a dyn InstrumentFeed) -> Self {
        Self { hierarchy, feed }
    }

    /// Rollup for `node_id` shown at ring `level`.
    ///
    /// Instrument nodes on the instrument and fundamentals rings report their
    /// own record unweighted. Anything else folds the instruments beneath it;
    /// instruments the feed has not published yet are skipped.
    pub fn aggregate(&self, node_id: &NodeId, level: RingLevel) -> AggregateMetric {
        let Some(node) = self.hierarchy.node(node_id) else {
            log_debug!(LogComponent::Domain("Aggregation"), "Unknown node {}", node_id);
            return AggregateMetric::default();
        };

        if node.kind == NodeKind::Instrument
            && matches!(level, RingLevel::Instrument | RingLevel::Fundamentals)
        {
            return self.instrument(node_id).map(AggregateMetric::of_instrument).unwrap_or_default();
        }

        let leaves = self.hierarchy.descendant_instruments(node_id);
        let live = leaves.iter().filter_map(|leaf| {
            let record = leaf.symbol.as_ref().and_then(|symbol| self.feed.get(symbol));
            if record.is_none() {
                log_trace!(LogComponent::Domain("Aggregation"), "No live record for {}", leaf.id);
            }
            record
        });
        AggregateMetric::fold(live)
    }

    /// Live record behind an instrument node
    pub fn instrument(&self, node_id: &NodeId) -> Option<&'a Instrument> {
        let symbol = self.hierarchy.node(node_id)?.symbol.as_ref()?;
        self.feed.get(symbol)
    }
}
