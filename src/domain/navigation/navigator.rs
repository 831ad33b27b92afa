use serde::Serialize;
use std::rc::Rc;

use super::drill_path::{DrillCommand, DrillPath, plan_transition};
use crate::domain::errors::NavigationError;
use crate::domain::events::{DrillEvent, EventDispatcher, InMemoryEventDispatcher};
use crate::domain::hierarchy::{HierarchyIndex, NodeId};
use crate::domain::logging::LogComponent;
use crate::domain::market_data::Symbol;
use crate::domain::sunburst::RingLevel;
use crate::{log_debug, log_warn};

pub const ROOT_BREADCRUMB: &str = "Root";

/// Receives the symbol of every instrument picked on the instrument ring
pub trait InstrumentSelectionSink {
    fn on_instrument_selected(&self, symbol: &Symbol);
}

impl<F> InstrumentSelectionSink for F
where
    F: Fn(&Symbol),
{
    fn on_instrument_selected(&self, symbol: &Symbol) {
        self(symbol)
    }
}

/// What a segment click did to the path
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// Top-level selection clicked again, path emptied
    Collapsed,
    Navigated,
    InstrumentSelected(Symbol),
    /// Re-click of the current selection or a click on the fundamentals ring
    Ignored,
    Rejected(NavigationError),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Breadcrumb {
    pub label: String,
    /// Path length a click on this crumb truncates to
    pub depth: usize,
    pub node_id: Option<NodeId>,
}

/// Sole writer of the drill path.
///
/// Each transition is planned from the full current path and committed in a
/// single assignment, so subscribers only ever see complete, valid paths.
pub struct DrillNavigator {
    hierarchy: Rc<dyn HierarchyIndex>,
    path: DrillPath,
    dispatcher: InMemoryEventDispatcher,
    selection_sink: Option<Box<dyn InstrumentSelectionSink>>,
}

impl DrillNavigator {
    pub fn new(hierarchy: Rc<dyn HierarchyIndex>) -> Self {
        Self {
            hierarchy,
            path: DrillPath::new(),
            dispatcher: InMemoryEventDispatcher::new(),
            selection_sink: None,
        }
    }

    pub fn path(&self) -> &DrillPath {
        &self.path
    }

    pub fn hierarchy(&self) -> &dyn HierarchyIndex {
        self.hierarchy.as_ref()
    }

    /// Rings on screen for the current path: ring 0 plus one per selection
    pub fn visible_ring_count(&self) -> usize {
        self.path.len() + 1
    }

    pub fn is_active(&self, id: &NodeId) -> bool {
        self.path.contains(id)
    }

    pub fn subscribe<F>(&mut self, handler: F)
    where
        F: Fn(&DrillEvent) + 'static,
    {
        self.dispatcher.subscribe_to_drill_events(handler);
    }

    pub fn set_selection_sink(&mut self, sink: impl InstrumentSelectionSink + 'static) {
        self.selection_sink = Some(Box::new(sink));
    }

    pub fn drill_down(&mut self, id: &NodeId) -> Result<&DrillPath, NavigationError> {
        self.apply(DrillCommand::DrillDown(id.clone()))
    }

    pub fn drill_up(&mut self) -> Result<&DrillPath, NavigationError> {
        self.apply(DrillCommand::DrillUp)
    }

    pub fn reset(&mut self) -> Result<&DrillPath, NavigationError> {
        self.apply(DrillCommand::Reset)
    }

    pub fn select_lateral(&mut self, level: usize, id: &NodeId) -> Result<&DrillPath, NavigationError> {
        self.apply(DrillCommand::SelectLateral { level, id: id.clone() })
    }

    /// Breadcrumb at `depth` keeps the first `depth` selections; 0 is the root
    pub fn click_breadcrumb(&mut self, depth: usize) -> Result<&DrillPath, NavigationError> {
        self.apply(DrillCommand::Truncate(depth))
    }

    pub fn apply(&mut self, command: DrillCommand) -> Result<&DrillPath, NavigationError> {
        match plan_transition(&self.path, &command, self.hierarchy.as_ref()) {
            Ok(next) => {
                if next != self.path {
                    let previous = std::mem::replace(&mut self.path, next);
                    log_debug!(
                        LogComponent::Domain("DrillNavigator"),
                        "{:?}: {:?} -> {:?}",
                        command,
                        previous.as_slice(),
                        self.path.as_slice()
                    );
                    self.dispatcher.publish_drill_event(DrillEvent::PathChanged {
                        previous,
                        current: self.path.clone(),
                    });
                }
                Ok(&self.path)
            }
            Err(reason) => {
                log_warn!(
                    LogComponent::Domain("DrillNavigator"),
                    "Rejected {:?} at {:?}: {}",
                    command,
                    self.path.as_slice(),
                    reason
                );
                self.dispatcher
                    .publish_drill_event(DrillEvent::TransitionRejected { reason: reason.clone() });
                Err(reason)
            }
        }
    }

    /// Segment click semantics per ring
    pub fn click(&mut self, level: RingLevel, id: &NodeId) -> ClickOutcome {
        let index = level.index();
        match level {
            RingLevel::Fundamentals => ClickOutcome::Ignored,
            RingLevel::Etf if self.path.get(index) == Some(id) => {
                match self.attempt(DrillCommand::Reset) {
                    Ok(()) => ClickOutcome::Collapsed,
                    Err(reason) => ClickOutcome::Rejected(reason),
                }
            }
            RingLevel::Sector | RingLevel::Instrument if self.path.get(index) == Some(id) => {
                ClickOutcome::Ignored
            }
            RingLevel::Etf | RingLevel::Sector => {
                match self.attempt(DrillCommand::SelectLateral { level: index, id: id.clone() }) {
                    Ok(()) => ClickOutcome::Navigated,
                    Err(reason) => ClickOutcome::Rejected(reason),
                }
            }
            RingLevel::Instrument => {
                match self.attempt(DrillCommand::SelectLateral { level: index, id: id.clone() }) {
                    Ok(()) => self.notify_instrument_selected(id),
                    Err(reason) => ClickOutcome::Rejected(reason),
                }
            }
        }
    }

    fn attempt(&mut self, command: DrillCommand) -> Result<(), NavigationError> {
        self.apply(command).map(|_| ())
    }

    fn notify_instrument_selected(&mut self, id: &NodeId) -> ClickOutcome {
        let Some(symbol) = self.hierarchy.node(id).and_then(|node| node.symbol.clone()) else {
            return ClickOutcome::Navigated;
        };
        if let Some(sink) = &self.selection_sink {
            sink.on_instrument_selected(&symbol);
        }
        self.dispatcher.publish_drill_event(DrillEvent::InstrumentSelected {
            node: id.clone(),
            symbol: symbol.clone(),
        });
        ClickOutcome::InstrumentSelected(symbol)
    }

    /// `Root` followed by the scope-stripped label of every selection
    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        let root = Breadcrumb { label: ROOT_BREADCRUMB.to_string(), depth: 0, node_id: None };
        std::iter::once(root)
            .chain(self.path.iter().enumerate().map(|(level, id)| Breadcrumb {
                label: self
                    .hierarchy
                    .node(id)
                    .map(|node| node.label.clone())
                    .unwrap_or_else(|| id.display_name().to_string()),
                depth: level + 1,
                node_id: Some(id.clone()),
            }))
            .collect()
    }
}
