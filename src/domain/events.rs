use std::fmt::Debug;

use crate::domain::errors::NavigationError;
use crate::domain::hierarchy::NodeId;
use crate::domain::market_data::Symbol;
use crate::domain::logging::LogComponent;
use crate::domain::navigation::DrillPath;
use crate::log_trace;

/// Base trait for all domain events
pub trait DomainEvent: Debug + Clone {
    fn event_type(&self) -> &'static str;
}

/// Events related to drill navigation
#[derive(Debug, Clone, PartialEq)]
pub enum DrillEvent {
    PathChanged { previous: DrillPath, current: DrillPath },
    InstrumentSelected { node: NodeId, symbol: Symbol },
    TransitionRejected { reason: NavigationError },
}

impl DomainEvent for DrillEvent {
    fn event_type(&self) -> &'static str {
        match self {
            DrillEvent::PathChanged { .. } => "PathChanged",
            DrillEvent::InstrumentSelected { .. } => "InstrumentSelected",
            DrillEvent::TransitionRejected { .. } => "TransitionRejected",
        }
    }
}

/// Event dispatcher for publishing events
pub trait EventDispatcher {
    fn publish_drill_event(&self, event: DrillEvent);
}

/// Synchronous in-memory dispatcher: handlers run before `publish` returns
#[derive(Default)]
pub struct InMemoryEventDispatcher {
    drill_handlers: Vec<Box<dyn Fn(&DrillEvent)>>,
}

impl InMemoryEventDispatcher {
    pub fn new() -> Self {
        Self { drill_handlers: Vec::new() }
    }

    pub fn subscribe_to_drill_events<F>(&mut self, handler: F)
    where
        F: Fn(&DrillEvent) + 'static,
    {
        self.drill_handlers.push(Box::new(handler));
    }
}

impl EventDispatcher for InMemoryEventDispatcher {
    fn publish_drill_event(&self, event: DrillEvent) {
        log_trace!(
            LogComponent::Domain("EventDispatcher"),
            "{} to {} handlers",
            event.event_type(),
            self.drill_handlers.len()
        );
        for handler in &self.drill_handlers {
            handler(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn handlers_run_in_subscription_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = InMemoryEventDispatcher::new();
        for tag in ["first", "second"] {
            let seen = Rc::clone(&seen);
            dispatcher.subscribe_to_drill_events(move |event: &DrillEvent| {
                seen.borrow_mut().push(format!("{}:{}", tag, event.event_type()));
            });
        }

        dispatcher.publish_drill_event(DrillEvent::TransitionRejected { reason: NavigationError::EmptyPath });

        assert_eq!(*seen.borrow(), vec!["first:TransitionRejected", "second:TransitionRejected"]);
    }

    #[test]
    fn event_type_names_each_variant() {
        let symbol = Symbol::from("NVDA");
        let selected = DrillEvent::InstrumentSelected { node: NodeId::from("QQQ/Tech/Semis/NVDA"), symbol };
        assert_eq!(selected.event_type(), "InstrumentSelected");
    }
}
