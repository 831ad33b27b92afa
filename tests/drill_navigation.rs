mod common;

use common::*;
use quickcheck_macros::quickcheck;
use sector_drill_wasm::domain::errors::NavigationError;
use sector_drill_wasm::domain::events::DrillEvent;
use sector_drill_wasm::domain::hierarchy::{HierarchyIndex, NodeId};
use sector_drill_wasm::domain::market_data::Symbol;
use sector_drill_wasm::domain::navigation::{
    ClickOutcome, DrillCommand, DrillNavigator, DrillPath, MAX_DRILL_DEPTH, plan_transition,
};
use sector_drill_wasm::domain::sunburst::RingLevel;
use std::cell::RefCell;
use std::rc::Rc;

fn navigator() -> DrillNavigator {
    DrillNavigator::new(shared_hierarchy())
}

fn recorded(navigator: &mut DrillNavigator) -> Rc<RefCell<Vec<DrillEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    navigator.subscribe(move |event| sink.borrow_mut().push(event.clone()));
    events
}

fn ids(path: &DrillPath) -> Vec<&str> {
    path.iter().map(|id| id.value()).collect()
}

fn deep_navigator() -> DrillNavigator {
    let mut navigator = navigator();
    navigator.click(RingLevel::Etf, &id(QQQ));
    navigator.click(RingLevel::Sector, &id(QQQ_TECH));
    navigator.click(RingLevel::Instrument, &id(NVDA));
    navigator
}

#[test]
fn clicking_a_top_level_segment_twice_collapses() {
    let mut navigator = navigator();

    assert_eq!(navigator.click(RingLevel::Etf, &id(QQQ)), ClickOutcome::Navigated);
    assert_eq!(ids(navigator.path()), [QQQ]);
    assert_eq!(navigator.visible_ring_count(), 2);

    assert_eq!(navigator.click(RingLevel::Etf, &id(QQQ)), ClickOutcome::Collapsed);
    assert!(navigator.path().is_empty());
    assert_eq!(navigator.visible_ring_count(), 1);
}

#[test]
fn drilling_to_an_instrument_notifies_the_sink_once() {
    let mut navigator = navigator();
    let selected = Rc::new(RefCell::new(Vec::<Symbol>::new()));
    let sink = Rc::clone(&selected);
    navigator.set_selection_sink(move |symbol: &Symbol| sink.borrow_mut().push(symbol.clone()));

    navigator.click(RingLevel::Etf, &id(QQQ));
    navigator.click(RingLevel::Sector, &id(QQQ_TECH));
    let outcome = navigator.click(RingLevel::Instrument, &id(NVDA));

    assert_eq!(outcome, ClickOutcome::InstrumentSelected(Symbol::from("NVDA")));
    assert_eq!(ids(navigator.path()), [QQQ, QQQ_TECH, NVDA]);
    assert_eq!(*selected.borrow(), vec![Symbol::from("NVDA")]);

    // clicking the selected instrument again is a no-op
    assert_eq!(navigator.click(RingLevel::Instrument, &id(NVDA)), ClickOutcome::Ignored);
    assert_eq!(selected.borrow().len(), 1);
}

#[test]
fn lateral_sector_switch_is_a_single_atomic_change() {
    let mut navigator = deep_navigator();
    let events = recorded(&mut navigator);

    assert_eq!(navigator.click(RingLevel::Sector, &id(QQQ_CONSUMER)), ClickOutcome::Navigated);

    let events = events.borrow();
    assert_eq!(events.len(), 1);
    match &events[0] {
        DrillEvent::PathChanged { previous, current } => {
            assert_eq!(ids(previous), [QQQ, QQQ_TECH, NVDA]);
            assert_eq!(ids(current), [QQQ, QQQ_CONSUMER]);
        }
        other => panic!("unexpected event {:?}", other),
    }
}

#[test]
fn lateral_etf_switch_discards_deeper_levels() {
    let mut navigator = deep_navigator();

    assert_eq!(navigator.click(RingLevel::Etf, &id(SPY)), ClickOutcome::Navigated);
    assert_eq!(ids(navigator.path()), [SPY]);
}

#[test]
fn reclicking_the_selected_sector_changes_nothing() {
    let mut navigator = deep_navigator();
    let events = recorded(&mut navigator);

    assert_eq!(navigator.click(RingLevel::Sector, &id(QQQ_TECH)), ClickOutcome::Ignored);
    assert_eq!(ids(navigator.path()), [QQQ, QQQ_TECH, NVDA]);
    assert!(events.borrow().is_empty());
}

#[test]
fn fundamentals_ring_is_not_clickable() {
    let mut navigator = deep_navigator();
    let slice = NodeId::new(format!("{}#price", NVDA));

    assert_eq!(navigator.click(RingLevel::Fundamentals, &slice), ClickOutcome::Ignored);
    assert_eq!(navigator.path().len(), MAX_DRILL_DEPTH);
}

#[test]
fn same_named_sector_under_another_etf_is_rejected() {
    let mut navigator = navigator();
    navigator.click(RingLevel::Etf, &id(QQQ));
    let events = recorded(&mut navigator);

    let outcome = navigator.click(RingLevel::Sector, &id(SPY_TECH));
    assert_eq!(
        outcome,
        ClickOutcome::Rejected(NavigationError::NotADrillChild {
            parent: Some(id(QQQ)),
            child: id(SPY_TECH),
        })
    );
    assert_eq!(ids(navigator.path()), [QQQ]);
    assert!(matches!(events.borrow().as_slice(), [DrillEvent::TransitionRejected { .. }]));
}

#[test]
fn invalid_commands_leave_the_path_untouched() {
    let mut navigator = navigator();
    navigator.click(RingLevel::Etf, &id(QQQ));
    navigator.click(RingLevel::Sector, &id(QQQ_TECH));
    let before = navigator.path().clone();

    assert_eq!(
        navigator.select_lateral(2, &id(AMZN)).err(),
        Some(NavigationError::NotADrillChild { parent: Some(id(QQQ_TECH)), child: id(AMZN) })
    );
    assert_eq!(navigator.drill_down(&id("QQQ/Energy")).err(), Some(NavigationError::UnknownNode(id("QQQ/Energy"))));
    assert_eq!(
        navigator.select_lateral(3, &id(NVDA)).err(),
        Some(NavigationError::NotDrillable(3))
    );
    assert_eq!(navigator.click_breadcrumb(4).err(), Some(NavigationError::LevelOutOfRange { level: 4, depth: 2 }));
    assert_eq!(navigator.path(), &before);
}

#[test]
fn depth_is_bounded_and_empty_path_cannot_go_up() {
    let mut navigator = deep_navigator();
    assert_eq!(navigator.drill_down(&id(MSFT)).err(), Some(NavigationError::PathTooDeep));

    navigator.reset().expect("reset always succeeds");
    assert_eq!(navigator.drill_up().err(), Some(NavigationError::EmptyPath));
}

#[test]
fn drill_up_removes_the_deepest_selection() {
    let mut navigator = deep_navigator();
    navigator.drill_up().expect("path is not empty");
    assert_eq!(ids(navigator.path()), [QQQ, QQQ_TECH]);
}

#[test]
fn instruments_of_flattened_sub_sectors_are_drill_children() {
    let hierarchy = hierarchy();
    let children = hierarchy.drill_children(Some(&id(QQQ_TECH)));
    let children: Vec<_> = children.iter().map(|id| id.value()).collect();
    assert_eq!(children, [NVDA, AVGO, MSFT]);
    assert!(hierarchy.is_drill_child(Some(&id(QQQ_TECH)), &id(MSFT)));
    assert!(!hierarchy.is_drill_child(Some(&id(QQQ)), &id("QQQ/Technology/Software")));
}

#[test]
fn breadcrumbs_list_root_and_selections() {
    let mut navigator = deep_navigator();

    let labels: Vec<_> = navigator.breadcrumbs().into_iter().map(|crumb| crumb.label).collect();
    assert_eq!(labels, ["Root", "QQQ", "Technology", "NVDA"]);

    navigator.click_breadcrumb(1).expect("crumb within path");
    assert_eq!(ids(navigator.path()), [QQQ]);

    navigator.click_breadcrumb(0).expect("root crumb");
    assert!(navigator.path().is_empty());
    assert_eq!(navigator.breadcrumbs().len(), 1);
}

#[test]
fn stored_paths_are_revalidated() {
    let hierarchy = hierarchy();
    let path = DrillPath::validated(vec![id(QQQ), id(QQQ_CONSUMER), id(ZERO)], &hierarchy)
        .expect("valid chain");
    assert!(path.is_valid(&hierarchy));

    let broken = DrillPath::validated(vec![id(SPY), id(QQQ_CONSUMER)], &hierarchy);
    assert!(broken.is_err());
}

#[test]
fn events_are_only_published_on_real_changes() {
    let mut navigator = navigator();
    let events = recorded(&mut navigator);

    navigator.reset().expect("reset always succeeds");
    assert!(events.borrow().is_empty());

    navigator.drill_down(&id(QQQ)).expect("top-level node");
    navigator.select_lateral(0, &id(QQQ)).expect("same node");
    assert_eq!(events.borrow().len(), 1);
}

fn all_ids(hierarchy: &dyn HierarchyIndex) -> Vec<NodeId> {
    let mut ids = Vec::new();
    let mut stack: Vec<NodeId> = hierarchy.roots().to_vec();
    while let Some(current) = stack.pop() {
        stack.extend(hierarchy.children_of(&current).iter().cloned());
        ids.push(current);
    }
    ids.sort();
    ids
}

#[quickcheck]
fn random_command_sequences_keep_the_path_valid(steps: Vec<(u8, u8, u8)>) -> bool {
    let hierarchy = hierarchy();
    let everything = all_ids(&hierarchy);
    let mut path = DrillPath::new();

    for (kind, a, b) in steps {
        let candidates = hierarchy.drill_children(path.deepest());
        // half of the targets are real drill children, the rest arbitrary nodes
        let target = if a % 2 == 0 && !candidates.is_empty() {
            candidates[b as usize % candidates.len()].clone()
        } else {
            everything[b as usize % everything.len()].clone()
        };
        let command = match kind % 5 {
            0 => DrillCommand::DrillDown(target),
            1 => DrillCommand::DrillUp,
            2 => DrillCommand::Reset,
            3 => DrillCommand::SelectLateral { level: a as usize % 4, id: target },
            _ => DrillCommand::Truncate(a as usize % 4),
        };

        if let Ok(next) = plan_transition(&path, &command, &hierarchy) {
            path = next;
        }
        if !path.is_valid(&hierarchy) {
            return false;
        }
    }
    true
}
