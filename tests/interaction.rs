mod common;

use common::*;
use sector_drill_wasm::domain::interaction::{InteractionController, InteractionStyle};
use sector_drill_wasm::domain::navigation::DrillPath;
use sector_drill_wasm::domain::sunburst::{RadialPartitionLayout, RingLevel, RingSet, SegmentService};

fn tech_path() -> DrillPath {
    DrillPath::validated(vec![id(QQQ), id(QQQ_TECH)], &hierarchy()).expect("valid chain")
}

fn rings(path: &DrillPath) -> RingSet {
    let hierarchy = hierarchy();
    let feed = feed();
    SegmentService::new(&hierarchy, &feed).build_rings(path)
}

#[test]
fn selected_segments_are_highlighted_and_siblings_dimmed() {
    let path = tech_path();
    let rings = rings(&path);
    let controller = InteractionController::default();

    let qqq = rings.find_segment(RingLevel::Etf, &id(QQQ)).expect("QQQ segment");
    let spy = rings.find_segment(RingLevel::Etf, &id(SPY)).expect("SPY segment");
    let tech = rings.find_segment(RingLevel::Sector, &id(QQQ_TECH)).expect("tech segment");
    let consumer = rings.find_segment(RingLevel::Sector, &id(QQQ_CONSUMER)).expect("consumer segment");
    let nvda = rings.find_segment(RingLevel::Instrument, &id(NVDA)).expect("NVDA segment");

    let state = controller.segment_state(qqq, 0, &path);
    assert!(state.highlighted && !state.dimmed);
    assert_eq!(state.opacity, 1.0);
    assert_ne!(state.fill, qqq.color);
    assert_eq!(state.stroke_width, InteractionStyle::default().highlight_stroke_width);

    let state = controller.segment_state(spy, 0, &path);
    assert!(!state.highlighted && state.dimmed);
    assert_eq!(state.opacity, InteractionStyle::default().dim_opacity);
    assert_eq!(state.fill, spy.color);

    assert!(controller.segment_state(tech, 1, &path).highlighted);
    assert!(controller.segment_state(consumer, 1, &path).dimmed);

    // the innermost ring has no selection yet, nothing is dimmed there
    let state = controller.segment_state(nvda, 2, &path);
    assert!(!state.highlighted && !state.dimmed);
}

#[test]
fn nothing_is_dimmed_before_the_first_selection() {
    let path = DrillPath::new();
    let rings = rings(&path);
    let controller = InteractionController::default();

    for segment in &rings.rings[0].segments {
        let state = controller.segment_state(segment, 0, &path);
        assert!(!state.highlighted && !state.dimmed);
    }
}

#[test]
fn instrument_tooltip_carries_fundamentals() {
    let path = tech_path();
    let rings = rings(&path);
    let feed = feed();
    let mut controller = InteractionController::default();

    let ring = rings.ring(RingLevel::Instrument).expect("instrument ring");
    let nvda = ring.find(&id(NVDA)).expect("NVDA segment");
    let tooltip = controller.pointer_enter(nvda, ring, (100.0, 50.0), &feed).clone();

    // volumes 4000, missing, 1000 size to 80, 5, 20
    assert!((tooltip.payload.percent_of_ring_total - 80.0 / 105.0 * 100.0).abs() < 1e-9);
    assert_eq!(tooltip.payload.label, "NVDA");
    assert_eq!(tooltip.payload.change_percent, 2.0);
    assert_eq!((tooltip.x, tooltip.y), (112.0, 62.0));

    let extra = tooltip.payload.extra.expect("fundamentals on the instrument ring");
    assert_eq!(extra.price, 120.0);
    assert_eq!(extra.pe_ratio, Some(60.0));

    let avgo = ring.find(&id(AVGO)).expect("AVGO segment");
    assert!(controller.pointer_enter(avgo, ring, (0.0, 0.0), &feed).payload.extra.is_none());
}

#[test]
fn aggregate_tooltip_has_no_fundamentals() {
    let path = tech_path();
    let rings = rings(&path);
    let feed = feed();
    let mut controller = InteractionController::default();

    let ring = rings.ring(RingLevel::Sector).expect("sector ring");
    let tech = ring.find(&id(QQQ_TECH)).expect("tech segment");
    let tooltip = controller.pointer_enter(tech, ring, (0.0, 0.0), &feed);

    assert!(tooltip.payload.extra.is_none());
    assert!((tooltip.payload.change_percent - 1.25).abs() < 1e-9);
}

#[test]
fn tooltip_follows_the_pointer_and_hides_on_leave() {
    let path = tech_path();
    let rings = rings(&path);
    let feed = feed();
    let mut controller = InteractionController::default();

    let ring = rings.ring(RingLevel::Etf).expect("etf ring");
    let qqq = ring.find(&id(QQQ)).expect("QQQ segment");
    controller.pointer_enter(qqq, ring, (10.0, 10.0), &feed);
    assert_eq!(controller.hovered().map(|target| target.ring_level), Some(RingLevel::Etf));

    controller.pointer_move((40.0, 20.0));
    let tooltip = controller.tooltip().expect("tooltip visible");
    assert_eq!((tooltip.x, tooltip.y), (52.0, 32.0));
    assert!(controller.segment_state(qqq, 0, &path).hovered);

    controller.pointer_leave();
    assert!(controller.tooltip().is_none());
    assert!(controller.hovered().is_none());

    // moving without a hovered segment shows nothing
    controller.pointer_move((1.0, 1.0));
    assert!(controller.tooltip().is_none());
}

#[test]
fn decorate_attaches_state_to_every_arc() {
    let path = tech_path();
    let rings = rings(&path);
    let controller = InteractionController::default();
    let geometry = RadialPartitionLayout::default().layout_rings(&rings, 280.0);

    let rendered = controller.decorate(geometry, &path);
    assert_eq!(rendered.len(), 3);
    let dimmed: Vec<_> = rendered
        .iter()
        .flat_map(|ring| ring.arcs.iter())
        .filter(|arc| arc.state.dimmed)
        .map(|arc| arc.geometry.segment.id.value().to_string())
        .collect();
    assert_eq!(dimmed, [SPY, QQQ_CONSUMER]);
}
