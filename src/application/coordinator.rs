use serde::{Deserialize, Serialize};
use std::rc::Rc;

use crate::domain::{
    errors::{AppError, AppResult, NavigationError},
    events::DrillEvent,
    hierarchy::{HierarchyIndex, NodeId},
    interaction::{InteractionController, InteractionStyle, RenderedRing, Tooltip},
    logging::{LogComponent, get_logger},
    market_data::InstrumentFeed,
    navigation::{Breadcrumb, ClickOutcome, DrillNavigator, DrillPath, InstrumentSelectionSink},
    sunburst::{LayoutConfig, RadialPartitionLayout, RingLevel, RingSet, SegmentService},
};
use crate::view_state::ViewState;

/// Everything a session can be tuned with
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionConfig {
    pub layout: LayoutConfig,
    pub interaction: InteractionStyle,
    pub view: ViewState,
}

impl SessionConfig {
    pub fn from_json(json: &str) -> AppResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.layout.validate().map_err(AppError::Validation)?;
        Ok(config)
    }
}

/// Full output of one synchronous recomputation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderFrame {
    pub rings: Vec<RenderedRing>,
    /// Rings the path exposes; `rings` may hold fewer when some did not fit
    pub requested_rings: usize,
    pub max_radius: f64,
    pub center: (f64, f64),
    pub path: DrillPath,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub tooltip: Option<Tooltip>,
}

/// One interactive drill-down surface.
///
/// Holds the navigator, hover state and geometry settings. The live feed is
/// passed in on every call, so a new snapshot, a resize, or an interaction
/// each lead to a full recomputation of the visible rings.
pub struct DrillDownSession {
    navigator: DrillNavigator,
    interaction: InteractionController,
    layout: RadialPartitionLayout,
    view: ViewState,
}

impl DrillDownSession {
    pub fn new(hierarchy: Rc<dyn HierarchyIndex>, config: SessionConfig) -> Self {
        get_logger().info(
            LogComponent::Application("DrillDownSession"),
            &format!("Creating session with {} top-level nodes", hierarchy.roots().len()),
        );
        Self {
            navigator: DrillNavigator::new(hierarchy),
            interaction: InteractionController::new(config.interaction),
            layout: RadialPartitionLayout::new(config.layout),
            view: config.view,
        }
    }

    pub fn navigator(&self) -> &DrillNavigator {
        &self.navigator
    }

    pub fn interaction(&self) -> &InteractionController {
        &self.interaction
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn path(&self) -> &DrillPath {
        self.navigator.path()
    }

    pub fn subscribe<F>(&mut self, handler: F)
    where
        F: Fn(&DrillEvent) + 'static,
    {
        self.navigator.subscribe(handler);
    }

    pub fn set_selection_sink(&mut self, sink: impl InstrumentSelectionSink + 'static) {
        self.navigator.set_selection_sink(sink);
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.view.resize(width, height);
        get_logger().debug(
            LogComponent::Application("DrillDownSession"),
            &format!("Container resized to {}x{}", width, height),
        );
    }

    /// Segments of every ring the current path exposes
    pub fn rings(&self, feed: &dyn InstrumentFeed) -> RingSet {
        SegmentService::new(self.navigator.hierarchy(), feed).build_rings(self.navigator.path())
    }

    pub fn render_frame(&self, feed: &dyn InstrumentFeed) -> RenderFrame {
        let rings = self.rings(feed);
        let max_radius = self.view.max_radius();
        let geometry = self.layout.layout_rings(&rings, max_radius);
        if geometry.len() < rings.len() {
            get_logger().debug(
                LogComponent::Application("DrillDownSession"),
                &format!("{} of {} rings fit at radius {:.1}", geometry.len(), rings.len(), max_radius),
            );
        }

        RenderFrame {
            rings: self.interaction.decorate(geometry, self.navigator.path()),
            requested_rings: rings.len(),
            max_radius,
            center: self.view.center(),
            path: self.navigator.path().clone(),
            breadcrumbs: self.navigator.breadcrumbs(),
            tooltip: self.interaction.tooltip().cloned(),
        }
    }

    /// Segment click; hover is cleared whenever the path changes
    pub fn click(&mut self, level: RingLevel, id: &NodeId) -> ClickOutcome {
        let outcome = self.navigator.click(level, id);
        if matches!(
            outcome,
            ClickOutcome::Collapsed | ClickOutcome::Navigated | ClickOutcome::InstrumentSelected(_)
        ) {
            self.interaction.pointer_leave();
        }
        outcome
    }

    /// Click at container coordinates, resolved through the current geometry
    pub fn click_at(&mut self, x: f64, y: f64, feed: &dyn InstrumentFeed) -> ClickOutcome {
        match self.segment_at(x, y, feed) {
            Some((level, id)) => self.click(level, &id),
            None => ClickOutcome::Ignored,
        }
    }

    /// Hover is cleared only when the transition is accepted
    pub fn click_breadcrumb(&mut self, depth: usize) -> Result<&DrillPath, NavigationError> {
        let path = self.navigator.click_breadcrumb(depth)?;
        self.interaction.pointer_leave();
        Ok(path)
    }

    pub fn drill_up(&mut self) -> Result<&DrillPath, NavigationError> {
        let path = self.navigator.drill_up()?;
        self.interaction.pointer_leave();
        Ok(path)
    }

    pub fn reset(&mut self) -> Result<&DrillPath, NavigationError> {
        let path = self.navigator.reset()?;
        self.interaction.pointer_leave();
        Ok(path)
    }

    /// Pointer entered the segment `id` on ring `level`
    pub fn hover(
        &mut self,
        level: RingLevel,
        id: &NodeId,
        pointer: (f64, f64),
        feed: &dyn InstrumentFeed,
    ) -> Option<&Tooltip> {
        let rings = self.rings(feed);
        let ring = rings.ring(level)?;
        let segment = ring.find(id)?;
        Some(self.interaction.pointer_enter(segment, ring, pointer, feed))
    }

    /// Pointer at container coordinates; enters, moves within, or leaves a segment
    pub fn hover_at(&mut self, x: f64, y: f64, feed: &dyn InstrumentFeed) -> Option<&Tooltip> {
        let Some((level, id)) = self.segment_at(x, y, feed) else {
            self.interaction.pointer_leave();
            return None;
        };
        let same_target = self
            .interaction
            .hovered()
            .is_some_and(|target| target.segment_id == id && target.ring_level == level);
        if same_target {
            self.interaction.pointer_move((x, y));
            return self.interaction.tooltip();
        }
        self.hover(level, &id, (x, y), feed)
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.interaction.pointer_move((x, y));
    }

    pub fn pointer_leave(&mut self) {
        self.interaction.pointer_leave();
    }

    fn segment_at(&self, x: f64, y: f64, feed: &dyn InstrumentFeed) -> Option<(RingLevel, NodeId)> {
        let (cx, cy) = self.view.to_center_coords(x, y);
        let geometry = self.layout.layout_rings(&self.rings(feed), self.view.max_radius());
        geometry.iter().find_map(|ring| {
            ring.hit_test(cx, cy).map(|arc| (ring.level, arc.segment.id.clone()))
        })
    }
}
