use serde::Serialize;

use crate::domain::errors::NavigationError;
use crate::domain::hierarchy::{HierarchyIndex, NodeId};

/// ETF, sector, instrument
pub const MAX_DRILL_DEPTH: usize = 3;

/// Ordered selection from the top ring inwards.
///
/// Every element is a drill child of the one before it; values are only
/// produced by [`plan_transition`] or [`DrillPath::validated`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DrillPath(Vec<NodeId>);

impl DrillPath {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Rebuild a path from stored ids, checking every link
    pub fn validated(
        ids: Vec<NodeId>,
        hierarchy: &dyn HierarchyIndex,
    ) -> Result<Self, NavigationError> {
        let mut path = Self::new();
        for id in ids {
            path = plan_transition(&path, &DrillCommand::DrillDown(id), hierarchy)?;
        }
        Ok(path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, level: usize) -> Option<&NodeId> {
        self.0.get(level)
    }

    pub fn deepest(&self) -> Option<&NodeId> {
        self.0.last()
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.0.contains(id)
    }

    pub fn as_slice(&self) -> &[NodeId] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeId> {
        self.0.iter()
    }

    /// Every link is a drill child of its predecessor
    pub fn is_valid(&self, hierarchy: &dyn HierarchyIndex) -> bool {
        self.len() <= MAX_DRILL_DEPTH
            && self.0.iter().enumerate().all(|(level, id)| {
                let parent = if level == 0 { None } else { self.0.get(level - 1) };
                hierarchy.is_drill_child(parent, id)
            })
    }

    fn prefix(&self, len: usize) -> Vec<NodeId> {
        self.0[..len.min(self.0.len())].to_vec()
    }
}

/// Every way the path can change
#[derive(Debug, Clone, PartialEq)]
pub enum DrillCommand {
    DrillDown(NodeId),
    DrillUp,
    Reset,
    /// Replace the element at `level` and discard everything deeper
    SelectLateral { level: usize, id: NodeId },
    /// Keep the first `depth` elements
    Truncate(usize),
}

/// Compute the path that `command` leads to from `current`.
///
/// Pure: the whole new path is produced in one step so callers can apply it
/// atomically, and an `Err` means the caller keeps `current` untouched.
pub fn plan_transition(
    current: &DrillPath,
    command: &DrillCommand,
    hierarchy: &dyn HierarchyIndex,
) -> Result<DrillPath, NavigationError> {
    match command {
        DrillCommand::DrillDown(id) => {
            if current.len() >= MAX_DRILL_DEPTH {
                return Err(NavigationError::PathTooDeep);
            }
            select_at(current, current.len(), id, hierarchy)
        }
        DrillCommand::DrillUp => {
            if current.is_empty() {
                return Err(NavigationError::EmptyPath);
            }
            Ok(DrillPath(current.prefix(current.len() - 1)))
        }
        DrillCommand::Reset => Ok(DrillPath::new()),
        DrillCommand::SelectLateral { level, id } => {
            if *level >= MAX_DRILL_DEPTH {
                return Err(NavigationError::NotDrillable(*level));
            }
            if *level > current.len() {
                return Err(NavigationError::LevelOutOfRange { level: *level, depth: current.len() });
            }
            select_at(current, *level, id, hierarchy)
        }
        DrillCommand::Truncate(depth) => {
            if *depth > current.len() {
                return Err(NavigationError::LevelOutOfRange { level: *depth, depth: current.len() });
            }
            Ok(DrillPath(current.prefix(*depth)))
        }
    }
}

fn select_at(
    current: &DrillPath,
    level: usize,
    id: &NodeId,
    hierarchy: &dyn HierarchyIndex,
) -> Result<DrillPath, NavigationError> {
    if hierarchy.node(id).is_none() {
        return Err(NavigationError::UnknownNode(id.clone()));
    }
    let parent = if level == 0 { None } else { current.get(level - 1) };
    if !hierarchy.is_drill_child(parent, id) {
        return Err(NavigationError::NotADrillChild { parent: parent.cloned(), child: id.clone() });
    }
    let mut ids = current.prefix(level);
    ids.push(id.clone());
    Ok(DrillPath(ids))
}
