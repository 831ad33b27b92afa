use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::domain::hierarchy::NodeId;

/// Reasons a drill transition is refused. The path is never modified when one
/// of these is produced.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationError {
    UnknownNode(NodeId),
    NotADrillChild { parent: Option<NodeId>, child: NodeId },
    LevelOutOfRange { level: usize, depth: usize },
    NotDrillable(usize),
    PathTooDeep,
    EmptyPath,
}

impl Display for NavigationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            NavigationError::UnknownNode(id) => write!(f, "Unknown node: {}", id),
            NavigationError::NotADrillChild { parent: Some(parent), child } => {
                write!(f, "{} is not a drill child of {}", child, parent)
            }
            NavigationError::NotADrillChild { parent: None, child } => {
                write!(f, "{} is not a top-level node", child)
            }
            NavigationError::LevelOutOfRange { level, depth } => {
                write!(f, "Ring level {} is out of range for path depth {}", level, depth)
            }
            NavigationError::NotDrillable(level) => write!(f, "Ring {} is not drillable", level),
            NavigationError::PathTooDeep => write!(f, "Drill path is already at maximum depth"),
            NavigationError::EmptyPath => write!(f, "Drill path is empty"),
        }
    }
}

impl std::error::Error for NavigationError {}

/// Simplified error system for the bridge and loaders
#[derive(Debug, Clone)]
pub enum AppError {
    Validation(String),
    Navigation(NavigationError),
    Serialization(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            AppError::Validation(msg) => write!(f, "Validation Error: {}", msg),
            AppError::Navigation(e) => write!(f, "Navigation Error: {}", e),
            AppError::Serialization(msg) => write!(f, "Serialization Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<NavigationError> for AppError {
    fn from(error: NavigationError) -> Self {
        AppError::Navigation(error)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        AppError::Serialization(error.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
