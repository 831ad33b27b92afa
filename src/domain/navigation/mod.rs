//! Drill-path state machine.

pub mod drill_path;
pub mod navigator;

pub use drill_path::*;
pub use navigator::*;
