//! Hierarchy aggregate: static ETF → sector → sub-sector → instrument membership.

pub mod entities;
pub mod repositories;
pub mod value_objects;

pub use entities::*;
pub use repositories::*;
pub use value_objects::*;
