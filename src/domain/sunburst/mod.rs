//! Sunburst aggregate: segments, rings and their radial layout.

pub mod layout;
pub mod services;
pub mod value_objects;

pub use layout::*;
pub use services::*;
pub use value_objects::*;
