pub mod feed;
pub mod hierarchy_loader;
pub mod services;

pub use feed::*;
pub use hierarchy_loader::*;
