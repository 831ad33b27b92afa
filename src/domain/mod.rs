pub mod errors;
pub mod events;
pub mod hierarchy;
pub mod interaction;
pub mod logging;
pub mod market_data;
pub mod navigation;
pub mod sunburst;
