use serde::{Deserialize, Serialize};

/// Size of the rendering container and the disc that fits in it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewState {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(600.0, 600.0, 8.0)
    }
}

impl ViewState {
    pub fn new(width: f64, height: f64, padding: f64) -> Self {
        Self { width: width.max(0.0), height: height.max(0.0), padding: padding.max(0.0) }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    /// Radius available to the outermost ring
    pub fn max_radius(&self) -> f64 {
        (self.width.min(self.height) / 2.0 - self.padding).max(0.0)
    }

    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }

    /// Container coordinates to coordinates relative to the disc center
    pub fn to_center_coords(&self, x: f64, y: f64) -> (f64, f64) {
        let (cx, cy) = self.center();
        (x - cx, y - cy)
    }
}
