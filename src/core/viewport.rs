use crate::core::constants::DEFAULT_ASPECT;
use serde::{Deserialize, Serialize};

/// Pixel dimensions of the rendering surface.
///
/// The aspect ratio feeds the projector and is recomputed from the size on
/// every call, so a resize takes effect on the next projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// Creates a new viewport
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Sets the viewport size
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Width over height, treating a height below one pixel as one
    pub fn aspect(&self) -> f64 {
        self.width / self.height.max(1.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_ASPECT * 500.0, 500.0)
    }
}
