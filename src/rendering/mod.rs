pub mod camera;
pub mod projection;

// Re-export main types
pub use camera::{CameraBasis, CameraState};
pub use projection::{ProjectedPoint, Projector, ScreenPosition};
