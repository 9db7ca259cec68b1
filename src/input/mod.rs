pub mod events;
pub mod handler;

// Re-export the essential types
pub use events::{EventHandled, InputEvent};
pub use handler::{CameraController, ControllerMode, InteractionState};
