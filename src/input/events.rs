use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Gestures and surface changes delivered to the camera controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InputEvent {
    /// Primary pointer pressed on the viewport
    PointerDown { position: Point },
    /// Pointer moved, with or without a button held
    PointerMove { position: Point },
    /// Pointer released
    PointerUp,
    /// Pointer left the viewport
    PointerLeave,
    /// Scroll wheel, positive delta zooms out
    Wheel { delta_y: f64 },
    /// Rendering surface changed pixel size
    Resize { width: f64, height: f64 },
}

/// Whether an event was handled; `Handled` also means the host's default
/// behaviour (page scroll for the wheel) must be suppressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventHandled {
    Handled,
    NotHandled,
}
