//! Core constants for the concave Earth viewer.
//! Keeping them in a single place makes it easier to tweak the camera feel.
//! Runtime code reads them through [`crate::core::config`], never directly.

use std::time::Duration;

/// Default field of view in degrees for a freshly opened view.
pub const DEFAULT_FOV: f64 = 78.0;

/// Narrowest field of view the wheel can zoom to.
pub const MIN_FOV: f64 = 35.0;

/// Widest field of view the wheel can zoom to.
pub const MAX_FOV: f64 = 108.0;

/// Camera latitude saturates here so the basis never reaches a pole.
pub const CAMERA_LAT_LIMIT: f64 = 89.5;

/// Default viewport aspect ratio before the surface reports its size.
pub const DEFAULT_ASPECT: f64 = 16.0 / 10.0;

/// Normalized coordinates beyond ±1 still accepted before culling.
pub const OVERSCAN_MARGIN: f64 = 1.15;

/// |forward.y| above this switches the world-up reference to +Z.
pub const POLE_THRESHOLD: f64 = 0.98;

/// Degrees of longitude per horizontal drag pixel.
pub const DRAG_LNG_SENSITIVITY: f64 = 0.14;

/// Degrees of latitude per vertical drag pixel.
pub const DRAG_LAT_SENSITIVITY: f64 = 0.1;

/// Degrees of field of view per wheel delta unit.
pub const WHEEL_FOV_SENSITIVITY: f64 = 0.03;

/// Longitude advanced per auto-rotate tick.
pub const AUTO_ROTATE_STEP: f64 = 0.12;

/// Auto-rotate tick period.
pub const AUTO_ROTATE_INTERVAL: Duration = Duration::from_millis(25);
