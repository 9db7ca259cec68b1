//! Prelude module for common concave types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use concave::prelude::*;`

pub use crate::core::{
    config::{InteractionConfig, InteractionProfile, ProjectionConfig, ServerConfig, ViewerOptions},
    geo::{LatLng, Point},
    viewport::Viewport,
};

pub use crate::layers::marker::Marker;

pub use crate::input::{
    events::{EventHandled, InputEvent},
    handler::{CameraController, ControllerMode},
};

pub use crate::rendering::{
    camera::CameraState,
    projection::{ProjectedPoint, Projector, ScreenPosition},
};

pub use crate::data::{
    landmarks::Landmark,
    source::{MarkerQuery, SessionMarkerCache},
};

pub use crate::tools::{Tool, ToolContext, ToolOutput, ToolRegistry};

pub use crate::ui::widget::{DetailRequest, ViewFrame, ViewSession, ViewerProps};

pub use crate::runtime::{spawn_session, DetailFetcher, SessionHandle, ToolDetailFetcher};

pub use crate::server::McpServer;

pub use crate::{Error, Result};

pub use std::{sync::Arc, time::Duration};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
