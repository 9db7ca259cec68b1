//! # Concave
//!
//! Tools and headless widgets for looking at the Earth from the inside.
//!
//! The crate is built around a small spherical projector: a camera stands at
//! the globe's center, looks outward along a latitude/longitude, and projects
//! landmarks onto the viewport. Around it sit the camera controller (drag,
//! wheel and auto-rotate), a line-based Arduino sketch highlighter, the
//! callable tools that feed both widgets, and an async view session driver.

pub mod circuit;
pub mod core;
pub mod data;
pub mod input;
pub mod layers;
pub mod prelude;
pub mod rendering;
pub mod runtime;
pub mod server;
pub mod spatial;
pub mod tools;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{InteractionConfig, InteractionProfile, ProjectionConfig, ServerConfig, ViewerOptions},
    geo::{LatLng, Point},
    viewport::Viewport,
};

pub use layers::marker::Marker;

pub use input::{events::InputEvent, handler::CameraController};

pub use rendering::{
    camera::CameraState,
    projection::{ProjectedPoint, Projector},
};

pub use circuit::{highlight_line, highlight_source, Token, TokenKind};

pub use data::{landmarks::Landmark, source::SessionMarkerCache};

pub use tools::{Tool, ToolContext, ToolOutput, ToolRegistry};

pub use ui::{ViewFrame, ViewSession, ViewerProps};

pub use runtime::{spawn_session, DetailFetcher, SessionCommand, SessionHandle};

pub use server::McpServer;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Fetch error: {0}")]
    Fetch(String),
}
