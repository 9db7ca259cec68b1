//! The concave Earth viewer as a headless view session.
//!
//! [`ViewSession`] owns everything one mounted viewer needs: the props it was
//! opened with, the camera controller, the current selection and the details
//! panel. Rendering produces a [`ViewFrame`], a plain record a host can draw
//! however it likes. Derived values (aspect, projected markers) are recomputed
//! from current state on every frame.

use crate::core::config::{InteractionProfile, ProjectionConfig, ViewerOptions};
use crate::data::landmarks::Landmark;
use crate::input::events::{EventHandled, InputEvent};
use crate::input::handler::{CameraController, ControllerMode};
use crate::layers::marker::Marker;
use crate::prelude::HashMap;
use crate::rendering::camera::CameraState;
use crate::rendering::projection::{ProjectedPoint, Projector};
use crate::ui::controls::{self, ControlBar};
use crate::ui::popup::{DetailsCard, DetailsPanel};
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

pub const VIEWER_TITLE: &str = "Concave Earth Navigator";
pub const VIEWER_KICKER: &str = "Manufact + Google Maps MCP ready UI";
const SUBTITLE: &str =
    "Drag to look around from Earth's center. Scroll to zoom field-of-view.";

fn default_title() -> String {
    VIEWER_TITLE.to_string()
}

/// Props the viewer widget is opened with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerProps {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub focus: String,
    #[serde(default)]
    pub camera: CameraState,
    #[serde(default)]
    pub markers: Vec<Marker>,
}

/// A detail lookup the host must perform; the answer is only accepted for
/// the same generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRequest {
    pub generation: u64,
    pub id: String,
}

/// One visible marker as drawn, farthest first in [`ReadyFrame::markers`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerView {
    pub id: String,
    pub name: String,
    pub x_percent: f64,
    pub y_percent: f64,
    pub depth: f64,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadyFrame {
    pub kicker: String,
    pub title: String,
    pub subtitle: String,
    pub camera: CameraState,
    pub mode: String,
    pub markers: Vec<MarkerView>,
    pub overlay: Vec<String>,
    pub controls: ControlBar,
    pub details: DetailsPanel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details_card: Option<DetailsCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_id: Option<String>,
}

/// Snapshot of the viewer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ViewFrame {
    #[default]
    Loading,
    Ready(Box<ReadyFrame>),
}

impl ViewFrame {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn ready(&self) -> Option<&ReadyFrame> {
        match self {
            Self::Ready(frame) => Some(frame),
            Self::Loading => None,
        }
    }
}

pub struct ViewSession {
    props: Option<ViewerProps>,
    controller: CameraController,
    projection: ProjectionConfig,
    selected: Option<String>,
    details: DetailsPanel,
    generation: u64,
}

impl ViewSession {
    pub fn new(options: ViewerOptions) -> Self {
        Self {
            props: None,
            controller: CameraController::new(CameraState::default(), options.interaction),
            projection: options.projection,
            selected: None,
            details: DetailsPanel::Empty,
            generation: 0,
        }
    }

    pub fn with_profile(profile: InteractionProfile) -> Self {
        Self::new(profile.resolve())
    }

    pub fn is_loaded(&self) -> bool {
        self.props.is_some()
    }

    /// Apply freshly arrived props: jump to their camera and select the first
    /// marker. Returns the detail lookup for that marker, if any.
    pub fn load(&mut self, props: ViewerProps) -> Option<DetailRequest> {
        log::info!(
            "viewer loaded with {} markers at ({:.2}, {:.2})",
            props.markers.len(),
            props.camera.lat,
            props.camera.lng
        );
        self.controller.set_initial(props.camera);
        let first = props.markers.first().map(|marker| marker.id.clone());
        self.props = Some(props);
        self.selected = None;
        self.details = DetailsPanel::Empty;
        first.map(|id| self.select(id))
    }

    /// Like [`load`](Self::load) but from raw props. Props that do not decode
    /// leave the session in its loading state.
    pub fn load_value(&mut self, value: Value) -> Result<Option<DetailRequest>> {
        match serde_json::from_value::<ViewerProps>(value) {
            Ok(props) => Ok(self.load(props)),
            Err(e) => {
                log::warn!("ignoring malformed viewer props: {e}");
                Err(e.into())
            }
        }
    }

    /// Select a marker and start a new detail lookup generation
    pub fn select(&mut self, id: impl Into<String>) -> DetailRequest {
        let id = id.into();
        self.generation += 1;
        log::debug!("selected {id} (generation {})", self.generation);
        self.selected = Some(id.clone());
        self.details = DetailsPanel::Loading;
        DetailRequest {
            generation: self.generation,
            id,
        }
    }

    /// Accept a lookup result. Results from superseded selections are dropped
    /// and `false` is returned.
    pub fn receive_details(&mut self, generation: u64, result: Result<Landmark>) -> bool {
        if generation != self.generation {
            log::warn!(
                "dropping stale details for generation {generation}, current is {}",
                self.generation
            );
            return false;
        }
        self.details = match result {
            Ok(details) => DetailsPanel::Loaded { details },
            Err(e) => {
                log::warn!("detail lookup failed: {e}");
                DetailsPanel::Empty
            }
        };
        true
    }

    pub fn handle_input(&mut self, event: &InputEvent) -> EventHandled {
        self.controller.handle_event(event)
    }

    pub fn tick(&mut self) -> bool {
        self.controller.tick()
    }

    pub fn toggle_auto_rotate(&mut self) -> bool {
        let enabled = self.controller.toggle_auto_rotate();
        log::debug!("auto-rotate {}", if enabled { "on" } else { "off" });
        enabled
    }

    pub fn reset(&mut self) {
        self.controller.reset();
    }

    pub fn auto_rotate_active(&self) -> bool {
        self.controller.auto_rotate_active()
    }

    pub fn auto_rotate_interval(&self) -> Duration {
        self.controller.config().auto_rotate_interval()
    }

    pub fn camera(&self) -> &CameraState {
        self.controller.camera()
    }

    pub fn controller(&self) -> &CameraController {
        &self.controller
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn details(&self) -> &DetailsPanel {
        &self.details
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn markers(&self) -> &[Marker] {
        self.props
            .as_ref()
            .map(|props| props.markers.as_slice())
            .unwrap_or(&[])
    }

    /// Visible markers for the current camera, farthest first
    pub fn projected(&self) -> Vec<ProjectedPoint> {
        Projector::new(self.camera(), self.controller.aspect(), &self.projection)
            .project_visible(self.markers())
    }

    pub fn route_prompt(&self) -> Option<String> {
        self.props
            .as_ref()
            .map(|props| controls::route_prompt(&props.markers))
    }

    pub fn render(&self) -> ViewFrame {
        let Some(props) = &self.props else {
            return ViewFrame::Loading;
        };

        let names: HashMap<&str, &str> = props
            .markers
            .iter()
            .map(|marker| (marker.id.as_str(), marker.name.as_str()))
            .collect();

        let markers = self
            .projected()
            .into_iter()
            .filter_map(|point| {
                let position = point.position?;
                let name = names.get(point.marker_id.as_str()).copied().unwrap_or_default();
                Some(MarkerView {
                    selected: self.selected.as_deref() == Some(point.marker_id.as_str()),
                    name: name.to_string(),
                    id: point.marker_id,
                    x_percent: position.x_percent,
                    y_percent: position.y_percent,
                    depth: position.depth,
                })
            })
            .collect();

        let mut subtitle = SUBTITLE.to_string();
        if !props.focus.is_empty() {
            subtitle.push_str(&format!(" Initial focus: {}.", props.focus));
        }

        let mode = match self.controller.mode() {
            ControllerMode::Idle => "idle",
            ControllerMode::Dragging => "dragging",
            ControllerMode::AutoRotating => "autoRotating",
        };

        ViewFrame::Ready(Box::new(ReadyFrame {
            kicker: VIEWER_KICKER.to_string(),
            title: props.title.clone(),
            subtitle,
            camera: *self.camera(),
            mode: mode.to_string(),
            markers,
            overlay: controls::overlay_labels(self.camera()),
            controls: ControlBar::new(self.controller.auto_rotate_enabled()),
            details: self.details.clone(),
            details_card: self.details.card(),
            selected_id: self.selected.clone(),
        }))
    }
}

impl Default for ViewSession {
    fn default() -> Self {
        Self::new(ViewerOptions::default())
    }
}
