use crate::layers::marker::Marker;
use crate::rendering::camera::CameraState;
use serde::{Deserialize, Serialize};

pub const PAUSE_SPIN_LABEL: &str = "Pause Spin";
pub const AUTO_SPIN_LABEL: &str = "Auto Spin";
pub const RESET_LABEL: &str = "Reset View";
pub const ROUTE_LABEL: &str = "Ask AI Route";

/// Markers named in the route follow-up prompt
const ROUTE_STOPS: usize = 3;

/// Footer buttons of the viewer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlBar {
    pub spin_label: String,
    pub reset_label: String,
    pub route_label: String,
}

impl ControlBar {
    pub fn new(auto_rotate: bool) -> Self {
        Self {
            spin_label: spin_label(auto_rotate).to_string(),
            reset_label: RESET_LABEL.to_string(),
            route_label: ROUTE_LABEL.to_string(),
        }
    }
}

pub fn spin_label(auto_rotate: bool) -> &'static str {
    if auto_rotate {
        PAUSE_SPIN_LABEL
    } else {
        AUTO_SPIN_LABEL
    }
}

/// Camera readout drawn over the viewport
pub fn overlay_labels(camera: &CameraState) -> Vec<String> {
    vec![
        format!("{:.2} lat", camera.lat),
        format!("{:.2} lng", camera.lng),
        format!("{:.0} fov", camera.fov),
    ]
}

/// Follow-up message asking for a route through the first few markers
pub fn route_prompt(markers: &[Marker]) -> String {
    let stops: Vec<&str> = markers
        .iter()
        .take(ROUTE_STOPS)
        .map(|marker| marker.name.as_str())
        .collect();
    format!(
        "Suggest a travel route that connects {} with practical flight legs",
        stops.join(", ")
    )
}
