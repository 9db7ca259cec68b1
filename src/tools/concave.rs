use crate::core::constants::DEFAULT_FOV;
use crate::data::source::{landmark_details, select_markers, MarkerQuery};
use crate::rendering::camera::CameraState;
use crate::tools::{parse_args, Tool, ToolContext, ToolDefinition, ToolOutput, WidgetMeta};
use crate::ui::widget::{ViewerProps, VIEWER_TITLE};
use crate::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

pub const OPEN_CONCAVE_EARTH: &str = "open-concave-earth";
pub const GET_LANDMARK_DETAILS: &str = "get-landmark-details";
pub const VIEWER_WIDGET: &str = "product-search-result";

/// Opens the inside-the-globe viewer over the catalog or a supplied marker list
pub struct OpenConcaveEarthTool;

#[async_trait]
impl Tool for OpenConcaveEarthTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: OPEN_CONCAVE_EARTH.to_string(),
            description: "Open an inside-the-Earth map experience where the user looks around the globe interior".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "focus": {
                        "type": "string",
                        "description": "Optional keyword to prioritize landmarks in the initial view"
                    },
                    "markers": {
                        "type": "array",
                        "description": "Optional external places to show instead of the built-in landmarks",
                        "items": {
                            "type": "object",
                            "properties": {
                                "id": { "type": "string" },
                                "name": { "type": "string" },
                                "country": { "type": "string" },
                                "type": { "type": "string" },
                                "lat": { "type": "number" },
                                "lng": { "type": "number" }
                            },
                            "required": ["name", "lat", "lng"]
                        }
                    }
                }
            }),
            output_schema: None,
            widget: Some(WidgetMeta {
                name: VIEWER_WIDGET.to_string(),
                description: "An inside-the-globe map viewer with draggable camera controls and landmark inspection.".to_string(),
                invoking: "Preparing the Earth interior...".to_string(),
                invoked: "Concave Earth ready".to_string(),
            }),
        }
    }

    async fn call(&self, args: Value, ctx: &ToolContext) -> Result<ToolOutput> {
        let query: MarkerQuery = parse_args(OPEN_CONCAVE_EARTH, args)?;
        let selection = select_markers(&query, &ctx.markers);

        let camera = selection
            .anchor
            .as_ref()
            .map(|anchor| CameraState::new(anchor.lat, anchor.lng, DEFAULT_FOV))
            .unwrap_or_default();

        let props = ViewerProps {
            title: VIEWER_TITLE.to_string(),
            focus: query.focus.clone().unwrap_or_default(),
            camera,
            markers: selection.markers,
        };
        let text = format!(
            "Loaded {} landmark nodes for concave view",
            props.markers.len()
        );
        log::info!("{text}");

        Ok(ToolOutput::text(text).with_widget(VIEWER_WIDGET, serde_json::to_value(&props)?))
    }
}

#[derive(Debug, Deserialize)]
struct DetailArgs {
    id: String,
}

/// Full record for one landmark id, never failing on unknown ids
pub struct GetLandmarkDetailsTool;

#[async_trait]
impl Tool for GetLandmarkDetailsTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: GET_LANDMARK_DETAILS.to_string(),
            description: "Get details for a landmark shown in the concave Earth viewer".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "id": { "type": "string", "description": "The landmark id" }
                },
                "required": ["id"]
            }),
            output_schema: Some(json!({
                "type": "object",
                "properties": {
                    "id": { "type": "string" },
                    "name": { "type": "string" },
                    "country": { "type": "string" },
                    "type": { "type": "string" },
                    "lat": { "type": "number" },
                    "lng": { "type": "number" },
                    "facts": { "type": "array", "items": { "type": "string" } }
                },
                "required": ["id", "name", "country", "type", "lat", "lng", "facts"]
            })),
            widget: None,
        }
    }

    async fn call(&self, args: Value, ctx: &ToolContext) -> Result<ToolOutput> {
        let DetailArgs { id } = parse_args(GET_LANDMARK_DETAILS, args)?;
        let details = landmark_details(&id, &ctx.markers);
        log::debug!("details for {id}: {}", details.name);

        let text = format!("{} ({}, {})", details.name, details.country, details.kind);
        Ok(ToolOutput::text(text).with_structured(serde_json::to_value(&details)?))
    }
}
