use crate::circuit::workspace::CircuitWorkspaceProps;
use crate::tools::{parse_args, Tool, ToolContext, ToolDefinition, ToolOutput, WidgetMeta};
use crate::Result;
use async_trait::async_trait;
use serde_json::{json, Value};

pub const ARDUINO_CIRCUIT_BUILDER: &str = "arduino-circuit-builder";

/// Lays out an Arduino sketch workspace: highlighted code and schematic preview
pub struct ArduinoCircuitBuilderTool;

#[async_trait]
impl Tool for ArduinoCircuitBuilderTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: ARDUINO_CIRCUIT_BUILDER.to_string(),
            description: "Show an Arduino sketch with its logical schematic and parts list".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "prompt": { "type": "string" },
                    "filename": { "type": "string" },
                    "code": { "type": "string" },
                    "diagramTitle": { "type": "string" },
                    "diagramNotes": { "type": "array", "items": { "type": "string" } },
                    "components": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "name": { "type": "string" },
                                "qty": { "type": "integer", "minimum": 0 },
                                "purchaseUrl": { "type": "string" }
                            },
                            "required": ["name", "qty", "purchaseUrl"]
                        }
                    }
                },
                "required": ["prompt", "filename", "code", "diagramTitle"]
            }),
            output_schema: None,
            widget: Some(WidgetMeta {
                name: ARDUINO_CIRCUIT_BUILDER.to_string(),
                description: "Minimal Arduino circuit workspace with code, logical schematic preview, and components".to_string(),
                invoking: "Preparing circuit builder workspace...".to_string(),
                invoked: "Circuit builder workspace ready".to_string(),
            }),
        }
    }

    async fn call(&self, args: Value, _ctx: &ToolContext) -> Result<ToolOutput> {
        let workspace: CircuitWorkspaceProps = parse_args(ARDUINO_CIRCUIT_BUILDER, args)?;
        let lines = workspace.highlighted_code();

        let text = format!(
            "Prepared {}: {} lines, {} components",
            workspace.filename,
            lines.len(),
            workspace.components.len()
        );
        let structured = json!({
            "filename": workspace.filename,
            "lines": lines,
            "schematic": workspace.schematic(),
        });

        Ok(ToolOutput::text(text)
            .with_structured(structured)
            .with_widget(ARDUINO_CIRCUIT_BUILDER, serde_json::to_value(&workspace)?))
    }
}
