use crate::circuit::highlight::{highlight_source, Token};
use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Components drawn on the schematic preview; the rest only appear in the list
pub const MAX_SCHEMATIC_PARTS: usize = 4;

const PART_TOP: f64 = 76.0;
const PART_SPACING: f64 = 48.0;
const PART_X: f64 = 360.0;
const PART_WIDTH: f64 = 165.0;
const PART_HEIGHT: f64 = 40.0;
const POWER_RAIL_Y: f64 = 40.0;
const GROUND_RAIL_Y: f64 = 250.0;
const POWER_TAP_X: f64 = 392.0;
const GROUND_TAP_X: f64 = 493.0;
const BOARD_SIGNAL_PIN: Point = Point { x: 210.0, y: 148.0 };

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub name: String,
    pub qty: u32,
    pub purchase_url: String,
}

/// Props of the Arduino circuit workspace widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitWorkspaceProps {
    pub prompt: String,
    pub filename: String,
    pub code: String,
    pub diagram_title: String,
    #[serde(default)]
    pub diagram_notes: Vec<String>,
    #[serde(default)]
    pub components: Vec<Component>,
}

/// Straight wire between two schematic points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wire {
    pub from: Point,
    pub to: Point,
}

/// Layout of one component box on the logical schematic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchematicPart {
    pub name: String,
    pub origin: Point,
    pub width: f64,
    pub height: f64,
    pub signal: Wire,
    pub power: Wire,
    pub ground: Wire,
}

impl SchematicPart {
    fn layout(index: usize, name: &str) -> Self {
        let y = PART_TOP + index as f64 * PART_SPACING;
        Self {
            name: name.to_string(),
            origin: Point::new(PART_X, y),
            width: PART_WIDTH,
            height: PART_HEIGHT,
            signal: Wire {
                from: BOARD_SIGNAL_PIN,
                to: Point::new(PART_X, y + PART_HEIGHT / 2.0),
            },
            power: Wire {
                from: Point::new(POWER_TAP_X, y),
                to: Point::new(POWER_TAP_X, POWER_RAIL_Y),
            },
            ground: Wire {
                from: Point::new(GROUND_TAP_X, y + PART_HEIGHT),
                to: Point::new(GROUND_TAP_X, GROUND_RAIL_Y),
            },
        }
    }
}

impl CircuitWorkspaceProps {
    pub fn highlighted_code(&self) -> Vec<Vec<Token>> {
        highlight_source(&self.code)
    }

    /// Wiring layout for the first few components
    pub fn schematic(&self) -> Vec<SchematicPart> {
        self.components
            .iter()
            .take(MAX_SCHEMATIC_PARTS)
            .enumerate()
            .map(|(index, component)| SchematicPart::layout(index, &component.name))
            .collect()
    }
}
