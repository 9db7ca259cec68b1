use crate::data::landmarks::Landmark;
use serde::{Deserialize, Serialize};

pub const LOADING_TEXT: &str = "Loading landmark details...";

/// Side panel showing the selected landmark's record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum DetailsPanel {
    #[default]
    Empty,
    Loading,
    Loaded { details: Landmark },
}

/// Text content of a loaded details panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailsCard {
    pub heading: String,
    /// `country · type`, then the coordinates at four decimals
    pub meta: Vec<String>,
    pub facts: Vec<String>,
}

impl DetailsPanel {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn details(&self) -> Option<&Landmark> {
        match self {
            Self::Loaded { details } => Some(details),
            _ => None,
        }
    }

    pub fn card(&self) -> Option<DetailsCard> {
        self.details().map(|details| DetailsCard {
            heading: details.name.clone(),
            meta: vec![
                format!("{} · {}", details.country, details.kind),
                format!("{:.4}, {:.4}", details.lat, details.lng),
            ],
            facts: details.facts.clone(),
        })
    }
}
