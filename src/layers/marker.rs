use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};

/// A landmark pin handed to the viewer for one rendering pass.
///
/// Latitude is not clamped: an out-of-range value simply projects as hidden.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub country: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub lat: f64,
    pub lng: f64,
}

impl Marker {
    pub fn new(id: impl Into<String>, name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            country: String::new(),
            kind: String::new(),
            lat,
            lng,
        }
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Position with longitude wrapped into (-180, 180]
    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng).wrapped()
    }

    /// Case-insensitive substring match over name, country and type.
    /// `term` must already be lowercase.
    pub fn matches(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(term)
            || self.country.to_lowercase().contains(term)
            || self.kind.to_lowercase().contains(term)
    }
}
