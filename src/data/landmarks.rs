//! Built-in landmark catalog for the concave Earth viewer.

use crate::layers::marker::Marker;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Full detail record of a landmark, as returned by the detail lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub id: String,
    pub name: String,
    pub country: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub lat: f64,
    pub lng: f64,
    pub facts: Vec<String>,
}

impl Landmark {
    fn builtin(
        id: &str,
        name: &str,
        country: &str,
        kind: &str,
        lat: f64,
        lng: f64,
        facts: [&str; 2],
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            country: country.to_string(),
            kind: kind.to_string(),
            lat,
            lng,
            facts: facts.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// Sentinel returned for ids nobody knows; never an error
    pub fn unknown(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: "Unknown location".to_string(),
            country: "Unknown".to_string(),
            kind: "unknown".to_string(),
            lat: 0.0,
            lng: 0.0,
            facts: vec!["No landmark details found.".to_string()],
        }
    }

    /// The pin shown in the viewer, without facts
    pub fn marker(&self) -> Marker {
        Marker::new(self.id.clone(), self.name.clone(), self.lat, self.lng)
            .with_country(self.country.clone())
            .with_kind(self.kind.clone())
    }
}

static CATALOG: Lazy<Vec<Landmark>> = Lazy::new(|| {
    vec![
        Landmark::builtin(
            "sf",
            "San Francisco",
            "United States",
            "city",
            37.7749,
            -122.4194,
            [
                "Known for steep streets and layered waterfront topography.",
                "Works well as a map UX benchmark because neighborhoods are geographically compact.",
            ],
        ),
        Landmark::builtin(
            "seoul",
            "Seoul",
            "South Korea",
            "city",
            37.5665,
            126.978,
            [
                "Dense transit network and high POI density make filtering demos useful.",
                "A good stress-test for marker clustering behavior.",
            ],
        ),
        Landmark::builtin(
            "nairobi",
            "Nairobi",
            "Kenya",
            "city",
            -1.2921,
            36.8219,
            [
                "Often used in global demos to validate equatorial perspective handling.",
                "Has strong contrast between urban center and surrounding natural zones.",
            ],
        ),
        Landmark::builtin(
            "london",
            "London",
            "United Kingdom",
            "city",
            51.5072,
            -0.1276,
            [
                "The Thames curve is visually recognizable even in stylized map themes.",
                "Useful for testing high-latitude rendering balance in northern hemisphere views.",
            ],
        ),
        Landmark::builtin(
            "andes",
            "Andes Backbone",
            "South America",
            "terrain",
            -19.0154,
            -65.2619,
            [
                "Represents long mountain-chain scale for distance/ratio storytelling.",
                "Good for comparing city-to-terrain proportions inside a spherical projection.",
            ],
        ),
        Landmark::builtin(
            "greatbarrierreef",
            "Great Barrier Reef",
            "Australia",
            "terrain",
            -18.2871,
            147.6992,
            [
                "Helpful for testing ocean-heavy camera views and sparse marker sets.",
                "A strong example of non-urban mapping context.",
            ],
        ),
    ]
});

/// All built-in landmarks in display order
pub fn catalog() -> &'static [Landmark] {
    &CATALOG
}

/// Look up a built-in landmark by id
pub fn find(id: &str) -> Option<&'static Landmark> {
    CATALOG.iter().find(|landmark| landmark.id == id)
}
