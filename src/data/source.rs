//! Marker source behind `open-concave-earth`: focus filtering, external
//! marker lists, and the per-session cache that lets detail lookups find
//! externally supplied markers again.

use crate::data::landmarks::{self, Landmark};
use crate::layers::marker::Marker;
use crate::prelude::HashMap;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard};

/// Facts attached to every externally supplied marker
pub const PROVENANCE_FACTS: [&str; 2] = [
    "Imported from an external places provider.",
    "Details beyond name and coordinates were not supplied.",
];

const EXTERNAL_ID_PREFIX: &str = "google";

/// A marker supplied by the caller instead of the built-in catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalMarker {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub country: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub lat: f64,
    pub lng: f64,
}

/// Arguments of the marker source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarkerQuery {
    /// Keyword matched against name, country and type
    #[serde(default)]
    pub focus: Option<String>,
    /// Replaces the built-in catalog when present
    #[serde(default)]
    pub markers: Option<Vec<ExternalMarker>>,
}

/// Filtered markers plus the marker the initial camera should look at
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSelection {
    pub markers: Vec<Marker>,
    /// First filtered marker, else the first unfiltered source entry
    pub anchor: Option<Marker>,
}

/// Lowercase ASCII slug, runs of anything else collapse to a single `-`
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push_str("unnamed");
    }
    slug
}

/// Id for an external entry; entries that bring their own id keep it
pub fn external_id(index: usize, marker: &ExternalMarker) -> String {
    match marker.id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => format!("{EXTERNAL_ID_PREFIX}-{index}-{}", slugify(&marker.name)),
    }
}

fn external_landmark(index: usize, marker: &ExternalMarker) -> Landmark {
    Landmark {
        id: external_id(index, marker),
        name: marker.name.clone(),
        country: marker.country.clone(),
        kind: marker.kind.clone(),
        lat: marker.lat,
        lng: marker.lng,
        facts: PROVENANCE_FACTS.iter().map(|f| f.to_string()).collect(),
    }
}

/// Externally supplied landmarks known to one session.
///
/// Scoped to a session rather than the process so that concurrent clients
/// never see each other's markers.
#[derive(Debug, Default)]
pub struct SessionMarkerCache {
    entries: Mutex<HashMap<String, Landmark>>,
}

impl SessionMarkerCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries are written whole, so a panic elsewhere never leaves a
    /// half-inserted record behind and a poisoned lock is safe to reuse
    fn entries(&self) -> MutexGuard<'_, HashMap<String, Landmark>> {
        self.entries.lock().unwrap_or_else(|poisoned| {
            log::warn!("marker cache lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    pub fn insert_all(&self, landmarks: &[Landmark]) {
        let mut entries = self.entries();
        for landmark in landmarks {
            entries.insert(landmark.id.clone(), landmark.clone());
        }
    }

    pub fn get(&self, id: &str) -> Option<Landmark> {
        self.entries().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Resolve a marker query against the catalog or the supplied list
pub fn select_markers(query: &MarkerQuery, cache: &SessionMarkerCache) -> MarkerSelection {
    let source: Vec<Landmark> = match &query.markers {
        Some(external) => {
            let synthesized: Vec<Landmark> = external
                .iter()
                .enumerate()
                .map(|(index, marker)| external_landmark(index, marker))
                .collect();
            cache.insert_all(&synthesized);
            log::debug!("cached {} external markers", synthesized.len());
            synthesized
        }
        None => landmarks::catalog().to_vec(),
    };

    let term = query
        .focus
        .as_deref()
        .filter(|focus| !focus.is_empty())
        .map(str::to_lowercase);

    let markers: Vec<Marker> = source
        .iter()
        .map(Landmark::marker)
        .filter(|marker| term.as_deref().map_or(true, |term| marker.matches(term)))
        .collect();

    let anchor = markers
        .first()
        .cloned()
        .or_else(|| source.first().map(Landmark::marker));

    MarkerSelection { markers, anchor }
}

/// Detail lookup: this session's external markers, then the built-in
/// catalog, then the "unknown location" sentinel.
///
/// The session's own markers are what its viewer draws, so an external entry
/// reusing a catalog id shadows the catalog record.
pub fn landmark_details(id: &str, cache: &SessionMarkerCache) -> Landmark {
    cache
        .get(id)
        .or_else(|| landmarks::find(id).cloned())
        .unwrap_or_else(|| Landmark::unknown(id))
}
