pub mod landmarks;
pub mod source;

pub use landmarks::Landmark;
pub use source::{
    landmark_details, select_markers, ExternalMarker, MarkerQuery, MarkerSelection,
    SessionMarkerCache,
};
