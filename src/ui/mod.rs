pub mod controls;
pub mod popup;
pub mod widget;

pub use controls::ControlBar;
pub use popup::{DetailsCard, DetailsPanel};
pub use widget::{
    DetailRequest, MarkerView, ReadyFrame, ViewFrame, ViewSession, ViewerProps, VIEWER_TITLE,
};
