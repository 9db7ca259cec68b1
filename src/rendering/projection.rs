//! Perspective projection from inside the sphere onto the viewport.
//!
//! Output coordinates are percentages of the viewport with the origin at the
//! top-left corner, so a renderer can place markers with `left`/`top` offsets.

use crate::core::{config::ProjectionConfig, geo::LatLng};
use crate::layers::marker::Marker;
use crate::rendering::camera::{CameraBasis, CameraState};
use crate::spatial::culling::Culling;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Where a visible point lands on screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenPosition {
    pub x_percent: f64,
    pub y_percent: f64,
    /// Camera-space depth, larger is farther along the optical axis
    pub depth: f64,
}

/// Projection result for one marker. Recomputed whenever camera or markers change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedPoint {
    pub marker_id: String,
    pub visible: bool,
    #[serde(flatten)]
    pub position: Option<ScreenPosition>,
}

impl ProjectedPoint {
    pub fn new(marker_id: impl Into<String>, position: Option<ScreenPosition>) -> Self {
        Self {
            marker_id: marker_id.into(),
            visible: position.is_some(),
            position,
        }
    }

    pub fn depth(&self) -> Option<f64> {
        self.position.map(|p| p.depth)
    }
}

/// Projects sphere points for one camera orientation and aspect ratio
#[derive(Debug, Clone, Copy)]
pub struct Projector {
    basis: CameraBasis,
    tan_half_fov: f64,
    aspect: f64,
    overscan_margin: f64,
}

impl Projector {
    pub fn new(camera: &CameraState, aspect: f64, config: &ProjectionConfig) -> Self {
        Self {
            basis: camera.basis(config),
            tan_half_fov: (camera.fov.to_radians() / 2.0).tan(),
            aspect,
            overscan_margin: config.overscan_margin,
        }
    }

    /// Project a lat/lng point, `None` when behind the camera or outside the overscan
    pub fn project(&self, lat_lng: &LatLng) -> Option<ScreenPosition> {
        self.project_vector(&lat_lng.to_unit_vector())
    }

    /// Project an arbitrary world-space point
    pub fn project_vector(&self, point: &Vector3<f64>) -> Option<ScreenPosition> {
        let local = self.basis.to_camera_space(point);
        let (x_cam, y_cam, z_cam) = (local.x, local.y, local.z);

        if z_cam <= 0.0 {
            return None;
        }

        let nx = x_cam / (z_cam * self.tan_half_fov * self.aspect);
        let ny = y_cam / (z_cam * self.tan_half_fov);

        if !Culling::within_overscan(nx, ny, self.overscan_margin) {
            return None;
        }

        Some(ScreenPosition {
            x_percent: (nx * 0.5 + 0.5) * 100.0,
            y_percent: (-ny * 0.5 + 0.5) * 100.0,
            depth: z_cam,
        })
    }

    /// Project every marker, hidden ones included, in input order
    pub fn project_all(&self, markers: &[Marker]) -> Vec<ProjectedPoint> {
        markers
            .iter()
            .map(|marker| ProjectedPoint::new(marker.id.clone(), self.project(&marker.position())))
            .collect()
    }

    /// Project markers and keep the visible ones, farthest first
    pub fn project_visible(&self, markers: &[Marker]) -> Vec<ProjectedPoint> {
        let mut visible: Vec<ProjectedPoint> = self
            .project_all(markers)
            .into_iter()
            .filter(|point| point.visible)
            .collect();
        Culling::order_far_to_near(&mut visible);
        visible
    }
}
