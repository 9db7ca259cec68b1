use crate::core::{
    config::{InteractionConfig, ProjectionConfig},
    constants::DEFAULT_FOV,
    geo::{normalize_or_zero, LatLng},
};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Camera standing at the sphere's center, looking outward along (lat, lng)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    /// Latitude of the optical axis, always within the configured limit
    pub lat: f64,
    /// Longitude of the optical axis, always wrapped into (-180, 180]
    pub lng: f64,
    /// Full field of view in degrees
    pub fov: f64,
}

impl CameraState {
    /// Create a camera, saturating lat/fov and wrapping lng with the default limits
    pub fn new(lat: f64, lng: f64, fov: f64) -> Self {
        Self::constrained(lat, lng, fov, &InteractionConfig::default())
    }

    /// Create a camera using the limits of the given interaction config
    pub fn constrained(lat: f64, lng: f64, fov: f64, config: &InteractionConfig) -> Self {
        Self {
            lat: config.clamp_lat(lat),
            lng: LatLng::wrap_lng(lng),
            fov: config.clamp_fov(fov),
        }
    }

    /// The direction the camera looks along
    pub fn direction(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }

    /// Orthonormal right/up/forward basis for the current orientation
    pub fn basis(&self, config: &ProjectionConfig) -> CameraBasis {
        CameraBasis::looking_at(self.direction(), config.pole_threshold)
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(0.0, 0.0, DEFAULT_FOV)
    }
}

/// Right/up/forward vectors of a camera at the sphere's center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    pub right: Vector3<f64>,
    pub up: Vector3<f64>,
    pub forward: Vector3<f64>,
}

impl CameraBasis {
    /// Build the basis for a camera looking along `direction`.
    ///
    /// Near the poles the world-up reference switches from +Y to +Z so the
    /// cross product never collapses to zero.
    pub fn looking_at(direction: LatLng, pole_threshold: f64) -> Self {
        let forward = direction.to_unit_vector();
        let world_up = if forward.y.abs() > pole_threshold {
            Vector3::z()
        } else {
            Vector3::y()
        };
        let right = normalize_or_zero(forward.cross(&world_up));
        let up = normalize_or_zero(right.cross(&forward));

        Self { right, up, forward }
    }

    /// Express a world-space point in camera space `(x, y, z)`, z being depth
    pub fn to_camera_space(&self, point: &Vector3<f64>) -> Vector3<f64> {
        Vector3::new(point.dot(&self.right), point.dot(&self.up), point.dot(&self.forward))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_orthonormal(basis: &CameraBasis) {
        for v in [basis.right, basis.up, basis.forward] {
            assert!((v.norm() - 1.0).abs() < 1e-9, "not unit: {v:?}");
        }
        assert!(basis.right.dot(&basis.up).abs() < 1e-9);
        assert!(basis.right.dot(&basis.forward).abs() < 1e-9);
        assert!(basis.up.dot(&basis.forward).abs() < 1e-9);
    }

    #[test]
    fn test_camera_state_is_constrained() {
        let camera = CameraState::new(120.0, 200.0, 500.0);
        assert_eq!(camera.lat, 89.5);
        assert_eq!(camera.lng, -160.0);
        assert_eq!(camera.fov, 108.0);
        assert_eq!(CameraState::default().fov, 78.0);
    }

    #[test]
    fn test_basis_is_orthonormal_across_orientations() {
        let config = ProjectionConfig::default();
        let mut lat = -89.5;
        while lat <= 89.5 {
            let mut lng = -180.0;
            while lng <= 180.0 {
                assert_orthonormal(&CameraState::new(lat, lng, 78.0).basis(&config));
                lng += 45.0;
            }
            lat += 9.95;
        }
    }

    #[test]
    fn test_basis_near_pole_uses_z_up() {
        // sin(89.5°) > 0.98, the Y reference would be nearly parallel to forward
        let basis = CameraBasis::looking_at(LatLng::new(89.5, 10.0), 0.98);
        assert_orthonormal(&basis);
    }

    #[test]
    fn test_exact_pole_does_not_collapse() {
        let basis = CameraBasis::looking_at(LatLng::new(90.0, 0.0), 0.98);
        assert_orthonormal(&basis);
    }

    #[test]
    fn test_up_points_north_at_equator() {
        let basis = CameraBasis::looking_at(LatLng::new(0.0, 0.0), 0.98);
        assert!((basis.up - Vector3::y()).norm() < 1e-12);
        let local = basis.to_camera_space(&basis.forward);
        assert!((local.z - 1.0).abs() < 1e-12);
    }
}
