use crate::core::constants::CAMERA_LAT_LIMIT;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Represents a geographical coordinate with latitude and longitude in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Wraps longitude into the half-open range (-180, 180].
    ///
    /// The result is congruent to the input modulo 360. `-180` maps to `180`.
    pub fn wrap_lng(lng: f64) -> f64 {
        let wrapped = lng.rem_euclid(360.0);
        if wrapped > 180.0 {
            wrapped - 360.0
        } else {
            wrapped
        }
    }

    /// Saturates latitude to the range a camera may look along
    pub fn clamp_lat(lat: f64) -> f64 {
        lat.clamp(-CAMERA_LAT_LIMIT, CAMERA_LAT_LIMIT)
    }

    /// Returns the same coordinate with longitude wrapped
    pub fn wrapped(&self) -> Self {
        Self::new(self.lat, Self::wrap_lng(self.lng))
    }

    /// Point on the unit sphere: `x = cos(lat)cos(lng)`, `y = sin(lat)`, `z = cos(lat)sin(lng)`
    pub fn to_unit_vector(&self) -> Vector3<f64> {
        let lat_rad = self.lat.to_radians();
        let lng_rad = self.lng.to_radians();
        let cos_lat = lat_rad.cos();
        Vector3::new(cos_lat * lng_rad.cos(), lat_rad.sin(), cos_lat * lng_rad.sin())
    }

    /// The point on the opposite side of the sphere
    pub fn antipode(&self) -> Self {
        Self::new(-self.lat, Self::wrap_lng(self.lng + 180.0))
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Represents a point in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Normalizes a vector, leaving a zero-length vector untouched instead of dividing by zero
pub fn normalize_or_zero(v: Vector3<f64>) -> Vector3<f64> {
    let len = v.norm();
    if len > 0.0 {
        v / len
    } else {
        v
    }
}
