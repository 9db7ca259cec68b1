//! Configuration system for camera feel and server identity
//!
//! This module provides a small hierarchical configuration system: presets
//! for how the camera reacts to gestures, and the tunables of the projector.
//! Everything defaults to the values in [`crate::core::constants`].

use crate::core::constants;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionProfile {
    #[default]
    Standard,
    Precise,
    Fast,
    Custom(ViewerOptions),
}

impl InteractionProfile {
    pub fn resolve(&self) -> ViewerOptions {
        match self {
            Self::Standard => ViewerOptions::default(),
            Self::Precise => ViewerOptions {
                projection: ProjectionConfig::default(),
                interaction: InteractionConfig {
                    drag_lng_sensitivity: constants::DRAG_LNG_SENSITIVITY / 2.0,
                    drag_lat_sensitivity: constants::DRAG_LAT_SENSITIVITY / 2.0,
                    wheel_fov_sensitivity: constants::WHEEL_FOV_SENSITIVITY / 2.0,
                    auto_rotate_step: constants::AUTO_ROTATE_STEP / 2.0,
                    ..InteractionConfig::default()
                },
            },
            Self::Fast => ViewerOptions {
                projection: ProjectionConfig::default(),
                interaction: InteractionConfig {
                    drag_lng_sensitivity: constants::DRAG_LNG_SENSITIVITY * 2.0,
                    drag_lat_sensitivity: constants::DRAG_LAT_SENSITIVITY * 2.0,
                    wheel_fov_sensitivity: constants::WHEEL_FOV_SENSITIVITY * 2.0,
                    auto_rotate_step: constants::AUTO_ROTATE_STEP * 2.0,
                    ..InteractionConfig::default()
                },
            },
            Self::Custom(options) => options.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerOptions {
    pub projection: ProjectionConfig,
    pub interaction: InteractionConfig,
}

/// Tunables of the inside-the-sphere projector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Normalized coordinates beyond ±1 still treated as on screen
    pub overscan_margin: f64,
    /// |forward.y| above which world-up switches to +Z
    pub pole_threshold: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            overscan_margin: constants::OVERSCAN_MARGIN,
            pole_threshold: constants::POLE_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    pub drag_lng_sensitivity: f64,
    pub drag_lat_sensitivity: f64,
    pub wheel_fov_sensitivity: f64,
    pub auto_rotate_step: f64,
    pub auto_rotate_interval_ms: u64,
    pub lat_limit: f64,
    pub min_fov: f64,
    pub max_fov: f64,
    /// Whether a new session starts spinning
    pub auto_rotate_on_start: bool,
}

impl InteractionConfig {
    pub fn auto_rotate_interval(&self) -> Duration {
        // A zero period would make tokio's interval panic.
        Duration::from_millis(self.auto_rotate_interval_ms.max(1))
    }

    /// Copy with usable limits: a finite latitude bound within [0, 90] and
    /// an ordered, finite, positive field-of-view range
    pub fn validated(&self) -> Self {
        let lat_limit = finite_or(self.lat_limit, constants::CAMERA_LAT_LIMIT)
            .abs()
            .min(90.0);
        let min_fov = finite_or(self.min_fov, constants::MIN_FOV).max(f64::MIN_POSITIVE);
        let max_fov = finite_or(self.max_fov, constants::MAX_FOV).max(f64::MIN_POSITIVE);
        Self {
            lat_limit,
            min_fov: min_fov.min(max_fov),
            max_fov: min_fov.max(max_fov),
            ..self.clone()
        }
    }

    pub fn clamp_lat(&self, lat: f64) -> f64 {
        let limit = finite_or(self.lat_limit, constants::CAMERA_LAT_LIMIT).abs();
        lat.clamp(-limit, limit)
    }

    pub fn clamp_fov(&self, fov: f64) -> f64 {
        let min = finite_or(self.min_fov, constants::MIN_FOV);
        let max = finite_or(self.max_fov, constants::MAX_FOV);
        fov.clamp(min.min(max), min.max(max))
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            drag_lng_sensitivity: constants::DRAG_LNG_SENSITIVITY,
            drag_lat_sensitivity: constants::DRAG_LAT_SENSITIVITY,
            wheel_fov_sensitivity: constants::WHEEL_FOV_SENSITIVITY,
            auto_rotate_step: constants::AUTO_ROTATE_STEP,
            auto_rotate_interval_ms: constants::AUTO_ROTATE_INTERVAL.as_millis() as u64,
            lat_limit: constants::CAMERA_LAT_LIMIT,
            min_fov: constants::MIN_FOV,
            max_fov: constants::MAX_FOV,
            auto_rotate_on_start: true,
        }
    }
}

/// Identity of the tool server, reported on `initialize`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    pub name: String,
    pub title: String,
    pub version: String,
    pub description: String,
    pub base_url: String,
}

impl ServerConfig {
    pub const BASE_URL_ENV: &'static str = "MCP_URL";

    /// Reads overrides from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(url) = lookup(Self::BASE_URL_ENV).filter(|url| !url.trim().is_empty()) {
            config.base_url = url;
        }
        config
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "ConcaveEarth".to_string(),
            title: "ConcaveEarth".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: "Tool server with concave Earth and Arduino workspace widgets".to_string(),
            base_url: "http://localhost:3000".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interaction_profile_presets() {
        let standard = InteractionProfile::Standard.resolve();
        let precise = InteractionProfile::Precise.resolve();
        let fast = InteractionProfile::Fast.resolve();

        assert_eq!(standard.interaction.drag_lng_sensitivity, 0.14);
        assert_eq!(standard.interaction.auto_rotate_step, 0.12);
        assert_eq!(standard.projection.overscan_margin, 1.15);

        assert!(precise.interaction.drag_lng_sensitivity < standard.interaction.drag_lng_sensitivity);
        assert!(fast.interaction.wheel_fov_sensitivity > standard.interaction.wheel_fov_sensitivity);

        // Limits are shared by every preset
        assert_eq!(precise.interaction.lat_limit, 89.5);
        assert_eq!(fast.interaction.max_fov, 108.0);
        assert_eq!(InteractionProfile::default(), InteractionProfile::Standard);
    }

    #[test]
    fn test_custom_profile_passthrough() {
        let mut options = ViewerOptions::default();
        options.projection.overscan_margin = 1.0;
        let resolved = InteractionProfile::Custom(options.clone()).resolve();
        assert_eq!(resolved, options);
    }

    #[test]
    fn test_viewer_options_partial_json() {
        let options: ViewerOptions =
            serde_json::from_str(r#"{"interaction": {"wheel_fov_sensitivity": 0.1}}"#).unwrap();
        assert_eq!(options.interaction.wheel_fov_sensitivity, 0.1);
        assert_eq!(options.interaction.min_fov, 35.0);
        assert_eq!(options.projection, ProjectionConfig::default());
    }

    #[test]
    fn test_interval_never_zero() {
        let config = InteractionConfig {
            auto_rotate_interval_ms: 0,
            ..InteractionConfig::default()
        };
        assert_eq!(config.auto_rotate_interval(), Duration::from_millis(1));
        assert_eq!(InteractionConfig::default().auto_rotate_interval(), Duration::from_millis(25));
    }

    #[test]
    fn test_inverted_and_negative_limits_are_normalized() {
        let options: ViewerOptions = serde_json::from_str(
            r#"{"interaction": {"min_fov": 120.0, "max_fov": 40.0, "lat_limit": -60.0}}"#,
        )
        .unwrap();
        let config = options.interaction.validated();
        assert_eq!(config.lat_limit, 60.0);
        assert_eq!((config.min_fov, config.max_fov), (40.0, 120.0));

        // The raw config clamps without panicking as well
        assert_eq!(options.interaction.clamp_lat(75.0), 60.0);
        assert_eq!(options.interaction.clamp_fov(10.0), 40.0);
        assert_eq!(options.interaction.clamp_fov(200.0), 120.0);
    }

    #[test]
    fn test_non_finite_limits_fall_back_to_defaults() {
        let config = InteractionConfig {
            lat_limit: f64::NAN,
            min_fov: f64::INFINITY,
            max_fov: f64::NAN,
            ..InteractionConfig::default()
        }
        .validated();
        assert_eq!(config.lat_limit, 89.5);
        assert_eq!((config.min_fov, config.max_fov), (35.0, 108.0));
        assert!(config.clamp_lat(f64::NAN).is_nan());
    }

    #[test]
    fn test_server_config_lookup() {
        let config = ServerConfig::from_lookup(|key| {
            (key == "MCP_URL").then(|| "https://example.test".to_string())
        });
        assert_eq!(config.base_url, "https://example.test");
        assert_eq!(config.name, "ConcaveEarth");

        let fallback = ServerConfig::from_lookup(|_| Some("  ".to_string()));
        assert_eq!(fallback.base_url, "http://localhost:3000");
    }
}
