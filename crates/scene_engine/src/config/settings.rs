//! # Viewer Configuration
//!
//! Runtime settings for driving a scene: window size, camera control rates,
//! camera limits and the debug overlay toggles exposed to the UI layer.

use serde::{Deserialize, Serialize};

use super::Config;
use crate::camera::CameraLimits;
use crate::render::DrawFlags;

/// Window dimensions used for the initial aspect ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { width: 1280, height: 720 }
    }
}

/// Rates used by the camera-input controller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraControlConfig {
    /// Movement rate per second of held key
    pub move_speed: f32,
    /// Pan rate in radians per second of held key
    pub pan_speed: f32,
    /// Zoom factor per second of held key
    pub zoom_rate: f32,
    /// Radians of pan per pixel of mouse drag
    pub mouse_sensitivity: f32,
}

impl Default for CameraControlConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            pan_speed: 1.5,
            zoom_rate: 1.0,
            mouse_sensitivity: 0.005,
        }
    }
}

/// Per-frame debug toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct OverlayConfig {
    /// Filled polygons (wireframe when false)
    pub fill: bool,
    /// Frustum culling enabled
    pub cull: bool,
    /// World axes overlay
    pub show_axes: bool,
    /// Bounding sphere overlay
    pub show_bounding_spheres: bool,
    /// Animation path overlay
    pub show_animation_paths: bool,
    /// Vertex normal overlay
    pub show_normals: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            fill: true,
            cull: true,
            show_axes: false,
            show_bounding_spheres: false,
            show_animation_paths: false,
            show_normals: false,
        }
    }
}

impl OverlayConfig {
    /// Convert the toggles into draw flags for the traversal
    pub fn draw_flags(&self) -> DrawFlags {
        let mut flags = DrawFlags::empty();
        flags.set(DrawFlags::FILL, self.fill);
        flags.set(DrawFlags::CULL, self.cull);
        flags.set(DrawFlags::SHOW_AXES, self.show_axes);
        flags.set(DrawFlags::SHOW_BOUNDING_SPHERES, self.show_bounding_spheres);
        flags.set(DrawFlags::SHOW_ANIMATION_PATHS, self.show_animation_paths);
        flags.set(DrawFlags::SHOW_NORMALS, self.show_normals);
        flags
    }
}

/// Complete viewer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Log filter used when `RUST_LOG` is unset
    pub log_level: String,
    /// Number of frames to simulate
    pub frames: u32,
    /// Fixed animation step in seconds
    pub time_step: f32,
    /// Frames between statistics log lines
    pub report_interval: u32,
    /// Window dimensions
    pub window: WindowConfig,
    /// Camera controller rates
    pub camera_controls: CameraControlConfig,
    /// Camera zoom and radius limits
    pub camera_limits: CameraLimits,
    /// Debug overlay toggles
    pub overlays: OverlayConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            frames: 600,
            time_step: 1.0 / 60.0,
            report_interval: 60,
            window: WindowConfig::default(),
            camera_controls: CameraControlConfig::default(),
            camera_limits: CameraLimits::default(),
            overlays: OverlayConfig::default(),
        }
    }
}

impl ViewerConfig {
    /// Validate ranges that would otherwise produce a meaningless run
    pub fn validate(&self) -> Result<(), String> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err("Window dimensions must be non-zero".to_string());
        }
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(format!("Time step must be positive, got {}", self.time_step));
        }
        self.camera_limits.validate().map_err(|e| e.to_string())
    }
}

impl Config for ViewerConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_flags_mapping() {
        let overlays = OverlayConfig {
            fill: false,
            cull: true,
            show_axes: true,
            show_bounding_spheres: false,
            show_animation_paths: true,
            show_normals: false,
        };
        let flags = overlays.draw_flags();
        assert!(!flags.contains(DrawFlags::FILL));
        assert!(flags.contains(DrawFlags::CULL | DrawFlags::SHOW_AXES | DrawFlags::SHOW_ANIMATION_PATHS));
        assert!(!flags.intersects(DrawFlags::SHOW_BOUNDING_SPHERES | DrawFlags::SHOW_NORMALS));
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(ViewerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_window_rejected() {
        let mut config = ViewerConfig::default();
        config.window.height = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ViewerConfig = toml::from_str("frames = 10\n[overlays]\nfill = true\ncull = false\nshow_axes = true\nshow_bounding_spheres = false\nshow_animation_paths = false\nshow_normals = false\n").unwrap();
        assert_eq!(config.frames, 10);
        assert!(!config.overlays.cull);
        assert_eq!(config.window, WindowConfig::default());
    }
}
