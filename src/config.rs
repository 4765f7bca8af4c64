//! Tunables for the particle field.
//!
//! A [`FieldConfig`] can be built in code or loaded from JSON. Every field
//! is defaulted, so a config file only needs to name what it overrides:
//!
//! ```json
//! { "particle_count": 80, "link_distance": 120.0 }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// An sRGB color with 8-bit channels and a floating-point alpha,
/// mirroring CSS `rgba()` notation.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS color string, e.g. `rgba(100, 255, 218, 0.5)`.
    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }

    /// Linear-space RGBA floats for an sRGB render target.
    pub fn to_linear(&self) -> [f32; 4] {
        fn channel(c: u8) -> f32 {
            let c = c as f32 / 255.0;
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        [channel(self.r), channel(self.g), channel(self.b), self.a]
    }
}

/// Particle field configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
    /// Number of particles, fixed for the lifetime of the field.
    pub particle_count: usize,
    /// Each velocity component is drawn from `[-max_speed, max_speed)`.
    pub max_speed: f32,
    /// Render radius is drawn from `[radius_range[0], radius_range[1])`.
    pub radius_range: [f32; 2],
    /// Particle pairs closer than this are linked.
    pub link_distance: f32,
    /// Particles closer than this to the pointer are linked to it.
    pub pointer_link_distance: f32,
    /// Stroke width for every link.
    pub line_width: f32,
    pub particle_color: Rgba,
    /// Link color; alpha is replaced by the per-edge opacity.
    pub link_color: Rgba,
    /// Clear color for hosts that cannot clear to transparent.
    pub background: Rgba,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 40,
            max_speed: 0.25,
            radius_range: [0.5, 2.5],
            link_distance: 150.0,
            pointer_link_distance: 200.0,
            line_width: 0.5,
            particle_color: Rgba::new(100, 255, 218, 0.5),
            link_color: Rgba::new(100, 255, 218, 1.0),
            background: Rgba::new(10, 25, 47, 1.0),
        }
    }
}

impl FieldConfig {
    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Save the configuration as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FieldConfig::default();
        assert_eq!(config.particle_count, 40);
        assert_eq!(config.link_distance, 150.0);
        assert_eq!(config.pointer_link_distance, 200.0);
        assert_eq!(config.line_width, 0.5);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = FieldConfig::from_json(r#"{ "particle_count": 80 }"#).unwrap();
        assert_eq!(config.particle_count, 80);
        assert_eq!(config.link_distance, 150.0);
        assert_eq!(config.particle_color, Rgba::new(100, 255, 218, 0.5));
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(matches!(
            FieldConfig::from_json("{ particle_count: }"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            FieldConfig::load("/definitely/not/here.json"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_css() {
        assert_eq!(Rgba::new(1, 2, 3, 0.5).css(), "rgba(1, 2, 3, 0.5)");
        assert_eq!(Rgba::new(1, 2, 3, 0.5).with_alpha(1.0).a, 1.0);
    }

    #[test]
    fn test_to_linear_endpoints() {
        let black = Rgba::new(0, 0, 0, 1.0).to_linear();
        let white = Rgba::new(255, 255, 255, 0.25).to_linear();
        assert_eq!(black, [0.0, 0.0, 0.0, 1.0]);
        assert!((white[0] - 1.0).abs() < 1e-5);
        assert_eq!(white[3], 0.25);
    }
}
