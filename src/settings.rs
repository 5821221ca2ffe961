//! Runtime settings.
//!
//! Every field has a default, so a JSON file only needs the keys it wants
//! to change:
//!
//! ```json
//! { "width": 1280, "height": 720, "fov_deg": 70.0, "seed": 7 }
//! ```

use std::{fs, io, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::{MAX_DEPTH, Palette};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings: {0}")]
    Io(#[from] io::Error),

    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),

    /// A value parsed but makes no sense (zero width, 0° FoV …).
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Frame-buffer size in pixels.
    pub width: usize,
    pub height: usize,
    /// Horizontal field of view in degrees.
    pub fov_deg: f32,
    /// Rays per frame; `None` casts one ray per two pixel columns.
    pub num_rays: Option<usize>,
    /// View distance in cells.
    pub max_depth: f32,
    /// Tics between two path searches of the same enemy.
    pub path_interval: u32,
    /// Seed of the simulation RNG (enemy accuracy rolls).
    pub seed: u64,
    /// Radians of turn per pixel of horizontal mouse travel.
    pub mouse_sensitivity: f32,
    pub ceiling_colour: u32,
    pub floor_colour: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 450,
            fov_deg: 60.0,
            num_rays: None,
            max_depth: MAX_DEPTH,
            path_interval: 12,
            seed: 0x5EED,
            mouse_sensitivity: 0.003,
            ceiling_colour: 0xFF_383838,
            floor_colour: 0xFF_1E1E1E,
        }
    }
}

impl Settings {
    pub fn from_json_str(text: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path)?;
        let settings = Self::from_json_str(&text)?;
        log::info!("loaded settings: {}×{} fov {}°", settings.width, settings.height, settings.fov_deg);
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |field, reason| Err(SettingsError::Invalid { field, reason });
        if self.width == 0 || self.height == 0 {
            return invalid("width/height", "must be non-zero");
        }
        if !(self.fov_deg > 0.0 && self.fov_deg < 180.0) {
            return invalid("fov_deg", "must lie in (0, 180)");
        }
        if self.num_rays == Some(0) {
            return invalid("num_rays", "must be at least 1");
        }
        if !(self.max_depth > 0.0) {
            return invalid("max_depth", "must be positive");
        }
        if self.path_interval == 0 {
            return invalid("path_interval", "must be at least 1");
        }
        Ok(())
    }

    #[inline]
    pub fn fov(&self) -> f32 {
        self.fov_deg.to_radians()
    }

    /// Ray count actually cast.
    #[inline]
    pub fn rays(&self) -> usize {
        self.num_rays.unwrap_or(self.width / 2).max(1)
    }

    pub fn palette(&self) -> Palette {
        Palette {
            ceiling: self.ceiling_colour,
            floor: self.floor_colour,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let s = Settings::from_json_str("{}").unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.rays(), 400);
        assert!((s.fov() - std::f32::consts::FRAC_PI_3).abs() < 1e-6);
    }

    #[test]
    fn partial_json_overrides() {
        let s = Settings::from_json_str(r#"{ "width": 320, "num_rays": 64, "seed": 9 }"#).unwrap();
        assert_eq!(s.width, 320);
        assert_eq!(s.rays(), 64);
        assert_eq!(s.seed, 9);
        assert_eq!(s.height, 450);
    }

    #[test]
    fn invalid_values_rejected() {
        assert!(matches!(
            Settings::from_json_str(r#"{ "fov_deg": 0 }"#),
            Err(SettingsError::Invalid { field: "fov_deg", .. })
        ));
        assert!(matches!(
            Settings::from_json_str(r#"{ "num_rays": 0 }"#),
            Err(SettingsError::Invalid { field: "num_rays", .. })
        ));
        assert!(matches!(
            Settings::from_json_str("{ width: "),
            Err(SettingsError::Json(_))
        ));
    }
}
