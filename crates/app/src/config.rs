//! Application configuration loaded from the environment

use std::path::Path;

use minipaint_config::{CanvasConfig, DisplayConfig};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AppError;

/// Environment variable naming a JSON config file
pub const CONFIG_ENV: &str = "MINIPAINT_CONFIG";

/// Window title
pub const WINDOW_TITLE: &str = "MiniPaint";

/// Full application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub display: DisplayConfig,
    pub canvas: CanvasConfig,
}

impl AppConfig {
    /// Load from the file named by `MINIPAINT_CONFIG`, or use defaults
    ///
    /// The platform touch slop is scaled by the display scale unless the file
    /// sets a tolerance explicitly.
    pub fn from_env() -> Result<Self, AppError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => {
                let display = DisplayConfig::default();
                let canvas = CanvasConfig::default().with_display_scale(display.scale);
                Ok(Self { display, canvas })
            }
        }
    }

    /// Read a JSON config file
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path).map_err(|source| AppError::ConfigIo {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::parse(&text)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse JSON config text; missing fields take their defaults
    pub fn parse(text: &str) -> Result<Self, AppError> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        let has_tolerance = value
            .get("canvas")
            .and_then(|canvas| canvas.get("touch_tolerance"))
            .is_some();

        let mut config: Self = serde_json::from_value(value)?;
        if !has_tolerance {
            config.canvas = config.canvas.with_display_scale(config.display.scale);
        }
        Ok(config)
    }
}
