//! Error types for the MiniPaint host

use painting::PaintError;
use thiserror::Error;

/// Errors that stop the application
#[derive(Error, Debug)]
pub enum AppError {
    /// Creating the window failed
    #[error("Window init error: {0}")]
    WindowInit(String),

    /// Pushing a frame to the window failed
    #[error("Window update error: {0}")]
    WindowUpdate(String),

    /// Reading the config file failed
    #[error("Config file {path}: {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON for [`crate::config::AppConfig`]
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Painting core rejected the configuration or a resize
    #[error("Paint error: {0}")]
    Paint(#[from] PaintError),
}
