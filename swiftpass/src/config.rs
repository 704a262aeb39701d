//! Configuration for the booking flow.
//!
//! Loads configuration from environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Image upload endpoint configuration
    pub upload: UploadConfig,
    /// Local persistence configuration
    pub storage: StorageConfig,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Hosted image-upload endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Cloud name segment of the upload URL
    pub cloud_name: String,
    /// Unsigned upload preset sent with each file
    pub upload_preset: String,
    /// Base API URL (versioned root, no trailing slash)
    pub api_url: String,
}

impl UploadConfig {
    /// The full image-upload endpoint.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/{}/image/upload", self.api_url, self.cloud_name)
    }
}

/// Local persistence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the session's JSON records
    pub data_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every field has a default, so loading never fails; binaries call
    /// `dotenvy::dotenv()` first to pick up a local `.env`.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            upload: UploadConfig {
                cloud_name: env::var("CLOUDINARY_CLOUD_NAME")
                    .unwrap_or_else(|_| "demo".to_string()),
                upload_preset: env::var("CLOUDINARY_UPLOAD_PRESET")
                    .unwrap_or_else(|_| "ml_default".to_string()),
                api_url: env::var("CLOUDINARY_API_URL")
                    .unwrap_or_else(|_| "https://api.cloudinary.com/v1_1".to_string()),
            },
            storage: StorageConfig {
                data_dir: env::var("SWIFTPASS_DATA_DIR")
                    .map_or_else(|_| PathBuf::from(".swiftpass"), PathBuf::from),
            },
            log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }
}
