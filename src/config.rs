//! Service configuration, read from the process environment exactly once
//! at startup and passed down by reference. Core logic never touches the
//! environment itself.

use crate::dims::DimensionLimits;
use crate::float_types::Real;
use std::env;
use std::path::PathBuf;

/// Startup configuration problems. These abort the process before it
/// binds a socket; a missing bucket must never turn into per-request
/// 500s.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("environment variable {name} has unusable value {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Object-storage settings. All required; the relay cannot start without
/// a destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub region: String,
    pub bucket: String,
    /// Base URL uploads are served from (e.g. a CDN distribution in front
    /// of the bucket). Joined with the object key to build returned URLs.
    pub public_base_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    /// Address the HTTP server binds, `HOST:PORT`.
    pub bind_addr: String,
    /// Reference GLB read once at startup.
    pub model_path: PathBuf,
    pub storage: StorageConfig,
    pub limits: DimensionLimits,
    /// Exports smaller than this are treated as failed (truncated) output.
    pub min_export_bytes: usize,
    /// Relay payload ceiling; also caps our own exports before upload.
    pub max_upload_bytes: usize,
}

const DEFAULT_PORT: &str = "3000";
const DEFAULT_MODEL_PATH: &str = "assets/door.glb";
const DEFAULT_MIN_EXPORT_BYTES: usize = 1024;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

fn required(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}

fn optional_parsed<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(None),
    }
}

impl ServiceConfig {
    /// Read the full configuration from the environment.
    ///
    /// Required: `AWS_REGION`, `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`,
    /// `S3_BUCKET`, `PUBLIC_BASE_URL`. The credential pair is only checked
    /// for presence here; the storage client reads it through its own
    /// provider chain.
    ///
    /// Optional, with defaults: `PORT` (3000), `HOST` (0.0.0.0),
    /// `DOOR_MODEL_PATH` (assets/door.glb), `DOOR_MIN_SIDE_M` (0.3),
    /// `DOOR_MAX_HEIGHT_M` (4.0), `DOOR_MAX_WIDTH_M` (3.0),
    /// `DOOR_MIN_EXPORT_BYTES` (1024), `DOOR_MAX_UPLOAD_BYTES` (50 MiB).
    pub fn from_env() -> Result<Self, ConfigError> {
        let region = required("AWS_REGION")?;
        required("AWS_ACCESS_KEY_ID")?;
        required("AWS_SECRET_ACCESS_KEY")?;
        let bucket = required("S3_BUCKET")?;
        let public_base_url = required("PUBLIC_BASE_URL")?;

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_owned());
        let port = env::var("PORT").unwrap_or_else(|_| DEFAULT_PORT.to_owned());
        let model_path =
            env::var("DOOR_MODEL_PATH").unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_owned());

        let defaults = DimensionLimits::default();
        let limits = DimensionLimits {
            min_side_m: optional_parsed::<Real>("DOOR_MIN_SIDE_M")?.unwrap_or(defaults.min_side_m),
            max_height_m: optional_parsed::<Real>("DOOR_MAX_HEIGHT_M")?
                .unwrap_or(defaults.max_height_m),
            max_width_m: optional_parsed::<Real>("DOOR_MAX_WIDTH_M")?
                .unwrap_or(defaults.max_width_m),
        };

        Ok(ServiceConfig {
            bind_addr: format!("{host}:{port}"),
            model_path: PathBuf::from(model_path),
            storage: StorageConfig {
                region,
                bucket,
                public_base_url,
            },
            limits,
            min_export_bytes: optional_parsed("DOOR_MIN_EXPORT_BYTES")?
                .unwrap_or(DEFAULT_MIN_EXPORT_BYTES),
            max_upload_bytes: optional_parsed("DOOR_MAX_UPLOAD_BYTES")?
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
        })
    }
}
