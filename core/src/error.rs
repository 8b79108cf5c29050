use thiserror::Error;
use zt_qr::QrError;

/// Errors reading or validating a [`ShareConfig`](crate::ShareConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} must be at least 1")]
    Zero { field: &'static str },
    #[error("{field} must be at most {max}")]
    TooLarge { field: &'static str, max: u32 },
    #[error("invalid mask {0} (expected \"auto\" or 0-7)")]
    InvalidMask(u8),
}

/// Errors producing a share QR code.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShareError {
    #[error("invalid network ID {0:?} (expected 16 hex digits)")]
    InvalidNetworkId(String),
    #[error("unknown share format {0:?} (expected uri, id or cmd)")]
    UnknownFormat(String),
    #[error("QR encoding failed: {0}")]
    Qr(#[from] QrError),
    #[error("config: {0}")]
    Config(String),
}

impl From<ConfigError> for ShareError {
    fn from(err: ConfigError) -> Self {
        ShareError::Config(err.to_string())
    }
}
