use thiserror::Error;

/// Errors reported by the encoder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QrError {
    /// The payload does not fit the selected (or largest supported) version.
    #[error("payload of {len} bytes exceeds the {max} byte capacity of the symbol")]
    PayloadTooLarge { len: usize, max: usize },
    /// An explicitly requested version is outside 1-10.
    #[error("unsupported QR version {0} (expected 1-10)")]
    InvalidVersion(u8),
    /// An explicitly requested mask number is outside 0-7.
    #[error("invalid mask pattern {0} (expected 0-7)")]
    InvalidMask(u8),
}
