pub mod config;
pub mod error;
pub mod network;
pub mod share;

pub use config::{MaskPolicy, ShareConfig};
pub use error::{ConfigError, ShareError};
pub use network::NetworkId;
pub use share::{ShareFormat, SharePayload, ShareQr, render_share};
