//! Share payloads and their QR renderings.

use log::debug;
use serde::{Deserialize, Serialize};
use zt_qr::QrCode;

use crate::config::ShareConfig;
use crate::error::ShareError;
use crate::network::NetworkId;

/// What a share QR code carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ShareFormat {
    /// `zerotier://network/<id>`, opened by the mobile clients.
    #[default]
    Uri,
    /// The bare 16-digit network ID.
    Id,
    /// A `zerotier-cli join <id>` command line.
    Command,
}

impl ShareFormat {
    pub const ALL: [ShareFormat; 3] = [ShareFormat::Uri, ShareFormat::Id, ShareFormat::Command];

    /// Get the string representation of the format.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShareFormat::Uri => "uri",
            ShareFormat::Id => "id",
            ShareFormat::Command => "cmd",
        }
    }

    /// Parse a format name, case-insensitively. `command` is accepted for `cmd`.
    pub fn parse(s: &str) -> Result<Self, ShareError> {
        match s.to_lowercase().as_str() {
            "uri" | "url" => Ok(ShareFormat::Uri),
            "id" => Ok(ShareFormat::Id),
            "cmd" | "command" => Ok(ShareFormat::Command),
            _ => Err(ShareError::UnknownFormat(s.to_string())),
        }
    }
}

impl std::str::FromStr for ShareFormat {
    type Err = ShareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for ShareFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ShareFormat {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ShareFormat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Text encoded into the symbol plus the caption shown under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharePayload {
    pub format: ShareFormat,
    pub content: String,
    pub label: String,
}

impl SharePayload {
    pub fn new(network: &NetworkId, format: ShareFormat) -> Self {
        let content = match format {
            ShareFormat::Uri => format!("zerotier://network/{}", network),
            ShareFormat::Id => network.to_string(),
            ShareFormat::Command => format!("zerotier-cli join {}", network),
        };
        let label = match format {
            ShareFormat::Id => format!("Network ID: {}", network),
            ShareFormat::Uri | ShareFormat::Command => content.clone(),
        };

        Self {
            format,
            content,
            label,
        }
    }
}

/// A rendered share QR code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareQr {
    pub network: NetworkId,
    pub payload: SharePayload,
    /// QR version (1-10).
    pub version: u8,
    /// Modules per side.
    pub size: usize,
    /// Mask pattern applied (0-7).
    pub mask: u8,
    /// Self-contained SVG document.
    pub svg: String,
}

/// Build the payload for `network` in `format` and render it per `config`.
pub fn render_share(
    network: &NetworkId,
    format: ShareFormat,
    config: &ShareConfig,
) -> Result<ShareQr, ShareError> {
    config.validate()?;
    let payload = SharePayload::new(network, format);
    let options = config.encode_options()?;
    let qr = QrCode::encode_with(payload.content.as_bytes(), &options)?;

    debug!(
        "share {} as {}: version {}, mask {}",
        network,
        format,
        qr.version(),
        qr.mask()
    );

    Ok(ShareQr {
        network: network.clone(),
        svg: qr.to_svg_sized(config.module_scale, config.display_size),
        version: qr.version().number(),
        size: qr.size(),
        mask: qr.mask().number(),
        payload,
    })
}
