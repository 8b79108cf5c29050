//! Share configuration.
//!
//! Read from JSON; every field is optional:
//!
//! ```json
//! { "display_size": 250, "module_scale": 4, "default_format": "uri", "mask": "auto" }
//! ```

use serde::{Deserialize, Serialize};
use zt_qr::{EncodeOptions, MaskPattern, MaskSelection};

use crate::error::ConfigError;
use crate::share::ShareFormat;

/// Mask choice as written in the config: `"auto"` or a number 0-7.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MaskPolicy {
    /// Lowest penalty score.
    #[default]
    Auto,
    Fixed(u8),
}

impl MaskPolicy {
    /// Convert to the encoder's mask selection, validating the number.
    pub fn to_selection(self) -> Result<MaskSelection, ConfigError> {
        match self {
            MaskPolicy::Auto => Ok(MaskSelection::LowestPenalty),
            MaskPolicy::Fixed(n) => MaskPattern::new(n)
                .map(MaskSelection::Fixed)
                .map_err(|_| ConfigError::InvalidMask(n)),
        }
    }
}

impl Serialize for MaskPolicy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            MaskPolicy::Auto => serializer.serialize_str("auto"),
            MaskPolicy::Fixed(n) => serializer.serialize_u8(*n),
        }
    }
}

impl<'de> Deserialize<'de> for MaskPolicy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u8),
            Name(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(MaskPolicy::Fixed(n)),
            Raw::Name(s) if s.eq_ignore_ascii_case("auto") => Ok(MaskPolicy::Auto),
            Raw::Name(s) => Err(serde::de::Error::custom(format!("unknown mask: {}", s))),
        }
    }
}

/// Rendering settings for share QR codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareConfig {
    /// Displayed edge length of the SVG, in pixels.
    pub display_size: u32,
    /// SVG units (PNG pixels) per module, 1 to [`zt_qr::MAX_MODULE_SCALE`].
    pub module_scale: u32,
    /// Format used when the caller does not pick one.
    pub default_format: ShareFormat,
    pub mask: MaskPolicy,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            display_size: 250,
            module_scale: zt_qr::SVG_MODULE_SCALE,
            default_format: ShareFormat::default(),
            mask: MaskPolicy::default(),
        }
    }
}

impl ShareConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display_size == 0 {
            return Err(ConfigError::Zero {
                field: "display_size",
            });
        }
        if self.module_scale == 0 {
            return Err(ConfigError::Zero {
                field: "module_scale",
            });
        }
        if self.module_scale > zt_qr::MAX_MODULE_SCALE {
            return Err(ConfigError::TooLarge {
                field: "module_scale",
                max: zt_qr::MAX_MODULE_SCALE,
            });
        }
        self.mask.to_selection()?;
        Ok(())
    }

    /// Encoder options implied by this config.
    pub fn encode_options(&self) -> Result<EncodeOptions, ConfigError> {
        Ok(EncodeOptions {
            mask: self.mask.to_selection()?,
            version: None,
        })
    }
}
