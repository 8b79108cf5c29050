//! ZeroTier share QR codes for the browser.
//!
//! Thin WebAssembly bindings over `zt-qr` and `zt-share-core`, called from the
//! network controller views. Every exported function returns a JSON string
//! with a `success` flag and either the result fields or an `error` message,
//! so nothing panics across the JS boundary.

use log::{Level, LevelFilter, Log, Metadata, Record, debug, warn};
use serde::Serialize;
use wasm_bindgen::prelude::*;

pub use zt_share_core::{NetworkId, ShareConfig, ShareFormat, SharePayload, ShareQr};

/// Log to browser console
fn console_log(level: Level, msg: &str) {
    let msg = JsValue::from_str(msg);
    match level {
        Level::Error => web_sys::console::error_1(&msg),
        Level::Warn => web_sys::console::warn_1(&msg),
        _ => web_sys::console::log_1(&msg),
    }
}

/// `log` backend forwarding records to the browser console.
struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            console_log(
                record.level(),
                &format!("[{}] {}", record.target(), record.args()),
            );
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Mirror `log` output to the browser console.
///
/// `level` is one of `error`, `warn`, `info`, `debug`, `trace` or `off`;
/// anything else means `warn`. Calling it again only changes the level.
#[wasm_bindgen]
pub fn init_logging(level: &str) {
    let filter = level.parse::<LevelFilter>().unwrap_or(LevelFilter::Warn);
    // Already installed on repeat calls; the level still updates.
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(filter);
}

/// Result of [`generate_qr`].
#[derive(Debug, Default, Serialize)]
pub struct QrResult {
    pub success: bool,
    pub svg: Option<String>,
    pub version: Option<u8>,
    pub size: Option<usize>,
    pub mask: Option<u8>,
    pub error: Option<String>,
}

/// Result of [`share_network`] and [`share_network_with_config`].
#[derive(Debug, Default, Serialize)]
pub struct ShareResult {
    pub success: bool,
    pub share: Option<ShareQr>,
    pub error: Option<String>,
}

fn to_json<T: Serialize>(result: &T) -> String {
    serde_json::to_string(result)
        .unwrap_or_else(|_| r#"{"success":false,"error":"Serialization error"}"#.to_string())
}

/// Encode arbitrary text as an SVG QR code displayed at `pixel_size`.
#[wasm_bindgen]
pub fn generate_qr(text: &str, pixel_size: u32) -> String {
    let options = zt_qr::EncodeOptions::default();
    let result = match zt_qr::QrCode::encode_with(text.as_bytes(), &options) {
        Ok(qr) => {
            debug!("generate_qr: {} bytes -> v{}", text.len(), qr.version());
            QrResult {
                success: true,
                svg: Some(qr.to_svg_sized(zt_qr::SVG_MODULE_SCALE, pixel_size)),
                version: Some(qr.version().number()),
                size: Some(qr.size()),
                mask: Some(qr.mask().number()),
                error: None,
            }
        }
        Err(e) => {
            warn!("generate_qr failed: {}", e);
            QrResult {
                error: Some(e.to_string()),
                ..QrResult::default()
            }
        }
    };

    to_json(&result)
}

/// Render the share QR code for a network.
///
/// `format` is `uri`, `id` or `cmd`; an empty string selects the default
/// format (`uri`).
#[wasm_bindgen]
pub fn share_network(nwid: &str, format: &str, pixel_size: u32) -> String {
    let config = ShareConfig {
        display_size: pixel_size,
        ..ShareConfig::default()
    };
    to_json(&share_inner(nwid, format, &config))
}

/// Like [`share_network`], with rendering settings from a `ShareConfig`
/// JSON document.
#[wasm_bindgen]
pub fn share_network_with_config(nwid: &str, format: &str, config_json: &str) -> String {
    let result = match ShareConfig::from_json(config_json) {
        Ok(config) => share_inner(nwid, format, &config),
        Err(e) => ShareResult {
            error: Some(e.to_string()),
            ..ShareResult::default()
        },
    };
    to_json(&result)
}

fn share_inner(nwid: &str, format: &str, config: &ShareConfig) -> ShareResult {
    let rendered = NetworkId::parse(nwid).and_then(|network| {
        let format = if format.trim().is_empty() {
            config.default_format
        } else {
            ShareFormat::parse(format.trim())?
        };
        zt_share_core::render_share(&network, format, config)
    });

    match rendered {
        Ok(share) => ShareResult {
            success: true,
            share: Some(share),
            error: None,
        },
        Err(e) => {
            warn!("share_network failed: {}", e);
            ShareResult {
                error: Some(e.to_string()),
                ..ShareResult::default()
            }
        }
    }
}

/// Get version information
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn parse(json: &str) -> Value {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_generate_qr() {
        let result = parse(&generate_qr("zerotier://network/8056c2e21c000001", 180));
        assert_eq!(result["success"], true);
        assert_eq!(result["version"], 3);
        assert_eq!(result["size"], 29);
        let svg = result["svg"].as_str().unwrap();
        assert!(svg.contains(r#"width="180""#));
        assert!(result["error"].is_null());
    }

    #[test]
    fn test_generate_qr_too_large() {
        let result = parse(&generate_qr(&"a".repeat(400), 180));
        assert_eq!(result["success"], false);
        assert!(result["svg"].is_null());
        assert!(result["error"].as_str().unwrap().contains("400 bytes"));
    }

    #[test]
    fn test_share_network_formats() {
        let cases = [
            ("uri", "zerotier://network/8056c2e21c000001"),
            ("id", "8056c2e21c000001"),
            ("cmd", "zerotier-cli join 8056c2e21c000001"),
            ("", "zerotier://network/8056c2e21c000001"),
        ];
        for (format, content) in cases {
            let result = parse(&share_network("8056C2E21C000001", format, 250));
            assert_eq!(result["success"], true, "{}", format);
            assert_eq!(result["share"]["payload"]["content"], content);
        }
    }

    #[test]
    fn test_share_network_errors() {
        let result = parse(&share_network("not-a-network", "uri", 250));
        assert_eq!(result["success"], false);
        assert!(result["share"].is_null());

        let result = parse(&share_network("8056c2e21c000001", "png", 250));
        assert_eq!(result["success"], false);
        assert!(result["error"].as_str().unwrap().contains("png"));
    }

    #[test]
    fn test_share_network_with_config() {
        let config = r#"{"display_size": 120, "default_format": "id", "mask": 2}"#;
        let result = parse(&share_network_with_config("8056c2e21c000001", "", config));
        assert_eq!(result["success"], true);
        let label = &result["share"]["payload"]["label"];
        assert_eq!(label, "Network ID: 8056c2e21c000001");
        assert_eq!(result["share"]["mask"], 2);

        let result = parse(&share_network_with_config("8056c2e21c000001", "", "{"));
        assert_eq!(result["success"], false);
    }

    #[test]
    fn test_get_version() {
        assert_eq!(get_version(), env!("CARGO_PKG_VERSION"));
    }
}
