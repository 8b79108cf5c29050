//! # QR Code Encoder
//!
//! A small QR code encoder (ISO/IEC 18004:2015) for the short strings used to
//! share ZeroTier networks: 16-digit network IDs, `zerotier://` URIs and
//! `zerotier-cli join` commands.
//!
//! Scope is deliberately narrow: byte mode only, error correction level L,
//! versions 1-10 (21x21 up to 57x57 modules, at most 271 payload bytes).
//!
//! ## Library Organization
//!
//! ```text
//! lib.rs          QrCode::encode(), QrCode::encode_with(), generate()
//! +-- version     Version profiles, byte capacities, select_version()
//! +-- bits        BitBuffer, make_data_codewords()      (Section 7)
//! +-- gf256       GF(2^8) log/exp tables                 (Section 8)
//! +-- reed_solomon  Generator polynomials, remainders    (Section 8)
//! +-- interleave  Block split + interleave               (Section 8)
//! +-- matrix      Function patterns, zigzag DataPath     (Sections 6, 7.7)
//! +-- mask        Mask predicates, penalty, selection    (Section 7.8)
//! +-- format      Format info (BCH 15,5), version info   (Annex C, D)
//! +-- render      SVG, PNG, terminal art
//! ```
//!
//! ## Encoding Pipeline
//!
//! ```text
//! text -> select_version -> make_data_codewords -> interleave (+ RS ECC)
//!      -> build_matrix -> mask + format info -> version info -> render
//! ```
//!
//! ### Data Encoding
//!
//! ```text
//! [Mode 0100 (4 bits)] [Count (8 bits v1-9, 16 bits v10)] [Data] [Terminator] [Padding]
//! ```
//!
//! ### Error Correction
//!
//! Reed-Solomon over GF(2^8) with field polynomial x^8+x^4+x^3+x^2+1.
//!
//! ```text
//! Generator polynomial: g(x) = (x-a^0)(x-a^1)...(x-a^(m-1))
//! EC = Data(x) * x^m mod g(x)
//! ```
//!
//! Versions 6-10 split the data into several blocks; codewords of all blocks
//! are interleaved before placement.
//!
//! ### Masking
//!
//! All eight mask patterns are scored with the four ISO penalty rules and the
//! lowest score wins, unless a fixed mask is requested through
//! [`EncodeOptions`].
//!
//! ## Example Usage
//!
//! ```
//! use zt_qr::QrCode;
//!
//! let qr = QrCode::encode("zerotier://network/8056c2e21c000001").unwrap();
//! assert_eq!(qr.size(), 29);
//! let svg = qr.to_svg(4); // 4 pixels per module
//! assert!(svg.starts_with("<svg"));
//! ```

use log::debug;

pub mod bits;
pub mod error;
pub mod format;
pub mod gf256;
pub mod interleave;
pub mod mask;
pub mod matrix;
pub mod reed_solomon;
pub mod render;
pub mod version;

pub use error::QrError;
pub use mask::{MaskPattern, MaskSelection};
pub use matrix::Matrix;
pub use render::MAX_MODULE_SCALE;
pub use version::{Version, select_version};

/// Units per module in the SVG coordinate system used by [`generate`].
pub const SVG_MODULE_SCALE: u32 = 4;

/// Knobs for [`QrCode::encode_with`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Mask choice. Defaults to penalty-based selection.
    pub mask: MaskSelection,
    /// Force a version instead of the smallest one that fits.
    pub version: Option<Version>,
}

/// A finished QR symbol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QrCode {
    matrix: Matrix,
    mask: MaskPattern,
}

impl QrCode {
    /// Encode a string with default options.
    pub fn encode(text: &str) -> Result<Self, QrError> {
        Self::encode_with(text.as_bytes(), &EncodeOptions::default())
    }

    /// Encode raw bytes in byte mode.
    pub fn encode_with(data: &[u8], options: &EncodeOptions) -> Result<Self, QrError> {
        let version = match options.version {
            Some(version) if data.len() > version.byte_capacity() => {
                return Err(QrError::PayloadTooLarge {
                    len: data.len(),
                    max: version.byte_capacity(),
                });
            }
            Some(version) => version,
            None => select_version(data.len())?,
        };

        let data_codewords = bits::make_data_codewords(data, version);
        let codewords = interleave::interleave(&data_codewords, version);

        let mut matrix = matrix::build_matrix(&codewords, version);
        let mask = mask::finish(&mut matrix, options.mask);
        format::place_version_info(&mut matrix);

        debug!(
            "encoded {} bytes as version {} ({}x{}), mask {}",
            data.len(),
            version,
            matrix.size(),
            matrix.size(),
            mask
        );

        Ok(Self { matrix, mask })
    }

    pub fn version(&self) -> Version {
        self.matrix.version()
    }

    /// Get the size (modules per side) of this QR code.
    pub fn size(&self) -> usize {
        self.matrix.size()
    }

    pub fn mask(&self) -> MaskPattern {
        self.mask
    }

    /// Get the module value at (row, col). true = black, false = white.
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.matrix.get(row, col)
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Render the QR code as an SVG string.
    pub fn to_svg(&self, module_size: u32) -> String {
        render::to_svg(&self.matrix, module_size)
    }

    /// Render as SVG displayed at `pixel_size` x `pixel_size`.
    pub fn to_svg_sized(&self, module_size: u32, pixel_size: u32) -> String {
        render::to_svg_sized(&self.matrix, module_size, pixel_size)
    }

    /// Render the QR code as a PNG image.
    ///
    /// `module_size` may be at most [`MAX_MODULE_SCALE`].
    ///
    /// # Example
    /// ```
    /// # #[cfg(feature = "png")]
    /// # {
    /// use zt_qr::QrCode;
    /// let qr = QrCode::encode("8056c2e21c000001").unwrap();
    /// let png_data = qr.to_png(10).unwrap();
    /// // std::fs::write("qr.png", png_data).unwrap();
    /// # }
    /// ```
    #[cfg(feature = "png")]
    pub fn to_png(&self, module_size: u32) -> Result<Vec<u8>, png::EncodingError> {
        render::to_png(&self.matrix, module_size)
    }

    /// Render the QR code as ASCII art for terminal display.
    pub fn to_ascii(&self) -> String {
        render::to_ascii(&self.matrix)
    }

    /// Render the QR code as compact ASCII using half-block characters.
    pub fn to_ascii_compact(&self) -> String {
        render::to_ascii_compact(&self.matrix)
    }
}

/// Encode `text` and render it as a self-contained SVG.
///
/// The view box uses [`SVG_MODULE_SCALE`] units per module plus the quiet
/// zone; the document displays at `pixel_size` on each side.
pub fn generate(text: &str, pixel_size: u32) -> Result<String, QrError> {
    let qr = QrCode::encode(text)?;
    Ok(qr.to_svg_sized(SVG_MODULE_SCALE, pixel_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Unmask a copy of the symbol and read the data path back as bytes.
    fn read_codewords(qr: &QrCode) -> Vec<u8> {
        let mut matrix = qr.matrix().clone();
        mask::apply_mask(&mut matrix, qr.mask());
        let bits: Vec<bool> = matrix.data_path().map(|(r, c)| matrix.get(r, c)).collect();
        bits.chunks_exact(8)
            .take(qr.version().profile().total)
            .map(|chunk| chunk.iter().fold(0u8, |acc, &b| (acc << 1) | b as u8))
            .collect()
    }

    #[test]
    fn abc_is_version_1() {
        let qr = QrCode::encode("ABC").unwrap();
        assert_eq!(qr.version(), Version::MIN);
        assert_eq!(qr.size(), 21);
        assert_eq!(qr.version().profile().data, 19);
        assert_eq!(qr.version().profile().total, 26);
    }

    #[test]
    fn forty_character_identifier_is_version_3() {
        let text = format!("{}{}", "8056c2e21c000001".repeat(2), "8056c2e2");
        assert_eq!(text.len(), 40);
        let qr = QrCode::encode(&text).unwrap();
        assert_eq!(qr.version().number(), 3);
        assert_eq!(qr.size(), 29);
    }

    #[test]
    fn encoding_is_deterministic() {
        let a = QrCode::encode("zerotier-cli join 8056c2e21c000001").unwrap();
        let b = QrCode::encode("zerotier-cli join 8056c2e21c000001").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn largest_payload_uses_version_10() {
        let qr = QrCode::encode(&"x".repeat(271)).unwrap();
        assert_eq!(qr.version(), Version::MAX);
        assert_eq!(qr.size(), 57);
    }

    #[test]
    fn oversized_payload_is_rejected() {
        assert_eq!(
            QrCode::encode(&"x".repeat(272)),
            Err(QrError::PayloadTooLarge { len: 272, max: 271 })
        );
        assert!(generate(&"x".repeat(300), 250).is_err());
    }

    #[test]
    fn forced_version_must_fit() {
        let options = EncodeOptions {
            version: Some(Version::MIN),
            ..EncodeOptions::default()
        };
        assert_eq!(
            QrCode::encode_with(&[0u8; 18], &options),
            Err(QrError::PayloadTooLarge { len: 18, max: 17 })
        );

        let options = EncodeOptions {
            version: Some(Version::new(5).unwrap()),
            ..EncodeOptions::default()
        };
        assert_eq!(QrCode::encode_with(b"ABC", &options).unwrap().size(), 37);
    }

    #[test]
    fn fixed_mask_is_honoured() {
        for mask in MaskPattern::all() {
            let options = EncodeOptions {
                mask: MaskSelection::Fixed(mask),
                ..EncodeOptions::default()
            };
            let qr = QrCode::encode_with(b"8056c2e21c000001", &options).unwrap();
            assert_eq!(qr.mask(), mask);
            let expected = format::format_bits(mask);
            assert_eq!(format::read_format_info(qr.matrix()), (expected, expected));
        }
    }

    #[test]
    fn placed_stream_matches_interleaved_codewords() {
        let mut rng = StdRng::seed_from_u64(2024);
        for version in Version::all() {
            let len = rng.gen_range(0..=version.byte_capacity());
            let payload: Vec<u8> = (0..len).map(|_| rng.r#gen()).collect();
            let options = EncodeOptions {
                version: Some(version),
                ..EncodeOptions::default()
            };
            let qr = QrCode::encode_with(&payload, &options).unwrap();

            let data = bits::make_data_codewords(&payload, version);
            let expected = interleave::interleave(&data, version);
            assert_eq!(read_codewords(&qr), expected, "v{}", version);
        }
    }

    #[test]
    fn version_info_present_from_version_7() {
        let qr = QrCode::encode(&"v".repeat(150)).unwrap();
        assert_eq!(qr.version().number(), 7);
        let size = qr.size();
        let bits = format::version_bits(7);
        for i in 0..18 {
            assert_eq!(qr.get(i / 3, size - 11 + i % 3), (bits >> i) & 1 == 1);
        }
    }

    #[test]
    fn function_patterns_survive_masking() {
        let uri = "zerotier://network/8056c2e21c000001";
        let qr = QrCode::encode(uri).unwrap();
        let size = qr.size();
        // Finder corners and timing pattern
        assert!(qr.get(0, 0) && qr.get(0, size - 1) && qr.get(size - 1, 0));
        assert!(!qr.get(1, 1));
        for i in 8..size - 8 {
            assert_eq!(qr.get(6, i), i % 2 == 0);
        }
        assert!(qr.get(size - 8, 8));
    }

    #[test]
    fn generate_renders_svg() {
        let svg = generate("ABC", 250).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"viewBox="0 0 116 116""#));
        assert!(svg.contains(r#"width="250""#));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn qr_code_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<QrCode>();
    }
}
