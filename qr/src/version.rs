//! Symbol versions 1-10 at error correction level L.
//!
//! Values from ISO 18004:2015 Tables 7 and 9. Each version fixes the symbol
//! size, the codeword budget, the block layout used for error correction and
//! the alignment pattern grid.

use std::fmt;

use crate::error::QrError;

/// One group of equally sized error correction blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockGroup {
    /// Number of blocks in the group.
    pub blocks: usize,
    /// Data codewords carried by each block of the group.
    pub data_per_block: usize,
}

/// Codeword budget of one version.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VersionProfile {
    /// Data plus error correction codewords.
    pub total: usize,
    /// Data codewords.
    pub data: usize,
    /// Error correction codewords per block (uniform across groups).
    pub ecc_per_block: usize,
    /// Block groups, shorter blocks first.
    pub groups: &'static [BlockGroup],
}

impl VersionProfile {
    /// Total number of error correction blocks.
    pub fn num_blocks(&self) -> usize {
        self.groups.iter().map(|g| g.blocks).sum()
    }

    /// Data length of every block, in placement order.
    pub fn block_lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.groups
            .iter()
            .flat_map(|g| std::iter::repeat_n(g.data_per_block, g.blocks))
    }
}

const fn group(blocks: usize, data_per_block: usize) -> BlockGroup {
    BlockGroup {
        blocks,
        data_per_block,
    }
}

const fn profile(
    total: usize,
    data: usize,
    ecc_per_block: usize,
    groups: &'static [BlockGroup],
) -> VersionProfile {
    VersionProfile {
        total,
        data,
        ecc_per_block,
        groups,
    }
}

const PROFILES: [VersionProfile; 10] = [
    profile(26, 19, 7, &[group(1, 19)]),
    profile(44, 34, 10, &[group(1, 34)]),
    profile(70, 55, 15, &[group(1, 55)]),
    profile(100, 80, 20, &[group(1, 80)]),
    profile(134, 108, 26, &[group(1, 108)]),
    profile(172, 136, 18, &[group(2, 68)]),
    profile(196, 156, 20, &[group(2, 78)]),
    profile(242, 194, 24, &[group(2, 97)]),
    profile(292, 232, 30, &[group(2, 116)]),
    profile(346, 274, 18, &[group(2, 68), group(2, 69)]),
];

/// Maximum byte-mode payload per version (level L).
pub const BYTE_CAPACITY: [usize; 10] = [17, 32, 53, 78, 106, 134, 154, 192, 230, 271];

/// Alignment pattern center coordinates (rows and columns) per version.
const ALIGNMENT_POSITIONS: [&[usize]; 10] = [
    &[],
    &[6, 18],
    &[6, 22],
    &[6, 26],
    &[6, 30],
    &[6, 34],
    &[6, 22, 38],
    &[6, 24, 42],
    &[6, 26, 46],
    &[6, 28, 50],
];

/// A supported symbol version (1-10).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(u8);

impl Version {
    pub const MIN: Version = Version(1);
    pub const MAX: Version = Version(10);

    /// Validate a version number.
    pub fn new(number: u8) -> Result<Self, QrError> {
        if (Self::MIN.0..=Self::MAX.0).contains(&number) {
            Ok(Self(number))
        } else {
            Err(QrError::InvalidVersion(number))
        }
    }

    /// All supported versions in increasing order.
    pub fn all() -> impl Iterator<Item = Version> {
        (Self::MIN.0..=Self::MAX.0).map(Version)
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// Modules per side: 4 * version + 17.
    pub fn size(self) -> usize {
        self.0 as usize * 4 + 17
    }

    pub fn profile(self) -> &'static VersionProfile {
        &PROFILES[self.index()]
    }

    /// Largest byte-mode payload this version holds.
    pub fn byte_capacity(self) -> usize {
        BYTE_CAPACITY[self.index()]
    }

    pub fn alignment_positions(self) -> &'static [usize] {
        ALIGNMENT_POSITIONS[self.index()]
    }

    /// Width of the byte-mode character count indicator.
    pub fn char_count_bits(self) -> usize {
        if self.0 <= 9 { 8 } else { 16 }
    }

    /// Versions 7 and up carry version information blocks.
    pub fn has_version_info(self) -> bool {
        self.0 >= 7
    }

    fn index(self) -> usize {
        self.0 as usize - 1
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Find the smallest version whose byte capacity holds `byte_len` bytes.
pub fn select_version(byte_len: usize) -> Result<Version, QrError> {
    Version::all()
        .find(|v| byte_len <= v.byte_capacity())
        .ok_or(QrError::PayloadTooLarge {
            len: byte_len,
            max: Version::MAX.byte_capacity(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Raw data modules per version (everything but function patterns and
    /// format/version info), as counted in ISO 18004 Table 1.
    fn raw_data_modules(version: Version) -> usize {
        let v = version.number() as usize;
        let mut result = (16 * v + 128) * v + 64;
        if v >= 2 {
            let num_align = v / 7 + 2;
            result -= (25 * num_align - 10) * num_align - 55;
            if v >= 7 {
                result -= 36;
            }
        }
        result
    }

    #[test]
    fn profile_totals_are_consistent() {
        for v in Version::all() {
            let p = v.profile();
            let ecc = p.ecc_per_block * p.num_blocks();
            assert_eq!(p.total, p.data + ecc, "v{}", v);
            assert_eq!(p.data, p.block_lengths().sum::<usize>(), "v{}", v);
            assert_eq!(p.total, raw_data_modules(v) / 8, "v{}", v);
        }
    }

    #[test]
    fn byte_capacity_matches_data_bits() {
        for v in Version::all() {
            let header_bits = 4 + v.char_count_bits();
            let expected = (v.profile().data * 8 - header_bits) / 8;
            assert_eq!(v.byte_capacity(), expected, "v{}", v);
        }
    }

    #[test]
    fn byte_capacity_is_strictly_increasing() {
        assert!(BYTE_CAPACITY.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn capacity_boundaries_select_exact_version() {
        for v in Version::all() {
            let cap = v.byte_capacity();
            assert_eq!(select_version(cap), Ok(v));
            match Version::new(v.number() + 1) {
                Ok(next) => assert_eq!(select_version(cap + 1), Ok(next)),
                Err(_) => assert_eq!(
                    select_version(cap + 1),
                    Err(QrError::PayloadTooLarge { len: 272, max: 271 })
                ),
            }
        }
    }

    #[test]
    fn empty_payload_fits_version_1() {
        assert_eq!(select_version(0), Ok(Version::MIN));
    }

    #[test]
    fn version_bounds() {
        assert_eq!(Version::new(0), Err(QrError::InvalidVersion(0)));
        assert_eq!(Version::new(11), Err(QrError::InvalidVersion(11)));
        assert_eq!(Version::new(10).map(Version::size), Ok(57));
        assert_eq!(Version::MIN.size(), 21);
    }

    #[test]
    fn alignment_grid_ends_at_size_minus_7() {
        for v in Version::all().skip(1) {
            let positions = v.alignment_positions();
            assert_eq!(positions.first(), Some(&6));
            assert_eq!(positions.last(), Some(&(v.size() - 7)));
            assert_eq!(positions.len(), v.number() as usize / 7 + 2);
        }
        assert!(Version::MIN.alignment_positions().is_empty());
    }
}
