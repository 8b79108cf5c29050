//! Format and version information (ISO 18004 Annex C and D).
//!
//! Format info is 15 bits: [EC level (2)][mask (3)][BCH(15,5) (10)], XORed
//! with 0b101010000010010. Only level L is produced, so the eight possible
//! words are tabulated. Version info (v7+) is 18 bits: [version (6)]
//! [BCH(18,6) (12)], no XOR mask.

use crate::mask::MaskPattern;
use crate::matrix::Matrix;

/// Format words for error correction level L, indexed by mask pattern.
pub const FORMAT_BITS_L: [u16; 8] = [
    0x77C4, 0x72F3, 0x7DAA, 0x789D, 0x662F, 0x6318, 0x6C41, 0x6976,
];

/// BCH(18,6) generator x^12 + x^11 + x^10 + x^9 + x^8 + x^5 + x^2 + 1.
const VERSION_GENERATOR: u32 = 0b1_1111_0010_0101;

/// Format word for level L and the given mask.
pub fn format_bits(mask: MaskPattern) -> u16 {
    FORMAT_BITS_L[mask.number() as usize]
}

/// Write both copies of the format information.
///
/// Bit 14 is the most significant. First copy: row 8 from column 0
/// rightwards (bits 14-9, skipping the timing column, then 8 and 7), then
/// column 8 upwards (bit 6 at row 7, skipping the timing row, bits 5-0).
/// Second copy: column 8 upwards from the bottom (bits 14-8), then row 8
/// from column size-8 to the right edge (bits 7-0).
pub fn place_format_info(matrix: &mut Matrix, mask: MaskPattern) {
    let size = matrix.size();
    let bits = format_bits(mask);
    let bit = |i: usize| (bits >> i) & 1 == 1;

    for i in 0..=5 {
        matrix.set(i, 8, bit(i));
    }
    matrix.set(7, 8, bit(6));
    matrix.set(8, 8, bit(7));
    matrix.set(8, 7, bit(8));
    for i in 9..15 {
        matrix.set(8, 14 - i, bit(i));
    }

    for i in 0..8 {
        matrix.set(8, size - 1 - i, bit(i));
    }
    for i in 8..15 {
        matrix.set(size - 15 + i, 8, bit(i));
    }
}

/// Calculate BCH(18,6) version bits.
pub fn version_bits(version: u8) -> u32 {
    let data = (version as u32) << 12;
    let mut bits = data;

    for i in (0..=5).rev() {
        if (bits >> (i + 12)) & 1 == 1 {
            bits ^= VERSION_GENERATOR << i;
        }
    }

    data | bits
}

/// Write both 6x3 version information blocks (v7+ only).
pub fn place_version_info(matrix: &mut Matrix) {
    let version = matrix.version();
    if !version.has_version_info() {
        return;
    }

    let size = matrix.size();
    let bits = version_bits(version.number());

    for i in 0..18 {
        let bit = (bits >> i) & 1 == 1;
        let near = i / 3;
        let far = size - 11 + i % 3;

        // Top-right
        matrix.set(near, far, bit);
        // Bottom-left
        matrix.set(far, near, bit);
    }
}

/// Read the two format words back from a finished symbol.
pub fn read_format_info(matrix: &Matrix) -> (u16, u16) {
    let size = matrix.size();
    let mut first = 0u16;
    let mut second = 0u16;

    let mut first_positions: Vec<(usize, usize)> = (0..=5).map(|i| (i, 8)).collect();
    first_positions.extend([(7, 8), (8, 8), (8, 7)]);
    first_positions.extend((9..15).map(|i| (8, 14 - i)));

    let mut second_positions: Vec<(usize, usize)> = (0..8).map(|i| (8, size - 1 - i)).collect();
    second_positions.extend((8..15).map(|i| (size - 15 + i, 8)));

    for (i, (&(r1, c1), &(r2, c2))) in first_positions.iter().zip(&second_positions).enumerate() {
        first |= (matrix.get(r1, c1) as u16) << i;
        second |= (matrix.get(r2, c2) as u16) << i;
    }

    (first, second)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::Version;

    /// Calculate BCH(15,5) format bits (generator 0b10100110111).
    fn calculate_format_bits(data: u32) -> u32 {
        let mut bits = data << 10;
        let generator = 0b10100110111;

        for i in (0..=4).rev() {
            if (bits >> (i + 10)) & 1 == 1 {
                bits ^= generator << i;
            }
        }

        ((data << 10) | bits) ^ 0b101010000010010
    }

    /// Level L is indicated by 01 in the format data.
    #[test]
    fn table_matches_bch_computation() {
        for mask in 0..8u32 {
            let data = (0b01 << 3) | mask;
            assert_eq!(
                FORMAT_BITS_L[mask as usize] as u32,
                calculate_format_bits(data),
                "mask {}",
                mask
            );
        }
    }

    #[test]
    fn version_bits_known_values() {
        assert_eq!(version_bits(7), 0x07C94);
        assert_eq!(version_bits(8), 0x085BC);
        assert_eq!(version_bits(9), 0x09A99);
        assert_eq!(version_bits(10), 0x0A4D3);
    }

    #[test]
    fn format_info_written_twice() {
        for version in Version::all() {
            for mask in MaskPattern::all() {
                let mut matrix = Matrix::new(version);
                matrix.place_function_patterns();
                place_format_info(&mut matrix, mask);

                let expected = format_bits(mask);
                assert_eq!(
                    read_format_info(&matrix),
                    (expected, expected),
                    "v{} {:?}",
                    version,
                    mask
                );
                // The dark module sits just above the second copy.
                assert!(matrix.get(matrix.size() - 8, 8));
            }
        }
    }

    #[test]
    fn format_info_mask_0_top_left_layout() {
        // 0x77C4 = 111 0111 1100 0100
        let mut matrix = Matrix::new(Version::MIN);
        matrix.place_function_patterns();
        place_format_info(&mut matrix, MaskPattern::CHECKERBOARD);

        let row8: Vec<bool> = [0, 1, 2, 3, 4, 5, 7, 8]
            .iter()
            .map(|&c| matrix.get(8, c))
            .collect();
        assert_eq!(row8, vec![true, true, true, false, true, true, true, true]);
        let col8: Vec<bool> = [7, 5, 4, 3, 2, 1, 0]
            .iter()
            .map(|&r| matrix.get(r, 8))
            .collect();
        assert_eq!(col8, vec![true, false, false, false, true, false, false]);
    }

    #[test]
    fn version_info_blocks_are_transposed_copies() {
        let version = Version::new(7).unwrap();
        let mut matrix = Matrix::new(version);
        matrix.place_function_patterns();
        place_version_info(&mut matrix);

        let size = matrix.size();
        let bits = version_bits(7);
        for i in 0..18 {
            let expected = (bits >> i) & 1 == 1;
            assert_eq!(matrix.get(i / 3, size - 11 + i % 3), expected, "bit {}", i);
            assert_eq!(matrix.get(size - 11 + i % 3, i / 3), expected, "bit {}", i);
        }
    }

    #[test]
    fn version_info_skipped_below_v7() {
        let version = Version::new(6).unwrap();
        let mut matrix = Matrix::new(version);
        matrix.place_function_patterns();
        let before = matrix.clone();
        place_version_info(&mut matrix);
        assert_eq!(matrix, before);
    }
}
