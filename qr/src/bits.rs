//! Byte-mode data encoding.
//!
//! ```text
//! [Mode 0100 (4 bits)] [Count (8 or 16 bits)] [Bytes] [Terminator] [Padding]
//! ```
//!
//! Byte mode is used for every payload, so mixed-case network IDs and URIs
//! survive unchanged.

use crate::version::Version;

/// Mode indicator for byte mode.
const MODE_BYTE: u32 = 0b0100;

/// Pad codewords appended alternately after the terminator.
const PAD_CODEWORDS: [u8; 2] = [0xEC, 0x11];

/// Bit buffer for accumulating bits before converting to bytes.
#[derive(Clone, Debug, Default)]
pub struct BitBuffer {
    bits: Vec<bool>,
}

impl BitBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the low `count` bits of `value`, most significant first.
    pub fn append_bits(&mut self, value: u32, count: usize) {
        debug_assert!(count <= 32, "cannot append {} bits from a u32", count);
        for i in (0..count).rev() {
            self.bits.push((value >> i) & 1 == 1);
        }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Pack into bytes, MSB first. A trailing partial byte is zero-filled.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bits
            .chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .filter(|&(_, &bit)| bit)
                    .fold(0u8, |byte, (i, _)| byte | (1 << (7 - i)))
            })
            .collect()
    }
}

/// Encode `data` into exactly `version.profile().data` codewords.
///
/// The caller picks a version large enough for the payload; the character
/// count is written with the width that version requires.
pub fn make_data_codewords(data: &[u8], version: Version) -> Vec<u8> {
    debug_assert!(
        data.len() <= version.byte_capacity(),
        "{} bytes do not fit version {}",
        data.len(),
        version
    );
    let data_codewords = version.profile().data;
    let capacity_bits = data_codewords * 8;
    let mut bits = BitBuffer::new();

    bits.append_bits(MODE_BYTE, 4);
    bits.append_bits(data.len() as u32, version.char_count_bits());
    for &byte in data {
        bits.append_bits(byte as u32, 8);
    }

    // Terminator: up to 4 zero bits, never past the capacity
    let terminator_len = std::cmp::min(4, capacity_bits.saturating_sub(bits.len()));
    bits.append_bits(0, terminator_len);

    while !bits.len().is_multiple_of(8) {
        bits.append_bits(0, 1);
    }

    let mut codewords = bits.to_bytes();
    let pad_count = data_codewords.saturating_sub(codewords.len());
    codewords.extend(PAD_CODEWORDS.iter().cycle().take(pad_count));

    codewords
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(n: u8) -> Version {
        Version::new(n).unwrap()
    }

    #[test]
    fn bit_buffer_packs_msb_first() {
        let mut bits = BitBuffer::new();
        assert!(bits.is_empty());
        bits.append_bits(0b101, 3);
        bits.append_bits(0xFF, 8);
        assert_eq!(bits.len(), 11);
        assert_eq!(bits.to_bytes(), vec![0b1011_1111, 0b1110_0000]);
    }

    /// "HELLO" in byte mode:
    /// Mode 0100, Count 00000101, Data 01001000 01000101 ...
    #[test]
    fn hello_header_codewords() {
        let codewords = make_data_codewords(b"HELLO", v(1));
        assert_eq!(codewords.len(), 19);
        assert_eq!(codewords[0], 0x40, "mode + high nibble of count");
        assert_eq!(codewords[1], 0x54, "count low nibble + 'H' high nibble");
        assert_eq!(codewords[2], 0x84, "low nibble of 'H' + high nibble of 'E'");
    }

    #[test]
    fn abc_full_stream() {
        // 0100 00000011 01000001 01000010 01000011 0000 -> 5 bytes, then pads
        let codewords = make_data_codewords(b"ABC", v(1));
        let mut expected = vec![0x40, 0x34, 0x14, 0x24, 0x30];
        expected.extend([0xEC, 0x11].iter().cycle().take(19 - 5));
        assert_eq!(codewords, expected);
    }

    #[test]
    fn length_always_matches_profile() {
        for version in Version::all() {
            for len in [0, 1, version.byte_capacity() / 2, version.byte_capacity()] {
                let payload = vec![b'z'; len];
                assert_eq!(
                    make_data_codewords(&payload, version).len(),
                    version.profile().data,
                    "v{} len {}",
                    version,
                    len
                );
            }
        }
    }

    #[test]
    fn version_10_uses_16_bit_count() {
        let codewords = make_data_codewords(&[0xAA; 200], v(10));
        // 0100 | 0000 0000 1100 1000 | 1010 ...
        assert_eq!(codewords[0], 0x40);
        assert_eq!(codewords[1], 0x0C);
        assert_eq!(codewords[2], 0x8A);
    }

    #[test]
    fn full_capacity_truncates_terminator() {
        // 17 bytes in v1: 4 + 8 + 136 = 148 of 152 bits, terminator fits exactly.
        let codewords = make_data_codewords(&[0xFF; 17], v(1));
        assert_eq!(codewords.len(), 19);
        assert_eq!(codewords[18], 0xF0);

        // 230 bytes in v9: 1852 of 1856 bits.
        let codewords = make_data_codewords(&[0x00; 230], v(9));
        assert_eq!(codewords.len(), 232);
        let last = codewords.last().copied();
        assert!(last != Some(0xEC) && last != Some(0x11));
    }

    #[test]
    fn pad_codewords_alternate() {
        let codewords = make_data_codewords(b"", v(2));
        assert_eq!(&codewords[..2], &[0x40, 0x00]);
        for (i, &byte) in codewords[2..].iter().enumerate() {
            assert_eq!(byte, PAD_CODEWORDS[i % 2]);
        }
    }
}
