//! Block splitting and codeword interleaving.
//!
//! ```text
//! Data:    [B0: D0 D1 D2 ...] [B1: D0 D1 D2 ...] ...
//! Output:  B0.D0 B1.D0 ... B0.D1 B1.D1 ... | B0.E0 B1.E0 ... B0.E1 ...
//! ```
//!
//! Longer blocks (second group) contribute one extra trailing data codeword
//! that shorter blocks skip.

use crate::reed_solomon::{generator_polynomial, remainder};
use crate::version::Version;

/// Split data codewords into blocks, append per-block error correction and
/// interleave everything into the final codeword stream.
pub fn interleave(data: &[u8], version: Version) -> Vec<u8> {
    let profile = version.profile();
    debug_assert_eq!(data.len(), profile.data, "data codewords for v{}", version);

    let generator = generator_polynomial(profile.ecc_per_block);
    let mut data_blocks: Vec<&[u8]> = Vec::with_capacity(profile.num_blocks());
    let mut ecc_blocks: Vec<Vec<u8>> = Vec::with_capacity(profile.num_blocks());

    let mut offset = 0;
    for block_len in profile.block_lengths() {
        let block = &data[offset..offset + block_len];
        offset += block_len;

        ecc_blocks.push(remainder(block, &generator));
        data_blocks.push(block);
    }

    let mut result = Vec::with_capacity(profile.total);

    let max_data_len = data_blocks.iter().map(|b| b.len()).max().unwrap_or(0);
    for i in 0..max_data_len {
        result.extend(data_blocks.iter().filter_map(|block| block.get(i)));
    }

    for i in 0..profile.ecc_per_block {
        result.extend(ecc_blocks.iter().map(|block| block[i]));
    }

    result
}
