//! Reed-Solomon error correction over GF(2^8).
//!
//! 1. **Generator polynomial**: for n EC codewords,
//!    g(x) = (x - alpha^0)(x - alpha^1)...(x - alpha^(n-1)).
//! 2. **Encoding**: treat the data block as polynomial coefficients,
//!    multiply by x^n and divide by g(x). The remainder is the EC block.
//!
//! Polynomials are stored highest degree first, so `generator[0] == 1`.

use crate::gf256::GF256;

/// Build the generator polynomial of the given degree.
pub fn generator_polynomial(degree: usize) -> Vec<u8> {
    let mut result = vec![1u8];

    for i in 0..degree {
        // Multiply by (x + alpha^i); subtraction is XOR in GF(2^8).
        let mut next = vec![0u8; result.len() + 1];
        let alpha_i = GF256::exp((i % 255) as u8);

        for (j, &coef) in result.iter().enumerate() {
            next[j] ^= coef;
            next[j + 1] ^= GF256::mul(coef, alpha_i);
        }

        result = next;
    }

    result
}

/// Compute `ecc_count` error correction codewords for one data block.
pub fn compute_ecc(data: &[u8], ecc_count: usize) -> Vec<u8> {
    let generator = generator_polynomial(ecc_count);
    remainder(data, &generator)
}

/// Polynomial long division data(x) * x^n mod generator(x).
///
/// The dividend is the data block padded with `n` zero bytes, so it is
/// always at least as long as the divisor and the remainder is exactly
/// `generator.len() - 1` bytes.
pub fn remainder(data: &[u8], generator: &[u8]) -> Vec<u8> {
    debug_assert_eq!(generator.first(), Some(&1), "generator must be monic");
    let ecc_count = generator.len() - 1;

    let mut dividend = Vec::with_capacity(data.len() + ecc_count);
    dividend.extend_from_slice(data);
    dividend.resize(data.len() + ecc_count, 0);

    for i in 0..data.len() {
        let factor = dividend[i];
        if factor == 0 {
            continue;
        }
        for (j, &gen_coef) in generator.iter().enumerate().skip(1) {
            dividend[i + j] ^= GF256::mul(gen_coef, factor);
        }
    }

    dividend.split_off(data.len())
}
