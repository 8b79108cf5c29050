//! GF(2^8) arithmetic for the Reed-Solomon encoder.
//!
//! Elements are bytes; addition is XOR. Multiplication reduces modulo the QR
//! field polynomial x^8 + x^4 + x^3 + x^2 + 1 (0x11D) and goes through
//! log/antilog tables: a * b = EXP[(LOG[a] + LOG[b]) mod 255].

/// Field polynomial x^8 + x^4 + x^3 + x^2 + 1.
pub const PRIMITIVE_POLY: u16 = 0x11D;

/// Log/antilog tables and the operations built on them.
pub struct GF256;

impl GF256 {
    /// `LOG[a]` is the exponent of alpha giving `a`, for `a` in 1..=255.
    pub const LOG: [u8; 256] = Self::log_table();

    /// `EXP[i]` is alpha^i for `i` in 0..255; `EXP[255]` is 1 again.
    pub const EXP: [u8; 256] = Self::exp_table();

    const fn exp_table() -> [u8; 256] {
        let mut table = [0u8; 256];
        let mut value = 1u16;
        let mut i = 0;
        while i < 255 {
            table[i] = value as u8;
            value <<= 1;
            if value & 0x100 != 0 {
                value ^= PRIMITIVE_POLY;
            }
            i += 1;
        }
        table[255] = 1;
        table
    }

    const fn log_table() -> [u8; 256] {
        let exp = Self::exp_table();
        let mut table = [0u8; 256];
        let mut i = 0;
        while i < 255 {
            table[exp[i] as usize] = i as u8;
            i += 1;
        }
        table
    }

    #[inline]
    pub fn mul(a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        let sum = Self::LOG[a as usize] as usize + Self::LOG[b as usize] as usize;
        Self::EXP[sum % 255]
    }

    /// alpha^n.
    #[inline]
    pub fn exp(n: u8) -> u8 {
        Self::EXP[n as usize]
    }

    /// Discrete logarithm of a nonzero element.
    #[inline]
    pub fn log(a: u8) -> u8 {
        debug_assert!(a != 0, "log(0) is undefined");
        Self::LOG[a as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_inverse() {
        for a in 1u8..=255 {
            assert_eq!(GF256::exp(GF256::log(a)), a);
        }
        for i in 0u8..255 {
            assert_eq!(GF256::log(GF256::exp(i)), i);
        }
        assert_eq!(GF256::EXP[255], 1);
    }

    #[test]
    fn alpha_generates_the_field() {
        let mut seen = [false; 256];
        for &value in &GF256::EXP[..255] {
            assert!(!seen[value as usize], "{} repeated", value);
            seen[value as usize] = true;
        }
        assert!(!seen[0]);
    }

    /// Carry-less multiply, then reduce by the field polynomial bit by bit.
    fn slow_mul(a: u8, b: u8) -> u8 {
        let mut product = 0u16;
        for bit in 0..8 {
            if (b >> bit) & 1 == 1 {
                product ^= (a as u16) << bit;
            }
        }
        for bit in (8..15).rev() {
            if (product >> bit) & 1 == 1 {
                product ^= PRIMITIVE_POLY << (bit - 8);
            }
        }
        product as u8
    }

    #[test]
    fn mul_matches_slow_multiply() {
        for a in 0u8..=255 {
            for b in 0u8..=255 {
                assert_eq!(GF256::mul(a, b), slow_mul(a, b), "{} * {}", a, b);
            }
        }
    }
}
