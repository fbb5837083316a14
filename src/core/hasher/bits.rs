//! Bit packing and hex encoding shared by every algorithm.
//!
//! Bit 0 of a [`BitVector64`] is the most significant bit of the packed
//! `u64`, and the packed value renders as 16 lowercase hex digits. All four
//! algorithms go through this module, so hashes from the same pipeline are
//! always comparable bit for bit.

use crate::error::HashError;

/// Number of bits in every hash produced by this crate
pub const HASH_BITS: usize = 64;

/// Exactly 64 ordered bits; index 0 is the most significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitVector64(u64);

impl BitVector64 {
    /// Build from a predicate over bit indices 0..64
    pub fn from_fn(f: impl FnMut(usize) -> bool) -> Self {
        Self::from(std::array::from_fn::<bool, HASH_BITS, _>(f))
    }

    /// The bit at `index`, counting from the most significant
    pub fn get(&self, index: usize) -> bool {
        index < HASH_BITS && (self.0 >> (HASH_BITS - 1 - index)) & 1 == 1
    }

    /// The packed value
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    pub fn count_ones(&self) -> u32 {
        self.0.count_ones()
    }
}

impl From<[bool; HASH_BITS]> for BitVector64 {
    fn from(bits: [bool; HASH_BITS]) -> Self {
        Self(bits.iter().fold(0u64, |acc, &bit| (acc << 1) | bit as u64))
    }
}

impl From<u64> for BitVector64 {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Render a bit vector as 16 lowercase, zero-padded hex digits.
pub fn encode(bits: &BitVector64) -> String {
    format!("{:016x}", bits.as_u64())
}

/// Parse a hash string produced by [`encode`].
///
/// Only the canonical form is accepted: exactly 16 characters from `[0-9a-f]`.
pub fn decode(hex: &str) -> Result<BitVector64, HashError> {
    let canonical = hex.len() == 16 && hex.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
    if !canonical {
        return Err(HashError::InvalidHashString {
            value: hex.to_string(),
        });
    }

    u64::from_str_radix(hex, 16)
        .map(BitVector64)
        .map_err(|_| HashError::InvalidHashString {
            value: hex.to_string(),
        })
}
