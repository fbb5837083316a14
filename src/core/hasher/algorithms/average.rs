//! Average Hash (aHash) implementation.
//!
//! aHash works by:
//! 1. Resizing the image to 8x8
//! 2. Converting to grayscale
//! 3. Computing the average brightness
//! 4. For each pixel: if brighter than average, set bit to 1, else 0
//!
//! A pixel exactly equal to the average counts as not brighter, so a flat
//! image hashes to all zeros. This is the fastest hash but less robust to
//! edits.

use super::super::bits::BitVector64;
use super::super::preprocess::GrayscaleMatrix;
use super::super::traits::{HashAlgorithm, HashAlgorithmKind};
use crate::error::HashError;

/// Side of the square grid aHash reads
const GRID: u32 = 8;

/// Average Hash (aHash) implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct AverageHasher;

impl AverageHasher {
    /// Create a new aHash hasher
    pub fn new() -> Self {
        Self
    }
}

impl HashAlgorithm for AverageHasher {
    fn input_dimensions(&self) -> (u32, u32) {
        (GRID, GRID)
    }

    fn hash_matrix(&self, matrix: &GrayscaleMatrix) -> Result<BitVector64, HashError> {
        matrix.expect_dimensions(GRID, GRID)?;
        let samples = matrix.samples();

        // sample > sum / 64  <=>  64 * sample > sum, without rounding the mean
        let total: u32 = samples.iter().map(|&s| s as u32).sum();
        let count = samples.len() as u32;

        Ok(BitVector64::from_fn(|i| samples[i] as u32 * count > total))
    }

    fn kind(&self) -> HashAlgorithmKind {
        HashAlgorithmKind::Average
    }
}
