//! Wavelet Hash (wHash) implementation.
//!
//! wHash resizes to 32x32 and applies two levels of the orthonormal 2D Haar
//! transform, keeping only the approximation (LL) band each time:
//!
//! ```text
//! LL = (a + b + c + d) / 2    for every 2x2 block [a b; c d]
//! ```
//!
//! 32x32 -> 16x16 -> 8x8. Bit i is 1 if LL coefficient i is above the median
//! of all 64 coefficients. Same robustness family as pHash, but only adds and
//! halves instead of evaluating cosines.

use super::super::bits::BitVector64;
use super::super::preprocess::GrayscaleMatrix;
use super::super::traits::{HashAlgorithm, HashAlgorithmKind};
use super::median;
use crate::error::HashError;

/// Side of the grid the decomposition starts from
const INPUT_SIZE: usize = 32;

/// Side of the approximation band that becomes the hash
const BAND_SIZE: usize = 8;

/// Wavelet Hash (wHash) implementation using the Haar transform
#[derive(Debug, Clone, Copy, Default)]
pub struct WaveletHasher;

impl WaveletHasher {
    /// Create a new wHash hasher
    pub fn new() -> Self {
        Self
    }
}

/// One Haar level: the LL band of a `side` x `side` plane
fn haar_approximation(plane: &[f64], side: usize) -> Vec<f64> {
    let half = side / 2;
    let mut band = Vec::with_capacity(half * half);

    for y in 0..half {
        for x in 0..half {
            let top = 2 * y * side + 2 * x;
            let bottom = top + side;
            band.push((plane[top] + plane[top + 1] + plane[bottom] + plane[bottom + 1]) / 2.0);
        }
    }

    band
}

impl HashAlgorithm for WaveletHasher {
    fn input_dimensions(&self) -> (u32, u32) {
        (INPUT_SIZE as u32, INPUT_SIZE as u32)
    }

    fn hash_matrix(&self, matrix: &GrayscaleMatrix) -> Result<BitVector64, HashError> {
        matrix.expect_dimensions(INPUT_SIZE as u32, INPUT_SIZE as u32)?;

        let mut side = INPUT_SIZE;
        let mut band: Vec<f64> = matrix.samples().iter().map(|&s| s as f64).collect();
        while side > BAND_SIZE {
            band = haar_approximation(&band, side);
            side /= 2;
        }

        let median = median(&band);

        Ok(BitVector64::from_fn(|i| band[i] > median))
    }

    fn kind(&self) -> HashAlgorithmKind {
        HashAlgorithmKind::Wavelet
    }
}
