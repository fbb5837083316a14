//! Perceptual Hash (pHash) implementation.
//!
//! pHash uses the Discrete Cosine Transform (DCT) to extract
//! frequency information from the image. This makes it more
//! robust to:
//! - Scaling
//! - Brightness/contrast changes
//! - Compression artifacts
//!
//! Layout of the 64 bits:
//! 1. Resize to 32x32 and run an orthonormal 2D DCT-II (rows, then columns)
//! 2. Keep the top-left 8x8 block of low frequencies, row-major
//! 3. Take the median of the 63 AC coefficients (the DC term is left out)
//! 4. Bit i = 1 if coefficient i > median; the DC slot (bit 0) is always 0
//!
//! Only the 8 lowest frequencies per axis are ever evaluated, against a
//! cosine table computed once in f64.

use super::super::bits::BitVector64;
use super::super::preprocess::GrayscaleMatrix;
use super::super::traits::{HashAlgorithm, HashAlgorithmKind};
use super::median;
use crate::error::HashError;
use std::f64::consts::PI;

/// Side of the square grid fed to the DCT
const DCT_SIZE: usize = 32;

/// Side of the retained low-frequency block
const BLOCK_SIZE: usize = 8;

/// Coefficients smaller than this are treated as exactly zero, so flat
/// regions don't hash on floating point residue.
const COEFFICIENT_EPSILON: f64 = 1e-6;

/// Perceptual Hash (pHash) implementation using DCT
#[derive(Debug, Clone)]
pub struct PerceptualHasher {
    /// basis[k * DCT_SIZE + n] = s(k) * cos(pi * (2n + 1) * k / 2N)
    basis: Vec<f64>,
}

impl PerceptualHasher {
    /// Create a new pHash hasher
    pub fn new() -> Self {
        let n = DCT_SIZE as f64;
        let mut basis = Vec::with_capacity(BLOCK_SIZE * DCT_SIZE);

        for k in 0..BLOCK_SIZE {
            let scale = if k == 0 { (1.0 / n).sqrt() } else { (2.0 / n).sqrt() };
            for x in 0..DCT_SIZE {
                let angle = PI * (2.0 * x as f64 + 1.0) * k as f64 / (2.0 * n);
                basis.push(scale * angle.cos());
            }
        }

        Self { basis }
    }

    /// Low-frequency corner of the 2D DCT-II, row-major (vertical frequency
    /// major, horizontal frequency minor).
    fn low_frequency_block(&self, matrix: &GrayscaleMatrix) -> Vec<f64> {
        let samples: Vec<f64> = matrix.samples().iter().map(|&s| s as f64).collect();

        // First pass: DCT along each row, keeping BLOCK_SIZE frequencies
        let mut rows = vec![0.0f64; DCT_SIZE * BLOCK_SIZE];
        for y in 0..DCT_SIZE {
            let row = &samples[y * DCT_SIZE..(y + 1) * DCT_SIZE];
            for k in 0..BLOCK_SIZE {
                let basis = &self.basis[k * DCT_SIZE..(k + 1) * DCT_SIZE];
                rows[y * BLOCK_SIZE + k] = row.iter().zip(basis).map(|(s, b)| s * b).sum();
            }
        }

        // Second pass: DCT down each retained column
        let mut block = vec![0.0f64; BLOCK_SIZE * BLOCK_SIZE];
        for u in 0..BLOCK_SIZE {
            let basis = &self.basis[u * DCT_SIZE..(u + 1) * DCT_SIZE];
            for k in 0..BLOCK_SIZE {
                let sum: f64 = (0..DCT_SIZE).map(|y| rows[y * BLOCK_SIZE + k] * basis[y]).sum();
                block[u * BLOCK_SIZE + k] = if sum.abs() < COEFFICIENT_EPSILON { 0.0 } else { sum };
            }
        }

        block
    }
}

impl Default for PerceptualHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl HashAlgorithm for PerceptualHasher {
    fn input_dimensions(&self) -> (u32, u32) {
        (DCT_SIZE as u32, DCT_SIZE as u32)
    }

    fn hash_matrix(&self, matrix: &GrayscaleMatrix) -> Result<BitVector64, HashError> {
        matrix.expect_dimensions(DCT_SIZE as u32, DCT_SIZE as u32)?;

        let block = self.low_frequency_block(matrix);
        if block.iter().any(|c| !c.is_finite()) {
            return Err(HashError::ComputationFailed(
                "non-finite DCT coefficient".to_string(),
            ));
        }

        let median = median(&block[1..]);

        Ok(BitVector64::from_fn(|i| i != 0 && block[i] > median))
    }

    fn kind(&self) -> HashAlgorithmKind {
        HashAlgorithmKind::Perceptual
    }
}
