//! # Hash Sets
//!
//! Computes aHash, pHash, dHash and wHash from a single decode.
//!
//! ## How It Works
//! 1. Convert the decoded image to grayscale once, at full resolution
//! 2. Let each algorithm resize that plane to its own grid
//! 3. Run the four algorithms, either one after another or fanned out
//!    over the rayon pool; both orders give the same hashes
//!
//! A set is all-or-nothing: if any algorithm fails, no set is produced.

use super::preprocess;
use super::traits::PerceptualHash;
use super::{
    AverageHasher, DifferenceHasher, HashAlgorithm, HashAlgorithmKind, ImageHashValue,
    PerceptualHasher, WaveletHasher,
};
use crate::core::decoder::PixelBuffer;
use crate::error::HashError;
use serde::{Deserialize, Serialize};

/// The four hash strings for one image
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageHashSet {
    /// Average hash (aHash)
    pub a_hash: String,
    /// Perceptual hash (pHash)
    pub p_hash: String,
    /// Difference hash (dHash)
    pub d_hash: String,
    /// Wavelet hash (wHash)
    pub w_hash: String,
}

impl ImageHashSet {
    /// Assemble a set from the four computed hashes
    pub fn new(
        a_hash: ImageHashValue,
        p_hash: ImageHashValue,
        d_hash: ImageHashValue,
        w_hash: ImageHashValue,
    ) -> Self {
        Self {
            a_hash: a_hash.to_hex(),
            p_hash: p_hash.to_hex(),
            d_hash: d_hash.to_hex(),
            w_hash: w_hash.to_hex(),
        }
    }

    /// The hash string produced by `kind`
    pub fn get(&self, kind: HashAlgorithmKind) -> &str {
        match kind {
            HashAlgorithmKind::Average => &self.a_hash,
            HashAlgorithmKind::Perceptual => &self.p_hash,
            HashAlgorithmKind::Difference => &self.d_hash,
            HashAlgorithmKind::Wavelet => &self.w_hash,
        }
    }

    /// Parse one of the hash strings back into a comparable value
    pub fn value(&self, kind: HashAlgorithmKind) -> Result<ImageHashValue, HashError> {
        ImageHashValue::from_hex(self.get(kind), kind)
    }

    /// Per-algorithm Hamming distances to another set
    pub fn distance_to(&self, other: &ImageHashSet) -> Result<HashSetDistance, HashError> {
        let distance = |kind| -> Result<u32, HashError> {
            Ok(self.value(kind)?.distance(&other.value(kind)?))
        };

        Ok(HashSetDistance {
            a_hash: distance(HashAlgorithmKind::Average)?,
            p_hash: distance(HashAlgorithmKind::Perceptual)?,
            d_hash: distance(HashAlgorithmKind::Difference)?,
            w_hash: distance(HashAlgorithmKind::Wavelet)?,
        })
    }
}

/// Hamming distances between two hash sets, per algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashSetDistance {
    pub a_hash: u32,
    pub p_hash: u32,
    pub d_hash: u32,
    pub w_hash: u32,
}

impl HashSetDistance {
    /// Largest distance among the four algorithms
    pub fn max(&self) -> u32 {
        self.a_hash.max(self.p_hash).max(self.d_hash).max(self.w_hash)
    }
}

/// Runs all four algorithms over one image
#[derive(Debug, Clone, Default)]
pub struct HashSetHasher {
    average: AverageHasher,
    difference: DifferenceHasher,
    perceptual: PerceptualHasher,
    wavelet: WaveletHasher,
}

impl HashSetHasher {
    /// Create a hasher for all four algorithms
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the full set for a decoded image
    pub fn hash_pixels(&self, pixels: &PixelBuffer, parallel: bool) -> Result<ImageHashSet, HashError> {
        let gray = preprocess::to_grayscale(pixels)?;

        let (average, perceptual, difference, wavelet) = if parallel {
            let ((average, difference), (perceptual, wavelet)) = rayon::join(
                || {
                    rayon::join(
                        || self.average.hash_grayscale(&gray),
                        || self.difference.hash_grayscale(&gray),
                    )
                },
                || {
                    rayon::join(
                        || self.perceptual.hash_grayscale(&gray),
                        || self.wavelet.hash_grayscale(&gray),
                    )
                },
            );
            (average, perceptual, difference, wavelet)
        } else {
            (
                self.average.hash_grayscale(&gray),
                self.perceptual.hash_grayscale(&gray),
                self.difference.hash_grayscale(&gray),
                self.wavelet.hash_grayscale(&gray),
            )
        };

        Ok(ImageHashSet::new(average?, perceptual?, difference?, wavelet?))
    }
}
