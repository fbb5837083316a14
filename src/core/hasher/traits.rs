//! Trait definitions for perceptual hashing.

use super::bits::{self, BitVector64, HASH_BITS};
use super::preprocess::{self, GrayscaleMatrix};
use crate::core::decoder::PixelBuffer;
use crate::error::HashError;
use serde::{Deserialize, Serialize};

/// A computed perceptual hash that can be compared
pub trait PerceptualHash: Clone + Send + Sync {
    /// Compute the Hamming distance to another hash
    ///
    /// Returns the number of bits that differ between the two hashes.
    /// Lower distance = more similar images.
    fn distance(&self, other: &Self) -> u32;

    /// Get the hash as a hexadecimal string
    fn to_hex(&self) -> String;

    /// Get the total number of bits in this hash
    fn bit_count(&self) -> u32 {
        HASH_BITS as u32
    }

    /// Number of matching bits: `64 - distance`
    fn similarity(&self, other: &Self) -> u32 {
        self.bit_count() - self.distance(other)
    }
}

/// Available hash algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashAlgorithmKind {
    /// Average Hash (aHash) - Fast, good for exact duplicates
    Average,
    /// Difference Hash (dHash) - Gradient based, robust to brightness shifts
    Difference,
    /// Perceptual Hash (pHash) - Most robust, handles edits well
    Perceptual,
    /// Wavelet Hash (wHash) - pHash-like robustness with a cheaper transform
    Wavelet,
}

impl HashAlgorithmKind {
    /// All algorithms, in the order they appear in a hash set
    pub const ALL: [HashAlgorithmKind; 4] = [
        HashAlgorithmKind::Average,
        HashAlgorithmKind::Perceptual,
        HashAlgorithmKind::Difference,
        HashAlgorithmKind::Wavelet,
    ];

    /// Get a human-readable description of the algorithm
    pub fn description(&self) -> &'static str {
        match self {
            HashAlgorithmKind::Average => {
                "Average Hash (aHash) - Fast comparison based on average brightness"
            }
            HashAlgorithmKind::Difference => {
                "Difference Hash (dHash) - Compares brightness gradients between pixels"
            }
            HashAlgorithmKind::Perceptual => {
                "Perceptual Hash (pHash) - DCT-based, robust to edits and transformations"
            }
            HashAlgorithmKind::Wavelet => {
                "Wavelet Hash (wHash) - Haar approximation band, robust and cheap"
            }
        }
    }
}

impl std::fmt::Display for HashAlgorithmKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HashAlgorithmKind::Average => write!(f, "aHash"),
            HashAlgorithmKind::Difference => write!(f, "dHash"),
            HashAlgorithmKind::Perceptual => write!(f, "pHash"),
            HashAlgorithmKind::Wavelet => write!(f, "wHash"),
        }
    }
}

/// Trait for hash algorithm implementations
pub trait HashAlgorithm: Send + Sync {
    /// Grid (width, height) the algorithm reads
    fn input_dimensions(&self) -> (u32, u32);

    /// Reduce a matrix of exactly [`input_dimensions`](Self::input_dimensions)
    /// to 64 bits.
    fn hash_matrix(&self, matrix: &GrayscaleMatrix) -> Result<BitVector64, HashError>;

    /// Get the algorithm kind
    fn kind(&self) -> HashAlgorithmKind;

    /// Hash a full-resolution grayscale plane, resizing it first
    fn hash_grayscale(&self, gray: &GrayscaleMatrix) -> Result<ImageHashValue, HashError> {
        let (width, height) = self.input_dimensions();
        let resized = preprocess::resize(gray, width, height)?;
        let bits = self.hash_matrix(&resized)?;
        Ok(ImageHashValue::new(bits, self.kind()))
    }

    /// Hash a decoded image
    fn hash_pixels(&self, pixels: &PixelBuffer) -> Result<ImageHashValue, HashError> {
        let gray = preprocess::to_grayscale(pixels)?;
        self.hash_grayscale(&gray)
    }
}

/// Concrete hash value type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageHashValue {
    /// The packed hash bits
    value: u64,
    /// The algorithm that produced this hash
    algorithm: HashAlgorithmKind,
}

impl ImageHashValue {
    /// Create a new hash value
    pub fn new(bits: BitVector64, algorithm: HashAlgorithmKind) -> Self {
        Self {
            value: bits.as_u64(),
            algorithm,
        }
    }

    /// Parse a 16-digit hex hash string
    pub fn from_hex(hex: &str, algorithm: HashAlgorithmKind) -> Result<Self, HashError> {
        Ok(Self::new(bits::decode(hex)?, algorithm))
    }

    /// Get the algorithm that produced this hash
    pub fn algorithm(&self) -> HashAlgorithmKind {
        self.algorithm
    }

    pub fn bits(&self) -> BitVector64 {
        BitVector64::from(self.value)
    }

    pub fn as_u64(&self) -> u64 {
        self.value
    }
}

impl PerceptualHash for ImageHashValue {
    fn distance(&self, other: &Self) -> u32 {
        (self.value ^ other.value).count_ones()
    }

    fn to_hex(&self) -> String {
        bits::encode(&self.bits())
    }
}

impl std::fmt::Display for ImageHashValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}
