//! # Hasher Module
//!
//! Computes 64-bit perceptual hashes for images.
//!
//! ## Supported Algorithms
//! - **aHash (Average Hash)** - Fastest, good for exact duplicates
//! - **dHash (Difference Hash)** - Gradient signs, ignores brightness shifts
//! - **pHash (Perceptual Hash)** - DCT-based, most robust to edits
//! - **wHash (Wavelet Hash)** - Haar-based, pHash-like at lower cost
//!
//! ## How It Works
//! 1. Convert to grayscale (BT.601, alpha ignored)
//! 2. Resize to the algorithm's grid with area averaging
//! 3. Reduce the grid to 64 bits
//! 4. Pack MSB-first and render as 16 lowercase hex digits
//!
//! ## Example
//! ```rust,ignore
//! use perceptual_fingerprint::core::hasher::{HashAlgorithm, HashAlgorithmKind};
//!
//! let hasher = HashAlgorithmKind::Perceptual.hasher();
//! let hash = hasher.hash_pixels(&pixels)?;
//! println!("{}", hash.to_hex());
//! ```

mod algorithms;
pub mod bits;
pub mod hash_set;
pub mod preprocess;
mod traits;

pub use algorithms::{AverageHasher, DifferenceHasher, PerceptualHasher, WaveletHasher};
pub use bits::{BitVector64, HASH_BITS};
pub use hash_set::{HashSetDistance, HashSetHasher, ImageHashSet};
pub use preprocess::GrayscaleMatrix;
pub use traits::{HashAlgorithm, HashAlgorithmKind, ImageHashValue, PerceptualHash};

impl HashAlgorithmKind {
    /// Build the hasher for this algorithm
    pub fn hasher(self) -> Box<dyn HashAlgorithm> {
        match self {
            HashAlgorithmKind::Average => Box::new(AverageHasher::new()),
            HashAlgorithmKind::Difference => Box::new(DifferenceHasher::new()),
            HashAlgorithmKind::Perceptual => Box::new(PerceptualHasher::new()),
            HashAlgorithmKind::Wavelet => Box::new(WaveletHasher::new()),
        }
    }
}
