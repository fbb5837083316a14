//! # Perceptual Fingerprint
//!
//! Compact, comparable 64-bit fingerprints of raster images for
//! near-duplicate and tamper detection.
//!
//! ## Core Guarantees
//! - **Deterministic** - the same pixels always give the same hashes
//! - **Comparable** - every hash is 16 lowercase hex digits, MSB first, so
//!   Hamming distance works across runs and machines
//! - **Contained** - `process` never panics; failures come back as data
//!
//! ## Architecture
//! - `core::decoder` - Pixel buffer adapter (zune-jpeg, image crate)
//! - `core::hasher` - Preprocessing, aHash/dHash/pHash/wHash, bit packing
//! - `core::calculator` - The `HashCalculator` tool
//! - `core::pool` - Fixed-size worker pool for batches
//! - `error` - Error types

pub mod core;
pub mod error;

// Re-export commonly used types at the crate root
pub use crate::core::calculator::{CalculatorConfig, HashCalculator, HashInput};
pub use crate::core::hasher::ImageHashSet;
pub use crate::core::result::{ErrorDescriptor, ProcessResult};
pub use crate::core::tool::Tool;
pub use error::{FingerprintError, HashError, Result};

/// Initialize tracing for the library
///
/// This should be called by the application entry point. Filtering follows
/// `RUST_LOG`; calling it more than once is harmless.
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
