//! # Core Module
//!
//! The hashing engine.
//!
//! ## Modules
//! - `decoder` - Decodes image bytes into pixel buffers
//! - `hasher` - Computes perceptual hashes
//! - `calculator` - Runs decode + all four hashes as one tool call
//! - `pool` - Worker threads for hashing batches
//! - `result` - Success/error envelope with timing
//! - `tool` - Name/version/availability surface shared by tools

pub mod calculator;
pub mod decoder;
pub mod hasher;
pub mod pool;
pub mod result;
pub mod tool;

// Re-export commonly used types
pub use calculator::{HashCalculator, HashInput};
pub use hasher::{HashAlgorithmKind, ImageHashSet, PerceptualHash};
pub use result::ProcessResult;
