//! Configuration for the hash calculator.

use crate::core::decoder::DEFAULT_MMAP_THRESHOLD;

/// Configuration builder for [`HashCalculator`](super::HashCalculator)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculatorConfig {
    /// Run the four algorithms concurrently on the rayon pool
    parallel: bool,
    /// Use zune-jpeg for JPEG inputs
    fast_jpeg: bool,
    /// Path inputs at least this large are memory-mapped
    mmap_threshold: u64,
}

impl CalculatorConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self {
            parallel: true,
            fast_jpeg: true,
            mmap_threshold: DEFAULT_MMAP_THRESHOLD,
        }
    }

    /// Compute the four hashes concurrently (default) or one after another.
    ///
    /// Output is identical either way.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Enable or disable the zune-jpeg fast path
    pub fn fast_jpeg(mut self, fast_jpeg: bool) -> Self {
        self.fast_jpeg = fast_jpeg;
        self
    }

    /// Set the file size from which path inputs are memory-mapped
    pub fn mmap_threshold(mut self, bytes: u64) -> Self {
        self.mmap_threshold = bytes;
        self
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    pub fn uses_fast_jpeg(&self) -> bool {
        self.fast_jpeg
    }

    pub fn mmap_threshold_bytes(&self) -> u64 {
        self.mmap_threshold
    }
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self::new()
    }
}
