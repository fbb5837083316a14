//! # Hash Calculator
//!
//! The top-level tool: decode an image, compute all four hashes, and wrap the
//! outcome in a [`ProcessResult`].
//!
//! ## Example
//! ```rust,ignore
//! use perceptual_fingerprint::core::calculator::HashCalculator;
//!
//! let calculator = HashCalculator::new();
//! let result = calculator.process(std::path::PathBuf::from("photo.png"));
//! if let Some(hashes) = result.data() {
//!     println!("{}", hashes.p_hash);
//! }
//! ```

mod config;

pub use config::CalculatorConfig;

use super::decoder::{read_file_bytes, Decoder, ImageDecoder};
use super::hasher::{HashSetHasher, ImageHashSet};
use super::result::{ErrorDescriptor, ProcessMetadata, ProcessResult};
use super::tool::Tool;
use crate::error::HashError;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, warn};

/// Name reported by [`HashCalculator`]
pub const TOOL_NAME: &str = "HashCalculator";

/// Version reported by [`HashCalculator`]
pub const TOOL_VERSION: &str = "1.0.0";

/// Image source accepted by [`HashCalculator::process`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashInput {
    /// Encoded image bytes
    Bytes(Vec<u8>),
    /// Path to an encoded image file
    Path(PathBuf),
}

impl HashInput {
    /// Short description for log lines
    pub fn describe(&self) -> String {
        match self {
            HashInput::Bytes(bytes) => format!("<{} bytes>", bytes.len()),
            HashInput::Path(path) => path.display().to_string(),
        }
    }
}

impl From<Vec<u8>> for HashInput {
    fn from(bytes: Vec<u8>) -> Self {
        HashInput::Bytes(bytes)
    }
}

impl From<&[u8]> for HashInput {
    fn from(bytes: &[u8]) -> Self {
        HashInput::Bytes(bytes.to_vec())
    }
}

impl From<PathBuf> for HashInput {
    fn from(path: PathBuf) -> Self {
        HashInput::Path(path)
    }
}

impl From<&Path> for HashInput {
    fn from(path: &Path) -> Self {
        HashInput::Path(path.to_path_buf())
    }
}

/// Computes aHash, pHash, dHash and wHash for one image per call.
///
/// Stateless between calls; share it freely across threads.
pub struct HashCalculator<D: Decoder = ImageDecoder> {
    decoder: D,
    hasher: HashSetHasher,
    config: CalculatorConfig,
}

impl HashCalculator<ImageDecoder> {
    /// Create a calculator with the default configuration
    pub fn new() -> Self {
        Self::with_config(CalculatorConfig::default())
    }

    /// Create a calculator with the default decoder and a custom configuration
    pub fn with_config(config: CalculatorConfig) -> Self {
        let decoder = ImageDecoder::new().fast_jpeg(config.uses_fast_jpeg());
        Self::with_decoder(decoder, config)
    }
}

impl Default for HashCalculator<ImageDecoder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Decoder> HashCalculator<D> {
    /// Create a calculator around a specific decoder
    pub fn with_decoder(decoder: D, config: CalculatorConfig) -> Self {
        Self {
            decoder,
            hasher: HashSetHasher::new(),
            config,
        }
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Whether the decoder can be exercised. Never panics.
    pub fn is_available(&self) -> bool {
        panic::catch_unwind(AssertUnwindSafe(|| self.decoder.is_available())).unwrap_or(false)
    }

    /// Hash one image.
    ///
    /// Every failure, including a panic inside a decoder, comes back as a
    /// failed result. Timing metadata is attached on both paths.
    pub fn process(&self, input: impl Into<HashInput>) -> ProcessResult<ImageHashSet> {
        let start = Instant::now();
        let input = input.into();

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.compute(&input)))
            .unwrap_or_else(|payload| Err(HashError::ComputationFailed(panic_message(payload))));

        let metadata = Some(ProcessMetadata::from_elapsed(start.elapsed()));

        match outcome {
            Ok(hashes) => {
                debug!(
                    input = %input.describe(),
                    a_hash = %hashes.a_hash,
                    p_hash = %hashes.p_hash,
                    d_hash = %hashes.d_hash,
                    w_hash = %hashes.w_hash,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "hashed image"
                );
                ProcessResult::success(hashes, metadata)
            }
            Err(error) => {
                warn!(input = %input.describe(), %error, "failed to hash image");
                ProcessResult::failure(ErrorDescriptor::from(&error), metadata)
            }
        }
    }

    fn compute(&self, input: &HashInput) -> Result<ImageHashSet, HashError> {
        let pixels = match input {
            HashInput::Bytes(bytes) => self.decoder.decode(bytes)?,
            HashInput::Path(path) => {
                let bytes = read_file_bytes(path, self.config.mmap_threshold_bytes())?;
                self.decoder.decode(&bytes)?
            }
        };

        self.hasher.hash_pixels(&pixels, self.config.is_parallel())
    }
}

impl<D: Decoder> Tool for HashCalculator<D> {
    type Input = HashInput;
    type Output = ImageHashSet;

    fn name(&self) -> &'static str {
        TOOL_NAME
    }

    fn version(&self) -> &'static str {
        TOOL_VERSION
    }

    fn is_available(&self) -> bool {
        HashCalculator::is_available(self)
    }

    fn process(&self, input: HashInput) -> ProcessResult<ImageHashSet> {
        HashCalculator::process(self, input)
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("panic during hashing: {}", message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("panic during hashing: {}", message)
    } else {
        "panic during hashing".to_string()
    }
}
