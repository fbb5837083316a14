//! # Decoder Module
//!
//! Turns encoded image bytes into raw pixel buffers for the hasher.
//!
//! Decoding is an external capability as far as hashing is concerned: the
//! hasher only ever sees a [`PixelBuffer`]. The concrete decoder is picked at
//! build time through the `D: Decoder` parameter of
//! [`HashCalculator`](crate::core::calculator::HashCalculator), which defaults
//! to [`ImageDecoder`].
//!
//! ## Backends
//! - JPEG: `zune-jpeg` (1.5-2x faster), falling back to the `image` crate
//! - Everything else: the `image` crate
//! - Paths: memory-mapped reads for large files (see [`read_file_bytes`])

mod fast_decode;
mod mmap_decode;

pub use fast_decode::ImageDecoder;
pub use mmap_decode::{read_file_bytes, FileBytes, DEFAULT_MMAP_THRESHOLD};

use crate::error::HashError;

/// A decoded raster: interleaved 8-bit samples, row-major, no padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: u8,
    samples: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw samples, checking that the length matches the layout.
    pub fn new(width: u32, height: u32, channels: u8, samples: Vec<u8>) -> Result<Self, HashError> {
        if width == 0 || height == 0 {
            return Err(HashError::EmptyImage { width, height });
        }
        if !(1..=4).contains(&channels) {
            return Err(HashError::UnsupportedLayout { channels });
        }

        let expected = width as usize * height as usize * channels as usize;
        if samples.len() != expected {
            return Err(HashError::DecodeError {
                reason: format!(
                    "expected {} samples for {}x{}x{}, got {}",
                    expected,
                    width,
                    height,
                    channels,
                    samples.len()
                ),
            });
        }

        Ok(Self {
            width,
            height,
            channels,
            samples,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Samples per pixel: 1 (gray), 2 (gray+alpha), 3 (RGB) or 4 (RGBA)
    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn samples(&self) -> &[u8] {
        &self.samples
    }
}

/// A pixel decoding capability.
pub trait Decoder: Send + Sync {
    /// Decode an encoded image into a pixel buffer
    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer, HashError>;

    /// Check that the decoder can actually be exercised.
    ///
    /// Must never panic; any failure is reported as `false`.
    fn is_available(&self) -> bool;
}
