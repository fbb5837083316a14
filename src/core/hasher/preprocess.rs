//! Grayscale conversion and resizing ahead of hashing.
//!
//! Every algorithm consumes a small [`GrayscaleMatrix`] of a fixed size.
//! Conversion happens once per image at full resolution; each algorithm then
//! resizes the grayscale plane to its own grid.
//!
//! Luma uses integer ITU-R BT.601 weights. Alpha is ignored: translucent
//! pixels hash as if they were fully opaque.
//!
//! Resizing uses fast_image_resize's box convolution (area averaging), which
//! runs in fixed-point integer arithmetic on every CPU backend, so the same
//! input always yields the same matrix.

use crate::core::decoder::PixelBuffer;
use crate::error::HashError;
use fast_image_resize::{images::Image, FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};

/// A dense, row-major plane of 8-bit intensities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayscaleMatrix {
    width: u32,
    height: u32,
    samples: Vec<u8>,
}

impl GrayscaleMatrix {
    /// Build a matrix from row-major samples
    pub fn new(width: u32, height: u32, samples: Vec<u8>) -> Result<Self, HashError> {
        if width == 0 || height == 0 {
            return Err(HashError::EmptyImage { width, height });
        }
        if samples.len() != width as usize * height as usize {
            return Err(HashError::DecodeError {
                reason: format!(
                    "expected {} grayscale samples for {}x{}, got {}",
                    width as usize * height as usize,
                    width,
                    height,
                    samples.len()
                ),
            });
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Build a matrix by evaluating `f(x, y)` for every position
    pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> u8) -> Result<Self, HashError> {
        let samples = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Self::new(width, height, samples)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Sample at column `x`, row `y`
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.samples[(y * self.width + x) as usize]
    }

    /// Fail unless the matrix is exactly `width` x `height`
    pub fn expect_dimensions(&self, width: u32, height: u32) -> Result<(), HashError> {
        if self.dimensions() != (width, height) {
            return Err(HashError::DimensionMismatch {
                expected: (width, height),
                actual: self.dimensions(),
            });
        }
        Ok(())
    }
}

/// BT.601 luma in integer arithmetic, rounded to nearest
fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((299 * r as u32 + 587 * g as u32 + 114 * b as u32 + 500) / 1000) as u8
}

/// Convert a decoded buffer to a full-resolution grayscale plane.
pub fn to_grayscale(pixels: &PixelBuffer) -> Result<GrayscaleMatrix, HashError> {
    let channels = pixels.channels() as usize;
    let samples = pixels.samples();

    let gray = match channels {
        // Gray and gray+alpha: take the intensity, drop alpha
        1 | 2 => samples.chunks_exact(channels).map(|p| p[0]).collect(),
        // RGB and RGBA: weighted sum, drop alpha
        3 | 4 => samples
            .chunks_exact(channels)
            .map(|p| luma(p[0], p[1], p[2]))
            .collect(),
        _ => {
            return Err(HashError::UnsupportedLayout {
                channels: pixels.channels(),
            })
        }
    };

    GrayscaleMatrix::new(pixels.width(), pixels.height(), gray)
}

/// Area-averaging resizer for grayscale planes.
///
/// Holds a fast_image_resize `Resizer`, whose scratch buffers are reused
/// across calls.
pub struct FastResizer {
    resizer: Resizer,
}

impl FastResizer {
    /// Create a new resizer
    pub fn new() -> Self {
        Self {
            resizer: Resizer::new(),
        }
    }

    /// Resize a grayscale plane to exactly `width` x `height`.
    pub fn resize(
        &mut self,
        matrix: &GrayscaleMatrix,
        width: u32,
        height: u32,
    ) -> Result<GrayscaleMatrix, HashError> {
        if width == 0 || height == 0 {
            return Err(HashError::ComputationFailed(format!(
                "invalid target dimensions {}x{}",
                width, height
            )));
        }

        if matrix.dimensions() == (width, height) {
            return Ok(matrix.clone());
        }

        let src_image = Image::from_vec_u8(
            matrix.width(),
            matrix.height(),
            matrix.samples().to_vec(),
            PixelType::U8,
        )
        .map_err(|e| HashError::ComputationFailed(format!("Failed to create source image: {}", e)))?;

        let mut dst_image = Image::new(width, height, PixelType::U8);

        let options = ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Box));

        self.resizer
            .resize(&src_image, &mut dst_image, &options)
            .map_err(|e| HashError::ComputationFailed(format!("Resize failed: {}", e)))?;

        GrayscaleMatrix::new(width, height, dst_image.into_vec())
    }
}

impl Default for FastResizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function for one-off resizing
pub fn resize(matrix: &GrayscaleMatrix, width: u32, height: u32) -> Result<GrayscaleMatrix, HashError> {
    FastResizer::new().resize(matrix, width, height)
}

/// Grayscale conversion followed by a resize to `width` x `height`
pub fn to_grayscale_resized(
    pixels: &PixelBuffer,
    width: u32,
    height: u32,
) -> Result<GrayscaleMatrix, HashError> {
    let gray = to_grayscale(pixels)?;
    resize(&gray, width, height)
}

/// Grayscale conversion followed by a resize to a `side` x `side` square
pub fn to_grayscale_square(pixels: &PixelBuffer, side: u32) -> Result<GrayscaleMatrix, HashError> {
    to_grayscale_resized(pixels, side, side)
}
