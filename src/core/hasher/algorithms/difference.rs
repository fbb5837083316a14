//! Difference Hash (dHash) implementation.
//!
//! dHash works by:
//! 1. Resizing the image to 9x8 (one extra column)
//! 2. Converting to grayscale
//! 3. Comparing each pixel to the one to its right
//! 4. If left pixel is strictly brighter, set bit to 1, else 0
//!
//! This captures the relative gradient of brightness changes, so uniform
//! brightness or contrast shifts leave the hash alone.

use super::super::bits::BitVector64;
use super::super::preprocess::GrayscaleMatrix;
use super::super::traits::{HashAlgorithm, HashAlgorithmKind};
use crate::error::HashError;

/// Rows in the comparison grid; the grid is one column wider
const GRID: u32 = 8;

/// Difference Hash (dHash) implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct DifferenceHasher;

impl DifferenceHasher {
    /// Create a new dHash hasher
    pub fn new() -> Self {
        Self
    }
}

impl HashAlgorithm for DifferenceHasher {
    fn input_dimensions(&self) -> (u32, u32) {
        (GRID + 1, GRID)
    }

    fn hash_matrix(&self, matrix: &GrayscaleMatrix) -> Result<BitVector64, HashError> {
        matrix.expect_dimensions(GRID + 1, GRID)?;

        Ok(BitVector64::from_fn(|i| {
            let x = i as u32 % GRID;
            let y = i as u32 / GRID;
            // Compare current pixel to the one on its right
            matrix.get(x, y) > matrix.get(x + 1, y)
        }))
    }

    fn kind(&self) -> HashAlgorithmKind {
        HashAlgorithmKind::Difference
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::decoder::PixelBuffer;
    use crate::core::hasher::traits::PerceptualHash;

    fn create_image(width: u32, height: u32, f: impl Fn(u32, u32) -> u8) -> PixelBuffer {
        let mut samples = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = f(x, y);
                samples.extend_from_slice(&[v, v, v]);
            }
        }
        PixelBuffer::new(width, height, 3, samples).unwrap()
    }

    fn create_left_to_right_gradient() -> PixelBuffer {
        // Gradient: left is dark, right is bright (left < right)
        create_image(100, 100, |x, _| (x * 255 / 99) as u8)
    }

    fn create_right_to_left_gradient() -> PixelBuffer {
        // Gradient: right is dark, left is bright (left > right)
        create_image(100, 100, |x, _| ((99 - x) * 255 / 99) as u8)
    }

    #[test]
    fn identical_images_produce_identical_hash() {
        let hasher = DifferenceHasher::new();
        let image = create_image(100, 100, |x, y| ((x + 3 * y) % 256) as u8);

        let hash1 = hasher.hash_pixels(&image).unwrap();
        let hash2 = hasher.hash_pixels(&image).unwrap();

        assert_eq!(hash1.distance(&hash2), 0);
    }

    #[test]
    fn solid_image_hashes_to_zero() {
        let hasher = DifferenceHasher::new();
        let image = create_image(8, 8, |_, _| 128);

        let hash = hasher.hash_pixels(&image).unwrap();

        assert_eq!(hash.to_hex(), "0000000000000000");
    }

    #[test]
    fn opposite_gradients_produce_opposite_hashes() {
        let hasher = DifferenceHasher::new();

        // Left-to-right gradient: all comparisons yield left < right (bits = 0)
        // Right-to-left gradient: all comparisons yield left > right (bits = 1)
        let hash1 = hasher.hash_pixels(&create_left_to_right_gradient()).unwrap();
        let hash2 = hasher.hash_pixels(&create_right_to_left_gradient()).unwrap();

        assert_eq!(hash1.to_hex(), "0000000000000000");
        assert_eq!(hash2.to_hex(), "ffffffffffffffff");
        assert_eq!(hash1.distance(&hash2), 64);
    }

    #[test]
    fn brightness_shift_does_not_change_hash() {
        let hasher = DifferenceHasher::new();
        // Neighbouring 10x10 blocks differ by at least 37 levels
        let pattern = |x: u32, y: u32| ((x / 10) * 37 % 150 + (y / 10) * 3) as u8;
        let base = create_image(90, 80, pattern);
        let brighter = create_image(90, 80, |x, y| pattern(x, y) + 40);

        let hash1 = hasher.hash_pixels(&base).unwrap();
        let hash2 = hasher.hash_pixels(&brighter).unwrap();

        assert_eq!(hash1, hash2);
    }

    #[test]
    fn equal_neighbours_are_not_a_gradient() {
        let hasher = DifferenceHasher::new();
        // Only the last column of row 0 drops, so only bit 7 is set
        let matrix = GrayscaleMatrix::from_fn(9, 8, |x, y| if y == 0 && x == 8 { 0 } else { 50 }).unwrap();

        let bits = hasher.hash_matrix(&matrix).unwrap();

        assert_eq!(bits.as_u64(), 1 << (63 - 7));
    }

    #[test]
    fn rejects_square_grid() {
        let hasher = DifferenceHasher::new();
        let matrix = GrayscaleMatrix::from_fn(8, 8, |_, _| 0).unwrap();

        assert!(hasher.hash_matrix(&matrix).is_err());
    }

    #[test]
    fn kind_returns_difference() {
        let hasher = DifferenceHasher::new();
        assert_eq!(hasher.kind(), HashAlgorithmKind::Difference);
    }
}
