//! Integration tests for the hash calculator.
//!
//! These tests run real encoded images through `HashCalculator::process`:
//! - Output format and determinism
//! - Invalid and missing inputs
//! - Lossless re-encoding
//! - Robustness of pHash/wHash to high-frequency detail

use assert_fs::prelude::*;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb, Rgba};
use perceptual_fingerprint::core::calculator::{CalculatorConfig, HashCalculator};
use perceptual_fingerprint::core::hasher::{HashAlgorithmKind, ImageHashSet};
use perceptual_fingerprint::error::ErrorKind;
use perceptual_fingerprint::Tool;
use predicates::prelude::*;
use std::io::Cursor;
use std::path::PathBuf;

fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::new());
    image.write_to(&mut cursor, format).unwrap();
    cursor.into_inner()
}

/// An 8x8 opaque RGBA PNG filled with one gray level
fn uniform_png(level: u8) -> Vec<u8> {
    let img = ImageBuffer::from_pixel(8, 8, Rgba([level, level, level, 255]));
    encode(DynamicImage::ImageRgba8(img), ImageFormat::Png)
}

fn gradient(width: u32, height: u32) -> DynamicImage {
    let img = ImageBuffer::from_fn(width, height, |x, y| {
        let v = (x * 200 / width + y * 40 / height) as u8;
        Rgb([v, v / 2, 255 - v])
    });
    DynamicImage::ImageRgb8(img)
}

fn hashes(calculator: &HashCalculator, bytes: Vec<u8>) -> ImageHashSet {
    let result = calculator.process(bytes);
    assert!(result.is_success(), "unexpected failure: {:?}", result.error());
    result.data().cloned().unwrap()
}

#[test]
fn calculates_all_hash_types_for_a_valid_image() {
    let calculator = HashCalculator::new();
    let is_hash = predicate::str::is_match("^[0-9a-f]{16}$").unwrap();

    let result = calculator.process(uniform_png(128));

    assert!(result.is_success());
    assert!(result.error().is_none());
    assert!(result.metadata().is_some());

    let set = result.data().unwrap();
    for kind in HashAlgorithmKind::ALL {
        assert!(is_hash.eval(set.get(kind)), "{} = {:?}", kind, set.get(kind));
    }
}

#[test]
fn uniform_gray_128_hashes_to_all_zero_bits() {
    let calculator = HashCalculator::new();

    let set = hashes(&calculator, uniform_png(128));

    assert_eq!(set.a_hash, "0000000000000000");
    assert_eq!(set.d_hash, "0000000000000000");
    assert_eq!(set.p_hash, "0000000000000000");
    assert_eq!(set.w_hash, "0000000000000000");
}

#[test]
fn returns_consistent_hashes_for_the_same_image() {
    let calculator = HashCalculator::new();
    let bytes = encode(gradient(120, 80), ImageFormat::Png);

    let first = hashes(&calculator, bytes.clone());
    let second = hashes(&calculator, bytes);

    assert_eq!(first, second);
}

#[test]
fn separately_encoded_identical_images_match() {
    let calculator = HashCalculator::new();

    let first = hashes(&calculator, uniform_png(77));
    let second = hashes(&calculator, uniform_png(77));

    assert_eq!(first, second);
}

#[test]
fn returns_different_hashes_for_different_images() {
    let calculator = HashCalculator::new();
    let light_top = ImageBuffer::from_fn(8, 8, |_, y| {
        let v = if y < 4 { 200 } else { 50 };
        Rgba([v, v, v, 255])
    });
    let light_bottom = ImageBuffer::from_fn(8, 8, |_, y| {
        let v = if y < 4 { 50 } else { 200 };
        Rgba([v, v, v, 255])
    });

    let first = hashes(&calculator, encode(DynamicImage::ImageRgba8(light_top), ImageFormat::Png));
    let second = hashes(&calculator, encode(DynamicImage::ImageRgba8(light_bottom), ImageFormat::Png));

    assert_eq!(first.a_hash, "ffffffff00000000");
    assert_eq!(second.a_hash, "00000000ffffffff");
    assert_ne!(first.w_hash, second.w_hash);
}

#[test]
fn flat_images_share_the_tie_policy_hash() {
    // Nothing in a flat image is above its own mean, whatever the level
    let calculator = HashCalculator::new();

    let light = hashes(&calculator, uniform_png(200));
    let dark = hashes(&calculator, uniform_png(50));

    assert_eq!(light.a_hash, "0000000000000000");
    assert_eq!(dark.a_hash, "0000000000000000");
}

#[test]
fn returns_error_for_invalid_buffer() {
    let calculator = HashCalculator::new();

    let result = calculator.process(b"not an image".to_vec());

    assert!(!result.is_success());
    assert!(result.data().is_none());
    assert_eq!(result.error().unwrap().kind, ErrorKind::DecodeError);
    assert!(result.metadata().is_some());
}

#[test]
fn returns_error_for_empty_buffer() {
    let calculator = HashCalculator::new();

    let result = calculator.process(Vec::new());

    assert_eq!(result.error().unwrap().kind, ErrorKind::DecodeError);
}

#[test]
fn lossless_containers_produce_identical_hashes() {
    let calculator = HashCalculator::new();
    let image = gradient(64, 48);

    let png = hashes(&calculator, encode(image.clone(), ImageFormat::Png));
    let bmp = hashes(&calculator, encode(image.clone(), ImageFormat::Bmp));
    let tiff = hashes(&calculator, encode(image, ImageFormat::Tiff));

    assert_eq!(png, bmp);
    assert_eq!(png, tiff);
}

#[test]
fn jpeg_input_is_hashed() {
    let calculator = HashCalculator::new();
    let slow = HashCalculator::with_config(CalculatorConfig::new().fast_jpeg(false));
    let bytes = encode(gradient(96, 96), ImageFormat::Jpeg);

    let fast_set = hashes(&calculator, bytes.clone());
    let slow_set = hashes(&slow, bytes);

    // Different JPEG decoders may round differently, but not by much
    let distance = fast_set.distance_to(&slow_set).unwrap();
    assert!(distance.p_hash <= 6, "pHash distance {}", distance.p_hash);
}

#[test]
fn high_frequency_detail_leaves_phash_and_whash_alone() {
    let calculator = HashCalculator::new();
    let smooth = |x: u32, y: u32| 40 + (x * 90 / 256 + y * 60 / 256) as u8;

    let clean = ImageBuffer::from_fn(256, 256, |x, y| {
        let v = smooth(x, y);
        Rgb([v, v, v])
    });
    let noisy = ImageBuffer::from_fn(256, 256, |x, y| {
        // Pixel-level checkerboard, invisible after area averaging
        let v = if (x + y) % 2 == 0 { smooth(x, y) + 16 } else { smooth(x, y) - 16 };
        Rgb([v, v, v])
    });

    let clean_set = hashes(&calculator, encode(DynamicImage::ImageRgb8(clean), ImageFormat::Png));
    let noisy_set = hashes(&calculator, encode(DynamicImage::ImageRgb8(noisy), ImageFormat::Png));

    let distance = clean_set.distance_to(&noisy_set).unwrap();
    assert!(distance.p_hash <= 4, "pHash distance {}", distance.p_hash);
    assert!(distance.w_hash <= 4, "wHash distance {}", distance.w_hash);
}

/// 64x64 gray image made of 8x8 blocks, one block per aHash cell
fn block_image(cells: &[u32]) -> Vec<u8> {
    let img = ImageBuffer::from_fn(64, 64, |x, y| {
        let v = cells[(y / 8 * 8 + x / 8) as usize] as u8;
        Rgb([v, v, v])
    });
    encode(DynamicImage::ImageRgb8(img), ImageFormat::Png)
}

#[test]
fn cell_scale_change_moves_ahash_but_not_phash_or_whash() {
    let calculator = HashCalculator::new();

    // Scattered levels with a few bright cells, so the mean sits well above the median
    let mut cells: Vec<u32> = (0..64u32)
        .map(|i| 60 + (i.wrapping_mul(2_654_435_761) >> 24) % 97)
        .collect();
    for bright in [5, 14, 23, 30, 41, 46, 52, 63] {
        cells[bright] = 250;
    }

    // Make the target cell equal the grid mean exactly, which aHash scores as 0
    let (target, filler) = (27, 0);
    let rest: u32 = cells
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != target)
        .map(|(_, &v)| v)
        .sum();
    cells[filler] += (63 - rest % 63) % 63;
    let rest = rest + (63 - rest % 63) % 63;
    cells[target] = rest / 63;
    assert_eq!(cells.iter().sum::<u32>(), 64 * cells[target]);

    let mut sorted = cells.clone();
    sorted.sort_unstable();
    assert!(cells[target] > sorted[32] + 1, "target must sit above the median");

    let mut bumped = cells.clone();
    bumped[target] += 1;

    let before = hashes(&calculator, block_image(&cells));
    let after = hashes(&calculator, block_image(&bumped));
    let distance = before.distance_to(&after).unwrap();

    // One level is enough to lift the tied cell above the mean
    assert_eq!(distance.a_hash, 1);
    assert!(distance.p_hash <= 4, "pHash distance {}", distance.p_hash);
    assert_eq!(distance.w_hash, 0);
}

#[test]
fn path_input_matches_bytes_input() {
    let calculator = HashCalculator::new();
    let bytes = encode(gradient(50, 70), ImageFormat::Png);

    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("photo.png");
    file.write_binary(&bytes).unwrap();

    let from_path = calculator.process(file.path());
    let from_bytes = calculator.process(bytes);

    assert_eq!(from_path.into_result(), from_bytes.into_result());
}

#[test]
fn memory_mapped_path_input_matches_bytes_input() {
    let calculator = HashCalculator::with_config(CalculatorConfig::new().mmap_threshold(1));
    let bytes = encode(gradient(50, 70), ImageFormat::Png);

    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("large.png");
    file.write_binary(&bytes).unwrap();

    assert_eq!(
        calculator.process(file.path()).into_result(),
        calculator.process(bytes).into_result()
    );
}

#[test]
fn missing_path_returns_io_error() {
    let calculator = HashCalculator::new();

    let result = calculator.process(PathBuf::from("/nonexistent/path/that/does/not/exist.png"));

    assert!(!result.is_success());
    assert_eq!(result.error().unwrap().kind, ErrorKind::IoError);
    assert!(result.error().unwrap().message.contains("exist.png"));
}

#[test]
fn corrupt_file_returns_decode_error() {
    let calculator = HashCalculator::new();
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("corrupt.jpg");
    file.write_binary(b"this is not a valid image file").unwrap();

    let result = calculator.process(file.path());

    assert_eq!(result.error().unwrap().kind, ErrorKind::DecodeError);
}

#[test]
fn decoder_is_available() {
    let calculator = HashCalculator::new();
    assert!(calculator.is_available());
}

#[test]
fn has_correct_name_and_version() {
    let calculator = HashCalculator::new();
    assert_eq!(calculator.name(), "HashCalculator");
    assert_eq!(calculator.version(), "1.0.0");
}

#[test]
fn result_serializes_to_the_documented_shape() {
    let calculator = HashCalculator::new();

    let success = serde_json::to_value(calculator.process(uniform_png(128))).unwrap();
    let failure = serde_json::to_value(calculator.process(b"not an image".to_vec())).unwrap();

    assert_eq!(success["success"], true);
    assert_eq!(success["data"]["aHash"], "0000000000000000");
    assert!(success["metadata"]["processingTimeMs"].is_u64());
    assert!(success.get("error").is_none());

    assert_eq!(failure["success"], false);
    assert_eq!(failure["error"]["kind"], "DecodeError");
    assert!(failure.get("data").is_none());
}
