//! Hash algorithm implementations.

mod average;
mod difference;
mod perceptual;
mod wavelet;

pub use average::AverageHasher;
pub use difference::DifferenceHasher;
pub use perceptual::PerceptualHasher;
pub use wavelet::WaveletHasher;

/// Median of a non-empty set of coefficients.
///
/// Even-length input yields the mean of the two middle values. Sorting uses
/// `total_cmp`, so the result does not depend on input order.
fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_of_odd_length_is_middle() {
        assert_eq!(median(&[5.0, 1.0, 3.0]), 3.0);
    }

    #[test]
    fn median_of_even_length_averages_middles() {
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
    }

    #[test]
    fn median_of_constant_input_is_the_constant() {
        assert_eq!(median(&[7.0; 64]), 7.0);
    }
}
