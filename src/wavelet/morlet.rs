//! Complex Morlet wavelet construction
//!
//! A Morlet wavelet is a complex exponential under a Gaussian envelope:
//!
//! ```text
//! w(t) = exp(-t^2 / (2 sigma^2)) * exp(i 2 pi f t),   sigma = c / (2 pi f)
//! ```
//!
//! where `c` is the cycle count trading time resolution against frequency
//! resolution. The support is truncated at ±4 sigma and the wavelet is
//! L1-normalized (sum of magnitudes equals 1) so band energy stays
//! comparable across frequencies despite the varying window length.

use rustfft::num_complex::Complex;

/// Envelope truncation in units of sigma
const TRUNCATION_SIGMAS: f32 = 4.0;

/// Build a complex Morlet wavelet sampled at the trace rate
///
/// # Arguments
///
/// * `frequency` - Center frequency in Hz
/// * `cycles` - Cycle count `c`; the Gaussian envelope has
///   `sigma = c / (2 pi f)` seconds
/// * `sample_rate` - Sampling rate in Hz
///
/// # Returns
///
/// An odd-length, L1-normalized kernel symmetric about its center tap.
pub fn morlet(frequency: f32, cycles: f32, sample_rate: f32) -> Vec<Complex<f32>> {
    let sigma = cycles / (2.0 * std::f32::consts::PI * frequency);
    let half_taps = (TRUNCATION_SIGMAS * sigma * sample_rate).floor() as i64;

    let mut kernel = Vec::with_capacity(2 * half_taps as usize + 1);
    let mut magnitude_sum = 0.0f32;
    for k in -half_taps..=half_taps {
        let t = k as f32 / sample_rate;
        let envelope = (-t * t / (2.0 * sigma * sigma)).exp();
        let angle = 2.0 * std::f32::consts::PI * frequency * t;
        let value = Complex::new(envelope * angle.cos(), envelope * angle.sin());
        magnitude_sum += value.norm();
        kernel.push(value);
    }

    for value in kernel.iter_mut() {
        *value /= magnitude_sum;
    }
    kernel
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_is_odd_length() {
        let kernel = morlet(120.0, 7.0, 1000.0);
        assert_eq!(kernel.len() % 2, 1);
    }

    #[test]
    fn test_l1_normalized() {
        let kernel = morlet(120.0, 7.0, 1000.0);
        let sum: f32 = kernel.iter().map(|c| c.norm()).sum();
        assert!((sum - 1.0).abs() < 1e-4, "L1 norm {}", sum);
    }

    #[test]
    fn test_center_tap_is_envelope_peak() {
        let kernel = morlet(150.0, 7.0, 1000.0);
        let center = kernel.len() / 2;
        let center_mag = kernel[center].norm();
        for c in &kernel {
            assert!(c.norm() <= center_mag + 1e-9);
        }
        // At t = 0 the complex exponential is purely real.
        assert!(kernel[center].im.abs() < 1e-6);
    }

    #[test]
    fn test_lower_frequency_gives_longer_support() {
        let low = morlet(80.0, 7.0, 1000.0);
        let high = morlet(250.0, 7.0, 1000.0);
        assert!(low.len() > high.len());
    }

    #[test]
    fn test_envelope_symmetric() {
        let kernel = morlet(100.0, 7.0, 1000.0);
        let n = kernel.len();
        for i in 0..n / 2 {
            assert!((kernel[i].norm() - kernel[n - 1 - i].norm()).abs() < 1e-5);
        }
    }
}
