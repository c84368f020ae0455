//! FFT-based convolution of a trace against the Morlet bank
//!
//! Linear (not circular) convolution: trace and kernel are zero-padded to a
//! shared FFT size covering `n + max_kernel_len - 1`, multiplied in the
//! frequency domain, and trimmed by `(kernel_len - 1) / 2` so every row
//! aligns 1:1 with the input trace.
//!
//! This is the dominant cost of the pipeline, `O(F * N log N)`. The trace
//! spectrum is computed once; per-frequency work is a parallel map with no
//! shared mutable state.

use rayon::prelude::*;
use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

use crate::error::DetectionError;
use crate::wavelet::{morlet::morlet, WaveletTransform};

/// Convolve a trace with a complex Morlet wavelet bank
///
/// # Arguments
///
/// * `trace` - Filtered voltage trace
/// * `frequencies` - Bank frequencies in Hz, ascending
/// * `cycles` - Morlet cycle count
/// * `sample_rate` - Sampling rate in Hz
///
/// # Returns
///
/// A [`WaveletTransform`] with one trace-aligned row per bank frequency
///
/// # Errors
///
/// Returns `DetectionError::Data` if the trace is empty or shorter than the
/// longest wavelet in the bank.
pub fn wavelet_transform(
    trace: &[f32],
    frequencies: &[f32],
    cycles: f32,
    sample_rate: f32,
) -> Result<WaveletTransform, DetectionError> {
    let n = trace.len();
    if n == 0 {
        return Err(DetectionError::Data {
            stage: "wavelet",
            index: 0,
            message: "empty trace".to_string(),
        });
    }

    let kernels: Vec<Vec<Complex<f32>>> = frequencies
        .iter()
        .map(|&f| morlet(f, cycles, sample_rate))
        .collect();
    let max_kernel_len = kernels.iter().map(Vec::len).max().unwrap_or(1);
    if max_kernel_len > n {
        return Err(DetectionError::Data {
            stage: "wavelet",
            index: n,
            message: format!(
                "trace ({} samples) is shorter than the {}-tap wavelet at {} Hz",
                n, max_kernel_len, frequencies[0]
            ),
        });
    }

    let fft_size = (n + max_kernel_len - 1).next_power_of_two();
    log::debug!(
        "Wavelet transform: {} samples x {} frequencies, FFT size {}",
        n,
        frequencies.len(),
        fft_size
    );

    let mut planner = FftPlanner::<f32>::new();
    let forward = planner.plan_fft_forward(fft_size);
    let inverse = planner.plan_fft_inverse(fft_size);

    // Trace spectrum, computed once and shared read-only across frequencies.
    let mut trace_spectrum: Vec<Complex<f32>> = trace
        .iter()
        .map(|&x| Complex::new(x, 0.0))
        .chain(std::iter::repeat(Complex::new(0.0, 0.0)))
        .take(fft_size)
        .collect();
    forward.process(&mut trace_spectrum);

    let scale = 1.0 / fft_size as f32;
    let rows: Vec<Vec<Complex<f32>>> = kernels
        .par_iter()
        .map(|kernel| {
            let mut buffer: Vec<Complex<f32>> = kernel
                .iter()
                .copied()
                .chain(std::iter::repeat(Complex::new(0.0, 0.0)))
                .take(fft_size)
                .collect();
            forward.process(&mut buffer);
            for (b, s) in buffer.iter_mut().zip(&trace_spectrum) {
                *b *= *s;
            }
            inverse.process(&mut buffer);

            // Full linear convolution is the first n + kernel_len - 1
            // samples; dropping (kernel_len - 1) / 2 from the front centers
            // the kernel on each trace sample.
            let offset = (kernel.len() - 1) / 2;
            buffer[offset..offset + n]
                .iter()
                .map(|&c| c * scale)
                .collect()
        })
        .collect();

    Ok(WaveletTransform {
        frequencies: frequencies.to_vec(),
        rows,
    })
}
