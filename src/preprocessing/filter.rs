//! Zero-phase filtering on a reflect-padded trace
//!
//! Each configured filter is a biquad section applied forward and backward,
//! cancelling the group delay so event boundaries found later line up with
//! the raw trace. Both ends are reflect-padded by 10% of the trace length
//! before filtering to keep edge transients out of the analyzed region.

use biquad::{Biquad, Coefficients, DirectForm1, ToHertz, Type, Q_BUTTERWORTH_F32};

use crate::config::FilterSpec;
use crate::error::DetectionError;

/// Fraction of the trace length mirrored onto each end before filtering
const PAD_FRACTION: usize = 10;

/// Apply the configured notch, highpass, and lowpass filters zero-phase
///
/// # Arguments
///
/// * `trace` - Artifact-free trace
/// * `sample_rate` - Sampling rate in Hz
/// * `spec` - Filter configuration (already validated against Nyquist)
///
/// # Returns
///
/// Filtered trace, same length as the input; the padding used internally is
/// discarded.
///
/// # Errors
///
/// Returns `DetectionError::Configuration` if biquad coefficient
/// construction rejects a corner frequency.
pub fn apply_filters(
    trace: &[f32],
    sample_rate: f32,
    spec: &FilterSpec,
) -> Result<Vec<f32>, DetectionError> {
    let pad = (trace.len() / PAD_FRACTION).min(trace.len().saturating_sub(1));
    let mut padded = reflect_pad(trace, pad);

    log::debug!(
        "Filtering {} samples (+{} pad per side): {} notches, highpass {:?}, lowpass {:?}",
        trace.len(),
        pad,
        spec.notches.len(),
        spec.highpass_cutoff_hz,
        spec.lowpass_cutoff_hz
    );

    for &(center, half_width) in &spec.notches {
        let q = center / (2.0 * half_width);
        let coeffs = coefficients(Type::Notch, sample_rate, center, q)?;
        forward_backward(&mut padded, coeffs);
    }
    if let Some(cutoff) = spec.highpass_cutoff_hz {
        let coeffs = coefficients(Type::HighPass, sample_rate, cutoff, Q_BUTTERWORTH_F32)?;
        forward_backward(&mut padded, coeffs);
    }
    if let Some(cutoff) = spec.lowpass_cutoff_hz {
        let coeffs = coefficients(Type::LowPass, sample_rate, cutoff, Q_BUTTERWORTH_F32)?;
        forward_backward(&mut padded, coeffs);
    }

    Ok(padded[pad..pad + trace.len()].to_vec())
}

fn coefficients(
    filter_type: Type<f32>,
    sample_rate: f32,
    corner_hz: f32,
    q: f32,
) -> Result<Coefficients<f32>, DetectionError> {
    Coefficients::<f32>::from_params(filter_type, sample_rate.hz(), corner_hz.hz(), q).map_err(
        |e| {
            DetectionError::Configuration(format!(
                "cannot build filter at {} Hz (fs = {} Hz): {:?}",
                corner_hz, sample_rate, e
            ))
        },
    )
}

/// Run a biquad section forward, then backward over the signal
///
/// Cancels the section's phase response; the effective magnitude response is
/// the section's squared.
fn forward_backward(signal: &mut [f32], coeffs: Coefficients<f32>) {
    let mut section = DirectForm1::<f32>::new(coeffs);
    for x in signal.iter_mut() {
        *x = section.run(*x);
    }
    section.reset_state();
    signal.reverse();
    for x in signal.iter_mut() {
        *x = section.run(*x);
    }
    section.reset_state();
    signal.reverse();
}

/// Mirror `pad` samples onto each end without repeating the edge sample
fn reflect_pad(signal: &[f32], pad: usize) -> Vec<f32> {
    let n = signal.len();
    let mut padded = Vec::with_capacity(n + 2 * pad);
    for i in (1..=pad).rev() {
        padded.push(signal[i]);
    }
    padded.extend_from_slice(signal);
    for i in 0..pad {
        padded.push(signal[n - 2 - i]);
    }
    padded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq: f32, sample_rate: f32, n: usize) -> Vec<f32> {
        (0..n)
            .map(|i| (2.0 * std::f32::consts::PI * freq * i as f32 / sample_rate).sin())
            .collect()
    }

    fn rms(signal: &[f32]) -> f32 {
        (signal.iter().map(|v| v * v).sum::<f32>() / signal.len() as f32).sqrt()
    }

    #[test]
    fn test_reflect_pad_mirrors_without_edge_repeat() {
        let padded = reflect_pad(&[1.0, 2.0, 3.0, 4.0, 5.0], 2);
        assert_eq!(padded, vec![3.0, 2.0, 1.0, 2.0, 3.0, 4.0, 5.0, 4.0, 3.0]);
    }

    #[test]
    fn test_output_length_matches_input() {
        let trace = sine(120.0, 1000.0, 3000);
        let out = apply_filters(&trace, 1000.0, &FilterSpec::default()).unwrap();
        assert_eq!(out.len(), trace.len());
    }

    #[test]
    fn test_notch_attenuates_line_noise() {
        let sample_rate = 1000.0;
        let n = 4000;
        let mains = sine(50.0, sample_rate, n);
        let ripple = sine(150.0, sample_rate, n);
        let trace: Vec<f32> = mains.iter().zip(&ripple).map(|(a, b)| a + b).collect();

        let spec = FilterSpec {
            highpass_cutoff_hz: None,
            lowpass_cutoff_hz: None,
            notches: vec![(50.0, 2.0)],
        };
        let out = apply_filters(&trace, sample_rate, &spec).unwrap();

        // The 150 Hz component survives, so output RMS should sit near the
        // single-sinusoid level rather than the two-sinusoid level.
        let interior = &out[n / 4..3 * n / 4];
        let expected = rms(&ripple[n / 4..3 * n / 4]);
        assert!(
            (rms(interior) - expected).abs() / expected < 0.2,
            "notch failed: rms {} vs expected {}",
            rms(interior),
            expected
        );
    }

    #[test]
    fn test_highpass_removes_dc() {
        let sample_rate = 1000.0;
        let n = 4000;
        let mut trace = sine(150.0, sample_rate, n);
        for v in trace.iter_mut() {
            *v += 10.0;
        }

        let spec = FilterSpec {
            highpass_cutoff_hz: Some(2.0),
            lowpass_cutoff_hz: None,
            notches: vec![],
        };
        let out = apply_filters(&trace, sample_rate, &spec).unwrap();

        let interior = &out[n / 4..3 * n / 4];
        let mean = interior.iter().sum::<f32>() / interior.len() as f32;
        assert!(mean.abs() < 0.1, "DC survived highpass: mean {}", mean);
    }

    #[test]
    fn test_lowpass_attenuates_high_frequency() {
        let sample_rate = 1000.0;
        let n = 4000;
        let noise = sine(450.0, sample_rate, n);

        let spec = FilterSpec {
            highpass_cutoff_hz: None,
            lowpass_cutoff_hz: Some(200.0),
            notches: vec![],
        };
        let out = apply_filters(&noise, sample_rate, &spec).unwrap();

        let interior = &out[n / 4..3 * n / 4];
        assert!(
            rms(interior) < 0.2 * rms(&noise[n / 4..3 * n / 4]),
            "450 Hz survived a 200 Hz lowpass"
        );
    }
}
