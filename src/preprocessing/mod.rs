//! Trace preprocessing
//!
//! Prepares a raw voltage trace for time-frequency decomposition:
//! - Artifact removal with DC-continuous gap interpolation
//! - Zero-phase band-stop, highpass, and lowpass filtering
//!
//! Output length always equals input length.

pub mod filter;
pub mod interpolate;

use crate::config::FilterSpec;
use crate::error::DetectionError;

/// Run the full preprocessing chain
///
/// Removes masked artifacts (DC-continuous linear interpolation), then
/// applies the configured zero-phase filters on a reflect-padded copy.
///
/// # Arguments
///
/// * `trace` - Raw voltage trace
/// * `interpolate_mask` - Same length as `trace`; true marks samples to be
///   removed and refilled by interpolation
/// * `sample_rate` - Sampling rate in Hz
/// * `spec` - Filter configuration
///
/// # Returns
///
/// Filtered trace with the same length as the input
///
/// # Errors
///
/// Returns `DetectionError::Configuration` for cutoffs at or above Nyquist
/// (raised before any filtering), or `DetectionError::Data` for length
/// mismatches and non-finite output samples.
pub fn preprocess(
    trace: &[f32],
    interpolate_mask: &[bool],
    sample_rate: f32,
    spec: &FilterSpec,
) -> Result<Vec<f32>, DetectionError> {
    spec.validate(sample_rate)?;

    let continuous = interpolate::remove_artifacts(trace, interpolate_mask)?;
    let filtered = filter::apply_filters(&continuous, sample_rate, spec)?;

    debug_assert_eq!(filtered.len(), trace.len());
    if let Some(index) = filtered.iter().position(|v| !v.is_finite()) {
        return Err(DetectionError::Data {
            stage: "preprocessing",
            index,
            message: format!("non-finite sample after filtering: {}", filtered[index]),
        });
    }

    Ok(filtered)
}
