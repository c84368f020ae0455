//! # Ripple DSP
//!
//! A sharp-wave ripple (SWR) detection engine for single-channel hippocampal
//! recordings, turning a raw, artifact-laden voltage trace into a list of
//! time-bounded, vetted oscillatory events ready for human review.
//!
//! ## Features
//!
//! - **Preprocessing**: DC-continuous artifact interpolation plus zero-phase
//!   notch/highpass/lowpass filtering
//! - **Wavelet decomposition**: complex Morlet bank via FFT convolution,
//!   parallel across frequencies
//! - **Detection**: robust median + MAD thresholds, 2-D connected-region
//!   extraction, transitive merging, duration and cycle-count validation
//! - **Scoring**: composite review-priority ranking per event
//!
//! ## Quick Start
//!
//! ```no_run
//! use ripple_dsp::{detect_ripples, DetectionConfig};
//!
//! // Single-channel voltage trace and per-sample eligibility mask
//! let trace: Vec<f32> = vec![]; // Your recording
//! let inclusion_mask = vec![true; trace.len()];
//! let sample_rate = 1000.0;
//!
//! let result = detect_ripples(&trace, &inclusion_mask, sample_rate, DetectionConfig::default())?;
//!
//! for (event, score) in result.events.iter().zip(&result.scores) {
//!     println!(
//!         "{}..{} samples, {:.0} Hz, {:.1} ms (review priority {:.0})",
//!         event.start, event.end, event.frequency, event.duration * 1000.0, score
//!     );
//! }
//! # Ok::<(), ripple_dsp::DetectionError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Raw trace -> Preprocessing -> Wavelet bank -> Detection -> Merge -> Validation -> Scoring
//! ```
//!
//! The engine is a pure batch computation: no state survives between
//! invocations, and every stage returns new values rather than mutating
//! shared state.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod detection;
pub mod error;
pub mod preprocessing;
pub mod wavelet;

// Re-export main types
pub use analysis::result::{DetectionMetadata, DetectionResult, RippleCandidate, RippleEvent};
pub use config::{DetectionConfig, FilterSpec};
pub use error::DetectionError;

/// Main detection function
///
/// Runs the full pipeline: preprocessing, Morlet wavelet decomposition,
/// thresholded region detection, transitive merging, duration/cycle
/// validation, and review-priority scoring.
///
/// The artifact mask passed to preprocessing is derived as the complement of
/// `inclusion_mask`; use [`detect_ripples_with_artifact_mask`] to supply a
/// previously computed one instead.
///
/// # Arguments
///
/// * `trace` - Single-channel voltage trace
/// * `inclusion_mask` - Same length as `trace`; true where the sample is
///   movement- and artifact-free and eligible for detection
/// * `sample_rate` - Sampling rate in Hz
/// * `config` - Detection configuration parameters
///
/// # Returns
///
/// [`DetectionResult`] with the filtered trace, validated events, scores,
/// review flags (all-true), and diagnostic metadata
///
/// # Errors
///
/// Returns [`DetectionError`] for invalid configuration (checked before any
/// array processing), data violations (length mismatch, non-finite samples),
/// or degenerate amplitude statistics (zero MAD)
pub fn detect_ripples(
    trace: &[f32],
    inclusion_mask: &[bool],
    sample_rate: f32,
    config: DetectionConfig,
) -> Result<DetectionResult, DetectionError> {
    detect_ripples_with_artifact_mask(trace, inclusion_mask, None, sample_rate, config)
}

/// Detection entry point accepting a previously computed artifact mask
///
/// `artifact_mask`, when given, marks the samples preprocessing removes and
/// refills by interpolation, letting a caller reuse a mask computed on an
/// earlier run. When `None`, the complement of `inclusion_mask` is used.
///
/// See [`detect_ripples`] for everything else.
pub fn detect_ripples_with_artifact_mask(
    trace: &[f32],
    inclusion_mask: &[bool],
    artifact_mask: Option<&[bool]>,
    sample_rate: f32,
    config: DetectionConfig,
) -> Result<DetectionResult, DetectionError> {
    use std::time::Instant;
    let start_time = Instant::now();

    config.validate(sample_rate)?;

    if trace.is_empty() {
        return Err(DetectionError::Data {
            stage: "input",
            index: 0,
            message: "empty trace".to_string(),
        });
    }
    if inclusion_mask.len() != trace.len() {
        return Err(DetectionError::Data {
            stage: "input",
            index: inclusion_mask.len().min(trace.len()),
            message: format!(
                "trace has {} samples but inclusion mask has {}",
                trace.len(),
                inclusion_mask.len()
            ),
        });
    }
    if let Some(index) = trace.iter().position(|v| !v.is_finite()) {
        return Err(DetectionError::Data {
            stage: "input",
            index,
            message: format!("non-finite sample in raw trace: {}", trace[index]),
        });
    }

    log::debug!(
        "Starting ripple detection: {} samples at {} Hz, band {:.0}-{:.0} Hz",
        trace.len(),
        sample_rate,
        config.frequencies[0],
        config.frequencies[config.frequencies.len() - 1]
    );

    // Preprocessing: artifact interpolation + zero-phase filtering.
    let derived_mask: Vec<bool>;
    let interpolate_mask = match artifact_mask {
        Some(mask) => {
            if mask.len() != trace.len() {
                return Err(DetectionError::Data {
                    stage: "input",
                    index: mask.len().min(trace.len()),
                    message: format!(
                        "trace has {} samples but artifact mask has {}",
                        trace.len(),
                        mask.len()
                    ),
                });
            }
            mask
        }
        None => {
            derived_mask = inclusion_mask.iter().map(|&included| !included).collect();
            derived_mask.as_slice()
        }
    };
    let filtered_trace =
        preprocessing::preprocess(trace, interpolate_mask, sample_rate, &config.filter)?;

    // Time-frequency decomposition over the configured band.
    let transform = wavelet::transform::wavelet_transform(
        &filtered_trace,
        &config.frequencies,
        config.wavelet_cycles,
        sample_rate,
    )?;
    let amplitude = transform.amplitude();

    // Detection, merging, validation, scoring.
    let (candidates, discarded_excluded) = detection::detector::detect_candidates(
        &amplitude,
        &config.frequencies,
        inclusion_mask,
        config.boundary_k,
        config.event_k,
    )?;
    let (merged, merged_count) =
        detection::merge::merge_candidates(&candidates, config.merge_gap_samples);
    let outcome = detection::validate::validate_candidates(
        &merged,
        &transform,
        &amplitude,
        sample_rate,
        config.min_duration_s,
        config.max_duration_s,
        config.min_cycles,
    );
    let scores = detection::score::score_events(
        &outcome.events,
        config.score_target_duration_s,
        config.score_target_frequency_hz,
    );

    let metadata = DetectionMetadata {
        duration_seconds: trace.len() as f32 / sample_rate,
        sample_rate,
        processing_time_ms: start_time.elapsed().as_secs_f32() * 1000.0,
        discarded_excluded,
        merged: merged_count,
        rejected_duration: outcome.rejected_duration,
        rejected_cycles: outcome.rejected_cycles,
        algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
    };
    if config.verbose {
        log::info!("{}", metadata.summary());
    }

    let valid = vec![true; outcome.events.len()];
    Ok(DetectionResult {
        filtered_trace,
        events: outcome.events,
        scores,
        valid,
        metadata,
    })
}
