//! Duration and cycle-count validation
//!
//! Two filters, applied in order:
//! 1. Duration must lie inside the configured bounds, inclusive on both ends.
//! 2. The event window must contain at least `min_cycles` oscillation
//!    cycles, estimated from the unwrapped phase along the per-sample
//!    dominant frequency bin.
//!
//! Surviving candidates are promoted to [`RippleEvent`].

use crate::analysis::result::{RippleCandidate, RippleEvent};
use crate::wavelet::WaveletTransform;

const TWO_PI: f32 = 2.0 * std::f32::consts::PI;

/// Validation results with per-filter rejection counts
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    /// Candidates that passed both filters, promoted to events
    pub events: Vec<RippleEvent>,

    /// Candidates rejected by the duration bounds
    pub rejected_duration: usize,

    /// Candidates rejected by the minimum cycle count
    pub rejected_cycles: usize,
}

/// Filter merged candidates by duration and oscillation cycle count
///
/// # Arguments
///
/// * `candidates` - Merged candidates, sorted by start
/// * `transform` - Coefficient matrix the candidates were detected on
/// * `amplitude` - Amplitude matrix derived from `transform`
/// * `sample_rate` - Sampling rate in Hz
/// * `min_duration_s` / `max_duration_s` - Inclusive duration bounds
/// * `min_cycles` - Minimum unwrapped-phase cycle count
pub fn validate_candidates(
    candidates: &[RippleCandidate],
    transform: &WaveletTransform,
    amplitude: &[Vec<f32>],
    sample_rate: f32,
    min_duration_s: f32,
    max_duration_s: f32,
    min_cycles: f32,
) -> ValidationOutcome {
    let mut outcome = ValidationOutcome {
        events: Vec::new(),
        rejected_duration: 0,
        rejected_cycles: 0,
    };

    for candidate in candidates {
        let event = RippleEvent::from_candidate(candidate, sample_rate);
        if event.duration < min_duration_s || event.duration > max_duration_s {
            outcome.rejected_duration += 1;
            continue;
        }
        let cycles = estimate_cycles(transform, amplitude, candidate.start, candidate.end);
        if cycles < min_cycles {
            outcome.rejected_cycles += 1;
            continue;
        }
        outcome.events.push(event);
    }

    log::debug!(
        "Validator: {} candidates -> {} events ({} rejected by duration, {} by cycle count)",
        candidates.len(),
        outcome.events.len(),
        outcome.rejected_duration,
        outcome.rejected_cycles
    );
    outcome
}

/// Estimate the oscillation cycle count within `[start, end]`
///
/// Per sample, the phase is read from the frequency bin with maximum
/// amplitude; the sequence is unwrapped and the total phase progression is
/// divided by 2 pi.
pub fn estimate_cycles(
    transform: &WaveletTransform,
    amplitude: &[Vec<f32>],
    start: usize,
    end: usize,
) -> f32 {
    let phases: Vec<f32> = (start..=end)
        .map(|t| {
            let dominant = (0..amplitude.len())
                .max_by(|&a, &b| {
                    amplitude[a][t]
                        .partial_cmp(&amplitude[b][t])
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .unwrap_or(0);
            transform.phase_at(dominant, t)
        })
        .collect();

    let unwrapped = unwrap_phase(&phases);
    match (unwrapped.first(), unwrapped.last()) {
        (Some(first), Some(last)) => (last - first) / TWO_PI,
        _ => 0.0,
    }
}

/// Monotonic phase unwrapping
///
/// Tracks a cumulative 2 pi correction across the sequence: whenever a
/// sample-to-sample step exceeds pi in magnitude, the shorter way around the
/// circle is assumed and the correction is adjusted. Self-contained; no
/// external signal-processing call.
pub fn unwrap_phase(phases: &[f32]) -> Vec<f32> {
    let mut unwrapped = Vec::with_capacity(phases.len());
    let mut correction = 0.0f32;
    for (i, &p) in phases.iter().enumerate() {
        if i > 0 {
            let step = p - phases[i - 1];
            if step > std::f32::consts::PI {
                correction -= TWO_PI;
            } else if step < -std::f32::consts::PI {
                correction += TWO_PI;
            }
        }
        unwrapped.push(p + correction);
    }
    unwrapped
}
