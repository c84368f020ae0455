//! Candidate extraction from the thresholded amplitude grid
//!
//! A region becomes a candidate when its peak clears the event threshold;
//! its temporal extent is whatever the looser boundary threshold connects.
//! Candidates whose window touches an excluded sample are dropped and
//! counted.

use crate::analysis::result::RippleCandidate;
use crate::detection::regions::{extract_regions, Region};
use crate::detection::threshold::masked_thresholds;
use crate::error::DetectionError;

/// Detect ripple candidates on the amplitude grid
///
/// # Arguments
///
/// * `amplitude` - Amplitude matrix, `[frequency bin][sample index]`
/// * `frequencies` - Frequency axis in Hz, one entry per row
/// * `inclusion_mask` - Per-sample eligibility for statistics and events
/// * `boundary_k` - Extent threshold in MADs above the median
/// * `event_k` - Peak threshold in MADs above the median
///
/// # Returns
///
/// Candidates sorted ascending by start sample, plus the number of
/// candidates discarded for overlapping an exclusion zone.
///
/// # Errors
///
/// Propagates threshold-statistics failures (`Data`,
/// `DegenerateStatistics`).
pub fn detect_candidates(
    amplitude: &[Vec<f32>],
    frequencies: &[f32],
    inclusion_mask: &[bool],
    boundary_k: f32,
    event_k: f32,
) -> Result<(Vec<RippleCandidate>, usize), DetectionError> {
    let thresholds = masked_thresholds(amplitude, inclusion_mask, boundary_k, event_k)?;
    let regions = extract_regions(amplitude, thresholds.boundary);

    let mut candidates = Vec::new();
    let mut discarded = 0usize;
    for region in &regions {
        if region.max_value < thresholds.event {
            continue;
        }
        if (region.start..=region.end).any(|i| !inclusion_mask[i]) {
            discarded += 1;
            continue;
        }
        candidates.push(candidate_from_region(region, frequencies));
    }
    candidates.sort_by_key(|c| c.start);

    log::debug!(
        "Detector: {} regions, {} candidates, {} discarded in exclusion zones",
        regions.len(),
        candidates.len(),
        discarded
    );
    Ok((candidates, discarded))
}

fn candidate_from_region(region: &Region, frequencies: &[f32]) -> RippleCandidate {
    RippleCandidate {
        start: region.start,
        peak: region.time_centroid.round() as usize,
        end: region.end,
        power: region.max_value,
        frequency: interpolate_frequency(frequencies, region.frequency_centroid),
    }
}

/// Linearly interpolate the frequency axis at a fractional bin index
fn interpolate_frequency(frequencies: &[f32], bin: f32) -> f32 {
    let last = frequencies.len() - 1;
    if bin <= 0.0 {
        return frequencies[0];
    }
    if bin >= last as f32 {
        return frequencies[last];
    }
    let lower = bin.floor() as usize;
    let frac = bin - lower as f32;
    frequencies[lower] + frac * (frequencies[lower + 1] - frequencies[lower])
}
