//! Artifact removal with DC-continuous gap interpolation
//!
//! Masked samples are removed and refilled by linear interpolation. Before
//! filling, every run of surviving samples is shifted so its first value
//! matches the previous run's last value. Without the shift, filling a gap
//! whose two sides sit at different DC levels would leave a step edge that
//! the wavelet transform reads as a broadband event.

use crate::error::DetectionError;

/// Remove masked samples and refill them with DC-continuous interpolation
///
/// # Arguments
///
/// * `trace` - Raw voltage trace
/// * `interpolate_mask` - Same length as `trace`; true marks samples to remove
///
/// # Returns
///
/// A trace of identical length with every masked run replaced by linear
/// interpolation between its boundary values, and with inter-run DC offsets
/// removed. Runs touching the first or last sample are extended from the
/// nearest surviving value.
///
/// # Errors
///
/// Returns `DetectionError::Data` if the mask length does not match the
/// trace, or if every sample is masked.
pub fn remove_artifacts(
    trace: &[f32],
    interpolate_mask: &[bool],
) -> Result<Vec<f32>, DetectionError> {
    if trace.len() != interpolate_mask.len() {
        return Err(DetectionError::Data {
            stage: "interpolation",
            index: trace.len().min(interpolate_mask.len()),
            message: format!(
                "trace has {} samples but mask has {}",
                trace.len(),
                interpolate_mask.len()
            ),
        });
    }

    let runs = surviving_runs(interpolate_mask);
    if runs.is_empty() {
        return Err(DetectionError::Data {
            stage: "interpolation",
            index: 0,
            message: "every sample is masked, nothing left to interpolate between".to_string(),
        });
    }

    log::debug!(
        "Artifact removal: {} samples, {} surviving runs",
        trace.len(),
        runs.len()
    );

    let mut out = vec![f32::NAN; trace.len()];

    // Copy surviving runs, shifting each so it continues the previous run's
    // level. The shift is cumulative: once a discontinuity is removed, all
    // later samples move with it.
    let mut shift = 0.0f32;
    let mut prev_end: Option<usize> = None;
    for &(start, end) in &runs {
        if let Some(prev) = prev_end {
            let discontinuity = (trace[start] - shift) - out[prev];
            shift += discontinuity;
        }
        for i in start..=end {
            out[i] = trace[i] - shift;
        }
        prev_end = Some(end);
    }

    // Fill gaps between runs by linear interpolation, and extend the first
    // and last surviving values over boundary gaps.
    let (first_start, _) = runs[0];
    let (_, last_end) = runs[runs.len() - 1];
    for i in 0..first_start {
        out[i] = out[first_start];
    }
    for i in (last_end + 1)..out.len() {
        out[i] = out[last_end];
    }
    for pair in runs.windows(2) {
        let (_, left) = pair[0];
        let (right, _) = pair[1];
        let gap = (right - left) as f32;
        for i in (left + 1)..right {
            let t = (i - left) as f32 / gap;
            out[i] = out[left] * (1.0 - t) + out[right] * t;
        }
    }

    Ok(out)
}

/// Maximal contiguous runs of unmasked samples as inclusive `(start, end)` ranges
fn surviving_runs(mask: &[bool]) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start = None;
    for (i, &masked) in mask.iter().enumerate() {
        match (masked, start) {
            (false, None) => start = Some(i),
            (true, Some(s)) => {
                runs.push((s, i - 1));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push((s, mask.len() - 1));
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_mask_is_identity() {
        let trace = vec![1.0, 2.0, 3.0, 4.0];
        let out = remove_artifacts(&trace, &[false; 4]).unwrap();
        assert_eq!(out, trace);
    }

    #[test]
    fn test_dc_offset_across_gap_removed() {
        // Two runs at different DC levels separated by a masked gap. The
        // second run must be shifted down so no step survives.
        let mut trace = vec![1.0f32; 10];
        for v in trace.iter_mut().skip(6) {
            *v = 5.0;
        }
        let mut mask = vec![false; 10];
        mask[4] = true;
        mask[5] = true;

        let out = remove_artifacts(&trace, &mask).unwrap();

        for pair in out.windows(2) {
            assert!(
                (pair[1] - pair[0]).abs() < 1e-6,
                "step survived: {:?}",
                out
            );
        }
    }

    #[test]
    fn test_gap_filled_linearly() {
        let trace = vec![0.0, 1.0, 0.0, 0.0, 4.0, 5.0];
        let mask = vec![false, false, true, true, false, false];
        let out = remove_artifacts(&trace, &mask).unwrap();

        // Second run shifts so its first value (index 4) equals out[1] = 1.0.
        assert!((out[4] - 1.0).abs() < 1e-6);
        // Gap interpolates between out[1] = 1.0 and out[4] = 1.0.
        assert!((out[2] - 1.0).abs() < 1e-6);
        assert!((out[3] - 1.0).abs() < 1e-6);
        // Within-run structure survives.
        assert!((out[5] - out[4] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_boundary_gaps_extended() {
        let trace = vec![9.0, 9.0, 3.0, 4.0, 9.0];
        let mask = vec![true, true, false, false, true];
        let out = remove_artifacts(&trace, &mask).unwrap();
        assert_eq!(out[0], 3.0);
        assert_eq!(out[1], 3.0);
        assert_eq!(out[4], 4.0);
    }

    #[test]
    fn test_fully_masked_trace_rejected() {
        let result = remove_artifacts(&[1.0, 2.0], &[true, true]);
        assert!(result.is_err());
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let result = remove_artifacts(&[1.0, 2.0], &[false]);
        assert!(result.is_err());
    }
}
