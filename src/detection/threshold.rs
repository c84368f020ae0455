//! Robust amplitude thresholds from masked median + MAD
//!
//! Thresholds are expressed in multiples of the median absolute deviation
//! above the median, computed only over samples the inclusion mask marks as
//! eligible. MAD-based thresholding resists the heavy-tailed amplitude
//! distributions that transient artifacts produce, where a mean/std
//! threshold would drift upward and miss genuine events.

use crate::error::DetectionError;

/// Detection thresholds derived from the included amplitude distribution
#[derive(Debug, Clone, Copy)]
pub struct AmplitudeThresholds {
    /// Median of the included amplitude values
    pub median: f32,

    /// Median absolute deviation of the included amplitude values
    pub mad: f32,

    /// Extent threshold, `median + boundary_k * mad`
    pub boundary: f32,

    /// Peak threshold, `median + event_k * mad`
    pub event: f32,
}

/// Compute boundary and event thresholds over the included amplitude cells
///
/// # Arguments
///
/// * `amplitude` - Amplitude matrix, `[frequency bin][sample index]`
/// * `inclusion_mask` - Per-sample eligibility; excluded columns do not
///   contribute to the statistics
/// * `boundary_k` - Extent threshold in MADs above the median
/// * `event_k` - Peak threshold in MADs above the median
///
/// # Errors
///
/// Returns `DetectionError::Data` if no amplitude cell is included, or
/// `DetectionError::DegenerateStatistics` if the MAD is zero (flat or
/// fully-masked signal), which would collapse both thresholds to the median.
pub fn masked_thresholds(
    amplitude: &[Vec<f32>],
    inclusion_mask: &[bool],
    boundary_k: f32,
    event_k: f32,
) -> Result<AmplitudeThresholds, DetectionError> {
    let mut values = Vec::new();
    for row in amplitude {
        for (i, &v) in row.iter().enumerate() {
            if inclusion_mask[i] {
                values.push(v);
            }
        }
    }

    if values.is_empty() {
        return Err(DetectionError::Data {
            stage: "thresholding",
            index: 0,
            message: "inclusion mask excludes every sample".to_string(),
        });
    }

    let med = median(&mut values);
    for v in values.iter_mut() {
        *v = (*v - med).abs();
    }
    let mad = median(&mut values);

    if mad == 0.0 {
        return Err(DetectionError::DegenerateStatistics(format!(
            "MAD of included amplitude is zero (median {}); thresholds would collapse",
            med
        )));
    }

    let thresholds = AmplitudeThresholds {
        median: med,
        mad,
        boundary: med + boundary_k * mad,
        event: med + event_k * mad,
    };
    log::debug!(
        "Amplitude statistics: median {:.4}, MAD {:.4}, boundary {:.4}, event {:.4}",
        thresholds.median,
        thresholds.mad,
        thresholds.boundary,
        thresholds.event
    );
    Ok(thresholds)
}

/// Median by sorting; the slice is reordered
fn median(values: &mut [f32]) -> f32 {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = values.len();
    if n % 2 == 0 {
        (values[n / 2 - 1] + values[n / 2]) * 0.5
    } else {
        values[n / 2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_on_simple_grid() {
        // One row: median 3, MAD 1.
        let amplitude = vec![vec![1.0, 2.0, 3.0, 4.0, 5.0]];
        let mask = vec![true; 5];

        let t = masked_thresholds(&amplitude, &mask, 2.0, 5.0).unwrap();
        assert_eq!(t.median, 3.0);
        assert_eq!(t.mad, 1.0);
        assert_eq!(t.boundary, 5.0);
        assert_eq!(t.event, 8.0);
    }

    #[test]
    fn test_excluded_outlier_does_not_skew_statistics() {
        let amplitude = vec![vec![1.0, 2.0, 3.0, 4.0, 5.0, 1000.0]];
        let mut mask = vec![true; 6];
        mask[5] = false;

        let t = masked_thresholds(&amplitude, &mask, 2.0, 5.0).unwrap();
        assert_eq!(t.median, 3.0);
        assert_eq!(t.mad, 1.0);
    }

    #[test]
    fn test_flat_signal_is_degenerate() {
        let amplitude = vec![vec![2.0; 100]];
        let mask = vec![true; 100];

        match masked_thresholds(&amplitude, &mask, 2.0, 5.0) {
            Err(DetectionError::DegenerateStatistics(_)) => {}
            other => panic!("Expected degenerate statistics, got {:?}", other),
        }
    }

    #[test]
    fn test_fully_masked_grid_rejected() {
        let amplitude = vec![vec![1.0, 2.0]];
        let mask = vec![false, false];
        assert!(masked_thresholds(&amplitude, &mask, 2.0, 5.0).is_err());
    }
}
