//! Detection result types

use serde::{Deserialize, Serialize};

use crate::error::DetectionError;

/// A raw detection candidate on the time-frequency grid
///
/// Produced fresh by the detector on each invocation, consumed and replaced
/// by the merger, and promoted to [`RippleEvent`] by the validator.
///
/// Invariant: `start <= peak <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RippleCandidate {
    /// First sample of the event window
    pub start: usize,

    /// Sample index of the amplitude-weighted centroid
    pub peak: usize,

    /// Last sample of the event window (inclusive)
    pub end: usize,

    /// Maximum wavelet amplitude within the event region
    pub power: f32,

    /// Dominant frequency in Hz at the region centroid
    pub frequency: f32,
}

/// A validated sharp-wave ripple event
///
/// Satisfies the configured duration bounds and minimum cycle count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RippleEvent {
    /// First sample of the event window
    pub start: usize,

    /// Sample index of the amplitude-weighted centroid
    pub peak: usize,

    /// Last sample of the event window (inclusive)
    pub end: usize,

    /// Event duration in seconds, `(end - start) / sample_rate`
    pub duration: f32,

    /// Maximum wavelet amplitude within the event region
    pub power: f32,

    /// Dominant frequency in Hz
    pub frequency: f32,
}

impl RippleEvent {
    /// Promote a candidate to an event, computing its duration
    pub(crate) fn from_candidate(candidate: &RippleCandidate, sample_rate: f32) -> Self {
        Self {
            start: candidate.start,
            peak: candidate.peak,
            end: candidate.end,
            duration: (candidate.end - candidate.start) as f32 / sample_rate,
            power: candidate.power,
            frequency: candidate.frequency,
        }
    }
}

/// Diagnostic counters and run metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionMetadata {
    /// Trace duration in seconds
    pub duration_seconds: f32,

    /// Sampling rate in Hz
    pub sample_rate: f32,

    /// Wall-clock processing time in milliseconds
    pub processing_time_ms: f32,

    /// Candidates discarded because their window overlapped an excluded sample
    pub discarded_excluded: usize,

    /// Candidates absorbed by the merge stage (inputs minus outputs)
    pub merged: usize,

    /// Candidates rejected by the duration bounds
    pub rejected_duration: usize,

    /// Candidates rejected by the minimum cycle count
    pub rejected_cycles: usize,

    /// Engine version that produced this result
    pub algorithm_version: String,
}

impl DetectionMetadata {
    /// Render the diagnostic counters as human-readable text
    pub fn summary(&self) -> String {
        format!(
            "trace: {:.2}s at {} Hz | discarded in exclusion zones: {} | \
             merged: {} | rejected by duration: {} | rejected by cycle count: {} | \
             processed in {:.1} ms",
            self.duration_seconds,
            self.sample_rate,
            self.discarded_excluded,
            self.merged,
            self.rejected_duration,
            self.rejected_cycles,
            self.processing_time_ms,
        )
    }
}

/// Full detection output handed to downstream review tools
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Artifact-free, filtered trace, same length as the raw input
    pub filtered_trace: Vec<f32>,

    /// Validated events, sorted ascending by start sample, non-overlapping
    pub events: Vec<RippleEvent>,

    /// Review-priority score per event, in [0, 100]. A ranking hint only,
    /// never a validity signal.
    pub scores: Vec<f32>,

    /// Manual-review validity flag per event. Initialized all-true; the
    /// engine stores but never interprets these.
    pub valid: Vec<bool>,

    /// Diagnostic counters and run metadata
    pub metadata: DetectionMetadata,
}

impl DetectionResult {
    /// Re-apply a previously computed review-flag vector
    ///
    /// Supports idempotent reruns against existing manual-review state: a
    /// caller that re-detects with identical inputs can carry its review
    /// decisions forward.
    ///
    /// # Errors
    ///
    /// Returns `DetectionError::Data` if the flag vector length does not
    /// match the event count.
    pub fn apply_review_flags(&mut self, flags: &[bool]) -> Result<(), DetectionError> {
        if flags.len() != self.events.len() {
            return Err(DetectionError::Data {
                stage: "review",
                index: flags.len().min(self.events.len()),
                message: format!(
                    "review flag vector has {} entries for {} events",
                    flags.len(),
                    self.events.len()
                ),
            });
        }
        self.valid.copy_from_slice(flags);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_duration_from_candidate() {
        let candidate = RippleCandidate {
            start: 1000,
            peak: 1030,
            end: 1060,
            power: 4.2,
            frequency: 140.0,
        };
        let event = RippleEvent::from_candidate(&candidate, 1000.0);
        assert!((event.duration - 0.060).abs() < 1e-6);
        assert_eq!(event.peak, 1030);
    }

    #[test]
    fn test_apply_review_flags_length_checked() {
        let mut result = DetectionResult {
            filtered_trace: vec![],
            events: vec![RippleEvent {
                start: 0,
                peak: 5,
                end: 10,
                duration: 0.01,
                power: 1.0,
                frequency: 120.0,
            }],
            scores: vec![100.0],
            valid: vec![true],
            metadata: DetectionMetadata {
                duration_seconds: 1.0,
                sample_rate: 1000.0,
                processing_time_ms: 0.0,
                discarded_excluded: 0,
                merged: 0,
                rejected_duration: 0,
                rejected_cycles: 0,
                algorithm_version: "test".to_string(),
            },
        };

        assert!(result.apply_review_flags(&[true, false]).is_err());
        assert!(result.apply_review_flags(&[false]).is_ok());
        assert_eq!(result.valid, vec![false]);
    }

    #[test]
    fn test_summary_mentions_counters() {
        let metadata = DetectionMetadata {
            duration_seconds: 10.0,
            sample_rate: 1000.0,
            processing_time_ms: 12.5,
            discarded_excluded: 2,
            merged: 3,
            rejected_duration: 4,
            rejected_cycles: 5,
            algorithm_version: "test".to_string(),
        };
        let text = metadata.summary();
        assert!(text.contains("merged: 3"));
        assert!(text.contains("rejected by duration: 4"));
        assert!(text.contains("rejected by cycle count: 5"));
    }
}
