//! Configuration parameters for ripple detection

use crate::error::DetectionError;

/// Filtering configuration for the preprocessing stage
///
/// All filters are applied zero-phase (forward-backward), so the filtered
/// trace has no group delay relative to the raw trace.
#[derive(Debug, Clone)]
pub struct FilterSpec {
    /// Highpass cutoff in Hz, removes slow drift (default: 2.0)
    pub highpass_cutoff_hz: Option<f32>,

    /// Lowpass cutoff in Hz, removes high-frequency noise (default: 400.0)
    pub lowpass_cutoff_hz: Option<f32>,

    /// Band-stop notches as (center_hz, half_width_hz) pairs, one per
    /// line-noise frequency (default: 50 Hz mains, ±2 Hz)
    pub notches: Vec<(f32, f32)>,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            highpass_cutoff_hz: Some(2.0),
            lowpass_cutoff_hz: Some(400.0),
            notches: vec![(50.0, 2.0)],
        }
    }
}

impl FilterSpec {
    /// Validate all configured corner frequencies against the Nyquist limit
    ///
    /// # Errors
    ///
    /// Returns `DetectionError::Configuration` if any cutoff or notch edge
    /// reaches or exceeds `sample_rate / 2`, or is not strictly positive.
    pub fn validate(&self, sample_rate: f32) -> Result<(), DetectionError> {
        let nyquist = sample_rate / 2.0;

        let check = |name: &str, freq: f32| -> Result<(), DetectionError> {
            if !freq.is_finite() || freq <= 0.0 {
                return Err(DetectionError::Configuration(format!(
                    "{} must be positive and finite, got {}",
                    name, freq
                )));
            }
            if freq >= nyquist {
                return Err(DetectionError::Configuration(format!(
                    "{} ({} Hz) must be below Nyquist ({} Hz)",
                    name, freq, nyquist
                )));
            }
            Ok(())
        };

        if let Some(hp) = self.highpass_cutoff_hz {
            check("highpass cutoff", hp)?;
        }
        if let Some(lp) = self.lowpass_cutoff_hz {
            check("lowpass cutoff", lp)?;
        }
        for &(center, half_width) in &self.notches {
            if half_width <= 0.0 || !half_width.is_finite() {
                return Err(DetectionError::Configuration(format!(
                    "notch half-width must be positive and finite, got {}",
                    half_width
                )));
            }
            check("notch upper edge", center + half_width)?;
            if center - half_width <= 0.0 {
                return Err(DetectionError::Configuration(format!(
                    "notch lower edge ({} Hz) must be positive",
                    center - half_width
                )));
            }
        }
        Ok(())
    }
}

/// Detection configuration parameters
#[derive(Debug, Clone)]
pub struct DetectionConfig {
    /// Preprocessing filter configuration
    pub filter: FilterSpec,

    /// Wavelet bank frequencies in Hz, ascending (default: 80..=250 step 5,
    /// the canonical ripple band)
    pub frequencies: Vec<f32>,

    /// Morlet cycle count, trading time resolution against frequency
    /// resolution (default: 7.0)
    pub wavelet_cycles: f32,

    /// Event threshold in MADs above the median (default: 5.0).
    /// A region must contain at least one cell this far above the median
    /// to become a candidate.
    pub event_k: f32,

    /// Boundary threshold in MADs above the median (default: 2.0).
    /// Once a region clears `event_k`, its temporal extent is defined by
    /// this looser threshold. Must satisfy `event_k >= boundary_k`.
    pub boundary_k: f32,

    /// Maximum gap in samples between consecutive candidates that still
    /// merges them into one event (default: 10). Merging is transitive:
    /// a chain of small gaps collapses into a single event even when its
    /// endpoints are far apart.
    pub merge_gap_samples: usize,

    /// Minimum event duration in seconds, inclusive (default: 0.010)
    pub min_duration_s: f32,

    /// Maximum event duration in seconds, inclusive (default: 0.500)
    pub max_duration_s: f32,

    /// Minimum oscillation cycle count within an event window, estimated
    /// from unwrapped phase (default: 3.0)
    pub min_cycles: f32,

    /// Target duration in seconds for review-priority scoring (default: 0.080)
    pub score_target_duration_s: f32,

    /// Target frequency in Hz for review-priority scoring (default: 150.0)
    pub score_target_frequency_hz: f32,

    /// Emit the diagnostic summary at info level (default: false)
    pub verbose: bool,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            filter: FilterSpec::default(),
            frequencies: (80..=250).step_by(5).map(|f| f as f32).collect(),
            wavelet_cycles: 7.0,
            event_k: 5.0,
            boundary_k: 2.0,
            merge_gap_samples: 10,
            min_duration_s: 0.010,
            max_duration_s: 0.500,
            min_cycles: 3.0,
            score_target_duration_s: 0.080,
            score_target_frequency_hz: 150.0,
            verbose: false,
        }
    }
}

impl DetectionConfig {
    /// Validate the configuration before any array processing
    ///
    /// # Errors
    ///
    /// Returns `DetectionError::Configuration` if:
    /// - The frequency list is empty or not strictly ascending
    /// - `event_k < boundary_k`
    /// - Duration bounds are non-monotonic or non-positive
    /// - `wavelet_cycles` is not positive
    /// - Any filter corner reaches Nyquist
    pub fn validate(&self, sample_rate: f32) -> Result<(), DetectionError> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(DetectionError::Configuration(format!(
                "sample rate must be positive, got {}",
                sample_rate
            )));
        }

        if self.frequencies.is_empty() {
            return Err(DetectionError::Configuration(
                "frequency list is empty".to_string(),
            ));
        }
        for pair in self.frequencies.windows(2) {
            if pair[1] <= pair[0] {
                return Err(DetectionError::Configuration(format!(
                    "frequency list must be strictly ascending ({} followed by {})",
                    pair[0], pair[1]
                )));
            }
        }

        if self.wavelet_cycles <= 0.0 {
            return Err(DetectionError::Configuration(format!(
                "wavelet cycle count must be positive, got {}",
                self.wavelet_cycles
            )));
        }

        if self.event_k < self.boundary_k {
            return Err(DetectionError::Configuration(format!(
                "event threshold ({} MAD) must be >= boundary threshold ({} MAD)",
                self.event_k, self.boundary_k
            )));
        }

        if self.min_duration_s < 0.0 || self.max_duration_s < self.min_duration_s {
            return Err(DetectionError::Configuration(format!(
                "duration bounds must satisfy 0 <= min <= max, got [{}, {}]",
                self.min_duration_s, self.max_duration_s
            )));
        }

        if self.min_cycles < 0.0 {
            return Err(DetectionError::Configuration(format!(
                "minimum cycle count must be non-negative, got {}",
                self.min_cycles
            )));
        }

        self.filter.validate(sample_rate)
    }

    /// Build a frequency list covering `[start, stop]` in `step` Hz increments
    ///
    /// Convenience for configuring the ripple band, e.g.
    /// `DetectionConfig::band(80.0, 250.0, 5.0)`.
    pub fn band(start: f32, stop: f32, step: f32) -> Vec<f32> {
        let mut freqs = Vec::new();
        let mut f = start;
        while f <= stop + step * 1e-3 {
            freqs.push(f);
            f += step;
        }
        freqs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = DetectionConfig::default();
        assert!(config.validate(1000.0).is_ok());
    }

    #[test]
    fn test_cutoff_at_nyquist_rejected() {
        let mut config = DetectionConfig::default();
        config.filter.lowpass_cutoff_hz = Some(500.0);
        let result = config.validate(1000.0);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Nyquist"));
    }

    #[test]
    fn test_empty_frequency_list_rejected() {
        let mut config = DetectionConfig::default();
        config.frequencies.clear();
        assert!(config.validate(1000.0).is_err());
    }

    #[test]
    fn test_non_ascending_frequencies_rejected() {
        let mut config = DetectionConfig::default();
        config.frequencies = vec![80.0, 120.0, 100.0];
        assert!(config.validate(1000.0).is_err());
    }

    #[test]
    fn test_inverted_duration_bounds_rejected() {
        let mut config = DetectionConfig::default();
        config.min_duration_s = 0.5;
        config.max_duration_s = 0.1;
        assert!(config.validate(1000.0).is_err());
    }

    #[test]
    fn test_event_k_below_boundary_k_rejected() {
        let mut config = DetectionConfig::default();
        config.event_k = 1.0;
        config.boundary_k = 2.0;
        assert!(config.validate(1000.0).is_err());
    }

    #[test]
    fn test_band_helper_inclusive() {
        let freqs = DetectionConfig::band(80.0, 250.0, 5.0);
        assert_eq!(freqs.len(), 35);
        assert_eq!(freqs[0], 80.0);
        assert!((freqs[34] - 250.0).abs() < 1e-3);
    }
}
