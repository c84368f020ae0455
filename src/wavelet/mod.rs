//! Complex Morlet wavelet time-frequency decomposition
//!
//! - Morlet wavelet construction (`morlet`)
//! - FFT-based convolution of a trace against the wavelet bank (`transform`)
//!
//! The coefficient matrix is ephemeral: recomputed per run, never persisted.

pub mod morlet;
pub mod transform;

use rustfft::num_complex::Complex;

/// Time-frequency coefficient matrix, one row per bank frequency
///
/// Every row is aligned 1:1 with the input trace: `rows[k][i]` is the
/// response of the wavelet at `frequencies[k]` centered on trace sample `i`.
/// Amplitude and phase are derived on demand.
#[derive(Debug, Clone)]
pub struct WaveletTransform {
    /// Bank frequencies in Hz, ascending
    pub frequencies: Vec<f32>,

    /// Complex coefficients, `[frequency bin][sample index]`
    pub rows: Vec<Vec<Complex<f32>>>,
}

impl WaveletTransform {
    /// Number of frequency bins
    pub fn n_frequencies(&self) -> usize {
        self.frequencies.len()
    }

    /// Number of time samples per row
    pub fn n_samples(&self) -> usize {
        self.rows.first().map_or(0, |row| row.len())
    }

    /// Amplitude (magnitude) matrix, `[frequency bin][sample index]`
    pub fn amplitude(&self) -> Vec<Vec<f32>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|c| c.norm()).collect())
            .collect()
    }

    /// Instantaneous phase in radians at one cell
    pub fn phase_at(&self, frequency_bin: usize, sample: usize) -> f32 {
        self.rows[frequency_bin][sample].arg()
    }
}
