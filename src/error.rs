//! Error types for the ripple detection engine

use std::fmt;

/// Errors that can occur during ripple detection
///
/// All variants are fatal: the pipeline is deterministic batch computation,
/// so the first failure aborts the run. Each variant carries enough context
/// (stage, parameter, offending index/value) to diagnose without re-running.
#[derive(Debug, Clone)]
pub enum DetectionError {
    /// Invalid configuration (bad cutoff, empty frequency list, ...).
    /// Raised before any array processing begins.
    Configuration(String),

    /// Invalid or corrupted data, with the stage that observed it and the
    /// index of the first violation
    Data {
        /// Pipeline stage that detected the problem
        stage: &'static str,
        /// Index of the first offending sample
        index: usize,
        /// Description of the violation
        message: String,
    },

    /// Robust statistics collapsed (MAD of the included amplitude is zero),
    /// which would make thresholds degenerate to the median and produce
    /// spurious or unbounded detections
    DegenerateStatistics(String),
}

impl fmt::Display for DetectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            DetectionError::Data {
                stage,
                index,
                message,
            } => write!(f, "Data error in {} at index {}: {}", stage, index, message),
            DetectionError::DegenerateStatistics(msg) => {
                write!(f, "Degenerate statistics: {}", msg)
            }
        }
    }
}

impl std::error::Error for DetectionError {}
