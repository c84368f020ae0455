//! Event detection on the time-frequency grid
//!
//! The detection stages, in pipeline order:
//! - Robust amplitude thresholds from masked median + MAD (`threshold`)
//! - 2-D connected-region extraction over the amplitude grid (`regions`)
//! - Candidate extraction and exclusion-zone filtering (`detector`)
//! - Transitive temporal merging (`merge`)
//! - Duration and cycle-count validation (`validate`)
//! - Review-priority scoring (`score`)

pub mod detector;
pub mod merge;
pub mod regions;
pub mod score;
pub mod threshold;
pub mod validate;
