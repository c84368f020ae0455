//! Review-priority scoring
//!
//! Ranks validated events for manual review: strong events close to the
//! target duration and target frequency surface first. Scores are a
//! prioritization hint only; they never decide validity.

use crate::analysis::result::RippleEvent;

/// Score validated events on a [0, 100] review-priority scale
///
/// Per event, three ranks are computed among all events:
/// - by `power`, ascending (higher power, higher rank)
/// - by `|duration - target_duration|`, descending (closer, higher rank)
/// - by `|frequency - target_frequency|`, descending (closer, higher rank)
///
/// The three ranks are summed and min-max normalized to [0, 100]. When every
/// event has the same rank sum (including the single-event case), all
/// scores are 100.
///
/// # Arguments
///
/// * `events` - Validated events
/// * `target_duration_s` - Preferred event duration in seconds
/// * `target_frequency_hz` - Preferred event frequency in Hz
///
/// # Returns
///
/// One score per event, in input order
pub fn score_events(
    events: &[RippleEvent],
    target_duration_s: f32,
    target_frequency_hz: f32,
) -> Vec<f32> {
    if events.is_empty() {
        return Vec::new();
    }

    let power_ranks = ranks_ascending(events, |e| e.power);
    let duration_ranks = ranks_ascending(events, |e| -(e.duration - target_duration_s).abs());
    let frequency_ranks = ranks_ascending(events, |e| -(e.frequency - target_frequency_hz).abs());

    let sums: Vec<f32> = (0..events.len())
        .map(|i| (power_ranks[i] + duration_ranks[i] + frequency_ranks[i]) as f32)
        .collect();

    let min = sums.iter().cloned().fold(f32::INFINITY, f32::min);
    let max = sums.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    if max - min <= f32::EPSILON {
        return vec![100.0; events.len()];
    }
    sums.iter().map(|&s| 100.0 * (s - min) / (max - min)).collect()
}

/// Rank events ascending by `key`: the smallest key gets rank 1, the
/// largest rank `n`. Output is indexed by event position.
fn ranks_ascending(events: &[RippleEvent], key: impl Fn(&RippleEvent) -> f32) -> Vec<usize> {
    let mut order: Vec<usize> = (0..events.len()).collect();
    order.sort_by(|&a, &b| {
        key(&events[a])
            .partial_cmp(&key(&events[b]))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut ranks = vec![0usize; events.len()];
    for (rank, &idx) in order.iter().enumerate() {
        ranks[idx] = rank + 1;
    }
    ranks
}
