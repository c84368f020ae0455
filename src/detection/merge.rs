//! Transitive temporal merging of adjacent candidates
//!
//! Consecutive candidates whose gap is at most the merge threshold belong to
//! the same cluster, and clustering is transitive: if A is close to B and B
//! is close to C, then A, B, and C merge even when A and C are far apart.
//! Transitive closure is the defined policy here, chosen over pairwise-only
//! merging. A cluster's peak, power, and frequency come from the member with
//! the highest power; its bounds are the cluster envelope.

use crate::analysis::result::RippleCandidate;

/// Merge temporally adjacent candidates
///
/// # Arguments
///
/// * `candidates` - Candidates sorted ascending by start sample
/// * `gap_samples` - Maximum `next.start - prev.end` that still merges
///
/// # Returns
///
/// The merged list, strictly ordered with every adjacent gap exceeding the
/// threshold, plus the number of candidates absorbed. Idempotent: re-running
/// on its own output changes nothing.
pub fn merge_candidates(
    candidates: &[RippleCandidate],
    gap_samples: usize,
) -> (Vec<RippleCandidate>, usize) {
    let mut merged = Vec::new();
    let mut cluster: Vec<RippleCandidate> = Vec::new();
    // Running maximum end of the cluster. Start-sorted candidates can still
    // nest (a long window containing a shorter one), so the last pushed
    // member's end is not necessarily the cluster's temporal edge.
    let mut cluster_end = 0usize;

    for &candidate in candidates {
        if !cluster.is_empty() && candidate.start.saturating_sub(cluster_end) <= gap_samples {
            cluster.push(candidate);
            cluster_end = cluster_end.max(candidate.end);
        } else {
            if !cluster.is_empty() {
                merged.push(collapse(&cluster));
                cluster.clear();
            }
            cluster.push(candidate);
            cluster_end = candidate.end;
        }
    }
    if !cluster.is_empty() {
        merged.push(collapse(&cluster));
    }

    let absorbed = candidates.len() - merged.len();
    if absorbed > 0 {
        log::debug!(
            "Merger: {} candidates -> {} events ({} absorbed, gap <= {} samples)",
            candidates.len(),
            merged.len(),
            absorbed,
            gap_samples
        );
    }
    (merged, absorbed)
}

/// Collapse a cluster into one candidate: envelope bounds, winner-take-all
/// peak/power/frequency by maximum power
fn collapse(cluster: &[RippleCandidate]) -> RippleCandidate {
    if cluster.len() == 1 {
        return cluster[0];
    }
    let winner = cluster
        .iter()
        .max_by(|a, b| a.power.partial_cmp(&b.power).unwrap_or(std::cmp::Ordering::Equal))
        .unwrap();
    RippleCandidate {
        start: cluster.iter().map(|c| c.start).min().unwrap(),
        peak: winner.peak,
        end: cluster.iter().map(|c| c.end).max().unwrap(),
        power: winner.power,
        frequency: winner.frequency,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(start: usize, end: usize, power: f32) -> RippleCandidate {
        RippleCandidate {
            start,
            peak: (start + end) / 2,
            end,
            power,
            frequency: 120.0,
        }
    }

    #[test]
    fn test_two_close_candidates_merge() {
        // 5-sample gap, 10-sample threshold: one event spanning both windows.
        let candidates = vec![candidate(100, 150, 2.0), candidate(155, 200, 3.0)];
        let (merged, absorbed) = merge_candidates(&candidates, 10);

        assert_eq!(merged.len(), 1);
        assert_eq!(absorbed, 1);
        assert_eq!(merged[0].start, 100);
        assert_eq!(merged[0].end, 200);
    }

    #[test]
    fn test_winner_take_all_by_power() {
        let mut strong = candidate(155, 200, 9.0);
        strong.frequency = 180.0;
        let candidates = vec![candidate(100, 150, 2.0), strong];
        let (merged, _) = merge_candidates(&candidates, 10);

        assert_eq!(merged[0].power, 9.0);
        assert_eq!(merged[0].frequency, 180.0);
        assert_eq!(merged[0].peak, strong.peak);
    }

    #[test]
    fn test_transitive_chain_collapses() {
        // A-B and B-C are close; A-C alone would not merge. Transitive
        // closure still collapses all three.
        let candidates = vec![
            candidate(0, 100, 1.0),
            candidate(105, 200, 2.0),
            candidate(205, 300, 1.5),
        ];
        let (merged, absorbed) = merge_candidates(&candidates, 10);

        assert_eq!(merged.len(), 1);
        assert_eq!(absorbed, 2);
        assert_eq!(merged[0].start, 0);
        assert_eq!(merged[0].end, 300);
        assert_eq!(merged[0].power, 2.0);
    }

    #[test]
    fn test_distant_candidates_stay_separate() {
        let candidates = vec![candidate(0, 50, 1.0), candidate(200, 250, 2.0)];
        let (merged, absorbed) = merge_candidates(&candidates, 10);
        assert_eq!(merged.len(), 2);
        assert_eq!(absorbed, 0);
    }

    #[test]
    fn test_gap_threshold_inclusive() {
        let candidates = vec![candidate(0, 50, 1.0), candidate(60, 100, 2.0)];
        let (merged, _) = merge_candidates(&candidates, 10);
        assert_eq!(merged.len(), 1, "gap of exactly the threshold must merge");
    }

    #[test]
    fn test_nested_candidate_does_not_shrink_cluster_edge() {
        // A long candidate containing a shorter one (distinct frequency-row
        // regions overlapping in time). The follower sits within the gap of
        // the long member's end but far from the nested member's end; it
        // must still join the cluster, or the output would carry an
        // adjacent gap below the threshold.
        let candidates = vec![
            candidate(0, 300, 2.0),
            candidate(10, 20, 1.0),
            candidate(305, 330, 1.5),
        ];
        let (merged, absorbed) = merge_candidates(&candidates, 10);

        assert_eq!(merged.len(), 1, "output: {:?}", merged);
        assert_eq!(absorbed, 2);
        assert_eq!(merged[0].start, 0);
        assert_eq!(merged[0].end, 330);

        let (twice, re_absorbed) = merge_candidates(&merged, 10);
        assert_eq!(merged, twice);
        assert_eq!(re_absorbed, 0);
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let candidates = vec![
            candidate(0, 100, 1.0),
            candidate(105, 200, 2.0),
            candidate(400, 450, 1.0),
            candidate(458, 500, 3.0),
        ];
        let (once, _) = merge_candidates(&candidates, 10);
        let (twice, absorbed) = merge_candidates(&once, 10);

        assert_eq!(once, twice);
        assert_eq!(absorbed, 0);
    }

    #[test]
    fn test_empty_input() {
        let (merged, absorbed) = merge_candidates(&[], 10);
        assert!(merged.is_empty());
        assert_eq!(absorbed, 0);
    }
}
