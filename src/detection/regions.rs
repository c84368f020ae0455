//! 2-D connected-region extraction over the thresholded amplitude grid
//!
//! Iterative flood fill with 4-connectivity (a cell touches its temporal
//! and frequency neighbors, not diagonals). Implemented directly; no image
//! processing dependency.

/// A maximal connected region of supra-threshold amplitude cells
#[derive(Debug, Clone)]
pub struct Region {
    /// First time sample covered by the region
    pub start: usize,

    /// Last time sample covered by the region (inclusive)
    pub end: usize,

    /// Maximum amplitude within the region
    pub max_value: f32,

    /// Amplitude-weighted centroid along the time axis, in samples
    pub time_centroid: f32,

    /// Amplitude-weighted centroid along the frequency axis, as a
    /// fractional bin index
    pub frequency_centroid: f32,
}

/// Extract maximal connected regions where `amplitude >= threshold`
///
/// # Arguments
///
/// * `amplitude` - Amplitude matrix, `[frequency bin][sample index]`,
///   rectangular
/// * `threshold` - Inclusion threshold for a cell
///
/// # Returns
///
/// One [`Region`] per connected component, in discovery order (row-major
/// scan of seeds).
pub fn extract_regions(amplitude: &[Vec<f32>], threshold: f32) -> Vec<Region> {
    let n_rows = amplitude.len();
    let n_cols = amplitude.first().map_or(0, Vec::len);
    if n_rows == 0 || n_cols == 0 {
        return Vec::new();
    }

    let mut visited = vec![false; n_rows * n_cols];
    let mut regions = Vec::new();
    let mut stack = Vec::new();

    for seed_row in 0..n_rows {
        for seed_col in 0..n_cols {
            if visited[seed_row * n_cols + seed_col] || amplitude[seed_row][seed_col] < threshold
            {
                continue;
            }

            let mut start = seed_col;
            let mut end = seed_col;
            let mut max_value = f32::MIN;
            let mut weight = 0.0f64;
            let mut time_weight = 0.0f64;
            let mut freq_weight = 0.0f64;

            visited[seed_row * n_cols + seed_col] = true;
            stack.push((seed_row, seed_col));
            while let Some((row, col)) = stack.pop() {
                let value = amplitude[row][col];
                start = start.min(col);
                end = end.max(col);
                max_value = max_value.max(value);
                weight += value as f64;
                time_weight += value as f64 * col as f64;
                freq_weight += value as f64 * row as f64;

                let mut visit = |r: usize, c: usize| {
                    if !visited[r * n_cols + c] && amplitude[r][c] >= threshold {
                        visited[r * n_cols + c] = true;
                        stack.push((r, c));
                    }
                };
                if row > 0 {
                    visit(row - 1, col);
                }
                if row + 1 < n_rows {
                    visit(row + 1, col);
                }
                if col > 0 {
                    visit(row, col - 1);
                }
                if col + 1 < n_cols {
                    visit(row, col + 1);
                }
            }

            regions.push(Region {
                start,
                end,
                max_value,
                time_centroid: (time_weight / weight) as f32,
                frequency_centroid: (freq_weight / weight) as f32,
            });
        }
    }

    regions
}
