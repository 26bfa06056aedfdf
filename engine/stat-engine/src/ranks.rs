//! Rank transforms and correlation primitives
//!
//! Spearman correlation is computed as Pearson correlation of the rank
//! transforms of both sequences. Ranks use "min" tie-breaking: tied values
//! all receive the rank of their first occurrence in ascending sorted
//! order. Ties are rare in this data and determinism matters more than
//! statistical purity, so average-rank assignment is deliberately not
//! used.

/// Variance below this is treated as zero
const VARIANCE_EPSILON: f64 = 1e-12;

/// Arithmetic mean; 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (N denominator); 0 for an empty slice.
///
/// The field at an event is the full relevant universe, not a sample, so
/// the population form is the right one.
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Ascending 1-based ranks with "min" tie-breaking.
///
/// Tied values share the rank of their first occurrence in the ascending
/// sort, so `[10.0, 5.0, 5.0]` ranks to `[3.0, 1.0, 1.0]`.
pub fn min_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; values.len()];
    let mut current_rank = 0usize;
    for (position, &idx) in order.iter().enumerate() {
        if position == 0 || values[idx] != values[order[position - 1]] {
            current_rank = position + 1;
        }
        ranks[idx] = current_rank as f64;
    }
    ranks
}

/// Pearson correlation coefficient.
///
/// Returns 0 for mismatched lengths, fewer than two pairs, or zero
/// variance in either sequence. The degenerate cases are defined as 0
/// rather than NaN so downstream aggregation stays total.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.len() < 2 {
        return 0.0;
    }
    let n = x.len() as f64;
    let mean_x = mean(x);
    let mean_y = mean(y);

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in x.iter().zip(y.iter()) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x / n < VARIANCE_EPSILON || var_y / n < VARIANCE_EPSILON {
        return 0.0;
    }
    cov / (var_x.sqrt() * var_y.sqrt())
}

/// Spearman rank correlation: Pearson over min-tie rank transforms
pub fn spearman(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.len() < 2 {
        return 0.0;
    }
    pearson(&min_ranks(x), &min_ranks(y))
}

/// Root mean squared error over raw (non-ranked) pairs; 0 when empty
pub fn rmse(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = x
        .iter()
        .zip(y.iter())
        .map(|(a, b)| (a - b).powi(2))
        .sum();
    (sum_sq / x.len() as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_ranks_assign_first_occurrence_to_ties() {
        assert_eq!(min_ranks(&[10.0, 5.0, 5.0]), vec![3.0, 1.0, 1.0]);
        assert_eq!(min_ranks(&[1.0, 2.0, 3.0]), vec![1.0, 2.0, 3.0]);
        assert_eq!(min_ranks(&[7.0, 7.0, 7.0]), vec![1.0, 1.0, 1.0]);
        assert_eq!(min_ranks(&[]), Vec::<f64>::new());
    }

    #[test]
    fn pearson_perfect_correlation() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [2.0, 4.0, 6.0, 8.0];
        assert!((pearson(&x, &y) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn pearson_perfect_anticorrelation() {
        let x = [1.0, 2.0, 3.0];
        let y = [3.0, 2.0, 1.0];
        assert!((pearson(&x, &y) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_variance_yields_zero_not_nan() {
        let x = [5.0, 5.0, 5.0];
        let y = [1.0, 2.0, 3.0];
        assert_eq!(pearson(&x, &y), 0.0);
        assert_eq!(spearman(&x, &y), 0.0);
    }

    #[test]
    fn tiny_samples_yield_zero() {
        assert_eq!(pearson(&[1.0], &[2.0]), 0.0);
        assert_eq!(spearman(&[], &[]), 0.0);
    }

    #[test]
    fn spearman_is_rank_based() {
        // Monotone but non-linear: Spearman 1, Pearson below 1
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [1.0, 10.0, 100.0, 1000.0];
        assert!((spearman(&x, &y) - 1.0).abs() < 1e-12);
        assert!(pearson(&x, &y) < 1.0);
    }

    #[test]
    fn rmse_zero_for_identical_sequences() {
        let x = [1.0, 2.0, 3.0];
        assert_eq!(rmse(&x, &x), 0.0);
        assert!((rmse(&[0.0, 0.0], &[3.0, 4.0]) - (12.5f64).sqrt()).abs() < 1e-12);
    }
}
