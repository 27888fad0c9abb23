use std::collections::BTreeMap;

// ============================================================================
// Median of the observed (non-missing) values
// ============================================================================

/// Median of the values that are present. Even counts average the two
/// middle values. Returns `None` when nothing was observed.
pub fn median(data: &[Option<f64>]) -> Option<f64> {
    let mut observed: Vec<f64> = data.iter().flatten().copied().collect();
    if observed.is_empty() {
        return None;
    }
    observed.sort_by(|a, b| a.total_cmp(b));
    Some(sorted_median(&observed))
}

/// Median of a slice that is already sorted ascending
pub fn sorted_median(sorted_data: &[f64]) -> f64 {
    let n = sorted_data.len();
    if n % 2 == 1 {
        sorted_data[n / 2]
    } else {
        0.5 * (sorted_data[n / 2 - 1] + sorted_data[n / 2])
    }
}

// ============================================================================
// Most frequent value
// ============================================================================

/// Most frequent observed value. Ties go to the smallest value in
/// lexicographic order.
pub fn most_frequent(data: &[Option<String>]) -> Option<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in data.iter().flatten() {
        *counts.entry(value.as_str()).or_insert(0) += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for (value, count) in counts {
        // ascending iteration: a tie keeps the earlier, smaller value
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((value, count)),
        }
    }

    best.map(|(value, _)| value.to_string())
}

// ============================================================================
// Classification accuracy
// ============================================================================

/// Fraction of positions where `predicted` equals `truth`.
/// Returns 0 for empty input.
pub fn accuracy<T: PartialEq>(truth: &[T], predicted: &[T]) -> f64 {
    let n = truth.len().min(predicted.len());
    if n == 0 {
        return 0.0;
    }
    let hits = truth
        .iter()
        .zip(predicted.iter())
        .filter(|(t, p)| t == p)
        .count();
    hits as f64 / n as f64
}
