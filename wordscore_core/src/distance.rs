//! Edit distance with adjacent transpositions (optimal string alignment)

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Minimum number of insertions, deletions, substitutions and adjacent
/// transpositions needed to turn `a` into `b`, counted over chars.
///
/// A transposed pair is only recognised when neither character is edited
/// again, so `"ca"` → `"abc"` costs 3 here rather than 2.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (n, m) = (a.len(), b.len());

    if n == 0 {
        return m;
    }
    if m == 0 {
        return n;
    }

    // Row-major (n + 1) x (m + 1) table
    let width = m + 1;
    let mut dp = vec![0usize; (n + 1) * width];
    for i in 0..=n {
        dp[i * width] = i;
    }
    for j in 0..=m {
        dp[j] = j;
    }

    for i in 1..=n {
        for j in 1..=m {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            let mut cell = (dp[(i - 1) * width + j] + 1) // deletion
                .min(dp[i * width + j - 1] + 1) // insertion
                .min(dp[(i - 1) * width + j - 1] + cost); // substitution

            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                cell = cell.min(dp[(i - 2) * width + j - 2] + 1);
            }
            dp[i * width + j] = cell;
        }
    }

    dp[n * width + m]
}

/// Edit distance divided by the longer token's length (at least 1).
pub fn normalized_distance(a: &str, b: &str) -> f64 {
    normalize(edit_distance(a, b), a, b)
}

/// Scale an already computed distance between `a` and `b`.
pub fn normalize(distance: usize, a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count()).max(1);
    distance as f64 / longest as f64
}

// ============= Python Binding =============

#[cfg(feature = "python")]
#[pyfunction]
#[pyo3(name = "edit_distance")]
pub fn py_edit_distance(a: &str, b: &str) -> usize {
    edit_distance(a, b)
}
