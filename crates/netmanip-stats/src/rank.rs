//! Rank-based location tests.
//!
//! - **Wilcoxon signed-rank** (one sample against 0): V = sum of the ranks
//!   of |x| over positive x. Zeros are dropped first.
//! - **Mann–Whitney U** (two samples): W = R₁ − n₁(n₁ + 1)/2, the number of
//!   (x, y) pairs with x > y (ties count ½).
//!
//! Both use the exact null distribution when every sample is smaller than
//! [`EXACT_LIMIT`] and there are no ties (nor dropped zeros); otherwise a
//! normal approximation with tie-corrected variance and a continuity
//! correction of ½ towards the mean.

use netmanip_core::{NetError, NetResult};
use statrs::distribution::{ContinuousCDF, Normal};

use crate::result::TestOutcome;

/// Samples of this size or larger always use the normal approximation.
pub const EXACT_LIMIT: usize = 50;

/// Average 1-based ranks of `values`, and the size of every tie group.
pub(crate) fn average_ranks(values: &[f64]) -> (Vec<f64>, Vec<usize>) {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0f64; n];
    let mut ties = Vec::new();
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j < n && values[order[j]] == values[order[i]] {
            j += 1;
        }
        let avg_rank = (i + 1 + j) as f64 / 2.0;
        for &idx in &order[i..j] {
            ranks[idx] = avg_rank;
        }
        if j - i > 1 {
            ties.push(j - i);
        }
        i = j;
    }
    (ranks, ties)
}

pub(crate) fn median(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return f64::NAN;
    }
    let mut v = xs.to_vec();
    v.sort_by(f64::total_cmp);
    let mid = v.len() / 2;
    if v.len() % 2 == 0 {
        (v[mid - 1] + v[mid]) / 2.0
    } else {
        v[mid]
    }
}

fn tie_sum(ties: &[usize]) -> f64 {
    ties.iter().map(|&t| (t * t * t - t) as f64).sum()
}

/// Two-sided p of a statistic with null mean `center` and sd `sigma`.
fn normal_p(stat: f64, center: f64, sigma: f64) -> NetResult<f64> {
    if sigma <= 0.0 || !sigma.is_finite() {
        return Ok(1.0);
    }
    let z = stat - center;
    let correction = if z > 0.0 {
        0.5
    } else if z < 0.0 {
        -0.5
    } else {
        0.0
    };
    let z = (z - correction) / sigma;
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| NetError::contract("normal distribution", e.to_string()))?;
    let lower = normal.cdf(z);
    Ok((2.0 * lower.min(1.0 - lower)).clamp(0.0, 1.0))
}

/// Two-sided p from an exact count table indexed by the statistic.
fn exact_p(counts: &[f64], stat: f64, center: f64) -> f64 {
    let total: f64 = counts.iter().sum();
    let s = stat.round() as usize;
    let tail: f64 = if stat > center {
        counts.iter().skip(s).sum()
    } else {
        counts.iter().take(s + 1).sum()
    };
    (2.0 * tail / total).min(1.0)
}

// ─────────────────────────────────────────────
// Wilcoxon signed-rank
// ─────────────────────────────────────────────

/// Number of subsets of {1..n} for every possible sum.
fn signed_rank_counts(n: usize) -> Vec<f64> {
    let max = n * (n + 1) / 2;
    let mut counts = vec![0.0f64; max + 1];
    counts[0] = 1.0;
    for k in 1..=n {
        for s in (k..=max).rev() {
            counts[s] += counts[s - k];
        }
    }
    counts
}

/// Wilcoxon signed-rank test of `x` against 0.
pub fn signed_rank(x: &[f64]) -> NetResult<TestOutcome> {
    let estimate = median(x);
    let nonzero: Vec<f64> = x.iter().copied().filter(|&v| v != 0.0).collect();
    let n = nonzero.len();
    if n == 0 {
        return Ok(TestOutcome { statistic: 0.0, df: None, p_value: 1.0, estimate });
    }

    let abs: Vec<f64> = nonzero.iter().map(|v| v.abs()).collect();
    let (ranks, ties) = average_ranks(&abs);
    let v: f64 = ranks
        .iter()
        .zip(&nonzero)
        .filter(|(_, &d)| d > 0.0)
        .map(|(r, _)| r)
        .sum();

    let nf = n as f64;
    let center = nf * (nf + 1.0) / 4.0;
    let p_value = if n < EXACT_LIMIT && ties.is_empty() && n == x.len() {
        exact_p(&signed_rank_counts(n), v, center)
    } else {
        let var = nf * (nf + 1.0) * (2.0 * nf + 1.0) / 24.0 - tie_sum(&ties) / 48.0;
        normal_p(v, center, var.sqrt())?
    };
    Ok(TestOutcome { statistic: v, df: None, p_value, estimate })
}

// ─────────────────────────────────────────────
// Mann–Whitney U
// ─────────────────────────────────────────────

/// Null frequencies of U for sample sizes `m` and `n`.
///
/// c(u; i, j) = c(u − j; i − 1, j) + c(u; i, j − 1), splitting on whether
/// the overall largest value belongs to the first sample.
fn rank_sum_counts(m: usize, n: usize) -> Vec<f64> {
    let mut prev: Vec<Vec<f64>> = (0..=n).map(|_| vec![1.0]).collect();
    for i in 1..=m {
        let mut cur: Vec<Vec<f64>> = Vec::with_capacity(n + 1);
        cur.push(vec![1.0]);
        for j in 1..=n {
            let mut c = vec![0.0f64; i * j + 1];
            for (u, v) in prev[j].iter().enumerate() {
                c[u + j] += v;
            }
            for (u, v) in cur[j - 1].iter().enumerate() {
                c[u] += v;
            }
            cur.push(c);
        }
        prev = cur;
    }
    prev.pop().unwrap_or_default()
}

/// Mann–Whitney U test of `x` against `y`.
pub fn rank_sum(x: &[f64], y: &[f64]) -> NetResult<TestOutcome> {
    let (nx, ny) = (x.len(), y.len());
    let estimate = median(x) - median(y);

    let combined: Vec<f64> = x.iter().chain(y).copied().collect();
    let (ranks, ties) = average_ranks(&combined);
    let r1: f64 = ranks[..nx].iter().sum();
    let (fx, fy) = (nx as f64, ny as f64);
    let w = r1 - fx * (fx + 1.0) / 2.0;

    let center = fx * fy / 2.0;
    let p_value = if nx < EXACT_LIMIT && ny < EXACT_LIMIT && ties.is_empty() {
        exact_p(&rank_sum_counts(nx, ny), w, center)
    } else {
        let total = fx + fy;
        let var = fx * fy / 12.0 * ((total + 1.0) - tie_sum(&ties) / (total * (total - 1.0)));
        normal_p(w, center, var.sqrt())?
    };
    Ok(TestOutcome { statistic: w, df: None, p_value, estimate })
}
