//! Multiple-comparison p-value adjustment.

use crate::config::Correction;

/// Adjust `p` across all of its entries, preserving order.
pub fn adjust(p: &[f64], correction: Correction) -> Vec<f64> {
    match correction {
        Correction::None => p.to_vec(),
        Correction::Bonferroni => bonferroni(p),
        Correction::Fdr => benjamini_hochberg(p),
    }
}

/// min(1, p · m).
pub fn bonferroni(p: &[f64]) -> Vec<f64> {
    let m = p.len() as f64;
    p.iter().map(|&v| (v * m).min(1.0)).collect()
}

/// Benjamini–Hochberg step-up: p₍ᵢ₎ · m / i, made monotone from the largest
/// p-value down and capped at 1.
pub fn benjamini_hochberg(p: &[f64]) -> Vec<f64> {
    let m = p.len();
    let mut order: Vec<usize> = (0..m).collect();
    order.sort_by(|&a, &b| p[b].total_cmp(&p[a]));

    let mut out = vec![0.0f64; m];
    let mut running = f64::INFINITY;
    for (pos, &idx) in order.iter().enumerate() {
        let rank = (m - pos) as f64;
        running = running.min(p[idx] * m as f64 / rank);
        out[idx] = running.min(1.0);
    }
    out
}
