//! Student t location tests.
//!
//! | Test        | Statistic                                   | df                      |
//! |-------------|---------------------------------------------|-------------------------|
//! | one-sample  | t = x̄ / (s / √n)                            | n − 1                   |
//! | Welch       | t = (x̄ − ȳ) / √(s²ₓ/nₓ + s²ᵧ/nᵧ)            | Welch–Satterthwaite     |
//! | Student     | t = (x̄ − ȳ) / (sₚ √(1/nₓ + 1/nᵧ))           | nₓ + nᵧ − 2             |
//!
//! All tests are two-sided against a zero location. When the standard error
//! is zero, t is ±∞ with p = 0 if the mean (difference) is non-zero, and 0
//! with p = 1 otherwise.

use netmanip_core::{NetError, NetResult};
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::result::TestOutcome;

pub(crate) fn mean(xs: &[f64]) -> f64 {
    let mut s = 0.0;
    for &v in xs {
        s += v;
    }
    s / (xs.len() as f64)
}

/// Sample variance (ddof = 1); `NaN` for fewer than 2 values.
pub(crate) fn var_sample(xs: &[f64], mean: f64) -> f64 {
    let n = xs.len();
    if n < 2 {
        return f64::NAN;
    }
    let mut ss = 0.0;
    for &v in xs {
        let d = v - mean;
        ss += d * d;
    }
    ss / ((n - 1) as f64)
}

/// Two-sided p-value of `t` under Student's t with `df` degrees of freedom.
fn two_sided_p(t: f64, df: f64) -> NetResult<f64> {
    let dist = StudentsT::new(0.0, 1.0, df)
        .map_err(|e| NetError::contract("t distribution", format!("df = {df}: {e}")))?;
    Ok((2.0 * dist.sf(t.abs())).clamp(0.0, 1.0))
}

fn outcome(diff: f64, se: f64, df: f64) -> NetResult<TestOutcome> {
    if se == 0.0 || se.is_nan() {
        let (statistic, p_value) = if diff == 0.0 {
            (0.0, 1.0)
        } else {
            (diff.signum() * f64::INFINITY, 0.0)
        };
        return Ok(TestOutcome { statistic, df: Some(df), p_value, estimate: diff });
    }
    let t = diff / se;
    Ok(TestOutcome {
        statistic: t,
        df: Some(df),
        p_value: two_sided_p(t, df)?,
        estimate: diff,
    })
}

/// One-sample t test of `x` against 0. Needs at least 2 values.
pub fn one_sample_t(x: &[f64]) -> NetResult<TestOutcome> {
    let n = x.len() as f64;
    let m = mean(x);
    let se = (var_sample(x, m) / n).sqrt();
    outcome(m, se, n - 1.0)
}

/// Welch two-sample t test of `x − y` against 0.
pub fn welch_t(x: &[f64], y: &[f64]) -> NetResult<TestOutcome> {
    let (nx, ny) = (x.len() as f64, y.len() as f64);
    let (mx, my) = (mean(x), mean(y));
    let (qx, qy) = (var_sample(x, mx) / nx, var_sample(y, my) / ny);
    let se = (qx + qy).sqrt();
    let df = if se == 0.0 {
        nx + ny - 2.0
    } else {
        (qx + qy).powi(2) / (qx * qx / (nx - 1.0) + qy * qy / (ny - 1.0))
    };
    outcome(mx - my, se, df)
}

/// Pooled-variance Student two-sample t test of `x − y` against 0.
pub fn student_t(x: &[f64], y: &[f64]) -> NetResult<TestOutcome> {
    let (nx, ny) = (x.len() as f64, y.len() as f64);
    let (mx, my) = (mean(x), mean(y));
    let df = nx + ny - 2.0;
    let pooled = ((nx - 1.0) * var_sample(x, mx) + (ny - 1.0) * var_sample(y, my)) / df;
    let se = (pooled * (1.0 / nx + 1.0 / ny)).sqrt();
    outcome(mx - my, se, df)
}
