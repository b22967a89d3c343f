//! Finite-difference derivatives of sampled functions.
//!
//! Interior samples use a second-order central difference that accounts for
//! uneven spacing; the two end samples use first-order one-sided differences.
//! Callers must supply at least two samples with strictly increasing abscissae.

use super::Vector2d;

/// Differentiates `values` with respect to `ts`.
pub fn gradient(values: &[f64], ts: &[f64]) -> Vec<f64> {
    debug_assert_eq!(values.len(), ts.len());
    let n = values.len();
    debug_assert!(n >= 2);

    let mut out = Vec::with_capacity(n);
    out.push((values[1] - values[0]) / (ts[1] - ts[0]));
    for i in 1..n - 1 {
        let hs = ts[i] - ts[i - 1];
        let hd = ts[i + 1] - ts[i];
        let num = hs * hs * values[i + 1] + (hd * hd - hs * hs) * values[i]
            - hd * hd * values[i - 1];
        out.push(num / (hs * hd * (hs + hd)));
    }
    out.push((values[n - 1] - values[n - 2]) / (ts[n - 1] - ts[n - 2]));
    out
}

/// Differentiates `values` with respect to their index.
pub fn gradient_unit(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    debug_assert!(n >= 2);

    let mut out = Vec::with_capacity(n);
    out.push(values[1] - values[0]);
    out.extend(values.windows(3).map(|w| 0.5 * (w[2] - w[0])));
    out.push(values[n - 1] - values[n - 2]);
    out
}

/// Differentiates each component of `vectors` with respect to `ts`.
pub fn gradient_vec(vectors: &[Vector2d], ts: &[f64]) -> Vec<Vector2d> {
    let xs: Vec<f64> = vectors.iter().map(|v| v.x).collect();
    let ys: Vec<f64> = vectors.iter().map(|v| v.y).collect();
    gradient(&xs, ts)
        .into_iter()
        .zip(gradient(&ys, ts))
        .map(|(x, y)| Vector2d::new(x, y))
        .collect()
}
