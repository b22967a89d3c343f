//! Geometry of a sampled path without timing information.

use cgmath::prelude::*;

use crate::error::{InvalidInput, KinematicsError};
use crate::math::{gradient_unit, signed_curvature, Point2d, Vector2d};
use crate::trajectory::MIN_SAMPLES;

/// Computes the signed curvature at each point of a polyline.
///
/// The points are treated as evenly spaced samples of a parametric curve, so
/// the result only matches the true curvature where the spacing is roughly
/// uniform. Coincident neighbouring points give NaN at that index.
pub fn path_curvature(points: &[Point2d]) -> Result<Vec<f64>, KinematicsError> {
    if points.len() < MIN_SAMPLES {
        return Err(InvalidInput::TooFewSamples { len: points.len() }.into());
    }
    if let Some(index) = points.iter().position(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return Err(InvalidInput::NonFinite { index }.into());
    }

    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
    let dx = gradient_unit(&xs);
    let dy = gradient_unit(&ys);
    let d2x = gradient_unit(&dx);
    let d2y = gradient_unit(&dy);

    Ok((0..points.len())
        .map(|i| signed_curvature(Vector2d::new(dx[i], dy[i]), Vector2d::new(d2x[i], d2y[i])))
        .collect())
}

/// Computes the length of a polyline.
pub fn path_length(points: &[Point2d]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}
