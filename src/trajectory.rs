use std::time::Duration;

use itertools::{izip, Itertools};

use crate::error::{InvalidInput, KinematicsError};
use crate::kinematics::{compute_kinematics, KinematicResult, KinematicsConfig};
use crate::math::Point2d;
use crate::util::Interval;

/// The minimum number of samples needed for second-order derivatives.
pub const MIN_SAMPLES: usize = 3;

/// A single position sample of a trajectory.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    /// The x coordinate.
    pub x: f64,
    /// The y coordinate.
    pub y: f64,
    /// The timestamp in s.
    pub t: f64,
}

impl Sample {
    /// Creates a new sample.
    pub const fn new(x: f64, y: f64, t: f64) -> Self {
        Self { x, y, t }
    }

    /// Creates a sample whose timestamp is an elapsed time, such as a lap time.
    pub fn from_lap_time(x: f64, y: f64, elapsed: Duration) -> Self {
        Self::new(x, y, elapsed.as_secs_f64())
    }

    /// The position of the sample.
    pub fn position(&self) -> Point2d {
        Point2d::new(self.x, self.y)
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.t.is_finite()
    }
}

/// An ordered sequence of timestamped 2D positions.
///
/// A trajectory always holds at least [MIN_SAMPLES] finite samples
/// with strictly increasing timestamps.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    samples: Vec<Sample>,
}

impl Trajectory {
    /// Creates a trajectory, validating the samples.
    pub fn new(samples: Vec<Sample>) -> Result<Self, KinematicsError> {
        if samples.len() < MIN_SAMPLES {
            return Err(InvalidInput::TooFewSamples { len: samples.len() }.into());
        }
        if let Some(index) = samples.iter().position(|s| !s.is_finite()) {
            return Err(InvalidInput::NonFinite { index }.into());
        }
        if let Some((index, _)) = samples
            .iter()
            .tuple_windows()
            .enumerate()
            .find(|(_, (a, b))| b.t <= a.t)
        {
            return Err(InvalidInput::NonIncreasingTime { index: index + 1 }.into());
        }
        Ok(Self { samples })
    }

    /// Creates a trajectory from three parallel columns.
    pub fn from_columns(xs: &[f64], ys: &[f64], ts: &[f64]) -> Result<Self, KinematicsError> {
        if xs.len() != ys.len() || xs.len() != ts.len() {
            return Err(InvalidInput::ColumnLengthMismatch {
                xs: xs.len(),
                ys: ys.len(),
                ts: ts.len(),
            }
            .into());
        }
        let samples = izip!(xs, ys, ts)
            .map(|(&x, &y, &t)| Sample::new(x, y, t))
            .collect();
        Self::new(samples)
    }

    /// The number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the trajectory has no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The samples in traversal order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// The x coordinates.
    pub fn xs(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.x).collect()
    }

    /// The y coordinates.
    pub fn ys(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.y).collect()
    }

    /// The timestamps.
    pub fn ts(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.t).collect()
    }

    /// The positions.
    pub fn positions(&self) -> Vec<Point2d> {
        self.samples.iter().map(Sample::position).collect()
    }

    /// The first and last timestamps.
    pub fn time_span(&self) -> Interval<f64> {
        let first = self.samples[0].t;
        let last = self.samples[self.samples.len() - 1].t;
        Interval::new(first, last)
    }

    /// Returns a copy of the trajectory with every coordinate divided by `distance_scale`.
    ///
    /// Timestamps are left unchanged.
    pub fn scaled(&self, distance_scale: f64) -> Result<Trajectory, KinematicsError> {
        if !distance_scale.is_finite() || distance_scale <= 0.0 {
            return Err(InvalidInput::InvalidScale(distance_scale).into());
        }
        let samples = self
            .samples
            .iter()
            .map(|s| Sample::new(s.x / distance_scale, s.y / distance_scale, s.t))
            .collect();
        Self::new(samples)
    }

    /// Computes the kinematics of the trajectory with the default configuration.
    pub fn kinematics(&self) -> Result<KinematicResult, KinematicsError> {
        compute_kinematics(self, &KinematicsConfig::default())
    }
}
