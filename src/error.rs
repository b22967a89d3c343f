use std::fmt;

/// Errors produced while validating a trajectory or computing its kinematics.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KinematicsError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    #[error("degenerate samples at {}", DisplayIndices(.0))]
    DegenerateSample(Vec<Degeneracy>),
}

/// The ways in which an input trajectory can be malformed.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum InvalidInput {
    #[error("at least 3 samples are required, got {len}")]
    TooFewSamples { len: usize },

    #[error("timestamp at index {index} does not increase on the previous sample")]
    NonIncreasingTime { index: usize },

    #[error("non-finite value at index {index}")]
    NonFinite { index: usize },

    #[error("column lengths differ (x: {xs}, y: {ys}, t: {ts})")]
    ColumnLengthMismatch { xs: usize, ys: usize, ts: usize },

    #[error("distance scale must be finite and positive, got {0}")]
    InvalidScale(f64),
}

/// A sample at which a unit vector could not be defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Degeneracy {
    /// Index of the sample in the trajectory.
    pub index: usize,
    /// Which denominator vanished.
    pub kind: DegeneracyKind,
}

/// Why a unit vector is undefined at a degenerate sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DegeneracyKind {
    /// The speed is zero, so the unit tangent is undefined.
    ZeroSpeed,
    /// The position repeats the previous sample's, so the vehicle was not
    /// moving and the unit tangent is undefined.
    Stationary,
    /// The tangent does not change, so the unit normal is undefined.
    ZeroTangentDerivative,
    /// A neighbouring tangent is undefined, so the unit normal is too.
    UndefinedNeighbour,
}

impl KinematicsError {
    /// The indices reported by a `DegenerateSample` error, empty otherwise.
    pub fn degenerate_indices(&self) -> Vec<usize> {
        match self {
            Self::DegenerateSample(list) => list.iter().map(|d| d.index).collect(),
            Self::InvalidInput(_) => vec![],
        }
    }
}

impl fmt::Display for DegeneracyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroSpeed => write!(f, "zero speed"),
            Self::Stationary => write!(f, "stationary"),
            Self::ZeroTangentDerivative => write!(f, "zero tangent derivative"),
            Self::UndefinedNeighbour => write!(f, "undefined neighbouring tangent"),
        }
    }
}

struct DisplayIndices<'a>(&'a [Degeneracy]);

impl fmt::Display for DisplayIndices<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, d) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} ({})", d.index, d.kind)?;
        }
        Ok(())
    }
}
