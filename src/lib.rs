//! Curvature and tangential/normal acceleration along sampled 2D trajectories.

pub use cgmath;
pub use error::{Degeneracy, DegeneracyKind, InvalidInput, KinematicsError};
pub use kinematics::{
    compute_kinematics, DegeneratePolicy, KinematicRecord, KinematicResult, KinematicsConfig,
};
pub use path::{path_curvature, path_length};
pub use trajectory::{Sample, Trajectory, MIN_SAMPLES};
pub use util::Interval;

mod error;
mod kinematics;
pub mod math;
mod path;
mod trajectory;
mod util;
