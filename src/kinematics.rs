//! Velocity, curvature and acceleration along a sampled trajectory.
//!
//! Every derivative is taken with respect to time using the finite-difference
//! scheme in [crate::math::gradient]. No smoothing is applied, so noisy
//! measurements should be filtered before they get here.

use cgmath::prelude::*;
use itertools::izip;
use log::{debug, warn};

use crate::error::{Degeneracy, DegeneracyKind, KinematicsError};
use crate::math::{gradient, gradient_vec, normalize_with_magnitude, signed_curvature};
use crate::math::{Point2d, Vector2d};
use crate::trajectory::Trajectory;
pub use record::KinematicRecord;

mod record;

/// What to do when a unit tangent or unit normal is undefined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DegeneratePolicy {
    /// Fail with [KinematicsError::DegenerateSample].
    #[default]
    Reject,
    /// Complete the computation, leaving NaN components at the affected
    /// indices and listing them in [KinematicResult::degenerate].
    Flag,
}

/// Parameters of a kinematics computation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KinematicsConfig {
    /// Coordinates are divided by this factor before differentiation,
    /// e.g. 10.0 to turn decimetres into metres.
    pub distance_scale: f64,
    /// The handling of samples with zero speed or zero tangent derivative.
    pub degenerate: DegeneratePolicy,
}

impl Default for KinematicsConfig {
    fn default() -> Self {
        Self {
            distance_scale: 1.0,
            degenerate: DegeneratePolicy::Reject,
        }
    }
}

/// The kinematic quantities of a trajectory, index-aligned with its samples.
#[derive(Clone, Debug)]
pub struct KinematicResult {
    ts: Vec<f64>,
    positions: Vec<Point2d>,
    velocity: Vec<Vector2d>,
    speed: Vec<f64>,
    tangent: Vec<Vector2d>,
    normal: Vec<Vector2d>,
    curvature: Vec<f64>,
    signed_curvature: Vec<f64>,
    tangential_acceleration: Vec<Vector2d>,
    normal_acceleration: Vec<Vector2d>,
    total_acceleration: Vec<f64>,
    degenerate: Vec<Degeneracy>,
}

/// Computes velocity, curvature and decomposed acceleration for a trajectory.
///
/// # Parameters
/// * `trajectory` - The samples to differentiate. Left untouched.
/// * `config` - The distance scale and degenerate sample policy.
///
/// # Errors
/// * `InvalidInput` if the distance scale is not finite and positive.
/// * `DegenerateSample` under [DegeneratePolicy::Reject] if any sample repeats the
///   previous position, or the speed or the magnitude of the tangent derivative is
///   exactly zero there.
pub fn compute_kinematics(
    trajectory: &Trajectory,
    config: &KinematicsConfig,
) -> Result<KinematicResult, KinematicsError> {
    let trajectory = trajectory.scaled(config.distance_scale)?;
    let ts = trajectory.ts();
    let positions = trajectory.positions();
    debug!(
        "Computing kinematics for {} samples over {:?}",
        positions.len(),
        trajectory.time_span()
    );

    // First derivatives and the unit tangent
    let offsets: Vec<Vector2d> = positions.iter().map(|p| p.to_vec()).collect();
    let velocity = gradient_vec(&offsets, &ts);
    let (mut tangent, speed): (Vec<_>, Vec<_>) =
        velocity.iter().map(|&v| normalize_with_magnitude(v)).unzip();

    let mut degenerate = moving_degeneracies(&positions, &speed);
    if !degenerate.is_empty() {
        if config.degenerate == DegeneratePolicy::Reject {
            return Err(KinematicsError::DegenerateSample(degenerate));
        }
        for d in &degenerate {
            tangent[d.index] = Vector2d::new(f64::NAN, f64::NAN);
        }
    }

    // Rate of turning and the unit normal
    let tangent_dt = gradient_vec(&tangent, &ts);
    let (normal, turn_rate): (Vec<_>, Vec<_>) =
        tangent_dt.iter().map(|&v| normalize_with_magnitude(v)).unzip();

    degenerate.extend(turning_degeneracies(&turn_rate, &degenerate));
    degenerate.sort_by_key(|d| d.index);
    if !degenerate.is_empty() {
        match config.degenerate {
            DegeneratePolicy::Reject => {
                return Err(KinematicsError::DegenerateSample(degenerate));
            }
            DegeneratePolicy::Flag => warn!(
                "{} of {} samples have an undefined tangent or normal",
                degenerate.len(),
                positions.len()
            ),
        }
    }

    // Second derivatives
    let acceleration = gradient_vec(&velocity, &ts);
    let speed_dt = gradient(&speed, &ts);

    let signed: Vec<f64> = velocity
        .iter()
        .zip(&acceleration)
        .map(|(&v, &a)| signed_curvature(v, a))
        .collect();
    let curvature: Vec<f64> = signed.iter().map(|k| k.abs()).collect();

    let tangential_acceleration: Vec<Vector2d> = izip!(&speed_dt, &tangent)
        .map(|(&ds, &t)| t * ds)
        .collect();

    // Without turning the normal is undefined but the centripetal term vanishes
    let normal_acceleration: Vec<Vector2d> = izip!(&curvature, &speed, &normal, &turn_rate)
        .map(|(&k, &s, &n, &rate)| {
            if rate == 0.0 {
                Vector2d::zero()
            } else {
                n * (k * s * s)
            }
        })
        .collect();

    let total_acceleration = izip!(&tangential_acceleration, &normal_acceleration)
        .map(|(&at, &an)| (at + an).magnitude())
        .collect();

    debug!("Computed kinematics for {} samples", positions.len());

    Ok(KinematicResult {
        ts,
        positions,
        velocity,
        speed,
        tangent,
        normal,
        curvature,
        signed_curvature: signed,
        tangential_acceleration,
        normal_acceleration,
        total_acceleration,
        degenerate,
    })
}

/// Lists the samples at which the vehicle is not moving.
fn moving_degeneracies(positions: &[Point2d], speed: &[f64]) -> Vec<Degeneracy> {
    (0..positions.len())
        .filter_map(|index| {
            let kind = if speed[index] == 0.0 {
                DegeneracyKind::ZeroSpeed
            } else if index > 0 && positions[index] == positions[index - 1] {
                DegeneracyKind::Stationary
            } else {
                return None;
            };
            Some(Degeneracy { index, kind })
        })
        .collect()
}

/// Lists the samples, not already in `known`, at which the unit normal is undefined.
fn turning_degeneracies(turn_rate: &[f64], known: &[Degeneracy]) -> Vec<Degeneracy> {
    turn_rate
        .iter()
        .enumerate()
        .filter(|&(index, _)| known.iter().all(|d| d.index != index))
        .filter_map(|(index, &rate)| {
            let kind = if rate == 0.0 {
                DegeneracyKind::ZeroTangentDerivative
            } else if rate.is_nan() {
                DegeneracyKind::UndefinedNeighbour
            } else {
                return None;
            };
            Some(Degeneracy { index, kind })
        })
        .collect()
}

impl KinematicResult {
    /// The number of samples.
    pub fn len(&self) -> usize {
        self.ts.len()
    }

    /// Whether the result holds no samples.
    pub fn is_empty(&self) -> bool {
        self.ts.is_empty()
    }

    /// The sample timestamps in s.
    pub fn ts(&self) -> &[f64] {
        &self.ts
    }

    /// The sample positions, after applying the distance scale.
    pub fn positions(&self) -> &[Point2d] {
        &self.positions
    }

    /// The velocity vectors.
    pub fn velocity(&self) -> &[Vector2d] {
        &self.velocity
    }

    /// The speeds, i.e. the magnitudes of the velocity vectors.
    pub fn speed(&self) -> &[f64] {
        &self.speed
    }

    /// The unit tangent vectors.
    pub fn tangent(&self) -> &[Vector2d] {
        &self.tangent
    }

    /// The unit normal vectors, pointing towards the centre of the turn.
    pub fn normal(&self) -> &[Vector2d] {
        &self.normal
    }

    /// The unsigned curvature.
    pub fn curvature(&self) -> &[f64] {
        &self.curvature
    }

    /// The curvature, positive for left (counter-clockwise) turns.
    pub fn signed_curvature(&self) -> &[f64] {
        &self.signed_curvature
    }

    /// The acceleration along the direction of travel.
    pub fn tangential_acceleration(&self) -> &[Vector2d] {
        &self.tangential_acceleration
    }

    /// The centripetal acceleration.
    pub fn normal_acceleration(&self) -> &[Vector2d] {
        &self.normal_acceleration
    }

    /// The magnitude of the sum of tangential and normal acceleration.
    pub fn total_acceleration(&self) -> &[f64] {
        &self.total_acceleration
    }

    /// The samples at which a unit vector is undefined.
    /// Always empty under [DegeneratePolicy::Reject].
    pub fn degenerate(&self) -> &[Degeneracy] {
        &self.degenerate
    }

    /// Converts a result with degenerate samples into an error.
    pub fn ensure_regular(self) -> Result<Self, KinematicsError> {
        if self.degenerate.is_empty() {
            Ok(self)
        } else {
            Err(KinematicsError::DegenerateSample(self.degenerate))
        }
    }

    /// Iterates over the result one sample at a time.
    pub fn records(&self) -> impl Iterator<Item = KinematicRecord> + '_ {
        (0..self.len()).map(|i| KinematicRecord::from_result(self, i))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::InvalidInput;
    use crate::trajectory::Sample;
    use assert_approx_eq::assert_approx_eq;

    fn trajectory(points: &[(f64, f64, f64)]) -> Trajectory {
        Trajectory::new(points.iter().map(|&(x, y, t)| Sample::new(x, y, t)).collect()).unwrap()
    }

    fn flag() -> KinematicsConfig {
        KinematicsConfig {
            degenerate: DegeneratePolicy::Flag,
            ..Default::default()
        }
    }

    #[test]
    fn straight_line() {
        let traj = trajectory(&[
            (0.0, 0.0, 0.0),
            (1.0, 0.0, 1.0),
            (2.0, 0.0, 2.0),
            (3.0, 0.0, 3.0),
            (4.0, 0.0, 4.0),
        ]);
        let result = compute_kinematics(&traj, &flag()).unwrap();
        assert_eq!(result.len(), 5);
        for i in 1..4 {
            assert_approx_eq!(result.curvature()[i], 0.0);
        }
        for i in 0..5 {
            assert_approx_eq!(result.speed()[i], 1.0);
            assert_approx_eq!(result.tangent()[i].x, 1.0);
            assert_approx_eq!(result.normal_acceleration()[i].magnitude(), 0.0);
            assert_approx_eq!(result.tangential_acceleration()[i].magnitude(), 0.0);
            assert_approx_eq!(result.total_acceleration()[i], 0.0);
            assert!(result.normal()[i].x.is_nan());
        }
        assert_eq!(result.degenerate().len(), 5);
        assert!(result
            .degenerate()
            .iter()
            .all(|d| d.kind == DegeneracyKind::ZeroTangentDerivative));
    }

    #[test]
    fn straight_line_is_rejected_by_default() {
        let traj = trajectory(&[(0.0, 0.0, 0.0), (1.0, 1.0, 1.0), (2.0, 2.0, 2.0)]);
        let err = traj.kinematics().unwrap_err();
        assert_eq!(err.degenerate_indices(), vec![0, 1, 2]);
    }

    #[test]
    fn stationary_start() {
        let traj = trajectory(&[
            (0.0, 0.0, 0.0),
            (0.0, 0.0, 1.0),
            (1.0, 0.0, 2.0),
            (2.0, 0.0, 3.0),
        ]);
        assert_eq!(
            traj.kinematics().unwrap_err(),
            KinematicsError::DegenerateSample(vec![
                Degeneracy {
                    index: 0,
                    kind: DegeneracyKind::ZeroSpeed
                },
                Degeneracy {
                    index: 1,
                    kind: DegeneracyKind::Stationary
                },
            ])
        );
    }

    #[test]
    fn stationary_middle_is_flagged() {
        let traj = trajectory(&[
            (0.0, 0.0, 0.0),
            (1.0, 0.0, 1.0),
            (1.0, 0.0, 2.0),
            (1.0, 0.0, 3.0),
            (2.0, 0.0, 4.0),
        ]);
        assert_eq!(traj.kinematics().unwrap_err().degenerate_indices(), vec![2, 3]);

        let result = compute_kinematics(&traj, &flag()).unwrap();
        assert!(result.degenerate().contains(&Degeneracy {
            index: 2,
            kind: DegeneracyKind::ZeroSpeed
        }));
        assert!(result.tangent()[2].x.is_nan());
        assert!(result.tangent()[2].y.is_nan());
        assert!(result.ensure_regular().is_err());
    }

    #[test]
    fn stationary_pair_in_a_turn() {
        // Central differences keep the speed nonzero across a single repeated position
        let traj = Trajectory::from_columns(
            &[0.0, 1.0, 2.0, 2.0, 2.3, 3.0],
            &[0.0, 0.5, 0.7, 0.7, 1.5, 2.0],
            &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
        )
        .unwrap();
        assert_eq!(
            traj.kinematics().unwrap_err(),
            KinematicsError::DegenerateSample(vec![Degeneracy {
                index: 3,
                kind: DegeneracyKind::Stationary
            }])
        );

        let result = compute_kinematics(&traj, &flag()).unwrap();
        assert!(result.speed().iter().all(|&s| s > 0.0));
        assert!(result.tangent()[3].x.is_nan());
        assert!(result.degenerate().contains(&Degeneracy {
            index: 3,
            kind: DegeneracyKind::Stationary
        }));
    }

    #[test]
    fn every_undefined_normal_is_reported() {
        let traj = Trajectory::from_columns(
            &[0.0, 1.0, 2.0, 2.0, 2.3, 3.0, 3.5],
            &[0.0, 0.5, 0.7, 0.7, 1.5, 2.0, 3.0],
            &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        )
        .unwrap();
        let result = compute_kinematics(&traj, &flag()).unwrap();
        let reported: Vec<usize> = result.degenerate().iter().map(|d| d.index).collect();
        assert_eq!(reported, vec![2, 3, 4]);
        assert_eq!(result.degenerate()[0].kind, DegeneracyKind::UndefinedNeighbour);
        assert_eq!(result.degenerate()[2].kind, DegeneracyKind::UndefinedNeighbour);
        for i in 0..result.len() {
            let undefined = result.normal()[i].x.is_nan()
                || result.normal_acceleration()[i].x.is_nan();
            assert_eq!(undefined, reported.contains(&i), "sample {}", i);
        }
    }

    #[test]
    fn accelerating_turn() {
        // x = t^2, y = t^2 / 2 + t: exact for the central scheme at interior samples
        let points: Vec<_> = (0..7)
            .map(|i| {
                let t = 0.5 * i as f64;
                (t * t, 0.5 * t * t + t, t)
            })
            .collect();
        let config = KinematicsConfig::default();
        let result = compute_kinematics(&trajectory(&points), &config).unwrap();

        for i in 1..6 {
            let t = result.ts()[i];
            assert_approx_eq!(result.velocity()[i].x, 2.0 * t);
            assert_approx_eq!(result.velocity()[i].y, t + 1.0);
        }
        for i in 2..5 {
            let v = result.velocity()[i];
            let expected = (v.x * 1.0 - 2.0 * v.y).abs() / v.magnitude().powi(3);
            assert_approx_eq!(result.curvature()[i], expected);
            // Clockwise: the heading swings from +y towards +x
            assert!(result.signed_curvature()[i] < 0.0);
            assert_approx_eq!(result.signed_curvature()[i], -expected);
        }
        for i in 0..7 {
            assert_approx_eq!(result.tangent()[i].magnitude(), 1.0);
            assert_approx_eq!(result.normal()[i].magnitude(), 1.0);
        }
    }

    #[test]
    fn distance_scale() {
        let traj = trajectory(&[
            (0.0, 0.0, 0.0),
            (10.0, 0.0, 1.0),
            (20.0, 5.0, 2.0),
            (30.0, 15.0, 3.0),
        ]);
        let config = KinematicsConfig {
            distance_scale: 10.0,
            ..Default::default()
        };
        let result = compute_kinematics(&traj, &config).unwrap();
        assert_approx_eq!(result.velocity()[0].x, 1.0);
        assert_approx_eq!(result.positions()[3].y, 1.5);
        assert_eq!(traj.samples()[3].x, 30.0);

        let config = KinematicsConfig {
            distance_scale: 0.0,
            ..Default::default()
        };
        assert_eq!(
            compute_kinematics(&traj, &config).unwrap_err(),
            KinematicsError::InvalidInput(InvalidInput::InvalidScale(0.0))
        );
    }
}
