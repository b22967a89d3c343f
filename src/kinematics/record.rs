use super::KinematicResult;

/// The kinematic quantities of a single sample, flattened for tabular output.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KinematicRecord {
    pub index: usize,
    pub t: f64,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub speed: f64,
    pub tangent_x: f64,
    pub tangent_y: f64,
    pub normal_x: f64,
    pub normal_y: f64,
    pub curvature: f64,
    pub signed_curvature: f64,
    pub tangential_acc_x: f64,
    pub tangential_acc_y: f64,
    pub normal_acc_x: f64,
    pub normal_acc_y: f64,
    pub total_acceleration: f64,
}

impl KinematicRecord {
    pub(super) fn from_result(result: &KinematicResult, index: usize) -> Self {
        let position = result.positions[index];
        let velocity = result.velocity[index];
        let tangent = result.tangent[index];
        let normal = result.normal[index];
        let at = result.tangential_acceleration[index];
        let an = result.normal_acceleration[index];
        Self {
            index,
            t: result.ts[index],
            x: position.x,
            y: position.y,
            vx: velocity.x,
            vy: velocity.y,
            speed: result.speed[index],
            tangent_x: tangent.x,
            tangent_y: tangent.y,
            normal_x: normal.x,
            normal_y: normal.y,
            curvature: result.curvature[index],
            signed_curvature: result.signed_curvature[index],
            tangential_acc_x: at.x,
            tangential_acc_y: at.y,
            normal_acc_x: an.x,
            normal_acc_y: an.y,
            total_acceleration: result.total_acceleration[index],
        }
    }
}

#[cfg(test)]
mod test {
    use crate::kinematics::{compute_kinematics, KinematicsConfig};
    use crate::trajectory::{Sample, Trajectory};
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn records_follow_samples() {
        let samples = (0..6)
            .map(|i| {
                let t = 0.25 * i as f64;
                Sample::new(t.cos(), t.sin(), t)
            })
            .collect();
        let traj = Trajectory::new(samples).unwrap();
        let result = compute_kinematics(&traj, &KinematicsConfig::default()).unwrap();
        let records: Vec<_> = result.records().collect();

        assert_eq!(records.len(), 6);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.index, i);
            assert_eq!(record.t, traj.samples()[i].t);
            assert_eq!(record.vx, result.velocity()[i].x);
            assert_eq!(record.curvature, result.curvature()[i]);
            assert_approx_eq!(record.x, traj.samples()[i].x);
            assert_approx_eq!(
                record.total_acceleration.powi(2),
                (record.tangential_acc_x + record.normal_acc_x).powi(2)
                    + (record.tangential_acc_y + record.normal_acc_y).powi(2)
            );
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn records_serialize_flat() {
        let samples = vec![
            Sample::new(0.0, 0.0, 0.0),
            Sample::new(1.0, 0.5, 1.0),
            Sample::new(2.0, 2.0, 2.0),
        ];
        let result = Trajectory::new(samples).unwrap().kinematics().unwrap();
        let record = result.records().next().unwrap();
        let json = serde_json::to_value(record).unwrap();
        assert_eq!(json["index"], 0);
        assert_eq!(json["t"], 0.0);
        assert!(json["total_acceleration"].is_number());
    }
}
