use track_kinematics::{compute_kinematics, KinematicsConfig, Sample, Trajectory};

/// A corner sampled every half second, with coordinates in decimetres.
const CORNER: [(f64, f64, f64); 20] = [
    (0.0, 0.0, 0.0),
    (0.3, 0.0, 0.5),
    (1.25, -0.1, 1.0),
    (2.1, -0.9, 1.5),
    (2.85, -2.3, 2.0),
    (3.8, -3.95, 2.5),
    (5.0, -5.75, 3.0),
    (6.4, -7.8, 3.5),
    (8.05, -9.9, 4.0),
    (9.9, -11.6, 4.5),
    (12.05, -12.85, 5.0),
    (14.25, -13.7, 5.5),
    (16.5, -13.8, 6.0),
    (19.25, -13.35, 6.5),
    (21.3, -12.2, 7.0),
    (22.8, -10.5, 7.5),
    (23.55, -8.15, 8.0),
    (22.95, -6.1, 8.5),
    (21.35, -3.95, 9.0),
    (19.1, -1.9, 9.5),
];

fn main() {
    let samples = CORNER.iter().map(|&(x, y, t)| Sample::new(x, y, t)).collect();
    let trajectory = match Trajectory::new(samples) {
        Ok(trajectory) => trajectory,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    let config = KinematicsConfig {
        distance_scale: 10.0,
        ..Default::default()
    };
    let result = match compute_kinematics(&trajectory, &config) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    for record in result.records() {
        match serde_json::to_string(&record) {
            Ok(line) => println!("{line}"),
            Err(err) => eprintln!("Failed to serialize sample {}: {err}", record.index),
        }
    }
}
