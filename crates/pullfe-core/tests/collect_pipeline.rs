use approx::assert_relative_eq;
use pullfe::core::io::dataset;
use pullfe::core::units;
use pullfe::engine::config::{CollectConfig, CollectConfigBuilder, LegMode, TrajectorySelection};
use pullfe::engine::error::EngineError;
use pullfe::engine::progress::{Progress, ProgressReporter};
use pullfe::workflows::collect;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::tempdir;

const FORWARD: &str = "0 0 1\n1 1 1\n2 2 1\n";
const BACKWARD: &str = "# time position force\n0 2 -1\n1 1 -1\n2 0 -1\n";

fn write_trajectory(root: &Path, index: usize) {
    let dir = root.join(index.to_string());
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("forward.force"), FORWARD).unwrap();
    fs::write(dir.join("backward.force"), BACKWARD).unwrap();
}

fn config(root: &Path, exclude: Vec<usize>) -> CollectConfig {
    CollectConfigBuilder::new()
        .pull_dir(root.to_path_buf())
        .selection(TrajectorySelection {
            start: 0,
            end: 3,
            exclude,
        })
        .forward_file("forward.force".to_string())
        .backward_file("backward.force".to_string())
        .pulling_speed(1.0)
        .force_constant(7.2)
        .lambda_range(0.0, 2.0)
        .temperature(units::DEFAULT_TEMPERATURE_K)
        .leg_mode(LegMode::Both)
        .trajs_per_block(1)
        .breakpoint(1)
        .output_path(root.join("pull_data.npz"))
        .build()
        .unwrap()
}

#[test]
fn synthetic_pulls_produce_a_continuous_work_dataset() {
    let dir = tempdir().unwrap();
    for i in [0, 2] {
        write_trajectory(dir.path(), i);
    }
    let cfg = config(dir.path(), vec![1]);

    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    let reporter = ProgressReporter::with_callback(Box::new(move |p| sink.lock().unwrap().push(p)));

    collect::run(&cfg, &reporter).unwrap();
    let dataset = dataset::read_from_path(&cfg.output_path).unwrap();

    let beta = units::beta(units::DEFAULT_TEMPERATURE_K);
    assert_eq!(dataset.dt, 1.0);
    assert_eq!(dataset.pulling_times.to_vec(), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    assert_relative_eq!(dataset.ks, 100.0 * beta * 7.2, max_relative = 1e-12);
    assert_eq!(dataset.lambda_f.to_vec(), vec![0.0, 0.1, 0.2, 0.1, 0.0]);
    assert_eq!(dataset.lambda_f, dataset.lambda_r);

    assert_eq!(dataset.w_f.shape(), &[1, 1, 5]);
    assert_eq!(dataset.w_r.shape(), &[1, 1, 5]);
    for (i, &w) in dataset.w_f.iter().enumerate() {
        assert_relative_eq!(w, i as f64 * beta, max_relative = 1e-12);
    }
    assert_eq!(dataset.w_f, dataset.w_r);
    assert_eq!(
        dataset.z_f.iter().copied().collect::<Vec<_>>(),
        vec![0.0, 0.1, 0.2, 0.1, 0.0]
    );

    let events = events.lock().unwrap();
    assert!(events.contains(&Progress::LoadStart { total: 2 }));
    assert!(events.contains(&Progress::TrajectoryLoaded {
        index: 2,
        repeat: 1,
        slot: 0
    }));
    assert_eq!(
        events.last(),
        Some(&Progress::OutputWritten {
            path: cfg.output_path.display().to_string()
        })
    );
}

#[test]
fn malformed_force_log_aborts_without_output() {
    let dir = tempdir().unwrap();
    for i in 0..3 {
        write_trajectory(dir.path(), i);
    }
    fs::write(dir.path().join("1").join("forward.force"), "0 0 1\n1 x 1\n").unwrap();
    let cfg = config(dir.path(), vec![]);

    let result = collect::run(&cfg, &ProgressReporter::new());

    assert!(matches!(result, Err(EngineError::ForceLog { .. })));
    assert!(!cfg.output_path.exists());
}
