use pullfe::core::io::results::{self, FreeEnergyRecord, PmfRecord};
use pullfe::engine::config::{CompareConfig, CompareConfigBuilder};
use pullfe::engine::error::EngineError;
use pullfe::engine::progress::ProgressReporter;
use pullfe::workflows::compare::{self, FREE_ENERGY_FIGURE, PMF_FIGURE, RMSE_FIGURE};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const EDGES: [f64; 4] = [1.0, 1.5, 2.0, 2.5];

fn free_energy(len: usize) -> FreeEnergyRecord {
    let lambdas: Vec<f64> = (0..len).map(|i| 1.3 + 0.02 * i as f64).collect();
    FreeEnergyRecord {
        mean: lambdas.iter().map(|l| (l - 2.0).powi(2)).collect(),
        std: vec![0.1; len],
        lambdas,
        replicates: BTreeMap::new(),
    }
}

fn pmf(edges: &[f64], mean: Vec<f64>, replicates: Vec<Vec<f64>>) -> PmfRecord {
    PmfRecord {
        pmf_bin_edges: edges.to_vec(),
        std: vec![0.2; mean.len()],
        mean,
        pmfs: replicates
            .into_iter()
            .enumerate()
            .map(|(i, r)| (format!("rep{i}"), r))
            .collect(),
    }
}

fn write_estimator(dir: &Path, name: &str, fe: &FreeEnergyRecord, pmf: &PmfRecord) {
    fs::create_dir_all(dir).unwrap();
    results::write_record(fe, &dir.join(results::free_energy_file_name(name))).unwrap();
    results::write_record(pmf, &dir.join(results::pmf_file_name(name))).unwrap();
}

fn config(root: &Path) -> CompareConfig {
    CompareConfigBuilder::new()
        .pull_fe_pmf_dir(root.join("pull_fe_pmf"))
        .reference_dir(root.join("us_fe_pmf"))
        .fe_nsamples(20)
        .estimators(vec!["u".to_string(), "s1".to_string()])
        .reference("us".to_string())
        .out_dir(root.join("figures"))
        .rmse_table(Some(root.join("figures").join("rmse_pmfs.csv")))
        .build()
        .unwrap()
}

fn write_fixtures(root: &Path, s1_edges: &[f64]) {
    let pull = root.join("pull_fe_pmf");
    write_estimator(
        &pull,
        "u",
        &free_energy(50),
        &pmf(&EDGES, vec![5.0, 4.0, 6.0], vec![vec![5.0, 4.0, 6.0], vec![5.0, 4.0, 6.0]]),
    );
    write_estimator(
        &pull,
        "s1",
        &free_energy(50),
        &pmf(s1_edges, vec![0.0, 1.0, 3.0], vec![vec![0.0, 1.0, 3.0], vec![0.0, 1.0, 3.0]]),
    );
    write_estimator(
        &root.join("us_fe_pmf"),
        "us",
        &free_energy(40),
        &pmf(&EDGES, vec![1.0, 0.0, 2.0], vec![]),
    );
}

#[test]
fn comparison_writes_three_figures_and_rmse_table() {
    let dir = tempdir().unwrap();
    write_fixtures(dir.path(), &EDGES);
    let cfg = config(dir.path());
    fs::create_dir_all(&cfg.out_dir).unwrap();

    let comparison = compare::run(&cfg, &ProgressReporter::new()).unwrap();

    assert_eq!(comparison.offsets["u"], -4.0);
    assert_eq!(comparison.offsets["s1"], -1.0);
    assert_eq!(comparison.aligned_pmfs["u"].mean.to_vec(), vec![1.0, 0.0, 2.0]);
    assert_eq!(comparison.rmse[0].1.to_vec(), vec![0.0, 0.0, 0.0]);
    assert_eq!(comparison.rmse[1].1.to_vec(), vec![2.0, 0.0, 0.0]);

    for name in [FREE_ENERGY_FIGURE, PMF_FIGURE, RMSE_FIGURE] {
        let svg = fs::read_to_string(cfg.out_dir.join(name)).unwrap();
        assert!(svg.contains("<svg"), "{name} is not an SVG document");
    }

    let table = fs::read_to_string(cfg.rmse_table.as_ref().unwrap()).unwrap();
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines[0], "bin_center,u,s1");
    assert_eq!(lines.len(), 4);
}

#[test]
fn pmf_on_a_different_grid_is_rejected() {
    let dir = tempdir().unwrap();
    write_fixtures(dir.path(), &[1.0, 1.6, 2.0, 2.5]);
    let cfg = config(dir.path());
    fs::create_dir_all(&cfg.out_dir).unwrap();

    let result = compare::run(&cfg, &ProgressReporter::new());

    assert!(matches!(result, Err(EngineError::Analysis { .. })));
    assert!(!cfg.out_dir.join(PMF_FIGURE).exists());
}

#[test]
fn missing_reference_results_are_reported() {
    let dir = tempdir().unwrap();
    write_fixtures(dir.path(), &EDGES);
    fs::remove_file(dir.path().join("us_fe_pmf").join("pmf_us.json")).unwrap();

    let result = compare::run(&config(dir.path()), &ProgressReporter::new());

    assert!(matches!(result, Err(EngineError::Results { .. })));
}
