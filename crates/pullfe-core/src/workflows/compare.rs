use crate::analysis::alignment::align_pmf;
use crate::analysis::stats::{bin_centers, equal_stride_subsample, rmse_per_bin};
use crate::core::io::figure::{self, LinePlot, Marker, PlotSeries};
use crate::core::io::{results, table};
use crate::core::models::curve::{FreeEnergyCurve, PmfCurve};
use crate::engine::config::{CompareConfig, ConfigError};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use ndarray::Array1;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, info, instrument};

pub const FREE_ENERGY_FIGURE: &str = "pull_us_fes.svg";
pub const PMF_FIGURE: &str = "pmfs.svg";
pub const RMSE_FIGURE: &str = "rmse_pmfs.svg";

/// Persisted results of every estimator, keyed by estimator name.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimatorResults {
    pub free_energies: BTreeMap<String, FreeEnergyCurve>,
    pub pmfs: BTreeMap<String, PmfCurve>,
}

/// Everything the comparison produces: the three figures and the data behind them.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub free_energy_plot: LinePlot,
    pub pmf_plot: LinePlot,
    pub rmse_plot: LinePlot,
    /// Aligned PMFs, reference included.
    pub aligned_pmfs: BTreeMap<String, PmfCurve>,
    /// Offset added to each non-reference estimator's PMF.
    pub offsets: BTreeMap<String, f64>,
    /// Bin centers of the reference PMF grid.
    pub bin_centers: Array1<f64>,
    /// Per-bin RMSE against the reference mean, in estimator order.
    pub rmse: Vec<(String, Array1<f64>)>,
}

/// Loads the free-energy and PMF records of every estimator and the reference.
pub fn load_results(config: &CompareConfig) -> Result<EstimatorResults, EngineError> {
    let mut free_energies = BTreeMap::new();
    let mut pmfs = BTreeMap::new();

    for name in config.estimators.iter().chain(std::iter::once(&config.reference)) {
        let dir = config.results_dir(name);
        let fe_path = dir.join(results::free_energy_file_name(name));
        let pmf_path = dir.join(results::pmf_file_name(name));
        debug!("Loading results of '{}' from {:?} and {:?}", name, fe_path, pmf_path);

        free_energies.insert(name.clone(), results::load_free_energy(&fe_path)?);
        pmfs.insert(name.clone(), results::load_pmf(&pmf_path)?);
    }

    Ok(EstimatorResults {
        free_energies,
        pmfs,
    })
}

/// Aligns the PMFs, computes the RMSE curves and lays out the three figures.
#[instrument(skip_all, name = "compare_workflow")]
pub fn compare(
    config: &CompareConfig,
    loaded: EstimatorResults,
    reporter: &ProgressReporter,
) -> Result<Comparison, EngineError> {
    let EstimatorResults {
        free_energies,
        mut pmfs,
    } = loaded;
    let reference = config.reference.as_str();
    let ordered: Vec<&str> = config
        .estimators
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(reference))
        .collect();

    reporter.report(Progress::PhaseStart {
        name: "Comparing estimators",
    });

    let free_energy_plot = free_energy_plot(config, &ordered, &free_energies)?;

    let reference_pmf = pmfs
        .get(reference)
        .cloned()
        .ok_or_else(|| missing(reference))?;
    let mut offsets = BTreeMap::new();
    for name in &config.estimators {
        let pmf = pmfs.get_mut(name).ok_or_else(|| missing(name))?;
        let offset = align_pmf(name, pmf, &reference_pmf)
            .map_err(EngineError::analysis(format!("alignment of '{name}'")))?;
        reporter.report(Progress::Message(format!(
            "Shifted PMF of '{name}' by {offset:.4} RT"
        )));
        offsets.insert(name.clone(), offset);
    }
    info!("Aligned {} PMF(s) onto '{}'.", offsets.len(), reference);

    let mut pmf_plot = LinePlot::new("Potentials of mean force", "d (nm)", "Φ(d) (RT)");
    for &name in &ordered {
        let pmf = &pmfs[name];
        pmf_plot.push(
            PlotSeries::new(name, bin_centers(pmf.bin_edges.view()).to_vec(), pmf.mean.to_vec())
                .with_errors(pmf.std.to_vec()),
        );
    }

    let mut rmse_plot = LinePlot::new("PMF error", "d (nm)", "RMSE[Φ(d)] (RT)");
    let mut rmse = Vec::with_capacity(config.estimators.len());
    for (i, name) in config.estimators.iter().enumerate() {
        let pmf = &pmfs[name];
        let curve = rmse_per_bin(
            pmf.replicates.values().map(|r| r.view()),
            reference_pmf.mean.view(),
        )
        .map_err(EngineError::analysis(format!("rmse of '{name}'")))?;
        rmse_plot.push(
            PlotSeries::new(
                name.as_str(),
                bin_centers(pmf.bin_edges.view()).to_vec(),
                curve.to_vec(),
            )
            .with_marker(Marker::cycle(i)),
        );
        rmse.push((name.clone(), curve));
    }

    reporter.report(Progress::PhaseFinish);

    Ok(Comparison {
        free_energy_plot,
        pmf_plot,
        rmse_plot,
        bin_centers: bin_centers(reference_pmf.bin_edges.view()),
        aligned_pmfs: pmfs,
        offsets,
        rmse,
    })
}

fn free_energy_plot(
    config: &CompareConfig,
    ordered: &[&str],
    free_energies: &BTreeMap<String, FreeEnergyCurve>,
) -> Result<LinePlot, EngineError> {
    let mut plot = LinePlot::new("Free energies", "λ (nm)", "ΔF_λ (RT)");
    for &name in ordered {
        let fe = free_energies.get(name).ok_or_else(|| missing(name))?;
        let nsamples = if name == config.reference {
            config.fe_nsamples / 2
        } else {
            config.fe_nsamples
        };
        let subsample = |values: &Array1<f64>| {
            equal_stride_subsample(values.view(), nsamples)
                .map(|a| a.to_vec())
                .map_err(EngineError::analysis(format!("free energy of '{name}'")))
        };
        plot.push(
            PlotSeries::new(name, subsample(&fe.lambdas)?, subsample(&fe.mean)?)
                .with_errors(subsample(&fe.std)?),
        );
    }
    Ok(plot)
}

fn missing(name: &str) -> EngineError {
    EngineError::Config(ConfigError::InvalidValue {
        parameter: "estimators",
        reason: format!("no results loaded for '{name}'"),
    })
}

/// Loads all results, runs the comparison and writes figures (and the RMSE table).
#[instrument(skip_all, name = "compare_and_write")]
pub fn run(config: &CompareConfig, reporter: &ProgressReporter) -> Result<Comparison, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Loading estimator results",
    });
    let loaded = load_results(config)?;
    reporter.report(Progress::PhaseFinish);

    let comparison = compare(config, loaded, reporter)?;

    let outputs: [(&LinePlot, PathBuf); 3] = [
        (&comparison.free_energy_plot, config.out_dir.join(FREE_ENERGY_FIGURE)),
        (&comparison.pmf_plot, config.out_dir.join(PMF_FIGURE)),
        (&comparison.rmse_plot, config.out_dir.join(RMSE_FIGURE)),
    ];
    for (plot, path) in outputs {
        info!("Rendering '{}' to {:?}", plot.title, path);
        figure::render_svg(plot, &path)?;
        reporter.report(Progress::OutputWritten {
            path: path.display().to_string(),
        });
    }

    if let Some(path) = &config.rmse_table {
        info!("Writing RMSE table to {:?}", path);
        table::write_to_path(path, &comparison.bin_centers, &comparison.rmse)?;
        reporter.report(Progress::OutputWritten {
            path: path.display().to_string(),
        });
    }

    Ok(comparison)
}
