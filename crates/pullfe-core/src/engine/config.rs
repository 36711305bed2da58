use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidValue {
        parameter: &'static str,
        reason: String,
    },
}

/// Which trajectory subdirectories to process: `start..end` minus `exclude`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrajectorySelection {
    pub start: usize,
    pub end: usize,
    pub exclude: Vec<usize>,
}

impl TrajectorySelection {
    /// Selected indices in ascending order.
    pub fn indices(&self) -> Vec<usize> {
        (self.start..self.end)
            .filter(|i| !self.exclude.contains(i))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegMode {
    /// Forward and reverse legs stitched into one series.
    Both,
    /// Only the forward leg; backward logs are never read.
    ForwardOnly,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollectConfig {
    pub pull_dir: PathBuf,
    pub selection: TrajectorySelection,
    pub forward_file: String,
    pub backward_file: String,
    /// Å/ps.
    pub pulling_speed: f64,
    /// kcal/mol/Å².
    pub force_constant: f64,
    /// Å.
    pub lambda_min: f64,
    /// Å.
    pub lambda_max: f64,
    /// K.
    pub temperature: f64,
    pub leg_mode: LegMode,
    pub trajs_per_block: usize,
    pub breakpoint: usize,
    pub output_path: PathBuf,
}

impl CollectConfig {
    pub fn forward_log(&self, index: usize) -> PathBuf {
        self.pull_dir
            .join(index.to_string())
            .join(&self.forward_file)
    }

    pub fn backward_log(&self, index: usize) -> PathBuf {
        self.pull_dir
            .join(index.to_string())
            .join(&self.backward_file)
    }
}

#[derive(Default)]
pub struct CollectConfigBuilder {
    pull_dir: Option<PathBuf>,
    selection: Option<TrajectorySelection>,
    forward_file: Option<String>,
    backward_file: Option<String>,
    pulling_speed: Option<f64>,
    force_constant: Option<f64>,
    lambda_range: Option<(f64, f64)>,
    temperature: Option<f64>,
    leg_mode: Option<LegMode>,
    trajs_per_block: Option<usize>,
    breakpoint: Option<usize>,
    output_path: Option<PathBuf>,
}

impl CollectConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pull_dir(mut self, path: PathBuf) -> Self {
        self.pull_dir = Some(path);
        self
    }
    pub fn selection(mut self, selection: TrajectorySelection) -> Self {
        self.selection = Some(selection);
        self
    }
    pub fn forward_file(mut self, name: String) -> Self {
        self.forward_file = Some(name);
        self
    }
    pub fn backward_file(mut self, name: String) -> Self {
        self.backward_file = Some(name);
        self
    }
    pub fn pulling_speed(mut self, speed: f64) -> Self {
        self.pulling_speed = Some(speed);
        self
    }
    pub fn force_constant(mut self, k: f64) -> Self {
        self.force_constant = Some(k);
        self
    }
    pub fn lambda_range(mut self, min: f64, max: f64) -> Self {
        self.lambda_range = Some((min, max));
        self
    }
    pub fn temperature(mut self, kelvin: f64) -> Self {
        self.temperature = Some(kelvin);
        self
    }
    pub fn leg_mode(mut self, mode: LegMode) -> Self {
        self.leg_mode = Some(mode);
        self
    }
    pub fn trajs_per_block(mut self, n: usize) -> Self {
        self.trajs_per_block = Some(n);
        self
    }
    pub fn breakpoint(mut self, block: usize) -> Self {
        self.breakpoint = Some(block);
        self
    }
    pub fn output_path(mut self, path: PathBuf) -> Self {
        self.output_path = Some(path);
        self
    }

    pub fn build(self) -> Result<CollectConfig, ConfigError> {
        let selection = self
            .selection
            .ok_or(ConfigError::MissingParameter("range"))?;
        if selection.start > selection.end {
            return Err(ConfigError::InvalidValue {
                parameter: "range",
                reason: format!("start {} is after end {}", selection.start, selection.end),
            });
        }

        let pulling_speed = self
            .pulling_speed
            .ok_or(ConfigError::MissingParameter("pulling_speed"))?;
        ensure_finite("pulling_speed", pulling_speed)?;
        let force_constant = self
            .force_constant
            .ok_or(ConfigError::MissingParameter("force_constant"))?;
        ensure_finite("force_constant", force_constant)?;

        let (lambda_min, lambda_max) = self
            .lambda_range
            .ok_or(ConfigError::MissingParameter("lambda_range"))?;
        ensure_finite("lambda_range", lambda_min)?;
        ensure_finite("lambda_range", lambda_max)?;

        let temperature = self
            .temperature
            .ok_or(ConfigError::MissingParameter("temperature"))?;
        if !(temperature.is_finite() && temperature > 0.0) {
            return Err(ConfigError::InvalidValue {
                parameter: "temperature",
                reason: format!("{temperature} K is not a positive temperature"),
            });
        }

        let trajs_per_block = self
            .trajs_per_block
            .ok_or(ConfigError::MissingParameter("ntrajs_per_block"))?;
        if trajs_per_block == 0 {
            return Err(ConfigError::InvalidValue {
                parameter: "ntrajs_per_block",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(CollectConfig {
            pull_dir: self
                .pull_dir
                .ok_or(ConfigError::MissingParameter("pull_dir"))?,
            selection,
            forward_file: self
                .forward_file
                .ok_or(ConfigError::MissingParameter("forward_file"))?,
            backward_file: self
                .backward_file
                .ok_or(ConfigError::MissingParameter("backward_file"))?,
            pulling_speed,
            force_constant,
            lambda_min,
            lambda_max,
            temperature,
            leg_mode: self.leg_mode.unwrap_or(LegMode::Both),
            trajs_per_block,
            breakpoint: self
                .breakpoint
                .ok_or(ConfigError::MissingParameter("f_b_breakpoint"))?,
            output_path: self
                .output_path
                .ok_or(ConfigError::MissingParameter("out"))?,
        })
    }
}

fn ensure_finite(parameter: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            parameter,
            reason: format!("{value} is not a finite number"),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompareConfig {
    pub pull_fe_pmf_dir: PathBuf,
    pub reference_dir: PathBuf,
    pub fe_nsamples: usize,
    /// Estimators whose results live in `pull_fe_pmf_dir`, in plotting order.
    pub estimators: Vec<String>,
    /// Estimator whose results live in `reference_dir`; never shifted.
    pub reference: String,
    pub out_dir: PathBuf,
    pub rmse_table: Option<PathBuf>,
}

impl CompareConfig {
    pub fn results_dir(&self, estimator: &str) -> &Path {
        if estimator == self.reference {
            &self.reference_dir
        } else {
            &self.pull_fe_pmf_dir
        }
    }
}

#[derive(Default)]
pub struct CompareConfigBuilder {
    pull_fe_pmf_dir: Option<PathBuf>,
    reference_dir: Option<PathBuf>,
    fe_nsamples: Option<usize>,
    estimators: Option<Vec<String>>,
    reference: Option<String>,
    out_dir: Option<PathBuf>,
    rmse_table: Option<PathBuf>,
}

impl CompareConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pull_fe_pmf_dir(mut self, path: PathBuf) -> Self {
        self.pull_fe_pmf_dir = Some(path);
        self
    }
    pub fn reference_dir(mut self, path: PathBuf) -> Self {
        self.reference_dir = Some(path);
        self
    }
    pub fn fe_nsamples(mut self, n: usize) -> Self {
        self.fe_nsamples = Some(n);
        self
    }
    pub fn estimators(mut self, names: Vec<String>) -> Self {
        self.estimators = Some(names);
        self
    }
    pub fn reference(mut self, name: String) -> Self {
        self.reference = Some(name);
        self
    }
    pub fn out_dir(mut self, path: PathBuf) -> Self {
        self.out_dir = Some(path);
        self
    }
    pub fn rmse_table(mut self, path: Option<PathBuf>) -> Self {
        self.rmse_table = path;
        self
    }

    pub fn build(self) -> Result<CompareConfig, ConfigError> {
        let estimators = self
            .estimators
            .ok_or(ConfigError::MissingParameter("estimators"))?;
        if estimators.is_empty() {
            return Err(ConfigError::InvalidValue {
                parameter: "estimators",
                reason: "at least one estimator is required".to_string(),
            });
        }
        let reference = self
            .reference
            .ok_or(ConfigError::MissingParameter("reference"))?;
        if estimators.contains(&reference) {
            return Err(ConfigError::InvalidValue {
                parameter: "estimators",
                reason: format!("the reference estimator '{reference}' cannot also be compared"),
            });
        }

        Ok(CompareConfig {
            pull_fe_pmf_dir: self
                .pull_fe_pmf_dir
                .ok_or(ConfigError::MissingParameter("pull_fe_pmf_dir"))?,
            reference_dir: self
                .reference_dir
                .ok_or(ConfigError::MissingParameter("us_fe_pmf_dir"))?,
            fe_nsamples: self
                .fe_nsamples
                .ok_or(ConfigError::MissingParameter("fe_nsamples"))?,
            estimators,
            reference,
            out_dir: self
                .out_dir
                .ok_or(ConfigError::MissingParameter("out_dir"))?,
            rmse_table: self.rmse_table,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_builder() -> CollectConfigBuilder {
        CollectConfigBuilder::new()
            .pull_dir(PathBuf::from("20A_per_2ns"))
            .selection(TrajectorySelection {
                start: 0,
                end: 200,
                exclude: vec![],
            })
            .forward_file("forward.force".to_string())
            .backward_file("backward.force".to_string())
            .pulling_speed(0.01)
            .force_constant(7.2)
            .lambda_range(13.0, 33.0)
            .temperature(300.0)
            .trajs_per_block(10)
            .breakpoint(10)
            .output_path(PathBuf::from("pull_data.npz"))
    }

    #[test]
    fn selection_skips_excluded_indices() {
        let selection = TrajectorySelection {
            start: 2,
            end: 8,
            exclude: vec![3, 7, 100],
        };
        assert_eq!(selection.indices(), vec![2, 4, 5, 6]);
    }

    #[test]
    fn collect_builder_produces_config_with_log_paths() {
        let config = collect_builder().build().unwrap();
        assert_eq!(config.leg_mode, LegMode::Both);
        assert_eq!(config.lambda_min, 13.0);
        assert_eq!(config.lambda_max, 33.0);
        assert_eq!(
            config.forward_log(12),
            PathBuf::from("20A_per_2ns").join("12").join("forward.force")
        );
        assert_eq!(
            config.backward_log(0),
            PathBuf::from("20A_per_2ns").join("0").join("backward.force")
        );
    }

    #[test]
    fn collect_builder_reports_missing_parameter() {
        let result = CollectConfigBuilder::new().build();
        assert_eq!(result.unwrap_err(), ConfigError::MissingParameter("range"));
    }

    #[test]
    fn collect_builder_rejects_zero_block_size() {
        let result = collect_builder().trajs_per_block(0).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                parameter: "ntrajs_per_block",
                ..
            })
        ));
    }

    #[test]
    fn collect_builder_rejects_non_positive_temperature() {
        let result = collect_builder().temperature(0.0).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                parameter: "temperature",
                ..
            })
        ));
    }

    #[test]
    fn compare_builder_rejects_reference_among_estimators() {
        let result = CompareConfigBuilder::new()
            .pull_fe_pmf_dir(PathBuf::from("pull_fe_pmf"))
            .reference_dir(PathBuf::from("us_fe_pmf"))
            .fe_nsamples(40)
            .estimators(vec!["u".to_string(), "us".to_string()])
            .reference("us".to_string())
            .out_dir(PathBuf::from("."))
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn compare_config_resolves_results_directory() {
        let config = CompareConfigBuilder::new()
            .pull_fe_pmf_dir(PathBuf::from("pull_fe_pmf"))
            .reference_dir(PathBuf::from("us_fe_pmf"))
            .fe_nsamples(40)
            .estimators(vec!["u".to_string(), "b".to_string()])
            .reference("us".to_string())
            .out_dir(PathBuf::from("."))
            .build()
            .unwrap();

        assert_eq!(config.results_dir("u"), Path::new("pull_fe_pmf"));
        assert_eq!(config.results_dir("us"), Path::new("us_fe_pmf"));
        assert_eq!(config.rmse_table, None);
    }
}
