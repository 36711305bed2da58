mod defaults;

use crate::cli::{CollectArgs, CompareArgs};
use crate::error::{CliError, Result};
use crate::utils::parser::{self, ParseError};
use defaults::DefaultsConfig;
use pullfe::engine::config::{self as core_config, LegMode, TrajectorySelection};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialCollectConfig {
    pull_dir: Option<PathBuf>,
    range: Option<[usize; 2]>,
    f_b_breakpoint: Option<usize>,
    exclude: Option<Vec<usize>>,
    pulling_speed: Option<f64>,
    force_constant: Option<f64>,
    lambda_range: Option<[f64; 2]>,
    take_only_half: Option<bool>,
    ntrajs_per_block: Option<usize>,
    out: Option<PathBuf>,
    forward_file: Option<String>,
    backward_file: Option<String>,
    temperature: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialCompareConfig {
    pull_fe_pmf_dir: Option<PathBuf>,
    us_fe_pmf_dir: Option<PathBuf>,
    fe_nsamples: Option<usize>,
    estimators: Option<Vec<String>>,
    reference: Option<String>,
    out_dir: Option<PathBuf>,
    rmse_table: Option<PathBuf>,
}

/// Contents of a TOML configuration file; both tables are optional.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialConfigFile {
    collect: Option<PartialCollectConfig>,
    compare: Option<PartialCompareConfig>,
}

impl PartialConfigFile {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Reads `path` when given, otherwise starts from an empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn merge_collect(mut self, args: &CollectArgs) -> Result<core_config::CollectConfig> {
        self.apply_set_values(&args.set_values)?;
        let file = self.collect.take().unwrap_or_default();
        let defaults = DefaultsConfig::default();

        let (start, end) = match &args.range {
            Some(s) => parser::parse_index_range(s).map_err(argument_error)?,
            None => file.range.map(|[a, b]| (a, b)).unwrap_or(defaults.range),
        };
        let exclude = match &args.exclude {
            Some(s) => parser::parse_index_list(s).map_err(argument_error)?,
            None => file.exclude.unwrap_or_default(),
        };
        let (lambda_min, lambda_max) = match &args.lambda_range {
            Some(s) => parser::parse_lambda_range(s).map_err(argument_error)?,
            None => file
                .lambda_range
                .map(|[a, b]| (a, b))
                .unwrap_or(defaults.lambda_range),
        };
        let leg_mode = if args.take_only_half || file.take_only_half.unwrap_or(false) {
            LegMode::ForwardOnly
        } else {
            LegMode::Both
        };

        core_config::CollectConfigBuilder::new()
            .pull_dir(
                args.pull_dir
                    .clone()
                    .or(file.pull_dir)
                    .unwrap_or(defaults.pull_dir),
            )
            .selection(TrajectorySelection {
                start,
                end,
                exclude,
            })
            .forward_file(
                args.forward_file
                    .clone()
                    .or(file.forward_file)
                    .unwrap_or(defaults.forward_file),
            )
            .backward_file(
                args.backward_file
                    .clone()
                    .or(file.backward_file)
                    .unwrap_or(defaults.backward_file),
            )
            .pulling_speed(
                args.pulling_speed
                    .or(file.pulling_speed)
                    .unwrap_or(defaults.pulling_speed),
            )
            .force_constant(
                args.force_constant
                    .or(file.force_constant)
                    .unwrap_or(defaults.force_constant),
            )
            .lambda_range(lambda_min, lambda_max)
            .temperature(
                args.temperature
                    .or(file.temperature)
                    .unwrap_or(defaults.temperature),
            )
            .leg_mode(leg_mode)
            .trajs_per_block(
                args.ntrajs_per_block
                    .or(file.ntrajs_per_block)
                    .unwrap_or(defaults.ntrajs_per_block),
            )
            .breakpoint(
                args.f_b_breakpoint
                    .or(file.f_b_breakpoint)
                    .unwrap_or(defaults.f_b_breakpoint),
            )
            .output_path(args.out.clone().or(file.out).unwrap_or(defaults.out))
            .build()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    pub fn merge_compare(mut self, args: &CompareArgs) -> Result<core_config::CompareConfig> {
        self.apply_set_values(&args.set_values)?;
        let file = self.compare.take().unwrap_or_default();
        let defaults = DefaultsConfig::default();

        let estimators = match &args.estimators {
            Some(s) => parser::parse_name_list(s).map_err(argument_error)?,
            None => file.estimators.unwrap_or(defaults.estimators),
        };

        core_config::CompareConfigBuilder::new()
            .pull_fe_pmf_dir(
                args.pull_fe_pmf_dir
                    .clone()
                    .or(file.pull_fe_pmf_dir)
                    .unwrap_or(defaults.pull_fe_pmf_dir),
            )
            .reference_dir(
                args.us_fe_pmf_dir
                    .clone()
                    .or(file.us_fe_pmf_dir)
                    .unwrap_or(defaults.us_fe_pmf_dir),
            )
            .fe_nsamples(
                args.fe_nsamples
                    .or(file.fe_nsamples)
                    .unwrap_or(defaults.fe_nsamples),
            )
            .estimators(estimators)
            .reference(
                args.reference
                    .clone()
                    .or(file.reference)
                    .unwrap_or(defaults.reference),
            )
            .out_dir(
                args.out_dir
                    .clone()
                    .or(file.out_dir)
                    .unwrap_or(defaults.out_dir),
            )
            .rmse_table(args.rmse_table.clone().or(file.rmse_table))
            .build()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            if let Some(field) = key.strip_prefix("collect.") {
                let collect = self.collect.get_or_insert_with(Default::default);
                match field {
                    "pull-dir" => collect.pull_dir = Some(PathBuf::from(value_str)),
                    "range" => {
                        let (a, b) = parse_with(key, value_str, parser::parse_index_range)?;
                        collect.range = Some([a, b]);
                    }
                    "exclude" => {
                        collect.exclude =
                            Some(parse_with(key, value_str, parser::parse_index_list)?)
                    }
                    "f-b-breakpoint" => collect.f_b_breakpoint = Some(parse_set(key, value_str)?),
                    "pulling-speed" => collect.pulling_speed = Some(parse_set(key, value_str)?),
                    "force-constant" => collect.force_constant = Some(parse_set(key, value_str)?),
                    "lambda-range" => {
                        let (a, b) = parse_with(key, value_str, parser::parse_lambda_range)?;
                        collect.lambda_range = Some([a, b]);
                    }
                    "take-only-half" => collect.take_only_half = Some(parse_set(key, value_str)?),
                    "ntrajs-per-block" => {
                        collect.ntrajs_per_block = Some(parse_set(key, value_str)?)
                    }
                    "out" => collect.out = Some(PathBuf::from(value_str)),
                    "forward-file" => collect.forward_file = Some(value_str.to_string()),
                    "backward-file" => collect.backward_file = Some(value_str.to_string()),
                    "temperature" => collect.temperature = Some(parse_set(key, value_str)?),
                    _ => return Err(unsupported_key(key)),
                }
            } else if let Some(field) = key.strip_prefix("compare.") {
                let compare = self.compare.get_or_insert_with(Default::default);
                match field {
                    "pull-fe-pmf-dir" => compare.pull_fe_pmf_dir = Some(PathBuf::from(value_str)),
                    "us-fe-pmf-dir" => compare.us_fe_pmf_dir = Some(PathBuf::from(value_str)),
                    "fe-nsamples" => compare.fe_nsamples = Some(parse_set(key, value_str)?),
                    "estimators" => {
                        compare.estimators =
                            Some(parse_with(key, value_str, parser::parse_name_list)?)
                    }
                    "reference" => compare.reference = Some(value_str.to_string()),
                    "out-dir" => compare.out_dir = Some(PathBuf::from(value_str)),
                    "rmse-table" => compare.rmse_table = Some(PathBuf::from(value_str)),
                    _ => return Err(unsupported_key(key)),
                }
            } else {
                return Err(unsupported_key(key));
            }
        }
        Ok(())
    }
}

fn parse_set<T: FromStr>(key: &str, value_str: &str) -> Result<T> {
    value_str.parse().map_err(|_| {
        CliError::Config(format!("Invalid value for {}: {}", key, value_str))
    })
}

fn parse_with<T>(
    key: &str,
    value_str: &str,
    parse: fn(&str) -> std::result::Result<T, ParseError>,
) -> Result<T> {
    parse(value_str).map_err(|e| CliError::Config(format!("Invalid value for {}: {}", key, e)))
}

fn unsupported_key(key: &str) -> CliError {
    CliError::Config(format!(
        "Unsupported configuration key for --set: '{}'",
        key
    ))
}

fn argument_error(e: ParseError) -> CliError {
    CliError::Argument(e.to_string())
}
