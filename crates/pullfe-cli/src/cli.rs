use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "pullfe - Work accumulation and PMF comparison for steered molecular dynamics pulling simulations.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Accumulate work from forward/backward force logs and write the batched dataset.
    Collect(CollectArgs),
    /// Align estimator PMFs onto the reference and plot free energies, PMFs and RMSE.
    Compare(CompareArgs),
}

/// Arguments for the `collect` subcommand.
#[derive(Args, Debug)]
pub struct CollectArgs {
    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Input Selection ---
    /// Root directory holding one subdirectory per trajectory index.
    #[arg(long, alias = "pull_dir", value_name = "PATH")]
    pub pull_dir: Option<PathBuf>,

    /// Trajectory index range "START END" (end excluded).
    #[arg(long, value_name = "\"START END\"")]
    pub range: Option<String>,

    /// Whitespace-separated trajectory indices to skip, e.g. "3 7 11".
    #[arg(long, value_name = "\"I J ...\"")]
    pub exclude: Option<String>,

    /// File name of the forward force log inside each trajectory directory.
    #[arg(long, value_name = "NAME")]
    pub forward_file: Option<String>,

    /// File name of the backward force log inside each trajectory directory.
    #[arg(long, value_name = "NAME")]
    pub backward_file: Option<String>,

    /// Only use the forward leg; backward logs are not read.
    #[arg(long, alias = "take_only_half")]
    pub take_only_half: bool,

    // --- Protocol ---
    /// Pulling speed in Å/ps.
    #[arg(
        long,
        alias = "pulling_speed",
        value_name = "FLOAT",
        allow_negative_numbers = true
    )]
    pub pulling_speed: Option<f64>,

    /// Harmonic restraint constant in kcal/mol/Å².
    #[arg(
        long,
        alias = "force_constant",
        value_name = "FLOAT",
        allow_negative_numbers = true
    )]
    pub force_constant: Option<f64>,

    /// Lambda bounds "MIN MAX" in Å.
    #[arg(
        long,
        alias = "lambda_range",
        value_name = "\"MIN MAX\"",
        allow_hyphen_values = true
    )]
    pub lambda_range: Option<String>,

    /// Temperature in kelvin used for the reduced units.
    #[arg(long, value_name = "KELVIN")]
    pub temperature: Option<f64>,

    // --- Output ---
    /// Number of trajectories per block (repeat).
    #[arg(long, alias = "ntrajs_per_block", value_name = "INT")]
    pub ntrajs_per_block: Option<usize>,

    /// Block index at which the output switches from the forward to the reverse group.
    #[arg(long, alias = "f_b_breakpoint", value_name = "INT")]
    pub f_b_breakpoint: Option<usize>,

    /// Output dataset path (.npz).
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S collect.pulling-speed=0.02
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `compare` subcommand.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory with the pulling estimators' free-energy and PMF records.
    #[arg(long, alias = "pull_fe_pmf_dir", value_name = "PATH")]
    pub pull_fe_pmf_dir: Option<PathBuf>,

    /// Directory with the reference estimator's records.
    #[arg(long, alias = "us_fe_pmf_dir", value_name = "PATH")]
    pub us_fe_pmf_dir: Option<PathBuf>,

    /// Number of points drawn per free-energy curve (half of it for the reference).
    #[arg(long, alias = "fe_nsamples", value_name = "INT")]
    pub fe_nsamples: Option<usize>,

    /// Whitespace-separated estimator names, in plotting order, e.g. "u b s1 s2".
    #[arg(long, value_name = "\"NAME ...\"")]
    pub estimators: Option<String>,

    /// Name of the reference estimator.
    #[arg(long, value_name = "NAME")]
    pub reference: Option<String>,

    /// Directory the figures are written to.
    #[arg(long, value_name = "PATH")]
    pub out_dir: Option<PathBuf>,

    /// Also write the per-bin RMSE curves to this CSV file.
    #[arg(long, value_name = "PATH")]
    pub rmse_table: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S compare.fe-nsamples=60
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}
