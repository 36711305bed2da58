use pullfe::core::units::DEFAULT_TEMPERATURE_K;
use std::path::PathBuf;

/// Built-in values used when neither the CLI, `--set` nor the config file supply one.
pub struct DefaultsConfig {
    pub pull_dir: PathBuf,
    pub range: (usize, usize),
    pub f_b_breakpoint: usize,
    pub pulling_speed: f64,
    pub force_constant: f64,
    pub lambda_range: (f64, f64),
    pub ntrajs_per_block: usize,
    pub out: PathBuf,
    pub forward_file: String,
    pub backward_file: String,
    pub temperature: f64,

    pub pull_fe_pmf_dir: PathBuf,
    pub us_fe_pmf_dir: PathBuf,
    pub fe_nsamples: usize,
    pub estimators: Vec<String>,
    pub reference: String,
    pub out_dir: PathBuf,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            pull_dir: PathBuf::from("20A_per_2ns"),
            range: (0, 200),
            f_b_breakpoint: 10,
            pulling_speed: 0.01,
            force_constant: 7.2,
            lambda_range: (13.0, 33.0),
            ntrajs_per_block: 10,
            out: PathBuf::from("pull_data.npz"),
            forward_file: "forward.force".to_string(),
            backward_file: "backward.force".to_string(),
            temperature: DEFAULT_TEMPERATURE_K,

            pull_fe_pmf_dir: PathBuf::from("pull_fe_pmf"),
            us_fe_pmf_dir: PathBuf::from("us_fe_pmf"),
            fe_nsamples: 40,
            estimators: ["u", "b", "s1", "s2"].map(String::from).to_vec(),
            reference: "us".to_string(),
            out_dir: PathBuf::from("."),
        }
    }
}
