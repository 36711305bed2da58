use crate::core::models::curve::{FreeEnergyCurve, PmfCurve};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResultLoadError {
    #[error("File I/O error for '{path}': {source}", path = path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("JSON parsing error for '{path}': {source}", path = path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Inconsistent record '{path}': {message}", path = path.display())]
    Inconsistent { path: PathBuf, message: String },
}

/// On-disk form of a free-energy estimate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FreeEnergyRecord {
    pub lambdas: Vec<f64>,
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub replicates: BTreeMap<String, Vec<f64>>,
}

/// On-disk form of a PMF estimate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PmfRecord {
    pub pmf_bin_edges: Vec<f64>,
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
    pub pmfs: BTreeMap<String, Vec<f64>>,
}

pub fn free_energy_file_name(estimator: &str) -> String {
    format!("fe_{estimator}.json")
}

pub fn pmf_file_name(estimator: &str) -> String {
    format!("pmf_{estimator}.json")
}

impl FreeEnergyRecord {
    fn validate(&self) -> Result<(), String> {
        let n = self.lambdas.len();
        if n == 0 {
            return Err("'lambdas' is empty".to_string());
        }
        check_len("mean", self.mean.len(), n)?;
        check_len("std", self.std.len(), n)?;
        for (id, curve) in &self.replicates {
            check_len(&format!("replicate '{id}'"), curve.len(), n)?;
        }
        Ok(())
    }
}

impl PmfRecord {
    fn validate(&self) -> Result<(), String> {
        if self.pmf_bin_edges.len() < 2 {
            return Err("'pmf_bin_edges' needs at least two edges".to_string());
        }
        let n = self.pmf_bin_edges.len() - 1;
        check_len("mean", self.mean.len(), n)?;
        check_len("std", self.std.len(), n)?;
        for (id, curve) in &self.pmfs {
            check_len(&format!("replicate '{id}'"), curve.len(), n)?;
        }
        Ok(())
    }
}

fn check_len(field: &str, found: usize, expected: usize) -> Result<(), String> {
    if found != expected {
        Err(format!("'{field}' has {found} values, expected {expected}"))
    } else {
        Ok(())
    }
}

impl From<FreeEnergyRecord> for FreeEnergyCurve {
    fn from(r: FreeEnergyRecord) -> Self {
        Self {
            lambdas: Array1::from(r.lambdas),
            mean: Array1::from(r.mean),
            std: Array1::from(r.std),
            replicates: r
                .replicates
                .into_iter()
                .map(|(k, v)| (k, Array1::from(v)))
                .collect(),
        }
    }
}

impl From<PmfRecord> for PmfCurve {
    fn from(r: PmfRecord) -> Self {
        Self {
            bin_edges: Array1::from(r.pmf_bin_edges),
            mean: Array1::from(r.mean),
            std: Array1::from(r.std),
            replicates: r
                .pmfs
                .into_iter()
                .map(|(k, v)| (k, Array1::from(v)))
                .collect(),
        }
    }
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, ResultLoadError> {
    let file = File::open(path).map_err(|source| ResultLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| ResultLoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_free_energy(path: &Path) -> Result<FreeEnergyCurve, ResultLoadError> {
    let record: FreeEnergyRecord = read_json(path)?;
    record
        .validate()
        .map_err(|message| ResultLoadError::Inconsistent {
            path: path.to_path_buf(),
            message,
        })?;
    Ok(record.into())
}

pub fn load_pmf(path: &Path) -> Result<PmfCurve, ResultLoadError> {
    let record: PmfRecord = read_json(path)?;
    record
        .validate()
        .map_err(|message| ResultLoadError::Inconsistent {
            path: path.to_path_buf(),
            message,
        })?;
    Ok(record.into())
}

/// Writes a record as pretty-printed JSON, the format the loaders accept.
pub fn write_record<T: Serialize>(record: &T, path: &Path) -> Result<(), ResultLoadError> {
    let io_err = |source| ResultLoadError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, record).map_err(|source| ResultLoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(io_err)
}
