use crate::core::models::trajectory::PullingRecord;
use ndarray::Array1;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

const EXPECTED_COLUMNS: usize = 3;

#[derive(Debug, Error)]
pub enum ForceLogError {
    #[error("File I/O error for '{path}': {source}", path = path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: ForceLogParseErrorKind,
    },
    #[error("Force log '{path}' contains no samples", path = path.display())]
    Empty { path: PathBuf },
}

#[derive(Debug, Error, PartialEq)]
pub enum ForceLogParseErrorKind {
    #[error("Expected {expected} columns (time, position, force), found {found}")]
    ColumnCount { expected: usize, found: usize },
    #[error("Invalid float in column {column} (value: '{value}')")]
    InvalidFloat { column: usize, value: String },
}

/// Reads a pulling force log: one `time position force` row per sampled step.
///
/// Blank lines and lines starting with `#` are skipped.
pub fn read_from(reader: &mut impl BufRead) -> Result<PullingRecord, ForceLogError> {
    let mut times = Vec::new();
    let mut positions = Vec::new();
    let mut forces = Vec::new();

    for (line_num, line_res) in reader.lines().enumerate() {
        let line = line_res.map_err(|e| ForceLogError::Io {
            path: PathBuf::new(),
            source: e,
        })?;
        let line_num = line_num + 1;

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        if fields.len() != EXPECTED_COLUMNS {
            return Err(ForceLogError::Parse {
                line: line_num,
                kind: ForceLogParseErrorKind::ColumnCount {
                    expected: EXPECTED_COLUMNS,
                    found: fields.len(),
                },
            });
        }

        let mut row = [0.0f64; EXPECTED_COLUMNS];
        for (column, (slot, field)) in row.iter_mut().zip(&fields).enumerate() {
            *slot = field.parse().map_err(|_| ForceLogError::Parse {
                line: line_num,
                kind: ForceLogParseErrorKind::InvalidFloat {
                    column: column + 1,
                    value: field.to_string(),
                },
            })?;
        }

        times.push(row[0]);
        positions.push(row[1]);
        forces.push(row[2]);
    }

    Ok(PullingRecord {
        times: Array1::from(times),
        positions: Array1::from(positions),
        forces: Array1::from(forces),
    })
}

pub fn read_from_path(path: &Path) -> Result<PullingRecord, ForceLogError> {
    let file = File::open(path).map_err(|e| ForceLogError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut reader = BufReader::new(file);
    let record = read_from(&mut reader).map_err(|e| match e {
        ForceLogError::Io { source, .. } => ForceLogError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;

    if record.is_empty() {
        return Err(ForceLogError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(record)
}
