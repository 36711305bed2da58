use ndarray::Array1;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("CSV writing error for '{path}': {source}", path = path.display())]
    Csv { path: PathBuf, source: csv::Error },
    #[error("Column '{column}' has {found} rows, expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        found: usize,
    },
}

/// Writes a per-bin table: the `bin_center` column followed by one column per curve.
///
/// Every column must have one value per bin center. CSV failures carry an empty
/// path; [`write_to_path`] fills it in.
pub fn write_to<W: Write>(
    writer: W,
    bin_centers: &Array1<f64>,
    columns: &[(String, Array1<f64>)],
) -> Result<(), TableError> {
    check_columns(bin_centers, columns)?;

    let csv_err = |source| TableError::Csv {
        path: PathBuf::new(),
        source,
    };
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["bin_center".to_string()];
    header.extend(columns.iter().map(|(name, _)| name.clone()));
    wtr.write_record(&header).map_err(csv_err)?;

    for (row, center) in bin_centers.iter().enumerate() {
        let mut record = Vec::with_capacity(columns.len() + 1);
        record.push(center.to_string());
        record.extend(columns.iter().map(|(_, values)| values[row].to_string()));
        wtr.write_record(&record).map_err(csv_err)?;
    }
    wtr.flush().map_err(|e| csv_err(csv::Error::from(e)))?;
    Ok(())
}

pub fn write_to_path(
    path: &Path,
    bin_centers: &Array1<f64>,
    columns: &[(String, Array1<f64>)],
) -> Result<(), TableError> {
    check_columns(bin_centers, columns)?;

    let file = std::fs::File::create(path).map_err(|e| TableError::Csv {
        path: path.to_path_buf(),
        source: csv::Error::from(e),
    })?;
    write_to(file, bin_centers, columns).map_err(|e| match e {
        TableError::Csv { source, .. } => TableError::Csv {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })
}

fn check_columns(
    bin_centers: &Array1<f64>,
    columns: &[(String, Array1<f64>)],
) -> Result<(), TableError> {
    match columns
        .iter()
        .find(|(_, values)| values.len() != bin_centers.len())
    {
        Some((name, values)) => Err(TableError::ColumnLength {
            column: name.clone(),
            expected: bin_centers.len(),
            found: values.len(),
        }),
        None => Ok(()),
    }
}
