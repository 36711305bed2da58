use crate::core::models::dataset::PullDataset;
use ndarray::{Array1, Array3, Ix1, Ix3, OwnedRepr, arr1};
use ndarray_npy::{NpzReader, NpzWriter, ReadNpzError, WriteNpzError};
use std::fs::File;
use std::io::{self, BufWriter, Read, Seek, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DT: &str = "dt";
pub const PULLING_TIMES: &str = "pulling_times";
pub const KS: &str = "ks";
pub const LAMBDA_F: &str = "lambda_F";
pub const LAMBDA_R: &str = "lambda_R";
pub const W_F: &str = "wF_t";
pub const Z_F: &str = "zF_t";
pub const W_R: &str = "wR_t";
pub const Z_R: &str = "zR_t";

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("File I/O error for '{path}': {source}", path = path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("Failed to write array '{name}': {source}")]
    Write {
        name: &'static str,
        source: WriteNpzError,
    },
    #[error("Failed to read array '{name}': {source}")]
    Read {
        name: &'static str,
        source: ReadNpzError,
    },
    #[error("Scalar field '{0}' must hold exactly one value")]
    NotScalar(&'static str),
}

/// Writes the dataset as a NumPy `.npz` archive with one array per field.
///
/// Scalars (`dt`, `ks`) are stored as one-element arrays.
pub fn write_to<W: Write + Seek>(dataset: &PullDataset, writer: W) -> Result<W, DatasetError> {
    let mut npz = NpzWriter::new(writer);

    let put1 = |npz: &mut NpzWriter<W>, name: &'static str, array: &Array1<f64>| {
        npz.add_array(name, array)
            .map_err(|source| DatasetError::Write { name, source })
    };
    put1(&mut npz, DT, &arr1(&[dataset.dt]))?;
    put1(&mut npz, PULLING_TIMES, &dataset.pulling_times)?;
    put1(&mut npz, KS, &arr1(&[dataset.ks]))?;
    put1(&mut npz, LAMBDA_F, &dataset.lambda_f)?;
    put1(&mut npz, LAMBDA_R, &dataset.lambda_r)?;

    let put3 = |npz: &mut NpzWriter<W>, name: &'static str, array: &Array3<f64>| {
        npz.add_array(name, array)
            .map_err(|source| DatasetError::Write { name, source })
    };
    put3(&mut npz, W_F, &dataset.w_f)?;
    put3(&mut npz, Z_F, &dataset.z_f)?;
    put3(&mut npz, W_R, &dataset.w_r)?;
    put3(&mut npz, Z_R, &dataset.z_r)?;

    npz.finish().map_err(|source| DatasetError::Write {
        name: "archive",
        source,
    })
}

pub fn write_to_path(dataset: &PullDataset, path: &Path) -> Result<(), DatasetError> {
    let io_err = |source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_err)?;
    let mut writer = write_to(dataset, BufWriter::new(file))?;
    writer.flush().map_err(io_err)
}

pub fn read_from<R: Read + Seek>(reader: R) -> Result<PullDataset, DatasetError> {
    let mut npz = NpzReader::new(reader).map_err(|source| DatasetError::Read {
        name: "archive",
        source,
    })?;

    let mut get1 = |name: &'static str| -> Result<Array1<f64>, DatasetError> {
        npz.by_name::<OwnedRepr<f64>, Ix1>(name)
            .map_err(|source| DatasetError::Read { name, source })
    };
    let dt = scalar(DT, get1(DT)?)?;
    let pulling_times = get1(PULLING_TIMES)?;
    let ks = scalar(KS, get1(KS)?)?;
    let lambda_f = get1(LAMBDA_F)?;
    let lambda_r = get1(LAMBDA_R)?;

    let mut get3 = |name: &'static str| -> Result<Array3<f64>, DatasetError> {
        npz.by_name::<OwnedRepr<f64>, Ix3>(name)
            .map_err(|source| DatasetError::Read { name, source })
    };
    Ok(PullDataset {
        dt,
        pulling_times,
        ks,
        lambda_f,
        lambda_r,
        w_f: get3(W_F)?,
        z_f: get3(Z_F)?,
        w_r: get3(W_R)?,
        z_r: get3(Z_R)?,
    })
}

pub fn read_from_path(path: &Path) -> Result<PullDataset, DatasetError> {
    let file = File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_from(file)
}

fn scalar(name: &'static str, array: Array1<f64>) -> Result<f64, DatasetError> {
    match array.as_slice() {
        Some([value]) => Ok(*value),
        _ => Err(DatasetError::NotScalar(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn sample_dataset() -> PullDataset {
        PullDataset {
            dt: 0.5,
            pulling_times: array![0.0, 0.5, 1.0],
            ks: 1207.7,
            lambda_f: array![1.3, 1.4, 1.5],
            lambda_r: array![1.3, 1.4, 1.5],
            w_f: Array3::from_shape_fn((2, 2, 3), |(r, t, s)| (r * 6 + t * 3 + s) as f64),
            z_f: Array3::from_elem((2, 2, 3), 1.3),
            w_r: Array3::zeros((0, 2, 3)),
            z_r: Array3::zeros((0, 2, 3)),
        }
    }

    #[test]
    fn written_archive_contains_every_field() {
        let dataset = sample_dataset();
        let buffer = write_to(&dataset, Cursor::new(Vec::new())).unwrap();

        let mut npz = NpzReader::new(Cursor::new(buffer.into_inner())).unwrap();
        let mut names = npz.names().unwrap();
        names.sort();
        assert_eq!(
            names,
            vec![
                "dt", "ks", "lambda_F", "lambda_R", "pulling_times", "wF_t", "wR_t", "zF_t",
                "zR_t"
            ]
        );
    }

    #[test]
    fn archive_written_to_path_reads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pull_data.npz");
        let dataset = sample_dataset();

        write_to_path(&dataset, &path).unwrap();
        let loaded = read_from_path(&path).unwrap();

        assert_eq!(loaded, dataset);
        assert_eq!(loaded.w_f[[1, 1, 2]], 11.0);
        assert_eq!(loaded.w_r.shape(), &[0, 2, 3]);
    }

    #[test]
    fn write_to_path_reports_unwritable_location() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("pull_data.npz");
        assert!(matches!(
            write_to_path(&sample_dataset(), &path),
            Err(DatasetError::Io { .. })
        ));
    }
}
