use super::AnalysisError;
use crate::core::models::curve::PmfCurve;
use ndarray::{Array1, ArrayView1};
use tracing::debug;

const GRID_RELATIVE_TOLERANCE: f64 = 1e-9;

/// Index of the first minimum of `values`, ignoring NaN entries.
pub fn argmin(values: ArrayView1<f64>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if !(v < b) => {}
            _ if v.is_nan() => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Constant that makes `candidate` coincide with `target` at the target's minimum.
///
/// Both curves must be defined on the same grid and have the same length.
pub fn alignment_offset(
    candidate: ArrayView1<f64>,
    target: ArrayView1<f64>,
) -> Result<f64, AnalysisError> {
    if candidate.len() != target.len() {
        return Err(AnalysisError::ShapeMismatch {
            context: "pmf alignment",
            expected: target.len(),
            found: candidate.len(),
        });
    }
    let index = argmin(target).ok_or_else(|| {
        AnalysisError::EmptyCurve("alignment target has no finite values".to_string())
    })?;
    Ok(target[index] - candidate[index])
}

/// Returns `candidate` shifted so that it equals `target` at the target's minimum.
pub fn transform_pmf(
    candidate: ArrayView1<f64>,
    target: ArrayView1<f64>,
) -> Result<Array1<f64>, AnalysisError> {
    let offset = alignment_offset(candidate, target)?;
    Ok(candidate.mapv(|v| v + offset))
}

/// Checks that two PMF grids have the same bin edges.
pub fn ensure_same_grid(
    estimator: &str,
    candidate: ArrayView1<f64>,
    reference: ArrayView1<f64>,
) -> Result<(), AnalysisError> {
    if candidate.len() != reference.len() {
        return Err(AnalysisError::ShapeMismatch {
            context: "pmf bin edges",
            expected: reference.len(),
            found: candidate.len(),
        });
    }
    for (index, (&c, &r)) in candidate.iter().zip(reference.iter()).enumerate() {
        let scale = c.abs().max(r.abs()).max(1.0);
        if (c - r).abs() > GRID_RELATIVE_TOLERANCE * scale {
            return Err(AnalysisError::GridMismatch {
                estimator: estimator.to_string(),
                index,
            });
        }
    }
    Ok(())
}

/// Shifts an estimator's PMF onto the reference PMF.
///
/// The offset is computed once from the mean curves and applied to the mean and to
/// every replicate curve, preserving the spread between replicates. Returns the
/// applied offset.
pub fn align_pmf(
    estimator: &str,
    candidate: &mut PmfCurve,
    reference: &PmfCurve,
) -> Result<f64, AnalysisError> {
    ensure_same_grid(estimator, candidate.bin_edges.view(), reference.bin_edges.view())?;
    for curve in candidate.replicates.values() {
        if curve.len() != candidate.mean.len() {
            return Err(AnalysisError::ShapeMismatch {
                context: "pmf replicate",
                expected: candidate.mean.len(),
                found: curve.len(),
            });
        }
    }

    let offset = alignment_offset(candidate.mean.view(), reference.mean.view())?;
    debug!(estimator, offset, "Aligning PMF onto reference minimum.");
    candidate.shift(offset);
    Ok(offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::collections::BTreeMap;

    fn pmf(edges: Array1<f64>, mean: Array1<f64>, replicates: &[(&str, Array1<f64>)]) -> PmfCurve {
        PmfCurve {
            std: Array1::zeros(mean.len()),
            bin_edges: edges,
            mean,
            replicates: replicates
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn argmin_returns_first_minimum_and_skips_nan() {
        assert_eq!(argmin(array![3.0, 1.0, 1.0, 2.0].view()), Some(1));
        assert_eq!(argmin(array![f64::NAN, 2.0, 0.5].view()), Some(2));
        assert_eq!(argmin(Array1::<f64>::zeros(0).view()), None);
        assert_eq!(argmin(array![f64::NAN].view()), None);
    }

    #[test]
    fn transform_matches_target_at_its_minimum() {
        let target = array![2.0, 0.5, 1.0, 3.0];
        let candidate = array![5.0, 4.0, 3.0, 6.0];
        let transformed = transform_pmf(candidate.view(), target.view()).unwrap();

        assert_eq!(transformed[1], target[1]);
        assert_eq!(transformed.to_vec(), vec![1.5, 0.5, -0.5, 2.5]);
    }

    #[test]
    fn realigning_an_aligned_curve_adds_no_shift() {
        let target = array![2.0, 0.5, 1.0, 3.0];
        let candidate = array![7.0, 9.0, 8.0, 1.0];
        let once = transform_pmf(candidate.view(), target.view()).unwrap();

        assert_eq!(alignment_offset(once.view(), target.view()).unwrap(), 0.0);
        let twice = transform_pmf(once.view(), target.view()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn transform_rejects_length_mismatch() {
        let result = transform_pmf(array![1.0, 2.0].view(), array![1.0, 2.0, 3.0].view());
        assert!(matches!(result, Err(AnalysisError::ShapeMismatch { .. })));
    }

    #[test]
    fn align_pmf_applies_one_offset_to_mean_and_replicates() {
        let edges = array![0.0, 0.1, 0.2, 0.3];
        let reference = pmf(edges.clone(), array![1.0, 0.0, 2.0], &[]);
        let mut candidate = pmf(
            edges,
            array![4.0, 3.0, 5.0],
            &[("0", array![4.5, 2.0, 5.5]), ("1", array![3.5, 4.0, 4.5])],
        );

        let offset = align_pmf("u", &mut candidate, &reference).unwrap();

        assert_eq!(offset, -3.0);
        assert_eq!(candidate.mean.to_vec(), vec![1.0, 0.0, 2.0]);
        assert_eq!(candidate.replicates["0"].to_vec(), vec![1.5, -1.0, 2.5]);
        assert_eq!(candidate.replicates["1"].to_vec(), vec![0.5, 1.0, 1.5]);
        assert_eq!(reference.mean.to_vec(), vec![1.0, 0.0, 2.0]);
    }

    #[test]
    fn align_pmf_rejects_different_grid() {
        let reference = pmf(array![0.0, 0.1, 0.2], array![1.0, 0.0], &[]);
        let mut candidate = pmf(array![0.0, 0.15, 0.2], array![1.0, 0.0], &[]);

        let err = align_pmf("s1", &mut candidate, &reference).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::GridMismatch {
                estimator: "s1".to_string(),
                index: 1
            }
        );
        assert_eq!(candidate.mean.to_vec(), vec![1.0, 0.0]);
    }

    #[test]
    fn align_pmf_rejects_replicate_of_wrong_length() {
        let edges = array![0.0, 0.1, 0.2];
        let reference = pmf(edges.clone(), array![1.0, 0.0], &[]);
        let mut candidate = pmf(edges, array![1.0, 0.0], &[("0", array![1.0])]);
        assert!(matches!(
            align_pmf("b", &mut candidate, &reference),
            Err(AnalysisError::ShapeMismatch { context: "pmf replicate", .. })
        ));
    }
}
