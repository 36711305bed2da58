use super::AnalysisError;
use ndarray::{Array1, ArrayView1, Zip};

/// Root-mean-square error of a set of replicate curves against a reference, per bin.
///
/// For every bin `j`, returns `sqrt(mean_r (replicate_r[j] - reference[j])^2)`. The
/// result has the length of `reference`.
pub fn rmse_per_bin<'a, I>(replicates: I, reference: ArrayView1<f64>) -> Result<Array1<f64>, AnalysisError>
where
    I: IntoIterator<Item = ArrayView1<'a, f64>>,
{
    let mut sum_sq = Array1::<f64>::zeros(reference.len());
    let mut count = 0usize;

    for replicate in replicates {
        if replicate.len() != reference.len() {
            return Err(AnalysisError::ShapeMismatch {
                context: "rmse replicate",
                expected: reference.len(),
                found: replicate.len(),
            });
        }
        Zip::from(&mut sum_sq)
            .and(&replicate)
            .and(&reference)
            .for_each(|acc, &est, &truth| {
                let d = est - truth;
                *acc += d * d;
            });
        count += 1;
    }

    if count == 0 {
        return Err(AnalysisError::EmptyCurve(
            "rmse requires at least one replicate".to_string(),
        ));
    }

    let n = count as f64;
    Ok(sum_sq.mapv_into(|s| (s / n).sqrt()))
}

/// Selects `nsamples` evenly spaced entries of `data`, always keeping both ends.
///
/// Index `i` of the result is `data[round(i × (len - 1) / (nsamples - 1))]`. A
/// request for zero samples yields an empty array and a request for one sample
/// yields the first entry. `nsamples` must be smaller than `data.len()`.
pub fn equal_stride_subsample(
    data: ArrayView1<f64>,
    nsamples: usize,
) -> Result<Array1<f64>, AnalysisError> {
    let len = data.len();
    if nsamples >= len {
        return Err(AnalysisError::Subsample {
            requested: nsamples,
            available: len,
        });
    }

    Ok(match nsamples {
        0 => Array1::zeros(0),
        1 => Array1::from_elem(1, data[0]),
        _ => {
            let stride = (len - 1) as f64 / (nsamples - 1) as f64;
            (0..nsamples)
                .map(|i| data[(i as f64 * stride).round() as usize])
                .collect()
        }
    })
}

/// Midpoints of consecutive bin edges.
pub fn bin_centers(edges: ArrayView1<f64>) -> Array1<f64> {
    if edges.len() < 2 {
        return Array1::zeros(0);
    }
    (0..edges.len() - 1)
        .map(|i| 0.5 * (edges[i] + edges[i + 1]))
        .collect()
}
