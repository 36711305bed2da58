use ndarray::Array1;
use std::collections::BTreeMap;

/// Free energy as a function of the pulling coordinate for one estimator.
///
/// `mean` and `std` are defined on `lambdas`. `replicates` optionally holds the
/// estimate of each independent repeat, keyed by replicate id.
#[derive(Debug, Clone, PartialEq)]
pub struct FreeEnergyCurve {
    pub lambdas: Array1<f64>,
    pub mean: Array1<f64>,
    pub std: Array1<f64>,
    pub replicates: BTreeMap<String, Array1<f64>>,
}

/// Potential of mean force over a spatial coordinate for one estimator.
///
/// The curve is sampled on the bins delimited by `bin_edges`, so `mean`, `std`
/// and every replicate curve have `bin_edges.len() - 1` entries.
#[derive(Debug, Clone, PartialEq)]
pub struct PmfCurve {
    pub bin_edges: Array1<f64>,
    pub mean: Array1<f64>,
    pub std: Array1<f64>,
    pub replicates: BTreeMap<String, Array1<f64>>,
}

impl PmfCurve {
    pub fn num_bins(&self) -> usize {
        self.bin_edges.len().saturating_sub(1)
    }

    /// Adds a constant to the mean curve and to every replicate curve.
    ///
    /// The standard deviation is unaffected by a constant offset.
    pub fn shift(&mut self, offset: f64) {
        self.mean.mapv_inplace(|v| v + offset);
        for curve in self.replicates.values_mut() {
            curve.mapv_inplace(|v| v + offset);
        }
    }
}
