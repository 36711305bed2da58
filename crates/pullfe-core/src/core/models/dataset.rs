use crate::core::models::trajectory::PulledLeg;
use crate::core::units;
use ndarray::{Array1, Array3, Axis, s};

/// Work and position time series of many trajectories, grouped into repeats.
///
/// Arrays are indexed by `(repeat, trajectory within the repeat, time step)`.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryBatch {
    pub positions: Array3<f64>,
    pub work: Array3<f64>,
}

impl TrajectoryBatch {
    pub fn zeros(num_repeats: usize, trajs_per_block: usize, num_steps: usize) -> Self {
        let shape = (num_repeats, trajs_per_block, num_steps);
        Self {
            positions: Array3::zeros(shape),
            work: Array3::zeros(shape),
        }
    }

    pub fn num_repeats(&self) -> usize {
        self.work.len_of(Axis(0))
    }

    pub fn trajs_per_block(&self) -> usize {
        self.work.len_of(Axis(1))
    }

    pub fn num_steps(&self) -> usize {
        self.work.len_of(Axis(2))
    }

    /// Stores one trajectory. The leg must have exactly [`Self::num_steps`] samples.
    pub fn insert(&mut self, repeat: usize, traj: usize, leg: &PulledLeg) {
        self.positions
            .slice_mut(s![repeat, traj, ..])
            .assign(&leg.positions);
        self.work.slice_mut(s![repeat, traj, ..]).assign(&leg.work);
    }
}

/// The assembled output of the work-accumulation pipeline.
///
/// Lengths are in nm, work in k_BT and times in ps. Repeats before the
/// forward/reverse breakpoint form the forward-labeled group (`w_f`, `z_f`), the
/// remaining repeats form the reverse-labeled group (`w_r`, `z_r`). Both groups
/// share the same lambda schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct PullDataset {
    pub dt: f64,
    pub pulling_times: Array1<f64>,
    /// Harmonic force constant in k_BT/nm².
    pub ks: f64,
    pub lambda_f: Array1<f64>,
    pub lambda_r: Array1<f64>,
    pub w_f: Array3<f64>,
    pub z_f: Array3<f64>,
    pub w_r: Array3<f64>,
    pub z_r: Array3<f64>,
}

impl PullDataset {
    /// Converts a batch to output units and splits it at `breakpoint`.
    ///
    /// `template` supplies the shared time axis and lambda schedule. A breakpoint
    /// past the last repeat leaves the reverse-labeled group empty.
    pub fn assemble(
        batch: TrajectoryBatch,
        template: &PulledLeg,
        dt: f64,
        force_constant: f64,
        temperature_k: f64,
        breakpoint: usize,
    ) -> Self {
        let split = breakpoint.min(batch.num_repeats());

        let positions = batch.positions.mapv_into(units::angstrom_to_nm);
        let work = batch
            .work
            .mapv_into(|w| units::kcal_per_mol_to_kt(w, temperature_k));
        let lambdas = template.lambdas.mapv(units::angstrom_to_nm);

        Self {
            dt,
            pulling_times: template.times.clone(),
            ks: units::reduced_force_constant(force_constant, temperature_k),
            lambda_f: lambdas.clone(),
            lambda_r: lambdas,
            w_f: work.slice(s![..split, .., ..]).to_owned(),
            z_f: positions.slice(s![..split, .., ..]).to_owned(),
            w_r: work.slice(s![split.., .., ..]).to_owned(),
            z_r: positions.slice(s![split.., .., ..]).to_owned(),
        }
    }

    pub fn num_steps(&self) -> usize {
        self.pulling_times.len()
    }
}
