use ndarray::Array1;
use std::fmt;

/// Direction of a pulling leg.
///
/// The forward leg moves the restraint from the lower lambda bound towards the
/// upper bound; the reverse leg moves it back, which is expressed by negating the
/// pulling speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Reverse,
}

impl Direction {
    /// Sign applied to the pulling speed for this leg.
    pub fn speed_sign(self) -> f64 {
        match self {
            Direction::Forward => 1.0,
            Direction::Reverse => -1.0,
        }
    }

    /// Lambda value the restraint starts from on this leg.
    pub fn lambda_start(self, lambda_min: f64, lambda_max: f64) -> f64 {
        match self {
            Direction::Forward => lambda_min,
            Direction::Reverse => lambda_max,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => write!(f, "forward"),
            Direction::Reverse => write!(f, "reverse"),
        }
    }
}

/// Raw samples of one pulling leg as written by the simulation engine.
///
/// Each sample holds the elapsed time (ps), the pulled coordinate (Å) and the
/// instantaneous restraint force (kcal/mol/Å). All three arrays have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct PullingRecord {
    pub times: Array1<f64>,
    pub positions: Array1<f64>,
    pub forces: Array1<f64>,
}

impl PullingRecord {
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

/// A pulling leg, or several legs stitched together, with derived quantities.
///
/// `lambdas` is the commanded restraint position and `work` the accumulated work
/// in kcal/mol at every sample. Values are in the simulation's native units until
/// the dataset is assembled.
#[derive(Debug, Clone, PartialEq)]
pub struct PulledLeg {
    pub times: Array1<f64>,
    pub lambdas: Array1<f64>,
    pub positions: Array1<f64>,
    pub work: Array1<f64>,
}

impl PulledLeg {
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Time between the first two samples, if the leg has at least two.
    pub fn time_step(&self) -> Option<f64> {
        if self.times.len() < 2 {
            None
        } else {
            Some(self.times[1] - self.times[0])
        }
    }
}
