use thiserror::Error;

use super::config::ConfigError;
use crate::analysis::AnalysisError;
use crate::core::io::dataset::DatasetError;
use crate::core::io::figure::FigureError;
use crate::core::io::force_log::ForceLogError;
use crate::core::io::results::ResultLoadError;
use crate::core::io::table::TableError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(
        "Total number of trajectories ({count}) must be a positive multiple of the block size ({block_size})"
    )]
    BlockSize { count: usize, block_size: usize },

    #[error("Trajectory {index} has {found} steps, expected {expected}")]
    TrajectoryLength {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("Trajectory {index} has {found} samples; at least two are required to define a time step")]
    TooFewSamples { index: usize, found: usize },

    #[error("Failed to read force log: {source}")]
    ForceLog {
        #[from]
        source: ForceLogError,
    },

    #[error("Failed to write dataset: {source}")]
    Dataset {
        #[from]
        source: DatasetError,
    },

    #[error("Failed to load estimator results: {source}")]
    Results {
        #[from]
        source: ResultLoadError,
    },

    #[error("Numerical analysis failed for '{stage}': {source}")]
    Analysis {
        stage: String,
        source: AnalysisError,
    },

    #[error("Failed to render figure: {source}")]
    Figure {
        #[from]
        source: FigureError,
    },

    #[error("Failed to write table: {source}")]
    Table {
        #[from]
        source: TableError,
    },
}

impl EngineError {
    pub(crate) fn analysis(stage: impl Into<String>) -> impl FnOnce(AnalysisError) -> Self {
        let stage = stage.into();
        move |source| EngineError::Analysis { stage, source }
    }
}
