use crate::analysis::work::{combine_legs, pull_leg};
use crate::core::io::{dataset, force_log};
use crate::core::models::dataset::{PullDataset, TrajectoryBatch};
use crate::core::models::trajectory::{Direction, PulledLeg};
use crate::engine::config::{CollectConfig, LegMode};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{debug, info, instrument, warn};

/// Loads every selected trajectory and assembles the batched work dataset.
///
/// Nothing is written to disk. Fails before reading any file when the number of
/// selected trajectories is not a positive multiple of the block size.
#[instrument(skip_all, name = "collect_workflow")]
pub fn assemble(
    config: &CollectConfig,
    reporter: &ProgressReporter,
) -> Result<PullDataset, EngineError> {
    let indices = config.selection.indices();
    info!(
        "Collecting trajectories {}..{} excluding {:?}: {} selected.",
        config.selection.start,
        config.selection.end,
        config.selection.exclude,
        indices.len()
    );

    let block_size = config.trajs_per_block;
    if indices.is_empty() || indices.len() % block_size != 0 {
        return Err(EngineError::BlockSize {
            count: indices.len(),
            block_size,
        });
    }
    let num_repeats = indices.len() / block_size;
    if config.breakpoint > num_repeats {
        warn!(
            "Forward/reverse breakpoint {} exceeds the number of repeats ({}); the reverse group will be empty.",
            config.breakpoint, num_repeats
        );
    }

    reporter.report(Progress::PhaseStart {
        name: "Loading trajectories",
    });
    reporter.report(Progress::LoadStart {
        total: indices.len() as u64,
    });

    let mut template: Option<PulledLeg> = None;
    let mut batch: Option<TrajectoryBatch> = None;

    for (count, &index) in indices.iter().enumerate() {
        let repeat = count / block_size;
        let slot = count % block_size;
        debug!("Loading trajectory {} into repeat {}, slot {}.", index, repeat, slot);

        let leg = load_trajectory(config, index)?;

        let expected = match &template {
            Some(first) => first.len(),
            None => {
                if leg.len() < 2 {
                    return Err(EngineError::TooFewSamples {
                        index,
                        found: leg.len(),
                    });
                }
                leg.len()
            }
        };
        if leg.len() != expected {
            return Err(EngineError::TrajectoryLength {
                index,
                expected,
                found: leg.len(),
            });
        }

        batch
            .get_or_insert_with(|| TrajectoryBatch::zeros(num_repeats, block_size, expected))
            .insert(repeat, slot, &leg);
        if template.is_none() {
            template = Some(leg);
        }

        reporter.report(Progress::TrajectoryLoaded {
            index,
            repeat,
            slot,
        });
    }

    reporter.report(Progress::LoadFinish);
    reporter.report(Progress::PhaseFinish);

    let (Some(template), Some(batch)) = (template, batch) else {
        return Err(EngineError::BlockSize {
            count: 0,
            block_size,
        });
    };
    let dt = template
        .time_step()
        .ok_or(EngineError::TooFewSamples {
            index: indices[0],
            found: template.len(),
        })?;

    info!(
        "Loaded {} trajectories: {} repeats of {} with {} steps each (dt = {}).",
        indices.len(),
        num_repeats,
        block_size,
        template.len(),
        dt
    );

    Ok(PullDataset::assemble(
        batch,
        &template,
        dt,
        config.force_constant,
        config.temperature,
        config.breakpoint,
    ))
}

/// Assembles the dataset and writes it to the configured output path.
#[instrument(skip_all, name = "collect_and_write")]
pub fn run(config: &CollectConfig, reporter: &ProgressReporter) -> Result<PullDataset, EngineError> {
    let dataset = assemble(config, reporter)?;

    info!("Writing dataset to {:?}", &config.output_path);
    dataset::write_to_path(&dataset, &config.output_path)?;
    reporter.report(Progress::OutputWritten {
        path: config.output_path.display().to_string(),
    });

    Ok(dataset)
}

/// Reads the force log(s) of one trajectory and derives its work series.
pub fn load_trajectory(config: &CollectConfig, index: usize) -> Result<PulledLeg, EngineError> {
    let forward = load_leg(config, index, Direction::Forward)?;

    match config.leg_mode {
        LegMode::ForwardOnly => Ok(forward),
        LegMode::Both => {
            let reverse = load_leg(config, index, Direction::Reverse)?;
            Ok(combine_legs(&forward, &reverse))
        }
    }
}

fn load_leg(
    config: &CollectConfig,
    index: usize,
    direction: Direction,
) -> Result<PulledLeg, EngineError> {
    let path = match direction {
        Direction::Forward => config.forward_log(index),
        Direction::Reverse => config.backward_log(index),
    };
    debug!("Reading {} leg of trajectory {} from {:?}", direction, index, path);

    let record = force_log::read_from_path(&path)?;
    pull_leg(
        &record,
        direction,
        config.pulling_speed,
        config.lambda_min,
        config.lambda_max,
    )
    .map_err(EngineError::analysis(format!("{direction} work of trajectory {index}")))
}
