use crate::cli::CollectArgs;
use crate::config::PartialConfigFile;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use pullfe::{engine::progress::ProgressReporter, workflows};
use tracing::info;

pub fn run(args: CollectArgs) -> Result<()> {
    let partial_config = PartialConfigFile::load(args.config.as_deref())?;
    info!("Merging configuration from file and CLI arguments...");
    let final_config = partial_config.merge_collect(&args)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Collecting pulling work from {}...",
        final_config.pull_dir.display()
    );
    info!("Invoking the core collect workflow...");
    let dataset = workflows::collect::run(&final_config, &reporter)?;

    println!(
        "✓ {} forward and {} reverse repeat(s) of {} trajectories ({} steps) written to: {}",
        dataset.w_f.shape()[0],
        dataset.w_r.shape()[0],
        final_config.trajs_per_block,
        dataset.num_steps(),
        final_config.output_path.display()
    );

    Ok(())
}
