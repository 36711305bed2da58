use crate::cli::CompareArgs;
use crate::config::PartialConfigFile;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use anyhow::Context;
use pullfe::{engine::progress::ProgressReporter, workflows};
use tracing::info;

pub fn run(args: CompareArgs) -> Result<()> {
    let partial_config = PartialConfigFile::load(args.config.as_deref())?;
    info!("Merging configuration from file and CLI arguments...");
    let final_config = partial_config.merge_compare(&args)?;

    std::fs::create_dir_all(&final_config.out_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            final_config.out_dir.display()
        )
    })?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Comparing {} against '{}'...",
        final_config.estimators.join(", "),
        final_config.reference
    );
    info!("Invoking the core compare workflow...");
    let comparison = workflows::compare::run(&final_config, &reporter)?;

    info!(
        "Scored {} estimator(s) on {} bins.",
        comparison.rmse.len(),
        comparison.bin_centers.len()
    );
    println!(
        "✓ Figures written to: {}",
        final_config.out_dir.display()
    );
    if let Some(path) = &final_config.rmse_table {
        println!("✓ RMSE table written to: {}", path.display());
    }

    Ok(())
}
