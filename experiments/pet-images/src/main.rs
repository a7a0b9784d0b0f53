use std::{env, fs, path::PathBuf};

use anyhow::{Context, Result};
use breedcheck_core::{
    load_or_init, print_results, save_to_final_results, ClassificationRun, RunConfig,
};
use log::info;

const LOG_FILTER_DEFAULT: &str = "info";

struct ExperimentPaths {
    config: PathBuf,
    output_dir: PathBuf,
}

fn main() -> Result<()> {
    logger_builder(env_logger::DEFAULT_FILTER_ENV).init();

    let paths = initialize_paths()?;
    let config: RunConfig = load_or_init(&paths.config, RunConfig::default)?;
    let results_path = config.results_path(&paths.config);
    let run = ClassificationRun::load(&results_path)?;

    info!(
        "loaded {} classified images from {}",
        run.results.len(),
        results_path.display()
    );

    print_results(&run.results, &run.stats, &config.model, config.report_options());

    let record = save_to_final_results(
        &paths.output_dir,
        &run.stats,
        run.elapsed_seconds,
        &config.model,
        &config.folder,
    )?;
    info!("appended run record to {}", record.display());

    Ok(())
}

/// Logger reading its directives from `filter_var`, falling back to info.
fn logger_builder(filter_var: &str) -> env_logger::Builder {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or(filter_var, LOG_FILTER_DEFAULT))
}

fn initialize_paths() -> Result<ExperimentPaths> {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("runs");
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create run directory {}", dir.display()))?;

    let output_dir = env::current_dir().context("failed to resolve working directory")?;

    Ok(ExperimentPaths {
        config: dir.join("config.json"),
        output_dir,
    })
}
