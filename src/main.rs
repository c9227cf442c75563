//! rssi-prep entrypoint: one-shot batch run over the configured scan and
//! ground-truth directories, writing the training and validation datasets.

use rssi_prep::{config::PipelineConfig, logging::StructuredLogger, pipeline};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config_path = std::env::var("RSSI_PREP_CONFIG_PATH")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| std::path::PathBuf::from("config.json"));
    let config = PipelineConfig::load(&config_path);

    StructuredLogger::init(config.log.json, &config.log.level);

    info!(
        data_dir = ?config.data_dir,
        truth_dir = ?config.truth_dir,
        output_dir = ?config.output_dir,
        "rssi-prep starting"
    );

    let summary = pipeline::run(&config)?;

    info!(
        feature_dim = summary.feature_dim,
        training_rows = summary.training_rows,
        validation_rows = summary.validation_rows,
        "preprocessing complete"
    );
    Ok(())
}
