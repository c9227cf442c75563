//! End-to-end batch orchestration: fingerprint pass, truth merge,
//! alignment, validation pass.

use crate::align::Aligner;
use crate::config::PipelineConfig;
use crate::dataset::Dataset;
use crate::error::PipelineError;
use crate::scan::{self, ObservationSet};
use crate::schema::{FeatureSchema, SchemaBuilder};
use crate::truth::{parse_truth_file, GroundTruthIndex};
use tracing::{debug, info, warn};

/// Row counts reported after a run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunSummary {
    pub feature_dim: usize,
    pub training_rows: usize,
    pub validation_rows: usize,
}

/// Run the whole preprocessing batch. Halts early (with a warning, not an
/// error) when no transmitter survives the frequency filter — an empty
/// schema means no feature vector is representable.
pub fn run(config: &PipelineConfig) -> Result<RunSummary, PipelineError> {
    // Fingerprint pass: merge observations, fix the global schema.
    let fingerprint_files =
        scan::list_files(&config.fingerprint_dir(), &config.scan.fingerprint_suffix);
    let mut observations = ObservationSet::new();
    let mut builder = SchemaBuilder::new();
    for path in &fingerprint_files {
        let parsed = scan::parse_fingerprint_file(path, config.align.min_occurrences)?;
        debug!(
            file = %path.display(),
            blocks = parsed.observations.len(),
            ids = parsed.selected_counts.len(),
            "parsed fingerprint log"
        );
        observations.extend(parsed.observations);
        builder.add_file_counts(parsed.selected_counts);
    }
    let total_sightings = builder.total_sightings();
    let schema = builder.build();
    if schema.is_empty() {
        warn!(
            files = fingerprint_files.len(),
            "no eligible transmitter ids found; check the fingerprint logs and the frequency threshold"
        );
        return Ok(RunSummary::default());
    }
    info!(
        feature_dim = schema.len(),
        sightings = total_sightings,
        "feature schema fixed"
    );

    // Truth merge.
    let truth = build_truth_index(config)?;
    if truth.is_empty() {
        warn!("no ground-truth records loaded; nothing will align");
    }

    let aligner = Aligner::new(&schema, &truth, &config.align);

    // Training dataset, in encounter order.
    let mut samples = Vec::new();
    for obs in observations.iter() {
        if let Some(sample) = aligner.align(obs)? {
            samples.push(sample);
        }
    }
    let training = Dataset::from_samples(samples, schema.len());
    info!(
        rows = training.len(),
        of = observations.len(),
        "fingerprint observations aligned"
    );
    write_dataset(&training, &config.output.training_file, config, &schema)?;

    // Validation dataset, re-sorted by timestamp.
    let validation_files =
        scan::list_files(&config.validation_dir(), &config.scan.validation_suffix);
    let mut validation_obs = ObservationSet::new();
    for path in &validation_files {
        let parsed = scan::parse_validation_file(path, &schema, config.align.rssi_floor_dbm)?;
        debug!(file = %path.display(), blocks = parsed.len(), "parsed validation log");
        validation_obs.extend(parsed);
    }
    let mut samples = Vec::new();
    for obs in validation_obs.iter() {
        if let Some(sample) = aligner.align(obs)? {
            samples.push(sample);
        }
    }
    let mut validation = Dataset::from_samples(samples, schema.len());
    validation.sort_by_timestamp();
    info!(
        rows = validation.len(),
        of = validation_obs.len(),
        "validation observations aligned"
    );
    write_dataset(&validation, &config.output.validation_file, config, &schema)?;

    Ok(RunSummary {
        feature_dim: schema.len(),
        training_rows: training.len(),
        validation_rows: validation.len(),
    })
}

fn build_truth_index(config: &PipelineConfig) -> Result<GroundTruthIndex, PipelineError> {
    let truth_files = scan::list_files(&config.truth_dir, &config.scan.truth_suffix);
    let mut index = GroundTruthIndex::new();
    for path in &truth_files {
        let records = parse_truth_file(path)?;
        debug!(file = %path.display(), records = records.len(), "parsed truth file");
        index.extend(records);
    }
    Ok(index)
}

fn write_dataset(
    dataset: &Dataset,
    file_name: &str,
    config: &PipelineConfig,
    schema: &FeatureSchema,
) -> Result<(), PipelineError> {
    if dataset.is_empty() {
        warn!(file = file_name, "no samples, skipping write");
        return Ok(());
    }
    let path = config.output_dir.join(file_name);
    let rows = dataset.write_csv(&path, schema)?;
    info!(rows, path = %path.display(), "dataset saved");
    Ok(())
}
