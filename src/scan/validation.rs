//! Validation scan logs, parsed against an already-finalized schema.

use super::{parse_blocks, Observation};
use crate::error::PipelineError;
use crate::schema::FeatureSchema;
use std::collections::HashMap;
use std::path::Path;

/// Parse one validation log. Every block starts with all schema ids at the
/// floor value; readings overwrite only ids the schema knows. Ids outside
/// the schema have no column and are dropped.
pub fn parse_validation_file(
    path: &Path,
    schema: &FeatureSchema,
    floor_dbm: f64,
) -> Result<Vec<Observation>, PipelineError> {
    let text = std::fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;

    let mut observations = Vec::new();
    for (timestamp, readings) in parse_blocks(&text) {
        let mut signals: HashMap<String, f64> =
            schema.iter().map(|id| (id.clone(), floor_dbm)).collect();
        for (id, value) in readings {
            if let Some(slot) = signals.get_mut(&id) {
                *slot = value;
            }
        }
        observations.push(Observation { timestamp, signals });
    }
    Ok(observations)
}
