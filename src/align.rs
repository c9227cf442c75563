//! Observation-to-truth alignment and feature vectorization.

use crate::config::AlignConfig;
use crate::error::PipelineError;
use crate::scan::Observation;
use crate::schema::FeatureSchema;
use crate::truth::GroundTruthIndex;
use chrono::{Local, NaiveDateTime, TimeZone};

/// Timestamp layout used by the scan logs.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// One output row: a scan matched to its ground-truth position, features in
/// schema column order. `features.len()` always equals the schema length.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedSample {
    pub timestamp: String,
    pub position: (f64, f64),
    pub features: Vec<f64>,
}

/// Convert a scan timestamp to fractional epoch seconds. The stamp carries
/// no zone and is interpreted as local time, matching the tooling that
/// recorded the ground-truth epochs; whether the two clocks actually agree
/// is unresolved upstream and reproduced here as-is. DST-ambiguous stamps
/// take the earlier instant.
pub fn epoch_seconds(timestamp: &str) -> Result<f64, PipelineError> {
    let naive =
        NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).map_err(|e| {
            PipelineError::Timestamp {
                timestamp: timestamp.to_string(),
                reason: e.to_string(),
            }
        })?;
    let local = Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| PipelineError::Timestamp {
            timestamp: timestamp.to_string(),
            reason: "local time does not exist".to_string(),
        })?;
    Ok(local.timestamp_micros() as f64 / 1e6)
}

/// Joins observations to the truth index and materializes fixed-length
/// feature vectors against a finalized schema. Deterministic and
/// side-effect-free.
pub struct Aligner<'a> {
    schema: &'a FeatureSchema,
    truth: &'a GroundTruthIndex,
    tolerance_secs: f64,
    rssi_floor_dbm: f64,
}

impl<'a> Aligner<'a> {
    pub fn new(
        schema: &'a FeatureSchema,
        truth: &'a GroundTruthIndex,
        config: &AlignConfig,
    ) -> Self {
        Self {
            schema,
            truth,
            tolerance_secs: config.tolerance_secs,
            rssi_floor_dbm: config.rssi_floor_dbm,
        }
    }

    /// Align one observation. `Ok(None)` means no truth sample fell within
    /// tolerance — the observation is dropped, not an error. An unparseable
    /// timestamp propagates; a corrupt stamp signals a format problem worth
    /// stopping for.
    pub fn align(&self, obs: &Observation) -> Result<Option<AlignedSample>, PipelineError> {
        let query = epoch_seconds(&obs.timestamp)?;
        let Some((_, position)) = self.truth.nearest(query, self.tolerance_secs) else {
            return Ok(None);
        };
        let features = self
            .schema
            .iter()
            .map(|id| obs.signals.get(id).copied().unwrap_or(self.rssi_floor_dbm))
            .collect();
        Ok(Some(AlignedSample {
            timestamp: obs.timestamp.clone(),
            position,
            features,
        }))
    }
}
