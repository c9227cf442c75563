//! Fingerprint scan logs: every heard transmitter is recorded verbatim and
//! counted toward the per-file frequency filter.

use super::{parse_blocks, Observation};
use crate::error::PipelineError;
use std::collections::HashMap;
use std::path::Path;

/// Parsed fingerprint log: the scan blocks plus the transmitter counts that
/// survived this file's frequency filter.
#[derive(Debug)]
pub struct FingerprintScan {
    pub observations: Vec<Observation>,
    /// id → occurrences within this file, only ids seen strictly more than
    /// the threshold. Filtering happens here, per file, before any
    /// cross-file merge.
    pub selected_counts: HashMap<String, u32>,
}

/// Parse one fingerprint log. Occurrence counters see every parsed reading,
/// including readings from blocks later superseded by a duplicate
/// timestamp; the blocks themselves keep all readings regardless of the
/// filter.
pub fn parse_fingerprint_file(
    path: &Path,
    min_occurrences: u32,
) -> Result<FingerprintScan, PipelineError> {
    let text = std::fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;

    let mut counts: HashMap<String, u32> = HashMap::new();
    let mut observations = Vec::new();
    for (timestamp, readings) in parse_blocks(&text) {
        let mut signals = HashMap::with_capacity(readings.len());
        for (id, value) in readings {
            *counts.entry(id.clone()).or_insert(0) += 1;
            signals.insert(id, value);
        }
        observations.push(Observation { timestamp, signals });
    }
    counts.retain(|_, c| *c > min_occurrences);

    Ok(FingerprintScan {
        observations,
        selected_counts: counts,
    })
}
