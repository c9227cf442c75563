//! Ground-truth position records: file reader, merged time-keyed index,
//! nearest-timestamp lookup.

use crate::error::PipelineError;
use std::collections::HashMap;
use std::path::Path;

/// One authoritative position sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TruthRecord {
    /// Fractional epoch seconds
    pub timestamp: f64,
    pub x: f64,
    pub y: f64,
}

/// Read one truth file: whitespace-separated `<unix_ts> <x> <y> [...]` per
/// line. Lines with fewer than four fields are skipped; a field that fails
/// numeric parsing aborts the run — labels are load-bearing.
pub fn parse_truth_file(path: &Path) -> Result<Vec<TruthRecord>, PipelineError> {
    let text = std::fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;

    let mut records = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 4 {
            continue;
        }
        let field = |i: usize| {
            parts[i]
                .parse::<f64>()
                .map_err(|e| PipelineError::TruthRecord {
                    path: path.to_path_buf(),
                    line: lineno + 1,
                    reason: format!("{:?}: {e}", parts[i]),
                })
        };
        records.push(TruthRecord {
            timestamp: field(0)?,
            x: field(1)?,
            y: field(2)?,
        });
    }
    Ok(records)
}

/// Positions keyed by exact epoch timestamp. Merging later files overwrites
/// earlier entries on exact key collision; read-only once the pipeline has
/// finished merging.
#[derive(Debug, Default)]
pub struct GroundTruthIndex {
    /// key is the timestamp bit pattern, so exact-collision semantics match
    /// float equality
    entries: HashMap<u64, (f64, f64)>,
}

impl GroundTruthIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: TruthRecord) {
        self.entries
            .insert(record.timestamp.to_bits(), (record.x, record.y));
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = TruthRecord>) {
        for r in records {
            self.insert(r);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry closest to `query` among those with |t − query| strictly
    /// below `tolerance`. Equal-distance ties pick the smaller timestamp,
    /// so the result does not depend on map iteration order.
    pub fn nearest(&self, query: f64, tolerance: f64) -> Option<(f64, (f64, f64))> {
        let mut best: Option<(f64, (f64, f64))> = None;
        for (&bits, &position) in &self.entries {
            let t = f64::from_bits(bits);
            let diff = (t - query).abs();
            // strict window; the negated form also rejects NaN gaps
            if !(diff < tolerance) {
                continue;
            }
            best = match best {
                Some((bt, bpos)) => {
                    let best_diff = (bt - query).abs();
                    if diff < best_diff || (diff == best_diff && t < bt) {
                        Some((t, position))
                    } else {
                        Some((bt, bpos))
                    }
                }
                None => Some((t, position)),
            };
        }
        best
    }
}
