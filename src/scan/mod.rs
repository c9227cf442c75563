//! Raw scan-log readers: fingerprint and validation RSSI logs share one
//! two-line-per-record text format; shared observation types and suffix
//! based file discovery.

mod fingerprint;
mod validation;

pub use fingerprint::{parse_fingerprint_file, FingerprintScan};
pub use validation::parse_validation_file;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// Substring marking the header line of a scan block.
const TIMESTAMP_MARKER: &str = "Timestamp";
/// Substring marking a transmitter reading line within a block.
const SIGNAL_MARKER: &str = "MAC";

/// One scan block: a timestamp plus the transmitters heard in it.
#[derive(Debug, Clone)]
pub struct Observation {
    /// `YYYY-MM-DD HH:MM:SS.ffffff`, kept verbatim from the log
    pub timestamp: String,
    /// transmitter id → signal strength (dBm)
    pub signals: HashMap<String, f64>,
}

/// Observations merged across files. Keeps first-seen encounter order; a
/// duplicate timestamp replaces the earlier payload in place.
#[derive(Debug, Default)]
pub struct ObservationSet {
    records: Vec<Observation>,
    index: HashMap<String, usize>,
}

impl ObservationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, obs: Observation) {
        match self.index.get(&obs.timestamp) {
            Some(&at) => self.records[at] = obs,
            None => {
                self.index.insert(obs.timestamp.clone(), self.records.len());
                self.records.push(obs);
            }
        }
    }

    pub fn extend(&mut self, batch: impl IntoIterator<Item = Observation>) {
        for obs in batch {
            self.insert(obs);
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.records.iter()
    }
}

/// List files directly under `dir` whose names end with `suffix`, sorted by
/// path so reruns process files in a stable order. Subdirectories are not
/// entered.
pub fn list_files(dir: &Path, suffix: &str) -> Vec<PathBuf> {
    if !dir.is_dir() {
        warn!(dir = %dir.display(), "scan directory missing or not a directory");
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.file_name().to_string_lossy().ends_with(suffix))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

/// Scan the raw text into (timestamp, readings) blocks. A block starts at a
/// line containing the timestamp marker and consumes the signal lines that
/// follow it; any other line ends the block. Malformed signal lines are
/// logged and skipped, never fatal.
pub(crate) fn parse_blocks(text: &str) -> Vec<(String, Vec<(String, f64)>)> {
    let lines: Vec<&str> = text.lines().collect();
    let mut blocks = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        if !lines[i].contains(TIMESTAMP_MARKER) {
            i += 1;
            continue;
        }
        let Some(timestamp) = lines[i].trim().split(": ").nth(1) else {
            warn!(line = %lines[i].trim(), "timestamp header missing value, skipping block");
            i += 1;
            continue;
        };
        let timestamp = timestamp.to_string();
        let mut readings = Vec::new();
        i += 1;
        while i < lines.len() && lines[i].contains(SIGNAL_MARKER) {
            let line = lines[i].trim();
            match parse_signal_line(line) {
                Some(pair) => readings.push(pair),
                None => warn!(line = %line, "unparseable signal line, skipping"),
            }
            i += 1;
        }
        blocks.push((timestamp, readings));
    }
    blocks
}

/// Parse one `MAC: <id>, RSSI: <value>dBm` line. Exactly two comma-space
/// separated fields are expected; anything else is malformed.
fn parse_signal_line(line: &str) -> Option<(String, f64)> {
    let parts: Vec<&str> = line.split(", ").collect();
    if parts.len() != 2 {
        return None;
    }
    let id = parts[0].split(": ").nth(1)?;
    let raw = parts[1].split(": ").nth(1)?;
    let value = raw.trim().replace("dBm", "").trim().parse::<f64>().ok()?;
    Some((id.to_string(), value))
}
