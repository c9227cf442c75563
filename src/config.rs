//! Pipeline configuration. Defaults mirror the field-collection setup the
//! logs come from; every path and threshold can be overridden via JSON.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Scan directory; expects `fingerprint/` and `validation/` beneath it
    pub data_dir: PathBuf,
    /// Ground-truth position records
    pub truth_dir: PathBuf,
    /// Where the processed CSV datasets land
    pub output_dir: PathBuf,
    /// Log-file discovery
    pub scan: ScanConfig,
    /// Alignment and vectorization parameters
    pub align: AlignConfig,
    /// Output file names
    pub output: OutputConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Filename suffix selecting fingerprint logs
    pub fingerprint_suffix: String,
    /// Filename suffix selecting validation logs
    pub validation_suffix: String,
    /// Filename suffix selecting ground-truth files
    pub truth_suffix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignConfig {
    /// Max |observation - truth| gap for a match (seconds)
    pub tolerance_secs: f64,
    /// Value substituted for transmitters absent from a scan (dBm)
    pub rssi_floor_dbm: f64,
    /// A transmitter enters a file's schema contribution only when seen
    /// strictly more than this many times in that file
    pub min_occurrences: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub training_file: String,
    pub validation_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data/scans"),
            truth_dir: PathBuf::from("data/true_value"),
            output_dir: PathBuf::from("data/processed"),
            scan: ScanConfig::default(),
            align: AlignConfig::default(),
            output: OutputConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            fingerprint_suffix: "_1_deal.txt".to_string(),
            validation_suffix: "_1_deal.txt".to_string(),
            truth_suffix: "_deal.txt".to_string(),
        }
    }
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            tolerance_secs: 0.5,
            rssi_floor_dbm: -80.0,
            min_occurrences: 5,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            training_file: "processed_training_data.csv".to_string(),
            validation_file: "processed_validation_data.csv".to_string(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl PipelineConfig {
    /// Directory holding fingerprint logs
    pub fn fingerprint_dir(&self) -> PathBuf {
        self.data_dir.join("fingerprint")
    }

    /// Directory holding validation logs
    pub fn validation_dir(&self) -> PathBuf {
        self.data_dir.join("validation")
    }

    /// Load from JSON file if present; otherwise return default
    pub fn load(path: &std::path::Path) -> Self {
        if path.exists() {
            if let Ok(data) = std::fs::read_to_string(path) {
                if let Ok(c) = serde_json::from_str::<PipelineConfig>(&data) {
                    return c;
                }
            }
        }
        Self::default()
    }
}
