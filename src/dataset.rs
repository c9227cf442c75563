//! Aligned sample matrices and the CSV dataset writer.

use crate::align::{AlignedSample, TIMESTAMP_FORMAT};
use crate::error::PipelineError;
use crate::schema::FeatureSchema;
use chrono::NaiveDateTime;
use ndarray::{Array2, Axis};
use std::path::Path;
use tracing::warn;

/// A finished dataset: row-aligned timestamp strings, n×2 positions and
/// n×d features.
#[derive(Debug, Clone)]
pub struct Dataset {
    timestamps: Vec<String>,
    positions: Array2<f64>,
    features: Array2<f64>,
}

impl Dataset {
    /// Pack aligned samples into matrices. `feature_dim` is the schema
    /// length; the aligner guarantees every sample already matches it.
    pub fn from_samples(samples: Vec<AlignedSample>, feature_dim: usize) -> Self {
        let n = samples.len();
        let mut timestamps = Vec::with_capacity(n);
        let mut pos_flat = Vec::with_capacity(n * 2);
        let mut feat_flat = Vec::with_capacity(n * feature_dim);
        for s in samples {
            debug_assert_eq!(s.features.len(), feature_dim);
            timestamps.push(s.timestamp);
            pos_flat.push(s.position.0);
            pos_flat.push(s.position.1);
            feat_flat.extend(s.features);
        }
        Self {
            timestamps,
            positions: Array2::from_shape_vec((n, 2), pos_flat).expect("position matrix shape"),
            features: Array2::from_shape_vec((n, feature_dim), feat_flat)
                .expect("feature matrix shape"),
        }
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &[String] {
        &self.timestamps
    }

    pub fn positions(&self) -> &Array2<f64> {
        &self.positions
    }

    pub fn features(&self) -> &Array2<f64> {
        &self.features
    }

    /// Re-order rows by parsed timestamp, ascending and stable. If any
    /// stamp fails to parse, the encounter order is kept and a warning is
    /// emitted.
    pub fn sort_by_timestamp(&mut self) {
        let parsed: Result<Vec<NaiveDateTime>, _> = self
            .timestamps
            .iter()
            .map(|ts| NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT))
            .collect();
        let parsed = match parsed {
            Ok(p) => p,
            Err(e) => {
                warn!(error = %e, "unsortable timestamps, keeping encounter order");
                return;
            }
        };
        let mut order: Vec<usize> = (0..self.timestamps.len()).collect();
        order.sort_by_key(|&i| parsed[i]);
        self.timestamps = order.iter().map(|&i| self.timestamps[i].clone()).collect();
        self.positions = self.positions.select(Axis(0), &order);
        self.features = self.features.select(Axis(0), &order);
    }

    /// Write `timestamp_str, pos_x, pos_y, <id…>` rows with the schema ids
    /// as feature column headers. Missing parent directories are created.
    /// An empty dataset touches nothing and reports zero rows; callers skip
    /// the write entirely in that case.
    pub fn write_csv(&self, path: &Path, schema: &FeatureSchema) -> Result<usize, PipelineError> {
        if self.is_empty() {
            return Ok(0);
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PipelineError::io(parent, e))?;
        }

        let mut writer = csv::Writer::from_path(path)?;
        let mut header = vec![
            "timestamp_str".to_string(),
            "pos_x".to_string(),
            "pos_y".to_string(),
        ];
        header.extend(schema.ids().iter().cloned());
        writer.write_record(&header)?;

        for i in 0..self.len() {
            let mut row = vec![
                self.timestamps[i].clone(),
                self.positions[[i, 0]].to_string(),
                self.positions[[i, 1]].to_string(),
            ];
            row.extend(self.features.row(i).iter().map(|v| v.to_string()));
            writer.write_record(&row)?;
        }
        writer.flush().map_err(|e| PipelineError::io(path, e))?;
        Ok(self.len())
    }
}
