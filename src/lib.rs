//! rssi-prep — RSSI fingerprint preprocessing pipeline.
//!
//! Modular structure:
//! - [`scan`] — Raw fingerprint/validation log readers, merged observation sets
//! - [`schema`] — Global transmitter schema from per-file frequency filters
//! - [`truth`] — Ground-truth position index with nearest-timestamp lookup
//! - [`align`] — Observation-to-truth alignment and feature vectorization
//! - [`dataset`] — Aligned sample matrices and the CSV writer
//! - [`pipeline`] — One-shot batch orchestration
//! - [`logging`] — Structured console diagnostics

pub mod align;
pub mod config;
pub mod dataset;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod scan;
pub mod schema;
pub mod truth;

pub use align::{epoch_seconds, AlignedSample, Aligner};
pub use config::PipelineConfig;
pub use dataset::Dataset;
pub use error::PipelineError;
pub use logging::StructuredLogger;
pub use pipeline::RunSummary;
pub use scan::{Observation, ObservationSet};
pub use schema::{FeatureSchema, SchemaBuilder};
pub use truth::GroundTruthIndex;
