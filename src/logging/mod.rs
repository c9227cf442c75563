//! Structured console logging for the batch pipeline.

mod format;

pub use format::StructuredLogger;
