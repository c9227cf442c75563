//! Global transmitter schema: the fixed, ordered feature columns shared by
//! the training and validation datasets.

use std::collections::HashMap;

/// Ordered, deduplicated transmitter ids. Defines feature-vector column
/// order for every downstream consumer; never mutated once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    ids: Vec<String>,
}

impl FeatureSchema {
    /// Build from an arbitrary id collection: lexicographically sorted and
    /// deduplicated, so the column order is a pure function of the id set.
    pub fn from_ids(ids: impl IntoIterator<Item = String>) -> Self {
        let mut ids: Vec<String> = ids.into_iter().collect();
        ids.sort();
        ids.dedup();
        Self { ids }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.ids.iter()
    }
}

/// Accumulates per-file transmitter counts (already frequency-filtered by
/// the fingerprint parser) and fixes the global schema.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    counts: HashMap<String, u64>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one file's surviving counts. Membership was decided per file;
    /// the sums kept here are for reporting only.
    pub fn add_file_counts(&mut self, file_counts: HashMap<String, u32>) {
        for (id, count) in file_counts {
            *self.counts.entry(id).or_insert(0) += u64::from(count);
        }
    }

    /// Total readings behind the schema, summed across files.
    pub fn total_sightings(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn build(self) -> FeatureSchema {
        FeatureSchema::from_ids(self.counts.into_keys())
    }
}
