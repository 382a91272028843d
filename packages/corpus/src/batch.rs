//! Batch assembly of law metadata for every category.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{LawMetadata, LawRecord, LawSummary};

/// Listing of every category together with full metadata of every law.
///
/// `laws_metadata` maps category -> law summaries; `law_metadata` maps
/// `category/law` -> full metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchMetadata {
    pub laws_metadata: BTreeMap<String, Vec<LawSummary>>,
    pub law_metadata: BTreeMap<String, LawMetadata>,
}

impl BatchMetadata {
    /// Build both maps in a single pass, ordering laws by category then id.
    pub fn assemble(mut laws: Vec<LawRecord>) -> Self {
        laws.sort_by(|a, b| (&a.category, &a.id).cmp(&(&b.category, &b.id)));

        let mut batch = Self::default();
        for law in laws {
            batch
                .laws_metadata
                .entry(law.category.clone())
                .or_default()
                .push(law.summary());
            batch.law_metadata.insert(law.key(), law.metadata);
        }
        batch
    }
}
