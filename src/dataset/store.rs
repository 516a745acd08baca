//! In-memory dataset store
//!
//! Serves [`EntityQuery`] from a map of records, seeded in code or from a
//! JSON fixture. Used by the CLI and by tests in place of the GraphQL layer.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use catalog_types::{Dataset, DatasetEditableProperties, DatasetUpdateInput, Deprecation};
use entity_profile::{EntityQuery, FetchError};
use tokio::sync::RwLock;
use tracing::{debug, info};

#[derive(Debug, Default)]
pub struct InMemoryDatasetStore {
    records: RwLock<HashMap<String, Dataset>>,
}

impl InMemoryDatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = Dataset>) -> Self {
        let records = records.into_iter().map(|d| (d.urn.clone(), d)).collect();
        Self {
            records: RwLock::new(records),
        }
    }

    /// Load records from a JSON file holding either one dataset or an array.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let store = Self::from_json_str(&content)
            .with_context(|| format!("Invalid dataset fixture in {}", path.display()))?;
        info!("Loaded dataset fixture from {}", path.display());
        Ok(store)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(content).context("Failed to parse dataset JSON")?;
        let records: Vec<Dataset> = if value.is_array() {
            serde_json::from_value(value)?
        } else {
            vec![serde_json::from_value(value)?]
        };
        Ok(Self::with_records(records))
    }

    /// Add or replace a record; sessions see it on their next load.
    pub async fn insert(&self, dataset: Dataset) {
        self.records.write().await.insert(dataset.urn.clone(), dataset);
    }

    pub async fn urns(&self) -> Vec<String> {
        let mut urns: Vec<_> = self.records.read().await.keys().cloned().collect();
        urns.sort();
        urns
    }
}

#[async_trait]
impl EntityQuery for InMemoryDatasetStore {
    type Record = Dataset;
    type UpdateInput = DatasetUpdateInput;

    async fn fetch(&self, urn: &str) -> Result<Option<Dataset>, FetchError> {
        let records = self.records.read().await;
        debug!(urn, found = records.contains_key(urn), "Store fetch");
        Ok(records.get(urn).cloned())
    }

    async fn update(&self, urn: &str, input: DatasetUpdateInput) -> Result<Dataset, FetchError> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(urn)
            .ok_or_else(|| FetchError::NotFound(urn.to_string()))?;

        if input.editable_properties.is_none() && input.deprecation.is_none() {
            return Err(FetchError::UpdateRejected {
                urn: urn.to_string(),
                message: "update carries no changes".to_string(),
            });
        }

        // Only the touched aspects go back to the caller.
        let mut changed = Dataset::new(urn);

        if let Some(editable) = input.editable_properties {
            let properties = DatasetEditableProperties {
                description: Some(editable.description),
            };
            record.editable_properties = Some(properties.clone());
            changed.editable_properties = Some(properties);
        }

        if let Some(update) = input.deprecation {
            let deprecation = Deprecation {
                deprecated: Some(update.deprecated),
                note: update.note,
                decommission_time: update.decommission_time,
                actor: record.deprecation.as_ref().and_then(|d| d.actor.clone()),
            };
            record.deprecation = Some(deprecation.clone());
            changed.deprecation = Some(deprecation);
        }

        info!(urn, "Dataset updated");
        Ok(changed)
    }
}
