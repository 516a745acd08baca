//! Dataset record - the data graph fetched for one dataset profile view.

use serde::{Deserialize, Serialize};

use crate::common::*;
use crate::{EntityData, EntityType, MergeRecord};

/// One dataset as returned by the dataset profile query.
///
/// Only `urn` is guaranteed. Which of the remaining fields are populated
/// depends on the query that produced the record and on what the catalog
/// knows about the dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub urn: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub origin: Option<FabricType>,
    #[serde(default)]
    pub exists: Option<bool>,
    #[serde(default)]
    pub platform: Option<DataPlatform>,
    #[serde(default)]
    pub data_platform_instance: Option<DataPlatformInstance>,
    #[serde(default)]
    pub properties: Option<DatasetProperties>,
    #[serde(default)]
    pub editable_properties: Option<DatasetEditableProperties>,
    #[serde(default)]
    pub sub_types: Option<SubTypes>,
    #[serde(default)]
    pub view_properties: Option<ViewProperties>,
    #[serde(default)]
    pub ownership: Option<Ownership>,
    #[serde(default)]
    pub global_tags: Option<GlobalTags>,
    #[serde(default)]
    pub glossary_terms: Option<GlossaryTerms>,
    #[serde(default)]
    pub domain: Option<DomainAssociation>,
    #[serde(default)]
    pub container: Option<Container>,
    #[serde(default)]
    pub parent_containers: Option<ParentContainers>,
    #[serde(default)]
    pub deprecation: Option<Deprecation>,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub upstream: Option<CountResult>,
    #[serde(default)]
    pub downstream: Option<CountResult>,
    #[serde(default)]
    pub usage_stats: Option<UsageStats>,
    #[serde(default)]
    pub dataset_profiles: Option<Vec<DatasetProfile>>,
    #[serde(default)]
    pub operations: Option<Vec<Operation>>,
    #[serde(default)]
    pub assertions: Option<CountResult>,
    #[serde(default)]
    pub test_results: Option<TestResults>,
    #[serde(default)]
    pub read_runs: Option<CountResult>,
    #[serde(default)]
    pub write_runs: Option<CountResult>,
    #[serde(default)]
    pub siblings: Option<SiblingProperties>,
    #[serde(default)]
    pub stats_summary: Option<DatasetStatsSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetProperties {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub external_url: Option<String>,
    #[serde(default)]
    pub qualified_name: Option<String>,
    #[serde(default)]
    pub custom_properties: Option<Vec<CustomPropertiesEntry>>,
}

/// User-edited values that take precedence over ingested ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetEditableProperties {
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewProperties {
    #[serde(default)]
    pub materialized: Option<bool>,
    #[serde(default)]
    pub logic: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageStats {
    #[serde(default)]
    pub buckets: Option<Vec<UsageAggregation>>,
}

impl UsageStats {
    pub fn bucket_count(&self) -> usize {
        self.buckets.as_ref().map_or(0, Vec::len)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageAggregation {
    /// Bucket start, epoch milliseconds.
    #[serde(default)]
    pub bucket: Option<i64>,
    #[serde(default)]
    pub total_sql_queries: Option<u64>,
    #[serde(default)]
    pub unique_user_count: Option<u64>,
}

/// One point of the dataset profile time series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetProfile {
    #[serde(default)]
    pub timestamp_millis: Option<i64>,
    #[serde(default)]
    pub row_count: Option<i64>,
    #[serde(default)]
    pub column_count: Option<i64>,
}

/// One point of the operation (write) time series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(default)]
    pub timestamp_millis: Option<i64>,
    #[serde(default)]
    pub last_updated_timestamp: Option<i64>,
    #[serde(default)]
    pub operation_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResults {
    #[serde(default)]
    pub passing: Option<Vec<TestResult>>,
    #[serde(default)]
    pub failing: Option<Vec<TestResult>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub test_urn: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetStatsSummary {
    #[serde(default)]
    pub query_count_last_30_days: Option<u64>,
    #[serde(default)]
    pub unique_user_count_last_30_days: Option<u64>,
    #[serde(default)]
    pub top_users_last_30_days: Option<Vec<OwnerEntity>>,
}

impl Dataset {
    pub fn new(urn: impl Into<String>) -> Self {
        Self {
            urn: urn.into(),
            ..Self::default()
        }
    }

    pub fn has_sub_type(&self, name: &str) -> bool {
        self.sub_types.as_ref().is_some_and(|s| s.contains(name))
    }

    pub fn view_logic(&self) -> Option<&str> {
        crate::non_empty(
            self.view_properties
                .as_ref()
                .and_then(|v| v.logic.as_deref()),
        )
    }

    pub fn usage_bucket_count(&self) -> usize {
        self.usage_stats.as_ref().map_or(0, UsageStats::bucket_count)
    }

    pub fn profile_count(&self) -> usize {
        self.dataset_profiles.as_ref().map_or(0, Vec::len)
    }

    pub fn operation_count(&self) -> usize {
        self.operations.as_ref().map_or(0, Vec::len)
    }

    pub fn sibling_count(&self) -> usize {
        self.siblings.as_ref().map_or(0, SiblingProperties::count)
    }
}

impl EntityData for Dataset {
    fn urn(&self) -> &str {
        &self.urn
    }

    fn entity_type(&self) -> Option<EntityType> {
        Some(EntityType::Dataset)
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn platform(&self) -> Option<&DataPlatform> {
        self.platform.as_ref()
    }

    fn ownership(&self) -> Option<&Ownership> {
        self.ownership.as_ref()
    }

    fn global_tags(&self) -> Option<&GlobalTags> {
        self.global_tags.as_ref()
    }

    fn glossary_terms(&self) -> Option<&GlossaryTerms> {
        self.glossary_terms.as_ref()
    }

    fn domain(&self) -> Option<&DomainAssociation> {
        self.domain.as_ref()
    }

    fn container(&self) -> Option<&Container> {
        self.container.as_ref()
    }

    fn parent_containers(&self) -> Option<&ParentContainers> {
        self.parent_containers.as_ref()
    }

    fn deprecation(&self) -> Option<&Deprecation> {
        self.deprecation.as_ref()
    }

    fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    fn custom_properties(&self) -> Option<&[CustomPropertiesEntry]> {
        self.properties
            .as_ref()
            .and_then(|p| p.custom_properties.as_deref())
    }

    fn siblings(&self) -> Option<&SiblingProperties> {
        self.siblings.as_ref()
    }
}

macro_rules! merge_present {
    ($target:expr, $update:expr; $($field:ident),+ $(,)?) => {
        $(
            if $update.$field.is_some() {
                $target.$field = $update.$field;
            }
        )+
    };
}

impl MergeRecord for Dataset {
    fn merge(&mut self, update: Self) {
        merge_present!(self, update;
            name, origin, exists, platform, data_platform_instance, properties,
            editable_properties, sub_types, view_properties, ownership, global_tags,
            glossary_terms, domain, container, parent_containers, deprecation, status,
            upstream, downstream, usage_stats, dataset_profiles, operations, assertions,
            test_results, read_runs, write_runs, siblings, stats_summary,
        );
    }
}

// ============================================================================
// MUTATIONS
// ============================================================================

/// Input for the dataset update mutation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetUpdateInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editable_properties: Option<DatasetEditablePropertiesUpdate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation: Option<DeprecationUpdate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetEditablePropertiesUpdate {
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeprecationUpdate {
    pub deprecated: bool,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub decommission_time: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_deserialize_partial_graphql_payload() {
        let json = r#"{
            "urn": "urn:li:dataset:(urn:li:dataPlatform:hive,db.orders,PROD)",
            "name": "db.orders",
            "origin": "PROD",
            "platform": {"urn": "urn:li:dataPlatform:hive", "name": "hive"},
            "subTypes": {"typeNames": ["view"]},
            "viewProperties": {"materialized": false, "logic": "select 1", "language": "SQL"},
            "upstream": {"total": 2}
        }"#;

        let dataset: Dataset = serde_json::from_str(json).unwrap();
        assert_eq!(dataset.origin, Some(FabricType::Prod));
        assert!(dataset.has_sub_type("view"));
        assert_eq!(dataset.view_logic(), Some("select 1"));
        assert_eq!(total_of(dataset.upstream.as_ref()), 2);
        assert_eq!(total_of(dataset.downstream.as_ref()), 0);
        assert_eq!(dataset.properties, None);
        assert_eq!(dataset.usage_bucket_count(), 0);
    }

    #[test]
    fn test_custom_properties_exposed_generically() {
        let mut dataset = Dataset::new("urn:li:dataset:x");
        assert!(dataset.custom_properties().is_none());

        dataset.properties = Some(DatasetProperties {
            custom_properties: Some(vec![CustomPropertiesEntry {
                key: "owner_team".into(),
                value: Some("payments".into()),
            }]),
            ..DatasetProperties::default()
        });
        assert_eq!(dataset.custom_properties().map(<[_]>::len), Some(1));
    }

    #[test]
    fn test_merge_keeps_absent_fields() {
        let mut current = Dataset::new("urn:li:dataset:x");
        current.name = Some("orders".into());
        current.deprecation = Some(Deprecation {
            deprecated: Some(false),
            ..Deprecation::default()
        });

        let mut update = Dataset::new("urn:li:dataset:x");
        update.deprecation = Some(Deprecation {
            deprecated: Some(true),
            note: Some("use orders_v2".into()),
            ..Deprecation::default()
        });

        current.merge(update);
        assert_eq!(current.name.as_deref(), Some("orders"));
        assert_eq!(
            current.deprecation.and_then(|d| d.note),
            Some("use orders_v2".to_string())
        );
    }
}
