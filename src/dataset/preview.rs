//! Compact projections of a dataset: preview cards, search hits, lineage nodes.
//!
//! Title and platform come from the resolved generic properties so previews
//! and the profile header can never disagree.

use catalog_types::{
    non_empty, Dataset, DatasetSearchEntity, DatasetStatsSummary, EntityType, SearchResult,
};
use entity_profile::{GenericEntityProperties, LineageVizConfig, SummaryViewModel, UsageSummary};

use super::snippet::dataset_search_snippet;

/// `properties.name`, else the top-level name.
pub(crate) fn dataset_name(dataset: &Dataset) -> Option<&str> {
    non_empty(dataset.properties.as_ref().and_then(|p| p.name.as_deref()))
        .or_else(|| non_empty(dataset.name.as_deref()))
}

/// User-edited description, else the ingested one.
fn description(dataset: &Dataset) -> Option<String> {
    non_empty(
        dataset
            .editable_properties
            .as_ref()
            .and_then(|p| p.description.as_deref()),
    )
    .or_else(|| {
        non_empty(
            dataset
                .properties
                .as_ref()
                .and_then(|p| p.description.as_deref()),
        )
    })
    .map(str::to_owned)
}

fn first_sub_type(dataset: &Dataset) -> Option<String> {
    dataset
        .sub_types
        .as_ref()
        .and_then(|s| s.first())
        .map(str::to_owned)
}

fn usage_summary(summary: &DatasetStatsSummary) -> UsageSummary {
    UsageSummary {
        query_count_last_30_days: summary.query_count_last_30_days,
        unique_user_count_last_30_days: summary.unique_user_count_last_30_days,
    }
}

/// Fields shared by preview and search cards.
fn base_summary(generic: &GenericEntityProperties, dataset: &Dataset) -> SummaryViewModel {
    SummaryViewModel {
        origin: dataset.origin,
        subtype: first_sub_type(dataset),
        description: description(dataset),
        platform_instance_id: dataset
            .data_platform_instance
            .as_ref()
            .and_then(|i| i.instance_id.clone()),
        ..SummaryViewModel::from_generic(generic)
    }
}

pub(crate) fn preview_summary(
    generic: &GenericEntityProperties,
    dataset: &Dataset,
) -> SummaryViewModel {
    base_summary(generic, dataset)
}

pub(crate) fn search_summary(
    generic: &GenericEntityProperties,
    hit: &SearchResult<DatasetSearchEntity>,
) -> SummaryViewModel {
    let dataset = &hit.entity.dataset;
    SummaryViewModel {
        snippet: dataset_search_snippet(&hit.matched_fields),
        insights: hit.insights.clone(),
        stats_summary: dataset.stats_summary.as_ref().map(usage_summary),
        row_count: hit.entity.latest_row_count(),
        ..base_summary(generic, dataset)
    }
    .with_sibling_platforms(generic)
    .with_last_updated_ms(hit.entity.latest_update_ms())
}

pub(crate) fn lineage_config(dataset: &Dataset) -> LineageVizConfig {
    let name = dataset_name(dataset).map(str::to_owned);
    let qualified_name = non_empty(
        dataset
            .properties
            .as_ref()
            .and_then(|p| p.qualified_name.as_deref()),
    );

    LineageVizConfig {
        urn: dataset.urn.clone(),
        expanded_name: qualified_name.map(str::to_owned).or_else(|| name.clone()),
        name,
        entity_type: EntityType::Dataset,
        subtype: first_sub_type(dataset),
        icon: dataset
            .platform
            .as_ref()
            .and_then(|p| p.logo_url())
            .map(str::to_owned),
        platform: dataset.platform.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_types::{DatasetEditableProperties, DatasetProperties, SubTypes};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_editable_description_wins() {
        let mut dataset = Dataset::new("urn:li:dataset:x");
        dataset.properties = Some(DatasetProperties {
            description: Some("ingested".into()),
            ..DatasetProperties::default()
        });
        assert_eq!(description(&dataset).as_deref(), Some("ingested"));

        dataset.editable_properties = Some(DatasetEditableProperties {
            description: Some("edited".into()),
        });
        assert_eq!(description(&dataset).as_deref(), Some("edited"));
    }

    #[test]
    fn test_lineage_expanded_name_precedence() {
        let mut dataset = Dataset::new("urn:li:dataset:x");
        dataset.name = Some("db.orders".into());
        dataset.sub_types = Some(SubTypes {
            type_names: Some(vec!["table".into()]),
        });

        let config = lineage_config(&dataset);
        assert_eq!(config.name.as_deref(), Some("db.orders"));
        assert_eq!(config.expanded_name.as_deref(), Some("db.orders"));
        assert_eq!(config.subtype.as_deref(), Some("table"));

        dataset.properties = Some(DatasetProperties {
            name: Some("orders".into()),
            qualified_name: Some("prod.db.orders".into()),
            ..DatasetProperties::default()
        });
        let config = lineage_config(&dataset);
        assert_eq!(config.name.as_deref(), Some("orders"));
        assert_eq!(config.expanded_name.as_deref(), Some("prod.db.orders"));
    }
}
