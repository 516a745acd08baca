//! Summary view model for previews, search results and lineage cards.
//!
//! Kinds fill this from either a full record or a search hit. Title,
//! description and platform fields must come from the same precedence the
//! profile header uses, so the builders here take the resolved
//! [`GenericEntityProperties`] rather than re-reading the record.

use catalog_types::{
    Container, Deprecation, Domain, EntityType, FabricType, GlobalTags, GlossaryTerms, Owner,
    ParentContainers, SearchInsight,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::properties::GenericEntityProperties;

/// How a matched value should be shown in a search snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "urn", rename_all = "snake_case")]
pub enum SnippetValue {
    Tag(String),
    GlossaryTerm(String),
    Text,
}

/// "Matches column customer_id" line under a search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSnippet {
    pub field_label: String,
    pub value: String,
    pub value_kind: SnippetValue,
}

/// Usage numbers shown on compact cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSummary {
    pub query_count_last_30_days: Option<u64>,
    pub unique_user_count_last_30_days: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryViewModel {
    pub urn: String,
    pub entity_type: Option<EntityType>,
    pub name: String,
    pub origin: Option<FabricType>,
    pub subtype: Option<String>,
    pub description: Option<String>,
    pub platform_name: Option<String>,
    pub platform_logo: Option<String>,
    pub platform_instance_id: Option<String>,
    /// Sibling platform names, index-aligned with `platform_logos`.
    pub platform_names: Option<Vec<Option<String>>>,
    pub platform_logos: Option<Vec<Option<String>>>,
    pub owners: Option<Vec<Owner>>,
    pub global_tags: Option<GlobalTags>,
    pub glossary_terms: Option<GlossaryTerms>,
    pub domain: Option<Domain>,
    pub deprecation: Option<Deprecation>,
    pub container: Option<Container>,
    pub parent_containers: Option<ParentContainers>,
    pub external_url: Option<String>,
    pub snippet: Option<SearchSnippet>,
    pub insights: Vec<SearchInsight>,
    pub stats_summary: Option<UsageSummary>,
    pub row_count: Option<i64>,
    pub last_updated_ms: Option<i64>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl SummaryViewModel {
    /// Seed a summary from resolved generic properties.
    ///
    /// Name, platform and relational fields are copied from `generic`; the
    /// caller adds kind-specific and search-specific fields afterwards.
    pub fn from_generic(generic: &GenericEntityProperties) -> Self {
        let platform = generic.platform.as_ref();
        Self {
            urn: generic.urn.clone(),
            entity_type: generic.entity_type,
            name: generic.name.clone().unwrap_or_else(|| generic.urn.clone()),
            platform_name: platform.and_then(|p| p.display_name()).map(str::to_owned),
            platform_logo: generic.platform_logo_url().map(str::to_owned),
            owners: generic.ownership.as_ref().and_then(|o| o.owners.clone()),
            global_tags: generic.global_tags.clone(),
            glossary_terms: generic.glossary_terms.clone(),
            domain: generic.domain.clone(),
            deprecation: generic.deprecation.clone(),
            container: generic.container.clone(),
            parent_containers: generic.parent_containers.clone(),
            external_url: generic.external_url.clone(),
            ..Self::default()
        }
    }

    /// Attach sibling platform names and logos from the resolver.
    pub fn with_sibling_platforms(mut self, generic: &GenericEntityProperties) -> Self {
        self.platform_names = generic.sibling_platform_names();
        self.platform_logos = generic.sibling_platform_logos();
        self
    }

    /// Set the last-updated time from epoch milliseconds.
    pub fn with_last_updated_ms(mut self, millis: Option<i64>) -> Self {
        self.last_updated_ms = millis;
        self.last_updated = millis.and_then(DateTime::from_timestamp_millis);
        self
    }
}
