//! Dataset entity descriptor
//!
//! ```text
//! DatasetEntity ──impl Entity──► profile()            (profile.rs, static table)
//!       │                        override_properties() (here)
//!       │                        render_preview/search (preview.rs, snippet.rs)
//!       └─ ProfileConfig         lineage_viz_config    (preview.rs)
//! ```

mod preview;
pub mod profile;
pub mod snippet;
pub mod store;

use std::collections::BTreeSet;

use anyhow::{bail, Result};
use catalog_types::{non_empty, Dataset, DatasetSearchEntity, EntityType, SearchResult};
use entity_profile::{
    capitalize_first_letter, compose_profile, ComposeOptions, Entity, EntityCapabilityType,
    EntityProfile, FetchState, GenericEntityProperties, IconGlyph, IconSpec, IconStyleType,
    LineageVizConfig, OverrideProperties, PreviewType, ProfileDescriptor, PropertiesBag,
    ResolveOptions, SummaryViewModel,
};
use tracing::debug;

use crate::config::ProfileConfig;

pub use profile::{dataset_profile, tab_names};
pub use store::InMemoryDatasetStore;

const DATABASE_SVG_PATH: &str = "M832 64H192c-17.7 0-32 14.3-32 32v832c0 17.7 14.3 32 32 32h640c17.7 0 32-14.3 32-32V96c0-17.7-14.3-32-32-32zm-600 72h560v208H232V136zm560 480H232V408h560v208zm0 272H232V680h560v208zM304 240a40 40 0 1080 0 40 40 0 10-80 0zm0 272a40 40 0 1080 0 40 40 0 10-80 0zm0 272a40 40 0 1080 0 40 40 0 10-80 0z";

/// Descriptor for the `Dataset` kind.
#[derive(Debug, Clone, Default)]
pub struct DatasetEntity {
    config: ProfileConfig,
}

impl DatasetEntity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Descriptor with loaded settings. A configured default tab must be one
    /// the dataset profile declares.
    pub fn with_config(config: ProfileConfig) -> Result<Self> {
        if let Some(tab) = config.default_tab.as_deref() {
            if !tab_names().any(|name| name == tab) {
                bail!(
                    "default_tab '{tab}' is not a dataset tab (expected one of: {})",
                    tab_names().collect::<Vec<_>>().join(", ")
                );
            }
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &ProfileConfig {
        &self.config
    }

    /// Compose a profile, falling back to the configured default tab.
    pub fn compose<'a>(
        &'a self,
        urn: &'a str,
        state: &'a FetchState<Dataset>,
        selected_tab: Option<&str>,
    ) -> EntityProfile<'a, Dataset> {
        compose_profile(
            self,
            urn,
            state,
            ComposeOptions {
                selected_tab,
                default_tab: None,
            },
        )
    }

    fn resolve(&self, dataset: &Dataset) -> GenericEntityProperties {
        self.generic_entity_properties(Some(dataset))
            .unwrap_or_default()
    }
}

impl Entity for DatasetEntity {
    type Data = Dataset;
    type SearchData = DatasetSearchEntity;

    fn entity_type(&self) -> EntityType {
        EntityType::Dataset
    }

    fn icon(&self, font_size: u32, style: IconStyleType) -> IconSpec {
        let (glyph, color) = match style {
            IconStyleType::TabView => (IconGlyph::Outlined("DatabaseOutlined"), None),
            IconStyleType::Highlight => (
                IconGlyph::Filled("DatabaseFilled"),
                Some(self.config.highlight_color.clone()),
            ),
            IconStyleType::Svg => (IconGlyph::SvgPath(DATABASE_SVG_PATH), None),
            IconStyleType::Accent => (
                IconGlyph::Outlined("DatabaseOutlined"),
                Some(self.config.muted_color.clone()),
            ),
        };
        IconSpec {
            glyph,
            font_size,
            color,
        }
    }

    fn is_search_enabled(&self) -> bool {
        true
    }

    fn is_browse_enabled(&self) -> bool {
        true
    }

    fn is_lineage_enabled(&self) -> bool {
        true
    }

    fn auto_complete_field_name(&self) -> &'static str {
        "name"
    }

    fn path_name(&self) -> &'static str {
        "dataset"
    }

    fn entity_name(&self) -> &'static str {
        "Dataset"
    }

    fn collection_name(&self) -> &'static str {
        "Datasets"
    }

    fn profile(&self) -> &ProfileDescriptor<Dataset> {
        dataset_profile()
    }

    fn override_properties(&self, data: Option<&Dataset>) -> OverrideProperties {
        let Some(dataset) = data else {
            return OverrideProperties::default();
        };

        // Most specific subtype first; an empty label means "no override".
        let entity_type_override = dataset
            .sub_types
            .as_ref()
            .map(|s| s.first().map(capitalize_first_letter).unwrap_or_default())
            .unwrap_or_default();

        let properties = dataset.properties.as_ref().map(|p| PropertiesBag {
            name: p.name.clone(),
            description: p.description.clone(),
            external_url: p.external_url.clone(),
            qualified_name: non_empty(p.qualified_name.as_deref())
                .or_else(|| non_empty(dataset.name.as_deref()))
                .map(str::to_owned),
        });

        OverrideProperties {
            name: preview::dataset_name(dataset).map(str::to_owned),
            external_url: dataset
                .properties
                .as_ref()
                .and_then(|p| p.external_url.clone()),
            entity_type_override: Some(entity_type_override),
            properties,
        }
    }

    fn render_preview(&self, preview_type: PreviewType, data: &Dataset) -> SummaryViewModel {
        debug!(urn = %data.urn, preview_type = ?preview_type, "Rendering dataset preview");
        preview::preview_summary(&self.resolve(data), data)
    }

    fn render_search(&self, result: &SearchResult<DatasetSearchEntity>) -> SummaryViewModel {
        let generic = self.resolve(&result.entity.dataset);
        preview::search_summary(&generic, result)
    }

    fn lineage_viz_config(&self, data: &Dataset) -> LineageVizConfig {
        preview::lineage_config(data)
    }

    fn display_name(&self, data: &Dataset) -> String {
        preview::dataset_name(data)
            .unwrap_or(&data.urn)
            .to_string()
    }

    fn platform_logo_url(&self, data: &Dataset) -> Option<String> {
        data.platform
            .as_ref()
            .and_then(|p| p.logo_url())
            .map(str::to_owned)
    }

    fn supported_capabilities(&self) -> BTreeSet<EntityCapabilityType> {
        [
            EntityCapabilityType::Owners,
            EntityCapabilityType::GlossaryTerms,
            EntityCapabilityType::Tags,
            EntityCapabilityType::Domains,
            EntityCapabilityType::Deprecation,
            EntityCapabilityType::SoftDelete,
        ]
        .into_iter()
        .collect()
    }

    fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            hide_siblings: self.config.hide_siblings,
        }
    }

    fn default_tab(&self) -> Option<&str> {
        self.config.default_tab.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_types::{DatasetProperties, SubTypes};
    use pretty_assertions::assert_eq;

    fn with_sub_types(names: &[&str]) -> Dataset {
        let mut dataset = Dataset::new("urn:li:dataset:x");
        dataset.sub_types = Some(SubTypes {
            type_names: Some(names.iter().map(|n| n.to_string()).collect()),
        });
        dataset
    }

    #[test]
    fn test_subtype_override_capitalized() {
        let entity = DatasetEntity::new();
        let overrides = entity.override_properties(Some(&with_sub_types(&["view", "table"])));
        assert_eq!(overrides.entity_type_override.as_deref(), Some("View"));

        let overrides = entity.override_properties(Some(&Dataset::new("urn:li:dataset:x")));
        assert_eq!(overrides.entity_type_override.as_deref(), Some(""));
    }

    #[test]
    fn test_qualified_name_falls_back_to_name() {
        let mut dataset = Dataset::new("urn:li:dataset:x");
        dataset.name = Some("db.orders".into());
        dataset.properties = Some(DatasetProperties::default());

        let overrides = DatasetEntity::new().override_properties(Some(&dataset));
        assert_eq!(
            overrides.properties.and_then(|p| p.qualified_name),
            Some("db.orders".to_string())
        );
        assert_eq!(overrides.name.as_deref(), Some("db.orders"));
    }

    #[test]
    fn test_icon_styles() {
        let entity = DatasetEntity::new();
        let highlight = entity.icon(16, IconStyleType::Highlight);
        assert_eq!(highlight.glyph, IconGlyph::Filled("DatabaseFilled"));
        assert_eq!(highlight.color.as_deref(), Some("#B37FEB"));

        assert_eq!(entity.icon(16, IconStyleType::TabView).color, None);
        assert!(matches!(
            entity.icon(16, IconStyleType::Svg).glyph,
            IconGlyph::SvgPath(path) if path.starts_with("M832")
        ));
        assert_eq!(
            entity.icon(12, IconStyleType::Accent).color.as_deref(),
            Some("#BFBFBF")
        );
    }

    #[test]
    fn test_with_config_rejects_unknown_default_tab() {
        let config = ProfileConfig {
            default_tab: Some("Nope".into()),
            ..ProfileConfig::default()
        };
        let err = DatasetEntity::with_config(config).unwrap_err();
        assert!(err.to_string().contains("Nope"));

        let config = ProfileConfig {
            default_tab: Some(profile::TAB_SCHEMA.into()),
            ..ProfileConfig::default()
        };
        assert!(DatasetEntity::with_config(config).is_ok());
    }

    #[test]
    fn test_static_identity() {
        let entity = DatasetEntity::new();
        assert_eq!(entity.path_name(), "dataset");
        assert_eq!(entity.collection_name(), "Datasets");
        assert_eq!(entity.auto_complete_field_name(), "name");
        assert_eq!(entity.supported_capabilities().len(), 6);
    }
}
