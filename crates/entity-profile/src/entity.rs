//! The per-kind entity descriptor interface.
//!
//! Each entity kind implements [`Entity`] once: static identity (kind tag,
//! route and display names, feature flags, capabilities), a profile
//! declaration table, and the pure projections over its record type. Generic
//! chrome dispatches on [`EntityType`] and only ever talks to this trait.

use std::collections::BTreeSet;

use catalog_types::{DataPlatform, EntityData, EntityType, SearchResult};
use serde::Serialize;

use crate::preview::SummaryViewModel;
use crate::profile::ProfileDescriptor;
use crate::properties::{
    data_for_entity_type, GenericEntityProperties, OverrideProperties, ResolveOptions,
};

/// Cross-cutting features a kind opts into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityCapabilityType {
    Owners,
    GlossaryTerms,
    Tags,
    Domains,
    Deprecation,
    SoftDelete,
}

/// Actions offered in the profile header dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityMenuItem {
    CopyUrl,
    UpdateDeprecation,
    AddTerm,
    AddTermGroup,
    Delete,
    Move,
}

impl EntityMenuItem {
    /// Capability the kind must support for this action to be offered.
    pub fn required_capability(&self) -> Option<EntityCapabilityType> {
        match self {
            Self::UpdateDeprecation => Some(EntityCapabilityType::Deprecation),
            Self::Delete => Some(EntityCapabilityType::SoftDelete),
            Self::CopyUrl | Self::AddTerm | Self::AddTermGroup | Self::Move => None,
        }
    }
}

/// Icon variants requested by different parts of the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IconStyleType {
    /// Outline glyph used in tab headers.
    TabView,
    /// Filled glyph in the kind's accent color.
    Highlight,
    /// Raw vector path.
    Svg,
    /// Muted outline glyph.
    Accent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum IconGlyph {
    Outlined(&'static str),
    Filled(&'static str),
    SvgPath(&'static str),
}

/// Presentational icon description. Purely data; drawing is elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IconSpec {
    pub glyph: IconGlyph,
    pub font_size: u32,
    pub color: Option<String>,
}

/// Contexts in which a compact preview is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PreviewType {
    Preview,
    MiniSearch,
    Browse,
    HoverCard,
}

/// Node description for the lineage graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineageVizConfig {
    pub urn: String,
    pub name: Option<String>,
    pub expanded_name: Option<String>,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub subtype: Option<String>,
    pub icon: Option<String>,
    pub platform: Option<DataPlatform>,
}

/// Descriptor for one entity kind.
pub trait Entity: Send + Sync {
    /// Record shape fetched for the profile view.
    type Data: EntityData;

    /// Record shape carried by search hits.
    type SearchData;

    fn entity_type(&self) -> EntityType;

    fn icon(&self, font_size: u32, style: IconStyleType) -> IconSpec;

    fn is_search_enabled(&self) -> bool;

    fn is_browse_enabled(&self) -> bool;

    fn is_lineage_enabled(&self) -> bool;

    fn auto_complete_field_name(&self) -> &'static str;

    /// Route segment, e.g. `dataset`.
    fn path_name(&self) -> &'static str;

    /// Singular display name, e.g. `Dataset`.
    fn entity_name(&self) -> &'static str;

    /// Plural display name, e.g. `Datasets`.
    fn collection_name(&self) -> &'static str;

    /// Static profile declaration table.
    fn profile(&self) -> &ProfileDescriptor<Self::Data>;

    /// Kind-specific values laid over the generic property model.
    fn override_properties(&self, data: Option<&Self::Data>) -> OverrideProperties;

    fn render_preview(&self, preview_type: PreviewType, data: &Self::Data) -> SummaryViewModel;

    fn render_search(&self, result: &SearchResult<Self::SearchData>) -> SummaryViewModel;

    fn lineage_viz_config(&self, data: &Self::Data) -> LineageVizConfig;

    fn display_name(&self, data: &Self::Data) -> String;

    fn platform_logo_url(&self, data: &Self::Data) -> Option<String>;

    fn supported_capabilities(&self) -> BTreeSet<EntityCapabilityType>;

    fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions::default()
    }

    /// Tab selected when the caller names no default of its own.
    fn default_tab(&self) -> Option<&str> {
        None
    }

    fn generic_entity_properties(
        &self,
        data: Option<&Self::Data>,
    ) -> Option<GenericEntityProperties> {
        data_for_entity_type(
            data,
            self.entity_type(),
            |d| self.override_properties(d),
            self.resolve_options(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_item_capability_requirements() {
        assert_eq!(
            EntityMenuItem::UpdateDeprecation.required_capability(),
            Some(EntityCapabilityType::Deprecation)
        );
        assert_eq!(
            EntityMenuItem::Delete.required_capability(),
            Some(EntityCapabilityType::SoftDelete)
        );
        assert_eq!(EntityMenuItem::CopyUrl.required_capability(), None);
    }

    #[test]
    fn test_icon_glyph_serializes_tagged() {
        let spec = IconSpec {
            glyph: IconGlyph::Outlined("DatabaseOutlined"),
            font_size: 14,
            color: None,
        };
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["glyph"]["kind"], "outlined");
        assert_eq!(json["fontSize"], 14);
    }
}
