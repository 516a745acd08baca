//! Profile composition.
//!
//! Binds a kind's [`ProfileDescriptor`] to the current fetch state: resolves
//! the header's generic properties, runs the visibility engine over tabs and
//! sidebar sections, filters header actions, and picks the selected tab.
//!
//! ```text
//! FetchState ─► record? ─┬─► generic_entity_properties ─► header
//!                        ├─► visible_panels(sidebar)   ─► sidebar
//!                        └─► visible_panels(tabs)      ─► tabs ─► selected tab
//! ```

use std::collections::BTreeSet;

use catalog_types::EntityType;
use serde::Serialize;
use tracing::debug;

use crate::entity::{Entity, EntityMenuItem};
use crate::fetch::FetchState;
use crate::panel::{visible_panels, ComponentId, PanelDeclaration, PanelState};
use crate::properties::GenericEntityProperties;

/// Optional component rendered between the header and the tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubHeader {
    pub component: ComponentId,
}

/// Static profile layout for one entity kind.
#[derive(Debug)]
pub struct ProfileDescriptor<R> {
    pub entity_type: EntityType,
    pub header_dropdown_items: BTreeSet<EntityMenuItem>,
    pub sub_header: Option<SubHeader>,
    pub tabs: Vec<PanelDeclaration<R>>,
    pub sidebar_sections: Vec<PanelDeclaration<R>>,
}

impl<R> ProfileDescriptor<R> {
    pub fn tab(&self, name: &str) -> Option<&PanelDeclaration<R>> {
        self.tabs.iter().find(|t| t.name == Some(name))
    }
}

/// Caller choices that shape one composition.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComposeOptions<'a> {
    /// Tab requested by the caller (e.g. from the route).
    pub selected_tab: Option<&'a str>,
    /// Tab to prefer when the caller did not choose one.
    pub default_tab: Option<&'a str>,
}

/// What the body of a panel receives.
pub struct PanelProps<'a, R> {
    pub urn: &'a str,
    pub record: Option<&'a R>,
    pub config: Option<&'a serde_json::Value>,
    pub enabled: bool,
}

/// A panel that survived visibility filtering.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedPanel<'a, R> {
    pub name: Option<&'static str>,
    pub component: ComponentId,
    pub enabled: bool,
    pub config: Option<&'a serde_json::Value>,
    #[serde(skip)]
    urn: &'a str,
    #[serde(skip)]
    record: Option<&'a R>,
}

impl<'a, R> RenderedPanel<'a, R> {
    fn new(state: PanelState<'a, R>, urn: &'a str, record: Option<&'a R>) -> Self {
        Self {
            name: state.declaration.name,
            component: state.declaration.component,
            enabled: state.is_enabled,
            config: state.declaration.properties.as_ref(),
            urn,
            record,
        }
    }

    /// Props for the panel body. The body is built even when disabled.
    pub fn props(&self) -> PanelProps<'a, R> {
        PanelProps {
            urn: self.urn,
            record: self.record,
            config: self.config,
            enabled: self.enabled,
        }
    }
}

impl<R> std::fmt::Debug for RenderedPanel<'_, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderedPanel")
            .field("name", &self.name)
            .field("component", &self.component)
            .field("enabled", &self.enabled)
            .finish()
    }
}

/// Fetch status as shown by the profile shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ProfileStatus {
    Loading,
    Error { code: &'static str, message: String },
    Ready,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileHeader {
    pub title: Option<String>,
    pub entity_type: EntityType,
    pub entity_name: &'static str,
    pub properties: Option<GenericEntityProperties>,
    pub menu_items: Vec<EntityMenuItem>,
}

/// One renderable profile.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityProfile<'a, R> {
    pub urn: &'a str,
    pub status: ProfileStatus,
    pub header: ProfileHeader,
    pub sub_header: Option<SubHeader>,
    pub sidebar: Vec<RenderedPanel<'a, R>>,
    pub tabs: Vec<RenderedPanel<'a, R>>,
    pub selected_tab: Option<&'static str>,
}

impl<R> EntityProfile<'_, R> {
    pub fn tab(&self, name: &str) -> Option<&RenderedPanel<'_, R>> {
        self.tabs.iter().find(|t| t.name == Some(name))
    }

    pub fn has_section(&self, component: ComponentId) -> bool {
        self.sidebar.iter().any(|s| s.component == component)
    }
}

/// Compose the profile for `urn` from the current fetch state.
pub fn compose_profile<'a, E: Entity>(
    entity: &'a E,
    urn: &'a str,
    state: &'a FetchState<E::Data>,
    options: ComposeOptions<'_>,
) -> EntityProfile<'a, E::Data> {
    let descriptor = entity.profile();
    let record = state.record();

    let status = match state {
        FetchState::Loading => ProfileStatus::Loading,
        FetchState::Error(err) => ProfileStatus::Error {
            code: err.code(),
            message: err.to_string(),
        },
        FetchState::Ready(_) => ProfileStatus::Ready,
    };

    let properties = entity.generic_entity_properties(record);
    let header = ProfileHeader {
        title: properties.as_ref().and_then(|p| p.name.clone()),
        entity_type: descriptor.entity_type,
        entity_name: entity.entity_name(),
        properties,
        menu_items: supported_menu_items(entity, &descriptor.header_dropdown_items),
    };

    let sidebar: Vec<_> = visible_panels(&descriptor.sidebar_sections, record)
        .into_iter()
        .map(|s| RenderedPanel::new(s, urn, record))
        .collect();
    let tabs: Vec<_> = visible_panels(&descriptor.tabs, record)
        .into_iter()
        .map(|s| RenderedPanel::new(s, urn, record))
        .collect();

    let options = ComposeOptions {
        selected_tab: options.selected_tab,
        default_tab: options.default_tab.or_else(|| entity.default_tab()),
    };
    let selected_tab = select_tab(&tabs, options);
    debug!(
        urn,
        status = ?status,
        tabs = tabs.len(),
        sidebar = sidebar.len(),
        selected_tab,
        "Composed entity profile"
    );

    EntityProfile {
        urn,
        status,
        header,
        sub_header: descriptor.sub_header,
        sidebar,
        tabs,
        selected_tab,
    }
}

/// Declared header actions whose required capability the kind supports.
fn supported_menu_items<E: Entity>(
    entity: &E,
    declared: &BTreeSet<EntityMenuItem>,
) -> Vec<EntityMenuItem> {
    let capabilities = entity.supported_capabilities();
    declared
        .iter()
        .copied()
        .filter(|item| match item.required_capability() {
            Some(capability) if !capabilities.contains(&capability) => {
                debug!(item = ?item, capability = ?capability, "Dropping unsupported menu item");
                false
            }
            _ => true,
        })
        .collect()
}

/// Caller's choice if rendered, else the default tab if rendered and enabled,
/// else the first enabled tab.
fn select_tab<R>(
    tabs: &[RenderedPanel<'_, R>],
    options: ComposeOptions<'_>,
) -> Option<&'static str> {
    let rendered = |name: &str| tabs.iter().find(|t| t.name == Some(name));

    if let Some(requested) = options.selected_tab {
        if let Some(tab) = rendered(requested) {
            return tab.name;
        }
        debug!(requested, "Requested tab is not rendered, falling back");
    }

    if let Some(tab) = options.default_tab.and_then(rendered).filter(|t| t.enabled) {
        return tab.name;
    }

    tabs.iter().find(|t| t.enabled).and_then(|t| t.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{
        EntityCapabilityType, IconGlyph, IconSpec, IconStyleType, LineageVizConfig, PreviewType,
    };
    use crate::error::FetchError;
    use crate::panel::PanelDisplay;
    use crate::preview::SummaryViewModel;
    use crate::properties::OverrideProperties;
    use catalog_types::{Dataset, SearchResult};
    use pretty_assertions::assert_eq;

    const BODY: ComponentId = ComponentId::new("Body");
    const ABOUT: ComponentId = ComponentId::new("About");

    fn has_name(record: Option<&Dataset>) -> bool {
        record.and_then(|d| d.name.as_deref()).is_some()
    }

    struct TestEntity {
        descriptor: ProfileDescriptor<Dataset>,
        capabilities: BTreeSet<EntityCapabilityType>,
        default_tab: Option<&'static str>,
    }

    impl TestEntity {
        fn new(capabilities: &[EntityCapabilityType]) -> Self {
            Self {
                descriptor: ProfileDescriptor {
                    entity_type: EntityType::Dataset,
                    header_dropdown_items: [
                        EntityMenuItem::UpdateDeprecation,
                        EntityMenuItem::CopyUrl,
                    ]
                    .into_iter()
                    .collect(),
                    sub_header: None,
                    tabs: vec![
                        PanelDeclaration::tab("Gated", BODY)
                            .with_display(PanelDisplay::data_gated(has_name)),
                        PanelDeclaration::tab("Disabled", BODY)
                            .with_display(PanelDisplay::new(|_| true, |_| false)),
                        PanelDeclaration::tab("Plain", BODY),
                    ],
                    sidebar_sections: vec![PanelDeclaration::section(ABOUT)],
                },
                capabilities: capabilities.iter().copied().collect(),
                default_tab: None,
            }
        }
    }

    impl Entity for TestEntity {
        type Data = Dataset;
        type SearchData = Dataset;

        fn entity_type(&self) -> EntityType {
            EntityType::Dataset
        }

        fn icon(&self, font_size: u32, _: IconStyleType) -> IconSpec {
            IconSpec {
                glyph: IconGlyph::Outlined("Test"),
                font_size,
                color: None,
            }
        }

        fn is_search_enabled(&self) -> bool {
            false
        }

        fn is_browse_enabled(&self) -> bool {
            false
        }

        fn is_lineage_enabled(&self) -> bool {
            false
        }

        fn auto_complete_field_name(&self) -> &'static str {
            "name"
        }

        fn path_name(&self) -> &'static str {
            "test"
        }

        fn entity_name(&self) -> &'static str {
            "Test"
        }

        fn collection_name(&self) -> &'static str {
            "Tests"
        }

        fn profile(&self) -> &ProfileDescriptor<Dataset> {
            &self.descriptor
        }

        fn override_properties(&self, _: Option<&Dataset>) -> OverrideProperties {
            OverrideProperties::default()
        }

        fn render_preview(&self, _: PreviewType, _: &Dataset) -> SummaryViewModel {
            SummaryViewModel::default()
        }

        fn render_search(&self, _: &SearchResult<Dataset>) -> SummaryViewModel {
            SummaryViewModel::default()
        }

        fn lineage_viz_config(&self, data: &Dataset) -> LineageVizConfig {
            LineageVizConfig {
                urn: data.urn.clone(),
                name: None,
                expanded_name: None,
                entity_type: EntityType::Dataset,
                subtype: None,
                icon: None,
                platform: None,
            }
        }

        fn display_name(&self, data: &Dataset) -> String {
            data.urn.clone()
        }

        fn platform_logo_url(&self, _: &Dataset) -> Option<String> {
            None
        }

        fn supported_capabilities(&self) -> BTreeSet<EntityCapabilityType> {
            self.capabilities.clone()
        }

        fn default_tab(&self) -> Option<&str> {
            self.default_tab
        }
    }

    fn compose<'a>(
        entity: &'a TestEntity,
        state: &'a FetchState<Dataset>,
    ) -> EntityProfile<'a, Dataset> {
        compose_profile(entity, "urn:li:dataset:x", state, ComposeOptions::default())
    }

    fn tab_names<R>(profile: &EntityProfile<'_, R>) -> Vec<(&'static str, bool)> {
        profile
            .tabs
            .iter()
            .map(|t| (t.name.unwrap_or_default(), t.enabled))
            .collect()
    }

    #[test]
    fn test_loading_keeps_default_panels_only() {
        let entity = TestEntity::new(&[]);
        let state = FetchState::Loading;
        let profile = compose(&entity, &state);

        assert_eq!(profile.status, ProfileStatus::Loading);
        assert_eq!(
            tab_names(&profile),
            vec![("Disabled", false), ("Plain", true)]
        );
        assert!(profile.has_section(ABOUT));
        assert_eq!(profile.header.properties, None);
        assert_eq!(profile.selected_tab, Some("Plain"));
    }

    #[test]
    fn test_error_state_reports_code() {
        let entity = TestEntity::new(&[]);
        let state = FetchState::Error(FetchError::Transport("connection reset".into()));
        let profile = compose(&entity, &state);

        assert_eq!(
            profile.status,
            ProfileStatus::Error {
                code: "TRANSPORT",
                message: "Transport error: connection reset".into()
            }
        );
        assert!(profile.tab("Gated").is_none());
    }

    #[test]
    fn test_ready_state_selects_first_enabled_tab() {
        let entity = TestEntity::new(&[]);
        let mut dataset = Dataset::new("urn:li:dataset:x");
        dataset.name = Some("orders".into());
        let state = FetchState::Ready(dataset);
        let profile = compose(&entity, &state);

        assert_eq!(
            tab_names(&profile),
            vec![("Gated", true), ("Disabled", false), ("Plain", true)]
        );
        assert_eq!(profile.selected_tab, Some("Gated"));
        assert_eq!(profile.header.title.as_deref(), Some("orders"));
    }

    #[test]
    fn test_caller_selection_wins_when_rendered() {
        let entity = TestEntity::new(&[]);
        let state = FetchState::Loading;
        let options = ComposeOptions {
            selected_tab: Some("Disabled"),
            default_tab: None,
        };
        let profile = compose_profile(&entity, "urn:li:dataset:x", &state, options);
        assert_eq!(profile.selected_tab, Some("Disabled"));

        let options = ComposeOptions {
            selected_tab: Some("Gated"),
            default_tab: Some("Plain"),
        };
        let profile = compose_profile(&entity, "urn:li:dataset:x", &state, options);
        assert_eq!(profile.selected_tab, Some("Plain"));
    }

    #[test]
    fn test_disabled_default_tab_is_skipped() {
        let entity = TestEntity::new(&[]);
        let state = FetchState::Loading;
        let options = ComposeOptions {
            selected_tab: None,
            default_tab: Some("Disabled"),
        };
        let profile = compose_profile(&entity, "urn:li:dataset:x", &state, options);
        assert_eq!(profile.selected_tab, Some("Plain"));
    }

    #[test]
    fn test_entity_default_tab_applies_without_options() {
        let mut entity = TestEntity::new(&[]);
        entity.default_tab = Some("Plain");
        let mut dataset = Dataset::new("urn:li:dataset:x");
        dataset.name = Some("orders".into());
        let state = FetchState::Ready(dataset);

        assert_eq!(compose(&entity, &state).selected_tab, Some("Plain"));

        let options = ComposeOptions {
            selected_tab: None,
            default_tab: Some("Gated"),
        };
        let profile = compose_profile(&entity, "urn:li:dataset:x", &state, options);
        assert_eq!(profile.selected_tab, Some("Gated"));
    }

    #[test]
    fn test_menu_items_filtered_by_capability() {
        let state = FetchState::Loading;

        let without = TestEntity::new(&[]);
        let profile = compose(&without, &state);
        assert_eq!(profile.header.menu_items, vec![EntityMenuItem::CopyUrl]);

        let with = TestEntity::new(&[EntityCapabilityType::Deprecation]);
        let profile = compose(&with, &state);
        assert_eq!(
            profile.header.menu_items,
            vec![EntityMenuItem::CopyUrl, EntityMenuItem::UpdateDeprecation]
        );
    }

    #[test]
    fn test_disabled_panel_props_still_built() {
        let entity = TestEntity::new(&[]);
        let state = FetchState::Loading;
        let profile = compose(&entity, &state);

        let props = profile.tab("Disabled").map(RenderedPanel::props).unwrap();
        assert!(!props.enabled);
        assert!(props.record.is_none());
        assert_eq!(props.urn, "urn:li:dataset:x");
    }

    #[test]
    fn test_profile_serializes_without_record() {
        let entity = TestEntity::new(&[]);
        let state = FetchState::Loading;
        let profile = compose(&entity, &state);
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["status"]["state"], "loading");
        assert_eq!(json["tabs"][0]["name"], "Disabled");
        assert!(json["tabs"][0].get("record").is_none());
    }
}
