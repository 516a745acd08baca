//! Dataset profile layout: tabs, sidebar sections and their data conditions.

use std::sync::OnceLock;

use catalog_types::{total_of, Dataset, EntityType, OwnershipType};
use entity_profile::{EntityMenuItem, PanelDeclaration, PanelDisplay, ProfileDescriptor, SubHeader};
use serde_json::json;

/// Subtype label marking a dataset as a view.
pub const SUBTYPE_VIEW: &str = "view";

pub const TAB_DOCUMENTATION: &str = "Documentation";
pub const TAB_PROPERTIES: &str = "Properties";
pub const TAB_SCHEMA: &str = "Schema";
pub const TAB_VIEW_DEFINITION: &str = "View Definition";
pub const TAB_LINEAGE: &str = "Lineage";
pub const TAB_QUERIES: &str = "Queries";
pub const TAB_STATS: &str = "Stats";
pub const TAB_VALIDATION: &str = "Validation";
pub const TAB_OPERATIONS: &str = "Operations";

/// Panel bodies referenced by the dataset profile.
pub mod components {
    use entity_profile::ComponentId;

    pub const DOCUMENTATION_TAB: ComponentId = ComponentId::new("DocumentationTab");
    pub const PROPERTIES_TAB: ComponentId = ComponentId::new("PropertiesTab");
    pub const SCHEMA_TAB: ComponentId = ComponentId::new("SchemaTab");
    pub const VIEW_DEFINITION_TAB: ComponentId = ComponentId::new("ViewDefinitionTab");
    pub const LINEAGE_TAB: ComponentId = ComponentId::new("LineageTab");
    pub const QUERIES_TAB: ComponentId = ComponentId::new("QueriesTab");
    pub const STATS_TAB: ComponentId = ComponentId::new("StatsTab");
    pub const VALIDATIONS_TAB: ComponentId = ComponentId::new("ValidationsTab");
    pub const OPERATIONS_TAB: ComponentId = ComponentId::new("OperationsTab");

    pub const ABOUT_SECTION: ComponentId = ComponentId::new("SidebarAboutSection");
    pub const OWNER_SECTION: ComponentId = ComponentId::new("SidebarOwnerSection");
    pub const SIBLINGS_SECTION: ComponentId = ComponentId::new("SidebarSiblingsSection");
    pub const VIEW_DEFINITION_SECTION: ComponentId =
        ComponentId::new("SidebarViewDefinitionSection");
    pub const TAGS_SECTION: ComponentId = ComponentId::new("SidebarTagsSection");
    pub const DOMAIN_SECTION: ComponentId = ComponentId::new("SidebarDomainSection");
    pub const RECOMMENDATIONS_SECTION: ComponentId =
        ComponentId::new("SidebarRecommendationsSection");

    pub const STATS_SUMMARY_SUB_HEADER: ComponentId =
        ComponentId::new("DatasetStatsSummarySubHeader");
}

// ── Predicates ────────────────────────────────────────────────
//
// Every predicate reads a missing record, field or count as "nothing there".

fn is_view(dataset: Option<&Dataset>) -> bool {
    dataset.is_some_and(|d| d.has_sub_type(SUBTYPE_VIEW))
}

fn has_view_logic(dataset: Option<&Dataset>) -> bool {
    dataset.and_then(Dataset::view_logic).is_some()
}

fn has_lineage(dataset: Option<&Dataset>) -> bool {
    dataset.is_some_and(|d| {
        total_of(d.upstream.as_ref()) > 0 || total_of(d.downstream.as_ref()) > 0
    })
}

fn has_usage(dataset: Option<&Dataset>) -> bool {
    dataset.is_some_and(|d| d.usage_bucket_count() > 0)
}

fn has_stats(dataset: Option<&Dataset>) -> bool {
    dataset.is_some_and(|d| {
        d.profile_count() > 0 || d.usage_bucket_count() > 0 || d.operation_count() > 0
    })
}

fn has_validations(dataset: Option<&Dataset>) -> bool {
    dataset.is_some_and(|d| total_of(d.assertions.as_ref()) > 0 || d.test_results.is_some())
}

fn has_runs(dataset: Option<&Dataset>) -> bool {
    dataset.is_some_and(|d| total_of(d.read_runs.as_ref()) + total_of(d.write_runs.as_ref()) > 0)
}

fn has_siblings(dataset: Option<&Dataset>) -> bool {
    dataset.is_some_and(|d| d.sibling_count() > 0)
}

// ── Declaration table ─────────────────────────────────────────

/// The dataset profile, built once per process.
pub fn dataset_profile() -> &'static ProfileDescriptor<Dataset> {
    static PROFILE: OnceLock<ProfileDescriptor<Dataset>> = OnceLock::new();
    PROFILE.get_or_init(build_profile)
}

fn build_profile() -> ProfileDescriptor<Dataset> {
    use components::*;

    ProfileDescriptor {
        entity_type: EntityType::Dataset,
        header_dropdown_items: [EntityMenuItem::UpdateDeprecation].into_iter().collect(),
        sub_header: Some(SubHeader {
            component: STATS_SUMMARY_SUB_HEADER,
        }),
        tabs: vec![
            PanelDeclaration::tab(TAB_DOCUMENTATION, DOCUMENTATION_TAB),
            PanelDeclaration::tab(TAB_PROPERTIES, PROPERTIES_TAB),
            PanelDeclaration::tab(TAB_SCHEMA, SCHEMA_TAB),
            PanelDeclaration::tab(TAB_VIEW_DEFINITION, VIEW_DEFINITION_TAB)
                .with_display(PanelDisplay::new(is_view, has_view_logic)),
            PanelDeclaration::tab(TAB_LINEAGE, LINEAGE_TAB)
                .with_display(PanelDisplay::data_gated(has_lineage)),
            PanelDeclaration::tab(TAB_QUERIES, QUERIES_TAB)
                .with_display(PanelDisplay::data_gated(has_usage)),
            PanelDeclaration::tab(TAB_STATS, STATS_TAB)
                .with_display(PanelDisplay::data_gated(has_stats)),
            PanelDeclaration::tab(TAB_VALIDATION, VALIDATIONS_TAB)
                .with_display(PanelDisplay::data_gated(has_validations)),
            PanelDeclaration::tab(TAB_OPERATIONS, OPERATIONS_TAB)
                .with_display(PanelDisplay::new(has_runs, has_runs)),
        ],
        sidebar_sections: vec![
            PanelDeclaration::section(ABOUT_SECTION),
            PanelDeclaration::section(OWNER_SECTION)
                .with_properties(json!({ "defaultOwnerType": OwnershipType::TechnicalOwner })),
            PanelDeclaration::section(SIBLINGS_SECTION)
                .with_display(PanelDisplay::visible_when(has_siblings)),
            PanelDeclaration::section(VIEW_DEFINITION_SECTION)
                .with_display(PanelDisplay::visible_when(has_view_logic)),
            PanelDeclaration::section(TAGS_SECTION)
                .with_properties(json!({ "hasTags": true, "hasTerms": true })),
            PanelDeclaration::section(DOMAIN_SECTION),
            PanelDeclaration::section(RECOMMENDATIONS_SECTION),
        ],
    }
}

/// Names of every declared tab, in order.
pub fn tab_names() -> impl Iterator<Item = &'static str> {
    dataset_profile().tabs.iter().filter_map(|t| t.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_types::{CountResult, TestResults, UsageAggregation, UsageStats};

    #[test]
    fn test_declaration_order() {
        assert_eq!(
            tab_names().collect::<Vec<_>>(),
            vec![
                TAB_DOCUMENTATION,
                TAB_PROPERTIES,
                TAB_SCHEMA,
                TAB_VIEW_DEFINITION,
                TAB_LINEAGE,
                TAB_QUERIES,
                TAB_STATS,
                TAB_VALIDATION,
                TAB_OPERATIONS
            ]
        );
        assert_eq!(dataset_profile().sidebar_sections.len(), 7);
    }

    #[test]
    fn test_predicates_total_over_absent_record() {
        for predicate in [
            is_view,
            has_view_logic,
            has_lineage,
            has_usage,
            has_stats,
            has_validations,
            has_runs,
            has_siblings,
        ] {
            assert!(!predicate(None));
            assert!(!predicate(Some(&Dataset::new("urn:li:dataset:empty"))));
        }
    }

    #[test]
    fn test_stats_enabled_by_any_series() {
        let mut dataset = Dataset::new("urn:li:dataset:x");
        dataset.usage_stats = Some(UsageStats {
            buckets: Some(vec![UsageAggregation::default()]),
        });
        assert!(has_stats(Some(&dataset)));
        assert!(has_usage(Some(&dataset)));
    }

    #[test]
    fn test_validation_enabled_by_test_results_alone() {
        let mut dataset = Dataset::new("urn:li:dataset:x");
        dataset.assertions = Some(CountResult { total: Some(0) });
        assert!(!has_validations(Some(&dataset)));

        dataset.test_results = Some(TestResults::default());
        assert!(has_validations(Some(&dataset)));
    }

    #[test]
    fn test_owner_section_defaults_to_technical_owner() {
        let owners = &dataset_profile().sidebar_sections[1];
        assert_eq!(owners.component, components::OWNER_SECTION);
        assert_eq!(
            owners.properties.as_ref().map(|p| p["defaultOwnerType"].clone()),
            Some(json!("TECHNICAL_OWNER"))
        );
    }
}
