//! Generic entity properties and the override merge.
//!
//! Every entity kind is rendered by the same profile shell, which only knows
//! about `GenericEntityProperties`. The generic view is built from the common
//! accessors of [`EntityData`], then the kind's own computed values
//! ([`OverrideProperties`]) are laid on top.
//!
//! Precedence, highest first:
//!
//! | Field | Order |
//! |-------|-------|
//! | name | override name → top-level name → identifier |
//! | external URL | override → none |
//! | subtype label | override (empty = no override) |
//! | properties bag | override → none |

use catalog_types::{
    non_empty, Container, CustomPropertiesEntry, DataPlatform, Deprecation, Domain, EntityData,
    EntityType, GlobalTags, GlossaryTerms, Ownership, ParentContainers, Status,
};
use serde::Serialize;

/// Canonical properties bag shared by every kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertiesBag {
    pub name: Option<String>,
    pub description: Option<String>,
    pub external_url: Option<String>,
    pub qualified_name: Option<String>,
}

/// Values a kind computes for itself, replacing the generic ones.
///
/// `None` means "no opinion"; the generic value stays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverrideProperties {
    pub name: Option<String>,
    pub external_url: Option<String>,
    /// Display label for the kind's subtype. An empty string is an explicit
    /// "no override".
    pub entity_type_override: Option<String>,
    pub properties: Option<PropertiesBag>,
}

/// Kind-agnostic property model consumed by the profile shell.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericEntityProperties {
    pub urn: String,
    pub entity_type: Option<EntityType>,
    pub name: Option<String>,
    pub external_url: Option<String>,
    pub entity_type_override: Option<String>,
    pub properties: Option<PropertiesBag>,
    pub platform: Option<DataPlatform>,
    pub sibling_platforms: Option<Vec<DataPlatform>>,
    pub custom_properties: Option<Vec<CustomPropertiesEntry>>,
    pub ownership: Option<Ownership>,
    pub global_tags: Option<GlobalTags>,
    pub glossary_terms: Option<GlossaryTerms>,
    pub domain: Option<Domain>,
    pub container: Option<Container>,
    pub parent_containers: Option<ParentContainers>,
    pub deprecation: Option<Deprecation>,
    pub status: Option<Status>,
}

impl GenericEntityProperties {
    /// Subtype label to show instead of the kind name, if any.
    pub fn subtype_label(&self) -> Option<&str> {
        non_empty(self.entity_type_override.as_deref())
    }

    pub fn platform_logo_url(&self) -> Option<&str> {
        self.platform.as_ref().and_then(DataPlatform::logo_url)
    }

    /// Display names of the merged sibling platforms, index-aligned with
    /// [`Self::sibling_platform_logos`].
    pub fn sibling_platform_names(&self) -> Option<Vec<Option<String>>> {
        self.sibling_platforms.as_ref().map(|platforms| {
            platforms
                .iter()
                .map(|p| p.display_name().map(str::to_owned))
                .collect()
        })
    }

    pub fn sibling_platform_logos(&self) -> Option<Vec<Option<String>>> {
        self.sibling_platforms.as_ref().map(|platforms| {
            platforms
                .iter()
                .map(|p| p.logo_url().map(str::to_owned))
                .collect()
        })
    }
}

/// Options that change how the generic view is assembled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Skip sibling platform resolution (sibling-merged views disabled).
    pub hide_siblings: bool,
}

/// Build the generic property model for one record.
///
/// Returns `None` only when there is no record. The name is never left empty
/// for a record with a non-empty identifier.
pub fn data_for_entity_type<T, F>(
    data: Option<&T>,
    entity_type: EntityType,
    get_override_properties: F,
    options: ResolveOptions,
) -> Option<GenericEntityProperties>
where
    T: EntityData,
    F: FnOnce(Option<&T>) -> OverrideProperties,
{
    let data = data?;

    let mut generic = GenericEntityProperties {
        urn: data.urn().to_string(),
        entity_type: Some(entity_type),
        name: non_empty(data.name()).map(str::to_owned),
        platform: data.platform().cloned(),
        custom_properties: data.custom_properties().map(<[_]>::to_vec),
        ownership: data.ownership().cloned(),
        global_tags: data.global_tags().cloned(),
        glossary_terms: data.glossary_terms().cloned(),
        domain: data.domain().and_then(|d| d.domain.clone()),
        container: data.container().cloned(),
        parent_containers: data.parent_containers().cloned(),
        deprecation: data.deprecation().cloned(),
        status: data.status().cloned(),
        ..GenericEntityProperties::default()
    };

    if !options.hide_siblings {
        generic.sibling_platforms = sibling_platforms(data, entity_type);
    }

    apply_overrides(&mut generic, get_override_properties(Some(data)));

    if generic.name.is_none() && !generic.urn.is_empty() {
        generic.name = Some(generic.urn.clone());
    }

    Some(generic)
}

fn apply_overrides(generic: &mut GenericEntityProperties, overrides: OverrideProperties) {
    if let Some(name) = overrides.name.filter(|n| !n.is_empty()) {
        generic.name = Some(name);
    }
    if overrides.external_url.is_some() {
        generic.external_url = overrides.external_url;
    }
    if overrides.entity_type_override.is_some() {
        generic.entity_type_override = overrides.entity_type_override;
    }
    if overrides.properties.is_some() {
        generic.properties = overrides.properties;
    }
}

/// Platforms of a record and its first existing sibling, primary first.
fn sibling_platforms<T: EntityData>(
    data: &T,
    entity_type: EntityType,
) -> Option<Vec<DataPlatform>> {
    let siblings = data.siblings()?;
    let sibling = siblings
        .siblings
        .as_ref()?
        .iter()
        .find(|s| s.exists.unwrap_or(true))?;

    let sibling_platform = data_for_entity_type(
        Some(sibling),
        sibling.entity_type.unwrap_or(entity_type),
        |_| OverrideProperties::default(),
        ResolveOptions {
            hide_siblings: true,
        },
    )
    .and_then(|generic| generic.platform);

    let own_platform = data.platform().cloned();
    let ordered = if siblings.is_primary.unwrap_or(false) {
        [own_platform, sibling_platform]
    } else {
        [sibling_platform, own_platform]
    };

    let platforms: Vec<DataPlatform> = ordered.into_iter().flatten().collect();
    (!platforms.is_empty()).then_some(platforms)
}

/// Upper-case the first character, leaving the rest untouched.
pub fn capitalize_first_letter(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
