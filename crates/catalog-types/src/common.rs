//! Types shared by every entity kind: platforms, ownership, tags, terms,
//! domains, containers, deprecation and sibling links.

use serde::{Deserialize, Serialize};

use crate::{non_empty, EntityData, EntityType};

// ============================================================================
// PLATFORM
// ============================================================================

/// A data platform (e.g. snowflake, kafka) an entity lives on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPlatform {
    pub urn: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub properties: Option<DataPlatformProperties>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPlatformProperties {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

impl DataPlatform {
    /// Display name, falling back to the platform's raw name.
    pub fn display_name(&self) -> Option<&str> {
        non_empty(
            self.properties
                .as_ref()
                .and_then(|p| p.display_name.as_deref()),
        )
        .or_else(|| non_empty(self.name.as_deref()))
    }

    pub fn logo_url(&self) -> Option<&str> {
        non_empty(self.properties.as_ref().and_then(|p| p.logo_url.as_deref()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPlatformInstance {
    #[serde(default)]
    pub urn: Option<String>,
    #[serde(default)]
    pub instance_id: Option<String>,
    #[serde(default)]
    pub platform: Option<DataPlatform>,
}

/// Environment an entity was ingested from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FabricType {
    Dev,
    Test,
    Qa,
    Uat,
    Ei,
    Pre,
    Stg,
    NonProd,
    Prod,
    Corp,
    #[serde(other)]
    Other,
}

// ============================================================================
// OWNERSHIP
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ownership {
    #[serde(default)]
    pub owners: Option<Vec<Owner>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub owner: OwnerEntity,
    #[serde(default, rename = "type")]
    pub ownership_type: Option<OwnershipType>,
}

/// A user or group referenced as an owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerEntity {
    pub urn: String,
    #[serde(default, rename = "type")]
    pub entity_type: Option<EntityType>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OwnershipType {
    TechnicalOwner,
    BusinessOwner,
    DataSteward,
    None,
    #[serde(other)]
    Custom,
}

// ============================================================================
// TAGS, TERMS, DOMAINS
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalTags {
    #[serde(default)]
    pub tags: Option<Vec<TagAssociation>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagAssociation {
    pub tag: Tag,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub urn: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlossaryTerms {
    #[serde(default)]
    pub terms: Option<Vec<GlossaryTermAssociation>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlossaryTermAssociation {
    pub term: GlossaryTerm,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlossaryTerm {
    pub urn: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub hierarchical_name: Option<String>,
}

/// Wrapper the service returns for an entity's domain assignment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainAssociation {
    #[serde(default)]
    pub domain: Option<Domain>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    pub urn: String,
    #[serde(default)]
    pub properties: Option<NamedProperties>,
}

/// Properties bag that only carries a name (domains, containers).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedProperties {
    #[serde(default)]
    pub name: Option<String>,
}

// ============================================================================
// CONTAINMENT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    pub urn: String,
    #[serde(default)]
    pub properties: Option<NamedProperties>,
    #[serde(default)]
    pub sub_types: Option<SubTypes>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentContainers {
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default)]
    pub containers: Option<Vec<Container>>,
}

// ============================================================================
// LIFECYCLE
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deprecation {
    #[serde(default)]
    pub deprecated: Option<bool>,
    #[serde(default)]
    pub note: Option<String>,
    /// Epoch milliseconds.
    #[serde(default)]
    pub decommission_time: Option<i64>,
    #[serde(default)]
    pub actor: Option<String>,
}

/// Soft-delete marker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    #[serde(default)]
    pub removed: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubTypes {
    #[serde(default)]
    pub type_names: Option<Vec<String>>,
}

impl SubTypes {
    pub fn first(&self) -> Option<&str> {
        self.type_names
            .as_ref()
            .and_then(|names| names.first())
            .map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.type_names
            .as_ref()
            .is_some_and(|names| names.iter().any(|n| n == name))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomPropertiesEntry {
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
}

/// Paged total returned for lineage, assertions and run queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountResult {
    #[serde(default)]
    pub total: Option<u64>,
}

/// Total of an optional paged result, reading a missing count as zero.
pub fn total_of(result: Option<&CountResult>) -> u64 {
    result.and_then(|r| r.total).unwrap_or(0)
}

// ============================================================================
// SIBLINGS
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiblingProperties {
    #[serde(default)]
    pub is_primary: Option<bool>,
    #[serde(default)]
    pub siblings: Option<Vec<SiblingEntity>>,
}

impl SiblingProperties {
    pub fn count(&self) -> usize {
        self.siblings.as_ref().map_or(0, Vec::len)
    }
}

/// A record merged in from another source system that represents the same
/// logical object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiblingEntity {
    pub urn: String,
    #[serde(default, rename = "type")]
    pub entity_type: Option<EntityType>,
    #[serde(default)]
    pub exists: Option<bool>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub platform: Option<DataPlatform>,
}

impl EntityData for SiblingEntity {
    fn urn(&self) -> &str {
        &self.urn
    }

    fn entity_type(&self) -> Option<EntityType> {
        self.entity_type
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn platform(&self) -> Option<&DataPlatform> {
        self.platform.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_display_name_fallback() {
        let mut platform = DataPlatform {
            urn: "urn:li:dataPlatform:hive".into(),
            name: Some("hive".into()),
            properties: None,
        };
        assert_eq!(platform.display_name(), Some("hive"));

        platform.properties = Some(DataPlatformProperties {
            display_name: Some("Hive".into()),
            logo_url: Some(String::new()),
        });
        assert_eq!(platform.display_name(), Some("Hive"));
        assert_eq!(platform.logo_url(), None);
    }

    #[test]
    fn test_subtypes_lookup() {
        let sub_types = SubTypes {
            type_names: Some(vec!["view".into(), "table".into()]),
        };
        assert_eq!(sub_types.first(), Some("view"));
        assert!(sub_types.contains("table"));
        assert!(!SubTypes::default().contains("view"));
    }

    #[test]
    fn test_total_of_missing_is_zero() {
        assert_eq!(total_of(None), 0);
        assert_eq!(total_of(Some(&CountResult { total: None })), 0);
        assert_eq!(total_of(Some(&CountResult { total: Some(4) })), 4);
    }

    #[test]
    fn test_unknown_ownership_type_is_custom() {
        let owner: Owner = serde_json::from_str(
            r#"{"owner":{"urn":"urn:li:corpuser:ann","type":"CORP_USER"},"type":"PRODUCER"}"#,
        )
        .unwrap();
        assert_eq!(owner.ownership_type, Some(OwnershipType::Custom));
        assert_eq!(owner.owner.entity_type, Some(EntityType::CorpUser));
    }
}
