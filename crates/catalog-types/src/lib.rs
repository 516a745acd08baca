//! Catalog record types
//!
//! Wire shapes for catalog entities as returned by the metadata service's
//! GraphQL layer. Every field other than the identifier is optional: a record
//! is a partially populated graph and absence is the normal state.
//!
//! ## Rules
//!
//! 1. JSON field names are camelCase (GraphQL convention)
//! 2. Relational and statistical fields are always `Option`
//! 3. Full entity records and search-result records are distinct types
//!
//! ```text
//! Dataset ──────────────► EntityData (generic accessors)
//!    │                         ▲
//!    └─ siblings ─► SiblingEntity
//!
//! SearchResult<DatasetSearchEntity> = Dataset + search-only series + match metadata
//! ```

pub mod common;
pub mod dataset;
pub mod search;

use serde::{Deserialize, Serialize};

pub use common::*;
pub use dataset::*;
pub use search::*;

// ============================================================================
// ENTITY KIND
// ============================================================================

/// Closed set of catalog entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    Dataset,
    DataPlatform,
    Container,
    Domain,
    CorpUser,
    CorpGroup,
    Tag,
    GlossaryTerm,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dataset => "DATASET",
            Self::DataPlatform => "DATA_PLATFORM",
            Self::Container => "CONTAINER",
            Self::Domain => "DOMAIN",
            Self::CorpUser => "CORP_USER",
            Self::CorpGroup => "CORP_GROUP",
            Self::Tag => "TAG",
            Self::GlossaryTerm => "GLOSSARY_TERM",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// GENERIC ACCESS
// ============================================================================

/// Kind-agnostic view over a fetched record.
///
/// The generic property model is built exclusively through these accessors,
/// so every kind exposes the same common fields the same way. Defaults return
/// `None`; a kind only overrides what it actually fetches.
pub trait EntityData {
    fn urn(&self) -> &str;

    fn entity_type(&self) -> Option<EntityType> {
        None
    }

    /// Top-level name, outside of any properties bag.
    fn name(&self) -> Option<&str> {
        None
    }

    fn platform(&self) -> Option<&DataPlatform> {
        None
    }

    fn ownership(&self) -> Option<&Ownership> {
        None
    }

    fn global_tags(&self) -> Option<&GlobalTags> {
        None
    }

    fn glossary_terms(&self) -> Option<&GlossaryTerms> {
        None
    }

    fn domain(&self) -> Option<&DomainAssociation> {
        None
    }

    fn container(&self) -> Option<&Container> {
        None
    }

    fn parent_containers(&self) -> Option<&ParentContainers> {
        None
    }

    fn deprecation(&self) -> Option<&Deprecation> {
        None
    }

    fn status(&self) -> Option<&Status> {
        None
    }

    fn custom_properties(&self) -> Option<&[CustomPropertiesEntry]> {
        None
    }

    fn siblings(&self) -> Option<&SiblingProperties> {
        None
    }
}

/// Merges a partial update (as returned by a mutation) into a record.
///
/// Fields present on the update replace the current value; absent fields
/// leave it untouched.
pub trait MergeRecord {
    fn merge(&mut self, update: Self);
}

/// Treats empty strings as absent, matching how the catalog UI has always
/// read optional text.
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
