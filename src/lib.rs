//! Catalog Profile - Dataset entity descriptor
//!
//! Declares how a dataset's profile page is composed (header, sub-header,
//! sidebar sections, tabs), how its compact previews and lineage nodes are
//! projected, and which capabilities it supports. The generic composition
//! engine lives in `entity-profile`; wire types live in `catalog-types`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use catalog_profile::dataset::{DatasetEntity, InMemoryDatasetStore};
//! use catalog_profile::ProfileSession;
//! use std::sync::Arc;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let store = Arc::new(InMemoryDatasetStore::from_json_file("datasets.json")?);
//! let entity = DatasetEntity::new();
//! let urn = "urn:li:dataset:(urn:li:dataPlatform:hive,db.orders,PROD)";
//! let mut session = ProfileSession::new(store, urn);
//! session.load().await;
//! let profile = entity.compose(session.urn(), session.state(), None);
//! println!("{:?}", profile.selected_tab);
//! # Ok(())
//! # }
//! ```

// Display settings loaded from YAML
pub mod config;

// The Dataset kind: declaration table, projections, in-memory store
pub mod dataset;

pub use config::{ConfigLoader, ProfileConfig};
pub use dataset::{DatasetEntity, InMemoryDatasetStore};

// Engine and wire types, re-exported for binaries and integration tests
pub use catalog_types;
pub use entity_profile::{
    compose_profile, ComposeOptions, Entity, EntityProfile, EntityQuery, FetchError, FetchState,
    PreviewType, ProfileError, ProfileSession, ProfileStatus,
};
