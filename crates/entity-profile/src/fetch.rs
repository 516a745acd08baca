//! The data-fetch contract and a per-view profile session.
//!
//! [`EntityQuery`] is the only asynchronous boundary: it resolves one record
//! per identifier and applies updates. [`ProfileSession`] holds the snapshot
//! for one profile view and recomposes from it on demand. Dropping a pending
//! `load` or `update` future leaves the session untouched, since state is only
//! written after the await completes.

use std::sync::Arc;

use async_trait::async_trait;
use catalog_types::MergeRecord;
use tracing::{debug, info, warn};

use crate::entity::Entity;
use crate::error::{FetchError, ProfileError};
use crate::profile::{compose_profile, ComposeOptions, EntityProfile};

/// Port implemented by the GraphQL (or any other) transport.
#[async_trait]
pub trait EntityQuery: Send + Sync {
    type Record: Send + Sync;
    type UpdateInput: Send;

    /// Fetch one record. `Ok(None)` means the entity does not exist.
    async fn fetch(&self, urn: &str) -> Result<Option<Self::Record>, FetchError>;

    /// Apply an update and return the changed subset of the record.
    async fn update(&self, urn: &str, input: Self::UpdateInput) -> Result<Self::Record, FetchError>;
}

/// Fetch state of one profile view.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<R> {
    Loading,
    Error(FetchError),
    Ready(R),
}

impl<R> FetchState<R> {
    pub fn record(&self) -> Option<&R> {
        match self {
            Self::Ready(record) => Some(record),
            Self::Loading | Self::Error(_) => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            Self::Error(err) => Some(err),
            _ => None,
        }
    }
}

/// One profile view: an identifier, its query port and the current snapshot.
pub struct ProfileSession<Q: EntityQuery> {
    query: Arc<Q>,
    urn: String,
    state: FetchState<Q::Record>,
}

impl<Q: EntityQuery> ProfileSession<Q> {
    /// New session in the loading state. Call [`Self::load`] to fetch.
    pub fn new(query: Arc<Q>, urn: impl Into<String>) -> Self {
        Self {
            query,
            urn: urn.into(),
            state: FetchState::Loading,
        }
    }

    pub fn urn(&self) -> &str {
        &self.urn
    }

    pub fn state(&self) -> &FetchState<Q::Record> {
        &self.state
    }

    /// Fetch the record for the current identifier, replacing the snapshot.
    pub async fn load(&mut self) -> &FetchState<Q::Record> {
        debug!(urn = %self.urn, "Fetching entity");
        let result = self.query.fetch(&self.urn).await;

        self.state = match result {
            Ok(Some(record)) => {
                info!(urn = %self.urn, "Entity loaded");
                FetchState::Ready(record)
            }
            Ok(None) => {
                warn!(urn = %self.urn, "Entity not found");
                FetchState::Error(FetchError::NotFound(self.urn.clone()))
            }
            Err(err) => {
                warn!(
                    urn = %self.urn,
                    error = %err,
                    retryable = err.is_retryable(),
                    "Entity fetch failed"
                );
                FetchState::Error(err)
            }
        };
        &self.state
    }

    /// Switch to another identifier and fetch it.
    pub async fn navigate(&mut self, urn: impl Into<String>) -> &FetchState<Q::Record> {
        self.urn = urn.into();
        self.state = FetchState::Loading;
        self.load().await
    }

    /// Apply an update and merge the returned subset into the snapshot.
    pub async fn update(&mut self, input: Q::UpdateInput) -> Result<(), ProfileError>
    where
        Q::Record: MergeRecord,
    {
        if self.state.record().is_none() {
            return Err(ProfileError::NotLoaded(self.urn.clone()));
        }

        let updated = self
            .query
            .update(&self.urn, input)
            .await
            .map_err(|source| ProfileError::Fetch {
                urn: self.urn.clone(),
                source,
            })?;

        if let FetchState::Ready(record) = &mut self.state {
            record.merge(updated);
            info!(urn = %self.urn, "Entity updated");
        }
        Ok(())
    }

    /// Compose the profile from the current snapshot.
    pub fn compose<'a, E>(
        &'a self,
        entity: &'a E,
        options: ComposeOptions<'_>,
    ) -> EntityProfile<'a, Q::Record>
    where
        E: Entity<Data = Q::Record>,
    {
        compose_profile(entity, &self.urn, &self.state, options)
    }

    /// Like [`Self::compose`], but rejects a requested tab the kind never declares.
    pub fn compose_checked<'a, E>(
        &'a self,
        entity: &'a E,
        options: ComposeOptions<'_>,
    ) -> Result<EntityProfile<'a, Q::Record>, ProfileError>
    where
        E: Entity<Data = Q::Record>,
    {
        if let Some(requested) = options.selected_tab {
            if entity.profile().tab(requested).is_none() {
                return Err(ProfileError::UnknownTab(requested.to_string()));
            }
        }
        Ok(self.compose(entity, options))
    }
}
