//! Entity Profile - declarative profile composition for catalog entities.
//!
//! Every entity kind in the catalog is rendered by one generic profile shell.
//! A kind contributes a declaration table (tabs, sidebar sections, header
//! actions) and a handful of pure projections; this crate evaluates them
//! against whatever part of the record has been fetched so far.
//!
//! # Architecture
//!
//! ```text
//! EntityQuery (async port)
//!      │ fetch(urn)
//!      ▼
//! FetchState<R> ── Loading | Error | Ready(R)
//!      │
//!      ├─► properties  : OverrideProperties ∘ EntityData ─► GenericEntityProperties
//!      ├─► panel       : [PanelDeclaration] × Option<&R>  ─► [PanelState]
//!      └─► profile     : header + sidebar + tabs + selected tab ─► EntityProfile
//!
//! record / search hit ─► preview : SummaryViewModel (same precedence as header)
//! ```
//!
//! Missing data never fails composition: absent fields fall through their
//! precedence chains, absent records hide data-gated panels, and a panicking
//! predicate only affects its own panel.

mod entity;
mod error;
mod fetch;
mod panel;
mod preview;
mod profile;
mod properties;

// Re-exports
pub use entity::{
    Entity, EntityCapabilityType, EntityMenuItem, IconGlyph, IconSpec, IconStyleType,
    LineageVizConfig, PreviewType,
};
pub use error::{FetchError, ProfileError};
pub use fetch::{EntityQuery, FetchState, ProfileSession};
pub use panel::{
    evaluate_panels, record_loaded, visible_panels, ComponentId, PanelDeclaration, PanelDisplay,
    PanelState, Predicate,
};
pub use preview::{SearchSnippet, SnippetValue, SummaryViewModel, UsageSummary};
pub use profile::{
    compose_profile, ComposeOptions, EntityProfile, PanelProps, ProfileDescriptor, ProfileHeader,
    ProfileStatus, RenderedPanel, SubHeader,
};
pub use properties::{
    capitalize_first_letter, data_for_entity_type, GenericEntityProperties, OverrideProperties,
    PropertiesBag, ResolveOptions,
};
