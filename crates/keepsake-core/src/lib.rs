//! # keepsake-core
//!
//! Foundation crate for the keepsake story pipeline.
//! Defines the cluster-draft and media data model, shared set/geo/time math,
//! configuration, errors, and the collaborator traits.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod draft;
pub mod errors;
pub mod media;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::KeepsakeConfig;
pub use draft::{ClusterDraft, DraftParams, GeoPoint, MediaId, TimeRange};
pub use errors::{KeepsakeError, KeepsakeResult};
pub use media::MediaItem;
