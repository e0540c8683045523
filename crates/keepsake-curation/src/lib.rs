//! # keepsake-curation
//!
//! Per-member quality ranking and the default policy-driven member selector
//! (day/slot caps, shot spacing, near-duplicate suppression, staypoint caps)
//! with rejection telemetry.

pub mod quality;
pub mod selector;

pub use quality::{rank_members, RankedMembers};
pub use selector::SpacingSelector;
