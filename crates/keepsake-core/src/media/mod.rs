//! Read-only media records from the external catalog, plus the shared
//! per-item quality/aesthetic component math.

mod item;
pub mod quality;

pub use item::{MediaItem, PoiLabel};
