//! Collaborator contracts. The core consumes these as trait objects; the
//! concrete implementations live outside this workspace (media catalog,
//! calendar service) or in `keepsake-curation` (default member selector).

mod clustering;
mod holiday;
mod media_lookup;
mod member_selector;
mod progress;

pub use clustering::ClusteringStrategy;
pub use holiday::{HolidayResolver, NoHolidays};
pub use media_lookup::MediaLookup;
pub use member_selector::MemberSelector;
pub use progress::{NoopProgress, ProgressObserver};
