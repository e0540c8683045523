use serde::{Deserialize, Serialize};

/// Human-readable route/date labels derived by the canonical-title stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalTitle {
    pub title: String,
    pub subtitle: Option<String>,
}
