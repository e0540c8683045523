use serde::{Deserialize, Serialize};

/// Reference a parent draft keeps for each of its nested sub-stories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubStoryRef {
    pub algorithm: String,
    pub fingerprint: String,
    /// Keep-order priority of the child's algorithm.
    pub priority: i64,
    pub score: f64,
    pub member_count: usize,
}

/// Reference a sub-story keeps to its chosen parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentRef {
    pub algorithm: String,
    pub fingerprint: String,
    /// Keep-order priority of the parent's algorithm.
    pub priority: i64,
}
