//! Published group and member views
//!
//! Views are owned, serializable snapshots. Nothing in them refers back to
//! engine state, so callers can keep or mutate them freely.

use serde::{Deserialize, Serialize};

/// Member status derived from its notes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Ok,
    Warning,
}

/// Member's own resolved bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeView {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

/// One slider's participation in a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberView {
    pub graph_id: String,
    pub node_id: String,
    pub graph_label: String,
    pub role: Option<String>,
    pub label: Option<String>,
    pub nick_name: Option<String>,
    pub value: f64,
    /// Value expressed on the canonical range
    pub normalized_value: f64,
    pub range: RangeView,
    pub notes: Vec<String>,
    pub status: MemberStatus,
}

/// Where a group's canonical range came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalSource {
    pub graph_id: String,
    pub node_id: String,
    pub graph_label: String,
    pub role: Option<String>,
}

/// A linked set of sliders controlled as one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderGroupView {
    pub id: String,
    pub key: String,
    pub label: String,
    pub nick_name: Option<String>,
    pub value: f64,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub graph_count: usize,
    pub notes: Vec<String>,
    pub has_warnings: bool,
    pub canonical_source: CanonicalSource,
    pub members: Vec<MemberView>,
}

/// Value to push into one graph's slider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderUpdate {
    pub graph_id: String,
    pub node_id: String,
    pub value: f64,
}

/// Result of mapping a canonical edit onto every member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapResult {
    /// Canonical value after clamping
    pub value: f64,
    pub updates: Vec<SliderUpdate>,
}
