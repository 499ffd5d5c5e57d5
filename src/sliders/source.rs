//! Raw slider descriptors and graph sources supplied by the host

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::values::{
    deserialize_loose_flag, deserialize_loose_list, deserialize_loose_number, deserialize_loose_record,
    deserialize_loose_string, deserialize_loose_text,
};

/// A slider as a graph reports it, before any normalization
///
/// Numeric fields stay as raw JSON so malformed values can be diagnosed
/// instead of rejected at the deserialization boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSlider {
    #[serde(default, deserialize_with = "deserialize_loose_string", skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_string", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_text", skip_serializing_if = "Option::is_none")]
    pub nick_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_text", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl RawSlider {
    /// Create a slider owned by the given node
    pub fn new(node_id: &str) -> Self {
        Self {
            node_id: Some(node_id.to_string()),
            ..Self::default()
        }
    }

    pub fn with_nick_name(mut self, nick_name: &str) -> Self {
        self.nick_name = Some(nick_name.to_string());
        self
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(Value::from(min));
        self
    }

    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(Value::from(max));
        self
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = Some(Value::from(step));
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(Value::from(value));
        self
    }

    /// Set the value to an arbitrary, possibly non-numeric, JSON value
    pub fn with_raw_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    /// Node id, falling back to the generic `id` field
    pub fn resolved_node_id(&self) -> Option<&str> {
        [self.node_id.as_deref(), self.id.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
    }

    /// Trimmed nickname when one is set
    pub fn trimmed_nick_name(&self) -> Option<&str> {
        self.nick_name.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// Trimmed label when one is set
    pub fn trimmed_label(&self) -> Option<&str> {
        self.label.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// Per-graph metadata influencing canonical election
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphMetadata {
    #[serde(default, deserialize_with = "deserialize_loose_text", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_text", skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_flag", skip_serializing_if = "Option::is_none")]
    pub primary: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_loose_flag", skip_serializing_if = "Option::is_none")]
    pub is_primary: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_loose_number", skip_serializing_if = "Option::is_none")]
    pub priority: Option<f64>,
}

impl GraphMetadata {
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn with_role(mut self, role: &str) -> Self {
        self.role = Some(role.to_string());
        self
    }

    pub fn with_primary(mut self, primary: bool) -> Self {
        self.primary = Some(primary);
        self
    }

    pub fn with_priority(mut self, priority: f64) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Either primary flag is set
    pub fn is_flagged_primary(&self) -> bool {
        self.primary == Some(true) || self.is_primary == Some(true)
    }

    /// Trimmed, case-folded role
    pub fn normalized_role(&self) -> Option<String> {
        self.role
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    /// Trimmed role as given
    pub fn trimmed_role(&self) -> Option<&str> {
        self.role.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// Trimmed label when one is set
    pub fn trimmed_label(&self) -> Option<&str> {
        self.label.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// One loaded graph's sliders and metadata
///
/// Sources missing a graph id or a slider list are skipped by the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphSource {
    #[serde(default, deserialize_with = "deserialize_loose_string", skip_serializing_if = "Option::is_none")]
    pub graph_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_record")]
    pub metadata: GraphMetadata,
    #[serde(default, deserialize_with = "deserialize_loose_list", skip_serializing_if = "Option::is_none")]
    pub sliders: Option<Vec<RawSlider>>,
}

impl GraphSource {
    /// Create a source with an empty slider list
    pub fn new(graph_id: &str) -> Self {
        Self {
            graph_id: Some(graph_id.to_string()),
            metadata: GraphMetadata::default(),
            sliders: Some(Vec::new()),
        }
    }

    pub fn with_metadata(mut self, metadata: GraphMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_slider(mut self, slider: RawSlider) -> Self {
        self.sliders.get_or_insert_with(Vec::new).push(slider);
        self
    }

    pub fn with_sliders(mut self, sliders: Vec<RawSlider>) -> Self {
        self.sliders = Some(sliders);
        self
    }

    /// Trimmed graph id when one is set
    pub fn trimmed_graph_id(&self) -> Option<&str> {
        self.graph_id.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}
