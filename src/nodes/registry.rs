//! Node descriptor registry with id aliases and pin mapping

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use log::{debug, info, warn};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::complex::Complex;
use crate::error::{Result, SyncError};

/// Inputs keyed by canonical argument name
pub type NodeInputs = BTreeMap<String, Value>;

/// Outputs keyed by canonical output name
pub type NodeOutputs = BTreeMap<String, Complex>;

/// Evaluation function shared by every clone of a descriptor
pub type EvalFn = Arc<dyn Fn(&NodeInputs) -> NodeOutputs + Send + Sync>;

/// Accepted pin names mapped to canonical argument names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PinMap {
    pub inputs: BTreeMap<String, String>,
    pub outputs: BTreeMap<String, String>,
}

impl PinMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `canonical` and each alias as names for one input
    pub fn with_input(mut self, canonical: &str, aliases: &[&str]) -> Self {
        self.inputs.insert(canonical.to_string(), canonical.to_string());
        for alias in aliases {
            self.inputs.insert(alias.to_string(), canonical.to_string());
        }
        self
    }

    /// Accept `canonical` and each alias as names for one output
    pub fn with_output(mut self, canonical: &str, aliases: &[&str]) -> Self {
        self.outputs.insert(canonical.to_string(), canonical.to_string());
        for alias in aliases {
            self.outputs.insert(alias.to_string(), canonical.to_string());
        }
        self
    }

    /// Canonical input for a host pin name, exact match first
    pub fn resolve_input(&self, pin: &str) -> Option<&str> {
        resolve_alias(&self.inputs, pin)
    }

    /// Canonical output for a host pin name, exact match first
    pub fn resolve_output(&self, pin: &str) -> Option<&str> {
        resolve_alias(&self.outputs, pin)
    }

    /// Distinct canonical input names in sorted order
    pub fn canonical_inputs(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.inputs.values().map(String::as_str).collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}

fn resolve_alias<'a>(table: &'a BTreeMap<String, String>, pin: &str) -> Option<&'a str> {
    let pin = pin.trim();
    table
        .get(pin)
        .or_else(|| {
            table
                .iter()
                .find(|(alias, _)| alias.eq_ignore_ascii_case(pin))
                .map(|(_, canonical)| canonical)
        })
        .map(String::as_str)
}

/// An evaluable node: ids, pins, and the function behind them
#[derive(Clone)]
pub struct NodeDescriptor {
    ids: Vec<String>,
    pub node_type: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub pin_map: PinMap,
    eval: EvalFn,
}

impl NodeDescriptor {
    /// Create a descriptor whose first id is canonical and the rest aliases
    pub fn new(
        node_type: &'static str,
        ids: &[&str],
        display_name: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            ids: ids.iter().map(|id| id.to_string()).collect(),
            node_type,
            display_name,
            description,
            category: "",
            pin_map: PinMap::default(),
            eval: Arc::new(|_| NodeOutputs::new()),
        }
    }

    pub fn with_category(mut self, category: &'static str) -> Self {
        self.category = category;
        self
    }

    pub fn with_pin_map(mut self, pin_map: PinMap) -> Self {
        self.pin_map = pin_map;
        self
    }

    pub fn with_eval<F>(mut self, eval: F) -> Self
    where
        F: Fn(&NodeInputs) -> NodeOutputs + Send + Sync + 'static,
    {
        self.eval = Arc::new(eval);
        self
    }

    /// Canonical id
    pub fn primary_id(&self) -> &str {
        self.ids.first().map(String::as_str).unwrap_or("")
    }

    /// Every accepted id, canonical first
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn aliases(&self) -> &[String] {
        self.ids.get(1..).unwrap_or(&[])
    }

    /// Evaluate with inputs already keyed by canonical argument name
    pub fn evaluate(&self, inputs: &NodeInputs) -> NodeOutputs {
        (self.eval)(inputs)
    }

    /// Evaluate with host pin names, mapping each through the pin map
    ///
    /// Pins the map does not know are dropped with a debug log. When two host
    /// pins resolve to the same argument, the later one in sorted pin order wins.
    pub fn evaluate_pins(&self, pins: &BTreeMap<String, Value>) -> NodeOutputs {
        let mut inputs = NodeInputs::new();
        for (pin, value) in pins {
            match self.pin_map.resolve_input(pin) {
                Some(canonical) => {
                    inputs.insert(canonical.to_string(), value.clone());
                }
                None => debug!("Node {} ignores unknown pin {:?}", self.primary_id(), pin),
            }
        }
        self.evaluate(&inputs)
    }
}

impl fmt::Debug for NodeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeDescriptor")
            .field("ids", &self.ids)
            .field("node_type", &self.node_type)
            .field("display_name", &self.display_name)
            .field("pin_map", &self.pin_map)
            .finish_non_exhaustive()
    }
}

/// Anything that accepts node descriptors
pub trait NodeRegistrar {
    fn register(&mut self, descriptor: NodeDescriptor) -> Result<()>;
}

/// Registry resolving any id or alias to its descriptor
#[derive(Debug, Default)]
pub struct NodeRegistry {
    descriptors: BTreeMap<String, NodeDescriptor>,
    aliases: HashMap<String, String>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a descriptor by canonical id or alias, ignoring case
    pub fn get(&self, id: &str) -> Option<&NodeDescriptor> {
        let primary = self.aliases.get(&id.trim().to_lowercase())?;
        self.descriptors.get(primary)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Canonical ids in sorted order
    pub fn ids(&self) -> Vec<&str> {
        self.descriptors.keys().map(String::as_str).collect()
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &NodeDescriptor> {
        self.descriptors.values()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Evaluate the node registered under `id` with host pin names
    pub fn evaluate(&self, id: &str, pins: &BTreeMap<String, Value>) -> Option<NodeOutputs> {
        self.get(id).map(|descriptor| descriptor.evaluate_pins(pins))
    }
}

impl NodeRegistrar for NodeRegistry {
    fn register(&mut self, descriptor: NodeDescriptor) -> Result<()> {
        let primary = descriptor.primary_id().to_string();
        if Uuid::parse_str(&primary).is_err() {
            return Err(SyncError::InvalidNodeId(primary));
        }

        if self.descriptors.contains_key(&primary) {
            info!("Replacing node registration {}", primary);
            self.aliases.retain(|_, target| *target != primary);
        }

        for id in descriptor.ids() {
            let folded = id.trim().to_lowercase();
            if let Some(previous) = self.aliases.insert(folded, primary.clone()) {
                if previous != primary {
                    warn!("Node alias {:?} moved from {} to {}", id, previous, primary);
                }
            }
        }
        debug!("Registered node {} ({})", descriptor.display_name, primary);
        self.descriptors.insert(primary, descriptor);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ID: &str = "0b6f1c52-7d3e-4a8f-9e21-5c4d3b2a1f00";

    fn echo_node() -> NodeDescriptor {
        NodeDescriptor::new("complex", &[ID, "echo", "Complex Echo"], "Echo", "Returns its input")
            .with_pin_map(PinMap::new().with_input("z", &["Z", "Input"]).with_output("result", &["Result"]))
            .with_eval(|inputs| {
                let z = inputs.get("z").map(crate::complex::ensure_complex_or_zero).unwrap_or_default();
                NodeOutputs::from([("result".to_string(), z)])
            })
    }

    #[test]
    fn test_pin_map_resolution() {
        let pins = PinMap::new().with_input("z", &["Z", "Input"]);
        assert_eq!(pins.resolve_input("Z"), Some("z"));
        assert_eq!(pins.resolve_input("input"), Some("z"));
        assert_eq!(pins.resolve_input(" z "), Some("z"));
        assert_eq!(pins.resolve_input("other"), None);
        assert_eq!(pins.canonical_inputs(), vec!["z"]);
    }

    #[test]
    fn test_register_and_lookup_by_alias() {
        let mut registry = NodeRegistry::new();
        registry.register(echo_node()).unwrap();

        assert!(registry.contains(ID));
        assert!(registry.contains("ECHO"));
        assert!(registry.contains("complex echo"));
        assert_eq!(registry.get("echo").unwrap().primary_id(), ID);
        assert_eq!(registry.get("echo").unwrap().aliases().len(), 2);
    }

    #[test]
    fn test_evaluate_maps_pins() {
        let mut registry = NodeRegistry::new();
        registry.register(echo_node()).unwrap();

        let pins = BTreeMap::from([("Input".to_string(), json!("2+3i")), ("junk".to_string(), json!(1))]);
        let outputs = registry.evaluate("echo", &pins).unwrap();
        assert_eq!(outputs["result"], Complex::new(2.0, 3.0));
        assert!(registry.evaluate("missing", &pins).is_none());
    }

    #[test]
    fn test_reregistration_replaces_aliases() {
        let mut registry = NodeRegistry::new();
        registry.register(echo_node()).unwrap();
        registry
            .register(NodeDescriptor::new("complex", &[ID, "mirror"], "Mirror", "Replacement"))
            .unwrap();

        assert_eq!(registry.len(), 1);
        assert!(!registry.contains("echo"));
        assert_eq!(registry.get("mirror").unwrap().display_name, "Mirror");
    }

    #[test]
    fn test_rejects_non_uuid_primary_id() {
        let mut registry = NodeRegistry::new();
        let result = registry.register(NodeDescriptor::new("complex", &["echo"], "Echo", ""));
        assert!(matches!(result, Err(SyncError::InvalidNodeId(_))));
        assert!(registry.is_empty());
    }
}
