//! Registry of loaded graphs with change events
//!
//! The registry owns each graph's slider snapshot and notifies subscribers
//! when graphs are added, updated, removed, or the active graph changes.
//! Every listener runs inside its own error boundary: an `Err` or a panic
//! from one listener is logged and the remaining listeners still run.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};

use chrono::{DateTime, Utc};
use log::{debug, error, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants;
use crate::sliders::{GraphMetadata, GraphSource, RawSlider, SliderUpdate};

/// Graph contents supplied when adding or updating a graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphSpec {
    #[serde(default)]
    pub metadata: GraphMetadata,
    #[serde(default)]
    pub sliders: Vec<RawSlider>,
}

impl GraphSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metadata(mut self, metadata: GraphMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_slider(mut self, slider: RawSlider) -> Self {
        self.sliders.push(slider);
        self
    }
}

/// A loaded graph
#[derive(Debug, Clone, PartialEq)]
pub struct GraphEntry {
    pub id: String,
    pub metadata: GraphMetadata,
    pub sliders: Vec<RawSlider>,
    pub loaded_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GraphEntry {
    /// Snapshot as a reconcile source
    pub fn source(&self) -> GraphSource {
        GraphSource {
            graph_id: Some(self.id.clone()),
            metadata: self.metadata.clone(),
            sliders: Some(self.sliders.clone()),
        }
    }
}

/// Event categories listeners subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Added,
    Updated,
    Removed,
    ActiveChanged,
}

/// A registry change
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryEvent {
    Added { graph_id: String },
    Updated { graph_id: String },
    Removed { graph_id: String },
    ActiveChanged { previous: Option<String>, current: Option<String> },
}

impl RegistryEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            RegistryEvent::Added { .. } => EventKind::Added,
            RegistryEvent::Updated { .. } => EventKind::Updated,
            RegistryEvent::Removed { .. } => EventKind::Removed,
            RegistryEvent::ActiveChanged { .. } => EventKind::ActiveChanged,
        }
    }
}

/// Callback invoked for each event of the kind it subscribed to
pub type Listener = Box<dyn FnMut(&RegistryEvent) -> Result<(), String>>;

/// Handle returned by [`GraphRegistry::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Keyed store of loaded graphs
///
/// Generated ids come from a counter owned by this instance. It starts at 1
/// and is only reset by constructing a new registry.
pub struct GraphRegistry {
    graphs: Vec<GraphEntry>,
    active: Option<String>,
    next_graph_id: u64,
    listeners: HashMap<EventKind, Vec<(ListenerId, Listener)>>,
    next_listener_id: u64,
}

impl Default for GraphRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphRegistry {
    pub fn new() -> Self {
        Self {
            graphs: Vec::new(),
            active: None,
            next_graph_id: 1,
            listeners: HashMap::new(),
            next_listener_id: 0,
        }
    }

    /// Add a graph under a generated id and return the id
    pub fn add(&mut self, spec: GraphSpec) -> String {
        let mut id = self.generate_id();
        while self.position(&id).is_some() {
            id = self.generate_id();
        }
        self.insert_new(id.clone(), spec);
        id
    }

    /// Add a graph under a host-chosen id; an existing graph is updated instead
    pub fn add_with_id(&mut self, id: &str, spec: GraphSpec) -> String {
        let id = id.trim().to_string();
        if self.position(&id).is_some() {
            self.update(&id, spec);
        } else {
            self.insert_new(id.clone(), spec);
        }
        id
    }

    fn generate_id(&mut self) -> String {
        let id = format!("{}{}", constants::graph::ID_PREFIX, self.next_graph_id);
        self.next_graph_id += 1;
        id
    }

    fn insert_new(&mut self, id: String, spec: GraphSpec) {
        let now = Utc::now();
        self.graphs.push(GraphEntry {
            id: id.clone(),
            metadata: spec.metadata,
            sliders: spec.sliders,
            loaded_at: now,
            updated_at: now,
        });
        debug!("Added graph {}", id);
        self.emit(RegistryEvent::Added { graph_id: id.clone() });

        if self.active.is_none() {
            self.set_active(Some(id.as_str()));
        }
    }

    /// Replace a graph's metadata and sliders; false when the id is unknown
    pub fn update(&mut self, id: &str, spec: GraphSpec) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        let entry = &mut self.graphs[index];
        entry.metadata = spec.metadata;
        entry.sliders = spec.sliders;
        entry.updated_at = Utc::now();
        self.emit(RegistryEvent::Updated { graph_id: id.to_string() });
        true
    }

    /// Remove a graph; the first remaining graph becomes active if it was
    pub fn remove(&mut self, id: &str) -> Option<GraphEntry> {
        let index = self.position(id)?;
        let entry = self.graphs.remove(index);
        debug!("Removed graph {}", entry.id);
        self.emit(RegistryEvent::Removed { graph_id: entry.id.clone() });

        if self.active.as_deref() == Some(entry.id.as_str()) {
            let next = self.graphs.first().map(|g| g.id.clone());
            self.set_active(next.as_deref());
        }
        Some(entry)
    }

    /// Select the active graph; false when the id is unknown
    pub fn set_active(&mut self, id: Option<&str>) -> bool {
        if let Some(id) = id {
            if self.position(id).is_none() {
                warn!("Cannot activate unknown graph {}", id);
                return false;
            }
        }
        let current = id.map(str::to_string);
        if current == self.active {
            return true;
        }
        let previous = std::mem::replace(&mut self.active, current.clone());
        self.emit(RegistryEvent::ActiveChanged { previous, current });
        true
    }

    /// Write a mapped value into the owning graph's slider
    ///
    /// Sliders without a node id are matched by the same positional
    /// fallback the engine uses. Returns false when nothing matched.
    pub fn apply_update(&mut self, update: &SliderUpdate) -> bool {
        let Some(index) = self.position(&update.graph_id) else {
            return false;
        };
        let entry = &mut self.graphs[index];
        let slot = entry.sliders.iter().enumerate().position(|(i, slider)| match slider.resolved_node_id() {
            Some(node_id) => node_id == update.node_id,
            None => format!("{}{}", constants::group::FALLBACK_NODE_PREFIX, i) == update.node_id,
        });
        let Some(slot) = slot else {
            return false;
        };
        entry.sliders[slot].value = Some(Value::from(update.value));
        entry.updated_at = Utc::now();
        self.emit(RegistryEvent::Updated { graph_id: update.graph_id.clone() });
        true
    }

    pub fn get(&self, id: &str) -> Option<&GraphEntry> {
        self.position(id).map(|index| &self.graphs[index])
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Graph ids in load order
    pub fn ids(&self) -> Vec<&str> {
        self.graphs.iter().map(|g| g.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }

    /// Every graph as a reconcile source, in load order
    pub fn sources(&self) -> Vec<GraphSource> {
        self.graphs.iter().map(GraphEntry::source).collect()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.graphs.iter().position(|g| g.id == id)
    }

    pub fn subscribe<F>(&mut self, kind: EventKind, listener: F) -> ListenerId
    where
        F: FnMut(&RegistryEvent) -> Result<(), String> + 'static,
    {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.entry(kind).or_default().push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        for listeners in self.listeners.values_mut() {
            if let Some(index) = listeners.iter().position(|(lid, _)| *lid == id) {
                listeners.remove(index);
                return true;
            }
        }
        false
    }

    fn emit(&mut self, event: RegistryEvent) {
        let Some(listeners) = self.listeners.get_mut(&event.kind()) else {
            return;
        };
        for (id, listener) in listeners.iter_mut() {
            match catch_unwind(AssertUnwindSafe(|| listener(&event))) {
                Ok(Ok(())) => {}
                Ok(Err(message)) => warn!("Listener {:?} failed on {:?}: {}", id, event, message),
                Err(_) => error!("Listener {:?} panicked on {:?}", id, event),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn spec_with(node: &str, nick: &str) -> GraphSpec {
        GraphSpec::new().with_slider(RawSlider::new(node).with_nick_name(nick).with_value(1.0))
    }

    #[test]
    fn test_ids_are_instance_scoped() {
        let mut first = GraphRegistry::new();
        assert_eq!(first.add(GraphSpec::new()), "graph-1");
        assert_eq!(first.add(GraphSpec::new()), "graph-2");

        let mut second = GraphRegistry::new();
        assert_eq!(second.add(GraphSpec::new()), "graph-1");
    }

    #[test]
    fn test_generated_ids_skip_taken_ones() {
        let mut registry = GraphRegistry::new();
        registry.add_with_id("graph-1", GraphSpec::new());
        assert_eq!(registry.add(GraphSpec::new()), "graph-2");
    }

    #[test]
    fn test_first_graph_becomes_active() {
        let mut registry = GraphRegistry::new();
        let a = registry.add(GraphSpec::new());
        let b = registry.add(GraphSpec::new());
        assert_eq!(registry.active(), Some(a.as_str()));

        assert!(registry.set_active(Some(b.as_str())));
        assert!(!registry.set_active(Some("missing")));
        assert_eq!(registry.active(), Some(b.as_str()));

        registry.remove(&b);
        assert_eq!(registry.active(), Some(a.as_str()));
        registry.remove(&a);
        assert_eq!(registry.active(), None);
    }

    #[test]
    fn test_events_reach_subscribers() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut registry = GraphRegistry::new();
        for kind in [EventKind::Added, EventKind::Updated, EventKind::Removed, EventKind::ActiveChanged] {
            let seen = Rc::clone(&seen);
            registry.subscribe(kind, move |event| {
                seen.borrow_mut().push(event.kind());
                Ok(())
            });
        }

        let id = registry.add(GraphSpec::new());
        registry.update(&id, GraphSpec::new());
        registry.remove(&id);

        assert_eq!(
            *seen.borrow(),
            vec![
                EventKind::Added,
                EventKind::ActiveChanged,
                EventKind::Updated,
                EventKind::Removed,
                EventKind::ActiveChanged,
            ]
        );
    }

    #[test]
    fn test_failing_listeners_are_isolated() {
        let calls = Rc::new(RefCell::new(0));
        let mut registry = GraphRegistry::new();
        registry.subscribe(EventKind::Added, |_| Err("boom".to_string()));
        registry.subscribe(EventKind::Added, |_| panic!("listener exploded"));
        {
            let calls = Rc::clone(&calls);
            registry.subscribe(EventKind::Added, move |_| {
                *calls.borrow_mut() += 1;
                Ok(())
            });
        }

        registry.add(GraphSpec::new());
        registry.add(GraphSpec::new());
        assert_eq!(*calls.borrow(), 2);
    }

    #[test]
    fn test_unsubscribe() {
        let calls = Rc::new(RefCell::new(0));
        let mut registry = GraphRegistry::new();
        let id = {
            let calls = Rc::clone(&calls);
            registry.subscribe(EventKind::Added, move |_| {
                *calls.borrow_mut() += 1;
                Ok(())
            })
        };
        registry.add(GraphSpec::new());
        assert!(registry.unsubscribe(id));
        assert!(!registry.unsubscribe(id));
        registry.add(GraphSpec::new());
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_apply_update_writes_slider_value() {
        let mut registry = GraphRegistry::new();
        let id = registry.add(spec_with("n1", "Radius").with_slider(RawSlider::default()));

        let update = SliderUpdate { graph_id: id.clone(), node_id: "n1".to_string(), value: 7.5 };
        assert!(registry.apply_update(&update));
        assert_eq!(registry.get(&id).unwrap().sliders[0].value, Some(Value::from(7.5)));

        let positional = SliderUpdate { graph_id: id.clone(), node_id: "slider-1".to_string(), value: 2.0 };
        assert!(registry.apply_update(&positional));
        assert_eq!(registry.get(&id).unwrap().sliders[1].value, Some(Value::from(2.0)));

        let missing = SliderUpdate { graph_id: id, node_id: "nope".to_string(), value: 1.0 };
        assert!(!registry.apply_update(&missing));
    }

    #[test]
    fn test_sources_preserve_load_order() {
        let mut registry = GraphRegistry::new();
        registry.add_with_id("z", spec_with("n", "A"));
        registry.add_with_id("a", spec_with("n", "B"));
        let ids: Vec<Option<String>> = registry.sources().into_iter().map(|s| s.graph_id).collect();
        assert_eq!(ids, vec![Some("z".to_string()), Some("a".to_string())]);
    }

    #[test]
    fn test_update_keeps_load_time() {
        let mut registry = GraphRegistry::new();
        let id = registry.add(GraphSpec::new());
        let loaded = registry.get(&id).unwrap().loaded_at;
        assert!(registry.update(&id, spec_with("n", "X")));
        let entry = registry.get(&id).unwrap();
        assert_eq!(entry.loaded_at, loaded);
        assert!(entry.updated_at >= loaded);
        assert!(!registry.update("missing", GraphSpec::new()));
    }
}
