//! Registry and engine kept in step
//!
//! Every mutation goes through the session and finishes with a reconcile,
//! so group views are never stale relative to the loaded graphs.

use log::debug;

use super::registry::{EventKind, GraphEntry, GraphRegistry, GraphSpec, ListenerId, RegistryEvent};
use crate::config::SyncConfig;
use crate::error::Result;
use crate::sliders::{MapResult, SliderEngine, SliderGroupView};

/// Loaded graphs plus their reconciled slider groups
pub struct SyncSession {
    registry: GraphRegistry,
    engine: SliderEngine,
}

impl Default for SyncSession {
    fn default() -> Self {
        Self::new(SliderEngine::default())
    }
}

impl SyncSession {
    pub fn new(engine: SliderEngine) -> Self {
        Self {
            registry: GraphRegistry::new(),
            engine,
        }
    }

    pub fn from_config(config: &SyncConfig) -> Result<Self> {
        Ok(Self::new(SliderEngine::from_config(config)?))
    }

    pub fn registry(&self) -> &GraphRegistry {
        &self.registry
    }

    pub fn engine(&self) -> &SliderEngine {
        &self.engine
    }

    pub fn subscribe<F>(&mut self, kind: EventKind, listener: F) -> ListenerId
    where
        F: FnMut(&RegistryEvent) -> std::result::Result<(), String> + 'static,
    {
        self.registry.subscribe(kind, listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.registry.unsubscribe(id)
    }

    pub fn add_graph(&mut self, spec: GraphSpec) -> String {
        let id = self.registry.add(spec);
        self.reconcile();
        id
    }

    pub fn add_graph_with_id(&mut self, id: &str, spec: GraphSpec) -> String {
        let id = self.registry.add_with_id(id, spec);
        self.reconcile();
        id
    }

    pub fn update_graph(&mut self, id: &str, spec: GraphSpec) -> bool {
        let updated = self.registry.update(id, spec);
        if updated {
            self.reconcile();
        }
        updated
    }

    pub fn remove_graph(&mut self, id: &str) -> Option<GraphEntry> {
        let removed = self.registry.remove(id);
        if removed.is_some() {
            self.reconcile();
        }
        removed
    }

    pub fn set_active_graph(&mut self, id: Option<&str>) -> bool {
        let changed = self.registry.set_active(id);
        if changed {
            self.reconcile();
        }
        changed
    }

    pub fn groups(&self) -> Vec<SliderGroupView> {
        self.engine.list()
    }

    pub fn group(&self, id: &str) -> Option<SliderGroupView> {
        self.engine.get_group(id)
    }

    /// Drive a group to `value`, writing each member's value into its graph
    pub fn set_group_value(&mut self, group_id: &str, value: f64) -> Option<MapResult> {
        let result = self.engine.map_value(group_id, value)?;
        for update in &result.updates {
            if !self.registry.apply_update(update) {
                debug!("No slider {}:{} to receive update", update.graph_id, update.node_id);
            }
        }
        self.reconcile();
        Some(result)
    }

    /// Rebuild groups from the current registry contents
    pub fn reconcile(&mut self) {
        let sources = self.registry.sources();
        self.engine.reconcile(&sources, self.registry.active());
    }
}
