//! Lock-guarded engine handle for multi-threaded hosts
//!
//! Every operation holds the single engine lock for its whole duration, so a
//! reader never observes a half-finished reconcile.

use std::sync::{Arc, Mutex, MutexGuard};

use log::warn;

use super::engine::SliderEngine;
use super::source::GraphSource;
use super::view::{MapResult, SliderGroupView};

/// Cloneable handle to one shared [`SliderEngine`]
#[derive(Debug, Clone, Default)]
pub struct SharedSliderEngine {
    inner: Arc<Mutex<SliderEngine>>,
}

impl SharedSliderEngine {
    pub fn new(engine: SliderEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SliderEngine> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            warn!("Slider engine lock was poisoned; recovering state");
            poisoned.into_inner()
        })
    }

    pub fn reconcile(&self, sources: &[GraphSource], active_graph_id: Option<&str>) {
        self.lock().reconcile(sources, active_graph_id);
    }

    pub fn map_value(&self, group_id: &str, canonical_value: f64) -> Option<MapResult> {
        self.lock().map_value(group_id, canonical_value)
    }

    pub fn list(&self) -> Vec<SliderGroupView> {
        self.lock().list()
    }

    pub fn get_group(&self, group_id: &str) -> Option<SliderGroupView> {
        self.lock().get_group(group_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sliders::source::RawSlider;
    use std::thread;

    #[test]
    fn test_shared_across_threads() {
        let shared = SharedSliderEngine::new(SliderEngine::default());
        let sources = vec![GraphSource::new("A")
            .with_slider(RawSlider::new("n").with_nick_name("Level").with_min(0.0).with_max(1.0).with_value(0.5))];

        let writer = {
            let shared = shared.clone();
            thread::spawn(move || shared.reconcile(&sources, None))
        };
        writer.join().unwrap();

        let reader = {
            let shared = shared.clone();
            thread::spawn(move || shared.map_value("level", 0.25))
        };
        let result = reader.join().unwrap().unwrap();
        assert_eq!(result.updates[0].value, 0.25);
        assert_eq!(shared.list().len(), 1);
        assert!(shared.get_group("level").is_some());
    }
}
