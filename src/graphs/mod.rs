//! Loaded graph bookkeeping
//!
//! [`GraphRegistry`] stores each graph's sliders and emits change events;
//! [`SyncSession`] pairs it with a slider engine and reconciles after every
//! change.

pub mod registry;
pub mod session;

pub use registry::{
    EventKind, GraphEntry, GraphRegistry, GraphSpec, Listener, ListenerId, RegistryEvent,
};
pub use session::SyncSession;
