//! Graphsync core library
//!
//! Links identically named sliders across loaded graphs and provides the
//! complex-number math nodes those graphs evaluate.

pub mod complex;
pub mod config;
pub mod constants;
pub mod error;
pub mod graphs;
pub mod nodes;
pub mod sliders;
pub mod values;

// Re-export commonly used types
pub use complex::{Complex, ComplexToolkit};
pub use config::SyncConfig;
pub use error::{Result, SyncError};
pub use graphs::{GraphRegistry, GraphSpec, SyncSession};
pub use nodes::{NodeDescriptor, NodeRegistry};
pub use sliders::{GraphSource, MapResult, RawSlider, SharedSliderEngine, SliderEngine, SliderGroupView};
