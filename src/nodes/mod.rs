//! Node system - evaluable node descriptors and their registry

pub mod complex;
pub mod registry;

// Re-export core types
pub use registry::{
    EvalFn, NodeDescriptor, NodeInputs, NodeOutputs, NodeRegistrar, NodeRegistry, PinMap,
};

// Re-export registration entry points
pub use complex::{register_complex_arithmetic_nodes, register_complex_trig_nodes};
