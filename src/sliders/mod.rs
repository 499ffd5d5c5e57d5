//! Cross-graph slider linking
//!
//! Sliders sharing a nickname across loaded graphs are reconciled into
//! groups. Each group exposes one canonical range, and edits to it are mapped
//! back onto every member's own range.

pub mod engine;
pub mod notes;
pub mod range;
pub mod shared;
pub mod slug;
pub mod source;
pub mod view;

pub use engine::SliderEngine;
pub use range::{resolve_range, ResolvedRange};
pub use shared::SharedSliderEngine;
pub use source::{GraphMetadata, GraphSource, RawSlider};
pub use view::{
    CanonicalSource, MapResult, MemberStatus, MemberView, RangeView, SliderGroupView, SliderUpdate,
};
