//! Application-wide constants and default values
//!
//! Centralized location for all hard-coded values to improve maintainability

/// Slider range defaults used when a slider omits its bounds or step
pub mod range {
    /// Lower bound used when a slider specifies no minimum
    pub const DEFAULT_MIN: f64 = 0.0;

    /// Upper bound used when a slider specifies no maximum
    pub const DEFAULT_MAX: f64 = 10.0;

    /// Number of steps a derived step divides the span into
    pub const STEP_DIVISIONS: f64 = 100.0;

    /// Step used when the span collapses to zero
    pub const FALLBACK_STEP: f64 = 0.01;
}

/// Slider grouping constants
pub mod group {
    /// Role that wins canonical election when none is configured
    pub const DEFAULT_PRIMARY_ROLE: &str = "primary";

    /// Public id used when a label slugifies to nothing
    pub const FALLBACK_SLUG: &str = "slider";

    /// Prefix for node ids synthesized for sliders that carry none
    pub const FALLBACK_NODE_PREFIX: &str = "slider-";
}

/// Complex arithmetic constants
pub mod complex {
    /// Absolute threshold below which both components count as zero
    pub const DEFAULT_EPSILON: f64 = 1e-12;

    /// Node type tag for every complex node descriptor
    pub const NODE_TYPE: &str = "complex";

    /// Output pin every complex node writes to
    pub const RESULT_PIN: &str = "result";
}

/// Graph registry constants
pub mod graph {
    /// Prefix for generated graph ids
    pub const ID_PREFIX: &str = "graph-";
}

/// Logging defaults
pub mod logging {
    /// Filter used by the binary when neither config nor RUST_LOG set one
    pub const DEFAULT_FILTER: &str = "info";
}
