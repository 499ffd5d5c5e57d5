//! Diagnostic note codes and their display text

use std::collections::HashMap;

use once_cell::sync::Lazy;

pub const CANONICAL_RANGE_DERIVED: &str = "canonical-range-derived";
pub const CANONICAL_STEP_ADJUSTED: &str = "canonical-step-adjusted";
pub const CANONICAL_VALUE_CLAMPED: &str = "canonical-value-clamped";
pub const RANGE_MISMATCH: &str = "range-mismatch";

pub const RANGE_DERIVED: &str = "range-derived";
pub const NO_RANGE: &str = "no-range";
pub const STEP_ADJUSTED: &str = "step-adjusted";
pub const VALUE_CLAMPED: &str = "value-clamped";
pub const NORMALIZED: &str = "normalized";
pub const INVALID_VALUE: &str = "invalid-value";

static NOTE_MESSAGES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (CANONICAL_RANGE_DERIVED, "Canonical slider is missing a bound; default range applied."),
        (CANONICAL_STEP_ADJUSTED, "Canonical slider step was missing or invalid; derived from range."),
        (CANONICAL_VALUE_CLAMPED, "Canonical slider value was outside its range and has been clamped."),
        (RANGE_MISMATCH, "Linked sliders use different ranges; values are mapped proportionally."),
        (RANGE_DERIVED, "Slider is missing a bound; default range applied."),
        (NO_RANGE, "Slider range is empty; value pinned to minimum."),
        (STEP_ADJUSTED, "Slider step was missing or invalid; derived from range."),
        (VALUE_CLAMPED, "Slider value was outside its range and has been clamped."),
        (NORMALIZED, "Slider position was outside its range and has been normalized."),
        (INVALID_VALUE, "Slider value is not a number; using the range minimum."),
    ])
});

/// Display text for a note code; unknown codes pass through unchanged
pub fn describe(code: &str) -> String {
    NOTE_MESSAGES.get(code).copied().unwrap_or(code).to_string()
}

/// Ordered set of note codes with duplicates dropped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteSet {
    codes: Vec<&'static str>,
}

impl NoteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a code unless it is already present
    pub fn insert(&mut self, code: &'static str) {
        if !self.codes.contains(&code) {
            self.codes.push(code);
        }
    }

    /// Add a code when `condition` holds
    pub fn insert_if(&mut self, condition: bool, code: &'static str) {
        if condition {
            self.insert(code);
        }
    }

    pub fn codes(&self) -> &[&'static str] {
        &self.codes
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Translate every code to its display text
    pub fn messages(&self) -> Vec<String> {
        self.codes.iter().map(|code| describe(code)).collect()
    }
}
