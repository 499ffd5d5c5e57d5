//! Range resolution for partially specified sliders
//!
//! [`resolve_range`] is total: any slider, however malformed, resolves to a
//! usable range with `max >= min`, `step > 0`, and `value` inside the bounds.
//! The flags record which parts were derived so the engine can explain them.

use serde::Serialize;
use serde_json::Value;

use super::source::RawSlider;
use crate::constants::range::{DEFAULT_MAX, DEFAULT_MIN, FALLBACK_STEP, STEP_DIVISIONS};
use crate::values::finite_number;

/// Fully resolved numeric range with diagnostic flags
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedRange {
    pub min: f64,
    pub max: f64,
    pub span: f64,
    pub step: f64,
    pub value: f64,
    pub raw_min: Option<f64>,
    pub raw_max: Option<f64>,
    pub raw_step: Option<f64>,
    pub raw_value: Option<f64>,
    pub has_min: bool,
    pub has_max: bool,
    pub has_step: bool,
    pub value_provided: bool,
    /// A value was supplied but could not be read as a number
    pub value_invalid: bool,
    pub step_adjusted: bool,
    pub value_clamped: bool,
    pub has_range: bool,
}

impl ResolvedRange {
    /// Whether either bound had to be derived
    pub fn bounds_derived(&self) -> bool {
        !self.has_min || !self.has_max
    }

    /// Position of `value` inside the range, unclamped; zero for collapsed spans
    pub fn relative_position(&self, value: f64) -> f64 {
        if self.span > 0.0 {
            (value - self.min) / self.span
        } else {
            0.0
        }
    }
}

/// Resolve a raw slider into a complete range
pub fn resolve_range(slider: &RawSlider) -> ResolvedRange {
    resolve_parts(
        slider.min.as_ref(),
        slider.max.as_ref(),
        slider.step.as_ref(),
        slider.value.as_ref(),
    )
}

/// Resolve a range from individual raw fields
pub fn resolve_parts(
    min: Option<&Value>,
    max: Option<&Value>,
    step: Option<&Value>,
    value: Option<&Value>,
) -> ResolvedRange {
    let raw_min = min.and_then(finite_number);
    let raw_max = max.and_then(finite_number);
    let raw_step = step.and_then(finite_number);
    let raw_value = value.and_then(finite_number);
    let value_invalid = raw_value.is_none() && value.map_or(false, |v| !v.is_null());

    let (mut lo, mut hi) = match (raw_min, raw_max) {
        (Some(lo), Some(hi)) => (lo, hi),
        (Some(lo), None) => (lo, DEFAULT_MAX.max(lo)),
        (None, Some(hi)) => (DEFAULT_MIN.min(hi), hi),
        (None, None) => (DEFAULT_MIN, DEFAULT_MAX),
    };
    if hi < lo {
        std::mem::swap(&mut lo, &mut hi);
    }
    let span = hi - lo;

    let (step, step_adjusted) = match raw_step {
        Some(step) if step > 0.0 => (step, false),
        _ if span > 0.0 => (span / STEP_DIVISIONS, true),
        _ => (FALLBACK_STEP, true),
    };

    let (value, value_clamped) = match raw_value {
        Some(v) => {
            let clamped = v.clamp(lo, hi);
            (clamped, clamped != v)
        }
        None => (lo, false),
    };

    ResolvedRange {
        min: lo,
        max: hi,
        span,
        step,
        value,
        raw_min,
        raw_max,
        raw_step,
        raw_value,
        has_min: raw_min.is_some(),
        has_max: raw_max.is_some(),
        has_step: raw_step.is_some(),
        value_provided: raw_value.is_some(),
        value_invalid,
        step_adjusted,
        value_clamped,
        has_range: span > 0.0,
    }
}
