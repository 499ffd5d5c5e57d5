//! Coercion of loosely-typed node inputs into complex values
//!
//! Records are probed in a fixed priority order. The alias lists and their
//! order are part of the node contract: a record carrying both `real` and `x`
//! always reads `real`.

use log::debug;
use serde_json::{Map, Value};

use super::{parse_complex_string, Complex};
use crate::values::finite_number;

/// Field names read as the real component, highest priority first
pub const REAL_ALIASES: &[&str] = &["real", "re", "Re", "x", "a"];

/// Field names read as the imaginary component, highest priority first
pub const IMAG_ALIASES: &[&str] = &["imag", "imaginary", "im", "Im", "y", "b"];

/// Field names read as the polar magnitude
pub const MAGNITUDE_ALIASES: &[&str] = &["magnitude", "mag", "modulus", "abs", "r", "radius"];

/// Field names read as the polar angle in radians
pub const ANGLE_ALIASES: &[&str] = &["argument", "arg", "angle", "phase", "theta"];

/// Field names holding a nested value to coerce recursively
pub const NESTED_ALIASES: &[&str] = &["value", "values", "coords", "components"];

type RecordProbe = fn(&Map<String, Value>) -> Option<Complex>;

/// Record extraction strategies in priority order
const RECORD_PROBES: &[(&str, RecordProbe)] = &[
    ("rectangular", probe_rectangular),
    ("polar", probe_polar),
    ("nested", probe_nested),
];

/// Coerce any host value into a complex number, or return `fallback`
pub fn ensure_complex(value: &Value, fallback: Complex) -> Complex {
    try_complex(value).unwrap_or(fallback)
}

/// Coerce with zero as the fallback
pub fn ensure_complex_or_zero(value: &Value) -> Complex {
    ensure_complex(value, Complex::ZERO)
}

/// Name of the first record probe that reads `record`
pub fn matching_probe(record: &Map<String, Value>) -> Option<&'static str> {
    probe_record(record).map(|(name, _)| name)
}

fn try_complex(value: &Value) -> Option<Complex> {
    match value {
        Value::Number(_) => finite_number(value).map(Complex::from_real),
        Value::Bool(b) => Some(Complex::from_real(if *b { 1.0 } else { 0.0 })),
        Value::String(s) => parse_complex_string(s),
        Value::Array(items) => coerce_pair(items),
        Value::Object(record) => probe_record(record).map(|(name, z)| {
            debug!("Read complex record via {} fields", name);
            z
        }),
        Value::Null => None,
    }
}

fn probe_record(record: &Map<String, Value>) -> Option<(&'static str, Complex)> {
    RECORD_PROBES
        .iter()
        .find_map(|(name, probe)| probe(record).map(|z| (*name, z)))
}

fn coerce_pair(items: &[Value]) -> Option<Complex> {
    match items {
        [single] => try_complex(single),
        [re, im, ..] => Some(Complex::new(finite_number(re)?, finite_number(im)?)),
        [] => None,
    }
}

fn first_number(record: &Map<String, Value>, aliases: &[&str]) -> Option<f64> {
    aliases
        .iter()
        .find_map(|alias| record.get(*alias).and_then(finite_number))
}

fn probe_rectangular(record: &Map<String, Value>) -> Option<Complex> {
    let real = first_number(record, REAL_ALIASES);
    let imag = first_number(record, IMAG_ALIASES);
    if real.is_none() && imag.is_none() {
        return None;
    }
    Some(Complex::new(real.unwrap_or(0.0), imag.unwrap_or(0.0)))
}

fn probe_polar(record: &Map<String, Value>) -> Option<Complex> {
    let magnitude = first_number(record, MAGNITUDE_ALIASES)?;
    let angle = first_number(record, ANGLE_ALIASES).unwrap_or(0.0);
    Some(Complex::from_polar(magnitude, angle))
}

fn probe_nested(record: &Map<String, Value>) -> Option<Complex> {
    NESTED_ALIASES
        .iter()
        .find_map(|alias| record.get(*alias).filter(|v| !v.is_null()))
        .and_then(try_complex)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parts(z: Complex) -> (f64, f64) {
        (z.real(), z.imag())
    }

    #[test]
    fn test_scalars() {
        assert_eq!(parts(ensure_complex_or_zero(&json!(2.5))), (2.5, 0.0));
        assert_eq!(parts(ensure_complex_or_zero(&json!(true))), (1.0, 0.0));
        assert_eq!(parts(ensure_complex_or_zero(&json!("1-2i"))), (1.0, -2.0));
        assert_eq!(parts(ensure_complex_or_zero(&json!(null))), (0.0, 0.0));
    }

    #[test]
    fn test_pairs() {
        assert_eq!(parts(ensure_complex_or_zero(&json!([3, 4]))), (3.0, 4.0));
        assert_eq!(parts(ensure_complex_or_zero(&json!([7]))), (7.0, 0.0));
        assert_eq!(parts(ensure_complex_or_zero(&json!(["x", 4]))), (0.0, 0.0));
    }

    #[test]
    fn test_rectangular_alias_priority() {
        let z = ensure_complex_or_zero(&json!({"x": 9, "real": 1, "im": 2}));
        assert_eq!(parts(z), (1.0, 2.0));

        let z = ensure_complex_or_zero(&json!({"imaginary": "3"}));
        assert_eq!(parts(z), (0.0, 3.0));
    }

    #[test]
    fn test_polar_record() {
        let z = ensure_complex_or_zero(&json!({"magnitude": 2, "angle": std::f64::consts::FRAC_PI_2}));
        assert!(z.real().abs() < 1e-12);
        assert!((z.imag() - 2.0).abs() < 1e-12);

        let z = ensure_complex_or_zero(&json!({"r": 4}));
        assert_eq!(parts(z), (4.0, 0.0));
    }

    #[test]
    fn test_rectangular_beats_polar() {
        let z = ensure_complex_or_zero(&json!({"magnitude": 10, "re": 1}));
        assert_eq!(parts(z), (1.0, 0.0));
    }

    #[test]
    fn test_nested_value() {
        let z = ensure_complex_or_zero(&json!({"value": {"re": 5, "im": -1}}));
        assert_eq!(parts(z), (5.0, -1.0));

        let z = ensure_complex_or_zero(&json!({"coords": [1, 2]}));
        assert_eq!(parts(z), (1.0, 2.0));
    }

    #[test]
    fn test_unrecognized_uses_fallback() {
        let fallback = Complex::new(-1.0, -1.0);
        assert_eq!(ensure_complex(&json!({"foo": 1}), fallback), fallback);
        assert_eq!(ensure_complex(&json!("abc"), fallback), fallback);
        assert_eq!(ensure_complex(&json!([]), fallback), fallback);
    }

    #[test]
    fn test_matching_probe_reports_strategy() {
        let record = |v: Value| v.as_object().cloned().unwrap();
        assert_eq!(matching_probe(&record(json!({"re": 1}))), Some("rectangular"));
        assert_eq!(matching_probe(&record(json!({"r": 2, "theta": 0.5}))), Some("polar"));
        assert_eq!(matching_probe(&record(json!({"value": "2i"}))), Some("nested"));
        assert_eq!(matching_probe(&record(json!({"value": "junk"}))), None);
        assert_eq!(matching_probe(&record(json!({"other": 1}))), None);
    }
}
