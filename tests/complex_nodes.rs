use std::collections::BTreeMap;

use graphsync::complex::{ensure_complex, parse_complex_string};
use graphsync::nodes::{register_complex_arithmetic_nodes, register_complex_trig_nodes};
use graphsync::{Complex, ComplexToolkit, NodeRegistry};
use serde_json::{json, Value};

fn registry() -> NodeRegistry {
    let toolkit = ComplexToolkit::default();
    let mut registry = NodeRegistry::new();
    register_complex_arithmetic_nodes(&mut registry, toolkit).unwrap();
    register_complex_trig_nodes(&mut registry, toolkit).unwrap();
    registry
}

fn pins(entries: &[(&str, Value)]) -> BTreeMap<String, Value> {
    entries.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

#[test]
fn test_parse_examples() {
    let z = parse_complex_string("3-4i").unwrap();
    assert_eq!((z.real(), z.imag()), (3.0, -4.0));
    assert_eq!(z.magnitude(), 5.0);

    let i = parse_complex_string("i").unwrap();
    assert_eq!((i.real(), i.imag()), (0.0, 1.0));

    assert!(parse_complex_string("abc").is_none());
}

#[test]
fn test_power_of_zero_base() {
    let toolkit = ComplexToolkit::default();
    assert_eq!(toolkit.pow(Complex::ZERO, Complex::ZERO), Complex::ONE);
    assert_eq!(toolkit.pow(Complex::ZERO, Complex::from_real(2.0)), Complex::ZERO);
}

#[test]
fn test_record_coercion_accepts_aliases() {
    let z = ensure_complex(&json!({"re": 1.5, "im": -2}), Complex::ZERO);
    assert_eq!((z.real(), z.imag()), (1.5, -2.0));

    let fallback = Complex::new(7.0, 7.0);
    assert_eq!(ensure_complex(&json!({"unrelated": true}), fallback), fallback);
}

#[test]
fn test_registry_holds_every_binding() {
    let registry = registry();
    assert_eq!(registry.len(), 19);
    assert!(registry.contains("complex-add"));
    assert!(registry.contains("COMPLEX SINE"));
    assert!(!registry.contains("complex-gamma"));
}

#[test]
fn test_evaluate_by_alias_with_host_pin_names() {
    let registry = registry();

    let sum = registry
        .evaluate("Complex Add", &pins(&[("A", json!("1+2i")), ("Right", json!([3, -1]))]))
        .unwrap();
    let result = sum["result"];
    assert_eq!((result.real(), result.imag()), (4.0, 1.0));

    let power = registry
        .evaluate("complex-power", &pins(&[("Base", json!("i")), ("Exponent", json!(2))]))
        .unwrap();
    assert!(power["result"].approx_eq(&Complex::new(-1.0, 0.0), 1e-12));

    assert!(registry.evaluate("complex-gamma", &BTreeMap::new()).is_none());
}

#[test]
fn test_divide_by_zero_is_nan() {
    let registry = registry();
    let outputs = registry
        .evaluate("complex-divide", &pins(&[("a", json!(1)), ("b", json!(0))]))
        .unwrap();
    assert!(outputs["result"].is_nan());
}

#[test]
fn test_results_serialize_with_polar_form() {
    let registry = registry();
    let outputs = registry
        .evaluate("complex-conjugate", &pins(&[("z", json!({"real": 3, "imag": 4}))]))
        .unwrap();
    let encoded = serde_json::to_value(&outputs).unwrap();
    assert_eq!(encoded["result"]["real"], json!(3.0));
    assert_eq!(encoded["result"]["imag"], json!(-4.0));
    assert_eq!(encoded["result"]["magnitude"], json!(5.0));
}
