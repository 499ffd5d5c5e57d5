//! Complex math node bindings
//!
//! Each binding wires one toolkit function to a fixed node id, a set of
//! human-readable aliases, and the pin names hosts use for its arguments.

use log::debug;

use super::registry::{NodeDescriptor, NodeInputs, NodeOutputs, NodeRegistrar, PinMap};
use crate::complex::{ensure_complex_or_zero, Complex, ComplexToolkit};
use crate::constants::complex::{NODE_TYPE, RESULT_PIN};
use crate::error::Result;

type UnaryOp = fn(&ComplexToolkit, Complex) -> Complex;
type BinaryOp = fn(&ComplexToolkit, Complex, Complex) -> Complex;

/// How a binding reads its arguments
#[derive(Clone, Copy)]
enum Arity {
    Unary(UnaryOp),
    /// Two operands named `a` and `b`
    Binary(BinaryOp),
    /// `base` raised to `exponent`
    Power(BinaryOp),
}

struct Binding {
    ids: &'static [&'static str],
    display_name: &'static str,
    description: &'static str,
    arity: Arity,
}

const UNARY_INPUT_ALIASES: &[&str] = &["Z", "Input", "Value", "Complex", "Number", "X"];
const FIRST_OPERAND_ALIASES: &[&str] = &["A", "Z1", "First", "Left"];
const SECOND_OPERAND_ALIASES: &[&str] = &["B", "Z2", "Second", "Right"];
const BASE_ALIASES: &[&str] = &["Base", "A", "Z"];
const EXPONENT_ALIASES: &[&str] = &["Exponent", "Power", "B", "N"];
const RESULT_ALIASES: &[&str] = &["Result", "R", "W", "Output", "Out"];

const ARITHMETIC_BINDINGS: &[Binding] = &[
    Binding {
        ids: &["5a8e2f14-3c71-4b0d-9e62-1f7a4c3d8b01", "complex-add", "Complex Add"],
        display_name: "Complex Add",
        description: "Sum of two complex numbers",
        arity: Arity::Binary(ComplexToolkit::add),
    },
    Binding {
        ids: &["5a8e2f14-3c71-4b0d-9e62-1f7a4c3d8b02", "complex-subtract", "Complex Subtract"],
        display_name: "Complex Subtract",
        description: "Difference of two complex numbers",
        arity: Arity::Binary(ComplexToolkit::subtract),
    },
    Binding {
        ids: &["5a8e2f14-3c71-4b0d-9e62-1f7a4c3d8b03", "complex-multiply", "Complex Multiply"],
        display_name: "Complex Multiply",
        description: "Product of two complex numbers",
        arity: Arity::Binary(ComplexToolkit::multiply),
    },
    Binding {
        ids: &["5a8e2f14-3c71-4b0d-9e62-1f7a4c3d8b04", "complex-divide", "Complex Divide"],
        display_name: "Complex Divide",
        description: "Quotient of two complex numbers; NaN when dividing by zero",
        arity: Arity::Binary(ComplexToolkit::divide),
    },
    Binding {
        ids: &["5a8e2f14-3c71-4b0d-9e62-1f7a4c3d8b05", "complex-conjugate", "Complex Conjugate"],
        display_name: "Complex Conjugate",
        description: "Mirror across the real axis",
        arity: Arity::Unary(ComplexToolkit::conjugate),
    },
    Binding {
        ids: &["5a8e2f14-3c71-4b0d-9e62-1f7a4c3d8b06", "complex-square", "Complex Square"],
        display_name: "Complex Square",
        description: "z multiplied by itself",
        arity: Arity::Unary(ComplexToolkit::square),
    },
    Binding {
        ids: &["5a8e2f14-3c71-4b0d-9e62-1f7a4c3d8b07", "complex-power", "Complex Power"],
        display_name: "Complex Power",
        description: "Principal value of base raised to exponent",
        arity: Arity::Power(ComplexToolkit::pow),
    },
    Binding {
        ids: &["5a8e2f14-3c71-4b0d-9e62-1f7a4c3d8b08", "complex-exp", "Complex Exponential"],
        display_name: "Complex Exponential",
        description: "e raised to z",
        arity: Arity::Unary(ComplexToolkit::exp),
    },
    Binding {
        ids: &["5a8e2f14-3c71-4b0d-9e62-1f7a4c3d8b09", "complex-sqrt", "Complex Square Root"],
        display_name: "Complex Square Root",
        description: "Principal square root",
        arity: Arity::Unary(ComplexToolkit::sqrt),
    },
    Binding {
        ids: &["5a8e2f14-3c71-4b0d-9e62-1f7a4c3d8b0a", "complex-ln", "Complex Natural Log", "complex-log"],
        display_name: "Complex Natural Log",
        description: "Principal natural logarithm",
        arity: Arity::Unary(ComplexToolkit::ln),
    },
];

const TRIG_BINDINGS: &[Binding] = &[
    Binding {
        ids: &["9c3d7e21-6b4a-4f18-8d05-2e9b1a7c6f01", "complex-sin", "Complex Sine"],
        display_name: "Complex Sine",
        description: "Sine of a complex number",
        arity: Arity::Unary(ComplexToolkit::sin),
    },
    Binding {
        ids: &["9c3d7e21-6b4a-4f18-8d05-2e9b1a7c6f02", "complex-cos", "Complex Cosine"],
        display_name: "Complex Cosine",
        description: "Cosine of a complex number",
        arity: Arity::Unary(ComplexToolkit::cos),
    },
    Binding {
        ids: &["9c3d7e21-6b4a-4f18-8d05-2e9b1a7c6f03", "complex-tan", "Complex Tangent"],
        display_name: "Complex Tangent",
        description: "Tangent of a complex number",
        arity: Arity::Unary(ComplexToolkit::tan),
    },
    Binding {
        ids: &["9c3d7e21-6b4a-4f18-8d05-2e9b1a7c6f04", "complex-sec", "Complex Secant"],
        display_name: "Complex Secant",
        description: "Reciprocal of cosine",
        arity: Arity::Unary(ComplexToolkit::sec),
    },
    Binding {
        ids: &["9c3d7e21-6b4a-4f18-8d05-2e9b1a7c6f05", "complex-cosec", "Complex Cosecant", "complex-csc"],
        display_name: "Complex Cosecant",
        description: "Reciprocal of sine",
        arity: Arity::Unary(ComplexToolkit::cosec),
    },
    Binding {
        ids: &["9c3d7e21-6b4a-4f18-8d05-2e9b1a7c6f06", "complex-cot", "Complex Cotangent"],
        display_name: "Complex Cotangent",
        description: "Reciprocal of tangent",
        arity: Arity::Unary(ComplexToolkit::cot),
    },
    Binding {
        ids: &["9c3d7e21-6b4a-4f18-8d05-2e9b1a7c6f07", "complex-asin", "Complex Arcsine"],
        display_name: "Complex Arcsine",
        description: "Principal inverse sine",
        arity: Arity::Unary(ComplexToolkit::asin),
    },
    Binding {
        ids: &["9c3d7e21-6b4a-4f18-8d05-2e9b1a7c6f08", "complex-acos", "Complex Arccosine"],
        display_name: "Complex Arccosine",
        description: "Principal inverse cosine",
        arity: Arity::Unary(ComplexToolkit::acos),
    },
    Binding {
        ids: &["9c3d7e21-6b4a-4f18-8d05-2e9b1a7c6f09", "complex-atan", "Complex Arctangent"],
        display_name: "Complex Arctangent",
        description: "Principal inverse tangent",
        arity: Arity::Unary(ComplexToolkit::atan),
    },
];

/// Register add, subtract, multiply, divide, conjugate, square, power, exp, sqrt, and ln
pub fn register_complex_arithmetic_nodes<R>(registry: &mut R, toolkit: ComplexToolkit) -> Result<()>
where
    R: NodeRegistrar + ?Sized,
{
    register_bindings(registry, toolkit, ARITHMETIC_BINDINGS, "Complex > Arithmetic")
}

/// Register sin, cos, tan, sec, cosec, cot, asin, acos, and atan
pub fn register_complex_trig_nodes<R>(registry: &mut R, toolkit: ComplexToolkit) -> Result<()>
where
    R: NodeRegistrar + ?Sized,
{
    register_bindings(registry, toolkit, TRIG_BINDINGS, "Complex > Trigonometry")
}

fn register_bindings<R>(
    registry: &mut R,
    toolkit: ComplexToolkit,
    bindings: &[Binding],
    category: &'static str,
) -> Result<()>
where
    R: NodeRegistrar + ?Sized,
{
    for binding in bindings {
        registry.register(descriptor(binding, toolkit).with_category(category))?;
    }
    debug!("Registered {} {} nodes", bindings.len(), category);
    Ok(())
}

fn descriptor(binding: &Binding, toolkit: ComplexToolkit) -> NodeDescriptor {
    let pins = match binding.arity {
        Arity::Unary(_) => PinMap::new().with_input("z", UNARY_INPUT_ALIASES),
        Arity::Binary(_) => PinMap::new()
            .with_input("a", FIRST_OPERAND_ALIASES)
            .with_input("b", SECOND_OPERAND_ALIASES),
        Arity::Power(_) => PinMap::new()
            .with_input("base", BASE_ALIASES)
            .with_input("exponent", EXPONENT_ALIASES),
    }
    .with_output(RESULT_PIN, RESULT_ALIASES);

    let arity = binding.arity;
    NodeDescriptor::new(NODE_TYPE, binding.ids, binding.display_name, binding.description)
        .with_pin_map(pins)
        .with_eval(move |inputs| {
            let result = match arity {
                Arity::Unary(op) => op(&toolkit, arg(inputs, "z")),
                Arity::Binary(op) => op(&toolkit, arg(inputs, "a"), arg(inputs, "b")),
                Arity::Power(op) => op(&toolkit, arg(inputs, "base"), arg(inputs, "exponent")),
            };
            NodeOutputs::from([(RESULT_PIN.to_string(), result)])
        })
}

/// Coerced argument, zero when missing
fn arg(inputs: &NodeInputs, name: &str) -> Complex {
    inputs.get(name).map(ensure_complex_or_zero).unwrap_or(Complex::ZERO)
}
