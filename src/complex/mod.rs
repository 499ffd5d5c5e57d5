//! Complex number arithmetic for math nodes
//!
//! A [`Complex`] always carries its polar form alongside the rectangular
//! components so downstream nodes never recompute it. Operations live on
//! [`ComplexToolkit`], which owns the zero-test threshold used by division,
//! logarithms, and powers.

pub mod coerce;
pub mod parse;
pub mod toolkit;
pub mod trig;

pub use coerce::{ensure_complex, ensure_complex_or_zero, matching_probe};
pub use parse::parse_complex_string;
pub use toolkit::ComplexToolkit;

use serde::Serialize;
use std::fmt;

/// Complex value with eagerly derived magnitude and argument
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Complex {
    real: f64,
    imag: f64,
    magnitude: f64,
    argument: f64,
}

impl Complex {
    pub const ZERO: Complex = Complex { real: 0.0, imag: 0.0, magnitude: 0.0, argument: 0.0 };
    pub const ONE: Complex = Complex { real: 1.0, imag: 0.0, magnitude: 1.0, argument: 0.0 };
    pub const I: Complex = Complex {
        real: 0.0,
        imag: 1.0,
        magnitude: 1.0,
        argument: std::f64::consts::FRAC_PI_2,
    };

    /// Create from rectangular components
    pub fn new(real: f64, imag: f64) -> Self {
        let (magnitude, argument) = if real.is_finite() && imag.is_finite() {
            (real.hypot(imag), imag.atan2(real))
        } else {
            (f64::NAN, f64::NAN)
        };
        Self { real, imag, magnitude, argument }
    }

    /// Create a purely real value
    pub fn from_real(real: f64) -> Self {
        Self::new(real, 0.0)
    }

    /// Create from polar components
    pub fn from_polar(magnitude: f64, argument: f64) -> Self {
        Self::new(magnitude * argument.cos(), magnitude * argument.sin())
    }

    /// Undefined result
    pub fn nan() -> Self {
        Self::new(f64::NAN, f64::NAN)
    }

    pub fn real(&self) -> f64 {
        self.real
    }

    pub fn imag(&self) -> f64 {
        self.imag
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn argument(&self) -> f64 {
        self.argument
    }

    pub fn is_nan(&self) -> bool {
        self.real.is_nan() || self.imag.is_nan()
    }

    /// Check both components are within `tolerance` of another value
    pub fn approx_eq(&self, other: &Complex, tolerance: f64) -> bool {
        (self.real - other.real).abs() <= tolerance && (self.imag - other.imag).abs() <= tolerance
    }
}

impl Default for Complex {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.imag < 0.0 {
            write!(f, "{}-{}i", self.real, -self.imag)
        } else {
            write!(f, "{}+{}i", self.real, self.imag)
        }
    }
}
