//! Arithmetic, powers, and logarithms on the principal branch

use super::Complex;
use crate::config::SyncConfig;
use crate::constants;
use crate::error::{Result, SyncError};

/// Complex operations sharing one zero-test threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComplexToolkit {
    epsilon: f64,
}

impl Default for ComplexToolkit {
    fn default() -> Self {
        Self { epsilon: constants::complex::DEFAULT_EPSILON }
    }
}

impl ComplexToolkit {
    /// Create a toolkit with a custom zero threshold
    pub fn new(epsilon: f64) -> Result<Self> {
        if !epsilon.is_finite() || epsilon < 0.0 {
            return Err(SyncError::InvalidEpsilon(epsilon));
        }
        Ok(Self { epsilon })
    }

    pub fn from_config(config: &SyncConfig) -> Result<Self> {
        Self::new(config.complex_epsilon)
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// True when both components are below the threshold
    pub fn is_zero(&self, z: Complex) -> bool {
        z.real().abs() < self.epsilon && z.imag().abs() < self.epsilon
    }

    pub fn add(&self, a: Complex, b: Complex) -> Complex {
        Complex::new(a.real() + b.real(), a.imag() + b.imag())
    }

    pub fn subtract(&self, a: Complex, b: Complex) -> Complex {
        Complex::new(a.real() - b.real(), a.imag() - b.imag())
    }

    pub fn multiply(&self, a: Complex, b: Complex) -> Complex {
        Complex::new(
            a.real() * b.real() - a.imag() * b.imag(),
            a.real() * b.imag() + a.imag() * b.real(),
        )
    }

    /// Quotient `a / b`; NaN when `b` is zero
    pub fn divide(&self, a: Complex, b: Complex) -> Complex {
        if self.is_zero(b) {
            return Complex::nan();
        }
        let denom = b.real() * b.real() + b.imag() * b.imag();
        Complex::new(
            (a.real() * b.real() + a.imag() * b.imag()) / denom,
            (a.imag() * b.real() - a.real() * b.imag()) / denom,
        )
    }

    pub fn conjugate(&self, z: Complex) -> Complex {
        Complex::new(z.real(), -z.imag())
    }

    pub fn negate(&self, z: Complex) -> Complex {
        Complex::new(-z.real(), -z.imag())
    }

    pub fn scale(&self, z: Complex, factor: f64) -> Complex {
        Complex::new(z.real() * factor, z.imag() * factor)
    }

    pub fn square(&self, z: Complex) -> Complex {
        self.multiply(z, z)
    }

    /// Principal square root
    pub fn sqrt(&self, z: Complex) -> Complex {
        if self.is_zero(z) {
            return Complex::ZERO;
        }
        Complex::from_polar(z.magnitude().sqrt(), z.argument() / 2.0)
    }

    pub fn exp(&self, z: Complex) -> Complex {
        Complex::from_polar(z.real().exp(), z.imag())
    }

    /// Principal natural logarithm; `ln(0)` is `-inf + 0i`
    pub fn ln(&self, z: Complex) -> Complex {
        if self.is_zero(z) {
            return Complex::new(f64::NEG_INFINITY, 0.0);
        }
        Complex::new(z.magnitude().ln(), z.argument())
    }

    /// `base ^ exponent` through `exp(exponent * ln(base))`
    pub fn pow(&self, base: Complex, exponent: Complex) -> Complex {
        if self.is_zero(base) {
            return self.pow_zero_base(exponent);
        }
        let log_r = base.magnitude().ln();
        let theta = base.argument();
        let magnitude = (exponent.real() * log_r - exponent.imag() * theta).exp();
        let angle = exponent.imag() * log_r + exponent.real() * theta;
        Complex::from_polar(magnitude, angle)
    }

    fn pow_zero_base(&self, exponent: Complex) -> Complex {
        if self.is_zero(exponent) {
            Complex::ONE
        } else if exponent.imag().abs() >= self.epsilon {
            Complex::ZERO
        } else if exponent.real() > 0.0 {
            Complex::ZERO
        } else if exponent.real().abs() < self.epsilon {
            Complex::ONE
        } else {
            Complex::new(f64::INFINITY, 0.0)
        }
    }
}
