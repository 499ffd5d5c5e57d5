//! Trigonometric and inverse trigonometric functions
//!
//! Inverse functions are built from the toolkit's own principal `sqrt` and
//! `ln`, so on the real axis they agree with `f64::asin`/`acos`/`atan`.

use super::{Complex, ComplexToolkit};

impl ComplexToolkit {
    /// `sin(x + iy) = sin x cosh y + i cos x sinh y`
    pub fn sin(&self, z: Complex) -> Complex {
        let (x, y) = (z.real(), z.imag());
        Complex::new(x.sin() * y.cosh(), x.cos() * y.sinh())
    }

    /// `cos(x + iy) = cos x cosh y - i sin x sinh y`
    pub fn cos(&self, z: Complex) -> Complex {
        let (x, y) = (z.real(), z.imag());
        Complex::new(x.cos() * y.cosh(), -(x.sin() * y.sinh()))
    }

    pub fn tan(&self, z: Complex) -> Complex {
        self.divide(self.sin(z), self.cos(z))
    }

    pub fn sec(&self, z: Complex) -> Complex {
        self.divide(Complex::ONE, self.cos(z))
    }

    pub fn cosec(&self, z: Complex) -> Complex {
        self.divide(Complex::ONE, self.sin(z))
    }

    pub fn cot(&self, z: Complex) -> Complex {
        self.divide(self.cos(z), self.sin(z))
    }

    /// `asin z = -i ln(iz + sqrt(1 - z^2))`
    pub fn asin(&self, z: Complex) -> Complex {
        let root = self.sqrt(self.subtract(Complex::ONE, self.square(z)));
        let inner = self.add(self.multiply(Complex::I, z), root);
        self.multiply(Complex::new(0.0, -1.0), self.ln(inner))
    }

    /// `acos z = -i ln(z + i sqrt(1 - z^2))`
    pub fn acos(&self, z: Complex) -> Complex {
        let root = self.sqrt(self.subtract(Complex::ONE, self.square(z)));
        let inner = self.add(z, self.multiply(Complex::I, root));
        self.multiply(Complex::new(0.0, -1.0), self.ln(inner))
    }

    /// `atan z = (i/2) ln((i + z) / (i - z))`
    pub fn atan(&self, z: Complex) -> Complex {
        let ratio = self.divide(self.add(Complex::I, z), self.subtract(Complex::I, z));
        self.multiply(Complex::new(0.0, 0.5), self.ln(ratio))
    }
}
