//! String parsing for complex literals such as `3-4i`, `-i`, or `2.5`

use super::Complex;

/// Parse a complex literal, returning `None` when the text is not one
///
/// Accepts bare reals, bare imaginaries (`i`, `+i`, `-i`, `4i`) and the
/// `a+bi` / `a-bi` forms. Whitespace is ignored and `I` is accepted for `i`.
pub fn parse_complex_string(text: &str) -> Option<Complex> {
    let compact: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();
    if compact.is_empty() {
        return None;
    }

    let Some(body) = compact.strip_suffix('i') else {
        return parse_real(&compact).map(Complex::from_real);
    };

    match split_at_sign(body) {
        Some(split) => {
            let real = parse_real(&body[..split])?;
            let imag = parse_coefficient(&body[split..])?;
            Some(Complex::new(real, imag))
        }
        None => parse_coefficient(body).map(|imag| Complex::new(0.0, imag)),
    }
}

/// Index of the last `+`/`-` separating the real part from the imaginary one
///
/// A sign directly after an exponent marker belongs to the number, and a sign
/// in the first position is the leading sign of the whole literal.
fn split_at_sign(body: &str) -> Option<usize> {
    let bytes = body.as_bytes();
    (1..bytes.len())
        .rev()
        .find(|&k| matches!(bytes[k], b'+' | b'-') && bytes[k - 1] != b'e')
}

/// Imaginary coefficient, where a bare sign means one
fn parse_coefficient(text: &str) -> Option<f64> {
    match text {
        "" | "+" => Some(1.0),
        "-" => Some(-1.0),
        _ => parse_real(text),
    }
}

fn parse_real(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|f| f.is_finite())
}
