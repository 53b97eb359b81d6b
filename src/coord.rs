// coord.rs
//
// Copyright (c) 2024  Minnesota Department of Transportation
//
//! Fixed-precision coördinate formatting.
//!
//! Five decimal places is roughly 1 meter of precision, which keeps URLs
//! short while still placing features accurately.

/// Number of fractional digits kept
const PRECISION: usize = 5;

/// Format a coördinate value (degrees).
///
/// At most 5 fractional digits are rendered, rounding toward positive
/// infinity.  Trailing zeros and an integral decimal point are omitted.
/// Negative values keep their sign, even when they round to zero.
///
/// # Example
/// ```
/// use staticmap::format_coord;
/// assert_eq!(format_coord(45.123451), "45.12346");
/// assert_eq!(format_coord(-45.123459), "-45.12345");
/// assert_eq!(format_coord(-93.0), "-93");
/// ```
pub fn format_coord(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    // Rounding starts from the shortest decimal representation
    let repr = value.abs().to_string();
    let (int_part, frac_part) = match repr.find('.') {
        Some(i) => (&repr[..i], &repr[i + 1..]),
        None => (&repr[..], ""),
    };
    let mut digits: Vec<u8> = int_part.bytes().collect();
    let kept = frac_part.len().min(PRECISION);
    digits.extend(frac_part[..kept].bytes());
    digits.extend(std::iter::repeat(b'0').take(PRECISION - kept));
    let dropped = frac_part[kept..].bytes().any(|d| d != b'0');
    let negative = value.is_sign_negative();
    if dropped && !negative {
        increment(&mut digits);
    }
    let split = digits.len() - PRECISION;
    let int_digits = trim_leading_zeros(&digits[..split]);
    let frac_digits = trim_trailing_zeros(&digits[split..]);
    let mut out = String::with_capacity(digits.len() + 2);
    if negative {
        out.push('-');
    }
    out.push_str(int_digits);
    if !frac_digits.is_empty() {
        out.push('.');
        out.push_str(frac_digits);
    }
    out
}

/// Add one unit in the last place to a string of ASCII digits
fn increment(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}

fn trim_leading_zeros(digits: &[u8]) -> &str {
    let s = std::str::from_utf8(digits).unwrap_or("0");
    match s.trim_start_matches('0') {
        "" => "0",
        t => t,
    }
}

fn trim_trailing_zeros(digits: &[u8]) -> &str {
    std::str::from_utf8(digits)
        .unwrap_or("")
        .trim_end_matches('0')
}
