//! Decimal input parsing and rounding shared by the calculators.
//!
//! Form fields arrive as free text. Parsing never fails: blank or non-numeric
//! input becomes zero so a half-typed field never blocks a recompute.

/// Parse a decimal string, falling back to `0.0`.
///
/// Accepts a comma as decimal separator and an exponent suffix (`"1e3"`), and
/// reads the longest leading numeric prefix, so `"12abc"` yields `12.0`. The
/// result is always finite; overflowing input such as `"1e400"` becomes zero.
pub fn parse_decimal(input: &str) -> f64 {
    let normalized = input.trim().replace(',', ".");
    let bytes = normalized.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => end += 1,
            b'.' if !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
        }
    }

    // Prefix may be a lone sign or dot; walk back until it parses.
    let mut prefix = &normalized[..end];
    while !prefix.is_empty() {
        if let Ok(value) = prefix.parse::<f64>() {
            return if value.is_finite() { value } else { 0.0 };
        }
        prefix = &prefix[..prefix.len() - 1];
    }
    0.0
}

/// Parse a whole count (months, operations), truncating fractions.
/// Negative or non-numeric input yields `0`.
pub fn parse_count(input: &str) -> u32 {
    let value = parse_decimal(input);
    if value <= 0.0 {
        0
    } else if value >= u32::MAX as f64 {
        u32::MAX
    } else {
        value.trunc() as u32
    }
}

/// Round half away from zero to `places` decimals. NaN and infinities pass through.
pub fn round_to(value: f64, places: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}
