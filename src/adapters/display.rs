//! Fixed-locale number formatting for calculator output.
//!
//! Thousands are grouped with `.` and decimals separated by `,`. Non-finite
//! values render as a dash placeholder.

pub const PLACEHOLDER: &str = "–";

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

fn format_unsigned(value: f64, places: usize) -> String {
    let fixed = format!("{:.*}", places, value);
    match fixed.split_once('.') {
        Some((int, frac)) => format!("{},{}", group_thousands(int), frac),
        None => group_thousands(&fixed),
    }
}

/// Format a number with `places` decimals.
pub fn format_number(value: f64, places: usize) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    let body = format_unsigned(value.abs(), places);
    if value < 0.0 && body.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("-{body}")
    } else {
        body
    }
}

/// Format a currency amount, e.g. `R$ 1.234,56`.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    let body = format_number(value.abs(), 2);
    if value < 0.0 && body != "0,00" {
        format!("-R$ {body}")
    } else {
        format!("R$ {body}")
    }
}

/// Format a fraction as a percentage, e.g. `0.6` as `60,00%`.
pub fn format_percent(fraction: f64) -> String {
    if !fraction.is_finite() {
        return PLACEHOLDER.to_string();
    }
    format!("{}%", format_number(fraction * 100.0, 2))
}
