//! Number text helpers.
//!
//! Attribute text is converted with the same rules JavaScript applies in
//! `Number(text)` and `BigInt(text)`, so an attribute written by a page behaves
//! the same after it reaches a property.

use alloc::format;
use alloc::string::String;

/// Whitespace stripped by JavaScript string-to-number conversion.
fn is_js_whitespace(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Splits a `0x`/`0o`/`0b` prefix off, returning the radix and the digits.
fn split_radix(text: &str) -> Option<(u32, &str)> {
    let bytes = text.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };
    Some((radix, &text[2..]))
}

/// Parses text with `Number(text)` semantics.
///
/// Surrounding whitespace is ignored, empty text is `0`, anything that is not a
/// numeric literal is `NaN`.
pub fn parse_number(text: &str) -> f64 {
    let trimmed = text.trim_matches(is_js_whitespace);
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    if let Some((radix, digits)) = split_radix(trimmed) {
        if digits.is_empty() {
            return f64::NAN;
        }
        let mut acc = 0.0f64;
        for c in digits.chars() {
            match c.to_digit(radix) {
                Some(d) => acc = acc * radix as f64 + d as f64,
                None => return f64::NAN,
            }
        }
        return acc;
    }

    // Rust accepts "inf" and "nan" spellings that JavaScript rejects
    let is_decimal_literal = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !is_decimal_literal {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Formats a number the way `Number.prototype.toString` does.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".into();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity".into() } else { "-Infinity".into() };
    }
    if n == 0.0 {
        // covers -0
        return "0".into();
    }

    let magnitude = n.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let text = format!("{:e}", n);
        return match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => text,
        };
    }
    format!("{}", n)
}

/// Parses text with `BigInt(text)` semantics.
///
/// Returns `None` where JavaScript would throw a `SyntaxError` (fractions,
/// exponents, stray characters) or where the value does not fit in 128 bits.
pub fn parse_bigint(text: &str) -> Option<i128> {
    let trimmed = text.trim_matches(is_js_whitespace);
    if trimmed.is_empty() {
        return Some(0);
    }

    if let Some((radix, digits)) = split_radix(trimmed) {
        if digits.is_empty() || digits.starts_with(['+', '-']) {
            return None;
        }
        return i128::from_str_radix(digits, radix).ok();
    }

    let digits = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    trimmed.parse::<i128>().ok()
}
