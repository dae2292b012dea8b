//! Lenient numeric parsing for values the combo service sends as strings.
//!
//! Both helpers read the longest numeric prefix of their input, so
//! `"235.50 USD"` reads as `235.5` and `"94%"` reads as `94`. Neither helper
//! fails: [`parse_decimal`] yields `NaN` and [`parse_int_prefix`] yields
//! `None` when the input does not start with a number. Callers decide whether
//! that is fatal.

/// Parses the leading decimal number of `raw`.
///
/// Leading whitespace is skipped, an optional sign is honoured, and an
/// exponent is accepted only when it carries digits. `"Infinity"` (with an
/// optional sign) maps to the matching infinity. Returns `NaN` when no digit
/// leads the input.
#[must_use]
pub fn parse_decimal(raw: &str) -> f64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();

    let negative = bytes.first() == Some(&b'-');
    let mut idx = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    if s[idx..].starts_with("Infinity") {
        return if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = idx;
    while idx < bytes.len() && bytes[idx].is_ascii_digit() {
        idx += 1;
    }
    let int_digits = &s[int_start..idx];

    let mut frac_digits = "";
    if idx < bytes.len() && bytes[idx] == b'.' {
        let frac_start = idx + 1;
        let mut end = frac_start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        frac_digits = &s[frac_start..end];
        idx = end;
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return f64::NAN;
    }

    let mut exponent = "";
    if idx < bytes.len() && matches!(bytes[idx], b'e' | b'E') {
        let mut end = idx + 1;
        if end < bytes.len() && matches!(bytes[end], b'+' | b'-') {
            end += 1;
        }
        let digits_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end > digits_start {
            exponent = &s[idx..end];
        }
    }

    // Rebuild a literal that `f64::from_str` always accepts ("5." and ".5"
    // become "5.0" and "0.5").
    let literal = format!(
        "{sign}{int}.{frac}{exponent}",
        sign = if negative { "-" } else { "" },
        int = if int_digits.is_empty() { "0" } else { int_digits },
        frac = if frac_digits.is_empty() { "0" } else { frac_digits },
    );
    literal.parse().unwrap_or(f64::NAN)
}

/// Parses the leading base-10 integer of `raw`, ignoring anything after it.
///
/// `"94.7%"` yields `Some(94)`. Returns `None` when no digit follows the
/// optional sign or when the digits overflow `i64`.
#[must_use]
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let value: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Returns `true` when `value` is usable as a price: neither `NaN` nor infinite.
#[must_use]
pub fn is_usable_number(value: f64) -> bool {
    value.is_finite()
}
