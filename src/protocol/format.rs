//! Fixed-width numeric text fields for the terminal and the 16×2 LCD.
//!
//! Both outputs have tight, fixed column budgets, so numbers never grow
//! past their field.  Overflow saturates to a visible marker instead:
//! `9…9` for decimals, `XXX` for unsigned counters.  The decimal
//! separator is a comma, both when rendering and when parsing.

use core::fmt::Write;

/// Widest field any caller renders (one LCD line).
pub const FIELD_CAPACITY: usize = 16;

/// A rendered field.
pub type Field = heapless::String<FIELD_CAPACITY>;

const OVERFLOW_MARKER: &str = "XXX";

fn saturated(width: usize) -> Field {
    let mut out = Field::new();
    for _ in 0..width {
        let _ = out.push('9');
    }
    out
}

fn digit_count(mut n: u64) -> usize {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

/// Render `value` into exactly `width` characters.
///
/// The integer part is written in full, followed by `,` and as many
/// rounded decimals as still fit.  A comma that would end the field is
/// blanked.  If the integer part does not fit, the field is all `9`s.
///
/// ```
/// use tempctrl::protocol::format::float_to_text;
/// assert_eq!(float_to_text(23.4, 6).as_str(), "23,400");
/// assert_eq!(float_to_text(5.0, 2).as_str(), "5 ");
/// assert_eq!(float_to_text(1234.0, 3).as_str(), "999");
/// ```
pub fn float_to_text(value: f64, width: usize) -> Field {
    let width = width.min(FIELD_CAPACITY);
    if width == 0 {
        return Field::new();
    }
    if !value.is_finite() {
        return saturated(width);
    }

    let mut out = Field::new();
    let mut available = width;
    let mut magnitude = value;
    if value < 0.0 {
        let _ = out.push('-');
        available -= 1;
        magnitude = -value;
    }

    let mut int_digits = digit_count(magnitude.trunc() as u64);
    if available == 0 || int_digits > available || magnitude >= 1e16 {
        return saturated(width);
    }

    // Rounding can carry into a new integer digit (9,96 → 10,0); redo the
    // split with the wider integer part when that happens.
    let (int_part, frac_part, decimals) = loop {
        let decimals = available.saturating_sub(int_digits + 1);
        let scale = 10u64.pow(decimals as u32);
        let scaled = (magnitude * scale as f64).round() as u64;
        let int_part = scaled / scale;
        let carried = digit_count(int_part);
        if carried > available {
            return saturated(width);
        }
        if carried == int_digits {
            break (int_part, scaled % scale, decimals);
        }
        int_digits = carried;
    };

    let _ = write!(out, "{int_part}");
    if int_digits < available {
        if decimals == 0 {
            // Room for the separator only.
            let _ = out.push(' ');
        } else {
            let _ = write!(out, ",{frac_part:0decimals$}");
        }
    }
    out
}

/// Parse a `[0-9,]` value string.
///
/// Digits up to the first comma form the integer part; digits after it
/// the fraction.  Parsing stops at any other byte, including a second
/// comma.  An empty string is `0`.
pub fn text_to_float(text: &str) -> f64 {
    let mut bytes = text.bytes();
    let mut value = 0.0;

    while let Some(b) = bytes.next() {
        match b {
            b'0'..=b'9' => value = value * 10.0 + f64::from(b - b'0'),
            b',' => {
                let mut divisor = 10.0;
                for b in bytes.by_ref() {
                    if !b.is_ascii_digit() {
                        break;
                    }
                    value += f64::from(b - b'0') / divisor;
                    divisor *= 10.0;
                }
                break;
            }
            _ => break,
        }
    }
    value
}

/// Right-aligned, zero-padded `digits`-wide counter.  Values needing more
/// than `digits` digits render as `XXX`.
///
/// ```
/// use tempctrl::protocol::format::uint_to_text;
/// assert_eq!(uint_to_text(42, 6).as_str(), "000042");
/// assert_eq!(uint_to_text(10_000, 4).as_str(), "XXX");
/// ```
pub fn uint_to_text(value: u32, digits: usize) -> Field {
    let digits = digits.min(FIELD_CAPACITY);
    let mut out = Field::new();
    if digits == 0 || digit_count(u64::from(value)) > digits {
        let _ = out.push_str(OVERFLOW_MARKER);
        return out;
    }
    let _ = write!(out, "{value:0digits$}");
    out
}
