//! Numeric literal grammar.
//!
//! Shared by the parser (source tokens) and by string-to-number conversion,
//! so `"0x1F"` as text converts exactly like `0x1F` in source.
//!
//! | form                       | result            |
//! |----------------------------|-------------------|
//! | `0x` + hex digits          | `Int`, base 16    |
//! | `0` + octal digits         | `Int`, base 8     |
//! | `[+-]` digits              | `Int`, base 10    |
//! | `[+-]` digits with `.`/`e` | `Float`           |
//!
//! Integers are 32-bit and wrap on overflow. Floats are accumulated by hand
//! (no locale) and rounded once to single precision.

/// A scanned numeric literal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Int(i32),
    Float(f32),
}

/// Scan a numeric literal at the start of `src`.
///
/// Returns the value and the number of bytes consumed, or `None` when no
/// digits were found (the caller then treats the token as a symbol path).
pub fn scan_number(src: &[u8]) -> Option<(Number, usize)> {
    let at = |i: usize| src.get(i).copied().unwrap_or(0);

    if at(0) == b'0' {
        let next = at(1);
        if next == b'x' {
            let digits = src[2..].iter().take_while(|b| b.is_ascii_hexdigit()).count();
            if digits == 0 {
                return None;
            }
            let value = src[2..2 + digits]
                .iter()
                .fold(0i32, |acc, &b| acc.wrapping_mul(16).wrapping_add(hex_value(b)));
            return Some((Number::Int(value), 2 + digits));
        }
        if is_octal(next) {
            let digits = src.iter().take_while(|&&b| is_octal(b)).count();
            let value = src[..digits]
                .iter()
                .fold(0i32, |acc, &b| acc.wrapping_mul(8).wrapping_add(i32::from(b - b'0')));
            return Some((Number::Int(value), digits));
        }
    }

    scan_decimal(src)
}

fn scan_decimal(src: &[u8]) -> Option<(Number, usize)> {
    let at = |i: usize| src.get(i).copied().unwrap_or(0);

    let mut pos = 0;
    let negative = at(0) == b'-';
    if matches!(at(0), b'-' | b'+') {
        pos += 1;
    }

    let mut mantissa_digits = 0usize;
    let mut seen_point = false;
    let mut seen_exp = false;
    loop {
        let c = at(pos);
        if c.is_ascii_digit() {
            mantissa_digits += 1;
            pos += 1;
        } else if c == b'.' && !seen_point && !seen_exp {
            seen_point = true;
            pos += 1;
        } else if (c == b'e' || c == b'E') && !seen_exp && mantissa_digits > 0 {
            // Only an exponent if digits follow, optionally signed.
            let sign = usize::from(matches!(at(pos + 1), b'-' | b'+'));
            if !at(pos + 1 + sign).is_ascii_digit() {
                break;
            }
            seen_exp = true;
            pos += 1 + sign;
            break;
        } else {
            break;
        }
    }

    if mantissa_digits == 0 {
        return None;
    }

    let mut exponent: i32 = 0;
    if seen_exp {
        let exp_negative = at(pos - 1) == b'-';
        while at(pos).is_ascii_digit() {
            exponent = exponent
                .saturating_mul(10)
                .saturating_add(i32::from(at(pos) - b'0'));
            pos += 1;
        }
        if exp_negative {
            exponent = -exponent;
        }
    }

    let text = &src[..pos];
    if seen_point || seen_exp {
        Some((Number::Float(parse_float(text, exponent, negative)), pos))
    } else {
        Some((Number::Int(parse_int(text, negative)), pos))
    }
}

fn parse_int(text: &[u8], negative: bool) -> i32 {
    let magnitude = text
        .iter()
        .filter(|b| b.is_ascii_digit())
        .fold(0i32, |acc, &b| acc.wrapping_mul(10).wrapping_add(i32::from(b - b'0')));
    if negative {
        magnitude.wrapping_neg()
    } else {
        magnitude
    }
}

/// Accumulate mantissa digits, then scale by the decimal exponent.
#[allow(
    clippy::cast_possible_truncation,
    reason = "single-precision result is the literal's defined width"
)]
fn parse_float(text: &[u8], exponent: i32, negative: bool) -> f32 {
    let mut mantissa = 0f64;
    let mut decimals: i32 = 0;
    let mut after_point = false;
    for &b in text {
        match b {
            b'0'..=b'9' => {
                mantissa = mantissa * 10.0 + f64::from(b - b'0');
                if after_point {
                    decimals = decimals.saturating_add(1);
                }
            }
            b'.' => after_point = true,
            b'e' | b'E' => break,
            _ => {}
        }
    }

    let scale = exponent.saturating_sub(decimals);
    let value = if scale < 0 {
        mantissa / 10f64.powi(scale.saturating_neg())
    } else {
        mantissa * 10f64.powi(scale)
    };
    let value = value as f32;
    if negative {
        -value
    } else {
        value
    }
}

#[inline]
fn is_octal(b: u8) -> bool {
    (b'0'..=b'7').contains(&b)
}

#[inline]
fn hex_value(b: u8) -> i32 {
    let digit = match b {
        b'a'..=b'f' => b - b'a' + 10,
        b'A'..=b'F' => b - b'A' + 10,
        _ => b - b'0',
    };
    i32::from(digit)
}

#[cfg(test)]
mod tests;
