//! String literal cooking.
//!
//! Recognized escapes: `\n` `\t` `\r` `\a` `\b` `\e`, `\xHH` (one or two hex
//! digits) and `\NNN` (one to three octal digits). Byte escapes produce the
//! code point of the same value. Any other escaped character stands for
//! itself, which covers `\"` and `\\`. A missing closing quote ends the
//! string at EOF.

use crate::cursor::Cursor;

#[inline]
fn resolve_named_escape(c: u8) -> Option<char> {
    match c {
        b'n' => Some('\n'),
        b't' => Some('\t'),
        b'r' => Some('\r'),
        b'a' => Some('\u{07}'),
        b'b' => Some('\u{08}'),
        b'e' => Some('\u{1b}'),
        _ => None,
    }
}

/// Read a string literal body. The cursor sits just past the opening `"`
/// and is left just past the closing one.
pub(crate) fn cook_string(cursor: &mut Cursor<'_>) -> String {
    let mut result = String::new();
    loop {
        result.push_str(cursor.skip_to_string_delim());
        match cursor.current() {
            b'"' => {
                cursor.advance();
                break;
            }
            b'\\' => {
                cursor.advance();
                cook_escape(cursor, &mut result);
            }
            _ => break,
        }
    }
    result
}

fn cook_escape(cursor: &mut Cursor<'_>, out: &mut String) {
    if cursor.is_eof() {
        out.push('\\');
        return;
    }
    let c = cursor.current();
    if let Some(resolved) = resolve_named_escape(c) {
        cursor.advance();
        out.push(resolved);
        return;
    }
    if c == b'x' && cursor.peek().is_ascii_hexdigit() {
        cursor.advance();
        let byte = take_digits(cursor, 2, 16);
        out.push(char::from(byte));
        return;
    }
    if is_octal(c) {
        let byte = take_digits(cursor, 3, 8);
        out.push(char::from(byte));
        return;
    }
    if let Some(ch) = cursor.current_char() {
        out.push(ch);
        cursor.advance_char();
    }
}

/// Consume up to `max` digits in `radix`, keeping the low byte.
fn take_digits(cursor: &mut Cursor<'_>, max: usize, radix: u32) -> u8 {
    let mut value: u32 = 0;
    for _ in 0..max {
        let Some(digit) = char::from(cursor.current()).to_digit(radix) else {
            break;
        };
        value = value * radix + digit;
        cursor.advance();
    }
    value.to_le_bytes()[0]
}

#[inline]
fn is_octal(b: u8) -> bool {
    (b'0'..=b'7').contains(&b)
}
