//! Squirrel Parser - source text to a tree of values.
//!
//! There is no separate token stream: the parser reads the text once and
//! builds `Value`s directly.
//!
//! | source                | value                                    |
//! |-----------------------|------------------------------------------|
//! | `{a b}`               | `List`                                   |
//! | `(a b)`               | `Infix`                                  |
//! | `"text"`              | `Str`, with escapes cooked               |
//! | `12`, `0x1f`, `1.5e3` | `Int` / `Float`                          |
//! | `a.b[i].c`            | `Path` with a subscripted middle segment |
//! | `'x`                  | any of the above with the quote flag set |
//!
//! Unbalanced closers end the current list instead of failing, so every
//! input parses to something.

mod cursor;
mod escape;

use sqrl_ir::{scan_number, Number, SymbolTable};
use sqrl_value::{Identifier, Index, List, Value};

use crate::cursor::Cursor;

/// Parse `text` into a top-level list of statements.
#[tracing::instrument(level = "trace", skip_all, fields(len = text.len()))]
pub fn parse(text: &str, symbols: &mut SymbolTable) -> List {
    let mut parser = Parser {
        cursor: Cursor::new(text),
        symbols,
    };
    let items = parser.parse_items();
    tracing::trace!(items = items.len(), "parsed");
    List::from_vec(items)
}

struct Parser<'a, 's> {
    cursor: Cursor<'a>,
    symbols: &'s mut SymbolTable,
}

#[inline]
fn is_closer(b: u8) -> bool {
    matches!(b, b')' | b'}')
}

/// Bytes that end a token outside of brackets.
#[inline]
fn is_delimiter(b: u8) -> bool {
    b.is_ascii_whitespace() || matches!(b, b'{' | b'}' | b'(' | b')' | b'"')
}

#[inline]
fn starts_number(b: u8) -> bool {
    b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+')
}

impl<'a> Parser<'a, '_> {
    /// Values up to EOF or the first closer, which is consumed.
    fn parse_items(&mut self) -> Vec<Value> {
        let mut items = Vec::new();
        loop {
            self.cursor.eat_whitespace();
            if self.cursor.is_eof() {
                break;
            }
            if is_closer(self.cursor.current()) {
                self.cursor.advance();
                break;
            }
            items.push(self.parse_value());
        }
        items
    }

    fn parse_value(&mut self) -> Value {
        let mut quoted = false;
        while self.cursor.current() == b'\'' {
            quoted = true;
            self.cursor.advance();
        }

        let c = self.cursor.current();
        let value = if self.cursor.is_eof() || c.is_ascii_whitespace() || is_closer(c) {
            // Nothing follows the quote.
            Value::path(Identifier::new(Vec::new()))
        } else {
            match c {
                b'"' => {
                    self.cursor.advance();
                    Value::string(escape::cook_string(&mut self.cursor))
                }
                b'{' => {
                    self.cursor.advance();
                    Value::list(self.parse_items())
                }
                b'(' => {
                    self.cursor.advance();
                    Value::infix(self.parse_items())
                }
                _ => self.parse_token(),
            }
        };
        value.quoted(quoted)
    }

    /// A number or a symbol path.
    fn parse_token(&mut self) -> Value {
        let start = self.cursor.pos();
        let token = self.scan_token();

        if token.bytes().next().is_some_and(starts_number) {
            if let Some((number, len)) = scan_number(token.as_bytes()) {
                // Only the numeric prefix is consumed.
                self.cursor.reset(start + len);
                return match number {
                    Number::Int(n) => Value::int(n),
                    Number::Float(f) => Value::float(f),
                };
            }
        }

        Value::path(self.parse_path(token))
    }

    /// Consume a raw token. Brackets nest, and inside them neither
    /// whitespace nor delimiters end the token.
    fn scan_token(&mut self) -> &'a str {
        let start = self.cursor.pos();
        let mut depth = 0usize;
        while !self.cursor.is_eof() {
            match self.cursor.current() {
                b'[' => depth += 1,
                b']' => depth = depth.saturating_sub(1),
                b if depth == 0 && is_delimiter(b) => break,
                _ => {}
            }
            self.cursor.advance_char();
        }
        self.cursor.slice_from(start)
    }

    fn parse_path(&mut self, token: &'a str) -> Identifier {
        let segments = split_segments(token)
            .into_iter()
            .map(|segment| self.parse_segment(segment))
            .collect();
        Identifier::new(segments)
    }

    /// `name` or `name[expr]`.
    fn parse_segment(&mut self, segment: &str) -> Index {
        let Some(open) = segment.find('[') else {
            return Index::new(self.symbols.intern(segment));
        };
        let sym = self.symbols.intern(&segment[..open]);
        let inner = matching_bracket(&segment[open..])
            .map_or(&segment[open + 1..], |close| &segment[open + 1..open + close]);

        let mut sub = Parser {
            cursor: Cursor::new(inner),
            symbols: &mut *self.symbols,
        };
        let mut items = sub.parse_items();
        match items.len() {
            0 => Index::new(sym),
            1 => Index::subscripted(sym, items.remove(0)),
            _ => Index::subscripted(sym, Value::list(items)),
        }
    }
}

/// Split on `.` outside of brackets.
fn split_segments(token: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, b) in token.bytes().enumerate() {
        match b {
            b'[' => depth += 1,
            b']' => depth = depth.saturating_sub(1),
            b'.' if depth == 0 => {
                segments.push(&token[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    segments.push(&token[start..]);
    segments
}

/// Offset of the `]` matching the `[` that starts `text`.
fn matching_bracket(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, b) in text.bytes().enumerate() {
        match b {
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}
