//! Runtime values.
//!
//! A [`Value`] is a [`ValueKind`] plus the quote flag. Quoting is orthogonal
//! to the variant: a quoted path evaluates to itself, a quoted function or
//! operator receives its arguments unevaluated, a quoted parameter collects
//! the remaining arguments.
//!
//! Construct values through the factory methods (`Value::int`,
//! `Value::list`, ...) rather than assembling `ValueKind` by hand.

use std::fmt;
use std::fmt::Write as _;
use std::rc::Rc;

use sqrl_ir::{scan_number, Number, Symbol};

use crate::list::{ViewKey, Visiting};
use crate::{Exception, FrameId, Identifier, List, OperatorFn};

/// Associativity metadata carried by operators for infix rewriting.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Assoc {
    Left,
    Right,
    Unary,
}

/// User-defined function.
pub struct FunctionValue {
    pub name: Symbol,
    /// Parameter paths; a quoted final parameter is variadic.
    pub params: List,
    pub body: List,
}

/// Native operator.
pub struct OperatorValue {
    pub name: Symbol,
    pub func: OperatorFn,
    pub precedence: u8,
    pub assoc: Assoc,
}

/// A class: its name and the frame holding its body.
pub struct ClassValue {
    pub name: Symbol,
    pub frame: FrameId,
}

/// An instance. Its frame is a child of the class frame.
pub struct ObjectValue {
    pub class: Rc<ClassValue>,
    pub frame: FrameId,
}

#[derive(Clone, Default)]
pub enum ValueKind {
    #[default]
    None,
    Bool(bool),
    Int(i32),
    Float(f32),
    Str(Rc<str>),
    Path(Identifier),
    List(List),
    /// Written with `(...)`. Evaluates like a `List`.
    Infix(List),
    Function(Rc<FunctionValue>),
    Operator(Rc<OperatorValue>),
    Class(Rc<ClassValue>),
    Object(Rc<ObjectValue>),
    /// Bare handle to a scope frame.
    Context(FrameId),
    Exception(Exception),
}

#[derive(Clone, Default)]
pub struct Value {
    pub kind: ValueKind,
    quoted: bool,
}

// Factory methods

impl Value {
    #[inline]
    pub fn new(kind: ValueKind) -> Self {
        Value {
            kind,
            quoted: false,
        }
    }

    #[inline]
    pub fn none() -> Self {
        Value::new(ValueKind::None)
    }

    #[inline]
    pub fn bool(b: bool) -> Self {
        Value::new(ValueKind::Bool(b))
    }

    #[inline]
    pub fn int(n: i32) -> Self {
        Value::new(ValueKind::Int(n))
    }

    #[inline]
    pub fn float(f: f32) -> Self {
        Value::new(ValueKind::Float(f))
    }

    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Value::new(ValueKind::Str(s.into()))
    }

    pub fn path(path: Identifier) -> Self {
        Value::new(ValueKind::Path(path))
    }

    pub fn list(list: impl Into<List>) -> Self {
        Value::new(ValueKind::List(list.into()))
    }

    pub fn infix(list: impl Into<List>) -> Self {
        Value::new(ValueKind::Infix(list.into()))
    }

    pub fn function(name: Symbol, params: List, body: List) -> Self {
        Value::new(ValueKind::Function(Rc::new(FunctionValue { name, params, body })))
    }

    pub fn operator(name: Symbol, func: OperatorFn, precedence: u8, assoc: Assoc) -> Self {
        Value::new(ValueKind::Operator(Rc::new(OperatorValue {
            name,
            func,
            precedence,
            assoc,
        })))
    }

    pub fn class(name: Symbol, frame: FrameId) -> Self {
        Value::new(ValueKind::Class(Rc::new(ClassValue { name, frame })))
    }

    pub fn object(class: Rc<ClassValue>, frame: FrameId) -> Self {
        Value::new(ValueKind::Object(Rc::new(ObjectValue { class, frame })))
    }

    pub fn context_handle(frame: FrameId) -> Self {
        Value::new(ValueKind::Context(frame))
    }

    pub fn exception(ex: Exception) -> Self {
        Value::new(ValueKind::Exception(ex))
    }

    /// Same value with the quote flag set to `quoted`.
    #[must_use]
    pub fn quoted(mut self, quoted: bool) -> Self {
        self.quoted = quoted;
        self
    }

    #[inline]
    pub fn is_quoted(&self) -> bool {
        self.quoted
    }
}

// Inspection

impl Value {
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self.kind, ValueKind::None)
    }

    /// `List` or `Infix`.
    #[inline]
    pub fn is_list_like(&self) -> bool {
        matches!(self.kind, ValueKind::List(_) | ValueKind::Infix(_))
    }

    pub fn as_list(&self) -> Option<&List> {
        match &self.kind {
            ValueKind::List(list) | ValueKind::Infix(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&Identifier> {
        match &self.kind {
            ValueKind::Path(path) => Some(path),
            _ => None,
        }
    }

    pub fn as_exception(&self) -> Option<&Exception> {
        match &self.kind {
            ValueKind::Exception(ex) => Some(ex),
            _ => None,
        }
    }

    /// Only classes, objects, context handles and exceptions own or
    /// reference a frame.
    pub fn has_context(&self) -> bool {
        self.context().is_some()
    }

    pub fn context(&self) -> Option<FrameId> {
        match &self.kind {
            ValueKind::Class(class) => Some(class.frame),
            ValueKind::Object(object) => Some(object.frame),
            ValueKind::Context(frame) => Some(*frame),
            ValueKind::Exception(ex) => Some(ex.frame()),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match &self.kind {
            ValueKind::None => "none",
            ValueKind::Bool(_) => "bool",
            ValueKind::Int(_) => "int",
            ValueKind::Float(_) => "float",
            ValueKind::Str(_) => "string",
            ValueKind::Path(_) => "symbol",
            ValueKind::List(_) => "list",
            ValueKind::Infix(_) => "infix",
            ValueKind::Function(_) => "function",
            ValueKind::Operator(_) => "operator",
            ValueKind::Class(_) => "class",
            ValueKind::Object(_) => "object",
            ValueKind::Context(_) => "context",
            ValueKind::Exception(_) => "exception",
        }
    }

    /// Name used in diagnostics.
    pub fn name(&self) -> String {
        match &self.kind {
            ValueKind::Path(path) => path.original().to_string(),
            ValueKind::Function(func) => func.name.to_string(),
            ValueKind::Operator(op) => op.name.to_string(),
            ValueKind::Class(class) => class.name.to_string(),
            ValueKind::Object(object) => object.class.name.to_string(),
            _ => self.to_print_string(),
        }
    }
}

// Conversions

impl Value {
    /// Integer view. Floats truncate toward zero, saturating at the `i32`
    /// range; strings go through the number-literal grammar.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "float-to-int conversion is defined as saturating truncation"
    )]
    pub fn to_int(&self) -> i32 {
        match &self.kind {
            ValueKind::Int(n) => *n,
            ValueKind::Float(f) => *f as i32,
            ValueKind::Bool(b) => i32::from(*b),
            ValueKind::Str(_) => self.to_number().to_int(),
            _ => 0,
        }
    }

    #[allow(
        clippy::cast_precision_loss,
        reason = "ints promote to single-precision floats"
    )]
    pub fn to_float(&self) -> f32 {
        match &self.kind {
            ValueKind::Int(n) => *n as f32,
            ValueKind::Float(f) => *f,
            ValueKind::Bool(b) => f32::from(u8::from(*b)),
            ValueKind::Str(_) => self.to_number().to_float(),
            _ => 0.0,
        }
    }

    #[allow(clippy::float_cmp, reason = "only exact zero is false")]
    pub fn to_bool(&self) -> bool {
        match &self.kind {
            ValueKind::None | ValueKind::Exception(_) => false,
            ValueKind::Bool(b) => *b,
            ValueKind::Int(n) => *n != 0,
            ValueKind::Float(f) => *f != 0.0,
            ValueKind::Str(s) => !s.is_empty(),
            ValueKind::List(list) | ValueKind::Infix(list) => !list.is_empty(),
            ValueKind::Path(_)
            | ValueKind::Function(_)
            | ValueKind::Operator(_)
            | ValueKind::Class(_)
            | ValueKind::Object(_)
            | ValueKind::Context(_) => true,
        }
    }

    /// `Int` or `Float`. Strings parse with the source literal grammar and
    /// default to `0`.
    pub fn to_number(&self) -> Value {
        match &self.kind {
            ValueKind::Int(_) | ValueKind::Float(_) => self.clone().quoted(false),
            ValueKind::Bool(b) => Value::int(i32::from(*b)),
            ValueKind::Str(s) => match scan_number(s.trim_start().as_bytes()) {
                Some((Number::Int(n), _)) => Value::int(n),
                Some((Number::Float(f), _)) => Value::float(f),
                None => Value::int(0),
            },
            _ => Value::int(0),
        }
    }
}

// Comparison

impl Value {
    /// Structural equality.
    ///
    /// `none` equals `none` and the empty list. Numbers compare after
    /// promotion. Functions, operators, classes and objects compare by
    /// identity. Incomparable pairs are unequal.
    pub fn structural_eq(&self, other: &Value) -> bool {
        self.eq_visiting(other, &mut Vec::new())
    }

    #[allow(clippy::float_cmp, reason = "script equality is exact")]
    pub(crate) fn eq_visiting(&self, other: &Value, visiting: &mut Visiting) -> bool {
        use ValueKind as K;
        match (&self.kind, &other.kind) {
            (K::None, K::None) => true,
            (K::None, K::List(l) | K::Infix(l)) | (K::List(l) | K::Infix(l), K::None) => {
                l.is_empty()
            }
            (K::List(a) | K::Infix(a), K::List(b) | K::Infix(b)) => a.eq_visiting(b, visiting),
            (K::Str(a), K::Str(b)) => a == b,
            (K::Int(a), K::Int(b)) => a == b,
            (K::Int(_) | K::Float(_), K::Int(_) | K::Float(_)) => {
                self.to_float() == other.to_float()
            }
            (K::Bool(a), K::Bool(b)) => a == b,
            (K::Path(a), K::Path(b)) => a.to_string() == b.to_string(),
            (K::Function(a), K::Function(b)) => Rc::ptr_eq(a, b),
            (K::Operator(a), K::Operator(b)) => Rc::ptr_eq(a, b),
            (K::Class(a), K::Class(b)) => Rc::ptr_eq(a, b),
            (K::Object(a), K::Object(b)) => Rc::ptr_eq(a, b),
            (K::Context(a), K::Context(b)) => a == b,
            _ => false,
        }
    }

    /// Ordering: numbers after promotion, strings and lists
    /// lexicographically. Anything else is never less.
    pub fn less_than(&self, other: &Value) -> bool {
        self.lt_visiting(other, &mut Vec::new())
    }

    pub(crate) fn lt_visiting(&self, other: &Value, visiting: &mut Visiting) -> bool {
        use ValueKind as K;
        match (&self.kind, &other.kind) {
            (K::Int(a), K::Int(b)) => a < b,
            (K::Int(_) | K::Float(_), K::Int(_) | K::Float(_)) => {
                self.to_float() < other.to_float()
            }
            (K::Str(a), K::Str(b)) => a < b,
            (K::List(a) | K::Infix(a), K::List(b) | K::Infix(b)) => a.lt_visiting(b, visiting),
            _ => false,
        }
    }
}

// Formatting

impl Value {
    /// Display text: strings unquoted, everything else as printed.
    pub fn as_string(&self) -> String {
        match &self.kind {
            ValueKind::Str(s) => s.to_string(),
            _ => self.to_print_string(),
        }
    }

    /// Re-parseable text.
    pub fn to_print_string(&self) -> String {
        let mut out = String::new();
        self.write_print(&mut out, &mut Vec::new());
        out
    }

    fn write_print(&self, out: &mut String, printing: &mut Vec<ViewKey>) {
        if self.quoted {
            out.push('\'');
        }
        match &self.kind {
            ValueKind::None => out.push_str("none"),
            ValueKind::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            ValueKind::Int(n) => {
                let _ = write!(out, "{n}");
            }
            ValueKind::Float(f) => {
                let _ = write!(out, "{f:?}");
            }
            ValueKind::Str(s) => write_escaped(out, s),
            ValueKind::Path(path) => {
                let _ = write!(out, "{path}");
            }
            ValueKind::List(list) => write_items(out, list, ('{', '}'), printing),
            ValueKind::Infix(list) => write_items(out, list, ('(', ')'), printing),
            ValueKind::Function(func) => {
                let _ = write!(out, "FUNC:{}", func.name);
            }
            ValueKind::Operator(op) => {
                let _ = write!(out, "OPER:{}", op.name);
            }
            ValueKind::Class(class) => {
                let _ = write!(out, "CLASS:{}", class.name);
            }
            ValueKind::Object(object) => {
                let _ = write!(out, "OBJECT:{}", object.class.name);
            }
            ValueKind::Context(_) => out.push_str("CONTEXT"),
            ValueKind::Exception(ex) => {
                let _ = write!(out, "{ex}");
            }
        }
    }
}

/// A list already being printed further out renders as `{...}`.
fn write_items(
    out: &mut String,
    list: &List,
    brackets: (char, char),
    printing: &mut Vec<ViewKey>,
) {
    let (open, close) = brackets;
    out.push(open);
    let key = list.view_key();
    if printing.contains(&key) {
        out.push_str("...");
    } else {
        printing.push(key);
        for (i, item) in list.values().iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            item.write_print(out, printing);
        }
        printing.pop();
    }
    out.push(close);
}

/// Quote `s`; control characters become three-digit octal escapes.
fn write_escaped(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_ascii_control() => {
                let _ = write!(out, "\\{:03o}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.structural_eq(other)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.quoted {
            f.write_str("'")?;
        }
        match &self.kind {
            ValueKind::None => f.write_str("None"),
            ValueKind::Bool(b) => write!(f, "Bool({b})"),
            ValueKind::Int(n) => write!(f, "Int({n})"),
            ValueKind::Float(x) => write!(f, "Float({x:?})"),
            ValueKind::Str(s) => write!(f, "Str({s:?})"),
            ValueKind::Path(path) => write!(f, "Path({path})"),
            ValueKind::List(list) => write!(f, "List({list:?})"),
            ValueKind::Infix(list) => write!(f, "Infix({list:?})"),
            ValueKind::Function(func) => write!(f, "Function({})", func.name),
            ValueKind::Operator(op) => write!(f, "Operator({})", op.name),
            ValueKind::Class(class) => write!(f, "Class({}, {})", class.name, class.frame),
            ValueKind::Object(object) => {
                write!(f, "Object({}, {})", object.class.name, object.frame)
            }
            ValueKind::Context(frame) => write!(f, "Context({frame})"),
            ValueKind::Exception(ex) => write!(f, "Exception({:?})", ex.kind()),
        }
    }
}

impl From<Exception> for Value {
    fn from(ex: Exception) -> Self {
        Value::exception(ex)
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
