//! Built-in operator library.
//!
//! Everything a script can name before it binds anything itself lives here
//! and is installed into the global frame by [`register_builtins`]. The
//! scope engine and evaluator know none of these names; an interpreter built
//! without them starts with an empty global frame.
//!
//! Operators marked no-eval are special forms: they receive their arguments
//! as parsed and decide what to evaluate.

mod arith;
mod data;
mod forms;
mod logic;

use sqrl_value::{
    Assoc, ErrorKind, EvalResult, Executor, FrameId, Identifier, List, OperatorFn, Value,
};

use crate::Interpreter;

struct Builtin {
    name: &'static str,
    func: OperatorFn,
    precedence: u8,
    assoc: Assoc,
    no_eval: bool,
}

const fn op(name: &'static str, func: OperatorFn, precedence: u8, assoc: Assoc) -> Builtin {
    Builtin {
        name,
        func,
        precedence,
        assoc,
        no_eval: false,
    }
}

const fn form(name: &'static str, func: OperatorFn) -> Builtin {
    Builtin {
        name,
        func,
        precedence: 0,
        assoc: Assoc::Left,
        no_eval: true,
    }
}

const BUILTINS: &[Builtin] = &[
    // Special forms
    form("set", forms::set),
    form("func", forms::func),
    form("class", forms::class),
    form("do", forms::block),
    form("if", forms::branch),
    form("quote", forms::quote),
    // Arithmetic
    op("+", arith::add, 4, Assoc::Left),
    op("-", arith::sub, 4, Assoc::Left),
    op("*", arith::mul, 3, Assoc::Left),
    op("/", arith::div, 3, Assoc::Left),
    op("%", arith::rem, 3, Assoc::Left),
    op("**", arith::pow, 1, Assoc::Right),
    op("neg", arith::neg, 2, Assoc::Unary),
    // Bitwise
    op("&", arith::bit_and, 8, Assoc::Left),
    op("^", arith::bit_xor, 9, Assoc::Left),
    op("|", arith::bit_or, 10, Assoc::Left),
    op("~", arith::bit_not, 2, Assoc::Unary),
    // Boolean
    op("&&", logic::and, 11, Assoc::Left),
    op("and", logic::and, 11, Assoc::Left),
    op("||", logic::or, 12, Assoc::Left),
    op("or", logic::or, 12, Assoc::Left),
    op("xor", logic::xor, 13, Assoc::Left),
    op("!", logic::not, 2, Assoc::Unary),
    op("not", logic::not, 2, Assoc::Unary),
    op("!!", logic::truthy, 2, Assoc::Unary),
    // Comparison
    op("=", logic::eq, 7, Assoc::Left),
    op("==", logic::eq, 7, Assoc::Left),
    op("eq", logic::eq, 7, Assoc::Left),
    op("<>", logic::ne, 7, Assoc::Left),
    op("!=", logic::ne, 7, Assoc::Left),
    op("ne", logic::ne, 7, Assoc::Left),
    op("<", logic::lt, 6, Assoc::Left),
    op(">", logic::gt, 6, Assoc::Left),
    op("<=", logic::le, 6, Assoc::Left),
    op(">=", logic::ge, 6, Assoc::Left),
    // Conversion
    op("identity", data::identity, 0, Assoc::Left),
    op("int", data::to_int, 0, Assoc::Left),
    op("float", data::to_float, 0, Assoc::Left),
    op("str", data::to_str, 0, Assoc::Left),
    op("bool", data::to_bool, 0, Assoc::Left),
    op("floor", data::floor, 0, Assoc::Left),
    op("ceil", data::ceil, 0, Assoc::Left),
    op("round", data::round, 0, Assoc::Left),
    // Strings and lists
    op("cat", data::cat, 0, Assoc::Left),
    op("print", data::print, 0, Assoc::Left),
    op("list", data::list, 0, Assoc::Left),
    op("len", data::len, 0, Assoc::Left),
    op("get", data::get, 0, Assoc::Left),
    op("put", data::put, 0, Assoc::Left),
    op("sub", data::sub, 0, Assoc::Left),
    op("copy", data::copy, 0, Assoc::Left),
    // Exceptions
    op("raise", data::raise, 0, Assoc::Left),
];

/// Install the constants and every built-in operator in the global frame.
pub fn register_builtins(interp: &mut Interpreter) {
    interp.define_global("true", Value::bool(true));
    interp.define_global("false", Value::bool(false));
    interp.define_global("none", Value::none());
    for builtin in BUILTINS {
        interp.register(
            builtin.name,
            builtin.func,
            builtin.precedence,
            builtin.assoc,
            builtin.no_eval,
        );
    }
    tracing::debug!(count = BUILTINS.len(), "builtins registered");
}

// Argument helpers shared by the submodules

#[inline]
fn arg(args: &List, index: usize) -> Value {
    args.at(index).unwrap_or_default()
}

/// The path argument of a special form.
fn path_arg(
    exec: &dyn Executor,
    args: &List,
    index: usize,
    caller: FrameId,
) -> EvalResult<Identifier> {
    match args.at(index) {
        Some(value) => match value.as_path() {
            Some(path) => Ok(path.clone()),
            None => Err(exec.raise(ErrorKind::InvalidIdentifier(value.to_print_string()), caller)),
        },
        None => Err(exec.raise(ErrorKind::NullReference, caller)),
    }
}

/// The list argument of an operator.
fn list_arg(exec: &dyn Executor, args: &List, index: usize, caller: FrameId) -> EvalResult<List> {
    match args.at(index) {
        Some(value) => match value.as_list() {
            Some(list) => Ok(list.clone()),
            None => Err(exec.raise(ErrorKind::ExpectedList(value.to_print_string()), caller)),
        },
        None => Err(exec.raise(ErrorKind::NullReference, caller)),
    }
}
