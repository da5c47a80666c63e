//! Conversions, string and list operators, `print` and `raise`.

use sqrl_value::{ErrorKind, EvalResult, Executor, FrameId, List, Value, ValueKind};

use super::{arg, list_arg};

pub(super) fn identity(_exec: &mut dyn Executor, args: &List, _caller: FrameId) -> EvalResult {
    Ok(arg(args, 0))
}

pub(super) fn to_int(_exec: &mut dyn Executor, args: &List, _caller: FrameId) -> EvalResult {
    Ok(Value::int(arg(args, 0).to_int()))
}

pub(super) fn to_float(_exec: &mut dyn Executor, args: &List, _caller: FrameId) -> EvalResult {
    Ok(Value::float(arg(args, 0).to_float()))
}

pub(super) fn to_str(_exec: &mut dyn Executor, args: &List, _caller: FrameId) -> EvalResult {
    Ok(Value::string(arg(args, 0).as_string()))
}

pub(super) fn to_bool(_exec: &mut dyn Executor, args: &List, _caller: FrameId) -> EvalResult {
    Ok(Value::bool(arg(args, 0).to_bool()))
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "rounded floats saturate into the int range"
)]
fn rounded(value: &Value, op: fn(f32) -> f32) -> Value {
    match value.to_number().kind {
        ValueKind::Float(f) => Value::int(op(f) as i32),
        _ => Value::int(value.to_int()),
    }
}

pub(super) fn floor(_exec: &mut dyn Executor, args: &List, _caller: FrameId) -> EvalResult {
    Ok(rounded(&arg(args, 0), f32::floor))
}

pub(super) fn ceil(_exec: &mut dyn Executor, args: &List, _caller: FrameId) -> EvalResult {
    Ok(rounded(&arg(args, 0), f32::ceil))
}

pub(super) fn round(_exec: &mut dyn Executor, args: &List, _caller: FrameId) -> EvalResult {
    Ok(rounded(&arg(args, 0), f32::round))
}

/// Display strings of every argument, joined.
pub(super) fn cat(_exec: &mut dyn Executor, args: &List, _caller: FrameId) -> EvalResult {
    let joined: String = args.values().iter().map(Value::as_string).collect();
    Ok(Value::string(joined))
}

/// One line per argument to the host's print sink.
pub(super) fn print(exec: &mut dyn Executor, args: &List, _caller: FrameId) -> EvalResult {
    for value in args.values() {
        exec.print_line(&value.as_string());
    }
    Ok(Value::none())
}

pub(super) fn list(_exec: &mut dyn Executor, args: &List, _caller: FrameId) -> EvalResult {
    Ok(Value::list(args.copy()))
}

/// Elements of a list, characters of a string, zero for anything else.
pub(super) fn len(_exec: &mut dyn Executor, args: &List, _caller: FrameId) -> EvalResult {
    let value = arg(args, 0);
    let n = match &value.kind {
        ValueKind::List(list) | ValueKind::Infix(list) => list.len(),
        ValueKind::Str(s) => s.chars().count(),
        _ => 0,
    };
    Ok(Value::int(i32::try_from(n).unwrap_or(i32::MAX)))
}

/// `get list i`
pub(super) fn get(exec: &mut dyn Executor, args: &List, caller: FrameId) -> EvalResult {
    let list = list_arg(exec, args, 0, caller)?;
    list.get(arg(args, 1).to_int())
        .map_err(|kind| exec.raise(kind, caller))
}

/// `put list i v`: store and return `v`. Writing past the end pads with
/// `none`.
pub(super) fn put(exec: &mut dyn Executor, args: &List, caller: FrameId) -> EvalResult {
    let list = list_arg(exec, args, 0, caller)?;
    let value = arg(args, 2);
    list.put(arg(args, 1).to_int(), value.clone())
        .map_err(|kind| exec.raise(kind, caller))?;
    Ok(value)
}

/// `sub list start [len]`: a window sharing storage with `list`.
pub(super) fn sub(exec: &mut dyn Executor, args: &List, caller: FrameId) -> EvalResult {
    let list = list_arg(exec, args, 0, caller)?;
    let start = arg(args, 1).to_int();
    let Ok(start) = usize::try_from(start) else {
        return Err(exec.raise(ErrorKind::NegativeIndex(start), caller));
    };
    let len = match args.at(2) {
        Some(len) => {
            let n = len.to_int();
            Some(usize::try_from(n).map_err(|_| exec.raise(ErrorKind::NegativeIndex(n), caller))?)
        }
        None => None,
    };
    Ok(Value::list(list.sub(start, len)))
}

/// Shallow copy; a window becomes a list of its own.
pub(super) fn copy(_exec: &mut dyn Executor, args: &List, _caller: FrameId) -> EvalResult {
    let value = arg(args, 0);
    Ok(match value.as_list() {
        Some(list) => Value::list(list.copy()),
        None => value,
    })
}

pub(super) fn raise(exec: &mut dyn Executor, args: &List, caller: FrameId) -> EvalResult {
    let message = arg(args, 0).as_string();
    Err(exec.raise(ErrorKind::Operator(message), caller))
}
