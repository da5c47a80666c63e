//! Special forms. Arguments arrive unevaluated.

use sqrl_value::{EvalResult, Executor, FrameId, FrameKind, List, Value};

use super::{arg, list_arg, path_arg};

/// `set path value`: bind the evaluated value, returning it.
pub(super) fn set(exec: &mut dyn Executor, args: &List, caller: FrameId) -> EvalResult {
    let path = path_arg(exec, args, 0, caller)?;
    let value = exec.evaluate(&arg(args, 1), caller)?;
    exec.set(&path, value.clone(), caller)?;
    Ok(value)
}

/// `func name {params} body...`
///
/// A quoted name makes a quoted function, whose arguments are passed
/// unevaluated.
pub(super) fn func(exec: &mut dyn Executor, args: &List, caller: FrameId) -> EvalResult {
    let path = path_arg(exec, args, 0, caller)?;
    let params = list_arg(exec, args, 1, caller)?;
    let quoted = arg(args, 0).is_quoted();
    let Some(name) = path.last().map(|segment| segment.sym.clone()) else {
        return Ok(Value::none());
    };
    let function = Value::function(name, params, args.sub(2, None)).quoted(quoted);
    exec.set(&path, function.clone(), caller)?;
    Ok(function)
}

/// `class name body...`: a class frame under the caller, populated by
/// running the body in it.
pub(super) fn class(exec: &mut dyn Executor, args: &List, caller: FrameId) -> EvalResult {
    let path = path_arg(exec, args, 0, caller)?;
    let quoted = arg(args, 0).is_quoted();
    let Some(name) = path.last().map(|segment| segment.sym.clone()) else {
        return Ok(Value::none());
    };
    let frame = exec.new_frame(caller, FrameKind::Class, Some(name.clone()));
    let class = Value::class(name, frame).quoted(quoted);
    exec.set(&path, class.clone(), caller)?;
    exec.evaluate_body(&args.sub(1, None), frame)?;
    Ok(class)
}

/// `do body...` in a fresh local frame.
pub(super) fn block(exec: &mut dyn Executor, args: &List, caller: FrameId) -> EvalResult {
    let frame = exec.new_frame(caller, FrameKind::Local, None);
    exec.evaluate_body(args, frame)
}

/// `if cond then [else]`
pub(super) fn branch(exec: &mut dyn Executor, args: &List, caller: FrameId) -> EvalResult {
    let cond = exec.evaluate(&arg(args, 0), caller)?;
    let taken = if cond.to_bool() { 1 } else { 2 };
    match args.at(taken) {
        Some(value) => exec.evaluate(&value, caller),
        None => Ok(Value::none()),
    }
}

/// `quote x`: `x` as written, unevaluated.
pub(super) fn quote(_exec: &mut dyn Executor, args: &List, _caller: FrameId) -> EvalResult {
    Ok(arg(args, 0))
}
