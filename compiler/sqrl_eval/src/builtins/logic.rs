//! Boolean and comparison operators.
//!
//! Comparisons chain: `< 1 2 3` holds when every adjacent pair does.

use sqrl_value::{EvalResult, Executor, FrameId, List, Value};

use super::arg;

pub(super) fn and(_exec: &mut dyn Executor, args: &List, _caller: FrameId) -> EvalResult {
    Ok(Value::bool(args.values().iter().all(Value::to_bool)))
}

pub(super) fn or(_exec: &mut dyn Executor, args: &List, _caller: FrameId) -> EvalResult {
    Ok(Value::bool(args.values().iter().any(Value::to_bool)))
}

/// True when an odd number of arguments are true.
pub(super) fn xor(_exec: &mut dyn Executor, args: &List, _caller: FrameId) -> EvalResult {
    let count = args.values().iter().filter(|v| v.to_bool()).count();
    Ok(Value::bool(count % 2 == 1))
}

pub(super) fn not(_exec: &mut dyn Executor, args: &List, _caller: FrameId) -> EvalResult {
    Ok(Value::bool(!arg(args, 0).to_bool()))
}

pub(super) fn truthy(_exec: &mut dyn Executor, args: &List, _caller: FrameId) -> EvalResult {
    Ok(Value::bool(arg(args, 0).to_bool()))
}

fn chain(args: &List, holds: fn(&Value, &Value) -> bool) -> Value {
    let values = args.values();
    Value::bool(values.windows(2).all(|pair| holds(&pair[0], &pair[1])))
}

pub(super) fn eq(_exec: &mut dyn Executor, args: &List, _caller: FrameId) -> EvalResult {
    Ok(chain(args, Value::structural_eq))
}

pub(super) fn ne(_exec: &mut dyn Executor, args: &List, _caller: FrameId) -> EvalResult {
    Ok(chain(args, |a, b| !a.structural_eq(b)))
}

pub(super) fn lt(_exec: &mut dyn Executor, args: &List, _caller: FrameId) -> EvalResult {
    Ok(chain(args, Value::less_than))
}

pub(super) fn gt(_exec: &mut dyn Executor, args: &List, _caller: FrameId) -> EvalResult {
    Ok(chain(args, |a, b| b.less_than(a)))
}

pub(super) fn le(_exec: &mut dyn Executor, args: &List, _caller: FrameId) -> EvalResult {
    Ok(chain(args, |a, b| a.less_than(b) || a.structural_eq(b)))
}

pub(super) fn ge(_exec: &mut dyn Executor, args: &List, _caller: FrameId) -> EvalResult {
    Ok(chain(args, |a, b| b.less_than(a) || a.structural_eq(b)))
}
