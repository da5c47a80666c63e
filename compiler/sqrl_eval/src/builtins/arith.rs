//! Arithmetic and bitwise operators.
//!
//! Binary operators fold over all their arguments. Two ints stay int
//! (wrapping on overflow); anything involving a float promotes to float.
//! Non-numeric arguments go through `to_number` first.

use sqrl_value::{ErrorKind, EvalResult, Exception, Executor, FrameId, List, Value, ValueKind};

use super::arg;

/// `None` from an int or float op means the divisor was zero.
type IntOp = fn(i32, i32) -> Option<i32>;
type FloatOp = fn(f32, f32) -> Option<f32>;

fn division_by_zero(exec: &dyn Executor, caller: FrameId) -> Exception {
    exec.raise(ErrorKind::Operator("Division by zero".to_string()), caller)
}

fn apply(
    exec: &dyn Executor,
    caller: FrameId,
    lhs: &Value,
    rhs: &Value,
    int_op: IntOp,
    float_op: FloatOp,
) -> EvalResult {
    let result = match (&lhs.kind, &rhs.kind) {
        (ValueKind::Int(a), ValueKind::Int(b)) => int_op(*a, *b).map(Value::int),
        _ => float_op(lhs.to_float(), rhs.to_float()).map(Value::float),
    };
    result.ok_or_else(|| division_by_zero(exec, caller))
}

fn fold(
    exec: &dyn Executor,
    args: &List,
    caller: FrameId,
    int_op: IntOp,
    float_op: FloatOp,
) -> EvalResult {
    let values = args.values();
    let Some((first, rest)) = values.split_first() else {
        return Ok(Value::int(0));
    };
    let mut acc = first.to_number();
    for value in rest {
        acc = apply(exec, caller, &acc, &value.to_number(), int_op, float_op)?;
    }
    Ok(acc)
}

/// `+`: numeric sum, or concatenation when any argument is a string.
pub(super) fn add(exec: &mut dyn Executor, args: &List, caller: FrameId) -> EvalResult {
    let values = args.values();
    if values.iter().any(|v| matches!(v.kind, ValueKind::Str(_))) {
        let joined: String = values.iter().map(Value::as_string).collect();
        return Ok(Value::string(joined));
    }
    fold(
        exec,
        args,
        caller,
        |a, b| Some(a.wrapping_add(b)),
        |a, b| Some(a + b),
    )
}

/// `-`: subtraction, or negation with a single argument.
pub(super) fn sub(exec: &mut dyn Executor, args: &List, caller: FrameId) -> EvalResult {
    if args.len() == 1 {
        return neg(exec, args, caller);
    }
    fold(
        exec,
        args,
        caller,
        |a, b| Some(a.wrapping_sub(b)),
        |a, b| Some(a - b),
    )
}

pub(super) fn mul(exec: &mut dyn Executor, args: &List, caller: FrameId) -> EvalResult {
    fold(
        exec,
        args,
        caller,
        |a, b| Some(a.wrapping_mul(b)),
        |a, b| Some(a * b),
    )
}

pub(super) fn div(exec: &mut dyn Executor, args: &List, caller: FrameId) -> EvalResult {
    fold(
        exec,
        args,
        caller,
        |a, b| (b != 0).then(|| a.wrapping_div(b)),
        |a, b| (b != 0.0).then(|| a / b),
    )
}

pub(super) fn rem(exec: &mut dyn Executor, args: &List, caller: FrameId) -> EvalResult {
    fold(
        exec,
        args,
        caller,
        |a, b| (b != 0).then(|| a.wrapping_rem(b)),
        |a, b| (b != 0.0).then(|| a % b),
    )
}

fn power(lhs: &Value, rhs: &Value) -> Value {
    match (&lhs.kind, &rhs.kind) {
        (ValueKind::Int(base), ValueKind::Int(exp)) if *exp >= 0 => {
            Value::int(base.wrapping_pow(exp.unsigned_abs()))
        }
        _ => Value::float(lhs.to_float().powf(rhs.to_float())),
    }
}

/// `**`: right-associative, so `** 2 3 2` is `2 ** 9`.
pub(super) fn pow(_exec: &mut dyn Executor, args: &List, _caller: FrameId) -> EvalResult {
    let values = args.values();
    let Some((last, init)) = values.split_last() else {
        return Ok(Value::int(0));
    };
    let result = init
        .iter()
        .rev()
        .fold(last.to_number(), |acc, base| power(&base.to_number(), &acc));
    Ok(result)
}

pub(super) fn neg(_exec: &mut dyn Executor, args: &List, _caller: FrameId) -> EvalResult {
    let value = arg(args, 0).to_number();
    Ok(match value.kind {
        ValueKind::Float(f) => Value::float(-f),
        _ => Value::int(value.to_int().wrapping_neg()),
    })
}

fn fold_bits(args: &List, op: fn(i32, i32) -> i32) -> Value {
    let values = args.values();
    let Some((first, rest)) = values.split_first() else {
        return Value::int(0);
    };
    Value::int(rest.iter().fold(first.to_int(), |acc, v| op(acc, v.to_int())))
}

pub(super) fn bit_and(_exec: &mut dyn Executor, args: &List, _caller: FrameId) -> EvalResult {
    Ok(fold_bits(args, |a, b| a & b))
}

pub(super) fn bit_or(_exec: &mut dyn Executor, args: &List, _caller: FrameId) -> EvalResult {
    Ok(fold_bits(args, |a, b| a | b))
}

pub(super) fn bit_xor(_exec: &mut dyn Executor, args: &List, _caller: FrameId) -> EvalResult {
    Ok(fold_bits(args, |a, b| a ^ b))
}

pub(super) fn bit_not(_exec: &mut dyn Executor, args: &List, _caller: FrameId) -> EvalResult {
    Ok(Value::int(!arg(args, 0).to_int()))
}
