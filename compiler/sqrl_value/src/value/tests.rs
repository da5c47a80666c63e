use super::*;
use crate::{ErrorKind, Executor, Index, SymbolTable};
use pretty_assertions::assert_eq;

fn list(values: Vec<Value>) -> Value {
    Value::list(values)
}

fn nop(_: &mut dyn Executor, _: &List, _: FrameId) -> crate::EvalResult {
    Ok(Value::none())
}

#[test]
fn factory_methods() {
    assert!(Value::none().is_none());
    assert!(!Value::int(3).is_quoted());
    assert!(Value::int(3).quoted(true).is_quoted());
    assert_eq!(Value::string("hi").as_string(), "hi");
    assert_eq!(Value::list(vec![Value::int(1)]).as_list().unwrap().len(), 1);
    assert!(Value::infix(List::new()).is_list_like());
    assert!(Value::default().is_none());
}

#[test]
fn int_conversion() {
    assert_eq!(Value::int(7).to_int(), 7);
    assert_eq!(Value::float(3.9).to_int(), 3);
    assert_eq!(Value::float(-3.9).to_int(), -3);
    assert_eq!(Value::float(1e20).to_int(), i32::MAX);
    assert_eq!(Value::bool(true).to_int(), 1);
    assert_eq!(Value::string("  42abc").to_int(), 42);
    assert_eq!(Value::string("0x10").to_int(), 16);
    assert_eq!(Value::string("nope").to_int(), 0);
    assert_eq!(Value::none().to_int(), 0);
}

#[test]
fn float_conversion() {
    assert_eq!(Value::int(2).to_float(), 2.0);
    assert_eq!(Value::string("2.5").to_float(), 2.5);
    assert_eq!(Value::bool(false).to_float(), 0.0);
}

#[test]
fn number_conversion() {
    assert_eq!(Value::string("1.5").to_number(), Value::float(1.5));
    assert!(matches!(Value::string("12").to_number().kind, ValueKind::Int(12)));
    assert!(matches!(Value::string("x").to_number().kind, ValueKind::Int(0)));
    assert!(matches!(Value::bool(true).to_number().kind, ValueKind::Int(1)));
    assert!(!Value::int(3).quoted(true).to_number().is_quoted());
}

#[test]
fn truthiness() {
    assert!(!Value::none().to_bool());
    assert!(!Value::int(0).to_bool());
    assert!(Value::int(-1).to_bool());
    assert!(!Value::float(0.0).to_bool());
    assert!(!Value::string("").to_bool());
    assert!(Value::string("0").to_bool());
    assert!(!list(vec![]).to_bool());
    assert!(list(vec![Value::none()]).to_bool());
    assert!(Value::context_handle(FrameId::GLOBAL).to_bool());

    let ex = Exception::new(ErrorKind::NullReference, FrameId::GLOBAL, "global");
    assert!(!Value::exception(ex).to_bool());
}

#[test]
fn none_equals_empty_list() {
    assert_eq!(Value::none(), Value::none());
    assert_eq!(Value::none(), list(vec![]));
    assert_eq!(Value::infix(List::new()), Value::none());
    assert_ne!(Value::none(), list(vec![Value::none()]));
    assert_ne!(Value::none(), Value::int(0));
}

#[test]
fn lists_compare_elementwise() {
    let a = list(vec![Value::int(1), Value::int(2), Value::int(3)]);
    let b = list(vec![Value::int(1), Value::int(2), Value::int(3)]);
    let short = list(vec![Value::int(1), Value::int(2)]);
    assert_eq!(a, b);
    assert_ne!(a, short);
    assert_eq!(Value::infix(vec![Value::int(1), Value::int(2)]), short);
}

#[test]
fn numbers_compare_after_promotion() {
    assert_eq!(Value::int(2), Value::float(2.0));
    assert!(Value::int(1).less_than(&Value::float(1.5)));
    assert!(!Value::float(2.0).less_than(&Value::int(2)));
}

#[test]
fn mismatched_types_are_unequal_and_unordered() {
    assert_ne!(Value::string("1"), Value::int(1));
    assert_ne!(Value::bool(true), Value::int(1));
    assert!(!Value::string("a").less_than(&Value::int(1)));
    assert!(!Value::int(1).less_than(&Value::string("a")));
}

#[test]
fn strings_order_lexicographically() {
    assert!(Value::string("abc").less_than(&Value::string("abd")));
    assert!(Value::string("ab").less_than(&Value::string("abc")));
    assert!(!Value::string("b").less_than(&Value::string("a")));
}

#[test]
fn identity_compared_values() {
    let mut table = SymbolTable::new();
    let name = table.intern("f");
    let f = Value::function(name.clone(), List::new(), List::new());
    let g = Value::function(name.clone(), List::new(), List::new());
    assert_eq!(f, f.clone());
    assert_ne!(f, g);

    let op = Value::operator(name, nop, 0, Assoc::Left);
    assert_eq!(op, op.clone());
    assert_eq!(Value::context_handle(FrameId::new(2)), Value::context_handle(FrameId::new(2)));

    let ex = Exception::new(ErrorKind::NullReference, FrameId::GLOBAL, "global");
    let ex = Value::exception(ex);
    assert_ne!(ex, ex.clone());
}

#[test]
fn only_scoped_values_have_context() {
    let mut table = SymbolTable::new();
    let class = Value::class(table.intern("Point"), FrameId::new(4));
    assert_eq!(class.context(), Some(FrameId::new(4)));

    let ValueKind::Class(rc) = &class.kind else {
        panic!("expected class");
    };
    let object = Value::object(Rc::clone(rc), FrameId::new(5));
    assert_eq!(object.context(), Some(FrameId::new(5)));
    assert_eq!(object.name(), "Point");

    assert!(Value::context_handle(FrameId::GLOBAL).has_context());
    assert!(!Value::int(1).has_context());
    assert!(!list(vec![]).has_context());
}

#[test]
fn print_string_forms() {
    let mut table = SymbolTable::new();
    assert_eq!(Value::none().to_print_string(), "none");
    assert_eq!(Value::bool(false).to_print_string(), "false");
    assert_eq!(Value::int(-12).to_print_string(), "-12");
    assert_eq!(Value::float(2.0).to_print_string(), "2.0");
    assert_eq!(Value::float(0.1).to_print_string(), "0.1");
    assert_eq!(Value::string("a\"b").to_print_string(), "\"a\\\"b\"");
    assert_eq!(Value::string("a\tb").to_print_string(), "\"a\\011b\"");

    let path = Value::path(Identifier::new(vec![
        Index::new(table.intern("a")),
        Index::new(table.intern("b")),
    ]));
    assert_eq!(path.clone().quoted(true).to_print_string(), "'a.b");
    assert_eq!(
        list(vec![Value::int(1), Value::infix(vec![Value::int(2), path])]).to_print_string(),
        "{1 (2 a.b)}"
    );
    assert_eq!(
        Value::function(table.intern("add"), List::new(), List::new()).to_print_string(),
        "FUNC:add"
    );
    assert_eq!(Value::context_handle(FrameId::GLOBAL).to_print_string(), "CONTEXT");
}

#[test]
fn display_leaves_strings_bare() {
    assert_eq!(Value::string("hello").to_string(), "hello");
    assert_eq!(list(vec![Value::string("x")]).to_string(), "{\"x\"}");
}

#[test]
fn exception_value_prints_chain() {
    let ex = Exception::new(
        ErrorKind::UnknownIdentifier("q".into()),
        FrameId::new(1),
        "f",
    )
    .wrap(FrameId::GLOBAL, "global");
    assert_eq!(
        Value::from(ex).to_string(),
        "No such identifier: q from f\nNo such identifier: q from global"
    );
}
