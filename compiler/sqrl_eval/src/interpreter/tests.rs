use super::*;
use crate::print_handler::buffer_handler;
use sqrl_value::Resolution;
use proptest::prelude::*;

fn interp() -> Interpreter {
    Interpreter::builder().print_handler(buffer_handler()).build()
}

fn path(interp: &mut Interpreter, text: &str) -> Identifier {
    interp.parse(text).first().unwrap().as_path().unwrap().clone()
}

fn error_of(value: &Value) -> ErrorKind {
    value.as_exception().unwrap().kind().clone()
}

fn frame_of(value: &Value) -> FrameId {
    value.context().unwrap()
}

mod resolution_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_walk_up_to_the_owner() {
        let mut interp = interp();
        interp.define_global("x", Value::int(1));
        let local = interp.new_frame_at(FrameId::GLOBAL, FrameKind::Local, None, 0);
        let x = path(&mut interp, "x");
        assert_eq!(
            interp.find_owner(&x, local, false).unwrap(),
            Resolution::at(FrameId::GLOBAL)
        );
    }

    #[test]
    fn writes_stay_in_the_starting_frame() {
        let mut interp = interp();
        interp.define_global("x", Value::int(1));
        let local = interp.new_frame_at(FrameId::GLOBAL, FrameKind::Local, None, 0);
        let x = path(&mut interp, "x");
        assert_eq!(
            interp.find_owner(&x, local, true).unwrap(),
            Resolution::at(local)
        );
    }

    #[test]
    fn unknown_name_is_reported_with_full_path() {
        let mut interp = interp();
        let missing = path(&mut interp, "nope");
        let err = interp.find_owner(&missing, FrameId::GLOBAL, false).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnknownIdentifier("nope".into()));
    }

    #[test]
    fn local_prefix_never_searches_the_parent() {
        let mut interp = interp();
        interp.define_global("x", Value::int(1));
        let local = interp.new_frame_at(FrameId::GLOBAL, FrameKind::Local, None, 0);
        let lx = path(&mut interp, "local.x");

        let err = interp.find_owner(&lx, local, false).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnknownIdentifier("local.x".into()));
        assert_eq!(
            interp.find_owner(&lx, local, true).unwrap(),
            Resolution::at(local)
        );
        let x = path(&mut interp, "x");
        assert_eq!(
            interp.find_owner_local(&x, local, true).unwrap(),
            Resolution::at(local)
        );
    }

    #[test]
    fn parent_prefix_moves_one_frame_up() {
        let mut interp = interp();
        let outer = interp.new_frame_at(FrameId::GLOBAL, FrameKind::Local, None, 0);
        let inner = interp.new_frame_at(outer, FrameKind::Local, None, 0);
        let px = path(&mut interp, "parent.x");
        assert_eq!(
            interp.find_owner(&px, inner, true).unwrap(),
            Resolution::at(outer)
        );
        assert_eq!(
            interp.find_owner(&px, FrameId::GLOBAL, true).unwrap(),
            Resolution::at(FrameId::GLOBAL)
        );
    }

    #[test]
    fn global_prefix_skips_every_intermediate_frame() {
        let mut interp = interp();
        let outer = interp.new_frame_at(FrameId::GLOBAL, FrameKind::Local, None, 0);
        let inner = interp.new_frame_at(outer, FrameKind::Function, None, 1);
        let gx = path(&mut interp, "global.x");
        assert_eq!(
            interp.find_owner(&gx, inner, true).unwrap(),
            Resolution::at(FrameId::GLOBAL)
        );
    }

    #[test]
    fn missing_ancestor_kind_is_an_error() {
        let mut interp = interp();
        let ox = path(&mut interp, "object.x");
        let err = interp.find_owner(&ox, FrameId::GLOBAL, false).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::NoAncestor("object"));
        assert_eq!(
            interp.find_ancestor(FrameId::GLOBAL, FrameKind::Global).unwrap(),
            FrameId::GLOBAL
        );
    }

    #[test]
    fn prefix_word_as_last_segment_is_a_plain_name() {
        let mut interp = interp();
        interp.evaluate_source("set local 3");
        assert_eq!(interp.evaluate_source("identity local"), Value::int(3));
    }

    #[test]
    fn writing_through_missing_intermediate_fails() {
        let mut interp = interp();
        let result = interp.evaluate_source("set a.b 1");
        assert_eq!(error_of(&result), ErrorKind::MissingPath("a.b".into()));
    }

    #[test]
    fn descending_into_a_plain_value_fails() {
        let mut interp = interp();
        interp.evaluate_source("set n 5");
        let result = interp.evaluate_source("set n.x 1");
        assert_eq!(error_of(&result), ErrorKind::NotAContext("n.x".into()));
    }

    #[test]
    fn subscripting_a_plain_value_mid_path_fails() {
        let mut interp = interp();
        interp.evaluate_source("class Cell {set v 0}");
        interp.evaluate_source("set c (Cell)");
        let read = interp.evaluate_source("identity c[0].v");
        assert_eq!(error_of(&read), ErrorKind::ExpectedList("c[0].v".into()));
        let write = interp.evaluate_source("set c[0].v 1");
        assert_eq!(error_of(&write), ErrorKind::ExpectedList("c[0].v".into()));
        assert_eq!(interp.evaluate_source("identity c.v"), Value::int(0));
    }

    #[test]
    fn empty_path_is_invalid() {
        let mut interp = interp();
        let empty = Identifier::new(vec![]);
        let err = interp.find_owner(&empty, FrameId::GLOBAL, false).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidIdentifier(String::new()));
    }

    #[test]
    fn object_reads_class_members_without_copying() {
        let mut interp = interp();
        interp.evaluate_source("class Point {func area {} {identity 1}}");
        let point = interp.evaluate_source("set p (Point)");
        let class = interp.evaluate_source("identity Point");

        let area = path(&mut interp, "p.area");
        let resolution = interp.find_owner(&area, FrameId::GLOBAL, false).unwrap();
        assert_eq!(resolution.exec, frame_of(&point));
        assert_eq!(resolution.func, frame_of(&class));

        let area_sym = interp.symbols_mut().intern("area");
        assert!(!interp.frames.get(frame_of(&point)).contains(&area_sym));
    }

    #[test]
    fn subscript_inside_path_selects_element_context() {
        let mut interp = interp();
        interp.evaluate_source("class Cell {set v 0}");
        interp.evaluate_source("set cells (list (Cell) (Cell))");
        interp.evaluate_source("set cells[1].v 7");
        assert_eq!(interp.evaluate_source("identity cells[1].v"), Value::int(7));
        assert_eq!(interp.evaluate_source("identity cells[0].v"), Value::int(0));
    }

    proptest! {
        #[test]
        fn get_returns_what_set_stored(name in "[a-z][a-z0-9_]{0,6}", n in any::<i32>()) {
            let mut interp = interp();
            let target = path(&mut interp, &name);
            interp.set(&target, Value::int(n), FrameId::GLOBAL).unwrap();
            prop_assert_eq!(interp.get(&target, FrameId::GLOBAL).unwrap(), Value::int(n));
        }
    }
}

mod call_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn double(_exec: &mut dyn Executor, args: &List, _caller: FrameId) -> EvalResult {
        Ok(Value::int(args.first().unwrap_or_default().to_int() * 2))
    }

    fn raw_first(_exec: &mut dyn Executor, args: &List, _caller: FrameId) -> EvalResult {
        Ok(args.first().unwrap_or_default())
    }

    fn read_named(exec: &mut dyn Executor, args: &List, caller: FrameId) -> EvalResult {
        match args.first().as_ref().and_then(Value::as_path) {
            Some(path) => exec.get(path, caller),
            None => Ok(Value::none()),
        }
    }

    fn fail(exec: &mut dyn Executor, _args: &List, caller: FrameId) -> EvalResult {
        Ok(Value::exception(
            exec.raise(ErrorKind::Operator("boom".into()), caller),
        ))
    }

    #[test]
    fn registered_operator_receives_evaluated_args() {
        let mut interp = interp();
        interp.register("double", double, 0, Assoc::Left, false);
        interp.evaluate_source("set n 21");
        assert_eq!(interp.evaluate_source("double n"), Value::int(42));
    }

    #[test]
    fn no_eval_operator_receives_raw_args() {
        let mut interp = interp();
        interp.register("raw", raw_first, 0, Assoc::Left, true);
        let result = interp.evaluate_source("raw undefined_name");
        assert_eq!(result.as_path().unwrap().to_string(), "undefined_name");
    }

    #[test]
    fn operator_reads_through_the_caller_scope() {
        let mut interp = interp();
        interp.register("read", read_named, 0, Assoc::Left, true);
        interp.evaluate_source("set x 1");
        interp.evaluate_source("func f {} {set local.x 2} {read x}");
        assert_eq!(interp.evaluate_source("f"), Value::int(2));
        assert_eq!(interp.evaluate_source("read x"), Value::int(1));
    }

    #[test]
    fn operator_returning_exception_value_propagates() {
        let mut interp = interp();
        interp.register("fail", fail, 0, Assoc::Left, false);
        let result = interp.evaluate_source("+ 1 (fail)");
        assert_eq!(error_of(&result), ErrorKind::Operator("boom".into()));
    }

    #[test]
    fn non_callable_head_is_rejected() {
        let mut interp = interp();
        interp.evaluate_source("set n 5");
        assert_eq!(
            error_of(&interp.evaluate_source("n 1")),
            ErrorKind::NotCallable("5".into())
        );
    }

    #[test]
    fn non_path_parameter_is_rejected() {
        let mut interp = interp();
        interp.evaluate_source("func f {1} {identity 0}");
        assert_eq!(
            error_of(&interp.evaluate_source("f 9")),
            ErrorKind::InvalidParameter("{1}".into())
        );
    }

    #[test]
    fn arity_mismatch_is_not_an_error() {
        let mut interp = interp();
        interp.evaluate_source("func first {a b} {identity a}");
        assert_eq!(interp.evaluate_source("first 1"), Value::int(1));
        assert_eq!(interp.evaluate_source("first 1 2 3"), Value::int(1));
    }

    #[test]
    fn quoted_parameter_collects_remaining_args() {
        let mut interp = interp();
        interp.evaluate_source("func collect {head 'rest} {identity rest}");
        let rest = interp.evaluate_source("collect 1 2 3");
        assert_eq!(rest, Value::list(vec![Value::int(2), Value::int(3)]));
    }

    #[test]
    fn quoted_function_evaluates_args_at_binding() {
        let mut interp = interp();
        interp.evaluate_source("func 'twice {x} {+ x x}");
        interp.evaluate_source("set k 2");
        assert_eq!(interp.evaluate_source("twice k"), Value::int(4));
    }

    #[test]
    fn empty_body_returns_none() {
        let mut interp = interp();
        interp.evaluate_source("func nothing {}");
        assert!(interp.evaluate_source("nothing").is_none());
    }

    #[test]
    fn call_depth_is_capped() {
        let mut interp = Interpreter::builder()
            .print_handler(buffer_handler())
            .max_call_depth(10)
            .build();
        interp.evaluate_source("func down {n} {down (+ n 1)}");
        let result = interp.evaluate_source("down 0");
        assert_eq!(error_of(&result), ErrorKind::StackLimit("down".into()));
    }

    #[test]
    fn operator_call_at_the_ceiling_is_refused() {
        let mut interp = Interpreter::builder()
            .print_handler(buffer_handler())
            .max_call_depth(1)
            .build();
        interp.evaluate_source("func f {} {+ 1 2}");
        let result = interp.evaluate_source("f");
        let ex = result.as_exception().unwrap();
        assert_eq!(ex.kind(), &ErrorKind::StackLimit("+".into()));
        assert_eq!(ex.origin().frame_name(), "f");
        assert_eq!(interp.evaluate_source("+ 1 2"), Value::int(3));
    }

    #[test]
    fn exception_chain_records_each_frame_left() {
        let mut interp = interp();
        interp.evaluate_source("func f {} {g}");
        let result = interp.evaluate_source("f");
        let ex = result.as_exception().unwrap();
        let names: Vec<&str> = ex.links().iter().map(|link| link.frame_name()).collect();
        assert_eq!(names, vec!["f", "global"]);
        assert_eq!(
            ex.to_string(),
            "No such identifier: g from f\nNo such identifier: g from global"
        );
    }

    #[test]
    fn exception_stops_the_body() {
        let mut interp = interp();
        interp.evaluate_source("set x 1");
        interp.evaluate_source("{raise \"stop\"} {set x 2}");
        assert_eq!(interp.evaluate_source("identity x"), Value::int(1));
    }
}

mod evaluate_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn quoted_values_evaluate_to_themselves() {
        let mut interp = interp();
        let value = Value::path(path(&mut interp, "missing")).quoted(true);
        assert_eq!(
            interp.evaluate(&value, FrameId::GLOBAL).unwrap().to_print_string(),
            "'missing"
        );
    }

    #[test]
    fn empty_list_evaluates_to_itself() {
        let mut interp = interp();
        let empty = Value::list(List::new());
        assert_eq!(interp.evaluate(&empty, FrameId::GLOBAL).unwrap(), empty);
    }

    #[test]
    fn list_with_data_head_is_data() {
        let mut interp = interp();
        let result = interp.evaluate_source("{1 2} {3 4}");
        assert_eq!(result, Value::list(vec![Value::int(3), Value::int(4)]));
    }

    #[test]
    fn list_of_lists_is_a_body() {
        let mut interp = interp();
        let result = interp.evaluate_source("{set x 1} {+ x 1}");
        assert_eq!(result, Value::int(2));
    }

    #[test]
    fn evaluate_list_keeps_order() {
        let mut interp = interp();
        let list = interp.parse("1 (+ 1 1) \"three\"");
        let out = interp.evaluate_list(&list, FrameId::GLOBAL).unwrap();
        assert_eq!(
            out.values(),
            vec![Value::int(1), Value::int(2), Value::string("three")]
        );
    }

    #[test]
    fn interpreter_without_builtins_knows_no_names() {
        let mut interp = Interpreter::builder().with_builtins(false).build();
        assert_eq!(
            error_of(&interp.evaluate_source("+ 1 2")),
            ErrorKind::UnknownIdentifier("+".into())
        );
    }

    #[test]
    fn print_goes_to_the_configured_handler() {
        let handler = buffer_handler();
        let mut interp = Interpreter::builder().print_handler(handler.clone()).build();
        interp.evaluate_source("print \"hi\" 2");
        assert_eq!(handler.get_output(), "hi\n2\n");
    }
}
