use super::*;
use pretty_assertions::assert_eq;
use sqrl_eval::buffer_handler;

fn session() -> Session {
    Session::new(Interpreter::builder().print_handler(buffer_handler()).build())
}

fn run(input: &str, prompt: Option<&str>) -> (String, Option<Value>) {
    let mut out = Vec::new();
    let last = session().run(input.as_bytes(), &mut out, prompt).unwrap();
    (String::from_utf8(out).unwrap(), last)
}

#[test]
fn each_line_prints_its_result() {
    let (out, last) = run("set x 2\n\n+ x 1\n", None);
    assert_eq!(out, "2\n3\n");
    assert_eq!(last.unwrap(), Value::int(3));
}

#[test]
fn blank_lines_are_skipped() {
    let mut session = session();
    assert!(session.eval_line("   ").is_none());
    assert!(session.eval_line("").is_none());
}

#[test]
fn prompt_precedes_every_read() {
    let (out, _) = run("+ 1 1\n", Some("> "));
    assert_eq!(out, "> 2\n> \n");
}

#[test]
fn exceptions_are_printed_and_reported() {
    let (out, last) = run("+ 1 1\nnope\n", None);
    assert_eq!(out, "2\nNo such identifier: nope from global\n");
    assert!(ended_in_exception(last.as_ref()));
}

#[test]
fn later_success_clears_failure() {
    let (_, last) = run("nope\n+ 1 1\n", None);
    assert!(!ended_in_exception(last.as_ref()));
    assert!(!ended_in_exception(None));
}

#[test]
fn state_persists_across_lines() {
    let mut session = session();
    session.eval_line("func sq {n} {* n n}");
    assert_eq!(session.eval_line("sq 7").unwrap(), Value::int(49));
    assert!(!session.interpreter().symbols().is_empty());
}
