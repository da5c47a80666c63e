//! Squirrel CLI
//!
//! `sqrl` starts a REPL, `sqrl <file>` runs a file line by line and
//! `sqrl -e <line>` evaluates a single line.

use std::io::{self, BufReader};

use sqrlc::{ended_in_exception, init_tracing, Session};

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    let code = match args.get(1).map(String::as_str) {
        None => repl(),
        Some("help" | "-h" | "--help") => {
            print_usage();
            0
        }
        Some("-e") => {
            let Some(line) = args.get(2) else {
                eprintln!("error: -e needs an expression");
                eprintln!("Usage: sqrl -e <expr>");
                std::process::exit(1);
            };
            run_expr(line)
        }
        Some(path) => run_file(path),
    };
    std::process::exit(code);
}

fn repl() -> i32 {
    let mut session = Session::default();
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    match session.run(stdin.lock(), &mut stdout, Some("> ")) {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("error: {err}");
            1
        }
    }
}

fn run_expr(line: &str) -> i32 {
    let mut session = Session::default();
    let last = session.eval_line(line);
    if let Some(value) = &last {
        println!("{}", value.to_print_string());
    }
    i32::from(ended_in_exception(last.as_ref()))
}

fn run_file(path: &str) -> i32 {
    let file = match std::fs::File::open(path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("error: cannot read '{path}': {err}");
            return 1;
        }
    };
    let mut session = Session::default();
    let mut stdout = io::stdout();
    match session.run(BufReader::new(file), &mut stdout, None) {
        Ok(last) => i32::from(ended_in_exception(last.as_ref())),
        Err(err) => {
            eprintln!("error: {path}: {err}");
            1
        }
    }
}

fn print_usage() {
    println!("Squirrel interpreter");
    println!();
    println!("Usage: sqrl [file | -e <expr>]");
    println!();
    println!("  (no arguments)   Start a REPL on stdin");
    println!("  <file>           Evaluate a file one line at a time");
    println!("  -e <expr>        Evaluate a single line");
    println!("  help             Show this help message");
    println!();
    println!("Set RUST_LOG=sqrl_eval=debug to trace evaluation.");
}
