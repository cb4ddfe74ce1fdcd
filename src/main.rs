#![forbid(unsafe_code)]

use rustyline::error::ReadlineError;
use rustyline::Editor;
use std::{env, process};

mod config_dir;
mod helper;
mod interrupt;

use helper::CowintHelper;
use interrupt::CtrlCInterrupt;

fn print_help() {
    println!("cowint: arbitrary-precision integer calculator");
    println!();
    println!("USAGE:");
    println!("    cowint                 start an interactive session");
    println!("    cowint <expression>    evaluate an expression, e.g. cowint '2 ** 100'");
    println!("    cowint --help          print this message");
    println!("    cowint --version       print the version number");
    println!();
    println!("Operators: + - * / % ** & | ^ ~ << >> ( )");
    println!("Functions: abs(x) gcd(a, b) factorial(n) sign(x) bits(x)");
    println!("Assign with `name = expr`; `_` holds the previous result.");
}

fn print_version() {
    println!("cowint v{} (core v{})", env!("CARGO_PKG_VERSION"), cowint_core::get_version());
}

// Returns false if evaluation failed.
fn eval_and_print(line: &str, context: &mut cowint_core::Context, int: &CtrlCInterrupt) -> bool {
    match int.evaluate(line, context) {
        Ok(res) => {
            let main_result = res.get_main_result();
            if !main_result.is_empty() {
                println!("{}", main_result);
            }
            true
        }
        Err(msg) => {
            eprintln!("Error: {}", msg);
            false
        }
    }
}

fn repl_loop(int: &CtrlCInterrupt) {
    let mut context = cowint_core::Context::new();
    let mut rl = Editor::<CowintHelper>::with_config(
        rustyline::config::Builder::new()
            .history_ignore_space(true)
            .auto_add_history(true)
            .build(),
    );
    rl.set_helper(Some(CowintHelper::new(context.clone())));
    let history_path = config_dir::get_history_file_path();
    if let Some(history_path) = &history_path {
        if rl.load_history(history_path).is_err() {
            // No previous history
        }
    }
    loop {
        match rl.readline("> ") {
            Ok(line) => {
                eval_and_print(line.as_str(), &mut context, int);
                rl.set_helper(Some(CowintHelper::new(context.clone())));
            }
            Err(ReadlineError::Interrupted) => println!("Use Ctrl-D (i.e. EOF) to exit"),
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    if let Some(history_path) = history_path {
        if rl.save_history(&history_path).is_err() {
            eprintln!("Unable to save history to {}", history_path.display());
        }
    }
}

fn main() {
    let args = env::args().skip(1).collect::<Vec<_>>();
    match args.first().map(String::as_str) {
        Some("-h") | Some("--help") | Some("help") => print_help(),
        Some("-v") | Some("-V") | Some("--version") | Some("version") => print_version(),
        Some(_) => {
            let int = CtrlCInterrupt::install();
            let mut context = cowint_core::Context::new();
            if !eval_and_print(&args.join(" "), &mut context, &int) {
                process::exit(1);
            }
        }
        None => {
            let int = CtrlCInterrupt::install();
            repl_loop(&int);
        }
    }
}
