//! The `lox` command-line interpreter.

use loxc::commands::{lex_file, parse_args, parse_file, repl, run_file, Command, USAGE};
use loxc::exit_code;

fn main() {
    loxc::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let invocation = match parse_args(&args) {
        Ok(invocation) => invocation,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!();
            eprintln!("{USAGE}");
            std::process::exit(err.exit_code());
        }
    };

    let options = &invocation.options;
    let code = match &invocation.command {
        Command::Repl => repl(options),
        Command::Run(path) => run_file(path, options),
        Command::Lex(path) => lex_file(path, options),
        Command::Parse { path, rpn } => parse_file(path, *rpn, options),
        Command::Help => {
            println!("{USAGE}");
            exit_code::OK
        }
        Command::Version => {
            println!("lox {}", env!("CARGO_PKG_VERSION"));
            exit_code::OK
        }
    };
    std::process::exit(code);
}
