//! The interactive prompt.

use std::io::{self, BufRead, Write};

use super::{report_outcome, CliOptions};
use crate::{exit_code, Session};

const PROMPT: &str = "> ";

/// Read lines from stdin until end of input.
pub fn repl(options: &CliOptions) -> i32 {
    let mut session = options.session();
    let stdin = io::stdin();
    run_repl(&mut session, stdin.lock(), &mut io::stdout(), options)
}

/// Drive `session` one line at a time.
///
/// Errors are reported and the loop goes on; definitions from earlier lines
/// stay visible. Returns once `input` is exhausted.
pub fn run_repl<R: BufRead, W: Write>(
    session: &mut Session,
    mut input: R,
    prompt: &mut W,
    options: &CliOptions,
) -> i32 {
    let mut line = String::new();
    loop {
        let _ = write!(prompt, "{PROMPT}");
        let _ = prompt.flush();

        line.clear();
        match input.read_line(&mut line) {
            Ok(0) => {
                let _ = writeln!(prompt);
                return exit_code::OK;
            }
            Ok(_) => {}
            Err(err) => {
                eprintln!("error: cannot read input: {err}");
                return exit_code::IO_ERR;
            }
        }
        if line.trim().is_empty() {
            continue;
        }
        let outcome = session.run_repl_line(&line);
        report_outcome(&outcome, options);
    }
}
