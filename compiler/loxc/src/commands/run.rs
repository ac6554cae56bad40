//! `lox run <file>`: execute a script.

use std::path::Path;

use super::{read_file, report_outcome, CliOptions};

/// Run a script file, printing its output to stdout.
pub fn run_file(path: &str, options: &CliOptions) -> i32 {
    let source = match read_file(Path::new(path)) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: {err}");
            return err.exit_code();
        }
    };
    tracing::debug!(path, "running script");
    let mut session = options.session();
    let outcome = session.run_source(&source);
    report_outcome(&outcome, options)
}
