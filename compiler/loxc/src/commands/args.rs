//! Hand-rolled argument parsing for the `lox` binary.

use lox_diagnostic::ColorMode;

use super::{CliOptions, OutputFormat};
use crate::DriverError;

/// What the user asked for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Repl,
    Run(String),
    Lex(String),
    Parse { path: String, rpn: bool },
    Help,
    Version,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub command: Command,
    pub options: CliOptions,
}

/// Parse arguments, excluding the program name.
///
/// `lox` alone starts the REPL and `lox <file>` is shorthand for
/// `lox run <file>`. Options may appear anywhere.
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Result<Invocation, DriverError> {
    let mut options = CliOptions::default();
    let mut rpn = false;
    let mut positional: Vec<&str> = Vec::new();

    for arg in args {
        let arg = arg.as_ref();
        if let Some(value) = arg.strip_prefix("--format=") {
            options.format = OutputFormat::parse(value)
                .ok_or_else(|| DriverError::Usage(format!("unknown format '{value}'")))?;
        } else if let Some(value) = arg.strip_prefix("--color=") {
            options.color = ColorMode::parse(value)
                .ok_or_else(|| DriverError::Usage(format!("unknown color mode '{value}'")))?;
        } else {
            match arg {
                "--strict" => options.strict = true,
                "--rpn" => rpn = true,
                "-h" | "--help" => positional.insert(0, "help"),
                "-V" | "--version" => positional.insert(0, "version"),
                flag if flag.starts_with('-') && flag.len() > 1 => {
                    return Err(DriverError::Usage(format!("unknown option '{flag}'")));
                }
                _ => positional.push(arg),
            }
        }
    }

    let command = match positional.as_slice() {
        [] => Command::Repl,
        ["help", ..] => Command::Help,
        ["version", ..] => Command::Version,
        ["run", path] => Command::Run((*path).to_string()),
        ["lex", path] => Command::Lex((*path).to_string()),
        ["parse", path] => Command::Parse {
            path: (*path).to_string(),
            rpn,
        },
        [command @ ("run" | "lex" | "parse")] => {
            return Err(DriverError::Usage(format!("'{command}' needs a file path")));
        }
        [path] => Command::Run((*path).to_string()),
        _ => return Err(DriverError::Usage("too many arguments".to_string())),
    };
    if rpn && !matches!(command, Command::Parse { .. }) {
        return Err(DriverError::Usage("'--rpn' only applies to 'parse'".to_string()));
    }
    Ok(Invocation { command, options })
}

pub const USAGE: &str = "\
Usage: lox [options] [script]
       lox <command> [options] <file>

Commands:
  run <file>       Run a script (same as `lox <file>`)
  lex <file>       Print the token stream
  parse <file>     Print the syntax tree (--rpn for reverse Polish)
  help             Show this message
  version          Show the version

With no script, starts an interactive prompt.

Options:
  --strict                       Report unused locals and same-scope self-reads
  --format=terminal|json         Diagnostic output format
  --color=auto|always|never      Colorize diagnostics

Set RUST_LOG to enable tracing (LOX_LOG_TREE=1 for a span tree).";
