#![allow(clippy::unwrap_used, clippy::expect_used)]

//! The `lox` binary: exit codes and what lands on stdout and stderr.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use pretty_assertions::assert_eq;
use tempfile::TempDir;

struct Script {
    _dir: TempDir,
    path: PathBuf,
}

fn script(source: &str) -> Script {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("script.lox");
    fs::write(&path, source).unwrap();
    Script { _dir: dir, path }
}

fn lox(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_lox"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn lox_script(source: &str, extra: &[&str]) -> Output {
    let script = script(source);
    let mut args: Vec<&str> = extra.to_vec();
    args.push(script.path.to_str().unwrap());
    lox(&args)
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn runs_a_script() {
    let output = lox_script("print \"hello\";\nprint 6 * 7;", &[]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "hello\n42\n");
    assert_eq!(stderr(&output), "");
}

#[test]
fn compile_errors_exit_65() {
    let output = lox_script("print 1\nprint (;", &["--color=never"]);
    assert_eq!(output.status.code(), Some(65));
    assert_eq!(stdout(&output), "");
    assert_eq!(
        stderr(&output),
        "[line 2] Error at 'print': Expect ';' after value.\n"
    );
}

#[test]
fn json_diagnostics() {
    let output = lox_script("return;", &["--format=json"]);
    assert_eq!(output.status.code(), Some(65));
    let err = stderr(&output);
    assert!(err.starts_with("[\n"), "{err}");
    assert!(err.contains("\"severity\": \"error\""), "{err}");
    assert!(err.contains("\"message\": \"Cannot return from top-level code.\""), "{err}");
}

#[test]
fn runtime_errors_exit_70_after_partial_output() {
    let output = lox_script("print \"before\";\nprint -\"x\";\nprint \"after\";", &[]);
    assert_eq!(output.status.code(), Some(70));
    assert_eq!(stdout(&output), "before\n");
    assert_eq!(stderr(&output), "Operand must be a number.\n[line 2]\n");
}

#[test]
fn strict_flag_reaches_the_resolver() {
    let source = "{ var unused = 1; }";
    assert_eq!(lox_script(source, &[]).status.code(), Some(0));
    let output = lox_script(source, &["--strict", "--color=never"]);
    assert_eq!(output.status.code(), Some(65));
    assert_eq!(
        stderr(&output),
        "[line 1] Error at 'unused': Variable with this name is never used.\n"
    );
}

#[test]
fn missing_file_exits_74() {
    let output = lox(&["run", "/definitely/not/here.lox"]);
    assert_eq!(output.status.code(), Some(74));
    assert_eq!(
        stderr(&output),
        "error: cannot find file '/definitely/not/here.lox'\n"
    );
}

#[test]
fn usage_errors_exit_64() {
    let output = lox(&["one.lox", "two.lox"]);
    assert_eq!(output.status.code(), Some(64));
    assert!(stderr(&output).starts_with("error: too many arguments\n"));
    assert!(stderr(&output).contains("Usage: lox"));
}

#[test]
fn help_and_version() {
    let help = lox(&["--help"]);
    assert_eq!(help.status.code(), Some(0));
    assert!(stdout(&help).starts_with("Usage: lox"));

    let version = lox(&["version"]);
    assert_eq!(version.status.code(), Some(0));
    assert!(stdout(&version).starts_with("lox "));
}

#[test]
fn lex_and_parse_dumps() {
    let source = "print -1 + x;";

    let lexed = lox_script(source, &["lex"]);
    assert_eq!(lexed.status.code(), Some(0));
    assert_eq!(
        stdout(&lexed),
        "PRINT print null\nMINUS - null\nNUMBER 1 1\nPLUS + null\n\
         IDENTIFIER x null\nSEMICOLON ; null\nEOF  null\n"
    );

    let prefix = lox_script(source, &["parse"]);
    assert_eq!(stdout(&prefix), "(print (+ (- 1) $x))\n");

    let script = script(source);
    let rpn = lox(&["parse", "--rpn", script.path.to_str().unwrap()]);
    assert_eq!(stdout(&rpn), "1 - $x + print\n");
}

#[test]
fn repl_session() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_lox"))
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"var a = 20;\na + 22\nprint nope;\nfun f() { return a; }\nf()\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "> > 42\n> > > 20\n> \n");
    assert_eq!(stderr(&output), "Undefined variable 'nope'.\n[line 1]\n");
}
