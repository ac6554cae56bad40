use super::*;
use crate::ErrorCode;
use pretty_assertions::assert_eq;

fn err(line: u32, msg: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1001, msg, line)
}

#[test]
fn flush_sorts_by_line_and_resets() {
    let mut queue = DiagnosticQueue::new();
    queue.push(err(5, "b"));
    queue.push(err(2, "a"));
    queue.push(err(5, "c"));
    assert_eq!(queue.error_count(), 3);

    let lines: Vec<(u32, String)> = queue
        .flush()
        .into_iter()
        .map(|d| (d.line, d.message))
        .collect();
    assert_eq!(
        lines,
        vec![(2, "a".into()), (5, "b".into()), (5, "c".into())]
    );
    assert!(!queue.has_errors());
    assert!(queue.is_empty());
}

#[test]
fn exact_repeats_are_dropped() {
    let mut queue = DiagnosticQueue::new();
    assert!(queue.push(err(1, "same")));
    assert!(!queue.push(err(1, "same")));
    assert!(queue.push(err(2, "same")));
    assert_eq!(queue.error_count(), 2);
}

#[test]
fn dedup_can_be_disabled() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig {
        error_limit: 0,
        deduplicate: false,
    });
    queue.push(err(1, "same"));
    queue.push(err(1, "same"));
    assert_eq!(queue.error_count(), 2);
}

#[test]
fn error_limit_stops_collection() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig {
        error_limit: 2,
        deduplicate: true,
    });
    queue.extend((1..=5).map(|l| err(l, "x")));
    assert_eq!(queue.error_count(), 2);
    assert!(queue.limit_reached());
}

#[test]
fn warnings_do_not_count_as_errors() {
    let mut queue = DiagnosticQueue::new();
    queue.push(err(1, "w").as_warning());
    assert!(!queue.has_errors());
    assert_eq!(queue.peek().count(), 1);
}
