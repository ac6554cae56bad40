use super::errors;
use crate::{parse, parse_expression, MAX_ARITY};
use pretty_assertions::assert_eq;

#[test]
fn missing_semicolon() {
    assert_eq!(
        errors("print 1"),
        vec!["[line 1] Error at end: Expect ';' after value."]
    );
}

#[test]
fn missing_expression() {
    assert_eq!(
        errors("var a = ;"),
        vec!["[line 1] Error at ';': Expect expression."]
    );
}

#[test]
fn leading_binary_operators_are_rejected() {
    for source in ["* 3;", "/ 3;", "+ 3;", "== 1;", "< 1;", "and b;", "or b;", ", a;", "? a;", "= 2;", "+= 2;"] {
        let errs = errors(source);
        assert_eq!(errs.len(), 1, "{source}: {errs:?}");
        assert!(
            errs[0].ends_with("Unary operator not supported."),
            "{source}: {errs:?}"
        );
    }
}

#[test]
fn leading_minus_is_negation() {
    assert!(errors("- 3;").is_empty());
}

#[test]
fn invalid_assignment_target_is_reported_not_thrown() {
    assert_eq!(
        errors("a + b = c; print 1"),
        vec![
            "[line 1] Error at '=': Invalid assignment target.",
            "[line 1] Error at end: Expect ';' after value.",
        ]
    );
    assert_eq!(errors("(a) += 1;").len(), 1);
}

#[test]
fn recovery_surfaces_independent_errors() {
    let source = "var = 1;\nprint (;\nvar ok = 2;\nfun f( { }\nprint ok;";
    assert_eq!(
        errors(source),
        vec![
            "[line 1] Error at '=': Expect variable name.",
            "[line 2] Error at ';': Expect expression.",
            "[line 4] Error at '{': Expect parameter name.",
        ]
    );
}

#[test]
fn errors_inside_blocks_resume_in_the_block() {
    let errs = errors("{ var x = ; print x; print ; }");
    assert_eq!(
        errs,
        vec![
            "[line 1] Error at ';': Expect expression.",
            "[line 1] Error at ';': Expect expression.",
        ]
    );
}

#[test]
fn any_error_discards_the_whole_tree() {
    let lexed = lox_lexer::lex("print 1; print ;");
    let out = parse(&lexed.tokens);
    assert!(out.statements.is_none());
    assert_eq!(out.diagnostics.len(), 1);
}

#[test]
fn unterminated_block() {
    assert_eq!(
        errors("{ print 1;"),
        vec!["[line 1] Error at end: Expect '}' after block."]
    );
}

#[test]
fn class_body_errors() {
    assert_eq!(
        errors("class { }"),
        vec!["[line 1] Error at '{': Expect class name."]
    );
    assert_eq!(
        errors("class A < { }"),
        vec!["[line 1] Error at '{': Expect superclass name."]
    );
    assert_eq!(
        errors("class A { foo( }"),
        vec!["[line 1] Error at '}': Expect parameter name."]
    );
}

#[test]
fn super_requires_method_name() {
    assert_eq!(
        errors("super;"),
        vec!["[line 1] Error at ';': Expect '.' after 'super'."]
    );
}

#[test]
fn too_many_arguments_is_not_fatal() {
    let args: Vec<String> = (0..=MAX_ARITY).map(|i| i.to_string()).collect();
    let source = format!("f({});", args.join(", "));
    let errs = errors(&source);
    assert_eq!(errs.len(), 1);
    assert!(errs[0].ends_with("Cannot have more than 255 arguments."));
}

#[test]
fn too_many_parameters_is_not_fatal() {
    let params: Vec<String> = (0..=MAX_ARITY).map(|i| format!("p{i}")).collect();
    let source = format!("fun f({}) {{}} print 1;", params.join(", "));
    let errs = errors(&source);
    assert_eq!(errs.len(), 1);
    assert!(errs[0].ends_with("Cannot have more than 255 parameters."));
}

#[test]
fn exactly_max_arity_is_fine() {
    let args: Vec<String> = (0..MAX_ARITY).map(|i| i.to_string()).collect();
    assert!(errors(&format!("f({});", args.join(", "))).is_empty());
}

#[test]
fn expression_mode_rejects_trailing_tokens() {
    let lexed = lox_lexer::lex("1 + 2; print 3;");
    let out = parse_expression(&lexed.tokens);
    assert!(out.expr.is_none());
    assert_eq!(out.diagnostics.len(), 1);

    let lexed = lox_lexer::lex("1 + 2");
    assert!(parse_expression(&lexed.tokens).expr.is_some());
}

#[test]
fn missing_eof_is_tolerated() {
    let mut tokens = lox_lexer::lex("print 1;").tokens;
    tokens.pop();
    assert!(parse(&tokens).statements.is_some());
    assert!(parse(&[]).statements.is_some_and(|s| s.is_empty()));
}

#[test]
fn deep_nesting_does_not_overflow() {
    let depth = 100_000;
    let source = format!("print {}1{};", "(".repeat(depth), ")".repeat(depth));
    let lexed = lox_lexer::lex(&source);
    let out = parse(&lexed.tokens);
    assert!(out.diagnostics.is_empty());
    assert!(out.statements.as_ref().is_some_and(|s| s.len() == 1));
    drop(out);
}

#[test]
fn deep_statement_nesting_does_not_overflow() {
    let depth = 100_000;
    let blocks = format!("{}print 1;{}", "{".repeat(depth), "}".repeat(depth));
    let chain = format!("{}print 0;", "if (true) print 1; else ".repeat(depth));
    for source in [blocks, chain] {
        let lexed = lox_lexer::lex(&source);
        let out = parse(&lexed.tokens);
        assert!(out.diagnostics.is_empty());
        drop(out);
    }
}
