use super::{expr, sexpr};
use pretty_assertions::assert_eq;

#[test]
fn arithmetic_precedence() {
    assert_eq!(expr("1 + 2 * 3 - 4 / 2"), "(- (+ 1 (* 2 3)) (/ 4 2))");
}

#[test]
fn unary_binds_tighter_than_multiplication() {
    assert_eq!(expr("-a * !b"), "(* (- $a) (! $b))");
    assert_eq!(expr("--x"), "(- (- $x))");
}

#[test]
fn comparison_and_equality() {
    assert_eq!(expr("1 < 2 == 3 >= 4"), "(== (< 1 2) (>= 3 4))");
}

#[test]
fn logical_and_binds_tighter_than_or() {
    assert_eq!(expr("a or b and c"), "(or $a (and $b $c))");
}

#[test]
fn ternary_is_right_associative() {
    assert_eq!(expr("a ? b : c ? d : e"), "(? $a $b (? $c $d $e))");
    assert_eq!(expr("a or b ? 1 : 2"), "(? (or $a $b) 1 2)");
}

#[test]
fn assignment_is_right_associative() {
    assert_eq!(expr("a = b = 3"), "(= $a (= $b 3))");
}

#[test]
fn comma_is_loosest() {
    assert_eq!(expr("a = 1, b = 2"), "(, (= $a 1) (= $b 2))");
}

#[test]
fn compound_assignment_keeps_operator() {
    assert_eq!(expr("x += 2"), "(+= $x 2)");
    assert_eq!(expr("x /= y - 1"), "(/= $x (- $y 1))");
}

#[test]
fn property_assignment_becomes_set() {
    assert_eq!(expr("a.b.c = 1"), "(= (. (. $a b) c) 1)");
    assert_eq!(expr("p.count *= 2"), "(*= (. $p count) 2)");
}

#[test]
fn call_arguments_are_not_comma_expressions() {
    assert_eq!(expr("f(a, b)(c)"), "(call (call $f $a $b) $c)");
    assert_eq!(expr("f((a, b))"), "(call $f (group (, $a $b)))");
}

#[test]
fn literals() {
    assert_eq!(expr("\"hi\""), "\"hi\"");
    assert_eq!(expr("nil"), "nil");
    assert_eq!(expr("true"), "true");
    assert_eq!(expr("2.50"), "2.5");
}

#[test]
fn this_and_super() {
    assert_eq!(expr("this.x"), "(. this x)");
    assert_eq!(expr("super.init(1)"), "(call super.init 1)");
}

#[test]
fn lambda_expression() {
    assert_eq!(
        expr("fun (a, b) { return a; }"),
        "(lambda [a b] (block (return $a)))"
    );
}

#[test]
fn lambda_statement_vs_declaration() {
    // `fun (` is an expression statement, `fun name` a declaration
    assert_eq!(
        sexpr("fun (x) { print x; }(1);"),
        "(; (call (lambda [x] (block (print $x))) 1))\n"
    );
    assert_eq!(sexpr("fun f() {}"), "(fun f [] (block))\n");
}

#[test]
fn var_and_print() {
    assert_eq!(sexpr("var a = 1; var b; print a;"), "(var $a 1)\n(var $b)\n(print $a)\n");
}

#[test]
fn if_else_and_while() {
    assert_eq!(
        sexpr("if (a) print 1; else print 2; while (b) break;"),
        "(if $a (print 1) (print 2))\n(while $b (break))\n"
    );
}

#[test]
fn for_desugars_to_while() {
    assert_eq!(
        sexpr("for (var i = 0; i < 3; i = i + 1) print i;"),
        "(block (var $i 0) (while (< $i 3) (block (print $i) (; (= $i (+ $i 1))))))\n"
    );
}

#[test]
fn empty_for_clauses_loop_forever() {
    assert_eq!(sexpr("for (;;) break;"), "(while true (break))\n");
}

#[test]
fn class_members() {
    let source = "
        class Circle < Shape {
            init(r) { this.r = r; }
            area { return 3 * this.r * this.r; }
            class unit() { return Circle(1); }
        }";
    assert_eq!(
        sexpr(source),
        "(class Circle (< $Shape) \
         (method init [r] (block (; (= (. this r) $r)))) \
         (static unit [] (block (return (call $Circle 1)))) \
         (getter area [] (block (return (* (* 3 (. this r)) (. this r))))))\n"
    );
}

#[test]
fn return_without_value() {
    assert_eq!(sexpr("fun f() { return; }"), "(fun f [] (block (return)))\n");
}
