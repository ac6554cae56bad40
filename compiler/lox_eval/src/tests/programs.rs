use pretty_assertions::assert_eq;

use super::output;

#[test]
fn arithmetic_and_printing() {
    assert_eq!(output("print 1 + 2;"), "3\n");
    assert_eq!(output("print 7 / 2;"), "3.5\n");
    assert_eq!(output("print -(2 * 3);"), "-6\n");
    assert_eq!(output("print 0.1 + 0.2;"), "0.30000000000000004\n");
}

#[test]
fn string_concatenation_stringifies_the_other_side() {
    assert_eq!(output("print \"a\" + 1;"), "a1\n");
    assert_eq!(output("print 2.5 + \"x\";"), "2.5x\n");
    assert_eq!(output("print \"v=\" + nil;"), "v=nil\n");
    assert_eq!(output("print \"\" + true;"), "true\n");
}

#[test]
fn equality_and_truthiness() {
    assert_eq!(output("print nil == nil;"), "true\n");
    assert_eq!(output("print nil == false;"), "false\n");
    assert_eq!(output("print 1 == \"1\";"), "false\n");
    assert_eq!(output("print \"ab\" == \"a\" + \"b\";"), "true\n");
    assert_eq!(output("if (0) print \"zero\"; if (\"\") print \"empty\";"), "zero\nempty\n");
    assert_eq!(output("print !nil;"), "true\n");
}

#[test]
fn logical_operators_yield_operands() {
    assert_eq!(output("print nil or \"dflt\";"), "dflt\n");
    assert_eq!(output("print 1 and 2;"), "2\n");
    assert_eq!(output("print false and undefined_name;"), "false\n");
    assert_eq!(output("print true or undefined_name;"), "true\n");
}

#[test]
fn ternary_short_circuits() {
    assert_eq!(output("print true ? 1 : undefined_name;"), "1\n");
    assert_eq!(output("print nil ? 1 : 2 ? 3 : 4;"), "3\n");
}

#[test]
fn comma_yields_right_operand() {
    assert_eq!(output("var a = 0; print (a = 1, a + 1);"), "2\n");
}

#[test]
fn compound_assignment() {
    let source = "
        var x = 10;
        x += 5; print x;
        x -= 3; print x;
        x *= 2; print x;
        x /= 4; print x;
        var s = \"a\";
        s += \"b\"; print s;";
    assert_eq!(output(source), "15\n12\n24\n6\nab\n");
}

#[test]
fn assignment_is_an_expression() {
    assert_eq!(output("var a; var b; a = b = 3; print a; print b;"), "3\n3\n");
}

#[test]
fn block_scoping_and_shadowing() {
    let source = "
        var a = \"global\";
        {
            var a = \"outer\";
            {
                var a = \"inner\";
                print a;
            }
            print a;
        }
        print a;";
    assert_eq!(output(source), "inner\nouter\nglobal\n");
}

#[test]
fn while_and_for_loops() {
    assert_eq!(output("var i = 0; while (i < 3) { print i; i += 1; }"), "0\n1\n2\n");
    assert_eq!(output("for (var i = 0; i < 3; i = i + 1) print i;"), "0\n1\n2\n");
}

#[test]
fn break_leaves_innermost_loop() {
    let source = "
        for (var i = 0; i < 3; i += 1) {
            for (var j = 0; ; j += 1) {
                if (j == 2) break;
                print i * 10 + j;
            }
        }";
    assert_eq!(output(source), "0\n1\n10\n11\n20\n21\n");
}

#[test]
fn functions_and_recursion() {
    let source = "
        fun fib(n) {
            if (n < 2) return n;
            return fib(n - 1) + fib(n - 2);
        }
        print fib(15);";
    assert_eq!(output(source), "610\n");
}

#[test]
fn fall_through_returns_nil() {
    assert_eq!(output("fun f() {} print f();"), "nil\n");
    assert_eq!(output("fun g() { return; } print g();"), "nil\n");
}

#[test]
fn return_exits_loops() {
    let source = "
        fun first_over(limit) {
            for (var i = 0; ; i += 1) {
                if (i * i > limit) return i;
            }
        }
        print first_over(50);";
    assert_eq!(output(source), "8\n");
}

#[test]
fn closures_keep_their_environment() {
    let source = "
        fun make_counter() {
            var count = 0;
            fun tick() { count += 1; return count; }
            return tick;
        }
        var a = make_counter();
        var b = make_counter();
        print a(); print a(); print b();";
    assert_eq!(output(source), "1\n2\n1\n");
}

#[test]
fn closure_resolution_is_static() {
    let source = "
        var a = \"global\";
        {
            fun show() { print a; }
            show();
            var a = \"block\";
            show();
        }";
    assert_eq!(output(source), "global\nglobal\n");
}

#[test]
fn per_iteration_closures_capture_distinct_values() {
    let source = "
        var fns = nil;
        var first; var second;
        for (var i = 0; i < 2; i += 1) {
            var j = i;
            fun get() { return j; }
            if (i == 0) first = get; else second = get;
        }
        print first();
        print second();";
    assert_eq!(output(source), "0\n1\n");
}

#[test]
fn lambdas() {
    assert_eq!(output("var sq = fun (x) { return x * x; }; print sq(7);"), "49\n");
    assert_eq!(output("print fun () {};"), "<lambda fn [at line 1]>\n");
    let source = "
        fun apply(f, v) { return f(v); }
        print apply(fun (n) { return n + 1; }, 41);";
    assert_eq!(output(source), "42\n");
}

#[test]
fn callable_stringification() {
    assert_eq!(output("fun f() {} print f;"), "<fn f>\n");
    assert_eq!(output("print clock;"), "<native fn>\n");
}

#[test]
fn clock_returns_seconds() {
    assert_eq!(output("print clock() > 1000000000;"), "true\n");
}

#[test]
fn integral_numbers_print_without_fraction() {
    assert_eq!(output("print 3.0; print 100; print -0.25;"), "3\n100\n-0.25\n");
}
