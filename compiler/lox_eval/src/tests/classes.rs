use pretty_assertions::assert_eq;

use super::{output, runtime_error};

#[test]
fn class_and_instance_printing() {
    assert_eq!(output("class Bagel {} print Bagel; print Bagel();"), "Bagel\nBagel instance\n");
}

#[test]
fn fields_are_per_instance() {
    let source = "
        class Box {}
        var a = Box(); var b = Box();
        a.v = 1; b.v = 2;
        print a.v; print b.v;";
    assert_eq!(output(source), "1\n2\n");
}

#[test]
fn init_runs_on_construction() {
    let source = "
        class Point {
            init(x, y) { this.x = x; this.y = y; }
            sum() { return this.x + this.y; }
        }
        print Point(1, 2).sum();";
    assert_eq!(output(source), "3\n");
}

#[test]
fn init_returns_the_instance() {
    let source = "
        class Thing {
            init() { this.n = 1; return; }
        }
        var t = Thing();
        print t.init() == t;
        print t.n;";
    assert_eq!(output(source), "true\n1\n");
}

#[test]
fn inherited_init() {
    let source = "
        class Base { init(name) { this.name = name; } }
        class Derived < Base {}
        print Derived(\"d\").name;";
    assert_eq!(output(source), "d\n");
}

#[test]
fn methods_bind_this() {
    let source = "
        class Person {
            init(name) { this.name = name; }
            greet() { return \"hi \" + this.name; }
        }
        var greet = Person(\"ann\").greet;
        print greet();";
    assert_eq!(output(source), "hi ann\n");
}

#[test]
fn methods_are_inherited_and_overridable() {
    let source = "
        class A { who() { return \"A\"; } only_a() { return \"a\"; } }
        class B < A { who() { return \"B\"; } }
        var b = B();
        print b.who(); print b.only_a();";
    assert_eq!(output(source), "B\na\n");
}

#[test]
fn super_calls_the_superclass_method() {
    let source = "
        class A { method() { return \"A method\"; } }
        class B < A {
            method() { return \"B then \" + super.method(); }
        }
        class C < B {}
        print C().method();";
    assert_eq!(output(source), "B then A method\n");
}

#[test]
fn super_binds_the_original_receiver() {
    let source = "
        class A { name() { return this.tag; } }
        class B < A {
            init() { this.tag = \"from b\"; }
            name() { return super.name(); }
        }
        print B().name();";
    assert_eq!(output(source), "from b\n");
}

#[test]
fn getters_run_without_parentheses() {
    let source = "
        class Circle {
            init(r) { this.r = r; }
            area { return 3 * this.r * this.r; }
        }
        print Circle(2).area;";
    assert_eq!(output(source), "12\n");
}

#[test]
fn getters_are_inherited() {
    let source = "
        class A { kind { return \"a-kind\"; } }
        class B < A {}
        print B().kind;";
    assert_eq!(output(source), "a-kind\n");
}

#[test]
fn fields_shadow_methods_and_getters() {
    let source = "
        class T {
            m() { return \"method\"; }
            g { return \"getter\"; }
        }
        var t = T();
        t.m = \"field m\";
        t.g = \"field g\";
        print t.m; print t.g;";
    assert_eq!(output(source), "field m\nfield g\n");
}

#[test]
fn methods_take_precedence_over_getters() {
    let source = "
        class T {
            both() { return \"method\"; }
            both { return \"getter\"; }
        }
        print T().both();";
    assert_eq!(output(source), "method\n");
}

#[test]
fn static_methods_bind_the_class() {
    let source = "
        class Math {
            class square(n) { return n * n; }
            class me() { return this; }
        }
        print Math.square(4);
        print Math.me() == Math;";
    assert_eq!(output(source), "16\ntrue\n");
}

#[test]
fn statics_are_not_inherited() {
    let source = "
        class A { class make() { return 1; } }
        class B < A {}
        print B.make();";
    assert_eq!(
        runtime_error(source),
        "Undefined property 'make'.\n[line 4]"
    );
}

#[test]
fn statics_are_not_instance_methods() {
    let source = "
        class A { class make() { return 1; } }
        A().make();";
    assert_eq!(runtime_error(source), "Undefined property 'make'.\n[line 3]");
}

#[test]
fn classes_hold_fields() {
    let source = "
        class Config {}
        Config.level = 3;
        Config.level += 1;
        print Config.level;";
    assert_eq!(output(source), "4\n");
}

#[test]
fn compound_property_assignment() {
    let source = "
        class Counter { init() { this.n = 1; } }
        var c = Counter();
        c.n += 41;
        c.n *= 2;
        print c.n;";
    assert_eq!(output(source), "84\n");
}

#[test]
fn local_classes_and_methods_see_locals() {
    let source = "
        fun make(greeting) {
            class Greeter {
                say(name) { return greeting + \", \" + name; }
            }
            return Greeter();
        }
        print make(\"hello\").say(\"bob\");";
    assert_eq!(output(source), "hello, bob\n");
}

#[test]
fn class_names_are_visible_inside_their_methods() {
    let source = "
        {
            class Node {
                init(next) { this.next = next; }
                wrap() { return Node(this); }
            }
            print Node(nil).wrap().next.next;
        }";
    assert_eq!(output(source), "nil\n");
}

#[test]
fn calling_a_class_checks_init_arity() {
    let source = "
        class P { init(a, b) {} }
        P(1);";
    assert_eq!(runtime_error(source), "Expected 2 arguments but got 1.\n[line 3]");
    assert_eq!(
        runtime_error("class Q {} Q(1);"),
        "Expected 0 arguments but got 1.\n[line 1]"
    );
}

#[test]
fn dropping_a_long_linked_list_keeps_running() {
    let source = "
        class Node { init(next) { this.next = next; } }
        var head = nil;
        var i = 0;
        while (i < 300000) { head = Node(head); i += 1; }
        print \"built\";
        head = nil;
        print \"released\";";
    assert_eq!(output(source), "built\nreleased\n");
}
