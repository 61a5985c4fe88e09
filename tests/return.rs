mod common;
use common::{assert_fails_with, assert_stdout};

#[test]
fn return_with_no_value_yields_nil() {
    assert_stdout("fun f() { return; } print f();", &["nil"]);
}

#[test]
fn return_exits_from_inside_an_if() {
    assert_stdout("fun f() { if (true) return \"ok\"; return \"unreached\"; } print f();", &["ok"]);
}

#[test]
fn return_exits_from_inside_an_else() {
    assert_stdout("fun f() { if (false) return \"then\"; else return \"ok\"; } print f();", &["ok"]);
}

#[test]
fn return_exits_from_inside_a_while_loop() {
    assert_stdout(
        r#"
        fun f() {
            while (true) {
                return "ok";
            }
        }
        print f();
        "#,
        &["ok"],
    );
}

#[test]
fn return_from_a_method_stops_execution() {
    assert_stdout(
        r#"
        class Foo {
            bar() {
                return "ok";
                print "unreached";
            }
        }
        print Foo().bar();
        "#,
        &["ok"],
    );
}

#[test]
fn returning_from_top_level_code_is_a_resolve_error() {
    assert_fails_with("return 1;", 65, "Can't return from top-level code.");
}
