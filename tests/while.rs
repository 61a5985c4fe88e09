mod common;
use common::{assert_fails_with, assert_stdout};

#[test]
fn a_class_declaration_is_not_a_valid_while_body() {
    assert_fails_with("while (false) class Foo {}", 65, "Expect expression.");
}

#[test]
fn a_fun_declaration_is_not_a_valid_while_body() {
    assert_fails_with("while (false) fun foo() {}", 65, "Expect expression.");
}

#[test]
fn a_var_declaration_is_not_a_valid_while_body() {
    assert_fails_with("while (false) var a = 1;", 65, "Expect expression.");
}

#[test]
fn a_closure_created_inside_the_loop_body_captures_its_own_iteration() {
    assert_stdout(
        r#"
        var i = 1;
        while (i <= 3) {
            var j = i;
            fun show() { print j; }
            show();
            i = i + 1;
        }
        "#,
        &["1", "2", "3"],
    );
}

#[test]
fn return_from_inside_a_while_loop_stops_the_loop() {
    assert_stdout(
        r#"
        fun f() {
            var i = 0;
            while (true) {
                if (i == 2) return i;
                i = i + 1;
            }
        }
        print f();
        "#,
        &["2"],
    );
}

#[test]
fn while_counts_down_then_up() {
    assert_stdout(
        r#"
        var i = 3;
        while (i > 0) {
            print i;
            i = i - 1;
        }
        while (i < 3) {
            i = i + 1;
            print i;
        }
        "#,
        &["3", "2", "1", "1", "2", "3"],
    );
}
