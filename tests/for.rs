mod common;
use common::{assert_fails_with, assert_stdout};

#[test]
fn for_loop_counts_up_with_the_usual_three_clauses() {
    assert_stdout("for (var i = 0; i < 3; i = i + 1) print i;", &["0", "1", "2"]);
}

#[test]
fn each_iteration_gets_its_own_loop_variable_binding() {
    assert_stdout(
        r#"
        for (var i = 1; i <= 1; i = i + 1) {
            var j = i;
            print j;
        }
        "#,
        &["1"],
    );
}

#[test]
fn a_class_declaration_is_not_a_valid_for_body() {
    assert_fails_with("for (;;) class Foo {}", 65, "Expect expression.");
}

#[test]
fn a_function_declaration_is_not_a_valid_for_body() {
    assert_fails_with("for (;;) fun foo() {}", 65, "Expect expression.");
}

#[test]
fn returning_from_inside_a_for_loop_exits_the_enclosing_function() {
    assert_stdout(
        r#"
        fun f() {
            for (var i = 0; i < 3; i = i + 1) {
                if (i == 1) return i;
            }
        }
        print f();
        "#,
        &["1"],
    );
}
