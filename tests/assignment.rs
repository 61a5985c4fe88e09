mod common;
use common::{assert_fails_with, assert_stdout};

#[test]
fn global_assignment_returns_the_assigned_value() {
    assert_stdout("var a = 1; print a = 2;", &["2"]);
}

#[test]
fn assignment_to_an_undeclared_name_is_a_runtime_error() {
    assert_fails_with("a = 1;", 70, "Undefined variable 'a'.");
}

#[test]
fn chained_assignment_is_right_associative() {
    assert_stdout("var a = 0; var b = 0; a = b = 5; print a; print b;", &["5", "5"]);
}

#[test]
fn assigning_to_a_grouping_expression_is_a_parse_error() {
    assert_fails_with("var a = 1; (a) = 2;", 65, "Invalid assignment target.");
}

#[test]
fn assigning_to_this_is_a_parse_error() {
    assert_fails_with(
        r#"
        class Foo {
            bar() { this = 1; }
        }
        "#,
        65,
        "Invalid assignment target.",
    );
}
