mod common;
use common::{assert_fails_with, assert_stdout};

#[test]
fn a_method_with_no_arguments_can_be_called() {
    assert_stdout(
        r#"
        class Foo {
            bar() { return "no args"; }
        }
        print Foo().bar();
        "#,
        &["no args"],
    );
}

#[test]
fn an_empty_method_body_yields_nil() {
    assert_stdout(
        r#"
        class Foo {
            bar() {}
        }
        print Foo().bar();
        "#,
        &["nil"],
    );
}

#[test]
fn calling_a_method_with_too_many_arguments_is_a_runtime_error() {
    assert_fails_with(
        r#"
        class Foo {
            bar(a, b) { return a + b; }
        }
        Foo().bar(1, 2, 3, 4);
        "#,
        70,
        "Expected 2 arguments but got 4.",
    );
}

#[test]
fn calling_a_method_with_too_few_arguments_is_a_runtime_error() {
    assert_fails_with(
        r#"
        class Foo {
            bar(a, b) { return a + b; }
        }
        Foo().bar(1);
        "#,
        70,
        "Expected 2 arguments but got 1.",
    );
}

#[test]
fn calling_an_undeclared_method_is_a_runtime_error() {
    assert_fails_with(
        r#"
        class Foo {}
        Foo().unknown();
        "#,
        70,
        "Undefined property 'unknown'.",
    );
}

#[test]
fn printing_a_bound_method_shows_its_name() {
    assert_stdout(
        r#"
        class Foo {
            method() {}
        }
        print Foo().method;
        "#,
        &["<fn method>"],
    );
}

#[test]
fn referring_to_a_method_by_bare_name_inside_its_own_body_is_a_runtime_error() {
    assert_fails_with(
        r#"
        class Foo {
            method() {
                print method;
            }
        }
        Foo().method();
        "#,
        70,
        "Undefined variable 'method'.",
    );
}

#[test]
fn more_than_255_arguments_to_a_method_is_a_parse_error() {
    let args = (0..256).map(|n| n.to_string()).collect::<Vec<_>>().join(", ");
    let source = format!("class Foo {{ bar() {{}} }} Foo().bar({args});");
    assert_fails_with(&source, 65, "Can't have more than 255 arguments.");
}

#[test]
fn more_than_255_parameters_on_a_method_is_a_parse_error() {
    let params = (0..256).map(|n| format!("p{n}")).collect::<Vec<_>>().join(", ");
    let source = format!("class Foo {{ bar({params}) {{}} }}");
    assert_fails_with(&source, 65, "Can't have more than 255 parameters.");
}
