mod common;
use common::assert_stdout;

#[test]
fn and_short_circuits_on_the_first_falsy_operand() {
    assert_stdout(
        r#"
        print false and "unreached";
        print 1 and 2;
        print nil and "unreached";
        print true and false;
        "#,
        &["false", "2", "nil", "false"],
    );
}

#[test]
fn and_returns_the_operand_values_not_booleans() {
    assert_stdout(r#"print 1 and "two";"#, &["two"]);
}

#[test]
fn or_short_circuits_on_the_first_truthy_operand() {
    assert_stdout(
        r#"
        print 1 or "unreached";
        print false or 2;
        print false or false or true;
        "#,
        &["1", "2", "true"],
    );
}

#[test]
fn or_falls_through_zero_and_empty_string_since_they_are_falsy() {
    assert_stdout(r#"print 0 or "fallback"; print "" or "fallback";"#, &["fallback", "fallback"]);
}
