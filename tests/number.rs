mod common;
use common::assert_stdout;

#[test]
fn integer_and_decimal_literals_print_without_surprises() {
    assert_stdout(
        r#"
        print 123;
        print 987654;
        print 0;
        print 123.456;
        print -0.001;
        "#,
        &["123", "987654", "0", "123.456", "-0.001"],
    );
}

#[test]
fn division_produces_a_float_result() {
    assert_stdout("print 8 / 5;", &["1.6"]);
}
