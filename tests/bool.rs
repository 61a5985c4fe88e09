mod common;
use common::assert_stdout;

#[test]
fn equality_compares_value_not_identity() {
    assert_stdout(
        r#"
        print true == true;
        print true == false;
        print true == "true";
        print true == 1;
        print false == false;
        print false != true;
        "#,
        &["true", "false", "false", "false", "true", "true"],
    );
}

#[test]
fn bang_negates_truthiness() {
    assert_stdout("print !true; print !false; print !!true;", &["false", "true", "true"]);
}
