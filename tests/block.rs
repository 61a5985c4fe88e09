mod common;
use common::assert_stdout;

#[test]
fn empty_block_runs_without_error() {
    assert_stdout("{ } print \"ok\";", &["ok"]);
}

#[test]
fn inner_scope_shadows_without_leaking_out() {
    assert_stdout(
        r#"
        var a = "outer";
        {
            var a = "inner";
            print a;
        }
        print a;
        "#,
        &["inner", "outer"],
    );
}

#[test]
fn assignment_in_a_block_reaches_the_outer_binding() {
    assert_stdout(
        r#"
        var a = "before";
        {
            a = "after";
        }
        print a;
        "#,
        &["after"],
    );
}
