mod common;
use common::{assert_fails_with, assert_stdout};

#[test]
fn break_exits_a_while_loop_early() {
    assert_stdout(
        r#"
        var i = 0;
        while (true) {
            if (i >= 3) break;
            print i;
            i = i + 1;
        }
        "#,
        &["0", "1", "2"],
    );
}

#[test]
fn break_exits_a_for_loop_early() {
    assert_stdout(
        r#"
        for (var i = 0; i < 5; i = i + 1) {
            if (i >= 3) break;
            print i;
        }
        "#,
        &["0", "1", "2"],
    );
}

#[test]
fn break_only_exits_the_innermost_loop() {
    assert_stdout(
        r#"
        while (true) {
            while (true) {
                print "inside";
                break;
            }
            print "outside";
            break;
        }
        "#,
        &["inside", "outside"],
    );
}

#[test]
fn break_outside_a_loop_is_a_resolve_error() {
    assert_fails_with("break;", 65, "Can't jump from outside loop.");
}

#[test]
fn break_inside_a_function_nested_in_a_loop_is_a_resolve_error() {
    assert_fails_with(
        r#"
        fun outer() { while (true) { fun f() { break; } f(); } }
        outer();
        "#,
        65,
        "Can't jump from outside loop.",
    );
}
