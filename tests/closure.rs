mod common;
use common::assert_stdout;

#[test]
fn closure_captures_variable_by_reference_not_value() {
    assert_stdout(
        r#"
        fun makeCounter() {
            var count = 0;
            fun increment() {
                count = count + 1;
                return count;
            }
            return increment;
        }
        var counter = makeCounter();
        print counter();
        print counter();
        print counter();
        "#,
        &["1", "2", "3"],
    );
}

#[test]
fn two_closures_over_the_same_variable_share_state() {
    assert_stdout(
        r#"
        fun makePair() {
            var value = "a";
            fun get() { return value; }
            fun set(v) { value = v; }
            return get;
        }
        print makePair()();
        "#,
        &["a"],
    );
}

#[test]
fn nested_closures_each_capture_their_own_scope() {
    assert_stdout(
        r#"
        fun outer() {
            var a = "a";
            fun middle() {
                var b = "b";
                fun inner() {
                    var c = "c";
                    print a;
                    print b;
                    print c;
                }
                inner();
            }
            middle();
        }
        outer();
        "#,
        &["a", "b", "c"],
    );
}

#[test]
fn closure_binds_the_method_parameter_it_was_declared_with() {
    assert_stdout(
        r#"
        class Holder {
            store(param) {
                fun retrieve() { return param; }
                return retrieve;
            }
        }
        print Holder().store("value")();
        "#,
        &["value"],
    );
}
